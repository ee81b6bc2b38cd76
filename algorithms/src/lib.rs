mod algorithm;
mod balancing;
mod candidate;
mod error;
mod random;
mod weighted;
mod weighted_balancing;

pub use algorithm::SelectionAlgorithm;
pub use balancing::Balancing;
pub use candidate::Candidate;
pub use error::{AlgorithmError, AlgorithmResult};
pub use random::Random;
pub use weighted::Weighted;
pub use weighted_balancing::WeightedBalancing;
