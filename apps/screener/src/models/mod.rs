pub mod criteria;
pub mod review;

pub use criteria::CriteriaList;
pub use review::{CriticVerdict, FitScore, ReviewRecord};
