pub mod age_injuries;

pub use age_injuries::{AgeInjuryGenerator, PendingHarm};
