pub mod index;

pub use index::{AnatomyIndex, BodyPartInstance};
