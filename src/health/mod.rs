//! Per-race health option indices
//!
//! Composes the anatomy index with implant and injury catalogs into
//! the query surface selection dialogs and the cost engine share.

pub mod implants;
pub mod injuries;
pub mod options;
pub mod registry;

pub use implants::ImplantOption;
pub use injuries::InjuryOption;
pub use options::{HealthOptionsIndex, HostBodyPartRef};
pub use registry::HealthRegistry;
