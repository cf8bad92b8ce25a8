//! Host-provided definition catalogs
//!
//! The host game supplies anatomy graphs, condition and recipe
//! definitions, and item data. Everything the indices need is an
//! explicit public field here; nothing is probed at query time.

pub mod database;
pub mod defs;
pub mod load;

pub use database::{CatalogError, DefDatabase};
pub use defs::{
    AgeConditionGiverDef, BodyDef, BodyPartNode, BodyPartTypeDef, ConditionDef, ConditionKind,
    DamageKind, ImplantRecipeDef, ItemDef, PartDepth, RaceDef,
};
