//! Market value oracle seam
//!
//! Pricing belongs to the host game. The engine consumes this trait;
//! the catalog-backed implementation exists for tests and demos.

use crate::catalog::DefDatabase;
use crate::core::types::{ItemId, Quality};
use crate::pawn::PawnCustomization;

/// External pricing function supplied by the host environment
pub trait MarketOracle {
    /// Unit market value of an item, stuff and quality aware
    ///
    /// None means the item cannot be priced (unknown to the current
    /// content set); callers degrade by skipping the entry.
    fn item_value(&self, item: &ItemId, stuff: Option<&ItemId>, quality: Option<Quality>)
        -> Option<f32>;

    /// Base market value of a pawn as currently customized
    fn pawn_value(&self, pawn: &PawnCustomization) -> Option<f32>;
}

/// Oracle backed by the definition catalog's base values
#[derive(Debug, Clone, Copy)]
pub struct CatalogOracle<'a> {
    db: &'a DefDatabase,
}

impl<'a> CatalogOracle<'a> {
    pub fn new(db: &'a DefDatabase) -> Self {
        Self { db }
    }
}

impl MarketOracle for CatalogOracle<'_> {
    fn item_value(
        &self,
        item: &ItemId,
        stuff: Option<&ItemId>,
        quality: Option<Quality>,
    ) -> Option<f32> {
        let mut value = self.db.item(item)?.base_market_value;
        if let Some(stuff) = stuff {
            if let Some(stuff_def) = self.db.item(stuff) {
                value += stuff_def.base_market_value;
            }
        }
        if let Some(quality) = quality {
            value *= quality.value_factor();
        }
        Some(value)
    }

    fn pawn_value(&self, pawn: &PawnCustomization) -> Option<f32> {
        self.db
            .race(pawn.race_id())
            .map(|race| race.base_market_value)
    }
}
