//! Cost breakdown value objects
//!
//! Derived, recomputed, never persisted. The colony breakdown keeps
//! its per-pawn list sized to the current colonist count instead of
//! rebuilding it from scratch.

use serde::Serialize;

/// Point valuation of one customized pawn
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PawnCostBreakdown {
    /// Oracle valuation of the pawn plus the fixed markup
    pub market_value: f32,
    /// Weighted passion count (minor 1, major 3); kept for display
    pub passion_count: f32,
    /// Number of skills with any passion; bookkeeping only
    pub skill_count: u32,
    pub passion_cost: f32,
    pub trait_cost: f32,
    /// Rounded up independently
    pub apparel: f32,
    /// Rounded up independently
    pub implants: f32,
    /// Rounded up independently
    pub possessions: f32,
    /// Ceiling of the sum of all subtotals
    pub total: f32,
}

impl PawnCostBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the total from the current subtotals
    pub fn compute_total(&mut self) {
        self.total = (self.market_value
            + self.passion_cost
            + self.trait_cost
            + self.apparel
            + self.implants
            + self.possessions)
            .ceil();
    }
}

/// Point valuation of the whole starting colony
#[derive(Debug, Clone, Default, Serialize)]
pub struct ColonyCostBreakdown {
    /// One entry per colonist, index-aligned with the pawn list
    pub colonists: Vec<PawnCostBreakdown>,
    pub colonist_total: f32,
    pub equipment: f32,
    pub animals: f32,
    /// Cross-cutting display subtotals aggregated across all pawns
    pub apparel_total: f32,
    pub implant_total: f32,
    pub possession_total: f32,
    pub total: f32,
}

impl ColonyCostBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grow or shrink the per-pawn list to the colonist count
    ///
    /// Growing appends fresh zeroed entries; shrinking truncates from
    /// the tail, preserving the leading entries in order.
    pub fn resize(&mut self, colonist_count: usize) {
        self.colonists.resize_with(colonist_count, PawnCostBreakdown::new);
    }

    /// Recompute aggregate totals from the per-pawn entries
    pub fn compute_totals(&mut self) {
        self.colonist_total = self.colonists.iter().map(|c| c.total).sum::<f32>().ceil();
        self.apparel_total = self.colonists.iter().map(|c| c.apparel).sum::<f32>().ceil();
        self.implant_total = self.colonists.iter().map(|c| c.implants).sum::<f32>().ceil();
        self.possession_total = self
            .colonists
            .iter()
            .map(|c| c.possessions)
            .sum::<f32>()
            .ceil();
        self.total = (self.colonist_total + self.equipment + self.animals).ceil();
    }
}
