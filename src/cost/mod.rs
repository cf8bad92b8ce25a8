//! Point-cost valuation of customized colonies

pub mod breakdown;
pub mod constants;
pub mod engine;
pub mod oracle;

pub use breakdown::{ColonyCostBreakdown, PawnCostBreakdown};
pub use engine::CostEngine;
pub use oracle::{CatalogOracle, MarketOracle};
