//! Cost model constants - all tunable values in one place

// Base valuation
pub const MARKET_VALUE_MARKUP: f32 = 300.0;
pub const DEFAULT_PAWN_MARKET_VALUE: f32 = 1750.0;

// Passion surcharge
pub const PASSION_LEVEL_COST: f32 = 20.0;
pub const PASSION_COUNT_THRESHOLD: f32 = 8.0;
pub const PASSION_OVERFLOW_RATE: f32 = 0.4;

// Trait surcharge
pub const FREE_TRAIT_COUNT: usize = 3;
pub const TRAIT_BASE_COST: f32 = 100.0;
pub const TRAIT_COST_MULTIPLIER: f32 = 2.5;

// Equipment placeholders
pub const RANDOM_ANIMAL_COST: f32 = 250.0;
pub const RANDOM_MECH_COST: f32 = 1600.0;
