//! Definition types for anatomy, conditions, recipes, and items
//!
//! These mirror the host game's def records. Flags the host keeps
//! internal (skin coverage, solidity) are plain public fields here.

use serde::{Deserialize, Serialize};

use crate::core::types::{BodyId, ConditionId, Curve, ItemId, PartTypeId, RaceId, RecipeId};

/// A body part type shared by every occurrence of that part
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyPartTypeDef {
    pub id: PartTypeId,
    /// Human-readable name
    pub label: String,
    /// Covered by skin (eligible for generic surface injuries)
    pub skin_covered: bool,
    /// Bone or other hard tissue
    pub solid: bool,
    /// Can be removed outright
    pub amputable: bool,
    /// Exposed to frostbite
    pub frostbite_vulnerable: bool,
    /// Leg segment (drives prosthetic selection after amputation)
    pub is_leg: bool,
}

/// Whether a part sits at the body surface or inside it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartDepth {
    Outside,
    Inside,
}

/// One node of a body's anatomy graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyPartNode {
    pub part_type: PartTypeId,
    /// Index of the parent node in the body's part list; None for the root
    pub parent: Option<usize>,
    pub depth: PartDepth,
    /// Relative hit weight when picking random parts
    pub coverage: f32,
}

/// A race's full anatomy graph as a flat node list
///
/// Parents must precede children, with a single root at index 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyDef {
    pub id: BodyId,
    pub label: String,
    pub parts: Vec<BodyPartNode>,
}

/// A playable or wild race
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceDef {
    pub id: RaceId,
    pub label: String,
    pub body: BodyId,
    pub humanlike: bool,
    /// Uses tools and wears apparel (affects frostbite eligibility)
    pub tool_user: bool,
    /// Expected lifespan in years
    pub life_expectancy: f32,
    /// Baseline market value of an unmodified pawn of this race
    pub base_market_value: f32,
}

/// What sort of condition a def describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    /// Wound or scar on a specific part
    Injury,
    /// Whole-body or organ illness
    Disease,
    /// Artificial part installed by a recipe
    AddedPart,
    /// Part removed entirely (amputation)
    MissingPart,
}

/// Damage source an old-age injury can arrive from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageKind {
    Bullet,
    Scratch,
    Bite,
    Stab,
    Frostbite,
}

/// A medical condition definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionDef {
    pub id: ConditionId,
    pub label: String,
    pub kind: ConditionKind,
    /// Injury can become a permanent scar
    pub can_be_permanent: bool,
    /// Display label used when this condition appears through aging
    pub old_age_label: Option<String>,
    /// The scenario system can force this condition onto a pawn
    pub scenario_forceable: bool,
    /// Permanent injuries caused by this damage resolve to this condition
    pub from_damage: Option<DamageKind>,
}

impl ConditionDef {
    /// Label shown in injury catalogs; aging conditions use their
    /// specialized old-age label
    pub fn display_label(&self) -> &str {
        self.old_age_label.as_deref().unwrap_or(&self.label)
    }
}

/// A surgery recipe installing an implant or replacement part
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImplantRecipeDef {
    pub id: RecipeId,
    pub label: String,
    /// Condition the surgery leaves on the part
    pub adds_condition: Option<ConditionId>,
    /// Part types the recipe can target (empty disqualifies it)
    pub target_parts: Vec<PartTypeId>,
    /// Races this recipe is restricted to (empty = any)
    pub race_whitelist: Vec<RaceId>,
    /// Physical item consumed, if the implant is a priced thing
    pub thing: Option<ItemId>,
    /// Maximum severity of the added condition; > 0 means severity
    /// counts as an installed-unit count
    pub max_severity: f32,
}

/// An age-driven condition giver from the race's aging system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgeConditionGiverDef {
    pub condition: ConditionId,
    /// Part types the giver can hit (empty = any live part)
    pub target_parts: Vec<PartTypeId>,
    /// Chance per year of life, keyed by fraction of life expectancy
    pub chance_curve: Curve,
}

/// An item definition (only what valuation needs)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: ItemId,
    pub label: String,
    pub base_market_value: f32,
}
