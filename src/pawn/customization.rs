//! Pawn customization records
//!
//! The preparation UI owns one record per starting colonist. The cost
//! engine reads them; the age-injury generator mutates them.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::types::{BodyId, ConditionId, InstanceId, ItemId, Quality, RaceId, RecipeId};

/// Per-skill enthusiasm level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Passion {
    None,
    Minor,
    Major,
}

impl Passion {
    /// Weight this passion contributes to the valuation count
    pub fn weight(&self) -> u32 {
        match self {
            Passion::None => 0,
            Passion::Minor => 1,
            Passion::Major => 3,
        }
    }
}

/// One skill as customized for a pawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillSelection {
    pub skill: String,
    pub level: u32,
    pub passion: Passion,
}

/// One trait as customized for a pawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitSelection {
    pub id: String,
    /// Trait degree for spectrum traits (e.g. industriousness)
    pub degree: i32,
}

/// A chosen implant attached to a specific body part instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Implant {
    pub recipe: RecipeId,
    pub part: InstanceId,
    /// Current severity of the added condition; doubles as the
    /// installed-unit count when the recipe defines a max severity
    pub severity: f32,
}

/// A chosen injury or condition, optionally tied to a part instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Injury {
    pub condition: ConditionId,
    /// None for whole-body conditions
    pub part: Option<InstanceId>,
    pub severity: f32,
    pub permanent: bool,
}

/// A worn apparel item, stuff and quality aware
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApparelSelection {
    pub item: ItemId,
    pub stuff: Option<ItemId>,
    pub quality: Option<Quality>,
}

/// A carried possession stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Possession {
    pub item: ItemId,
    pub count: u32,
}

/// Extra data for races supplied by content extensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedRaceDescriptor {
    pub race: RaceId,
    pub label: String,
    /// Body override when the extension replaces the race's anatomy
    pub body: Option<BodyId>,
}

/// How a pawn's race was resolved at data load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RaceKind {
    Standard(RaceId),
    Extended(ExtendedRaceDescriptor),
}

impl RaceKind {
    pub fn race_id(&self) -> &RaceId {
        match self {
            RaceKind::Standard(id) => id,
            RaceKind::Extended(desc) => &desc.race,
        }
    }
}

/// Everything the player customized about one starting colonist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PawnCustomization {
    pub name: String,
    pub race: RaceKind,
    pub biological_age: f32,
    pub skills: Vec<SkillSelection>,
    pub traits: Vec<TraitSelection>,
    pub apparel: Vec<ApparelSelection>,
    pub implants: Vec<Implant>,
    pub injuries: Vec<Injury>,
    pub possessions: Vec<Possession>,
    /// Set when injury generation was allowed a lethal outcome
    pub dead: bool,
}

impl PawnCustomization {
    pub fn new(name: impl Into<String>, race: RaceKind, biological_age: f32) -> Self {
        Self {
            name: name.into(),
            race,
            biological_age,
            skills: Vec::new(),
            traits: Vec::new(),
            apparel: Vec::new(),
            implants: Vec::new(),
            injuries: Vec::new(),
            possessions: Vec::new(),
            dead: false,
        }
    }

    /// Convenience constructor for a standard-race pawn
    pub fn standard(name: impl Into<String>, race: RaceId, biological_age: f32) -> Self {
        Self::new(name, RaceKind::Standard(race), biological_age)
    }

    pub fn race_id(&self) -> &RaceId {
        self.race.race_id()
    }

    /// Part instances that currently carry an implant
    pub fn implanted_parts(&self) -> AHashSet<InstanceId> {
        self.implants.iter().map(|i| i.part).collect()
    }

    /// True if this exact condition already sits on this part
    pub fn has_condition_on(&self, condition: &ConditionId, part: Option<InstanceId>) -> bool {
        self.injuries
            .iter()
            .any(|i| i.condition == *condition && i.part == part)
    }
}
