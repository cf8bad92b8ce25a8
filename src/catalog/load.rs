//! TOML loading for definition catalogs
//!
//! Mirror structs keep the file format decoupled from the def types;
//! conversion validates enum-like strings eagerly.

use serde::Deserialize;

use crate::catalog::database::{CatalogError, DefDatabase};
use crate::catalog::defs::{
    AgeConditionGiverDef, BodyDef, BodyPartNode, BodyPartTypeDef, ConditionDef, ConditionKind,
    DamageKind, ImplantRecipeDef, ItemDef, PartDepth, RaceDef,
};
use crate::core::types::{BodyId, ConditionId, Curve, ItemId, PartTypeId, RaceId, RecipeId};

impl DefDatabase {
    /// Load a catalog from a TOML file
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self, CatalogError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CatalogError::IoError(e.to_string()))?;
        Self::parse_toml(&content)
    }

    /// Parse a catalog from a TOML string and validate it
    pub fn parse_toml(content: &str) -> Result<Self, CatalogError> {
        let data: TomlCatalog =
            toml::from_str(content).map_err(|e| CatalogError::ParseError(e.to_string()))?;

        let mut db = Self::new();
        for part_type in data.part_types {
            db.add_part_type(part_type.into_def());
        }
        for body in data.bodies {
            db.add_body(body.into_def()?);
        }
        for race in data.races {
            db.add_race(race.into_def());
        }
        for cond in data.conditions {
            db.add_condition(cond.into_def()?);
        }
        for recipe in data.recipes {
            db.add_implant_recipe(recipe.into_def());
        }
        for giver in data.age_givers {
            db.add_age_giver(giver.into_def());
        }
        for item in data.items {
            db.add_item(item.into_def());
        }
        db.validate()?;
        Ok(db)
    }
}

/// TOML representation of a full catalog file
#[derive(Debug, Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    part_types: Vec<TomlPartType>,
    #[serde(default)]
    bodies: Vec<TomlBody>,
    #[serde(default)]
    races: Vec<TomlRace>,
    #[serde(default)]
    conditions: Vec<TomlCondition>,
    #[serde(default)]
    recipes: Vec<TomlRecipe>,
    #[serde(default)]
    age_givers: Vec<TomlAgeGiver>,
    #[serde(default)]
    items: Vec<TomlItem>,
}

#[derive(Debug, Deserialize)]
struct TomlPartType {
    id: String,
    label: String,
    #[serde(default)]
    skin_covered: bool,
    #[serde(default)]
    solid: bool,
    #[serde(default)]
    amputable: bool,
    #[serde(default)]
    frostbite_vulnerable: bool,
    #[serde(default)]
    is_leg: bool,
}

impl TomlPartType {
    fn into_def(self) -> BodyPartTypeDef {
        BodyPartTypeDef {
            id: PartTypeId::new(self.id),
            label: self.label,
            skin_covered: self.skin_covered,
            solid: self.solid,
            amputable: self.amputable,
            frostbite_vulnerable: self.frostbite_vulnerable,
            is_leg: self.is_leg,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TomlBody {
    id: String,
    label: String,
    parts: Vec<TomlBodyPart>,
}

#[derive(Debug, Deserialize)]
struct TomlBodyPart {
    part_type: String,
    parent: Option<usize>,
    depth: String,
    coverage: f32,
}

impl TomlBody {
    fn into_def(self) -> Result<BodyDef, CatalogError> {
        let parts = self
            .parts
            .into_iter()
            .map(|p| {
                Ok(BodyPartNode {
                    part_type: PartTypeId::new(p.part_type),
                    parent: p.parent,
                    depth: parse_depth(&p.depth)?,
                    coverage: p.coverage,
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        Ok(BodyDef {
            id: BodyId::new(self.id),
            label: self.label,
            parts,
        })
    }
}

fn parse_depth(s: &str) -> Result<PartDepth, CatalogError> {
    match s.to_lowercase().as_str() {
        "outside" => Ok(PartDepth::Outside),
        "inside" => Ok(PartDepth::Inside),
        _ => Err(CatalogError::ParseError(format!("invalid depth: {}", s))),
    }
}

#[derive(Debug, Deserialize)]
struct TomlRace {
    id: String,
    label: String,
    body: String,
    #[serde(default)]
    humanlike: bool,
    #[serde(default)]
    tool_user: bool,
    life_expectancy: f32,
    base_market_value: f32,
}

impl TomlRace {
    fn into_def(self) -> RaceDef {
        RaceDef {
            id: RaceId::new(self.id),
            label: self.label,
            body: BodyId::new(self.body),
            humanlike: self.humanlike,
            tool_user: self.tool_user,
            life_expectancy: self.life_expectancy,
            base_market_value: self.base_market_value,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TomlCondition {
    id: String,
    label: String,
    kind: String,
    #[serde(default)]
    can_be_permanent: bool,
    old_age_label: Option<String>,
    #[serde(default)]
    scenario_forceable: bool,
    from_damage: Option<String>,
}

impl TomlCondition {
    fn into_def(self) -> Result<ConditionDef, CatalogError> {
        let kind = match self.kind.to_lowercase().as_str() {
            "injury" => ConditionKind::Injury,
            "disease" => ConditionKind::Disease,
            "added_part" => ConditionKind::AddedPart,
            "missing_part" => ConditionKind::MissingPart,
            _ => {
                return Err(CatalogError::ParseError(format!(
                    "invalid condition kind: {}",
                    self.kind
                )))
            }
        };

        let from_damage = self
            .from_damage
            .map(|d| parse_damage(&d))
            .transpose()?;

        Ok(ConditionDef {
            id: ConditionId::new(self.id),
            label: self.label,
            kind,
            can_be_permanent: self.can_be_permanent,
            old_age_label: self.old_age_label,
            scenario_forceable: self.scenario_forceable,
            from_damage,
        })
    }
}

fn parse_damage(s: &str) -> Result<DamageKind, CatalogError> {
    match s.to_lowercase().as_str() {
        "bullet" => Ok(DamageKind::Bullet),
        "scratch" => Ok(DamageKind::Scratch),
        "bite" => Ok(DamageKind::Bite),
        "stab" => Ok(DamageKind::Stab),
        "frostbite" => Ok(DamageKind::Frostbite),
        _ => Err(CatalogError::ParseError(format!("invalid damage: {}", s))),
    }
}

#[derive(Debug, Deserialize)]
struct TomlRecipe {
    id: String,
    label: String,
    adds_condition: Option<String>,
    #[serde(default)]
    target_parts: Vec<String>,
    #[serde(default)]
    race_whitelist: Vec<String>,
    thing: Option<String>,
    #[serde(default)]
    max_severity: f32,
}

impl TomlRecipe {
    fn into_def(self) -> ImplantRecipeDef {
        ImplantRecipeDef {
            id: RecipeId::new(self.id),
            label: self.label,
            adds_condition: self.adds_condition.map(ConditionId::new),
            target_parts: self.target_parts.into_iter().map(PartTypeId::new).collect(),
            race_whitelist: self.race_whitelist.into_iter().map(RaceId::new).collect(),
            thing: self.thing.map(ItemId::new),
            max_severity: self.max_severity,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TomlAgeGiver {
    condition: String,
    #[serde(default)]
    target_parts: Vec<String>,
    /// Pairs of (fraction of life expectancy, chance per year)
    chance_curve: Vec<[f32; 2]>,
}

impl TomlAgeGiver {
    fn into_def(self) -> AgeConditionGiverDef {
        AgeConditionGiverDef {
            condition: ConditionId::new(self.condition),
            target_parts: self.target_parts.into_iter().map(PartTypeId::new).collect(),
            chance_curve: Curve::new(self.chance_curve.iter().map(|p| (p[0], p[1])).collect()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TomlItem {
    id: String,
    label: String,
    base_market_value: f32,
}

impl TomlItem {
    fn into_def(self) -> ItemDef {
        ItemDef {
            id: ItemId::new(self.id),
            label: self.label,
            base_market_value: self.base_market_value,
        }
    }
}
