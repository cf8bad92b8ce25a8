//! Definition database: validated, explicit host data
//!
//! The database owns every def the indices consume. Construction is
//! either programmatic (`add_*` then `validate`), from TOML via
//! `load`, or `with_defaults` for the baseline humanlike set.

use ahash::AHashMap;
use thiserror::Error;

use crate::catalog::defs::{
    AgeConditionGiverDef, BodyDef, BodyPartNode, BodyPartTypeDef, ConditionDef, ConditionKind,
    DamageKind, ImplantRecipeDef, ItemDef, PartDepth, RaceDef,
};
use crate::core::types::{BodyId, ConditionId, Curve, ItemId, PartTypeId, RaceId, RecipeId};

/// Error type for catalog construction and loading
#[derive(Error, Debug, Clone)]
pub enum CatalogError {
    #[error("Body {body}: node {node} references unknown part type {part_type}")]
    UnknownPartType {
        body: BodyId,
        node: usize,
        part_type: PartTypeId,
    },

    #[error("Body {body}: node {node} has parent {parent} which does not precede it")]
    MisorderedParent {
        body: BodyId,
        node: usize,
        parent: usize,
    },

    #[error("Body {body}: node {node} is a second root (only node 0 may lack a parent)")]
    MultipleRoots { body: BodyId, node: usize },

    #[error("Body {body} has no parts")]
    EmptyBody { body: BodyId },

    #[error("Race {race} references unknown body {body}")]
    UnknownBody { race: RaceId, body: BodyId },

    #[error("Recipe {recipe} adds unknown condition {condition}")]
    UnknownRecipeCondition {
        recipe: RecipeId,
        condition: ConditionId,
    },

    #[error("Age giver references unknown condition {0}")]
    UnknownGiverCondition(ConditionId),

    #[error("Unknown race: {0}")]
    UnknownRace(RaceId),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// All definitions the customization core consumes
#[derive(Debug, Clone, Default)]
pub struct DefDatabase {
    part_types: AHashMap<PartTypeId, BodyPartTypeDef>,
    bodies: AHashMap<BodyId, BodyDef>,
    races: AHashMap<RaceId, RaceDef>,
    conditions: AHashMap<ConditionId, ConditionDef>,
    implant_recipes: Vec<ImplantRecipeDef>,
    age_givers: Vec<AgeConditionGiverDef>,
    items: AHashMap<ItemId, ItemDef>,
}

impl DefDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_part_type(&mut self, def: BodyPartTypeDef) {
        self.part_types.insert(def.id.clone(), def);
    }

    pub fn add_body(&mut self, def: BodyDef) {
        self.bodies.insert(def.id.clone(), def);
    }

    pub fn add_race(&mut self, def: RaceDef) {
        self.races.insert(def.id.clone(), def);
    }

    pub fn add_condition(&mut self, def: ConditionDef) {
        self.conditions.insert(def.id.clone(), def);
    }

    /// Recipes are kept as a list; the same recipe may arrive from
    /// several discovery paths and is de-duplicated at overlay build
    pub fn add_implant_recipe(&mut self, def: ImplantRecipeDef) {
        self.implant_recipes.push(def);
    }

    pub fn add_age_giver(&mut self, def: AgeConditionGiverDef) {
        self.age_givers.push(def);
    }

    pub fn add_item(&mut self, def: ItemDef) {
        self.items.insert(def.id.clone(), def);
    }

    pub fn part_type(&self, id: &PartTypeId) -> Option<&BodyPartTypeDef> {
        self.part_types.get(id)
    }

    pub fn body(&self, id: &BodyId) -> Option<&BodyDef> {
        self.bodies.get(id)
    }

    pub fn race(&self, id: &RaceId) -> Option<&RaceDef> {
        self.races.get(id)
    }

    pub fn condition(&self, id: &ConditionId) -> Option<&ConditionDef> {
        self.conditions.get(id)
    }

    pub fn item(&self, id: &ItemId) -> Option<&ItemDef> {
        self.items.get(id)
    }

    pub fn implant_recipes(&self) -> &[ImplantRecipeDef] {
        &self.implant_recipes
    }

    pub fn age_givers(&self) -> &[AgeConditionGiverDef] {
        &self.age_givers
    }

    pub fn conditions(&self) -> impl Iterator<Item = &ConditionDef> {
        self.conditions.values()
    }

    /// Races in id order, for deterministic iteration
    pub fn races_sorted(&self) -> Vec<&RaceDef> {
        let mut races: Vec<&RaceDef> = self.races.values().collect();
        races.sort_by(|a, b| a.id.cmp(&b.id));
        races
    }

    /// The condition a permanent injury from this damage resolves to
    pub fn condition_for_damage(&self, damage: DamageKind) -> Option<&ConditionDef> {
        self.conditions
            .values()
            .find(|c| c.from_damage == Some(damage))
    }

    /// The condition recorded when a part is amputated
    pub fn missing_part_condition(&self) -> Option<&ConditionDef> {
        self.conditions
            .values()
            .find(|c| c.kind == ConditionKind::MissingPart)
    }

    /// Check referential integrity of everything added so far
    pub fn validate(&self) -> Result<(), CatalogError> {
        for body in self.bodies.values() {
            if body.parts.is_empty() {
                return Err(CatalogError::EmptyBody {
                    body: body.id.clone(),
                });
            }
            for (i, node) in body.parts.iter().enumerate() {
                if !self.part_types.contains_key(&node.part_type) {
                    return Err(CatalogError::UnknownPartType {
                        body: body.id.clone(),
                        node: i,
                        part_type: node.part_type.clone(),
                    });
                }
                match node.parent {
                    None if i != 0 => {
                        return Err(CatalogError::MultipleRoots {
                            body: body.id.clone(),
                            node: i,
                        });
                    }
                    Some(parent) if parent >= i => {
                        return Err(CatalogError::MisorderedParent {
                            body: body.id.clone(),
                            node: i,
                            parent,
                        });
                    }
                    _ => {}
                }
            }
        }

        for race in self.races.values() {
            if !self.bodies.contains_key(&race.body) {
                return Err(CatalogError::UnknownBody {
                    race: race.id.clone(),
                    body: race.body.clone(),
                });
            }
        }

        for recipe in &self.implant_recipes {
            if let Some(condition) = &recipe.adds_condition {
                if !self.conditions.contains_key(condition) {
                    return Err(CatalogError::UnknownRecipeCondition {
                        recipe: recipe.id.clone(),
                        condition: condition.clone(),
                    });
                }
            }
        }

        for giver in &self.age_givers {
            if !self.conditions.contains_key(&giver.condition) {
                return Err(CatalogError::UnknownGiverCondition(giver.condition.clone()));
            }
        }

        Ok(())
    }

    /// Baseline humanlike definition set
    ///
    /// Used as the fallback anatomy when a race's own data is missing,
    /// and by tests and demos as a ready-made catalog.
    pub fn with_defaults() -> Self {
        let mut db = Self::new();

        let part = |id: &str,
                    label: &str,
                    skin_covered: bool,
                    solid: bool,
                    amputable: bool,
                    frostbite_vulnerable: bool,
                    is_leg: bool| BodyPartTypeDef {
            id: PartTypeId::new(id),
            label: label.into(),
            skin_covered,
            solid,
            amputable,
            frostbite_vulnerable,
            is_leg,
        };

        db.add_part_type(part("torso", "torso", true, false, false, false, false));
        db.add_part_type(part("spine", "spine", false, true, false, false, false));
        db.add_part_type(part("rib", "rib", false, true, false, false, false));
        db.add_part_type(part("neck", "neck", true, false, false, false, false));
        db.add_part_type(part("head", "head", true, false, false, false, false));
        db.add_part_type(part("skull", "skull", false, true, false, false, false));
        db.add_part_type(part("brain", "brain", false, false, false, false, false));
        db.add_part_type(part("eye", "eye", true, false, true, false, false));
        db.add_part_type(part("ear", "ear", true, false, true, true, false));
        db.add_part_type(part("nose", "nose", true, false, true, true, false));
        db.add_part_type(part("jaw", "jaw", true, true, true, false, false));
        db.add_part_type(part("shoulder", "shoulder", true, false, false, false, false));
        db.add_part_type(part("arm", "arm", true, false, true, false, false));
        db.add_part_type(part("hand", "hand", true, false, true, true, false));
        db.add_part_type(part("leg", "leg", true, false, true, false, true));
        db.add_part_type(part("foot", "foot", true, false, true, true, false));

        let node = |part_type: &str, parent: Option<usize>, depth: PartDepth, coverage: f32| {
            BodyPartNode {
                part_type: PartTypeId::new(part_type),
                parent,
                depth,
                coverage,
            }
        };

        use PartDepth::{Inside, Outside};
        let mut parts = vec![
            node("torso", None, Outside, 40.0),
            node("spine", Some(0), Inside, 2.5),
        ];
        for _ in 0..12 {
            parts.push(node("rib", Some(0), Inside, 1.0));
        }
        // Indices below depend on the 12 ribs occupying 2..=13
        parts.push(node("neck", Some(0), Outside, 7.5)); // 14
        parts.push(node("head", Some(14), Outside, 7.0)); // 15
        parts.push(node("skull", Some(15), Inside, 3.0)); // 16
        parts.push(node("brain", Some(16), Inside, 2.0)); // 17
        parts.push(node("eye", Some(15), Outside, 1.2)); // 18
        parts.push(node("eye", Some(15), Outside, 1.2)); // 19
        parts.push(node("ear", Some(15), Outside, 0.8)); // 20
        parts.push(node("ear", Some(15), Outside, 0.8)); // 21
        parts.push(node("nose", Some(15), Outside, 1.0)); // 22
        parts.push(node("jaw", Some(15), Outside, 1.0)); // 23
        parts.push(node("shoulder", Some(0), Outside, 6.0)); // 24
        parts.push(node("arm", Some(24), Outside, 7.0)); // 25
        parts.push(node("hand", Some(25), Outside, 2.5)); // 26
        parts.push(node("shoulder", Some(0), Outside, 6.0)); // 27
        parts.push(node("arm", Some(27), Outside, 7.0)); // 28
        parts.push(node("hand", Some(28), Outside, 2.5)); // 29
        parts.push(node("leg", Some(0), Outside, 14.0)); // 30
        parts.push(node("foot", Some(30), Outside, 2.5)); // 31
        parts.push(node("leg", Some(0), Outside, 14.0)); // 32
        parts.push(node("foot", Some(32), Outside, 2.5)); // 33

        db.add_body(BodyDef {
            id: BodyId::new("humanlike"),
            label: "humanlike".into(),
            parts,
        });

        db.add_race(RaceDef {
            id: RaceId::new("human"),
            label: "human".into(),
            body: BodyId::new("humanlike"),
            humanlike: true,
            tool_user: true,
            life_expectancy: 80.0,
            base_market_value: 1750.0,
        });

        let condition = |id: &str, label: &str, kind: ConditionKind| ConditionDef {
            id: ConditionId::new(id),
            label: label.into(),
            kind,
            can_be_permanent: false,
            old_age_label: None,
            scenario_forceable: true,
            from_damage: None,
        };

        let scar = |id: &str, label: &str, damage: DamageKind| ConditionDef {
            can_be_permanent: true,
            from_damage: Some(damage),
            ..condition(id, label, ConditionKind::Injury)
        };

        let chronic = |id: &str, label: &str, old_age: &str| ConditionDef {
            old_age_label: Some(old_age.into()),
            ..condition(id, label, ConditionKind::Disease)
        };

        db.add_condition(chronic("bad_back", "bad back", "bad back"));
        db.add_condition(chronic("frail", "frailty", "frail"));
        db.add_condition(chronic("cataract", "cataract", "cataract"));
        db.add_condition(chronic("hearing_loss", "hearing loss", "hearing loss"));
        db.add_condition(chronic("dementia", "dementia", "dementia"));
        db.add_condition(scar("gunshot", "gunshot", DamageKind::Bullet));
        db.add_condition(scar("scratch", "scratch", DamageKind::Scratch));
        db.add_condition(scar("animal_bite", "animal bite", DamageKind::Bite));
        db.add_condition(scar("stab", "stab", DamageKind::Stab));
        db.add_condition(scar("frostbite", "frostbite", DamageKind::Frostbite));
        db.add_condition(condition("asthma", "asthma", ConditionKind::Disease));
        db.add_condition(ConditionDef {
            scenario_forceable: false,
            ..condition("missing_part", "missing body part", ConditionKind::MissingPart)
        });
        db.add_condition(condition("bionic_eye", "bionic eye", ConditionKind::AddedPart));
        db.add_condition(condition("bionic_arm", "bionic arm", ConditionKind::AddedPart));
        db.add_condition(condition("power_claw", "power claw", ConditionKind::AddedPart));
        db.add_condition(condition("peg_leg", "peg leg", ConditionKind::AddedPart));

        let recipe = |id: &str, label: &str, adds: &str, targets: &[&str], thing: &str| {
            ImplantRecipeDef {
                id: RecipeId::new(id),
                label: label.into(),
                adds_condition: Some(ConditionId::new(adds)),
                target_parts: targets.iter().map(|t| PartTypeId::new(*t)).collect(),
                race_whitelist: Vec::new(),
                thing: Some(ItemId::new(thing)),
                max_severity: 0.0,
            }
        };

        db.add_implant_recipe(recipe(
            "install_bionic_eye",
            "install bionic eye",
            "bionic_eye",
            &["eye"],
            "bionic_eye",
        ));
        db.add_implant_recipe(recipe(
            "install_bionic_arm",
            "install bionic arm",
            "bionic_arm",
            &["arm"],
            "bionic_arm",
        ));
        db.add_implant_recipe(recipe(
            "install_power_claw",
            "install power claw",
            "power_claw",
            &["hand"],
            "power_claw",
        ));
        db.add_implant_recipe(recipe(
            "install_peg_leg",
            "install peg leg",
            "peg_leg",
            &["leg"],
            "peg_leg",
        ));

        let item = |id: &str, label: &str, value: f32| ItemDef {
            id: ItemId::new(id),
            label: label.into(),
            base_market_value: value,
        };

        db.add_item(item("bionic_eye", "bionic eye", 250.0));
        db.add_item(item("bionic_arm", "bionic arm", 360.0));
        db.add_item(item("power_claw", "power claw", 290.0));
        db.add_item(item("peg_leg", "peg leg", 12.0));
        db.add_item(item("shirt", "button-down shirt", 30.0));
        db.add_item(item("pants", "pants", 40.0));
        db.add_item(item("duster", "duster", 80.0));
        db.add_item(item("cloth", "cloth", 1.5));
        db.add_item(item("medicine", "medicine", 18.0));
        db.add_item(item("packaged_meal", "packaged survival meal", 24.0));

        let giver = |cond: &str, targets: &[&str], points: &[(f32, f32)]| AgeConditionGiverDef {
            condition: ConditionId::new(cond),
            target_parts: targets.iter().map(|t| PartTypeId::new(*t)).collect(),
            chance_curve: Curve::new(points.to_vec()),
        };

        db.add_age_giver(giver(
            "bad_back",
            &[],
            &[(0.4, 0.0), (0.7, 0.01), (1.2, 0.05)],
        ));
        db.add_age_giver(giver("frail", &[], &[(0.5, 0.0), (0.9, 0.015), (1.4, 0.08)]));
        db.add_age_giver(giver(
            "cataract",
            &["eye"],
            &[(0.5, 0.0), (0.8, 0.01), (1.3, 0.06)],
        ));
        db.add_age_giver(giver(
            "hearing_loss",
            &["ear"],
            &[(0.5, 0.0), (0.8, 0.012), (1.3, 0.07)],
        ));
        db.add_age_giver(giver(
            "dementia",
            &["brain"],
            &[(0.7, 0.0), (1.0, 0.005), (1.5, 0.04)],
        ));

        db
    }
}
