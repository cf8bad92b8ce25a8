//! Implant recipe overlay
//!
//! Maps surgery recipes onto a race's anatomy index. A recipe survives
//! only if it adds a condition, names at least one target part type,
//! is not restricted to other races, and resolves to at least one
//! actual part instance.

use ahash::AHashSet;
use serde::Serialize;

use crate::anatomy::AnatomyIndex;
use crate::catalog::DefDatabase;
use crate::core::types::{ConditionId, InstanceId, ItemId, RaceId, RecipeId};

/// An implant recipe resolved against one race's anatomy
#[derive(Debug, Clone, Serialize)]
pub struct ImplantOption {
    pub recipe: RecipeId,
    pub label: String,
    pub adds_condition: ConditionId,
    /// Instances the recipe can be applied to; never empty
    pub parts: Vec<InstanceId>,
    /// Physical item consumed, if the implant is a priced thing
    pub thing: Option<ItemId>,
    pub max_severity: f32,
}

/// Resolve every applicable implant recipe against the anatomy
///
/// Marks resolved parts replaceable and registers each kept recipe's
/// target list on the index. The same recipe arriving from several
/// discovery paths is merged by identity before resolution. The result
/// is sorted by label (ordinal compare).
pub fn build_implant_overlay(
    db: &DefDatabase,
    race: &RaceId,
    anatomy: &mut AnatomyIndex,
) -> Vec<ImplantOption> {
    let mut seen: AHashSet<RecipeId> = AHashSet::new();
    let mut options = Vec::new();

    for recipe in db.implant_recipes() {
        if seen.contains(&recipe.id) {
            continue;
        }
        let Some(condition) = &recipe.adds_condition else {
            continue;
        };
        if recipe.target_parts.is_empty() {
            continue;
        }
        if !recipe.race_whitelist.is_empty() && !recipe.race_whitelist.contains(race) {
            continue;
        }
        seen.insert(recipe.id.clone());

        let mut parts = Vec::new();
        let mut resolved: AHashSet<InstanceId> = AHashSet::new();
        for part_type in &recipe.target_parts {
            for id in anatomy.of_type(part_type) {
                if resolved.insert(*id) {
                    parts.push(*id);
                }
            }
        }

        if parts.is_empty() {
            tracing::debug!(
                recipe = %recipe.id,
                race = %race,
                "implant recipe resolves to no parts, dropped"
            );
            continue;
        }

        anatomy.register_recipe(recipe.id.clone(), parts.clone());
        options.push(ImplantOption {
            recipe: recipe.id.clone(),
            label: recipe.label.clone(),
            adds_condition: condition.clone(),
            parts,
            thing: recipe.thing.clone(),
            max_severity: recipe.max_severity,
        });
    }

    options.sort_by(|a, b| a.label.cmp(&b.label));
    options
}
