//! Injury option catalog
//!
//! Merges two sources into one selectable list: age-driven condition
//! givers (chronic options) and scenario-forceable conditions (forced
//! options). Missing-part conditions are handled as amputations and
//! added-part conditions as implants, so neither appears here.

use serde::Serialize;
use std::collections::HashMap;

use crate::catalog::{ConditionKind, DefDatabase};
use crate::core::types::{ConditionId, PartTypeId};

/// A selectable injury or condition
#[derive(Debug, Clone, Serialize)]
pub struct InjuryOption {
    pub condition: ConditionId,
    pub label: String,
    /// Arrives through the aging system rather than explicit forcing
    pub chronic: bool,
    /// Part types the option may target (empty = any skin-covered part)
    pub part_types: Vec<PartTypeId>,
}

/// Build the injury option catalog from the condition definitions
///
/// Colliding labels are rewritten to `"{label} ({condition label})"`;
/// any collisions that survive even that get the condition id appended,
/// so labels are pairwise unique for arbitrary input. The result is
/// sorted by label (ordinal compare).
pub fn build_injury_catalog(db: &DefDatabase) -> Vec<InjuryOption> {
    let mut options: Vec<InjuryOption> = Vec::new();
    let mut chronic_conditions: Vec<ConditionId> = Vec::new();

    for giver in db.age_givers() {
        let Some(condition) = db.condition(&giver.condition) else {
            tracing::warn!(condition = %giver.condition, "age giver references unknown condition, skipped");
            continue;
        };
        if excluded_kind(condition.kind) || chronic_conditions.contains(&condition.id) {
            continue;
        }
        chronic_conditions.push(condition.id.clone());
        options.push(InjuryOption {
            condition: condition.id.clone(),
            label: condition.display_label().to_string(),
            chronic: true,
            part_types: giver.target_parts.clone(),
        });
    }

    // Deterministic order before the label-collision pass
    let mut forceable: Vec<_> = db
        .conditions()
        .filter(|c| c.scenario_forceable)
        .filter(|c| !excluded_kind(c.kind))
        .filter(|c| !chronic_conditions.contains(&c.id))
        .collect();
    forceable.sort_by(|a, b| a.id.cmp(&b.id));

    for condition in forceable {
        options.push(InjuryOption {
            condition: condition.id.clone(),
            label: condition.display_label().to_string(),
            chronic: false,
            part_types: Vec::new(),
        });
    }

    disambiguate_labels(db, &mut options);
    options.sort_by(|a, b| a.label.cmp(&b.label));
    options
}

fn excluded_kind(kind: ConditionKind) -> bool {
    matches!(kind, ConditionKind::MissingPart | ConditionKind::AddedPart)
}

fn disambiguate_labels(db: &DefDatabase, options: &mut [InjuryOption]) {
    // First pass appends the raw condition label
    let changed = rewrite_colliding(options, |option| {
        db.condition(&option.condition)
            .map(|c| c.label.clone())
            .unwrap_or_else(|| option.condition.to_string())
    });

    // Conditions whose raw labels also collide fall back to the id
    if changed {
        rewrite_colliding(options, |option| option.condition.to_string());
    }
}

fn rewrite_colliding<F>(options: &mut [InjuryOption], suffix: F) -> bool
where
    F: Fn(&InjuryOption) -> String,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for option in options.iter() {
        *counts.entry(option.label.clone()).or_default() += 1;
    }
    let mut changed = false;
    for option in options.iter_mut() {
        if counts[&option.label] > 1 {
            option.label = format!("{} ({})", option.label, suffix(option));
            changed = true;
        }
    }
    changed
}
