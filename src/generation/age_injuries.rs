//! Old-age injury generation
//!
//! Rolls up a lifetime of wear for an aged pawn: permanent scars on
//! coverage-weighted random parts, occasional amputations (sometimes
//! patched with a peg prosthetic), and the chronic conditions the
//! aging giver set hands out year by year. Mutates the pawn's
//! customization record and nothing else; whether an application would
//! be lethal is decided by an injected predicate.

use ahash::AHashSet;
use rand::Rng;

use crate::anatomy::BodyPartInstance;
use crate::catalog::{AgeConditionGiverDef, ConditionKind, DamageKind, DefDatabase, RaceDef};
use crate::core::types::{ConditionId, InstanceId, RecipeId};
use crate::health::{HealthOptionsIndex, HealthRegistry};
use crate::pawn::{Implant, Injury, PawnCustomization};

/// Chance per accumulation step for humanlike races
const HUMANLIKE_STEP_CHANCE: f32 = 0.15;
/// Chance per accumulation step for other races
const OTHER_STEP_CHANCE: f32 = 0.03;
/// Chance an old injury removed the part outright
const AMPUTATION_CHANCE: f32 = 0.3;
/// Chance an amputated humanlike leg got a peg prosthetic
const PEG_LEG_CHANCE: f32 = 0.5;
/// Permanent injury severity bounds
const MIN_INJURY_SEVERITY: f32 = 2.0;
const MAX_INJURY_SEVERITY: f32 = 6.0;
/// Accumulation runs up to this multiple of life expectancy
const AGE_CAP_FACTOR: f32 = 1.5;
/// Accumulation step is life expectancy divided by this
const STEP_DIVISOR: f32 = 8.0;

/// A mutation the generator wants to apply, submitted to the
/// lethality predicate before it lands
#[derive(Debug, Clone, PartialEq)]
pub enum PendingHarm {
    Amputation {
        part: InstanceId,
    },
    PermanentInjury {
        part: InstanceId,
        condition: ConditionId,
        severity: f32,
    },
    ChronicCondition {
        condition: ConditionId,
        part: Option<InstanceId>,
    },
}

pub struct AgeInjuryGenerator<'a, F>
where
    F: Fn(&PawnCustomization, &PendingHarm) -> bool,
{
    db: &'a DefDatabase,
    registry: &'a HealthRegistry,
    /// Pure predicate: would applying this harm kill the pawn
    would_kill: F,
    /// Prosthetic installed after some humanlike leg amputations
    peg_leg_recipe: Option<RecipeId>,
}

impl<'a, F> AgeInjuryGenerator<'a, F>
where
    F: Fn(&PawnCustomization, &PendingHarm) -> bool,
{
    pub fn new(db: &'a DefDatabase, registry: &'a HealthRegistry, would_kill: F) -> Self {
        Self {
            db,
            registry,
            would_kill,
            peg_leg_recipe: None,
        }
    }

    pub fn with_peg_leg(mut self, recipe: RecipeId) -> Self {
        self.peg_leg_recipe = Some(recipe);
        self
    }

    /// Generate a lifetime of age-related damage onto the pawn
    ///
    /// With `avoid_killing`, any application the lethality predicate
    /// flags is skipped. Without it, a lethal application lands, marks
    /// the pawn dead, and stops generation early.
    pub fn generate_random_old_age_injuries(
        &self,
        pawn: &mut PawnCustomization,
        avoid_killing: bool,
        rng: &mut impl Rng,
    ) {
        let Some(race) = self.db.race(pawn.race_id()) else {
            tracing::warn!(race = %pawn.race_id(), "no race definition, skipping age injuries");
            return;
        };
        let options = self.registry.options_for(pawn.race_id());

        let step = race.life_expectancy / STEP_DIVISOR;
        if step <= 0.0 {
            return;
        }
        let cap = pawn
            .biological_age
            .min(race.life_expectancy * AGE_CAP_FACTOR);
        let chance = if race.humanlike {
            HUMANLIKE_STEP_CHANCE
        } else {
            OTHER_STEP_CHANCE
        };

        let mut injury_count = 0u32;
        let mut age = step;
        while age <= cap {
            if rng.gen::<f32>() < chance {
                injury_count += 1;
            }
            age += step;
        }

        for _ in 0..injury_count {
            self.apply_random_old_injury(pawn, options, race, avoid_killing, rng);
            if pawn.dead {
                return;
            }
        }

        // Chronic conditions: every whole year of life re-rolls the
        // full giver set at that age
        for year in 1..=(pawn.biological_age.floor() as u32) {
            let life_fraction = year as f32 / race.life_expectancy;
            for giver in self.db.age_givers() {
                let chance = giver.chance_curve.evaluate(life_fraction);
                if chance > 0.0 && rng.gen::<f32>() < chance {
                    self.apply_chronic(pawn, options, giver, avoid_killing, rng);
                    if pawn.dead {
                        return;
                    }
                }
            }
        }
    }

    fn apply_random_old_injury(
        &self,
        pawn: &mut PawnCustomization,
        options: &HealthOptionsIndex,
        race: &RaceDef,
        avoid_killing: bool,
        rng: &mut impl Rng,
    ) {
        let implanted = pawn.implanted_parts();
        let missing = self.missing_parts(pawn);
        let candidates: Vec<&BodyPartInstance> = options
            .anatomy()
            .outside_parts()
            .filter(|p| !implanted.contains(&p.id))
            .filter(|p| !options.anatomy().ancestor_is_implanted(p.id, &implanted))
            .filter(|p| !missing.contains(&p.id))
            .filter(|p| !p.ancestors.iter().any(|a| missing.contains(a)))
            .collect();

        let Some(part) = pick_coverage_weighted(&candidates, rng) else {
            return;
        };

        let mut damage_kinds = vec![
            DamageKind::Bullet,
            DamageKind::Scratch,
            DamageKind::Bite,
            DamageKind::Stab,
        ];
        if part.frostbite_vulnerable && race.tool_user {
            damage_kinds.push(DamageKind::Frostbite);
        }
        let damage = damage_kinds[rng.gen_range(0..damage_kinds.len())];
        let Some(condition) = self.db.condition_for_damage(damage) else {
            tracing::warn!(damage = ?damage, "no condition for damage kind, skipping injury");
            return;
        };

        if rng.gen::<f32>() < AMPUTATION_CHANCE && part.amputable {
            let Some(missing_condition) = self.db.missing_part_condition() else {
                tracing::warn!("no missing-part condition defined, cannot amputate");
                return;
            };
            let harm = PendingHarm::Amputation { part: part.id };
            let lethal = (self.would_kill)(pawn, &harm);
            if lethal && avoid_killing {
                return;
            }
            let part_id = part.id;
            let was_leg = part.is_leg;
            pawn.injuries.push(Injury {
                condition: missing_condition.id.clone(),
                part: Some(part_id),
                severity: 1.0,
                permanent: true,
            });
            if lethal {
                pawn.dead = true;
                return;
            }
            if was_leg && race.humanlike && rng.gen::<f32>() < PEG_LEG_CHANCE {
                if let Some(recipe) = &self.peg_leg_recipe {
                    pawn.implants.push(Implant {
                        recipe: recipe.clone(),
                        part: part_id,
                        severity: 1.0,
                    });
                }
            }
        } else if condition.can_be_permanent {
            let severity = rng.gen_range(MIN_INJURY_SEVERITY..=MAX_INJURY_SEVERITY);
            let harm = PendingHarm::PermanentInjury {
                part: part.id,
                condition: condition.id.clone(),
                severity,
            };
            let lethal = (self.would_kill)(pawn, &harm);
            if lethal && avoid_killing {
                return;
            }
            pawn.injuries.push(Injury {
                condition: condition.id.clone(),
                part: Some(part.id),
                severity,
                permanent: true,
            });
            if lethal {
                pawn.dead = true;
            }
        }
    }

    fn apply_chronic(
        &self,
        pawn: &mut PawnCustomization,
        options: &HealthOptionsIndex,
        giver: &AgeConditionGiverDef,
        avoid_killing: bool,
        rng: &mut impl Rng,
    ) {
        let part = if giver.target_parts.is_empty() {
            None
        } else {
            let missing = self.missing_parts(pawn);
            let mut ids: Vec<InstanceId> = Vec::new();
            for part_type in &giver.target_parts {
                ids.extend(options.anatomy().of_type(part_type).iter().copied());
            }
            ids.retain(|id| !missing.contains(id));
            if ids.is_empty() {
                return;
            }
            Some(ids[rng.gen_range(0..ids.len())])
        };

        if pawn.has_condition_on(&giver.condition, part) {
            return;
        }

        let harm = PendingHarm::ChronicCondition {
            condition: giver.condition.clone(),
            part,
        };
        let lethal = (self.would_kill)(pawn, &harm);
        if lethal && avoid_killing {
            return;
        }
        pawn.injuries.push(Injury {
            condition: giver.condition.clone(),
            part,
            severity: 1.0,
            permanent: false,
        });
        if lethal {
            pawn.dead = true;
        }
    }

    fn missing_parts(&self, pawn: &PawnCustomization) -> AHashSet<InstanceId> {
        pawn.injuries
            .iter()
            .filter(|i| {
                self.db
                    .condition(&i.condition)
                    .map_or(false, |c| c.kind == ConditionKind::MissingPart)
            })
            .filter_map(|i| i.part)
            .collect()
    }
}

/// Pick a part at random, weighted by coverage
fn pick_coverage_weighted<'a>(
    candidates: &[&'a BodyPartInstance],
    rng: &mut impl Rng,
) -> Option<&'a BodyPartInstance> {
    let total: f32 = candidates.iter().map(|p| p.coverage).sum();
    if candidates.is_empty() || total <= 0.0 {
        return None;
    }
    let mut roll = rng.gen::<f32>() * total;
    for part in candidates {
        roll -= part.coverage;
        if roll <= 0.0 {
            return Some(part);
        }
    }
    candidates.last().copied()
}
