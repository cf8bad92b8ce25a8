//! Cost engine: deterministic point valuation
//!
//! A pure read-then-compute pass over the customization records.
//! Stale entries (recipes or parts that no longer resolve against the
//! current content set) are warned about and skipped; the computation
//! itself never fails.

use crate::core::types::InstanceId;
use crate::cost::breakdown::{ColonyCostBreakdown, PawnCostBreakdown};
use crate::cost::constants::{
    DEFAULT_PAWN_MARKET_VALUE, FREE_TRAIT_COUNT, MARKET_VALUE_MARKUP, PASSION_COUNT_THRESHOLD,
    PASSION_LEVEL_COST, PASSION_OVERFLOW_RATE, RANDOM_ANIMAL_COST, RANDOM_MECH_COST,
    TRAIT_BASE_COST, TRAIT_COST_MULTIPLIER,
};
use crate::cost::oracle::MarketOracle;
use crate::health::HealthRegistry;
use crate::pawn::{EquipmentKind, EquipmentSelection, PawnCustomization};

pub struct CostEngine<'a, O: MarketOracle> {
    registry: &'a HealthRegistry,
    oracle: &'a O,
}

impl<'a, O: MarketOracle> CostEngine<'a, O> {
    pub fn new(registry: &'a HealthRegistry, oracle: &'a O) -> Self {
        Self { registry, oracle }
    }

    /// Value one customized pawn
    pub fn compute_pawn_cost(&self, pawn: &PawnCustomization) -> PawnCostBreakdown {
        let mut breakdown = PawnCostBreakdown::new();
        let options = self.registry.options_for(pawn.race_id());

        // Base valuation plus fixed markup
        let base = match self.oracle.pawn_value(pawn) {
            Some(value) => value,
            None => {
                tracing::warn!(pawn = %pawn.name, "pawn cannot be priced, using default value");
                DEFAULT_PAWN_MARKET_VALUE
            }
        };
        breakdown.market_value = base + MARKET_VALUE_MARKUP;

        // Passion surcharge: minor weighs 1, major weighs 3; past the
        // threshold the per-level cost rises and multiplies the whole
        // weighted count, not just the excess
        let mut weighted_count = 0u32;
        let mut skill_count = 0u32;
        for skill in &pawn.skills {
            let weight = skill.passion.weight();
            if weight > 0 {
                weighted_count += weight;
                skill_count += 1;
            }
        }
        breakdown.passion_count = weighted_count as f32;
        breakdown.skill_count = skill_count;
        let mut per_level_cost = PASSION_LEVEL_COST;
        if breakdown.passion_count > PASSION_COUNT_THRESHOLD {
            per_level_cost += PASSION_OVERFLOW_RATE * (breakdown.passion_count - PASSION_COUNT_THRESHOLD);
        }
        breakdown.passion_cost = per_level_cost * breakdown.passion_count;

        // Traits beyond the free allowance escalate in price
        let mut trait_cost = 0.0;
        let mut per_trait = TRAIT_BASE_COST;
        for i in FREE_TRAIT_COUNT..pawn.traits.len() {
            if i > FREE_TRAIT_COUNT {
                per_trait = (per_trait * TRAIT_COST_MULTIPLIER).ceil();
            }
            trait_cost += per_trait;
        }
        breakdown.trait_cost = trait_cost;

        // Apparel, rounded up once over the whole set
        let mut apparel = 0.0;
        for worn in &pawn.apparel {
            match self
                .oracle
                .item_value(&worn.item, worn.stuff.as_ref(), worn.quality)
            {
                Some(value) => apparel += value,
                None => {
                    tracing::warn!(item = %worn.item, pawn = %pawn.name, "apparel cannot be priced, skipped");
                }
            }
        }
        breakdown.apparel = apparel.ceil();

        // Implant materials: only the outermost implant on any ancestor
        // chain is priced
        let implanted: ahash::AHashSet<InstanceId> = pawn.implanted_parts();
        let mut implants = 0.0;
        for implant in &pawn.implants {
            let Some(option) = options.implant_option(&implant.recipe) else {
                tracing::warn!(
                    recipe = %implant.recipe,
                    pawn = %pawn.name,
                    "implant recipe not in this race's catalog, skipped"
                );
                continue;
            };
            if options.anatomy().try_get(implant.part).is_none() {
                tracing::warn!(
                    part = ?implant.part,
                    pawn = %pawn.name,
                    "implant part not in this race's anatomy, skipped"
                );
                continue;
            }
            if options.anatomy().ancestor_is_implanted(implant.part, &implanted) {
                continue;
            }
            let Some(thing) = &option.thing else {
                continue;
            };
            let count = if option.max_severity > 0.0 {
                implant.severity
            } else {
                1.0
            };
            match self.oracle.item_value(thing, None, None) {
                Some(value) => implants += value * count,
                None => {
                    tracing::warn!(item = %thing, pawn = %pawn.name, "implant item cannot be priced, skipped");
                }
            }
        }
        breakdown.implants = implants.ceil();

        // Possessions
        let mut possessions = 0.0;
        for stack in &pawn.possessions {
            match self.oracle.item_value(&stack.item, None, None) {
                Some(value) => possessions += value * stack.count as f32,
                None => {
                    tracing::warn!(item = %stack.item, pawn = %pawn.name, "possession cannot be priced, skipped");
                }
            }
        }
        breakdown.possessions = possessions.ceil();

        breakdown.compute_total();
        breakdown
    }

    /// Value one equipment row
    pub fn compute_equipment_cost(&self, selection: &EquipmentSelection) -> f32 {
        let count = selection.count as f32;
        match &selection.kind {
            EquipmentKind::Item {
                item,
                stuff,
                quality,
            } => match self.oracle.item_value(item, stuff.as_ref(), *quality) {
                Some(value) => value * count,
                None => {
                    tracing::warn!(item = %item, "equipment cannot be priced, skipped");
                    0.0
                }
            },
            EquipmentKind::RandomAnimal => RANDOM_ANIMAL_COST * count,
            EquipmentKind::RandomMech => RANDOM_MECH_COST * count,
            EquipmentKind::Unresolved => 0.0,
        }
    }

    /// Value the whole colony into an existing breakdown
    ///
    /// The per-pawn list is resized to the colonist count, then every
    /// entry is recomputed.
    pub fn compute_colony_cost(
        &self,
        pawns: &[PawnCustomization],
        equipment: &[EquipmentSelection],
        breakdown: &mut ColonyCostBreakdown,
    ) {
        breakdown.resize(pawns.len());
        for (i, pawn) in pawns.iter().enumerate() {
            breakdown.colonists[i] = self.compute_pawn_cost(pawn);
        }

        let mut equipment_cost = 0.0;
        let mut animal_cost = 0.0;
        for selection in equipment {
            let cost = self.compute_equipment_cost(selection);
            if selection.kind == EquipmentKind::RandomAnimal {
                animal_cost += cost;
            } else {
                equipment_cost += cost;
            }
        }
        breakdown.equipment = equipment_cost.ceil();
        breakdown.animals = animal_cost.ceil();

        breakdown.compute_totals();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DefDatabase, ImplantRecipeDef, ItemDef};
    use crate::core::types::{ConditionId, ItemId, PartTypeId, Quality, RaceId, RecipeId};
    use crate::cost::oracle::CatalogOracle;
    use crate::pawn::{ApparelSelection, Implant, Passion, Possession, SkillSelection, TraitSelection};

    fn skill(name: &str, passion: Passion) -> SkillSelection {
        SkillSelection {
            skill: name.into(),
            level: 6,
            passion,
        }
    }

    fn trait_sel(id: &str) -> TraitSelection {
        TraitSelection {
            id: id.into(),
            degree: 0,
        }
    }

    fn pawn() -> PawnCustomization {
        PawnCustomization::standard("Colonist", RaceId::new("human"), 30.0)
    }

    fn with_engine<R>(db: &DefDatabase, f: impl FnOnce(&CostEngine<CatalogOracle>) -> R) -> R {
        let registry = HealthRegistry::build(db, RaceId::new("human")).unwrap();
        let oracle = CatalogOracle::new(db);
        let engine = CostEngine::new(&registry, &oracle);
        f(&engine)
    }

    #[test]
    fn test_baseline_pawn_cost() {
        let db = DefDatabase::with_defaults();
        with_engine(&db, |engine| {
            let breakdown = engine.compute_pawn_cost(&pawn());
            // Race base 1750 plus fixed markup
            assert_eq!(breakdown.market_value, 2050.0);
            assert_eq!(breakdown.total, 2050.0);
        });
    }

    #[test]
    fn test_passion_surcharge_below_threshold() {
        let db = DefDatabase::with_defaults();
        with_engine(&db, |engine| {
            let mut colonist = pawn();
            colonist.skills.push(skill("shooting", Passion::Major));
            colonist.skills.push(skill("melee", Passion::Major));

            let breakdown = engine.compute_pawn_cost(&colonist);
            assert_eq!(breakdown.passion_count, 6.0);
            assert_eq!(breakdown.skill_count, 2);
            assert!((breakdown.passion_cost - 120.0).abs() < 1e-3);
        });
    }

    #[test]
    fn test_passion_surcharge_above_threshold() {
        let db = DefDatabase::with_defaults();
        with_engine(&db, |engine| {
            let mut colonist = pawn();
            for name in ["shooting", "melee", "construction", "plants"] {
                colonist.skills.push(skill(name, Passion::Major));
            }

            let breakdown = engine.compute_pawn_cost(&colonist);
            assert_eq!(breakdown.passion_count, 12.0);
            // per-level cost 20 + 0.4 * (12 - 8) = 21.6, times the full count
            assert!((breakdown.passion_cost - 259.2).abs() < 1e-3);
        });
    }

    #[test]
    fn test_passionless_skills_cost_nothing() {
        let db = DefDatabase::with_defaults();
        with_engine(&db, |engine| {
            let mut colonist = pawn();
            colonist.skills.push(skill("cooking", Passion::None));

            let breakdown = engine.compute_pawn_cost(&colonist);
            assert_eq!(breakdown.passion_cost, 0.0);
            assert_eq!(breakdown.skill_count, 0);
        });
    }

    #[test]
    fn test_trait_surcharge_escalates() {
        let db = DefDatabase::with_defaults();
        with_engine(&db, |engine| {
            let mut colonist = pawn();
            for id in ["kind", "tough", "ascetic"] {
                colonist.traits.push(trait_sel(id));
            }
            assert_eq!(engine.compute_pawn_cost(&colonist).trait_cost, 0.0);

            colonist.traits.push(trait_sel("jogger"));
            colonist.traits.push(trait_sel("nightowl"));
            // 100 for the fourth, ceil(100 * 2.5) = 250 for the fifth
            assert_eq!(engine.compute_pawn_cost(&colonist).trait_cost, 350.0);

            colonist.traits.push(trait_sel("bloodlust"));
            // 625 more for the sixth
            assert_eq!(engine.compute_pawn_cost(&colonist).trait_cost, 975.0);
        });
    }

    #[test]
    fn test_apparel_rounds_once_at_the_end() {
        let db = DefDatabase::with_defaults();
        with_engine(&db, |engine| {
            let mut colonist = pawn();
            // Two poor shirts at 22.5 each; per-item rounding would give 46
            for _ in 0..2 {
                colonist.apparel.push(ApparelSelection {
                    item: ItemId::new("shirt"),
                    stuff: None,
                    quality: Some(Quality::Poor),
                });
            }
            let breakdown = engine.compute_pawn_cost(&colonist);
            assert_eq!(breakdown.apparel, 45.0);
        });
    }

    #[test]
    fn test_implant_material_cost() {
        let db = DefDatabase::with_defaults();
        with_engine(&db, |engine| {
            let registry = HealthRegistry::build(&db, RaceId::new("human")).unwrap();
            let options = registry.options_for(&RaceId::new("human"));
            let eye = options
                .find_body_part_by_type_and_index(&PartTypeId::new("eye"), 0)
                .unwrap()
                .id;

            let mut colonist = pawn();
            colonist.implants.push(Implant {
                recipe: RecipeId::new("install_bionic_eye"),
                part: eye,
                severity: 1.0,
            });
            let breakdown = engine.compute_pawn_cost(&colonist);
            assert_eq!(breakdown.implants, 250.0);
        });
    }

    #[test]
    fn test_ancestor_override_skips_descendant_materials() {
        let db = DefDatabase::with_defaults();
        with_engine(&db, |engine| {
            let registry = HealthRegistry::build(&db, RaceId::new("human")).unwrap();
            let options = registry.options_for(&RaceId::new("human"));
            let arm = options
                .find_body_part_by_type_and_index(&PartTypeId::new("arm"), 0)
                .unwrap()
                .id;
            let hand = options
                .find_body_part_by_type_and_index(&PartTypeId::new("hand"), 0)
                .unwrap()
                .id;

            let mut colonist = pawn();
            colonist.implants.push(Implant {
                recipe: RecipeId::new("install_power_claw"),
                part: hand,
                severity: 1.0,
            });
            colonist.implants.push(Implant {
                recipe: RecipeId::new("install_bionic_arm"),
                part: arm,
                severity: 1.0,
            });

            // The claw sits below an implanted arm: only the arm is priced
            let breakdown = engine.compute_pawn_cost(&colonist);
            assert_eq!(breakdown.implants, 360.0);
        });
    }

    #[test]
    fn test_implant_severity_counts_units() {
        let mut db = DefDatabase::with_defaults();
        db.add_item(ItemDef {
            id: ItemId::new("rib_plating"),
            label: "rib plating".into(),
            base_market_value: 40.0,
        });
        db.add_implant_recipe(ImplantRecipeDef {
            id: RecipeId::new("install_rib_plating"),
            label: "install rib plating".into(),
            adds_condition: Some(ConditionId::new("bionic_arm")),
            target_parts: vec![PartTypeId::new("rib")],
            race_whitelist: Vec::new(),
            thing: Some(ItemId::new("rib_plating")),
            max_severity: 12.0,
        });

        with_engine(&db, |engine| {
            let registry = HealthRegistry::build(&db, RaceId::new("human")).unwrap();
            let options = registry.options_for(&RaceId::new("human"));
            let rib = options
                .find_body_part_by_type_and_index(&PartTypeId::new("rib"), 0)
                .unwrap()
                .id;

            let mut colonist = pawn();
            colonist.implants.push(Implant {
                recipe: RecipeId::new("install_rib_plating"),
                part: rib,
                severity: 7.0,
            });
            let breakdown = engine.compute_pawn_cost(&colonist);
            assert_eq!(breakdown.implants, 280.0);
        });
    }

    #[test]
    fn test_stale_implant_is_skipped_not_fatal() {
        let db = DefDatabase::with_defaults();
        with_engine(&db, |engine| {
            let mut colonist = pawn();
            colonist.implants.push(Implant {
                recipe: RecipeId::new("install_phantom"),
                part: crate::core::types::InstanceId(18),
                severity: 1.0,
            });
            colonist.implants.push(Implant {
                recipe: RecipeId::new("install_bionic_eye"),
                part: crate::core::types::InstanceId(999),
                severity: 1.0,
            });

            let breakdown = engine.compute_pawn_cost(&colonist);
            assert_eq!(breakdown.implants, 0.0);
            assert_eq!(breakdown.total, 2050.0);
        });
    }

    #[test]
    fn test_possessions_cost() {
        let db = DefDatabase::with_defaults();
        with_engine(&db, |engine| {
            let mut colonist = pawn();
            colonist.possessions.push(Possession {
                item: ItemId::new("medicine"),
                count: 3,
            });
            colonist.possessions.push(Possession {
                item: ItemId::new("packaged_meal"),
                count: 2,
            });
            let breakdown = engine.compute_pawn_cost(&colonist);
            assert_eq!(breakdown.possessions, 102.0);
        });
    }

    #[test]
    fn test_cost_is_idempotent() {
        let db = DefDatabase::with_defaults();
        with_engine(&db, |engine| {
            let mut colonist = pawn();
            colonist.skills.push(skill("shooting", Passion::Major));
            colonist.apparel.push(ApparelSelection {
                item: ItemId::new("duster"),
                stuff: None,
                quality: Some(Quality::Excellent),
            });

            let first = engine.compute_pawn_cost(&colonist);
            let second = engine.compute_pawn_cost(&colonist);
            assert_eq!(first, second);
        });
    }

    #[test]
    fn test_cost_monotonic_in_possessions() {
        let db = DefDatabase::with_defaults();
        with_engine(&db, |engine| {
            let mut colonist = pawn();
            let base_total = engine.compute_pawn_cost(&colonist).total;
            colonist.possessions.push(Possession {
                item: ItemId::new("medicine"),
                count: 1,
            });
            let one = engine.compute_pawn_cost(&colonist).total;
            colonist.possessions[0].count = 5;
            let five = engine.compute_pawn_cost(&colonist).total;

            assert!(one >= base_total);
            assert!(five >= one);
        });
    }

    #[test]
    fn test_equipment_branches() {
        let db = DefDatabase::with_defaults();
        with_engine(&db, |engine| {
            let item = EquipmentSelection::item(ItemId::new("shirt"), 2);
            assert_eq!(engine.compute_equipment_cost(&item), 60.0);

            let animals = EquipmentSelection::random_animal(2);
            assert_eq!(engine.compute_equipment_cost(&animals), 500.0);

            let mech = EquipmentSelection::random_mech(1);
            assert_eq!(engine.compute_equipment_cost(&mech), 1600.0);

            let unresolved = EquipmentSelection {
                kind: EquipmentKind::Unresolved,
                count: 4,
            };
            assert_eq!(engine.compute_equipment_cost(&unresolved), 0.0);

            let unknown = EquipmentSelection::item(ItemId::new("chronophone"), 1);
            assert_eq!(engine.compute_equipment_cost(&unknown), 0.0);
        });
    }

    #[test]
    fn test_colony_cost_tracks_colonist_count() {
        let db = DefDatabase::with_defaults();
        with_engine(&db, |engine| {
            let pawns = vec![pawn(), pawn(), pawn()];
            let equipment = vec![
                EquipmentSelection::item(ItemId::new("shirt"), 2),
                EquipmentSelection::random_animal(1),
            ];

            let mut colony = ColonyCostBreakdown::new();
            engine.compute_colony_cost(&pawns, &equipment, &mut colony);
            assert_eq!(colony.colonists.len(), 3);
            assert_eq!(colony.colonist_total, 6150.0);
            assert_eq!(colony.equipment, 60.0);
            assert_eq!(colony.animals, 250.0);
            assert_eq!(colony.total, 6460.0);

            // Dropping to two colonists truncates the list in place
            engine.compute_colony_cost(&pawns[..2], &equipment, &mut colony);
            assert_eq!(colony.colonists.len(), 2);
            assert_eq!(colony.colonist_total, 4100.0);
        });
    }
}
