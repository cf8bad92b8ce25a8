//! Health options registry: the composition root
//!
//! Owns one HealthOptionsIndex per race, built eagerly in dependency
//! order at startup. Queries for unknown races fall back to the
//! designated baseline race instead of failing the whole pawn.

use ahash::AHashMap;

use crate::catalog::DefDatabase;
use crate::core::error::{MusterError, Result};
use crate::core::types::RaceId;
use crate::health::options::HealthOptionsIndex;

#[derive(Debug)]
pub struct HealthRegistry {
    races: AHashMap<RaceId, HealthOptionsIndex>,
    baseline: RaceId,
}

impl HealthRegistry {
    /// Build indices for every race in the database
    ///
    /// Races are processed in id order so logs and failures are
    /// deterministic. The baseline race must be present; it backs the
    /// fallback path for unknown races.
    pub fn build(db: &DefDatabase, baseline: RaceId) -> Result<Self> {
        db.validate()?;

        let mut races = AHashMap::new();
        for race in db.races_sorted() {
            let index = HealthOptionsIndex::build(db, &race.id)?;
            tracing::debug!(
                race = %race.id,
                parts = index.anatomy().len(),
                implants = index.implant_recipes_sorted_by_label().len(),
                injuries = index.injury_options_sorted_by_label().len(),
                "built health options"
            );
            races.insert(race.id.clone(), index);
        }

        if !races.contains_key(&baseline) {
            return Err(MusterError::UnknownRace(baseline));
        }

        Ok(Self { races, baseline })
    }

    pub fn get(&self, race: &RaceId) -> Option<&HealthOptionsIndex> {
        self.races.get(race)
    }

    /// Options for a race, falling back to the baseline when the race
    /// has no index of its own
    pub fn options_for(&self, race: &RaceId) -> &HealthOptionsIndex {
        if let Some(index) = self.races.get(race) {
            return index;
        }
        tracing::warn!(
            race = %race,
            baseline = %self.baseline,
            "no health options for race, using baseline"
        );
        self.races
            .get(&self.baseline)
            .unwrap_or_else(|| panic!("baseline race {} missing from registry", self.baseline))
    }

    pub fn baseline(&self) -> &RaceId {
        &self.baseline
    }

    pub fn len(&self) -> usize {
        self.races.len()
    }

    pub fn is_empty(&self) -> bool {
        self.races.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_indexes_every_race() {
        let db = DefDatabase::with_defaults();
        let registry = HealthRegistry::build(&db, RaceId::new("human")).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.get(&RaceId::new("human")).is_some());
    }

    #[test]
    fn test_unknown_race_falls_back_to_baseline() {
        let db = DefDatabase::with_defaults();
        let registry = HealthRegistry::build(&db, RaceId::new("human")).unwrap();
        let options = registry.options_for(&RaceId::new("thrumbo"));
        assert_eq!(options.race(), &RaceId::new("human"));
    }

    #[test]
    fn test_missing_baseline_is_an_error() {
        let db = DefDatabase::with_defaults();
        let result = HealthRegistry::build(&db, RaceId::new("thrumbo"));
        assert!(matches!(result, Err(MusterError::UnknownRace(_))));
    }

    #[test]
    fn test_invalid_catalog_fails_build() {
        let mut db = DefDatabase::with_defaults();
        db.add_race(crate::catalog::RaceDef {
            id: RaceId::new("ghost"),
            label: "ghost".into(),
            body: crate::core::types::BodyId::new("ethereal"),
            humanlike: false,
            tool_user: false,
            life_expectancy: 10.0,
            base_market_value: 100.0,
        });
        let result = HealthRegistry::build(&db, RaceId::new("human"));
        assert!(matches!(result, Err(MusterError::Catalog(_))));
    }
}
