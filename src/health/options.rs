//! Per-race health options index
//!
//! The single query surface for "what body parts, implants, and
//! injuries are valid for this pawn". Catalogs are sorted once at
//! build time; accessors hand out pre-sorted slices.

use serde::{Deserialize, Serialize};

use crate::anatomy::{AnatomyIndex, BodyPartInstance};
use crate::catalog::{CatalogError, DefDatabase};
use crate::core::types::{ConditionId, InstanceId, PartTypeId, RaceId, RecipeId};
use crate::health::implants::{build_implant_overlay, ImplantOption};
use crate::health::injuries::{build_injury_catalog, InjuryOption};
use crate::pawn::PawnCustomization;

/// A body part as the host game identifies it: part type plus position
/// among same-typed records
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostBodyPartRef {
    pub part_type: PartTypeId,
    pub ordinal: u32,
}

/// Composed per-race index of anatomy, implants, and injuries
#[derive(Debug, Clone)]
pub struct HealthOptionsIndex {
    race: RaceId,
    anatomy: AnatomyIndex,
    implant_options: Vec<ImplantOption>,
    injury_options: Vec<InjuryOption>,
}

impl HealthOptionsIndex {
    /// Build the full index for one race
    ///
    /// Construction order matters: the anatomy index first, then the
    /// implant overlay (which marks parts replaceable), then the injury
    /// catalog.
    pub fn build(db: &DefDatabase, race_id: &RaceId) -> Result<Self, CatalogError> {
        let race = db
            .race(race_id)
            .ok_or_else(|| CatalogError::UnknownRace(race_id.clone()))?;
        let body = db.body(&race.body).ok_or_else(|| CatalogError::UnknownBody {
            race: race_id.clone(),
            body: race.body.clone(),
        })?;

        let mut anatomy = AnatomyIndex::build(race_id.clone(), body, db)?;
        let implant_options = build_implant_overlay(db, race_id, &mut anatomy);
        let injury_options = build_injury_catalog(db);

        Ok(Self {
            race: race_id.clone(),
            anatomy,
            implant_options,
            injury_options,
        })
    }

    pub fn race(&self) -> &RaceId {
        &self.race
    }

    pub fn anatomy(&self) -> &AnatomyIndex {
        &self.anatomy
    }

    /// Size of a type's bucket, 0 if the type is unknown
    pub fn count_of_matching_body_parts(&self, part_type: &PartTypeId) -> usize {
        self.anatomy.count_of_type(part_type)
    }

    pub fn find_body_part_by_type_and_index(
        &self,
        part_type: &PartTypeId,
        index: u32,
    ) -> Option<&BodyPartInstance> {
        self.anatomy.find_by_type_and_ordinal(part_type, index)
    }

    /// Bridge a live host body-part reference to our indexed instance
    ///
    /// None means the customization cannot be priced or applied against
    /// this anatomy; callers warn and skip rather than fail.
    pub fn find_instance_for_body_part(&self, host: &HostBodyPartRef) -> Option<&BodyPartInstance> {
        self.anatomy
            .find_by_type_and_ordinal(&host.part_type, host.ordinal)
    }

    /// Instances an injury option may be applied to
    ///
    /// Unrestricted options apply to any skin-covered part; restricted
    /// options to the union of their part-type buckets.
    pub fn body_parts_applicable_to_injury(&self, option: &InjuryOption) -> Vec<&BodyPartInstance> {
        if option.part_types.is_empty() {
            return self.anatomy.skin_covered_parts().collect();
        }
        let mut parts = Vec::new();
        for part_type in &option.part_types {
            for id in self.anatomy.of_type(part_type) {
                parts.push(self.anatomy.get(*id));
            }
        }
        parts
    }

    /// Implant options, pre-sorted by label at build time
    pub fn implant_recipes_sorted_by_label(&self) -> &[ImplantOption] {
        &self.implant_options
    }

    /// Injury options, pre-sorted by label at build time
    pub fn injury_options_sorted_by_label(&self) -> &[InjuryOption] {
        &self.injury_options
    }

    /// True if any ancestor of the part already carries one of the
    /// pawn's implants
    pub fn ancestor_is_implanted(&self, part: InstanceId, pawn: &PawnCustomization) -> bool {
        self.anatomy
            .ancestor_is_implanted(part, &pawn.implanted_parts())
    }

    pub fn implant_option(&self, recipe: &RecipeId) -> Option<&ImplantOption> {
        self.implant_options.iter().find(|o| o.recipe == *recipe)
    }

    pub fn injury_option(&self, condition: &ConditionId) -> Option<&InjuryOption> {
        self.injury_options.iter().find(|o| o.condition == *condition)
    }
}
