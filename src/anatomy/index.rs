//! Anatomy index: flattens a body graph into addressable part instances
//!
//! A body definition lists parts hierarchically and may repeat a type
//! (twelve ribs, two eyes). The index assigns every occurrence a stable
//! handle and an ordinal among its same-typed siblings, caches the
//! ancestor chain up to the root, and keeps flat views the option
//! catalogs and cost engine query.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::catalog::{BodyDef, CatalogError, DefDatabase, PartDepth};
use crate::core::types::{BodyId, InstanceId, PartTypeId, RaceId, RecipeId};

/// One concrete occurrence of a body part within a race's anatomy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyPartInstance {
    pub id: InstanceId,
    pub part_type: PartTypeId,
    /// Display name of the part type
    pub label: String,
    /// Position among same-typed siblings (the 7th rib has ordinal 6)
    pub ordinal: u32,
    pub depth: PartDepth,
    pub coverage: f32,
    pub skin_covered: bool,
    pub solid: bool,
    pub amputable: bool,
    pub frostbite_vulnerable: bool,
    pub is_leg: bool,
    /// Targeted by at least one implant recipe
    pub replaceable: bool,
    /// Ancestor instances from direct parent up to the root; empty for
    /// the root itself
    pub ancestors: Vec<InstanceId>,
}

/// Flattened, indexed view of one race's anatomy
#[derive(Debug, Clone)]
pub struct AnatomyIndex {
    race: RaceId,
    body: BodyId,
    instances: Vec<BodyPartInstance>,
    outside: Vec<InstanceId>,
    skin_covered: Vec<InstanceId>,
    by_type: AHashMap<PartTypeId, Vec<InstanceId>>,
    recipe_parts: AHashMap<RecipeId, Vec<InstanceId>>,
}

const EMPTY_INSTANCES: &[InstanceId] = &[];

impl AnatomyIndex {
    /// Flatten a body definition into an index
    ///
    /// Walks the node list once. Parent indices precede children
    /// (validated at catalog load), so each ancestor chain extends the
    /// parent's already-computed chain.
    pub fn build(race: RaceId, body: &BodyDef, db: &DefDatabase) -> Result<Self, CatalogError> {
        let mut instances: Vec<BodyPartInstance> = Vec::with_capacity(body.parts.len());
        let mut outside = Vec::new();
        let mut skin_covered = Vec::new();
        let mut by_type: AHashMap<PartTypeId, Vec<InstanceId>> = AHashMap::new();

        for (i, node) in body.parts.iter().enumerate() {
            let type_def = db.part_type(&node.part_type).ok_or_else(|| {
                CatalogError::UnknownPartType {
                    body: body.id.clone(),
                    node: i,
                    part_type: node.part_type.clone(),
                }
            })?;

            let id = InstanceId(i as u32);
            let ancestors = match node.parent {
                None => {
                    if i != 0 {
                        return Err(CatalogError::MultipleRoots {
                            body: body.id.clone(),
                            node: i,
                        });
                    }
                    Vec::new()
                }
                Some(parent) => {
                    if parent >= i {
                        return Err(CatalogError::MisorderedParent {
                            body: body.id.clone(),
                            node: i,
                            parent,
                        });
                    }
                    let mut chain = Vec::with_capacity(instances[parent].ancestors.len() + 1);
                    chain.push(InstanceId(parent as u32));
                    chain.extend_from_slice(&instances[parent].ancestors);
                    chain
                }
            };

            let bucket = by_type.entry(node.part_type.clone()).or_default();
            let ordinal = bucket.len() as u32;
            bucket.push(id);

            if node.depth == PartDepth::Outside {
                outside.push(id);
            }
            if type_def.skin_covered {
                skin_covered.push(id);
            }

            instances.push(BodyPartInstance {
                id,
                part_type: node.part_type.clone(),
                label: type_def.label.clone(),
                ordinal,
                depth: node.depth,
                coverage: node.coverage,
                skin_covered: type_def.skin_covered,
                solid: type_def.solid,
                amputable: type_def.amputable,
                frostbite_vulnerable: type_def.frostbite_vulnerable,
                is_leg: type_def.is_leg,
                replaceable: false,
                ancestors,
            });
        }

        Ok(Self {
            race,
            body: body.id.clone(),
            instances,
            outside,
            skin_covered,
            by_type,
            recipe_parts: AHashMap::new(),
        })
    }

    pub fn race(&self) -> &RaceId {
        &self.race
    }

    pub fn body_id(&self) -> &BodyId {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn instances(&self) -> &[BodyPartInstance] {
        &self.instances
    }

    /// Look up an instance the index itself handed out
    ///
    /// Panics if the handle is out of range: handles are only minted at
    /// build time, so a miss means the index was built incorrectly.
    pub fn get(&self, id: InstanceId) -> &BodyPartInstance {
        self.instances
            .get(id.index())
            .unwrap_or_else(|| panic!("instance {:?} not in anatomy of {}", id, self.race))
    }

    /// Look up an instance that may come from stale customization data
    pub fn try_get(&self, id: InstanceId) -> Option<&BodyPartInstance> {
        self.instances.get(id.index())
    }

    /// Externally visible parts
    pub fn outside_parts(&self) -> impl Iterator<Item = &BodyPartInstance> {
        self.outside.iter().map(|id| &self.instances[id.index()])
    }

    /// Parts covered by skin
    pub fn skin_covered_parts(&self) -> impl Iterator<Item = &BodyPartInstance> {
        self.skin_covered
            .iter()
            .map(|id| &self.instances[id.index()])
    }

    /// All instances of a part type; empty if the type is absent
    pub fn of_type(&self, part_type: &PartTypeId) -> &[InstanceId] {
        self.by_type
            .get(part_type)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_INSTANCES)
    }

    pub fn count_of_type(&self, part_type: &PartTypeId) -> usize {
        self.of_type(part_type).len()
    }

    pub fn find_by_type_and_ordinal(
        &self,
        part_type: &PartTypeId,
        ordinal: u32,
    ) -> Option<&BodyPartInstance> {
        self.of_type(part_type)
            .get(ordinal as usize)
            .map(|id| &self.instances[id.index()])
    }

    /// Instances an implant recipe resolved to for this race
    ///
    /// Panics on an unindexed recipe: the overlay build registers every
    /// recipe it keeps, so a miss is a programmer error, not data drift.
    pub fn parts_for_recipe(&self, recipe: &RecipeId) -> &[InstanceId] {
        self.recipe_parts
            .get(recipe)
            .unwrap_or_else(|| panic!("recipe {} not indexed for race {}", recipe, self.race))
            .as_slice()
    }

    /// Record a recipe's resolved targets and mark them replaceable
    pub(crate) fn register_recipe(&mut self, recipe: RecipeId, parts: Vec<InstanceId>) {
        for id in &parts {
            self.instances[id.index()].replaceable = true;
        }
        self.recipe_parts.insert(recipe, parts);
    }

    /// True if any ancestor of the part is in the implanted set
    ///
    /// O(depth) walk over the cached chain.
    pub fn ancestor_is_implanted(&self, id: InstanceId, implanted: &AHashSet<InstanceId>) -> bool {
        let Some(instance) = self.try_get(id) else {
            return false;
        };
        instance.ancestors.iter().any(|a| implanted.contains(a))
    }
}
