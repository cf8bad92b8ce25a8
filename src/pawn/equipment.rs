//! Starting equipment selections

use serde::{Deserialize, Serialize};

use crate::core::types::{ItemId, Quality};

/// What an equipment row resolves to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EquipmentKind {
    /// A concrete item type, stuff and quality aware
    Item {
        item: ItemId,
        stuff: Option<ItemId>,
        quality: Option<Quality>,
    },
    /// Placeholder resolved to a random animal at game start
    RandomAnimal,
    /// Placeholder resolved to a random mechanoid at game start
    RandomMech,
    /// Selection that no longer resolves against loaded content
    Unresolved,
}

/// One row of the starting equipment list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentSelection {
    pub kind: EquipmentKind,
    pub count: u32,
}

impl EquipmentSelection {
    pub fn item(item: ItemId, count: u32) -> Self {
        Self {
            kind: EquipmentKind::Item {
                item,
                stuff: None,
                quality: None,
            },
            count,
        }
    }

    pub fn random_animal(count: u32) -> Self {
        Self {
            kind: EquipmentKind::RandomAnimal,
            count,
        }
    }

    pub fn random_mech(count: u32) -> Self {
        Self {
            kind: EquipmentKind::RandomMech,
            count,
        }
    }
}
