pub mod customization;
pub mod equipment;

pub use customization::{
    ApparelSelection, ExtendedRaceDescriptor, Implant, Injury, Passion, PawnCustomization,
    Possession, RaceKind, SkillSelection, TraitSelection,
};
pub use equipment::{EquipmentKind, EquipmentSelection};
