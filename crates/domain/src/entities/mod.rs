//! Entities - actors and the items they own

mod actor;
mod item;
mod skill;

pub use actor::{Actor, ActorKind, SkillPoints};
pub use item::{EquipmentData, Item, ItemData, ItemKind, TraitData};
pub use skill::{default_hero_skills, SkillData};
