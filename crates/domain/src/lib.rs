//! Hero Sheet domain.
//!
//! Character schema for the "How to Be a Hero" ruleset, the stat deriver
//! that groups skills into categories, and percentile skill checks.
//! Pure code: no I/O, randomness is passed in by the caller.

pub mod derivation;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use derivation::{
    derive_actor_stats, CategoryBucket, DerivedSkill, DerivedStats, SkillCategories,
};
pub use entities::{
    default_hero_skills, Actor, ActorKind, EquipmentData, Item, ItemData, ItemKind, SkillData,
    SkillPoints, TraitData,
};
pub use error::DomainError;
pub use ids::{ActorId, ChatMessageId, ItemId};
pub use value_objects::{
    DiceFormula, DiceParseError, DiceRollResult, RollItem, SkillCategory, SkillCheck,
    SkillCheckOutcome, PERCENTILE_DIE,
};
