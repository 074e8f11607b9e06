//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases orchestrate across entity modules to fulfill user stories.

pub mod actor;
pub mod items;
pub mod roll;

pub use actor::{ActorError, ActorOps, ActorUseCases, CreateActor, CreateActorInput, PrepareActor};
pub use items::ItemOps;
pub use roll::{RollError, RollSkill, RollSkillResult};
