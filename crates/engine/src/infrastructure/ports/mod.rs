//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Actor storage (in-memory today, a database later)
//! - The chat feed roll cards are posted to
//! - Clock/Random (for testing)

mod error;
mod external;
mod repos;
mod testing;
pub mod types;

pub use error::RepoError;
pub use external::ChatLogPort;
pub use repos::ActorRepo;
pub use testing::{ClockPort, RandomPort};
pub use types::ChatMessage;

#[cfg(test)]
pub use external::MockChatLogPort;
#[cfg(test)]
pub use repos::MockActorRepo;
#[cfg(test)]
pub use testing::{MockClockPort, MockRandomPort};
