//! Application state and composition.

use std::sync::Arc;

use crate::entities;
use crate::infrastructure::{
    clock::{SystemClock, SystemRandom},
    ports::{ActorRepo, ChatLogPort, ClockPort, RandomPort},
    settings::ActorDefaults,
};
use crate::use_cases;

/// Main application state.
///
/// Holds all repository modules and use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Port traits injected directly.
pub struct Repositories {
    pub chat: Arc<dyn ChatLogPort>,
}

/// Container for all use cases.
pub struct UseCases {
    pub actor: use_cases::ActorUseCases,
    pub items: Arc<use_cases::ItemOps>,
    pub roll: Arc<use_cases::RollSkill>,
}

impl App {
    /// Create a new App with the system clock and RNG.
    pub fn new(
        actor_repo: Arc<dyn ActorRepo>,
        chat: Arc<dyn ChatLogPort>,
        actor_defaults: ActorDefaults,
    ) -> Self {
        Self::with_ports(
            actor_repo,
            chat,
            Arc::new(SystemClock::new()),
            Arc::new(SystemRandom::new()),
            actor_defaults,
        )
    }

    pub fn with_ports(
        actor_repo: Arc<dyn ActorRepo>,
        chat: Arc<dyn ChatLogPort>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        actor_defaults: ActorDefaults,
    ) -> Self {
        // Entity modules
        let actor = Arc::new(entities::Actor::new(actor_repo));

        let actor_uc = use_cases::ActorUseCases::new(
            Arc::new(use_cases::CreateActor::new(actor.clone(), actor_defaults)),
            Arc::new(use_cases::PrepareActor::new(actor.clone())),
            Arc::new(use_cases::ActorOps::new(actor.clone())),
        );
        let items = Arc::new(use_cases::ItemOps::new(actor.clone()));
        let roll = Arc::new(use_cases::RollSkill::new(actor, chat.clone(), random, clock));

        Self {
            repositories: Repositories { chat },
            use_cases: UseCases {
                actor: actor_uc,
                items,
                roll,
            },
        }
    }
}
