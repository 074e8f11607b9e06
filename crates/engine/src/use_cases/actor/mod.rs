//! Actor use cases.
//!
//! Creation (with the hero starter skills), explicit preparation, and the
//! simple CRUD operations. Every path that changes an actor recomputes its
//! derived stats before saving.

use std::sync::Arc;

use herosheet_domain::{self as domain, default_hero_skills, ActorId, ActorKind, DomainError, Item};

use crate::entities::Actor;
use crate::infrastructure::ports::RepoError;
use crate::infrastructure::settings::ActorDefaults;

/// Container for actor use cases.
pub struct ActorUseCases {
    pub create: Arc<CreateActor>,
    pub prepare: Arc<PrepareActor>,
    pub ops: Arc<ActorOps>,
}

impl ActorUseCases {
    pub fn new(create: Arc<CreateActor>, prepare: Arc<PrepareActor>, ops: Arc<ActorOps>) -> Self {
        Self {
            create,
            prepare,
            ops,
        }
    }
}

/// Input for creating an actor.
#[derive(Debug, Clone)]
pub struct CreateActorInput {
    pub name: String,
    pub kind: ActorKind,
    /// Falls back to the configured default budget
    pub skill_points_total: Option<i32>,
    pub items: Vec<Item>,
}

impl CreateActorInput {
    pub fn new(name: impl Into<String>, kind: ActorKind) -> Self {
        Self {
            name: name.into(),
            kind,
            skill_points_total: None,
            items: Vec::new(),
        }
    }
}

/// Create an actor.
///
/// A hero created without any items receives the starter skill set when
/// seeding is enabled.
pub struct CreateActor {
    actor: Arc<Actor>,
    defaults: ActorDefaults,
}

impl CreateActor {
    pub fn new(actor: Arc<Actor>, defaults: ActorDefaults) -> Self {
        Self { actor, defaults }
    }

    pub async fn execute(&self, input: CreateActorInput) -> Result<domain::Actor, ActorError> {
        let total = input
            .skill_points_total
            .unwrap_or(self.defaults.skill_points_total);
        let mut actor = domain::Actor::new(input.name, input.kind, total)?;

        let seeded = if input.items.is_empty()
            && input.kind == ActorKind::Hero
            && self.defaults.seed_default_skills
        {
            actor.add_items(default_hero_skills()?);
            true
        } else {
            actor.add_items(input.items);
            false
        };

        self.actor.save(&actor).await?;

        tracing::info!(
            actor_id = %actor.id,
            name = %actor.name,
            kind = actor.kind.as_str(),
            seeded,
            item_count = actor.items.len(),
            "Actor created"
        );
        Ok(actor)
    }
}

/// Recompute an actor's derived stats and persist them.
pub struct PrepareActor {
    actor: Arc<Actor>,
}

impl PrepareActor {
    pub fn new(actor: Arc<Actor>) -> Self {
        Self { actor }
    }

    pub async fn execute(&self, id: ActorId) -> Result<domain::Actor, ActorError> {
        let _guard = self.actor.lock(id).await;
        // The entity recomputes on load
        let actor = load(&self.actor, id).await?;
        self.actor.save(&actor).await?;

        tracing::debug!(
            actor_id = %id,
            skills = actor.skill_count(),
            remaining = ?actor.skill_points.remaining,
            "Actor prepared"
        );
        Ok(actor)
    }
}

/// Actor CRUD operations.
pub struct ActorOps {
    actor: Arc<Actor>,
}

impl ActorOps {
    pub fn new(actor: Arc<Actor>) -> Self {
        Self { actor }
    }

    pub async fn get(&self, id: ActorId) -> Result<domain::Actor, ActorError> {
        load(&self.actor, id).await
    }

    pub async fn list(&self) -> Result<Vec<domain::Actor>, ActorError> {
        Ok(self.actor.list().await?)
    }

    pub async fn rename(&self, id: ActorId, name: String) -> Result<domain::Actor, ActorError> {
        let _guard = self.actor.lock(id).await;
        let mut actor = load(&self.actor, id).await?;
        actor.rename(name)?;
        self.actor.save(&actor).await?;
        tracing::info!(actor_id = %id, name = %actor.name, "Actor renamed");
        Ok(actor)
    }

    pub async fn set_skill_points(
        &self,
        id: ActorId,
        total: i32,
    ) -> Result<domain::Actor, ActorError> {
        let _guard = self.actor.lock(id).await;
        let mut actor = load(&self.actor, id).await?;
        actor.set_skill_points_total(total);
        self.actor.save(&actor).await?;
        tracing::info!(
            actor_id = %id,
            total,
            remaining = ?actor.skill_points.remaining,
            "Skill point budget changed"
        );
        Ok(actor)
    }

    pub async fn delete(&self, id: ActorId) -> Result<(), ActorError> {
        let _guard = self.actor.lock(id).await;
        self.actor.delete(id).await.map_err(|e| {
            if e.is_not_found() {
                ActorError::NotFound(id)
            } else {
                ActorError::Repo(e)
            }
        })?;
        tracing::info!(actor_id = %id, "Actor deleted");
        Ok(())
    }
}

/// Load a freshly recomputed actor or fail with `NotFound`.
pub(crate) async fn load(actor: &Actor, id: ActorId) -> Result<domain::Actor, ActorError> {
    actor.get(id).await?.ok_or(ActorError::NotFound(id))
}

#[derive(Debug, thiserror::Error)]
pub enum ActorError {
    #[error("Actor not found: {0}")]
    NotFound(ActorId),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
