//! Actor entity operations.
//!
//! Reads always return freshly derived data: the stored snapshot is
//! recomputed on load, so stale derived fields never leave this module.
//!
//! Writers must hold the actor's write lock across load, change and save.

use std::sync::Arc;

use dashmap::DashMap;
use herosheet_domain::{self as domain, ActorId};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::infrastructure::ports::{ActorRepo, RepoError};

/// Actor entity operations.
pub struct Actor {
    repo: Arc<dyn ActorRepo>,
    write_locks: DashMap<ActorId, Arc<Mutex<()>>>,
}

impl Actor {
    pub fn new(repo: Arc<dyn ActorRepo>) -> Self {
        Self {
            repo,
            write_locks: DashMap::new(),
        }
    }

    /// Serialize read-modify-write cycles on one actor.
    pub async fn lock(&self, id: ActorId) -> OwnedMutexGuard<()> {
        let lock = self.write_locks.entry(id).or_default().clone();
        lock.lock_owned().await
    }

    pub async fn get(&self, id: ActorId) -> Result<Option<domain::Actor>, RepoError> {
        Ok(self.repo.get(id).await?.map(|mut actor| {
            actor.recompute();
            actor
        }))
    }

    pub async fn list(&self) -> Result<Vec<domain::Actor>, RepoError> {
        let mut actors = self.repo.list().await?;
        actors.iter_mut().for_each(domain::Actor::recompute);
        Ok(actors)
    }

    pub async fn save(&self, actor: &domain::Actor) -> Result<(), RepoError> {
        self.repo.save(actor).await
    }

    pub async fn delete(&self, id: ActorId) -> Result<(), RepoError> {
        self.repo.delete(id).await?;
        self.write_locks.remove(&id);
        Ok(())
    }
}
