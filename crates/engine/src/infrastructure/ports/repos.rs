//! Repository port traits for actor storage.

use async_trait::async_trait;
use herosheet_domain::{Actor, ActorId};

use super::error::RepoError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActorRepo: Send + Sync {
    /// Load an actor as stored. Derived fields may be stale.
    async fn get(&self, id: ActorId) -> Result<Option<Actor>, RepoError>;
    /// All actors, ordered by name.
    async fn list(&self) -> Result<Vec<Actor>, RepoError>;
    async fn save(&self, actor: &Actor) -> Result<(), RepoError>;
    /// Delete an actor together with every item it owns.
    async fn delete(&self, id: ActorId) -> Result<(), RepoError>;
}
