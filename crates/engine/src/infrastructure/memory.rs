//! In-memory adapters for actor storage and the chat feed.
//!
//! Nothing here survives a restart. Actors are stored whole, so a save
//! replaces the previous snapshot (last write wins).

use std::collections::VecDeque;

use async_trait::async_trait;
use dashmap::DashMap;
use herosheet_domain::{Actor, ActorId};
use tokio::sync::RwLock;

use crate::infrastructure::ports::{ActorRepo, ChatLogPort, ChatMessage, RepoError};

#[derive(Debug, Default)]
pub struct InMemoryActorRepo {
    actors: DashMap<ActorId, Actor>,
}

impl InMemoryActorRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActorRepo for InMemoryActorRepo {
    async fn get(&self, id: ActorId) -> Result<Option<Actor>, RepoError> {
        Ok(self.actors.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list(&self) -> Result<Vec<Actor>, RepoError> {
        let mut actors: Vec<Actor> = self
            .actors
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        actors.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(actors)
    }

    async fn save(&self, actor: &Actor) -> Result<(), RepoError> {
        self.actors.insert(actor.id, actor.clone());
        Ok(())
    }

    async fn delete(&self, id: ActorId) -> Result<(), RepoError> {
        self.actors
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepoError::not_found("Actor", id))
    }
}

/// Bounded chat feed; the oldest messages are dropped first.
#[derive(Debug)]
pub struct InMemoryChatLog {
    messages: RwLock<VecDeque<ChatMessage>>,
    capacity: usize,
}

impl InMemoryChatLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            messages: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
        }
    }
}

#[async_trait]
impl ChatLogPort for InMemoryChatLog {
    async fn post(&self, message: &ChatMessage) -> Result<(), RepoError> {
        let mut messages = self.messages.write().await;
        while messages.len() >= self.capacity {
            messages.pop_front();
        }
        messages.push_back(message.clone());
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<ChatMessage>, RepoError> {
        let messages = self.messages.read().await;
        let skip = messages.len().saturating_sub(limit);
        Ok(messages.iter().skip(skip).cloned().collect())
    }
}
