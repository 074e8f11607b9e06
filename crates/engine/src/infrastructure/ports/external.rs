//! External collaborator ports.

use async_trait::async_trait;

use super::error::RepoError;
use super::types::ChatMessage;

/// Shared chat feed that roll cards are posted to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatLogPort: Send + Sync {
    async fn post(&self, message: &ChatMessage) -> Result<(), RepoError>;
    /// Most recent messages, oldest first.
    async fn recent(&self, limit: usize) -> Result<Vec<ChatMessage>, RepoError>;
}
