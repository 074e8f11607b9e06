//! Skill roll use case.
//!
//! The flow is:
//! 1. Load the actor (recomputed, so the skill's total value is current)
//! 2. Build the check, optionally with an owned equipment item
//! 3. Resolve it with server-side dice
//! 4. Render the roll card and post it to the chat feed

use std::sync::Arc;

use herosheet_domain::{ActorId, ChatMessageId, DomainError, ItemId, SkillCheck, SkillCheckOutcome};

use super::actor::{load, ActorError};
use crate::entities::Actor;
use crate::infrastructure::ports::{ChatLogPort, ChatMessage, ClockPort, RandomPort, RepoError};

/// Result of a skill roll.
#[derive(Debug, Clone)]
pub struct RollSkillResult {
    pub outcome: SkillCheckOutcome,
    /// The chat message carrying the rendered card
    pub message: ChatMessage,
}

/// Roll one of an actor's skills.
pub struct RollSkill {
    actor: Arc<Actor>,
    chat: Arc<dyn ChatLogPort>,
    random: Arc<dyn RandomPort>,
    clock: Arc<dyn ClockPort>,
}

impl RollSkill {
    pub fn new(
        actor: Arc<Actor>,
        chat: Arc<dyn ChatLogPort>,
        random: Arc<dyn RandomPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            actor,
            chat,
            random,
            clock,
        }
    }

    /// Execute a skill roll.
    ///
    /// A chat feed failure does not fail the roll: the outcome has already
    /// been decided and is returned either way.
    pub async fn execute(
        &self,
        actor_id: ActorId,
        skill_id: ItemId,
        item_id: Option<ItemId>,
    ) -> Result<RollSkillResult, RollError> {
        let actor = load(&self.actor, actor_id).await?;
        let check = actor.skill_check(skill_id, item_id)?;

        let outcome = check.resolve(|min, max| self.random.gen_range(min, max));

        tracing::info!(
            actor_id = %actor_id,
            skill = %check.skill_name,
            item = ?check.item.as_ref().map(|i| i.name.as_str()),
            rolled = outcome.rolled_value,
            target = outcome.effective_target,
            success = outcome.is_success,
            damage = ?outcome.damage_total(),
            "Skill check resolved"
        );

        let message = ChatMessage {
            id: ChatMessageId::from_uuid(self.random.gen_uuid()),
            speaker_id: actor.id,
            speaker_name: actor.name.clone(),
            content: render_roll_card(&actor.name, &check, &outcome),
            roll: Some(outcome.clone()),
            created_at: self.clock.now(),
        };

        if let Err(e) = self.chat.post(&message).await {
            tracing::warn!(
                actor_id = %actor_id,
                message_id = %message.id,
                error = %e,
                "Failed to post roll card to chat"
            );
        }

        Ok(RollSkillResult { outcome, message })
    }
}

/// Render the HTML chat card for a resolved check.
pub fn render_roll_card(
    actor_name: &str,
    check: &SkillCheck,
    outcome: &SkillCheckOutcome,
) -> String {
    let mut header = format!(
        "{} attempts a <strong>{}</strong> check.",
        escape_html(actor_name),
        escape_html(&check.skill_name)
    );
    if let Some(item) = &check.item {
        let sign = if item.roll_modifier > 0 { "+" } else { "" };
        header.push_str(&format!(
            " (Modified by {}{} from {})",
            sign,
            item.roll_modifier,
            escape_html(&item.name)
        ));
    }

    let (class, verdict) = if outcome.is_success {
        ("success", "SUCCESS!")
    } else {
        ("failure", "FAILURE!")
    };

    let damage = match &outcome.damage {
        Some(roll) => format!(
            "\n  <div class=\"damage-result\">\
             <span class=\"damage-label\">Damage:</span> \
             <span class=\"damage-value\">{}</span> \
             <span class=\"damage-formula\" title=\"{}\">({})</span></div>",
            roll.total,
            roll.breakdown(),
            roll.formula
        ),
        None => String::new(),
    };

    format!(
        "<div class=\"hero-roll-card\">\n  \
         <div class=\"roll-header\">{header}</div>\n  \
         <div class=\"roll-result\">\
         <span class=\"roll-label\">Rolled:</span> <span class=\"roll-value\">{rolled}</span> \
         <span class=\"target-label\">vs. Target:</span> \
         <span class=\"target-value\">{target}</span></div>\n  \
         <div class=\"roll-outcome {class}\">{verdict}</div>{damage}\n\
         </div>",
        rolled = outcome.rolled_value,
        target = outcome.effective_target,
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[derive(Debug, thiserror::Error)]
pub enum RollError {
    #[error("Actor not found: {0}")]
    ActorNotFound(ActorId),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl From<ActorError> for RollError {
    fn from(err: ActorError) -> Self {
        match err {
            ActorError::NotFound(id) => Self::ActorNotFound(id),
            ActorError::Domain(e) => Self::Domain(e),
            ActorError::Repo(e) => Self::Repo(e),
        }
    }
}
