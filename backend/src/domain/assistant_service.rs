//! AI assistant service.
//!
//! Completion failures never become errors: every path ends in an
//! [`AssistantReply`], flagged `degraded` when fallback text was used.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::domain::ports::{Assistant, CompletionSourceError, RoomCatalogue, TextCompletionSource};
use crate::domain::{
    AssistantReply, BRIEFING_SYSTEM_INSTRUCTION, BoardFilter, Capability, CompletionProfile,
    CompletionRequest, DEFAULT_SYSTEM_INSTRUCTION, Error, MISSING_KEY_TEXT,
    NOTES_SYSTEM_INSTRUCTION, User, briefing_prompt, refine_notes_prompt,
};

/// Domain service implementing [`Assistant`].
#[derive(Clone)]
pub struct AssistantService<C> {
    source: Arc<C>,
    rooms: Arc<dyn RoomCatalogue>,
}

impl<C> AssistantService<C> {
    /// Create the service. `rooms` supplies the board for briefings.
    pub fn new(source: Arc<C>, rooms: Arc<dyn RoomCatalogue>) -> Self {
        Self { source, rooms }
    }
}

impl<C> AssistantService<C>
where
    C: TextCompletionSource,
{
    async fn ask(&self, request: CompletionRequest) -> AssistantReply {
        let profile = request.profile;
        match self.source.complete(&request).await {
            Ok(text) if text.trim().is_empty() => {
                warn!(model = profile.model(), "completion returned no text");
                AssistantReply::fallback(profile.empty_text())
            }
            Ok(text) => {
                debug!(model = profile.model(), chars = text.len(), "completion received");
                AssistantReply::completed(text)
            }
            Err(CompletionSourceError::MissingKey) => AssistantReply::fallback(MISSING_KEY_TEXT),
            Err(err) => {
                warn!(model = profile.model(), error = %err, "completion failed");
                AssistantReply::fallback(profile.failure_text())
            }
        }
    }
}

#[async_trait]
impl<C> Assistant for AssistantService<C>
where
    C: TextCompletionSource,
{
    async fn briefing(&self, date: Option<NaiveDate>) -> Result<AssistantReply, Error> {
        let board = self.rooms.board(date, BoardFilter::default()).await?;
        Ok(self
            .ask(CompletionRequest {
                prompt: briefing_prompt(&board.counts),
                system_instruction: BRIEFING_SYSTEM_INSTRUCTION.to_owned(),
                profile: CompletionProfile::Fast,
            })
            .await)
    }

    async fn refine_notes(&self, actor: &User, notes: &str) -> Result<AssistantReply, Error> {
        actor.role.require(Capability::ManageFrontDesk)?;
        if notes.trim().is_empty() {
            return Err(Error::invalid_field("notes", "empty", "notes must not be empty"));
        }
        Ok(self
            .ask(CompletionRequest {
                prompt: refine_notes_prompt(notes),
                system_instruction: NOTES_SYSTEM_INSTRUCTION.to_owned(),
                profile: CompletionProfile::Fast,
            })
            .await)
    }

    async fn analyse(
        &self,
        prompt: &str,
        system_instruction: Option<String>,
    ) -> Result<AssistantReply, Error> {
        if prompt.trim().is_empty() {
            return Err(Error::invalid_field("prompt", "empty", "prompt must not be empty"));
        }
        let system_instruction = system_instruction
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SYSTEM_INSTRUCTION.to_owned());
        Ok(self
            .ask(CompletionRequest {
                prompt: prompt.to_owned(),
                system_instruction,
                profile: CompletionProfile::Analytical,
            })
            .await)
    }
}
