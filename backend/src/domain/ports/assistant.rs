//! Driving port for AI-assisted text.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{AssistantReply, Error, User};

/// Assistant use cases. Upstream failures degrade to fallback replies.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Operations briefing built from the status board for `date`.
    async fn briefing(&self, date: Option<NaiveDate>) -> Result<AssistantReply, Error>;

    /// Rewrite raw desk notes for the front desk log.
    async fn refine_notes(&self, actor: &User, notes: &str) -> Result<AssistantReply, Error>;

    /// Free-form analytical query.
    async fn analyse(
        &self,
        prompt: &str,
        system_instruction: Option<String>,
    ) -> Result<AssistantReply, Error>;
}
