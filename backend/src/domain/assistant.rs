//! AI assistant prompts, profiles and fallback replies.

use serde::Serialize;

use super::StatusCounts;

/// System instruction used when a fast request does not supply one.
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are an expert hospitality assistant for Hotel Fountain. Be concise, professional, and luxury-oriented.";
/// System instruction for the daily operations briefing.
pub const BRIEFING_SYSTEM_INSTRUCTION: &str = "You are the AI Operations Manager for Hotel Fountain.";
/// System instruction for note refinement.
pub const NOTES_SYSTEM_INSTRUCTION: &str = "You are a hospitality documentation expert.";

/// Model tier used for a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CompletionProfile {
    /// Low-latency model for short operational text.
    Fast,
    /// Larger model for open-ended analysis.
    Analytical,
}

impl CompletionProfile {
    /// Upstream model identifier.
    #[must_use]
    pub const fn model(self) -> &'static str {
        match self {
            Self::Fast => "gemini-1.5-flash",
            Self::Analytical => "gemini-1.5-pro",
        }
    }

    /// Sampling temperature.
    #[must_use]
    pub const fn temperature(self) -> f32 {
        match self {
            Self::Fast => 0.7,
            Self::Analytical => 0.4,
        }
    }

    /// Reply used when the upstream call fails.
    #[must_use]
    pub const fn failure_text(self) -> &'static str {
        match self {
            Self::Fast => "Failed to retrieve AI insights.",
            Self::Analytical => "Complexity error in AI analysis.",
        }
    }

    /// Reply used when the upstream returns no text.
    #[must_use]
    pub const fn empty_text(self) -> &'static str {
        match self {
            Self::Fast => "AI services temporarily unavailable.",
            Self::Analytical => "Analysis failed.",
        }
    }
}

/// Reply used when no API key is configured.
pub const MISSING_KEY_TEXT: &str = "API Key is missing. Check configuration.";

/// A request to the completion port.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub system_instruction: String,
    pub profile: CompletionProfile,
}

/// Text returned to the desk. `degraded` marks fallback text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantReply {
    pub text: String,
    pub degraded: bool,
}

impl AssistantReply {
    /// Successful completion.
    #[must_use]
    pub fn completed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            degraded: false,
        }
    }

    /// Fallback text.
    #[must_use]
    pub fn fallback(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            degraded: true,
        }
    }
}

/// Prompt for the daily operations briefing.
#[must_use]
pub fn briefing_prompt(counts: &StatusCounts) -> String {
    format!(
        "Current Hotel Status:\n\
         - Available Rooms: {available}\n\
         - Occupied Rooms: {occupied}\n\
         - Dirty Rooms (Pending Housekeeping): {dirty}\n\
         - Reserved (Awaiting Arrival): {reserved}\n\n\
         Provide 3 short, actionable bullet points for the front desk manager to optimize operations for today.\n\
         Focus on housekeeping priority, check-in preparation, and potential upsell opportunities.\n\
         Tone: Professional, high-end hotel management style.",
        available = counts.available,
        occupied = counts.occupied,
        dirty = counts.dirty,
        reserved = counts.reserved,
    )
}

/// Prompt asking the model to tidy raw desk notes.
#[must_use]
pub fn refine_notes_prompt(notes: &str) -> String {
    format!(
        "Professionalize and summarize these internal guest notes for a 5-star hotel front desk log:\n\"{notes}\""
    )
}
