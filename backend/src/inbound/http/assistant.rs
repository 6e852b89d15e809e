//! AI assistant endpoints.
//!
//! Upstream failures do not surface as errors: the reply carries fallback
//! text with `degraded: true` and the handler still answers 200.

use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{AssistantReplySchema, ErrorSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, non_blank, parse_optional_date};

#[derive(Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct BriefingRequest {
    /// Board date, `YYYY-MM-DD`; defaults to today.
    pub date: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct NotesRequest {
    pub notes: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub prompt: String,
    /// Replaces the default hospitality instruction.
    pub system_instruction: Option<String>,
}

/// Operations briefing from the room board.
#[utoipa::path(
    post,
    path = "/api/v1/assistant/briefing",
    request_body = BriefingRequest,
    responses(
        (status = 200, description = "Briefing", body = AssistantReplySchema),
        (status = 400, description = "Invalid date", body = ErrorSchema)
    ),
    tags = ["assistant"],
    operation_id = "assistantBriefing"
)]
#[post("/assistant/briefing")]
pub async fn briefing(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<BriefingRequest>,
) -> ApiResult<HttpResponse> {
    session.require_user(&state).await?;
    let date = parse_optional_date(payload.date.as_deref(), FieldName::new("date"))?;
    let reply = state.assistant.briefing(date).await?;
    Ok(HttpResponse::Ok().json(reply))
}

/// Rewrite desk notes.
#[utoipa::path(
    post,
    path = "/api/v1/assistant/notes",
    request_body = NotesRequest,
    responses(
        (status = 200, description = "Refined notes", body = AssistantReplySchema),
        (status = 400, description = "Empty notes", body = ErrorSchema)
    ),
    tags = ["assistant"],
    operation_id = "refineNotes"
)]
#[post("/assistant/notes")]
pub async fn refine_notes(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<NotesRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    let reply = state.assistant.refine_notes(&actor, &payload.notes).await?;
    Ok(HttpResponse::Ok().json(reply))
}

/// Free-form analysis.
#[utoipa::path(
    post,
    path = "/api/v1/assistant/analysis",
    request_body = AnalysisRequest,
    responses(
        (status = 200, description = "Analysis", body = AssistantReplySchema),
        (status = 400, description = "Empty prompt", body = ErrorSchema)
    ),
    tags = ["assistant"],
    operation_id = "assistantAnalysis"
)]
#[post("/assistant/analysis")]
pub async fn analyse(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AnalysisRequest>,
) -> ApiResult<HttpResponse> {
    session.require_user(&state).await?;
    let AnalysisRequest {
        prompt,
        system_instruction,
    } = payload.into_inner();
    let reply = state
        .assistant
        .analyse(&prompt, non_blank(system_instruction))
        .await?;
    Ok(HttpResponse::Ok().json(reply))
}
