//! Daily fiscal report: ledger, token adjustment and day closing.

use actix_web::{HttpResponse, get, post, put, web};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::domain::Money;
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::{DailyReportSchema, DayClosingSchema, ErrorSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_date, parse_optional_date};

const DATE: FieldName = FieldName::new("date");

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// Report date, `YYYY-MM-DD`; defaults to today.
    pub date: Option<String>,
    /// Room-number or resident-name fragment to narrow the ledger.
    pub search: Option<String>,
}

/// Token adjustment for an open day.
#[derive(Deserialize, ToSchema)]
pub struct TokenRequest {
    /// Paisa deducted from the day's collections in the closing balance.
    #[schema(value_type = i64, example = 50_000)]
    pub amount: Money,
}

/// Ledger and totals for a day.
#[utoipa::path(
    get,
    path = "/api/v1/reports/daily",
    params(ReportQuery),
    responses(
        (status = 200, description = "Daily report", body = DailyReportSchema),
        (status = 400, description = "Invalid date", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "dailyReport"
)]
#[get("/reports/daily")]
pub async fn daily_report(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ReportQuery>,
) -> ApiResult<HttpResponse> {
    session.require_user(&state).await?;
    let date = parse_optional_date(query.date.as_deref(), DATE)?;
    let ReportQuery { search, .. } = query.into_inner();
    let report = state.reports.daily_report(date, search).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(report))
}

/// Save the token adjustment.
#[utoipa::path(
    put,
    path = "/api/v1/reports/daily/{date}/token",
    params(("date" = String, Path, description = "Report date")),
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Updated report", body = DailyReportSchema),
        (status = 409, description = "Day already closed", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "saveToken"
)]
#[put("/reports/daily/{date}/token")]
pub async fn save_token(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<TokenRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    let date = parse_date(&path, DATE)?;
    let report = state.reports.save_token(&actor, date, payload.amount).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// Close the day and move to the next one.
#[utoipa::path(
    post,
    path = "/api/v1/reports/daily/{date}/close",
    params(("date" = String, Path, description = "Report date")),
    responses(
        (status = 200, description = "Closed", body = DayClosingSchema),
        (status = 409, description = "Day already closed", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "closeDay"
)]
#[post("/reports/daily/{date}/close")]
pub async fn close_day(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    let date = parse_date(&path, DATE)?;
    let closing = state.reports.close_day(&actor, date).await?;
    Ok(HttpResponse::Ok().json(closing))
}
