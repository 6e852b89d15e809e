//! Staff roster and salary payments. Every route is admin only; the service
//! enforces the role.
//!
//! ```text
//! GET    /api/v1/staff
//! POST   /api/v1/staff {"name":"Sumi","designation":"Housekeeping","joiningDate":"2024-01-01","baseSalary":2000000}
//! PUT    /api/v1/staff/{id}
//! DELETE /api/v1/staff/{id}
//! GET    /api/v1/payroll/summary
//! POST   /api/v1/payroll/cycles {"month":"March","year":2025}
//! GET    /api/v1/payroll/payments?year=2025
//! PUT    /api/v1/payroll/payments/{id}/status {"status":"PAID"}
//! DELETE /api/v1/payroll/payments/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::CycleRequest;
use crate::domain::{Error, Money, PaymentStatus, SalaryPaymentId, StaffDraft, StaffId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::{
    ErrorSchema, PaymentGridRowSchema, PayrollSummarySchema, SalaryPaymentSchema, StaffSchema,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_date, parse_id, parse_label, parse_optional_label, required,
};

/// Staff details.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaffRequest {
    pub name: String,
    pub designation: String,
    #[schema(example = "2024-01-01")]
    pub joining_date: Option<String>,
    #[schema(value_type = i64)]
    pub base_salary: Money,
    #[serde(default)]
    #[schema(value_type = i64)]
    pub bonus: Money,
    #[serde(default)]
    #[schema(value_type = i64)]
    pub deductions: Money,
}

impl TryFrom<StaffRequest> for StaffDraft {
    type Error = Error;

    fn try_from(value: StaffRequest) -> Result<Self, Self::Error> {
        const JOINING_DATE: FieldName = FieldName::new("joiningDate");
        let joining_date = required(value.joining_date, JOINING_DATE)?;
        Ok(Self {
            name: value.name,
            designation: value.designation,
            joining_date: parse_date(&joining_date, JOINING_DATE)?,
            base_salary: value.base_salary,
            bonus: value.bonus,
            deductions: value.deductions,
        })
    }
}

/// Salary cycle request; month and year default to the current ones.
#[derive(Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CycleBody {
    #[schema(example = "March")]
    pub month: Option<String>,
    pub year: Option<i32>,
    /// Permit a second batch for a month that already has payments.
    pub allow_duplicates: bool,
}

impl TryFrom<CycleBody> for CycleRequest {
    type Error = Error;

    fn try_from(value: CycleBody) -> Result<Self, Self::Error> {
        Ok(Self {
            month: parse_optional_label(value.month.as_deref(), FieldName::new("month"))?,
            year: value.year,
            allow_duplicates: value.allow_duplicates,
        })
    }
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GridQuery {
    /// Grid year; defaults to the current year.
    pub year: Option<i32>,
}

/// Payment status change.
#[derive(Deserialize, ToSchema)]
pub struct PaymentStatusRequest {
    #[schema(example = "PAID")]
    pub status: String,
}

fn staff_id(raw: &str) -> Result<StaffId, Error> {
    parse_id(raw, FieldName::new("id"))
}

fn payment_id(raw: &str) -> Result<SalaryPaymentId, Error> {
    parse_id(raw, FieldName::new("id"))
}

#[utoipa::path(
    get,
    path = "/api/v1/staff",
    responses(
        (status = 200, description = "Staff ordered by name", body = [StaffSchema]),
        (status = 403, description = "Admin only", body = ErrorSchema)
    ),
    tags = ["payroll"],
    operation_id = "listStaff"
)]
#[get("/staff")]
pub async fn list_staff(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    let staff = state.payroll.list_staff(&actor).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(staff))
}

#[utoipa::path(
    post,
    path = "/api/v1/staff",
    request_body = StaffRequest,
    responses(
        (status = 201, description = "Created", body = StaffSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Admin only", body = ErrorSchema)
    ),
    tags = ["payroll"],
    operation_id = "createStaff"
)]
#[post("/staff")]
pub async fn create_staff(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<StaffRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    let draft = StaffDraft::try_from(payload.into_inner())?;
    let staff = state.payroll.create_staff(&actor, draft).await?;
    Ok(HttpResponse::Created().json(staff))
}

#[utoipa::path(
    put,
    path = "/api/v1/staff/{id}",
    params(("id" = String, Path, description = "Staff id")),
    request_body = StaffRequest,
    responses(
        (status = 200, description = "Updated", body = StaffSchema),
        (status = 404, description = "Unknown staff member", body = ErrorSchema)
    ),
    tags = ["payroll"],
    operation_id = "updateStaff"
)]
#[put("/staff/{id}")]
pub async fn update_staff(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<StaffRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    let id = staff_id(&path)?;
    let draft = StaffDraft::try_from(payload.into_inner())?;
    let staff = state.payroll.update_staff(&actor, &id, draft).await?;
    Ok(HttpResponse::Ok().json(staff))
}

/// Remove a staff member with their payment history.
#[utoipa::path(
    delete,
    path = "/api/v1/staff/{id}",
    params(("id" = String, Path, description = "Staff id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Unknown staff member", body = ErrorSchema)
    ),
    tags = ["payroll"],
    operation_id = "deleteStaff"
)]
#[delete("/staff/{id}")]
pub async fn delete_staff(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    state.payroll.delete_staff(&actor, &staff_id(&path)?).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    get,
    path = "/api/v1/payroll/summary",
    responses(
        (status = 200, description = "Headcount and backlog", body = PayrollSummarySchema),
        (status = 403, description = "Admin only", body = ErrorSchema)
    ),
    tags = ["payroll"],
    operation_id = "payrollSummary"
)]
#[get("/payroll/summary")]
pub async fn summary(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    let summary = state.payroll.summary(&actor).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(summary))
}

/// Open a salary cycle with one pending payment per staff member.
#[utoipa::path(
    post,
    path = "/api/v1/payroll/cycles",
    request_body = CycleBody,
    responses(
        (status = 201, description = "Payments created", body = [SalaryPaymentSchema]),
        (status = 409, description = "Month already generated", body = ErrorSchema)
    ),
    tags = ["payroll"],
    operation_id = "generateCycle"
)]
#[post("/payroll/cycles")]
pub async fn generate_cycle(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CycleBody>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    let request = CycleRequest::try_from(payload.into_inner())?;
    let payments = state.payroll.generate_cycle(&actor, request).await?;
    Ok(HttpResponse::Created().json(payments))
}

/// Staff by month payment grid.
#[utoipa::path(
    get,
    path = "/api/v1/payroll/payments",
    params(GridQuery),
    responses(
        (status = 200, description = "Payment grid", body = [PaymentGridRowSchema]),
        (status = 403, description = "Admin only", body = ErrorSchema)
    ),
    tags = ["payroll"],
    operation_id = "paymentGrid"
)]
#[get("/payroll/payments")]
pub async fn payment_grid(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<GridQuery>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    let grid = state.payroll.payment_grid(&actor, query.year).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(grid))
}

#[utoipa::path(
    put,
    path = "/api/v1/payroll/payments/{id}/status",
    params(("id" = String, Path, description = "Payment id")),
    request_body = PaymentStatusRequest,
    responses(
        (status = 200, description = "Updated", body = SalaryPaymentSchema),
        (status = 404, description = "Unknown payment", body = ErrorSchema)
    ),
    tags = ["payroll"],
    operation_id = "setPaymentStatus"
)]
#[put("/payroll/payments/{id}/status")]
pub async fn set_payment_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<PaymentStatusRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    let id = payment_id(&path)?;
    let status: PaymentStatus = parse_label(&payload.status, FieldName::new("status"))?;
    let payment = state.payroll.set_payment_status(&actor, &id, status).await?;
    Ok(HttpResponse::Ok().json(payment))
}

#[utoipa::path(
    delete,
    path = "/api/v1/payroll/payments/{id}",
    params(("id" = String, Path, description = "Payment id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Unknown payment", body = ErrorSchema)
    ),
    tags = ["payroll"],
    operation_id = "deletePayment"
)]
#[delete("/payroll/payments/{id}")]
pub async fn delete_payment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    state.payroll.delete_payment(&actor, &payment_id(&path)?).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "payroll_tests.rs"]
mod tests;
