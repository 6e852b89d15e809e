//! Reservation and stay lifecycle handlers.
//!
//! ```text
//! GET    /api/v1/reservations?search=101&status=Check-In
//! POST   /api/v1/reservations
//! GET    /api/v1/reservations/{id}
//! PUT    /api/v1/reservations/{id}
//! DELETE /api/v1/reservations/{id}
//! POST   /api/v1/reservations/{id}/check-in
//! POST   /api/v1/reservations/{id}/payments  {"amount":200000,"method":"Card"}
//! POST   /api/v1/reservations/{id}/check-out {"finalPayment":150000,"method":"Cash"}
//! POST   /api/v1/reservations/{id}/cancel
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{CheckOutRequest, StayPayment};
use crate::domain::{
    Error, Money, ReservationDraft, ReservationFilter, ReservationId, StatusFilter, StayCharges,
    StayType,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::{CheckOutOutcomeSchema, ErrorSchema, ReservationSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, non_blank, parse_date, parse_id, parse_id_list, parse_label, parse_optional_date,
    parse_optional_label, parse_room_numbers, required,
};

const METHOD: FieldName = FieldName::new("method");

/// Stay as submitted by the booking form.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    #[schema(example = json!(["101", "102"]))]
    pub room_numbers: Vec<String>,
    /// First id is the primary guest.
    pub guest_ids: Vec<String>,
    #[schema(example = "2025-03-10")]
    pub check_in: Option<String>,
    #[schema(example = "2025-03-12")]
    pub check_out: Option<String>,
    /// `RESERVATION` (default) or `CHECK_IN`.
    pub stay_type: Option<String>,
    #[serde(default)]
    #[schema(value_type = i64)]
    pub laundry: Money,
    #[serde(default)]
    #[schema(value_type = i64)]
    pub mini_bar: Money,
    #[serde(default)]
    #[schema(value_type = i64)]
    pub extra_charges: Money,
    #[serde(default)]
    #[schema(value_type = i64)]
    pub discount: Money,
    /// Omit on edit to keep payments already collected.
    #[schema(value_type = Option<i64>)]
    pub paid_amount: Option<Money>,
    pub payment_method: Option<String>,
    pub on_duty_officer: Option<String>,
    pub special_requests: Option<String>,
    pub notes: Option<String>,
}

impl TryFrom<ReservationRequest> for ReservationDraft {
    type Error = Error;

    fn try_from(value: ReservationRequest) -> Result<Self, Self::Error> {
        const CHECK_IN: FieldName = FieldName::new("checkIn");
        const CHECK_OUT: FieldName = FieldName::new("checkOut");
        let check_in_raw = required(value.check_in, CHECK_IN)?;
        let check_out_raw = required(value.check_out, CHECK_OUT)?;
        Ok(Self {
            room_numbers: parse_room_numbers(&value.room_numbers, FieldName::new("roomNumbers"))?,
            guest_ids: parse_id_list(&value.guest_ids, FieldName::new("guestIds"))?,
            check_in: parse_date(&check_in_raw, CHECK_IN)?,
            check_out: parse_date(&check_out_raw, CHECK_OUT)?,
            stay_type: parse_optional_label(value.stay_type.as_deref(), FieldName::new("stayType"))?
                .unwrap_or(StayType::Reservation),
            charges: StayCharges {
                laundry: value.laundry,
                mini_bar: value.mini_bar,
                extra_charges: value.extra_charges,
                discount: value.discount,
            },
            paid_amount: value.paid_amount,
            payment_method: parse_optional_label(
                value.payment_method.as_deref(),
                FieldName::new("paymentMethod"),
            )?,
            on_duty_officer: non_blank(value.on_duty_officer),
            special_requests: non_blank(value.special_requests),
            notes: non_blank(value.notes),
        })
    }
}

/// Reservation list query.
#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReservationQuery {
    /// Matches guest name, room number or reservation id prefix.
    pub search: Option<String>,
    /// Stays checking in or out on this `YYYY-MM-DD` date.
    pub date: Option<String>,
    /// `All`, `Reserved`, `Check-In` or `Checked-Out`.
    #[param(value_type = Option<String>)]
    pub status: Option<StatusFilter>,
    #[serde(default)]
    pub include_cancelled: bool,
}

impl TryFrom<ReservationQuery> for ReservationFilter {
    type Error = Error;

    fn try_from(value: ReservationQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            search: non_blank(value.search),
            date: parse_optional_date(value.date.as_deref(), FieldName::new("date"))?,
            status: value.status.unwrap_or_default(),
            include_cancelled: value.include_cancelled,
        })
    }
}

/// Payment against a stay.
#[derive(Deserialize, ToSchema)]
pub struct PaymentRequest {
    #[schema(value_type = i64)]
    pub amount: Money,
    #[schema(example = "Cash")]
    pub method: String,
}

impl TryFrom<PaymentRequest> for StayPayment {
    type Error = Error;

    fn try_from(value: PaymentRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            amount: value.amount,
            method: parse_label(&value.method, METHOD)?,
        })
    }
}

/// Check-out settlement. `{}` or a zero payment records nothing.
#[derive(Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckOutBody {
    #[schema(value_type = i64)]
    pub final_payment: Money,
    pub method: Option<String>,
}

impl TryFrom<CheckOutBody> for CheckOutRequest {
    type Error = Error;

    fn try_from(value: CheckOutBody) -> Result<Self, Self::Error> {
        Ok(Self {
            final_payment: value.final_payment,
            method: parse_optional_label(value.method.as_deref(), METHOD)?,
        })
    }
}

fn reservation_id(raw: &str) -> Result<ReservationId, Error> {
    parse_id(raw, FieldName::new("id"))
}

/// Stays matching the filter, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    params(ReservationQuery),
    responses(
        (status = 200, description = "Stays", body = [ReservationSchema]),
        (status = 400, description = "Invalid filter", body = ErrorSchema)
    ),
    tags = ["reservations"],
    operation_id = "listReservations"
)]
#[get("/reservations")]
pub async fn list_reservations(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ReservationQuery>,
) -> ApiResult<HttpResponse> {
    session.require_user(&state).await?;
    let filter = ReservationFilter::try_from(query.into_inner())?;
    let stays = state.stays.list_stays(filter).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(stays))
}

/// Book a reservation or check in directly.
#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    request_body = ReservationRequest,
    responses(
        (status = 201, description = "Created", body = ReservationSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Room already booked", body = ErrorSchema)
    ),
    tags = ["reservations"],
    operation_id = "createReservation"
)]
#[post("/reservations")]
pub async fn create_reservation(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ReservationRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    let draft = ReservationDraft::try_from(payload.into_inner())?;
    let stay = state.stays.create_stay(&actor, draft).await?;
    Ok(HttpResponse::Created().json(stay))
}

/// One stay.
#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}",
    params(("id" = String, Path, description = "Reservation id")),
    responses(
        (status = 200, description = "Stay", body = ReservationSchema),
        (status = 404, description = "Unknown reservation", body = ErrorSchema)
    ),
    tags = ["reservations"],
    operation_id = "getReservation"
)]
#[get("/reservations/{id}")]
pub async fn get_reservation(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_user(&state).await?;
    let stay = state.stays.get_stay(&reservation_id(&path)?).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(stay))
}

/// Edit an open stay.
#[utoipa::path(
    put,
    path = "/api/v1/reservations/{id}",
    params(("id" = String, Path, description = "Reservation id")),
    request_body = ReservationRequest,
    responses(
        (status = 200, description = "Updated", body = ReservationSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown reservation", body = ErrorSchema),
        (status = 409, description = "Room already booked", body = ErrorSchema)
    ),
    tags = ["reservations"],
    operation_id = "updateReservation"
)]
#[put("/reservations/{id}")]
pub async fn update_reservation(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ReservationRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    let id = reservation_id(&path)?;
    let draft = ReservationDraft::try_from(payload.into_inner())?;
    let stay = state.stays.update_stay(&actor, &id, draft).await?;
    Ok(HttpResponse::Ok().json(stay))
}

/// Delete a stay.
#[utoipa::path(
    delete,
    path = "/api/v1/reservations/{id}",
    params(("id" = String, Path, description = "Reservation id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "Admin only", body = ErrorSchema),
        (status = 404, description = "Unknown reservation", body = ErrorSchema)
    ),
    tags = ["reservations"],
    operation_id = "deleteReservation"
)]
#[delete("/reservations/{id}")]
pub async fn delete_reservation(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    state.stays.delete_stay(&actor, &reservation_id(&path)?).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Convert a pending reservation into a check-in.
#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/check-in",
    params(("id" = String, Path, description = "Reservation id")),
    responses(
        (status = 200, description = "Checked in", body = ReservationSchema),
        (status = 400, description = "Unverified guest or wrong status", body = ErrorSchema),
        (status = 404, description = "Unknown reservation", body = ErrorSchema)
    ),
    tags = ["reservations"],
    operation_id = "checkIn"
)]
#[post("/reservations/{id}/check-in")]
pub async fn check_in(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    let stay = state.stays.check_in(&actor, &reservation_id(&path)?).await?;
    Ok(HttpResponse::Ok().json(stay))
}

/// Collect a payment.
#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/payments",
    params(("id" = String, Path, description = "Reservation id")),
    request_body = PaymentRequest,
    responses(
        (status = 200, description = "Payment recorded", body = ReservationSchema),
        (status = 400, description = "Invalid amount", body = ErrorSchema),
        (status = 404, description = "Unknown reservation", body = ErrorSchema)
    ),
    tags = ["reservations"],
    operation_id = "collectPayment"
)]
#[post("/reservations/{id}/payments")]
pub async fn collect_payment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<PaymentRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    let id = reservation_id(&path)?;
    let payment = StayPayment::try_from(payload.into_inner())?;
    let stay = state.stays.collect_payment(&actor, &id, payment).await?;
    Ok(HttpResponse::Ok().json(stay))
}

/// Check out, carrying any unpaid balance to the guest ledger.
#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/check-out",
    params(("id" = String, Path, description = "Reservation id")),
    request_body = CheckOutBody,
    responses(
        (status = 200, description = "Checked out", body = CheckOutOutcomeSchema),
        (status = 400, description = "Not checked in", body = ErrorSchema),
        (status = 404, description = "Unknown reservation", body = ErrorSchema)
    ),
    tags = ["reservations"],
    operation_id = "checkOut"
)]
#[post("/reservations/{id}/check-out")]
pub async fn check_out(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CheckOutBody>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    let id = reservation_id(&path)?;
    let request = CheckOutRequest::try_from(payload.into_inner())?;
    let outcome = state.stays.check_out(&actor, &id, request).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// Cancel a stay, releasing its rooms.
#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/cancel",
    params(("id" = String, Path, description = "Reservation id")),
    responses(
        (status = 200, description = "Cancelled", body = ReservationSchema),
        (status = 400, description = "Already closed", body = ErrorSchema),
        (status = 404, description = "Unknown reservation", body = ErrorSchema)
    ),
    tags = ["reservations"],
    operation_id = "cancelReservation"
)]
#[post("/reservations/{id}/cancel")]
pub async fn cancel(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    let stay = state.stays.cancel_stay(&actor, &reservation_id(&path)?).await?;
    Ok(HttpResponse::Ok().json(stay))
}

#[cfg(test)]
#[path = "reservations_tests.rs"]
mod tests;
