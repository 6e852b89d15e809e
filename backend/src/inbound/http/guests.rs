//! Guest ledger handlers.
//!
//! ```text
//! GET    /api/v1/guests?search=rahman&outstanding=true
//! POST   /api/v1/guests
//! GET    /api/v1/guests/export
//! POST   /api/v1/guests/import {"text":"Name,Phone,Email,NID,ID-1,Address"}
//! GET    /api/v1/guests/{id}
//! PUT    /api/v1/guests/{id}
//! DELETE /api/v1/guests/{id}
//! PUT    /api/v1/guests/{id}/id-image {"url":"data:image/png;base64,..."}
//! POST   /api/v1/guests/{id}/settlements {"amount":50000,"method":"Cash"}
//! ```

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::Settlement;
use crate::domain::{Error, GuestDraft, GuestFilter, GuestId, IdType, Money};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::{no_store_header, private_no_cache_header};
use crate::inbound::http::schemas::{ErrorSchema, GuestSchema, ImportSummarySchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, non_blank, parse_id, parse_optional_label};

const EXPORT_FILE_NAME: &str = "guests.json";

/// Guest details as entered at the desk.
#[derive(Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct GuestRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// `NID`, `Passport`, `Birth Certificate` or `Driving License`.
    pub id_type: Option<String>,
    pub id_number: String,
    pub address: String,
    /// Defaults to Dhaka.
    pub city: String,
    /// Defaults to Bangladesh.
    pub country: String,
    pub preferences: Option<String>,
    pub id_image_url: Option<String>,
    #[schema(value_type = i64)]
    pub outstanding_balance: Money,
}

impl TryFrom<GuestRequest> for GuestDraft {
    type Error = Error;

    fn try_from(value: GuestRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: value.name,
            email: value.email,
            phone: value.phone,
            id_type: parse_optional_label::<IdType>(
                value.id_type.as_deref(),
                FieldName::new("idType"),
            )?
            .unwrap_or_default(),
            id_number: value.id_number,
            address: value.address,
            city: value.city,
            country: value.country,
            preferences: non_blank(value.preferences),
            id_image_url: non_blank(value.id_image_url),
            outstanding_balance: value.outstanding_balance,
        })
    }
}

/// Guest list query.
#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GuestQuery {
    /// Matches name, phone or ID number.
    pub search: Option<String>,
    /// Only guests with a positive outstanding balance.
    #[serde(default)]
    pub outstanding: bool,
}

impl From<GuestQuery> for GuestFilter {
    fn from(value: GuestQuery) -> Self {
        Self {
            search: non_blank(value.search),
            outstanding_only: value.outstanding,
        }
    }
}

/// Scanned ID document.
#[derive(Deserialize, ToSchema)]
pub struct IdImageRequest {
    pub url: String,
}

/// Pasted import rows, one guest per line.
#[derive(Deserialize, ToSchema)]
pub struct ImportRequest {
    pub text: String,
}

/// Collection against the outstanding balance.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettlementRequest {
    #[schema(value_type = i64)]
    pub amount: Money,
    pub method: Option<String>,
    #[serde(default)]
    pub allow_overpayment: bool,
}

impl TryFrom<SettlementRequest> for Settlement {
    type Error = Error;

    fn try_from(value: SettlementRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            amount: value.amount,
            method: parse_optional_label(value.method.as_deref(), FieldName::new("method"))?,
            allow_overpayment: value.allow_overpayment,
        })
    }
}

fn guest_id(raw: &str) -> Result<GuestId, Error> {
    parse_id(raw, FieldName::new("id"))
}

/// Guests ordered by name.
#[utoipa::path(
    get,
    path = "/api/v1/guests",
    params(GuestQuery),
    responses(
        (status = 200, description = "Guests", body = [GuestSchema]),
        (status = 401, description = "Not signed in", body = ErrorSchema)
    ),
    tags = ["guests"],
    operation_id = "listGuests"
)]
#[get("/guests")]
pub async fn list_guests(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<GuestQuery>,
) -> ApiResult<HttpResponse> {
    session.require_user(&state).await?;
    let guests = state.guests.list_guests(query.into_inner().into()).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(guests))
}

/// Register a guest.
#[utoipa::path(
    post,
    path = "/api/v1/guests",
    request_body = GuestRequest,
    responses(
        (status = 201, description = "Created", body = GuestSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Not permitted", body = ErrorSchema)
    ),
    tags = ["guests"],
    operation_id = "createGuest"
)]
#[post("/guests")]
pub async fn create_guest(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<GuestRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    let draft = GuestDraft::try_from(payload.into_inner())?;
    let guest = state.guests.create_guest(&actor, draft).await?;
    Ok(HttpResponse::Created().json(guest))
}

/// Download every guest as a JSON attachment.
#[utoipa::path(
    get,
    path = "/api/v1/guests/export",
    responses(
        (status = 200, description = "Guest export", body = [GuestSchema]),
        (status = 401, description = "Not signed in", body = ErrorSchema)
    ),
    tags = ["guests"],
    operation_id = "exportGuests"
)]
#[get("/guests/export")]
pub async fn export_guests(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    session.require_user(&state).await?;
    let guests = state.guests.export_guests().await?;
    let disposition = ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(EXPORT_FILE_NAME.to_owned())],
    };
    Ok(HttpResponse::Ok()
        .insert_header(no_store_header())
        .insert_header(disposition)
        .json(guests))
}

/// Import pasted rows, skipping known ID numbers.
#[utoipa::path(
    post,
    path = "/api/v1/guests/import",
    request_body = ImportRequest,
    responses(
        (status = 200, description = "Import summary", body = ImportSummarySchema),
        (status = 403, description = "Not permitted", body = ErrorSchema)
    ),
    tags = ["guests"],
    operation_id = "importGuests"
)]
#[post("/guests/import")]
pub async fn import_guests(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ImportRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    let summary = state.guests.import_guests(&actor, &payload.text).await?;
    Ok(HttpResponse::Ok().json(summary))
}

/// One guest.
#[utoipa::path(
    get,
    path = "/api/v1/guests/{id}",
    params(("id" = String, Path, description = "Guest id")),
    responses(
        (status = 200, description = "Guest", body = GuestSchema),
        (status = 404, description = "Unknown guest", body = ErrorSchema)
    ),
    tags = ["guests"],
    operation_id = "getGuest"
)]
#[get("/guests/{id}")]
pub async fn get_guest(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_user(&state).await?;
    let guest = state.guests.get_guest(&guest_id(&path)?).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(guest))
}

/// Replace a guest's details.
#[utoipa::path(
    put,
    path = "/api/v1/guests/{id}",
    params(("id" = String, Path, description = "Guest id")),
    request_body = GuestRequest,
    responses(
        (status = 200, description = "Updated", body = GuestSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown guest", body = ErrorSchema)
    ),
    tags = ["guests"],
    operation_id = "updateGuest"
)]
#[put("/guests/{id}")]
pub async fn update_guest(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<GuestRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    let id = guest_id(&path)?;
    let draft = GuestDraft::try_from(payload.into_inner())?;
    let guest = state.guests.update_guest(&actor, &id, draft).await?;
    Ok(HttpResponse::Ok().json(guest))
}

/// Remove a guest.
#[utoipa::path(
    delete,
    path = "/api/v1/guests/{id}",
    params(("id" = String, Path, description = "Guest id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "Admin only", body = ErrorSchema),
        (status = 404, description = "Unknown guest", body = ErrorSchema)
    ),
    tags = ["guests"],
    operation_id = "deleteGuest"
)]
#[delete("/guests/{id}")]
pub async fn delete_guest(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    state.guests.delete_guest(&actor, &guest_id(&path)?).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Attach a scanned ID document, verifying the guest.
#[utoipa::path(
    put,
    path = "/api/v1/guests/{id}/id-image",
    params(("id" = String, Path, description = "Guest id")),
    request_body = IdImageRequest,
    responses(
        (status = 200, description = "Verified", body = GuestSchema),
        (status = 400, description = "Blank image", body = ErrorSchema),
        (status = 404, description = "Unknown guest", body = ErrorSchema)
    ),
    tags = ["guests"],
    operation_id = "attachGuestIdImage"
)]
#[put("/guests/{id}/id-image")]
pub async fn attach_id_image(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<IdImageRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    let id = guest_id(&path)?;
    let guest = state.guests.attach_id_image(&actor, &id, &payload.url).await?;
    Ok(HttpResponse::Ok().json(guest))
}

/// Collect against the guest's outstanding balance.
#[utoipa::path(
    post,
    path = "/api/v1/guests/{id}/settlements",
    params(("id" = String, Path, description = "Guest id")),
    request_body = SettlementRequest,
    responses(
        (status = 200, description = "Settled", body = GuestSchema),
        (status = 400, description = "Invalid amount", body = ErrorSchema),
        (status = 404, description = "Unknown guest", body = ErrorSchema)
    ),
    tags = ["guests"],
    operation_id = "settleGuestBalance"
)]
#[post("/guests/{id}/settlements")]
pub async fn settle(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<SettlementRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    let id = guest_id(&path)?;
    let settlement = Settlement::try_from(payload.into_inner())?;
    let guest = state.guests.settle(&actor, &id, settlement).await?;
    Ok(HttpResponse::Ok().json(guest))
}

#[cfg(test)]
#[path = "guests_tests.rs"]
mod tests;
