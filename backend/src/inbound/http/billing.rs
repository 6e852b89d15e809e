//! Invoices and the transaction ledger.

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, MASTER_ROOM_LABEL, Money, NewTransaction, WALK_IN_GUEST};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::{ErrorSchema, InvoiceSchema, TransactionSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, non_blank, parse_id, parse_label};

/// Invoice search.
#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InvoiceQuery {
    /// Guest name, invoice number or room number.
    pub search: Option<String>,
}

/// Ledger page size.
#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TransactionQuery {
    /// Most recent entries to return; all when absent.
    pub limit: Option<usize>,
}

/// Manual ledger entry. Room and guest default to the master account.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub room_label: Option<String>,
    pub guest_name: Option<String>,
    /// `Laundry`, `Mini-bar` or `Room Payment`.
    #[serde(rename = "type")]
    #[schema(rename = "type", example = "Laundry")]
    pub kind: String,
    #[schema(value_type = i64)]
    pub amount: Money,
}

impl TryFrom<TransactionRequest> for NewTransaction {
    type Error = Error;

    fn try_from(value: TransactionRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            room_label: non_blank(value.room_label).unwrap_or_else(|| MASTER_ROOM_LABEL.to_owned()),
            guest_name: non_blank(value.guest_name).unwrap_or_else(|| WALK_IN_GUEST.to_owned()),
            kind: parse_label(&value.kind, FieldName::new("type"))?,
            amount: value.amount,
        })
    }
}

/// Invoice for one stay.
#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}/invoice",
    params(("id" = String, Path, description = "Reservation id")),
    responses(
        (status = 200, description = "Invoice", body = InvoiceSchema),
        (status = 404, description = "Unknown reservation", body = ErrorSchema)
    ),
    tags = ["billing"],
    operation_id = "getInvoice"
)]
#[get("/reservations/{id}/invoice")]
pub async fn invoice(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_user(&state).await?;
    let id = parse_id(&path, FieldName::new("id"))?;
    let invoice = state.billing.invoice(&id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(invoice))
}

/// Invoices for every non-cancelled stay.
#[utoipa::path(
    get,
    path = "/api/v1/invoices",
    params(InvoiceQuery),
    responses((status = 200, description = "Invoices", body = [InvoiceSchema])),
    tags = ["billing"],
    operation_id = "listInvoices"
)]
#[get("/invoices")]
pub async fn list_invoices(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<InvoiceQuery>,
) -> ApiResult<HttpResponse> {
    session.require_user(&state).await?;
    let search = non_blank(query.into_inner().search);
    let invoices = state.billing.list_invoices(search).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(invoices))
}

/// Ledger entries, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/transactions",
    params(TransactionQuery),
    responses((status = 200, description = "Transactions", body = [TransactionSchema])),
    tags = ["billing"],
    operation_id = "listTransactions"
)]
#[get("/transactions")]
pub async fn list_transactions(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<TransactionQuery>,
) -> ApiResult<HttpResponse> {
    session.require_user(&state).await?;
    let entries = state.billing.list_transactions(query.limit).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(entries))
}

/// Record a manual charge or payment.
#[utoipa::path(
    post,
    path = "/api/v1/transactions",
    request_body = TransactionRequest,
    responses(
        (status = 201, description = "Recorded", body = TransactionSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Not permitted", body = ErrorSchema)
    ),
    tags = ["billing"],
    operation_id = "recordTransaction"
)]
#[post("/transactions")]
pub async fn record_transaction(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<TransactionRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(&state).await?;
    let entry = NewTransaction::try_from(payload.into_inner())?;
    let recorded = state.billing.record_transaction(&actor, entry).await?;
    Ok(HttpResponse::Created().json(recorded))
}
