//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`. The
//! wrappers here mirror their wire shape (camelCase, money as integer paisa,
//! labelled enums as their display text) for the generated document only.

#![expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The write clashes with existing state (double booking, duplicate key).
    #[schema(rename = "conflict")]
    Conflict,
    /// A dependency such as the database is unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "room 101 is already booked for these dates")]
    message: String,
    /// Correlation identifier, echoed in the `trace-id` header.
    #[schema(example = "00000000-0000-0000-0000-000000000000")]
    trace_id: Option<String>,
    /// Field-level context such as `{ "field": "checkIn", "code": "invalid_date" }`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User, rename_all = "camelCase")]
pub struct UserSchema {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "admin@hotelfountain.com")]
    email: String,
    #[schema(example = "Front Office Admin")]
    name: String,
    /// `ADMIN`, `FRONT_DESK` or `ACCOUNTANT`.
    #[schema(example = "FRONT_DESK")]
    role: String,
}

/// OpenAPI schema for [`crate::domain::Room`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Room, rename_all = "camelCase")]
pub struct RoomSchema {
    id: String,
    #[schema(example = "101")]
    number: String,
    #[schema(example = "Fountain Deluxe")]
    category: String,
    /// Nightly rate in paisa.
    #[schema(example = 550_000)]
    rate: i64,
    #[schema(example = "AVAILABLE")]
    status: String,
}

/// OpenAPI schema for [`crate::domain::StatusCounts`].
#[derive(ToSchema)]
#[schema(as = crate::domain::StatusCounts, rename_all = "camelCase")]
pub struct StatusCountsSchema {
    available: usize,
    occupied: usize,
    dirty: usize,
    reserved: usize,
    out_of_order: usize,
}

/// OpenAPI schema for [`crate::domain::RoomTile`].
#[derive(ToSchema)]
#[schema(as = crate::domain::RoomTile, rename_all = "camelCase")]
pub struct RoomTileSchema {
    number: String,
    category: String,
    rate: i64,
    /// Effective status for the board date.
    status: String,
    reservation_id: Option<String>,
}

/// OpenAPI schema for [`crate::domain::RoomBoard`].
#[derive(ToSchema)]
#[schema(as = crate::domain::RoomBoard, rename_all = "camelCase")]
pub struct RoomBoardSchema {
    #[schema(value_type = String, format = Date, example = "2025-03-10")]
    date: String,
    counts: StatusCountsSchema,
    tiles: Vec<RoomTileSchema>,
}

/// OpenAPI schema for [`crate::domain::Guest`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Guest, rename_all = "camelCase")]
pub struct GuestSchema {
    id: String,
    #[schema(example = "Ayesha Rahman")]
    name: String,
    email: String,
    #[schema(example = "01711000000")]
    phone: String,
    #[schema(example = "NID")]
    id_type: String,
    id_number: String,
    address: String,
    #[schema(example = "Dhaka")]
    city: String,
    #[schema(example = "Bangladesh")]
    country: String,
    preferences: Option<String>,
    /// Scanned ID document; its presence marks the guest verified.
    id_image_url: Option<String>,
    outstanding_balance: i64,
}

/// OpenAPI schema for [`crate::domain::ImportSummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ImportSummary)]
pub struct ImportSummarySchema {
    imported: usize,
    skipped: usize,
}

/// OpenAPI schema for [`crate::domain::Reservation`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Reservation, rename_all = "camelCase")]
pub struct ReservationSchema {
    id: String,
    room_numbers: Vec<String>,
    guest_ids: Vec<String>,
    #[schema(value_type = String, format = Date)]
    check_in: String,
    #[schema(value_type = String, format = Date)]
    check_out: String,
    /// `PENDING`, `CHECKED_IN`, `CHECKED_OUT` or `CANCELLED`.
    status: String,
    /// `RESERVATION` or `CHECK_IN`.
    stay_type: String,
    laundry: i64,
    mini_bar: i64,
    extra_charges: i64,
    discount: i64,
    paid_amount: i64,
    payment_method: Option<String>,
    on_duty_officer: Option<String>,
    special_requests: Option<String>,
    notes: Option<String>,
    total_amount: i64,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    /// Present on list responses only.
    primary_guest_name: Option<String>,
}

/// OpenAPI schema for [`crate::domain::RoomLine`].
#[derive(ToSchema)]
#[schema(as = crate::domain::RoomLine, rename_all = "camelCase")]
pub struct RoomLineSchema {
    room_number: String,
    rate: i64,
    amount: i64,
}

/// OpenAPI schema for [`crate::domain::Invoice`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Invoice, rename_all = "camelCase")]
pub struct InvoiceSchema {
    #[schema(example = "3FA85F64")]
    invoice_number: String,
    reservation_id: String,
    guest_name: String,
    #[schema(example = "10 Mar 2025")]
    check_in: String,
    check_out: String,
    nights: u32,
    room_lines: Vec<RoomLineSchema>,
    room_subtotal: i64,
    /// Laundry plus mini-bar.
    fb_charges: i64,
    extra_charges: i64,
    discount: i64,
    grand_total: i64,
    paid_amount: i64,
    balance_due: i64,
    payment_method: Option<String>,
}

/// OpenAPI schema for [`crate::domain::ports::CheckOutOutcome`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::CheckOutOutcome, rename_all = "camelCase")]
pub struct CheckOutOutcomeSchema {
    reservation: ReservationSchema,
    invoice: InvoiceSchema,
    /// Unpaid balance moved onto the primary guest's ledger.
    carried_to_ledger: i64,
}

/// OpenAPI schema for [`crate::domain::Transaction`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Transaction, rename_all = "camelCase")]
pub struct TransactionSchema {
    id: String,
    #[schema(value_type = String, format = DateTime)]
    timestamp: String,
    #[schema(example = "101, 102")]
    room_label: String,
    guest_name: String,
    #[schema(rename = "type", example = "Room Payment")]
    kind: String,
    amount: i64,
}

/// OpenAPI schema for [`crate::domain::LedgerRow`].
#[derive(ToSchema)]
#[schema(as = crate::domain::LedgerRow, rename_all = "camelCase")]
pub struct LedgerRowSchema {
    reservation_id: String,
    resident: String,
    room_numbers: Vec<String>,
    billed: i64,
    collected: i64,
    due: i64,
}

/// OpenAPI schema for [`crate::domain::DailySummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::DailySummary, rename_all = "camelCase")]
pub struct DailySummarySchema {
    billed: i64,
    collected: i64,
    due: i64,
    token_adjustment: i64,
    closing_balance: i64,
    closed: bool,
}

/// OpenAPI schema for [`crate::domain::DailyReport`].
#[derive(ToSchema)]
#[schema(as = crate::domain::DailyReport)]
pub struct DailyReportSchema {
    #[schema(value_type = String, format = Date)]
    date: String,
    rows: Vec<LedgerRowSchema>,
    summary: DailySummarySchema,
}

/// OpenAPI schema for [`crate::domain::ports::DayClosing`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::DayClosing, rename_all = "camelCase")]
pub struct DayClosingSchema {
    report: DailyReportSchema,
    #[schema(value_type = String, format = Date)]
    next_date: String,
}

/// OpenAPI schema for [`crate::domain::Staff`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Staff, rename_all = "camelCase")]
pub struct StaffSchema {
    id: String,
    name: String,
    designation: String,
    #[schema(value_type = String, format = Date)]
    joining_date: String,
    base_salary: i64,
    bonus: i64,
    deductions: i64,
}

/// OpenAPI schema for [`crate::domain::SalaryPayment`].
#[derive(ToSchema)]
#[schema(as = crate::domain::SalaryPayment, rename_all = "camelCase")]
pub struct SalaryPaymentSchema {
    id: String,
    staff_id: String,
    #[schema(example = "March")]
    month: String,
    year: i32,
    amount: i64,
    /// `PAID` or `PENDING`.
    status: String,
    #[schema(value_type = String, format = DateTime)]
    timestamp: String,
}

/// OpenAPI schema for [`crate::domain::PayrollSummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::PayrollSummary, rename_all = "camelCase")]
pub struct PayrollSummarySchema {
    headcount: usize,
    monthly_payroll: i64,
    pending_payments: usize,
}

/// OpenAPI schema for [`crate::domain::PaymentCell`].
#[derive(ToSchema)]
#[schema(as = crate::domain::PaymentCell, rename_all = "camelCase")]
pub struct PaymentCellSchema {
    month: String,
    payment_id: Option<String>,
    status: Option<String>,
    amount: Option<i64>,
}

/// OpenAPI schema for [`crate::domain::PaymentGridRow`].
#[derive(ToSchema)]
#[schema(as = crate::domain::PaymentGridRow, rename_all = "camelCase")]
pub struct PaymentGridRowSchema {
    staff_id: String,
    name: String,
    base_salary: i64,
    months: Vec<PaymentCellSchema>,
}

/// OpenAPI schema for [`crate::domain::AssistantReply`].
#[derive(ToSchema)]
#[schema(as = crate::domain::AssistantReply)]
pub struct AssistantReplySchema {
    text: String,
    /// Fallback text was returned because the model was unavailable.
    degraded: bool,
}

/// OpenAPI schema for [`crate::domain::ChangeEvent`], as pushed on `/ws`.
#[derive(ToSchema)]
#[schema(as = crate::domain::ChangeEvent, rename_all = "camelCase")]
pub struct ChangeEventSchema {
    #[schema(example = "reservations")]
    table: String,
    /// `insert`, `update` or `delete`.
    kind: String,
    id: String,
    record: Option<serde_json::Value>,
    #[schema(value_type = String, format = DateTime)]
    occurred_at: String,
}
