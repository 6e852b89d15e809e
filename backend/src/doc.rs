//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` handler, the probe endpoints, the
//! schema wrappers from [`crate::inbound::http::schemas`] and the request
//! bodies declared next to each handler. The session cookie is the only
//! security scheme.
//!
//! Swagger UI serves the document in debug builds; `openapi-dump` prints it
//! for external tooling.

use crate::inbound::http::assistant::{AnalysisRequest, BriefingRequest, NotesRequest};
use crate::inbound::http::auth::LoginRequest;
use crate::inbound::http::billing::TransactionRequest;
use crate::inbound::http::guests::{
    GuestRequest, IdImageRequest, ImportRequest, SettlementRequest,
};
use crate::inbound::http::payroll::{CycleBody, PaymentStatusRequest, StaffRequest};
use crate::inbound::http::reports::TokenRequest;
use crate::inbound::http::reservations::{CheckOutBody, PaymentRequest, ReservationRequest};
use crate::inbound::http::rooms::{CreateRoomRequest, RoomStatusRequest, UpdateRoomRequest};
use crate::inbound::http::schemas::{
    AssistantReplySchema, ChangeEventSchema, CheckOutOutcomeSchema, DailyReportSchema,
    DailySummarySchema, DayClosingSchema, ErrorCodeSchema, ErrorSchema, GuestSchema,
    ImportSummarySchema, InvoiceSchema, LedgerRowSchema, PaymentCellSchema,
    PaymentGridRowSchema, PayrollSummarySchema, ReservationSchema, RoomBoardSchema,
    RoomLineSchema, RoomSchema, RoomTileSchema, SalaryPaymentSchema, StaffSchema,
    StatusCountsSchema, TransactionSchema, UserSchema,
};
use crate::inbound::http::users::{CreateUserRequest, UpdateUserRequest};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the front office API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Front office API",
        description = "Rooms, guests, reservations, billing, fiscal reports, payroll and the AI assistant for a single hotel front desk."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::current_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::rooms::list_rooms,
        crate::inbound::http::rooms::create_room,
        crate::inbound::http::rooms::get_room,
        crate::inbound::http::rooms::update_room,
        crate::inbound::http::rooms::set_room_status,
        crate::inbound::http::rooms::board,
        crate::inbound::http::guests::list_guests,
        crate::inbound::http::guests::create_guest,
        crate::inbound::http::guests::export_guests,
        crate::inbound::http::guests::import_guests,
        crate::inbound::http::guests::get_guest,
        crate::inbound::http::guests::update_guest,
        crate::inbound::http::guests::delete_guest,
        crate::inbound::http::guests::attach_id_image,
        crate::inbound::http::guests::settle,
        crate::inbound::http::reservations::list_reservations,
        crate::inbound::http::reservations::create_reservation,
        crate::inbound::http::reservations::get_reservation,
        crate::inbound::http::reservations::update_reservation,
        crate::inbound::http::reservations::delete_reservation,
        crate::inbound::http::reservations::check_in,
        crate::inbound::http::reservations::collect_payment,
        crate::inbound::http::reservations::check_out,
        crate::inbound::http::reservations::cancel,
        crate::inbound::http::billing::invoice,
        crate::inbound::http::billing::list_invoices,
        crate::inbound::http::billing::list_transactions,
        crate::inbound::http::billing::record_transaction,
        crate::inbound::http::reports::daily_report,
        crate::inbound::http::reports::save_token,
        crate::inbound::http::reports::close_day,
        crate::inbound::http::payroll::list_staff,
        crate::inbound::http::payroll::create_staff,
        crate::inbound::http::payroll::update_staff,
        crate::inbound::http::payroll::delete_staff,
        crate::inbound::http::payroll::summary,
        crate::inbound::http::payroll::generate_cycle,
        crate::inbound::http::payroll::payment_grid,
        crate::inbound::http::payroll::set_payment_status,
        crate::inbound::http::payroll::delete_payment,
        crate::inbound::http::assistant::briefing,
        crate::inbound::http::assistant::refine_notes,
        crate::inbound::http::assistant::analyse,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserSchema,
        RoomSchema,
        StatusCountsSchema,
        RoomTileSchema,
        RoomBoardSchema,
        GuestSchema,
        ImportSummarySchema,
        ReservationSchema,
        RoomLineSchema,
        InvoiceSchema,
        CheckOutOutcomeSchema,
        TransactionSchema,
        LedgerRowSchema,
        DailySummarySchema,
        DailyReportSchema,
        DayClosingSchema,
        StaffSchema,
        SalaryPaymentSchema,
        PayrollSummarySchema,
        PaymentCellSchema,
        PaymentGridRowSchema,
        AssistantReplySchema,
        ChangeEventSchema,
        LoginRequest,
        CreateUserRequest,
        UpdateUserRequest,
        CreateRoomRequest,
        UpdateRoomRequest,
        RoomStatusRequest,
        GuestRequest,
        IdImageRequest,
        ImportRequest,
        SettlementRequest,
        ReservationRequest,
        PaymentRequest,
        CheckOutBody,
        TransactionRequest,
        TokenRequest,
        StaffRequest,
        CycleBody,
        PaymentStatusRequest,
        BriefingRequest,
        NotesRequest,
        AnalysisRequest,
    )),
    tags(
        (name = "auth", description = "Sign-in and the current session"),
        (name = "users", description = "Staff accounts and roles"),
        (name = "rooms", description = "Room catalogue and the live room board"),
        (name = "guests", description = "Guest records, balances and bulk import"),
        (name = "reservations", description = "Bookings, check-in and check-out"),
        (name = "billing", description = "Invoices and the transaction ledger"),
        (name = "reports", description = "Daily fiscal report and day closing"),
        (name = "payroll", description = "Staff salaries and payment cycles"),
        (name = "assistant", description = "AI briefings and note refinement"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
