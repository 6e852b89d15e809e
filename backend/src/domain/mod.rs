//! Front office domain: value types, aggregates, ports and services.
//!
//! Purpose: model rooms, guests, stays, billing, the fiscal day, payroll and
//! staff accounts independently of HTTP or storage. Inbound adapters call the
//! driving ports in [`ports`]; outbound adapters implement the driven ones.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Money: paisa amounts with taka display.
//! - One service per driving port (`RoomCatalogueService`, `StayService`, …).

pub mod error;
pub mod ports;

mod assistant;
mod assistant_service;
mod auth;
mod billing;
mod billing_service;
mod change_event;
mod fiscal_report;
mod fiscal_report_service;
mod guest;
mod guest_import;
mod guest_ledger_service;
mod ids;
mod labels;
mod ledger;
mod money;
mod payroll;
mod payroll_service;
mod reservation;
mod role;
mod room;
mod room_board;
mod room_catalogue_service;
mod service_support;
mod stay_service;
mod trace_id;
mod user;
mod user_admin_service;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::assistant::{
    AssistantReply, BRIEFING_SYSTEM_INSTRUCTION, CompletionProfile, CompletionRequest,
    DEFAULT_SYSTEM_INSTRUCTION, MISSING_KEY_TEXT, NOTES_SYSTEM_INSTRUCTION, briefing_prompt,
    refine_notes_prompt,
};
pub use self::assistant_service::AssistantService;
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::billing::{
    Invoice, RoomLine, StayTotals, WALK_IN_GUEST, display_date, nights, price_stay,
};
pub use self::billing_service::BillingService;
pub use self::change_event::{ChangeEvent, ChangeKind, ChangeTable};
pub use self::error::{Error, ErrorCode};
pub use self::fiscal_report::{DailyReport, DailySummary, FiscalDay, LedgerRow};
pub use self::fiscal_report_service::FiscalReportService;
pub use self::guest::{
    DEFAULT_CITY, DEFAULT_COUNTRY, Guest, GuestDraft, GuestFilter, GuestValidationError, IdType,
};
pub use self::guest_import::{
    ImportLine, ImportSummary, MIN_IMPORT_FIELDS, parse_import, parse_import_line,
};
pub use self::guest_ledger_service::GuestLedgerService;
pub use self::ids::{
    GuestId, ReservationId, RoomId, SalaryPaymentId, StaffId, TransactionId, UserId,
};
pub use self::labels::UnknownLabel;
pub use self::ledger::{
    MASTER_ROOM_LABEL, NewTransaction, Transaction, TransactionType, ensure_positive,
};
pub use self::money::Money;
pub use self::payroll::{
    Month, PaymentCell, PaymentGridRow, PaymentStatus, PayrollSummary, SalaryPayment, Staff,
    StaffDraft, StaffValidationError, payment_grid,
};
pub use self::payroll_service::PayrollService;
pub use self::reservation::{
    PaymentMethod, Reservation, ReservationDraft, ReservationFilter, ReservationStatus,
    ReservationValidationError, StatusFilter, StayCharges, StayType,
};
pub use self::role::{Capability, Role};
pub use self::room::{
    ROOM_NUMBER_MAX, Room, RoomCategory, RoomChanges, RoomNumber, RoomStatus,
    RoomValidationError,
};
pub use self::room_board::{
    BoardFilter, BoardSelector, RoomBoard, RoomTile, StatusCounts, effective_status,
};
pub use self::room_catalogue_service::RoomCatalogueService;
pub use self::stay_service::StayService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{EmailAddress, MIN_PASSWORD_LEN, User, UserValidationError};
pub use self::user_admin_service::{
    BOOTSTRAP_ADMIN_EMAIL, BOOTSTRAP_ADMIN_NAME, UserAdminService,
};
