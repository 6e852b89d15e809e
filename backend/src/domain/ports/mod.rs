//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, the change notifier, password hashing and the
//! completion source) are implemented by outbound adapters. Driving ports
//! (room catalogue, stay workflow and friends) are implemented by domain
//! services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod assistant;
mod billing_desk;
mod change_notifier;
mod fiscal_day_repository;
mod fiscal_reports;
mod guest_ledger;
mod guest_repository;
mod password_hasher;
mod payroll_admin;
mod payroll_repository;
mod repository_error;
mod reservation_repository;
mod room_catalogue;
mod room_repository;
mod stay_workflow;
mod text_completion_source;
mod transaction_repository;
mod user_admin;
mod user_repository;

#[cfg(test)]
pub use assistant::MockAssistant;
pub use assistant::Assistant;
#[cfg(test)]
pub use billing_desk::MockBillingDesk;
pub use billing_desk::BillingDesk;
#[cfg(test)]
pub use change_notifier::MockChangeNotifier;
pub use change_notifier::{ChangeNotifier, NoOpChangeNotifier};
#[cfg(test)]
pub use fiscal_day_repository::MockFiscalDayRepository;
pub use fiscal_day_repository::FiscalDayRepository;
#[cfg(test)]
pub use fiscal_reports::MockFiscalReports;
pub use fiscal_reports::{DayClosing, FiscalReports};
#[cfg(test)]
pub use guest_ledger::MockGuestLedger;
pub use guest_ledger::{GuestLedger, Settlement};
#[cfg(test)]
pub use guest_repository::MockGuestRepository;
pub use guest_repository::GuestRepository;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use payroll_admin::MockPayrollAdmin;
pub use payroll_admin::{CycleRequest, PayrollAdmin};
#[cfg(test)]
pub use payroll_repository::{MockSalaryPaymentRepository, MockStaffRepository};
pub use payroll_repository::{SalaryPaymentRepository, StaffRepository};
pub use repository_error::{RepositoryError, map_repository_error};
#[cfg(test)]
pub use reservation_repository::MockReservationRepository;
pub use reservation_repository::ReservationRepository;
#[cfg(test)]
pub use room_catalogue::MockRoomCatalogue;
pub use room_catalogue::{NewRoom, RoomCatalogue};
#[cfg(test)]
pub use room_repository::MockRoomRepository;
pub use room_repository::RoomRepository;
#[cfg(test)]
pub use stay_workflow::MockStayWorkflow;
pub use stay_workflow::{CheckOutOutcome, CheckOutRequest, StayListing, StayPayment, StayWorkflow};
#[cfg(test)]
pub use text_completion_source::MockTextCompletionSource;
pub use text_completion_source::{
    CompletionSourceError, TextCompletionSource, UnconfiguredCompletionSource,
};
#[cfg(test)]
pub use transaction_repository::MockTransactionRepository;
pub use transaction_repository::TransactionRepository;
#[cfg(test)]
pub use user_admin::{MockLoginService, MockUserAdmin};
pub use user_admin::{LoginService, NewUser, UserAdmin, UserChanges};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserCredentials, UserRepository};
