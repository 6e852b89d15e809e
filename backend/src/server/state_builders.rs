//! Assemble the domain services behind each driving port.
//!
//! The same services run over either the Diesel repositories or the
//! in-memory ones; [`Repositories`] carries whichever set is in use.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use frontdesk::domain::ports::{
    Assistant, ChangeNotifier, FiscalDayRepository, GuestRepository, PasswordHasher,
    ReservationRepository, RoomCatalogue, RoomRepository, SalaryPaymentRepository,
    StaffRepository, TransactionRepository, UnconfiguredCompletionSource, UserRepository,
};
use frontdesk::domain::{
    AssistantService, BillingService, Error, FiscalReportService, GuestLedgerService,
    PayrollService, RoomCatalogueService, StayService, UserAdminService,
};
use frontdesk::inbound::http::state::HttpState;
use frontdesk::outbound::gemini::GeminiHttpSource;
use frontdesk::outbound::memory::{
    MemoryFiscalDayRepository, MemoryGuestRepository, MemoryReservationRepository,
    MemoryRoomRepository, MemorySalaryPaymentRepository, MemoryStaffRepository,
    MemoryTransactionRepository, MemoryUserRepository,
};
use frontdesk::outbound::persistence::{
    DbPool, DieselFiscalDayRepository, DieselGuestRepository, DieselReservationRepository,
    DieselRoomRepository, DieselSalaryPaymentRepository, DieselStaffRepository,
    DieselTransactionRepository, DieselUserRepository,
};
use frontdesk::outbound::security::Argon2PasswordHasher;
use frontdesk::settings::DEFAULT_BOOTSTRAP_PASSWORD;

/// Adapters shared by every service.
pub(crate) struct SharedAdapters {
    pub notifier: Arc<dyn ChangeNotifier>,
    pub clock: Arc<dyn Clock>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub completion: Option<Arc<GeminiHttpSource>>,
}

impl SharedAdapters {
    pub(crate) fn new(
        notifier: Arc<dyn ChangeNotifier>,
        completion: Option<Arc<GeminiHttpSource>>,
    ) -> Self {
        Self {
            notifier,
            clock: Arc::new(DefaultClock),
            hasher: Arc::new(Argon2PasswordHasher::new()),
            completion,
        }
    }
}

/// One repository per aggregate.
pub(crate) struct Repositories<Ro, Gu, Re, Tx, Da, Us, Sf, Pa> {
    rooms: Arc<Ro>,
    guests: Arc<Gu>,
    reservations: Arc<Re>,
    transactions: Arc<Tx>,
    days: Arc<Da>,
    users: Arc<Us>,
    staff: Arc<Sf>,
    payments: Arc<Pa>,
}

pub(crate) type MemoryRepositories = Repositories<
    MemoryRoomRepository,
    MemoryGuestRepository,
    MemoryReservationRepository,
    MemoryTransactionRepository,
    MemoryFiscalDayRepository,
    MemoryUserRepository,
    MemoryStaffRepository,
    MemorySalaryPaymentRepository,
>;

pub(crate) type DieselRepositories = Repositories<
    DieselRoomRepository,
    DieselGuestRepository,
    DieselReservationRepository,
    DieselTransactionRepository,
    DieselFiscalDayRepository,
    DieselUserRepository,
    DieselStaffRepository,
    DieselSalaryPaymentRepository,
>;

impl MemoryRepositories {
    pub(crate) fn in_memory() -> Self {
        Self {
            rooms: Arc::new(MemoryRoomRepository::new()),
            guests: Arc::new(MemoryGuestRepository::new()),
            reservations: Arc::new(MemoryReservationRepository::new()),
            transactions: Arc::new(MemoryTransactionRepository::new()),
            days: Arc::new(MemoryFiscalDayRepository::new()),
            users: Arc::new(MemoryUserRepository::new()),
            staff: Arc::new(MemoryStaffRepository::new()),
            payments: Arc::new(MemorySalaryPaymentRepository::new()),
        }
    }
}

impl DieselRepositories {
    pub(crate) fn diesel(pool: &DbPool) -> Self {
        Self {
            rooms: Arc::new(DieselRoomRepository::new(pool.clone())),
            guests: Arc::new(DieselGuestRepository::new(pool.clone())),
            reservations: Arc::new(DieselReservationRepository::new(pool.clone())),
            transactions: Arc::new(DieselTransactionRepository::new(pool.clone())),
            days: Arc::new(DieselFiscalDayRepository::new(pool.clone())),
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            staff: Arc::new(DieselStaffRepository::new(pool.clone())),
            payments: Arc::new(DieselSalaryPaymentRepository::new(pool.clone())),
        }
    }
}

impl<Ro, Gu, Re, Tx, Da, Us, Sf, Pa> Repositories<Ro, Gu, Re, Tx, Da, Us, Sf, Pa>
where
    Ro: RoomRepository + 'static,
    Gu: GuestRepository + 'static,
    Re: ReservationRepository + 'static,
    Tx: TransactionRepository + 'static,
    Da: FiscalDayRepository + 'static,
    Us: UserRepository + 'static,
    Sf: StaffRepository + 'static,
    Pa: SalaryPaymentRepository + 'static,
{
    /// Build the HTTP state, creating the bootstrap administrator first when
    /// the account table is empty.
    pub(crate) async fn into_http_state(
        self,
        shared: &SharedAdapters,
        admin_password: Option<&str>,
    ) -> Result<HttpState, Error> {
        let notifier = &shared.notifier;
        let clock = &shared.clock;

        let accounts = Arc::new(UserAdminService::new(
            self.users,
            shared.hasher.clone(),
            notifier.clone(),
            clock.clone(),
        ));
        let password = admin_password.unwrap_or_else(|| {
            warn!("bootstrap admin password not configured; using the default");
            DEFAULT_BOOTSTRAP_PASSWORD
        });
        if let Some(admin) = accounts.bootstrap_admin(password).await? {
            info!(email = %admin.email, "bootstrap administrator ready");
        }

        let rooms: Arc<dyn RoomCatalogue> = Arc::new(RoomCatalogueService::new(
            self.rooms.clone(),
            self.reservations.clone(),
            notifier.clone(),
            clock.clone(),
        ));
        let assistant: Arc<dyn Assistant> = match &shared.completion {
            Some(source) => Arc::new(AssistantService::new(source.clone(), rooms.clone())),
            None => Arc::new(AssistantService::new(
                Arc::new(UnconfiguredCompletionSource),
                rooms.clone(),
            )),
        };

        Ok(HttpState {
            login: accounts.clone(),
            users: accounts,
            stays: Arc::new(StayService::new(
                self.rooms.clone(),
                self.guests.clone(),
                self.reservations.clone(),
                self.transactions.clone(),
                notifier.clone(),
                clock.clone(),
            )),
            guests: Arc::new(GuestLedgerService::new(
                self.guests.clone(),
                self.transactions.clone(),
                notifier.clone(),
                clock.clone(),
            )),
            billing: Arc::new(BillingService::new(
                self.rooms,
                self.guests.clone(),
                self.reservations.clone(),
                self.transactions,
                notifier.clone(),
                clock.clone(),
            )),
            reports: Arc::new(FiscalReportService::new(
                self.reservations,
                self.guests,
                self.days,
                notifier.clone(),
                clock.clone(),
            )),
            payroll: Arc::new(PayrollService::new(
                self.staff,
                self.payments,
                notifier.clone(),
                clock.clone(),
            )),
            rooms,
            assistant,
        })
    }
}
