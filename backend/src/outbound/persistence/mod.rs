//! PostgreSQL persistence adapters using Diesel.
//!
//! Each repository implements one driven port from
//! [`crate::domain::ports`] over a shared bb8 pool of `diesel-async`
//! connections. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) stay private to this module; everything crossing the
//! boundary is a domain type or a [`RepositoryError`](crate::domain::ports::RepositoryError).
//!
//! ```no_run
//! use frontdesk::outbound::persistence::{
//!     DbPool, DieselRoomRepository, PoolConfig, run_migrations,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let url = "postgres://localhost/frontdesk";
//! run_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let rooms = DieselRoomRepository::new(pool);
//! # let _ = rooms;
//! # Ok(())
//! # }
//! ```

mod diesel_fiscal_day_repository;
mod diesel_guest_repository;
pub(crate) mod diesel_helpers;
mod diesel_payroll_repository;
mod diesel_reservation_repository;
mod diesel_room_repository;
mod diesel_transaction_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_fiscal_day_repository::DieselFiscalDayRepository;
pub use diesel_guest_repository::DieselGuestRepository;
pub use diesel_payroll_repository::{DieselSalaryPaymentRepository, DieselStaffRepository};
pub use diesel_reservation_repository::DieselReservationRepository;
pub use diesel_room_repository::DieselRoomRepository;
pub use diesel_transaction_repository::DieselTransactionRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
