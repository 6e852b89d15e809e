//! In-memory implementations of the persistence ports.
//!
//! Used when no `database_url` is configured and by handler tests. State
//! lives for the life of the process; nothing is written to disk.

mod accounts;
mod front_office;
mod records;

pub use accounts::{MemorySalaryPaymentRepository, MemoryStaffRepository, MemoryUserRepository};
pub use front_office::{
    MemoryFiscalDayRepository, MemoryGuestRepository, MemoryReservationRepository,
    MemoryRoomRepository, MemoryTransactionRepository,
};
