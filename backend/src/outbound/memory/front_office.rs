//! In-memory rooms, guests, stays, ledger and fiscal days.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::ports::{
    FiscalDayRepository, GuestRepository, RepositoryError, ReservationRepository, RoomRepository,
    TransactionRepository,
};
use crate::domain::{
    FiscalDay, Guest, GuestId, Reservation, ReservationId, Room, RoomId, RoomNumber, Transaction,
    TransactionId,
};

use super::records::Records;

/// Rooms keyed by id, unique by number.
#[derive(Debug, Default)]
pub struct MemoryRoomRepository {
    rooms: Records<RoomId, Room>,
}

impl MemoryRoomRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for MemoryRoomRepository {
    async fn list(&self) -> Result<Vec<Room>, RepositoryError> {
        let mut rooms = self.rooms.all().await;
        rooms.sort_by(|a, b| a.number.cmp(&b.number));
        Ok(rooms)
    }

    async fn find_by_number(&self, number: &RoomNumber) -> Result<Option<Room>, RepositoryError> {
        Ok(self.rooms.find(|room| room.number == *number).await)
    }

    async fn insert(&self, room: &Room) -> Result<(), RepositoryError> {
        let stored = self
            .rooms
            .put_unique(room.id, room.clone(), |other| other.number == room.number)
            .await;
        if stored {
            Ok(())
        } else {
            Err(RepositoryError::duplicate("rooms_number_key"))
        }
    }

    async fn update(&self, room: &Room) -> Result<(), RepositoryError> {
        self.rooms.replace(&room.id, room.clone()).await;
        Ok(())
    }
}

/// Guest ledger.
#[derive(Debug, Default)]
pub struct MemoryGuestRepository {
    guests: Records<GuestId, Guest>,
}

impl MemoryGuestRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GuestRepository for MemoryGuestRepository {
    async fn list(&self) -> Result<Vec<Guest>, RepositoryError> {
        let mut guests = self.guests.all().await;
        guests.sort_by_cached_key(|guest| guest.name.to_lowercase());
        Ok(guests)
    }

    async fn find(&self, id: &GuestId) -> Result<Option<Guest>, RepositoryError> {
        Ok(self.guests.get(id).await)
    }

    async fn insert(&self, guest: &Guest) -> Result<(), RepositoryError> {
        self.guests.put(guest.id, guest.clone()).await;
        Ok(())
    }

    async fn update(&self, guest: &Guest) -> Result<(), RepositoryError> {
        self.guests.replace(&guest.id, guest.clone()).await;
        Ok(())
    }

    async fn delete(&self, id: &GuestId) -> Result<bool, RepositoryError> {
        Ok(self.guests.remove(id).await)
    }
}

/// Stays.
#[derive(Debug, Default)]
pub struct MemoryReservationRepository {
    stays: Records<ReservationId, Reservation>,
}

impl MemoryReservationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReservationRepository for MemoryReservationRepository {
    async fn list(&self) -> Result<Vec<Reservation>, RepositoryError> {
        let mut stays = self.stays.all().await;
        stays.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(stays)
    }

    async fn find(&self, id: &ReservationId) -> Result<Option<Reservation>, RepositoryError> {
        Ok(self.stays.get(id).await)
    }

    async fn insert(&self, reservation: &Reservation) -> Result<(), RepositoryError> {
        self.stays.put(reservation.id, reservation.clone()).await;
        Ok(())
    }

    async fn update(&self, reservation: &Reservation) -> Result<(), RepositoryError> {
        self.stays
            .replace(&reservation.id, reservation.clone())
            .await;
        Ok(())
    }

    async fn delete(&self, id: &ReservationId) -> Result<bool, RepositoryError> {
        Ok(self.stays.remove(id).await)
    }
}

/// Append-only ledger.
#[derive(Debug, Default)]
pub struct MemoryTransactionRepository {
    entries: Records<TransactionId, Transaction>,
}

impl MemoryTransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionRepository for MemoryTransactionRepository {
    async fn insert(&self, transaction: &Transaction) -> Result<(), RepositoryError> {
        self.entries.put(transaction.id, transaction.clone()).await;
        Ok(())
    }

    async fn list(&self, limit: Option<usize>) -> Result<Vec<Transaction>, RepositoryError> {
        let mut entries = self.entries.all().await;
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        if let Some(limit) = limit {
            entries.truncate(limit);
        }
        Ok(entries)
    }
}

/// Fiscal day state keyed by date.
#[derive(Debug, Default)]
pub struct MemoryFiscalDayRepository {
    days: Records<NaiveDate, FiscalDay>,
}

impl MemoryFiscalDayRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FiscalDayRepository for MemoryFiscalDayRepository {
    async fn find(&self, date: NaiveDate) -> Result<Option<FiscalDay>, RepositoryError> {
        Ok(self.days.get(&date).await)
    }

    async fn upsert(&self, day: &FiscalDay) -> Result<(), RepositoryError> {
        self.days.put(day.date, day.clone()).await;
        Ok(())
    }
}
