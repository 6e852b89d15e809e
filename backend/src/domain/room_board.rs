//! Room status board.
//!
//! The board overlays date-ranged reservations onto each room's physical
//! status. Counts always describe the whole hotel; filters only narrow the
//! tiles returned.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use super::{
    Money, Reservation, ReservationId, ReservationStatus, Room, RoomCategory, RoomNumber,
    RoomStatus,
};

/// Status a room shows on `date` once reservations are taken into account.
///
/// A stay covering the date wins: checked-in stays show the room as
/// occupied, pending ones as reserved. Without one, only housekeeping states
/// survive; stale occupied/reserved flags fall back to available.
#[must_use]
pub fn effective_status(room: &Room, reservations: &[Reservation], date: NaiveDate) -> RoomStatus {
    match active_reservation(room, reservations, date) {
        Some(stay) if stay.status == ReservationStatus::CheckedIn => RoomStatus::Occupied,
        Some(_) => RoomStatus::Reserved,
        None => match room.status {
            RoomStatus::Dirty | RoomStatus::OutOfOrder => room.status,
            _ => RoomStatus::Available,
        },
    }
}

fn active_reservation<'a>(
    room: &Room,
    reservations: &'a [Reservation],
    date: NaiveDate,
) -> Option<&'a Reservation> {
    reservations
        .iter()
        .find(|stay| stay.holds_room_on(&room.number, date))
}

/// Number of rooms in each effective status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub available: usize,
    pub occupied: usize,
    pub dirty: usize,
    pub reserved: usize,
    pub out_of_order: usize,
}

impl StatusCounts {
    fn add(&mut self, status: RoomStatus) {
        let slot = match status {
            RoomStatus::Available => &mut self.available,
            RoomStatus::Occupied => &mut self.occupied,
            RoomStatus::Dirty => &mut self.dirty,
            RoomStatus::Reserved => &mut self.reserved,
            RoomStatus::OutOfOrder => &mut self.out_of_order,
        };
        *slot += 1;
    }
}

/// `All` or a specific value, as offered by the board's dropdowns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoardSelector<T> {
    #[default]
    All,
    Only(T),
}

impl<T: FromStr> FromStr for BoardSelector<T> {
    type Err = T::Err;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "" | "All" => Ok(Self::All),
            other => other.parse().map(Self::Only),
        }
    }
}

impl<T: PartialEq> BoardSelector<T> {
    fn accepts(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }
}

/// Board filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardFilter {
    pub category: BoardSelector<RoomCategory>,
    pub status: BoardSelector<RoomStatus>,
}

/// One room on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTile {
    pub number: RoomNumber,
    pub category: RoomCategory,
    pub rate: Money,
    pub status: RoomStatus,
    pub reservation_id: Option<ReservationId>,
}

/// Status board for a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomBoard {
    pub date: NaiveDate,
    pub counts: StatusCounts,
    pub tiles: Vec<RoomTile>,
}

impl RoomBoard {
    /// Derive the board. Counts cover every room; tiles honour `filter`.
    #[must_use]
    pub fn build(
        rooms: &[Room],
        reservations: &[Reservation],
        date: NaiveDate,
        filter: BoardFilter,
    ) -> Self {
        let mut counts = StatusCounts::default();
        let mut tiles = Vec::new();
        for room in rooms {
            let status = effective_status(room, reservations, date);
            counts.add(status);
            if filter.category.accepts(&room.category) && filter.status.accepts(&status) {
                tiles.push(RoomTile {
                    number: room.number.clone(),
                    category: room.category,
                    rate: room.rate,
                    status,
                    reservation_id: active_reservation(room, reservations, date)
                        .map(|stay| stay.id),
                });
            }
        }
        Self {
            date,
            counts,
            tiles,
        }
    }
}

#[cfg(test)]
#[path = "room_board_tests.rs"]
mod tests;
