//! Room catalogue and status board service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    ChangeNotifier, NewRoom, ReservationRepository, RoomCatalogue, RoomRepository,
    map_repository_error,
};
use crate::domain::{
    BoardFilter, Capability, ChangeEvent, ChangeKind, ChangeTable, Error, Room, RoomBoard,
    RoomChanges, RoomId, RoomNumber, RoomStatus, User,
};

/// Domain service implementing [`RoomCatalogue`].
#[derive(Clone)]
pub struct RoomCatalogueService<R, S> {
    rooms: Arc<R>,
    reservations: Arc<S>,
    notifier: Arc<dyn ChangeNotifier>,
    clock: Arc<dyn Clock>,
}

impl<R, S> RoomCatalogueService<R, S> {
    /// Create the service.
    pub fn new(
        rooms: Arc<R>,
        reservations: Arc<S>,
        notifier: Arc<dyn ChangeNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            rooms,
            reservations,
            notifier,
            clock,
        }
    }
}

impl<R, S> RoomCatalogueService<R, S>
where
    R: RoomRepository,
    S: ReservationRepository,
{
    async fn require_room(&self, number: &RoomNumber) -> Result<Room, Error> {
        self.rooms
            .find_by_number(number)
            .await
            .map_err(|err| map_repository_error("room", err))?
            .ok_or_else(|| Error::not_found(format!("room {number} not found")))
    }

    async fn store(&self, room: &Room) -> Result<(), Error> {
        self.rooms
            .update(room)
            .await
            .map_err(|err| map_repository_error("room", err))?;
        self.notifier.publish(ChangeEvent::upserted(
            ChangeTable::Rooms,
            ChangeKind::Update,
            room.id,
            room,
            self.clock.utc(),
        ));
        Ok(())
    }
}

#[async_trait]
impl<R, S> RoomCatalogue for RoomCatalogueService<R, S>
where
    R: RoomRepository,
    S: ReservationRepository,
{
    async fn list_rooms(&self) -> Result<Vec<Room>, Error> {
        self.rooms
            .list()
            .await
            .map_err(|err| map_repository_error("room", err))
    }

    async fn get_room(&self, number: &RoomNumber) -> Result<Room, Error> {
        self.require_room(number).await
    }

    async fn create_room(&self, actor: &User, request: NewRoom) -> Result<Room, Error> {
        actor.role.require(Capability::ManageRooms)?;
        let room = Room::new(
            RoomId::random(),
            request.number,
            request.category,
            request.rate,
            request.status,
        )?;
        if self
            .rooms
            .find_by_number(&room.number)
            .await
            .map_err(|err| map_repository_error("room", err))?
            .is_some()
        {
            return Err(Error::conflict(format!("room {} already exists", room.number)));
        }
        self.rooms
            .insert(&room)
            .await
            .map_err(|err| map_repository_error("room", err))?;
        info!(room = %room.number, "room created");
        self.notifier.publish(ChangeEvent::upserted(
            ChangeTable::Rooms,
            ChangeKind::Insert,
            room.id,
            &room,
            self.clock.utc(),
        ));
        Ok(room)
    }

    async fn update_room(
        &self,
        actor: &User,
        number: &RoomNumber,
        changes: RoomChanges,
    ) -> Result<Room, Error> {
        actor.role.require(Capability::ManageRooms)?;
        let mut room = self.require_room(number).await?;
        changes.apply(&mut room)?;
        self.store(&room).await?;
        Ok(room)
    }

    async fn set_room_status(
        &self,
        actor: &User,
        number: &RoomNumber,
        status: RoomStatus,
    ) -> Result<Room, Error> {
        actor.role.require(Capability::ManageFrontDesk)?;
        let mut room = self.require_room(number).await?;
        let previous = room.status;
        room.status = status;
        self.store(&room).await?;
        info!(room = %room.number, from = %previous, to = %status, "room status changed");
        Ok(room)
    }

    async fn board(&self, date: Option<NaiveDate>, filter: BoardFilter) -> Result<RoomBoard, Error> {
        let date = date.unwrap_or_else(|| self.clock.utc().date_naive());
        let rooms = self.list_rooms().await?;
        let reservations = self
            .reservations
            .list()
            .await
            .map_err(|err| map_repository_error("reservation", err))?;
        Ok(RoomBoard::build(&rooms, &reservations, date, filter))
    }
}

#[cfg(test)]
#[path = "room_catalogue_service_tests.rs"]
mod tests;
