//! Stay workflow service: booking, check-in, payments, check-out and
//! cancellation.
//!
//! Every transition keeps the physical room status in step with the stay:
//! booking marks rooms `RESERVED` or `OCCUPIED`, check-out leaves them
//! `DIRTY` and cancellation frees them.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    ChangeNotifier, CheckOutOutcome, CheckOutRequest, GuestRepository, ReservationRepository,
    RoomRepository, StayListing, StayPayment, StayWorkflow, TransactionRepository,
    map_repository_error,
};
use crate::domain::service_support::{GuestDirectory, primary_guest};
use crate::domain::{
    Capability, ChangeEvent, ChangeKind, ChangeTable, Error, Guest, GuestId, Invoice, Money,
    NewTransaction, Reservation, ReservationDraft, ReservationFilter, ReservationId,
    ReservationStatus, Room, RoomNumber, RoomStatus, StayType, TransactionId, TransactionType,
    User, WALK_IN_GUEST, ensure_positive, price_stay,
};

/// Domain service implementing [`StayWorkflow`].
#[derive(Clone)]
pub struct StayService<R, G, S, T> {
    rooms: Arc<R>,
    guests: Arc<G>,
    reservations: Arc<S>,
    transactions: Arc<T>,
    notifier: Arc<dyn ChangeNotifier>,
    clock: Arc<dyn Clock>,
}

impl<R, G, S, T> StayService<R, G, S, T> {
    /// Create the service.
    pub fn new(
        rooms: Arc<R>,
        guests: Arc<G>,
        reservations: Arc<S>,
        transactions: Arc<T>,
        notifier: Arc<dyn ChangeNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            rooms,
            guests,
            reservations,
            transactions,
            notifier,
            clock,
        }
    }
}

fn unverified_guests_error(names: Vec<String>) -> Error {
    Error::invalid_request("every guest needs a verified ID before check-in").with_details(json!({
        "field": "guestIds",
        "code": "unverified_guest",
        "guests": names,
    }))
}

fn require_verified_ids(guests: &[Guest]) -> Result<(), Error> {
    let unverified: Vec<String> = guests
        .iter()
        .filter(|guest| !guest.is_verified())
        .map(|guest| guest.name.clone())
        .collect();
    if unverified.is_empty() {
        Ok(())
    } else {
        Err(unverified_guests_error(unverified))
    }
}

fn require_open(stay: &Reservation) -> Result<(), Error> {
    if stay.status.is_final() {
        return Err(Error::conflict(format!(
            "reservation {} is already {}",
            stay.id, stay.status
        )));
    }
    Ok(())
}

impl<R, G, S, T> StayService<R, G, S, T>
where
    R: RoomRepository,
    G: GuestRepository,
    S: ReservationRepository,
    T: TransactionRepository,
{
    async fn require_stay(&self, id: &ReservationId) -> Result<Reservation, Error> {
        self.reservations
            .find(id)
            .await
            .map_err(|err| map_repository_error("reservation", err))?
            .ok_or_else(|| Error::not_found(format!("reservation {id} not found")))
    }

    async fn catalogue(&self) -> Result<Vec<Room>, Error> {
        self.rooms
            .list()
            .await
            .map_err(|err| map_repository_error("room", err))
    }

    async fn resolve_guests(&self, ids: &[GuestId]) -> Result<Vec<Guest>, Error> {
        let mut resolved = Vec::with_capacity(ids.len());
        for id in ids {
            let guest = self
                .guests
                .find(id)
                .await
                .map_err(|err| map_repository_error("guest", err))?
                .ok_or_else(|| Error::not_found(format!("guest {id} not found")))?;
            resolved.push(guest);
        }
        Ok(resolved)
    }

    /// Guests that still exist; used where removed guests must not block.
    async fn existing_guests(&self, ids: &[GuestId]) -> Result<Vec<Guest>, Error> {
        let mut resolved = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(guest) = self
                .guests
                .find(id)
                .await
                .map_err(|err| map_repository_error("guest", err))?
            {
                resolved.push(guest);
            }
        }
        Ok(resolved)
    }

    /// Validate a draft against the catalogue, guests and other stays, and
    /// return the computed total.
    async fn vet_draft(
        &self,
        draft: &ReservationDraft,
        status: ReservationStatus,
        exclude: Option<ReservationId>,
    ) -> Result<Money, Error> {
        draft.validate()?;
        let catalogue = self.catalogue().await?;
        if let Some(missing) = draft
            .room_numbers
            .iter()
            .find(|number| !catalogue.iter().any(|room| &room.number == *number))
        {
            return Err(Error::not_found(format!("room {missing} not found")));
        }
        let guests = self.resolve_guests(&draft.guest_ids).await?;
        if status == ReservationStatus::CheckedIn {
            require_verified_ids(&guests)?;
        }

        let stays = self
            .reservations
            .list()
            .await
            .map_err(|err| map_repository_error("reservation", err))?;
        let clash = stays
            .iter()
            .filter(|stay| Some(stay.id) != exclude)
            .find_map(|stay| {
                stay.clashes_with(&draft.room_numbers, draft.check_in, draft.check_out)
                    .map(|room| (room, stay.id))
            });
        if let Some((room, holder)) = clash {
            return Err(Error::conflict(format!(
                "room {room} is already booked for these dates"
            ))
            .with_details(json!({
                "field": "roomNumbers",
                "code": "double_booked",
                "room": room,
                "reservationId": holder,
            })));
        }

        Ok(price_stay(
            &draft.room_numbers,
            draft.check_in,
            draft.check_out,
            &draft.charges,
            &catalogue,
        )
        .grand_total)
    }

    async fn persist(&self, stay: &Reservation, kind: ChangeKind) -> Result<(), Error> {
        let result = match kind {
            ChangeKind::Insert => self.reservations.insert(stay).await,
            _ => self.reservations.update(stay).await,
        };
        result.map_err(|err| map_repository_error("reservation", err))?;
        self.notifier.publish(ChangeEvent::upserted(
            ChangeTable::Reservations,
            kind,
            stay.id,
            stay,
            self.clock.utc(),
        ));
        Ok(())
    }

    async fn save_room(&self, room: &Room) -> Result<(), Error> {
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

    /// Set the physical status of every listed room that still exists.
    async fn mark_rooms(&self, numbers: &[RoomNumber], status: RoomStatus) -> Result<(), Error> {
        for number in numbers {
            let found = self
                .rooms
                .find_by_number(number)
                .await
                .map_err(|err| map_repository_error("room", err))?;
            match found {
                Some(mut room) if room.status != status => {
                    room.status = status;
                    self.save_room(&room).await?;
                }
                Some(_) => {}
                None => warn!(room = %number, "stay references a removed room"),
            }
        }
        Ok(())
    }

    /// Free rooms still held for `stay` unless another stay holds them today.
    async fn release_rooms(&self, stay: &Reservation, numbers: &[RoomNumber]) -> Result<(), Error> {
        let today = self.clock.utc().date_naive();
        let others = self
            .reservations
            .list()
            .await
            .map_err(|err| map_repository_error("reservation", err))?;
        for number in numbers {
            let held_elsewhere = others
                .iter()
                .any(|other| other.id != stay.id && other.holds_room_on(number, today));
            if held_elsewhere {
                continue;
            }
            let found = self
                .rooms
                .find_by_number(number)
                .await
                .map_err(|err| map_repository_error("room", err))?;
            if let Some(mut room) = found {
                if matches!(room.status, RoomStatus::Reserved | RoomStatus::Occupied) {
                    room.status = RoomStatus::Available;
                    self.save_room(&room).await?;
                }
            }
        }
        Ok(())
    }

    async fn record_payment(
        &self,
        stay: &Reservation,
        guest_name: &str,
        amount: Money,
    ) -> Result<(), Error> {
        let now = self.clock.utc();
        let transaction = NewTransaction {
            room_label: stay.room_label(),
            guest_name: guest_name.to_owned(),
            kind: TransactionType::RoomPayment,
            amount,
        }
        .record(TransactionId::random(), now)?;
        self.transactions
            .insert(&transaction)
            .await
            .map_err(|err| map_repository_error("transaction", err))?;
        self.notifier.publish(ChangeEvent::upserted(
            ChangeTable::Transactions,
            ChangeKind::Insert,
            transaction.id,
            &transaction,
            now,
        ));
        Ok(())
    }

    async fn primary(&self, stay: &Reservation) -> Result<Option<Guest>, Error> {
        primary_guest(self.guests.as_ref(), &stay.guest_ids).await
    }
}

fn room_status_for(status: ReservationStatus) -> RoomStatus {
    match status {
        ReservationStatus::CheckedIn => RoomStatus::Occupied,
        _ => RoomStatus::Reserved,
    }
}

#[async_trait]
impl<R, G, S, T> StayWorkflow for StayService<R, G, S, T>
where
    R: RoomRepository,
    G: GuestRepository,
    S: ReservationRepository,
    T: TransactionRepository,
{
    async fn create_stay(&self, actor: &User, draft: ReservationDraft) -> Result<Reservation, Error> {
        actor.role.require(Capability::ManageFrontDesk)?;
        let status = draft.stay_type.initial_status();
        let total_amount = self.vet_draft(&draft, status, None).await?;
        let stay = Reservation {
            id: ReservationId::random(),
            room_numbers: draft.room_numbers,
            guest_ids: draft.guest_ids,
            check_in: draft.check_in,
            check_out: draft.check_out,
            status,
            stay_type: draft.stay_type,
            charges: draft.charges,
            paid_amount: draft.paid_amount.unwrap_or(Money::ZERO),
            payment_method: draft.payment_method,
            on_duty_officer: draft.on_duty_officer,
            special_requests: draft.special_requests,
            notes: draft.notes,
            total_amount,
            created_at: self.clock.utc(),
        };
        self.persist(&stay, ChangeKind::Insert).await?;
        self.mark_rooms(&stay.room_numbers, room_status_for(status))
            .await?;
        info!(
            reservation_id = %stay.id,
            status = %stay.status,
            total = %stay.total_amount,
            "stay created"
        );
        Ok(stay)
    }

    async fn update_stay(
        &self,
        actor: &User,
        id: &ReservationId,
        draft: ReservationDraft,
    ) -> Result<Reservation, Error> {
        actor.role.require(Capability::ManageFrontDesk)?;
        let mut stay = self.require_stay(id).await?;
        require_open(&stay)?;
        let status = draft.stay_type.initial_status();
        let total_amount = self.vet_draft(&draft, status, Some(stay.id)).await?;

        let dropped: Vec<RoomNumber> = stay
            .room_numbers
            .iter()
            .filter(|number| !draft.room_numbers.contains(number))
            .cloned()
            .collect();

        stay.room_numbers = draft.room_numbers;
        stay.guest_ids = draft.guest_ids;
        stay.check_in = draft.check_in;
        stay.check_out = draft.check_out;
        stay.status = status;
        stay.stay_type = draft.stay_type;
        stay.charges = draft.charges;
        if let Some(paid_amount) = draft.paid_amount {
            stay.paid_amount = paid_amount;
        }
        stay.payment_method = draft.payment_method;
        stay.on_duty_officer = draft.on_duty_officer;
        stay.special_requests = draft.special_requests;
        stay.notes = draft.notes;
        stay.total_amount = total_amount;

        self.persist(&stay, ChangeKind::Update).await?;
        self.release_rooms(&stay, &dropped).await?;
        self.mark_rooms(&stay.room_numbers, room_status_for(status))
            .await?;
        info!(reservation_id = %stay.id, status = %stay.status, "stay updated");
        Ok(stay)
    }

    async fn check_in(&self, actor: &User, id: &ReservationId) -> Result<Reservation, Error> {
        actor.role.require(Capability::ManageFrontDesk)?;
        let mut stay = self.require_stay(id).await?;
        if stay.status != ReservationStatus::Pending {
            return Err(Error::conflict(format!(
                "only pending reservations can be checked in; {} is {}",
                stay.id, stay.status
            )));
        }
        let guests = self.existing_guests(&stay.guest_ids).await?;
        require_verified_ids(&guests)?;

        stay.status = ReservationStatus::CheckedIn;
        stay.stay_type = StayType::CheckIn;
        self.persist(&stay, ChangeKind::Update).await?;
        self.mark_rooms(&stay.room_numbers, RoomStatus::Occupied)
            .await?;
        info!(reservation_id = %stay.id, "guest checked in");
        Ok(stay)
    }

    async fn collect_payment(
        &self,
        actor: &User,
        id: &ReservationId,
        payment: StayPayment,
    ) -> Result<Reservation, Error> {
        actor.role.require(Capability::ManageFrontDesk)?;
        ensure_positive("amount", payment.amount)?;
        let mut stay = self.require_stay(id).await?;
        require_open(&stay)?;
        let guest_name = self
            .primary(&stay)
            .await?
            .map_or_else(|| WALK_IN_GUEST.to_owned(), |guest| guest.name);

        self.record_payment(&stay, &guest_name, payment.amount)
            .await?;
        stay.paid_amount = stay.paid_amount + payment.amount;
        stay.payment_method = Some(payment.method);
        self.persist(&stay, ChangeKind::Update).await?;
        info!(
            reservation_id = %stay.id,
            amount = %payment.amount,
            method = %payment.method,
            "stay payment collected"
        );
        Ok(stay)
    }

    async fn check_out(
        &self,
        actor: &User,
        id: &ReservationId,
        request: CheckOutRequest,
    ) -> Result<CheckOutOutcome, Error> {
        actor.role.require(Capability::ManageFrontDesk)?;
        if request.final_payment.is_negative() {
            return Err(Error::invalid_field(
                "finalPayment",
                "negative",
                "final payment cannot be negative",
            ));
        }
        let mut stay = self.require_stay(id).await?;
        require_open(&stay)?;
        let primary = self.primary(&stay).await?;
        let guest_name = primary
            .as_ref()
            .map_or(WALK_IN_GUEST, |guest| guest.name.as_str())
            .to_owned();

        if request.final_payment.is_positive() {
            self.record_payment(&stay, &guest_name, request.final_payment)
                .await?;
        }
        stay.paid_amount = stay.paid_amount + request.final_payment;
        if let Some(method) = request.method {
            stay.payment_method = Some(method);
        }
        let due = (stay.total_amount - stay.paid_amount).floor_zero();

        let mut carried_to_ledger = Money::ZERO;
        if due.is_positive() {
            match primary {
                Some(mut guest) => {
                    guest.outstanding_balance = guest.outstanding_balance + due;
                    self.guests
                        .update(&guest)
                        .await
                        .map_err(|err| map_repository_error("guest", err))?;
                    self.notifier.publish(ChangeEvent::upserted(
                        ChangeTable::Guests,
                        ChangeKind::Update,
                        guest.id,
                        &guest,
                        self.clock.utc(),
                    ));
                    carried_to_ledger = due;
                }
                None => warn!(
                    reservation_id = %stay.id,
                    due = %due,
                    "no guest on file to carry the unpaid balance"
                ),
            }
        }

        stay.status = ReservationStatus::CheckedOut;
        self.persist(&stay, ChangeKind::Update).await?;
        self.mark_rooms(&stay.room_numbers, RoomStatus::Dirty)
            .await?;

        let catalogue = self.catalogue().await?;
        let invoice = Invoice::for_stay(&stay, Some(guest_name.as_str()), &catalogue);
        info!(
            reservation_id = %stay.id,
            carried = %carried_to_ledger,
            "guest checked out"
        );
        Ok(CheckOutOutcome {
            reservation: stay,
            invoice,
            carried_to_ledger,
        })
    }

    async fn cancel_stay(&self, actor: &User, id: &ReservationId) -> Result<Reservation, Error> {
        actor.role.require(Capability::ManageFrontDesk)?;
        let mut stay = self.require_stay(id).await?;
        require_open(&stay)?;
        stay.status = ReservationStatus::Cancelled;
        self.persist(&stay, ChangeKind::Update).await?;
        let rooms = stay.room_numbers.clone();
        self.release_rooms(&stay, &rooms).await?;
        info!(reservation_id = %stay.id, "stay cancelled");
        Ok(stay)
    }

    async fn delete_stay(&self, actor: &User, id: &ReservationId) -> Result<(), Error> {
        actor.role.require(Capability::DeleteRecords)?;
        let stay = self.require_stay(id).await?;
        self.mark_rooms(&stay.room_numbers, RoomStatus::Available)
            .await?;
        let deleted = self
            .reservations
            .delete(id)
            .await
            .map_err(|err| map_repository_error("reservation", err))?;
        if !deleted {
            return Err(Error::not_found(format!("reservation {id} not found")));
        }
        self.notifier.publish(ChangeEvent::deleted(
            ChangeTable::Reservations,
            id,
            self.clock.utc(),
        ));
        info!(reservation_id = %id, "stay deleted");
        Ok(())
    }

    async fn list_stays(&self, filter: ReservationFilter) -> Result<Vec<StayListing>, Error> {
        let stays = self
            .reservations
            .list()
            .await
            .map_err(|err| map_repository_error("reservation", err))?;
        let guests = self
            .guests
            .list()
            .await
            .map_err(|err| map_repository_error("guest", err))?;
        let directory = GuestDirectory::new(guests);
        Ok(stays
            .into_iter()
            .filter_map(|reservation| {
                let primary_guest_name = directory.primary_name(&reservation);
                if !filter.accepts(&reservation, primary_guest_name.as_deref()) {
                    return None;
                }
                Some(StayListing {
                    reservation,
                    primary_guest_name,
                })
            })
            .collect())
    }

    async fn get_stay(&self, id: &ReservationId) -> Result<Reservation, Error> {
        self.require_stay(id).await
    }
}

#[cfg(test)]
#[path = "stay_service_tests.rs"]
mod tests;
