//! Invoices and the manual transaction ledger.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    BillingDesk, ChangeNotifier, GuestRepository, ReservationRepository, RoomRepository,
    TransactionRepository, map_repository_error,
};
use crate::domain::service_support::{GuestDirectory, primary_guest};
use crate::domain::{
    Capability, ChangeEvent, ChangeKind, ChangeTable, Error, Invoice, NewTransaction,
    ReservationId, ReservationStatus, Transaction, TransactionId, User,
};

/// Domain service implementing [`BillingDesk`].
#[derive(Clone)]
pub struct BillingService<R, G, S, T> {
    rooms: Arc<R>,
    guests: Arc<G>,
    reservations: Arc<S>,
    transactions: Arc<T>,
    notifier: Arc<dyn ChangeNotifier>,
    clock: Arc<dyn Clock>,
}

impl<R, G, S, T> BillingService<R, G, S, T> {
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

#[async_trait]
impl<R, G, S, T> BillingDesk for BillingService<R, G, S, T>
where
    R: RoomRepository,
    G: GuestRepository,
    S: ReservationRepository,
    T: TransactionRepository,
{
    async fn invoice(&self, id: &ReservationId) -> Result<Invoice, Error> {
        let stay = self
            .reservations
            .find(id)
            .await
            .map_err(|err| map_repository_error("reservation", err))?
            .ok_or_else(|| Error::not_found(format!("reservation {id} not found")))?;
        let guest = primary_guest(self.guests.as_ref(), &stay.guest_ids).await?;
        let catalogue = self
            .rooms
            .list()
            .await
            .map_err(|err| map_repository_error("room", err))?;
        Ok(Invoice::for_stay(
            &stay,
            guest.as_ref().map(|g| g.name.as_str()),
            &catalogue,
        ))
    }

    async fn list_invoices(&self, search: Option<String>) -> Result<Vec<Invoice>, Error> {
        let stays = self
            .reservations
            .list()
            .await
            .map_err(|err| map_repository_error("reservation", err))?;
        let directory = GuestDirectory::new(
            self.guests
                .list()
                .await
                .map_err(|err| map_repository_error("guest", err))?,
        );
        let catalogue = self
            .rooms
            .list()
            .await
            .map_err(|err| map_repository_error("room", err))?;
        let needle = search.unwrap_or_default();
        Ok(stays
            .iter()
            .filter(|stay| stay.status != ReservationStatus::Cancelled)
            .map(|stay| {
                let name = directory.primary_name(stay);
                Invoice::for_stay(stay, name.as_deref(), &catalogue)
            })
            .filter(|invoice| invoice.matches(&needle))
            .collect())
    }

    async fn record_transaction(
        &self,
        actor: &User,
        entry: NewTransaction,
    ) -> Result<Transaction, Error> {
        actor.role.require(Capability::ManageFrontDesk)?;
        let now = self.clock.utc();
        let transaction = entry.record(TransactionId::random(), now)?;
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
        info!(
            transaction_id = %transaction.id,
            kind = %transaction.kind,
            amount = %transaction.amount,
            "transaction recorded"
        );
        Ok(transaction)
    }

    async fn list_transactions(&self, limit: Option<usize>) -> Result<Vec<Transaction>, Error> {
        self.transactions
            .list(limit)
            .await
            .map_err(|err| map_repository_error("transaction", err))
    }
}
