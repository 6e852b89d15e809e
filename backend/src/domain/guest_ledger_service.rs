//! Guest ledger service: registration, ID verification, settlements and
//! bulk import.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    ChangeNotifier, GuestLedger, GuestRepository, Settlement, TransactionRepository,
    map_repository_error,
};
use crate::domain::{
    Capability, ChangeEvent, ChangeKind, ChangeTable, Error, Guest, GuestDraft, GuestFilter,
    GuestId, ImportLine, ImportSummary, MASTER_ROOM_LABEL, NewTransaction, TransactionId,
    TransactionType, User, ensure_positive, parse_import,
};

/// Domain service implementing [`GuestLedger`].
#[derive(Clone)]
pub struct GuestLedgerService<G, T> {
    guests: Arc<G>,
    transactions: Arc<T>,
    notifier: Arc<dyn ChangeNotifier>,
    clock: Arc<dyn Clock>,
}

impl<G, T> GuestLedgerService<G, T> {
    /// Create the service.
    pub fn new(
        guests: Arc<G>,
        transactions: Arc<T>,
        notifier: Arc<dyn ChangeNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            guests,
            transactions,
            notifier,
            clock,
        }
    }
}

impl<G, T> GuestLedgerService<G, T>
where
    G: GuestRepository,
    T: TransactionRepository,
{
    async fn require_guest(&self, id: &GuestId) -> Result<Guest, Error> {
        self.guests
            .find(id)
            .await
            .map_err(|err| map_repository_error("guest", err))?
            .ok_or_else(|| Error::not_found(format!("guest {id} not found")))
    }

    async fn insert(&self, guest: &Guest) -> Result<(), Error> {
        self.guests
            .insert(guest)
            .await
            .map_err(|err| map_repository_error("guest", err))?;
        self.publish(ChangeKind::Insert, guest);
        Ok(())
    }

    async fn save(&self, guest: &Guest) -> Result<(), Error> {
        self.guests
            .update(guest)
            .await
            .map_err(|err| map_repository_error("guest", err))?;
        self.publish(ChangeKind::Update, guest);
        Ok(())
    }

    fn publish(&self, kind: ChangeKind, guest: &Guest) {
        self.notifier.publish(ChangeEvent::upserted(
            ChangeTable::Guests,
            kind,
            guest.id,
            guest,
            self.clock.utc(),
        ));
    }
}

#[async_trait]
impl<G, T> GuestLedger for GuestLedgerService<G, T>
where
    G: GuestRepository,
    T: TransactionRepository,
{
    async fn list_guests(&self, filter: GuestFilter) -> Result<Vec<Guest>, Error> {
        let guests = self
            .guests
            .list()
            .await
            .map_err(|err| map_repository_error("guest", err))?;
        Ok(guests.into_iter().filter(|g| filter.accepts(g)).collect())
    }

    async fn get_guest(&self, id: &GuestId) -> Result<Guest, Error> {
        self.require_guest(id).await
    }

    async fn create_guest(&self, actor: &User, draft: GuestDraft) -> Result<Guest, Error> {
        actor.role.require(Capability::ManageFrontDesk)?;
        let guest = Guest::from_draft(GuestId::random(), draft)?;
        self.insert(&guest).await?;
        info!(guest_id = %guest.id, "guest registered");
        Ok(guest)
    }

    async fn update_guest(
        &self,
        actor: &User,
        id: &GuestId,
        draft: GuestDraft,
    ) -> Result<Guest, Error> {
        actor.role.require(Capability::ManageFrontDesk)?;
        let mut guest = self.require_guest(id).await?;
        guest.apply_draft(draft)?;
        self.save(&guest).await?;
        Ok(guest)
    }

    async fn attach_id_image(&self, actor: &User, id: &GuestId, url: &str) -> Result<Guest, Error> {
        actor.role.require(Capability::ManageFrontDesk)?;
        let mut guest = self.require_guest(id).await?;
        guest.attach_id_image(url)?;
        self.save(&guest).await?;
        info!(guest_id = %guest.id, "guest identity verified");
        Ok(guest)
    }

    async fn delete_guest(&self, actor: &User, id: &GuestId) -> Result<(), Error> {
        actor.role.require(Capability::DeleteRecords)?;
        let deleted = self
            .guests
            .delete(id)
            .await
            .map_err(|err| map_repository_error("guest", err))?;
        if !deleted {
            return Err(Error::not_found(format!("guest {id} not found")));
        }
        self.notifier.publish(ChangeEvent::deleted(
            ChangeTable::Guests,
            id,
            self.clock.utc(),
        ));
        info!(guest_id = %id, "guest deleted");
        Ok(())
    }

    async fn settle(
        &self,
        actor: &User,
        id: &GuestId,
        settlement: Settlement,
    ) -> Result<Guest, Error> {
        actor.role.require(Capability::ManageFrontDesk)?;
        ensure_positive("amount", settlement.amount)?;
        let mut guest = self.require_guest(id).await?;
        if settlement.amount > guest.outstanding_balance && !settlement.allow_overpayment {
            return Err(Error::conflict(format!(
                "settlement of {} exceeds outstanding balance of {}",
                settlement.amount, guest.outstanding_balance
            ))
            .with_details(serde_json::json!({
                "field": "amount",
                "code": "exceeds_balance",
            })));
        }

        let now = self.clock.utc();
        let transaction = NewTransaction {
            room_label: MASTER_ROOM_LABEL.to_owned(),
            guest_name: guest.name.clone(),
            kind: TransactionType::RoomPayment,
            amount: settlement.amount,
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

        guest.outstanding_balance = (guest.outstanding_balance - settlement.amount).floor_zero();
        self.save(&guest).await?;
        info!(
            guest_id = %guest.id,
            amount = %settlement.amount,
            remaining = %guest.outstanding_balance,
            "guest balance settled"
        );
        Ok(guest)
    }

    async fn import_guests(&self, actor: &User, text: &str) -> Result<ImportSummary, Error> {
        actor.role.require(Capability::ManageFrontDesk)?;
        let existing = self
            .guests
            .list()
            .await
            .map_err(|err| map_repository_error("guest", err))?;
        let mut known: HashSet<String> = existing.into_iter().map(|g| g.id_number).collect();
        let mut summary = ImportSummary::default();

        for line in parse_import(text) {
            let ImportLine::Row(draft) = line else {
                summary.skipped += 1;
                continue;
            };
            if !known.insert(draft.id_number.trim().to_owned()) {
                summary.skipped += 1;
                continue;
            }
            match Guest::from_draft(GuestId::random(), draft) {
                Ok(guest) => {
                    self.insert(&guest).await?;
                    summary.imported += 1;
                }
                Err(_) => summary.skipped += 1,
            }
        }

        info!(
            imported = summary.imported,
            skipped = summary.skipped,
            "guest import finished"
        );
        Ok(summary)
    }

    async fn export_guests(&self) -> Result<Vec<Guest>, Error> {
        self.guests
            .list()
            .await
            .map_err(|err| map_repository_error("guest", err))
    }
}

#[cfg(test)]
#[path = "guest_ledger_service_tests.rs"]
mod tests;
