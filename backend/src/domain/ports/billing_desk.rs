//! Driving port for invoices and the transaction ledger.

use async_trait::async_trait;

use crate::domain::{Error, Invoice, NewTransaction, ReservationId, Transaction, User};

/// Invoice and ledger use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BillingDesk: Send + Sync {
    /// Invoice for one stay.
    async fn invoice(&self, id: &ReservationId) -> Result<Invoice, Error>;

    /// Invoices for every non-cancelled stay, filtered by `search`.
    async fn list_invoices(&self, search: Option<String>) -> Result<Vec<Invoice>, Error>;

    /// Record a manual charge or payment.
    async fn record_transaction(
        &self,
        actor: &User,
        entry: NewTransaction,
    ) -> Result<Transaction, Error>;

    /// Ledger entries newest first.
    async fn list_transactions(&self, limit: Option<usize>) -> Result<Vec<Transaction>, Error>;
}
