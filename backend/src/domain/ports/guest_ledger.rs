//! Driving port for the guest ledger.

use async_trait::async_trait;

use crate::domain::{
    Error, Guest, GuestDraft, GuestFilter, GuestId, ImportSummary, Money, PaymentMethod, User,
};

/// Settlement against a guest's outstanding balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub amount: Money,
    pub method: Option<PaymentMethod>,
    /// Accept amounts above the balance; the balance still floors at zero.
    pub allow_overpayment: bool,
}

/// Guest ledger use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GuestLedger: Send + Sync {
    /// Guests matching `filter`, ordered by name.
    async fn list_guests(&self, filter: GuestFilter) -> Result<Vec<Guest>, Error>;

    /// Fetch one guest.
    async fn get_guest(&self, id: &GuestId) -> Result<Guest, Error>;

    /// Register a guest.
    async fn create_guest(&self, actor: &User, draft: GuestDraft) -> Result<Guest, Error>;

    /// Replace a guest's details.
    async fn update_guest(&self, actor: &User, id: &GuestId, draft: GuestDraft)
    -> Result<Guest, Error>;

    /// Store the scanned ID document, verifying the guest.
    async fn attach_id_image(&self, actor: &User, id: &GuestId, url: &str) -> Result<Guest, Error>;

    /// Remove a guest. Admin only.
    async fn delete_guest(&self, actor: &User, id: &GuestId) -> Result<(), Error>;

    /// Collect against the outstanding balance.
    async fn settle(&self, actor: &User, id: &GuestId, settlement: Settlement)
    -> Result<Guest, Error>;

    /// Import pasted rows, skipping known id numbers.
    async fn import_guests(&self, actor: &User, text: &str) -> Result<ImportSummary, Error>;

    /// Every guest, for download.
    async fn export_guests(&self) -> Result<Vec<Guest>, Error>;
}
