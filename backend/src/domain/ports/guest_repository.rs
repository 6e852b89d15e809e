//! Port abstraction for guest ledger persistence.
use async_trait::async_trait;

use crate::domain::{Guest, GuestId};

use super::RepositoryError;

/// Guest ledger storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GuestRepository: Send + Sync {
    /// Every guest ordered by name.
    async fn list(&self) -> Result<Vec<Guest>, RepositoryError>;

    /// Fetch a guest by id.
    async fn find(&self, id: &GuestId) -> Result<Option<Guest>, RepositoryError>;

    /// Insert a new guest.
    async fn insert(&self, guest: &Guest) -> Result<(), RepositoryError>;

    /// Replace a stored guest.
    async fn update(&self, guest: &Guest) -> Result<(), RepositoryError>;

    /// Remove a guest, returning whether a row was deleted.
    async fn delete(&self, id: &GuestId) -> Result<bool, RepositoryError>;
}
