//! Port abstraction for the charge/payment ledger.
use async_trait::async_trait;

use crate::domain::Transaction;

use super::RepositoryError;

/// Append-only transaction storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Append an entry.
    async fn insert(&self, transaction: &Transaction) -> Result<(), RepositoryError>;

    /// Entries newest first, capped at `limit` when given.
    async fn list(&self, limit: Option<usize>) -> Result<Vec<Transaction>, RepositoryError>;
}
