//! Port abstraction for staff account persistence.
use async_trait::async_trait;

use crate::domain::{EmailAddress, User, UserId};

use super::RepositoryError;

/// Account plus its stored password hash, returned only for login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Account storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every account ordered by name.
    async fn list(&self) -> Result<Vec<User>, RepositoryError>;

    /// Fetch an account by id.
    async fn find(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;

    /// Fetch an account and its hash by login email.
    async fn find_credentials(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserCredentials>, RepositoryError>;

    /// Insert an account; a taken email surfaces as [`RepositoryError::Duplicate`].
    async fn insert(&self, user: &User, password_hash: &str) -> Result<(), RepositoryError>;

    /// Replace profile fields, and the hash when `password_hash` is set.
    async fn update(
        &self,
        user: &User,
        password_hash: Option<String>,
    ) -> Result<(), RepositoryError>;

    /// Remove an account, returning whether a row was deleted.
    async fn delete(&self, id: &UserId) -> Result<bool, RepositoryError>;

    /// Number of stored accounts.
    async fn count(&self) -> Result<u64, RepositoryError>;
}
