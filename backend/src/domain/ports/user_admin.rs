//! Driving ports for authentication and account administration.
//!
//! Inbound adapters authenticate through [`LoginService`] and manage
//! accounts through [`UserAdmin`] without importing persistence or hashing
//! concerns.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::{EmailAddress, Error, LoginCredentials, Role, User, UserId};

/// New account request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: EmailAddress,
    pub name: String,
    pub role: Role,
    pub password: Zeroizing<String>,
}

/// Account changes. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub role: Option<Role>,
    pub password: Option<Zeroizing<String>>,
}

/// Authentication use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the account.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    /// Resolve the account behind a session, `unauthorized` when it is gone.
    async fn current_user(&self, id: &UserId) -> Result<User, Error>;
}

/// Account administration use cases. Admin only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAdmin: Send + Sync {
    /// Every account.
    async fn list_users(&self, actor: &User) -> Result<Vec<User>, Error>;

    /// Create an account.
    async fn create_user(&self, actor: &User, request: NewUser) -> Result<User, Error>;

    /// Change an account's name, role or password.
    async fn update_user(&self, actor: &User, id: &UserId, changes: UserChanges)
    -> Result<User, Error>;

    /// Remove an account other than the caller's own.
    async fn delete_user(&self, actor: &User, id: &UserId) -> Result<(), Error>;
}
