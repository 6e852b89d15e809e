//! Authentication and account administration.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    ChangeNotifier, LoginService, NewUser, PasswordHashError, PasswordHasher, UserAdmin,
    UserChanges, UserRepository, map_repository_error,
};
use crate::domain::user::{validate_name, validate_password};
use crate::domain::{
    Capability, ChangeEvent, ChangeKind, ChangeTable, EmailAddress, Error, LoginCredentials,
    Role, User, UserId,
};

/// Login email of the account created when no users exist.
pub const BOOTSTRAP_ADMIN_EMAIL: &str = "admin@hotelfountain.com";
/// Display name of the bootstrap account.
pub const BOOTSTRAP_ADMIN_NAME: &str = "System Administrator";

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

/// Domain service implementing [`LoginService`] and [`UserAdmin`].
#[derive(Clone)]
pub struct UserAdminService<U> {
    users: Arc<U>,
    hasher: Arc<dyn PasswordHasher>,
    notifier: Arc<dyn ChangeNotifier>,
    clock: Arc<dyn Clock>,
}

impl<U> UserAdminService<U> {
    /// Create the service.
    pub fn new(
        users: Arc<U>,
        hasher: Arc<dyn PasswordHasher>,
        notifier: Arc<dyn ChangeNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            notifier,
            clock,
        }
    }
}

impl<U> UserAdminService<U>
where
    U: UserRepository,
{
    /// Create the fallback administrator when the account table is empty.
    ///
    /// Returns the created account, or `None` when accounts already exist.
    pub async fn bootstrap_admin(&self, password: &str) -> Result<Option<User>, Error> {
        let count = self
            .users
            .count()
            .await
            .map_err(|err| map_repository_error("user", err))?;
        if count > 0 {
            return Ok(None);
        }
        let email = EmailAddress::new(BOOTSTRAP_ADMIN_EMAIL)?;
        let admin = User::new(UserId::random(), email, BOOTSTRAP_ADMIN_NAME, Role::Admin)?;
        let hash = self.hasher.hash(password).map_err(map_hash_error)?;
        self.users
            .insert(&admin, &hash)
            .await
            .map_err(|err| map_repository_error("user", err))?;
        warn!(email = %admin.email, "no accounts found; created bootstrap administrator");
        Ok(Some(admin))
    }

    async fn require_user(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find(id)
            .await
            .map_err(|err| map_repository_error("user", err))?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }

    fn hash_new_password(&self, password: &str) -> Result<String, Error> {
        validate_password(password)?;
        self.hasher.hash(password).map_err(map_hash_error)
    }

    fn publish(&self, kind: ChangeKind, user: &User) {
        self.notifier.publish(ChangeEvent::upserted(
            ChangeTable::Users,
            kind,
            user.id,
            user,
            self.clock.utc(),
        ));
    }
}

#[async_trait]
impl<U> LoginService for UserAdminService<U>
where
    U: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let stored = self
            .users
            .find_credentials(credentials.email())
            .await
            .map_err(|err| map_repository_error("user", err))?;
        match stored {
            Some(found) if self.hasher.verify(credentials.password(), &found.password_hash) => {
                info!(user_id = %found.user.id, "login succeeded");
                Ok(found.user)
            }
            _ => {
                warn!(email = %credentials.email(), "login rejected");
                Err(Error::unauthorized("invalid email or password"))
            }
        }
    }

    async fn current_user(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find(id)
            .await
            .map_err(|err| map_repository_error("user", err))?
            .ok_or_else(|| Error::unauthorized("session account no longer exists"))
    }
}

#[async_trait]
impl<U> UserAdmin for UserAdminService<U>
where
    U: UserRepository,
{
    async fn list_users(&self, actor: &User) -> Result<Vec<User>, Error> {
        actor.role.require(Capability::ManageUsers)?;
        self.users
            .list()
            .await
            .map_err(|err| map_repository_error("user", err))
    }

    async fn create_user(&self, actor: &User, request: NewUser) -> Result<User, Error> {
        actor.role.require(Capability::ManageUsers)?;
        let user = User::new(UserId::random(), request.email, request.name, request.role)?;
        let hash = self.hash_new_password(&request.password)?;
        let taken = self
            .users
            .find_credentials(&user.email)
            .await
            .map_err(|err| map_repository_error("user", err))?
            .is_some();
        if taken {
            return Err(Error::conflict(format!("email {} is already registered", user.email))
                .with_details(serde_json::json!({ "field": "email", "code": "taken" })));
        }
        self.users
            .insert(&user, &hash)
            .await
            .map_err(|err| map_repository_error("user", err))?;
        self.publish(ChangeKind::Insert, &user);
        info!(user_id = %user.id, role = %user.role, "account created");
        Ok(user)
    }

    async fn update_user(
        &self,
        actor: &User,
        id: &UserId,
        changes: UserChanges,
    ) -> Result<User, Error> {
        actor.role.require(Capability::ManageUsers)?;
        let mut user = self.require_user(id).await?;
        if let Some(name) = changes.name {
            user.name = validate_name(name)?;
        }
        if let Some(role) = changes.role {
            user.role = role;
        }
        let hash = changes
            .password
            .as_deref()
            .map(|password| self.hash_new_password(password))
            .transpose()?;
        let password_changed = hash.is_some();
        self.users
            .update(&user, hash)
            .await
            .map_err(|err| map_repository_error("user", err))?;
        self.publish(ChangeKind::Update, &user);
        info!(user_id = %user.id, password_changed, "account updated");
        Ok(user)
    }

    async fn delete_user(&self, actor: &User, id: &UserId) -> Result<(), Error> {
        actor.role.require(Capability::ManageUsers)?;
        if actor.id == *id {
            return Err(Error::forbidden("you cannot delete your own account"));
        }
        let deleted = self
            .users
            .delete(id)
            .await
            .map_err(|err| map_repository_error("user", err))?;
        if !deleted {
            return Err(Error::not_found(format!("user {id} not found")));
        }
        self.notifier
            .publish(ChangeEvent::deleted(ChangeTable::Users, id, self.clock.utc()));
        info!(user_id = %id, "account deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_admin_service_tests.rs"]
mod tests;
