//! In-memory staff accounts and payroll.

use async_trait::async_trait;

use crate::domain::ports::{
    RepositoryError, SalaryPaymentRepository, StaffRepository, UserCredentials, UserRepository,
};
use crate::domain::{
    EmailAddress, Month, SalaryPayment, SalaryPaymentId, Staff, StaffId, User, UserId,
};

use super::records::Records;

/// Accounts with their password hashes, unique by email.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: Records<UserId, UserCredentials>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let mut users: Vec<User> = self
            .users
            .all()
            .await
            .into_iter()
            .map(|stored| stored.user)
            .collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    async fn find(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.get(id).await.map(|stored| stored.user))
    }

    async fn find_credentials(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserCredentials>, RepositoryError> {
        Ok(self.users.find(|stored| stored.user.email == *email).await)
    }

    async fn insert(&self, user: &User, password_hash: &str) -> Result<(), RepositoryError> {
        let stored = UserCredentials {
            user: user.clone(),
            password_hash: password_hash.to_owned(),
        };
        let inserted = self
            .users
            .put_unique(user.id, stored, |other| other.user.email == user.email)
            .await;
        if inserted {
            Ok(())
        } else {
            Err(RepositoryError::duplicate("users_email_key"))
        }
    }

    async fn update(
        &self,
        user: &User,
        password_hash: Option<String>,
    ) -> Result<(), RepositoryError> {
        let Some(current) = self.users.get(&user.id).await else {
            return Ok(());
        };
        let stored = UserCredentials {
            user: user.clone(),
            password_hash: password_hash.unwrap_or(current.password_hash),
        };
        self.users.replace(&user.id, stored).await;
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, RepositoryError> {
        Ok(self.users.remove(id).await)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(u64::try_from(self.users.len().await).unwrap_or(u64::MAX))
    }
}

/// Staff roster.
#[derive(Debug, Default)]
pub struct MemoryStaffRepository {
    staff: Records<StaffId, Staff>,
}

impl MemoryStaffRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StaffRepository for MemoryStaffRepository {
    async fn list(&self) -> Result<Vec<Staff>, RepositoryError> {
        let mut staff = self.staff.all().await;
        staff.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(staff)
    }

    async fn find(&self, id: &StaffId) -> Result<Option<Staff>, RepositoryError> {
        Ok(self.staff.get(id).await)
    }

    async fn insert(&self, staff: &Staff) -> Result<(), RepositoryError> {
        self.staff.put(staff.id, staff.clone()).await;
        Ok(())
    }

    async fn update(&self, staff: &Staff) -> Result<(), RepositoryError> {
        self.staff.replace(&staff.id, staff.clone()).await;
        Ok(())
    }

    async fn delete(&self, id: &StaffId) -> Result<bool, RepositoryError> {
        Ok(self.staff.remove(id).await)
    }
}

/// Salary payments.
#[derive(Debug, Default)]
pub struct MemorySalaryPaymentRepository {
    payments: Records<SalaryPaymentId, SalaryPayment>,
}

impl MemorySalaryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SalaryPaymentRepository for MemorySalaryPaymentRepository {
    async fn list(&self) -> Result<Vec<SalaryPayment>, RepositoryError> {
        let mut payments = self.payments.all().await;
        payments.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(payments)
    }

    async fn find(&self, id: &SalaryPaymentId) -> Result<Option<SalaryPayment>, RepositoryError> {
        Ok(self.payments.get(id).await)
    }

    async fn exists_for(&self, month: Month, year: i32) -> Result<bool, RepositoryError> {
        Ok(self
            .payments
            .any(|payment| payment.month == month && payment.year == year)
            .await)
    }

    async fn insert_many(&self, payments: &[SalaryPayment]) -> Result<(), RepositoryError> {
        for payment in payments {
            self.payments.put(payment.id, payment.clone()).await;
        }
        Ok(())
    }

    async fn update(&self, payment: &SalaryPayment) -> Result<(), RepositoryError> {
        self.payments.replace(&payment.id, payment.clone()).await;
        Ok(())
    }

    async fn delete(&self, id: &SalaryPaymentId) -> Result<bool, RepositoryError> {
        Ok(self.payments.remove(id).await)
    }

    async fn delete_for_staff(&self, staff_id: &StaffId) -> Result<u64, RepositoryError> {
        let removed = self
            .payments
            .remove_where(|payment| payment.staff_id == *staff_id)
            .await;
        Ok(u64::try_from(removed).unwrap_or(u64::MAX))
    }
}
