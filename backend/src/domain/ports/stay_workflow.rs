//! Driving port for the reservation, check-in and check-out workflow.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{
    Error, Invoice, Money, PaymentMethod, Reservation, ReservationDraft, ReservationFilter,
    ReservationId, User,
};

/// Payment collected against a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayPayment {
    pub amount: Money,
    pub method: PaymentMethod,
}

/// Check-out request. A zero final payment records no transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOutRequest {
    pub final_payment: Money,
    pub method: Option<PaymentMethod>,
}

/// Result of a check-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutOutcome {
    pub reservation: Reservation,
    pub invoice: Invoice,
    /// Amount moved onto the primary guest's outstanding balance.
    pub carried_to_ledger: Money,
}

/// Stay with its resolved primary guest name, as listed at the desk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StayListing {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub primary_guest_name: Option<String>,
}

/// Stay lifecycle use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StayWorkflow: Send + Sync {
    /// Book or check in a new stay.
    async fn create_stay(&self, actor: &User, draft: ReservationDraft) -> Result<Reservation, Error>;

    /// Edit an open stay.
    async fn update_stay(
        &self,
        actor: &User,
        id: &ReservationId,
        draft: ReservationDraft,
    ) -> Result<Reservation, Error>;

    /// Convert a pending reservation into a check-in.
    async fn check_in(&self, actor: &User, id: &ReservationId) -> Result<Reservation, Error>;

    /// Collect a payment against a stay.
    async fn collect_payment(
        &self,
        actor: &User,
        id: &ReservationId,
        payment: StayPayment,
    ) -> Result<Reservation, Error>;

    /// Close the stay, carrying any unpaid balance to the guest ledger.
    async fn check_out(
        &self,
        actor: &User,
        id: &ReservationId,
        request: CheckOutRequest,
    ) -> Result<CheckOutOutcome, Error>;

    /// Cancel a stay, freeing its rooms.
    async fn cancel_stay(&self, actor: &User, id: &ReservationId) -> Result<Reservation, Error>;

    /// Delete a stay. Admin only.
    async fn delete_stay(&self, actor: &User, id: &ReservationId) -> Result<(), Error>;

    /// Stays matching `filter`, newest first.
    async fn list_stays(&self, filter: ReservationFilter) -> Result<Vec<StayListing>, Error>;

    /// Fetch one stay.
    async fn get_stay(&self, id: &ReservationId) -> Result<Reservation, Error>;
}
