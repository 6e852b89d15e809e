//! Charge and payment ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::labels::labelled_enum;
use super::{Error, Money, TransactionId};

/// Room label used for settlements against a guest's master balance.
pub const MASTER_ROOM_LABEL: &str = "MASTER";

labelled_enum! {
    /// Ledger entry category.
    pub enum TransactionType ("transaction type") {
        Laundry => "Laundry",
        MiniBar => "Mini-bar",
        RoomPayment => "Room Payment",
    }
}

/// A single ledger entry. Amounts are always positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub timestamp: DateTime<Utc>,
    pub room_label: String,
    pub guest_name: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Money,
}

/// Unrecorded ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub room_label: String,
    pub guest_name: String,
    pub kind: TransactionType,
    pub amount: Money,
}

impl NewTransaction {
    /// Stamp the entry with an id and time after checking the amount.
    pub fn record(self, id: TransactionId, at: DateTime<Utc>) -> Result<Transaction, Error> {
        ensure_positive("amount", self.amount)?;
        Ok(Transaction {
            id,
            timestamp: at,
            room_label: self.room_label.trim().to_owned(),
            guest_name: self.guest_name.trim().to_owned(),
            kind: self.kind,
            amount: self.amount,
        })
    }
}

/// Reject zero or negative amounts for `field`.
///
/// # Examples
/// ```
/// use frontdesk::domain::{ErrorCode, Money, ensure_positive};
///
/// assert!(ensure_positive("amount", Money::from_major(1)).is_ok());
/// let err = ensure_positive("amount", Money::ZERO).unwrap_err();
/// assert_eq!(err.code(), ErrorCode::InvalidRequest);
/// ```
pub fn ensure_positive(field: &str, amount: Money) -> Result<(), Error> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(Error::invalid_field(
            field,
            "non_positive",
            format!("{field} must be greater than zero"),
        ))
    }
}
