//! Realtime change notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Table a change was written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeTable {
    Rooms,
    Guests,
    Reservations,
    Transactions,
    Users,
    Staff,
    SalaryPayments,
    FiscalDays,
}

/// Kind of write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// A committed write, as pushed to subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    pub table: ChangeTable,
    pub kind: ChangeKind,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<Value>,
    pub occurred_at: DateTime<Utc>,
}

impl ChangeEvent {
    /// Event carrying the new state of `record`.
    ///
    /// Records that fail to serialise are sent without a body; subscribers
    /// refetch by id.
    pub fn upserted<T: Serialize>(
        table: ChangeTable,
        kind: ChangeKind,
        id: impl ToString,
        record: &T,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            table,
            kind,
            id: id.to_string(),
            record: serde_json::to_value(record).ok(),
            occurred_at: at,
        }
    }

    /// Event for a removed row.
    pub fn deleted(table: ChangeTable, id: impl ToString, at: DateTime<Utc>) -> Self {
        Self {
            table,
            kind: ChangeKind::Delete,
            id: id.to_string(),
            record: None,
            occurred_at: at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialises_camel_case_without_empty_record() {
        let at = DateTime::from_timestamp(0, 0).expect("epoch");
        let event = ChangeEvent::deleted(ChangeTable::SalaryPayments, "abc", at);
        let json = serde_json::to_value(&event).expect("serialise");
        assert_eq!(json["table"], "salary_payments");
        assert_eq!(json["kind"], "delete");
        assert_eq!(json["occurredAt"], "1970-01-01T00:00:00Z");
        assert!(json.get("record").is_none());
    }
}
