//! Daily fiscal ledger and day closing.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{Money, Reservation, ReservationId, RoomNumber, WALK_IN_GUEST};

/// Persisted state of a fiscal day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiscalDay {
    pub date: NaiveDate,
    pub token_adjustment: Money,
    pub closed_at: Option<DateTime<Utc>>,
}

impl FiscalDay {
    /// Unclosed day with no adjustment.
    #[must_use]
    pub fn open(date: NaiveDate) -> Self {
        Self {
            date,
            token_adjustment: Money::ZERO,
            closed_at: None,
        }
    }

    /// Whether the day has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed_at.is_some()
    }
}

/// One stay on the daily ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRow {
    pub reservation_id: ReservationId,
    pub resident: String,
    pub room_numbers: Vec<RoomNumber>,
    pub billed: Money,
    pub collected: Money,
    pub due: Money,
}

/// Totals for the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub billed: Money,
    pub collected: Money,
    pub due: Money,
    pub token_adjustment: Money,
    pub closing_balance: Money,
    pub closed: bool,
}

/// Daily ledger report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub date: NaiveDate,
    pub rows: Vec<LedgerRow>,
    pub summary: DailySummary,
}

impl DailyReport {
    /// Build the report for `day` from every stay the caller loaded.
    ///
    /// `resident` resolves a stay's primary guest name.
    pub fn build<'a, F>(day: &FiscalDay, reservations: &'a [Reservation], resident: F) -> Self
    where
        F: Fn(&'a Reservation) -> Option<String>,
    {
        let rows: Vec<LedgerRow> = reservations
            .iter()
            .filter(|stay| stay.in_ledger_on(day.date))
            .map(|stay| LedgerRow {
                reservation_id: stay.id,
                resident: resident(stay).unwrap_or_else(|| WALK_IN_GUEST.to_owned()),
                room_numbers: stay.room_numbers.clone(),
                billed: stay.total_amount,
                collected: stay.paid_amount,
                due: (stay.total_amount - stay.paid_amount).floor_zero(),
            })
            .collect();
        let summary = DailySummary::over(&rows, day.token_adjustment, day.is_closed());
        Self {
            date: day.date,
            rows,
            summary,
        }
    }

    /// Keep the rows whose rooms or resident contain `term`; totals cover
    /// only the rows kept. A blank term keeps everything.
    #[must_use]
    pub fn search(mut self, term: &str) -> Self {
        let term = term.trim();
        if term.is_empty() {
            return self;
        }
        let lowered = term.to_lowercase();
        self.rows.retain(|row| {
            row.room_label().contains(term) || row.resident.to_lowercase().contains(&lowered)
        });
        self.summary = DailySummary::over(
            &self.rows,
            self.summary.token_adjustment,
            self.summary.closed,
        );
        self
    }
}

impl LedgerRow {
    fn room_label(&self) -> String {
        self.room_numbers
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join(", ")
    }
}

impl DailySummary {
    fn over(rows: &[LedgerRow], token_adjustment: Money, closed: bool) -> Self {
        let billed: Money = rows.iter().map(|row| row.billed).sum();
        let collected: Money = rows.iter().map(|row| row.collected).sum();
        let due: Money = rows.iter().map(|row| row.due).sum();
        Self {
            billed,
            collected,
            due,
            token_adjustment,
            closing_balance: collected - token_adjustment,
            closed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GuestId, ReservationStatus, StayCharges, StayType};
    use rstest::rstest;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, d).expect("date")
    }

    fn stay(from: u32, to: u32, status: ReservationStatus, total: i64, paid: i64) -> Reservation {
        Reservation {
            id: ReservationId::random(),
            room_numbers: vec![RoomNumber::new("101").expect("room")],
            guest_ids: vec![GuestId::random()],
            check_in: day(from),
            check_out: day(to),
            status,
            stay_type: StayType::Reservation,
            charges: StayCharges::default(),
            paid_amount: Money::from_major(paid),
            payment_method: None,
            on_duty_officer: None,
            special_requests: None,
            notes: None,
            total_amount: Money::from_major(total),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn sums_rows_and_applies_token() {
        let stays = vec![
            stay(1, 3, ReservationStatus::CheckedIn, 10_000, 4_000),
            stay(3, 5, ReservationStatus::Pending, 6_000, 8_000),
            stay(2, 4, ReservationStatus::Cancelled, 9_999, 9_999),
            stay(4, 6, ReservationStatus::Pending, 1_000, 0),
        ];
        let fiscal = FiscalDay {
            token_adjustment: Money::from_major(500),
            ..FiscalDay::open(day(3))
        };
        let report = DailyReport::build(&fiscal, &stays, |_| Some("Resident".into()));

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.summary.billed, Money::from_major(16_000));
        assert_eq!(report.summary.collected, Money::from_major(12_000));
        assert_eq!(report.summary.due, Money::from_major(6_000));
        assert_eq!(report.summary.closing_balance, Money::from_major(11_500));
        assert!(!report.summary.closed);
    }

    #[rstest]
    #[case("rafi", 1, 4_000)]
    #[case("10", 2, 9_000)]
    #[case("  ", 2, 9_000)]
    #[case("Nadia", 0, 0)]
    fn search_narrows_rows_and_totals(
        #[case] term: &str,
        #[case] rows: usize,
        #[case] collected: i64,
    ) {
        let mut second = stay(1, 3, ReservationStatus::CheckedIn, 6_000, 5_000);
        second.room_numbers = vec![RoomNumber::new("102").expect("room")];
        let stays = vec![stay(1, 3, ReservationStatus::CheckedIn, 10_000, 4_000), second];
        let first_id = stays[0].id;
        let fiscal = FiscalDay {
            token_adjustment: Money::from_major(500),
            ..FiscalDay::open(day(2))
        };
        let report = DailyReport::build(&fiscal, &stays, |stay| {
            (stay.id == first_id).then(|| "Rafi Ahmed".to_owned())
        })
        .search(term);

        assert_eq!(report.rows.len(), rows);
        assert_eq!(report.summary.collected, Money::from_major(collected));
        assert_eq!(
            report.summary.closing_balance,
            Money::from_major(collected - 500)
        );
    }

    #[rstest]
    fn unresolved_resident_is_walk_in() {
        let stays = vec![stay(1, 2, ReservationStatus::CheckedOut, 100, 100)];
        let report = DailyReport::build(&FiscalDay::open(day(2)), &stays, |_| None);
        assert_eq!(report.rows[0].resident, WALK_IN_GUEST);
        assert_eq!(report.rows[0].due, Money::ZERO);
    }
}
