//! Fixed-window daily bucketing.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use resolution_entity::ticket::{DailyStatusCount, TicketStatus};

/// Number of days covered by the chart, today included.
pub const REPORT_DAYS: u32 = 30;

/// Ticket counts for one UTC day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBucket {
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub pending: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub total: i64,
}

impl DailyBucket {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            pending: 0,
            in_progress: 0,
            completed: 0,
            total: 0,
        }
    }

    fn add(&mut self, status: TicketStatus, count: i64) {
        match status {
            TicketStatus::Pending => self.pending += count,
            TicketStatus::InProgress => self.in_progress += count,
            TicketStatus::Completed => self.completed += count,
        }
        self.total += count;
    }
}

/// First day of a `days`-long window ending on `end`.
pub fn window_start(end: NaiveDate, days: u32) -> NaiveDate {
    end - Duration::days(i64::from(days.saturating_sub(1)))
}

/// Spread `counts` over exactly `days` buckets ending on `end`, oldest
/// first. Days without tickets get zero buckets; counts outside the
/// window are ignored.
pub fn bucket_daily(counts: &[DailyStatusCount], end: NaiveDate, days: u32) -> Vec<DailyBucket> {
    let start = window_start(end, days);
    let mut buckets: Vec<DailyBucket> = (0..days)
        .map(|offset| DailyBucket::empty(start + Duration::days(i64::from(offset))))
        .collect();

    for entry in counts {
        if entry.day < start || entry.day > end {
            continue;
        }
        let index = (entry.day - start).num_days() as usize;
        if let Some(bucket) = buckets.get_mut(index) {
            bucket.add(entry.status, entry.count);
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn count(d: NaiveDate, status: TicketStatus, count: i64) -> DailyStatusCount {
        DailyStatusCount {
            day: d,
            status,
            count,
        }
    }

    #[test]
    fn test_window_is_thirty_days_oldest_first() {
        let end = day(2024, 3, 5);
        let buckets = bucket_daily(&[], end, REPORT_DAYS);

        assert_eq!(buckets.len(), 30);
        assert_eq!(buckets[0].date, day(2024, 2, 5));
        assert_eq!(buckets[29].date, end);
        assert!(buckets.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_counts_land_in_their_day() {
        let end = day(2024, 1, 31);
        let counts = [
            count(day(2024, 1, 31), TicketStatus::Pending, 2),
            count(day(2024, 1, 31), TicketStatus::Completed, 1),
            count(day(2024, 1, 2), TicketStatus::InProgress, 4),
        ];
        let buckets = bucket_daily(&counts, end, REPORT_DAYS);

        let today = buckets.last().unwrap();
        assert_eq!((today.pending, today.completed, today.total), (2, 1, 3));
        let first = &buckets[0];
        assert_eq!(first.date, day(2024, 1, 2));
        assert_eq!((first.in_progress, first.total), (4, 4));
    }

    #[test]
    fn test_out_of_window_counts_are_ignored() {
        let end = day(2024, 1, 31);
        let counts = [
            count(day(2024, 1, 1), TicketStatus::Pending, 9),
            count(day(2024, 2, 1), TicketStatus::Pending, 9),
        ];
        let buckets = bucket_daily(&counts, end, REPORT_DAYS);
        assert!(buckets.iter().all(|b| b.total == 0));
    }

    #[test]
    fn test_serializes_date_as_iso_day() {
        let bucket = DailyBucket::empty(day(2024, 7, 4));
        let json = serde_json::to_value(&bucket).unwrap();
        assert_eq!(json["date"], "2024-07-04");
    }
}
