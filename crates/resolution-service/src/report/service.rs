//! Report assembly.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use resolution_core::AppResult;
use resolution_database::TicketRepository;
use resolution_entity::ticket::{StatusCount, TicketKind, TicketStatus};

use super::daily::{DailyBucket, REPORT_DAYS, bucket_daily, window_start};
use crate::context::RequestContext;

/// Counts per status for one ticket kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TicketStats {
    pub total: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub completed: i64,
}

impl TicketStats {
    fn from_counts(counts: &[StatusCount]) -> Self {
        counts.iter().fold(Self::default(), |mut stats, c| {
            match c.status {
                TicketStatus::Pending => stats.pending += c.count,
                TicketStatus::InProgress => stats.in_progress += c.count,
                TicketStatus::Completed => stats.completed += c.count,
            }
            stats.total += c.count;
            stats
        })
    }
}

/// Statistics and chart data for one ticket kind.
#[derive(Debug, Clone, Serialize)]
pub struct KindReport {
    pub stats: TicketStats,
    pub chart: Vec<DailyBucket>,
}

/// Inclusive chart window.
#[derive(Debug, Clone, Serialize)]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// The reports page payload.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub claims: KindReport,
    pub requests: KindReport,
    pub date_range: DateRange,
}

/// Builds the reports page.
#[derive(Debug, Clone)]
pub struct ReportService {
    tickets: Arc<dyn TicketRepository>,
}

impl ReportService {
    /// Creates a new report service.
    pub fn new(tickets: Arc<dyn TicketRepository>) -> Self {
        Self { tickets }
    }

    /// Report for the 30 days ending today (UTC). Admin only.
    pub async fn generate(&self, ctx: &RequestContext) -> AppResult<Report> {
        ctx.require_admin()?;
        self.generate_until(Utc::now().date_naive()).await
    }

    /// Report for the 30 days ending on `end`.
    pub async fn generate_until(&self, end: NaiveDate) -> AppResult<Report> {
        let start = window_start(end, REPORT_DAYS);
        Ok(Report {
            claims: self.kind_report(TicketKind::Claim, start, end).await?,
            requests: self.kind_report(TicketKind::Request, start, end).await?,
            date_range: DateRange {
                start_date: start,
                end_date: end,
            },
        })
    }

    async fn kind_report(
        &self,
        kind: TicketKind,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<KindReport> {
        let stats = TicketStats::from_counts(&self.tickets.count_by_status(kind).await?);
        let since = start.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
        let daily = self.tickets.daily_counts_since(kind, since).await?;

        Ok(KindReport {
            stats,
            chart: bucket_daily(&daily, end, REPORT_DAYS),
        })
    }
}
