//! Ticket statistics for the reports page.

pub mod daily;
pub mod service;

pub use daily::{DailyBucket, REPORT_DAYS, bucket_daily};
pub use service::{DateRange, KindReport, Report, ReportService, TicketStats};
