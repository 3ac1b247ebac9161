//! Admin dashboard.

pub mod panel;

pub use panel::{AdminOverview, AdminPanelService, Totals};
