//! Totals and ticket lists for the admin dashboard, plus status changes.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use resolution_core::AppResult;
use resolution_core::error::AppError;
use resolution_database::{TicketRepository, UserRepository};
use resolution_entity::ticket::{Ticket, TicketKind, TicketStatus, UpdateTicket};

use crate::context::RequestContext;

/// Row counts shown at the top of the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct Totals {
    pub users: i64,
    pub claims: i64,
    pub requests: i64,
}

/// Everything the dashboard renders, newest tickets first.
#[derive(Debug, Clone, Serialize)]
pub struct AdminOverview {
    pub totals: Totals,
    pub claims: Vec<Ticket>,
    pub requests: Vec<Ticket>,
}

/// Admin dashboard operations.
#[derive(Debug, Clone)]
pub struct AdminPanelService {
    users: Arc<dyn UserRepository>,
    tickets: Arc<dyn TicketRepository>,
}

impl AdminPanelService {
    /// Creates a new admin panel service.
    pub fn new(users: Arc<dyn UserRepository>, tickets: Arc<dyn TicketRepository>) -> Self {
        Self { users, tickets }
    }

    /// Totals and full ticket lists.
    pub async fn overview(&self, ctx: &RequestContext) -> AppResult<AdminOverview> {
        ctx.require_admin()?;

        let claims = self.tickets.find_all(TicketKind::Claim, None).await?;
        let requests = self.tickets.find_all(TicketKind::Request, None).await?;
        let totals = Totals {
            users: self.users.count().await?,
            claims: claims.len() as i64,
            requests: requests.len() as i64,
        };

        Ok(AdminOverview {
            totals,
            claims,
            requests,
        })
    }

    /// Move a claim or request to another status.
    pub async fn set_status(
        &self,
        ctx: &RequestContext,
        kind: TicketKind,
        id: i64,
        status: TicketStatus,
    ) -> AppResult<Ticket> {
        ctx.require_admin()?;

        let update = UpdateTicket {
            status: Some(status),
            ..Default::default()
        };
        let ticket = self
            .tickets
            .update(kind, id, &update)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{} {id} not found", kind.label())))?;

        info!(kind = %kind, id, %status, admin_id = ctx.user_id, "Ticket status changed");
        Ok(ticket)
    }
}
