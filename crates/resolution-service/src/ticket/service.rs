//! Ticket CRUD with owner/admin visibility rules.
//!
//! One [`TicketService`] exists per [`TicketKind`]. Tickets that the
//! caller may not see are reported as missing rather than forbidden.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use resolution_core::AppResult;
use resolution_core::error::AppError;
use resolution_database::TicketRepository;
use resolution_entity::ticket::{CreateTicket, Ticket, TicketKind, TicketStatus, UpdateTicket};

use crate::context::RequestContext;

/// Data for a new ticket.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTicketInput {
    pub subject: String,
    pub description: Option<String>,
    /// Only admins may open a ticket in a state other than pending.
    pub status: Option<TicketStatus>,
    /// Owner; admins may file on behalf of another user.
    pub user: Option<i64>,
}

/// Partial ticket update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTicketInput {
    pub subject: Option<String>,
    pub description: Option<String>,
    /// Admin only.
    pub status: Option<TicketStatus>,
}

/// Claim or request operations.
#[derive(Debug, Clone)]
pub struct TicketService {
    kind: TicketKind,
    tickets: Arc<dyn TicketRepository>,
}

impl TicketService {
    /// Creates a service for one ticket kind.
    pub fn new(kind: TicketKind, tickets: Arc<dyn TicketRepository>) -> Self {
        Self { kind, tickets }
    }

    /// File a ticket for the caller, or for `req.user` when admin.
    pub async fn create(&self, ctx: &RequestContext, req: CreateTicketInput) -> AppResult<Ticket> {
        let owner = req.user.unwrap_or(ctx.user_id);
        if owner != ctx.user_id {
            ctx.require_admin()?;
        }

        let status = req.status.unwrap_or_default();
        if status != TicketStatus::Pending && !ctx.is_admin {
            return Err(AppError::forbidden(
                "Only administrators can set the status of a ticket",
            ));
        }

        let subject = req.subject.trim().to_string();
        if subject.is_empty() {
            return Err(AppError::validation("Subject cannot be empty"));
        }

        let ticket = self
            .tickets
            .create(
                self.kind,
                &CreateTicket {
                    user_id: owner,
                    subject,
                    description: req.description.unwrap_or_default().trim().to_string(),
                    status,
                },
            )
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    AppError::not_found("User not found")
                } else {
                    e
                }
            })?;

        info!(kind = %self.kind, id = ticket.id, user_id = owner, "Ticket created");
        Ok(ticket)
    }

    /// The caller's tickets, or every ticket for admins.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        status: Option<TicketStatus>,
    ) -> AppResult<Vec<Ticket>> {
        if ctx.is_admin {
            self.tickets.find_all(self.kind, status).await
        } else {
            self.tickets.find_by_user(self.kind, ctx.user_id, status).await
        }
    }

    /// Tickets of one user; the user itself or an admin.
    pub async fn list_for_user(
        &self,
        ctx: &RequestContext,
        user_id: i64,
        status: Option<TicketStatus>,
    ) -> AppResult<Vec<Ticket>> {
        ctx.require_access(user_id)?;
        self.tickets.find_by_user(self.kind, user_id, status).await
    }

    /// One ticket visible to the caller.
    pub async fn get(&self, ctx: &RequestContext, id: i64) -> AppResult<Ticket> {
        self.tickets
            .find_by_id(self.kind, id)
            .await?
            .filter(|t| t.is_accessible_by(ctx.user_id, ctx.is_admin))
            .ok_or_else(|| self.not_found(id))
    }

    /// Edit a ticket. Owners may change text, only admins the status.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: i64,
        req: UpdateTicketInput,
    ) -> AppResult<Ticket> {
        self.get(ctx, id).await?;

        if req.status.is_some() && !ctx.is_admin {
            return Err(AppError::forbidden(
                "Only administrators can change the status of a ticket",
            ));
        }

        let update = UpdateTicket {
            subject: req.subject.map(|s| s.trim().to_string()),
            description: req.description.map(|s| s.trim().to_string()),
            status: req.status,
        };
        if update.subject.as_deref() == Some("") {
            return Err(AppError::validation("Subject cannot be empty"));
        }
        if update.subject.is_none() && update.description.is_none() && update.status.is_none() {
            return Err(AppError::validation("No fields to update"));
        }

        let ticket = self
            .tickets
            .update(self.kind, id, &update)
            .await?
            .ok_or_else(|| self.not_found(id))?;

        info!(kind = %self.kind, id, updated_by = ctx.user_id, "Ticket updated");
        Ok(ticket)
    }

    /// Delete a ticket visible to the caller.
    pub async fn delete(&self, ctx: &RequestContext, id: i64) -> AppResult<()> {
        self.get(ctx, id).await?;
        if !self.tickets.delete(self.kind, id).await? {
            return Err(self.not_found(id));
        }
        info!(kind = %self.kind, id, deleted_by = ctx.user_id, "Ticket deleted");
        Ok(())
    }

    fn not_found(&self, id: i64) -> AppError {
        AppError::not_found(format!("{} {id} not found", self.kind.label()))
    }
}
