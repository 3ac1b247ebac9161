use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use resolution_core::AppResult;
use resolution_core::error::AppError;
use resolution_entity::ticket::{
    CreateTicket, DailyStatusCount, StatusCount, Ticket, TicketKind, TicketStatus, UpdateTicket,
};

use super::MemoryStore;
use crate::traits::TicketRepository;

/// Newest first, like `ORDER BY created_at DESC, id DESC`.
fn newest_first(mut tickets: Vec<Ticket>) -> Vec<Ticket> {
    tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    tickets
}

#[async_trait]
impl TicketRepository for MemoryStore {
    async fn create(&self, kind: TicketKind, data: &CreateTicket) -> AppResult<Ticket> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&data.user_id) {
            return Err(AppError::not_found(format!(
                "User {} does not exist",
                data.user_id
            )));
        }
        let now = Utc::now();
        let ticket = Ticket {
            id: tables.next_id(kind.table()),
            user_id: data.user_id,
            subject: data.subject.clone(),
            description: data.description.clone(),
            status: data.status,
            created_at: now,
            updated_at: now,
        };
        tables.tickets_mut(kind).insert(ticket.id, ticket.clone());
        Ok(ticket)
    }

    async fn find_by_id(&self, kind: TicketKind, id: i64) -> AppResult<Option<Ticket>> {
        Ok(self.tables.read().await.tickets(kind).get(&id).cloned())
    }

    async fn find_all(
        &self,
        kind: TicketKind,
        status: Option<TicketStatus>,
    ) -> AppResult<Vec<Ticket>> {
        let tables = self.tables.read().await;
        let matching = tables
            .tickets(kind)
            .values()
            .filter(|t| status.is_none_or(|s| t.status == s))
            .cloned()
            .collect();
        Ok(newest_first(matching))
    }

    async fn find_by_user(
        &self,
        kind: TicketKind,
        user_id: i64,
        status: Option<TicketStatus>,
    ) -> AppResult<Vec<Ticket>> {
        let tables = self.tables.read().await;
        let matching = tables
            .tickets(kind)
            .values()
            .filter(|t| t.user_id == user_id)
            .filter(|t| status.is_none_or(|s| t.status == s))
            .cloned()
            .collect();
        Ok(newest_first(matching))
    }

    async fn update(
        &self,
        kind: TicketKind,
        id: i64,
        data: &UpdateTicket,
    ) -> AppResult<Option<Ticket>> {
        let mut tables = self.tables.write().await;
        Ok(tables.tickets_mut(kind).get_mut(&id).map(|ticket| {
            if let Some(subject) = &data.subject {
                ticket.subject = subject.clone();
            }
            if let Some(description) = &data.description {
                ticket.description = description.clone();
            }
            if let Some(status) = data.status {
                ticket.status = status;
            }
            ticket.updated_at = Utc::now();
            ticket.clone()
        }))
    }

    async fn delete(&self, kind: TicketKind, id: i64) -> AppResult<bool> {
        Ok(self.tables.write().await.tickets_mut(kind).remove(&id).is_some())
    }

    async fn count(&self, kind: TicketKind) -> AppResult<i64> {
        Ok(self.tables.read().await.tickets(kind).len() as i64)
    }

    async fn count_by_status(&self, kind: TicketKind) -> AppResult<Vec<StatusCount>> {
        let tables = self.tables.read().await;
        let mut counts: BTreeMap<&'static str, StatusCount> = BTreeMap::new();
        for ticket in tables.tickets(kind).values() {
            counts
                .entry(ticket.status.as_str())
                .or_insert(StatusCount {
                    status: ticket.status,
                    count: 0,
                })
                .count += 1;
        }
        Ok(counts.into_values().collect())
    }

    async fn daily_counts_since(
        &self,
        kind: TicketKind,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<DailyStatusCount>> {
        let tables = self.tables.read().await;
        let mut counts: BTreeMap<(chrono::NaiveDate, &'static str), DailyStatusCount> =
            BTreeMap::new();
        for ticket in tables.tickets(kind).values().filter(|t| t.created_at >= since) {
            let day = ticket.created_at.date_naive();
            counts
                .entry((day, ticket.status.as_str()))
                .or_insert(DailyStatusCount {
                    day,
                    status: ticket.status,
                    count: 0,
                })
                .count += 1;
        }
        Ok(counts.into_values().collect())
    }
}
