//! Process-local repository backend.
//!
//! [`MemoryStore`] keeps every table in a `BTreeMap` behind one
//! `tokio::sync::RwLock` and enforces the same unique keys, foreign keys
//! and cascades as the SQL schema. Data does not survive a restart.

mod profile;
mod ticket;
mod todo;
mod user;
mod verification;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tokio::sync::RwLock;

use resolution_entity::profile::Profile;
use resolution_entity::ticket::{Ticket, TicketKind};
use resolution_entity::todo::{Task, TodoList};
use resolution_entity::user::User;
use resolution_entity::verification::VerificationCode;

/// In-memory implementation of every repository trait.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    codes: BTreeMap<i64, VerificationCode>,
    claims: BTreeMap<i64, Ticket>,
    requests: BTreeMap<i64, Ticket>,
    profiles: BTreeMap<i64, Profile>,
    todo_lists: BTreeMap<i64, TodoList>,
    tasks: BTreeMap<i64, Task>,
    sequences: HashMap<&'static str, i64>,
}

impl Tables {
    /// Next identifier for `table`, starting at 1.
    fn next_id(&mut self, table: &'static str) -> i64 {
        let seq = self.sequences.entry(table).or_insert(0);
        *seq += 1;
        *seq
    }

    fn tickets(&self, kind: TicketKind) -> &BTreeMap<i64, Ticket> {
        match kind {
            TicketKind::Claim => &self.claims,
            TicketKind::Request => &self.requests,
        }
    }

    fn tickets_mut(&mut self, kind: TicketKind) -> &mut BTreeMap<i64, Ticket> {
        match kind {
            TicketKind::Claim => &mut self.claims,
            TicketKind::Request => &mut self.requests,
        }
    }
}
