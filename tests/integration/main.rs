//! End-to-end tests driving the full router against the in-memory store.

mod helpers;

mod account_test;
mod admin_test;
mod profile_test;
mod ticket_test;
mod todo_test;
mod verification_test;
