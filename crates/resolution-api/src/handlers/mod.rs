//! Route handlers organized by domain.

pub mod admin;
pub mod auth;
pub mod health;
pub mod profile;
pub mod report;
pub mod ticket;
pub mod todo;
pub mod user;
pub mod verification;
