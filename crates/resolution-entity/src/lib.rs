//! # resolution-entity
//!
//! Domain entity models for Resolution. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod profile;
pub mod ticket;
pub mod todo;
pub mod user;
pub mod verification;
