//! Task bodies run by the scheduler.

pub mod cleanup;

pub use cleanup::sweep_expired_codes;
