//! Shared types used across all domain modules.

pub mod record;

pub use record::{Payload, Record};
