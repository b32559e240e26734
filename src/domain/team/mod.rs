//! Teams: registry-backed lookups, team tags, and team-scoped
//! experiment/item categories and statuses.

pub mod client;

pub use client::{TeamScoped, TeamSelector, Teams};
