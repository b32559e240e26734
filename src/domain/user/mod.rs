//! Users.

pub mod client;

pub use client::Users;
