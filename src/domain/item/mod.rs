//! Resource items (the database side of the notebook).

pub mod client;

pub use client::Items;
