//! Experiments: listing, search filters, cached single fetch, category
//! assignment, sharelinks, and export to disk.

pub mod client;
pub mod export;

pub use client::{CategorySelector, Experiments};
pub use export::ExportFormat;
