//! # eLabFTW SDK
//!
//! A blocking Rust client for the eLabFTW REST API (v2).
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — opaque entity records, errors, environment configuration
//! 2. **HTTP** — `ElabHttp`: credential injection, transient-status
//!    retries, and cursorless `limit`/`offset` pagination
//! 3. **High-Level Client** — `ElabClient` with nested sub-clients,
//!    identity caches, and a shareable team registry
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use elabftw_sdk::prelude::*;
//!
//! let client = ElabClient::builder()
//!     .base_url("https://elab.example.org/api/v2/")
//!     .api_key(std::env::var("ELAB_API_KEY")?)
//!     .build()?;
//!
//! let experiments = client.experiments().list()?;
//! let team = client.teams().by_name("alpha")?;
//! let path = client.experiments().export(7, ExportFormat::Pdf, None, false)?;
//! ```
//!
//! The client is synchronous and single-threaded by contract: every call
//! blocks until a response or final failure, and the caches use no
//! locks. Wrap it in your own synchronization if you must share it.

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Opaque entity records and response payload shapes.
pub mod shared;

/// Identity caches and the shared team registry.
pub mod cache;

/// Environment configuration.
pub mod config;

/// Unified SDK error types.
pub mod error;

// ── Layer 2: HTTP ────────────────────────────────────────────────────────────

/// Blocking transport with retry policies and pagination.
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// Domain sub-clients (vertical slices).
pub mod domain;

/// `ElabClient` — the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Records
    pub use crate::shared::{Payload, Record};

    // Errors
    pub use crate::error::{ConfigError, HttpError, SdkError, ValidationError};

    // Configuration
    pub use crate::config::Config;

    // HTTP layer
    pub use crate::http::{
        ElabHttp, Method, PageLimit, RetryConfig, RetryPolicy, DEFAULT_PAGE_SIZE,
    };

    // Caching
    pub use crate::cache::{IdentityCache, SharedTeamRegistry, TeamRegistry};

    // Client + sub-clients
    pub use crate::client::{ElabClient, ElabClientBuilder};
    pub use crate::domain::experiment::{CategorySelector, Experiments, ExportFormat};
    pub use crate::domain::item::Items;
    pub use crate::domain::team::{TeamScoped, TeamSelector, Teams};
    pub use crate::domain::user::Users;
}
