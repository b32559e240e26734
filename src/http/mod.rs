//! HTTP layer — blocking transport with retry policies and pagination.

pub mod client;
pub mod paging;
pub mod retry;

pub use client::ElabHttp;
pub use paging::{PageLimit, DEFAULT_PAGE_SIZE};
pub use retry::{RetryConfig, RetryPolicy};

pub use reqwest::Method;
