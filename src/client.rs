//! High-level client — `ElabClient` with nested sub-client accessors.
//!
//! Each entity family has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the identity caches, the shared team
//! registry handle, and the accessor methods.

use crate::cache::{IdentityCache, SharedTeamRegistry};
use crate::config::Config;
use crate::domain::experiment::client::Experiments;
use crate::domain::item::client::Items;
use crate::domain::team::client::{TeamScoped, TeamSelector, Teams};
use crate::domain::user::client::Users;
use crate::error::{ConfigError, HttpError, SdkError};
use crate::http::{ElabHttp, Method, PageLimit, RetryPolicy, DEFAULT_PAGE_SIZE};
use crate::shared::Record;

use serde_json::Value;

/// The primary entry point for the eLabFTW SDK.
///
/// Holds the transport, one identity cache per entity kind, and a handle
/// to the (possibly shared) team registry. One client per credential and
/// endpoint pair; single-threaded by contract — the caches use no locks.
pub struct ElabClient {
    pub(crate) http: ElabHttp,
    pub(crate) experiment_cache: IdentityCache<i64>,
    pub(crate) item_cache: IdentityCache<i64>,
    pub(crate) user_cache: IdentityCache<i64>,
    pub(crate) teams: SharedTeamRegistry,
}

impl ElabClient {
    pub fn builder() -> ElabClientBuilder {
        ElabClientBuilder::default()
    }

    /// Build a client from the process environment (`ELAB_URL`,
    /// `ELAB_API_KEY`, optional `ELAB_CA_BUNDLE`).
    pub fn from_env() -> Result<Self, SdkError> {
        Self::builder().config(Config::from_env()?).build()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn experiments(&self) -> Experiments<'_> {
        Experiments { client: self }
    }

    pub fn items(&self) -> Items<'_> {
        Items { client: self }
    }

    pub fn users(&self) -> Users<'_> {
        Users { client: self }
    }

    pub fn teams(&self) -> Teams<'_> {
        Teams { client: self }
    }

    /// Bind to one team, resolving [`TeamSelector::Current`] to its
    /// concrete id with a single fetch.
    pub fn team(&self, selector: TeamSelector) -> Result<TeamScoped<'_>, SdkError> {
        TeamScoped::bind(self, selector)
    }

    // ── Root endpoints ───────────────────────────────────────────────────

    /// API keys registered for the authenticated user.
    pub fn api_keys(&self) -> Result<Vec<Record>, SdkError> {
        Ok(self.get_all("apikeys", &[])?)
    }

    /// The server's instance configuration.
    pub fn server_config(&self) -> Result<Record, SdkError> {
        Ok(self.get_one("config", &[])?)
    }

    /// Drop every cached record. The shared team registry is left alone;
    /// other clients may still be relying on it.
    pub fn clear_all_caches(&self) {
        self.experiment_cache.clear();
        self.item_cache.clear();
        self.user_cache.clear();
    }

    // ── Generic fetch ────────────────────────────────────────────────────

    /// Escape hatch for endpoints without a dedicated method: fetch
    /// records with explicit pagination control.
    pub fn fetch(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(String, String)],
        limit: PageLimit,
        offset: u32,
    ) -> Result<Vec<Record>, SdkError> {
        Ok(self
            .http
            .fetch_records(method, endpoint, query, limit, offset, None)?)
    }

    pub(crate) fn get_all(
        &self,
        endpoint: &str,
        query: &[(String, String)],
    ) -> Result<Vec<Record>, HttpError> {
        self.http
            .fetch_records(Method::GET, endpoint, query, PageLimit::All, 0, None)
    }

    /// Fetch a single-resource endpoint. A payload-encoded not-found
    /// body maps to [`HttpError::NotFound`] rather than being returned
    /// as data.
    pub(crate) fn get_one(
        &self,
        endpoint: &str,
        query: &[(String, String)],
    ) -> Result<Record, HttpError> {
        let records =
            self.http
                .fetch_records(Method::GET, endpoint, query, PageLimit::All, 0, None)?;
        match records.into_iter().next() {
            Some(record) if record.is_not_found() => {
                Err(HttpError::NotFound(format!("{endpoint} reported code 404")))
            }
            Some(record) => Ok(record),
            None => Err(HttpError::NotFound(format!("{endpoint} returned no record"))),
        }
    }

    /// Like [`get_one`](Self::get_one) but with "not found" as a normal
    /// outcome, for the lookup helpers where an absent entity is not
    /// exceptional.
    pub(crate) fn get_maybe(
        &self,
        endpoint: &str,
        query: &[(String, String)],
    ) -> Result<Option<Record>, HttpError> {
        match self.get_one(endpoint, query) {
            Ok(record) => Ok(Some(record)),
            Err(HttpError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Issue a write and return the server's (normalized) response
    /// record, if any.
    pub(crate) fn write_one(
        &self,
        method: Method,
        endpoint: &str,
        body: &Value,
    ) -> Result<Option<Record>, HttpError> {
        let records =
            self.http
                .fetch_records(method, endpoint, &[], PageLimit::All, 0, Some(body))?;
        Ok(records.into_iter().next())
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct ElabClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    ca_bundle: Option<String>,
    page_size: u32,
    retry: RetryPolicy,
    team_registry: Option<SharedTeamRegistry>,
}

impl Default for ElabClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            ca_bundle: None,
            page_size: DEFAULT_PAGE_SIZE,
            retry: RetryPolicy::default(),
            team_registry: None,
        }
    }
}

impl ElabClientBuilder {
    /// API base URL, e.g. `https://elab.example.org/api/v2/`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// PEM bundle layered over the system trust roots. Without one,
    /// certificate verification is disabled.
    pub fn ca_bundle(mut self, pem: impl Into<String>) -> Self {
        self.ca_bundle = Some(pem.into());
        self
    }

    /// Records per page for [`PageLimit::All`] fetches.
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Share a team registry with other clients. Teams fetched through
    /// any of them resolve name lookups on all of them.
    pub fn team_registry(mut self, registry: SharedTeamRegistry) -> Self {
        self.team_registry = Some(registry);
        self
    }

    /// Apply a [`Config`] (base URL, API key, CA bundle) in one go.
    pub fn config(mut self, config: Config) -> Self {
        self.base_url = Some(config.base_url);
        self.api_key = Some(config.api_key);
        self.ca_bundle = config.ca_bundle;
        self
    }

    pub fn build(self) -> Result<ElabClient, SdkError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingField("base_url"))?;
        let api_key = self.api_key.ok_or(ConfigError::MissingField("api_key"))?;

        let http = ElabHttp::new(
            &base_url,
            &api_key,
            self.ca_bundle.as_deref(),
            self.page_size,
            self.retry,
        )?;

        Ok(ElabClient {
            http,
            experiment_cache: IdentityCache::new("experiment"),
            item_cache: IdentityCache::new("item"),
            user_cache: IdentityCache::new("user"),
            teams: self.team_registry.unwrap_or_default(),
        })
    }
}
