//! Cursorless pagination over `limit`/`offset` list endpoints.
//!
//! The API caps every list response at a per-request `limit`. This layer
//! hides that: with [`PageLimit::All`] it walks pages at increasing
//! offsets and concatenates them, terminating on the first short page.
//! There is no count or next-page token, so a total that is an exact
//! multiple of the page size costs one extra trailing request that
//! returns zero records.

use crate::error::HttpError;
use crate::http::client::ElabHttp;
use crate::shared::{Payload, Record};

use reqwest::header::HeaderMap;
use reqwest::Method;
use serde_json::Value;

/// Records per page when fetching with [`PageLimit::All`], unless
/// overridden on the client builder.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// How many records a fetch asks the server for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLimit {
    /// Page through everything.
    All,
    /// Exactly one physical request with this `limit`.
    Fixed(u32),
}

impl Default for PageLimit {
    fn default() -> Self {
        PageLimit::All
    }
}

impl ElabHttp {
    /// Fetch records from `endpoint` as one ordered list.
    ///
    /// - [`PageLimit::All`] on a `GET` pages through the endpoint until a
    ///   short page signals the end of the data. On any other verb a
    ///   single request is made with no pagination parameters — writes
    ///   are never paginated.
    /// - [`PageLimit::Fixed`] makes exactly one request with the given
    ///   `limit` and `offset` passed through.
    ///
    /// Explicit `limit`/`offset` always supersede `limit`/`offset` keys
    /// present in the caller's `query` bag. Single-object responses come
    /// back as a one-element list. A failure mid-pagination aborts the
    /// whole fetch; no partial list is returned.
    pub fn fetch_records(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(String, String)],
        limit: PageLimit,
        offset: u32,
        body: Option<&Value>,
    ) -> Result<Vec<Record>, HttpError> {
        let query: Vec<(String, String)> = query
            .iter()
            .filter(|(key, _)| key != "limit" && key != "offset")
            .cloned()
            .collect();

        if let PageLimit::Fixed(n) = limit {
            let mut query = query;
            query.push(("limit".into(), n.to_string()));
            query.push(("offset".into(), offset.to_string()));
            let resp = self.send(method, endpoint, &query, HeaderMap::new(), body)?;
            return Ok(resp.json::<Payload>()?.into_records());
        }

        if method != Method::GET {
            let resp = self.send(method, endpoint, &query, HeaderMap::new(), body)?;
            return Ok(resp.json::<Payload>()?.into_records());
        }

        let page_size = self.page_size();
        let mut records = Vec::new();
        let mut offset = offset;

        loop {
            let mut page_query = query.clone();
            page_query.push(("limit".into(), page_size.to_string()));
            page_query.push(("offset".into(), offset.to_string()));

            let resp = self.send(Method::GET, endpoint, &page_query, HeaderMap::new(), body)?;
            let page = resp.json::<Payload>()?.into_records();
            let short = (page.len() as u32) < page_size;
            records.extend(page);

            if short {
                return Ok(records);
            }
            offset += page_size;
        }
    }
}
