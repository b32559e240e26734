//! Low-level transport — `ElabHttp`.
//!
//! One physical exchange per attempt: credential injection, redacted
//! request logging, transient-status retry, status-to-error mapping.
//! Internal to the SDK for the most part — the high-level client wraps
//! this, but it stays public as an escape hatch for unlisted endpoints.

use crate::error::HttpError;
use crate::http::retry::{RetryConfig, RetryPolicy};

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Certificate, Method};
use serde_json::Value;
use std::thread;
use std::time::Duration;

/// Placeholder substituted for the authorization value in request logs.
pub const REDACTED: &str = "**REDACTED**";

/// Blocking HTTP transport for the eLabFTW REST API.
pub struct ElabHttp {
    base_url: String,
    /// The API key. NEVER logged in cleartext.
    api_key: String,
    client: Client,
    page_size: u32,
    retry: RetryPolicy,
}

impl ElabHttp {
    /// Build the transport.
    ///
    /// With a PEM `ca_bundle` the underlying client verifies against the
    /// system roots plus the supplied certificates. Without one,
    /// certificate verification is disabled — an accepted operational
    /// trade-off for instances behind self-signed certificates.
    pub fn new(
        base_url: &str,
        api_key: &str,
        ca_bundle: Option<&str>,
        page_size: u32,
        retry: RetryPolicy,
    ) -> Result<Self, HttpError> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(10);

        match ca_bundle {
            Some(pem) => {
                for cert in Certificate::from_pem_bundle(pem.as_bytes())? {
                    builder = builder.add_root_certificate(cert);
                }
            }
            None => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client: builder.build()?,
            page_size,
            retry,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Records per page when fetching with [`PageLimit::All`](crate::http::PageLimit).
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Perform one logical API call.
    ///
    /// The configured API key is injected as the `Authorization` header
    /// unless the caller already supplied one — in that case the
    /// caller's value wins and a warning is emitted. Transient failures
    /// are retried per the configured [`RetryPolicy`]; terminal statuses
    /// map to [`HttpError`] variants without retry.
    pub fn send(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(String, String)],
        headers: HeaderMap,
        body: Option<&Value>,
    ) -> Result<Response, HttpError> {
        let url = self.url_for(endpoint);
        let headers = self.with_credential(headers)?;

        tracing::debug!(
            method = %method,
            url = %url,
            query = ?query,
            headers = ?redacted(&headers),
            "sending request"
        );

        let config = match &self.retry {
            RetryPolicy::None => {
                return self.do_request(&method, &url, query, &headers, body);
            }
            RetryPolicy::Transient => RetryConfig::transient(),
            RetryPolicy::Custom(c) => c.clone(),
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_request(&method, &url, query, &headers, body) {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    let transient = match &e {
                        HttpError::ServerError { status, .. } => {
                            config.retryable_statuses.contains(status)
                        }
                        HttpError::Reqwest(re) => re.is_connect() || re.is_timeout(),
                        _ => false,
                    };

                    if transient && attempt < config.max_retries {
                        let delay = config.delay_for_attempt(attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max = config.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            "retrying request to {}",
                            url
                        );
                        thread::sleep(delay);
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    fn do_request(
        &self,
        method: &Method,
        url: &str,
        query: &[(String, String)],
        headers: &HeaderMap,
        body: Option<&Value>,
    ) -> Result<Response, HttpError> {
        let mut req = self
            .client
            .request(method.clone(), url)
            .headers(headers.clone());
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send()?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp);
        }

        let status_code = status.as_u16();
        let body_text = resp.text().unwrap_or_default();

        match status_code {
            401 => Err(HttpError::Unauthorized),
            404 => Err(HttpError::NotFound(body_text)),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }

    /// Inject the API key unless the caller brought their own credential.
    fn with_credential(&self, mut headers: HeaderMap) -> Result<HeaderMap, HttpError> {
        if headers.contains_key(AUTHORIZATION) {
            tracing::warn!("found an Authorization header in the request, so not overwriting");
            return Ok(headers);
        }
        let mut value =
            HeaderValue::from_str(&self.api_key).map_err(|_| HttpError::InvalidApiKey)?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }

    /// Join an endpoint onto the base URL. A leading slash would resolve
    /// back to the host root and drop the API prefix, so it is stripped.
    fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

/// Copy of `headers` safe to log: the authorization value is replaced by
/// a fixed placeholder.
fn redacted(headers: &HeaderMap) -> HeaderMap {
    let mut shown = headers.clone();
    if shown.contains_key(AUTHORIZATION) {
        shown.insert(AUTHORIZATION, HeaderValue::from_static(REDACTED));
    }
    shown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base_url: &str) -> ElabHttp {
        ElabHttp::new(base_url, "test-key", None, 50, RetryPolicy::None)
            .expect("transport should build")
    }

    #[test]
    fn test_url_join_strips_leading_slash() {
        let http = transport("https://elab.example.org/api/v2/");
        assert_eq!(
            http.url_for("/experiments"),
            "https://elab.example.org/api/v2/experiments"
        );
        assert_eq!(
            http.url_for("experiments/7"),
            "https://elab.example.org/api/v2/experiments/7"
        );
    }

    #[test]
    fn test_injects_key_when_absent() {
        let http = transport("https://elab.example.org/api/v2");
        let headers = http.with_credential(HeaderMap::new()).unwrap();
        let values: Vec<_> = headers
            .get_all(AUTHORIZATION)
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(values, vec!["test-key"]);
    }

    #[test]
    fn test_caller_credential_wins() {
        let http = transport("https://elab.example.org/api/v2");
        let mut supplied = HeaderMap::new();
        supplied.insert(AUTHORIZATION, HeaderValue::from_static("caller-key"));
        let headers = http.with_credential(supplied).unwrap();
        let values: Vec<_> = headers
            .get_all(AUTHORIZATION)
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(values, vec!["caller-key"]);
    }

    #[test]
    fn test_redacted_headers_hide_the_key() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("test-key"));
        let shown = redacted(&headers);
        assert_eq!(shown.get(AUTHORIZATION).unwrap().to_str().unwrap(), REDACTED);
        assert!(!format!("{shown:?}").contains("test-key"));
    }
}
