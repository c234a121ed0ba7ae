//! Shared HTTP plumbing for *arr-style APIs.
//!
//! Radarr and Sonarr expose structurally identical v3 APIs: an API-key
//! header, a full-catalog GET, a free-text lookup GET, and a JSON POST to
//! add an entry. This client carries the pieces common to both.

use std::time::Duration;

use serde::de::DeserializeOwned;

use importarr_lib::SyncError;

const API_KEY_HEADER: &str = "X-Api-Key";

/// Thin reqwest wrapper carrying the base URL, API key, and per-request
/// timeout for one backend instance.
#[derive(Debug, Clone)]
pub struct ArrClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ArrClient {
    /// Build a client for one backend. A trailing slash on `base_url` is
    /// tolerated.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, SyncError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SyncError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// GET `path` and return the raw response. Transport errors are mapped
    /// into the sync taxonomy (timeout vs unreachable); status handling is
    /// the caller's business since lookup and snapshot treat it differently.
    pub async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<reqwest::Response, SyncError> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {url}");
        self.http
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(query)
            .send()
            .await
            .map_err(map_transport_error)
    }

    /// GET `path`, require a success status, and deserialize the JSON body.
    /// Used for the catalog snapshot, where any non-success is fatal.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SyncError> {
        let resp = self.get(path, &[]).await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SyncError::unreachable(format!(
                "{}{} returned HTTP {}",
                self.base_url, path, status
            )));
        }
        resp.json::<T>()
            .await
            .map_err(|e| SyncError::unreachable(format!("Malformed response body: {e}")))
    }

    /// POST a JSON body to `path` and return the raw response.
    pub async fn post_json<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, SyncError> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("POST {url}");
        self.http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)
    }
}

/// Map a reqwest transport error into the sync taxonomy.
fn map_transport_error(e: reqwest::Error) -> SyncError {
    if e.is_timeout() {
        SyncError::TimedOut
    } else {
        SyncError::unreachable(e.to_string())
    }
}

/// Extract a human-readable rejection reason from an error response body.
///
/// Sonarr wraps errors as `{"message": "..."}`; Radarr validation failures
/// come back as an array of `{"errorMessage": "..."}` objects. Anything
/// else is returned verbatim, or the status when the body is empty.
pub fn rejection_reason(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = value.get("message").and_then(|m| m.as_str()) {
            return msg.to_string();
        }
        if let Some(items) = value.as_array() {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|i| i.get("errorMessage").and_then(|m| m.as_str()))
                .collect();
            if !msgs.is_empty() {
                return msgs.join("; ");
            }
        }
    }
    if body.trim().is_empty() {
        format!("HTTP {status}")
    } else {
        body.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_rejection_reason_structured_message() {
        let body = r#"{"message": "Series path already configured"}"#;
        assert_eq!(
            rejection_reason(StatusCode::BAD_REQUEST, body),
            "Series path already configured"
        );
    }

    #[test]
    fn test_rejection_reason_validation_array() {
        let body = r#"[{"propertyName":"tmdbId","errorMessage":"already exists"},
                       {"propertyName":"path","errorMessage":"invalid path"}]"#;
        assert_eq!(
            rejection_reason(StatusCode::BAD_REQUEST, body),
            "already exists; invalid path"
        );
    }

    #[test]
    fn test_rejection_reason_raw_body_fallback() {
        assert_eq!(
            rejection_reason(StatusCode::INTERNAL_SERVER_ERROR, "server exploded"),
            "server exploded"
        );
    }

    #[test]
    fn test_rejection_reason_empty_body_reports_status() {
        assert_eq!(
            rejection_reason(StatusCode::BAD_GATEWAY, ""),
            "HTTP 502 Bad Gateway"
        );
    }
}
