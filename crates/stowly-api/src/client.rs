// Rental platform HTTP client
//
// Wraps `reqwest::Client` with platform-specific URL construction and
// response decoding. All endpoint modules (storage, bookings, payments,
// customer) are implemented as inherent methods via separate files to keep
// this module focused on transport mechanics.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Raw HTTP client for the Stowly backend API.
///
/// The backend speaks plain JSON: 2xx responses carry the payload directly,
/// non-2xx responses carry a `{ "message": ... }` body whose text is
/// preserved verbatim for the user. All methods return decoded payloads --
/// status handling happens here, before the caller sees anything.
pub struct PlatformClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PlatformClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// The `base_url` should be the API root (e.g. `https://api.stowly.fr`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// Used by tests and by callers that already hold a configured client.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an API path relative to the base.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let full = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&full)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON payload.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        self.parse_response(resp).await
    }

    /// Send a POST request with JSON body and decode the JSON payload.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        self.parse_response(resp).await
    }

    /// Send a POST to an absolute URL outside the platform base.
    ///
    /// The payment gateway hands back its own session-init URL; it is
    /// called verbatim, never rebased onto `base_url`.
    pub(crate) async fn post_absolute<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("POST {} (absolute)", url);

        let resp = self.http.post(url).send().await.map_err(Error::Transport)?;
        self.parse_response(resp).await
    }

    /// Decode a response: 2xx → payload, non-2xx → typed error.
    ///
    /// 401 becomes `Authentication`; 400/409/422 are business rejections
    /// whose server message passes through verbatim; everything else is a
    /// generic `Api` error carrying the status.
    async fn parse_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body,
            });
        }

        let message = extract_message(&body).unwrap_or_else(|| status.to_string());

        match status.as_u16() {
            401 => Err(Error::Authentication { message }),
            400 | 409 | 422 => Err(Error::Rejected { message }),
            code => Err(Error::Api {
                message,
                status: code,
            }),
        }
    }
}

/// Pull the `message` field out of an error body, tolerating non-JSON.
fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_message_reads_json_field() {
        assert_eq!(
            extract_message(r#"{"message":"Box 12 n'est plus disponible"}"#).as_deref(),
            Some("Box 12 n'est plus disponible")
        );
    }

    #[test]
    fn extract_message_tolerates_plain_text() {
        assert_eq!(extract_message("Bad Gateway"), None);
    }
}
