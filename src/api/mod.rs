//! Lightweight HTTP client for the platform API.
//!
//! Uses ureq instead of a heavy async HTTP stack; every pipeline step is a
//! sequential blocking round-trip anyway. Upstream failures are always JSON
//! `{ "error": string }` with the HTTP status carrying the kind, so the
//! mapping lives in one place here.

pub mod wire;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::core::error::{SdkError, SdkResult};

pub struct ApiClient {
    base_url: String,
    agent: ureq::Agent,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .build();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn post_json<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> SdkResult<R> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "POST");
        let result = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_json(body);
        Self::handle(result)
    }

    pub fn get_json<R: DeserializeOwned>(&self, path_and_query: &str) -> SdkResult<R> {
        let url = format!("{}{}", self.base_url, path_and_query);
        debug!(url = %url, "GET");
        Self::handle(self.agent.get(&url).call())
    }

    /// Multipart file upload with a single part. ureq has no multipart
    /// helper, so the body is framed by hand; the format is small and fixed.
    pub fn post_multipart<R: DeserializeOwned>(
        &self,
        path: &str,
        field: &str,
        filename: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> SdkResult<R> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, size = bytes.len(), content_type, "POST multipart");

        let boundary = format!("curvepad-{:016x}", rand_boundary());
        let mut body = Vec::with_capacity(bytes.len() + 256);
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let result = self
            .agent
            .post(&url)
            .set(
                "Content-Type",
                &format!("multipart/form-data; boundary={boundary}"),
            )
            .send_bytes(&body);
        Self::handle(result)
    }

    fn handle<R: DeserializeOwned>(result: Result<ureq::Response, ureq::Error>) -> SdkResult<R> {
        match result {
            Ok(response) => response
                .into_json()
                .map_err(|e| SdkError::Wire(format!("response body failed to parse: {e}"))),
            Err(ureq::Error::Status(status, response)) => {
                let message = response
                    .into_json::<wire::ErrorBody>()
                    .map(|b| b.error)
                    .unwrap_or_else(|_| format!("HTTP {status}"));
                Err(map_status(status, message))
            }
            Err(ureq::Error::Transport(e)) => Err(SdkError::Transport(e.to_string())),
        }
    }
}

/// There is no machine-readable error-kind field on the wire, so callers
/// pattern-match on status code plus message.
pub fn map_status(status: u16, message: String) -> SdkError {
    match status {
        400 => SdkError::Validation(message),
        404 => SdkError::NotFound(message),
        409 => SdkError::Conflict(message),
        _ => SdkError::Upstream { status, message },
    }
}

fn rand_boundary() -> u64 {
    // Uniqueness within a process is all the boundary needs.
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as u64)
        .unwrap_or(0);
    let addr = &nanos as *const u64 as u64;
    nanos.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ addr
}
