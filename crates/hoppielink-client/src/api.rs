//! Thin HTTP wrapper around the service's `connect` endpoint.
//!
//! One GET per call, carrying the logon code and the rendered message as
//! query parameters. The round-trip delay is measured and handed back to
//! the caller together with the parsed response envelope; there is no
//! retry, backoff, or authentication beyond the logon code.

use std::time::{Duration, Instant};

use hoppielink_models::AcarsMessage;
use tracing::debug;

use crate::error::ClientError;
use crate::response::ServiceResponse;

/// Default service endpoint (Hoppie's ACARS network).
pub const DEFAULT_URL: &str = "https://www.hoppie.nl/acars/system/connect.html";

/// HTTP client for the service's `connect` endpoint.
#[derive(Debug, Clone)]
pub struct HoppieApi {
    logon: String,
    url: String,
    http: reqwest::Client,
}

impl HoppieApi {
    /// Create an API client against the default endpoint.
    pub fn new(logon: &str) -> Self {
        Self::with_url(logon, DEFAULT_URL)
    }

    /// Create an API client against a custom endpoint URL.
    pub fn with_url(logon: &str, url: &str) -> Self {
        Self {
            logon: logon.to_string(),
            url: url.to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Send one message and return the parsed response envelope together
    /// with the measured round-trip delay.
    pub async fn connect(
        &self,
        message: &AcarsMessage,
    ) -> Result<(ServiceResponse, Duration), ClientError> {
        let msg_type = message.message_type().to_string();
        let packet = message.packet();
        let started = Instant::now();
        let body = self
            .http
            .get(&self.url)
            .query(&[
                ("logon", self.logon.as_str()),
                ("from", message.from.as_str()),
                ("to", message.to.as_str()),
                ("type", msg_type.as_str()),
                ("packet", packet.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let delay = started.elapsed();
        debug!(
            %msg_type,
            to = %message.to,
            delay_ms = delay.as_millis(),
            "connect round trip"
        );
        Ok((ServiceResponse::parse(&body)?, delay))
    }
}
