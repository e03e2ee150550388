//! High-level connector facade.
//!
//! Binds the own-station [`MessageFactory`] to the [`HoppieApi`] transport
//! and exposes one method per service operation. Inbound peek/poll entries
//! that fail typed parsing are skipped with a warning rather than failing
//! the whole call; envelope framing errors and service-reported errors do
//! fail the call.

use std::time::Duration;

use hoppielink_models::{
    AcarsMessage, AdscPositionReport, CpdlcPayload, MessageFactory, PingPayload, ProgressPayload,
};
use tracing::warn;

use crate::api::{HoppieApi, DEFAULT_URL};
use crate::error::ClientError;
use crate::response::{self, ServiceResponse};

/// Connector for interacting with a Hoppie-style ACARS service.
///
/// All operations return the measured response delay alongside their
/// result, mirroring the service's delay-sensitive polling etiquette.
#[derive(Debug, Clone)]
pub struct HoppieConnector {
    factory: MessageFactory,
    api: HoppieApi,
}

impl HoppieConnector {
    /// Create a connector for `station` against the default endpoint.
    ///
    /// The station name must be a valid ICAO flight number or short org
    /// code; `logon` is the service's plain logon code.
    pub fn new(station: &str, logon: &str) -> Result<Self, ClientError> {
        Self::with_url(station, logon, DEFAULT_URL)
    }

    /// Create a connector against a custom endpoint URL.
    pub fn with_url(station: &str, logon: &str, url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            factory: MessageFactory::new(station)?,
            api: HoppieApi::with_url(logon, url),
        })
    }

    /// The message factory bound to this connector's station.
    pub fn factory(&self) -> &MessageFactory {
        &self.factory
    }

    async fn connect(&self, message: &AcarsMessage) -> Result<(Vec<String>, Duration), ClientError> {
        match self.api.connect(message).await? {
            (ServiceResponse::Success { data }, delay) => Ok((data, delay)),
            (ServiceResponse::Error { reason }, _) => Err(ClientError::Server { reason }),
        }
    }

    async fn send(&self, message: &AcarsMessage) -> Result<Duration, ClientError> {
        let (_, delay) = self.connect(message).await?;
        Ok(delay)
    }

    /// Peek all messages destined to the own station.
    ///
    /// Peeked messages are not marked as relayed and the own station does
    /// not appear as online; the server keeps up to 24 hours of history.
    /// Entries that fail typed parsing are skipped with a warning.
    pub async fn peek(&self) -> Result<(Vec<(u64, AcarsMessage)>, Duration), ClientError> {
        let (data, delay) = self.connect(&self.factory.peek()).await?;
        let mut messages = Vec::new();
        for (id, record) in response::peek_records(&data)? {
            match self.factory.from_record(&record) {
                Ok(message) => messages.push((id, message)),
                Err(err) => {
                    warn!(%err, id, from = %record.from, msg_type = %record.msg_type,
                        "unable to parse peeked entry, skipping");
                }
            }
        }
        Ok((messages, delay))
    }

    /// Poll for new messages destined to the own station, marking them as
    /// relayed.
    ///
    /// Polling makes the own station appear as online; previously relayed
    /// messages do not reappear. Entries that fail typed parsing are
    /// skipped with a warning.
    pub async fn poll(&self) -> Result<(Vec<AcarsMessage>, Duration), ClientError> {
        let (data, delay) = self.connect(&self.factory.poll()).await?;
        let mut messages = Vec::new();
        for record in response::poll_records(&data)? {
            match self.factory.from_record(&record) {
                Ok(message) => messages.push(message),
                Err(err) => {
                    warn!(%err, from = %record.from, msg_type = %record.msg_type,
                        "unable to parse polled entry, skipping");
                }
            }
        }
        Ok((messages, delay))
    }

    /// Check station online status.
    ///
    /// Use [`PingPayload::All`] to list every online station; an empty
    /// station list serves as a bare connection check.
    pub async fn ping(
        &self,
        target: PingPayload,
    ) -> Result<(Vec<String>, Duration), ClientError> {
        let (data, delay) = self.connect(&self.factory.ping(target)).await?;
        Ok((response::ping_stations(&data), delay))
    }

    /// Send a free-text message (max 220 characters) to `to`.
    pub async fn send_telex(&self, to: &str, text: &str) -> Result<Duration, ClientError> {
        self.send(&self.factory.telex(to, text)?).await
    }

    /// Send an OOOI progress report to `to`.
    pub async fn send_progress(
        &self,
        to: &str,
        progress: ProgressPayload,
    ) -> Result<Duration, ClientError> {
        self.send(&self.factory.progress(to, progress)?).await
    }

    /// Send a free-text position report to `to`.
    pub async fn send_position(&self, to: &str, text: &str) -> Result<Duration, ClientError> {
        self.send(&self.factory.position(to, text)?).await
    }

    /// Send a CPDLC message to `to`.
    pub async fn send_cpdlc(
        &self,
        to: &str,
        cpdlc: CpdlcPayload,
    ) -> Result<Duration, ClientError> {
        self.send(&self.factory.cpdlc(to, cpdlc)?).await
    }

    /// Request a periodic ADS-C contract from `to` with the given reporting
    /// interval in seconds.
    pub async fn send_adsc_contract_request(
        &self,
        to: &str,
        interval: u32,
    ) -> Result<Duration, ClientError> {
        self.send(&self.factory.adsc_contract_request(to, interval)?)
            .await
    }

    /// Cancel the periodic ADS-C contract with `to`.
    pub async fn send_adsc_contract_cancel(&self, to: &str) -> Result<Duration, ClientError> {
        self.send(&self.factory.adsc_contract_cancel(to)?).await
    }

    /// Send a periodic ADS-C position report to `to`.
    pub async fn send_adsc_report(
        &self,
        to: &str,
        report: AdscPositionReport,
    ) -> Result<Duration, ClientError> {
        self.send(&self.factory.adsc_report(to, report)?).await
    }
}
