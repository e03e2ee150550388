//! Own-station-bound message construction.
//!
//! A [`MessageFactory`] binds a fixed own-station identity so call sites do
//! not repeat the sender on every outbound message, and provides the single
//! entry point ([`MessageFactory::from_record`]) for reconstructing typed
//! messages from structured inbound records.

use crate::adsc::{AdscPayload, AdscPositionReport};
use crate::cpdlc::CpdlcPayload;
use crate::error::ParseError;
use crate::fields::Callsign;
use crate::message::{
    AcarsMessage, InboundRecord, MessageType, Payload, PingPayload, PositionPayload, TelexPayload,
};
use crate::parse;
use crate::progress::ProgressPayload;

/// The pseudo-station addressed by poll/peek/ping control requests.
pub const SERVER_CALLSIGN: &str = "SERVER";

/// Binds an own-station identity to message construction.
///
/// # Examples
///
/// ```
/// use hoppielink_models::MessageFactory;
///
/// let factory = MessageFactory::new("DLH123").unwrap();
/// let telex = factory.telex("EDDF", "REQUEST DESCENT").unwrap();
/// assert_eq!(telex.from.as_str(), "DLH123");
/// assert_eq!(telex.packet(), "REQUEST DESCENT");
/// ```
#[derive(Debug, Clone)]
pub struct MessageFactory {
    station: Callsign,
}

impl MessageFactory {
    /// Create a factory for the given own-station name.
    ///
    /// The name must be a valid ICAO flight number or short org code (see
    /// [`Callsign`]).
    pub fn new(station: &str) -> Result<Self, ParseError> {
        Ok(Self {
            station: station.parse()?,
        })
    }

    /// The bound own-station callsign.
    pub fn station(&self) -> &Callsign {
        &self.station
    }

    fn outbound(&self, to: &str, payload: Payload) -> Result<AcarsMessage, ParseError> {
        Ok(AcarsMessage::new(self.station.clone(), to.parse()?, payload))
    }

    fn control(&self, payload: Payload) -> AcarsMessage {
        AcarsMessage::new(
            self.station.clone(),
            Callsign::new(SERVER_CALLSIGN),
            payload,
        )
    }

    /// A free-text message to `to`.
    pub fn telex(&self, to: &str, text: &str) -> Result<AcarsMessage, ParseError> {
        self.outbound(to, Payload::Telex(TelexPayload::new(text)?))
    }

    /// An OOOI progress report to `to`.
    pub fn progress(&self, to: &str, progress: ProgressPayload) -> Result<AcarsMessage, ParseError> {
        self.outbound(to, Payload::Progress(progress))
    }

    /// A free-text position report to `to`.
    pub fn position(&self, to: &str, text: &str) -> Result<AcarsMessage, ParseError> {
        self.outbound(to, Payload::Position(PositionPayload::new(text)))
    }

    /// A CPDLC message to `to`.
    pub fn cpdlc(&self, to: &str, cpdlc: CpdlcPayload) -> Result<AcarsMessage, ParseError> {
        self.outbound(to, Payload::Cpdlc(cpdlc))
    }

    /// An ADS-C periodic contract request to `to` with the given reporting
    /// interval in seconds.
    pub fn adsc_contract_request(
        &self,
        to: &str,
        interval: u32,
    ) -> Result<AcarsMessage, ParseError> {
        if interval == 0 {
            return Err(ParseError::invalid(
                "reporting interval",
                "0",
                "must be a positive integer",
            ));
        }
        self.outbound(to, Payload::Adsc(AdscPayload::PeriodicContractRequest { interval }))
    }

    /// An ADS-C periodic contract cancellation to `to`.
    pub fn adsc_contract_cancel(&self, to: &str) -> Result<AcarsMessage, ParseError> {
        self.outbound(to, Payload::Adsc(AdscPayload::PeriodicContractCancellation))
    }

    /// An ADS-C periodic position report to `to`.
    pub fn adsc_report(
        &self,
        to: &str,
        report: AdscPositionReport,
    ) -> Result<AcarsMessage, ParseError> {
        self.outbound(to, Payload::Adsc(AdscPayload::PeriodicReport(report)))
    }

    /// A poll control request (fetch new messages, mark them relayed).
    pub fn poll(&self) -> AcarsMessage {
        self.control(Payload::Poll)
    }

    /// A peek control request (fetch message history without marking).
    pub fn peek(&self) -> AcarsMessage {
        self.control(Payload::Peek)
    }

    /// A ping control request for the given target set.
    pub fn ping(&self, target: PingPayload) -> AcarsMessage {
        self.control(Payload::Ping(target))
    }

    /// Reconstruct a typed message from a structured inbound record.
    ///
    /// The record's `to` field defaults to the own station when absent, as
    /// in poll/peek response entries. Delegates body parsing to
    /// [`crate::parse::parse_packet`].
    ///
    /// # Errors
    ///
    /// [`ParseError::UnknownFormat`] for an unrecognized type tag or body,
    /// [`ParseError::InvalidField`] for a matched grammar with bad fields —
    /// both recoverable, so callers can warn and skip per record.
    pub fn from_record(&self, record: &InboundRecord) -> Result<AcarsMessage, ParseError> {
        let msg_type: MessageType = record
            .msg_type
            .parse()
            .map_err(|_| ParseError::unknown(record.msg_type.as_str()))?;
        let to = record.to.as_deref().unwrap_or(self.station.as_str());
        parse::parse_packet(msg_type, &record.from, to, &record.packet)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
