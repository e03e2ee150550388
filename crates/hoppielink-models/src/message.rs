//! ACARS message envelope and payload variants.
//!
//! An [`AcarsMessage`] pairs the station routing (`from` → `to`) with a
//! [`Payload`], a closed sum over every message kind the service knows.
//! Each payload owns its canonical packet-body rendering; the inverse
//! parsers live in [`crate::parse`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::adsc::AdscPayload;
use crate::cpdlc::CpdlcPayload;
use crate::error::ParseError;
use crate::fields::Callsign;
use crate::progress::ProgressPayload;

// ---------------------------------------------------------------------------
// MessageType
// ---------------------------------------------------------------------------

/// The wire type tag accompanying every packet (`type=` parameter and the
/// tag inside peek/poll response entries).
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// Free-text message.
    Telex,
    /// OOOI progress report.
    Progress,
    /// Free-text position report.
    Position,
    /// Controller–pilot datalink message.
    Cpdlc,
    /// ADS-C contract management and periodic reports.
    #[strum(serialize = "ads-c")]
    #[serde(rename = "ads-c")]
    AdsC,
    /// Fetch-and-mark-relayed control request.
    Poll,
    /// Fetch-without-marking control request.
    Peek,
    /// Station online-status check.
    Ping,
}

// ---------------------------------------------------------------------------
// TelexPayload
// ---------------------------------------------------------------------------

/// A free-text message, limited to the ACARS maximum of 220 characters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct TelexPayload {
    text: String,
}

impl TelexPayload {
    /// Maximum telex length in characters.
    pub const MAX_LEN: usize = 220;

    /// Create a telex payload, rejecting over-length text.
    pub fn new(text: &str) -> Result<Self, ParseError> {
        if text.chars().count() > Self::MAX_LEN {
            return Err(ParseError::invalid(
                "telex text",
                text,
                "exceeds the 220 character ACARS limit",
            ));
        }
        Ok(Self {
            text: text.to_string(),
        })
    }

    /// The message text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Render the packet body (the text itself).
    pub fn packet(&self) -> String {
        self.text.clone()
    }
}

// ---------------------------------------------------------------------------
// PositionPayload
// ---------------------------------------------------------------------------

/// A free-text position report payload.
///
/// Unlike ADS-C reports the content is not machine-structured; it is carried
/// verbatim.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionPayload {
    /// The position report text.
    pub text: String,
}

impl PositionPayload {
    /// Create a position payload from its text.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }

    /// Render the packet body (the text itself).
    pub fn packet(&self) -> String {
        self.text.clone()
    }
}

// ---------------------------------------------------------------------------
// PingPayload
// ---------------------------------------------------------------------------

/// The payload of a `ping` request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(tag = "type", content = "data")]
pub enum PingPayload {
    /// Query every currently online station (`*`).
    All,
    /// Query the given stations; empty serves as a bare connection check.
    Stations(Vec<Callsign>),
}

impl PingPayload {
    /// Render the packet body: `*`, or the stations joined by spaces.
    pub fn packet(&self) -> String {
        match self {
            PingPayload::All => "*".to_string(),
            PingPayload::Stations(stations) => stations
                .iter()
                .map(Callsign::as_str)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// The payload of an [`AcarsMessage`] — a closed sum over every message
/// kind.
///
/// Adding a new kind is a compile-time-checked exercise: the dispatcher in
/// [`crate::parse`] and every consumer match exhaustively.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum Payload {
    /// Free text.
    Telex(TelexPayload),
    /// OOOI progress report.
    Progress(ProgressPayload),
    /// Free-text position report.
    Position(PositionPayload),
    /// Controller–pilot datalink message.
    Cpdlc(CpdlcPayload),
    /// ADS-C contract request/cancellation/report.
    Adsc(AdscPayload),
    /// Poll control request (empty body).
    Poll,
    /// Peek control request (empty body).
    Peek,
    /// Station online-status check.
    Ping(PingPayload),
}

impl Payload {
    /// The wire type tag for this payload.
    pub fn message_type(&self) -> MessageType {
        match self {
            Payload::Telex(_) => MessageType::Telex,
            Payload::Progress(_) => MessageType::Progress,
            Payload::Position(_) => MessageType::Position,
            Payload::Cpdlc(_) => MessageType::Cpdlc,
            Payload::Adsc(_) => MessageType::AdsC,
            Payload::Poll => MessageType::Poll,
            Payload::Peek => MessageType::Peek,
            Payload::Ping(_) => MessageType::Ping,
        }
    }

    /// Render the canonical packet body for this payload.
    ///
    /// Rendering is deterministic: two renderings of equal payloads produce
    /// identical strings.
    pub fn packet(&self) -> String {
        match self {
            Payload::Telex(telex) => telex.packet(),
            Payload::Progress(progress) => progress.packet(),
            Payload::Position(position) => position.packet(),
            Payload::Cpdlc(cpdlc) => cpdlc.packet(),
            Payload::Adsc(adsc) => adsc.packet(),
            Payload::Poll | Payload::Peek => String::new(),
            Payload::Ping(ping) => ping.packet(),
        }
    }
}

// ---------------------------------------------------------------------------
// AcarsMessage
// ---------------------------------------------------------------------------

/// A single station-to-station ACARS message.
///
/// Immutable value object: constructed once by the parser or the factory,
/// handed to the transport, then discarded.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AcarsMessage {
    /// Sending station.
    pub from: Callsign,
    /// Receiving station.
    pub to: Callsign,
    /// The typed message content.
    pub payload: Payload,
}

impl AcarsMessage {
    /// Assemble a message from routing and payload.
    pub fn new(from: Callsign, to: Callsign, payload: Payload) -> Self {
        Self { from, to, payload }
    }

    /// The wire type tag of this message.
    pub fn message_type(&self) -> MessageType {
        self.payload.message_type()
    }

    /// Render the packet body for transport.
    pub fn packet(&self) -> String {
        self.payload.packet()
    }
}

impl fmt::Display for AcarsMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} [{}] {}",
            self.from,
            self.to,
            self.message_type(),
            self.packet()
        )
    }
}

// ---------------------------------------------------------------------------
// InboundRecord
// ---------------------------------------------------------------------------

/// A structured inbound record as delivered by the transport layer
/// (one peek/poll response entry), before typed parsing.
///
/// Field values are raw strings on purpose: a record with an unknown type
/// tag or a malformed packet must survive envelope parsing so the caller
/// can decide to warn-and-skip per entry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InboundRecord {
    /// Sending station, unvalidated.
    pub from: String,
    /// Receiving station; `None` means "own station" (poll/peek entries do
    /// not repeat it).
    pub to: Option<String>,
    /// Raw wire type tag.
    pub msg_type: String,
    /// Raw packet body.
    pub packet: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
