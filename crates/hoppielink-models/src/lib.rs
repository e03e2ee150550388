#![deny(missing_docs)]

//! # Hoppielink Models
//!
//! Typed message model and packet grammar for Hoppie-style ACARS datalink
//! services. Everything here is pure and synchronous: parsing and rendering
//! are functions of their input with no I/O and no shared mutable state, so
//! the types can be used freely across threads.
//!
//! ## Message hierarchy
//!
//! ```text
//! AcarsMessage { from, to, payload }
//! └── Payload
//!     ├── Telex(TelexPayload)            free text, ≤220 chars
//!     ├── Progress(ProgressPayload)      OOOI movement times
//!     ├── Position(PositionPayload)      free-text position report
//!     ├── Cpdlc(CpdlcPayload)            /data2/… dialogue element
//!     ├── Adsc(AdscPayload)
//!     │   ├── PeriodicContractRequest    REQUEST PERIODIC <n>
//!     │   ├── PeriodicContractCancellation   REPORT CANCEL
//!     │   └── PeriodicReport             REPORT <cs> <hhmmss> <lat> <lon> <alt>
//!     ├── Poll / Peek                    control requests, empty body
//!     └── Ping(PingPayload)              station status check
//! ```
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`fields`] | Validated token newtypes (callsigns, coordinates, times) |
//! | [`message`] | `AcarsMessage`, `Payload`, wire type tags, inbound records |
//! | [`adsc`] | ADS-C contract/report payloads |
//! | [`cpdlc`] | CPDLC payload and response attributes |
//! | [`progress`] | OOOI progress payload |
//! | [`parse`] | Keyword + arity packet-body parsers (committed dispatch) |
//! | [`factory`] | Own-station-bound construction and `from_record` |
//! | [`error`] | `ParseError`: unknown format vs. field validation |
//!
//! Every message round-trips: rendering via `packet()` and re-parsing via
//! [`parse::parse_packet`] recovers an equal typed message.

pub mod adsc;
pub mod cpdlc;
pub mod error;
pub mod factory;
pub mod fields;
pub mod message;
pub mod parse;
pub mod progress;

// Re-export all public types at crate root for convenience.
pub use adsc::*;
pub use cpdlc::*;
pub use error::*;
pub use factory::*;
pub use fields::*;
pub use message::*;
pub use progress::*;
