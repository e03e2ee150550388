#![deny(missing_docs)]

//! # Hoppielink Client
//!
//! Connector and HTTP API client for Hoppie-style ACARS datalink services.
//!
//! The crate provides:
//!
//! * [`HoppieConnector`] — high-level facade: peek/poll/ping and the
//!   per-kind send operations, with warn-and-skip handling of unparseable
//!   inbound entries.
//! * [`HoppieApi`] — one GET per call against the service's `connect`
//!   endpoint, returning the parsed envelope and the measured delay.
//! * [`ServiceResponse`] — the `ok`/`error` response envelope and its
//!   brace-delimited data section.
//! * [`ClientError`] — unified error type for all client operations.
//!
//! Message types come from [`hoppielink_models`], re-exported here for
//! convenience. The crate emits [`tracing`] diagnostics but installs no
//! subscriber.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use hoppielink_client::HoppieConnector;
//!
//! # async fn run() -> Result<(), hoppielink_client::ClientError> {
//! let connector = HoppieConnector::new("DLH123", "my-logon-code")?;
//!
//! let delay = connector.send_telex("EDDF", "REQUEST DESCENT").await?;
//! println!("accepted after {delay:?}");
//!
//! for message in connector.poll().await?.0 {
//!     println!("{message}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod connector;
pub mod error;
pub mod response;

pub use api::{HoppieApi, DEFAULT_URL};
pub use connector::HoppieConnector;
pub use error::ClientError;
pub use response::ServiceResponse;

// Re-export the message model for ergonomic usage.
pub use hoppielink_models as models;
