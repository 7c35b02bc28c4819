//! Event Data Gateway boundary.
//!
//! The gateway is an external collaborator; this module owns the client for
//! its HTTP contract and the types that cross it:
//! - `types`: wire models (`EventResponse`, `Acknowledgement`, `Release`)
//! - `client`: request/response operations (fetch by id, acknowledgements,
//!   release, health probe)
//! - `feed`: the long-lived push subscription for all events

use std::fmt;

pub mod client;
pub mod feed;
pub mod types;

pub use client::GatewayClient;
pub use feed::{FeedEvent, FeedHandle};
pub use types::{Acknowledgement, Delivery, EmergencyEvent, EventResponse, Release};

/// Result alias for gateway operations.
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Error categories for gateway failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    /// Connection-level failure (DNS, refused, reset)
    Http,
    /// Non-success HTTP status (4xx, 5xx)
    Status,
    /// Request timed out
    Timeout,
    /// Response body could not be decoded
    Decode,
}

impl fmt::Display for GatewayErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayErrorKind::Http => write!(f, "http"),
            GatewayErrorKind::Status => write!(f, "status"),
            GatewayErrorKind::Timeout => write!(f, "timeout"),
            GatewayErrorKind::Decode => write!(f, "decode"),
        }
    }
}

/// Error from a gateway operation.
#[derive(Debug, Clone)]
pub struct GatewayError {
    /// Error category
    pub kind: GatewayErrorKind,
    /// One-line summary suitable for display
    pub message: String,
}

impl GatewayError {
    /// Creates a new gateway error.
    pub fn new(kind: GatewayErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates an HTTP status error.
    pub fn status(status: u16) -> Self {
        Self::new(GatewayErrorKind::Status, format!("HTTP {status}"))
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for GatewayError {}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::new(GatewayErrorKind::Timeout, "request timed out")
        } else if let Some(status) = err.status() {
            Self::status(status.as_u16())
        } else if err.is_decode() {
            Self::new(GatewayErrorKind::Decode, err.to_string())
        } else {
            Self::new(GatewayErrorKind::Http, err.to_string())
        }
    }
}
