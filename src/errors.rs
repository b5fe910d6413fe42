use thiserror::Error;

// Re-export a simple Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

use std::fmt;

/// Which write operation against the data port failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    Create,
    Update,
    Reschedule,
    Close,
    Cancel,
}

impl fmt::Display for WriteOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteOp::Create => write!(f, "create"),
            WriteOp::Update => write!(f, "update"),
            WriteOp::Reschedule => write!(f, "reschedule"),
            WriteOp::Close => write!(f, "close"),
            WriteOp::Cancel => write!(f, "cancel"),
        }
    }
}

/// Domain-specific error set for the scheduling core.
#[derive(Error, Debug)]
pub enum Error {
    // ---- Data port ----------------------------------------------------------
    /// Network/server failure while loading a range of bookings or an
    /// occupancy snapshot. Surfaced as a retryable error state; never fatal.
    #[error("Range fetch failed: {0}")]
    RangeFetch(String),

    /// A create/update/reschedule/close/cancel failed. The active form stays
    /// open and populated; the message is shown to the user.
    #[error("Booking {op} failed: {message}")]
    Write { op: WriteOp, message: String },

    // ---- Scheduling / Domain -----------------------------------------------
    /// Referenced a booking id that is not in the currently loaded range.
    #[error("Booking '{0}' not found in the loaded range.")]
    UnknownBooking(String),

    /// An interaction method was called in a state that does not allow it
    /// (e.g. submitting with no open form).
    #[error("Invalid interaction: {0}")]
    Interaction(String),

    /// Generic parse problem (config values, seed files, CLI flags).
    #[error("Parse error: {0}")]
    Parse(String),

    // ---- Config -------------------------------------------------------------
    /// Any issue initializing/reading config (file missing, invalid JSON, etc.)
    #[error("Config error: {0}")]
    Config(String),

    // ---- Plumbing / Wrappers ------------------------------------------------
    /// IO passthrough (seed files, log files, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serde JSON passthrough (config/seed decode, cache params, etc.)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ----------------------- Convenience constructors ----------------------------

impl Error {
    pub fn range_fetch<S: Into<String>>(msg: S) -> Self {
        Error::RangeFetch(msg.into())
    }

    pub fn write<S: Into<String>>(op: WriteOp, msg: S) -> Self {
        Error::Write {
            op,
            message: msg.into(),
        }
    }

    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Error::Parse(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    pub fn interaction<S: Into<String>>(msg: S) -> Self {
        Error::Interaction(msg.into())
    }
}
