use chrono::{Duration, NaiveDateTime};
use serde::Deserialize;

use crate::core::cache::QueryCache;

/// Notification types that touch booking-derived queries.
const BOOKING_PREFIX: &str = "booking.";

/// Cache tags refreshed when a booking notification arrives.
const BOOKING_TAGS: [&str; 3] = ["agenda", "bookings", "bay-occupancy"];

/// Typed shape of a push notification. Anything else on the wire is noise.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PushEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Parse a raw channel frame. Malformed JSON or a missing/empty `type`
/// yields `None`; the caller drops the frame without invalidating anything.
pub fn parse_push_message(raw: &str) -> Option<PushEnvelope> {
    let envelope: PushEnvelope = serde_json::from_str(raw).ok()?;
    if envelope.kind.is_empty() {
        return None;
    }
    Some(envelope)
}

/// Routes push notifications into explicit cache invalidations. One message
/// invalidates each booking tag at most once, so a burst of identical frames
/// cannot amplify into an invalidation storm.
#[derive(Debug, Default)]
pub struct InvalidationRouter;

impl InvalidationRouter {
    pub fn new() -> Self {
        Self
    }

    /// Handle one raw frame. Returns the tags invalidated (empty for
    /// non-booking or malformed messages).
    pub fn route(&self, raw: &str, cache: &mut QueryCache) -> Vec<&'static str> {
        let Some(envelope) = parse_push_message(raw) else {
            return Vec::new();
        };
        if !envelope.kind.starts_with(BOOKING_PREFIX) {
            return Vec::new();
        }
        for tag in BOOKING_TAGS {
            cache.invalidate(tag);
        }
        BOOKING_TAGS.to_vec()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChannelState {
    Connected,
    AwaitingRetry { retry_at: NaiveDateTime },
}

/// Reconnect bookkeeping for the push channel. Loss of the connection is
/// silent: the next attempt is scheduled a fixed backoff later and nothing
/// is surfaced to the user.
#[derive(Debug)]
pub struct ReconnectPolicy {
    backoff: Duration,
    state: ChannelState,
}

impl ReconnectPolicy {
    pub fn new(backoff_secs: u64) -> Self {
        Self {
            backoff: Duration::seconds(backoff_secs as i64),
            state: ChannelState::Connected,
        }
    }

    pub fn on_connected(&mut self) {
        self.state = ChannelState::Connected;
    }

    /// Record a connection loss; returns when the next attempt is due.
    pub fn on_connection_lost(&mut self, now: NaiveDateTime) -> NaiveDateTime {
        let retry_at = now + self.backoff;
        self.state = ChannelState::AwaitingRetry { retry_at };
        retry_at
    }

    /// Whether a reconnect attempt should run at `now`.
    pub fn retry_due(&self, now: NaiveDateTime) -> bool {
        match self.state {
            ChannelState::Connected => false,
            ChannelState::AwaitingRetry { retry_at } => now >= retry_at,
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.state, ChannelState::Connected)
    }
}
