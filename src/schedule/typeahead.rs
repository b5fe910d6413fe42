use chrono::{Duration, NaiveDateTime};

/// Default debounce for lookup typeahead input.
const DEBOUNCE_MILLIS: i64 = 250;

/// A debounced search request, ready to hand to the data port. The token is
/// the staleness guard: only a completion carrying the latest token is
/// accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub token: u64,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingQuery {
    query: String,
    due_at: NaiveDateTime,
}

/// Explicit debounce state for autocomplete inputs.
///
/// Every keystroke replaces the pending query and restarts the timer, so at
/// most one request is outstanding per input; responses for superseded
/// tickets are discarded by token, mirroring the grid's last-range-wins
/// rule.
#[derive(Debug)]
pub struct DebouncedSearch {
    delay: Duration,
    pending: Option<PendingQuery>,
    next_token: u64,
    in_flight: Option<u64>,
}

impl DebouncedSearch {
    pub fn new() -> Self {
        Self::with_delay(Duration::milliseconds(DEBOUNCE_MILLIS))
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            next_token: 0,
            in_flight: None,
        }
    }

    /// Record a keystroke. Any previously pending query is dropped and the
    /// timer restarts from `now`.
    pub fn input(&mut self, query: impl Into<String>, now: NaiveDateTime) {
        self.pending = Some(PendingQuery {
            query: query.into(),
            due_at: now + self.delay,
        });
    }

    /// Clear the pending query without firing (input blurred or cleared).
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// If the debounce window has elapsed, take the pending query as a
    /// ticketed request. The returned ticket supersedes any earlier one.
    pub fn due(&mut self, now: NaiveDateTime) -> Option<SearchTicket> {
        let pending = self.pending.as_ref()?;
        if now < pending.due_at {
            return None;
        }
        let query = self
            .pending
            .take()
            .map(|p| p.query)
            .unwrap_or_default();
        self.next_token += 1;
        self.in_flight = Some(self.next_token);
        Some(SearchTicket {
            token: self.next_token,
            query,
        })
    }

    /// Whether a completed request is still current. Stale completions
    /// return false and must be dropped by the caller.
    pub fn accept(&mut self, token: u64) -> bool {
        if self.in_flight == Some(token) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for DebouncedSearch {
    fn default() -> Self {
        Self::new()
    }
}
