use std::collections::HashMap;

use serde::Serialize;

use crate::core::models::{Booking, OccupancyEntry};
use crate::core::types::LookupKind;
use crate::errors::Result;

/// Cache tag per query family. Tags are what invalidation prefixes match
/// against, mirroring the wire notification names (`booking.*` touches the
/// booking-derived tags).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Agenda,
    Bookings,
    Occupancy,
    Lookup(LookupKind),
}

impl QueryKind {
    pub fn tag(&self) -> String {
        match self {
            QueryKind::Agenda => "agenda".to_string(),
            QueryKind::Bookings => "bookings".to_string(),
            QueryKind::Occupancy => "bay-occupancy".to_string(),
            QueryKind::Lookup(kind) => format!("lookup.{kind}"),
        }
    }
}

/// Cache key: the query family plus a stable serialization of its params.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub kind: QueryKind,
    pub params: String,
}

impl QueryKey {
    pub fn new(kind: QueryKind, params: impl Into<String>) -> Self {
        Self {
            kind,
            params: params.into(),
        }
    }

    /// Key for a parameterized query; params are serialized to JSON so equal
    /// inputs always address the same entry.
    pub fn with_params<P: Serialize>(kind: QueryKind, params: &P) -> Result<Self> {
        Ok(Self {
            kind,
            params: serde_json::to_string(params)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CachedPayload {
    Agenda(Vec<Booking>),
    Occupancy(HashMap<String, OccupancyEntry>),
}

#[derive(Debug)]
struct CacheEntry {
    payload: CachedPayload,
    stale: bool,
}

/// Explicit query cache keyed by `(kind, params)`.
///
/// Invalidation is by tag prefix and only marks entries stale; consumers
/// re-fetch on their own cadence and overwrite the entry, so a push storm
/// never triggers fetches by itself.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, CacheEntry>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&mut self, key: QueryKey, payload: CachedPayload) {
        self.entries.insert(
            key,
            CacheEntry {
                payload,
                stale: false,
            },
        );
    }

    /// The cached payload, only while it is still fresh.
    pub fn fresh(&self, key: &QueryKey) -> Option<&CachedPayload> {
        self.entries
            .get(key)
            .filter(|e| !e.stale)
            .map(|e| &e.payload)
    }

    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.entries.get(key).map(|e| e.stale).unwrap_or(true)
    }

    /// Mark every entry whose kind tag starts with `prefix` as stale.
    /// Returns how many entries were newly invalidated.
    pub fn invalidate(&mut self, prefix: &str) -> usize {
        let mut touched = 0;
        for (key, entry) in self.entries.iter_mut() {
            if key.kind.tag().starts_with(prefix) && !entry.stale {
                entry.stale = true;
                touched += 1;
            }
        }
        touched
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
