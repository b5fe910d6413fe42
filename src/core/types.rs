use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

/// Calendar presentation mode. A closed set so range math can be total.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[strum(serialize = "day", to_string = "day")]
    Day,
    #[strum(serialize = "week", to_string = "week")]
    Week,
    #[strum(serialize = "month", to_string = "month")]
    Month,
    #[strum(serialize = "agenda", to_string = "agenda")]
    Agenda,
}

impl ViewMode {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s).map_err(|_| {
            Error::Parse(format!(
                "Unsupported view mode: '{}'. Valid view modes: {}",
                s.trim(),
                valid_csv::<ViewMode>()
            ))
        })
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[strum(serialize = "open", to_string = "open")]
    Open,
    #[strum(serialize = "in_progress", to_string = "in_progress")]
    InProgress,
    #[strum(serialize = "closed", to_string = "closed")]
    Closed,
    #[strum(serialize = "canceled", to_string = "canceled")]
    Canceled,
}

impl BookingStatus {
    /// Label shown to staff. Closed bookings read as "ready" on the floor.
    pub fn display_label(self) -> &'static str {
        match self {
            BookingStatus::Open => "open",
            BookingStatus::InProgress => "in progress",
            BookingStatus::Closed => "ready",
            BookingStatus::Canceled => "canceled",
        }
    }

    /// Whether a booking in this status occupies its bay.
    pub fn is_active(self) -> bool {
        matches!(self, BookingStatus::Open | BookingStatus::InProgress)
    }

    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s).map_err(|_| {
            Error::Parse(format!(
                "Unsupported booking status: '{}'. Valid statuses: {}",
                s.trim(),
                valid_csv::<BookingStatus>()
            ))
        })
    }
}

/// Reference-data kinds served by the data port's lookup operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum LookupKind {
    #[strum(serialize = "vehicle", to_string = "vehicle")]
    Vehicle,
    #[strum(serialize = "bay", to_string = "bay")]
    Bay,
    #[strum(serialize = "technician", to_string = "technician")]
    Technician,
    #[strum(serialize = "company", to_string = "company")]
    Company,
}

impl LookupKind {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s).map_err(|_| {
            Error::Parse(format!(
                "Unsupported lookup kind: '{}'. Valid kinds: {}",
                s.trim(),
                valid_csv::<LookupKind>()
            ))
        })
    }
}

/// Half-open instant interval: `from` inclusive, `to` exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl TimeRange {
    pub fn new(from: NaiveDateTime, to: NaiveDateTime) -> Result<Self> {
        if to <= from {
            return Err(Error::Parse(format!(
                "Range end '{}' must be after range start '{}'.",
                to, from
            )));
        }
        Ok(TimeRange { from, to })
    }

    /// Whether `[start, end)` intersects this range.
    pub fn intersects(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start < self.to && end > self.from
    }

    /// Whether an instant falls inside the range.
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.from <= at && at < self.to
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} .. {}",
            self.from.format("%Y-%m-%d %H:%M"),
            self.to.format("%Y-%m-%d %H:%M")
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive)]
pub enum BoolFormat {
    #[strum(serialize = "true", serialize = "True", to_string = "True")]
    TextTrue,

    #[strum(serialize = "false", serialize = "False", to_string = "False")]
    TextFalse,
}

impl BoolFormat {
    #[inline]
    fn to_bool(self) -> bool {
        matches!(self, BoolFormat::TextTrue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bool(pub bool);

impl Bool {
    pub fn try_from_str(s: &str) -> Result<Self> {
        match BoolFormat::from_str(s) {
            Ok(fmt) => Ok(Bool(fmt.to_bool())),
            Err(_) => Err(Error::Parse(format!(
                "Invalid string value for boolean: '{}'. Valid values: {}",
                s,
                valid_csv::<BoolFormat>()
            ))),
        }
    }
}

impl fmt::Display for Bool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if self.0 { "True" } else { "False" })
    }
}

impl Serialize for Bool {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<<S as Serializer>::Ok, <S as Serializer>::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Bool {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Bool, <D as Deserializer<'de>>::Error> {
        let b = String::deserialize(deserializer)?;
        Bool::try_from_str(&b).map_err(serde::de::Error::custom)
    }
}
