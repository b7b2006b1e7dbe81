// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types returned by the solver, the date range and the service layer.

use chrono::NaiveDate;
use thiserror::Error;

use crate::event::{EventKind, PolarCondition};

/// An observer position outside the valid geographic domain.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    #[error("latitude {0} is outside [-90, 90] degrees")]
    InvalidLatitude(f64),
    #[error("longitude {0} is outside [-180, 180] degrees")]
    InvalidLongitude(f64),
}

/// A sun event that cannot be produced.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum EventError {
    /// The hour-angle equation has no solution: polar day or polar night.
    #[error("no {kind} on {date} at this latitude: {condition}")]
    NoEvent {
        kind: EventKind,
        condition: PolarCondition,
        date: NaiveDate,
    },
    /// The event exists on neighbouring days but none lands on this local
    /// date, which can happen when the timezone is far from the longitude.
    #[error("no {kind} falls on {date} in the requested timezone")]
    NotOnDate { kind: EventKind, date: NaiveDate },
    #[error(transparent)]
    Coordinates(#[from] CoordinateError),
    /// Stepping to the following day left chrono's calendar.
    #[error("search for the next {0} left the representable calendar")]
    OutOfRange(EventKind),
}

/// Which end of a date range broke the validation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    Start,
    End,
}

/// A date range reaching outside the window around "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeValidationError {
    #[error("date range starts too far in the past: {start} is before {earliest}")]
    StartTooEarly { start: NaiveDate, earliest: NaiveDate },
    #[error("date range ends too far in the future: {end} is after {latest}")]
    EndTooLate { end: NaiveDate, latest: NaiveDate },
}

impl RangeValidationError {
    /// The bound that violated the window.
    pub fn bound(&self) -> RangeBound {
        match self {
            Self::StartTooEarly { .. } => RangeBound::Start,
            Self::EndTooLate { .. } => RangeBound::End,
        }
    }
}

/// Malformed textual input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid date {0:?}: use YYYY-MM-DD")]
    Date(String),
    #[error("unknown range type {0:?}: expected 3-day, 1-week, 2-week, 3-week or month")]
    RangeType(String),
}

/// Any failure surfaced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Coordinates(#[from] CoordinateError),
    #[error(transparent)]
    Event(#[from] EventError),
    #[error(transparent)]
    Range(#[from] RangeValidationError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_event_message_names_kind_and_condition() {
        let err = EventError::NoEvent {
            kind: EventKind::Sunset,
            condition: PolarCondition::PolarDay,
            date: NaiveDate::from_ymd_opt(2024, 6, 21).unwrap(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("no sunset on 2024-06-21"), "{msg}");
        assert!(msg.contains("polar day"), "{msg}");
    }

    #[test]
    fn not_on_date_names_the_local_date() {
        let err = EventError::NotOnDate {
            kind: EventKind::Sunrise,
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "no sunrise falls on 2024-03-09 in the requested timezone"
        );
    }

    #[test]
    fn range_error_reports_bound() {
        let d = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let early = RangeValidationError::StartTooEarly { start: d, earliest: d };
        let late = RangeValidationError::EndTooLate { end: d, latest: d };
        assert_eq!(early.bound(), RangeBound::Start);
        assert_eq!(late.bound(), RangeBound::End);
        assert!(early.to_string().contains("past"));
        assert!(late.to_string().contains("future"));
    }

    #[test]
    fn umbrella_is_transparent() {
        let err: Error = CoordinateError::InvalidLatitude(91.0).into();
        assert_eq!(err.to_string(), "latitude 91 is outside [-90, 90] degrees");
    }
}
