// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Sunrise and sunset times
//!
//! This crate computes sunrise, sunset and solar noon for an observer from
//! the NOAA low-precision solar series, and walks short ranges of calendar
//! days producing one result per day.
//!
//! # Core types
//!
//! - [`Time<S>`] — instant parameterised by a [`TimeScale`] marker.
//! - [`JulianDate`] — type alias for `Time<JD>`, the solver's time axis (UT).
//! - [`SolarParameters`] — every intermediate solar quantity at one instant.
//! - [`Coordinates`] — a validated observer position (east-positive longitude).
//! - [`SunEvent`] — an event instant, or the polar condition preventing it.
//! - [`DateRange`] — a validated run of days with a cursor.
//! - [`SunTimesRequest`] / [`SunTimesResponse`] — one-day service contract.
//!
//! # Time scale
//!
//! | Marker | Scale |
//! |--------|-------|
//! | [`JD`] | Julian Date (UT) |
//!
//! No ΔT is applied: the series is evaluated directly on the UT Julian Day,
//! which is well inside the minute-level accuracy of the method.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use suntimes::{sun_times, Coordinates};
//!
//! let sydney = Coordinates::new(-33.8688, 151.2093)?;
//! let day = sun_times(NaiveDate::from_ymd_opt(2024, 12, 21).unwrap(), &sydney);
//! assert!(day.day_length() > chrono::Duration::hours(14));
//! # Ok::<(), suntimes::Error>(())
//! ```

pub mod date_range;
pub mod error;
pub mod event;
pub(crate) mod instant;
mod julian;
pub(crate) mod scales;
pub mod service;
pub mod solar;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use date_range::{
    DateRange, DateRangeResult, RangeSession, RangeStep, RangeType, ValidationWindow,
};
pub use error::{
    CoordinateError, Error, EventError, ParseError, RangeBound, RangeValidationError, Result,
};
pub use event::{
    event_minutes_utc, hour_angle, next_sunrise, next_sunset, solar_noon, solar_noon_utc,
    sun_times, sunrise, sunrise_utc, sunset, sunset_utc, Coordinates, EventKind, PolarCondition,
    SunEvent, SunTimes, SUNRISE_ZENITH,
};
pub use instant::{Time, TimeScale};
pub use julian::julian_day_number;
pub use scales::JD;
pub use service::{calculate, FixedOffsetResolver, SunTimesRequest, SunTimesResponse, TimeZoneResolver};
pub use solar::SolarParameters;

/// Julian Date — continuous count of days since the Julian Period, in UT.
///
/// This is a type alias for [`Time<JD>`].
pub type JulianDate = Time<JD>;
