// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Request/response contract for serving one-day calculations.
//!
//! The transport is left to the caller; this module turns a
//! [`SunTimesRequest`] into a [`SunTimesResponse`] of formatted clock
//! strings.  Timezone lookup is delegated to a [`TimeZoneResolver`], and a
//! missing or unknown zone falls back to GMT.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use log::debug;
use std::str::FromStr;

use super::date_range::RangeSession;
use super::error::{ParseError, Result};
use super::event::{sunrise_utc, sunset_utc, Coordinates, EventKind};

/// Label used when the request names no zone, or one the resolver rejects.
pub const FALLBACK_ZONE: &str = "GMT";

const CLOCK_FORMAT: &str = "%H:%M:%S";

/// One location and calendar date to calculate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SunTimesRequest {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub timezone: Option<String>,
}

/// Sunrise and sunset as `HH:MM:SS <zone>` strings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SunTimesResponse {
    pub sunrise_utc: String,
    pub sunset_utc: String,
    pub sunrise_local: String,
    pub sunset_local: String,
    /// The zone the local strings are expressed in.
    pub timezone: String,
}

/// Maps a zone name to its UTC offset at a given instant.
pub trait TimeZoneResolver {
    /// `None` when the name is unknown.
    fn resolve(&self, name: &str, at: DateTime<Utc>) -> Option<FixedOffset>;

    /// Label printed after local times for a zone `resolve` accepted.
    fn label(&self, name: &str, _offset: FixedOffset) -> String {
        name.trim().to_owned()
    }
}

/// Resolver for zones with a constant offset: `UTC`, `GMT`, `Z`, and
/// `±HH:MM` / `±HHMM`, optionally prefixed by `UTC` or `GMT`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedOffsetResolver;

impl TimeZoneResolver for FixedOffsetResolver {
    fn resolve(&self, name: &str, _at: DateTime<Utc>) -> Option<FixedOffset> {
        let name = name.trim();
        let upper = name.to_ascii_uppercase();
        let rest = upper
            .strip_prefix("UTC")
            .or_else(|| upper.strip_prefix("GMT"))
            .unwrap_or(&upper);

        if rest.is_empty() || rest == "Z" {
            return Some(Utc.fix());
        }
        FixedOffset::from_str(rest).ok()
    }

    /// `UTC`/`GMT` names keep their spelling; numeric offsets print as `±HH:MM`.
    fn label(&self, name: &str, offset: FixedOffset) -> String {
        let upper = name.trim().to_ascii_uppercase();
        match upper.as_str() {
            "UTC" | "GMT" => upper,
            "Z" => "UTC".to_owned(),
            _ => offset.to_string(),
        }
    }
}

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_date(date: &str) -> std::result::Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| ParseError::Date(date.to_owned()))
}

/// Serve one request.
///
/// Checks run in order: date syntax, date inside the session window,
/// coordinates.  A polar outcome for either event is an
/// [`Error::Event`](crate::Error::Event).
///
/// ```
/// use chrono::{FixedOffset, TimeZone};
/// use suntimes::{calculate, FixedOffsetResolver, RangeSession, SunTimesRequest};
///
/// let now = FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let request = SunTimesRequest {
///     name: "New York".into(),
///     latitude: 40.7128,
///     longitude: -74.0060,
///     date: "2024-01-15".into(),
///     timezone: Some("-05:00".into()),
/// };
/// let response = calculate(&request, &RangeSession::new(now), &FixedOffsetResolver)?;
/// assert!(response.sunrise_utc.ends_with(" UTC"));
/// assert_eq!(response.timezone, "-05:00");
/// # Ok::<(), suntimes::Error>(())
/// ```
pub fn calculate<R: TimeZoneResolver + ?Sized>(
    request: &SunTimesRequest,
    session: &RangeSession,
    resolver: &R,
) -> Result<SunTimesResponse> {
    let date = parse_date(&request.date)?;
    session.validate_date(date, Utc.fix())?;
    let coords = Coordinates::new(request.latitude, request.longitude)?;

    let sunrise = sunrise_utc(date, &coords).into_result(EventKind::Sunrise, date)?;
    let sunset = sunset_utc(date, &coords).into_result(EventKind::Sunset, date)?;

    let (timezone, offset) = request
        .timezone
        .as_deref()
        .and_then(|name| {
            resolver
                .resolve(name, sunrise)
                .map(|offset| (resolver.label(name, offset), offset))
        })
        .unwrap_or_else(|| (FALLBACK_ZONE.to_owned(), Utc.fix()));

    debug!(
        "{}: {date} at ({}, {}) in {timezone}",
        request.name,
        coords.latitude(),
        coords.longitude()
    );

    let local = |instant: DateTime<Utc>| {
        format!(
            "{} {timezone}",
            instant.with_timezone(&offset).format(CLOCK_FORMAT)
        )
    };

    Ok(SunTimesResponse {
        sunrise_utc: format!("{} UTC", sunrise.format(CLOCK_FORMAT)),
        sunset_utc: format!("{} UTC", sunset.format(CLOCK_FORMAT)),
        sunrise_local: local(sunrise),
        sunset_local: local(sunset),
        timezone,
    })
}
