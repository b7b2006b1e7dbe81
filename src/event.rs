// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Sunrise, sunset and solar noon.
//!
//! Event times are solved as minutes after 00:00 UTC of a calendar date.
//! Solar noon is found first, with the equation of time evaluated once at
//! the local mean noon and once more at the noon it implies.  The sunrise
//! or sunset hour angle is then evaluated at that noon and refined a second
//! time at the event itself, since the declination drifts enough between
//! noon and the horizon crossing to move the result by minutes.
//!
//! Longitudes are **east-positive**.  The horizon is the standard zenith
//! distance of 90.833°: 34′ of refraction plus the 16′ solar semi-diameter.
//!
//! ```
//! use chrono::NaiveDate;
//! use suntimes::{sunrise_utc, sunset_utc, Coordinates};
//!
//! let london = Coordinates::new(51.5074, -0.1278)?;
//! let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
//! let rise = sunrise_utc(date, &london).instant().unwrap();
//! let set = sunset_utc(date, &london).instant().unwrap();
//! assert!(rise < set);
//! # Ok::<(), suntimes::CoordinateError>(())
//! ```

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use log::{debug, trace};
use qtty::Days;
use std::fmt;

use super::error::{CoordinateError, EventError};
use super::instant::Time;
use super::scales::JD;
use super::solar::{self, SolarParameters};

/// Zenith distance of the Sun's centre at apparent sunrise/sunset, degrees.
pub const SUNRISE_ZENITH: f64 = 90.833;

const MINUTES_PER_DAY: f64 = 1_440.0;

// ═══════════════════════════════════════════════════════════════════════════
// Observer and outcome types
// ═══════════════════════════════════════════════════════════════════════════

/// A validated observer position in degrees (latitude north, longitude east).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Rejects non-finite values, `|latitude| > 90` and `|longitude| > 180`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || latitude.abs() > 90.0 {
            return Err(CoordinateError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || longitude.abs() > 180.0 {
            return Err(CoordinateError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[inline]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[inline]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Which horizon crossing is being solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Sunrise,
    Sunset,
}

impl EventKind {
    /// Sign applied to the hour angle: the Sun rises east of the meridian.
    #[inline]
    const fn hour_angle_sign(self) -> f64 {
        match self {
            Self::Sunrise => 1.0,
            Self::Sunset => -1.0,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sunrise => "sunrise",
            Self::Sunset => "sunset",
        })
    }
}

/// Why a day has no sunrise or sunset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PolarCondition {
    /// The Sun stays above the horizon all day.
    PolarDay,
    /// The Sun stays below the horizon all day.
    PolarNight,
}

impl fmt::Display for PolarCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PolarDay => "the sun stays above the horizon all day (polar day)",
            Self::PolarNight => "the sun stays below the horizon all day (polar night)",
        })
    }
}

/// Outcome of solving one sunrise or sunset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SunEvent {
    Event(DateTime<Utc>),
    PolarDay,
    PolarNight,
}

impl SunEvent {
    /// The event instant, if the Sun crosses the horizon that day.
    #[inline]
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Event(t) => Some(*t),
            Self::PolarDay | Self::PolarNight => None,
        }
    }

    #[inline]
    pub fn is_event(&self) -> bool {
        matches!(self, Self::Event(_))
    }

    /// The polar condition, if there is no event.
    pub fn polar_condition(&self) -> Option<PolarCondition> {
        match self {
            Self::Event(_) => None,
            Self::PolarDay => Some(PolarCondition::PolarDay),
            Self::PolarNight => Some(PolarCondition::PolarNight),
        }
    }

    /// Turn a missing event into an [`EventError::NoEvent`] for `kind` on `date`.
    pub fn into_result(self, kind: EventKind, date: NaiveDate) -> Result<DateTime<Utc>, EventError> {
        let condition = match self {
            Self::Event(t) => return Ok(t),
            Self::PolarDay => PolarCondition::PolarDay,
            Self::PolarNight => PolarCondition::PolarNight,
        };
        Err(EventError::NoEvent {
            kind,
            condition,
            date,
        })
    }
}

impl From<PolarCondition> for SunEvent {
    fn from(condition: PolarCondition) -> Self {
        match condition {
            PolarCondition::PolarDay => Self::PolarDay,
            PolarCondition::PolarNight => Self::PolarNight,
        }
    }
}

impl fmt::Display for SunEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Event(t) => write!(f, "{}", t.format("%H:%M:%S UTC")),
            Self::PolarDay => f.write_str("none (polar day)"),
            Self::PolarNight => f.write_str("none (polar night)"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Solver
// ═══════════════════════════════════════════════════════════════════════════

/// Sunrise hour angle in degrees (non-negative) for the given latitude and
/// solar declination.
///
/// An `acos` argument below −1 means the Sun never reaches the horizon from
/// above (polar day); above +1, never from below (polar night).
pub fn hour_angle(latitude: f64, declination: f64) -> Result<f64, PolarCondition> {
    let lat = latitude.to_radians();
    let dec = declination.to_radians();
    let arg = SUNRISE_ZENITH.to_radians().cos() / (lat.cos() * dec.cos()) - lat.tan() * dec.tan();

    if arg < -1.0 {
        Err(PolarCondition::PolarDay)
    } else if arg > 1.0 {
        Err(PolarCondition::PolarNight)
    } else {
        Ok(arg.acos().to_degrees())
    }
}

#[inline]
fn minutes(m: f64) -> Days {
    Days::new(m / MINUTES_PER_DAY)
}

/// Solar noon in minutes after 00:00 UTC of the day starting at `midnight`.
fn solar_noon_minutes(midnight: Time<JD>, longitude: f64) -> f64 {
    let mean_noon = midnight + Days::new(0.5 - longitude / 360.0);
    let estimate = 720.0 - 4.0 * longitude
        - solar::equation_of_time(mean_noon.julian_centuries().value());

    let refined = midnight + minutes(estimate);
    720.0 - 4.0 * longitude - solar::equation_of_time(refined.julian_centuries().value())
}

/// One pass of the event equation with the Sun evaluated at `at`.
fn event_pass(
    at: Time<JD>,
    coords: &Coordinates,
    kind: EventKind,
) -> Result<f64, PolarCondition> {
    let sun = SolarParameters::at_julian_date(at);
    let h = hour_angle(coords.latitude, sun.declination)?;
    Ok(720.0 - 4.0 * (coords.longitude + kind.hour_angle_sign() * h) - sun.equation_of_time)
}

/// Minutes after 00:00 UTC of `date` at which `kind` happens.
///
/// May fall outside `[0, 1440)` when the event belongs to the neighbouring
/// UTC day, as happens far from the prime meridian.
pub fn event_minutes_utc(
    date: NaiveDate,
    coords: &Coordinates,
    kind: EventKind,
) -> Result<f64, PolarCondition> {
    let midnight = Time::<JD>::midnight_utc(date);
    let noon = solar_noon_minutes(midnight, coords.longitude);

    let first = event_pass(midnight + minutes(noon), coords, kind)?;
    let second = event_pass(midnight + minutes(first), coords, kind)?;
    trace!("{kind} {date} ({midnight}): noon {noon:.3} min, first pass {first:.3}, refined {second:.3}");
    Ok(second)
}

/// UTC instant `minutes` after 00:00 UTC on `date`, floored to whole seconds.
///
/// # Panics
///
/// If the result leaves chrono's calendar, i.e. only for dates within two
/// days of `NaiveDate::MIN`/`MAX`.
fn utc_at_minutes(date: NaiveDate, minutes: f64) -> DateTime<Utc> {
    let seconds = (minutes * 60.0).floor() as i64;
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
        .checked_add_signed(Duration::seconds(seconds))
        .expect("sun event outside chrono's representable range")
}

fn solve(date: NaiveDate, coords: &Coordinates, kind: EventKind) -> SunEvent {
    match event_minutes_utc(date, coords, kind) {
        Ok(m) => SunEvent::Event(utc_at_minutes(date, m)),
        Err(condition) => {
            debug!(
                "no {kind} on {date} at ({}, {}): {condition}",
                coords.latitude, coords.longitude
            );
            condition.into()
        }
    }
}

/// Sunrise for the calendar `date`, as a UTC instant.
pub fn sunrise_utc(date: NaiveDate, coords: &Coordinates) -> SunEvent {
    solve(date, coords, EventKind::Sunrise)
}

/// Sunset for the calendar `date`, as a UTC instant.
pub fn sunset_utc(date: NaiveDate, coords: &Coordinates) -> SunEvent {
    solve(date, coords, EventKind::Sunset)
}

/// Solar noon (transit) for the calendar `date`. Always defined.
pub fn solar_noon_utc(date: NaiveDate, coords: &Coordinates) -> DateTime<Utc> {
    let noon = solar_noon_minutes(Time::<JD>::midnight_utc(date), coords.longitude);
    utc_at_minutes(date, noon)
}

// ── Instant-based API ─────────────────────────────────────────────────────

/// Solver days whose events can land on local calendar day `day`.
///
/// Event minutes run from about −720 to 2160 around a solver day and a
/// fixed offset adds up to ±24 h, so two days either side cover every zone.
fn solver_days(day: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    (-2..=2).filter_map(move |d| day.checked_add_signed(Duration::days(d)))
}

/// The `kind` event falling on the local calendar `day` of `tz`.
fn event_on_local_day<Tz: TimeZone>(
    tz: &Tz,
    day: NaiveDate,
    coords: &Coordinates,
    kind: EventKind,
) -> Result<DateTime<Tz>, EventError> {
    let mut found: Option<DateTime<Tz>> = None;
    let mut polar = None;

    for solver_day in solver_days(day) {
        match solve(solver_day, coords, kind) {
            SunEvent::Event(utc) => {
                let local = utc.with_timezone(tz);
                if local.date_naive() == day && found.as_ref().map_or(true, |f| local < *f) {
                    found = Some(local);
                }
            }
            other => {
                if solver_day == day || polar.is_none() {
                    polar = other.polar_condition();
                }
            }
        }
    }

    match (found, polar) {
        (Some(event), _) => Ok(event),
        (None, Some(condition)) => Err(EventError::NoEvent {
            kind,
            condition,
            date: day,
        }),
        (None, None) => Err(EventError::NotOnDate { kind, date: day }),
    }
}

/// Sunrise on the calendar day of `date` (read in its own timezone),
/// expressed in that same timezone.
///
/// The zone need not match the longitude: the sunrise is taken from
/// whichever UTC solver day puts it on that local date.
///
/// ```
/// use chrono::{FixedOffset, TimeZone};
/// use suntimes::{sunrise, Coordinates};
///
/// let new_york = Coordinates::new(40.7128, -74.0060)?;
/// let est = FixedOffset::west_opt(5 * 3600).unwrap();
/// let day = est.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
/// let rise = sunrise(&day, &new_york)?;
/// assert_eq!(rise.offset(), day.offset());
/// assert_eq!(rise.date_naive(), day.date_naive());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn sunrise<Tz: TimeZone>(
    date: &DateTime<Tz>,
    coords: &Coordinates,
) -> Result<DateTime<Tz>, EventError> {
    event_on_local_day(&date.timezone(), date.date_naive(), coords, EventKind::Sunrise)
}

/// Sunset on the calendar day of `date`, expressed in the timezone of `date`.
pub fn sunset<Tz: TimeZone>(
    date: &DateTime<Tz>,
    coords: &Coordinates,
) -> Result<DateTime<Tz>, EventError> {
    event_on_local_day(&date.timezone(), date.date_naive(), coords, EventKind::Sunset)
}

/// Solar noon on the calendar day of `date`, expressed in the timezone of
/// `date`.
///
/// Picks the transit on that local day closest to local midday.  When no
/// transit falls on it (a zone about 12 h away from the meridian, with the
/// transit straddling midnight), the transit of the same UTC date is used.
pub fn solar_noon<Tz: TimeZone>(date: &DateTime<Tz>, coords: &Coordinates) -> DateTime<Tz> {
    let tz = date.timezone();
    let day = date.date_naive();
    solver_days(day)
        .map(|d| solar_noon_utc(d, coords).with_timezone(&tz))
        .filter(|noon| noon.date_naive() == day)
        .min_by_key(|noon| (i64::from(noon.num_seconds_from_midnight()) - 43_200).abs())
        .unwrap_or_else(|| solar_noon_utc(day, coords).with_timezone(&tz))
}

fn next_event<Tz: TimeZone>(
    after: &DateTime<Tz>,
    coords: &Coordinates,
    kind: EventKind,
) -> Result<DateTime<Tz>, EventError> {
    let tz = after.timezone();
    let start = after.date_naive();
    let mut skipped = EventError::OutOfRange(kind);

    // Any event on the following local day is later than `after`; the third
    // day only covers a following day that the event skips entirely.
    for ahead in 0..3 {
        let day = start
            .checked_add_days(chrono::Days::new(ahead))
            .ok_or(EventError::OutOfRange(kind))?;
        match event_on_local_day(&tz, day, coords, kind) {
            Ok(event) if event > *after => return Ok(event),
            Ok(_) => {}
            Err(err @ EventError::NotOnDate { .. }) => skipped = err,
            Err(err) => return Err(err),
        }
    }
    Err(skipped)
}

/// First sunrise strictly after `after`.
pub fn next_sunrise<Tz: TimeZone>(
    after: &DateTime<Tz>,
    coords: &Coordinates,
) -> Result<DateTime<Tz>, EventError> {
    next_event(after, coords, EventKind::Sunrise)
}

/// First sunset strictly after `after`.
pub fn next_sunset<Tz: TimeZone>(
    after: &DateTime<Tz>,
    coords: &Coordinates,
) -> Result<DateTime<Tz>, EventError> {
    next_event(after, coords, EventKind::Sunset)
}

// ── Daily summary ─────────────────────────────────────────────────────────

/// Sunrise, transit and sunset for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SunTimes {
    pub date: NaiveDate,
    pub sunrise: SunEvent,
    pub solar_noon: DateTime<Utc>,
    pub sunset: SunEvent,
}

impl SunTimes {
    /// Time the Sun spends above the horizon: 24 h in polar day, zero in
    /// polar night.
    pub fn day_length(&self) -> Duration {
        match (self.sunrise, self.sunset) {
            (SunEvent::Event(rise), SunEvent::Event(set)) => set - rise,
            (SunEvent::PolarDay, _) | (_, SunEvent::PolarDay) => Duration::hours(24),
            _ => Duration::zero(),
        }
    }
}

/// Compute [`SunTimes`] for `date`.
pub fn sun_times(date: NaiveDate, coords: &Coordinates) -> SunTimes {
    SunTimes {
        date,
        sunrise: sunrise_utc(date, coords),
        solar_noon: solar_noon_utc(date, coords),
        sunset: sunset_utc(date, coords),
    }
}
