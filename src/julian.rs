// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar ↔ Julian Day conversion.
//!
//! Julian days begin at **noon** UT, so a civil instant is mapped to the
//! integer Julian Day Number of its calendar date plus a day fraction
//! shifted by −12 h, then corrected from wall-clock time to UT using the
//! instant's offset.

use chrono::{DateTime, Datelike, NaiveDate, Offset, TimeZone, Timelike};
use qtty::*;

use super::instant::Time;
use super::scales::JD;

/// Integer Julian Day Number of a proleptic Gregorian calendar date.
///
/// Uses the constant-coefficient form where January and February are
/// folded into months 13/14 of the previous year by the `(m - 14) / 12`
/// terms.  Division truncates toward zero, which the formula relies on.
pub fn julian_day_number(year: i32, month: u32, day: u32) -> i64 {
    let (y, m, d) = (year as i64, month as i64, day as i64);
    let a = (m - 14) / 12;
    (1461 * (y + 4800 + a)) / 4 + (367 * (m - 2 - 12 * a)) / 12
        - (3 * ((y + 4900 + a) / 100)) / 4
        + d
        - 32075
}

impl Time<JD> {
    /// J2000.0 epoch: 2000-01-01T12:00:00 (JD 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// One Julian century expressed in days.
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

    /// Convert a civil instant to a continuous Julian Day in UT.
    ///
    /// The wall-clock fields are read in the instant's own offset, then the
    /// offset is removed: a clock at `+02:00` reading 14:00 yields the same
    /// Julian Day as 12:00Z.  Precision is kept to the millisecond.
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use suntimes::JulianDate;
    ///
    /// let epoch = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
    /// assert_eq!(JulianDate::from_civil(&epoch), JulianDate::J2000);
    /// ```
    pub fn from_civil<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        let local = instant.naive_local();
        let jdn = julian_day_number(local.year(), local.month(), local.day());

        let millis = (local.nanosecond() / 1_000_000) as f64;
        let fraction = (local.hour() as f64 - 12.0) / 24.0
            + local.minute() as f64 / 1_440.0
            + local.second() as f64 / 86_400.0
            + millis / 86_400_000.0;

        // Seconds to add to the wall clock to reach UT.
        let to_ut = -instant.offset().fix().local_minus_utc() as f64;

        Self::new(jdn as f64 + fraction) + Seconds::new(to_ut).to::<Day>()
    }

    /// Julian Day of 00:00 UT on the given calendar date.
    #[inline]
    pub fn midnight_utc(date: NaiveDate) -> Self {
        Self::new(julian_day_number(date.year(), date.month(), date.day()) as f64 - 0.5)
    }

    /// Julian centuries since J2000.0, the argument of the solar series.
    #[inline]
    pub fn julian_centuries(&self) -> Centuries {
        Centuries::new(
            ((*self - Self::J2000) / Self::JULIAN_CENTURY)
                .simplify()
                .value(),
        )
    }

    /// Inverse of [`julian_centuries`](Self::julian_centuries).
    #[inline]
    pub fn from_centuries(centuries: Centuries) -> Self {
        Self::J2000 + Days::new(centuries.value() * Self::JULIAN_CENTURY.value())
    }
}

impl From<Centuries> for Time<JD> {
    fn from(centuries: Centuries) -> Self {
        Self::from_centuries(centuries)
    }
}

impl From<Time<JD>> for Centuries {
    fn from(jd: Time<JD>) -> Self {
        jd.julian_centuries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn j2000_reference_epoch() {
        let epoch = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(Time::<JD>::from_civil(&epoch).value(), 2_451_545.0);
    }

    #[test]
    fn julian_day_numbers() {
        assert_eq!(julian_day_number(2000, 1, 1), 2_451_545);
        // Meeus, Astronomical Algorithms, ex. 7.a: 1957-10-04.81 → 2436116.31
        assert_eq!(julian_day_number(1957, 10, 4), 2_436_116);
        assert_eq!(julian_day_number(1970, 1, 1), 2_440_588);
        // January/February go through the month 13/14 fold.
        assert_eq!(julian_day_number(2024, 2, 29) + 1, julian_day_number(2024, 3, 1));
    }

    #[test]
    fn midnight_is_half_day_before_noon() {
        let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        assert_eq!(Time::<JD>::midnight_utc(date).value(), 2_451_544.5);
    }

    #[test]
    fn offset_is_removed_to_reach_ut() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = plus_two.with_ymd_and_hms(2000, 1, 1, 14, 0, 0).unwrap();
        let jd = Time::<JD>::from_civil(&local);
        assert!((jd.value() - 2_451_545.0).abs() < 1e-9);

        let minus_five = FixedOffset::west_opt(5 * 3600).unwrap();
        let local = minus_five.with_ymd_and_hms(2000, 1, 1, 7, 0, 0).unwrap();
        assert!((Time::<JD>::from_civil(&local).value() - 2_451_545.0).abs() < 1e-9);
    }

    #[test]
    fn subsecond_precision_is_milliseconds() {
        let a = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let b = a + chrono::Duration::milliseconds(500);
        let span = Time::<JD>::from_civil(&b) - Time::<JD>::from_civil(&a);
        assert!((span.to::<Second>().value() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn monotonic_with_civil_time() {
        let base = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap();
        let next = base + chrono::Duration::seconds(1);
        assert!(Time::<JD>::from_civil(&next) > Time::<JD>::from_civil(&base));
    }

    #[test]
    fn centuries_roundtrip() {
        let jd = Time::<JD>::J2000 + Days::new(36_525.0 * 0.25);
        let t: Centuries = jd.into();
        assert!((t.value() - 0.25).abs() < 1e-12);
        let back = Time::<JD>::from(t);
        assert!((back - jd).abs() < Days::new(1e-9));
    }

    #[test]
    fn from_civil_agrees_with_unix_timestamp() {
        // JD of the Unix epoch is 2440587.5.
        let dt = Utc.with_ymd_and_hms(2025, 8, 17, 18, 45, 30).unwrap();
        let from_timestamp = Time::<JD>::new(2_440_587.5)
            + Seconds::new(dt.timestamp() as f64).to::<Day>();
        assert!((Time::<JD>::from_civil(&dt) - from_timestamp).abs() < Days::new(1e-8));
    }
}
