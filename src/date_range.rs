// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Bounded windows of calendar days.
//!
//! A [`DateRange`] walks a short run of days (three days to a calendar
//! month) and produces one [`DateRangeResult`] per day from the sun event
//! solver.  Ranges must stay within a validation window around "now";
//! "now" is read once into a [`RangeSession`] and shared by every range
//! derived from it, so a chain of [`DateRange::next_range`] calls is
//! deterministic.
//!
//! ```
//! use chrono::{FixedOffset, TimeZone};
//! use suntimes::{Coordinates, DateRange, RangeSession, RangeType};
//!
//! let utc = FixedOffset::east_opt(0).unwrap();
//! let now = utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
//! let session = RangeSession::new(now);
//!
//! let mut range = DateRange::new(now, RangeType::OneWeek, session)?;
//! let quito = Coordinates::new(-0.1807, -78.4678)?;
//! let mut days = 1;
//! while range.next() {
//!     days += 1;
//! }
//! assert_eq!(days, range.days_in_range());
//! assert_eq!(range.calculate_all(&quito).len(), 7);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use chrono::{DateTime, Datelike, Duration, FixedOffset, Months, NaiveDate, NaiveTime, Offset, Utc};
use log::debug;
use std::fmt;
use std::str::FromStr;

use super::error::{ParseError, RangeValidationError};
use super::event::{sunrise_utc, sunset_utc, Coordinates, SunEvent};

// ═══════════════════════════════════════════════════════════════════════════
// Range types
// ═══════════════════════════════════════════════════════════════════════════

/// Length of a [`DateRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RangeType {
    ThreeDay,
    OneWeek,
    TwoWeek,
    ThreeWeek,
    Month,
}

/// Distance between the starts of two consecutive ranges of one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeStep {
    Days(u64),
    Months(u32),
}

impl RangeStep {
    fn forward(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Days(n) => date.checked_add_days(chrono::Days::new(n)),
            Self::Months(n) => date.checked_add_months(Months::new(n)),
        }
    }

    fn backward(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Days(n) => date.checked_sub_days(chrono::Days::new(n)),
            Self::Months(n) => date.checked_sub_months(Months::new(n)),
        }
    }

    /// Last day of the range beginning on `start`.
    fn last_day(self, start: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Days(n) => start.checked_add_days(chrono::Days::new(n.saturating_sub(1))),
            Self::Months(_) => self.forward(start).and_then(|d| d.pred_opt()),
        }
    }
}

impl RangeType {
    pub const ALL: [RangeType; 5] = [
        Self::ThreeDay,
        Self::OneWeek,
        Self::TwoWeek,
        Self::ThreeWeek,
        Self::Month,
    ];

    /// The one offset table: range length, and the shift applied by
    /// [`DateRange::next_range`] / [`DateRange::prev_range`].
    pub const fn step(self) -> RangeStep {
        match self {
            Self::ThreeDay => RangeStep::Days(3),
            Self::OneWeek => RangeStep::Days(7),
            Self::TwoWeek => RangeStep::Days(14),
            Self::ThreeWeek => RangeStep::Days(21),
            Self::Month => RangeStep::Months(1),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ThreeDay => "3-day",
            Self::OneWeek => "1-week",
            Self::TwoWeek => "2-week",
            Self::ThreeWeek => "3-week",
            Self::Month => "month",
        }
    }

    /// First day of a range of this type containing `date`.
    fn align(self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Month => date.with_day0(0).unwrap_or(date),
            _ => date,
        }
    }
}

impl fmt::Display for RangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RangeType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::RangeType(s.to_owned()))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Session
// ═══════════════════════════════════════════════════════════════════════════

/// How far from "now" a range may reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationWindow {
    pub past_months: u32,
    pub future_months: u32,
}

impl Default for ValidationWindow {
    fn default() -> Self {
        Self {
            past_months: 12,
            future_months: 12,
        }
    }
}

/// A single reading of the clock plus the window checked against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSession {
    now: DateTime<FixedOffset>,
    window: ValidationWindow,
}

impl RangeSession {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            now,
            window: ValidationWindow::default(),
        }
    }

    /// Session anchored at the system clock, read once.
    pub fn system() -> Self {
        Self::new(Utc::now().with_timezone(&Utc.fix()))
    }

    pub fn with_window(self, window: ValidationWindow) -> Self {
        Self { window, ..self }
    }

    #[inline]
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.now
    }

    #[inline]
    pub fn window(&self) -> ValidationWindow {
        self.window
    }

    fn today(&self, offset: FixedOffset) -> NaiveDate {
        self.now.with_timezone(&offset).date_naive()
    }

    /// Earliest allowed start date, as seen from `offset`.
    pub fn earliest(&self, offset: FixedOffset) -> NaiveDate {
        self.today(offset)
            .checked_sub_months(Months::new(self.window.past_months))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Latest allowed end date, as seen from `offset`.
    pub fn latest(&self, offset: FixedOffset) -> NaiveDate {
        self.today(offset)
            .checked_add_months(Months::new(self.window.future_months))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Check a single calendar date against the window.
    pub fn validate_date(
        &self,
        date: NaiveDate,
        offset: FixedOffset,
    ) -> Result<(), RangeValidationError> {
        self.validate(date, Some(date), offset)
    }

    /// `end == None` means the end could not be represented.
    fn validate(
        &self,
        start: NaiveDate,
        end: Option<NaiveDate>,
        offset: FixedOffset,
    ) -> Result<(), RangeValidationError> {
        let earliest = self.earliest(offset);
        if start < earliest {
            debug!("range start {start} before {earliest}");
            return Err(RangeValidationError::StartTooEarly { start, earliest });
        }
        let latest = self.latest(offset);
        let end = end.unwrap_or(NaiveDate::MAX);
        if end > latest {
            debug!("range end {end} after {latest}");
            return Err(RangeValidationError::EndTooLate { end, latest });
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// DateRange
// ═══════════════════════════════════════════════════════════════════════════

fn local_midnight(date: NaiveDate, offset: FixedOffset) -> DateTime<FixedOffset> {
    let utc = date.and_time(NaiveTime::MIN) - Duration::seconds(offset.local_minus_utc().into());
    DateTime::from_naive_utc_and_offset(utc, offset)
}

/// A validated window of consecutive calendar days with a cursor.
///
/// Days are civil dates in the fixed offset of the start instant.
/// Invariant: `start <= current <= end`.  The requested start day and `end`
/// lie inside the session's validation window; a `Month` range may begin
/// before the window when only its requested day is inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
    current: NaiveDate,
    offset: FixedOffset,
    range_type: RangeType,
    session: RangeSession,
}

impl DateRange {
    /// Build the range of `range_type` starting on the calendar day of `start`.
    ///
    /// A `Month` range always covers the whole calendar month containing
    /// `start`.  The window check applies to `start` itself and to the end
    /// of the range, not to the first of the month.
    pub fn new(
        start: DateTime<FixedOffset>,
        range_type: RangeType,
        session: RangeSession,
    ) -> Result<Self, RangeValidationError> {
        Self::from_date(start.date_naive(), *start.offset(), range_type, session)
    }

    /// Build from a calendar date interpreted in `offset`.
    pub fn from_date(
        start: NaiveDate,
        offset: FixedOffset,
        range_type: RangeType,
        session: RangeSession,
    ) -> Result<Self, RangeValidationError> {
        let requested = start;
        let start = range_type.align(requested);
        let end = range_type.step().last_day(start);
        session.validate(requested, end, offset)?;
        let end = end.unwrap_or(start);

        Ok(Self {
            start,
            end,
            current: start,
            offset,
            range_type,
            session,
        })
    }

    #[inline]
    pub fn range_type(&self) -> RangeType {
        self.range_type
    }

    #[inline]
    pub fn session(&self) -> &RangeSession {
        &self.session
    }

    #[inline]
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end
    }

    pub fn current_date(&self) -> NaiveDate {
        self.current
    }

    /// Local midnight of the first day.
    pub fn start(&self) -> DateTime<FixedOffset> {
        local_midnight(self.start, self.offset)
    }

    /// Local midnight of the last day.
    pub fn end(&self) -> DateTime<FixedOffset> {
        local_midnight(self.end, self.offset)
    }

    /// Local midnight of the day under the cursor.
    pub fn current(&self) -> DateTime<FixedOffset> {
        local_midnight(self.current, self.offset)
    }

    /// Advance the cursor one day. Returns `false`, leaving the range
    /// untouched, once the cursor is on the last day.
    pub fn next(&mut self) -> bool {
        if self.current >= self.end {
            return false;
        }
        match self.current.succ_opt() {
            Some(day) => {
                self.current = day;
                true
            }
            None => false,
        }
    }

    /// Move the cursor back to the first day.
    pub fn reset(&mut self) {
        self.current = self.start;
    }

    pub fn days_in_range(&self) -> u32 {
        ((self.end - self.start).num_days() + 1) as u32
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.start..=self.end).contains(&date)
    }

    /// Every day of the range, independent of the cursor.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(self.days_in_range() as usize)
    }

    /// The range of the same type immediately after this one, validated
    /// against the same session.
    pub fn next_range(&self) -> Result<Self, RangeValidationError> {
        match self.range_type.step().forward(self.start) {
            Some(start) => self.derive(start),
            None => Err(RangeValidationError::EndTooLate {
                end: NaiveDate::MAX,
                latest: self.session.latest(self.offset),
            }),
        }
    }

    /// The range of the same type immediately before this one.
    pub fn prev_range(&self) -> Result<Self, RangeValidationError> {
        match self.range_type.step().backward(self.start) {
            Some(start) => self.derive(start),
            None => Err(RangeValidationError::StartTooEarly {
                start: NaiveDate::MIN,
                earliest: self.session.earliest(self.offset),
            }),
        }
    }

    fn derive(&self, start: NaiveDate) -> Result<Self, RangeValidationError> {
        Self::from_date(start, self.offset, self.range_type, self.session)
    }

    /// `"YYYY-MM-DD to YYYY-MM-DD"`, or a single date for a one-day range.
    pub fn format_range(&self) -> String {
        if self.start == self.end {
            self.start.format("%Y-%m-%d").to_string()
        } else {
            format!(
                "{} to {}",
                self.start.format("%Y-%m-%d"),
                self.end.format("%Y-%m-%d")
            )
        }
    }

    /// Sun events for the day under the cursor. Does not move the cursor.
    pub fn calculate_results(&self, coords: &Coordinates) -> DateRangeResult {
        self.result_for(self.current, coords)
    }

    /// Sun events for every day of the range, in order.
    pub fn calculate_all(&self, coords: &Coordinates) -> Vec<DateRangeResult> {
        self.days().map(|day| self.result_for(day, coords)).collect()
    }

    fn result_for(&self, day: NaiveDate, coords: &Coordinates) -> DateRangeResult {
        DateRangeResult {
            date: local_midnight(day, self.offset),
            sunrise: sunrise_utc(day, coords),
            sunset: sunset_utc(day, coords),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.format_range(), self.range_type)
    }
}

/// Sun events for one day of a [`DateRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DateRangeResult {
    /// Local midnight of the day.
    pub date: DateTime<FixedOffset>,
    pub sunrise: SunEvent,
    pub sunset: SunEvent,
}

impl fmt::Display for DateRangeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:\n  Sunrise: {}\n  Sunset:  {}",
            self.date.format("%Y-%m-%d"),
            self.sunrise,
            self.sunset
        )
    }
}
