// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Solar position series (NOAA)
//!
//! Low-precision geocentric solar quantities as a function of the Julian
//! century `t = (JD − 2451545.0) / 36525`, following the NOAA solar
//! calculator, which in turn abridges *Meeus — Astronomical Algorithms*
//! ch. 25.
//!
//! Later terms consume earlier ones, so the derivation order is fixed:
//!
//! 1. geometric mean longitude `L0`
//! 2. geometric mean anomaly `M`
//! 3. orbital eccentricity `e`
//! 4. mean obliquity `ε0`, then `ε` corrected with the lunar node `Ω`
//! 5. equation of time (minutes)
//! 6. equation of centre `C`, true longitude, apparent longitude `λ`
//! 7. declination `δ`
//!
//! Every angle is kept in **degrees** between steps and converted to
//! radians only at the trigonometric call.
//!
//! Accuracy is about one arc-minute in declination and a few seconds in
//! the equation of time for dates within a few centuries of J2000.

use qtty::Centuries;

use super::instant::Time;
use super::scales::JD;

/// Mean longitude of the Moon's ascending node, degrees.
#[inline]
fn lunar_node(t: f64) -> f64 {
    125.04 - 1934.136 * t
}

/// Geometric mean longitude of the Sun, degrees in `[0, 360)`.
pub fn geometric_mean_longitude(t: f64) -> f64 {
    (280.466_46 + t * (36_000.769_83 + 0.000_303_2 * t)).rem_euclid(360.0)
}

/// Geometric mean anomaly of the Sun, degrees (not normalized).
pub fn geometric_mean_anomaly(t: f64) -> f64 {
    357.529_11 + t * (35_999.050_29 - 0.000_153_7 * t)
}

/// Eccentricity of Earth's orbit (dimensionless).
pub fn orbit_eccentricity(t: f64) -> f64 {
    0.016_708_634 - t * (0.000_042_037 + 0.000_000_126_7 * t)
}

/// Mean obliquity of the ecliptic, degrees.
pub fn mean_obliquity(t: f64) -> f64 {
    let seconds = 21.448 - t * (46.8150 + t * (0.000_59 - t * 0.001_813));
    23.0 + (26.0 + seconds / 60.0) / 60.0
}

/// Obliquity corrected for the nutation in obliquity, degrees.
pub fn obliquity_correction(t: f64) -> f64 {
    mean_obliquity(t) + 0.002_56 * lunar_node(t).to_radians().cos()
}

/// Equation of time in **minutes** (apparent minus mean solar time).
pub fn equation_of_time(t: f64) -> f64 {
    let epsilon = obliquity_correction(t);
    let l0 = geometric_mean_longitude(t).to_radians();
    let e = orbit_eccentricity(t);
    let m = geometric_mean_anomaly(t).to_radians();

    let y = (epsilon.to_radians() / 2.0).tan().powi(2);

    let sin2l0 = (2.0 * l0).sin();
    let sinm = m.sin();
    let cos2l0 = (2.0 * l0).cos();
    let sin4l0 = (4.0 * l0).sin();
    let sin2m = (2.0 * m).sin();

    let etime = y * sin2l0 - 2.0 * e * sinm + 4.0 * e * y * sinm * cos2l0
        - 0.5 * y * y * sin4l0
        - 1.25 * e * e * sin2m;

    4.0 * etime.to_degrees()
}

/// Equation of centre of the Sun, degrees.
pub fn equation_of_center(t: f64) -> f64 {
    let m = geometric_mean_anomaly(t).to_radians();
    m.sin() * (1.914_602 - t * (0.004_817 + 0.000_014 * t))
        + (2.0 * m).sin() * (0.019_993 - 0.000_101 * t)
        + (3.0 * m).sin() * 0.000_289
}

/// True geometric longitude of the Sun, degrees.
pub fn true_longitude(t: f64) -> f64 {
    geometric_mean_longitude(t) + equation_of_center(t)
}

/// Apparent longitude (aberration and nutation in longitude applied), degrees.
pub fn apparent_longitude(t: f64) -> f64 {
    true_longitude(t) - 0.005_69 - 0.004_78 * lunar_node(t).to_radians().sin()
}

/// Solar declination, degrees.
pub fn declination(t: f64) -> f64 {
    let epsilon = obliquity_correction(t).to_radians();
    let lambda = apparent_longitude(t).to_radians();
    (epsilon.sin() * lambda.sin()).asin().to_degrees()
}

/// Every intermediate solar quantity for one Julian century value.
///
/// A pure function of `t`; fields are in degrees except where noted.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolarParameters {
    /// Julian centuries since J2000.0.
    pub t: f64,
    pub mean_longitude: f64,
    pub mean_anomaly: f64,
    /// Dimensionless.
    pub eccentricity: f64,
    pub mean_obliquity: f64,
    pub obliquity: f64,
    /// Minutes.
    pub equation_of_time: f64,
    pub equation_of_center: f64,
    pub true_longitude: f64,
    pub apparent_longitude: f64,
    pub declination: f64,
}

impl SolarParameters {
    /// Evaluate the full chain at `t` Julian centuries from J2000.0.
    pub fn at(t: Centuries) -> Self {
        let t = t.value();
        let mean_longitude = geometric_mean_longitude(t);
        let mean_anomaly = geometric_mean_anomaly(t);
        let eccentricity = orbit_eccentricity(t);
        let mean_obliquity = mean_obliquity(t);
        let obliquity = obliquity_correction(t);
        let equation_of_time = equation_of_time(t);
        let equation_of_center = equation_of_center(t);
        let true_longitude = mean_longitude + equation_of_center;
        let apparent_longitude =
            true_longitude - 0.005_69 - 0.004_78 * lunar_node(t).to_radians().sin();
        let declination = (obliquity.to_radians().sin() * apparent_longitude.to_radians().sin())
            .asin()
            .to_degrees();

        Self {
            t,
            mean_longitude,
            mean_anomaly,
            eccentricity,
            mean_obliquity,
            obliquity,
            equation_of_time,
            equation_of_center,
            true_longitude,
            apparent_longitude,
            declination,
        }
    }

    /// Evaluate the chain at a Julian Day (UT).
    #[inline]
    pub fn at_julian_date(jd: Time<JD>) -> Self {
        Self::at(jd.julian_centuries())
    }
}
