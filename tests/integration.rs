use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Timelike, Utc};
use qtty::{Day, Days};
use suntimes::{
    calculate, next_sunrise, sun_times, sunrise, sunset, Coordinates, DateRange, Error,
    EventError, JulianDate, PolarCondition, RangeBound, RangeSession, RangeType,
    SolarParameters, SunEvent, SunTimesRequest, TimeZoneResolver,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

fn session() -> RangeSession {
    RangeSession::new(utc().with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn julian_date_axis_is_ut() {
    let epoch = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
    let jd = JulianDate::from_civil(&epoch);
    assert_eq!(jd, JulianDate::J2000);
    assert_eq!(jd.quantity(), Days::new(2_451_545.0));

    // 14:00 at +02:00 is the same instant as 12:00 UT.
    let cest = FixedOffset::east_opt(2 * 3600).unwrap();
    let wall = cest.with_ymd_and_hms(2000, 1, 1, 14, 0, 0).unwrap();
    assert_eq!(JulianDate::from_civil(&wall), jd);
    assert!(jd.to_string().starts_with("JD "));
}

#[test]
fn day_fraction_tracks_wall_clock() {
    let morning = Utc.with_ymd_and_hms(2024, 3, 20, 6, 0, 0).unwrap();
    let evening = Utc.with_ymd_and_hms(2024, 3, 20, 18, 0, 0).unwrap();
    let span = JulianDate::from_civil(&evening) - JulianDate::from_civil(&morning);
    assert!((span.to::<Day>() - Days::new(0.5)).abs() < Days::new(1e-9));
}

#[test]
fn solar_declination_at_j2000() {
    let p = SolarParameters::at_julian_date(JulianDate::J2000);
    assert!((p.declination + 23.03).abs() < 0.1, "{}", p.declination);
    assert!(p.equation_of_time < -2.0 && p.equation_of_time > -4.0);
}

#[test]
fn new_york_winter_day_in_local_time() {
    init_logger();
    let nyc = Coordinates::new(40.7128, -74.0060).unwrap();
    let est = FixedOffset::west_opt(5 * 3600).unwrap();
    let day = est.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();

    let rise = sunrise(&day, &nyc).unwrap();
    let set = sunset(&day, &nyc).unwrap();
    assert_eq!((rise.hour(), rise.minute()), (7, 18));
    assert_eq!(set.hour(), 16);
    assert!(set - rise > Duration::hours(9) + Duration::minutes(30));
}

#[test]
fn next_sunrise_rolls_over_after_dawn() {
    let london = Coordinates::new(51.5074, -0.1278).unwrap();
    let noon = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
    let next = next_sunrise(&noon, &london).unwrap();
    assert_eq!(next.date_naive(), date(2024, 6, 22));
    assert!(next > noon);
}

#[test]
fn line_islands_sunrise_stays_on_local_date() {
    let kiritimati = Coordinates::new(1.87, -157.43).unwrap();
    let lint = FixedOffset::east_opt(14 * 3600).unwrap();
    let day = lint.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap();

    let rise = sunrise(&day, &kiritimati).unwrap();
    let set = sunset(&day, &kiritimati).unwrap();
    assert_eq!(rise.date_naive(), date(2024, 6, 21));
    assert_eq!(set.date_naive(), date(2024, 6, 21));
    assert_eq!((rise.hour(), rise.minute()), (6, 24));
    assert!(rise < set);
}

#[test]
fn next_sunrise_is_never_in_the_past() {
    let tokyo = Coordinates::new(35.6762, 139.6503).unwrap();
    let start = Utc.with_ymd_and_hms(2024, 6, 20, 0, 0, 0).unwrap();
    for hour in 0..48 {
        let after = start + Duration::hours(hour);
        let next = next_sunrise(&after, &tokyo).unwrap();
        assert!(next > after, "{after} -> {next}");
        assert!(next - after <= Duration::hours(24) + Duration::minutes(10), "{after} -> {next}");
    }
}

#[test]
fn polar_outcomes_are_reported() {
    init_logger();
    let svalbard = Coordinates::new(85.0, 15.0).unwrap();
    let summer = sun_times(date(2024, 6, 21), &svalbard);
    assert_eq!(summer.sunrise, SunEvent::PolarDay);
    assert_eq!(summer.day_length(), Duration::hours(24));

    let winter_day = Utc.with_ymd_and_hms(2024, 12, 21, 0, 0, 0).unwrap();
    match sunrise(&winter_day, &svalbard) {
        Err(EventError::NoEvent { condition, .. }) => {
            assert_eq!(condition, PolarCondition::PolarNight)
        }
        other => panic!("expected polar night, got {other:?}"),
    }
}

#[test]
fn month_range_produces_one_result_per_day() {
    init_logger();
    let quito = Coordinates::new(-0.1807, -78.4678).unwrap();
    let range = DateRange::from_date(date(2024, 2, 14), utc(), RangeType::Month, session()).unwrap();
    assert_eq!(range.format_range(), "2024-02-01 to 2024-02-29");

    let results = range.calculate_all(&quito);
    assert_eq!(results.len(), 29);
    for result in &results {
        // Near the equator the day stays close to twelve hours.
        let rise = result.sunrise.instant().unwrap();
        let set = result.sunset.instant().unwrap();
        let length = set - rise;
        assert!((length - Duration::hours(12)).num_minutes().abs() < 15);
    }
}

#[test]
fn walking_ranges_matches_manual_cursor() {
    let london = Coordinates::new(51.5074, -0.1278).unwrap();
    let mut range = DateRange::from_date(date(2024, 6, 1), utc(), RangeType::OneWeek, session()).unwrap();

    let mut walked = vec![range.calculate_results(&london)];
    while range.next() {
        walked.push(range.calculate_results(&london));
    }
    assert_eq!(walked, range.calculate_all(&london));

    let following = range.next_range().unwrap();
    assert_eq!(following.start_date(), date(2024, 6, 8));
    assert_eq!(following.prev_range().unwrap().start_date(), range.start_date());
}

#[test]
fn range_outside_window_names_bound() {
    let err = DateRange::from_date(date(2022, 6, 1), utc(), RangeType::ThreeDay, session())
        .unwrap_err();
    assert_eq!(err.bound(), RangeBound::Start);
    let err = DateRange::from_date(date(2025, 6, 20), utc(), RangeType::Month, session())
        .unwrap_err();
    assert_eq!(err.bound(), RangeBound::End);
}

struct Named;

impl TimeZoneResolver for Named {
    fn resolve(&self, name: &str, _at: DateTime<Utc>) -> Option<FixedOffset> {
        match name {
            "Europe/Paris" => FixedOffset::east_opt(3600),
            _ => None,
        }
    }
}

#[test]
fn service_uses_pluggable_resolver() {
    init_logger();
    let request = SunTimesRequest {
        name: "Paris".into(),
        latitude: 48.8566,
        longitude: 2.3522,
        date: "2024-01-10".into(),
        timezone: Some("Europe/Paris".into()),
    };
    let resolver: &dyn TimeZoneResolver = &Named;
    let response = calculate(&request, &session(), resolver).unwrap();
    assert_eq!(response.timezone, "Europe/Paris");
    assert!(response.sunrise_local.starts_with("08:"), "{response:?}");
    assert!(response.sunrise_local.ends_with(" Europe/Paris"));
    assert!(response.sunrise_utc.starts_with("07:"), "{response:?}");
}

#[test]
fn service_errors_unify_under_crate_error() {
    let request = SunTimesRequest {
        name: "nowhere".into(),
        latitude: 0.0,
        longitude: 200.0,
        date: "2024-06-01".into(),
        timezone: None,
    };
    let err = calculate(&request, &session(), &suntimes::FixedOffsetResolver).unwrap_err();
    assert!(matches!(err, Error::Coordinates(_)));
    assert!(err.to_string().contains("longitude 200"));
}

#[test]
fn core_types_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Coordinates>();
    assert_send_sync::<SunEvent>();
    assert_send_sync::<DateRange>();
    assert_send_sync::<RangeSession>();
    assert_send_sync::<JulianDate>();
}

#[cfg(feature = "serde")]
#[test]
fn results_serialize_to_json() {
    let london = Coordinates::new(51.5074, -0.1278).unwrap();
    let range = DateRange::from_date(date(2024, 6, 1), utc(), RangeType::ThreeDay, session()).unwrap();
    let result = range.calculate_results(&london);
    let json = serde_json::to_string(&result).unwrap();
    let back: suntimes::DateRangeResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);

    let polar = serde_json::to_string(&SunEvent::PolarNight).unwrap();
    assert_eq!(polar, "\"PolarNight\"");
}
