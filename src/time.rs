use chrono::{DateTime, Utc};

/// Julian date of the Unix epoch, 1970-01-01T00:00:00Z.
const JD_UNIX_EPOCH: f64 = 2_440_587.5;

/// Modified Julian day of the Unix epoch (MJD epoch is 1858-11-17T00:00:00Z).
const MJD_UNIX_EPOCH: f64 = 40_587.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Split a UTC timestamp into integer Julian day and day fraction.
///
/// Anchored so that 2000-01-01T00:00:00Z maps to JD 2451544.5, i.e.
/// `(2451544, 0.5)`.
pub fn julian_day(timestamp: DateTime<Utc>) -> (i64, f64) {
    let seconds =
        timestamp.timestamp() as f64 + f64::from(timestamp.timestamp_subsec_micros()) / 1.0e6;
    let jd = seconds / SECONDS_PER_DAY + JD_UNIX_EPOCH;
    let day = jd.trunc() as i64;
    (day, jd - day as f64)
}

/// Modified Julian day of a UTC timestamp.
pub fn modified_julian_day(timestamp: DateTime<Utc>) -> f64 {
    let (day, fraction) = julian_day(timestamp);
    day as f64 + fraction - 2_400_000.5
}

/// Recover a civil UTC timestamp from a modified Julian day.
pub fn from_modified_julian_day(mjd: f64) -> DateTime<Utc> {
    let micros = ((mjd - MJD_UNIX_EPOCH) * SECONDS_PER_DAY * 1.0e6).round() as i64;
    DateTime::from_timestamp_micros(micros).unwrap_or_default()
}

/// Greenwich Mean Sidereal Time for a Julian date, IAU-82 polynomial,
/// radians in [0, 2pi).
pub fn gmst_rad(jd: f64) -> f64 {
    let d = jd - 2_451_545.0;
    let t = d / 36_525.0;
    let gmst_deg =
        280.460_618_37 + 360.985_647_366_29 * d + 3.879_33e-4 * t * t - t * t * t / 38_710_000.0;
    gmst_deg.rem_euclid(360.0).to_radians()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn julian_day_at_2000_anchor() {
        let t = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        let (day, fraction) = julian_day(t);
        assert_eq!(day, 2_451_544);
        assert!((fraction - 0.5).abs() < 1e-9);
    }

    #[test]
    fn julian_day_reconstructs_timestamp() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 6, 30, 15).unwrap();
        let (day, fraction) = julian_day(t);
        let mjd = day as f64 + fraction - 2_400_000.5;
        let back = from_modified_julian_day(mjd);
        assert!((back - t).num_milliseconds().abs() <= 1);
    }

    #[test]
    fn mjd_round_trip_within_one_millisecond() {
        let samples = [
            Utc.with_ymd_and_hms(1960, 3, 14, 1, 59, 26).unwrap(),
            Utc.with_ymd_and_hms(1987, 11, 5, 23, 59, 59).unwrap(),
            Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 7, 31, 17, 45, 3).unwrap() + chrono::Duration::milliseconds(217),
            Utc.with_ymd_and_hms(2100, 12, 31, 0, 0, 1).unwrap(),
        ];
        for t in samples {
            let back = from_modified_julian_day(modified_julian_day(t));
            let error_ms = (back - t).num_milliseconds().abs();
            assert!(error_ms <= 1, "round trip off by {} ms for {}", error_ms, t);
        }
    }

    #[test]
    fn mjd_epoch_is_1858() {
        let t = from_modified_julian_day(0.0);
        assert_eq!(t, Utc.with_ymd_and_hms(1858, 11, 17, 0, 0, 0).unwrap());
    }

    #[test]
    fn gmst_at_j2000_noon() {
        // 280.46061837 deg at JD 2451545.0
        let expected = 280.460_618_37_f64.to_radians();
        assert!((gmst_rad(2_451_545.0) - expected).abs() < 1e-9);
    }

    #[test]
    fn gmst_midnight_2000() {
        // GMST at 2000-01-01T00:00:00Z is about 6h 39m 52s (~99.97 deg)
        let gmst = gmst_rad(2_451_544.5).to_degrees();
        assert!((gmst - 99.967_8).abs() < 0.01, "gmst {} deg", gmst);
    }

    #[test]
    fn gmst_stays_in_range() {
        for jd in [2_433_282.5, 2_451_545.25, 2_460_000.75, 2_488_069.5] {
            let gmst = gmst_rad(jd);
            assert!((0.0..std::f64::consts::TAU).contains(&gmst));
        }
    }
}
