use chrono::{DateTime, Duration, Utc};
use sgp4::{Constants, Elements};

use super::frame::FrameConverter;
use super::types::{EpochSample, GeodeticPoint, InertialState};
use super::TrackError;
use crate::tle::Tle;

/// SGP4 propagator state for one element set.
pub struct Propagator {
    elements: Elements,
    constants: Constants,
}

impl Propagator {
    pub fn from_tle(tle: &Tle) -> Result<Self, TrackError> {
        let elements = Elements::from_tle(None, tle.line1.as_bytes(), tle.line2.as_bytes())?;
        let constants = Constants::from_elements(&elements)?;
        Ok(Self {
            elements,
            constants,
        })
    }

    /// TEME position in kilometers at one instant. Velocity is dropped;
    /// nothing downstream needs it.
    pub fn state_at(&self, timestamp: DateTime<Utc>) -> Result<InertialState, TrackError> {
        let minutes = self
            .elements
            .datetime_to_minutes_since_epoch(&timestamp.naive_utc())
            .map_err(|e| TrackError::Propagation(e.to_string()))?;
        let prediction = self
            .constants
            .propagate(minutes)
            .map_err(|e| TrackError::Propagation(e.to_string()))?;
        Ok(InertialState {
            epoch: EpochSample::new(timestamp),
            position_km: prediction.position,
        })
    }
}

/// Propagate a fixed-step geodetic ground track over `[start, end]`, end
/// boundary included when it lands exactly on a step.
///
/// Any propagation failure aborts the whole track: a degraded orbit model
/// invalidates every subsequent sample.
pub fn build_track(
    tle: &Tle,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    step: Duration,
    converter: &dyn FrameConverter,
) -> Result<Vec<GeodeticPoint>, TrackError> {
    let propagator = Propagator::from_tle(tle)?;

    let mut cursor = start;
    let mut points = Vec::new();
    while cursor <= end {
        let state = propagator.state_at(cursor)?;
        points.push(converter.to_geodetic(&state));
        cursor += step;
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tle::TleSource;
    use crate::track::resolve_converter;
    use chrono::TimeZone;

    // Canonical ISS element set (epoch 2008-09-20)
    const ISS_LINE1: &str =
        "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const ISS_LINE2: &str =
        "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    fn iss_tle() -> Tle {
        Tle {
            norad_id: 25544,
            line1: ISS_LINE1.to_string(),
            line2: ISS_LINE2.to_string(),
            source: TleSource::Celestrak,
        }
    }

    #[test]
    fn one_hour_track_has_61_points() {
        let start = Utc.with_ymd_and_hms(2008, 9, 20, 12, 0, 0).unwrap();
        let end = start + Duration::hours(1);
        let track =
            build_track(&iss_tle(), start, end, Duration::seconds(60), resolve_converter())
                .unwrap();
        assert_eq!(track.len(), 61);
    }

    #[test]
    fn track_count_matches_step_floor() {
        let start = Utc.with_ymd_and_hms(2008, 9, 20, 12, 0, 0).unwrap();
        // 10 minutes at a 7 s step: floor(600 / 7) + 1 = 86
        let end = start + Duration::seconds(600);
        let track =
            build_track(&iss_tle(), start, end, Duration::seconds(7), resolve_converter())
                .unwrap();
        assert_eq!(track.len(), 600 / 7 + 1);
    }

    #[test]
    fn track_altitudes_in_leo_band() {
        let start = Utc.with_ymd_and_hms(2008, 9, 20, 12, 0, 0).unwrap();
        let end = start + Duration::hours(1);
        let track =
            build_track(&iss_tle(), start, end, Duration::seconds(60), resolve_converter())
                .unwrap();
        for point in &track {
            assert!(
                (300.0..500.0).contains(&point.altitude_km),
                "altitude {} km out of ISS band",
                point.altitude_km
            );
            assert!(point.latitude_deg.abs() <= 52.0, "above orbit inclination");
            assert!(point.longitude_deg > -180.0 && point.longitude_deg <= 180.0);
        }
    }

    #[test]
    fn track_timestamps_are_strictly_increasing() {
        let start = Utc.with_ymd_and_hms(2008, 9, 20, 0, 0, 0).unwrap();
        let end = start + Duration::seconds(300);
        let track =
            build_track(&iss_tle(), start, end, Duration::seconds(30), resolve_converter())
                .unwrap();
        for pair in track.windows(2) {
            assert!(pair[1].epoch.timestamp > pair[0].epoch.timestamp);
        }
    }

    #[test]
    fn garbage_lines_fail_to_parse() {
        let tle = Tle {
            norad_id: 1,
            line1: "1 garbage".to_string(),
            line2: "2 garbage".to_string(),
            source: TleSource::Celestrak,
        };
        assert!(Propagator::from_tle(&tle).is_err());
    }
}
