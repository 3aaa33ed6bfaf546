use chrono::{DateTime, Utc};

use crate::time;

/// One sample instant, carried with its Julian-day split so downstream frame
/// and flux code never re-derives it.
#[derive(Debug, Clone, Copy)]
pub struct EpochSample {
    pub timestamp: DateTime<Utc>,
    pub julian_day: i64,
    pub day_fraction: f64,
}

impl EpochSample {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        let (julian_day, day_fraction) = time::julian_day(timestamp);
        Self {
            timestamp,
            julian_day,
            day_fraction,
        }
    }

    pub fn julian_date(&self) -> f64 {
        self.julian_day as f64 + self.day_fraction
    }
}

/// Propagator output at one epoch: TEME position in kilometers.
#[derive(Debug, Clone, Copy)]
pub struct InertialState {
    pub epoch: EpochSample,
    pub position_km: [f64; 3],
}

/// Geodetic subsatellite point. Longitude is kept in (-180, 180].
#[derive(Debug, Clone, Copy)]
pub struct GeodeticPoint {
    pub epoch: EpochSample,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: f64,
}
