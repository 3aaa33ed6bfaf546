mod bridge;
mod error;
mod library;
mod model;

pub use bridge::{sample_flux, sample_species, FluxSample};
pub use error::FluxError;
pub use library::{IrbemLibrary, NENE_MAX};
pub use model::ModelId;

use crate::track::GeodeticPoint;

/// Native "no data" sentinel: any flux at or below this is meaningless.
/// The bridge normalizes it away; nothing past the bridge compares against it.
pub const NO_DATA_SENTINEL: f64 = -1.0e30;

/// One ephemeris row in the form the native flux library consumes.
/// Longitude is in [0, 360), unlike everywhere else in this crate.
#[derive(Debug, Clone, Copy)]
pub struct FluxPoint {
    pub year: i32,
    pub day_of_year: i32,
    pub seconds_of_day: f64,
    pub altitude_km: f64,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl FluxPoint {
    pub fn from_geodetic(point: &GeodeticPoint) -> Self {
        use chrono::{Datelike, Timelike};

        // Round-trip through MJD: the native layer's notion of time is a day
        // count, and the decomposition must match what it reconstructs.
        let civil = crate::time::from_modified_julian_day(crate::time::modified_julian_day(
            point.epoch.timestamp,
        ));
        let seconds_of_day = f64::from(civil.num_seconds_from_midnight())
            + f64::from(civil.nanosecond()) / 1.0e9;
        Self {
            year: civil.year(),
            day_of_year: civil.ordinal() as i32,
            seconds_of_day,
            altitude_km: point.altitude_km,
            latitude_deg: point.latitude_deg,
            longitude_deg: point.longitude_deg.rem_euclid(360.0),
        }
    }
}

/// A bounded-capacity flux table. `IrbemLibrary` is the production
/// implementation; tests substitute their own.
pub trait FluxTable {
    /// Maximum number of ephemeris rows one `compute` call accepts.
    fn max_rows(&self) -> usize;

    /// Differential flux at one fixed energy for up to `max_rows` points,
    /// in the native cm^-2*sec^-1*MeV^-1 scale, sentinel values included.
    fn compute(
        &self,
        points: &[FluxPoint],
        energy_mev: f64,
        model: ModelId,
    ) -> Result<Vec<f64>, FluxError>;
}
