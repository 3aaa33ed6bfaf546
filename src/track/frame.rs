use super::types::{GeodeticPoint, InertialState};
use crate::time;

// WGS-84 ellipsoid, kilometers
const WGS84_A_KM: f64 = 6378.137;
const WGS84_F: f64 = 1.0 / 298.257_223_563;
const WGS84_E2: f64 = WGS84_F * (2.0 - WGS84_F);

/// One TEME-to-geodetic conversion strategy.
pub trait FrameConverter {
    /// Strategy name for diagnostics.
    fn name(&self) -> &'static str;

    /// Whether the linked geodesy support makes this strategy usable.
    fn available(&self) -> bool;

    fn to_geodetic(&self, state: &InertialState) -> GeodeticPoint;
}

/// Primary strategy: Earth rotation angle from the propagation crate's IAU
/// sidereal-time functions.
pub struct SiderealTimeConverter;

impl FrameConverter for SiderealTimeConverter {
    fn name(&self) -> &'static str {
        "iau-sidereal-time"
    }

    fn available(&self) -> bool {
        true
    }

    fn to_geodetic(&self, state: &InertialState) -> GeodeticPoint {
        let sidereal = sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(
            &state.epoch.timestamp.naive_utc(),
        ));
        geodetic_from_rotation(state, sidereal)
    }
}

/// Lowest-priority fallback: GMST polynomial over the sample's Julian date.
pub struct GmstPolynomialConverter;

impl FrameConverter for GmstPolynomialConverter {
    fn name(&self) -> &'static str {
        "gmst-polynomial"
    }

    fn available(&self) -> bool {
        true
    }

    fn to_geodetic(&self, state: &InertialState) -> GeodeticPoint {
        let gmst = time::gmst_rad(state.epoch.julian_date());
        geodetic_from_rotation(state, gmst)
    }
}

/// Pick the highest-ranked usable strategy. The ranking is fixed; nothing is
/// re-probed per call.
pub fn resolve_converter() -> &'static dyn FrameConverter {
    let candidates: [&'static dyn FrameConverter; 2] =
        [&SiderealTimeConverter, &GmstPolynomialConverter];
    for candidate in candidates {
        if candidate.available() {
            log::info!("frame conversion strategy: {}", candidate.name());
            return candidate;
        }
    }
    &GmstPolynomialConverter
}

fn geodetic_from_rotation(state: &InertialState, angle_rad: f64) -> GeodeticPoint {
    let ecef = teme_to_ecef(state.position_km, angle_rad);
    let (latitude_deg, longitude_deg, altitude_km) = ecef_to_geodetic_km(ecef);
    GeodeticPoint {
        epoch: state.epoch,
        latitude_deg,
        longitude_deg,
        altitude_km,
    }
}

/// Rotate a TEME position into ECEF: R3(angle) about the Z axis.
pub fn teme_to_ecef(position_km: [f64; 3], angle_rad: f64) -> [f64; 3] {
    let cos_a = angle_rad.cos();
    let sin_a = angle_rad.sin();
    [
        position_km[0] * cos_a + position_km[1] * sin_a,
        -position_km[0] * sin_a + position_km[1] * cos_a,
        position_km[2],
    ]
}

/// ECEF to WGS-84 geodetic, iterative Bowring method.
pub fn ecef_to_geodetic_km(position_km: [f64; 3]) -> (f64, f64, f64) {
    let [x, y, z] = position_km;
    let p = (x * x + y * y).sqrt();
    let lon = y.atan2(x);

    let b = WGS84_A_KM * (1.0 - WGS84_F);
    let ep2 = (WGS84_A_KM * WGS84_A_KM - b * b) / (b * b);

    let mut beta = (z / ((1.0 - WGS84_F) * p)).atan();
    for _ in 0..5 {
        let sin_beta = beta.sin();
        let cos_beta = beta.cos();
        let lat = (z + ep2 * b * sin_beta * sin_beta * sin_beta)
            .atan2(p - WGS84_E2 * WGS84_A_KM * cos_beta * cos_beta * cos_beta);
        beta = ((1.0 - WGS84_F) * lat.tan()).atan();
    }

    let sin_beta = beta.sin();
    let cos_beta = beta.cos();
    let lat = (z + ep2 * b * sin_beta * sin_beta * sin_beta)
        .atan2(p - WGS84_E2 * WGS84_A_KM * cos_beta * cos_beta * cos_beta);

    let sin_lat = lat.sin();
    let n = WGS84_A_KM / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
    let alt = if lat.cos().abs() > 1e-10 {
        p / lat.cos() - n
    } else {
        z.abs() - b
    };

    (
        lat.to_degrees(),
        normalize_longitude_deg(lon.to_degrees()),
        alt,
    )
}

/// Map any longitude in degrees into (-180, 180].
pub fn normalize_longitude_deg(longitude_deg: f64) -> f64 {
    let wrapped = longitude_deg.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
