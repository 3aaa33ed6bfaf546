mod error;
mod frame;
mod propagator;
mod types;

pub use error::TrackError;
pub use frame::{resolve_converter, FrameConverter, GmstPolynomialConverter, SiderealTimeConverter};
pub use propagator::{build_track, Propagator};
pub use types::{EpochSample, GeodeticPoint, InertialState};
