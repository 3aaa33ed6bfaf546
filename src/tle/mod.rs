mod error;
mod fetch;
mod parse;

pub use error::TleError;
pub use fetch::{fetch_tle, CELESTRAK_URL};
pub use parse::extract_tle;

use strum_macros::Display;

/// Where an element set was resolved from. Informational only; it never
/// changes downstream behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum TleSource {
    Official,
    Celestrak,
}

/// A two-line element set for one satellite.
#[derive(Debug, Clone)]
pub struct Tle {
    pub norad_id: u32,
    pub line1: String,
    pub line2: String,
    pub source: TleSource,
}
