use std::env;
use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::flux::ModelId;

/// Overrides the native flux library search with an explicit path.
pub const IRBEM_LIB_ENV: &str = "IRBEM_LIB_PATH";

// Fixed reference energies for the two sampled species.
pub const ELECTRON_ENERGY_MEV: f64 = 0.650;
pub const PROTON_ENERGY_MEV: f64 = 1.500;

/// Everything one invocation needs, resolved once at startup. Nothing below
/// `main` reads the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub norad_id: u32,
    pub start: DateTime<Utc>,
    pub hours: u32,
    pub step_seconds: u32,
    pub out: Option<PathBuf>,
    pub sources: SourceConfig,
    pub flux: FluxConfig,
}

#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub official_url: Option<String>,
    pub official_user: Option<String>,
    pub official_pass: Option<String>,
    pub celestrak_url: String,
}

#[derive(Debug, Clone)]
pub struct FluxConfig {
    pub library_path: Option<PathBuf>,
    pub electron_model: ModelId,
    pub proton_model: ModelId,
    pub electron_energy_mev: f64,
    pub proton_energy_mev: f64,
}

impl FluxConfig {
    pub fn from_env(electron_model: ModelId, proton_model: ModelId) -> Self {
        Self {
            library_path: env::var_os(IRBEM_LIB_ENV).map(PathBuf::from),
            electron_model,
            proton_model,
            electron_energy_mev: ELECTRON_ENERGY_MEV,
            proton_energy_mev: PROTON_ENERGY_MEV,
        }
    }
}
