mod config;
mod flux;
mod report;
mod time;
mod tle;
mod track;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, Duration, Utc};
use clap::Parser;
use thiserror::Error;

use crate::config::{Config, FluxConfig, SourceConfig};
use crate::flux::{FluxError, IrbemLibrary, ModelId};
use crate::tle::TleError;
use crate::track::TrackError;

#[derive(Parser)]
#[command(name = "orbit-track")]
#[command(about = "TLE ground track with AE8/AP8 radiation flux sampling")]
struct Cli {
    /// NORAD catalog number
    #[arg(long)]
    norad_id: u32,
    /// Start time (ISO-8601, default now UTC)
    #[arg(long)]
    start: Option<DateTime<Utc>>,
    /// Prediction horizon in hours
    #[arg(long, default_value_t = 24, value_parser = clap::value_parser!(u32).range(1..))]
    hours: u32,
    /// Step size in seconds
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    step: u32,
    /// Output file path or directory
    #[arg(long)]
    out: Option<PathBuf>,
    /// Official TLE URL, may contain a {norad_id} placeholder
    #[arg(long)]
    official_url: Option<String>,
    /// Official source username
    #[arg(long)]
    official_user: Option<String>,
    /// Official source password
    #[arg(long)]
    official_pass: Option<String>,
    /// CelesTrak GP endpoint
    #[arg(long, default_value = tle::CELESTRAK_URL)]
    celestrak_url: String,
    /// Electron model (ae8min/ae8max or esa variants)
    #[arg(long, default_value = "ae8min")]
    electron_model: String,
    /// Proton model (ap8min/ap8max or esa variants)
    #[arg(long, default_value = "ap8min")]
    proton_model: String,
}

#[derive(Debug, Error)]
enum AppError {
    #[error("element set error: {0}")]
    Tle(#[from] TleError),
    #[error("track error: {0}")]
    Track(#[from] TrackError),
    #[error("flux error: {0}")]
    Flux(#[from] FluxError),
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let config = match build_config(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&config) {
        Ok(path) => {
            println!("Output: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn build_config(cli: Cli) -> Result<Config, AppError> {
    let electron_model = ModelId::parse(&cli.electron_model)?;
    let proton_model = ModelId::parse(&cli.proton_model)?;

    Ok(Config {
        norad_id: cli.norad_id,
        start: cli.start.unwrap_or_else(Utc::now),
        hours: cli.hours,
        step_seconds: cli.step,
        out: cli.out,
        sources: SourceConfig {
            official_url: cli.official_url,
            official_user: cli.official_user,
            official_pass: cli.official_pass,
            celestrak_url: cli.celestrak_url,
        },
        flux: FluxConfig::from_env(electron_model, proton_model),
    })
}

fn run(config: &Config) -> Result<PathBuf, AppError> {
    let tle = tle::fetch_tle(config.norad_id, &config.sources)?;
    println!("TLE source: {}", tle.source);
    log::debug!("TLE {}:\n{}\n{}", tle.norad_id, tle.line1, tle.line2);

    let end = config.start + Duration::hours(i64::from(config.hours));
    let step = Duration::seconds(i64::from(config.step_seconds));
    let converter = track::resolve_converter();
    let track = track::build_track(&tle, config.start, end, step, converter)?;
    log::info!("propagated {} track points", track.len());

    let library = IrbemLibrary::load(config.flux.library_path.as_deref())?;
    let flux = flux::sample_flux(&library, &track, &config.flux)?;

    let out_path = report::resolve_output_path(config.out.as_deref(), config.start)?;
    report::write_report(&out_path, &track, Some(&flux))?;
    Ok(out_path)
}
