use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::flux::FluxSample;
use crate::track::GeodeticPoint;

const COLUMNS: &[(&str, usize)] = &[
    ("Time (UTC)", 24),
    ("Detic Latitude (deg)", 20),
    ("Detic Longitude (deg)", 21),
    ("Detic Altitude (km)", 19),
    ("Ele Flux (0.650 MeV) (m^-2*sec^-1*MeV^-1)", 42),
    ("Pro Flux (1.500 MeV) (m^-2*sec^-1*MeV^-1)", 42),
];

const COLUMN_GAP: &str = "    ";

/// Write the fixed-width report. Without flux samples only the four track
/// columns are emitted.
pub fn write_report(
    path: &Path,
    track: &[GeodeticPoint],
    flux: Option<&[FluxSample]>,
) -> io::Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    let column_count = if flux.is_some() { COLUMNS.len() } else { 4 };
    let header: Vec<String> = COLUMNS[..column_count]
        .iter()
        .map(|&(name, width)| format!("{:>width$}", name))
        .collect();
    let dashes: Vec<String> = COLUMNS[..column_count]
        .iter()
        .map(|&(_, width)| "-".repeat(width))
        .collect();
    writeln!(out, "{}", header.join(COLUMN_GAP))?;
    writeln!(out, "{}", dashes.join(COLUMN_GAP))?;

    for (i, point) in track.iter().enumerate() {
        write!(
            out,
            "{:>24}{gap}{:>20.3}{gap}{:>21.3}{gap}{:>19.3}",
            format_time_ms(point.epoch.timestamp),
            point.latitude_deg,
            point.longitude_deg,
            point.altitude_km,
            gap = COLUMN_GAP,
        )?;
        if let Some(flux) = flux {
            let sample = &flux[i];
            write!(
                out,
                "{gap}{:>42}{gap}{:>42}",
                scientific(sample.electron),
                scientific(sample.proton),
                gap = COLUMN_GAP,
            )?;
        }
        writeln!(out)?;
    }
    out.flush()
}

/// Resolve the destination path: explicit file, existing directory, or a
/// derived `YYYYMMDDHH.txt` name. Parents are created as needed.
pub fn resolve_output_path(out: Option<&Path>, start: DateTime<Utc>) -> io::Result<PathBuf> {
    let derived_name = format!("{}.txt", start.format("%Y%m%d%H"));
    let Some(out) = out else {
        return Ok(PathBuf::from(derived_name));
    };

    if out.is_dir() {
        return Ok(out.join(derived_name));
    }
    // A trailing separator names a directory that may not exist yet
    if out
        .to_string_lossy()
        .ends_with(['/', '\\'])
    {
        fs::create_dir_all(out)?;
        return Ok(out.join(derived_name));
    }
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(out.to_path_buf())
}

/// `DD Mon YYYY HH:MM:SS.mmm`, always 24 characters.
fn format_time_ms(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%d %b %Y %H:%M:%S%.3f").to_string()
}

/// `%.6e`-style notation with a signed two-digit exponent.
fn scientific(value: f64) -> String {
    let formatted = format!("{:.6e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exponent.abs())
        }
        None => formatted,
    }
}
