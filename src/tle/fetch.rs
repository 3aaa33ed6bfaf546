use std::time::Duration;

use super::parse::extract_tle;
use super::{Tle, TleError, TleSource};
use crate::config::SourceConfig;

pub const CELESTRAK_URL: &str = "https://celestrak.org/NORAD/elements/gp.php";

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Resolve a TLE for `norad_id`, trying the official source first when one is
/// configured and silently falling back to CelesTrak on any failure.
pub fn fetch_tle(norad_id: u32, sources: &SourceConfig) -> Result<Tle, TleError> {
    if let Some(url) = &sources.official_url {
        match fetch_official(norad_id, url, sources) {
            Ok(tle) => return Ok(tle),
            Err(e) => {
                log::warn!("official TLE source failed, falling back to CelesTrak: {}", e);
            }
        }
    }
    fetch_celestrak(norad_id, &sources.celestrak_url)
}

fn fetch_official(norad_id: u32, url: &str, sources: &SourceConfig) -> Result<Tle, TleError> {
    let url = url.replace("{norad_id}", &norad_id.to_string());
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()?;

    let mut request = client.get(&url);
    if let (Some(user), Some(pass)) = (&sources.official_user, &sources.official_pass) {
        request = request.basic_auth(user, Some(pass));
    }

    let text = request.send()?.error_for_status()?.text()?;
    let (line1, line2) = extract_tle(&text, norad_id)?;
    Ok(Tle {
        norad_id,
        line1,
        line2,
        source: TleSource::Official,
    })
}

fn fetch_celestrak(norad_id: u32, base_url: &str) -> Result<Tle, TleError> {
    let url = format!("{}?CATNR={}&FORMAT=TLE", base_url, norad_id);
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()?;

    let text = client.get(&url).send()?.error_for_status()?.text()?;
    let (line1, line2) = extract_tle(&text, norad_id)?;
    Ok(Tle {
        norad_id,
        line1,
        line2,
        source: TleSource::Celestrak,
    })
}
