use super::TleError;

/// Extract a two-line element pair from free-form response text.
///
/// Scans trimmed, non-empty lines for adjacent lines starting with `"1 "` and
/// `"2 "`. A pair whose catalog-number field (columns 3-7 of line 1) matches
/// the requested id wins; failing that, a response holding exactly one pair is
/// accepted as the unambiguous single result.
pub fn extract_tle(text: &str, norad_id: u32) -> Result<(String, String), TleError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut pairs: Vec<(&str, &str)> = Vec::new();
    for i in 0..lines.len().saturating_sub(1) {
        if lines[i].starts_with("1 ") && lines[i + 1].starts_with("2 ") {
            if catalog_number(lines[i]) == Some(norad_id) {
                return Ok((lines[i].to_string(), lines[i + 1].to_string()));
            }
            pairs.push((lines[i], lines[i + 1]));
        }
    }

    if let [(line1, line2)] = pairs.as_slice() {
        return Ok((line1.to_string(), line2.to_string()));
    }
    Err(TleError::NotFound(norad_id))
}

fn catalog_number(line1: &str) -> Option<u32> {
    line1.get(2..7).and_then(|field| field.trim().parse().ok())
}
