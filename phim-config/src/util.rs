use std::time::Duration;

/// Trims a raw value and drops it when nothing is left.
pub fn non_empty(raw: Option<String>) -> Option<String> {
    raw.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Parses a timeout such as `"30s"`, `"1m 30s"` or a bare number of
/// seconds.
pub fn parse_timeout(raw: &str) -> Result<Duration, String> {
    let trimmed = raw.trim();
    if let Ok(secs) = trimmed.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }
    humantime::parse_duration(trimmed).map_err(|err| err.to_string())
}

/// Route segments are stored without surrounding slashes so they can be
/// joined onto the base URL.
pub fn normalize_segment(raw: &str) -> String {
    raw.trim().trim_matches('/').to_string()
}
