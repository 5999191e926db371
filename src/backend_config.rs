use url::Url;

pub(crate) fn normalize_backend_url(raw: &str, default_backend_url: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return default_backend_url.to_string();
    }

    match Url::parse(trimmed) {
        Ok(mut parsed) if matches!(parsed.scheme(), "http" | "https") => {
            if parsed.path().is_empty() {
                parsed.set_path("/");
            }
            parsed.to_string()
        }
        _ => default_backend_url.to_string(),
    }
}

pub(crate) fn parse_clamped_millis(
    raw: Option<&str>,
    default_ms: u64,
    min_ms: u64,
    max_ms: u64,
) -> u64 {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .map(|value| value.clamp(min_ms, max_ms))
        .unwrap_or(default_ms)
}

pub(crate) fn parse_attempt_limit(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|limit| *limit > 0)
}

pub(crate) fn parse_enabled_flag(raw: Option<&str>, default_enabled: bool) -> bool {
    match raw.map(|value| value.trim().to_ascii_lowercase()) {
        Some(value) if matches!(value.as_str(), "0" | "false" | "off" | "no") => false,
        Some(value) if matches!(value.as_str(), "1" | "true" | "on" | "yes") => true,
        _ => default_enabled,
    }
}
