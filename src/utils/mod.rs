// Utility functions

/// Placeholder values that mean "no value" in dataset cells
const MISSING_MARKERS: &[&str] = &["unknown", "n/a", "nan"];

/// Return true when a dataset cell is empty or holds a placeholder
pub fn is_missing(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || MISSING_MARKERS.iter().any(|m| value.eq_ignore_ascii_case(m))
}

/// Turn a raw recipe link into something a browser can open.
/// Placeholders produce `None`; links without a scheme get `https://`.
pub fn format_link(link: &str) -> Option<String> {
    if is_missing(link) {
        return None;
    }

    let link = link.trim();
    if link.starts_with("http://") || link.starts_with("https://") {
        Some(link.to_string())
    } else {
        Some(format!("https://{link}"))
    }
}

/// Truncate text to a maximum number of characters
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
