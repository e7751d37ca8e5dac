//! String Utilities

/// Truncate `s` to at most `max_chars` characters, appending an ellipsis when cut
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}

/// Trim trailing slashes from a base URL
pub fn trim_base_url(url: &str) -> &str {
    url.trim_end_matches('/')
}
