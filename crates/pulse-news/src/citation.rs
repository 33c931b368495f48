//! Inline `[N]` citation markers.

/// Parse a marker at the start of `s`, which must begin with `[`.
///
/// Returns the cited number, if it fits in `usize`, and the marker length.
fn parse_marker(s: &str) -> Option<(Option<usize>, usize)> {
    let body = s.strip_prefix('[')?;
    let digits = body.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || body.as_bytes().get(digits) != Some(&b']') {
        return None;
    }
    Some((body[..digits].parse().ok(), digits + 2))
}

/// Remove every `[N]` marker and the whitespace right before it, then trim.
pub fn strip_markers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('[') {
        let (before, tail) = rest.split_at(pos);
        out.push_str(before);
        match parse_marker(tail) {
            Some((_, len)) => {
                let kept = out.trim_end().len();
                out.truncate(kept);
                rest = &tail[len..];
            }
            None => {
                out.push('[');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);

    out.trim().to_string()
}

/// Number cited by the first `[N]` marker in `text`.
pub fn first_marker(text: &str) -> Option<usize> {
    text.match_indices('[')
        .find_map(|(pos, _)| parse_marker(&text[pos..]))
        .and_then(|(n, _)| n)
}

/// URL for the first marker in `headline`, or empty when out of range.
///
/// Markers are 1-based; `citations` is 0-based.
pub fn resolve_url(headline: &str, citations: &[String]) -> String {
    first_marker(headline)
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| citations.get(i))
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn citations() -> Vec<String> {
        vec![
            "https://a.example/1".to_string(),
            "https://b.example/2".to_string(),
            "https://c.example/3".to_string(),
        ]
    }

    #[test]
    fn test_strip_markers() {
        assert_eq!(strip_markers("Fed cuts rates [1]"), "Fed cuts rates");
        assert_eq!(strip_markers("Oil [2] rises [3]  "), "Oil rises");
        assert_eq!(strip_markers("  No markers here "), "No markers here");
        assert_eq!(strip_markers("Keeps [a] and [] and [12"), "Keeps [a] and [] and [12");
        assert_eq!(strip_markers("[1] Leading"), "Leading");
    }

    #[test]
    fn test_first_marker() {
        assert_eq!(first_marker("Oil rises [2]"), Some(2));
        assert_eq!(first_marker("Mixed [x] then [4][5]"), Some(4));
        assert_eq!(first_marker("None"), None);
    }

    #[test]
    fn test_resolve_url_in_range() {
        assert_eq!(resolve_url("Oil rises [2]", &citations()), "https://b.example/2");
    }

    #[test]
    fn test_resolve_url_out_of_range() {
        assert_eq!(resolve_url("Oil rises [9]", &citations()), "");
        assert_eq!(resolve_url("Oil rises [0]", &citations()), "");
        assert_eq!(resolve_url("Oil rises", &citations()), "");
        assert_eq!(resolve_url("Oil rises [1]", &[]), "");
    }

    #[test]
    fn test_oversized_marker_is_stripped_but_unresolved() {
        let headline = "Huge [99999999999999999999999]";
        assert_eq!(strip_markers(headline), "Huge");
        assert_eq!(resolve_url(headline, &citations()), "");
    }
}
