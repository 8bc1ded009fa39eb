/// Splits a libtest-style test path (`a::b::case`) into its non-empty segments.
pub fn split_test_path(path: &str) -> Vec<&str> {
    path.trim()
        .split("::")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn unquote_string(s: &str) -> String {
    let s = s.trim();
    if s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')))
    {
        s[1..s.len() - 1].to_string()
    } else {
        s.to_string()
    }
}
