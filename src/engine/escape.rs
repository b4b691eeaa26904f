use regex::Regex;
use std::sync::OnceLock;

/// Escape a backend-supplied string for interpolation into display markup.
///
/// Total over arbitrary input. Not idempotent: escaping twice double-escapes,
/// so callers escape exactly once, at the point of interpolation. The single
/// place that does so is `tui::markup::interp`.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Reverse of `escape_text`, applied by the markup parser to text runs.
pub fn unescape_text(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Allow-list for any string headed into a style context unescaped
/// (dynamic foreground or border colors). Strict hex tokens only; CSS
/// keywords, function syntax, and everything else are rejected.
pub fn is_safe_color(s: &str) -> bool {
    static HEX_RE: OnceLock<Regex> = OnceLock::new();
    let re = HEX_RE.get_or_init(|| Regex::new(r"^#[0-9a-fA-F]{3,8}$").unwrap());
    re.is_match(s)
}
