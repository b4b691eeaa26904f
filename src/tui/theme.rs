use ratatui::style::{Color, Style};

use crate::engine::escape::is_safe_color;

/// Live indicator color. The recent indicator never reuses it.
pub const LIVE: &str = "#50fa7b";
/// Recent indicator color, visually distinct from LIVE.
pub const RECENT: &str = "#f1fa8c";
/// Fallback for rejected or missing backend accent colors.
pub const ACCENT: &str = "#8be9fd";
pub const WARN: &str = "#ffb86c";

pub fn border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn title_style() -> Style {
    Style::default().fg(Color::White)
}

/// Hex token → terminal color, gated by the same allow-list the markup
/// layer uses. 3/4/6/8-digit forms; alpha digits are ignored.
pub fn hex_color(s: &str) -> Option<Color> {
    if !is_safe_color(s) {
        return None;
    }
    let digits = &s[1..];
    let nybble = |c: u8| -> u8 {
        match c {
            b'0'..=b'9' => c - b'0',
            b'a'..=b'f' => c - b'a' + 10,
            b'A'..=b'F' => c - b'A' + 10,
            _ => 0,
        }
    };
    let bytes = digits.as_bytes();
    match bytes.len() {
        3 | 4 => {
            let r = nybble(bytes[0]);
            let g = nybble(bytes[1]);
            let b = nybble(bytes[2]);
            Some(Color::Rgb(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        6 | 8 => Some(Color::Rgb(
            nybble(bytes[0]) << 4 | nybble(bytes[1]),
            nybble(bytes[2]) << 4 | nybble(bytes[3]),
            nybble(bytes[4]) << 4 | nybble(bytes[5]),
        )),
        // 5- and 7-digit tokens pass the allow-list shape but don't map to
        // a channel layout; render unstyled rather than guessing.
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color_forms() {
        assert_eq!(hex_color("#fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(hex_color("#f00f"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(hex_color("#12345678"), Some(Color::Rgb(0x12, 0x34, 0x56)));
        assert_eq!(hex_color("#8be9fd"), Some(Color::Rgb(0x8b, 0xe9, 0xfd)));
    }

    #[test]
    fn hex_color_rejects_unsafe_and_odd_lengths() {
        assert_eq!(hex_color("red"), None);
        assert_eq!(hex_color("#gg0000"), None);
        assert_eq!(hex_color("#12345"), None);
        assert_eq!(hex_color("#1234567"), None);
    }

    #[test]
    fn live_and_recent_are_distinct() {
        assert_ne!(LIVE, RECENT);
        assert_ne!(hex_color(LIVE), hex_color(RECENT));
    }
}
