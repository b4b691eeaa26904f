//! Display markup for panel content.
//!
//! Backend strings never reach a styled line directly. They enter through
//! `interp`, the single interpolation point, which escapes text fields and
//! allow-lists color fields; `parse_line` then turns the markup into
//! ratatui spans. Supported tags: `<b>`, `<dim>`, `<fg=#hex>`, closed by
//! `</>`. Entities: `&amp; &lt; &gt; &quot; &#39;`.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::engine::escape::{escape_text, is_safe_color, unescape_text};
use crate::tui::theme;

/// A typed interpolation field. There is deliberately no raw-string
/// variant, so an unescaped backend value cannot be interpolated.
pub enum Field<'a> {
    Text(&'a str),
    Owned(String),
    Color(&'a str),
}

impl<'a> Field<'a> {
    /// An untrusted display string; escaped on interpolation.
    pub fn text(s: &'a str) -> Self {
        Field::Text(s)
    }

    /// A value formatted by us (money, counts). Still escaped, which is a
    /// no-op for the characters these formats produce.
    pub fn owned(s: String) -> Self {
        Field::Owned(s)
    }

    pub fn money(v: f64) -> Self {
        Field::Owned(format!("${v:.2}"))
    }

    pub fn count(v: usize) -> Self {
        Field::Owned(v.to_string())
    }

    /// A color token headed for a style context. Rejected tokens fall back
    /// to `fallback`, which must be a trusted literal.
    pub fn color(s: Option<&'a str>, fallback: &'static str) -> Self {
        match s {
            Some(c) if is_safe_color(c) => Field::Color(c),
            _ => Field::Color(fallback),
        }
    }
}

/// Replace each `{}` in `template` with the corresponding field, escaping
/// or validating per the field's type. Surplus placeholders render empty.
pub fn interp(template: &str, fields: &[Field]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut idx = 0;
    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        match fields.get(idx) {
            Some(Field::Text(s)) => out.push_str(&escape_text(s)),
            Some(Field::Owned(s)) => out.push_str(&escape_text(s)),
            Some(Field::Color(c)) => out.push_str(c),
            None => {}
        }
        idx += 1;
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}

/// Parse one line of markup into styled spans. Unknown tags render as
/// literal text rather than being interpreted.
pub fn parse_line(markup: &str) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut stack: Vec<Style> = Vec::new();
    let mut style = Style::default();
    let mut text = String::new();
    let mut rest = markup;

    let mut flush = |text: &mut String, style: Style, spans: &mut Vec<Span<'static>>| {
        if !text.is_empty() {
            spans.push(Span::styled(unescape_text(text), style));
            text.clear();
        }
    };

    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        let after = &rest[open..];
        let Some(close) = after.find('>') else {
            // Dangling '<': treat the remainder as text.
            text.push_str(after);
            rest = "";
            break;
        };
        let tag = &after[1..close];
        match apply_tag(tag, style) {
            TagEffect::Push(next) => {
                flush(&mut text, style, &mut spans);
                stack.push(style);
                style = next;
            }
            TagEffect::Pop => {
                flush(&mut text, style, &mut spans);
                style = stack.pop().unwrap_or_default();
            }
            TagEffect::NotATag => {
                // Keep it visible instead of guessing at intent.
                text.push_str(&after[..close + 1]);
            }
        }
        rest = &after[close + 1..];
    }
    text.push_str(rest);
    flush(&mut text, style, &mut spans);
    Line::from(spans)
}

enum TagEffect {
    Push(Style),
    Pop,
    NotATag,
}

fn apply_tag(tag: &str, current: Style) -> TagEffect {
    match tag {
        "/" => TagEffect::Pop,
        "b" => TagEffect::Push(current.add_modifier(Modifier::BOLD)),
        "dim" => TagEffect::Push(current.add_modifier(Modifier::DIM)),
        _ => {
            if let Some(hex) = tag.strip_prefix("fg=") {
                match theme::hex_color(hex) {
                    Some(color) => TagEffect::Push(current.fg(color)),
                    None => TagEffect::Push(current),
                }
            } else {
                TagEffect::NotATag
            }
        }
    }
}
