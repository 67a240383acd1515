use crate::careers::ItemValue;

pub const TRUE_GLYPH: &str = "◯";
pub const FALSE_GLYPH: &str = "✗";

/// Plain-text form of an item value: booleans become ◯ / ✗, sequences are
/// joined with ", ", everything else is shown literally.
pub fn render_value(value: &ItemValue) -> String {
    match value {
        ItemValue::Boolean(true) => TRUE_GLYPH.to_string(),
        ItemValue::Boolean(false) => FALSE_GLYPH.to_string(),
        ItemValue::List(items) => items.join(", "),
        ItemValue::Number(n) => n.to_string(),
        ItemValue::Text(s) => s.clone(),
    }
}

/// `YYYY-MM-DD` → `YYYY年MM月DD日`. Input that does not split into three
/// parts is returned unchanged.
pub fn format_date(date: &str) -> String {
    let mut parts = date.split('-');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(y), Some(m), Some(d), None) => format!("{y}年{m}月{d}日"),
        _ => date.to_string(),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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
