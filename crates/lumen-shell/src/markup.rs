//! Markup escaping and span helpers.
//!
//! The output surface carries a small, fixed markup vocabulary: `<mark>`
//! for match highlights and `<span class="...">` for accent/dim/kbd text.
//! All content text is escaped before embedding, so a renderer can treat
//! anything outside those tags literally.

/// Escape the five markup-significant characters.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Reverse of `escape`, for renderers that unpack markup text.
pub fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&amp;", "&")
}

/// A `<span class="...">` wrapper with escaped content.
pub fn span(class: &str, text: &str) -> String {
    format!("<span class=\"{class}\">{}</span>", escape(text))
}

/// A match-highlight wrapper with escaped content.
pub fn mark(text: &str) -> String {
    format!("<mark class=\"match-highlight\">{}</mark>", escape(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_all_entities() {
        assert_eq!(escape("a&b<c>d\"e'f"), "a&amp;b&lt;c&gt;d&quot;e&#039;f");
    }

    #[test]
    fn escape_plain_text_unchanged() {
        assert_eq!(escape("hello world"), "hello world");
    }

    #[test]
    fn unescape_roundtrip() {
        let original = "a&b<c>d\"e'f";
        assert_eq!(unescape(&escape(original)), original);
    }

    #[test]
    fn span_escapes_content() {
        assert_eq!(
            span("dim", "<x>"),
            "<span class=\"dim\">&lt;x&gt;</span>"
        );
    }

    #[test]
    fn mark_wraps_and_escapes() {
        assert_eq!(mark("&"), "<mark class=\"match-highlight\">&amp;</mark>");
    }
}
