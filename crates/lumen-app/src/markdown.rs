//! Native markdown-lite renderer.
//!
//! Renders the subset of markdown the content documents actually use
//! (headings, bullets, quotes, code fences, inline code and bold) into
//! the shell's markup vocabulary. All content text is escaped, so the
//! output is safe to embed regardless of what the document contains.

use lumen_shell::MarkdownRenderer;
use lumen_shell::markup::{escape, span};

pub struct MarkdownLite;

impl MarkdownRenderer for MarkdownLite {
    fn render(&self, markdown: &str) -> String {
        let mut out: Vec<String> = Vec::new();
        let mut in_code = false;
        for line in markdown.lines() {
            let trimmed = line.trim_end();
            if trimmed.trim_start().starts_with("```") {
                in_code = !in_code;
                continue;
            }
            if in_code {
                out.push(span("kbd", trimmed));
                continue;
            }
            if let Some(rest) = heading_text(trimmed) {
                out.push(span("accent", rest));
            } else if let Some(rest) = trimmed
                .strip_prefix("- ")
                .or_else(|| trimmed.strip_prefix("* "))
            {
                out.push(format!("\u{2022} {}", inline_markup(rest)));
            } else if let Some(rest) = trimmed.strip_prefix("> ") {
                out.push(span("dim", rest));
            } else {
                out.push(inline_markup(trimmed));
            }
        }
        out.join("\n")
    }
}

fn heading_text(line: &str) -> Option<&str> {
    for prefix in ["### ", "## ", "# "] {
        if let Some(rest) = line.strip_prefix(prefix) {
            return Some(rest);
        }
    }
    None
}

/// Inline spans: `` `code` `` becomes kbd, `**bold**` becomes accent.
/// Unbalanced markers degrade to styling the trailing segment.
fn inline_markup(text: &str) -> String {
    let mut out = String::new();
    for (i, chunk) in text.split('`').enumerate() {
        if i % 2 == 1 {
            out.push_str(&span("kbd", chunk));
        } else {
            out.push_str(&bold_markup(chunk));
        }
    }
    out
}

fn bold_markup(text: &str) -> String {
    let mut out = String::new();
    for (i, chunk) in text.split("**").enumerate() {
        if i % 2 == 1 {
            out.push_str(&span("accent", chunk));
        } else {
            out.push_str(&escape(chunk));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(md: &str) -> String {
        MarkdownLite.render(md)
    }

    #[test]
    fn headings_become_accent_lines() {
        assert_eq!(render("# Title"), span("accent", "Title"));
        assert_eq!(render("## Sub"), span("accent", "Sub"));
    }

    #[test]
    fn bullets_get_a_dot() {
        assert_eq!(render("- item"), "\u{2022} item");
        assert_eq!(render("* item"), "\u{2022} item");
    }

    #[test]
    fn quotes_are_dim() {
        assert_eq!(render("> quoted"), span("dim", "quoted"));
    }

    #[test]
    fn code_fences_wrap_as_kbd() {
        let md = "```\nlet x = 1;\n```";
        assert_eq!(render(md), span("kbd", "let x = 1;"));
    }

    #[test]
    fn inline_code_and_bold() {
        let out = render("run `help` for **info**");
        assert!(out.contains(&span("kbd", "help")));
        assert!(out.contains(&span("accent", "info")));
    }

    #[test]
    fn plain_text_is_escaped() {
        assert_eq!(render("a < b"), "a &lt; b");
    }

    #[test]
    fn multiline_documents_keep_line_structure() {
        let out = render("# T\n\nbody");
        assert_eq!(out.lines().count(), 3);
    }
}
