//! Content-document resolution and config-derived markdown commands.

use lumen_config::ContentConfig;
use lumen_types::Result;

use crate::env::ShellEnv;
use crate::parser::Flags;
use crate::registry::{Command, DEFAULT_EMOJI, NO_DESCRIPTION};

/// Slug form of a typed command: lowercase, `[a-z0-9-]` only, whitespace
/// and underscores collapsed to single dashes.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_dash = false;
    for ch in lowered.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else if ch.is_whitespace() || ch == '_' {
            pending_dash = true;
        }
        // Everything else is dropped.
    }
    // Collapse dash runs and trim the edges.
    let mut out = String::with_capacity(slug.len());
    let mut last_dash = true;
    for ch in slug.chars() {
        if ch == '-' {
            if !last_dash {
                out.push('-');
            }
            last_dash = true;
        } else {
            out.push(ch);
            last_dash = false;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Resolve the document path for a typed command.
///
/// Priority: explicit markdown file (extension appended unless already a
/// markdown extension), per-command map entry, typed-command slug,
/// handler id.
pub fn resolve_content_path(
    typed: &str,
    handler_id: Option<&str>,
    markdown_file: Option<&str>,
    cfg: &ContentConfig,
) -> String {
    if let Some(file) = markdown_file {
        if file.ends_with(".md") || file.ends_with(".markdown") {
            return format!("{}/{file}", cfg.dir);
        }
        return format!("{}/{file}{}", cfg.dir, cfg.ext);
    }
    if let Some(mapped) = cfg.map.get(typed) {
        return format!("{}/{mapped}", cfg.dir);
    }
    let slug = slugify(typed);
    if !slug.is_empty() {
        return format!("{}/{slug}{}", cfg.dir, cfg.ext);
    }
    format!("{}/{}{}", cfg.dir, handler_id.unwrap_or_default(), cfg.ext)
}

/// A command contributed by the configuration document: fetches a
/// markdown document and renders it into the output pane.
pub struct ContentCommand {
    name: String,
    desc: String,
    emoji: Option<String>,
    category: String,
    markdown: String,
}

impl ContentCommand {
    pub fn new(
        name: &str,
        desc: &str,
        emoji: Option<&str>,
        category: &str,
        markdown: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            desc: desc.to_string(),
            emoji: emoji.map(str::to_string),
            category: category.to_string(),
            markdown: markdown.to_string(),
        }
    }
}

impl Command for ContentCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        if self.desc.is_empty() {
            NO_DESCRIPTION
        } else {
            &self.desc
        }
    }

    fn usage(&self) -> &str {
        &self.name
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn emoji(&self) -> &str {
        self.emoji.as_deref().unwrap_or(DEFAULT_EMOJI)
    }

    fn execute(&self, _args: &[&str], _flags: &Flags, env: &mut ShellEnv<'_>) -> Result<()> {
        let path = resolve_content_path(
            &self.name,
            None,
            Some(&self.markdown),
            &env.session.config.content,
        );
        match env.content.fetch(&path) {
            Ok(md) => {
                let markup = env.markdown.render(&md);
                env.surface.echo_line(markup);
            },
            Err(e) => {
                log::debug!("content fetch failed for {path}: {e}");
                env.surface.echo_warning(
                    &format!("Content not found for \"{}\"", self.name),
                    Some(&path),
                );
            },
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> ContentConfig {
        ContentConfig::default()
    }

    // -- slugify --

    #[test]
    fn slugify_lowercases_and_dashes() {
        assert_eq!(slugify("Show About"), "show-about");
    }

    #[test]
    fn slugify_collapses_runs() {
        assert_eq!(slugify("a  __  b"), "a-b");
        assert_eq!(slugify("a--b"), "a-b");
    }

    #[test]
    fn slugify_strips_punctuation() {
        assert_eq!(slugify("what's new?"), "whats-new");
    }

    #[test]
    fn slugify_trims_edge_dashes() {
        assert_eq!(slugify("-edge-"), "edge");
        assert_eq!(slugify("  padded  "), "padded");
    }

    #[test]
    fn slugify_empty_when_nothing_survives() {
        assert_eq!(slugify("!!!"), "");
    }

    // -- resolve_content_path --

    #[test]
    fn explicit_markdown_file_used_directly() {
        let path = resolve_content_path("about", None, Some("about-page.md"), &cfg());
        assert_eq!(path, "content/about-page.md");
    }

    #[test]
    fn explicit_file_without_extension_gets_ext() {
        let path = resolve_content_path("about", None, Some("about-page"), &cfg());
        assert_eq!(path, "content/about-page.md");
    }

    #[test]
    fn markdown_long_extension_respected() {
        let path = resolve_content_path("about", None, Some("about.markdown"), &cfg());
        assert_eq!(path, "content/about.markdown");
    }

    #[test]
    fn map_entry_beats_slug() {
        let mut cfg = cfg();
        cfg.map
            .insert("show about".to_string(), "custom.md".to_string());
        let path = resolve_content_path("show about", None, None, &cfg);
        assert_eq!(path, "content/custom.md");
    }

    #[test]
    fn slug_fallback() {
        let path = resolve_content_path("Show About", None, None, &cfg());
        assert_eq!(path, "content/show-about.md");
    }

    #[test]
    fn handler_id_last_resort() {
        let path = resolve_content_path("!!!", Some("about"), None, &cfg());
        assert_eq!(path, "content/about.md");
    }

    #[test]
    fn content_dir_and_ext_come_from_config() {
        let mut cfg = cfg();
        cfg.dir = "docs".to_string();
        cfg.ext = ".txt".to_string();
        let path = resolve_content_path("about", None, None, &cfg);
        assert_eq!(path, "docs/about.txt");
    }
}
