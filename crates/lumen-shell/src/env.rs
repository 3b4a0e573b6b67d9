//! Session state and the environment passed to every command.
//!
//! External collaborators (wall clock, content fetch, markdown and
//! ASCII-font rendering, configuration source) are trait seams owned
//! here and implemented by the frontend, so the core stays pure and
//! testable.

use std::collections::VecDeque;

use lumen_config::TermConfig;
use lumen_types::Result;

use crate::output::OutputSurface;
use crate::registry::CommandRegistry;
use crate::typing::TypingState;

/// Wall clock for command-echo timestamps.
pub trait Clock {
    /// `HH:MM:SS`.
    fn timestamp(&self) -> String;
}

/// Fetches content documents by path.
pub trait ContentSource {
    fn fetch(&self, path: &str) -> Result<String>;
}

/// Renders markdown text to the surface's markup vocabulary.
pub trait MarkdownRenderer {
    fn render(&self, markdown: &str) -> String;
}

/// Optional ASCII-font banner capability.
pub trait BannerRenderer {
    /// Whether the capability is present (font assets found, etc.).
    fn available(&self) -> bool;

    /// Render `text` in the named font as preformatted art.
    fn render(&self, text: &str, font: &str) -> Result<String>;
}

/// Produces a fresh configuration value for `reload`.
pub trait ConfigSource {
    fn load(&self) -> Result<TermConfig>;
}

/// Recent-commands ring capacity.
pub const RECENT_CAP: usize = 10;

/// How many ring entries the palette annotates as "Recent".
pub const RECENT_BADGE_WINDOW: usize = 5;

/// Per-session mutable state.
///
/// Owns the live configuration value; `reload` replaces it wholesale.
pub struct Session {
    pub config: TermConfig,
    /// Active accent theme name.
    pub accent: String,
    /// Submitted lines, append-only, with a recall cursor.
    pub history: Vec<String>,
    pub history_index: usize,
    /// Bounded ring of recently dispatched lines (drop-oldest).
    pub recent: VecDeque<String>,
    pub typing: TypingState,
}

impl Session {
    pub fn new(config: TermConfig) -> Self {
        let accent = config.default_accent.clone();
        Self {
            config,
            accent,
            history: Vec::new(),
            history_index: 0,
            recent: VecDeque::new(),
            typing: TypingState::new(),
        }
    }

    /// Record a submitted line and reset the recall cursor past the end.
    pub fn push_history(&mut self, line: &str) {
        if !line.trim().is_empty() {
            self.history.push(line.to_string());
        }
        self.history_index = self.history.len();
    }

    /// Recall the previous history entry, if any.
    pub fn history_prev(&mut self) -> Option<String> {
        if self.history_index == 0 {
            return None;
        }
        self.history_index -= 1;
        Some(
            self.history
                .get(self.history_index)
                .cloned()
                .unwrap_or_default(),
        )
    }

    /// Recall the next history entry; past the end yields an empty line.
    pub fn history_next(&mut self) -> Option<String> {
        if self.history_index >= self.history.len() {
            return None;
        }
        self.history_index += 1;
        Some(
            self.history
                .get(self.history_index)
                .cloned()
                .unwrap_or_default(),
        )
    }

    /// Push a dispatched line onto the recent ring (capacity 10).
    pub fn push_recent(&mut self, raw: &str) {
        if self.recent.len() >= RECENT_CAP {
            self.recent.pop_front();
        }
        self.recent.push_back(raw.to_string());
    }

    /// The last few ring entries, most-recent-first, for palette badges.
    pub fn recent_tail(&self) -> Vec<String> {
        self.recent
            .iter()
            .rev()
            .take(RECENT_BADGE_WINDOW)
            .cloned()
            .collect()
    }
}

/// Everything a command may touch while executing.
pub struct ShellEnv<'a> {
    pub registry: &'a CommandRegistry,
    pub session: &'a mut Session,
    pub surface: &'a mut OutputSurface,
    pub clock: &'a dyn Clock,
    pub content: &'a dyn ContentSource,
    pub markdown: &'a dyn MarkdownRenderer,
    pub banner: &'a dyn BannerRenderer,
    pub config_source: &'a dyn ConfigSource,
}
