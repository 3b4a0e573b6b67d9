//! Command dispatch core for LUMEN.
//!
//! The shell is a registry-based dispatch system. Commands implement the
//! `Command` trait and are registered by name, flat (`help`) or as
//! verb-noun pairs (`set theme`). `run_command` parses an input line,
//! resolves the name through the registry, invokes the handler, and
//! groups everything it emitted into one output block. The palette
//! controller provides a fuzzy-filtered, categorized view over the same
//! registry.

pub mod banner;
pub mod commands;
pub mod content;
pub mod dispatch;
pub mod env;
pub mod markup;
pub mod matcher;
pub mod output;
pub mod palette;
pub mod parser;
pub mod typing;

mod registry;

/// Register the built-in commands (help, clear, theme, set theme, reload).
pub use commands::register_builtins;
/// Parse and dispatch one submitted line.
pub use dispatch::run_command;
/// Collaborator seams implemented by the frontend.
pub use env::{BannerRenderer, Clock, ConfigSource, ContentSource, MarkdownRenderer};
/// Session state and the environment passed to every command.
pub use env::{Session, ShellEnv};
/// The output surface and its fragment types.
pub use output::{FeedbackKind, OutputNode, OutputSurface};
/// The palette overlay controller.
pub use palette::{Palette, PaletteItem, PaletteRow};
/// Parsed input line shapes.
pub use parser::{FlagValue, Flags, ParsedInput, parse_input};
/// A single executable command trait and its registry.
pub use registry::{Command, CommandInfo, CommandRegistry};
