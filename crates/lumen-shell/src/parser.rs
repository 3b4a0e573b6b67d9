//! Input line parsing.
//!
//! Parsing is pure and total: malformed flag syntax degrades to
//! boolean-flag or positional-arg treatment, never an error.

use std::collections::BTreeMap;

use crate::registry::CommandRegistry;

/// Value of a parsed flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    /// Flag present with no value (`--verbose`).
    Switch,
    /// Flag with a consumed value token (`--color cyan`).
    Value(String),
}

/// Parsed flags by name (without the dash prefix).
pub type Flags = BTreeMap<String, FlagValue>;

/// The result of parsing one submitted line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedInput {
    /// Resolved command name (lowercase), empty for a blank line.
    pub cmd: String,
    pub args: Vec<String>,
    pub flags: Flags,
}

/// Parse a raw input line into command, args, and flags.
///
/// The first token, lowercased, is the candidate command. `--name` and
/// `-name` tokens register flags; the following token is consumed as the
/// flag's value only when it does not itself start with a dash. If the
/// first two tokens form a registered verb-noun command, that pair
/// becomes the command and the duplicated first positional arg is
/// dropped.
pub fn parse_input(raw: &str, registry: &CommandRegistry) -> ParsedInput {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ParsedInput::default();
    }

    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    let cmd = parts[0].to_lowercase();
    let mut args = Vec::new();
    let mut flags = Flags::new();

    let mut i = 1;
    while i < parts.len() {
        let part = parts[i];
        let flag_name = part
            .strip_prefix("--")
            .or_else(|| part.strip_prefix('-'));
        match flag_name {
            Some(name) => match parts.get(i + 1) {
                Some(next) if !next.starts_with('-') => {
                    flags.insert(name.to_string(), FlagValue::Value((*next).to_string()));
                    i += 2;
                },
                _ => {
                    flags.insert(name.to_string(), FlagValue::Switch);
                    i += 1;
                },
            },
            None => {
                args.push(part.to_string());
                i += 1;
            },
        }
    }

    // Two-token lookahead: "<token0> <token1>" may name a verb-noun
    // command, in which case token1 was consumed by the command name.
    if parts.len() >= 2 {
        let verb_noun = format!("{} {}", parts[0], parts[1]).to_lowercase();
        if registry.is_registered(&verb_noun) {
            if !args.is_empty() {
                args.remove(0);
            }
            return ParsedInput {
                cmd: verb_noun,
                args,
                flags,
            };
        }
    }

    ParsedInput { cmd, args, flags }
}
