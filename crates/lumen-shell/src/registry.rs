//! Command trait, registry, and two-level name resolution.
//!
//! Commands are registered by name, either flat (`help`) or as verb-noun
//! pairs (`set theme`) held in a nested structure whose entries redirect
//! to a flat handler. Resolution is unified here: the parser's lookahead
//! and the dispatcher both go through `is_registered` / `resolve`.

use std::collections::{BTreeMap, HashMap};

use lumen_config::CommandRow;
use lumen_types::Result;

use crate::content::ContentCommand;
use crate::env::ShellEnv;
use crate::matcher;
use crate::parser::Flags;

/// Category used when a command declares none.
pub const DEFAULT_CATEGORY: &str = "system";

/// Description sentinel for commands without one.
pub const NO_DESCRIPTION: &str = "No description available";

/// Emoji used when a command declares none.
pub const DEFAULT_EMOJI: &str = "\u{25AA}\u{FE0F}";

/// A single executable command.
pub trait Command {
    /// The command name (what the user types), lowercase.
    fn name(&self) -> &str;

    /// One-line description for `help` and the palette.
    fn description(&self) -> &str;

    /// Usage string (e.g. "theme <color>").
    fn usage(&self) -> &str;

    /// Category for palette grouping.
    fn category(&self) -> &str {
        DEFAULT_CATEGORY
    }

    /// Emoji shown in `help` output.
    fn emoji(&self) -> &str {
        DEFAULT_EMOJI
    }

    /// Execute with positional arguments and parsed flags. Output goes to
    /// the surface carried in `env`.
    fn execute(&self, args: &[&str], flags: &Flags, env: &mut ShellEnv<'_>) -> Result<()>;
}

/// Registry metadata for one command name.
///
/// For verb-noun entries, `handler` names the flat handler the entry
/// redirects to.
#[derive(Debug, Clone)]
pub struct CommandInfo {
    pub handler: String,
    pub desc: String,
    pub category: String,
    /// Declared long-flag to short-flag aliases (not enforced).
    pub flag_aliases: BTreeMap<String, String>,
}

impl CommandInfo {
    pub fn new(handler: &str, desc: &str, category: &str) -> Self {
        Self {
            handler: handler.to_string(),
            desc: desc.to_string(),
            category: category.to_string(),
            flag_aliases: BTreeMap::new(),
        }
    }
}

/// Registry of available commands.
///
/// Holds the handler table plus parallel metadata maps and the nested
/// verb-noun structure. Registration order is preserved: the palette's
/// filter groups and the suggestion tie-break both depend on it.
#[derive(Default)]
pub struct CommandRegistry {
    handlers: HashMap<String, Box<dyn Command>>,
    handler_order: Vec<String>,
    descriptions: HashMap<String, String>,
    emojis: HashMap<String, String>,
    flat: HashMap<String, CommandInfo>,
    nested: HashMap<String, HashMap<String, CommandInfo>>,
    nested_order: Vec<(String, String)>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command. Replaces any existing command with the same name.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        let name = cmd.name().to_string();
        if !self.handlers.contains_key(&name) {
            self.handler_order.push(name.clone());
        }
        if !cmd.description().is_empty() {
            self.descriptions
                .insert(name.clone(), cmd.description().to_string());
        }
        self.emojis.insert(name.clone(), cmd.emoji().to_string());
        self.handlers.insert(name, cmd);
    }

    /// Attach metadata for a flat (single-token) command name.
    pub fn register_flat_info(&mut self, name: &str, info: CommandInfo) {
        self.flat.insert(name.to_string(), info);
    }

    /// Attach metadata for a verb-noun pair, creating the verb bucket on
    /// demand.
    pub fn register_nested_info(&mut self, verb: &str, noun: &str, info: CommandInfo) {
        let bucket = self.nested.entry(verb.to_string()).or_default();
        if !bucket.contains_key(noun) {
            self.nested_order
                .push((verb.to_string(), noun.to_string()));
        }
        bucket.insert(noun.to_string(), info);
    }

    /// Register commands contributed by the configuration document.
    ///
    /// Rows missing a name or a markdown reference are skipped silently --
    /// they are malformed config rows, not errors. Re-registering an
    /// existing name overwrites it.
    pub fn register_config_commands(&mut self, rows: &[CommandRow]) {
        for row in rows {
            let name = row.name.trim().to_lowercase();
            let Some(markdown) = row.markdown.as_deref().filter(|m| !m.is_empty()) else {
                continue;
            };
            if name.is_empty() {
                continue;
            }
            let desc = row.description.clone().unwrap_or_default();
            let category = row.category.clone().unwrap_or_else(|| "info".to_string());
            self.register(Box::new(ContentCommand::new(
                &name,
                &desc,
                row.emoji.as_deref(),
                &category,
                markdown,
            )));
            let info = CommandInfo::new(&name, &desc, &category);
            let parts: Vec<&str> = name.split_whitespace().collect();
            if parts.len() == 2 {
                self.register_nested_info(parts[0], parts[1], info);
            } else {
                self.register_flat_info(&name, info);
            }
        }
    }

    /// Resolve a command name to its handler.
    ///
    /// Direct flat lookup first; otherwise split on the interior space and
    /// follow the nested entry's handler redirect.
    pub fn resolve(&self, name: &str) -> Option<&dyn Command> {
        if let Some(cmd) = self.handlers.get(name) {
            return Some(cmd.as_ref());
        }
        let (verb, noun) = name.split_once(' ')?;
        let info = self.nested.get(verb)?.get(noun)?;
        self.handlers
            .get(info.handler.as_str())
            .map(|cmd| cmd.as_ref())
    }

    /// Whether `name` names a registered command (flat or verb-noun).
    pub fn is_registered(&self, name: &str) -> bool {
        if self.handlers.contains_key(name) || self.flat.contains_key(name) {
            return true;
        }
        match name.split_once(' ') {
            Some((verb, noun)) => self
                .nested
                .get(verb)
                .is_some_and(|bucket| bucket.contains_key(noun)),
            None => false,
        }
    }

    /// Every invocable command name: flat handler names without spaces
    /// (registration order), then verb-noun pairs reconstructed from the
    /// nested structure (registration order).
    pub fn all_commands(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .handler_order
            .iter()
            .filter(|name| !name.contains(' '))
            .cloned()
            .collect();
        for (verb, noun) in &self.nested_order {
            out.push(format!("{verb} {noun}"));
        }
        out
    }

    /// Handler names (including multi-word ones), registration order.
    pub fn handler_names(&self) -> Vec<String> {
        self.handler_order.clone()
    }

    /// Category for a command name, defaulting to the system category.
    pub fn category_of(&self, name: &str) -> String {
        if let Some(info) = self.flat.get(name) {
            if !info.category.is_empty() {
                return info.category.clone();
            }
            return DEFAULT_CATEGORY.to_string();
        }
        for (verb, noun) in &self.nested_order {
            if let Some(info) = self.nested.get(verb).and_then(|bucket| bucket.get(noun))
                && info.handler == name
                && !info.category.is_empty()
            {
                return info.category.clone();
            }
        }
        DEFAULT_CATEGORY.to_string()
    }

    /// Description for a command name, defaulting to the sentinel.
    pub fn description_of(&self, name: &str) -> String {
        if let Some(desc) = self.descriptions.get(name).filter(|d| !d.is_empty()) {
            return desc.clone();
        }
        if let Some(info) = self.flat.get(name).filter(|i| !i.desc.is_empty()) {
            return info.desc.clone();
        }
        for (verb, noun) in &self.nested_order {
            if let Some(info) = self.nested.get(verb).and_then(|bucket| bucket.get(noun))
                && info.handler == name
                && !info.desc.is_empty()
            {
                return info.desc.clone();
            }
        }
        NO_DESCRIPTION.to_string()
    }

    /// Emoji for a command name, defaulting to a plain bullet.
    pub fn emoji_of(&self, name: &str) -> String {
        self.emojis
            .get(name)
            .cloned()
            .unwrap_or_else(|| DEFAULT_EMOJI.to_string())
    }

    /// Best-effort suggestion for a mistyped command name.
    pub fn suggest(&self, input: &str) -> Option<String> {
        let names = self.all_commands();
        matcher::suggest_command(input, names.iter().map(String::as_str))
    }

    /// Palette filter over all command names.
    pub fn filter(&self, query: &str) -> Vec<String> {
        matcher::filter_commands(query, &self.all_commands())
    }

    /// Completions for a partial command name (prefix matches).
    pub fn completions(&self, partial: &str) -> Vec<String> {
        self.all_commands()
            .into_iter()
            .filter(|name| name.starts_with(partial))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Flags as ParsedFlags;

    struct Named(&'static str);
    impl Command for Named {
        fn name(&self) -> &str {
            self.0
        }
        fn description(&self) -> &str {
            "desc"
        }
        fn usage(&self) -> &str {
            self.0
        }
        fn execute(&self, _: &[&str], _: &ParsedFlags, _: &mut ShellEnv<'_>) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn register_and_resolve_flat() {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(Named("echo")));
        assert!(reg.resolve("echo").is_some());
        assert!(reg.resolve("missing").is_none());
    }

    #[test]
    fn nested_entry_redirects_to_flat_handler() {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(Named("theme")));
        reg.register_nested_info("set", "theme", CommandInfo::new("theme", "", "system"));
        let cmd = reg.resolve("set theme").expect("nested resolution");
        assert_eq!(cmd.name(), "theme");
        assert!(reg.is_registered("set theme"));
        assert!(!reg.is_registered("set banner"));
    }

    #[test]
    fn all_commands_excludes_spaced_flat_names() {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(Named("theme")));
        reg.register(Box::new(Named("set theme")));
        reg.register_nested_info("set", "theme", CommandInfo::new("theme", "", "system"));
        let all = reg.all_commands();
        // The spaced handler name appears exactly once, via the nested
        // reconstruction.
        assert_eq!(
            all.iter().filter(|name| *name == "set theme").count(),
            1
        );
        assert!(all.contains(&"theme".to_string()));
    }

    #[test]
    fn all_commands_preserves_registration_order() {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(Named("zeta")));
        reg.register(Box::new(Named("alpha")));
        reg.register_nested_info("show", "about", CommandInfo::new("show about", "", "info"));
        assert_eq!(reg.all_commands(), vec!["zeta", "alpha", "show about"]);
    }

    #[test]
    fn reregistration_overwrites_without_duplicating() {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(Named("echo")));
        reg.register(Box::new(Named("echo")));
        assert_eq!(reg.all_commands(), vec!["echo"]);
    }

    #[test]
    fn metadata_defaults() {
        let reg = CommandRegistry::new();
        assert_eq!(reg.category_of("nope"), DEFAULT_CATEGORY);
        assert_eq!(reg.description_of("nope"), NO_DESCRIPTION);
        assert_eq!(reg.emoji_of("nope"), DEFAULT_EMOJI);
    }

    #[test]
    fn nested_metadata_found_by_handler_reference() {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(Named("show about")));
        reg.register_nested_info(
            "show",
            "about",
            CommandInfo::new("show about", "About page", "info"),
        );
        assert_eq!(reg.category_of("show about"), "info");
    }

    #[test]
    fn config_rows_register_flat_and_nested() {
        let mut reg = CommandRegistry::new();
        let rows = vec![
            CommandRow {
                name: "About".into(),
                description: Some("About me".into()),
                emoji: Some("\u{1F464}".into()),
                markdown: Some("about.md".into()),
                category: None,
            },
            CommandRow {
                name: "Show Projects".into(),
                description: Some("Project list".into()),
                emoji: None,
                markdown: Some("projects".into()),
                category: Some("portfolio".into()),
            },
            // Malformed rows: skipped silently.
            CommandRow {
                name: "broken".into(),
                markdown: None,
                ..CommandRow::default()
            },
            CommandRow {
                name: "".into(),
                markdown: Some("x.md".into()),
                ..CommandRow::default()
            },
        ];
        reg.register_config_commands(&rows);
        assert!(reg.resolve("about").is_some());
        assert!(reg.resolve("show projects").is_some());
        assert!(reg.resolve("broken").is_none());
        assert_eq!(reg.category_of("about"), "info");
        assert_eq!(reg.category_of("show projects"), "portfolio");
        assert_eq!(reg.description_of("about"), "About me");
        assert_eq!(reg.emoji_of("about"), "\u{1F464}");
        let all = reg.all_commands();
        assert!(all.contains(&"about".to_string()));
        assert!(all.contains(&"show projects".to_string()));
    }

    #[test]
    fn completions_are_prefix_matches() {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(Named("theme")));
        reg.register(Box::new(Named("help")));
        reg.register_nested_info("set", "theme", CommandInfo::new("theme", "", "system"));
        assert_eq!(reg.completions("the"), vec!["theme"]);
        assert_eq!(reg.completions("se"), vec!["set theme"]);
        assert!(reg.completions("zz").is_empty());
    }
}
