//! Built-in commands for the LUMEN terminal.

use std::collections::BTreeMap;

use lumen_types::Result;

use crate::banner;
use crate::env::ShellEnv;
use crate::markup::{escape, span};
use crate::parser::Flags;
use crate::registry::{Command, CommandInfo, CommandRegistry};

const THEME_DESC: &str = "Change the accent color theme [purple|cyan|green|orange]";

/// Register all built-in commands into a registry.
pub fn register_builtins(reg: &mut CommandRegistry) {
    reg.register(Box::new(HelpCmd));
    reg.register(Box::new(ClearCmd));
    reg.register(Box::new(ThemeCmd));
    reg.register(Box::new(SetThemeCmd));
    reg.register(Box::new(ReloadCmd));

    reg.register_flat_info(
        "help",
        CommandInfo::new("help", "Show available commands and shortcuts", "system"),
    );
    reg.register_flat_info(
        "clear",
        CommandInfo::new("clear", "Clear the terminal output", "system"),
    );
    reg.register_flat_info("theme", CommandInfo::new("theme", THEME_DESC, "system"));
    reg.register_flat_info(
        "reload",
        CommandInfo::new(
            "reload",
            "Reload configuration from config.json and update banner",
            "system",
        ),
    );

    // "set theme" redirects to the theme handler and declares (but does
    // not enforce) flag aliases.
    let mut info = CommandInfo::new("theme", THEME_DESC, "system");
    info.flag_aliases = BTreeMap::from([
        ("--color".to_string(), "-c".to_string()),
        ("--theme".to_string(), "-t".to_string()),
    ]);
    reg.register_nested_info("set", "theme", info);
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

struct HelpCmd;
impl Command for HelpCmd {
    fn name(&self) -> &str {
        "help"
    }
    fn description(&self) -> &str {
        "Show available commands and shortcuts"
    }
    fn usage(&self) -> &str {
        "help"
    }
    fn emoji(&self) -> &str {
        "\u{2753}"
    }
    fn execute(&self, _args: &[&str], _flags: &Flags, env: &mut ShellEnv<'_>) -> Result<()> {
        let registry = env.registry;
        let mut names = registry.handler_names();
        names.sort();

        env.surface.echo_line(span("dim", "Commands:"));
        for name in &names {
            let emoji = registry.emoji_of(name);
            let desc = registry.description_of(name);
            env.surface.echo_line(format!(
                "{} {} {}",
                escape(&emoji),
                span("accent", name),
                span("dim", &desc)
            ));
        }

        env.surface.echo_line(span("dim", "Shortcuts:"));
        for (keys, what) in [
            ("Ctrl+K", "Open command palette"),
            ("Ctrl+C", "Cancel current operation"),
            ("Ctrl+L", "Clear terminal"),
            ("\u{2191}/\u{2193}", "Navigate command history"),
            ("Tab", "Autocomplete command"),
            ("Esc", "Close palette"),
        ] {
            env.surface
                .echo_line(format!("{}  {}", span("kbd", keys), span("dim", what)));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// clear
// ---------------------------------------------------------------------------

struct ClearCmd;
impl Command for ClearCmd {
    fn name(&self) -> &str {
        "clear"
    }
    fn description(&self) -> &str {
        "Clear the terminal output"
    }
    fn usage(&self) -> &str {
        "clear"
    }
    fn emoji(&self) -> &str {
        "\u{1F9F9}"
    }
    fn execute(&self, _args: &[&str], _flags: &Flags, env: &mut ShellEnv<'_>) -> Result<()> {
        env.session.typing.settle();
        env.surface.clear();
        banner::render_configured_banner(env);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// theme / set theme
// ---------------------------------------------------------------------------

fn apply_theme(env: &mut ShellEnv<'_>, arg: Option<&str>, usage: &str) -> Result<()> {
    let color = arg.unwrap_or_default().to_lowercase();
    if env.session.config.accent_color(&color).is_none() {
        env.surface.echo_error("Invalid theme color", Some(usage));
        return Ok(());
    }
    env.session.accent = color.clone();
    env.surface.echo_success(
        &format!("Accent theme set to {color}"),
        Some("The terminal accent color has been updated."),
    );
    Ok(())
}

struct ThemeCmd;
impl Command for ThemeCmd {
    fn name(&self) -> &str {
        "theme"
    }
    fn description(&self) -> &str {
        "Change the accent color theme"
    }
    fn usage(&self) -> &str {
        "theme <color>"
    }
    fn emoji(&self) -> &str {
        "\u{1F3A8}"
    }
    fn execute(&self, args: &[&str], _flags: &Flags, env: &mut ShellEnv<'_>) -> Result<()> {
        let names = env.session.config.theme_names();
        let usage = format!("Usage: theme [{names}] or set theme [{names}]");
        apply_theme(env, args.first().copied(), &usage)
    }
}

struct SetThemeCmd;
impl Command for SetThemeCmd {
    fn name(&self) -> &str {
        "set theme"
    }
    fn description(&self) -> &str {
        "Change the accent color theme"
    }
    fn usage(&self) -> &str {
        "set theme <color>"
    }
    fn emoji(&self) -> &str {
        "\u{1F3A8}"
    }
    fn execute(&self, args: &[&str], _flags: &Flags, env: &mut ShellEnv<'_>) -> Result<()> {
        let names = env.session.config.theme_names();
        let usage = format!("Usage: set theme [{names}]");
        apply_theme(env, args.first().copied(), &usage)
    }
}

// ---------------------------------------------------------------------------
// reload
// ---------------------------------------------------------------------------

struct ReloadCmd;
impl Command for ReloadCmd {
    fn name(&self) -> &str {
        "reload"
    }
    fn description(&self) -> &str {
        "Reload configuration from config.json and update banner"
    }
    fn usage(&self) -> &str {
        "reload"
    }
    fn emoji(&self) -> &str {
        "\u{1F504}"
    }
    fn execute(&self, _args: &[&str], _flags: &Flags, env: &mut ShellEnv<'_>) -> Result<()> {
        env.surface.echo_info("Reloading configuration...", None);

        // A failing fetch keeps the current configuration; never a
        // user-visible error.
        match env.config_source.load() {
            Ok(fresh) => env.session.config = fresh,
            Err(e) => log::warn!("config reload failed ({e}) -- keeping current configuration"),
        }
        env.session.accent = env.session.config.default_accent.clone();

        env.surface.clear();
        if env.session.config.show_banner_on_load {
            banner::render_configured_banner(env);
        }
        env.surface.echo_success(
            "Configuration reloaded",
            Some("Banner and settings have been updated."),
        );
        Ok(())
    }
}
