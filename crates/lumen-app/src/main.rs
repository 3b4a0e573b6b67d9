//! LUMEN terminal entry point.
//!
//! A simulated command-line interface: scrolling output pane, prompt
//! line, status bar, and a Ctrl+K command palette. Commands come from the
//! built-ins plus the configuration document (`config.json`); an optional
//! positional argument deep-links straight into a registered command.

mod app_state;
mod input;
mod markdown;
mod providers;
mod render;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use ratatui::crossterm::event::{self, Event, KeyEventKind};

use app_state::AppState;
use lumen_shell::{CommandRegistry, register_builtins};
use providers::{FigletBanner, FsConfigSource, FsContentSource};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // `--config <path>` plus an optional deep-link command name.
    let mut config_path = PathBuf::from("config.json");
    let mut deep_link: Option<String> = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            if let Some(path) = args.next() {
                config_path = PathBuf::from(path);
            }
        } else {
            deep_link = Some(arg);
        }
    }

    let config = lumen_config::load_config(&config_path);
    log::info!("Starting LUMEN (accent: {})", config.default_accent);

    let mut registry = CommandRegistry::new();
    register_builtins(&mut registry);
    registry.register_config_commands(&config.commands);
    log::info!("Registered {} commands", registry.all_commands().len());

    let root = std::env::current_dir()?;
    let mut state = AppState::new(
        config,
        registry,
        FsContentSource::new(&root),
        FigletBanner::new(&root.join("fonts")),
        FsConfigSource::new(&config_path),
    );

    if state.session.config.show_banner_on_load {
        state.render_banner();
    }
    match deep_link {
        Some(name) if state.auto_invoke(&name) => {},
        _ => state.greet(),
    }

    let mut terminal = ratatui::init();
    let result = run_loop(&mut terminal, &mut state);
    ratatui::restore();
    log::info!("LUMEN shut down cleanly");
    result
}

/// The cooperative event loop: draw, wait for a key with a short timeout,
/// and advance the typing animation between events. Dispatch runs to
/// completion inside `handle_key`, so commands never overlap.
fn run_loop(terminal: &mut ratatui::DefaultTerminal, state: &mut AppState) -> Result<()> {
    while !state.quit {
        terminal.draw(|frame| render::draw(frame, state))?;

        let timeout = if state.session.typing.is_animating() {
            Duration::from_millis(15)
        } else {
            Duration::from_millis(120)
        };
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(mapped) = input::map_key(key) {
                        input::handle_key(state, mapped);
                    }
                },
                _ => {},
            }
        } else {
            state.session.typing.tick();
        }
    }
    Ok(())
}
