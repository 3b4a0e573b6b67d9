//! Application state for the LUMEN frontend.

use lumen_config::TermConfig;
use lumen_shell::parser::Flags;
use lumen_shell::{CommandRegistry, OutputSurface, Palette, Session, ShellEnv, banner, run_command};

use crate::markdown::MarkdownLite;
use crate::providers::{FigletBanner, FsConfigSource, FsContentSource, SystemClock};

/// Everything the frontend owns: the shell core plus the collaborator
/// implementations it lends to every dispatch.
pub struct AppState {
    pub registry: CommandRegistry,
    pub session: Session,
    pub surface: OutputSurface,
    pub palette: Palette,
    /// The prompt line being edited.
    pub input_buf: String,
    /// The palette query line being edited (untrimmed).
    pub palette_input: String,
    pub quit: bool,
    clock: SystemClock,
    content: FsContentSource,
    markdown: MarkdownLite,
    banner: FigletBanner,
    config_source: FsConfigSource,
}

impl AppState {
    pub fn new(
        config: TermConfig,
        registry: CommandRegistry,
        content: FsContentSource,
        banner: FigletBanner,
        config_source: FsConfigSource,
    ) -> Self {
        Self {
            registry,
            session: Session::new(config),
            surface: OutputSurface::new(),
            palette: Palette::new(),
            input_buf: String::new(),
            palette_input: String::new(),
            quit: false,
            clock: SystemClock,
            content,
            markdown: MarkdownLite,
            banner,
            config_source,
        }
    }

    /// Borrow the shell environment for one operation.
    pub fn env(&mut self) -> ShellEnv<'_> {
        ShellEnv {
            registry: &self.registry,
            session: &mut self.session,
            surface: &mut self.surface,
            clock: &self.clock,
            content: &self.content,
            markdown: &self.markdown,
            banner: &self.banner,
            config_source: &self.config_source,
        }
    }

    /// Dispatch one submitted line end-to-end.
    pub fn dispatch(&mut self, raw: &str) {
        let mut env = self.env();
        run_command(raw, &mut env);
    }

    /// Render the configured banner at the end of the surface.
    pub fn render_banner(&mut self) {
        let mut env = self.env();
        banner::render_configured_banner(&mut env);
    }

    /// Ctrl+L: empty the surface and re-render the banner.
    pub fn clear_and_banner(&mut self) {
        self.surface.clear();
        self.render_banner();
    }

    /// Deep link: invoke a registered command directly, with no arguments,
    /// no echo, and no output grouping. Returns false when the name is
    /// not registered.
    pub fn auto_invoke(&mut self, name: &str) -> bool {
        let mut env = self.env();
        let registry = env.registry;
        match registry.resolve(name) {
            Some(cmd) => {
                if let Err(e) = cmd.execute(&[], &Flags::new(), &mut env) {
                    log::warn!("deep link '{name}' failed: {e}");
                }
                true
            },
            None => false,
        }
    }

    /// The startup greeting, revealed by the typing animation.
    pub fn greet(&mut self) {
        self.session
            .typing
            .start(&mut self.surface, "Type \"help\" to get started.");
    }
}
