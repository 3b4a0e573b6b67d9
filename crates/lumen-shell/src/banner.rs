//! Banner selection and rendering.
//!
//! Priority: configured `banner_text` through the ASCII-font capability,
//! then the raw `banner_content` literal, then the built-in banner. A
//! missing or failing font capability falls back silently.

use crate::env::ShellEnv;

/// Built-in banner, shown when the configuration provides none.
pub const BANNER: &str = r" ██╗     ██╗   ██╗███╗   ███╗███████╗███╗   ██╗
 ██║     ██║   ██║████╗ ████║██╔════╝████╗  ██║
 ██║     ██║   ██║██╔████╔██║█████╗  ██╔██╗ ██║
 ██║     ██║   ██║██║╚██╔╝██║██╔══╝  ██║╚██╗██║
 ███████╗╚██████╔╝██║ ╚═╝ ██║███████╗██║ ╚████║
 ╚══════╝ ╚═════╝ ╚═╝     ╚═╝╚══════╝╚═╝  ╚═══╝";

/// Render the configured banner onto the surface.
pub fn render_configured_banner(env: &mut ShellEnv<'_>) {
    let banner_text = env.session.config.banner_text.clone();
    let font = env.session.config.banner_ascii_font.clone();

    if let Some(text) = banner_text
        && env.banner.available()
    {
        match env.banner.render(&text, &font) {
            Ok(art) => {
                env.surface.echo_banner(art);
                return;
            },
            Err(e) => {
                log::warn!("ascii banner rendering failed: {e} -- falling back");
            },
        }
    }

    let content = env
        .session
        .config
        .banner_content
        .clone()
        .unwrap_or_else(|| BANNER.to_string());
    env.surface.echo_banner(content);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_banner_is_multiline_art() {
        assert!(BANNER.lines().count() >= 4);
        assert!(BANNER.contains('\u{2588}'));
    }
}
