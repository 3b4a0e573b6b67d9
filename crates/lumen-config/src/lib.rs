//! Configuration document for LUMEN.
//!
//! A `TermConfig` starts from compiled defaults and is shallow-merged with
//! a JSON overlay document (the terminal's `config.json`). The merged value
//! is owned by the session and immutable until `reload` builds a new one.
//! A missing or malformed document is never a user-visible error: the
//! loader logs a warning and the defaults stay in effect.

mod model;

pub use model::{BannerSize, CommandRow, ConfigOverlay, ContentConfig, TermConfig};

use std::fs;
use std::path::Path;

/// Load a configuration document from disk, merged over the defaults.
///
/// Absence or a parse failure keeps the defaults and logs a warning.
pub fn load_config(path: &Path) -> TermConfig {
    let mut cfg = TermConfig::default();
    match fs::read_to_string(path) {
        Ok(text) => match serde_json::from_str::<ConfigOverlay>(&text) {
            Ok(overlay) => {
                cfg.apply(overlay);
                log::info!("config loaded from {}", path.display());
            },
            Err(e) => {
                log::warn!("config {} is not valid JSON ({e}) -- using defaults", path.display());
            },
        },
        Err(e) => {
            log::warn!("config {} not readable ({e}) -- using defaults", path.display());
        },
    }
    cfg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = load_config(Path::new("/nonexistent/config.json"));
        assert_eq!(cfg.default_accent, "purple");
        assert!(cfg.theme_map.contains_key("cyan"));
    }
}
