//! Frontend implementations of the shell's collaborator seams.

use std::fs;
use std::path::{Path, PathBuf};

use figlet_rs::FIGfont;
use lumen_config::{ConfigOverlay, TermConfig};
use lumen_shell::{BannerRenderer, Clock, ConfigSource, ContentSource};
use lumen_types::{LumenError, Result};

/// Wall clock backed by the local timezone.
pub struct SystemClock;

impl Clock for SystemClock {
    fn timestamp(&self) -> String {
        chrono::Local::now().format("%H:%M:%S").to_string()
    }
}

/// Content documents fetched from disk, relative to a root directory.
pub struct FsContentSource {
    root: PathBuf,
}

impl FsContentSource {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }
}

impl ContentSource for FsContentSource {
    fn fetch(&self, path: &str) -> Result<String> {
        // Content paths are derived from typed commands; never follow them
        // out of the content root.
        if path.split('/').any(|segment| segment == "..") {
            return Err(LumenError::Content(path.to_string()));
        }
        let full = self.root.join(path);
        fs::read_to_string(&full).map_err(|_| LumenError::Content(path.to_string()))
    }
}

/// Configuration document re-read from disk for `reload`.
pub struct FsConfigSource {
    path: PathBuf,
}

impl FsConfigSource {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl ConfigSource for FsConfigSource {
    fn load(&self) -> Result<TermConfig> {
        let text = fs::read_to_string(&self.path)?;
        let overlay: ConfigOverlay = serde_json::from_str(&text)?;
        let mut cfg = TermConfig::default();
        cfg.apply(overlay);
        Ok(cfg)
    }
}

/// ASCII-font banner capability backed by figlet fonts.
///
/// The standard font ships embedded, so the capability is always present;
/// named fonts resolve to `<fonts_dir>/<name>.flf` and fall back to the
/// standard font when missing.
pub struct FigletBanner {
    fonts_dir: PathBuf,
}

impl FigletBanner {
    pub fn new(fonts_dir: &Path) -> Self {
        Self {
            fonts_dir: fonts_dir.to_path_buf(),
        }
    }

    fn load_font(&self, name: &str) -> Result<FIGfont> {
        if !name.is_empty() && !name.eq_ignore_ascii_case("standard") {
            let path = self.fonts_dir.join(format!("{name}.flf"));
            match fs::read_to_string(&path) {
                Ok(content) => return FIGfont::from_content(&content).map_err(LumenError::Banner),
                Err(_) => {
                    log::warn!("figlet font '{name}' not found -- falling back to standard");
                },
            }
        }
        // figlet-rs ships the embedded standard font behind this
        // (misspelled) constructor.
        FIGfont::standard().map_err(LumenError::Banner)
    }
}

impl BannerRenderer for FigletBanner {
    fn available(&self) -> bool {
        true
    }

    fn render(&self, text: &str, font: &str) -> Result<String> {
        let figfont = self.load_font(font)?;
        let figure = figfont
            .convert(text)
            .ok_or_else(|| LumenError::Banner(format!("cannot render {text:?}")))?;
        Ok(figure.to_string().trim_end().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_formats_hh_mm_ss() {
        let ts = SystemClock.timestamp();
        assert_eq!(ts.len(), 8);
        assert_eq!(ts.as_bytes()[2], b':');
        assert_eq!(ts.as_bytes()[5], b':');
    }

    #[test]
    fn content_source_rejects_traversal() {
        let source = FsContentSource::new(Path::new("."));
        assert!(source.fetch("content/../../etc/passwd").is_err());
    }

    #[test]
    fn content_source_reports_missing_path() {
        let source = FsContentSource::new(Path::new("."));
        let err = source.fetch("content/definitely-missing.md").unwrap_err();
        assert!(format!("{err}").contains("definitely-missing"));
    }

    #[test]
    fn figlet_standard_font_renders() {
        let banner = FigletBanner::new(Path::new("fonts"));
        assert!(banner.available());
        let art = banner.render("Hi", "standard").unwrap();
        assert!(art.lines().count() > 1);
    }

    #[test]
    fn missing_config_is_an_error_for_reload() {
        let source = FsConfigSource::new(Path::new("/nonexistent/config.json"));
        assert!(source.load().is_err());
    }
}
