//! Configuration data model and overlay merge.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// Banner font-size clamp, in CSS length strings (`clamp(min, vw, max)`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerSize {
    pub min: String,
    pub vw: String,
    pub max: String,
}

impl Default for BannerSize {
    fn default() -> Self {
        Self {
            min: "12px".to_string(),
            vw: "2.4vw".to_string(),
            max: "20px".to_string(),
        }
    }
}

/// One command contributed by the configuration document.
///
/// Rows missing a `name` or a `markdown` reference are treated as
/// malformed and skipped at registration, not rejected at parse time.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommandRow {
    pub name: String,
    pub description: Option<String>,
    pub emoji: Option<String>,
    pub markdown: Option<String>,
    pub category: Option<String>,
}

/// Content-document resolution settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory holding markdown documents.
    pub dir: String,
    /// Extension appended to slugs and handler ids.
    pub ext: String,
    /// Per-command overrides: typed command -> file name.
    pub map: BTreeMap<String, String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: "content".to_string(),
            ext: ".md".to_string(),
            map: BTreeMap::new(),
        }
    }
}

/// The live configuration value.
///
/// Built once from defaults + overlay; `reload` replaces the whole value
/// rather than mutating shared fields in place.
#[derive(Debug, Clone)]
pub struct TermConfig {
    pub default_accent: String,
    pub banner_content: Option<String>,
    pub banner_text: Option<String>,
    pub banner_ascii_font: String,
    pub banner_size: BannerSize,
    pub show_banner_on_load: bool,
    /// Theme name -> color string (`#rrggbb`).
    pub theme_map: BTreeMap<String, String>,
    pub content: ContentConfig,
    pub commands: Vec<CommandRow>,
    /// Unknown top-level keys, kept verbatim (open-ended extension point).
    pub extra: BTreeMap<String, Value>,
}

impl Default for TermConfig {
    fn default() -> Self {
        let mut theme_map = BTreeMap::new();
        theme_map.insert("purple".to_string(), "#9b87f5".to_string());
        theme_map.insert("cyan".to_string(), "#7cd4ff".to_string());
        theme_map.insert("green".to_string(), "#7bd88f".to_string());
        theme_map.insert("orange".to_string(), "#f97316".to_string());
        Self {
            default_accent: "purple".to_string(),
            banner_content: None,
            banner_text: None,
            banner_ascii_font: "standard".to_string(),
            banner_size: BannerSize::default(),
            show_banner_on_load: true,
            theme_map,
            content: ContentConfig::default(),
            commands: Vec::new(),
            extra: BTreeMap::new(),
        }
    }
}

/// Partial banner-size overlay: absent fields keep the current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BannerSizeOverlay {
    pub min: Option<String>,
    pub vw: Option<String>,
    pub max: Option<String>,
}

/// The external configuration document, as deserialized from JSON.
///
/// Every field is optional; `apply` merges present fields over a
/// `TermConfig`. Unknown keys collect into `extra` and are merged
/// verbatim.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigOverlay {
    pub default_accent: Option<String>,
    pub banner_content: Option<String>,
    pub banner_text: Option<String>,
    pub banner_ascii_font: Option<String>,
    pub banner_size: Option<BannerSizeOverlay>,
    pub show_banner_on_load: Option<bool>,
    pub theme_map: Option<BTreeMap<String, String>>,
    pub content: Option<ContentConfig>,
    pub commands: Option<Vec<CommandRow>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl TermConfig {
    /// Merge an overlay document into this configuration.
    ///
    /// `theme_map` and `banner_size` merge shallowly (incoming entries
    /// win, absent ones survive); every other present field replaces the
    /// current value wholesale. Unknown keys merge into `extra`.
    pub fn apply(&mut self, overlay: ConfigOverlay) {
        if let Some(accent) = overlay.default_accent {
            self.default_accent = accent;
        }
        if let Some(content) = overlay.banner_content {
            self.banner_content = Some(content);
        }
        if let Some(text) = overlay.banner_text {
            self.banner_text = Some(text);
        }
        if let Some(font) = overlay.banner_ascii_font {
            self.banner_ascii_font = font;
        }
        if let Some(size) = overlay.banner_size {
            if let Some(min) = size.min {
                self.banner_size.min = min;
            }
            if let Some(vw) = size.vw {
                self.banner_size.vw = vw;
            }
            if let Some(max) = size.max {
                self.banner_size.max = max;
            }
        }
        if let Some(show) = overlay.show_banner_on_load {
            self.show_banner_on_load = show;
        }
        if let Some(themes) = overlay.theme_map {
            self.theme_map.extend(themes);
        }
        if let Some(content) = overlay.content {
            self.content = content;
        }
        if let Some(commands) = overlay.commands {
            self.commands = commands;
        }
        self.extra.extend(overlay.extra);
    }

    /// The configured accent color, falling back to the default accent's
    /// color when the name is unknown.
    pub fn accent_color(&self, name: &str) -> Option<&str> {
        self.theme_map.get(name).map(String::as_str)
    }

    /// Valid theme names joined for usage messages (`purple|cyan|...`).
    pub fn theme_names(&self) -> String {
        self.theme_map.keys().cloned().collect::<Vec<_>>().join("|")
    }
}
