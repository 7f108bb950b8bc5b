use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::EngineError;

/// Font file location, relative to the assets directory.
pub const FONT_RELATIVE_PATH: &str = "misc/font.ttf";

/// Integer pixel size (`{"x": .., "y": ..}`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize)]
pub struct Size {
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Deserialize)]
pub struct Fullscreen {
    #[serde(default)]
    pub enabled: bool,
}

/// Font settings. Every attribute is optional.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub size: u32,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self { size: 10, red: 0, green: 0, blue: 0 }
    }
}

/// Top-level engine configuration.
///
/// - `resolution` is the logical coordinate space every draw call projects to.
/// - `screen_size` is the window size in physical pixels; when it differs from
///   `resolution` the frame is scaled. Defaults to `resolution`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EngineConfig {
    pub resolution: Size,

    #[serde(default)]
    pub screen_size: Option<Size>,

    #[serde(default)]
    pub fullscreen: Fullscreen,

    #[serde(default)]
    pub font: FontConfig,

    /// Directory assets are resolved against. Set by [`EngineConfig::load`].
    #[serde(skip)]
    pub assets_dir: PathBuf,
}

impl EngineConfig {
    /// Builds a configuration in code (no document).
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            resolution: Size { x: width, y: height },
            screen_size: None,
            fullscreen: Fullscreen::default(),
            font: FontConfig::default(),
            assets_dir: PathBuf::from("."),
        }
    }

    /// Reads and parses a configuration file. The file's directory becomes the
    /// assets directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("{}: {e}", path.display())))?;

        let mut config = Self::parse(&text)
            .map_err(|msg| EngineError::Config(format!("{}: {msg}", path.display())))?;
        config.assets_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        log::debug!("loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Parses a configuration document. `assets_dir` is left as `"."`.
    pub fn from_json_str(text: &str) -> Result<Self, EngineError> {
        Self::parse(text).map_err(EngineError::Config)
    }

    fn parse(text: &str) -> Result<Self, String> {
        let mut config: Self = serde_json::from_str(text).map_err(|e| e.to_string())?;
        if config.resolution.x == 0 || config.resolution.y == 0 {
            return Err("Resolution must be non-zero".into());
        }
        config.assets_dir = PathBuf::from(".");
        Ok(config)
    }

    /// Window size in physical pixels.
    pub fn window_size(&self) -> Size {
        self.screen_size.unwrap_or(self.resolution)
    }

    /// Absolute-or-relative path of the font file.
    pub fn font_path(&self) -> PathBuf {
        self.assets_dir.join(FONT_RELATIVE_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_document() {
        let cfg = EngineConfig::from_json_str(
            r#"{
                "Resolution": {"x": 1024, "y": 768},
                "ScreenSize": {"x": 1280, "y": 960},
                "Fullscreen": {"enabled": true},
                "Font": {"size": 18, "red": 255, "green": 10, "blue": 20}
            }"#,
        )
        .unwrap();

        assert_eq!(cfg.resolution, Size { x: 1024, y: 768 });
        assert_eq!(cfg.window_size(), Size { x: 1280, y: 960 });
        assert!(cfg.fullscreen.enabled);
        assert_eq!(cfg.font, FontConfig { size: 18, red: 255, green: 10, blue: 20 });
    }

    #[test]
    fn optional_nodes_take_defaults() {
        let cfg = EngineConfig::from_json_str(r#"{"Resolution": {"x": 640, "y": 480}}"#).unwrap();
        assert_eq!(cfg.window_size(), cfg.resolution);
        assert!(!cfg.fullscreen.enabled);
        assert_eq!(cfg.font, FontConfig { size: 10, red: 0, green: 0, blue: 0 });
    }

    #[test]
    fn partial_font_node_keeps_remaining_defaults() {
        let cfg = EngineConfig::from_json_str(
            r#"{"Resolution": {"x": 640, "y": 480}, "Font": {"green": 200}}"#,
        )
        .unwrap();
        assert_eq!(cfg.font.size, 10);
        assert_eq!(cfg.font.green, 200);
        assert_eq!(cfg.font.red, 0);
    }

    #[test]
    fn missing_resolution_is_a_config_error() {
        let err = EngineConfig::from_json_str(r#"{"Font": {}}"#).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn zero_resolution_is_rejected() {
        let err = EngineConfig::from_json_str(r#"{"Resolution": {"x": 0, "y": 480}}"#).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn load_resolves_assets_next_to_the_document() {
        let dir = std::env::temp_dir().join(format!("rosalila-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, r#"{"Resolution": {"x": 320, "y": 240}}"#).unwrap();

        let cfg = EngineConfig::load(&path).unwrap();
        assert_eq!(cfg.assets_dir, dir);
        assert_eq!(cfg.font_path(), dir.join("misc/font.ttf"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
