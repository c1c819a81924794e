// SPDX-License-Identifier: MPL-2.0
//! User preferences stored in `settings.toml`.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[turntable]` - Frame naming, discovery cap and playback tuning
//! - `[magnifier]` - Lens toggle, size and zoom
//! - `[catalog]` - Optional dataset file replacing the bundled catalog
//! - `[[subjects]]` - Turntable subjects offered in the viewer
//!
//! Every numeric setting is optional in the file. Accessors fall back to
//! [`defaults`] and clamp to the documented bounds.
//!
//! # Examples
//!
//! ```no_run
//! use variant_lens::config;
//!
//! let (mut config, _warning) = config::load();
//! config.turntable.tick_interval_ms = Some(120);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::turntable::{
    FrameTemplate, MagnifierSettings, PlaybackSettings, Subject, SubjectRoot,
};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, deserialize_with = "deserialize_theme_mode")]
    pub theme_mode: ThemeMode,
}

/// Frame naming and playback tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TurntableConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_limit: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_width: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_interval_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drag_sensitivity_px: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_span_degrees: Option<f32>,
}

impl Default for TurntableConfig {
    fn default() -> Self {
        Self {
            frame_limit: Some(DEFAULT_FRAME_LIMIT),
            file_prefix: Some(DEFAULT_FILE_PREFIX.to_string()),
            index_width: Some(DEFAULT_INDEX_WIDTH),
            extension: Some(DEFAULT_FILE_EXTENSION.to_string()),
            tick_interval_ms: Some(DEFAULT_TICK_INTERVAL_MS),
            drag_sensitivity_px: Some(DEFAULT_DRAG_SENSITIVITY_PX),
            autoplay: Some(DEFAULT_AUTOPLAY),
            rotation_span_degrees: Some(DEFAULT_ROTATION_SPAN_DEGREES),
        }
    }
}

impl TurntableConfig {
    #[must_use]
    pub fn frame_limit(&self) -> usize {
        self.frame_limit
            .unwrap_or(DEFAULT_FRAME_LIMIT)
            .clamp(MIN_FRAME_LIMIT, MAX_FRAME_LIMIT)
    }

    #[must_use]
    pub fn frame_template(&self) -> FrameTemplate {
        FrameTemplate {
            prefix: self
                .file_prefix
                .clone()
                .unwrap_or_else(|| DEFAULT_FILE_PREFIX.to_string()),
            index_width: self
                .index_width
                .unwrap_or(DEFAULT_INDEX_WIDTH)
                .clamp(MIN_INDEX_WIDTH, MAX_INDEX_WIDTH),
            extension: self
                .extension
                .as_deref()
                .map(|ext| ext.trim_start_matches('.'))
                .filter(|ext| !ext.is_empty())
                .unwrap_or(DEFAULT_FILE_EXTENSION)
                .to_string(),
        }
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(
            self.tick_interval_ms
                .unwrap_or(DEFAULT_TICK_INTERVAL_MS)
                .clamp(MIN_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS),
        )
    }

    #[must_use]
    pub fn playback_settings(&self) -> PlaybackSettings {
        PlaybackSettings {
            autoplay: self.autoplay.unwrap_or(DEFAULT_AUTOPLAY),
            drag_sensitivity: clamp_f32(
                self.drag_sensitivity_px,
                DEFAULT_DRAG_SENSITIVITY_PX,
                MIN_DRAG_SENSITIVITY_PX,
                MAX_DRAG_SENSITIVITY_PX,
            ),
            rotation_span: clamp_f32(
                self.rotation_span_degrees,
                DEFAULT_ROTATION_SPAN_DEGREES,
                MIN_ROTATION_SPAN_DEGREES,
                MAX_ROTATION_SPAN_DEGREES,
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MagnifierConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter_px: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f32>,
}

impl Default for MagnifierConfig {
    fn default() -> Self {
        Self {
            enabled: Some(DEFAULT_MAGNIFIER_ENABLED),
            diameter_px: Some(DEFAULT_MAGNIFIER_DIAMETER_PX),
            zoom: Some(DEFAULT_MAGNIFIER_ZOOM),
        }
    }
}

impl MagnifierConfig {
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled.unwrap_or(DEFAULT_MAGNIFIER_ENABLED)
    }

    #[must_use]
    pub fn settings(&self) -> MagnifierSettings {
        MagnifierSettings {
            diameter: clamp_f32(
                self.diameter_px,
                DEFAULT_MAGNIFIER_DIAMETER_PX,
                MIN_MAGNIFIER_DIAMETER_PX,
                MAX_MAGNIFIER_DIAMETER_PX,
            ),
            zoom: clamp_f32(
                self.zoom,
                DEFAULT_MAGNIFIER_ZOOM,
                MIN_MAGNIFIER_ZOOM,
                MAX_MAGNIFIER_ZOOM,
            ),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Dataset file replacing the bundled catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// One `[[subjects]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubjectConfig {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Local directory or `http(s)://` base URL.
    pub location: String,
}

impl SubjectConfig {
    /// Resolves the entry; relative paths are joined to `base_dir`.
    #[must_use]
    pub fn resolve(&self, base_dir: Option<&Path>) -> Subject {
        Subject {
            id: self.id.clone(),
            label: self
                .label
                .clone()
                .unwrap_or_else(|| crate::catalog::variant::capitalize(&self.id)),
            root: SubjectRoot::parse(&self.location, base_dir),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub turntable: TurntableConfig,

    #[serde(default)]
    pub magnifier: MagnifierConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default = "default_subjects")]
    pub subjects: Vec<SubjectConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            turntable: TurntableConfig::default(),
            magnifier: MagnifierConfig::default(),
            catalog: CatalogConfig::default(),
            subjects: default_subjects(),
        }
    }
}

impl Config {
    /// Subjects with locations resolved against `base_dir`. Entries with a
    /// duplicate id are dropped.
    #[must_use]
    pub fn resolved_subjects(&self, base_dir: Option<&Path>) -> Vec<Subject> {
        let mut subjects: Vec<Subject> = Vec::with_capacity(self.subjects.len());
        for entry in &self.subjects {
            if subjects.iter().any(|s| s.id == entry.id) {
                tracing::warn!(id = %entry.id, "duplicate subject id ignored");
                continue;
            }
            subjects.push(entry.resolve(base_dir));
        }
        subjects
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_subjects() -> Vec<SubjectConfig> {
    DEFAULT_SUBJECTS
        .iter()
        .map(|(id, label, location)| SubjectConfig {
            id: (*id).to_string(),
            label: Some((*label).to_string()),
            location: (*location).to_string(),
        })
        .collect()
}

fn clamp_f32(value: Option<f32>, default: f32, min: f32, max: f32) -> f32 {
    match value {
        Some(v) if v.is_finite() => v.clamp(min, max),
        _ => default,
    }
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

// =============================================================================
// Load / Save
// =============================================================================

fn config_path(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|dir| dir.join(CONFIG_FILE))
}

/// Loads the configuration from the default path.
///
/// Returns defaults plus a warning key when the file exists but cannot be
/// read.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    let Some(path) = config_path(base_dir) else {
        return (Config::default(), None);
    };
    if !path.exists() {
        return (Config::default(), None);
    }

    match load_from_path(&path) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "configuration loaded");
            (config, None)
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "using default configuration");
            (
                Config::default(),
                Some("notification-config-load-error".to_string()),
            )
        }
    }
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    match config_path(base_dir) {
        Some(path) => save_to_path(config, &path),
        None => Ok(()),
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.general.theme_mode, ThemeMode::System);
        assert_eq!(config.turntable.frame_limit(), 25);
        assert_eq!(config.turntable.tick_interval(), Duration::from_millis(200));
        assert_eq!(config.turntable.frame_template(), FrameTemplate::default());
        assert_eq!(config.turntable.playback_settings(), PlaybackSettings::default());
        assert_eq!(config.magnifier.settings(), MagnifierSettings::default());
        assert!(config.magnifier.enabled());

        let ids: Vec<&str> = config.subjects.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["porsche", "jobs"]);
    }

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let mut config = Config::default();
        config.general.language = Some("fr".into());
        config.general.theme_mode = ThemeMode::Dark;
        config.turntable.autoplay = Some(false);
        config.magnifier.zoom = Some(3.0);
        config.catalog.path = Some(PathBuf::from("/data/variants.toml"));

        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("nested").join(CONFIG_FILE);
        save_to_path(&config, &path).expect("failed to save config");

        let loaded = load_from_path(&path).expect("failed to load config");
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_file_fills_missing_sections() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "[turntable]\ntick_interval_ms = 100\n").expect("write config");

        let config = load_from_path(&path).expect("partial config should parse");
        assert_eq!(config.turntable.tick_interval(), Duration::from_millis(100));
        assert_eq!(config.turntable.frame_limit(), DEFAULT_FRAME_LIMIT);
        assert_eq!(config.subjects.len(), 2);
    }

    #[test]
    fn subjects_table_replaces_defaults() {
        let content = r#"
[[subjects]]
id = "watch"
location = "https://cdn.example.com/watch"

[[subjects]]
id = "shoe"
label = "Running shoe"
location = "frames/shoe"
"#;
        let config: Config = toml::from_str(content).expect("valid config");
        let subjects = config.resolved_subjects(Some(Path::new("/data")));

        assert_eq!(subjects.len(), 2);
        assert_eq!(subjects[0].label, "Watch");
        assert_eq!(
            subjects[0].root,
            SubjectRoot::Remote("https://cdn.example.com/watch".into())
        );
        assert_eq!(
            subjects[1].root,
            SubjectRoot::Local(PathBuf::from("/data/frames/shoe"))
        );
    }

    #[test]
    fn duplicate_subject_ids_keep_first() {
        let mut config = Config::default();
        config.subjects.push(SubjectConfig {
            id: "porsche".into(),
            label: None,
            location: "elsewhere".into(),
        });
        assert_eq!(config.resolved_subjects(None).len(), 2);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let turntable = TurntableConfig {
            frame_limit: Some(0),
            index_width: Some(99),
            tick_interval_ms: Some(1),
            drag_sensitivity_px: Some(f32::NAN),
            extension: Some(".png".into()),
            ..TurntableConfig::default()
        };
        assert_eq!(turntable.frame_limit(), MIN_FRAME_LIMIT);
        assert_eq!(turntable.frame_template().index_width, MAX_INDEX_WIDTH);
        assert_eq!(turntable.frame_template().extension, "png");
        assert_eq!(
            turntable.tick_interval(),
            Duration::from_millis(MIN_TICK_INTERVAL_MS)
        );
        assert_eq!(
            turntable.playback_settings().drag_sensitivity,
            DEFAULT_DRAG_SENSITIVITY_PX
        );

        let magnifier = MagnifierConfig {
            zoom: Some(0.5),
            ..MagnifierConfig::default()
        };
        assert_eq!(magnifier.settings().zoom, MIN_MAGNIFIER_ZOOM);
    }

    #[test]
    fn invalid_theme_mode_is_rejected() {
        let result = toml::from_str::<Config>("[general]\ntheme_mode = \"neon\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn load_with_override_reports_invalid_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "not = valid = toml")
            .expect("write invalid toml");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }

    #[test]
    fn load_with_override_missing_file_is_silent() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "not = valid = toml").expect("write invalid toml");

        assert!(matches!(load_from_path(&path), Err(Error::Config(_))));
    }
}
