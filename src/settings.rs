use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::theme::{Color, Theme};

const DEFAULT_SETTINGS_TOML: &str = include_str!("../settings.toml");

#[derive(Debug, Clone)]
pub struct Settings {
    pub theme: Theme,
    pub logo_paths: Vec<PathBuf>,
    pub font_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            logo_paths: Vec::new(),
            font_path: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    theme: Option<ThemeSettings>,
    logo: Option<LogoSettings>,
    font: Option<FontSettings>,
}

#[derive(Debug, Default, Deserialize)]
struct ThemeSettings {
    accent: Option<String>,
    text: Option<String>,
    background: Option<String>,
    on_accent: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LogoSettings {
    paths: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct FontSettings {
    path: Option<String>,
}

/// Built-in defaults, then `settings.toml`, `settings.local.toml`, then `extra_path`.
pub fn load_settings(extra_path: Option<&Path>) -> Result<Settings> {
    let mut settings = Settings::default();
    let defaults: SettingsFile =
        toml::from_str(DEFAULT_SETTINGS_TOML).with_context(|| "failed to parse built-in settings")?;
    settings.merge(defaults)?;

    let mut ordered_paths = vec![
        PathBuf::from("settings.toml"),
        PathBuf::from("settings.local.toml"),
    ];
    if let Some(extra) = extra_path {
        if !extra.exists() {
            return Err(anyhow!("settings file not found: {}", extra.display()));
        }
        ordered_paths.push(extra.to_path_buf());
    }

    for path in ordered_paths {
        if path.exists() {
            settings.merge_file(&path)?;
        }
    }

    Ok(settings)
}

impl Settings {
    fn merge_file(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings: {}", path.display()))?;
        let parsed: SettingsFile = toml::from_str(&content)
            .with_context(|| format!("failed to parse settings: {}", path.display()))?;
        self.merge(parsed)
            .with_context(|| format!("invalid settings: {}", path.display()))
    }

    fn merge(&mut self, incoming: SettingsFile) -> Result<()> {
        if let Some(theme) = incoming.theme {
            merge_color(&mut self.theme.accent, theme.accent, "theme.accent")?;
            merge_color(&mut self.theme.text, theme.text, "theme.text")?;
            merge_color(&mut self.theme.background, theme.background, "theme.background")?;
            merge_color(&mut self.theme.on_accent, theme.on_accent, "theme.on_accent")?;
        }
        if let Some(paths) = incoming.logo.and_then(|logo| logo.paths) {
            self.logo_paths = paths
                .into_iter()
                .map(|path| path.trim().to_string())
                .filter(|path| !path.is_empty())
                .map(PathBuf::from)
                .collect();
        }
        if let Some(path) = incoming.font.and_then(|font| font.path) {
            if !path.trim().is_empty() {
                self.font_path = Some(PathBuf::from(path.trim()));
            }
        }
        Ok(())
    }
}

fn merge_color(target: &mut Color, value: Option<String>, key: &str) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if value.trim().is_empty() {
        return Ok(());
    }
    *target = Color::from_hex(&value).with_context(|| format!("invalid {}", key))?;
    Ok(())
}
