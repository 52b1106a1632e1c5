//! Saved query settings
//!
//! Settings are a JSON document in camelCase. Every field is optional so an
//! older or partial file still loads.

use crate::error::Result;
use crate::range::NumericSetting;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Rarity filter: which rarities are listed, and whether the list allows or denies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaritySettings {
    pub normal: bool,
    pub magic: bool,
    pub rare: bool,
    /// true: listed rarities are an allow-list, false: a deny-list
    pub include: bool,
}

impl Default for RaritySettings {
    fn default() -> Self {
        Self {
            normal: true,
            magic: true,
            rare: true,
            include: true,
        }
    }
}

/// Everything the map query is compiled from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapSettings {
    /// Modifier keys that must not appear
    pub bad_mods: Vec<String>,
    /// Modifier keys to look for
    pub good_mods: Vec<String>,
    /// Require every good modifier instead of any one
    pub all_good_mods: bool,
    pub quantity: NumericSetting,
    pub packsize: NumericSetting,
    pub rarity: RaritySettings,
    #[serde(alias = "kirac")]
    pub bonus_mods: Vec<String>,
}

impl MapSettings {
    /// Load settings from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading settings from: {}", path.display());

        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load settings, falling back to defaults when the file does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!(
                "No settings file at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }
        Self::load(path)
    }
}

/// Returns the default settings path: ~/.config/query_compiler/map_settings.json
pub fn default_settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("query_compiler")
        .join("map_settings.json")
}
