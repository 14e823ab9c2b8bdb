//! Page configuration.
//!
//! Thresholds and menu content are data, loaded from JSON. Every section has
//! defaults so a partial (or missing) file still yields a working page.
//!
//! ```json
//! {
//!   "reveal": { "threshold": 0.1, "root_margin_bottom": 50.0 },
//!   "scroll": { "solid_threshold": 50, "coalesce_per_frame": false },
//!   "menu": { "stagger_step_ms": 100 },
//!   "log_level": "info"
//! }
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{PageError, Result};

// =============================================================================
// SECTIONS
// =============================================================================

/// Reveal observer options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealOptions {
    /// Minimum visible fraction of a target's area.
    pub threshold: f32,
    /// Pixels trimmed from the bottom of the viewport before intersecting.
    pub root_margin_bottom: f32,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin_bottom: 50.0,
        }
    }
}

/// Scroll tracking options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollOptions {
    /// Chrome turns solid once the offset is strictly greater than this.
    pub solid_threshold: u32,
    /// Apply scroll offsets at most once per animation frame.
    pub coalesce_per_frame: bool,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            solid_threshold: 50,
            coalesce_per_frame: false,
        }
    }
}

/// One overlay navigation entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavItem {
    pub label: String,
    pub href: String,
    #[serde(default)]
    pub is_button: bool,
}

impl NavItem {
    pub fn link(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
            is_button: false,
        }
    }

    pub fn button(label: &str, href: &str) -> Self {
        Self {
            is_button: true,
            ..Self::link(label, href)
        }
    }
}

/// Mobile overlay options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuOptions {
    /// Delay added per item ordinal while the overlay opens.
    pub stagger_step_ms: u32,
    pub items: Vec<NavItem>,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            stagger_step_ms: 100,
            items: default_nav_items(),
        }
    }
}

fn default_nav_items() -> Vec<NavItem> {
    vec![
        NavItem::link("Features", "#features"),
        NavItem::link("How it Works", "#how-it-works"),
        NavItem::button("Get Early Access", "#notify"),
    ]
}

fn default_log_level() -> String {
    "info".to_string()
}

// =============================================================================
// PAGE CONFIG
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default)]
    pub reveal: RevealOptions,
    #[serde(default)]
    pub scroll: ScrollOptions,
    #[serde(default)]
    pub menu: MenuOptions,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            reveal: RevealOptions::default(),
            scroll: ScrollOptions::default(),
            menu: MenuOptions::default(),
            log_level: default_log_level(),
        }
    }
}

/// Where a loaded config came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// The file was missing; defaults apply.
    Defaults(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "loaded from {:?}", path),
            ConfigSource::Defaults(path) => write!(f, "{:?} not found, using defaults", path),
        }
    }
}

impl PageConfig {
    /// Load config from a JSON file, falling back to defaults if it is missing.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_source(path).map(|(config, _)| config)
    }

    /// Like [`PageConfig::load`], also reporting whether the file was used.
    ///
    /// Callers that load before logging is up log the source themselves.
    pub fn load_with_source(path: &Path) -> Result<(Self, ConfigSource)> {
        if !path.exists() {
            info!("Config file not found at {:?}, using defaults", path);
            return Ok((Self::default(), ConfigSource::Defaults(path.to_path_buf())));
        }

        let contents = fs::read_to_string(path).map_err(|source| PageError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config = serde_json::from_str(&contents).map_err(|source| PageError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Loaded config from {:?}", path);
        Ok((config, ConfigSource::File(path.to_path_buf())))
    }
}
