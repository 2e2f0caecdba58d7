//! User configuration (`shortcuts.toml`).
//!
//! Loading never fails: problems are returned as warnings and the affected
//! settings fall back to their defaults.
//!
//! ```toml
//! store = "bindings.toml"   # relative to this file
//!
//! [overlay]
//! invoke = "Shift+Q"
//! delay_ms = 1000
//! enable_delay = false
//! max_visible = 16
//! ```

use directories::ProjectDirs;
use serde::Deserialize;
use shortcuts_core::{BindingStore, Result, TomlFile};
use shortcuts_keys::KeySequence;
use std::path::{Path, PathBuf};
use std::time::Duration;

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB
const DEFAULT_INVOKE: &str = "Shift+Q";
const DEFAULT_DELAY_MS: u64 = 1_000;
const DEFAULT_MAX_VISIBLE: usize = 16;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    store: Option<PathBuf>,
    overlay: Option<OverlayFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OverlayFile {
    invoke: Option<String>,
    delay_ms: Option<u64>,
    enable_delay: Option<bool>,
    max_visible: Option<usize>,
}

/// Settings for the search overlay. The overlay itself lives in the UI;
/// these only carry the user's choices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlaySettings {
    /// Canonical key sequence that opens the overlay.
    pub invoke: String,
    /// Pause after the last typed key before a matched command runs.
    pub delay: Duration,
    pub enable_delay: bool,
    /// Completion rows shown at once.
    pub max_visible: usize,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            invoke: DEFAULT_INVOKE.to_string(),
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            enable_delay: false,
            max_visible: DEFAULT_MAX_VISIBLE,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShortcutsConfig {
    /// Binding store file. `None` keeps bindings in memory only.
    pub store_path: Option<PathBuf>,
    pub overlay: OverlaySettings,
}

impl ShortcutsConfig {
    /// Open the binding store this config points at.
    pub fn open_store(&self) -> Result<BindingStore> {
        match &self.store_path {
            Some(path) => BindingStore::open(TomlFile::new(path)),
            None => {
                tracing::warn!("no binding store path; bindings will not persist");
                Ok(BindingStore::in_memory())
            }
        }
    }
}

/// Per-user config directory.
pub fn config_dir() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "shortcuts")?;
    Some(proj.config_dir().to_path_buf())
}

/// Load `config_file`, or `shortcuts.toml` in [`config_dir`].
///
/// A missing default file is not a warning; a missing explicit file is.
pub fn load_config(config_file: Option<&Path>) -> (ShortcutsConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let path = config_file
        .map(Path::to_path_buf)
        .or_else(|| config_dir().map(|dir| dir.join("shortcuts.toml")));

    let mut config = ShortcutsConfig {
        store_path: config_dir().map(|dir| dir.join("bindings.toml")),
        overlay: OverlaySettings::default(),
    };

    let Some(path) = path else {
        warnings.push("No config directory available; using defaults".to_string());
        return (config, warnings);
    };
    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (config, warnings);
    }

    let file = match read_config_file(&path) {
        Ok(file) => file,
        Err(warning) => {
            warnings.push(warning);
            return (config, warnings);
        }
    };

    if let Some(store) = file.store {
        config.store_path = Some(if store.is_relative() {
            path.parent().map(|dir| dir.join(&store)).unwrap_or(store)
        } else {
            store
        });
    }
    if let Some(overlay) = file.overlay {
        apply_overlay(&mut config.overlay, overlay, &mut warnings);
    }
    (config, warnings)
}

fn read_config_file(path: &Path) -> std::result::Result<ConfigFile, String> {
    let meta = std::fs::metadata(path)
        .map_err(|err| format!("Failed to read metadata for {}: {}", path.display(), err))?;
    if meta.len() > MAX_CONFIG_FILE_BYTES {
        return Err(format!(
            "Refusing to read {}: file too large ({} bytes, max {})",
            path.display(),
            meta.len(),
            MAX_CONFIG_FILE_BYTES
        ));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|err| format!("Failed to read {}: {}", path.display(), err))?;
    toml::from_str::<ConfigFile>(&content)
        .map_err(|err| format!("Failed to parse {}: {}", path.display(), err))
}

fn apply_overlay(settings: &mut OverlaySettings, raw: OverlayFile, warnings: &mut Vec<String>) {
    if let Some(invoke) = raw.invoke {
        match KeySequence::parse(&invoke) {
            Ok(seq) => settings.invoke = seq.to_string(),
            Err(err) => warnings.push(format!(
                "Invalid overlay invoke key '{}': {}; using '{}'",
                invoke, err, DEFAULT_INVOKE
            )),
        }
    }
    if let Some(ms) = raw.delay_ms {
        settings.delay = Duration::from_millis(ms);
    }
    if let Some(enable) = raw.enable_delay {
        settings.enable_delay = enable;
    }
    match raw.max_visible {
        Some(0) => warnings.push(format!(
            "overlay.max_visible must be positive; using {}",
            DEFAULT_MAX_VISIBLE
        )),
        Some(n) => settings.max_visible = n,
        None => {}
    }
}
