// plugin-tooling - platform/config.rs
//
// Tools-root resolution and `tooling.toml` loading with startup validation.
//
// The tools root is the directory holding `doxygen/`, `doc-generator-cs/`
// and this crate. It is fixed at build time to the crate's own directory and
// never taken from the working directory; `--tools-root` overrides it. The
// config file is optional; every key has a default.

use crate::core::model::Preset;
use crate::util::constants;
use std::path::{Path, PathBuf};

// =============================================================================
// Raw config
// =============================================================================

/// Raw deserialisable shape of tooling.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[logging]` section.
    pub logging: LoggingSection,
    /// `[paths]` section.
    pub paths: PathsSection,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// `[paths]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct PathsSection {
    /// Plugin binaries directory, absolute or relative to the tools root.
    pub plugins_dir: Option<String>,
}

// =============================================================================
// Validated config
// =============================================================================

/// Validated tooling configuration.
#[derive(Debug, Clone)]
pub struct ToolingConfig {
    /// Directory the tools run from.
    pub tools_root: PathBuf,

    /// Root of the plugin binaries (contains `Android/` and `Windows/`).
    pub plugins_dir: PathBuf,

    /// Logging level from the config file, if valid.
    pub log_level: Option<String>,
}

impl ToolingConfig {
    /// Defaults for a given tools root.
    pub fn defaults(tools_root: &Path) -> Self {
        Self {
            tools_root: tools_root.to_path_buf(),
            plugins_dir: tools_root.join(constants::DEFAULT_PLUGINS_DIR),
            log_level: None,
        }
    }

    /// Directory holding the binaries of `preset`.
    pub fn plugin_dir(&self, preset: Preset) -> PathBuf {
        preset
            .plugin_subdir()
            .iter()
            .fold(self.plugins_dir.clone(), |dir, part| dir.join(part))
    }
}

/// The crate's own directory, which sits in the package's tools folder.
pub fn default_tools_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// `cli_override` when given, otherwise [`default_tools_root`].
///
/// A relative override is taken relative to the working directory, where the
/// user typed it.
pub fn resolve_tools_root(cli_override: Option<&Path>) -> PathBuf {
    let Some(root) = cli_override else {
        return default_tools_root();
    };
    let root = if root.is_relative() {
        std::env::current_dir().map_or_else(|_| root.to_path_buf(), |cwd| cwd.join(root))
    } else {
        root.to_path_buf()
    };
    tracing::debug!(root = %root.display(), "Tools root overridden");
    root
}

/// Load and validate `tooling.toml` from `tools_root`.
///
/// Returns the config and a list of non-fatal warnings. A missing file
/// yields defaults with no warnings; an unreadable or unparseable file
/// yields defaults plus a warning.
pub fn load_config(tools_root: &Path) -> (ToolingConfig, Vec<String>) {
    let config_path = tools_root.join(constants::CONFIG_FILE_NAME);
    let mut warnings: Vec<String> = Vec::new();
    let mut config = ToolingConfig::defaults(tools_root);

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No tooling.toml found; using defaults");
        return (config, warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            warnings.push(format!(
                "Could not read config file '{}': {e}. Using defaults.",
                config_path.display()
            ));
            return (config, warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            warnings.push(format!(
                "Failed to parse config file '{}': {e}. Using defaults.",
                config_path.display()
            ));
            return (config, warnings);
        }
    };

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let lowered = level.to_lowercase();
        if constants::VALID_LOG_LEVELS.contains(&lowered.as_str()) {
            config.log_level = Some(lowered);
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: {}. Using default ({}).",
                constants::VALID_LOG_LEVELS.join(", "),
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    // -- Paths: plugins_dir --
    if let Some(ref dir) = raw.paths.plugins_dir {
        if dir.trim().is_empty() {
            warnings.push(format!(
                "[paths] plugins_dir is empty. Using default ({}).",
                constants::DEFAULT_PLUGINS_DIR
            ));
        } else {
            // `join` keeps absolute paths as they are.
            config.plugins_dir = tools_root.join(dir);
        }
    }

    (config, warnings)
}
