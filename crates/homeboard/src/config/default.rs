//! Default configuration template and file creation utilities.
//!
//! Provides a commented TOML template that matches `Config::default()`
//! and functions to write it to the XDG config path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Default TOML template
// ---------------------------------------------------------------------------

/// A commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# homeboard configuration
#
# All values shown below are the built-in defaults.
# Location: $XDG_CONFIG_HOME/homeboard/config.toml

# ==============================================================================
# Storage
# ==============================================================================

[storage]

# Path of the JSON file holding all widget state.
# Empty means $XDG_DATA_HOME/homeboard/store.json. A leading ~ is expanded.
path = ""

# ==============================================================================
# Layout
# ==============================================================================

[layout]

# Viewport width in pixels. The grid has 12 columns of width/12 pixels and
# rows of 30 pixels; widgets narrower than 300px or shorter than 200px
# render in compact mode.
viewport_width = 1600

# ==============================================================================
# Weather
# ==============================================================================

[weather]

# API key for the forecast service.
# HOMEBOARD_WEATHER_API_KEY overrides this when set.
api_key = ""

base_url = "https://api.weatherapi.com/v1/forecast.json"

# Forecast days to request (1-14). Only today is shown.
days = 1

# Language of condition texts.
lang = "de"

# ==============================================================================
# Finance
# ==============================================================================

[finance]

# API token for the quote service.
# HOMEBOARD_FINANCE_API_KEY overrides this when set.
api_key = ""

base_url = "https://finnhub.io/api/v1/quote"

# ==============================================================================
# Notes
# ==============================================================================

[notes]

# Quiet period after the last edit before the note is written.
# Examples: "500ms", "1s", "2s"
save_delay = "1s"

# ==============================================================================
# Timer
# ==============================================================================

[timer]

# Tick period of the stopwatch and countdown display.
tick_rate = "1s"

# ==============================================================================
# Logging
# ==============================================================================

[log]

# Verbosity when HOMEBOARD_LOG is not set.
# Options: "error", "warn", "info", "debug", "trace"
level = "info"
"#;

// ---------------------------------------------------------------------------
// File creation functions
// ---------------------------------------------------------------------------

/// Creates (or force-overwrites) the default config file.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
/// - Returns the path where the config was written.
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    let path = xdg::config_path();

    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists { path });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(&path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    write_default_config(&path)?;
    Ok(path)
}

/// Writes the template to `path` with 0600 permissions, creating parents.
fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_err = |source| ConfigError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    xdg::ensure_config_dir().map_err(write_err)?;
    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(write_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_err)?;
    }

    Ok(())
}
