//! Platform-aware path resolution for homeboard.
//!
//! On **Linux**, follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/homeboard` or `~/.config/homeboard`
//! - Data (the store): `$XDG_DATA_HOME/homeboard` or `~/.local/share/homeboard`
//!
//! On **macOS**, uses Apple conventions with XDG env var overrides:
//! - Config and data: `~/Library/Application Support/homeboard`

use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "homeboard";

/// File name of the persisted widget store.
pub const STORE_FILE: &str = "store.json";

/// Home directory, or the current directory if it cannot be determined.
fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the configuration directory.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/homeboard` (if env var set, any platform)
/// 2. Platform default
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    platform_config_dir().join(APP_NAME)
}

fn platform_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        dirs::config_dir().unwrap_or_else(|| home_dir().join("Library/Application Support"))
    }
    #[cfg(not(target_os = "macos"))]
    {
        home_dir().join(".config")
    }
}

/// Returns the path to the main configuration file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns the data directory holding the store.
///
/// `$XDG_DATA_HOME/homeboard` when set, otherwise the platform default.
pub fn data_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    platform_data_dir().join(APP_NAME)
}

fn platform_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir().unwrap_or_else(|| home_dir().join("Library/Application Support"))
    }
    #[cfg(not(target_os = "macos"))]
    {
        home_dir().join(".local/share")
    }
}

/// Default location of the widget store.
pub fn store_path() -> PathBuf {
    data_dir().join(STORE_FILE)
}

/// Expands a leading `~` in a path string to the user's home directory.
///
/// If the path does not start with `~`, it is returned as-is.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home_dir().join(rest)
    } else if path == "~" {
        home_dir()
    } else {
        PathBuf::from(path)
    }
}

/// Creates a directory and all parent directories with mode 0700.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}

/// Creates the configuration directory if it does not exist, returning its path.
pub fn ensure_config_dir() -> std::io::Result<PathBuf> {
    let dir = config_dir();
    ensure_dir(&dir)?;
    Ok(dir)
}

#[cfg(test)]
pub(crate) mod test_env {
    /// Runs `f` with env vars temporarily set (or removed), then restores them.
    ///
    /// Callers must be `#[serial]`.
    pub fn with_env<F: FnOnce()>(vars: &[(&str, Option<&str>)], f: F) {
        let originals: Vec<_> = vars
            .iter()
            .map(|(k, _)| (*k, std::env::var(k).ok()))
            .collect();

        for (k, v) in vars {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        f();

        for (k, original) in &originals {
            match original {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }
    }
}
