pub mod config;

use std::{env, path::PathBuf};

pub use config::{AppConfig, ConfigError, Environment};

pub const DEFAULT_SETTINGS_FILE: &str = "jobdeck-settings.json";

/// Loads environment variables from `.env` when available.
///
/// Missing files are ignored so the function is safe in production builds
/// where dotenv files are not deployed.
pub fn load_env_file() {
    let _ = dotenvy::dotenv();
}

/// Returns the path of the persisted settings file.
///
/// Resolution order: the `APP_SETTINGS_PATH` environment variable, the
/// XDG config directory, `~/.config`, then the current directory.
pub fn settings_file_path() -> PathBuf {
    if let Ok(value) = env::var("APP_SETTINGS_PATH") {
        return PathBuf::from(value);
    }
    if let Ok(base) = env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(base).join("jobdeck").join("settings.json");
    }
    if let Ok(home) = env::var("HOME") {
        return PathBuf::from(home)
            .join(".config")
            .join("jobdeck")
            .join("settings.json");
    }
    PathBuf::from(DEFAULT_SETTINGS_FILE)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{LazyLock, Mutex};

    // Shared by every test in this crate that touches process-wide
    // environment variables.
    pub(crate) static ENV_GUARD: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ENV_GUARD;

    #[test]
    fn explicit_path_wins() {
        let _lock = ENV_GUARD.lock().expect("env guard poisoned");
        env::set_var("APP_SETTINGS_PATH", "/tmp/custom-settings.json");
        assert_eq!(
            settings_file_path(),
            PathBuf::from("/tmp/custom-settings.json")
        );
        env::remove_var("APP_SETTINGS_PATH");
    }

    #[test]
    fn xdg_config_home_is_used_when_set() {
        let _lock = ENV_GUARD.lock().expect("env guard poisoned");
        env::remove_var("APP_SETTINGS_PATH");
        env::set_var("XDG_CONFIG_HOME", "/tmp/xdg");
        assert_eq!(
            settings_file_path(),
            PathBuf::from("/tmp/xdg/jobdeck/settings.json")
        );
        env::remove_var("XDG_CONFIG_HOME");
    }

    #[test]
    fn home_config_dir_is_the_fallback() {
        let _lock = ENV_GUARD.lock().expect("env guard poisoned");
        env::remove_var("APP_SETTINGS_PATH");
        env::remove_var("XDG_CONFIG_HOME");
        let home = env::var("HOME");
        env::set_var("HOME", "/home/someone");
        assert_eq!(
            settings_file_path(),
            PathBuf::from("/home/someone/.config/jobdeck/settings.json")
        );
        match home {
            Ok(value) => env::set_var("HOME", value),
            Err(_) => env::remove_var("HOME"),
        }
    }
}
