use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_SETTINGS_FILE: &str = "portfolio.toml";

const STORE_URL_VARS: &[&str] = &["SUPABASE_URL", "VITE_SUPABASE_URL", "APP__STORE_URL"];
const ANON_KEY_VARS: &[&str] = &[
    "SUPABASE_ANON_KEY",
    "VITE_SUPABASE_ANON_KEY",
    "APP__ANON_KEY",
];
const REQUEST_TIMEOUT_VAR: &str = "APP__REQUEST_TIMEOUT_SECONDS";

/// Connection settings for the remote store. Missing values are allowed; they
/// yield a store whose reads fail instead of aborting startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub store_url: Option<String>,
    pub anon_key: Option<String>,
    pub request_timeout_seconds: Option<u64>,
}

impl Settings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds
            .filter(|seconds| *seconds > 0)
            .map(Duration::from_secs)
    }

    pub fn is_configured(&self) -> bool {
        self.store_url.is_some() && self.anon_key.is_some()
    }

    fn merge(&mut self, other: Settings) {
        if other.store_url.is_some() {
            self.store_url = other.store_url;
        }
        if other.anon_key.is_some() {
            self.anon_key = other.anon_key;
        }
        if other.request_timeout_seconds.is_some() {
            self.request_timeout_seconds = other.request_timeout_seconds;
        }
    }
}

/// Loads settings from `explicit_path` (which must exist) or from
/// `portfolio.toml` in the working directory (skipped when absent), then
/// applies environment overrides.
pub fn load_settings(explicit_path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with(explicit_path, |name| std::env::var(name).ok())
}

pub fn load_settings_with<F>(explicit_path: Option<&Path>, env: F) -> anyhow::Result<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = Settings::default();

    let file_path = match explicit_path {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = PathBuf::from(DEFAULT_SETTINGS_FILE);
            default.exists().then_some(default)
        }
    };
    if let Some(path) = file_path {
        settings.merge(read_settings_file(&path)?);
    }

    settings.merge(env_settings(&env)?);
    settings.store_url = settings.store_url.and_then(non_blank);
    settings.anon_key = settings.anon_key.and_then(non_blank);

    Ok(settings)
}

fn read_settings_file(path: &Path) -> anyhow::Result<Settings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
    toml::from_str::<Settings>(&raw)
        .with_context(|| format!("failed to parse settings file '{}'", path.display()))
}

fn env_settings<F>(env: &F) -> anyhow::Result<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    // Later names in each list win, matching the APP__ override convention.
    let last_set = |names: &[&str]| {
        names
            .iter()
            .filter_map(|&name| env(name))
            .filter(|value| !value.trim().is_empty())
            .last()
    };

    let raw_timeout = env(REQUEST_TIMEOUT_VAR).filter(|raw| !raw.trim().is_empty());
    let request_timeout_seconds = match raw_timeout {
        Some(raw) => Some(
            raw.trim()
                .parse::<u64>()
                .with_context(|| format!("{REQUEST_TIMEOUT_VAR} must be a whole number of seconds"))?,
        ),
        None => None,
    };

    Ok(Settings {
        store_url: last_set(STORE_URL_VARS),
        anon_key: last_set(ANON_KEY_VARS),
        request_timeout_seconds,
    })
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
