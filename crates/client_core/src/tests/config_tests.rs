use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| vars.get(name).cloned()
}

fn temp_settings_file(contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("portfolio_settings_test_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("portfolio.toml");
    fs::write(&path, contents).expect("write settings");
    path
}

#[test]
fn file_values_are_overridden_by_environment() {
    let path = temp_settings_file(
        r#"
store_url = "https://file.supabase.co"
anon_key = "file-key"
request_timeout_seconds = 5
"#,
    );

    let settings = load_settings_with(
        Some(path.as_path()),
        env_from(&[("VITE_SUPABASE_URL", "https://env.supabase.co")]),
    )
    .expect("settings");

    assert_eq!(settings.store_url.as_deref(), Some("https://env.supabase.co"));
    assert_eq!(settings.anon_key.as_deref(), Some("file-key"));
    assert_eq!(settings.request_timeout(), Some(Duration::from_secs(5)));
    assert!(settings.is_configured());

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn app_prefixed_variables_win_over_vite_names() {
    let settings = load_settings_with(
        None,
        env_from(&[
            ("VITE_SUPABASE_URL", "https://vite.supabase.co"),
            ("APP__STORE_URL", "https://app.supabase.co"),
            ("SUPABASE_ANON_KEY", "plain-key"),
            ("APP__ANON_KEY", "   "),
        ]),
    )
    .expect("settings");

    assert_eq!(settings.store_url.as_deref(), Some("https://app.supabase.co"));
    assert_eq!(
        settings.anon_key.as_deref(),
        Some("plain-key"),
        "blank overrides are ignored"
    );
}

#[test]
fn missing_values_leave_settings_unconfigured() {
    let settings = load_settings_with(None, env_from(&[])).expect("settings");
    assert_eq!(settings, Settings::default());
    assert!(!settings.is_configured());
    assert_eq!(settings.request_timeout(), None);
}

#[test]
fn explicit_missing_file_is_an_error() {
    let path = env::temp_dir().join("portfolio_settings_test_does_not_exist.toml");
    let err = load_settings_with(Some(path.as_path()), env_from(&[])).expect_err("should fail");
    assert!(err.to_string().contains("failed to read settings file"));
}

#[test]
fn malformed_file_and_timeout_are_errors() {
    let path = temp_settings_file("store_url = [");
    let err = load_settings_with(Some(path.as_path()), env_from(&[])).expect_err("should fail");
    assert!(err.to_string().contains("failed to parse settings file"));
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");

    let err = load_settings_with(
        None,
        env_from(&[("APP__REQUEST_TIMEOUT_SECONDS", "soon")]),
    )
    .expect_err("should fail");
    assert!(err.to_string().contains("APP__REQUEST_TIMEOUT_SECONDS"));
}

#[test]
fn zero_timeout_means_no_timeout() {
    let settings = load_settings_with(
        None,
        env_from(&[("APP__REQUEST_TIMEOUT_SECONDS", "0")]),
    )
    .expect("settings");
    assert_eq!(settings.request_timeout_seconds, Some(0));
    assert_eq!(settings.request_timeout(), None);
}

#[test]
fn blank_timeout_variable_is_ignored() {
    let path = temp_settings_file("request_timeout_seconds = 9\n");
    let settings = load_settings_with(
        Some(path.as_path()),
        env_from(&[("APP__REQUEST_TIMEOUT_SECONDS", "  ")]),
    )
    .expect("settings");
    assert_eq!(settings.request_timeout_seconds, Some(9));
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}
