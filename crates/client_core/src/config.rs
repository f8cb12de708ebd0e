use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "career_client.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Every endpoint path is appended to this, e.g. `<base>/questions`.
    pub api_base_url: String,
    /// Client-side bound on the question fetch, independent of `request_timeout`.
    pub question_timeout: Duration,
    pub request_timeout: Duration,
    /// Public page linked from share messages.
    pub share_url: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:5000/api".into(),
            question_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            share_url: "http://127.0.0.1:5000/".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    question_timeout_secs: Option<u64>,
    request_timeout_secs: Option<u64>,
    share_url: Option<String>,
}

/// Defaults, then the TOML file (explicit path or `career_client.toml` if present), then env.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{}'", path.display()))?;
            apply_file(&mut settings, &raw)
                .with_context(|| format!("invalid config file '{}'", path.display()))?;
        }
        None => {
            if let Ok(raw) = fs::read_to_string(DEFAULT_CONFIG_FILE) {
                apply_file(&mut settings, &raw)
                    .with_context(|| format!("invalid config file '{DEFAULT_CONFIG_FILE}'"))?;
            }
        }
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file(settings: &mut ClientSettings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = file_cfg.question_timeout_secs {
        settings.question_timeout = Duration::from_secs(v);
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout = Duration::from_secs(v);
    }
    if let Some(v) = file_cfg.share_url {
        settings.share_url = v;
    }
    Ok(())
}

fn apply_env(settings: &mut ClientSettings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("CAREER_API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = lookup("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(secs) = lookup("APP__QUESTION_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
        settings.question_timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = lookup("APP__REQUEST_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
        settings.request_timeout = Duration::from_secs(secs);
    }

    if let Some(v) = lookup("APP__SHARE_URL") {
        settings.share_url = v;
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    #[test]
    fn file_values_override_defaults() {
        let mut settings = ClientSettings::default();
        apply_file(
            &mut settings,
            "api_base_url = \"https://careers.example/api\"\nquestion_timeout_secs = 4\n",
        )
        .expect("parse");
        assert_eq!(settings.api_base_url, "https://careers.example/api");
        assert_eq!(settings.question_timeout, Duration::from_secs(4));
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn app_prefixed_env_wins_and_bad_numbers_are_ignored() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("CAREER_API_BASE_URL", "http://legacy/api"),
            ("APP__API_BASE_URL", "http://app/api"),
            ("APP__QUESTION_TIMEOUT_SECS", "soon"),
            ("APP__REQUEST_TIMEOUT_SECS", "5"),
        ]);
        let mut settings = ClientSettings::default();
        apply_env(&mut settings, |key| env.get(key).map(|v| v.to_string()));
        assert_eq!(settings.api_base_url, "http://app/api");
        assert_eq!(settings.question_timeout, Duration::from_secs(10));
        assert_eq!(settings.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("career_client_missing_{suffix}.toml"));
        assert!(load_settings(Some(&path)).is_err());
    }

    #[test]
    fn explicit_file_is_loaded() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("career_client_{suffix}.toml"));
        fs::write(&path, "share_url = \"https://careers.example/\"\n").expect("write");

        let settings = load_settings(Some(&path)).expect("load");
        assert_eq!(settings.share_url, "https://careers.example/");

        fs::remove_file(path).expect("cleanup");
    }
}
