use std::env;
use std::fs;
use std::path::PathBuf;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Environment variable consulted when the config file carries no key.
const API_KEY_ENV: &str = "DEEPSEEK_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

/// Fully resolved settings used for a completion request: file values over
/// the environment over the built-in defaults.
#[derive(Debug, Clone)]
pub struct EffectiveConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
}

fn get_app_data_dir() -> Result<PathBuf, String> {
    let data_dir = dirs::data_dir()
        .ok_or("Could not find data directory")?
        .join("Bubble");

    if !data_dir.exists() {
        fs::create_dir_all(&data_dir).map_err(|e| e.to_string())?;
    }

    Ok(data_dir)
}

fn get_config_path() -> Result<PathBuf, String> {
    Ok(get_app_data_dir()?.join("config.json"))
}

pub fn load_config() -> Result<Config, String> {
    let config_path = get_config_path()?;

    if !config_path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&config_path)
        .map_err(|e| format!("Failed to read config: {}", e))?;
    serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse config: {}", e))
}

pub fn save_config(config: &Config) -> Result<(), String> {
    let config_path = get_config_path()?;
    let content = serde_json::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;
    fs::write(&config_path, content)
        .map_err(|e| format!("Failed to write config: {}", e))?;
    Ok(())
}

pub fn set_api_key(key: &str) -> Result<(), String> {
    let mut config = load_config().unwrap_or_default();
    config.api_key = Some(key.to_string());
    save_config(&config)
}

pub fn set_base_url(url: &str) -> Result<(), String> {
    let mut config = load_config().unwrap_or_default();
    config.base_url = Some(url.to_string());
    save_config(&config)
}

pub fn set_model(model: &str) -> Result<(), String> {
    let mut config = load_config().unwrap_or_default();
    config.model = Some(model.to_string());
    save_config(&config)
}

pub fn get_full_config() -> Result<Config, String> {
    load_config()
}

/// Resolve the settings a request should use. An unreadable config file
/// counts as absent so a completion attempt can always be made; a missing
/// key simply fails upstream and turns into the fallback reply.
pub fn effective_config() -> EffectiveConfig {
    let file = load_config().unwrap_or_default();
    let env_key = env::var(API_KEY_ENV).ok();
    resolve(file, env_key)
}

fn resolve(file: Config, env_key: Option<String>) -> EffectiveConfig {
    let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    EffectiveConfig {
        base_url: non_empty(file.base_url).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        model: non_empty(file.model).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        api_key: non_empty(file.api_key)
            .or(non_empty(env_key))
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_falls_back_to_defaults() {
        let effective = resolve(Config::default(), None);
        assert_eq!(effective.base_url, DEFAULT_BASE_URL);
        assert_eq!(effective.model, DEFAULT_MODEL);
        assert_eq!(effective.api_key, "");
    }

    #[test]
    fn file_values_win_over_environment_and_defaults() {
        let file = Config {
            api_key: Some("sk-from-file".to_string()),
            base_url: Some("https://example.com/v1".to_string()),
            model: Some("other-model".to_string()),
        };
        let effective = resolve(file, Some("sk-from-env".to_string()));
        assert_eq!(effective.base_url, "https://example.com/v1");
        assert_eq!(effective.model, "other-model");
        assert_eq!(effective.api_key, "sk-from-file");
    }

    #[test]
    fn environment_key_is_used_when_file_has_none() {
        let effective = resolve(Config::default(), Some("sk-from-env".to_string()));
        assert_eq!(effective.api_key, "sk-from-env");
    }

    #[test]
    fn blank_file_values_count_as_absent() {
        let file = Config {
            api_key: Some("   ".to_string()),
            base_url: Some("".to_string()),
            model: None,
        };
        let effective = resolve(file, None);
        assert_eq!(effective.base_url, DEFAULT_BASE_URL);
        assert_eq!(effective.model, DEFAULT_MODEL);
        assert_eq!(effective.api_key, "");
    }
}
