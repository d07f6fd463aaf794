use crate::{Error, Result};
use chatlog_client::{ApiClient, DEFAULT_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ORIGIN: &str = "http://localhost:8000";
pub const DEFAULT_USER_ID: &str = "admin";

pub const ENV_ORIGIN: &str = "CHATLOG_ORIGIN";
pub const ENV_USER_ID: &str = "CHATLOG_USER_ID";
pub const ENV_PASSWORD: &str = "CHATLOG_PASSWORD";
pub const ENV_PROJECT_ID: &str = "CHATLOG_PROJECT_ID";
pub const ENV_CONFIG: &str = "CHATLOG_CONFIG";

/// Resolve the config file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. CHATLOG_CONFIG environment variable (with tilde expansion)
/// 3. XDG config directory
/// 4. ~/.config/chatlog/config.toml (fallback for systems without XDG)
pub fn resolve_config_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG) {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("chatlog").join("config.toml"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home)
            .join(".config")
            .join("chatlog")
            .join("config.toml"));
    }

    Err(Error::Config(
        "Could not determine config path: no HOME directory or XDG config directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

/// Connection settings as stored in `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub origin: Option<String>,
    pub user_id: Option<String>,
    pub password: Option<String>,
    pub project_id: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load from `path`; a missing file yields an empty config.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file; using flags and environment only");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|err| {
            Error::Config(format!("invalid config file {}: {}", path.display(), err))
        })?;
        Ok(config)
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub origin: Option<String>,
    pub user_id: Option<String>,
    pub password: Option<String>,
    pub project_id: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Fully resolved connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub origin: String,
    pub user_id: String,
    pub password: String,
    pub project_id: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("origin", &self.origin)
            .field("user_id", &self.user_id)
            .field("password", &"<redacted>")
            .field("project_id", &self.project_id)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Settings {
    /// Resolve with the process environment.
    pub fn resolve(flags: &Overrides, config: &Config) -> Result<Self> {
        Self::resolve_with(flags, config, |key| std::env::var(key).ok())
    }

    /// Resolve each value with precedence flag > env > config file > default.
    ///
    /// Empty environment values count as unset.
    pub fn resolve_with<F>(flags: &Overrides, config: &Config, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |flag: &Option<String>, key: &str, file: &Option<String>| {
            flag.clone()
                .or_else(|| env(key).filter(|v| !v.is_empty()))
                .or_else(|| file.clone())
        };

        let origin = lookup(&flags.origin, ENV_ORIGIN, &config.origin)
            .unwrap_or_else(|| DEFAULT_ORIGIN.to_string());
        let user_id = lookup(&flags.user_id, ENV_USER_ID, &config.user_id)
            .unwrap_or_else(|| DEFAULT_USER_ID.to_string());
        let password = lookup(&flags.password, ENV_PASSWORD, &config.password)
            .ok_or_else(|| missing("password", "--password", ENV_PASSWORD))?;
        let project_id = lookup(&flags.project_id, ENV_PROJECT_ID, &config.project_id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| missing("project id", "--project-id", ENV_PROJECT_ID))?;

        let timeout = flags
            .timeout_secs
            .or(config.timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Ok(Self {
            origin,
            user_id,
            password,
            project_id,
            timeout,
        })
    }

    pub fn client(&self) -> Result<ApiClient> {
        let client = ApiClient::builder()
            .origin(&self.origin)
            .project_id(&self.project_id)
            .credentials(&self.user_id, &self.password)
            .timeout(self.timeout)
            .build()?;
        Ok(client)
    }
}

fn missing(what: &str, flag: &str, env: &str) -> Error {
    Error::Config(format!(
        "missing {}: pass {} or set {} (or add it to the config file)",
        what, flag, env
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn no_env() -> impl Fn(&str) -> Option<String> {
        |_| None
    }

    #[test]
    fn test_defaults_apply_for_origin_and_user() {
        let config = Config {
            password: Some("pw".to_string()),
            project_id: Some("proj".to_string()),
            ..Default::default()
        };

        let settings = Settings::resolve_with(&Overrides::default(), &config, no_env()).unwrap();

        assert_eq!(settings.origin, DEFAULT_ORIGIN);
        assert_eq!(settings.user_id, DEFAULT_USER_ID);
        assert_eq!(settings.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_precedence_flag_env_file() {
        let config = Config {
            origin: Some("http://file".to_string()),
            user_id: Some("file-user".to_string()),
            password: Some("file-pw".to_string()),
            project_id: Some("file-proj".to_string()),
            timeout_secs: Some(5),
        };
        let env = env_of(&[
            (ENV_ORIGIN, "http://env"),
            (ENV_USER_ID, "env-user"),
            (ENV_PROJECT_ID, ""),
        ]);
        let flags = Overrides {
            origin: Some("http://flag".to_string()),
            timeout_secs: Some(60),
            ..Default::default()
        };

        let settings = Settings::resolve_with(&flags, &config, env).unwrap();

        assert_eq!(settings.origin, "http://flag");
        assert_eq!(settings.user_id, "env-user");
        assert_eq!(settings.password, "file-pw");
        // empty env value falls through to the file
        assert_eq!(settings.project_id, "file-proj");
        assert_eq!(settings.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_missing_password_names_flag_and_env() {
        let flags = Overrides {
            project_id: Some("proj".to_string()),
            ..Default::default()
        };

        let err = Settings::resolve_with(&flags, &Config::default(), no_env()).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("--password"), "{message}");
        assert!(message.contains(ENV_PASSWORD), "{message}");
    }

    #[test]
    fn test_missing_project_id_is_an_error() {
        let env = env_of(&[(ENV_PASSWORD, "pw")]);

        let err = Settings::resolve_with(&Overrides::default(), &Config::default(), env)
            .unwrap_err();

        assert!(err.to_string().contains("--project-id"));
        assert!(err.to_string().contains(ENV_PROJECT_ID));
    }

    #[test]
    fn test_debug_redacts_password() {
        let env = env_of(&[(ENV_PASSWORD, "hunter2"), (ENV_PROJECT_ID, "proj")]);
        let settings = Settings::resolve_with(&Overrides::default(), &Config::default(), env)
            .unwrap();

        assert!(!format!("{:?}", settings).contains("hunter2"));
    }

    #[test]
    fn test_load_missing_file_is_empty() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = Config::load_from(&temp_dir.path().join("absent.toml"))?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn test_load_from_toml() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "origin = \"https://genai.example.com\"\nproject_id = \"p-1\"\ntimeout_secs = 10\n",
        )?;

        let config = Config::load_from(&path)?;

        assert_eq!(config.origin.as_deref(), Some("https://genai.example.com"));
        assert_eq!(config.project_id.as_deref(), Some("p-1"));
        assert_eq!(config.timeout_secs, Some(10));
        assert_eq!(config.password, None);
        Ok(())
    }

    #[test]
    fn test_load_rejects_unknown_keys() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "projectid = \"typo\"\n")?;

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        Ok(())
    }

    #[test]
    fn test_explicit_config_path_expands_tilde() {
        let path = resolve_config_path(Some("/etc/chatlog.toml")).unwrap();
        assert_eq!(path, PathBuf::from("/etc/chatlog.toml"));

        if let Some(home) = std::env::var_os("HOME") {
            let path = resolve_config_path(Some("~/chatlog.toml")).unwrap();
            assert_eq!(path, PathBuf::from(home).join("chatlog.toml"));
        }
    }
}
