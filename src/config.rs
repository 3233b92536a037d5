//! Configuration Management
//!
//! Connection settings for towerctl. Non-secret settings persist in a JSON
//! file; secrets only ever come from the environment or the command line.

use crate::awx::Auth;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const HOST_VARS: &[&str] = &["TOWER_HOST", "AWX_HOST"];
const USERNAME_VARS: &[&str] = &["TOWER_USERNAME", "AWX_USERNAME"];
const PASSWORD_VARS: &[&str] = &["TOWER_PASSWORD", "AWX_PASSWORD"];
const TOKEN_VARS: &[&str] = &["TOWER_AUTH_TOKEN", "AWX_AUTH_TOKEN"];
const VERIFY_SSL_VARS: &[&str] = &["TOWER_VERIFY_SSL", "AWX_VERIFY_SSL"];

/// User configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// API host, e.g. https://awx.example.com
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub verify_ssl: Option<bool>,
}

/// Values given on the command line; they win over env and file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub hostname: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,
    pub verify_ssl: Option<bool>,
}

/// Validated connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub hostname: String,
    pub auth: Auth,
    pub verify_ssl: bool,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("towerctl").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path().context("No config directory available")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content).with_context(|| format!("Failed to write {:?}", path))?;

        Ok(path)
    }

    /// Resolve settings (CLI > environment > config file) and validate them
    pub fn resolve(&self, cli: &Overrides) -> Result<Connection> {
        self.resolve_with(cli, |name| std::env::var(name).ok())
    }

    fn resolve_with<F>(&self, cli: &Overrides, env: F) -> Result<Connection>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |flag: &Option<String>, vars: &[&str], file: &Option<String>| {
            non_empty(flag.clone())
                .or_else(|| first_env(&env, vars))
                .or_else(|| non_empty(file.clone()))
        };

        let hostname = pick(&cli.hostname, HOST_VARS, &self.hostname)
            .context("hostname is required: set TOWER_HOST or run `towerctl configure --host`")?;
        url::Url::parse(&hostname).with_context(|| format!("invalid hostname {}", hostname))?;

        let username = pick(&cli.username, USERNAME_VARS, &self.username);
        let password = pick(&cli.password, PASSWORD_VARS, &None);
        let token = pick(&cli.token, TOKEN_VARS, &None);

        let auth = match (username, password, token) {
            (Some(username), Some(password), None) => Auth::basic(username, password),
            (None, None, Some(token)) => Auth::token(token),
            (None, None, None) => {
                bail!("no credentials: set TOWER_USERNAME and TOWER_PASSWORD, or TOWER_AUTH_TOKEN")
            }
            (Some(_), None, _) => bail!("username is set but password is missing"),
            (None, Some(_), _) => bail!("password is set but username is missing"),
            (Some(_), Some(_), Some(_)) => {
                bail!("both basic auth and a token are set; use only one")
            }
        };

        let verify_ssl = cli
            .verify_ssl
            .or_else(|| first_env(&env, VERIFY_SSL_VARS).map(|v| parse_bool(&v)))
            .or(self.verify_ssl)
            .unwrap_or(true);

        Ok(Connection {
            hostname,
            auth,
            verify_ssl,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn first_env<F>(env: &F, names: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    names.iter().find_map(|name| non_empty(env(name)))
}

/// Lenient boolean parse; anything unrecognised is false
pub fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "t" | "true"
    )
}
