//! User settings loaded from `toolport.toml`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::client::policy::DEFAULT_ID_PREFIX;
use crate::client::{PolicyTable, VsCodeDispatch};
use crate::error::{Error, Result};
use crate::types::ClientKind;

pub const SETTINGS_FILE: &str = "toolport.toml";

/// Overrides the settings file location.
pub const SETTINGS_PATH_ENV: &str = "TOOLPORT_CONFIG";

/// Overrides `verify_endpoint`.
pub const VERIFY_ENDPOINT_ENV: &str = "TOOLPORT_VERIFY_ENDPOINT";

pub const DEFAULT_VERIFY_ENDPOINT: &str =
    "https://sequencer-v2.heurist.xyz/provision/servers/details";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub verify_endpoint: String,
    pub id_prefix: String,
    pub vscode_dispatch: VsCodeDispatch,
    /// Per-client overrides keyed by client id.
    pub clients: HashMap<String, ClientOverride>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientOverride {
    /// Install under this id instead of a generated one.
    pub fixed_id: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            verify_endpoint: DEFAULT_VERIFY_ENDPOINT.to_string(),
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            vscode_dispatch: VsCodeDispatch::default(),
            clients: HashMap::new(),
        }
    }
}

impl Settings {
    /// Default settings location, honoring `TOOLPORT_CONFIG`.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(SETTINGS_PATH_ENV).filter(|p| !p.is_empty()) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("toolport").join(SETTINGS_FILE))
    }

    /// Load settings from the default location with environment overrides.
    pub fn load() -> Result<Self> {
        let mut settings = match Self::default_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        if let Ok(endpoint) = std::env::var(VERIFY_ENDPOINT_ENV)
            && !endpoint.trim().is_empty()
        {
            settings.verify_endpoint = endpoint.trim().to_string();
        }
        Ok(settings)
    }

    /// Load settings from `path`; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).map_err(|err| Error::io("read", path, err))?;
        Self::parse(&content).map_err(|message| Error::Settings {
            path: path.to_path_buf(),
            message,
        })
    }

    fn parse(content: &str) -> std::result::Result<Self, String> {
        let settings: Settings = toml::from_str(content).map_err(|err| err.to_string())?;
        if settings.id_prefix.is_empty() {
            return Err("id_prefix must not be empty".to_string());
        }
        for (name, client) in &settings.clients {
            name.parse::<ClientKind>().map_err(|err| err.to_string())?;
            if client.fixed_id.as_deref().is_some_and(|id| id.trim().is_empty()) {
                return Err(format!("clients.{name}.fixed_id must not be empty"));
            }
        }
        Ok(settings)
    }

    pub fn policy_table(&self) -> PolicyTable {
        self.clients.iter().fold(
            PolicyTable::new(self.id_prefix.clone()),
            |table, (name, client)| match (name.parse::<ClientKind>(), &client.fixed_id) {
                (Ok(kind), Some(id)) => table.with_fixed_id(kind, id.trim()),
                _ => table,
            },
        )
    }
}
