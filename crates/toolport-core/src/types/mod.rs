//! Shared core types used across the resolver, store and installer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Supported client applications, in detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClientKind {
    /// Claude Desktop
    Claude,
    /// Windsurf (Codeium)
    Windsurf,
    /// Cursor
    Cursor,
    /// Visual Studio Code
    #[serde(rename = "vscode")]
    VsCode,
    /// Visual Studio Code Insiders
    #[serde(rename = "vscode-insiders")]
    VsCodeInsiders,
}

impl ClientKind {
    pub const ALL: [ClientKind; 5] = [
        ClientKind::Claude,
        ClientKind::Windsurf,
        ClientKind::Cursor,
        ClientKind::VsCode,
        ClientKind::VsCodeInsiders,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ClientKind::Claude => "claude",
            ClientKind::Windsurf => "windsurf",
            ClientKind::Cursor => "cursor",
            ClientKind::VsCode => "vscode",
            ClientKind::VsCodeInsiders => "vscode-insiders",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ClientKind::Claude => "Claude Desktop",
            ClientKind::Windsurf => "Windsurf",
            ClientKind::Cursor => "Cursor",
            ClientKind::VsCode => "VS Code",
            ClientKind::VsCodeInsiders => "VS Code Insiders",
        }
    }

    /// Comma-separated list of every valid client id.
    pub fn id_list() -> String {
        Self::ALL
            .iter()
            .map(|kind| kind.id())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ClientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ClientKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == normalized)
            .ok_or_else(|| Error::UnknownClient {
                name: s.to_string(),
            })
    }
}

/// Server record returned by the verification endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerDetails {
    pub server_id: String,
    pub endpoint: String,
    /// Address clients should actually connect to.
    pub mcp_endpoint: String,
    pub server_type: String,
    #[serde(default)]
    pub supported_agents: Vec<String>,
}
