//! Per-client schema quirks.
//!
//! Everything that differs between clients' server entries lives here, so the
//! store and installer consult one record instead of branching on client ids.

use std::collections::HashMap;

use crate::types::ClientKind;

/// Prefix for generated server ids.
///
/// Kept short: Cursor limits server ids to 60 characters.
pub const DEFAULT_ID_PREFIX: &str = "heu-";

/// Top-level key holding server entries in every built-in file client.
pub const MCP_SERVERS_KEY: &str = "mcpServers";

/// Which entry shape a client expects for a remote tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryShape {
    /// The client connects to the endpoint directly.
    Url,
    /// The client launches a local proxy process that connects for it.
    Command,
}

/// How the logical server id is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdStrategy {
    /// `<prefix><tool id>`; stale prefixed entries are removed on install.
    Generated { prefix: String },
    /// One well-known id, overwritten in place.
    Fixed(String),
}

impl IdStrategy {
    pub fn server_id(&self, tool_id: &str) -> String {
        match self {
            IdStrategy::Generated { prefix } => format!("{prefix}{tool_id}"),
            IdStrategy::Fixed(id) => id.clone(),
        }
    }

    /// Whether `id` was generated by this strategy.
    pub fn owns(&self, id: &str) -> bool {
        match self {
            IdStrategy::Generated { prefix } => id.starts_with(prefix.as_str()),
            IdStrategy::Fixed(fixed) => id == fixed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientPolicy {
    pub servers_key: &'static str,
    pub entry_shape: EntryShape,
    /// Field name carrying the endpoint in URL entries.
    pub url_field: &'static str,
    pub ids: IdStrategy,
}

impl ClientPolicy {
    pub fn builtin(kind: ClientKind, id_prefix: &str) -> Self {
        let ids = IdStrategy::Generated {
            prefix: id_prefix.to_string(),
        };
        match kind {
            // Claude Desktop only speaks stdio, so it goes through a local proxy.
            ClientKind::Claude => ClientPolicy {
                servers_key: MCP_SERVERS_KEY,
                entry_shape: EntryShape::Command,
                url_field: "url",
                ids,
            },
            ClientKind::Windsurf => ClientPolicy {
                servers_key: MCP_SERVERS_KEY,
                entry_shape: EntryShape::Url,
                url_field: "serverUrl",
                ids,
            },
            ClientKind::Cursor | ClientKind::VsCode | ClientKind::VsCodeInsiders => ClientPolicy {
                servers_key: MCP_SERVERS_KEY,
                entry_shape: EntryShape::Url,
                url_field: "url",
                ids,
            },
        }
    }
}

/// Policies for every client, with user overrides applied.
#[derive(Debug, Clone)]
pub struct PolicyTable {
    id_prefix: String,
    fixed_ids: HashMap<ClientKind, String>,
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::new(DEFAULT_ID_PREFIX)
    }
}

impl PolicyTable {
    pub fn new(id_prefix: impl Into<String>) -> Self {
        Self {
            id_prefix: id_prefix.into(),
            fixed_ids: HashMap::new(),
        }
    }

    /// Pin a client to a single well-known server id.
    pub fn with_fixed_id(mut self, kind: ClientKind, id: impl Into<String>) -> Self {
        self.fixed_ids.insert(kind, id.into());
        self
    }

    pub fn policy(&self, kind: ClientKind) -> ClientPolicy {
        let mut policy = ClientPolicy::builtin(kind, &self.id_prefix);
        if let Some(id) = self.fixed_ids.get(&kind) {
            policy.ids = IdStrategy::Fixed(id.clone());
        }
        policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windsurf_uses_server_url_field() {
        let table = PolicyTable::default();
        assert_eq!(table.policy(ClientKind::Windsurf).url_field, "serverUrl");
        assert_eq!(table.policy(ClientKind::Cursor).url_field, "url");
    }

    #[test]
    fn only_claude_uses_command_entries() {
        let table = PolicyTable::default();
        for kind in ClientKind::ALL {
            let expected = if kind == ClientKind::Claude {
                EntryShape::Command
            } else {
                EntryShape::Url
            };
            assert_eq!(table.policy(kind).entry_shape, expected, "{kind}");
        }
    }

    #[test]
    fn generated_ids_carry_prefix() {
        let ids = PolicyTable::default().policy(ClientKind::Cursor).ids;
        assert_eq!(ids.server_id("0f1234de"), "heu-0f1234de");
        assert!(ids.owns("heu-anything"));
        assert!(!ids.owns("my-server"));
    }

    #[test]
    fn fixed_id_override_replaces_generated_ids() {
        let table = PolicyTable::default().with_fixed_id(ClientKind::Claude, "toolport");
        let ids = table.policy(ClientKind::Claude).ids;
        assert_eq!(ids, IdStrategy::Fixed("toolport".into()));
        assert_eq!(ids.server_id("0f1234de"), "toolport");
        assert_eq!(
            table.policy(ClientKind::Cursor).ids,
            IdStrategy::Generated {
                prefix: "heu-".into()
            }
        );
    }
}
