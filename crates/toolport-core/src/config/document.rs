//! In-memory client configuration document.

use serde_json::{Map, Value};

use super::entry::ConfiguredServer;
use crate::client::ClientPolicy;

/// Server entries keyed by logical id, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerMap {
    entries: Vec<(String, ConfiguredServer)>,
}

impl ServerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ConfiguredServer> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, server)| server)
    }

    /// Insert or replace `id`. A replaced entry keeps its position.
    pub fn insert(
        &mut self,
        id: impl Into<String>,
        server: impl Into<ConfiguredServer>,
    ) -> Option<ConfiguredServer> {
        let id = id.into();
        let server = server.into();
        match self.entries.iter_mut().find(|(key, _)| *key == id) {
            Some((_, slot)) => Some(std::mem::replace(slot, server)),
            None => {
                self.entries.push((id, server));
                None
            }
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<ConfiguredServer> {
        let idx = self.entries.iter().position(|(key, _)| key == id)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str, &ConfiguredServer) -> bool) {
        self.entries.retain(|(id, server)| keep(id, server));
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfiguredServer)> {
        self.entries.iter().map(|(id, server)| (id.as_str(), server))
    }

    pub fn from_json(map: Map<String, Value>, url_field: &str) -> Self {
        Self {
            entries: map
                .into_iter()
                .map(|(id, value)| (id, ConfiguredServer::from_json(value, url_field)))
                .collect(),
        }
    }

    pub fn to_json(&self, url_field: &str) -> Map<String, Value> {
        self.entries
            .iter()
            .map(|(id, server)| (id.clone(), server.to_json(url_field)))
            .collect()
    }
}

/// A client's configuration: server entries plus every other top-level key,
/// which is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientConfig {
    pub servers: ServerMap,
    pub extra: Map<String, Value>,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(mut root: Map<String, Value>, policy: &ClientPolicy) -> Self {
        let servers = match root.remove(policy.servers_key) {
            Some(Value::Object(map)) => ServerMap::from_json(map, policy.url_field),
            Some(other) => {
                tracing::warn!(
                    key = policy.servers_key,
                    found = %other,
                    "server section is not an object, treating as empty"
                );
                ServerMap::new()
            }
            None => ServerMap::new(),
        };
        Self {
            servers,
            extra: root,
        }
    }

    /// Top-level document with the policy's key and field names applied.
    pub fn to_json(&self, policy: &ClientPolicy) -> Map<String, Value> {
        let mut root = self.extra.clone();
        root.insert(
            policy.servers_key.to_string(),
            Value::Object(self.servers.to_json(policy.url_field)),
        );
        root
    }
}
