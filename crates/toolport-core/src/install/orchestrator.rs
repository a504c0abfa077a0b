//! Install orchestration across clients.

use super::reporter::InstallReporter;
use crate::client::{
    ClientDetector, ClientPolicy, EntryShape, IdStrategy, InstallTarget, Os, PolicyTable,
    TargetResolver,
};
use crate::config::{ClientConfig, ConfigStore, ServerEntry, WriteOutcome};
use crate::error::{Error, Result};
use crate::process::ProcessRunner;
use crate::types::{ClientKind, ServerDetails};

/// Local proxy bridging stdio-only clients to a remote SSE endpoint.
const PROXY_PACKAGE: &str = "mcp-remote";

#[derive(Debug, Clone, Copy)]
pub struct InstallRequest<'a> {
    pub details: &'a ServerDetails,
    /// Hex id taken from the tool URL.
    pub tool_id: &'a str,
    /// Install to this client only; otherwise every detected client.
    pub target: Option<ClientKind>,
}

#[derive(Debug)]
pub struct ClientOutcome {
    pub client: ClientKind,
    /// Id the tool is installed under.
    pub server_id: String,
    /// Stale entries dropped before writing.
    pub removed: Vec<String>,
    pub result: Result<WriteOutcome>,
}

impl ClientOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug, Default)]
pub struct InstallReport {
    /// Working set, in processing order.
    pub clients: Vec<ClientKind>,
    pub outcomes: Vec<ClientOutcome>,
    /// The user declined a confirmation part-way through.
    pub cancelled: bool,
}

impl InstallReport {
    pub fn nothing_to_do(&self) -> bool {
        self.clients.is_empty()
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &ClientOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &ClientOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn is_success(&self) -> bool {
        self.succeeded().next().is_some()
    }
}

/// One row of `list` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientListing {
    pub client: ClientKind,
    /// Configured server count, or `None` when the client manages its own
    /// configuration.
    pub servers: Option<usize>,
}

#[derive(Debug)]
pub struct Installer<'a, R: ProcessRunner> {
    resolver: &'a TargetResolver,
    store: ConfigStore<'a, R>,
    detector: ClientDetector<'a, R>,
}

impl<'a, R: ProcessRunner> Installer<'a, R> {
    pub fn new(resolver: &'a TargetResolver, policies: &'a PolicyTable, runner: &'a R) -> Self {
        Self {
            resolver,
            store: ConfigStore::new(resolver, policies, runner),
            detector: ClientDetector::new(resolver, runner),
        }
    }

    pub fn store(&self) -> &ConfigStore<'a, R> {
        &self.store
    }

    pub fn detector(&self) -> &ClientDetector<'a, R> {
        &self.detector
    }

    /// Install a verified tool into one client or every detected client.
    ///
    /// Clients are processed one at a time and a failure on one does not stop
    /// the rest. Fails with [`Error::AllClientsFailed`] only when there was
    /// work to do, the run was not cancelled, and no client succeeded.
    pub fn install(
        &self,
        request: InstallRequest<'_>,
        reporter: &mut dyn InstallReporter,
    ) -> Result<InstallReport> {
        let clients = match request.target {
            Some(client) => vec![client],
            None => self.detector.detect(),
        };
        reporter.clients_selected(&clients);

        let mut report = InstallReport {
            clients,
            ..InstallReport::default()
        };
        if report.nothing_to_do() {
            tracing::info!("no clients to install to");
            return Ok(report);
        }

        for &client in &report.clients {
            let existing = self.existing_installs(client);
            if !existing.is_empty() && !reporter.confirm_existing(client, &existing) {
                tracing::info!(client = %client, "install cancelled by user");
                report.cancelled = true;
                break;
            }

            reporter.client_started(client);
            let outcome = self.install_client(client, &request);
            match &outcome.result {
                Ok(result) => tracing::info!(client = %client, ?result, "installed"),
                Err(err) => tracing::warn!(client = %client, error = %err, "install failed"),
            }
            reporter.client_finished(&outcome);
            report.outcomes.push(outcome);
        }

        if !report.cancelled && !report.is_success() {
            return Err(Error::AllClientsFailed);
        }
        Ok(report)
    }

    fn install_client(&self, client: ClientKind, request: &InstallRequest<'_>) -> ClientOutcome {
        let policy = self.store.policy(client);
        let server_id = policy.ids.server_id(request.tool_id);

        let mut config = self.store.read(client);
        let entry = build_entry(request.details, &policy, self.resolver.platform().os);
        let removed = merge_entry(&mut config, &policy, &server_id, entry);
        let result = self.store.write(&config, client);

        ClientOutcome {
            client,
            server_id,
            removed,
            result,
        }
    }

    /// Ids of entries this tool previously installed in `client`.
    pub fn existing_installs(&self, client: ClientKind) -> Vec<String> {
        let policy = self.store.policy(client);
        self.store
            .read(client)
            .servers
            .ids()
            .filter(|id| policy.ids.owns(id))
            .map(String::from)
            .collect()
    }

    /// Summarize detected clients and what they have configured.
    pub fn list(&self) -> Vec<ClientListing> {
        self.detector
            .detect()
            .into_iter()
            .map(|client| {
                let servers = match self.store.target(client) {
                    InstallTarget::File { .. } => Some(self.store.read(client).servers.len()),
                    InstallTarget::Command { .. } | InstallTarget::Protocol { .. } => None,
                };
                ClientListing { client, servers }
            })
            .collect()
    }
}

/// Entry shape `policy` expects for the verified server.
pub fn build_entry(details: &ServerDetails, policy: &ClientPolicy, os: Os) -> ServerEntry {
    match policy.entry_shape {
        EntryShape::Url => ServerEntry::url(details.mcp_endpoint.clone()),
        EntryShape::Command => {
            let proxy = ["-y", PROXY_PACKAGE, details.mcp_endpoint.as_str()];
            match os {
                Os::Windows => ServerEntry::command("cmd", ["/c", "npx"].into_iter().chain(proxy)),
                Os::MacOs | Os::Linux => ServerEntry::command("npx", proxy),
            }
        }
    }
}

/// Put `entry` under `server_id`, first dropping other entries from earlier
/// installs when ids are generated. An existing `server_id` entry is
/// replaced where it stands. Returns the dropped ids.
pub fn merge_entry(
    config: &mut ClientConfig,
    policy: &ClientPolicy,
    server_id: &str,
    entry: ServerEntry,
) -> Vec<String> {
    let mut removed = Vec::new();
    if let IdStrategy::Generated { .. } = policy.ids {
        config.servers.retain(|id, _| {
            let stale = id != server_id && policy.ids.owns(id);
            if stale {
                removed.push(id.to_string());
            }
            !stale
        });
    }
    config.servers.insert(server_id, entry);
    removed
}
