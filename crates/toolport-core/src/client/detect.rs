//! Best-effort detection of installed clients.

use super::target::{InstallTarget, TargetResolver};
use crate::process::ProcessRunner;
use crate::types::ClientKind;

#[derive(Debug)]
pub struct ClientDetector<'a, R: ProcessRunner> {
    resolver: &'a TargetResolver,
    runner: &'a R,
}

impl<'a, R: ProcessRunner> ClientDetector<'a, R> {
    pub fn new(resolver: &'a TargetResolver, runner: &'a R) -> Self {
        Self { resolver, runner }
    }

    /// Installed clients, in declaration order.
    pub fn detect(&self) -> Vec<ClientKind> {
        ClientKind::ALL
            .into_iter()
            .filter(|kind| self.is_installed(*kind))
            .collect()
    }

    pub fn is_installed(&self, kind: ClientKind) -> bool {
        let installed = match self.resolver.resolve(kind) {
            // Some clients create their config directory but not the file.
            InstallTarget::File { path } => {
                path.exists() || path.parent().is_some_and(|dir| dir.is_dir())
            }
            InstallTarget::Command { program, .. } => self.responds(&program),
            InstallTarget::Protocol { version_check, .. } => {
                version_check
                    .as_deref()
                    .is_some_and(|program| self.responds(program))
            }
        };
        tracing::debug!(client = %kind, installed, "client detection");
        installed
    }

    fn responds(&self, program: &str) -> bool {
        match self.runner.run(program, &["--version".to_string()]) {
            Ok(output) => output.success,
            Err(err) => {
                tracing::debug!(program, error = %err, "version check failed");
                false
            }
        }
    }
}
