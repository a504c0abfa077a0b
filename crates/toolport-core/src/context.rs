//! Application context for unified dependency injection.

use crate::client::{Platform, PolicyTable, TargetResolver};
use crate::config::Settings;
use crate::error::Result;
use crate::install::Installer;
use crate::process::ProcessRunner;
use crate::verify::Verifier;

/// Shared services resolved once per run.
///
/// Frontends build this from the detected platform and loaded settings, then
/// hand out installers bound to a process runner.
#[derive(Debug, Clone)]
pub struct AppContext {
    settings: Settings,
    resolver: TargetResolver,
    policies: PolicyTable,
}

impl AppContext {
    pub fn new(platform: Platform, settings: Settings) -> Self {
        let resolver = TargetResolver::new(platform, settings.vscode_dispatch);
        let policies = settings.policy_table();
        Self {
            settings,
            resolver,
            policies,
        }
    }

    /// Context for the current machine and user settings.
    pub fn load() -> Result<Self> {
        Ok(Self::new(Platform::detect()?, Settings::load()?))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn platform(&self) -> &Platform {
        self.resolver.platform()
    }

    pub fn resolver(&self) -> &TargetResolver {
        &self.resolver
    }

    pub fn policies(&self) -> &PolicyTable {
        &self.policies
    }

    pub fn verifier(&self) -> Result<Verifier> {
        Verifier::new(self.settings.verify_endpoint.clone())
    }

    pub fn installer<'a, R: ProcessRunner>(&'a self, runner: &'a R) -> Installer<'a, R> {
        Installer::new(&self.resolver, &self.policies, runner)
    }
}
