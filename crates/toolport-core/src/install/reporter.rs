//! Progress hooks for the install loop.

use super::ClientOutcome;
use crate::types::ClientKind;

/// Observes an install run. Every method has a no-op default.
pub trait InstallReporter {
    /// The working set has been decided; empty means nothing to do.
    fn clients_selected(&mut self, _clients: &[ClientKind]) {}

    /// `client` already has entries this tool installed. Returning `false`
    /// cancels the remaining run; clients already written stay written.
    fn confirm_existing(&mut self, _client: ClientKind, _existing: &[String]) -> bool {
        true
    }

    fn client_started(&mut self, _client: ClientKind) {}

    fn client_finished(&mut self, _outcome: &ClientOutcome) {}
}

/// Reporter that accepts every prompt and prints nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl InstallReporter for SilentReporter {}
