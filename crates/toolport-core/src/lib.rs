//! Toolport Core Library
//!
//! Verifies remote MCP tools and installs them into the configuration of
//! locally installed MCP clients.

pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod install;
pub mod process;
pub mod types;
pub mod verify;

pub use error::{Error, Result};

/// Re-exports of commonly used types
pub mod prelude {
    // Clients
    pub use crate::client::{
        ClientDetector, ClientPolicy, EntryShape, IdStrategy, InstallTarget, Os, Platform,
        PolicyTable, TargetResolver, VsCodeDispatch,
    };

    // Configuration
    pub use crate::config::{
        ClientConfig, ConfigStore, ConfiguredServer, ServerEntry, ServerMap, Settings,
        WriteOutcome,
    };

    // Install
    pub use crate::context::AppContext;
    pub use crate::install::{
        ClientListing, ClientOutcome, InstallReport, InstallReporter, InstallRequest, Installer,
        SilentReporter,
    };

    // Processes
    pub use crate::process::{ProcessOutput, ProcessRunner, SystemRunner};

    // Types
    pub use crate::types::{ClientKind, ServerDetails};

    // Verification
    pub use crate::verify::{Verifier, extract_tool_id, normalize_input};

    pub use crate::error::{Error, Result};
}
