//! Installing a verified tool into client configurations.

pub mod orchestrator;
pub mod reporter;

pub use orchestrator::{
    ClientListing, ClientOutcome, InstallReport, InstallRequest, Installer, build_entry,
    merge_entry,
};
pub use reporter::{InstallReporter, SilentReporter};
