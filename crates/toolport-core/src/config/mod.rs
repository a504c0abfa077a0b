//! Client configuration documents and their persistence.
//!
//! - `document`: the in-memory view of a client's config
//! - `entry`: server entry shapes and their JSON form
//! - `store`: read/merge/write, or hand-off for clients that own their storage
//! - `settings`: toolport's own settings file

pub mod document;
pub mod entry;
pub mod json;
pub mod settings;
pub mod store;

pub use document::{ClientConfig, ServerMap};
pub use entry::{ConfiguredServer, ServerEntry};
pub use settings::Settings;
pub use store::{ConfigStore, WriteOutcome};
