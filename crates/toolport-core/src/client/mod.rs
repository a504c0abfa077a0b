//! Client layer: where each client keeps its configuration, what its server
//! entries look like, and whether it is installed on this machine.

pub mod detect;
pub mod platform;
pub mod policy;
pub mod target;

pub use detect::ClientDetector;
pub use platform::{Os, Platform};
pub use policy::{ClientPolicy, EntryShape, IdStrategy, PolicyTable};
pub use target::{InstallTarget, TargetResolver, VsCodeDispatch};
