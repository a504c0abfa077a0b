//! Install target resolution.
//!
//! Maps each client to where its configuration lives: a JSON file on disk,
//! an external command that edits the config for us, or an OS protocol
//! handler owned by the client application.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::platform::Platform;
use crate::types::ClientKind;

/// Path segment VS Code registers for MCP installs.
const VSCODE_INSTALL_PATH: &str = "mcp/install";

/// Flag accepted by the VS Code CLI for registering a server.
const VSCODE_ADD_FLAG: &str = "--add-mcp";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallTarget {
    /// JSON document on disk.
    File { path: PathBuf },
    /// External executable invoked once per server entry.
    Command {
        program: String,
        add_flag: &'static str,
    },
    /// OS-registered URI scheme handled by the client itself.
    Protocol {
        scheme: &'static str,
        path: &'static str,
        insiders: bool,
        /// Executable checked with `--version` during detection.
        version_check: Option<String>,
    },
}

impl InstallTarget {
    pub fn file_path(&self) -> Option<&Path> {
        match self {
            InstallTarget::File { path } => Some(path),
            InstallTarget::Command { .. } | InstallTarget::Protocol { .. } => None,
        }
    }
}

/// How VS Code channels receive new servers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VsCodeDispatch {
    /// Open a `vscode:mcp/install?...` URI.
    #[default]
    Protocol,
    /// Run `code --add-mcp <json>`.
    Command,
}

/// Resolves clients to install targets from fixed platform inputs.
#[derive(Debug, Clone)]
pub struct TargetResolver {
    platform: Platform,
    vscode_dispatch: VsCodeDispatch,
}

impl TargetResolver {
    pub fn new(platform: Platform, vscode_dispatch: VsCodeDispatch) -> Self {
        Self {
            platform,
            vscode_dispatch,
        }
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn resolve(&self, kind: ClientKind) -> InstallTarget {
        let home = self.platform.home_dir();
        match kind {
            ClientKind::Claude => InstallTarget::File {
                path: self
                    .platform
                    .config_base_dir()
                    .join("Claude")
                    .join("claude_desktop_config.json"),
            },
            ClientKind::Windsurf => InstallTarget::File {
                path: home.join(".codeium").join("windsurf").join("mcp_config.json"),
            },
            ClientKind::Cursor => InstallTarget::File {
                path: home.join(".cursor").join("mcp.json"),
            },
            ClientKind::VsCode => self.vscode_target("code", "vscode", false),
            ClientKind::VsCodeInsiders => {
                self.vscode_target("code-insiders", "vscode-insiders", true)
            }
        }
    }

    /// Resolve a client by name, guessing a conventional layout for names
    /// that are not built in.
    pub fn resolve_name(&self, name: &str) -> InstallTarget {
        match name.parse::<ClientKind>() {
            Ok(kind) => self.resolve(kind),
            Err(_) => {
                let name = name.trim().to_ascii_lowercase();
                tracing::debug!(client = %name, "no built-in target, guessing config location");
                InstallTarget::File {
                    path: self
                        .platform
                        .config_base_dir()
                        .join(&name)
                        .join(format!("{name}_config.json")),
                }
            }
        }
    }

    fn vscode_target(&self, executable: &str, scheme: &'static str, insiders: bool) -> InstallTarget {
        let program = self.platform.executable(executable);
        match self.vscode_dispatch {
            VsCodeDispatch::Protocol => InstallTarget::Protocol {
                scheme,
                path: VSCODE_INSTALL_PATH,
                insiders,
                version_check: Some(program),
            },
            VsCodeDispatch::Command => InstallTarget::Command {
                program,
                add_flag: VSCODE_ADD_FLAG,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::platform::Os;

    fn linux_resolver(dispatch: VsCodeDispatch) -> TargetResolver {
        TargetResolver::new(Platform::with_home(Os::Linux, "/home/u"), dispatch)
    }

    #[test]
    fn file_clients_resolve_to_known_paths() {
        let resolver = linux_resolver(VsCodeDispatch::Protocol);

        assert_eq!(
            resolver.resolve(ClientKind::Claude).file_path(),
            Some(Path::new("/home/u/.config/Claude/claude_desktop_config.json"))
        );
        assert_eq!(
            resolver.resolve(ClientKind::Windsurf).file_path(),
            Some(Path::new("/home/u/.codeium/windsurf/mcp_config.json"))
        );
        assert_eq!(
            resolver.resolve(ClientKind::Cursor).file_path(),
            Some(Path::new("/home/u/.cursor/mcp.json"))
        );
    }

    #[test]
    fn vscode_channels_resolve_to_protocol_handlers() {
        let resolver = linux_resolver(VsCodeDispatch::Protocol);

        assert_eq!(
            resolver.resolve(ClientKind::VsCode),
            InstallTarget::Protocol {
                scheme: "vscode",
                path: "mcp/install",
                insiders: false,
                version_check: Some("code".into()),
            }
        );
        match resolver.resolve(ClientKind::VsCodeInsiders) {
            InstallTarget::Protocol {
                scheme, insiders, ..
            } => {
                assert_eq!(scheme, "vscode-insiders");
                assert!(insiders);
            }
            other => panic!("unexpected target {other:?}"),
        }
    }

    #[test]
    fn command_dispatch_uses_platform_executable() {
        let resolver = TargetResolver::new(
            Platform::with_home(Os::Windows, "/users/u"),
            VsCodeDispatch::Command,
        );
        assert_eq!(
            resolver.resolve(ClientKind::VsCodeInsiders),
            InstallTarget::Command {
                program: "code-insiders.cmd".into(),
                add_flag: "--add-mcp",
            }
        );
    }

    #[test]
    fn resolve_is_deterministic_for_every_kind() {
        let resolver = linux_resolver(VsCodeDispatch::Protocol);
        for kind in ClientKind::ALL {
            assert_eq!(resolver.resolve(kind), resolver.resolve(kind));
        }
    }

    #[test]
    fn unknown_names_fall_back_to_conventional_file() {
        let resolver = linux_resolver(VsCodeDispatch::Protocol);
        assert_eq!(
            resolver.resolve_name("Zed"),
            InstallTarget::File {
                path: PathBuf::from("/home/u/.config/zed/zed_config.json"),
            }
        );
        assert_eq!(
            resolver.resolve_name("cursor"),
            resolver.resolve(ClientKind::Cursor)
        );
    }
}
