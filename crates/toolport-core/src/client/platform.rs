//! Platform inputs used to locate client configuration.
//!
//! Captured once at startup and passed to the resolver, so path logic never
//! reads ambient process state on its own.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Windows,
    MacOs,
    Linux,
}

impl Os {
    pub const fn current() -> Self {
        #[cfg(target_os = "windows")]
        return Self::Windows;

        #[cfg(target_os = "macos")]
        return Self::MacOs;

        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        return Self::Linux;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub os: Os,
    pub home_dir: PathBuf,
    /// Value of `APPDATA`, if set.
    pub app_data: Option<PathBuf>,
    /// Value of `XDG_CONFIG_HOME`, if set.
    pub xdg_config_home: Option<PathBuf>,
}

impl Platform {
    /// Capture the current machine's platform inputs.
    pub fn detect() -> Result<Self> {
        let home_dir = dirs::home_dir().ok_or(Error::HomeDirUnavailable)?;
        Ok(Self {
            os: Os::current(),
            home_dir,
            app_data: non_empty_env("APPDATA"),
            xdg_config_home: non_empty_env("XDG_CONFIG_HOME"),
        })
    }

    /// Platform with only a home directory; environment overrides unset.
    pub fn with_home(os: Os, home_dir: impl Into<PathBuf>) -> Self {
        Self {
            os,
            home_dir: home_dir.into(),
            app_data: None,
            xdg_config_home: None,
        }
    }

    pub fn home_dir(&self) -> &Path {
        &self.home_dir
    }

    /// Per-user application configuration root.
    pub fn config_base_dir(&self) -> PathBuf {
        match self.os {
            Os::Windows => self
                .app_data
                .clone()
                .unwrap_or_else(|| self.home_dir.join("AppData").join("Roaming")),
            Os::MacOs => self.home_dir.join("Library").join("Application Support"),
            Os::Linux => self
                .xdg_config_home
                .clone()
                .unwrap_or_else(|| self.home_dir.join(".config")),
        }
    }

    /// Executable name as it must be spelled for process spawning.
    pub fn executable(&self, name: &str) -> String {
        match self.os {
            Os::Windows => format!("{name}.cmd"),
            Os::MacOs | Os::Linux => name.to_string(),
        }
    }
}

fn non_empty_env(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linux_prefers_xdg_config_home() {
        let mut platform = Platform::with_home(Os::Linux, "/home/u");
        assert_eq!(platform.config_base_dir(), PathBuf::from("/home/u/.config"));

        platform.xdg_config_home = Some(PathBuf::from("/xdg"));
        assert_eq!(platform.config_base_dir(), PathBuf::from("/xdg"));
    }

    #[test]
    fn windows_prefers_appdata() {
        let mut platform = Platform::with_home(Os::Windows, "/users/u");
        assert_eq!(
            platform.config_base_dir(),
            PathBuf::from("/users/u/AppData/Roaming")
        );

        platform.app_data = Some(PathBuf::from("/roaming"));
        assert_eq!(platform.config_base_dir(), PathBuf::from("/roaming"));
    }

    #[test]
    fn macos_uses_application_support() {
        let platform = Platform::with_home(Os::MacOs, "/Users/u");
        assert_eq!(
            platform.config_base_dir(),
            PathBuf::from("/Users/u/Library/Application Support")
        );
    }

    #[test]
    fn windows_executables_get_cmd_suffix() {
        assert_eq!(
            Platform::with_home(Os::Windows, "/u").executable("code"),
            "code.cmd"
        );
        assert_eq!(Platform::with_home(Os::Linux, "/u").executable("code"), "code");
    }
}
