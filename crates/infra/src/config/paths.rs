//! Per-user configuration directory with legacy location migration

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use slack_status_domain::constants::CONFIG_APP_DIR;
use slack_status_domain::{Result, SlackStatusError};
use tracing::{debug, info};

use crate::errors::InfraError;

/// Directory holding `config.json`, the legacy token and the TLS pair.
///
/// Files found only under the legacy root are moved into the current root
/// the first time their path is requested. Each filename is migrated at most
/// once per `ConfigDir`.
#[derive(Debug)]
pub struct ConfigDir {
    root: PathBuf,
    legacy_root: Option<PathBuf>,
    migrated: Mutex<HashSet<String>>,
}

impl ConfigDir {
    /// Platform configuration root plus the application subdirectory.
    ///
    /// The legacy root is `~/.config/slack-status-cli`; on platforms where
    /// that is already the current root no migration happens.
    pub fn resolve() -> Result<Self> {
        let root = dirs::config_dir()
            .ok_or_else(|| {
                SlackStatusError::ConfigIo("could not determine the user config directory".into())
            })?
            .join(CONFIG_APP_DIR);

        let legacy_root = dirs::home_dir()
            .map(|home| home.join(".config").join(CONFIG_APP_DIR))
            .filter(|legacy| *legacy != root);

        Ok(Self::with_roots(root, legacy_root))
    }

    /// Use explicit roots instead of the platform ones.
    pub fn with_roots(root: impl Into<PathBuf>, legacy_root: Option<PathBuf>) -> Self {
        Self { root: root.into(), legacy_root, migrated: Mutex::new(HashSet::new()) }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of `name` inside the directory, creating the directory and
    /// migrating a legacy copy of the file first.
    pub fn file_path(&self, name: &str) -> Result<PathBuf> {
        self.ensure_exists()?;
        let path = self.root.join(name);
        self.migrate(name, &path)?;
        Ok(path)
    }

    fn ensure_exists(&self) -> Result<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o755);
        }

        builder.create(&self.root).map_err(|err| {
            SlackStatusError::from(InfraError::from(err)).with_context(&self.root)
        })
    }

    fn migrate(&self, name: &str, target: &Path) -> Result<()> {
        if !self.migrated.lock().insert(name.to_string()) {
            return Ok(());
        }

        let Some(legacy_root) = &self.legacy_root else {
            return Ok(());
        };

        if target.exists() {
            return Ok(());
        }

        let source = legacy_root.join(name);
        match fs::rename(&source, target) {
            Ok(()) => {
                info!(from = %source.display(), to = %target.display(), "config_dir.migrated");
                Ok(())
            }
            // Nothing to move, or another run already moved it.
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(file = name, "config_dir.nothing_to_migrate");
                Ok(())
            }
            Err(err) => Err(SlackStatusError::from(InfraError::from(err)).with_context(&source)),
        }
    }
}

/// Attach a path to filesystem errors.
pub(crate) trait PathContext {
    fn with_context(self, path: &Path) -> Self;
}

impl PathContext for SlackStatusError {
    fn with_context(self, path: &Path) -> Self {
        match self {
            Self::ConfigIo(message) => Self::ConfigIo(format!("{}: {message}", path.display())),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn creates_missing_root() {
        let temp = TempDir::new().unwrap();
        let dir = ConfigDir::with_roots(temp.path().join("nested").join(CONFIG_APP_DIR), None);

        let path = dir.file_path("config.json").unwrap();

        assert!(dir.root().is_dir());
        assert_eq!(path, dir.root().join("config.json"));
    }

    #[test]
    fn moves_legacy_file_once() {
        let temp = TempDir::new().unwrap();
        let legacy = temp.path().join("legacy");
        fs::create_dir_all(&legacy).unwrap();
        fs::write(legacy.join("token"), "xoxp-old").unwrap();

        let dir = ConfigDir::with_roots(temp.path().join("current"), Some(legacy.clone()));
        let path = dir.file_path("token").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "xoxp-old");
        assert!(!legacy.join("token").exists());

        // A file reappearing in the legacy root is not migrated a second time.
        fs::remove_file(&path).unwrap();
        fs::write(legacy.join("token"), "xoxp-newer").unwrap();
        dir.file_path("token").unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn current_file_is_never_replaced() {
        let temp = TempDir::new().unwrap();
        let legacy = temp.path().join("legacy");
        let current = temp.path().join("current");
        fs::create_dir_all(&legacy).unwrap();
        fs::create_dir_all(&current).unwrap();
        fs::write(legacy.join("config.json"), "legacy").unwrap();
        fs::write(current.join("config.json"), "current").unwrap();

        let dir = ConfigDir::with_roots(&current, Some(legacy.clone()));
        let path = dir.file_path("config.json").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "current");
        assert!(legacy.join("config.json").exists());
    }

    #[test]
    fn missing_legacy_file_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        let dir = ConfigDir::with_roots(temp.path().join("current"), Some(temp.path().join("gone")));

        assert!(dir.file_path("cert.pem").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn root_is_world_readable_directory() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let dir = ConfigDir::with_roots(temp.path().join("app"), None);
        dir.file_path("config.json").unwrap();

        let mode = fs::metadata(dir.root()).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode & 0o700, 0o700);
    }
}
