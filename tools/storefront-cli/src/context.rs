//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_cart::FileStore;
use storefront_core::StorefrontConfig;

use crate::output::Output;

/// Config file names searched for, in order, in every directory.
pub const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Storefront configuration.
    pub config: StorefrontConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, path);
                let config = StorefrontConfig::load(&path)
                    .with_context(|| format!("Failed to load config: {}", path.display()))?;
                (config, Some(path))
            }
            None => match find_config(&cwd) {
                Some(path) => {
                    let config = StorefrontConfig::load(&path)
                        .with_context(|| format!("Failed to load config: {}", path.display()))?;
                    (config, Some(path))
                }
                None => (StorefrontConfig::default(), None),
            },
        };

        if let Some(path) = &config_path {
            output.debug(&format!("Using config {}", path.display()));
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Default location of the file-backed store.
    pub fn default_store_path(&self) -> PathBuf {
        self.cwd.join(".storefront").join("storage.json")
    }

    /// Open the file-backed store, at `path` or the default location.
    pub fn open_store(&self, path: Option<&str>) -> Result<FileStore> {
        let path = match path {
            Some(p) => self.resolve_path(p),
            None => self.default_store_path(),
        };
        self.output.debug(&format!("Using store {}", path.display()));
        FileStore::open(&path).with_context(|| format!("Failed to open store: {}", path.display()))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve(&self.cwd, path)
    }
}

fn resolve(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

/// Find a config file in `start` or one of its parents.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".storefront.toml"), "").unwrap();

        let found = find_config(&nested).unwrap();
        assert_eq!(found, dir.path().join(".storefront.toml"));
    }

    #[test]
    fn test_find_config_prefers_first_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("storefront.json"), "{}").unwrap();
        std::fs::write(dir.path().join("storefront.toml"), "").unwrap();

        let found = find_config(dir.path()).unwrap();
        assert_eq!(found, dir.path().join("storefront.toml"));
    }
}
