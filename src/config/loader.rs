use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Config, ConfigError, parse_config};

/// Local config file names, in order of preference.
const LOCAL_CONFIG_NAMES: [&str; 2] = ["cmdmatch.yml", "cmdmatch.yaml"];

/// Where a [`DefaultConfigLoader`] reads commands from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// An optional global file, overlaid by the working directory's
    /// `cmdmatch.yml` (or `cmdmatch.yaml`)
    Layered { global: Option<PathBuf> },
    /// Exactly one file, resolved against the working directory
    File(PathBuf),
}

/// Produces a validated [`Config`] for a working directory.
pub trait ConfigLoader {
    fn load(&self, cwd: &Path) -> Result<Config, ConfigError>;
}

/// Filesystem-backed loader.
pub struct DefaultConfigLoader {
    source: ConfigSource,
}

impl Default for DefaultConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultConfigLoader {
    /// Layered loading with the global file at
    /// `$HOME/.config/cmdmatch/cmdmatch.yml`.
    pub fn new() -> Self {
        let global = std::env::var("HOME")
            .ok()
            .filter(|home| !home.is_empty())
            .map(|home| {
                [home.as_str(), ".config", "cmdmatch", "cmdmatch.yml"]
                    .iter()
                    .collect()
            });
        Self {
            source: ConfigSource::Layered { global },
        }
    }

    /// Layered loading with an explicit global file.
    pub fn with_global_path(path: PathBuf) -> Self {
        Self {
            source: ConfigSource::Layered { global: Some(path) },
        }
    }

    /// Load only `path`, skipping the global and local lookup.
    pub fn from_file(path: PathBuf) -> Self {
        Self {
            source: ConfigSource::File(path),
        }
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// Files to read for `cwd`, lowest precedence first. Missing layered
    /// files are skipped; a named file is always read.
    fn files(&self, cwd: &Path) -> Vec<PathBuf> {
        match &self.source {
            ConfigSource::File(path) => vec![cwd.join(path)],
            ConfigSource::Layered { global } => {
                let local = LOCAL_CONFIG_NAMES
                    .iter()
                    .map(|name| cwd.join(name))
                    .find(|path| path.exists());
                global
                    .iter()
                    .filter(|path| path.exists())
                    .cloned()
                    .chain(local)
                    .collect()
            }
        }
    }
}

impl ConfigLoader for DefaultConfigLoader {
    fn load(&self, cwd: &Path) -> Result<Config, ConfigError> {
        let mut config = Config::default();
        for path in self.files(cwd) {
            debug!(path = %path.display(), "reading config");
            let yaml = std::fs::read_to_string(&path)?;
            config = config.merge(parse_config(&yaml)?);
        }

        config.validate()?;
        debug!(commands = config.commands().len(), "config loaded");
        Ok(config)
    }
}
