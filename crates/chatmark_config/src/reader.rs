use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat, Map};
use derive_setters::Setters;
use tracing::debug;

use crate::{ChatmarkConfig, Result};

const DEFAULTS: &str = include_str!("chatmark.default.toml");

/// Prefix of environment variables that override file settings, e.g.
/// `CHATMARK_PROVIDER__MODEL`.
pub const ENV_PREFIX: &str = "CHATMARK";

const FILE_NAME: &str = "chatmark.toml";

/// Builds a [`ChatmarkConfig`] from defaults, a TOML file and the
/// environment.
#[derive(Debug, Clone, Default, Setters)]
#[setters(strip_option, into)]
pub struct ConfigReader {
    /// Explicit settings file; it must exist. Without one the user config
    /// directory is searched and a missing file is fine.
    path: Option<PathBuf>,
    /// Environment snapshot used instead of the process environment.
    env: Option<Map<String, String>>,
}

impl ConfigReader {
    pub fn read(&self) -> Result<ChatmarkConfig> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULTS, FileFormat::Toml));

        match &self.path {
            Some(path) => {
                debug!(path = %path.display(), "Reading settings file");
                builder = builder.add_source(File::from(path.as_path()).required(true));
            }
            None => {
                if let Some(path) = default_path() {
                    debug!(path = %path.display(), "Looking for settings file");
                    builder = builder.add_source(File::from(path).required(false));
                }
            }
        }

        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(self.env.clone());

        let config: ChatmarkConfig = builder
            .add_source(environment)
            .build()?
            .try_deserialize()?;
        config.validate()
    }
}

/// `<config dir>/chatmark/chatmark.toml` for the current platform.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("chatmark").join(FILE_NAME))
}

/// Load every `.env` file from `cwd` up to the filesystem root. Variables
/// that are already set are never overwritten, so the file closest to `cwd`
/// wins.
pub fn load_dot_env(cwd: &Path) {
    for env_file in cwd.ancestors().map(|dir| dir.join(".env")) {
        if !env_file.is_file() {
            continue;
        }
        if let Err(error) = dotenvy::from_path(&env_file) {
            debug!(path = %env_file.display(), error = %error, "Skipping .env file");
        }
    }
}
