//! Layered configuration loading with figment.
//!
//! Sources, lowest priority first:
//!
//! 1. `BotConfig::default()`
//! 2. profile file, e.g. `ixibot.production.toml`
//! 3. main file: `ixibot.toml` or `config.toml` (`toml-config`), and
//!    `ixibot.yaml`, `ixibot.yml`, `config.yaml` or `config.yml` (`yaml-config`)
//! 4. `IXIBOT_*` environment variables, `__` separating nested keys:
//!    `IXIBOT_LOGGING__LEVEL=debug` sets `logging.level`
//! 5. values passed to [`ConfigLoader::set`] or [`ConfigLoader::merge`]
//!
//! ```rust,ignore
//! use ixibot_runtime::config::ConfigLoader;
//!
//! let config = ConfigLoader::new()
//!     .profile("production")
//!     .set("command_prefix", "!")
//!     .load()?;
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
#[cfg(any(feature = "toml-config", feature = "yaml-config"))]
use figment::providers::Format;
use figment::providers::{Env, Serialized};
use tracing::{debug, info, warn};

use super::error::{ConfigError, ConfigResult};
use super::schema::BotConfig;

const ENV_PREFIX: &str = "IXIBOT_";
const ENV_SEPARATOR: &str = "__";
const PROFILE_VAR: &str = "IXIBOT_PROFILE";
const APP_DIR: &str = "ixibot";

// =============================================================================
// Profile
// =============================================================================

/// Selects the profile-specific file merged beneath the main one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Profile {
    #[default]
    Development,
    Production,
    Custom(String),
}

impl Profile {
    /// Case-insensitive; `dev` and `prod` are accepted.
    pub fn parse(name: &str) -> Self {
        let name = name.to_lowercase();
        match name.as_str() {
            "development" | "dev" => Self::Development,
            "production" | "prod" => Self::Production,
            _ => Self::Custom(name),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Custom(name) => name,
        }
    }

    /// Profile named by `IXIBOT_PROFILE`, or the default.
    pub fn from_env() -> Self {
        std::env::var(PROFILE_VAR)
            .map(|name| Self::parse(&name))
            .unwrap_or_default()
    }

    /// `ixibot.toml` becomes `ixibot.<profile>.toml`.
    fn file_name(&self, base: &str) -> String {
        match base.rsplit_once('.') {
            Some((stem, extension)) => format!("{stem}.{}.{extension}", self.as_str()),
            None => format!("{base}.{}", self.as_str()),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// File formats
// =============================================================================

/// File formats compiled in through cargo features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    #[cfg(feature = "toml-config")]
    Toml,
    #[cfg(feature = "yaml-config")]
    Yaml,
}

impl ConfigFormat {
    const ENABLED: &'static [Self] = &[
        #[cfg(feature = "toml-config")]
        Self::Toml,
        #[cfg(feature = "yaml-config")]
        Self::Yaml,
    ];

    fn from_path(path: &Path) -> ConfigResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        match extension {
            #[cfg(feature = "toml-config")]
            "toml" => Ok(Self::Toml),
            #[cfg(feature = "yaml-config")]
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(ConfigError::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    /// Main file names searched for, in order.
    fn file_names(self) -> &'static [&'static str] {
        match self {
            #[cfg(feature = "toml-config")]
            Self::Toml => &["ixibot.toml", "config.toml"],
            #[cfg(feature = "yaml-config")]
            Self::Yaml => &["ixibot.yaml", "ixibot.yml", "config.yaml", "config.yml"],
        }
    }

    fn merge(self, figment: Figment, path: &Path) -> Figment {
        match self {
            #[cfg(feature = "toml-config")]
            Self::Toml => figment.merge(figment::providers::Toml::file(path)),
            #[cfg(feature = "yaml-config")]
            Self::Yaml => figment.merge(figment::providers::Yaml::file(path)),
        }
    }
}

// =============================================================================
// ConfigLoader
// =============================================================================

/// Builds a [`BotConfig`] from defaults, files, environment and overrides.
#[derive(Debug)]
pub struct ConfigLoader {
    profile: Profile,
    search_paths: Vec<PathBuf>,
    file: Option<PathBuf>,
    env: bool,
    overrides: Figment,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Profile from the environment, environment variables enabled, default
    /// search paths.
    pub fn new() -> Self {
        Self {
            profile: Profile::from_env(),
            search_paths: Vec::new(),
            file: None,
            env: true,
            overrides: Figment::new(),
        }
    }

    pub fn profile(mut self, profile: impl AsRef<str>) -> Self {
        self.profile = Profile::parse(profile.as_ref());
        self
    }

    /// Adds a directory to search. Once any is added the defaults (current
    /// directory, then the user config directory) are no longer searched.
    pub fn search_path(mut self, path: impl AsRef<Path>) -> Self {
        self.search_paths.push(path.as_ref().to_path_buf());
        self
    }

    pub fn with_current_dir(self) -> Self {
        match std::env::current_dir() {
            Ok(cwd) => self.search_path(cwd),
            Err(_) => self,
        }
    }

    pub fn with_user_config_dir(self) -> Self {
        match dirs::config_dir() {
            Some(dir) => self.search_path(dir.join(APP_DIR)),
            None => self,
        }
    }

    /// Loads exactly this file instead of searching. It must exist.
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_env(mut self) -> Self {
        self.env = true;
        self
    }

    pub fn without_env(mut self) -> Self {
        self.env = false;
        self
    }

    /// Merges a whole configuration above every other source.
    pub fn merge(mut self, config: BotConfig) -> Self {
        self.overrides = self.overrides.merge(Serialized::defaults(config));
        self
    }

    /// Overrides one dotted key, e.g. `("logging.level", "debug")`.
    pub fn set<V: serde::Serialize>(mut self, key: &str, value: V) -> Self {
        self.overrides = self.overrides.merge(Serialized::default(key, value));
        self
    }

    /// Merges every source and extracts the result.
    ///
    /// # Errors
    ///
    /// [`ConfigError::FileNotFound`] or [`ConfigError::UnsupportedFormat`] for
    /// a bad explicit file, [`ConfigError::Extract`] when a source is malformed.
    pub fn load(self) -> ConfigResult<BotConfig> {
        let profile = self.profile.clone();
        let config: BotConfig = self.figment()?.extract().map_err(Box::new)?;

        debug!(
            %profile,
            command_prefix = %config.command_prefix,
            level = %config.logging.level,
            "Configuration loaded"
        );
        Ok(config)
    }

    fn figment(self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(BotConfig::default()));

        match &self.file {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound { path: path.clone() });
                }
                let format = ConfigFormat::from_path(path)?;
                info!(path = %path.display(), "Loading configuration file");
                figment = format.merge(figment, path);
            }
            None => {
                let files = self.discover();
                if files.is_empty() {
                    warn!("No configuration file found, using defaults");
                }
                for (format, path) in files {
                    info!(path = %path.display(), "Loading configuration file");
                    figment = format.merge(figment, &path);
                }
            }
        }

        if self.env {
            figment = figment.merge(Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR));
        }
        Ok(figment.merge(self.overrides))
    }

    fn search_paths(&self) -> Vec<PathBuf> {
        if !self.search_paths.is_empty() {
            return self.search_paths.clone();
        }
        std::env::current_dir()
            .ok()
            .into_iter()
            .chain(dirs::config_dir().map(|dir| dir.join(APP_DIR)))
            .collect()
    }

    /// Files to merge, lowest priority first.
    ///
    /// Per format, the first main file found wins; its profile variant, when
    /// present, is merged just beneath it.
    fn discover(&self) -> Vec<(ConfigFormat, PathBuf)> {
        let directories = self.search_paths();
        let mut files = Vec::new();

        for &format in ConfigFormat::ENABLED {
            let main = directories.iter().find_map(|directory| {
                format
                    .file_names()
                    .iter()
                    .find(|name| directory.join(name).is_file())
                    .map(|name| (directory, *name))
            });

            if let Some((directory, name)) = main {
                let profile_file = directory.join(self.profile.file_name(name));
                if profile_file.is_file() {
                    files.push((format, profile_file));
                }
                files.push((format, directory.join(name)));
            }
        }
        files
    }
}

/// Loads from the default search paths and the environment.
pub fn load_config() -> ConfigResult<BotConfig> {
    ConfigLoader::new().load()
}

/// Loads `path` plus the environment.
pub fn load_config_from_file(path: impl AsRef<Path>) -> ConfigResult<BotConfig> {
    ConfigLoader::new().file(path).load()
}
