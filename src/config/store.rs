use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::{ConfigSetting, DEFAULT_PARSER};

/// Directory under the user config dir that holds the default configuration file.
pub const CONFIG_DIR_NAME: &str = "irida-uploader";
/// File name of the default configuration file.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default location of the configuration file: `<user config dir>/irida-uploader/config.toml`.
pub fn default_config_path() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME),
        None => PathBuf::from(CONFIG_FILE_NAME),
    }
}

/// Source of persisted settings.
pub trait ConfigurationBackend {
    /// Read every setting present at `path`. Absent or empty keys are omitted.
    fn load(&self, path: &Path) -> Result<BTreeMap<ConfigSetting, String>>;
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(rename = "Settings", default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    client_id: Option<String>,
    client_secret: Option<String>,
    username: Option<String>,
    password: Option<String>,
    base_url: Option<String>,
    parser: Option<String>,
}

/// Reads the `[Settings]` table of a TOML file.
#[derive(Debug, Default, Clone, Copy)]
pub struct TomlFileBackend;

impl ConfigurationBackend for TomlFileBackend {
    fn load(&self, path: &Path) -> Result<BTreeMap<ConfigSetting, String>> {
        let content = fs::read_to_string(path)?;
        let file: SettingsFile = toml::from_str(&content)?;
        let section = file.settings;

        let pairs = [
            (ConfigSetting::ClientId, section.client_id),
            (ConfigSetting::ClientSecret, section.client_secret),
            (ConfigSetting::Username, section.username),
            (ConfigSetting::Password, section.password),
            (ConfigSetting::BaseUrl, section.base_url),
            (ConfigSetting::Parser, section.parser),
        ];

        Ok(pairs
            .into_iter()
            .filter_map(|(setting, value)| {
                value
                    .filter(|v| !v.trim().is_empty())
                    .map(|v| (setting, v))
            })
            .collect())
    }
}

/// Resolved settings for one invocation plus the file they were loaded from.
///
/// Created once from the configuration file, mutated once by the override
/// resolver, then only read. Nothing here writes back to the file.
#[derive(Debug, Clone)]
pub struct ConfigurationStore {
    path: PathBuf,
    values: BTreeMap<ConfigSetting, String>,
    load_failure: Option<String>,
}

impl ConfigurationStore {
    /// Load from `path`, or from [`default_config_path`] when `None`.
    pub fn load(path: Option<&Path>) -> Self {
        Self::load_with(&TomlFileBackend, path)
    }

    /// Load through an explicit backend.
    ///
    /// A file that cannot be read is not an error yet: overrides may still
    /// supply every mandatory setting. See [`ConfigurationStore::require_complete`].
    pub fn load_with(backend: &dyn ConfigurationBackend, path: Option<&Path>) -> Self {
        let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
        info!(config_path = %path.display(), "Loading configuration");

        let (values, load_failure) = match backend.load(&path) {
            Ok(values) => {
                debug!(
                    config_path = %path.display(),
                    settings = values.len(),
                    "Configuration file read"
                );
                (values, None)
            }
            Err(e) => {
                debug!(config_path = %path.display(), error = %e, "Configuration file unavailable");
                // Parse errors span several lines; keep the diagnostic on one.
                let reason = e
                    .to_string()
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");
                (BTreeMap::new(), Some(reason))
            }
        };

        Self {
            path,
            values,
            load_failure,
        }
    }

    /// Overwrite each setting present in `overrides`; all others keep their loaded value.
    ///
    /// Empty values count as absent, the same as empty keys in the file.
    pub fn set_overrides<I>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (ConfigSetting, String)>,
    {
        for (setting, value) in overrides {
            if value.trim().is_empty() {
                debug!(setting = %setting, "Ignoring empty override");
                continue;
            }
            debug!(setting = %setting, "Overriding configuration setting");
            self.values.insert(setting, value);
        }
    }

    /// Fail with [`Error::ConfigLoad`] if a mandatory setting has no value.
    pub fn require_complete(&self) -> Result<()> {
        let missing: Vec<&str> = ConfigSetting::ALL
            .iter()
            .filter(|s| s.is_mandatory() && !self.values.contains_key(*s))
            .map(|s| s.key())
            .collect();

        if missing.is_empty() {
            return Ok(());
        }

        let mut reason = format!("missing required settings: {}", missing.join(", "));
        if let Some(failure) = &self.load_failure {
            reason = format!("{failure}; {reason}");
        }
        Err(Error::ConfigLoad {
            path: self.path.clone(),
            reason,
        })
    }

    pub fn get(&self, setting: ConfigSetting) -> Option<&str> {
        self.values.get(&setting).map(String::as_str)
    }

    /// Parser name, falling back to the built-in default.
    pub fn parser(&self) -> &str {
        self.get(ConfigSetting::Parser).unwrap_or(DEFAULT_PARSER)
    }

    pub fn base_url(&self) -> Option<&str> {
        self.get(ConfigSetting::BaseUrl)
    }

    /// File the settings were loaded from (default or `-c` override).
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Why the file could not be used, if it could not.
    pub fn load_failure(&self) -> Option<&str> {
        self.load_failure.as_deref()
    }
}
