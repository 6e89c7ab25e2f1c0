//! Shared types and enums used across the uploader.
//! Includes `ConfigSetting`, `UploadMode`, and the list of supported run parsers.
use serde::{Deserialize, Serialize};

/// Parser used when neither the configuration file nor an override names one.
pub const DEFAULT_PARSER: &str = "miseq";

/// Sequencer layouts the upload engine knows how to parse.
pub const SUPPORTED_PARSERS: &[&str] = &[
    "directory",
    "miseq",
    "miseq_v26",
    "miseq_v31",
    "miniseq",
    "nextseq",
    "nextseq2k_nml",
    "iseq",
];

/// One of the six settings that can come from the configuration file or the command line.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum ConfigSetting {
    ClientId,
    ClientSecret,
    Username,
    Password,
    BaseUrl,
    Parser,
}

impl ConfigSetting {
    pub const ALL: [ConfigSetting; 6] = [
        ConfigSetting::ClientId,
        ConfigSetting::ClientSecret,
        ConfigSetting::Username,
        ConfigSetting::Password,
        ConfigSetting::BaseUrl,
        ConfigSetting::Parser,
    ];

    /// Key used in the `[Settings]` table of the configuration file.
    pub fn key(self) -> &'static str {
        match self {
            ConfigSetting::ClientId => "client_id",
            ConfigSetting::ClientSecret => "client_secret",
            ConfigSetting::Username => "username",
            ConfigSetting::Password => "password",
            ConfigSetting::BaseUrl => "base_url",
            ConfigSetting::Parser => "parser",
        }
    }

    /// Text shown to the operator when this setting is requested interactively.
    pub fn prompt_text(self) -> &'static str {
        match self {
            ConfigSetting::ClientId => "Enter Client ID",
            ConfigSetting::ClientSecret => "Enter Client Secret",
            ConfigSetting::Username => "Enter Username",
            ConfigSetting::Password => "Enter Password",
            ConfigSetting::BaseUrl => "Enter Base IRIDA URL (format: http://my.irida.server/api/)",
            ConfigSetting::Parser => "Enter Parser to use",
        }
    }

    /// Secret settings are read without echo and never logged.
    pub fn is_secret(self) -> bool {
        matches!(self, ConfigSetting::ClientSecret | ConfigSetting::Password)
    }

    /// Mandatory settings have no built-in default.
    pub fn is_mandatory(self) -> bool {
        !matches!(self, ConfigSetting::Parser)
    }
}

impl std::fmt::Display for ConfigSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// What a single invocation uploads.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum UploadMode {
    /// `-d` pointing at one run directory
    SingleRun,
    /// `-d -b` pointing at a directory of run directories
    BatchRun,
    /// `-m` pointing at a sample metadata file
    MetadataOnly,
}

impl std::fmt::Display for UploadMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadMode::SingleRun => write!(f, "SingleRun"),
            UploadMode::BatchRun => write!(f, "BatchRun"),
            UploadMode::MetadataOnly => write!(f, "MetadataOnly"),
        }
    }
}
