//! Configuration layer: the persisted settings file, command-line overrides,
//! and the interactive prompts used to fill overrides given without a value.
pub mod overrides;
pub mod prompt;
pub mod store;

pub use overrides::{ConfigOverrides, Override, apply_overrides, resolve_overrides};
pub use prompt::{Prompter, TerminalPrompter};
pub use store::{ConfigurationBackend, ConfigurationStore, TomlFileBackend, default_config_path};
