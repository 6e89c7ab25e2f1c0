//! Command-line overrides for the six configuration settings.
//!
//! Every override flag has three states: absent (keep the file value),
//! present without a value (ask the operator), or present with a value
//! (use it verbatim). Settings are independent of each other; each one is
//! resolved once and prompted for at most once.
use std::collections::BTreeMap;

use tracing::{debug, info};

use super::prompt::Prompter;
use super::store::ConfigurationStore;
use crate::error::{Error, Result};
use crate::types::ConfigSetting;

/// Resolution mode for one setting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Override {
    /// Flag not given: keep whatever the configuration file holds.
    #[default]
    UseFile,
    /// Flag given without a value: ask the operator.
    Prompt,
    /// Flag given with a value.
    Explicit(String),
}

impl From<Option<Option<String>>> for Override {
    fn from(flag: Option<Option<String>>) -> Self {
        match flag {
            None => Override::UseFile,
            Some(None) => Override::Prompt,
            Some(Some(value)) => Override::Explicit(value),
        }
    }
}

/// Overrides requested for an invocation, one per setting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub client_id: Override,
    pub client_secret: Override,
    pub username: Override,
    pub password: Override,
    pub base_url: Override,
    pub parser: Override,
}

impl ConfigOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the override for one setting.
    pub fn with(mut self, setting: ConfigSetting, value: Override) -> Self {
        *self.slot_mut(setting) = value;
        self
    }

    pub fn get(&self, setting: ConfigSetting) -> &Override {
        match setting {
            ConfigSetting::ClientId => &self.client_id,
            ConfigSetting::ClientSecret => &self.client_secret,
            ConfigSetting::Username => &self.username,
            ConfigSetting::Password => &self.password,
            ConfigSetting::BaseUrl => &self.base_url,
            ConfigSetting::Parser => &self.parser,
        }
    }

    fn slot_mut(&mut self, setting: ConfigSetting) -> &mut Override {
        match setting {
            ConfigSetting::ClientId => &mut self.client_id,
            ConfigSetting::ClientSecret => &mut self.client_secret,
            ConfigSetting::Username => &mut self.username,
            ConfigSetting::Password => &mut self.password,
            ConfigSetting::BaseUrl => &mut self.base_url,
            ConfigSetting::Parser => &mut self.parser,
        }
    }
}

/// Resolve every `Prompt` and `Explicit` override to a value.
///
/// Settings left as `UseFile` do not appear in the result.
pub fn resolve_overrides<P>(
    overrides: &ConfigOverrides,
    prompter: &mut P,
) -> Result<BTreeMap<ConfigSetting, String>>
where
    P: Prompter + ?Sized,
{
    let mut resolved = BTreeMap::new();

    for setting in ConfigSetting::ALL {
        let value = match overrides.get(setting) {
            Override::UseFile => continue,
            Override::Explicit(value) => {
                debug!(setting = %setting, "Using explicit override");
                value.clone()
            }
            Override::Prompt => {
                debug!(setting = %setting, secret = setting.is_secret(), "Prompting for override");
                let answer = if setting.is_secret() {
                    prompter.read_secret(setting.prompt_text())
                } else {
                    prompter.read_line(setting.prompt_text())
                };
                answer.map_err(|source| Error::Prompt { setting, source })?
            }
        };
        resolved.insert(setting, value);
    }

    Ok(resolved)
}

/// Resolve `overrides` and write the results into `store`.
pub fn apply_overrides<P>(
    store: &mut ConfigurationStore,
    overrides: &ConfigOverrides,
    prompter: &mut P,
) -> Result<()>
where
    P: Prompter + ?Sized,
{
    let resolved = resolve_overrides(overrides, prompter)?;
    let names: Vec<&str> = resolved.keys().map(|s| s.key()).collect();
    info!(overridden = ?names, "Applying configuration overrides");
    store.set_overrides(resolved);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::prompt::MockPrompter;
    use std::io::Write;

    fn store_with_file_values() -> (tempfile::NamedTempFile, ConfigurationStore) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"[Settings]
client_id = "file-id"
client_secret = "file-secret"
username = "file-user"
password = "file-pass"
base_url = "http://file/api/"
parser = "miseq"
"#,
        )
        .unwrap();
        let store = ConfigurationStore::load(Some(file.path()));
        (file, store)
    }

    #[test]
    fn flag_shape_maps_to_override() {
        assert_eq!(Override::from(None), Override::UseFile);
        assert_eq!(Override::from(Some(None)), Override::Prompt);
        assert_eq!(
            Override::from(Some(Some("x".to_string()))),
            Override::Explicit("x".to_string())
        );
    }

    fn file_value(setting: ConfigSetting) -> &'static str {
        match setting {
            ConfigSetting::ClientId => "file-id",
            ConfigSetting::ClientSecret => "file-secret",
            ConfigSetting::Username => "file-user",
            ConfigSetting::Password => "file-pass",
            ConfigSetting::BaseUrl => "http://file/api/",
            ConfigSetting::Parser => "miseq",
        }
    }

    #[test]
    fn absent_flags_leave_file_values_and_never_prompt() {
        let (_file, mut store) = store_with_file_values();
        let mut prompter = MockPrompter::new();
        prompter.expect_read_line().never();
        prompter.expect_read_secret().never();

        apply_overrides(&mut store, &ConfigOverrides::new(), &mut prompter).unwrap();

        for setting in ConfigSetting::ALL {
            assert_eq!(store.get(setting), Some(file_value(setting)), "{setting}");
        }
    }

    #[test]
    fn explicit_values_are_stored_without_prompting() {
        for setting in ConfigSetting::ALL {
            let (_file, mut store) = store_with_file_values();
            let mut prompter = MockPrompter::new();
            prompter.expect_read_line().never();
            prompter.expect_read_secret().never();

            let value = format!("cli-{setting}");
            let overrides =
                ConfigOverrides::new().with(setting, Override::Explicit(value.clone()));
            apply_overrides(&mut store, &overrides, &mut prompter).unwrap();

            for other in ConfigSetting::ALL {
                if other == setting {
                    assert_eq!(store.get(other), Some(value.as_str()));
                } else {
                    assert_eq!(store.get(other), Some(file_value(other)), "{other}");
                }
            }
        }
    }

    #[test]
    fn each_plain_setting_prompts_once_with_its_own_text() {
        let plain = [
            (ConfigSetting::ClientId, "Client ID"),
            (ConfigSetting::Username, "Username"),
            (ConfigSetting::BaseUrl, "Base IRIDA URL"),
            (ConfigSetting::Parser, "Parser"),
        ];

        for (setting, expected) in plain {
            let (_file, mut store) = store_with_file_values();
            let mut prompter = MockPrompter::new();
            prompter
                .expect_read_line()
                .withf(move |prompt: &str| prompt.contains(expected))
                .times(1)
                .returning(|_| Ok("typed".to_string()));
            prompter.expect_read_secret().never();

            let overrides = ConfigOverrides::new().with(setting, Override::Prompt);
            apply_overrides(&mut store, &overrides, &mut prompter).unwrap();

            assert_eq!(store.get(setting), Some("typed"));
        }
    }

    #[test]
    fn secrets_are_read_without_echo() {
        for (setting, expected) in [
            (ConfigSetting::ClientSecret, "Client Secret"),
            (ConfigSetting::Password, "Password"),
        ] {
            let (_file, mut store) = store_with_file_values();
            let mut prompter = MockPrompter::new();
            prompter.expect_read_line().never();
            prompter
                .expect_read_secret()
                .withf(move |prompt: &str| prompt.contains(expected))
                .times(1)
                .returning(|_| Ok("hidden".to_string()));

            let overrides = ConfigOverrides::new().with(setting, Override::Prompt);
            apply_overrides(&mut store, &overrides, &mut prompter).unwrap();

            assert_eq!(store.get(setting), Some("hidden"));
        }
    }

    #[test]
    fn only_prompted_and_explicit_settings_are_resolved() {
        let mut prompter = MockPrompter::new();
        prompter
            .expect_read_line()
            .times(1)
            .returning(|_| Ok("alice".to_string()));
        prompter.expect_read_secret().never();

        let overrides = ConfigOverrides::new()
            .with(ConfigSetting::Username, Override::Prompt)
            .with(ConfigSetting::Parser, Override::Explicit("nextseq".into()));
        let resolved = resolve_overrides(&overrides, &mut prompter).unwrap();

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[&ConfigSetting::Username], "alice");
        assert_eq!(resolved[&ConfigSetting::Parser], "nextseq");
    }

    #[test]
    fn prompt_failure_names_the_setting() {
        let mut prompter = MockPrompter::new();
        prompter
            .expect_read_secret()
            .returning(|_| Err(std::io::Error::other("not a terminal")));

        let overrides = ConfigOverrides::new().with(ConfigSetting::Password, Override::Prompt);
        let err = resolve_overrides(&overrides, &mut prompter).unwrap_err();

        match err {
            Error::Prompt { setting, .. } => assert_eq!(setting, ConfigSetting::Password),
            other => panic!("expected Prompt error, got {other:?}"),
        }
    }
}
