use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use irida_uploader::{ConfigOverrides, Invocation};

/// Multi-letter short forms accepted for the configuration overrides.
const SHORT_OVERRIDES: [(&str, &str); 6] = [
    ("-ci", "--config_client_id"),
    ("-cs", "--config_client_secret"),
    ("-cu", "--config_username"),
    ("-cp", "--config_password"),
    ("-cb", "--config_base_url"),
    ("-cr", "--config_parser"),
];

#[derive(Parser, Debug)]
#[command(
    name = "irida-uploader",
    version,
    about = "Parses sequencing runs and uploads them to IRIDA.\n\nOne of -d/--directory or -m/--metadata is required.",
    after_help = "-c* options can be used without a parameter to prompt for input."
)]
pub struct CliArgs {
    /// Location of sequencing run to upload. Directory must be writable.
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// CSV file containing metadata for samples
    #[arg(short, long)]
    pub metadata: Option<PathBuf>,

    /// Path to an alternative configuration file. This overrides the default config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Ignore the run status file and upload even when a run is not in new status
    #[arg(short, long, default_value_t = false)]
    pub force: bool,

    /// Treat the directory as a directory of sequencing run directories and upload them all.
    /// The list of runs is taken at start time; runs added mid upload are not uploaded
    #[arg(short, long, default_value_t = false)]
    pub batch: bool,

    /// Upload files as assemblies instead of regular sequence files
    #[arg(short, long, default_value_t = false)]
    pub assemblies: bool,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    pub log: bool,

    /// (-ci) Override "client_id" in the config file
    #[arg(long = "config_client_id", value_name = "CLIENT_ID", num_args = 0..=1)]
    pub config_client_id: Option<Option<String>>,

    /// (-cs) Override "client_secret" in the config file
    #[arg(long = "config_client_secret", value_name = "CLIENT_SECRET", num_args = 0..=1)]
    pub config_client_secret: Option<Option<String>>,

    /// (-cu) Override "username" in the config file. This is your IRIDA account username
    #[arg(long = "config_username", value_name = "USERNAME", num_args = 0..=1)]
    pub config_username: Option<Option<String>>,

    /// (-cp) Override "password" in the config file
    #[arg(long = "config_password", value_name = "PASSWORD", num_args = 0..=1)]
    pub config_password: Option<Option<String>>,

    /// (-cb) Override "base_url" in the config file (example: https://my.irida.server/api/)
    #[arg(long = "config_base_url", value_name = "BASE_URL", num_args = 0..=1)]
    pub config_base_url: Option<Option<String>>,

    /// (-cr) Override "parser" in the config file. Supported parsers: directory, miseq,
    /// miseq_v26, miseq_v31, miniseq, nextseq, nextseq2k_nml, iseq
    #[arg(long = "config_parser", value_name = "PARSER", num_args = 0..=1)]
    pub config_parser: Option<Option<String>>,
}

impl CliArgs {
    pub fn into_invocation(self) -> Invocation {
        Invocation {
            directory: self.directory,
            metadata: self.metadata,
            config: self.config,
            force: self.force,
            batch: self.batch,
            assemblies: self.assemblies,
            overrides: ConfigOverrides {
                client_id: self.config_client_id.into(),
                client_secret: self.config_client_secret.into(),
                username: self.config_username.into(),
                password: self.config_password.into(),
                base_url: self.config_base_url.into(),
                parser: self.config_parser.into(),
            },
        }
    }
}

/// Rewrite `-ci`, `-cs`, `-cu`, `-cp`, `-cb`, `-cr` (and their `=value` forms)
/// to the long flags clap understands. Arguments after `--` are left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut after_separator = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if after_separator {
                return arg;
            }
            if arg == "--" {
                after_separator = true;
                return arg;
            }
            arg.to_str()
                .and_then(rewrite_short_override)
                .map(OsString::from)
                .unwrap_or(arg)
        })
        .collect()
}

fn rewrite_short_override(arg: &str) -> Option<String> {
    SHORT_OVERRIDES.iter().find_map(|(short, long)| {
        if arg == *short {
            Some(long.to_string())
        } else {
            arg.strip_prefix(short)
                .and_then(|rest| rest.strip_prefix('='))
                .map(|value| format!("{long}={value}"))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use irida_uploader::Override;

    fn parse(args: &[&str]) -> CliArgs {
        let mut argv = vec!["irida-uploader"];
        argv.extend_from_slice(args);
        CliArgs::try_parse_from(normalize_args(argv)).unwrap()
    }

    #[test]
    fn directory_only_defaults_flags_off() {
        let args = parse(&["-d", "/runs/run1"]);
        assert_eq!(args.directory, Some(PathBuf::from("/runs/run1")));
        assert!(!args.force && !args.batch && !args.assemblies);

        let invocation = args.into_invocation();
        assert_eq!(invocation.overrides, ConfigOverrides::default());
    }

    #[test]
    fn short_overrides_map_to_tri_state() {
        let invocation = parse(&["-d", "/runs", "-cu", "-cp", "-cb", "http://x/api/", "-cr=nextseq"])
            .into_invocation();

        assert_eq!(invocation.overrides.username, Override::Prompt);
        assert_eq!(invocation.overrides.password, Override::Prompt);
        assert_eq!(
            invocation.overrides.base_url,
            Override::Explicit("http://x/api/".to_string())
        );
        assert_eq!(
            invocation.overrides.parser,
            Override::Explicit("nextseq".to_string())
        );
        assert_eq!(invocation.overrides.client_id, Override::UseFile);
        assert_eq!(invocation.overrides.client_secret, Override::UseFile);
    }

    #[test]
    fn prompt_flag_does_not_swallow_following_option() {
        let args = parse(&["-ci", "-m", "meta.csv"]);
        assert_eq!(args.config_client_id, Some(None));
        assert_eq!(args.metadata, Some(PathBuf::from("meta.csv")));
    }

    #[test]
    fn config_short_flag_is_not_confused_with_overrides() {
        let args = parse(&["-c", "alt.toml", "-cs", "secret", "-m", "meta.csv"]);
        assert_eq!(args.config, Some(PathBuf::from("alt.toml")));
        assert_eq!(args.config_client_secret, Some(Some("secret".to_string())));
    }

    #[test]
    fn combined_boolean_flags() {
        let args = parse(&["-d", "/runs", "-fba"]);
        assert!(args.force && args.batch && args.assemblies);
    }

    #[test]
    fn arguments_after_separator_are_untouched() {
        let normalized = normalize_args(["irida-uploader", "--", "-cu"]);
        assert_eq!(normalized[2], OsString::from("-cu"));
    }
}
