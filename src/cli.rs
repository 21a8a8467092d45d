//! Command-line arguments.

use std::path::{
    Path,
    PathBuf,
};

use clap::Parser;
use js_i18n_sync::config::SettingsOverrides;

/// Find messages missing from translation catalogs and fill them in.
#[derive(Debug, Parser)]
#[command(name = "js-i18n-sync", version, about)]
pub(crate) struct Cli {
    /// Directory containing one JSON catalog per locale
    #[arg(long, value_name = "DIR")]
    pub(crate) messages_path: Option<PathBuf>,

    /// Locale whose catalog holds every key
    #[arg(long, value_name = "LOCALE")]
    pub(crate) reference_language: Option<String>,

    /// Region codes used for translation, e.g. `es-ES,pt-BR`
    #[arg(long, value_name = "CODES", value_delimiter = ',')]
    pub(crate) override_locales: Option<Vec<String>>,

    /// OpenAI API key (defaults to the configured environment variable)
    #[arg(long, value_name = "KEY")]
    pub(crate) open_ai_key: Option<String>,

    /// Settings file to use instead of `./.i18n-sync.json`
    #[arg(long, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Answer yes to every prompt
    #[arg(long, short = 'y')]
    pub(crate) yes: bool,

    /// Only report; exit with status 1 when messages are missing
    #[arg(long, conflicts_with = "yes")]
    pub(crate) check: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    pub(crate) log_file: Option<PathBuf>,
}

impl Cli {
    /// Settings overrides, with `--messages-path` taken relative to
    /// `working_dir` when one is known.
    pub(crate) fn overrides(&self, working_dir: Option<&Path>) -> SettingsOverrides {
        let overrides = SettingsOverrides {
            messages_path: self.messages_path.clone(),
            reference_locale: self.reference_language.clone(),
            override_locales: self.override_locales.as_ref().map(|codes| {
                codes
                    .iter()
                    .map(|code| code.trim().to_string())
                    .filter(|code| !code.is_empty())
                    .collect()
            }),
        };
        match working_dir {
            Some(dir) => overrides.relative_to(dir),
            None => overrides,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog_flags() {
        let cli = Cli::try_parse_from([
            "js-i18n-sync",
            "--messages-path",
            "./locales",
            "--reference-language",
            "en",
            "--override-locales",
            "es-ES, pt-BR",
            "--open-ai-key",
            "sk-test",
        ])
        .unwrap();

        let overrides = cli.overrides(None);

        assert_eq!(overrides.messages_path, Some(PathBuf::from("./locales")));
        assert_eq!(overrides.reference_locale.as_deref(), Some("en"));
        assert_eq!(
            overrides.override_locales,
            Some(vec!["es-ES".to_string(), "pt-BR".to_string()])
        );
        assert_eq!(cli.open_ai_key.as_deref(), Some("sk-test"));
        assert!(!cli.yes);
    }

    #[test]
    fn test_parse_without_flags_overrides_nothing() {
        let cli = Cli::try_parse_from(["js-i18n-sync"]).unwrap();

        let overrides = cli.overrides(Some(Path::new("/work")));

        assert!(overrides.messages_path.is_none());
        assert!(overrides.reference_locale.is_none());
        assert!(overrides.override_locales.is_none());
    }

    #[test]
    fn test_messages_path_is_relative_to_working_dir() {
        let cli = Cli::try_parse_from([
            "js-i18n-sync",
            "--config",
            "conf/sync.json",
            "--messages-path",
            "messages",
        ])
        .unwrap();

        let overrides = cli.overrides(Some(Path::new("/work")));

        assert_eq!(overrides.messages_path, Some(PathBuf::from("/work/messages")));
    }

    #[test]
    fn test_check_conflicts_with_yes() {
        let result = Cli::try_parse_from(["js-i18n-sync", "--check", "--yes"]);

        assert!(result.is_err());
    }
}
