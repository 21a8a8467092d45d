use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "overrideLocales[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncSettings {
    /// Directory holding one catalog file per locale.
    pub messages_path: PathBuf,

    /// Locale whose catalog holds every required key.
    pub reference_locale: String,

    /// Region-qualified codes used when talking to the translator,
    /// e.g. `["es-ES", "pt-BR"]`. Matched on the primary subtag.
    pub override_locales: Vec<String>,

    pub key_separator: String,

    pub catalog_files: CatalogFilesConfig,
    pub translator: TranslatorConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogFilesConfig {
    /// Globs relative to `messagesPath`. `*` does not cross directories.
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

impl Default for CatalogFilesConfig {
    fn default() -> Self {
        Self { include_patterns: vec!["*.json".to_string()], exclude_patterns: vec![] }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslatorConfig {
    pub model: String,
    /// Base URL of an OpenAI-compatible API, without the endpoint path.
    pub api_base_url: String,
    /// Environment variable read when no key is given on the command line.
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            api_base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Values given on the command line, applied on top of the settings file.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    /// Relative paths are joined onto the settings root; see
    /// [`SettingsOverrides::relative_to`].
    pub messages_path: Option<PathBuf>,
    pub reference_locale: Option<String>,
    pub override_locales: Option<Vec<String>>,
}

impl SettingsOverrides {
    /// Anchor a relative `messages_path` to `base`, usually the working
    /// directory, so it no longer depends on where the settings file lives.
    #[must_use]
    pub fn relative_to(mut self, base: &Path) -> Self {
        self.messages_path = self.messages_path.map(|path| base.join(path));
        self
    }
}

impl SyncSettings {
    /// Replace every field set in `overrides`.
    pub fn apply(&mut self, overrides: SettingsOverrides) {
        if let Some(path) = overrides.messages_path {
            self.messages_path = path;
        }
        if let Some(locale) = overrides.reference_locale {
            self.reference_locale = locale;
        }
        if let Some(locales) = overrides.override_locales {
            self.override_locales = locales;
        }
    }

    /// # Errors
    /// - Required field is empty
    /// - Invalid locale override
    /// - Invalid glob pattern
    /// - Invalid translator settings
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.messages_path.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "messagesPath",
                "The path cannot be empty. Example: \"./messages\"",
            ));
        }

        if self.reference_locale.trim().is_empty() {
            errors.push(ValidationError::new(
                "referenceLocale",
                "The reference locale cannot be empty. Example: \"en\"",
            ));
        }

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        for (index, code) in self.override_locales.iter().enumerate() {
            if code.trim() != code || code.split('-').any(str::is_empty) {
                errors.push(ValidationError::new(
                    format!("overrideLocales[{index}]"),
                    format!("Invalid locale '{code}'. Expected a code such as \"es\" or \"es-ES\""),
                ));
            }
        }

        if self.catalog_files.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "catalogFiles.includePatterns",
                "At least one pattern is required. Example: [\"*.json\"]",
            ));
        }

        for (index, pattern) in self.catalog_files.include_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("catalogFiles.includePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        for (index, pattern) in self.catalog_files.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("catalogFiles.excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if self.translator.model.trim().is_empty() {
            errors.push(ValidationError::new(
                "translator.model",
                "The model cannot be empty. Example: \"gpt-4\"",
            ));
        }

        let base_url = &self.translator.api_base_url;
        if !base_url.starts_with("https://") && !base_url.starts_with("http://") {
            errors.push(ValidationError::new(
                "translator.apiBaseUrl",
                format!("Invalid URL '{base_url}'. Expected an http(s) URL"),
            ));
        }

        if self.translator.timeout_secs == 0 {
            errors.push(ValidationError::new(
                "translator.timeoutSecs",
                "The timeout must be at least 1 second",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            messages_path: PathBuf::from("./messages"),
            reference_locale: "es".to_string(),
            override_locales: vec![],
            key_separator: ".".to_string(),
            catalog_files: CatalogFilesConfig::default(),
            translator: TranslatorConfig::default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = SyncSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"referenceLocale": "en", "overrideLocales": ["pt-BR"]}"#;

        let settings: SyncSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.reference_locale, eq("en"));
        assert_that!(settings.override_locales, elements_are![eq("pt-BR")]);
        assert_that!(settings.key_separator, eq("."));
        assert_that!(settings.translator.model, eq("gpt-4"));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let json = "{}";

        let settings: SyncSettings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.messages_path, PathBuf::from("./messages"));
        assert_that!(settings.reference_locale, eq("es"));
        assert_that!(settings.override_locales, is_empty());
        assert_that!(settings.catalog_files.include_patterns, elements_are![eq("*.json")]);
        assert_that!(settings.translator.api_key_env, eq("OPENAI_API_KEY"));
        assert_that!(settings.translator.timeout_secs, eq(60));
    }

    #[rstest]
    fn apply_overrides_replaces_only_given_fields() {
        let mut settings = SyncSettings::default();

        settings.apply(SettingsOverrides {
            reference_locale: Some("en".to_string()),
            override_locales: Some(vec!["es-ES".to_string()]),
            ..SettingsOverrides::default()
        });

        assert_that!(settings.reference_locale, eq("en"));
        assert_that!(settings.override_locales, elements_are![eq("es-ES")]);
        assert_eq!(settings.messages_path, PathBuf::from("./messages"));
    }

    #[rstest]
    #[case("./messages", "/work/./messages")]
    #[case("/srv/i18n", "/srv/i18n")]
    fn relative_to_anchors_relative_messages_path(#[case] given: &str, #[case] expected: &str) {
        let overrides = SettingsOverrides {
            messages_path: Some(PathBuf::from(given)),
            ..SettingsOverrides::default()
        }
        .relative_to(Path::new("/work"));

        assert_eq!(overrides.messages_path, Some(PathBuf::from(expected)));
    }

    #[rstest]
    fn validate_invalid_key_separator_empty() {
        let settings = SyncSettings { key_separator: String::new(), ..SyncSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("keySeparator")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_reference_locale_empty() {
        let settings =
            SyncSettings { reference_locale: "  ".to_string(), ..SyncSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![field!(ValidationError.field_path, eq("referenceLocale"))])
        );
    }

    #[rstest]
    #[case("-ES")]
    #[case("es-")]
    #[case("")]
    #[case(" es-ES")]
    fn validate_invalid_override_locale(#[case] code: &str) {
        let settings = SyncSettings {
            override_locales: vec!["pt-BR".to_string(), code.to_string()],
            ..SyncSettings::default()
        };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("overrideLocales[1]")),
                field!(ValidationError.message, contains_substring("Invalid locale"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_include_patterns_empty() {
        let settings = SyncSettings {
            catalog_files: CatalogFilesConfig { include_patterns: vec![], exclude_patterns: vec![] },
            ..SyncSettings::default()
        };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("catalogFiles.includePatterns")),
                field!(ValidationError.message, contains_substring("At least one pattern"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_exclude_pattern_invalid_glob() {
        let settings = SyncSettings {
            catalog_files: CatalogFilesConfig {
                include_patterns: vec!["*.json".to_string()],
                exclude_patterns: vec!["drafts/**".to_string(), "invalid[pattern".to_string()],
            },
            ..SyncSettings::default()
        };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("catalogFiles.excludePatterns[1]")),
                field!(ValidationError.message, contains_substring("Invalid glob pattern")),
                field!(ValidationError.message, contains_substring("invalid[pattern"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_translator_settings() {
        let settings = SyncSettings {
            translator: TranslatorConfig {
                model: String::new(),
                api_base_url: "api.openai.com".to_string(),
                timeout_secs: 0,
                ..TranslatorConfig::default()
            },
            ..SyncSettings::default()
        };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![
                field!(ValidationError.field_path, eq("translator.model")),
                field!(ValidationError.field_path, eq("translator.apiBaseUrl")),
                field!(ValidationError.field_path, eq("translator.timeoutSecs"))
            ])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = SyncSettings {
            key_separator: String::new(),
            reference_locale: String::new(),
            ..SyncSettings::default()
        };

        let validation_result = settings.validate();
        let errors = validation_result.unwrap_err();
        let config_error = ConfigError::ValidationErrors(errors);

        let error_message = format!("{config_error}");
        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. referenceLocale"));
        assert_that!(error_message, contains_substring("2. keySeparator"));
        assert_that!(error_message, contains_substring("cannot be empty"));
    }
}
