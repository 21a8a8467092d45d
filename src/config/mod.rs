//! Settings file, command-line overrides and catalog file matching.
mod loader;
mod manager;
mod matcher;
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use matcher::{
    CatalogMatcher,
    MatcherError,
};
pub use types::{
    CatalogFilesConfig,
    ConfigError,
    SettingsOverrides,
    SyncSettings,
    TranslatorConfig,
    ValidationError,
};
