//! `.i18n-sync.json` の読み込み
//!
//! 読み込んだ `messagesPath` はファイルのあるディレクトリを基準に解決される
//! （解決自体は `ConfigManager::messages_dir` が行う）。

use std::path::Path;

use super::{
    ConfigError,
    SyncSettings,
};

/// Settings file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".i18n-sync.json";

/// Read `root/.i18n-sync.json` if there is one.
///
/// A missing file is not an error: the caller falls back to defaults and
/// command-line flags.
pub(super) fn load_from_root(root: &Path) -> Result<Option<SyncSettings>, ConfigError> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if !config_path.is_file() {
        tracing::debug!(path = %config_path.display(), "No settings file");
        return Ok(None);
    }
    load_from_file(&config_path).map(Some)
}

/// `--config` で渡されたファイルを読む
///
/// 空のファイルは全項目デフォルトとして扱う。
pub(super) fn load_from_file(config_path: &Path) -> Result<SyncSettings, ConfigError> {
    tracing::debug!(path = %config_path.display(), "Reading settings file");

    let content = std::fs::read_to_string(config_path)?;
    if content.trim().is_empty() {
        return Ok(SyncSettings::default());
    }
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    /// `load_from_root`: 設定ファイルが存在する場合
    #[rstest]
    fn test_load_from_root_with_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{"referenceLocale": "en", "keySeparator": "/"}"#;
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), config_content).unwrap();

        let result = load_from_root(temp_dir.path());

        assert!(result.is_ok());
        let settings = result.unwrap().unwrap();
        assert_eq!(settings.reference_locale, "en");
        assert_eq!(settings.key_separator, "/");
    }

    /// `load_from_root`: 設定ファイルが存在しない場合
    #[rstest]
    fn test_load_from_root_no_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_from_root(temp_dir.path());

        assert!(result.is_ok());
        assert!(result.unwrap().is_none());
    }

    /// `load_from_root`: JSON パースエラー
    #[rstest]
    fn test_load_from_root_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "invalid json").unwrap();

        let result = load_from_root(temp_dir.path());

        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    /// `load_from_root`: 同名のディレクトリは設定ファイル扱いしない
    #[rstest]
    fn test_load_from_root_ignores_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join(CONFIG_FILE_NAME)).unwrap();

        let result = load_from_root(temp_dir.path()).unwrap();

        assert!(result.is_none());
    }

    /// `load_from_file`: 空ファイルはデフォルト設定
    #[rstest]
    fn test_load_from_file_empty_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("sync.json");
        fs::write(&config_path, "\n").unwrap();

        let settings = load_from_file(&config_path).unwrap();

        assert_eq!(settings.reference_locale, "es");
        assert_eq!(settings.key_separator, ".");
    }

    /// `load_from_file`: ファイルが存在しない場合は IO エラー
    #[rstest]
    fn test_load_from_file_missing() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_from_file(&temp_dir.path().join("missing.json"));

        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
