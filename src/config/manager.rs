//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    SettingsOverrides,
    SyncSettings,
    loader,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: SyncSettings,

    /// 相対パスの基準となるルートパス
    root: Option<PathBuf>,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: SyncSettings::default(), root: None }
    }

    /// ルートの `.i18n-sync.json` から設定を読み込む
    ///
    /// 設定ファイルがない場合はデフォルト値を使う。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for root: {:?}", root);

        let settings = if let Some(root) = &root {
            loader::load_from_root(root)?.map_or_else(SyncSettings::default, |loaded| {
                tracing::debug!("Loaded settings file: {:?}", loaded);
                loaded
            })
        } else {
            SyncSettings::default()
        };

        self.replace(settings, root)
    }

    /// 指定された設定ファイルを読み込む
    ///
    /// 相対パスは設定ファイルのディレクトリを基準に解決される。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings_from(&mut self, config_path: &Path) -> Result<(), ConfigError> {
        let settings = loader::load_from_file(config_path)?;
        let root = config_path.parent().map(Path::to_path_buf);
        self.replace(settings, root)
    }

    fn replace(&mut self, settings: SyncSettings, root: Option<PathBuf>) -> Result<(), ConfigError> {
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.root = root;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// コマンドライン引数で設定を上書きする
    ///
    /// # Errors
    /// 上書き後の設定が不正な場合（現在の設定は変更されない）
    pub fn apply_overrides(&mut self, overrides: SettingsOverrides) -> Result<(), ConfigError> {
        let mut settings = self.current_settings.clone();
        settings.apply(overrides);
        self.update_settings(settings)
    }

    /// 設定を更新する
    ///
    /// # Errors
    /// バリデーションエラー
    pub fn update_settings(&mut self, new_settings: SyncSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &SyncSettings {
        &self.current_settings
    }

    /// ルートパスを取得
    #[must_use]
    pub const fn root(&self) -> Option<&PathBuf> {
        self.root.as_ref()
    }

    /// メッセージディレクトリの実際のパス
    #[must_use]
    pub fn messages_dir(&self) -> PathBuf {
        let path = &self.current_settings.messages_path;
        self.root.as_ref().map_or_else(|| path.clone(), |root| root.join(path))
    }
}
