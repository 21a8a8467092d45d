//! One audit/translate/patch run over a messages directory.

use std::future::Future;
use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use crate::catalog::{
    CatalogError,
    CatalogStore,
    PersistReport,
};
use crate::config::{
    CatalogMatcher,
    ConfigError,
    ConfigManager,
    SyncSettings,
};
use crate::diff::{
    AuditReport,
    audit_all,
};
use crate::ir::{
    MissingMessage,
    TranslationResult,
};
use crate::locale::LocaleResolver;
use crate::patch::{
    PatchReport,
    apply_translations,
};
use crate::translate::{
    TranslationRun,
    Translator,
    translate_missing,
};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Loaded catalogs plus the settings they were loaded with.
#[derive(Debug)]
pub struct SyncSession {
    settings: SyncSettings,
    messages_dir: PathBuf,
    store: CatalogStore,
    resolver: LocaleResolver,
}

impl SyncSession {
    /// Load the catalogs described by the manager's settings.
    ///
    /// # Errors
    /// Fails when the catalogs cannot be loaded or the reference catalog is
    /// not among them.
    pub fn open(config: &ConfigManager) -> Result<Self, SessionError> {
        Self::with_settings(config.get_settings().clone(), config.messages_dir())
    }

    /// # Errors
    /// See [`SyncSession::open`].
    pub fn with_settings(
        settings: SyncSettings,
        messages_dir: PathBuf,
    ) -> Result<Self, SessionError> {
        let matcher = CatalogMatcher::new(&settings.catalog_files).map_err(CatalogError::from)?;
        let store = CatalogStore::load(&messages_dir, &matcher)?;
        if store.get(&settings.reference_locale).is_none() {
            return Err(CatalogError::ReferenceNotFound(settings.reference_locale).into());
        }
        tracing::info!(
            messages_dir = %messages_dir.display(),
            catalogs = store.len(),
            reference = %settings.reference_locale,
            "Session opened"
        );

        let resolver = LocaleResolver::new(settings.override_locales.clone());
        Ok(Self { settings, messages_dir, store, resolver })
    }

    #[must_use]
    pub const fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    #[must_use]
    pub fn messages_dir(&self) -> &Path {
        &self.messages_dir
    }

    #[must_use]
    pub const fn store(&self) -> &CatalogStore {
        &self.store
    }

    #[must_use]
    pub const fn resolver(&self) -> &LocaleResolver {
        &self.resolver
    }

    #[must_use]
    pub fn reference_locale(&self) -> &str {
        &self.settings.reference_locale
    }

    /// Compare every catalog with the reference catalog.
    ///
    /// # Errors
    /// Returns [`SessionError::Catalog`] when a catalog cannot be flattened.
    pub fn audit(&self) -> Result<AuditReport, SessionError> {
        Ok(audit_all(&self.store, &self.settings.reference_locale, &self.settings.key_separator)?)
    }

    /// API key from the command line, else from the configured variable.
    #[must_use]
    pub fn api_key(&self, explicit: Option<String>) -> Option<String> {
        pick_api_key(explicit, std::env::var(&self.settings.translator.api_key_env).ok())
    }

    pub async fn translate<T, S, P>(
        &self,
        translator: &T,
        missing: &[MissingMessage],
        shutdown: S,
        on_progress: P,
    ) -> TranslationRun
    where
        T: Translator + ?Sized,
        S: Future<Output = ()>,
        P: FnMut(usize, usize),
    {
        translate_missing(translator, missing, &self.resolver, shutdown, on_progress).await
    }

    /// Merge translations into the in-memory catalogs.
    pub fn apply(&mut self, translations: &[TranslationResult]) -> PatchReport {
        apply_translations(&mut self.store, translations, &self.settings.key_separator)
    }

    /// Write back the catalogs a patch touched.
    #[must_use]
    pub fn persist(&self, report: &PatchReport) -> PersistReport {
        self.store.persist_all(report.touched.iter().map(String::as_str))
    }
}

fn pick_api_key(explicit: Option<String>, from_env: Option<String>) -> Option<String> {
    explicit.filter(|key| !key.is_empty()).or_else(|| from_env.filter(|key| !key.is_empty()))
}
