//! Merging translated messages back into catalog trees.

use crate::catalog::{
    CatalogStore,
    TreeError,
};
use crate::flatten::set_path;
use crate::ir::TranslationResult;

/// Why a translation was not written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("no catalog for locale '{0}'")]
    UnknownLocale(String),

    #[error(transparent)]
    Conflict(#[from] TreeError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTranslation {
    pub translation: TranslationResult,
    pub reason: SkipReason,
}

/// Outcome of [`apply_translations`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchReport {
    /// Catalogs whose tree changed, in store order.
    pub touched: Vec<String>,
    /// Translations that inserted or replaced a message.
    pub applied: usize,
    pub skipped: Vec<SkippedTranslation>,
}

impl PatchReport {
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.touched.is_empty()
    }
}

/// Write each translation into the catalog named by its locale.
///
/// Records that cannot be applied are skipped and reported; they never stop
/// the batch. Writing the same translations twice leaves the second report
/// with nothing touched.
pub fn apply_translations(
    store: &mut CatalogStore,
    translations: &[TranslationResult],
    separator: &str,
) -> PatchReport {
    let mut report = PatchReport::default();
    let mut changed: Vec<&str> = Vec::new();

    for translation in translations {
        let Some(catalog) = store.get_mut(&translation.locale) else {
            tracing::warn!(
                locale = %translation.locale,
                key = %translation.key,
                "Skipping translation for unknown catalog"
            );
            report.skipped.push(SkippedTranslation {
                translation: translation.clone(),
                reason: SkipReason::UnknownLocale(translation.locale.clone()),
            });
            continue;
        };

        match set_path(&mut catalog.tree, &translation.key, &translation.value, separator) {
            Ok(outcome) if outcome.is_mutation() => {
                report.applied += 1;
                if !changed.contains(&translation.locale.as_str()) {
                    changed.push(&translation.locale);
                }
            }
            Ok(_) => {
                tracing::debug!(
                    locale = %translation.locale,
                    key = %translation.key,
                    "Message already up to date"
                );
            }
            Err(err) => {
                tracing::warn!(
                    locale = %translation.locale,
                    key = %translation.key,
                    error = %err,
                    "Skipping conflicting translation"
                );
                report.skipped.push(SkippedTranslation {
                    translation: translation.clone(),
                    reason: SkipReason::Conflict(err),
                });
            }
        }
    }

    report.touched = store
        .names()
        .into_iter()
        .filter(|name| changed.contains(name))
        .map(String::from)
        .collect();
    report
}
