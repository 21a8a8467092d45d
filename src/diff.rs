//! Missing key detection against the reference catalog.

use crate::catalog::{
    Catalog,
    CatalogError,
    CatalogStore,
};
use crate::flatten::FlatMessages;
use crate::ir::MissingMessage;

/// Audit result of one non-reference catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogAudit {
    pub locale: String,
    /// Missing messages in reference order.
    pub missing: Vec<MissingMessage>,
}

impl CatalogAudit {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Audit of every catalog against the reference, in store order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditReport {
    pub reference_locale: String,
    pub catalogs: Vec<CatalogAudit>,
}

impl AuditReport {
    /// True when no catalog misses any reference key.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.catalogs.iter().all(CatalogAudit::is_complete)
    }

    #[must_use]
    pub fn get(&self, locale: &str) -> Option<&CatalogAudit> {
        self.catalogs.iter().find(|audit| audit.locale == locale)
    }

    pub fn incomplete(&self) -> impl Iterator<Item = &CatalogAudit> {
        self.catalogs.iter().filter(|audit| !audit.is_complete())
    }

    /// Every missing message, grouped by catalog.
    pub fn missing_messages(&self) -> impl Iterator<Item = &MissingMessage> {
        self.catalogs.iter().flat_map(|audit| audit.missing.iter())
    }

    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.catalogs.iter().map(|audit| audit.missing.len()).sum()
    }
}

/// Keys of `reference` absent from `target`, in reference order.
///
/// Keys only present in `target` are not reported.
///
/// # Errors
/// Returns [`CatalogError::MalformedTree`] when either catalog cannot be
/// flattened.
pub fn missing_keys(
    reference: &Catalog,
    target: &Catalog,
    separator: &str,
) -> Result<Vec<MissingMessage>, CatalogError> {
    let reference_messages = reference.flatten(separator)?;
    missing_against(&reference.name, &reference_messages, target, separator)
}

fn missing_against(
    reference_locale: &str,
    reference_messages: &FlatMessages,
    target: &Catalog,
    separator: &str,
) -> Result<Vec<MissingMessage>, CatalogError> {
    let target_messages = target.flatten(separator)?;

    Ok(reference_messages
        .iter()
        .filter(|(key, _)| !target_messages.contains_key(key.as_str()))
        .map(|(key, value)| MissingMessage {
            locale: target.name.clone(),
            key: key.clone(),
            reference_locale: reference_locale.to_string(),
            reference_value: value.clone(),
        })
        .collect())
}

/// Compare every catalog in the store with the reference catalog.
///
/// # Errors
/// - [`CatalogError::ReferenceNotFound`] when no catalog is named `reference_name`
/// - [`CatalogError::MalformedTree`] when a catalog cannot be flattened
pub fn audit_all(
    store: &CatalogStore,
    reference_name: &str,
    separator: &str,
) -> Result<AuditReport, CatalogError> {
    let reference = store
        .get(reference_name)
        .ok_or_else(|| CatalogError::ReferenceNotFound(reference_name.to_string()))?;
    let reference_messages = reference.flatten(separator)?;
    tracing::debug!(
        reference = reference_name,
        keys = reference_messages.len(),
        "Auditing catalogs against reference"
    );

    let mut catalogs = Vec::new();
    for target in store.iter().filter(|catalog| catalog.name != reference.name) {
        let missing = missing_against(&reference.name, &reference_messages, target, separator)?;
        tracing::debug!(locale = %target.name, missing = missing.len(), "Catalog audited");
        catalogs.push(CatalogAudit { locale: target.name.clone(), missing });
    }

    Ok(AuditReport { reference_locale: reference.name.clone(), catalogs })
}
