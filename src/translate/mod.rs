//! Machine translation of missing messages.

mod error;
mod openai;

use std::future::Future;

use async_trait::async_trait;

pub use error::TranslateError;
pub use openai::OpenAiTranslator;

use crate::ir::{
    MissingMessage,
    TranslationFailure,
    TranslationResult,
};
use crate::locale::LocaleResolver;

/// A service turning one message into another language.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `message` from `source_locale` to `target_locale`.
    ///
    /// Locales are the resolved codes, after overrides.
    async fn translate(
        &self,
        message: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> Result<String, TranslateError>;
}

/// Outcome of [`translate_missing`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationRun {
    /// Successful translations in input order.
    pub results: Vec<TranslationResult>,
    pub failures: Vec<TranslationFailure>,
    /// Set when `shutdown` fired before every message was handled.
    pub interrupted: bool,
}

/// Translate every missing message, one request at a time.
///
/// Results carry the catalog locale, not the resolved code, so they can be
/// patched straight back into the store. `on_progress` is called with
/// `(handled, total)` after each message.
pub async fn translate_missing<T, S, P>(
    translator: &T,
    missing: &[MissingMessage],
    resolver: &LocaleResolver,
    shutdown: S,
    mut on_progress: P,
) -> TranslationRun
where
    T: Translator + ?Sized,
    S: Future<Output = ()>,
    P: FnMut(usize, usize),
{
    let mut run = TranslationRun::default();
    let total = missing.len();
    tokio::pin!(shutdown);

    for (index, message) in missing.iter().enumerate() {
        let source_locale = resolver.resolve(&message.reference_locale);
        let target_locale = resolver.resolve(&message.locale);
        tracing::debug!(
            key = %message.key,
            source = source_locale,
            target = target_locale,
            "Translating message"
        );

        let outcome = tokio::select! {
            biased;
            () = &mut shutdown => {
                tracing::warn!(handled = index, total, "Translation interrupted");
                run.interrupted = true;
                break;
            }
            outcome = translator.translate(
                &message.reference_value,
                source_locale,
                target_locale,
            ) => outcome,
        };

        match outcome {
            Ok(value) => run.results.push(TranslationResult::new(
                message.locale.clone(),
                message.key.clone(),
                value,
            )),
            Err(err) => {
                tracing::warn!(
                    locale = %message.locale,
                    key = %message.key,
                    error = %err,
                    "Translation failed"
                );
                run.failures.push(TranslationFailure {
                    locale: message.locale.clone(),
                    key: message.key.clone(),
                    error: err.to_string(),
                });
            }
        }
        on_progress(index + 1, total);
    }

    run
}
