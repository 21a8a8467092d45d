//! 翻訳結果の中間表現

/// A translated message ready to be written into `locale`'s catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    pub locale: String,

    /// フラット化されたキー
    pub key: String,

    /// 翻訳後の値
    pub value: String,
}

impl TranslationResult {
    #[must_use]
    pub fn new(locale: impl Into<String>, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { locale: locale.into(), key: key.into(), value: value.into() }
    }
}

/// A missing message the translator could not handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationFailure {
    pub locale: String,
    pub key: String,
    pub error: String,
}
