//! 参照カタログとの差分レコード

/// A key present in the reference catalog but absent from `locale`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingMessage {
    /// 不足しているロケール
    pub locale: String,

    /// フラット化されたキー
    pub key: String,

    pub reference_locale: String,

    /// 参照カタログでの値（翻訳元）
    pub reference_value: String,
}
