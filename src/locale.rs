//! Mapping of catalog locales to the codes shown to users and translators.

/// Primary language subtag of a locale code (`pt` for `pt-BR`).
#[must_use]
pub fn primary_subtag(code: &str) -> &str {
    code.split('-').next().unwrap_or(code)
}

/// Resolve `locale` against an ordered list of override codes.
///
/// Returns the first override whose primary subtag equals `locale`, or
/// `locale` itself when nothing matches.
///
/// # Examples
/// ```
/// use js_i18n_sync::locale::resolve;
///
/// let overrides = vec!["es-ES".to_string(), "pt-BR".to_string()];
/// assert_eq!(resolve("es", &overrides), "es-ES");
/// assert_eq!(resolve("fr", &overrides), "fr");
/// ```
#[must_use]
pub fn resolve<'a>(locale: &'a str, overrides: &'a [String]) -> &'a str {
    overrides
        .iter()
        .find(|code| primary_subtag(code) == locale)
        .map_or(locale, String::as_str)
}

/// Locale overrides configured for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleResolver {
    overrides: Vec<String>,
}

impl LocaleResolver {
    /// Overrides sharing a primary subtag with an earlier one are kept but
    /// never selected.
    #[must_use]
    pub fn new(overrides: Vec<String>) -> Self {
        for (index, code) in overrides.iter().enumerate() {
            let subtag = primary_subtag(code);
            if let Some(first) =
                overrides.iter().take(index).find(|earlier| primary_subtag(earlier) == subtag)
            {
                tracing::warn!(
                    ignored = %code,
                    used = %first,
                    "Locale override shadowed by an earlier override with the same language"
                );
            }
        }
        Self { overrides }
    }

    #[must_use]
    pub fn resolve<'a>(&'a self, locale: &'a str) -> &'a str {
        resolve(locale, &self.overrides)
    }

    #[must_use]
    pub fn overrides(&self) -> &[String] {
        &self.overrides
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn overrides(codes: &[&str]) -> Vec<String> {
        codes.iter().copied().map(String::from).collect()
    }

    #[rstest]
    #[case("es", "es-ES")]
    #[case("pt", "pt-BR")]
    #[case("fr", "fr")]
    #[case("es-ES", "es-ES")]
    #[case("e", "e")]
    fn test_resolve(#[case] locale: &str, #[case] expected: &str) {
        let overrides = overrides(&["es-ES", "pt-BR"]);

        assert_eq!(resolve(locale, &overrides), expected);
    }

    #[rstest]
    fn test_resolve_first_override_wins() {
        let resolver = LocaleResolver::new(overrides(&["pt-BR", "pt-PT"]));

        assert_eq!(resolver.resolve("pt"), "pt-BR");
    }

    #[rstest]
    fn test_resolve_plain_override_code() {
        let resolver = LocaleResolver::new(overrides(&["zh-Hant-TW", "de"]));

        assert_eq!(resolver.resolve("zh"), "zh-Hant-TW");
        assert_eq!(resolver.resolve("de"), "de");
    }

    #[rstest]
    fn test_resolve_without_overrides() {
        let resolver = LocaleResolver::default();

        assert_eq!(resolver.resolve("ja"), "ja");
        assert!(resolver.overrides().is_empty());
    }

    #[rstest]
    #[case("es-ES", "es")]
    #[case("es", "es")]
    #[case("zh-Hant-TW", "zh")]
    fn test_primary_subtag(#[case] code: &str, #[case] expected: &str) {
        assert_eq!(primary_subtag(code), expected);
    }
}
