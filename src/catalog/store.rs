//! In-memory catalogs and their persistence.

use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;
use jsonc_parser::ParseOptions;
use serde_json::Value;

use super::{
    CatalogError,
    DocumentStyle,
    MessageTree,
};
use crate::config::CatalogMatcher;
use crate::flatten::{
    FlatMessages,
    flatten,
};

/// One locale's message tree and the file it came from.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Locale identifier, derived from the file stem.
    pub name: String,
    pub location: PathBuf,
    pub tree: MessageTree,
    /// Formatting reused when the catalog is written back.
    pub style: DocumentStyle,
}

impl Catalog {
    #[must_use]
    pub fn new(name: impl Into<String>, location: impl Into<PathBuf>, tree: MessageTree) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            tree,
            style: DocumentStyle::default(),
        }
    }

    /// Parse catalog text.
    ///
    /// Comments and trailing commas are accepted. An empty document is an
    /// empty catalog.
    ///
    /// # Errors
    /// Returns [`CatalogError::Parse`], [`CatalogError::NotAnObject`] or
    /// [`CatalogError::MalformedTree`].
    pub fn from_text(
        name: impl Into<String>,
        location: impl Into<PathBuf>,
        text: &str,
    ) -> Result<Self, CatalogError> {
        let name = name.into();
        let location = location.into();

        let value = jsonc_parser::parse_to_serde_value(text, &ParseOptions::default())
            .map_err(|e| CatalogError::Parse { path: location.clone(), message: e.to_string() })?
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()));

        if !value.is_object() {
            return Err(CatalogError::NotAnObject { path: location });
        }

        let tree = MessageTree::from_json(&value)
            .map_err(|source| CatalogError::MalformedTree { locale: name.clone(), source })?;

        Ok(Self { name, location, tree, style: DocumentStyle::detect(text) })
    }

    /// Read a catalog file, naming it after the file stem.
    ///
    /// # Errors
    /// Returns [`CatalogError::Io`] when the file cannot be read, otherwise
    /// the errors of [`Catalog::from_text`].
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })?;
        let name =
            path.file_stem().map(|stem| stem.to_string_lossy().to_string()).unwrap_or_default();
        Self::from_text(name, path, &text)
    }

    /// Flatten this catalog's tree.
    ///
    /// # Errors
    /// Returns [`CatalogError::MalformedTree`] naming this catalog.
    pub fn flatten(&self, separator: &str) -> Result<FlatMessages, CatalogError> {
        flatten(&self.tree, separator)
            .map_err(|source| CatalogError::MalformedTree { locale: self.name.clone(), source })
    }

    /// Serialized document as it would be written to disk.
    ///
    /// # Errors
    /// Returns [`CatalogError::Serialize`].
    pub fn render(&self) -> Result<String, CatalogError> {
        self.style
            .render(&self.tree)
            .map_err(|source| CatalogError::Serialize { locale: self.name.clone(), source })
    }

    /// Overwrite the catalog file with the current tree.
    ///
    /// # Errors
    /// Returns [`CatalogError::Serialize`] or [`CatalogError::Write`].
    pub fn persist(&self) -> Result<(), CatalogError> {
        let text = self.render()?;
        std::fs::write(&self.location, text)
            .map_err(|source| CatalogError::Write { path: self.location.clone(), source })?;
        tracing::info!(locale = %self.name, path = %self.location.display(), "Catalog written");
        Ok(())
    }
}

/// Outcome of writing several catalogs.
///
/// Writes are independent: a failure does not undo earlier writes and does
/// not stop later ones.
#[derive(Debug, Default)]
pub struct PersistReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<CatalogError>,
}

impl PersistReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Owner of every loaded catalog, in discovery order.
#[derive(Debug, Default)]
pub struct CatalogStore {
    catalogs: Vec<Catalog>,
}

impl CatalogStore {
    #[must_use]
    pub fn new() -> Self {
        Self { catalogs: Vec::new() }
    }

    /// Build a store from already loaded catalogs.
    ///
    /// # Errors
    /// Returns [`CatalogError::DuplicateLocale`] when two catalogs share a name.
    pub fn from_catalogs(catalogs: impl IntoIterator<Item = Catalog>) -> Result<Self, CatalogError> {
        let mut store = Self::new();
        for catalog in catalogs {
            store.insert(catalog)?;
        }
        Ok(store)
    }

    /// # Errors
    /// Returns [`CatalogError::DuplicateLocale`] when the name is taken.
    pub fn insert(&mut self, catalog: Catalog) -> Result<(), CatalogError> {
        if let Some(existing) = self.get(&catalog.name) {
            return Err(CatalogError::DuplicateLocale {
                locale: catalog.name,
                first: existing.location.clone(),
                second: catalog.location,
            });
        }
        self.catalogs.push(catalog);
        Ok(())
    }

    /// Load every catalog file under `messages_dir` accepted by `matcher`.
    ///
    /// Files are visited in file name order so the store order is stable.
    ///
    /// # Errors
    /// Fails on the first unreadable or malformed catalog, on duplicate
    /// locale names, and when no catalog is found.
    pub fn load(messages_dir: &Path, matcher: &CatalogMatcher) -> Result<Self, CatalogError> {
        tracing::debug!(messages_dir = %messages_dir.display(), "Loading catalogs");

        std::fs::metadata(messages_dir)
            .map_err(|source| CatalogError::Io { path: messages_dir.to_path_buf(), source })?;

        let mut store = Self::new();
        for path in Self::find_catalog_files(messages_dir, matcher) {
            tracing::debug!(path = %path.display(), "Loading catalog");
            store.insert(Catalog::load(&path)?)?;
        }

        if store.is_empty() {
            return Err(CatalogError::NoCatalogs(messages_dir.to_path_buf()));
        }
        Ok(store)
    }

    fn find_catalog_files(messages_dir: &Path, matcher: &CatalogMatcher) -> Vec<PathBuf> {
        let mut found_files = Vec::new();

        for result in WalkBuilder::new(messages_dir)
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .follow_links(false)
            .sort_by_file_name(std::ffi::OsStr::cmp)
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(?err, "Failed to read directory entry");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            let Ok(relative_path) = path.strip_prefix(messages_dir) else {
                continue;
            };
            if !matcher.is_catalog_file(relative_path) {
                continue;
            }

            found_files.push(path.to_path_buf());
        }

        found_files
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Catalog> {
        self.catalogs.iter().find(|catalog| catalog.name == name)
    }

    #[must_use]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Catalog> {
        self.catalogs.iter_mut().find(|catalog| catalog.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Catalog> {
        self.catalogs.iter()
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.catalogs.iter().map(|catalog| catalog.name.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }

    /// Write one catalog back to its file.
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownLocale`] or the catalog's write error.
    pub fn persist(&self, name: &str) -> Result<&Path, CatalogError> {
        let catalog = self.get(name).ok_or_else(|| CatalogError::UnknownLocale(name.to_string()))?;
        catalog.persist()?;
        Ok(&catalog.location)
    }

    /// Write the named catalogs, continuing past failures.
    pub fn persist_all<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> PersistReport {
        let mut report = PersistReport::default();
        for name in names {
            match self.persist(name) {
                Ok(path) => report.written.push(path.to_path_buf()),
                Err(err) => {
                    tracing::warn!(locale = name, error = %err, "Failed to write catalog");
                    report.failed.push(err);
                }
            }
        }
        report
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::catalog::TreeError;
    use crate::config::CatalogFilesConfig;

    fn default_matcher() -> CatalogMatcher {
        CatalogMatcher::new(&CatalogFilesConfig::default()).unwrap()
    }

    #[test]
    fn test_load_store_in_file_name_order() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("fr.json"), r#"{"a": "A"}"#).unwrap();
        fs::write(temp_dir.path().join("en.json"), r#"{"a": "A"}"#).unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "not a catalog").unwrap();
        fs::create_dir(temp_dir.path().join("drafts")).unwrap();
        fs::write(temp_dir.path().join("drafts/de.json"), "{}").unwrap();

        let store = CatalogStore::load(temp_dir.path(), &default_matcher()).unwrap();

        assert_eq!(store.names(), vec!["en", "fr"]);
        assert_eq!(store.get("en").unwrap().location, temp_dir.path().join("en.json"));
    }

    #[test]
    fn test_load_recursive_duplicate_locale() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("app")).unwrap();
        fs::write(temp_dir.path().join("en.json"), "{}").unwrap();
        fs::write(temp_dir.path().join("app/en.json"), "{}").unwrap();
        let matcher = CatalogMatcher::new(&CatalogFilesConfig {
            include_patterns: vec!["**/*.json".to_string()],
            exclude_patterns: vec![],
        })
        .unwrap();

        let result = CatalogStore::load(temp_dir.path(), &matcher);

        assert!(matches!(
            result,
            Err(CatalogError::DuplicateLocale { ref locale, .. }) if locale == "en"
        ));
    }

    #[test]
    fn test_load_missing_directory() {
        let temp_dir = TempDir::new().unwrap();

        let result = CatalogStore::load(&temp_dir.path().join("missing"), &default_matcher());

        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }

    #[test]
    fn test_load_empty_directory() {
        let temp_dir = TempDir::new().unwrap();

        let result = CatalogStore::load(temp_dir.path(), &default_matcher());

        assert!(matches!(result, Err(CatalogError::NoCatalogs(_))));
    }

    #[test]
    fn test_from_text_reports_malformed_value_with_locale_and_path() {
        let result = Catalog::from_text("de", "de.json", r#"{"cart": {"count": 3}}"#);

        let Err(CatalogError::MalformedTree { locale, source }) = result else {
            panic!("expected a malformed tree error");
        };
        assert_eq!(locale, "de");
        assert_eq!(source, TreeError::Malformed { path: "cart.count".to_string(), kind: "number" });
    }

    #[test]
    fn test_from_text_rejects_non_object_root() {
        let result = Catalog::from_text("de", "de.json", r#"["a", "b"]"#);

        assert!(matches!(result, Err(CatalogError::NotAnObject { .. })));
    }

    #[test]
    fn test_from_text_reports_parse_error() {
        let result = Catalog::from_text("de", "de.json", r#"{"a": "#);

        assert!(matches!(result, Err(CatalogError::Parse { .. })));
    }

    #[googletest::test]
    fn test_from_text_accepts_comments_and_empty_documents() {
        let commented =
            Catalog::from_text("en", "en.json", "{\n  // header\n  \"a\": \"A\",\n}").unwrap();
        let empty = Catalog::from_text("fr", "fr.json", "").unwrap();

        expect_that!(commented.tree.leaf_count(), eq(1));
        expect_that!(empty.tree.leaf_count(), eq(0));
    }

    #[googletest::test]
    fn test_persist_uses_detected_style() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("es.json");
        fs::write(&path, "{\n    \"b\": \"B\",\n    \"a\": \"A\"\n}").unwrap();
        let mut catalog = Catalog::load(&path).unwrap();
        catalog.tree =
            MessageTree::from_json(&json!({"b": "B", "a": "A", "c": {"d": "D"}})).unwrap();

        catalog.persist().unwrap();

        let written = fs::read_to_string(&path).unwrap();
        expect_that!(
            written,
            eq("{\n    \"b\": \"B\",\n    \"a\": \"A\",\n    \"c\": {\n        \"d\": \"D\"\n    }\n}\n")
        );
    }

    #[googletest::test]
    fn test_persist_all_continues_after_failure() {
        let temp_dir = TempDir::new().unwrap();
        let store = CatalogStore::from_catalogs([
            Catalog::new("de", temp_dir.path().join("missing/de.json"), MessageTree::empty()),
            Catalog::new("fr", temp_dir.path().join("fr.json"), MessageTree::empty()),
        ])
        .unwrap();

        let report = store.persist_all(["de", "fr", "it"]);

        expect_that!(report.is_success(), eq(false));
        expect_that!(report.written, elements_are![eq(&temp_dir.path().join("fr.json"))]);
        expect_that!(report.failed.len(), eq(2));
        expect_that!(fs::read_to_string(temp_dir.path().join("fr.json")).unwrap(), eq("{}\n"));
    }
}
