//! Formatting conventions of a catalog document.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::MessageTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// Indentation and line ending used when a catalog is written back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentStyle {
    pub indent: String,
    pub line_ending: LineEnding,
}

impl Default for DocumentStyle {
    fn default() -> Self {
        Self { indent: "  ".to_string(), line_ending: LineEnding::Lf }
    }
}

impl DocumentStyle {
    /// Detect the style of an existing document.
    ///
    /// The indent unit is the leading whitespace of the first indented line,
    /// which sits one level deep in a pretty-printed object. Documents
    /// without any indented line fall back to two spaces.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        let line_ending = if text.contains("\r\n") { LineEnding::CrLf } else { LineEnding::Lf };

        let indent = text
            .lines()
            .find_map(|line| {
                let content = line.trim_start_matches([' ', '\t']);
                if content.trim().is_empty() {
                    return None;
                }
                let indent = line.get(..line.len() - content.len())?;
                (!indent.is_empty()).then(|| indent.to_string())
            })
            .unwrap_or_else(|| Self::default().indent);

        Self { indent, line_ending }
    }

    /// Render a tree as pretty-printed JSON ending with one line terminator.
    ///
    /// # Errors
    /// Returns the serializer error, which only occurs on writer failure.
    pub fn render(&self, tree: &MessageTree) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(self.indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        tree.serialize(&mut serializer)?;

        let mut text = String::from_utf8_lossy(&buf).into_owned();
        text.push('\n');
        // Newlines inside messages are escaped, so every raw '\n' is structural.
        if self.line_ending == LineEnding::CrLf {
            text = text.replace('\n', LineEnding::CrLf.as_str());
        }
        Ok(text)
    }
}
