/*!
 * Core types and data structures for pcat
 */

use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::utils::normalize_extension;

/// How each resolved file is emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// File text as-is
    #[default]
    Content,
    /// Every line prefixed with its 1-based number
    ContentWithLineNumbers,
    /// A comment line naming the file, then its text
    ContentWithPathComment,
    /// Only the path, no file is opened
    ListOnly,
}

/// Set of accepted extensions; empty means any extension
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter {
    extensions: BTreeSet<String>,
    /// Set once an `any` token was seen
    match_any: bool,
}

impl ExtensionFilter {
    /// Build a filter from raw tokens (`.PY`, `js`, ...)
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::default();
        for token in tokens {
            filter.insert(token.as_ref());
        }
        filter
    }

    /// Add a raw token. `any` switches the filter to match-any for good.
    pub fn insert(&mut self, token: &str) {
        let ext = normalize_extension(token);
        if ext.is_empty() || self.match_any {
            return;
        }
        if ext == "any" {
            self.extensions.clear();
            self.match_any = true;
            return;
        }
        self.extensions.insert(ext);
    }

    /// Whether every extension is accepted
    pub fn is_any(&self) -> bool {
        self.match_any || self.extensions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    /// Whether a file name passes the filter (case-insensitive)
    pub fn matches(&self, path: &Path) -> bool {
        if self.is_any() {
            return true;
        }

        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().to_lowercase(),
            None => return false,
        };

        self.extensions.iter().any(|ext| {
            name.len() > ext.len() + 1
                && name.ends_with(ext.as_str())
                && name[..name.len() - ext.len()].ends_with('.')
        })
    }
}

/// The parsed, mode-agnostic request handed to the engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSpec {
    /// Explicitly named files, in argument order
    pub explicit_files: Vec<PathBuf>,
    /// Directories to scan, in argument order
    pub directories: Vec<PathBuf>,
    /// Extension filter applied to scanned files only
    pub extensions: ExtensionFilter,
    /// Scan dot-entries like any other
    pub include_hidden: bool,
    pub output_mode: OutputMode,
    /// Wrap each body in a Markdown code fence
    pub fenced: bool,
    /// Emit a header line before each source group
    pub group_headers: bool,
    /// Print canonical paths instead of paths as given
    pub absolute_paths: bool,
}

/// One file slated for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    /// Path as given or as discovered under its scan root
    pub path: PathBuf,
    /// Canonical path, unique across a resolved set
    pub absolute_path: PathBuf,
    /// Directory the entry was discovered under, `None` if listed explicitly
    pub source_directory: Option<PathBuf>,
    /// Lowercase extension without dot, may be empty
    pub extension: String,
}

impl ResolvedEntry {
    /// Path to print for this entry
    pub fn display_path(&self, absolute: bool) -> &Path {
        if absolute {
            &self.absolute_path
        } else {
            &self.path
        }
    }
}

/// Output fragment for one entry. Written immediately, never retained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedBlock {
    pub header: Option<String>,
    pub body: String,
    pub footer: String,
}

impl RenderedBlock {
    /// Write the whole block with a single `write_all`
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut buf = String::with_capacity(self.len());
        if let Some(header) = &self.header {
            buf.push_str(header);
        }
        buf.push_str(&self.body);
        buf.push_str(&self.footer);
        out.write_all(buf.as_bytes())
    }

    /// Total length in bytes
    pub fn len(&self) -> usize {
        self.header.as_ref().map_or(0, String::len) + self.body.len() + self.footer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
