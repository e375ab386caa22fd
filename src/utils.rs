/*!
 * Utility functions for pcat
 */

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

/// Comment delimiters used to write a path header line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentStyle {
    pub prefix: &'static str,
    pub suffix: &'static str,
}

impl CommentStyle {
    const fn line(prefix: &'static str) -> Self {
        Self { prefix, suffix: "" }
    }

    const fn block(prefix: &'static str, suffix: &'static str) -> Self {
        Self { prefix, suffix }
    }

    /// Format `text` as a single comment line (without trailing newline)
    pub fn wrap(&self, text: &str) -> String {
        if self.suffix.is_empty() {
            format!("{} {}", self.prefix, text)
        } else {
            format!("{} {} {}", self.prefix, text, self.suffix)
        }
    }
}

/// Fallback for extensions missing from [`COMMENT_STYLES`]
pub const DEFAULT_COMMENT_STYLE: CommentStyle = CommentStyle::line("#");

/// Comment syntax by lowercase extension
pub static COMMENT_STYLES: Lazy<HashMap<&'static str, CommentStyle>> = Lazy::new(|| {
    let hash = CommentStyle::line("#");
    let slashes = CommentStyle::line("//");
    let dashes = CommentStyle::line("--");
    let markup = CommentStyle::block("<!--", "-->");
    let css = CommentStyle::block("/*", "*/");

    HashMap::from([
        // Scripting
        ("py", hash),
        ("sh", hash),
        ("bash", hash),
        ("zsh", hash),
        ("rb", hash),
        ("pl", hash),
        ("r", hash),
        // C family and friends
        ("js", slashes),
        ("mjs", slashes),
        ("ts", slashes),
        ("jsx", slashes),
        ("tsx", slashes),
        ("go", slashes),
        ("java", slashes),
        ("c", slashes),
        ("h", slashes),
        ("cpp", slashes),
        ("hpp", slashes),
        ("cs", slashes),
        ("rs", slashes),
        ("swift", slashes),
        ("kt", slashes),
        ("scala", slashes),
        ("php", slashes),
        ("dart", slashes),
        ("zig", slashes),
        ("json", slashes),
        ("lua", dashes),
        ("sql", dashes),
        ("hs", dashes),
        // Markup & styling
        ("html", markup),
        ("htm", markup),
        ("xml", markup),
        ("svg", markup),
        ("vue", markup),
        ("md", markup),
        ("css", css),
        ("scss", css),
        ("less", css),
        // Config & data
        ("yaml", hash),
        ("yml", hash),
        ("toml", hash),
        ("conf", hash),
        ("cfg", hash),
        ("ini", CommentStyle::line(";")),
        ("txt", hash),
        ("log", hash),
    ])
});

/// Look up the comment style for an extension (lowercase, no dot)
pub fn comment_style_for(extension: &str) -> CommentStyle {
    COMMENT_STYLES
        .get(extension)
        .copied()
        .unwrap_or(DEFAULT_COMMENT_STYLE)
}

static EXTENSION_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\.?[A-Za-z0-9_+\-]+(\.[A-Za-z0-9_+\-]+)*$").expect("static regex is valid")
});

/// Whether a bare token looks like an extension rather than a path
pub fn is_extension_shaped(token: &str) -> bool {
    EXTENSION_TOKEN.is_match(token)
}

/// Normalize an extension token: one leading dot removed, lowercased
pub fn normalize_extension(token: &str) -> String {
    token.strip_prefix('.').unwrap_or(token).to_lowercase()
}

/// Lowercase extension of a path, or an empty string
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Whether a file or directory name is hidden (starts with '.')
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.')
}
