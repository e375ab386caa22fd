/*!
 * Content rendering for pcat
 */

use std::fs;

use crate::error::{PcatError, Result};
use crate::types::{InputSpec, OutputMode, RenderedBlock, ResolvedEntry};
use crate::utils::comment_style_for;

/// Separator between a line number and the line
pub const LINE_NUMBER_SEPARATOR: &str = " | ";

/// Renders one resolved entry at a time
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentRenderer {
    mode: OutputMode,
    fenced: bool,
    absolute_paths: bool,
}

impl ContentRenderer {
    /// Create a renderer for `mode`
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Create a renderer using the presentation options of `spec`
    pub fn from_spec(spec: &InputSpec) -> Self {
        Self {
            mode: spec.output_mode,
            fenced: spec.fenced,
            absolute_paths: spec.absolute_paths,
        }
    }

    /// Wrap bodies in Markdown code fences
    pub fn fenced(mut self, fenced: bool) -> Self {
        self.fenced = fenced;
        self
    }

    /// Print canonical paths instead of paths as given
    pub fn absolute_paths(mut self, absolute: bool) -> Self {
        self.absolute_paths = absolute;
        self
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Render `entry`. Read and decode failures come back as
    /// [`PcatError::ScanSkip`]; ListOnly never touches the file.
    pub fn render(&self, entry: &ResolvedEntry) -> Result<RenderedBlock> {
        let path = entry.display_path(self.absolute_paths).display().to_string();

        if self.mode == OutputMode::ListOnly {
            return Ok(RenderedBlock {
                header: None,
                body: format!("{}\n", path),
                footer: String::new(),
            });
        }

        let text = read_text(entry)?;

        let comment = match self.mode {
            OutputMode::ContentWithPathComment => {
                Some(comment_style_for(&entry.extension).wrap(&path) + "\n")
            }
            _ => None,
        };

        let body = match self.mode {
            OutputMode::ContentWithLineNumbers => number_lines(&text),
            _ => text,
        };

        let mut footer = String::new();
        if !body.is_empty() && !body.ends_with('\n') {
            footer.push('\n');
        }

        let header = if self.fenced {
            let lang = if entry.extension.is_empty() {
                "txt"
            } else {
                entry.extension.as_str()
            };
            footer.push_str("```\n");
            Some(format!("```{}\n{}", lang, comment.unwrap_or_default()))
        } else {
            comment
        };

        Ok(RenderedBlock {
            header,
            body,
            footer,
        })
    }
}

/// Read a file as UTF-8. The handle is closed before this returns.
fn read_text(entry: &ResolvedEntry) -> Result<String> {
    let bytes = fs::read(&entry.absolute_path).map_err(|e| PcatError::skip(&entry.path, e))?;
    String::from_utf8(bytes).map_err(|e| {
        PcatError::skip(&entry.path, format!("not UTF-8 text ({})", e.utf8_error()))
    })
}

/// Prefix each line with its 1-based number
pub fn number_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    for (i, line) in text.lines().enumerate() {
        out.push_str(&format!("{:>4}{}{}\n", i + 1, LINE_NUMBER_SEPARATOR, line));
    }
    out
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use tempfile::tempdir;

    use super::*;
    use crate::utils::extension_of;

    fn entry_for(path: &Path) -> ResolvedEntry {
        ResolvedEntry {
            path: path.to_path_buf(),
            absolute_path: fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()),
            source_directory: None,
            extension: extension_of(path),
        }
    }

    fn render_to_string(renderer: ContentRenderer, entry: &ResolvedEntry) -> String {
        let mut out = Vec::new();
        renderer.render(entry).unwrap().write_to(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_content_is_verbatim() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("a.py");
        fs::write(&path, "import os\n\nprint(os.name)\n").unwrap();

        let out = render_to_string(ContentRenderer::new(OutputMode::Content), &entry_for(&path));
        assert_eq!(out, "import os\n\nprint(os.name)\n");
    }

    #[test]
    fn test_missing_trailing_newline_added() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("a.py");
        fs::write(&path, "x = 1").unwrap();

        let block = ContentRenderer::new(OutputMode::Content)
            .render(&entry_for(&path))
            .unwrap();
        assert_eq!(block.body, "x = 1");
        assert_eq!(block.footer, "\n");
    }

    #[test]
    fn test_line_numbers() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("a.rs");
        fs::write(&path, "fn main() {\n}\n").unwrap();

        let out = render_to_string(
            ContentRenderer::new(OutputMode::ContentWithLineNumbers),
            &entry_for(&path),
        );
        assert_eq!(out, "   1 | fn main() {\n   2 | }\n");
    }

    #[test]
    fn test_number_lines_width() {
        let text: String = (0..12).map(|i| format!("l{}\n", i)).collect();
        let numbered = number_lines(&text);
        let lines: Vec<&str> = numbered.lines().collect();
        assert_eq!(lines[0], "   1 | l0");
        assert_eq!(lines[11], "  12 | l11");
        assert_eq!(number_lines("a\r\nb"), "   1 | a\n   2 | b\n");
        assert_eq!(number_lines(""), "");
    }

    #[test]
    fn test_path_comment_by_extension() {
        let temp = tempdir().unwrap();
        let rs = temp.path().join("lib.rs");
        let css = temp.path().join("site.css");
        let unknown = temp.path().join("data.zzz");
        fs::write(&rs, "pub fn f() {}\n").unwrap();
        fs::write(&css, "body {}\n").unwrap();
        fs::write(&unknown, "?\n").unwrap();

        let renderer = ContentRenderer::new(OutputMode::ContentWithPathComment);
        assert_eq!(
            render_to_string(renderer, &entry_for(&rs)),
            format!("// {}\npub fn f() {{}}\n", rs.display())
        );
        assert_eq!(
            render_to_string(renderer, &entry_for(&css)),
            format!("/* {} */\nbody {{}}\n", css.display())
        );
        assert_eq!(
            render_to_string(renderer, &entry_for(&unknown)),
            format!("# {}\n?\n", unknown.display())
        );
    }

    #[test]
    fn test_list_only_does_no_io() {
        let entry = ResolvedEntry {
            path: PathBuf::from("src/a.py"),
            absolute_path: PathBuf::from("/definitely/not/here/src/a.py"),
            source_directory: Some(PathBuf::from("src")),
            extension: "py".to_string(),
        };

        let renderer = ContentRenderer::new(OutputMode::ListOnly);
        assert_eq!(render_to_string(renderer, &entry), "src/a.py\n");
        assert_eq!(
            render_to_string(renderer.absolute_paths(true), &entry),
            "/definitely/not/here/src/a.py\n"
        );
    }

    #[test]
    fn test_fenced_output() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("a.py");
        fs::write(&path, "pass").unwrap();
        let plain = temp.path().join("README");
        fs::write(&plain, "hello\n").unwrap();

        let renderer = ContentRenderer::new(OutputMode::Content).fenced(true);
        assert_eq!(render_to_string(renderer, &entry_for(&path)), "```py\npass\n```\n");
        assert_eq!(render_to_string(renderer, &entry_for(&plain)), "```txt\nhello\n```\n");

        let with_path = ContentRenderer::new(OutputMode::ContentWithPathComment).fenced(true);
        assert_eq!(
            render_to_string(with_path, &entry_for(&path)),
            format!("```py\n# {}\npass\n```\n", path.display())
        );
    }

    #[test]
    fn test_non_utf8_is_a_skip() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("blob.bin");
        fs::write(&path, [0xffu8, 0xfe, 0x00, 0x80]).unwrap();

        let err = ContentRenderer::new(OutputMode::Content)
            .render(&entry_for(&path))
            .unwrap_err();
        assert!(err.is_skip());
    }

    #[test]
    fn test_vanished_file_is_a_skip() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("gone.py");
        fs::write(&path, "x").unwrap();
        let entry = entry_for(&path);
        fs::remove_file(&path).unwrap();

        let err = ContentRenderer::new(OutputMode::Content)
            .render(&entry)
            .unwrap_err();
        assert!(err.is_skip());
    }
}
