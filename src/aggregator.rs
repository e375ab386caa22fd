/*!
 * Pipeline driver: resolve, render, write
 */

use std::io::Write;
use std::path::Path;

use log::{info, warn};

use crate::error::Result;
use crate::renderer::ContentRenderer;
use crate::resolver::InputResolver;
use crate::types::{InputSpec, ResolvedEntry};

/// Group label used for explicitly listed files
pub const LISTED_FILES_LABEL: &str = "Listed Files";

/// Outcome of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files that made it into the output
    pub files_rendered: usize,
    /// Files dropped at render time (unreadable or not text)
    pub files_skipped: usize,
    /// Entries skipped while scanning directories
    pub scan_skips: usize,
    /// Bytes written to the output stream
    pub bytes_written: usize,
}

/// Drives one invocation from [`InputSpec`] to output stream
pub struct Aggregator {
    spec: InputSpec,
}

impl Aggregator {
    pub fn new(spec: InputSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &InputSpec {
        &self.spec
    }

    /// Resolve every input, then render and write each entry in group
    /// order. Fatal errors surface before the first byte is written.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<RunSummary> {
        let mut resolver = InputResolver::new();
        let mut entries = resolver.resolve(&self.spec)?;
        entries.sort_by_key(|entry| self.group_index(entry));

        let renderer = ContentRenderer::from_spec(&self.spec);
        let mut summary = RunSummary {
            scan_skips: resolver.scan_statistics().skipped.len(),
            ..Default::default()
        };
        let mut current_group: Option<Option<&Path>> = None;

        for entry in &entries {
            let block = match renderer.render(entry) {
                Ok(block) => block,
                Err(e) if e.is_skip() => {
                    warn!("{}", e);
                    summary.files_skipped += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            if self.spec.group_headers {
                let group = entry.source_directory.as_deref();
                if current_group != Some(group) {
                    let header = group_header(group, current_group.is_none());
                    out.write_all(header.as_bytes())?;
                    summary.bytes_written += header.len();
                    current_group = Some(group);
                }
            }

            block.write_to(out)?;
            summary.files_rendered += 1;
            summary.bytes_written += block.len();
        }

        out.flush()?;
        info!(
            "{} file(s) written, {} skipped at render, {} skipped while scanning ({:?})",
            summary.files_rendered,
            summary.files_skipped,
            summary.scan_skips,
            renderer.mode()
        );
        Ok(summary)
    }

    /// Explicit files first, then directories in the order supplied
    fn group_index(&self, entry: &ResolvedEntry) -> usize {
        match &entry.source_directory {
            None => 0,
            Some(dir) => self
                .spec
                .directories
                .iter()
                .position(|d| d == dir)
                .map_or(self.spec.directories.len() + 1, |i| i + 1),
        }
    }
}

fn group_header(group: Option<&Path>, first: bool) -> String {
    let label = match group {
        Some(dir) => dir.display().to_string(),
        None => LISTED_FILES_LABEL.to_string(),
    };
    let gap = if first { "" } else { "\n" };
    format!("{}{}\n---\n", gap, label)
}

/// Run `spec` against `out` with a fresh aggregator
pub fn run<W: Write>(spec: InputSpec, out: &mut W) -> Result<RunSummary> {
    Aggregator::new(spec).run(out)
}
