/*!
 * Directory scanning functionality
 */

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use crate::error::PcatError;
use crate::types::{ExtensionFilter, ResolvedEntry};
use crate::utils::{extension_of, is_hidden_name};

/// An entry left out of a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub reason: String,
}

/// Scanner statistics
#[derive(Debug, Clone, Default)]
pub struct ScannerStatistics {
    /// Number of scan roots walked
    pub roots_scanned: usize,
    /// Number of files yielded
    pub files_yielded: usize,
    /// Directories pruned because their real path was already scanned
    pub directories_pruned: usize,
    /// Unreadable entries
    pub skipped: Vec<SkippedEntry>,
}

/// Recursive, sorted scanner. Real paths of visited directories are
/// remembered for the scanner's lifetime, so one scanner per invocation.
#[derive(Debug, Default)]
pub struct DirectoryScanner {
    /// Canonical directories already walked
    visited: HashSet<PathBuf>,
    statistics: ScannerStatistics,
}

impl DirectoryScanner {
    /// Create a new scanner
    pub fn new() -> Self {
        Self::default()
    }

    /// Get scanner statistics
    pub fn get_statistics(&self) -> ScannerStatistics {
        self.statistics.clone()
    }

    /// Scan `directory` depth-first in name order and return matching files
    pub fn scan(
        &mut self,
        directory: &Path,
        extensions: &ExtensionFilter,
        include_hidden: bool,
    ) -> Vec<ResolvedEntry> {
        let Self {
            visited,
            statistics,
        } = self;
        let ScannerStatistics {
            roots_scanned,
            files_yielded,
            directories_pruned,
            skipped,
        } = statistics;

        *roots_scanned += 1;
        debug!("Scanning directory: {}", directory.display());

        let walker = WalkDir::new(directory)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| keep_entry(entry, include_hidden, visited, directories_pruned));

        let mut entries = Vec::new();
        for item in walker {
            let entry = match item {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(directory).to_path_buf();
                    record_skip(skipped, PcatError::skip(path, &e));
                    continue;
                }
            };

            if !entry.file_type().is_file() || !extensions.matches(entry.path()) {
                continue;
            }

            match fs::canonicalize(entry.path()) {
                Ok(absolute_path) => {
                    *files_yielded += 1;
                    entries.push(ResolvedEntry {
                        extension: extension_of(entry.path()),
                        path: entry.into_path(),
                        absolute_path,
                        source_directory: Some(directory.to_path_buf()),
                    });
                }
                Err(e) => record_skip(skipped, PcatError::skip(entry.path(), e)),
            }
        }

        entries
    }
}

/// Hidden-entry policy plus the revisit guard for directories
fn keep_entry(
    entry: &DirEntry,
    include_hidden: bool,
    visited: &mut HashSet<PathBuf>,
    pruned: &mut usize,
) -> bool {
    // The root was named by the user and is never hidden
    if entry.depth() > 0
        && !include_hidden
        && is_hidden_name(&entry.file_name().to_string_lossy())
    {
        trace!("Skipping hidden entry: {}", entry.path().display());
        return false;
    }

    if entry.file_type().is_dir() {
        if let Ok(real) = fs::canonicalize(entry.path()) {
            if !visited.insert(real) {
                debug!("Already scanned, pruning: {}", entry.path().display());
                *pruned += 1;
                return false;
            }
        }
    }

    true
}

fn record_skip(skipped: &mut Vec<SkippedEntry>, err: PcatError) {
    debug!("{}", err);
    if let PcatError::ScanSkip { path, reason } = err {
        skipped.push(SkippedEntry { path, reason });
    }
}
