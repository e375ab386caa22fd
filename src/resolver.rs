/*!
 * Input resolution: explicit files and scanned directories merged into one
 * ordered, de-duplicated list
 */

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{PcatError, Result};
use crate::scanner::{DirectoryScanner, ScannerStatistics};
use crate::types::{InputSpec, ResolvedEntry};
use crate::utils::extension_of;

/// Resolver for one invocation
#[derive(Debug, Default)]
pub struct InputResolver {
    scanner: DirectoryScanner,
}

impl InputResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics of the directory scans performed so far
    pub fn scan_statistics(&self) -> ScannerStatistics {
        self.scanner.get_statistics()
    }

    /// Explicit files first (argument order), then each directory's scan
    /// results in directory order. First occurrence of a real path wins.
    pub fn resolve(&mut self, spec: &InputSpec) -> Result<Vec<ResolvedEntry>> {
        let mut seen = HashSet::new();
        let mut resolved = Vec::new();

        for file in &spec.explicit_files {
            let entry = explicit_entry(file)?;
            push_unique(&mut seen, &mut resolved, entry);
        }

        for directory in &spec.directories {
            // Only a vanished root is fatal; anything below it is a skip
            if !directory.is_dir() {
                return Err(PcatError::InvalidArgument(format!(
                    "directory not found or is not a directory: {}",
                    directory.display()
                )));
            }

            let found = self
                .scanner
                .scan(directory, &spec.extensions, spec.include_hidden);
            debug!("{} file(s) matched under {}", found.len(), directory.display());
            for entry in found {
                push_unique(&mut seen, &mut resolved, entry);
            }
        }

        info!("Resolved {} file(s)", resolved.len());
        Ok(resolved)
    }
}

/// Convenience wrapper running a fresh resolver
pub fn resolve(spec: &InputSpec) -> Result<Vec<ResolvedEntry>> {
    InputResolver::new().resolve(spec)
}

fn explicit_entry(file: &Path) -> Result<ResolvedEntry> {
    let absolute_path = fs::canonicalize(file).map_err(|e| {
        PcatError::InvalidArgument(format!("file not found: {} ({})", file.display(), e))
    })?;
    if !absolute_path.is_file() {
        return Err(PcatError::InvalidArgument(format!(
            "not a file: {}",
            file.display()
        )));
    }

    Ok(ResolvedEntry {
        path: file.to_path_buf(),
        absolute_path,
        source_directory: None,
        extension: extension_of(file),
    })
}

fn push_unique(
    seen: &mut HashSet<PathBuf>,
    resolved: &mut Vec<ResolvedEntry>,
    entry: ResolvedEntry,
) {
    if seen.insert(entry.absolute_path.clone()) {
        resolved.push(entry);
    } else {
        debug!("Duplicate dropped: {}", entry.path.display());
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Write;

    use tempfile::tempdir;

    use super::*;
    use crate::types::ExtensionFilter;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        let mut file = File::create(path).unwrap();
        writeln!(file, "// {}", path.display()).unwrap();
    }

    fn names(entries: &[ResolvedEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|e| e.path.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_explicit_files_in_argument_order_deduplicated() {
        let temp = tempdir().unwrap();
        let a = temp.path().join("a.py");
        let b = temp.path().join("b.py");
        touch(&a);
        touch(&b);

        let spec = InputSpec {
            explicit_files: vec![b.clone(), a.clone(), b.clone()],
            ..Default::default()
        };
        let resolved = resolve(&spec).unwrap();

        assert_eq!(names(&resolved), vec!["b.py", "a.py"]);
        assert!(resolved.iter().all(|e| e.source_directory.is_none()));
    }

    #[test]
    fn test_explicit_file_wins_over_directory() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("src");
        let a = dir.join("a.py");
        touch(&a);
        touch(&dir.join("b.py"));

        let spec = InputSpec {
            explicit_files: vec![a.clone()],
            directories: vec![dir.clone()],
            ..Default::default()
        };
        let resolved = resolve(&spec).unwrap();

        assert_eq!(names(&resolved), vec!["a.py", "b.py"]);
        assert_eq!(resolved[0].source_directory, None);
        assert_eq!(resolved[1].source_directory.as_deref(), Some(dir.as_path()));
    }

    #[test]
    fn test_same_file_via_different_spellings() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("src");
        touch(&dir.join("a.py"));

        let spec = InputSpec {
            explicit_files: vec![dir.join("a.py"), dir.join(".").join("a.py")],
            ..Default::default()
        };
        assert_eq!(resolve(&spec).unwrap().len(), 1);
    }

    #[test]
    fn test_nested_directories_resolved_once() {
        let temp = tempdir().unwrap();
        let outer = temp.path().join("proj");
        let inner = outer.join("lib");
        touch(&outer.join("main.rs"));
        touch(&inner.join("util.rs"));

        let spec = InputSpec {
            directories: vec![inner.clone(), outer.clone()],
            ..Default::default()
        };
        let resolved = resolve(&spec).unwrap();

        assert_eq!(names(&resolved), vec!["util.rs", "main.rs"]);
        assert_eq!(resolved[0].source_directory.as_deref(), Some(inner.as_path()));
        assert_eq!(resolved[1].source_directory.as_deref(), Some(outer.as_path()));
    }

    #[test]
    fn test_scanned_files_filtered_explicit_files_not() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("src");
        touch(&dir.join("a.py"));
        touch(&dir.join(".hidden.py"));
        touch(&dir.join("b.txt"));
        let notes = temp.path().join("notes.txt");
        touch(&notes);

        let spec = InputSpec {
            explicit_files: vec![notes],
            directories: vec![dir],
            extensions: ExtensionFilter::from_tokens(["py"]),
            ..Default::default()
        };
        let resolved = resolve(&spec).unwrap();

        assert_eq!(names(&resolved), vec!["notes.txt", "a.py"]);
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let temp = tempdir().unwrap();
        let spec = InputSpec {
            explicit_files: vec![temp.path().join("typo.py")],
            ..Default::default()
        };
        let err = resolve(&spec).unwrap_err();
        assert!(matches!(err, PcatError::InvalidArgument(ref m) if m.contains("typo.py")));
    }

    #[test]
    fn test_missing_directory_fails() {
        let temp = tempdir().unwrap();
        let spec = InputSpec {
            directories: vec![temp.path().join("gone")],
            ..Default::default()
        };
        assert!(matches!(
            resolve(&spec).unwrap_err(),
            PcatError::InvalidArgument(_)
        ));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("src");
        for name in ["z.rs", "a.rs", "m/n.rs", ".x/y.rs"] {
            touch(&dir.join(name));
        }
        let spec = InputSpec {
            explicit_files: vec![dir.join("z.rs")],
            directories: vec![dir],
            ..Default::default()
        };

        assert_eq!(resolve(&spec).unwrap(), resolve(&spec).unwrap());
    }
}
