/*!
 * Argument classification for pcat
 *
 * Turns raw arguments into an [`InputSpec`]. Bare tokens are classified by
 * probing the filesystem, never by syntax alone: an existing directory is a
 * directory, an existing file is an explicit file, and anything else must
 * look like an extension.
 */

use std::path::{Path, PathBuf};

use log::debug;

use crate::config::Args;
use crate::error::Result;
use crate::types::{ExtensionFilter, InputSpec, OutputMode};
use crate::utils::is_extension_shaped;
use crate::{bail, ensure};

/// Filesystem queries needed to classify tokens
pub trait PathProbe {
    fn is_dir(&self, path: &Path) -> bool;
    fn is_file(&self, path: &Path) -> bool;

    fn exists(&self, path: &Path) -> bool {
        self.is_dir(path) || self.is_file(path)
    }
}

/// Probe backed by the real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl PathProbe for FsProbe {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Inputs gathered from one invocation before validation
#[derive(Default)]
struct Collected {
    files: Vec<PathBuf>,
    directories: Vec<PathBuf>,
    extensions: ExtensionFilter,
}

impl Collected {
    fn push_dir(&mut self, dir: PathBuf) {
        if !self.directories.contains(&dir) {
            self.directories.push(dir);
        }
    }
}

/// Build an [`InputSpec`] from parsed arguments
pub fn classify(args: &Args, probe: &impl PathProbe) -> Result<InputSpec> {
    let collected = if args.uses_flag_syntax() {
        debug!("Flag syntax in use, legacy positional parsing disabled");
        collect_flagged(args, probe)?
    } else {
        debug!("Legacy positional syntax: {:?}", args.args);
        collect_legacy(&args.args, probe)?
    };

    validate(&collected, probe)?;

    Ok(InputSpec {
        explicit_files: collected.files,
        directories: collected.directories,
        extensions: collected.extensions,
        include_hidden: args.hidden,
        output_mode: output_mode(args),
        fenced: args.fence,
        group_headers: args.group_headers,
        absolute_paths: args.absolute,
    })
}

fn output_mode(args: &Args) -> OutputMode {
    if args.list_only {
        OutputMode::ListOnly
    } else if args.with_line_numbers {
        OutputMode::ContentWithLineNumbers
    } else if args.with_paths {
        OutputMode::ContentWithPathComment
    } else {
        OutputMode::Content
    }
}

fn collect_flagged(args: &Args, probe: &impl PathProbe) -> Result<Collected> {
    let mut collected = Collected {
        files: args.explicit_files().map(PathBuf::from).collect(),
        extensions: ExtensionFilter::from_tokens(&args.extensions),
        ..Default::default()
    };
    for dir in &args.directories {
        collected.push_dir(PathBuf::from(dir));
    }

    // `pcat -d ./src js ts` still means extensions; anything else is stray.
    for token in &args.args {
        if !is_extension_shaped(token) || probe.exists(Path::new(token)) {
            bail!(
                ArgumentConflict,
                "positional argument '{}' cannot be combined with -d/-e/-f/-l; pass it with a flag",
                token
            );
        }
        collected.extensions.insert(token);
    }

    Ok(collected)
}

fn collect_legacy(tokens: &[String], probe: &impl PathProbe) -> Result<Collected> {
    let mut collected = Collected::default();

    for token in tokens {
        let path = Path::new(token);
        if probe.is_dir(path) {
            collected.push_dir(path.to_path_buf());
        } else if probe.is_file(path) {
            collected.files.push(path.to_path_buf());
        } else if is_extension_shaped(token) {
            collected.extensions.insert(token);
        } else {
            bail!(InvalidArgument, "path not found: {}", token);
        }
    }

    Ok(collected)
}

fn validate(collected: &Collected, probe: &impl PathProbe) -> Result<()> {
    for dir in &collected.directories {
        ensure!(
            probe.is_dir(dir),
            InvalidArgument,
            "directory not found or is not a directory: {}",
            dir.display()
        );
    }

    for file in &collected.files {
        ensure!(
            probe.is_file(file),
            InvalidArgument,
            "file not found or is not a file: {}",
            file.display()
        );
    }

    ensure!(
        !collected.directories.is_empty() || !collected.files.is_empty(),
        InvalidArgument,
        "no directories or files given; the first argument must be an existing directory (or use -d)"
    );

    Ok(())
}
