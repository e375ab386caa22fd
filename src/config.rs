/*!
 * Configuration handling for pcat
 */

use std::io::{self, Write};

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use log::LevelFilter;

/// Command-line arguments for pcat
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    name = "pcat",
    version = env!("CARGO_PKG_VERSION"),
    about = "Concatenate files from specified directories or a list of files",
    long_about = "Concatenates source files from directories (filtered by extension) and explicit file lists into one deterministic stream, for feeding code to an LLM.",
    after_help = "Examples:\n  \
        pcat -d ./src -d ./lib js ts   # Preferred: scan directories for extensions\n  \
        pcat ./src ./lib js ts         # Legacy: scan directories for extensions\n  \
        pcat -l ./a.py ./b.sh          # Concatenate a list of files\n  \
        pcat -d ./src -e js -f ./c.rs -p\n  \
        pcat -d ./src any --hidden     # Include hidden files (dotfiles)\n  \
        pcat -d ./src py -n            # Print python files with line numbers"
)]
pub struct Args {
    /// A directory to scan (repeatable)
    #[clap(short = 'd', long = "directory", value_name = "DIR")]
    pub directories: Vec<String>,

    /// Extensions to include when scanning, or 'any' (repeatable, comma-separated)
    #[clap(short = 'e', long = "ext", value_name = "EXT", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// A specific file to include (repeatable)
    #[clap(short = 'f', long = "file", value_name = "FILE")]
    pub files: Vec<String>,

    /// A list of specific files to include
    #[clap(short = 'l', long = "list", value_name = "FILE", num_args = 1..)]
    pub list: Vec<String>,

    /// Prefix every line with its line number
    #[clap(short = 'n', long = "with-line-numbers", conflicts_with = "with_paths")]
    pub with_line_numbers: bool,

    /// Start each file with a comment line naming its path
    #[clap(short = 'p', long = "with-paths")]
    pub with_paths: bool,

    /// Only print the paths that would be included
    #[clap(
        long = "list-only",
        conflicts_with_all = ["with_line_numbers", "with_paths", "fence"]
    )]
    pub list_only: bool,

    /// Include hidden files and directories (those starting with a dot)
    #[clap(long)]
    pub hidden: bool,

    /// Wrap each file in a Markdown code fence
    #[clap(long)]
    pub fence: bool,

    /// Print a header before each directory group and the listed files
    #[clap(long = "group-headers")]
    pub group_headers: bool,

    /// Print canonical absolute paths
    #[clap(long)]
    pub absolute: bool,

    /// More diagnostics on stderr (-v info, -vv debug, -vvv trace)
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// No diagnostics on stderr
    #[clap(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum, value_name = "SHELL")]
    pub generate: Option<Shell>,

    /// Legacy form: directories, then extensions. With flags: extensions only.
    #[clap(value_name = "ARG")]
    pub args: Vec<String>,
}

impl Args {
    /// Whether any of the flag-based input styles is used
    pub fn uses_flag_syntax(&self) -> bool {
        !self.directories.is_empty()
            || !self.extensions.is_empty()
            || !self.files.is_empty()
            || !self.list.is_empty()
    }

    /// Whether no input at all was given
    pub fn has_no_input(&self) -> bool {
        !self.uses_flag_syntax() && self.args.is_empty()
    }

    /// Explicit files from `-f` followed by `-l`
    pub fn explicit_files(&self) -> impl Iterator<Item = &String> {
        self.files.iter().chain(self.list.iter())
    }

    /// Log level selected by -q / -v
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Off;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Write completions for `shell` to `out`
pub fn write_completions<W: Write>(shell: Shell, out: &mut W) -> io::Result<()> {
    let mut command = Args::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, out);
    out.flush()
}

/// Print help to stderr
pub fn print_help() -> io::Result<()> {
    let help = Args::command().render_help();
    write!(io::stderr(), "{}", help)
}
