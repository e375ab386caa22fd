/*!
 * pcat - Concatenate source files into one stream for LLM context
 *
 * This library reconciles explicit files, scanned directories and the
 * legacy positional syntax into one ordered, de-duplicated file set and
 * renders it as plain, line-numbered, path-commented or list-only output.
 */

pub mod aggregator;
pub mod classifier;
pub mod config;
pub mod error;
pub mod renderer;
pub mod resolver;
pub mod scanner;
pub mod types;
pub mod utils;


// Re-export main components for easier access
pub use aggregator::{Aggregator, RunSummary};
pub use classifier::{classify, FsProbe, PathProbe};
pub use config::Args;
pub use error::{PcatError, Result};
pub use renderer::ContentRenderer;
pub use resolver::{resolve, InputResolver};
pub use scanner::{DirectoryScanner, ScannerStatistics};
pub use types::{ExtensionFilter, InputSpec, OutputMode, RenderedBlock, ResolvedEntry};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
