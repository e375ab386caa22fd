//! Global error handling for pcat
//!
//! Fatal errors (`ArgumentConflict`, `InvalidArgument`, `Io`) abort the run
//! before any output is produced. `ScanSkip` is the only non-fatal kind and
//! is swallowed where it occurs.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Global error type for pcat operations
#[derive(Error, Debug)]
pub enum PcatError {
    /// Legacy positional syntax mixed with flag-based syntax
    #[error("conflicting arguments: {0}")]
    ArgumentConflict(String),

    /// A named file or directory does not exist or has the wrong kind
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An entry that could not be read and was left out
    #[error("skipped {}: {reason}", .path.display())]
    ScanSkip {
        /// Entry that was skipped
        path: PathBuf,
        /// Why it was skipped
        reason: String,
    },

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl PcatError {
    /// Create a skip error for `path`
    pub fn skip(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::ScanSkip {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error is non-fatal
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::ScanSkip { .. })
    }

    /// Process exit status for a fatal error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => 1,
            Self::ArgumentConflict(_) => 2,
            Self::Io(_) => 74,
            Self::ScanSkip { .. } => 0,
        }
    }
}

// Allow converting PcatError to io::Error for tests returning io::Result
impl From<PcatError> for io::Error {
    fn from(err: PcatError) -> Self {
        match err {
            PcatError::Io(e) => e,
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}

/// Specialized Result type for pcat operations
pub type Result<T> = std::result::Result<T, PcatError>;

/// Creates a PcatError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::PcatError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conflict() -> Result<()> {
        bail!(ArgumentConflict, "stray argument '{}'", "./extra");
    }

    fn checked(ok: bool) -> Result<()> {
        ensure!(ok, InvalidArgument, "file not found: {}", "a.py");
        Ok(())
    }

    #[test]
    fn test_macros_build_variants() {
        let err = conflict().unwrap_err();
        assert!(matches!(err, PcatError::ArgumentConflict(ref m) if m.contains("./extra")));
        assert_eq!(err.exit_code(), 2);

        assert!(checked(true).is_ok());
        let err = checked(false).unwrap_err();
        assert_eq!(err.to_string(), "invalid argument: file not found: a.py");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_skip_is_not_fatal() {
        let err = PcatError::skip("src/bin.dat", "stream did not contain valid UTF-8");
        assert!(err.is_skip());
        assert_eq!(
            err.to_string(),
            "skipped src/bin.dat: stream did not contain valid UTF-8"
        );

        let io = PcatError::from(io::Error::new(io::ErrorKind::Other, "boom"));
        assert!(!io.is_skip());
        assert_eq!(io.exit_code(), 74);
    }
}
