use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias used throughout the library.
pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Debug, Error)]
/// Errors that can stop a conversion run.
///
/// The variants follow the three failure classes a run can hit:
///
/// * `Config` - an input could not be opened or read, the output could not be created,
///   or the input is in a format the tool does not accept (e.g. gzip compressed).
/// * `MalformedRecord` - the FASTA input violates the header layout or has sequence data
///   before its first header. The 1-based line number of the offending line is reported.
/// * `Io` - a read or write failed in the middle of the pass.
pub enum ConvertError {
    #[error("Cannot use file {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed FASTA record at line {line}: {msg}")]
    MalformedRecord { line: usize, msg: String },

    #[error("I/O error during conversion: {0}")]
    Io(#[from] io::Error),
}

impl ConvertError {
    /// Builds a [ConvertError::Config] for the file at `path`.
    pub fn config<P: Into<PathBuf>>(path: P, source: io::Error) -> ConvertError {
        ConvertError::Config {
            path: path.into(),
            source,
        }
    }

    /// Builds a [ConvertError::MalformedRecord] for the given 1-based line.
    pub fn malformed<S: Into<String>>(line: usize, msg: S) -> ConvertError {
        ConvertError::MalformedRecord {
            line,
            msg: msg.into(),
        }
    }

    /// The process exit status that reports this error.
    ///
    /// * `2` for configuration errors (the same status clap uses for bad command lines)
    /// * `3` for malformed input
    /// * `1` for anything else
    pub fn exit_code(&self) -> i32 {
        match self {
            ConvertError::Config { .. } => 2,
            ConvertError::MalformedRecord { .. } => 3,
            ConvertError::Io(_) => 1,
        }
    }

    /// A short, human readable name for the error class.
    pub fn category(&self) -> &'static str {
        match self {
            ConvertError::Config { .. } => "configuration error",
            ConvertError::MalformedRecord { .. } => "malformed input",
            ConvertError::Io(_) => "unexpected I/O error",
        }
    }
}
