//! Error types for ccmeta
//!
//! Probing a real toolchain can fail in a handful of ways; these are the
//! typed errors for that surface. Resolution itself (in `ccmeta-core`)
//! is total and has no error type, and the emitter degrades probe
//! failures to the unknown-compiler branch unless told otherwise.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ccmeta operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ccmeta
#[derive(Error, Debug)]
pub enum Error {
    /// No C compiler could be located
    #[error("No C compiler found on PATH (set CCMETA_CC or CC to override): {source}")]
    CompilerNotFound {
        #[source]
        source: which::Error,
    },

    /// Running the compiler failed
    #[error("Failed to run {}: {source}", tool.display())]
    Exec {
        tool: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Compiler output carried no usable identity information
    #[error("Could not recognize the output of {}", tool.display())]
    UnrecognizedOutput { tool: PathBuf },

    /// Malformed flag string in the environment
    #[error("Invalid flags in {var}: {source}")]
    Flags {
        var: &'static str,
        #[source]
        source: shell_words::ParseError,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
