//! Error types for the benchmark orchestrator

use std::path::PathBuf;

use thiserror::Error;

use crate::build::BuildPhase;
use crate::process::ProcessStatus;

/// Orchestrator errors
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("{phase} step failed ({status})")]
    Build {
        phase: BuildPhase,
        status: ProcessStatus,
    },

    #[error("`{command}` failed ({status})")]
    CommandFailed {
        command: String,
        status: ProcessStatus,
    },

    #[error("Executable not found while running `{command}`")]
    ToolMissing { command: String },

    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unexpected output from `{command}`: {output:?}")]
    UnexpectedOutput { command: String, output: String },

    #[error("Installed library not found at {}", .0.display())]
    LibraryMissing(PathBuf),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl BenchError {
    /// Process exit status for this failure.
    ///
    /// Subprocess failures report the child's own exit code; everything
    /// else (including a missing executable) exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Build { status, .. } | Self::CommandFailed { status, .. } => status.exit_code(),
            _ => 1,
        }
    }
}

/// Result type for orchestrator operations
pub type Result<T> = std::result::Result<T, BenchError>;
