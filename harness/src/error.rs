//! Typed harness errors.

use std::path::PathBuf;

use attest_kernel::error::MetadataError;
use thiserror::Error;

/// Failure reading a blueprint (`plutus.json`).
#[derive(Debug, Error)]
pub enum BlueprintError {
    #[error("failed to read blueprint {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("blueprint is not valid JSON")]
    Json(#[from] serde_json::Error),

    /// `validators` is missing or not an array.
    #[error("blueprint has no validators array")]
    MissingValidators,
}

/// Failure validating the source location of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("source URL {url:?} is not of the form scheme://host/path")]
    MalformedUrl { url: String },

    #[error("source URL {url:?} must name at least an owner and a repository")]
    MissingRepository { url: String },

    #[error("commit {commit:?} must be 40 or 64 hex characters")]
    InvalidCommit { commit: String },
}

/// Failure building a registry submission. Fatal for the submission.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("unknown compiler {name:?}")]
    UnknownCompiler { name: String },

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error("failed to read submission request {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("submission request is not valid JSON")]
    Json(#[from] serde_json::Error),
}
