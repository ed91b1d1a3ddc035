//! Error types for caravan
//!
//! Structural errors (a malformed section taxonomy) are detected locally
//! and abort an operation before any write request is issued; transport
//! errors carry the HTTP status and whatever message the server provided.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for caravan
#[derive(Error, Debug)]
pub enum Error {
    // === Section Taxonomy Errors ===
    #[error("section list has no root section (depth 0)")]
    NoRootSection,

    #[error("section list has multiple root sections (depth 0): {0:?}")]
    MultipleRootSections(Vec<u64>),

    #[error("sections unreachable from the root (dangling or cyclic parent reference): {0:?}")]
    OrphanSection(Vec<u64>),

    #[error("section {0} not found")]
    MissingSection(u64),

    #[error("no section named '{0}' in this suite")]
    UnknownSectionName(String),

    #[error("parent chain for section {0} does not terminate at the root")]
    CycleDetected(u64),

    // === TestRail API Errors ===
    #[error("TestRail API returned HTTP {status} ({message})")]
    Transport { status: u16, message: String },

    #[error("unexpected TestRail response: {0}")]
    MalformedResponse(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // === Configuration Errors ===
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid configuration file: {0}")]
    ConfigParse(String),

    // === Results Report Errors ===
    #[error("invalid results report: {0}")]
    ReportParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a transport error from an HTTP status and message
    pub fn transport(status: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            status,
            message: message.into(),
        }
    }

    /// Create a file read error
    pub fn file_read(path: &std::path::Path, error: &io::Error) -> Self {
        Self::FileRead {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }
}
