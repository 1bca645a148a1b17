//! # Store Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / serde_json::Error / ValidationError                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the file path                          │
//! │       │                                                                 │
//! │       ├── Load        → warn, continue with empty catalog               │
//! │       └── Persistence → edit reported as failed, nothing swallowed      │
//! │       ▼                                                                 │
//! │  ApiError (in aqua-desk) ← Serialized for the front end                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;
use thiserror::Error;

/// Catalog file errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The catalog file could not be read or parsed.
    ///
    /// ## When This Occurs
    /// - File does not exist yet (first run)
    /// - Not valid JSON, or records missing fields
    /// - Duplicate ids or an empty product name
    #[error("Could not load catalog from {path}: {reason}")]
    Load { path: String, reason: String },

    /// The catalog file could not be written.
    ///
    /// ## When This Occurs
    /// - Directory not writable
    /// - Disk full
    /// - Target path is a directory
    #[error("Could not save catalog to {path}: {reason}")]
    Persistence { path: String, reason: String },
}

impl StoreError {
    pub fn load(path: &Path, reason: impl ToString) -> Self {
        StoreError::Load {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn persistence(path: &Path, reason: impl ToString) -> Self {
        StoreError::Persistence {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    /// Load failures let the session continue on an empty catalog.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StoreError::Load { .. })
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
