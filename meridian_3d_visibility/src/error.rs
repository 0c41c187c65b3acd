//! Error types for the Meridian 3D visibility core
//!
//! The only operations that can fail hard in this crate are constructions
//! with degenerate preconditions (camera/frustum parameters). Everything
//! that can go wrong inside a per-frame walk resolves to empty output
//! instead of an error, so a single malformed object never aborts a frame.

use std::fmt;

/// Result type for Meridian 3D operations
pub type Result<T> = std::result::Result<T, Error>;

/// Meridian 3D visibility errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Camera or frustum constructed from degenerate parameters
    /// (zero/negative field of view or aspect ratio, near >= far)
    DegenerateCamera(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DegenerateCamera(msg) => write!(f, "Degenerate camera: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
