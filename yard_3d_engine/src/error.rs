//! Error types for the Yard3D engine
//!
//! This module defines the error types used throughout the engine,
//! including resource caching, configuration, and scene management.

use std::fmt;

/// Result type for Yard3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Yard3D engine errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid resource (a geometry or material factory failed)
    InvalidResource(String),

    /// Invalid configuration (malformed camera path, bad config file)
    InvalidConfig(String),

    /// A scene node was registered in the culling registry twice
    DuplicateRegistration(String),

    /// Unknown node key or illegal scene graph operation
    InvalidNode(String),

    /// Initialization failed (host surface, context setup)
    InitializationFailed(String),

    /// File system error
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::DuplicateRegistration(msg) => write!(f, "Duplicate registration: {}", msg),
            Error::InvalidNode(msg) => write!(f, "Invalid node: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

// ===== ERROR MACROS =====

/// Log an error and build the named `Error` variant from a formatted message.
///
/// # Example
///
/// ```ignore
/// let err = engine_err!("yard3d::Scene", InvalidNode, "Unknown node {:?}", key);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $variant:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::yard3d::Error::$variant(message)
    }};
}

/// Log an error and return it from the current function.
///
/// # Example
///
/// ```ignore
/// engine_bail!("yard3d::CullingRegistry", DuplicateRegistration,
///     "Node {:?} is already registered", key);
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $variant:ident, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $variant, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
