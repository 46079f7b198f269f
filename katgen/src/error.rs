//! Error types for table generation
//!
//! Configuration problems (an unsupported rounds value, a reference hasher
//! refusing its input, a library under test that cannot be loaded) abort the
//! run immediately. Unexplained collisions are collected by the assembler and
//! surface together as [`KatError::Collisions`] once generation is complete.

use crate::collision::UnexpectedCollision;
use crate::registry::MethodId;

/// Result type for generation operations
pub type KatResult<T> = Result<T, KatError>;

/// Error types for generation operations
#[derive(Debug)]
pub enum KatError {
    /// A shim was handed a rounds value it has no encoding for
    UnsupportedRounds { method: MethodId, rounds: u32 },
    /// A method name did not match any registry entry
    UnknownMethod(String),
    /// A reference hasher rejected the phrase or parameters
    Reference { method: MethodId, message: String },
    /// The library under test could not be loaded or lacks its entry point
    LibraryLoad(String),
    /// The library under test failed to hash a phrase
    LibraryCall { setting: String, message: String },
    /// A phrase cannot be passed across the C ABI
    InvalidPhrase(String),
    /// The corpus contains collisions no known quirk explains
    Collisions(Vec<UnexpectedCollision>),
    /// Regenerated table differs from the one on disk
    Mismatch(String),
    /// Command-line usage error
    Usage(String),
    /// The worker pool could not be started
    ThreadPool(String),
    /// Reading or writing a file failed
    Io(std::io::Error),
    /// Writing the JSON report failed
    Json(serde_json::Error),
}

impl KatError {
    pub(crate) fn reference(method: MethodId, err: impl std::fmt::Display) -> Self {
        KatError::Reference {
            method,
            message: err.to_string(),
        }
    }

    /// Whether this error should abort generation before any output exists.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            KatError::UnsupportedRounds { .. }
                | KatError::UnknownMethod(_)
                | KatError::Reference { .. }
                | KatError::LibraryLoad(_)
                | KatError::LibraryCall { .. }
                | KatError::InvalidPhrase(_)
        )
    }
}

impl std::fmt::Display for KatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KatError::UnsupportedRounds { method, rounds } => {
                write!(f, "{}: don't know how to encode rounds={}", method, rounds)
            }
            KatError::UnknownMethod(name) => write!(f, "Unknown hashing method: {}", name),
            KatError::Reference { method, message } => {
                write!(f, "{}: reference hasher failed: {}", method, message)
            }
            KatError::LibraryLoad(msg) => write!(f, "Cannot load library under test: {}", msg),
            KatError::LibraryCall { setting, message } => {
                write!(f, "crypt_ra failed for setting {:?}: {}", setting, message)
            }
            KatError::InvalidPhrase(msg) => write!(f, "Invalid phrase: {}", msg),
            KatError::Collisions(list) => {
                write!(f, "{} unexpected hash collision(s)", list.len())
            }
            KatError::Mismatch(msg) => write!(f, "Generated table differs: {}", msg),
            KatError::Usage(msg) => write!(f, "{}", msg),
            KatError::ThreadPool(msg) => write!(f, "Cannot start worker pool: {}", msg),
            KatError::Io(e) => write!(f, "I/O error: {}", e),
            KatError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for KatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KatError::Io(e) => Some(e),
            KatError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for KatError {
    fn from(err: std::io::Error) -> Self {
        KatError::Io(err)
    }
}

impl From<serde_json::Error> for KatError {
    fn from(err: serde_json::Error) -> Self {
        KatError::Json(err)
    }
}

impl From<libloading::Error> for KatError {
    fn from(err: libloading::Error) -> Self {
        KatError::LibraryLoad(err.to_string())
    }
}
