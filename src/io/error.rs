//! Error types and context management for layout and collage operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all layout and collage operations
#[derive(Debug)]
pub enum CollageError {
    /// Caller-supplied input was rejected before any layout attempt
    InvalidInput {
        /// Name of the offending input
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Constrained search exhausted its attempt budget
    ///
    /// The caller may retry with a looser tolerance or fall back to an
    /// unconstrained layout.
    LayoutUnattainable {
        /// Number of trees generated and rejected
        attempts: usize,
        /// Requested canvas aspect ratio
        target: f64,
        /// Multiplicative tolerance around the target
        tolerance: f64,
    },

    /// A tile tree reached a stage it was not prepared for
    ///
    /// Only possible when tree generation broke its own invariants; never
    /// recovered from.
    InternalInconsistency {
        /// Stage that detected the problem
        operation: &'static str,
        /// Description of the broken invariant
        reason: String,
    },

    /// Failed to load source image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save the composited collage to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for CollageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid input '{parameter}' = '{value}': {reason}")
            }
            Self::LayoutUnattainable {
                attempts,
                target,
                tolerance,
            } => {
                write!(
                    f,
                    "No layout within aspect {:.4}..={:.4} (target {target}, tolerance {tolerance}) after {attempts} attempts",
                    target / tolerance,
                    target * tolerance
                )
            }
            Self::InternalInconsistency { operation, reason } => {
                write!(f, "Internal inconsistency in {operation}: {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for CollageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for collage results
pub type Result<T> = std::result::Result<T, CollageError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// File the failing operation was working on
    pub path: Option<PathBuf>,
    /// Search attempts consumed when the error occurred
    pub attempts: Option<usize>,
}

/// Enriches errors with the path or attempt count known only to the caller
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the path context
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<CollageError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            match &mut error {
                CollageError::ImageLoad { path, .. }
                | CollageError::ImageExport { path, .. }
                | CollageError::FileSystem { path, .. } => {
                    if let Some(known) = context.path {
                        *path = known;
                    }
                }
                CollageError::LayoutUnattainable { attempts, .. } => {
                    if let Some(used) = context.attempts {
                        *attempts = used;
                    }
                }
                _ => {}
            }
            error
        })
    }

    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.with_context(ErrorContext {
            path: Some(path.into()),
            ..Default::default()
        })
    }
}

impl From<image::ImageError> for CollageError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for CollageError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid input error
pub fn invalid_input(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> CollageError {
    CollageError::InvalidInput {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an internal inconsistency error
pub fn inconsistency(operation: &'static str, reason: &impl ToString) -> CollageError {
    CollageError::InternalInconsistency {
        operation,
        reason: reason.to_string(),
    }
}
