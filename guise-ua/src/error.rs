//! Error types for the user-agent pool and the crates built on top of it.

use std::fmt;

/// Alias for a type-erased error type.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type returned by fallible [`UserAgentPool`] operations.
///
/// [`UserAgentPool`]: crate::UserAgentPool
pub type Result<T> = std::result::Result<T, Error>;

/// Error returned when configuring, initializing or sampling a [`UserAgentPool`].
///
/// Use [`Error::kind`] or one of the `is_*` predicates to find out what went wrong.
///
/// [`UserAgentPool`]: crate::UserAgentPool
pub struct Error {
    kind: ErrorKind,
}

#[derive(Debug)]
/// The kind of [`Error`].
pub enum ErrorKind {
    /// The filter criteria or other configuration cannot be used.
    Configuration(String),
    /// An operation that requires a completed `initialize` was invoked first.
    NotInitialized,
    /// Filtering left zero eligible user-agent records.
    EmptyPool,
    /// The corpus source failed to deliver the raw corpus.
    SourceFetch(BoxError),
}

impl Error {
    /// Create a configuration [`Error`] with the given reason.
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Configuration(reason.into()),
        }
    }

    /// Create an [`Error`] for an operation invoked before initialization.
    #[must_use]
    pub fn not_initialized() -> Self {
        Self {
            kind: ErrorKind::NotInitialized,
        }
    }

    /// Create an [`Error`] for a filtered corpus without records.
    #[must_use]
    pub fn empty_pool() -> Self {
        Self {
            kind: ErrorKind::EmptyPool,
        }
    }

    /// Create an [`Error`] wrapping a failure of the corpus source.
    pub fn source_fetch(err: impl Into<BoxError>) -> Self {
        Self {
            kind: ErrorKind::SourceFetch(err.into()),
        }
    }

    /// Returns the [`ErrorKind`] of this [`Error`].
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Consume the [`Error`] and return its [`ErrorKind`].
    #[must_use]
    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self.kind, ErrorKind::Configuration(_))
    }

    /// Returns true if the operation was invoked before initialization.
    #[must_use]
    pub fn is_not_initialized(&self) -> bool {
        matches!(self.kind, ErrorKind::NotInitialized)
    }

    /// Returns true if filtering left no eligible records.
    #[must_use]
    pub fn is_empty_pool(&self) -> bool {
        matches!(self.kind, ErrorKind::EmptyPool)
    }

    /// Returns true if the corpus source failed.
    #[must_use]
    pub fn is_source_fetch(&self) -> bool {
        matches!(self.kind, ErrorKind::SourceFetch(_))
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("guise_ua::Error").field(&self.kind).finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Configuration(reason) => write!(f, "invalid configuration: {reason}"),
            ErrorKind::NotInitialized => {
                write!(f, "user agent pool used before it was initialized")
            }
            ErrorKind::EmptyPool => write!(f, "no user agent matches the filter criteria"),
            ErrorKind::SourceFetch(err) => write!(f, "failed to fetch user agent corpus: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::SourceFetch(err) => Some(err.as_ref()),
            ErrorKind::Configuration(_) | ErrorKind::NotInitialized | ErrorKind::EmptyPool => {
                None
            }
        }
    }
}
