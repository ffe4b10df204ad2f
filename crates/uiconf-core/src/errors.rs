//! Error types for UI component configuration.

use thiserror::Error;

/// Top-level error type returned by the preparation pipeline.
#[derive(Debug, Error)]
pub enum UiConfigError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Build(BuildError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Override(#[from] OverrideError),

    #[error(transparent)]
    Evaluate(#[from] EvaluateError),

    #[error(transparent)]
    Prepare(#[from] PrepareError),
}

/// Errors raised by a descriptor source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("No component declaration found for surface '{surface}'")]
    SurfaceNotFound { surface: String },

    #[error("Invalid surface name '{surface}'")]
    InvalidSurfaceName { surface: String },

    #[error("Malformed descriptor in {location}: {reason}")]
    Malformed { location: String, reason: String },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Descriptor source failed: {reason}")]
    Other { reason: String },
}

/// Errors while assembling a component pool.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Surface '{surface}' declares no root component")]
    EmptyDescriptor { surface: String },

    #[error("Duplicate component instance name '{name}'")]
    DuplicateInstanceName { name: String },

    #[error("Component pool already has root '{existing}', cannot add '{rejected}'")]
    MultipleRoots { existing: String, rejected: String },

    #[error("Parent node #{parent} does not exist")]
    UnknownParent { parent: usize },
}

/// Errors raised by a cache store.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("I/O error on cache entry '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode cache payload for '{surface}': {reason}")]
    Encode { surface: String, reason: String },

    #[error("Cache store failed: {reason}")]
    Other { reason: String },
}

/// Errors raised by an override store.
#[derive(Debug, Error)]
pub enum OverrideError {
    #[error("Override set for domain '{domain}' is malformed: {reason}")]
    Malformed { domain: String, reason: String },

    #[error("Override store failed: {reason}")]
    Other { reason: String },
}

/// Errors raised by an expression evaluator.
#[derive(Debug, Error)]
pub enum EvaluateError {
    #[error("Undefined token: ${path}")]
    UndefinedToken { path: String },

    #[error("Cannot evaluate argument: {reason}")]
    Invalid { reason: String },
}

/// Misuse of the preparation entry point.
#[derive(Debug, Error)]
pub enum PrepareError {
    #[error("Initialization error component: surface name must not be empty")]
    EmptySurfaceName,

    #[error(
        "Initialization error component '{surface}': already prepared, check the spelling \
         of the name or the correctness of the call"
    )]
    DuplicatePreparation { surface: String },
}

/// Source failures met while building are reported the same way as those met
/// while reading, as [`UiConfigError::Source`].
impl From<BuildError> for UiConfigError {
    fn from(err: BuildError) -> Self {
        match err {
            BuildError::Source(source) => UiConfigError::Source(source),
            other => UiConfigError::Build(other),
        }
    }
}

impl UiConfigError {
    /// Whether this error reports a programming mistake rather than a
    /// collaborator failure.
    pub fn is_usage_error(&self) -> bool {
        matches!(self, UiConfigError::Prepare(_))
    }
}
