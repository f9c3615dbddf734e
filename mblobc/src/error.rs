use thiserror::Error;

/// Code-generation and packaging errors. All are fatal to the current
/// build or pack call; no partial artifact is ever produced.
#[derive(Debug, Error)]
pub enum Error {
    /// No backend build function is registered for the target.
    #[error("Target {0} is not enabled")]
    UnknownTarget(String),

    /// A module nests imports more than two levels deep.
    #[error("Import hierarchy too deep at module `{0}`: only two levels of imports are supported")]
    HierarchyTooDeep(String),

    /// A backend build function reported failure.
    #[error("Backend failure: {0}")]
    Backend(String),

    /// A module serializer or blob-format operation failed.
    #[error("Module error: {0}")]
    Module(#[from] mblob_module::Error),

    /// File output error.
    #[error("I/O error: {0}")]
    IOError(#[from] std::io::Error),
}
