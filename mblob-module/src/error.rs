use thiserror::Error;

/// Module blob (de)serialization errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error")]
    IOError(#[from] std::io::Error),
    #[error("Module type key is not valid utf-8")]
    InvalidTypeKey(#[source] std::string::FromUtf8Error),
    #[error("No loader registered for module type `{0}`")]
    UnknownTypeKey(String),
    #[error("Module serializer failed: {0}")]
    Serialization(String),
}
