use thiserror::Error;

/// qrsmith error types
#[derive(Error, Debug)]
pub enum Error {
    /// The request cannot be rendered as given (empty message, bad width,
    /// message too long for the correction level)
    #[error("Invalid input: {0}")]
    Input(String),

    /// The rendering backend cannot produce the requested output
    #[error("Encoding failed: {0}")]
    Encoding(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Render job cancelled before it started")]
    Cancelled,

    #[error("Render queue error: {0}")]
    Queue(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to serialize/deserialize: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// True for errors caused by the caller's input rather than the backend
    pub fn is_input(&self) -> bool {
        matches!(self, Error::Input(_))
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => Error::Io(e),
            other => Error::Encoding(other.to_string()),
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Error::Encoding(format!("PDF generation failed: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
