//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Translation error: {0}")]
    Translation(String),

    #[error("Image provider error (status {status}): {body}")]
    ImageProvider { status: u16, body: String },

    #[error("Invariant violation: {0}")]
    Invariant(String),
}

impl Error {
    /// True when the failure belongs to the image provider or its credential,
    /// i.e. the caller should see "service unavailable" rather than an
    /// internal error.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Error::Configuration(_) | Error::ImageProvider { .. } | Error::Http(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_classification() {
        assert!(Error::Configuration("HUGGING_FACE_API_TOKEN not set".to_string()).is_upstream());
        assert!(Error::ImageProvider {
            status: 500,
            body: "boom".to_string()
        }
        .is_upstream());

        assert!(!Error::Invariant("join".to_string()).is_upstream());
        assert!(!Error::Io(std::io::Error::other("disk full")).is_upstream());
    }

    #[test]
    fn test_image_provider_message_carries_status_and_body() {
        let err = Error::ImageProvider {
            status: 503,
            body: "model is loading".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("503"));
        assert!(message.contains("model is loading"));
    }
}
