//! Data models and structures
//!
//! Defines the request/response payloads of the HTTP API, the reference to a
//! generated image, and the process configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_IMAGE_MODEL_URL: &str =
    "https://api-inference.huggingface.co/models/black-forest-labs/FLUX.1-schnell";
pub const DEFAULT_TRANSLATE_API_URL: &str =
    "https://translation.googleapis.com/language/translate/v2";
pub const DEFAULT_IMAGE_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Subdirectory of the static root holding generated images.
pub const GENERATED_IMAGES_DIR: &str = "generated_images";

/// URL prefix the static root is mounted under.
pub const STATIC_URL_PREFIX: &str = "/static";

const TOKEN_PLACEHOLDER: &str = "your_hugging_face_token_here";

/// Incoming request body for `POST /api/generate-image`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferRequest {
    pub product: String,
    pub offer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateImageResponse {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// A persisted image: where it lives on disk and the path clients fetch it by.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    pub file_path: PathBuf,
    pub relative_path: String,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub hugging_face_api_token: Option<String>,
    pub google_translate_api_key: Option<String>,
    pub image_model_url: String,
    pub translate_api_url: String,
    pub image_timeout: Duration,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_vars<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let image_timeout = match var("IMAGE_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                crate::Error::Configuration(format!(
                    "IMAGE_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    raw
                ))
            })?,
            None => DEFAULT_IMAGE_TIMEOUT_SECS,
        };

        Ok(Self {
            hugging_face_api_token: var("HUGGING_FACE_API_TOKEN")
                .filter(|token| token != TOKEN_PLACEHOLDER),
            google_translate_api_key: var("GOOGLE_TRANSLATE_API_KEY"),
            image_model_url: var("IMAGE_MODEL_URL")
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL_URL.to_string()),
            translate_api_url: var("TRANSLATE_API_URL")
                .unwrap_or_else(|| DEFAULT_TRANSLATE_API_URL.to_string()),
            image_timeout: Duration::from_secs(image_timeout),
            static_dir: PathBuf::from(
                var("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
            ),
        })
    }

    pub fn generated_images_dir(&self) -> PathBuf {
        generated_images_dir(&self.static_dir)
    }
}

pub fn generated_images_dir(static_dir: &Path) -> PathBuf {
    static_dir.join(GENERATED_IMAGES_DIR)
}

/// URL prefix under which generated images are served.
pub fn generated_images_url_prefix() -> String {
    format!("{}/{}", STATIC_URL_PREFIX, GENERATED_IMAGES_DIR)
}
