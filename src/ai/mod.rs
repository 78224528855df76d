//! Upstream provider integration for translation and image generation
//!
//! Provides interfaces to Google Cloud Translation (Hebrew to English) and the
//! Hugging Face inference API (text-to-image), plus mock implementations.

pub mod google;
pub mod huggingface;
pub mod mime;
pub mod mock;

pub use google::GoogleTranslateClient;
pub use huggingface::HuggingFaceImageClient;
pub use mock::{MockImageGenerationClient, MockTranslationClient};

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait TranslationService: Send + Sync {
    /// Translate Hebrew `text` to English.
    async fn translate(&self, text: &str) -> Result<String>;
}

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// Send `prompt` to the image model and return the raw image payload.
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>>;
}

/// Translate `text`, falling back to the original text on any failure.
///
/// Every translation error (missing key, transport, provider rejection) is
/// absorbed here and only logged, so a broken translation provider degrades
/// output quality instead of failing the request.
pub async fn translate_or_original(translator: &dyn TranslationService, text: &str) -> String {
    match translator.translate(text).await {
        Ok(translated) => {
            tracing::info!("Translated '{}' to '{}'", text, translated);
            translated
        }
        Err(e) => {
            tracing::warn!("Translation failed, using original text '{}': {}", text, e);
            text.to_string()
        }
    }
}
