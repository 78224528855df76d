//! Request orchestration: translate, build the prompt, generate and store the image.

use crate::ai::{
    translate_or_original, GoogleTranslateClient, HuggingFaceImageClient, ImageGenerationService,
    TranslationService,
};
use crate::image::{ImageProcessor, ImageService};
use crate::models::{generated_images_url_prefix, Config, GeneratedImage, OfferRequest};
use crate::{prompts, Result};
use tracing::{error, info};

/// Runs the offer-to-image pipeline. Holds no per-request state, so one
/// instance serves all concurrent requests.
pub struct App {
    translator: Box<dyn TranslationService>,
    image_gen: Box<dyn ImageGenerationService>,
    image: Box<dyn ImageService>,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub translator: Box<dyn TranslationService>,
    pub image_gen: Box<dyn ImageGenerationService>,
    pub image: Box<dyn ImageService>,
}

impl App {
    /// Build an app from concrete service dependencies.
    pub fn with_services(services: AppServices) -> Self {
        Self {
            translator: services.translator,
            image_gen: services.image_gen,
            image: services.image,
        }
    }

    /// Construct the production app from an already loaded [`Config`].
    pub fn from_config(config: &Config) -> Self {
        // Reuse one HTTP connection pool across provider clients.
        let http_client = reqwest::Client::new();

        let translator = GoogleTranslateClient::new_with_client(
            config.google_translate_api_key.clone(),
            config.translate_api_url.clone(),
            http_client.clone(),
        );
        let image_gen = HuggingFaceImageClient::new_with_client(
            config.hugging_face_api_token.clone(),
            config.image_model_url.clone(),
            config.image_timeout,
            http_client,
        );
        let image = ImageProcessor::new(
            &config.generated_images_dir(),
            &generated_images_url_prefix(),
        );

        Self::with_services(AppServices {
            translator: Box::new(translator),
            image_gen: Box::new(image_gen),
            image: Box::new(image),
        })
    }

    /// Run the full pipeline for one offer.
    ///
    /// Translation never fails the request. Errors from image generation or
    /// storage are returned as-is; [`crate::Error::is_upstream`] tells the
    /// caller which of them are provider outages.
    pub async fn generate(&self, request: &OfferRequest) -> Result<GeneratedImage> {
        info!(
            "Received request for product: '{}' with offer: '{}'",
            request.product, request.offer
        );

        let product = translate_or_original(self.translator.as_ref(), &request.product).await;
        let offer = translate_or_original(self.translator.as_ref(), &request.offer).await;

        let prompt = prompts::build_prompt(&product, &offer);
        info!("Generated final prompt: {}", prompt);

        self.request_image(&prompt).await
    }

    /// Generate an image for `prompt` and persist it.
    pub async fn request_image(&self, prompt: &str) -> Result<GeneratedImage> {
        let image_data = self.image_gen.generate_image(prompt).await.map_err(|e| {
            error!("Image generation failed: {}", e);
            e
        })?;
        info!("Generated image ({} bytes)", image_data.len());

        let image = self.image.save_image(&image_data).await?;
        info!("Image available at {}", image.relative_path);
        Ok(image)
    }
}
