use crate::ai::{mime, ImageGenerationService};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

/// Text-to-image client for a Hugging Face inference endpoint.
///
/// The endpoint answers a JSON `{"inputs": prompt}` POST with the raw image
/// bytes. The timeout is generous because a cold model can take well over a
/// minute to load.
pub struct HuggingFaceImageClient {
    client: Client,
    api_token: Option<String>,
    model_url: String,
    timeout: Duration,
}

impl HuggingFaceImageClient {
    pub fn new(api_token: Option<String>, model_url: String, timeout: Duration) -> Self {
        Self::new_with_client(api_token, model_url, timeout, Client::new())
    }

    pub fn new_with_client(
        api_token: Option<String>,
        model_url: String,
        timeout: Duration,
        client: Client,
    ) -> Self {
        Self {
            client,
            api_token,
            model_url,
            timeout,
        }
    }
}

#[async_trait]
impl ImageGenerationService for HuggingFaceImageClient {
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>> {
        let Some(api_token) = self.api_token.as_deref() else {
            tracing::error!("HUGGING_FACE_API_TOKEN is not set, skipping image request");
            return Err(Error::Configuration(
                "HUGGING_FACE_API_TOKEN is not set".to_string(),
            ));
        };

        tracing::info!("Sending request to image model at {}", self.model_url);

        let response = self
            .client
            .post(&self.model_url)
            .timeout(self.timeout)
            .bearer_auth(api_token)
            .json(&InferenceRequest { inputs: prompt })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Hugging Face: {}", e);
                e
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await?;
            tracing::error!("Hugging Face API error (status {}): {}", status, body);
            return Err(Error::ImageProvider {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?.to_vec();
        tracing::debug!(
            "Image model returned {} bytes ({})",
            bytes.len(),
            mime::detect_image_mime(&bytes).unwrap_or("unknown format")
        );

        Ok(bytes)
    }
}
