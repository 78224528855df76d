use super::types::{TranslateRequest, TranslateResponse};
use crate::ai::TranslationService;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Cloud Translation v2 still uses the legacy `iw` code for Hebrew.
const SOURCE_LANGUAGE: &str = "iw";
const TARGET_LANGUAGE: &str = "en";

/// Google Cloud Translation (v2 REST) client, Hebrew to English.
pub struct GoogleTranslateClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl GoogleTranslateClient {
    pub fn new(api_key: Option<String>, base_url: String) -> Self {
        Self::new_with_client(api_key, base_url, Client::new())
    }

    pub fn new_with_client(api_key: Option<String>, base_url: String, client: Client) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }
}

#[async_trait]
impl TranslationService for GoogleTranslateClient {
    async fn translate(&self, text: &str) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            Error::Configuration("GOOGLE_TRANSLATE_API_KEY is not set".to_string())
        })?;

        let request = TranslateRequest {
            q: text,
            source: SOURCE_LANGUAGE,
            target: TARGET_LANGUAGE,
            format: "text",
        };

        let response = self
            .client
            .post(&self.base_url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Google Translate: {}", e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(Error::Translation(format!(
                "Google Translate API error (status {}): {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        let parsed: TranslateResponse = serde_json::from_str(&body).map_err(|e| {
            Error::Translation(format!("Failed to parse Google Translate response: {}", e))
        })?;

        parsed
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or_else(|| Error::Translation("No translations in response".to_string()))
    }
}
