use super::{ImageGenerationService, TranslationService};
use crate::{Error, Result};
use async_trait::async_trait;
use image::{ImageFormat, RgbImage};
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockTranslationClient {
    translations: Arc<Mutex<HashMap<String, String>>>,
    should_fail: Arc<Mutex<bool>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockTranslationClient {
    pub fn new() -> Self {
        Self {
            translations: Arc::new(Mutex::new(HashMap::new())),
            should_fail: Arc::new(Mutex::new(false)),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_translation(self, source: &str, translated: &str) -> Self {
        self.translations
            .lock()
            .unwrap()
            .insert(source.to_string(), translated.to_string());
        self
    }

    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockTranslationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranslationService for MockTranslationClient {
    async fn translate(&self, text: &str) -> Result<String> {
        *self.call_count.lock().unwrap() += 1;

        if *self.should_fail.lock().unwrap() {
            return Err(Error::Translation("Mock translation failure".to_string()));
        }

        // Unknown inputs pass through untouched
        Ok(self
            .translations
            .lock()
            .unwrap()
            .get(text)
            .cloned()
            .unwrap_or_else(|| text.to_string()))
    }
}

#[derive(Clone)]
pub struct MockImageGenerationClient {
    image_responses: Arc<Mutex<Vec<Vec<u8>>>>,
    error_status: Arc<Mutex<Option<(u16, String)>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockImageGenerationClient {
    pub fn new() -> Self {
        Self {
            image_responses: Arc::new(Mutex::new(Vec::new())),
            error_status: Arc::new(Mutex::new(None)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_image_response(self, response: Vec<u8>) -> Self {
        self.image_responses.lock().unwrap().push(response);
        self
    }

    /// Answer every call as if the provider returned `status` with `body`.
    pub fn with_error_status(self, status: u16, body: &str) -> Self {
        *self.error_status.lock().unwrap() = Some((status, body.to_string()));
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Prompts received so far, in call order.
    pub fn get_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockImageGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageGenerationClient {
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>> {
        let count = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt.to_string());
            prompts.len()
        };

        if let Some((status, body)) = self.error_status.lock().unwrap().clone() {
            return Err(Error::ImageProvider { status, body });
        }

        let responses = self.image_responses.lock().unwrap();
        if responses.is_empty() {
            // Default to a real 1x1 JPEG so downstream decoding succeeds
            let mut bytes = Vec::new();
            RgbImage::new(1, 1).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)?;
            Ok(bytes)
        } else {
            let index = (count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}
