use super::ImageService;
use crate::models::GeneratedImage;
use crate::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Image store that records calls without touching the filesystem.
#[derive(Clone)]
pub struct MockImageProcessor {
    save_count: Arc<Mutex<usize>>,
    base_path: String,
    url_prefix: String,
    should_fail: Arc<Mutex<bool>>,
}

impl MockImageProcessor {
    pub fn new() -> Self {
        Self {
            save_count: Arc::new(Mutex::new(0)),
            base_path: "/tmp".to_string(),
            url_prefix: "/static/generated_images".to_string(),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_save_count(&self) -> usize {
        *self.save_count.lock().unwrap()
    }
}

impl Default for MockImageProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageService for MockImageProcessor {
    async fn save_image(&self, _image_data: &[u8]) -> Result<GeneratedImage> {
        if *self.should_fail.lock().unwrap() {
            return Err(crate::Error::Io(std::io::Error::other("Mock failure")));
        }

        *self.save_count.lock().unwrap() += 1;

        let filename = format!("{}.jpg", Uuid::new_v4());
        Ok(GeneratedImage {
            file_path: PathBuf::from(&self.base_path).join(&filename),
            relative_path: format!("{}/{}", self.url_prefix, filename),
        })
    }
}
