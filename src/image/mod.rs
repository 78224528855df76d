//! Image persistence
//!
//! Decodes the payload returned by the image model, re-encodes it as JPEG and
//! stores it under a random filename inside the static directory.

pub mod mock;
pub mod processor;

pub use mock::MockImageProcessor;
pub use processor::ImageProcessor;

use crate::models::GeneratedImage;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ImageService: Send + Sync {
    async fn save_image(&self, image_data: &[u8]) -> Result<GeneratedImage>;
}
