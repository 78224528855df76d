use super::ImageService;
use crate::ai::mime;
use crate::models::GeneratedImage;
use crate::{Error, Result};
use async_trait::async_trait;
use image::{DynamicImage, ImageFormat};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct ImageProcessor {
    output_dir: PathBuf,
    url_prefix: String,
}

impl ImageProcessor {
    /// `output_dir` is where files are written; `url_prefix` is the public
    /// path that directory is served under (e.g. `/static/generated_images`).
    pub fn new(output_dir: &Path, url_prefix: &str) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
        }
    }

    fn save_jpeg_sync(image_data: Vec<u8>, jpeg_path: PathBuf) -> Result<()> {
        let img = image::load_from_memory(&image_data)?;
        // JPEG has no alpha channel
        let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
        rgb.save_with_format(jpeg_path, ImageFormat::Jpeg)?;
        Ok(())
    }

    async fn save_jpeg(&self, image_data: &[u8], jpeg_path: &Path) -> Result<()> {
        tokio::task::spawn_blocking({
            let image_data = image_data.to_vec();
            let jpeg_path = jpeg_path.to_path_buf();
            move || Self::save_jpeg_sync(image_data, jpeg_path)
        })
        .await
        .map_err(|e| Error::Invariant(format!("Image processing task join error: {}", e)))?
    }
}

#[async_trait]
impl ImageService for ImageProcessor {
    async fn save_image(&self, image_data: &[u8]) -> Result<GeneratedImage> {
        if mime::detect_image_mime(image_data).is_none() {
            tracing::warn!(
                "Image payload has an unrecognized signature ({} bytes), trying to decode anyway",
                image_data.len()
            );
        }

        tokio::fs::create_dir_all(&self.output_dir).await?;

        // Random names keep concurrent requests from colliding
        let filename = format!("{}.jpg", Uuid::new_v4());
        let jpeg_path = self.output_dir.join(&filename);

        self.save_jpeg(image_data, &jpeg_path).await?;

        tracing::info!("Image successfully saved to {}", jpeg_path.display());

        Ok(GeneratedImage {
            relative_path: format!("{}/{}", self.url_prefix, filename),
            file_path: jpeg_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    const URL_PREFIX: &str = "/static/generated_images";

    fn create_test_image(format: ImageFormat) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(10, 10, image::Rgba([255, 0, 0, 255]));
        let img = match format {
            ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(img).to_rgb8()),
            _ => DynamicImage::ImageRgba8(img),
        };
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), format)
            .unwrap();
        bytes
    }

    struct TestImageProcessor {
        processor: ImageProcessor,
        temp_dir: TempDir,
    }

    impl TestImageProcessor {
        fn new() -> Result<Self> {
            let temp_dir = TempDir::new()?;
            let processor = ImageProcessor::new(
                &temp_dir.path().join("generated_images"),
                URL_PREFIX,
            );

            Ok(Self {
                processor,
                temp_dir,
            })
        }
    }

    #[tokio::test]
    async fn test_save_image_creates_directory_and_jpeg() {
        let test_processor = TestImageProcessor::new().unwrap();
        let output_dir = test_processor.temp_dir.path().join("generated_images");
        assert!(!output_dir.exists());

        let result = test_processor
            .processor
            .save_image(&create_test_image(ImageFormat::Png))
            .await
            .unwrap();

        assert!(result.file_path.exists());
        assert!(result.file_path.starts_with(&output_dir));
        assert!(result.relative_path.starts_with("/static/generated_images/"));
        assert!(result.relative_path.ends_with(".jpg"));

        let saved = std::fs::read(&result.file_path).unwrap();
        assert_eq!(image::guess_format(&saved).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&saved).unwrap();
        assert_eq!(decoded.width(), 10);
        assert_eq!(decoded.height(), 10);
    }

    #[tokio::test]
    async fn test_saved_jpeg_has_no_exif_segment() {
        let test_processor = TestImageProcessor::new().unwrap();

        let result = test_processor
            .processor
            .save_image(&create_test_image(ImageFormat::Png))
            .await
            .unwrap();

        let saved = std::fs::read(&result.file_path).unwrap();
        assert!(!saved.windows(6).any(|w| w == b"Exif\0\0"));
    }

    #[tokio::test]
    async fn test_relative_path_matches_file_name() {
        let test_processor = TestImageProcessor::new().unwrap();

        let result = test_processor
            .processor
            .save_image(&create_test_image(ImageFormat::Jpeg))
            .await
            .unwrap();

        let file_name = result.file_path.file_name().unwrap().to_string_lossy();
        assert_eq!(result.relative_path, format!("{}/{}", URL_PREFIX, file_name));
    }

    #[tokio::test]
    async fn test_undecodable_payload_is_image_error() {
        let test_processor = TestImageProcessor::new().unwrap();

        let err = test_processor
            .processor
            .save_image(b"{\"error\": \"Model is currently loading\"}")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Image(_)));
        assert!(!err.is_upstream());
    }

    #[tokio::test]
    async fn test_unique_filenames() {
        let test_processor = TestImageProcessor::new().unwrap();
        let test_image = create_test_image(ImageFormat::Jpeg);

        let mut names = HashSet::new();
        for _ in 0..50 {
            let result = test_processor
                .processor
                .save_image(&test_image)
                .await
                .unwrap();
            assert!(names.insert(result.relative_path));
        }
        assert_eq!(names.len(), 50);
    }
}
