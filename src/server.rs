//! HTTP surface: the generation endpoint plus static file mounts.

use crate::app::App;
use crate::models::{ErrorResponse, GenerateImageResponse, OfferRequest, STATIC_URL_PREFIX};
use actix_files::Files;
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::middleware::Logger;
use actix_web::{web, App as WebApp, HttpRequest, HttpResponse, HttpServer, ResponseError};
use std::fmt;
use std::path::PathBuf;

pub const GENERATE_IMAGE_PATH: &str = "/api/generate-image";

const SERVICE_UNAVAILABLE_DETAIL: &str = "Image generation service failed or is unavailable.";
const INTERNAL_ERROR_DETAIL: &str = "An internal server error occurred.";

/// Failure categories exposed to HTTP callers. Deliberately coarse: the
/// underlying error is logged, never sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    ServiceUnavailable,
    Internal,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::ServiceUnavailable => f.write_str(SERVICE_UNAVAILABLE_DETAIL),
            ApiError::Internal => f.write_str(INTERNAL_ERROR_DETAIL),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            detail: self.to_string(),
        })
    }
}

impl From<crate::Error> for ApiError {
    fn from(err: crate::Error) -> Self {
        if err.is_upstream() {
            ApiError::ServiceUnavailable
        } else {
            tracing::error!("Unexpected error while generating image: {}", err);
            ApiError::Internal
        }
    }
}

async fn generate_image(
    app: web::Data<App>,
    request: web::Json<OfferRequest>,
) -> Result<HttpResponse, ApiError> {
    let image = app.generate(&request).await?;

    Ok(HttpResponse::Ok().json(GenerateImageResponse {
        image_url: image.relative_path,
    }))
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::UnprocessableEntity().json(ErrorResponse {
        detail: err.to_string(),
    });
    InternalError::from_response(err, response).into()
}

/// Register the API routes. Expects `web::Data<App>` in app data.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(GENERATE_IMAGE_PATH)
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route(web::post().to(generate_image)),
    );
}

/// Register static mounts. Must come after [`configure_api`]: the `/` mount
/// matches every path.
pub fn configure_static(static_dir: PathBuf) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.service(Files::new(STATIC_URL_PREFIX, &static_dir))
            .service(Files::new("/", &static_dir).index_file("index.html"));
    }
}

/// Bind and serve until the process is stopped.
pub async fn serve(app: App, static_dir: PathBuf, host: &str, port: u16) -> std::io::Result<()> {
    let app = web::Data::new(app);

    tracing::info!("Server will be available at http://{}:{}", host, port);

    HttpServer::new(move || {
        WebApp::new()
            .wrap(Logger::default())
            .app_data(app.clone())
            .configure(configure_api)
            .configure(configure_static(static_dir.clone()))
    })
    .bind((host, port))?
    .run()
    .await
}
