use anyhow::{Context, Result};
use clap::Parser;
use studio_ai::app::App;
use studio_ai::models::Config;
use studio_ai::server;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "studio-ai")]
#[command(about = "Serve the marketing image generator")]
struct CliArgs {
    /// Interface to bind.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 8000)]
    port: u16,
}

/// Log configuration problems that leave the service degraded but running.
fn check_config(config: &Config) {
    if config.hugging_face_api_token.is_none() {
        warn!("Hugging Face API token not configured; image requests will answer 503");
        warn!("Set HUGGING_FACE_API_TOKEN (tokens: https://huggingface.co/settings/tokens)");
    } else {
        info!("Image provider credential configured");
    }

    if config.google_translate_api_key.is_none() {
        warn!("GOOGLE_TRANSLATE_API_KEY not set; inputs will be sent untranslated");
    }
}

#[actix_web::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studio_ai=info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Studio AI marketing image generator");

    let args = CliArgs::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    check_config(&config);

    let images_dir = config.generated_images_dir();
    std::fs::create_dir_all(&images_dir)
        .with_context(|| format!("Failed to create {}", images_dir.display()))?;
    info!("Generated images directory: {}", images_dir.display());

    let app = App::from_config(&config);
    server::serve(app, config.static_dir.clone(), &args.host, args.port)
        .await
        .context("Server stopped with an error")?;

    info!("Studio AI server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::CliArgs;
    use clap::Parser;

    #[test]
    fn test_cli_defaults() {
        let args = CliArgs::parse_from(["studio-ai"]);
        assert_eq!(args.host, "0.0.0.0");
        assert_eq!(args.port, 8000);
    }

    #[test]
    fn test_cli_overrides() {
        let args = CliArgs::parse_from(["studio-ai", "--host", "127.0.0.1", "--port", "9000"]);
        assert_eq!(args.host, "127.0.0.1");
        assert_eq!(args.port, 9000);
    }

    #[test]
    fn test_cli_rejects_bad_port() {
        assert!(CliArgs::try_parse_from(["studio-ai", "--port", "not-a-port"]).is_err());
    }
}
