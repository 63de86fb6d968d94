//! Fashion Advisor - command line client
//!
//! Uploads an outfit photo to the analysis service and prints the feedback.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use fashion_advisor::config::Config;
use fashion_advisor::external::AnalysisApi;
use fashion_advisor::render::{header, loading, render};
use fashion_advisor::services::{
    provider_from_config, read_image, FixedLocation, LocationProvider, NoLocation,
};
use fashion_advisor::{AnalysisServiceClient, UploadController};
use shared::{is_image_file, Coordinates, UiState, ViewModel};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Analysis service base URL (overrides configuration)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Get feedback on an outfit photo
    Analyze {
        /// Path to the outfit photo
        image: PathBuf,

        #[command(flatten)]
        position: PositionArgs,

        /// Never attach a location
        #[arg(long, conflicts_with_all = ["lat", "lon"])]
        no_location: bool,
    },
    /// Check whether the analysis service is up
    Status,
    /// Show the service's weather report for a position
    Weather {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
}

#[derive(Args, Debug)]
struct PositionArgs {
    /// Latitude to attach instead of looking it up
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude to attach instead of looking it up
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fashion_advisor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    dotenvy::dotenv().ok();
    let mut config = Config::load()?;
    if let Some(base_url) = cli.base_url {
        config.service.base_url = base_url;
        config.validate().map_err(anyhow::Error::msg)?;
    }

    tracing::debug!("Environment: {}", config.environment);
    tracing::debug!("Analysis service: {}", config.service.base_url);

    match cli.command {
        Command::Analyze {
            image,
            position,
            no_location,
        } => {
            let location: Arc<dyn LocationProvider> = match (position.lat, position.lon) {
                (Some(lat), Some(lon)) => Arc::new(FixedLocation(Coordinates::new(lat, lon))),
                _ if no_location => Arc::new(NoLocation),
                _ => provider_from_config(&config.location),
            };
            analyze(&config, location, image).await
        }
        Command::Status => {
            let client = AnalysisServiceClient::new(&config.service)?;
            match client.check_status().await {
                Ok(body) => {
                    println!("{}", body.trim());
                    Ok(ExitCode::SUCCESS)
                }
                Err(failure) => {
                    eprintln!("{}", failure);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Weather { lat, lon } => {
            let coords = Coordinates::new(lat, lon);
            coords.validate().map_err(anyhow::Error::msg)?;

            let client = AnalysisServiceClient::new(&config.service)?;
            match client.weather(coords).await {
                Ok(report) => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                    Ok(ExitCode::SUCCESS)
                }
                Err(failure) => {
                    eprintln!("{}", failure);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

async fn analyze(
    config: &Config,
    location: Arc<dyn LocationProvider>,
    image_path: PathBuf,
) -> anyhow::Result<ExitCode> {
    let api = AnalysisServiceClient::new(&config.service)?;
    let mut controller = UploadController::new(Arc::new(api), location, config.location.timeout());

    // Fire and forget, like a page load
    let _ = controller.spawn_status_check();

    print!("{}", header());

    let image = match read_image(&image_path).await {
        Ok(image) => image,
        Err(failure) => {
            let state = UiState::Failed(failure.user_message());
            print!("{}", render(&ViewModel::project(&state, false)));
            return Ok(ExitCode::FAILURE);
        }
    };

    if !is_image_file(&image.file_name) {
        tracing::warn!(
            "{} does not look like an image, uploading anyway",
            image_path.display()
        );
    }
    controller.select_file(image);

    print!("{}", loading());
    let outcome = controller.submit().await;

    match outcome {
        Ok(state) => {
            print!("{}", render(&controller.view()));
            Ok(match state {
                UiState::Success(_) => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            })
        }
        Err(rejected) => {
            eprintln!("{}", rejected);
            Ok(ExitCode::FAILURE)
        }
    }
}
