use std::path::{Path, PathBuf};
use std::time::Duration;

use agriloka::clients::{RegionClient, RegionLevel};
use agriloka::config::{self, Config, DEFAULT_LOG_FILTER};
use agriloka::schemas::{ChatMessage, LocationData, Snippet};
use agriloka::{AgriService, AgrilokaError, ResponseExtractor};
use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Agriloka AI farming assistant", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ask the farming assistant a question
    Chat {
        message: String,
    },
    /// Answer a question grounded in web search results
    Ask {
        query: String,
    },
    /// Describe a field or plant photo
    Vision {
        #[arg(long)]
        image: PathBuf,
    },
    /// Full crop analysis of a field photo for a location
    Analyze {
        #[arg(long)]
        image: PathBuf,
        /// Location name, e.g. "KABUPATEN KLATEN"
        #[arg(long)]
        location: String,
        #[arg(long, default_value = "")]
        location_id: String,
    },
    /// List provinces, or regencies/districts of a parent region
    Regions {
        /// Province id whose regencies to list
        #[arg(long, conflicts_with = "districts")]
        regencies: Option<String>,
        /// Regency id whose districts to list
        #[arg(long)]
        districts: Option<String>,
    },
    /// Extract a crop analysis from a saved model narrative (no network)
    Extract {
        #[arg(long)]
        narrative: PathBuf,
        /// JSON array of {title, link, snippet}
        #[arg(long)]
        snippets: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    // .env may carry RUST_LOG; the subscriber must exist before config
    // loading and validation log anything
    config::load_env_file();
    agriloka::init_tracing(DEFAULT_LOG_FILTER);
    let config = Config::load()?;

    if let Err(err) = run(args.command, &config).await {
        if let Some(domain) = err.downcast_ref::<AgrilokaError>() {
            eprintln!("{}", domain.user_message());
        }
        return Err(err);
    }
    Ok(())
}

async fn run(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Chat { message } => {
            let service = AgriService::from_config(config)?;
            let answer = service
                .chat_completion(vec![ChatMessage::user(message)])
                .await?;
            println!("{}", answer);
        }
        Command::Ask { query } => {
            let service = AgriService::from_config(config)?;
            print_json(&service.search_enhanced_response(&query).await?)?;
        }
        Command::Vision { image } => {
            let service = AgriService::from_config(config)?;
            let encoded = encode_image(&image)?;
            print_json(&service.analyze_image(&encoded).await?)?;
        }
        Command::Analyze {
            image,
            location,
            location_id,
        } => {
            let service = AgriService::from_config(config)?;
            let encoded = encode_image(&image)?;
            let location = LocationData {
                id: location_id,
                name: location,
            };
            info!(location = %location.name, "Starting crop analysis");
            print_json(
                &service
                    .analyze_image_with_location(&encoded, &location)
                    .await?,
            )?;
        }
        Command::Regions {
            regencies,
            districts,
        } => {
            let client = RegionClient::new(
                &config.system.regions_base_url,
                Duration::from_millis(config.runtime.request_timeout_ms),
            )?;
            let level = match (regencies, districts) {
                (Some(province_id), _) => RegionLevel::Regencies(province_id),
                (None, Some(regency_id)) => RegionLevel::Districts(regency_id),
                (None, None) => RegionLevel::Provinces,
            };
            print_json(&client.fetch(&level).await?)?;
        }
        Command::Extract {
            narrative,
            snippets,
        } => {
            let text = std::fs::read_to_string(&narrative)
                .with_context(|| format!("read narrative {}", narrative.display()))?;
            let snippets: Vec<Snippet> = match snippets {
                Some(path) => {
                    let raw = std::fs::read_to_string(&path)
                        .with_context(|| format!("read snippets {}", path.display()))?;
                    serde_json::from_str(&raw).context("parse snippets JSON")?
                }
                None => Vec::new(),
            };
            print_json(&ResponseExtractor::new().extract(&text, &snippets))?;
        }
    }
    Ok(())
}

fn encode_image(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image {}", path.display()))?;
    Ok(STANDARD.encode(bytes))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
