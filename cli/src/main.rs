mod report;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use pantry_core::ai::{
    recognize_image, recognize_speech, user_message, AudioData, ImageData, OpenAiClient,
    RecognitionResult, RecognitionSource,
};
use pantry_core::{classify_iso, expiry, normalize, Inventory, RecipeBook};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pantry")]
#[command(about = "Kitchen inventory tracker", long_about = None)]
struct Cli {
    /// Reference date (YYYY-MM-DD) used instead of today
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a recognition reply read from stdin (or --text) and print it as JSON
    Normalize {
        #[arg(long)]
        text: Option<String>,
    },
    /// Classify an expiry date
    Classify {
        /// Expiry date; omit for an item without one
        expires: Option<String>,
    },
    /// List the demo inventory, soonest expiry first
    Inventory,
    /// List items that are expired or about to go bad
    Expiring,
    /// List recipes, optionally adding one from the catalog first
    Recipes {
        /// Catalog id to add
        #[arg(long)]
        add: Option<String>,
    },
    /// Recognize a food item in a photo (needs OPENAI_API_KEY)
    RecognizeImage { path: PathBuf },
    /// Recognize a food item from a recorded clip (needs OPENAI_API_KEY)
    RecognizeSpeech { path: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let today = cli.today.unwrap_or_else(expiry::today);

    match cli.command {
        Commands::Normalize { text } => {
            let raw = match text {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read stdin")?;
                    buf
                }
            };
            let item = normalize(&raw)?;
            println!("{}", serde_json::to_string_pretty(&item)?);
        }
        Commands::Classify { expires } => {
            let classification = classify_iso(expires.as_deref(), today)?;
            println!("{}", serde_json::to_string_pretty(&classification)?);
        }
        Commands::Inventory => {
            let inventory = Inventory::seeded(today);
            report::print_inventory(&inventory, today);
        }
        Commands::Expiring => {
            let inventory = Inventory::seeded(today);
            report::print_expiring(&inventory, today);
        }
        Commands::Recipes { add } => {
            let mut book = RecipeBook::seeded();
            if let Some(id) = add {
                let recipe = book.add_from_catalog(&id)?;
                println!("Added {}", recipe.name);
            }
            report::print_recipes(&book);
        }
        Commands::RecognizeImage { path } => {
            let client = OpenAiClient::from_env()?;
            let image = read_image(&path)?;
            let result = recognize_image(&client, image).await;
            print_recognition(result, RecognitionSource::Image, today)?;
        }
        Commands::RecognizeSpeech { path } => {
            let client = OpenAiClient::from_env()?;
            let data = std::fs::read(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let result = recognize_speech(&client, AudioData::webm(data)).await;
            print_recognition(result, RecognitionSource::Speech, today)?;
        }
    }

    Ok(())
}

fn read_image(path: &Path) -> Result<ImageData> {
    let data =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    Ok(ImageData::new(ImageData::mime_for_extension(ext), data))
}

fn print_recognition(
    result: Result<RecognitionResult, pantry_core::ai::AiError>,
    source: RecognitionSource,
    today: NaiveDate,
) -> Result<()> {
    let result = result.map_err(|e| anyhow::anyhow!(user_message(&e, source)))?;

    if let Some(transcript) = &result.transcript {
        println!("Heard: {}", transcript);
    }
    println!("{}", serde_json::to_string_pretty(&result.item)?);

    match classify_iso(result.item.expires.as_deref(), today) {
        Ok(classification) if classification.days_until.is_some() => {
            println!("Expiry: {}", classification.label());
        }
        Ok(_) => {}
        Err(e) => println!("Expiry: {} (edit before saving)", e),
    }

    tracing::debug!(
        total_tokens = result.usage.total_tokens,
        strategy = result.strategy.as_str(),
        "Recognition complete"
    );

    Ok(())
}
