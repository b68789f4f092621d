use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use villancico_generator::app::App;
use villancico_generator::models::GenerationRequest;

#[derive(Debug, Parser)]
#[command(name = "villancico-generator")]
#[command(about = "Generate a Christmas carol with lyrics, illustration, and melody")]
struct CliArgs {
    /// Topic for the carol, e.g. "la estrella de Belén".
    #[arg(value_name = "TOPIC", value_parser = parse_topic)]
    topic: String,

    /// Child's name for a personalized carol (requires --age).
    #[arg(long)]
    name: Option<String>,

    /// Child's age, between 1 and 12 (requires --name).
    #[arg(long, value_parser = parse_age)]
    age: Option<u8>,

    /// Compose a real melody through the music generation service.
    #[arg(long)]
    music: bool,

    /// Root directory for generated artifacts.
    #[arg(long, default_value = "output")]
    output: PathBuf,
}

fn parse_topic(input: &str) -> std::result::Result<String, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Topic must not be empty".to_string());
    }
    Ok(trimmed.to_string())
}

fn parse_age(input: &str) -> std::result::Result<u8, String> {
    let age: u8 = input
        .parse()
        .map_err(|_| format!("Invalid age '{}'. Expected a number between 1 and 12", input))?;
    if !(1..=12).contains(&age) {
        return Err(format!("Age {} is out of range. Expected 1 to 12", age));
    }
    Ok(age)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "villancico_generator=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let request = match (args.name, args.age) {
        (Some(name), Some(age)) => GenerationRequest::for_child(args.topic, name, age),
        (None, None) => GenerationRequest::new(args.topic),
        _ => {
            error!("--name and --age must be supplied together");
            std::process::exit(2);
        }
    };

    match App::new(&args.output, args.music) {
        Ok(app) => match app.run(&request).await {
            Ok(outcome) => {
                info!("Lyrics saved to {}", outcome.lyrics_path.display());
                info!("Illustration saved to {}", outcome.image_path.display());
                if let Some(path) = outcome.audio_path {
                    info!("Melody saved to {}", path.display());
                }
                if let Some(path) = outcome.melody_path {
                    info!("Placeholder melody saved to {}", path.display());
                }
                Ok(())
            }
            Err(e) => {
                error!("Generation failed: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_age, parse_topic};

    #[test]
    fn test_parse_age_valid() {
        assert_eq!(parse_age("7").unwrap(), 7);
        assert_eq!(parse_age("1").unwrap(), 1);
        assert_eq!(parse_age("12").unwrap(), 12);
    }

    #[test]
    fn test_parse_age_out_of_range() {
        assert!(parse_age("0").unwrap_err().contains("1 to 12"));
        assert!(parse_age("13").unwrap_err().contains("1 to 12"));
    }

    #[test]
    fn test_parse_age_not_a_number() {
        assert!(parse_age("siete").unwrap_err().contains("Invalid age"));
    }

    #[test]
    fn test_parse_topic_rejects_empty() {
        assert!(parse_topic("   ").is_err());
        assert_eq!(parse_topic(" la nieve ").unwrap(), "la nieve");
    }
}
