//! FVG Portal CLI
//!
//! Command-line client for a running portal:
//! - Browse destinations and events
//! - Ask the concierge, the elite guide and the chef
//! - Generate gallery images
//! - Chat interactively
//! - Generate a config file

use anyhow::{bail, Context};
use base64::Engine;
use clap::{Parser, Subcommand, ValueEnum};
use fvg_portal::assistant::{AspectRatio, AssistantError, AssistantReply, Transcript, Widget};
use fvg_portal::gemini::{GeminiError, LatLng};
use serde_json::{json, Value};
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fvg-portal-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Command-line client for the FVG Luxury Portal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Portal server URL
    #[arg(long, default_value = "http://localhost:8080", global = true)]
    pub api_url: String,

    /// Print raw JSON responses
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List destinations
    Destinations {
        /// Villa, Vineyard, Coastal or Mountain
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List events
    Events {
        /// Only events from today on
        #[arg(short, long)]
        upcoming: bool,
    },

    /// Ask the concierge
    Ask {
        message: String,
        /// Your position as "lat,lng" for nearby suggestions
        #[arg(short, long)]
        location: Option<LatLng>,
    },

    /// Ask the elite guide
    Guide {
        message: String,
        /// Use the lite model for an instant answer
        #[arg(long, conflicts_with = "deep")]
        fast: bool,
        /// Grant the guide its full thinking budget
        #[arg(long)]
        deep: bool,
    },

    /// Ask the chef for a recipe
    Recipe {
        dish: String,
        /// Print the rendered HTML instead of Markdown
        #[arg(long)]
        html: bool,
    },

    /// Generate a gallery image
    Image {
        prompt: String,
        /// 1:1, 16:9 or 4:3
        #[arg(short, long, default_value = "1:1")]
        aspect_ratio: AspectRatio,
        /// Save the decoded image to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Chat interactively with an assistant
    Chat {
        #[arg(value_enum, default_value = "concierge")]
        with: ChatPartner,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ChatPartner {
    Concierge,
    Guide,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let api = format!("{}/api/v1", cli.api_url.trim_end_matches('/'));

    match cli.command {
        Commands::Destinations { category } => {
            let mut request = client.get(format!("{}/destinations", api));
            if let Some(category) = &category {
                request = request.query(&[("category", category)]);
            }
            let data = send(request, &cli.api_url).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                print_destinations(&data);
            }
        }

        Commands::Events { upcoming } => {
            let request = client
                .get(format!("{}/events", api))
                .query(&[("upcoming", upcoming)]);
            let data = send(request, &cli.api_url).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                print_events(&data);
            }
        }

        Commands::Ask { message, location } => {
            let body = json!({ "message": message, "location": location });
            let request = client.post(format!("{}/concierge", api)).json(&body);
            let data = send(request, &cli.api_url).await?;
            print_reply(&data, cli.json)?;
        }

        Commands::Guide { message, fast, deep } => {
            let body = json!({
                "message": message,
                "mode": if fast { "fast" } else { "elite" },
                "deep_thinking": deep,
            });
            let request = client.post(format!("{}/guide", api)).json(&body);
            let data = send(request, &cli.api_url).await?;
            print_reply(&data, cli.json)?;
        }

        Commands::Recipe { dish, html } => {
            let body = json!({ "dish": dish });
            let request = client.post(format!("{}/recipes", api)).json(&body);
            let data = send(request, &cli.api_url).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                let field = if html { "html" } else { "markdown" };
                println!("{}", data[field].as_str().unwrap_or_default());
            }
        }

        Commands::Image {
            prompt,
            aspect_ratio,
            output,
        } => {
            let body = json!({ "prompt": prompt, "aspect_ratio": aspect_ratio });
            let request = client.post(format!("{}/gallery", api)).json(&body);
            let data = send(request, &cli.api_url).await?;
            let url = data["url"].as_str().unwrap_or_default();

            match output {
                Some(path) => {
                    let (mime, bytes) = decode_data_url(url)?;
                    std::fs::write(&path, &bytes)
                        .with_context(|| format!("writing {:?}", path))?;
                    println!(
                        "Saved {} ({}, {} bytes) to {:?}",
                        data["id"].as_str().unwrap_or("-"),
                        mime,
                        bytes.len(),
                        path
                    );
                }
                None if cli.json => println!("{}", serde_json::to_string_pretty(&data)?),
                None => println!("{}", url),
            }
        }

        Commands::Chat { with } => {
            chat(&client, &api, &cli.api_url, with).await?;
        }

        Commands::Config { output } => {
            let config = fvg_portal::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Send a request and decode its JSON body, turning API errors into messages
async fn send(request: reqwest::RequestBuilder, api_url: &str) -> anyhow::Result<Value> {
    let response = request.send().await.with_context(|| {
        format!(
            "cannot connect to the portal at {} (start it with: cargo run --bin fvg-portal)",
            api_url
        )
    })?;

    let status = response.status();
    let data: Value = response.json().await.unwrap_or(Value::Null);

    if !status.is_success() {
        let message = data["error"]["message"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| status.to_string());
        bail!("request failed ({}): {}", status, message);
    }

    Ok(data)
}

/// Interactive chat loop over a local transcript
async fn chat(
    client: &reqwest::Client,
    api: &str,
    api_url: &str,
    with: ChatPartner,
) -> anyhow::Result<()> {
    let (widget, endpoint) = match with {
        ChatPartner::Concierge => (Widget::Concierge, "concierge"),
        ChatPartner::Guide => (Widget::EliteGuide, "guide"),
    };
    let mut transcript = Transcript::new(widget);

    println!("Chatting with the {}. Empty line or Ctrl+D to quit.", widget);
    println!();

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;

        let Some(turn) = transcript.begin(&line) else { break };

        let body = json!({ "message": turn.message, "history": turn.history });
        let request = client.post(format!("{}/{}", api, endpoint)).json(&body);
        let outcome = match send(request, api_url).await {
            Ok(data) if data["fallback"].as_bool().unwrap_or(false) => {
                Err(AssistantError::Model(GeminiError::EmptyResponse("text")))
            }
            Ok(data) => Ok(AssistantReply {
                text: data["content"].as_str().unwrap_or_default().to_string(),
                sources: serde_json::from_value(data["sources"].clone()).unwrap_or_default(),
            }),
            Err(e) => {
                eprintln!("({})", e);
                Err(AssistantError::Model(GeminiError::Unavailable))
            }
        };
        transcript.finish(outcome);

        if let Some(last) = transcript.messages().last() {
            println!();
            println!("{}", last.content);
            for source in &last.sources {
                println!("  [{}] {}", source.title, source.uri);
            }
            println!();
        }
    }

    Ok(())
}

fn print_destinations(data: &Value) {
    let items = data.as_array().map(Vec::as_slice).unwrap_or_default();
    if items.is_empty() {
        println!("No destinations in this category.");
        return;
    }

    println!("{:<28} {:<10} {}", "Name", "Category", "Location");
    println!("{}", "-".repeat(60));
    for item in items {
        println!(
            "{:<28} {:<10} {}",
            item["name"].as_str().unwrap_or("-"),
            item["category"].as_str().unwrap_or("-"),
            item["location"].as_str().unwrap_or("-"),
        );
    }
}

fn print_events(data: &Value) {
    let items = data.as_array().map(Vec::as_slice).unwrap_or_default();
    if items.is_empty() {
        println!("No events scheduled.");
        return;
    }

    println!("{:<20} {:<14} {}", "Date", "Category", "Title");
    println!("{}", "-".repeat(60));
    for item in items {
        println!(
            "{:<20} {:<14} {}",
            item["display_date"].as_str().unwrap_or("-"),
            item["category"].as_str().unwrap_or("-"),
            item["title"].as_str().unwrap_or("-"),
        );
    }
}

fn print_reply(data: &Value, raw: bool) -> anyhow::Result<()> {
    if raw {
        println!("{}", serde_json::to_string_pretty(data)?);
        return Ok(());
    }

    println!("{}", data["content"].as_str().unwrap_or_default());

    let sources = data["sources"].as_array().map(Vec::as_slice).unwrap_or_default();
    if !sources.is_empty() {
        println!();
        println!("Sources:");
        for source in sources {
            println!(
                "  {} - {}",
                source["title"].as_str().unwrap_or("-"),
                source["uri"].as_str().unwrap_or("-"),
            );
        }
    }
    Ok(())
}

/// Split `data:<mime>;base64,<payload>`
fn split_data_url(url: &str) -> anyhow::Result<(&str, &str)> {
    let rest = url
        .strip_prefix("data:")
        .context("gallery reply is not a data URL")?;
    let (meta, payload) = rest
        .split_once(',')
        .context("gallery reply has no payload")?;
    Ok((meta.trim_end_matches(";base64"), payload))
}

/// Decode a gallery data URL into its mime type and image bytes
fn decode_data_url(url: &str) -> anyhow::Result<(&str, Vec<u8>)> {
    let (mime, payload) = split_data_url(url)?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .context("gallery payload is not valid base64")?;
    Ok((mime, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_data_url() {
        let (mime, payload) = split_data_url("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(payload, "iVBORw0KGgo=");

        assert!(split_data_url("https://example.com/villa.png").is_err());
        assert!(split_data_url("data:image/png;base64").is_err());
    }

    #[test]
    fn test_decode_data_url_yields_image_bytes() {
        let png_magic = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
        let encoded = base64::engine::general_purpose::STANDARD.encode(png_magic);
        let url = format!("data:image/png;base64,{}", encoded);

        let (mime, bytes) = decode_data_url(&url).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, png_magic);
    }

    #[test]
    fn test_decode_data_url_rejects_garbage() {
        assert!(decode_data_url("data:image/png;base64,not*base64!").is_err());
    }
}
