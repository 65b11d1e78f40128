//! # FVG Portal
//!
//! Luxury travel portal for Friuli-Venezia Giulia: a curated catalog of
//! destinations, events and landmarks, plus four AI widgets backed by the
//! hosted Gemini models.
//!
//! ## Modules
//!
//! - [`content`]: Built-in catalog (destinations, events, attractions, dishes)
//! - [`gemini`]: Gemini REST client and the [`gemini::GenerativeModel`] seam
//! - [`assistant`]: Concierge, elite guide, chef and gallery operations
//! - [`api`]: REST API and embedded site with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fvg_portal::assistant::{Assistant, ModelSet};
//! use fvg_portal::gemini::{GeminiClient, GeminiConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GeminiClient::new(GeminiConfig {
//!         api_key: std::env::var("API_KEY").ok(),
//!         ..Default::default()
//!     })?;
//!     let assistant = Assistant::new(Arc::new(client), ModelSet::default());
//!
//!     let reply = assistant
//!         .chat_with_concierge("A quiet villa near Trieste?", &[], None)
//!         .await?;
//!     println!("{}", reply.text);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod assistant;
pub mod config;
pub mod content;
pub mod gemini;

pub use assistant::{Assistant, AssistantError, ModelSet, Widget};
pub use config::Config;
pub use content::Catalog;
