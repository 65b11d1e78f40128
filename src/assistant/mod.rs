//! Portal Assistants
//!
//! Thin services that turn visitor input into model requests and model
//! responses into replies the widgets can show.
//!
//! - **Concierge**: conversational help, optionally biased to the visitor's location
//! - **Elite guide**: search-grounded answers, optional deep thinking, or a fast lite mode
//! - **Chef**: Markdown recipes for regional dishes
//! - **Gallery**: generated pictures returned as `data:` URLs
//!
//! ## Data Flow
//!
//! 1. Input is validated (blank input never reaches the model)
//! 2. A [`GenerateRequest`] is shaped: persona, history, tools, config
//! 3. The [`GenerativeModel`] is called once
//! 4. Text, citations or the image are extracted from the response

mod markdown;
mod prompts;
mod transcript;

pub use markdown::render_markdown;
pub use transcript::{ChatMessage, PendingTurn, Transcript};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::content::Attraction;
use crate::gemini::{
    GeminiError, GenerateRequest, GenerativeModel, LatLng, Role, Source, Tool,
};

/// Longest visitor input forwarded to the model, in characters
pub const MAX_INPUT_CHARS: usize = 4_000;

/// Thinking budget used when deep thinking is requested
pub const DEEP_THINKING_BUDGET: i32 = 32_768;

/// Model names used by each assistant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSet {
    /// Concierge conversations
    pub concierge: String,
    /// Concierge conversations with a shared location (Maps grounding)
    pub maps: String,
    /// Elite guide
    pub guide: String,
    /// Elite guide, swift mode
    pub fast: String,
    /// AI chef
    pub chef: String,
    /// Gallery pictures
    pub image: String,
}

impl Default for ModelSet {
    fn default() -> Self {
        Self {
            concierge: "gemini-3-flash-preview".to_string(),
            maps: "gemini-2.5-flash".to_string(),
            guide: "gemini-3-pro-preview".to_string(),
            fast: "gemini-flash-lite-latest".to_string(),
            chef: "gemini-3-flash-preview".to_string(),
            image: "gemini-2.5-flash-image".to_string(),
        }
    }
}

/// The assistant-facing widgets of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Widget {
    Concierge,
    EliteGuide,
    Chef,
    Gallery,
}

impl Widget {
    /// Text shown in place of an answer when the model call fails
    pub fn apology(&self) -> Option<&'static str> {
        match self {
            Widget::Concierge => {
                Some("I apologize, my connection to the portal is weak. Please try again.")
            }
            Widget::EliteGuide => Some(
                "My sincere apologies. I am currently unavailable to guide you. Please try again in a moment.",
            ),
            Widget::Chef => Some("An error occurred while consulting the chef. Please try again."),
            Widget::Gallery => None,
        }
    }

    /// Whether `text` is one of the widgets' apologies
    pub fn is_apology(text: &str) -> bool {
        [Widget::Concierge, Widget::EliteGuide, Widget::Chef, Widget::Gallery]
            .iter()
            .filter_map(Widget::apology)
            .any(|apology| apology == text.trim())
    }
}

impl std::fmt::Display for Widget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Widget::Concierge => write!(f, "concierge"),
            Widget::EliteGuide => write!(f, "elite_guide"),
            Widget::Chef => write!(f, "chef"),
            Widget::Gallery => write!(f, "gallery"),
        }
    }
}

/// Aspect ratios offered by the gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Wide,
    #[serde(rename = "4:3")]
    Classic,
}

impl AspectRatio {
    pub fn all() -> &'static [AspectRatio] {
        &[AspectRatio::Square, AspectRatio::Wide, AspectRatio::Classic]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Wide => "16:9",
            AspectRatio::Classic => "4:3",
        }
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AspectRatio::all()
            .iter()
            .copied()
            .find(|r| r.as_str() == s.trim())
            .ok_or_else(|| format!("unsupported aspect ratio: {} (use 1:1, 16:9 or 4:3)", s))
    }
}

/// A model answer with its citations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub text: String,
    #[serde(default)]
    pub sources: Vec<Source>,
}

/// A chef's recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub dish: String,
    pub markdown: String,
    /// `markdown` rendered to HTML
    pub html: String,
}

/// A generated gallery picture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: String,
    /// `data:` URL of the picture
    pub url: String,
    pub prompt: String,
    pub aspect_ratio: AspectRatio,
    pub created_at: DateTime<Utc>,
}

/// Errors from the assistant services
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("message cannot be empty")]
    EmptyInput,

    #[error("message is too long ({0} characters, limit {limit})", limit = MAX_INPUT_CHARS)]
    InputTooLong(usize),

    #[error("location out of range")]
    InvalidLocation,

    #[error(transparent)]
    Model(#[from] GeminiError),
}

impl AssistantError {
    /// Whether the visitor's input was at fault (as opposed to the model call)
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, AssistantError::Model(_))
    }
}

/// Check visitor input and return it trimmed
fn validate_input(input: &str) -> Result<&str, AssistantError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AssistantError::EmptyInput);
    }
    let chars = trimmed.chars().count();
    if chars > MAX_INPUT_CHARS {
        return Err(AssistantError::InputTooLong(chars));
    }
    Ok(trimmed)
}

/// Assistant services over a hosted model
pub struct Assistant {
    model: Arc<dyn GenerativeModel>,
    models: ModelSet,
}

impl Assistant {
    /// Create a new assistant
    pub fn new(model: Arc<dyn GenerativeModel>, models: ModelSet) -> Self {
        Self { model, models }
    }

    /// Model names in use
    pub fn models(&self) -> &ModelSet {
        &self.models
    }

    /// Whether the hosted model has credentials
    pub fn is_configured(&self) -> bool {
        self.model.is_configured()
    }

    /// Provider name of the hosted model
    pub fn provider(&self) -> &str {
        self.model.name()
    }

    /// Add prior conversation turns to a request.
    ///
    /// Blank messages and apologies shown in place of failed answers are not
    /// the model's words and are left out.
    fn with_history(mut request: GenerateRequest, history: &[ChatMessage]) -> GenerateRequest {
        let turns = history.iter().filter(|m| {
            !m.content.trim().is_empty()
                && !(m.role == Role::Model && Widget::is_apology(&m.content))
        });
        for message in turns {
            request = request.turn(message.role, message.content.clone());
        }
        request
    }

    async fn reply(&self, request: GenerateRequest) -> Result<AssistantReply, AssistantError> {
        let model = request.model.clone();
        let response = self.model.generate(request).await?;
        let text = response
            .text()
            .ok_or(GeminiError::EmptyResponse("text"))?;
        let sources = response.sources();

        tracing::debug!(
            model = %model,
            chars = text.len(),
            sources = sources.len(),
            "Model replied"
        );

        Ok(AssistantReply { text, sources })
    }

    /// Ask the concierge, optionally from a location.
    ///
    /// With a location, Maps grounding is attached and retrieval is biased
    /// toward that point.
    pub async fn chat_with_concierge(
        &self,
        message: &str,
        history: &[ChatMessage],
        location: Option<LatLng>,
    ) -> Result<AssistantReply, AssistantError> {
        let message = validate_input(message)?;

        let request = match location {
            Some(location) => {
                if !location.is_valid() {
                    return Err(AssistantError::InvalidLocation);
                }
                GenerateRequest::new(&self.models.maps)
                    .system(format!(
                        "{}\n{}",
                        prompts::CONCIERGE_INSTRUCTION,
                        prompts::CONCIERGE_LOCATION_HINT
                    ))
                    .tool(Tool::GoogleMaps {})
                    .location(location)
            }
            None => GenerateRequest::new(&self.models.concierge).system(prompts::CONCIERGE_INSTRUCTION),
        };

        tracing::info!(
            history = history.len(),
            located = location.is_some(),
            "Concierge question"
        );

        let request = Self::with_history(request, history).user(message);
        self.reply(request).await
    }

    /// Ask the elite guide with search grounding; `deep_thinking` grants the
    /// full thinking budget
    pub async fn ask_elite_guide(
        &self,
        message: &str,
        history: &[ChatMessage],
        deep_thinking: bool,
    ) -> Result<AssistantReply, AssistantError> {
        let message = validate_input(message)?;

        let mut request = GenerateRequest::new(&self.models.guide)
            .system(prompts::GUIDE_INSTRUCTION)
            .tool(Tool::GoogleSearch {});
        if deep_thinking {
            request = request.thinking_budget(DEEP_THINKING_BUDGET);
        }

        tracing::info!(history = history.len(), deep_thinking, "Elite guide question");

        let request = Self::with_history(request, history).user(message);
        self.reply(request).await
    }

    /// Ask the lite model; no history, no tools
    pub async fn ask_fast_guide(&self, message: &str) -> Result<AssistantReply, AssistantError> {
        let message = validate_input(message)?;

        tracing::info!("Fast guide question");

        let request = GenerateRequest::new(&self.models.fast)
            .system(prompts::FAST_GUIDE_INSTRUCTION)
            .user(message);
        self.reply(request).await
    }

    /// Ask the concierge about a discovery landmark
    pub async fn discover(
        &self,
        attraction: &Attraction,
        location: Option<LatLng>,
    ) -> Result<AssistantReply, AssistantError> {
        self.chat_with_concierge(&attraction.concierge_question(), &[], location)
            .await
    }

    /// Get a gourmet recipe for a regional dish
    pub async fn culinary_recipe(&self, dish: &str) -> Result<Recipe, AssistantError> {
        let dish = validate_input(dish)?;

        tracing::info!(dish = %dish, "Consulting the chef");

        let request = GenerateRequest::new(&self.models.chef)
            .system(prompts::CHEF_INSTRUCTION)
            .user(prompts::recipe_prompt(dish));
        let reply = self.reply(request).await?;

        Ok(Recipe {
            dish: dish.to_string(),
            html: render_markdown(&reply.text),
            markdown: reply.text,
        })
    }

    /// Generate a gallery picture
    pub async fn generate_gallery_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> Result<GalleryImage, AssistantError> {
        let prompt = validate_input(prompt)?;

        tracing::info!(aspect_ratio = %aspect_ratio, "Generating gallery image");

        let request = GenerateRequest::new(&self.models.image)
            .user(prompts::gallery_prompt(prompt))
            .aspect_ratio(aspect_ratio.as_str());
        let response = self.model.generate(request).await?;
        let image = response
            .first_image()
            .ok_or(GeminiError::EmptyResponse("image"))?;

        Ok(GalleryImage {
            id: uuid::Uuid::new_v4().to_string(),
            url: image.data_url(),
            prompt: prompt.to_string(),
            aspect_ratio,
            created_at: Utc::now(),
        })
    }
}
