//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::assistant::{AspectRatio, AssistantReply, ChatMessage, Recipe, Widget};
use crate::content::{Attraction, EventItem};
use crate::gemini::{LatLng, Role, Source};

// ============================================
// CONTENT DTOs
// ============================================

/// Query string for GET /destinations
#[derive(Debug, Default, Deserialize)]
pub struct DestinationQuery {
    /// Villa, Vineyard, Coastal or Mountain (case-insensitive)
    #[serde(default)]
    pub category: Option<String>,
}

/// Query string for GET /events
#[derive(Debug, Default, Deserialize)]
pub struct EventsQuery {
    /// Only events from today on
    #[serde(default)]
    pub upcoming: bool,
}

/// An event with its display date
#[derive(Debug, Serialize)]
pub struct EventDto {
    #[serde(flatten)]
    pub event: EventItem,
    /// e.g. "October 12, 2025"
    pub display_date: String,
}

impl From<&EventItem> for EventDto {
    fn from(event: &EventItem) -> Self {
        Self {
            display_date: event.display_date(),
            event: event.clone(),
        }
    }
}

/// A discovery landmark with its links
#[derive(Debug, Serialize)]
pub struct AttractionDto {
    #[serde(flatten)]
    pub attraction: Attraction,
    pub maps_url: String,
    /// Question the concierge receives for this landmark
    pub concierge_question: String,
}

impl From<&Attraction> for AttractionDto {
    fn from(attraction: &Attraction) -> Self {
        Self {
            maps_url: attraction.maps_url(),
            concierge_question: attraction.concierge_question(),
            attraction: attraction.clone(),
        }
    }
}

/// Gallery options
#[derive(Debug, Serialize)]
pub struct GallerySuggestionsResponse {
    pub suggestions: Vec<String>,
    pub aspect_ratios: Vec<AspectRatio>,
}

// ============================================
// ASSISTANT DTOs
// ============================================

/// POST /concierge
#[derive(Debug, Deserialize)]
pub struct ConciergeRequest {
    #[serde(default)]
    pub message: String,
    /// Conversation so far, oldest first
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    /// Visitor position for nearby recommendations
    #[serde(default)]
    pub location: Option<LatLng>,
}

/// Elite guide mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideMode {
    #[default]
    Elite,
    Fast,
}

/// POST /guide
#[derive(Debug, Deserialize)]
pub struct GuideRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    #[serde(default)]
    pub mode: GuideMode,
    /// Only honored in elite mode
    #[serde(default)]
    pub deep_thinking: bool,
}

/// POST /discovery
#[derive(Debug, Deserialize)]
pub struct DiscoveryRequest {
    /// Attraction name (or its maps query)
    #[serde(default)]
    pub attraction: String,
    #[serde(default)]
    pub location: Option<LatLng>,
}

/// Reply of a chat-like assistant
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub role: Role,
    pub content: String,
    #[serde(default)]
    pub sources: Vec<Source>,
    /// True when `content` is the widget's apology rather than a model answer
    #[serde(default)]
    pub fallback: bool,
}

impl From<AssistantReply> for ChatResponse {
    fn from(reply: AssistantReply) -> Self {
        Self {
            role: Role::Model,
            content: reply.text,
            sources: reply.sources,
            fallback: false,
        }
    }
}

impl ChatResponse {
    /// The widget's apology in place of an answer
    pub fn apology(widget: Widget) -> Self {
        Self {
            role: Role::Model,
            content: widget.apology().unwrap_or_default().to_string(),
            sources: Vec::new(),
            fallback: true,
        }
    }
}

/// POST /recipes
#[derive(Debug, Deserialize)]
pub struct RecipeRequest {
    #[serde(default)]
    pub dish: String,
}

/// Recipe reply
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeResponse {
    pub dish: String,
    pub markdown: String,
    pub html: String,
    #[serde(default)]
    pub fallback: bool,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            dish: recipe.dish,
            markdown: recipe.markdown,
            html: recipe.html,
            fallback: false,
        }
    }
}

/// POST /gallery
#[derive(Debug, Deserialize)]
pub struct GalleryRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub aspect_ratio: AspectRatio,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy or degraded
    pub status: String,
    /// Model status: configured or missing_api_key
    pub model: String,
    /// Model provider name
    pub provider: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_guide_request_defaults() {
        let req: GuideRequest = serde_json::from_value(json!({"message": "Venice?"})).unwrap();
        assert_eq!(req.mode, GuideMode::Elite);
        assert!(!req.deep_thinking);
        assert!(req.history.is_empty());
    }

    #[test]
    fn test_concierge_request_with_location() {
        let req: ConciergeRequest = serde_json::from_value(json!({
            "message": "Dinner?",
            "history": [{"role": "user", "content": "Hi"}, {"role": "model", "content": "Benvenuti"}],
            "location": {"latitude": 45.65, "longitude": 13.77}
        }))
        .unwrap();
        assert_eq!(req.history.len(), 2);
        assert_eq!(req.location, Some(LatLng::new(45.65, 13.77)));
    }

    #[test]
    fn test_apology_response() {
        let resp = ChatResponse::apology(Widget::EliteGuide);
        assert!(resp.fallback);
        assert_eq!(resp.role, Role::Model);
        assert!(resp.content.starts_with("My sincere apologies"));
    }

    #[test]
    fn test_event_dto_flattens() {
        let catalog = crate::content::Catalog::builtin();
        let dto = EventDto::from(&catalog.events()[0]);
        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["title"], "Aria di Festa");
        assert_eq!(value["date"], "2025-06-22");
        assert_eq!(value["display_date"], "June 22, 2025");
    }
}
