//! Gemini REST payloads
//!
//! Request and response bodies for `models/{model}:generateContent`, plus the
//! extraction helpers the assistants use to pull text, citations and images
//! out of a response. Field names follow the REST API's camelCase.

use serde::{Deserialize, Serialize};

// ============================================
// Shared content
// ============================================

/// Author of a content turn
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Model => write!(f, "model"),
        }
    }
}

/// One turn of a conversation, made of parts
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Single text part with a role
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role: Some(role),
            parts: vec![Part::text(text)],
        }
    }

    /// Role-less text content, as used for system instructions
    pub fn instruction(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }
}

/// A piece of content: text (possibly a thought summary) or inline binary data
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    fn is_thought(&self) -> bool {
        self.thought.unwrap_or(false)
    }
}

/// Base64 payload returned for generated media
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

impl InlineData {
    /// `data:` URL that a browser can show directly
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

// ============================================
// Request
// ============================================

/// A `generateContent` call
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Model name; part of the URL, not the body
    #[serde(skip)]
    pub model: String,
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_config: Option<ToolConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            contents: Vec::new(),
            system_instruction: None,
            tools: Vec::new(),
            tool_config: None,
            generation_config: None,
        }
    }

    /// Builder method: set the system instruction
    pub fn system(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(Content::instruction(instruction));
        self
    }

    /// Builder method: append a turn
    pub fn turn(mut self, role: Role, text: impl Into<String>) -> Self {
        self.contents.push(Content::text(role, text));
        self
    }

    /// Builder method: append a user turn
    pub fn user(self, text: impl Into<String>) -> Self {
        self.turn(Role::User, text)
    }

    /// Builder method: attach a tool
    pub fn tool(mut self, tool: Tool) -> Self {
        if !self.tools.contains(&tool) {
            self.tools.push(tool);
        }
        self
    }

    /// Builder method: bias retrieval toward a location
    pub fn location(mut self, location: LatLng) -> Self {
        self.tool_config = Some(ToolConfig {
            retrieval_config: RetrievalConfig { lat_lng: location },
        });
        self
    }

    /// Builder method: set the thinking token budget
    pub fn thinking_budget(mut self, budget: i32) -> Self {
        self.generation_config_mut().thinking_config = Some(ThinkingConfig {
            thinking_budget: budget,
        });
        self
    }

    /// Builder method: request an image with the given aspect ratio
    pub fn aspect_ratio(mut self, ratio: impl Into<String>) -> Self {
        let config = self.generation_config_mut();
        config.image_config = Some(ImageConfig {
            aspect_ratio: ratio.into(),
        });
        config.response_modalities = vec!["IMAGE".to_string(), "TEXT".to_string()];
        self
    }

    fn generation_config_mut(&mut self) -> &mut GenerationConfig {
        self.generation_config.get_or_insert_with(GenerationConfig::default)
    }
}

/// Grounding tools the hosted model can call
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum Tool {
    GoogleSearch {},
    GoogleMaps {},
}

/// Latitude/longitude pair
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both coordinates are finite and within geographic bounds
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl std::str::FromStr for LatLng {
    type Err = String;

    /// Parse "lat,lng"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| format!("expected \"lat,lng\", got {:?}", s))?;
        let latitude = lat.trim().parse::<f64>().map_err(|e| e.to_string())?;
        let longitude = lng.trim().parse::<f64>().map_err(|e| e.to_string())?;
        let location = LatLng::new(latitude, longitude);
        if location.is_valid() {
            Ok(location)
        } else {
            Err(format!("coordinates out of range: {}", s))
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfig {
    pub retrieval_config: RetrievalConfig,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalConfig {
    pub lat_lng: LatLng,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking_config: Option<ThinkingConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_config: Option<ImageConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub response_modalities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingConfig {
    pub thinking_budget: i32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    pub aspect_ratio: String,
}

// ============================================
// Response
// ============================================

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    pub model_version: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
    #[serde(default)]
    pub web_search_queries: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<ChunkSource>,
    #[serde(default)]
    pub maps: Option<ChunkSource>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ChunkSource {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// A citation the model grounded its answer on
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Source {
    pub title: String,
    pub uri: String,
    pub kind: SourceKind,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Web,
    Maps,
}

impl GenerateResponse {
    fn first_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or(&[])
    }

    /// Answer text of the first candidate, thought summaries excluded
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .first_parts()
            .iter()
            .filter(|p| !p.is_thought())
            .filter_map(|p| p.text.as_deref())
            .collect();

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Grounding citations of the first candidate, deduplicated by URI
    pub fn sources(&self) -> Vec<Source> {
        let chunks = self
            .candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|m| m.grounding_chunks.as_slice())
            .unwrap_or(&[]);

        let mut sources: Vec<Source> = Vec::new();
        for chunk in chunks {
            let (source, kind) = match (&chunk.web, &chunk.maps) {
                (Some(web), _) => (web, SourceKind::Web),
                (None, Some(maps)) => (maps, SourceKind::Maps),
                (None, None) => continue,
            };
            let Some(uri) = source.uri.as_deref().filter(|u| !u.is_empty()) else {
                continue;
            };
            if sources.iter().any(|s| s.uri == uri) {
                continue;
            }
            sources.push(Source {
                title: source.title.clone().unwrap_or_else(|| uri.to_string()),
                uri: uri.to_string(),
                kind,
            });
        }
        sources
    }

    /// First inline media part of the first candidate
    pub fn first_image(&self) -> Option<&InlineData> {
        self.first_parts().iter().find_map(|p| p.inline_data.as_ref())
    }

    /// Why the prompt was rejected, if it was
    pub fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let request = GenerateRequest::new("gemini-2.5-flash")
            .system("Be brief.")
            .turn(Role::Model, "Benvenuti.")
            .user("Where to stay in Trieste?")
            .tool(Tool::GoogleMaps {})
            .location(LatLng::new(45.65, 13.77));

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [
                    {"role": "model", "parts": [{"text": "Benvenuti."}]},
                    {"role": "user", "parts": [{"text": "Where to stay in Trieste?"}]}
                ],
                "systemInstruction": {"parts": [{"text": "Be brief."}]},
                "tools": [{"googleMaps": {}}],
                "toolConfig": {"retrievalConfig": {"latLng": {"latitude": 45.65, "longitude": 13.77}}}
            })
        );
    }

    #[test]
    fn test_generation_config_serialization() {
        let request = GenerateRequest::new("img")
            .user("vineyards")
            .aspect_ratio("16:9")
            .thinking_budget(1024);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["generationConfig"]["imageConfig"]["aspectRatio"], "16:9");
        assert_eq!(body["generationConfig"]["thinkingConfig"]["thinkingBudget"], 1024);
        assert_eq!(body["generationConfig"]["responseModalities"], json!(["IMAGE", "TEXT"]));
        assert!(body.get("model").is_none());
    }

    #[test]
    fn test_tool_not_duplicated() {
        let request = GenerateRequest::new("m")
            .tool(Tool::GoogleSearch {})
            .tool(Tool::GoogleSearch {});
        assert_eq!(request.tools.len(), 1);
    }

    #[test]
    fn test_text_skips_thoughts() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [
                    {"text": "planning the itinerary", "thought": true},
                    {"text": "Start in Udine, "},
                    {"text": "then Cividale."}
                ]},
                "finishReason": "STOP"
            }]
        }))
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("Start in Udine, then Cividale."));
    }

    #[test]
    fn test_empty_text_is_none() {
        let response = GenerateResponse::default();
        assert!(response.text().is_none());
        assert!(response.sources().is_empty());
        assert!(response.first_image().is_none());
    }

    #[test]
    fn test_sources_deduplicated() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"parts": [{"text": "ok"}]},
                "groundingMetadata": {"groundingChunks": [
                    {"web": {"uri": "https://a.example", "title": "A"}},
                    {"maps": {"uri": "https://maps.example/x", "title": "Miramare"}},
                    {"web": {"uri": "https://a.example", "title": "A again"}},
                    {"web": {"title": "no uri"}},
                    {}
                ]}
            }]
        }))
        .unwrap();

        let sources = response.sources();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].title, "A");
        assert_eq!(sources[0].kind, SourceKind::Web);
        assert_eq!(sources[1].kind, SourceKind::Maps);
    }

    #[test]
    fn test_first_image_data_url() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [
                {"text": "Here is your scene."},
                {"inlineData": {"mimeType": "image/png", "data": "iVBORw0KGgo="}}
            ]}}]
        }))
        .unwrap();
        let image = response.first_image().unwrap();
        assert_eq!(image.data_url(), "data:image/png;base64,iVBORw0KGgo=");
    }

    #[test]
    fn test_block_reason() {
        let response: GenerateResponse =
            serde_json::from_value(json!({"promptFeedback": {"blockReason": "SAFETY"}})).unwrap();
        assert_eq!(response.block_reason(), Some("SAFETY"));
    }

    #[test]
    fn test_latlng_parse() {
        let loc: LatLng = "45.6495, 13.7768".parse().unwrap();
        assert_eq!(loc, LatLng::new(45.6495, 13.7768));
        assert!("45.6".parse::<LatLng>().is_err());
        assert!("95.0,13.0".parse::<LatLng>().is_err());
        assert!("north,east".parse::<LatLng>().is_err());
    }
}
