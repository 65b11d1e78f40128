//! Hosted Model Integration
//!
//! Client for the Gemini `generateContent` REST API and the payload types the
//! assistants build requests from.
//!
//! ## Architecture
//!
//! - **GenerativeModel**: Seam between the assistants and the hosted model
//! - **GeminiClient**: reqwest implementation against the REST endpoint
//! - **types**: Request builder and response extraction (text, citations, images)

mod client;
mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{GeminiClient, GeminiConfig, GeminiError, DEFAULT_BASE_URL};
pub use types::{
    Candidate, ChunkSource, Content, GenerateRequest, GenerateResponse, GenerationConfig,
    GroundingChunk, GroundingMetadata, InlineData, LatLng, Part, PromptFeedback, Role, Source,
    SourceKind, Tool,
};

use async_trait::async_trait;

/// A hosted generative model
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Provider name for logs and health output
    fn name(&self) -> &str;

    /// Whether credentials are present
    fn is_configured(&self) -> bool;

    /// Run one generateContent call
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, GeminiError>;
}
