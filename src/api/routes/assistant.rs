//! Assistant Routes
//!
//! Endpoints that forward visitor input to the hosted model.
//!
//! - POST /api/v1/concierge - Concierge chat (optional location)
//! - POST /api/v1/guide - Elite guide (elite or fast mode)
//! - POST /api/v1/discovery - Ask the concierge about a landmark
//! - POST /api/v1/recipes - AI chef recipe
//! - POST /api/v1/gallery - Generate a gallery picture
//!
//! Blank or missing input and malformed JSON are rejected with a
//! `VALIDATION_ERROR` before the model is contacted. When the model
//! call fails, chat-like endpoints answer with the widget's apology
//! (`fallback: true`); the gallery reports the failure as an error.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{
    ChatResponse, ConciergeRequest, DiscoveryRequest, GalleryRequest, GuideMode, GuideRequest,
    RecipeRequest, RecipeResponse,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::ApiJson;
use crate::api::state::AppState;
use crate::assistant::{render_markdown, AssistantError, AssistantReply, GalleryImage, Widget};

/// Turn an assistant outcome into a chat reply, apologizing on model failure
fn chat_outcome(
    widget: Widget,
    outcome: Result<AssistantReply, AssistantError>,
) -> ApiResult<Json<ChatResponse>> {
    match outcome {
        Ok(reply) => Ok(Json(reply.into())),
        Err(e) if e.is_invalid_input() => Err(ApiError::Validation(e.to_string())),
        Err(e) => {
            tracing::warn!(widget = %widget, error = %e, "Model call failed, sending apology");
            Ok(Json(ChatResponse::apology(widget)))
        }
    }
}

/// POST /api/v1/concierge
pub async fn concierge(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<ConciergeRequest>,
) -> ApiResult<Json<ChatResponse>> {
    let outcome = state
        .assistant
        .chat_with_concierge(&req.message, &req.history, req.location)
        .await;
    chat_outcome(Widget::Concierge, outcome)
}

/// POST /api/v1/guide
pub async fn guide(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<GuideRequest>,
) -> ApiResult<Json<ChatResponse>> {
    let outcome = match req.mode {
        GuideMode::Fast => state.assistant.ask_fast_guide(&req.message).await,
        GuideMode::Elite => {
            state
                .assistant
                .ask_elite_guide(&req.message, &req.history, req.deep_thinking)
                .await
        }
    };
    chat_outcome(Widget::EliteGuide, outcome)
}

/// POST /api/v1/discovery
pub async fn discovery(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<DiscoveryRequest>,
) -> ApiResult<Json<ChatResponse>> {
    if req.attraction.trim().is_empty() {
        return Err(AssistantError::EmptyInput.into());
    }
    let attraction = state
        .catalog
        .attraction(&req.attraction)
        .ok_or_else(|| ApiError::NotFound(format!("attraction '{}'", req.attraction)))?;

    let outcome = state.assistant.discover(attraction, req.location).await;
    chat_outcome(Widget::Concierge, outcome)
}

/// POST /api/v1/recipes
pub async fn recipe(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<RecipeRequest>,
) -> ApiResult<Json<RecipeResponse>> {
    match state.assistant.culinary_recipe(&req.dish).await {
        Ok(recipe) => Ok(Json(recipe.into())),
        Err(e) if e.is_invalid_input() => Err(ApiError::Validation(e.to_string())),
        Err(e) => {
            tracing::warn!(dish = %req.dish, error = %e, "Chef unavailable, sending apology");
            let apology = Widget::Chef.apology().unwrap_or_default();
            Ok(Json(RecipeResponse {
                dish: req.dish.trim().to_string(),
                markdown: apology.to_string(),
                html: render_markdown(apology),
                fallback: true,
            }))
        }
    }
}

/// POST /api/v1/gallery
pub async fn gallery(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<GalleryRequest>,
) -> ApiResult<Json<GalleryImage>> {
    let image = state
        .assistant
        .generate_gallery_image(&req.prompt, req.aspect_ratio)
        .await
        .map_err(|e| {
            if !e.is_invalid_input() {
                tracing::error!(error = %e, "Image generation failed");
            }
            ApiError::from(e)
        })?;
    Ok(Json(image))
}
