//! Content Routes
//!
//! Read-only endpoints over the built-in catalog.
//!
//! - GET /api/v1/destinations - List destinations (optional `category`)
//! - GET /api/v1/destinations/:id - Get one destination
//! - GET /api/v1/events - List events (optional `upcoming=true`)
//! - GET /api/v1/attractions - Discovery landmarks
//! - GET /api/v1/dishes - Dishes offered to the AI chef
//! - GET /api/v1/map - Interactive map markers
//! - GET /api/v1/membership - Inner-circle membership offer
//! - GET /api/v1/gallery/suggestions - Gallery prompt ideas

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{
    AttractionDto, DestinationQuery, EventDto, EventsQuery, GallerySuggestionsResponse,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::assistant::AspectRatio;
use crate::content::{Destination, DestinationCategory, Dish, MapPoint, Membership};

/// GET /api/v1/destinations
pub async fn list_destinations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DestinationQuery>,
) -> ApiResult<Json<Vec<Destination>>> {
    let category = query
        .category
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .map(|c| c.parse::<DestinationCategory>())
        .transpose()
        .map_err(ApiError::Validation)?;

    let destinations = state
        .catalog
        .destinations(category)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(destinations))
}

/// GET /api/v1/destinations/:id
pub async fn get_destination(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Destination>> {
    state
        .catalog
        .destination(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("destination '{}'", id)))
}

/// GET /api/v1/events
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EventsQuery>,
) -> Json<Vec<EventDto>> {
    let events: Vec<EventDto> = if query.upcoming {
        let today = chrono::Local::now().date_naive();
        state
            .catalog
            .upcoming(today)
            .into_iter()
            .map(EventDto::from)
            .collect()
    } else {
        state.catalog.events().iter().map(EventDto::from).collect()
    };
    Json(events)
}

/// GET /api/v1/attractions
pub async fn list_attractions(State(state): State<Arc<AppState>>) -> Json<Vec<AttractionDto>> {
    Json(
        state
            .catalog
            .attractions()
            .iter()
            .map(AttractionDto::from)
            .collect(),
    )
}

/// GET /api/v1/dishes
pub async fn list_dishes(State(state): State<Arc<AppState>>) -> Json<Vec<Dish>> {
    Json(state.catalog.dishes().to_vec())
}

/// GET /api/v1/map
pub async fn map_points(State(state): State<Arc<AppState>>) -> Json<Vec<MapPoint>> {
    Json(state.catalog.map_points().to_vec())
}

/// GET /api/v1/membership
pub async fn membership(State(state): State<Arc<AppState>>) -> Json<Membership> {
    Json(state.catalog.membership().clone())
}

/// GET /api/v1/gallery/suggestions
pub async fn gallery_suggestions(
    State(state): State<Arc<AppState>>,
) -> Json<GallerySuggestionsResponse> {
    Json(GallerySuggestionsResponse {
        suggestions: state.catalog.gallery_suggestions().to_vec(),
        aspect_ratios: AspectRatio::all().to_vec(),
    })
}
