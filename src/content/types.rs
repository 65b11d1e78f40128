//! Content record types for the portal pages
//!
//! - `Destination`: A bookable stay (villa, vineyard, coastal, mountain)
//! - `EventItem`: A regional event with a calendar date
//! - `Attraction`: A landmark on the discovery page
//! - `Dish`: A traditional dish the AI chef can prepare
//! - `MapPoint`: A marker on the interactive regional map
//! - `Membership`: The inner-circle membership offer

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A luxury stay listed on the destinations page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Destination {
    pub id: String,
    pub name: String,
    /// Town or landmark the property sits in
    pub location: String,
    pub description: String,
    /// Hero image URL
    pub image: String,
    pub category: DestinationCategory,
}

impl Destination {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location: impl Into<String>,
        category: DestinationCategory,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: location.into(),
            description: String::new(),
            image: String::new(),
            category,
        }
    }

    /// Builder method: set description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder method: set image URL
    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

/// Kind of stay
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DestinationCategory {
    Villa,
    Vineyard,
    Coastal,
    Mountain,
}

impl DestinationCategory {
    /// Get all categories for iteration
    pub fn all() -> &'static [DestinationCategory] {
        &[
            DestinationCategory::Villa,
            DestinationCategory::Vineyard,
            DestinationCategory::Coastal,
            DestinationCategory::Mountain,
        ]
    }
}

impl std::fmt::Display for DestinationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DestinationCategory::Villa => write!(f, "Villa"),
            DestinationCategory::Vineyard => write!(f, "Vineyard"),
            DestinationCategory::Coastal => write!(f, "Coastal"),
            DestinationCategory::Mountain => write!(f, "Mountain"),
        }
    }
}

impl std::str::FromStr for DestinationCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "villa" => Ok(DestinationCategory::Villa),
            "vineyard" => Ok(DestinationCategory::Vineyard),
            "coastal" => Ok(DestinationCategory::Coastal),
            "mountain" => Ok(DestinationCategory::Mountain),
            other => Err(format!("unknown destination category: {}", other)),
        }
    }
}

/// A regional event on the events page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventItem {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    /// Free-form category (Maritime, Gastronomy, Culture, ...)
    pub category: String,
    pub description: String,
    pub image: String,
}

impl EventItem {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        date: NaiveDate,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            date,
            category: category.into(),
            description: String::new(),
            image: String::new(),
        }
    }

    /// Builder method: set description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder method: set image URL
    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Date as shown on the site, e.g. "October 12, 2025"
    pub fn display_date(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }
}

/// A landmark on the discovery page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attraction {
    pub name: String,
    pub city: String,
    pub description: String,
    pub image: String,
    /// Search text used for the maps link and the concierge question
    pub maps_query: String,
}

impl Attraction {
    /// Google Maps search link for this landmark
    pub fn maps_url(&self) -> String {
        format!(
            "https://www.google.com/maps/search/?api=1&query={}",
            urlencoding::encode(&self.maps_query)
        )
    }

    /// Question handed to the concierge when the visitor asks about this landmark
    pub fn concierge_question(&self) -> String {
        format!(
            "Alessandro, tell me more about {}. I want to know about opening hours and the best time of day to visit.",
            self.maps_query
        )
    }
}

/// A traditional dish offered to the AI chef
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dish {
    pub name: String,
    pub description: String,
}

/// A marker on the interactive map, positioned in percent of the map box
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapPoint {
    pub name: String,
    pub x: f32,
    pub y: f32,
}

/// The inner-circle membership offer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Membership {
    pub title: String,
    pub privileges: Vec<String>,
    pub events: Vec<String>,
    /// Members admitted per year
    pub annual_limit: u32,
}

/// Brand palette
pub mod colors {
    pub const TEAL: &str = "#002B2B";
    pub const WHITE: &str = "#F8F9FA";
    pub const GOLD: &str = "#C5A059";
}
