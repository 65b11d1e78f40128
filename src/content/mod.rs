//! Portal Content
//!
//! Static records behind the informational pages: destinations, events,
//! discovery landmarks, dishes, map markers and the membership offer.

mod catalog;
mod types;

pub use catalog::Catalog;
pub use types::{
    colors, Attraction, Destination, DestinationCategory, Dish, EventItem, MapPoint, Membership,
};
