//! Built-in content catalog
//!
//! All page content ships inside the binary. The catalog is built once at
//! startup and shared read-only between handlers.

use chrono::NaiveDate;

use super::types::{
    Attraction, Destination, DestinationCategory, Dish, EventItem, MapPoint, Membership,
};

const IMG: &str = "https://images.unsplash.com";

/// Static content for every page of the portal
#[derive(Debug, Clone)]
pub struct Catalog {
    destinations: Vec<Destination>,
    events: Vec<EventItem>,
    attractions: Vec<Attraction>,
    dishes: Vec<Dish>,
    map_points: Vec<MapPoint>,
    membership: Membership,
    gallery_suggestions: Vec<String>,
}

impl Catalog {
    /// Create a catalog from explicit records (events are kept in date order)
    pub fn new(destinations: Vec<Destination>, mut events: Vec<EventItem>) -> Self {
        events.sort_by_key(|e| e.date);
        Self {
            destinations,
            events,
            attractions: Vec::new(),
            dishes: Vec::new(),
            map_points: Vec::new(),
            membership: default_membership(),
            gallery_suggestions: Vec::new(),
        }
    }

    /// The portal's published content
    pub fn builtin() -> Self {
        let mut catalog = Self::new(builtin_destinations(), builtin_events());
        catalog.attractions = builtin_attractions();
        catalog.dishes = builtin_dishes();
        catalog.map_points = builtin_map_points();
        catalog.gallery_suggestions = vec![
            "A foggy morning over the vineyards of Cormons, oil painting style".to_string(),
            "Piazza Unità d'Italia at night with luxury yachts in the harbor".to_string(),
            "A minimalist Alpine villa in the Julian Alps during winter".to_string(),
            "Aerial view of the Grado lagoon at sunset, cinematic lighting".to_string(),
        ];
        catalog
    }

    /// All destinations, or only those of one category
    pub fn destinations(&self, category: Option<DestinationCategory>) -> Vec<&Destination> {
        self.destinations
            .iter()
            .filter(|d| category.map(|c| d.category == c).unwrap_or(true))
            .collect()
    }

    /// Look up a destination by id
    pub fn destination(&self, id: &str) -> Option<&Destination> {
        self.destinations.iter().find(|d| d.id == id)
    }

    /// Events in date order
    pub fn events(&self) -> &[EventItem] {
        &self.events
    }

    /// Events taking place on or after `today`
    pub fn upcoming(&self, today: NaiveDate) -> Vec<&EventItem> {
        self.events.iter().filter(|e| e.date >= today).collect()
    }

    pub fn attractions(&self) -> &[Attraction] {
        &self.attractions
    }

    /// Find an attraction by its display name or maps query (case-insensitive)
    pub fn attraction(&self, name: &str) -> Option<&Attraction> {
        let needle = name.trim().to_lowercase();
        self.attractions.iter().find(|a| {
            a.name.to_lowercase() == needle || a.maps_query.to_lowercase() == needle
        })
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    pub fn map_points(&self) -> &[MapPoint] {
        &self.map_points
    }

    pub fn membership(&self) -> &Membership {
        &self.membership
    }

    pub fn gallery_suggestions(&self) -> &[String] {
        &self.gallery_suggestions
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn image(photo: &str, width: u32) -> String {
    format!("{}/{}?auto=format&fit=crop&q=80&w={}", IMG, photo, width)
}

fn builtin_destinations() -> Vec<Destination> {
    vec![
        Destination::new("1", "Villa di Colloredo", "San Daniele del Friuli", DestinationCategory::Villa)
            .description("A 16th-century masterpiece overlooking the gentle hills of Friuli.")
            .image(image("photo-1518780664697-55e3ad937233", 800)),
        Destination::new("2", "Borgo Enoteca", "Cormons", DestinationCategory::Vineyard)
            .description("Boutique vineyard stay in the heart of the Collio wine region.")
            .image(image("photo-1505944270255-bd2b68af644d", 800)),
        Destination::new("3", "Trieste Grand Palace", "Piazza Unità d'Italia", DestinationCategory::Coastal)
            .description("Neoclassical opulence with sweeping views of the Adriatic Sea.")
            .image(image("photo-1520175480921-4edfa0683001", 800)),
        Destination::new("4", "Alps Refuge Resort", "Tarvisio", DestinationCategory::Mountain)
            .description("Ultra-modern luxury architecture nestled in the Julian Alps.")
            .image(image("photo-1542314831-068cd1dbfeeb", 800)),
    ]
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

fn builtin_events() -> Vec<EventItem> {
    vec![
        EventItem::new("1", "Barcolana Regatta", date(2025, 10, 12), "Maritime")
            .description("The world's largest sailing race takes over the Gulf of Trieste.")
            .image(image("photo-1512412086113-146399c23577", 800)),
        EventItem::new("2", "Aria di Festa", date(2025, 6, 22), "Gastronomy")
            .description("A celebration of the legendary Prosciutto di San Daniele.")
            .image(image("photo-1615141982883-c7ad0e69fd62", 800)),
        EventItem::new("3", "Mittelfest", date(2025, 7, 15), "Culture")
            .description("International festival of theatre and dance in Cividale del Friuli.")
            .image(image("photo-1514525253361-bee8718a74a2", 800)),
    ]
}

fn builtin_attractions() -> Vec<Attraction> {
    vec![
        Attraction {
            name: "Miramare Castle".to_string(),
            city: "Trieste".to_string(),
            description: "The Archduke's dream on the cliffs. A white limestone castle jutting into the blue Adriatic, surrounded by botanical gardens.".to_string(),
            image: image("photo-1520175480921-4edfa0683001", 1200),
            maps_query: "Castello di Miramare".to_string(),
        },
        Attraction {
            name: "Basilica of Aquileia".to_string(),
            city: "Aquileia".to_string(),
            description: "A UNESCO heritage site featuring the largest early Christian floor mosaic in the Western world. A journey back to the Roman Empire.".to_string(),
            image: image("photo-1544013587-4142a461b4fa", 1200),
            maps_query: "Basilica di Aquileia".to_string(),
        },
        Attraction {
            name: "Loggia del Lionello".to_string(),
            city: "Udine".to_string(),
            description: "The heart of Udine. A stunning Venetian Gothic loggia made of pink and white marble, echoing the Piazza San Marco.".to_string(),
            image: image("photo-1541811655610-184568600c24", 1200),
            maps_query: "Loggia del Lionello Udine".to_string(),
        },
    ]
}

fn builtin_dishes() -> Vec<Dish> {
    [
        ("Frico & Polenta", "Montasio cheese & potato crisp"),
        ("Cjarsons", "Sweet & savory Carnic ravioli"),
        ("Gubana", "Rich nut-filled dessert from Cividale"),
        ("Boretto alla Graisana", "Authentic fish stew from Grado"),
    ]
    .into_iter()
    .map(|(name, description)| Dish {
        name: name.to_string(),
        description: description.to_string(),
    })
    .collect()
}

fn builtin_map_points() -> Vec<MapPoint> {
    [
        ("Trieste", 85.0, 85.0),
        ("Udine", 65.0, 55.0),
        ("Pordenone", 25.0, 60.0),
        ("Gorizia", 80.0, 65.0),
        ("Tarvisio", 80.0, 15.0),
    ]
    .into_iter()
    .map(|(name, x, y)| MapPoint {
        name: name.to_string(),
        x,
        y,
    })
    .collect()
}

fn default_membership() -> Membership {
    Membership {
        title: "The Inner Circle".to_string(),
        privileges: vec![
            "Priority Villa Bookings".to_string(),
            "24/7 Personal Concierge".to_string(),
            "Private Vineyard Access".to_string(),
        ],
        events: vec![
            "VIP Barcolana Hospitality".to_string(),
            "Chef's Table Invitations".to_string(),
            "Seasonal White Truffle Hunts".to_string(),
        ],
        annual_limit: 100,
    }
}
