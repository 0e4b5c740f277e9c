use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// A point on Earth. Latitude in [-90, 90], longitude in [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Food categories understood by the places provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    Restaurant,
    FastFood,
    Cafe,
    Bar,
    IceCream,
}

impl Category {
    /// The provider-side category tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Restaurant => "catering.restaurant",
            Category::FastFood => "catering.fast_food",
            Category::Cafe => "catering.cafe",
            Category::Bar => "catering.bar",
            Category::IceCream => "catering.ice_cream",
        }
    }

    pub const fn all() -> &'static [Category] {
        &[
            Category::Restaurant,
            Category::FastFood,
            Category::Cafe,
            Category::Bar,
            Category::IceCream,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Category {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "restaurant" | "catering.restaurant" => Ok(Category::Restaurant),
            "fast-food" | "fast_food" | "catering.fast_food" => Ok(Category::FastFood),
            "cafe" | "catering.cafe" => Ok(Category::Cafe),
            "bar" | "catering.bar" => Ok(Category::Bar),
            "ice-cream" | "ice_cream" | "catering.ice_cream" => Ok(Category::IceCream),
            _ => Err(anyhow::anyhow!(
                "Unknown category '{value}'. Supported categories: restaurant, fast-food, cafe, bar, ice-cream."
            )),
        }
    }
}

/// A raw food place as returned by a places provider.
///
/// Everything except the coordinate is optional; missing fields are filled
/// with display fallbacks when the record is projected into a [`ResultView`].
#[derive(Debug, Clone)]
pub struct PlaceRecord {
    pub name: Option<String>,
    pub coordinate: Coordinate,
    pub address_line: Option<String>,
    /// Provider relevance score on a 0–1000 scale.
    pub rank: Option<f64>,
    /// `None` when the provider doesn't know the opening hours.
    pub open_now: Option<bool>,
}

/// Whether a place is currently open. Unknown is the absent case and is
/// never rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpenStatus {
    Open,
    Closed,
}

impl OpenStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OpenStatus::Open => "🟢 Open Now",
            OpenStatus::Closed => "🔴 Closed",
        }
    }
}

/// Display-ready projection of one place, as shown in the result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultView {
    pub display_name: String,
    pub display_address: String,
    /// 0–10 star rating at one decimal, absent when the provider gave no rank.
    pub rating_stars: Option<String>,
    pub open_status: Option<OpenStatus>,
    /// Great-circle distance from the search origin, in miles, two decimals.
    pub distance_miles: String,
    pub directions_url: String,
}

/// One map marker: where to pin it, what to label it, what its popup says.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub coordinate: Coordinate,
    pub label: String,
    pub popup: String,
}
