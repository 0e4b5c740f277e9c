use crate::geo::distance_miles;
use crate::model::{Coordinate, Marker, OpenStatus, PlaceRecord, ResultView};

const FALLBACK_NAME: &str = "Unnamed place";
const FALLBACK_ADDRESS: &str = "Address unavailable";

/// Google Maps turn-by-turn directions link for a place. Coordinates are
/// plain numbers, so no URL encoding is needed.
pub fn directions_url(target: Coordinate) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&destination={},{}",
        target.latitude, target.longitude
    )
}

/// Fixed-point rendering with half-up rounding.
///
/// `format!("{:.1}", 0.85)` rounds to the nearest representable double and
/// prints "0.8"; the rating contract requires 0.85 → "0.9", so the rounding
/// step is explicit.
fn format_fixed(value: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale + 0.5).floor() / scale;
    format!("{rounded:.decimals$}")
}

/// Project one raw place into its display-ready view.
///
/// Pure and deterministic in `(origin, place)`: missing provider fields fall
/// back to placeholder text, they never error.
pub fn format_result(origin: Coordinate, place: &PlaceRecord) -> ResultView {
    // Provider rank is a 0–1000 score, shown as a 0–10 star rating.
    let rating_stars = place.rank.map(|rank| format_fixed(rank / 100.0, 1));

    let open_status = place.open_now.map(|open| {
        if open {
            OpenStatus::Open
        } else {
            OpenStatus::Closed
        }
    });

    let distance = distance_miles(origin, place.coordinate);

    ResultView {
        display_name: display_name(place),
        display_address: place
            .address_line
            .clone()
            .filter(|address| !address.is_empty())
            .unwrap_or_else(|| FALLBACK_ADDRESS.to_string()),
        rating_stars,
        open_status,
        distance_miles: format_fixed(distance, 2),
        directions_url: directions_url(place.coordinate),
    }
}

/// Project one raw place into a map marker with its popup content.
///
/// Same purity guarantees as [`format_result`].
pub fn format_marker(origin: Coordinate, place: &PlaceRecord) -> Marker {
    let name = display_name(place);
    let distance = format_fixed(distance_miles(origin, place.coordinate), 2);
    let url = directions_url(place.coordinate);

    Marker {
        coordinate: place.coordinate,
        popup: format!("{name}\n📍 {distance} miles away\n{url}"),
        label: name,
    }
}

fn display_name(place: &PlaceRecord) -> String {
    match place.name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => FALLBACK_NAME.to_string(),
    }
}
