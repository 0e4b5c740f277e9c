use foodfinder_core::{
    Coordinate, GeocodeError, LocateError, ResolveError, ResultView, SearchResults,
};

const NO_RESULTS_MESSAGE: &str = "No food places found nearby.";
const SEARCH_FAILURE_MESSAGE: &str = "⚠️ Error loading food data.";

/// Display state owned by the presentation layer, replaced wholesale on each
/// new search.
#[derive(Debug, Default)]
pub struct App {
    pub origin: Option<Coordinate>,
    pub results: SearchResults,
}

/// Render the results as a card list, one card per place, in provider order.
pub fn list(app: &App) {
    if app.results.is_empty() {
        println!("{NO_RESULTS_MESSAGE}");
        return;
    }

    for view in &app.results.views {
        card(view);
    }
}

fn card(view: &ResultView) {
    println!("{}", view.display_name);
    println!("  {}", view.display_address);
    if let Some(stars) = &view.rating_stars {
        println!("  ⭐ Rating: {stars}");
    }
    if let Some(status) = view.open_status {
        println!("  {}", status.label());
    }
    println!("  📍 {} miles away", view.distance_miles);
    println!("  Get Directions: {}", view.directions_url);
    println!();
}

/// Render the results as map markers: one pin line per place with its popup
/// content underneath.
pub fn markers(app: &App) {
    if app.results.is_empty() {
        println!("{NO_RESULTS_MESSAGE}");
        return;
    }

    if let Some(origin) = app.origin {
        println!(
            "Centered on ({:.4}, {:.4})",
            origin.latitude, origin.longitude
        );
        println!();
    }

    for marker in &app.results.markers {
        println!(
            "📌 {} ({:.4}, {:.4})",
            marker.label, marker.coordinate.latitude, marker.coordinate.longitude
        );
        // The popup's first line repeats the label.
        for line in marker.popup.lines().skip(1) {
            println!("   {line}");
        }
        println!();
    }
}

pub fn search_failure() {
    println!("{SEARCH_FAILURE_MESSAGE}");
}

pub fn resolve_failure(err: &ResolveError) {
    println!("{}", resolve_failure_message(err));
}

fn resolve_failure_message(err: &ResolveError) -> &'static str {
    match err {
        ResolveError::Device(LocateError::PermissionDenied) => {
            "Location access denied. Please enter a postal code manually."
        }
        ResolveError::Device(LocateError::Unavailable) => {
            "Current location is unavailable. Please enter a postal code manually."
        }
        ResolveError::Geocode(GeocodeError::NotFound) => "Invalid postal code.",
        ResolveError::Geocode(GeocodeError::Transport(_)) => "Error fetching location data.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_resolve_failure_has_its_own_message() {
        let denied = ResolveError::Device(LocateError::PermissionDenied);
        let unavailable = ResolveError::Device(LocateError::Unavailable);
        let not_found = ResolveError::Geocode(GeocodeError::NotFound);

        assert!(resolve_failure_message(&denied).contains("Location access denied"));
        assert!(resolve_failure_message(&unavailable).contains("unavailable"));
        assert_eq!(resolve_failure_message(&not_found), "Invalid postal code.");
    }

    #[test]
    fn outcome_messages_match_the_ui_contract() {
        assert_eq!(NO_RESULTS_MESSAGE, "No food places found nearby.");
        assert_eq!(SEARCH_FAILURE_MESSAGE, "⚠️ Error loading food data.");
    }
}
