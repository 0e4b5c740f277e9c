use async_trait::async_trait;
use log::debug;
use reqwest::{Client, header};
use serde::{Deserialize, Deserializer};

use crate::error::{GeocodeError, TransportError};
use crate::model::Coordinate;

use super::GeocodingProvider;

const SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";
// Nominatim's usage policy requires an identifying User-Agent.
const USER_AGENT: &str = concat!("foodfinder/", env!("CARGO_PKG_VERSION"));

/// OSM Nominatim geocoder. Keyless; postal-code lookups only.
#[derive(Debug, Clone, Default)]
pub struct NominatimGeocoder {
    http: Client,
}

impl NominatimGeocoder {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }
}

#[derive(Debug, Deserialize)]
struct NmPlace {
    // Nominatim serializes coordinates as strings.
    #[serde(deserialize_with = "f64_from_string")]
    lat: f64,
    #[serde(deserialize_with = "f64_from_string")]
    lon: f64,
}

fn f64_from_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}

#[async_trait]
impl GeocodingProvider for NominatimGeocoder {
    async fn resolve_postal_code(&self, code: &str) -> Result<Coordinate, GeocodeError> {
        debug!("resolving postal code {code} via nominatim");
        let service = "Nominatim search";

        let res = self
            .http
            .get(SEARCH_URL)
            .header(header::USER_AGENT, USER_AGENT)
            .query(&[
                ("postalcode", code),
                ("countrycodes", "us"),
                ("format", "jsonv2"),
                ("limit", "1"),
            ])
            .send()
            .await
            .map_err(|source| TransportError::Http { service, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| TransportError::Http { service, source })?;

        if !status.is_success() {
            return Err(GeocodeError::Transport(TransportError::Status {
                service,
                status,
                body: truncate_body(&body),
            }));
        }

        let parsed: Vec<NmPlace> = serde_json::from_str(&body)
            .map_err(|source| TransportError::Parse { service, source })?;

        let place = parsed.into_iter().next().ok_or(GeocodeError::NotFound)?;

        Ok(Coordinate::new(place.lat, place.lon))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_coordinates_parse_to_floats() {
        let json = r#"[ { "lat": "40.0094", "lon": "-75.1333" } ]"#;
        let parsed: Vec<NmPlace> = serde_json::from_str(json).unwrap();
        let place = &parsed[0];
        assert!((place.lat - 40.0094).abs() < 1e-9);
        assert!((place.lon + 75.1333).abs() < 1e-9);
    }

    #[test]
    fn non_numeric_coordinate_is_a_parse_error() {
        let json = r#"[ { "lat": "not-a-number", "lon": "-75.1333" } ]"#;
        let parsed: Result<Vec<NmPlace>, _> = serde_json::from_str(json);
        assert!(parsed.is_err());
    }

    #[test]
    fn empty_result_list_parses() {
        let parsed: Vec<NmPlace> = serde_json::from_str("[]").unwrap();
        assert!(parsed.is_empty());
    }
}
