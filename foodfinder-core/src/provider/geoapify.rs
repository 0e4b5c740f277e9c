use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{GeocodeError, LocateError, TransportError};
use crate::model::{Category, Coordinate, PlaceRecord};

use super::{GeocodingProvider, LocationSource, PlacesProvider};

const GEOCODE_URL: &str = "https://api.geoapify.com/v1/geocode/search";
const PLACES_URL: &str = "https://api.geoapify.com/v2/places";
const IPINFO_URL: &str = "https://api.geoapify.com/v1/ipinfo";

/// Geoapify API adapter. One API key backs geocoding, places search and
/// IP-based location lookup.
#[derive(Debug, Clone)]
pub struct GeoapifyProvider {
    api_key: String,
    http: Client,
}

impl GeoapifyProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        service: &'static str,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, TransportError> {
        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| TransportError::Http { service, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| TransportError::Http { service, source })?;

        if !status.is_success() {
            return Err(TransportError::Status {
                service,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| TransportError::Parse { service, source })
    }
}

#[derive(Debug, Deserialize)]
struct GpFeatureCollection<P> {
    #[serde(default = "Vec::new")]
    features: Vec<GpFeature<P>>,
}

#[derive(Debug, Deserialize)]
struct GpFeature<P> {
    properties: P,
}

#[derive(Debug, Deserialize)]
struct GpGeocodeProperties {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct GpPlaceProperties {
    name: Option<String>,
    lat: f64,
    lon: f64,
    address_line2: Option<String>,
    rank: Option<f64>,
    opening_hours: Option<GpOpeningHours>,
}

#[derive(Debug, Deserialize)]
struct GpOpeningHours {
    open_now: Option<bool>,
}

impl GpPlaceProperties {
    fn into_record(self) -> PlaceRecord {
        PlaceRecord {
            coordinate: Coordinate::new(self.lat, self.lon),
            name: self.name,
            address_line: self.address_line2,
            rank: self.rank,
            open_now: self.opening_hours.and_then(|hours| hours.open_now),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GpIpInfo {
    location: GpIpLocation,
}

#[derive(Debug, Deserialize)]
struct GpIpLocation {
    latitude: f64,
    longitude: f64,
}

#[async_trait]
impl GeocodingProvider for GeoapifyProvider {
    async fn resolve_postal_code(&self, code: &str) -> Result<Coordinate, GeocodeError> {
        debug!("resolving postal code {code} via geoapify");

        let parsed: GpFeatureCollection<GpGeocodeProperties> = self
            .get_json(
                "Geoapify geocoding",
                GEOCODE_URL,
                &[
                    ("postcode", code),
                    ("country", "USA"),
                    ("apiKey", self.api_key.as_str()),
                ],
            )
            .await?;

        let feature = parsed
            .features
            .into_iter()
            .next()
            .ok_or(GeocodeError::NotFound)?;

        Ok(Coordinate::new(feature.properties.lat, feature.properties.lon))
    }
}

#[async_trait]
impl PlacesProvider for GeoapifyProvider {
    async fn find_nearby(
        &self,
        origin: Coordinate,
        category: Category,
        keyword: Option<&str>,
        radius_meters: u32,
        limit: usize,
    ) -> Result<Vec<PlaceRecord>, TransportError> {
        // Geoapify circle filters take lon,lat order.
        let filter = format!(
            "circle:{},{},{}",
            origin.longitude, origin.latitude, radius_meters
        );
        let bias = format!("proximity:{},{}", origin.longitude, origin.latitude);
        let limit = limit.to_string();

        let mut query = vec![
            ("categories", category.as_str()),
            ("filter", filter.as_str()),
            ("bias", bias.as_str()),
            ("limit", limit.as_str()),
            ("apiKey", self.api_key.as_str()),
        ];
        if let Some(keyword) = keyword.filter(|keyword| !keyword.is_empty()) {
            query.push(("name", keyword));
        }

        let parsed: GpFeatureCollection<GpPlaceProperties> =
            self.get_json("Geoapify places", PLACES_URL, &query).await?;

        Ok(parsed
            .features
            .into_iter()
            .map(|feature| feature.properties.into_record())
            .collect())
    }
}

#[async_trait]
impl LocationSource for GeoapifyProvider {
    async fn current_coordinate(&self) -> Result<Coordinate, LocateError> {
        let result: Result<GpIpInfo, TransportError> = self
            .get_json(
                "Geoapify ipinfo",
                IPINFO_URL,
                &[("apiKey", self.api_key.as_str())],
            )
            .await;

        match result {
            Ok(info) => Ok(Coordinate::new(
                info.location.latitude,
                info.location.longitude,
            )),
            Err(TransportError::Status { status, .. })
                if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN =>
            {
                Err(LocateError::PermissionDenied)
            }
            Err(err) => {
                debug!("ipinfo lookup failed: {err}");
                Err(LocateError::Unavailable)
            }
        }
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
