use crate::{
    Config,
    error::{GeocodeError, LocateError, TransportError},
    model::{Category, Coordinate, PlaceRecord},
    provider::{geoapify::GeoapifyProvider, nominatim::NominatimGeocoder},
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod geoapify;
pub mod nominatim;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeocoderId {
    Geoapify,
    Nominatim,
}

impl GeocoderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeocoderId::Geoapify => "geoapify",
            GeocoderId::Nominatim => "nominatim",
        }
    }

    pub const fn all() -> &'static [GeocoderId] {
        &[GeocoderId::Geoapify, GeocoderId::Nominatim]
    }
}

impl std::fmt::Display for GeocoderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for GeocoderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "geoapify" => Ok(GeocoderId::Geoapify),
            "nominatim" => Ok(GeocoderId::Nominatim),
            _ => Err(anyhow::anyhow!(
                "Unknown geocoder '{value}'. Supported geocoders: geoapify, nominatim."
            )),
        }
    }
}

/// Resolves a postal code to a coordinate.
#[async_trait]
pub trait GeocodingProvider: Send + Sync + Debug {
    async fn resolve_postal_code(&self, code: &str) -> Result<Coordinate, GeocodeError>;
}

/// Returns food places near an origin, in provider relevance order.
#[async_trait]
pub trait PlacesProvider: Send + Sync + Debug {
    async fn find_nearby(
        &self,
        origin: Coordinate,
        category: Category,
        keyword: Option<&str>,
        radius_meters: u32,
        limit: usize,
    ) -> Result<Vec<PlaceRecord>, TransportError>;
}

/// Reports the device's current coordinate.
#[async_trait]
pub trait LocationSource: Send + Sync + Debug {
    async fn current_coordinate(&self) -> Result<Coordinate, LocateError>;
}

/// Construct the Geoapify adapter from config. It backs places search,
/// current-location lookup, and optionally geocoding.
pub fn geoapify_from_config(config: &Config) -> anyhow::Result<GeoapifyProvider> {
    let api_key = config.provider_api_key(GeocoderId::Geoapify).ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for provider 'geoapify'.\n\
                 Hint: run `foodfinder configure geoapify` and enter your API key."
        )
    })?;

    Ok(GeoapifyProvider::new(api_key.to_owned()))
}

/// Construct a geocoder from config and explicit GeocoderId.
pub fn geocoder_from_config(
    id: GeocoderId,
    config: &Config,
) -> anyhow::Result<Box<dyn GeocodingProvider>> {
    let boxed: Box<dyn GeocodingProvider> = match id {
        GeocoderId::Geoapify => Box::new(geoapify_from_config(config)?),
        GeocoderId::Nominatim => Box::new(NominatimGeocoder::new()),
    };

    Ok(boxed)
}

/// Construct the default geocoder from config, using the `default_geocoder`
/// field. Falls back to the keyless Nominatim backend when unset.
pub fn default_geocoder_from_config(config: &Config) -> anyhow::Result<Box<dyn GeocodingProvider>> {
    let id = config.default_geocoder_id()?;
    geocoder_from_config(id, config)
}
