//! Core library for the `foodfinder` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Great-circle distance math and result formatting
//! - Abstraction over geocoding, places and location providers
//! - The nearby-food search orchestration
//!
//! It is used by `foodfinder-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod format;
pub mod geo;
pub mod model;
pub mod provider;
pub mod search;

pub use config::{Config, ProviderConfig};
pub use error::{GeocodeError, LocateError, ResolveError, SearchFailed, TransportError};
pub use format::{directions_url, format_marker, format_result};
pub use geo::distance_miles;
pub use model::{Category, Coordinate, Marker, OpenStatus, PlaceRecord, ResultView};
pub use provider::{GeocoderId, GeocodingProvider, LocationSource, PlacesProvider};
pub use search::{RADIUS_METERS, RESULT_LIMIT, SearchRequest, SearchResults, search};
