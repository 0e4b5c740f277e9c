use reqwest::StatusCode;
use thiserror::Error;

/// A network or parse failure while talking to an external provider.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {service} failed")]
    Http {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} request failed with status {status}: {body}")]
    Status {
        service: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("failed to parse {service} response")]
    Parse {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure resolving a postal code to a coordinate.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("postal code matched no location")]
    NotFound,

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Failure obtaining the device's current coordinate.
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("location access denied")]
    PermissionDenied,

    #[error("current location unavailable")]
    Unavailable,
}

/// Failure obtaining a search origin, from either source.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error(transparent)]
    Device(#[from] LocateError),
}

/// A nearby-places search that could not complete. Terminal for the current
/// attempt; never retried.
#[derive(Debug, Error)]
#[error("failed to load nearby food places")]
pub struct SearchFailed(#[from] pub TransportError);
