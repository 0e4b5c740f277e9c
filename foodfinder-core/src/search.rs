use log::{debug, info};

use crate::error::{ResolveError, SearchFailed};
use crate::format::{format_marker, format_result};
use crate::model::{Category, Coordinate, Marker, ResultView};
use crate::provider::{GeocodingProvider, LocationSource, PlacesProvider};

/// Fixed search radius: 10 miles.
pub const RADIUS_METERS: u32 = 16_093;

/// Maximum number of places requested from the provider.
pub const RESULT_LIMIT: usize = 20;

/// One nearby-food search: where to look, what kind of food, optional name
/// filter.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub origin: Coordinate,
    pub category: Category,
    pub keyword: Option<String>,
}

/// Both projections of one provider response. `views` and `markers` are the
/// same places in the same order, so list and map renditions always agree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub views: Vec<ResultView>,
    pub markers: Vec<Marker>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

/// Resolve the search origin: the postal code when one is given, the device
/// location otherwise. Blank postal codes fall through to the device.
pub async fn resolve_origin(
    geocoder: &dyn GeocodingProvider,
    device: &dyn LocationSource,
    postal_code: Option<&str>,
) -> Result<Coordinate, ResolveError> {
    match postal_code.map(str::trim).filter(|code| !code.is_empty()) {
        Some(code) => Ok(geocoder.resolve_postal_code(code).await?),
        None => Ok(device.current_coordinate().await?),
    }
}

/// Find food places near the request origin and project them into
/// display-ready views and map markers, preserving the provider's relevance
/// order.
///
/// An empty result set is `Ok` with empty sequences, not an error. Any
/// transport or parse failure surfaces as the single [`SearchFailed`] error.
pub async fn search(
    places: &dyn PlacesProvider,
    request: &SearchRequest,
) -> Result<SearchResults, SearchFailed> {
    debug!(
        "searching {} within {RADIUS_METERS} m of ({}, {})",
        request.category, request.origin.latitude, request.origin.longitude
    );

    let records = places
        .find_nearby(
            request.origin,
            request.category,
            request.keyword.as_deref(),
            RADIUS_METERS,
            RESULT_LIMIT,
        )
        .await?;

    info!("provider returned {} places", records.len());

    Ok(SearchResults {
        views: records
            .iter()
            .map(|place| format_result(request.origin, place))
            .collect(),
        markers: records
            .iter()
            .map(|place| format_marker(request.origin, place))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GeocodeError, LocateError, TransportError};
    use crate::model::PlaceRecord;
    use async_trait::async_trait;

    #[derive(Debug)]
    struct FakePlaces {
        records: Option<Vec<PlaceRecord>>,
    }

    impl FakePlaces {
        fn returning(records: Vec<PlaceRecord>) -> Self {
            Self { records: Some(records) }
        }

        fn failing() -> Self {
            Self { records: None }
        }
    }

    #[async_trait]
    impl PlacesProvider for FakePlaces {
        async fn find_nearby(
            &self,
            _origin: Coordinate,
            _category: Category,
            _keyword: Option<&str>,
            _radius_meters: u32,
            _limit: usize,
        ) -> Result<Vec<PlaceRecord>, TransportError> {
            self.records.clone().ok_or_else(|| TransportError::Status {
                service: "fake places",
                status: reqwest::StatusCode::BAD_GATEWAY,
                body: "upstream broke".to_string(),
            })
        }
    }

    #[derive(Debug)]
    struct FakeGeocoder {
        result: Result<Coordinate, GeocodeError>,
    }

    #[async_trait]
    impl GeocodingProvider for FakeGeocoder {
        async fn resolve_postal_code(&self, _code: &str) -> Result<Coordinate, GeocodeError> {
            match &self.result {
                Ok(coordinate) => Ok(*coordinate),
                Err(GeocodeError::NotFound) => Err(GeocodeError::NotFound),
                Err(GeocodeError::Transport(_)) => unreachable!("not used in these tests"),
            }
        }
    }

    #[derive(Debug)]
    struct FakeDevice {
        result: Result<Coordinate, LocateError>,
    }

    #[async_trait]
    impl LocationSource for FakeDevice {
        async fn current_coordinate(&self) -> Result<Coordinate, LocateError> {
            match &self.result {
                Ok(coordinate) => Ok(*coordinate),
                Err(LocateError::PermissionDenied) => Err(LocateError::PermissionDenied),
                Err(LocateError::Unavailable) => Err(LocateError::Unavailable),
            }
        }
    }

    fn origin() -> Coordinate {
        Coordinate::new(40.0, -75.0)
    }

    fn request() -> SearchRequest {
        SearchRequest {
            origin: origin(),
            category: Category::Restaurant,
            keyword: None,
        }
    }

    fn record(name: &str) -> PlaceRecord {
        PlaceRecord {
            name: Some(name.to_string()),
            coordinate: Coordinate::new(40.01, -75.01),
            address_line: None,
            rank: None,
            open_now: None,
        }
    }

    #[tokio::test]
    async fn no_results_is_not_an_error() {
        let places = FakePlaces::returning(Vec::new());
        let results = search(&places, &request()).await.expect("empty is ok");
        assert!(results.is_empty());
        assert!(results.markers.is_empty());
    }

    #[tokio::test]
    async fn provider_order_is_preserved() {
        let places = FakePlaces::returning(vec![
            record("first"),
            record("second"),
            record("third"),
        ]);
        let results = search(&places, &request()).await.unwrap();

        let names: Vec<&str> = results
            .views
            .iter()
            .map(|view| view.display_name.as_str())
            .collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn views_and_markers_describe_the_same_places() {
        let places = FakePlaces::returning(vec![record("first"), record("second")]);
        let results = search(&places, &request()).await.unwrap();

        assert_eq!(results.views.len(), results.markers.len());
        for (view, marker) in results.views.iter().zip(&results.markers) {
            assert_eq!(view.display_name, marker.label);
        }
    }

    #[tokio::test]
    async fn transport_failure_becomes_search_failed() {
        let places = FakePlaces::failing();
        let err = search(&places, &request()).await.unwrap_err();
        assert!(err.to_string().contains("failed to load nearby food places"));
    }

    #[tokio::test]
    async fn postal_code_routes_to_the_geocoder() {
        let geocoder = FakeGeocoder { result: Ok(Coordinate::new(1.0, 2.0)) };
        let device = FakeDevice { result: Ok(Coordinate::new(3.0, 4.0)) };

        let resolved = resolve_origin(&geocoder, &device, Some("19106")).await.unwrap();
        assert_eq!(resolved, Coordinate::new(1.0, 2.0));
    }

    #[tokio::test]
    async fn missing_postal_code_routes_to_the_device() {
        let geocoder = FakeGeocoder { result: Ok(Coordinate::new(1.0, 2.0)) };
        let device = FakeDevice { result: Ok(Coordinate::new(3.0, 4.0)) };

        let resolved = resolve_origin(&geocoder, &device, None).await.unwrap();
        assert_eq!(resolved, Coordinate::new(3.0, 4.0));
    }

    #[tokio::test]
    async fn blank_postal_code_routes_to_the_device() {
        let geocoder = FakeGeocoder { result: Err(GeocodeError::NotFound) };
        let device = FakeDevice { result: Ok(Coordinate::new(3.0, 4.0)) };

        let resolved = resolve_origin(&geocoder, &device, Some("   ")).await.unwrap();
        assert_eq!(resolved, Coordinate::new(3.0, 4.0));
    }

    #[tokio::test]
    async fn unresolvable_postal_code_surfaces_not_found() {
        let geocoder = FakeGeocoder { result: Err(GeocodeError::NotFound) };
        let device = FakeDevice { result: Ok(Coordinate::new(3.0, 4.0)) };

        let err = resolve_origin(&geocoder, &device, Some("00000")).await.unwrap_err();
        assert!(matches!(err, ResolveError::Geocode(GeocodeError::NotFound)));
    }

    #[tokio::test]
    async fn denied_device_access_surfaces_permission_denied() {
        let geocoder = FakeGeocoder { result: Ok(Coordinate::new(1.0, 2.0)) };
        let device = FakeDevice { result: Err(LocateError::PermissionDenied) };

        let err = resolve_origin(&geocoder, &device, None).await.unwrap_err();
        assert!(matches!(err, ResolveError::Device(LocateError::PermissionDenied)));
    }
}
