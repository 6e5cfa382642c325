//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::coord::distance::haversine_km;
use crate::coord::{ActiveReference, Coordinates};
use crate::error::Error;
use crate::format::{available_formats, FormatInfo};
use crate::insight::LocationInsight;
use crate::region::LocationCheck;
use crate::server::state::AppState;
use crate::supplier::engine::{Notice, Snapshot};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/status", get(status_handler))
        .route("/api/suppliers", get(suppliers_handler))
        .route("/api/pin", post(pin_handler).delete(clear_pin_handler))
        .route("/api/gps", post(gps_handler))
        .route("/api/reference", post(reference_handler))
        .route("/api/visibility", post(visibility_handler))
        .route("/api/classify", get(classify_handler))
        .route("/api/insight", get(insight_handler))
        .route("/api/distance", get(distance_handler))
        .route("/api/formats", get(formats_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// A coordinate in a request body or query string
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LocationRequest {
    pub lat: f64,
    pub lng: f64,
}

impl LocationRequest {
    fn coords(self) -> Result<Coordinates, ApiError> {
        let coords = Coordinates::new(self.lat, self.lng);
        coords.validate()?;
        Ok(coords)
    }
}

/// Visibility toggle body
#[derive(Debug, Deserialize)]
pub struct VisibilityRequest {
    pub enabled: bool,
}

/// Distance query, both ends as "lat,lng"
#[derive(Debug, Deserialize)]
pub struct DistanceQuery {
    pub from: String,
    pub to: String,
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::InvalidBand(_) => "INVALID_BAND",
            Error::Config(_) => "CONFIG_ERROR",
            Error::Geo(_) => "LOCATION_ERROR",
            _ => "INTERNAL_ERROR",
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

/// Result of any engine mutation
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateResponse {
    /// State after the update
    pub snapshot: Snapshot,
    /// Messages queued by the update, drained
    pub notices: Vec<Notice>,
    /// How the submitted coordinate was classified, for location updates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationCheck>,
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Uptime in seconds
    pub uptime_secs: u64,
    /// Suppliers are shown
    pub visible: bool,
    /// Suppliers in the current batch
    pub suppliers: usize,
    pub base: Option<Coordinates>,
    pub reference: Option<ActiveReference>,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let engine = state.engine().await;

    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.uptime_secs(),
        visible: engine.is_visible(),
        suppliers: engine.current_batch().len(),
        base: engine.base_location(),
        reference: engine.active_reference(),
    })
}

/// Current batch and reference
///
/// GET /api/suppliers
async fn suppliers_handler(State(state): State<Arc<AppState>>) -> Json<Snapshot> {
    Json(state.engine().await.snapshot())
}

/// Pin a location: new base, new batch
///
/// POST /api/pin
async fn pin_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LocationRequest>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let coords = req.coords()?;

    let mut engine = state.engine_mut().await;
    let check = engine.on_pin_location(coords);

    Ok(Json(UpdateResponse {
        snapshot: engine.snapshot(),
        notices: engine.take_notices(),
        location: Some(check),
    }))
}

/// Drop the pin
///
/// DELETE /api/pin
async fn clear_pin_handler(State(state): State<Arc<AppState>>) -> Json<UpdateResponse> {
    let mut engine = state.engine_mut().await;
    engine.clear_pin();

    Json(UpdateResponse {
        snapshot: engine.snapshot(),
        notices: engine.take_notices(),
        location: None,
    })
}

/// A new GPS fix
///
/// POST /api/gps
async fn gps_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LocationRequest>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let coords = req.coords()?;

    let mut engine = state.engine_mut().await;
    let check = engine.on_gps_update(coords);

    Ok(Json(UpdateResponse {
        snapshot: engine.snapshot(),
        notices: engine.take_notices(),
        location: Some(check),
    }))
}

/// Measure distances from another point
///
/// POST /api/reference
async fn reference_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LocationRequest>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let coords = req.coords()?;

    let mut engine = state.engine_mut().await;
    engine.on_reference_changed(coords);

    Ok(Json(UpdateResponse {
        snapshot: engine.snapshot(),
        notices: engine.take_notices(),
        location: None,
    }))
}

/// Show or hide suppliers
///
/// POST /api/visibility
async fn visibility_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VisibilityRequest>,
) -> Json<UpdateResponse> {
    let mut engine = state.engine_mut().await;
    engine.on_toggle_visibility(req.enabled);

    Json(UpdateResponse {
        snapshot: engine.snapshot(),
        notices: engine.take_notices(),
        location: None,
    })
}

/// Land/water verdict
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub requested: Coordinates,
    pub on_land: bool,
    /// Name of the water body the coordinate fell in, if any
    pub exclusion: Option<String>,
    pub resolved: Coordinates,
    pub corrected: bool,
}

/// Classify a coordinate
///
/// GET /api/classify?lat=..&lng=..
async fn classify_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LocationRequest>,
) -> Result<Json<ClassifyResponse>, ApiError> {
    let coords = query.coords()?;

    let engine = state.engine().await;
    let regions = engine.regions();
    let check = regions.check(coords);

    Ok(Json(ClassifyResponse {
        requested: coords,
        on_land: regions.is_on_land(coords),
        exclusion: regions.exclusion_at(coords).map(str::to_string),
        resolved: check.coords,
        corrected: check.corrected,
    }))
}

/// Descriptive payload for a location
///
/// GET /api/insight?lat=..&lng=..
async fn insight_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LocationRequest>,
) -> Result<Json<LocationInsight>, ApiError> {
    let coords = query.coords()?;
    Ok(Json(state.insight().fetch(coords)))
}

/// Distance response
#[derive(Debug, Serialize, Deserialize)]
pub struct DistanceResponse {
    pub from: Coordinates,
    pub to: Coordinates,
    pub km: f64,
}

/// Great-circle distance between two points
///
/// GET /api/distance?from=lat,lng&to=lat,lng
async fn distance_handler(
    Query(query): Query<DistanceQuery>,
) -> Result<Json<DistanceResponse>, ApiError> {
    let from: Coordinates = query.from.parse()?;
    let to: Coordinates = query.to.parse()?;

    Ok(Json(DistanceResponse {
        from,
        to,
        km: haversine_km(from, to),
    }))
}

/// Formats list response
#[derive(Debug, Serialize, Deserialize)]
pub struct FormatsResponse {
    pub formats: Vec<FormatInfo>,
}

/// List available output formats
///
/// GET /api/formats
async fn formats_handler() -> Json<FormatsResponse> {
    Json(FormatsResponse {
        formats: available_formats(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::coord::ReferenceKind;
    use crate::random::pseudo::SeededPseudoSource;
    use crate::supplier::engine::SupplierEngine;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde::de::DeserializeOwned;
    use tower::ServiceExt;

    fn anchor() -> Coordinates {
        Coordinates::new(9.0782, 126.1967)
    }

    fn create_test_state() -> Arc<AppState> {
        let config = Config::default();
        let mut engine = SupplierEngine::new(
            config.region_table(),
            config.engine_settings(),
            Box::new(SeededPseudoSource::new(12345)),
        );
        engine.initialize(anchor());
        Arc::new(AppState::with_engine(config, engine))
    }

    async fn get_json<T: DeserializeOwned>(app: Router, uri: &str) -> (StatusCode, T) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn send_json<T: DeserializeOwned>(
        app: Router,
        method: &str,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, T) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let app = create_router(create_test_state());

        let (code, status): (_, StatusResponse) = get_json(app, "/api/status").await;

        assert_eq!(code, StatusCode::OK);
        assert!(status.running);
        assert!(status.visible);
        assert!((5..=8).contains(&status.suppliers));
        assert_eq!(status.base, Some(anchor()));
        assert_eq!(status.reference.unwrap().kind, ReferenceKind::Base);
    }

    #[tokio::test]
    async fn test_suppliers_endpoint() {
        let app = create_router(create_test_state());

        let (code, snapshot): (_, Snapshot) = get_json(app, "/api/suppliers").await;

        assert_eq!(code, StatusCode::OK);
        assert!((5..=8).contains(&snapshot.batch.len()));
        for placed in &snapshot.batch.suppliers {
            assert!(placed.distance_km > 0.0 && placed.distance_km < 2.1);
        }
    }

    #[tokio::test]
    async fn test_pin_in_water_is_corrected_with_notice() {
        let state = create_test_state();
        let before = state.engine().await.current_batch().id.clone();
        let app = create_router(Arc::clone(&state));

        let (code, update): (_, UpdateResponse) = send_json(
            app,
            "POST",
            "/api/pin",
            serde_json::json!({ "lat": 9.08, "lng": 118.0 }),
        )
        .await;

        assert_eq!(code, StatusCode::OK);
        let location = update.location.unwrap();
        assert!(location.corrected);
        assert_eq!(location.coords, anchor());
        assert_eq!(update.notices.len(), 1);
        assert_eq!(update.notices[0].resolved, anchor());

        let reference = update.snapshot.reference.unwrap();
        assert_eq!(reference.kind, ReferenceKind::Pinned);
        assert_ne!(update.snapshot.batch.id, before);
    }

    #[tokio::test]
    async fn test_gps_update_is_silent() {
        let app = create_router(create_test_state());

        let (code, update): (_, UpdateResponse) = send_json(
            app,
            "POST",
            "/api/gps",
            serde_json::json!({ "lat": 9.08, "lng": 118.0 }),
        )
        .await;

        assert_eq!(code, StatusCode::OK);
        assert!(update.location.unwrap().corrected);
        assert!(update.notices.is_empty());
        assert_eq!(update.snapshot.reference.unwrap().kind, ReferenceKind::Gps);
    }

    #[tokio::test]
    async fn test_reference_change_keeps_identities() {
        let state = create_test_state();
        let before = state.engine().await.current_batch();
        let app = create_router(Arc::clone(&state));

        let (code, update): (_, UpdateResponse) = send_json(
            app,
            "POST",
            "/api/reference",
            serde_json::json!({ "lat": 9.09, "lng": 126.2 }),
        )
        .await;

        assert_eq!(code, StatusCode::OK);
        let reference = update.snapshot.reference.unwrap();
        assert_eq!(reference.kind, ReferenceKind::Manual);
        assert_eq!(reference.coords, Coordinates::new(9.09, 126.2));

        let after = &update.snapshot.batch;
        assert_eq!(after.id, before.id);
        assert_eq!(after.len(), before.len());
        for (a, b) in after.suppliers.iter().zip(&before.suppliers) {
            assert_eq!(a.supplier.id, b.supplier.id);
            assert_eq!(a.supplier.name, b.supplier.name);
            assert!((a.distance_km - haversine_km(reference.coords, a.position)).abs() < 1e-9);
        }
    }

    #[tokio::test]
    async fn test_clear_pin() {
        let state = create_test_state();
        state.engine_mut().await.on_pin_location(Coordinates::new(7.1907, 125.4553));
        let app = create_router(Arc::clone(&state));

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/pin")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(state.engine().await.pinned_location().is_none());
        assert_eq!(
            state.engine().await.active_reference().unwrap().kind,
            ReferenceKind::Base
        );
    }

    #[tokio::test]
    async fn test_visibility_toggle() {
        let state = create_test_state();

        let (_, hidden): (_, UpdateResponse) = send_json(
            create_router(Arc::clone(&state)),
            "POST",
            "/api/visibility",
            serde_json::json!({ "enabled": false }),
        )
        .await;
        assert!(!hidden.snapshot.visible);
        assert!(hidden.snapshot.batch.is_empty());

        let (_, shown): (_, UpdateResponse) = send_json(
            create_router(state),
            "POST",
            "/api/visibility",
            serde_json::json!({ "enabled": true }),
        )
        .await;
        assert!(shown.snapshot.visible);
        assert!(!shown.snapshot.batch.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_coordinates() {
        let app = create_router(create_test_state());

        let (code, err): (_, ApiError) = send_json(
            app,
            "POST",
            "/api/pin",
            serde_json::json!({ "lat": 91.0, "lng": 126.0 }),
        )
        .await;

        assert_eq!(code, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "INVALID_COORDINATES");
    }

    #[tokio::test]
    async fn test_classify_endpoint() {
        let app = create_router(create_test_state());

        let (code, verdict): (_, ClassifyResponse) =
            get_json(app, "/api/classify?lat=9.08&lng=118.0").await;

        assert_eq!(code, StatusCode::OK);
        assert!(!verdict.on_land);
        assert_eq!(verdict.exclusion.as_deref(), Some("south_china_sea"));
        assert_eq!(verdict.resolved, anchor());
        assert!(verdict.corrected);
    }

    #[tokio::test]
    async fn test_insight_endpoint() {
        let app = create_router(create_test_state());

        let (code, insight): (_, LocationInsight) =
            get_json(app, "/api/insight?lat=7.1907&lng=125.4553").await;

        assert_eq!(code, StatusCode::OK);
        assert!(!insight.corrected);
        assert!(!insight.nearby_businesses.is_empty());
    }

    #[tokio::test]
    async fn test_distance_endpoint() {
        let app = create_router(create_test_state());

        let (code, distance): (_, DistanceResponse) =
            get_json(app, "/api/distance?from=14.5995,120.9842&to=10.3157,123.8854").await;

        assert_eq!(code, StatusCode::OK);
        assert!((distance.km - 571.0).abs() < 2.0);
    }

    #[tokio::test]
    async fn test_distance_rejects_bad_input() {
        let app = create_router(create_test_state());

        let (code, err): (_, ApiError) = get_json(app, "/api/distance?from=abc&to=1,2").await;

        assert_eq!(code, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "INVALID_COORDINATES");
    }

    #[tokio::test]
    async fn test_formats_endpoint() {
        let app = create_router(create_test_state());

        let (code, formats): (_, FormatsResponse) = get_json(app, "/api/formats").await;

        assert_eq!(code, StatusCode::OK);
        assert_eq!(formats.formats.len(), 3);
    }
}
