//! OpenRouteService directions client
//!
//! Two-point routes use the GET endpoint with the key as a query parameter.
//! Multi-point and alternative routes use the POST geojson endpoint with the
//! key in the `Authorization` header, as the service requires.

use std::time::Duration;

use domain::{GeoPoint, ManeuverType, Route, RouteProfile, RouteStep, TravelProfile};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::OsmConfig;
use crate::error::OsmError;

/// The service rejects alternative-route requests above this count
const MAX_ALTERNATIVES: usize = 3;

/// Client for the OpenRouteService directions API
#[derive(Debug, Clone)]
pub struct OrsDirectionsClient {
    client: Client,
    config: OsmConfig,
    api_key: String,
}

impl OrsDirectionsClient {
    /// Create a new directions client
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &OsmConfig) -> Result<Self, OsmError> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                OsmError::ConfigurationError("OpenRouteService API key is not set".to_string())
            })?
            .to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("Forklore/1.0 (https://github.com/forklore-app/forklore-core)")
            .build()
            .map_err(|e| OsmError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            api_key,
        })
    }

    /// Route between two points
    #[instrument(skip(self))]
    pub async fn directions(
        &self,
        from: GeoPoint,
        to: GeoPoint,
        profile: TravelProfile,
    ) -> Result<Route, OsmError> {
        let url = format!(
            "{}/v2/directions/{}",
            self.config.directions_base_url, profile
        );
        let params = [
            ("api_key", self.api_key.clone()),
            ("start", format!("{},{}", from.longitude(), from.latitude())),
            ("end", format!("{},{}", to.longitude(), to.latitude())),
            ("format", "geojson".to_string()),
            ("instructions", "true".to_string()),
        ];

        debug!(%profile, "Requesting directions");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        let body = read_success_body(response, from, to).await?;
        let routes = Self::parse_directions_response(&body)?;
        routes
            .into_iter()
            .next()
            .ok_or_else(|| no_route(from, to))
    }

    /// Route through all waypoints in the given order.
    ///
    /// The first and last waypoints stay fixed; only the service decides how
    /// interior legs are joined. Requires at least two waypoints.
    #[instrument(skip(self, waypoints), fields(waypoints = waypoints.len()))]
    pub async fn optimized_route(
        &self,
        waypoints: &[GeoPoint],
        profile: TravelProfile,
    ) -> Result<Route, OsmError> {
        let (&from, &to) = match (waypoints.first(), waypoints.last()) {
            (Some(first), Some(last)) if waypoints.len() >= 2 => (first, last),
            _ => {
                return Err(OsmError::InvalidRequest(
                    "An optimized route requires at least two waypoints".to_string(),
                ));
            }
        };

        let request = GeoJsonDirectionsRequest {
            coordinates: waypoints
                .iter()
                .map(|point| [point.longitude(), point.latitude()])
                .collect(),
            format: "geojson",
            instructions: true,
            alternative_routes: None,
        };

        let routes = self.post_geojson(profile, &request, from, to).await?;
        routes
            .into_iter()
            .next()
            .ok_or_else(|| no_route(from, to))
    }

    /// Up to `count` route variants between two points.
    ///
    /// The service accepts one to three targets, so `count` is clamped into
    /// that range; zero is promoted to one.
    #[instrument(skip(self))]
    pub async fn route_alternatives(
        &self,
        from: GeoPoint,
        to: GeoPoint,
        profile: TravelProfile,
        count: usize,
    ) -> Result<Vec<Route>, OsmError> {
        let request = GeoJsonDirectionsRequest {
            coordinates: vec![
                [from.longitude(), from.latitude()],
                [to.longitude(), to.latitude()],
            ],
            format: "geojson",
            instructions: true,
            alternative_routes: Some(AlternativeRoutesRequest {
                target_count: count.clamp(1, MAX_ALTERNATIVES),
                weight_factor: 1.4,
                share_factor: 0.6,
            }),
        };

        let routes = self.post_geojson(profile, &request, from, to).await?;
        if routes.is_empty() {
            return Err(no_route(from, to));
        }
        Ok(routes)
    }

    /// Travel profiles this service can route
    #[must_use]
    pub fn supported_profiles(&self) -> Vec<RouteProfile> {
        RouteProfile::catalog()
    }

    /// Probe the service health endpoint
    #[instrument(skip(self))]
    pub async fn is_healthy(&self) -> bool {
        let url = format!("{}/health", self.config.directions_base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!(error = %e, "OpenRouteService health check failed");
                false
            }
        }
    }

    async fn post_geojson(
        &self,
        profile: TravelProfile,
        request: &GeoJsonDirectionsRequest,
        from: GeoPoint,
        to: GeoPoint,
    ) -> Result<Vec<Route>, OsmError> {
        let url = format!(
            "{}/v2/directions/{}/geojson",
            self.config.directions_base_url, profile
        );

        debug!(%profile, coordinates = request.coordinates.len(), "Posting directions request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        let body = read_success_body(response, from, to).await?;
        Self::parse_directions_response(&body)
    }

    fn send_error(&self, e: reqwest::Error) -> OsmError {
        if e.is_timeout() {
            OsmError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            OsmError::ConnectionFailed(e.to_string())
        }
    }

    /// Parse a GeoJSON FeatureCollection into normalized routes
    fn parse_directions_response(body: &str) -> Result<Vec<Route>, OsmError> {
        let response: DirectionsResponse =
            serde_json::from_str(body).map_err(|e| OsmError::ParseError(e.to_string()))?;

        response
            .features
            .into_iter()
            .map(convert_feature)
            .collect()
    }
}

fn no_route(from: GeoPoint, to: GeoPoint) -> OsmError {
    OsmError::NoRouteFound {
        from: from.to_string(),
        to: to.to_string(),
    }
}

async fn read_success_body(
    response: Response,
    from: GeoPoint,
    to: GeoPoint,
) -> Result<String, OsmError> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        return Err(OsmError::RateLimitExceeded {
            retry_after_secs: retry_after,
        });
    }

    // The service reports unroutable points as 404
    if status == StatusCode::NOT_FOUND {
        return Err(no_route(from, to));
    }

    if status.is_server_error() {
        return Err(OsmError::ServiceUnavailable(format!("HTTP {status}")));
    }

    if !status.is_success() {
        return Err(OsmError::RequestFailed(format!("HTTP {status}")));
    }

    response
        .text()
        .await
        .map_err(|e| OsmError::ParseError(e.to_string()))
}

/// Map the service's numeric instruction type onto the maneuver enumeration
const fn maneuver_from_instruction_type(instruction_type: u8) -> ManeuverType {
    match instruction_type {
        0 => ManeuverType::TurnLeft,
        1 => ManeuverType::TurnRight,
        2 => ManeuverType::SharpLeft,
        3 => ManeuverType::SharpRight,
        4 => ManeuverType::SlightLeft,
        5 => ManeuverType::SlightRight,
        6 => ManeuverType::Straight,
        7 | 8 => ManeuverType::Roundabout, // enter / exit
        9 => ManeuverType::UTurn,
        10 => ManeuverType::Arrive,
        11 => ManeuverType::Depart,
        12 => ManeuverType::SlightLeft,  // keep left
        13 => ManeuverType::SlightRight, // keep right
        _ => ManeuverType::Unknown,
    }
}

fn convert_feature(feature: RouteFeature) -> Result<Route, OsmError> {
    let geometry = feature
        .geometry
        .coordinates
        .into_iter()
        .map(|[lon, lat]| GeoPoint::new(lat, lon).map_err(|e| OsmError::ParseError(e.to_string())))
        .collect::<Result<Vec<_>, _>>()?;

    let steps = feature
        .properties
        .segments
        .iter()
        .flat_map(|segment| &segment.steps)
        .map(|step| RouteStep {
            distance_meters: step.distance,
            duration_seconds: step.duration,
            instruction: step.instruction.clone(),
            maneuver: maneuver_from_instruction_type(step.instruction_type),
            waypoint_range: step.waypoint_range(),
        })
        .collect();

    Ok(Route::new(
        feature.properties.summary.distance,
        feature.properties.summary.duration,
        steps,
        geometry,
    ))
}

// Raw API types below

#[derive(Debug, Serialize)]
struct GeoJsonDirectionsRequest {
    coordinates: Vec<[f64; 2]>,
    format: &'static str,
    instructions: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    alternative_routes: Option<AlternativeRoutesRequest>,
}

#[derive(Debug, Serialize)]
struct AlternativeRoutesRequest {
    target_count: usize,
    weight_factor: f64,
    share_factor: f64,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    features: Vec<RouteFeature>,
}

#[derive(Debug, Deserialize)]
struct RouteFeature {
    properties: RouteProperties,
    geometry: RouteGeometry,
}

#[derive(Debug, Deserialize)]
struct RouteProperties {
    summary: OrsSummary,
    #[serde(default)]
    segments: Vec<OrsSegment>,
}

#[derive(Debug, Deserialize)]
struct OrsSummary {
    distance: f64,
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct OrsSegment {
    #[serde(default)]
    steps: Vec<OrsStep>,
}

#[derive(Debug, Deserialize)]
struct OrsStep {
    distance: f64,
    duration: f64,
    instruction: String,
    #[serde(rename = "type")]
    instruction_type: u8,
    #[serde(default)]
    way_points: Vec<usize>,
}

impl OrsStep {
    fn waypoint_range(&self) -> (usize, usize) {
        (
            self.way_points.first().copied().unwrap_or(0),
            self.way_points.last().copied().unwrap_or(0),
        )
    }
}

#[derive(Debug, Deserialize)]
struct RouteGeometry {
    coordinates: Vec<[f64; 2]>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESPONSE: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {
                "summary": { "distance": 5840.3, "duration": 763.1 },
                "segments": [{
                    "distance": 5840.3,
                    "duration": 763.1,
                    "steps": [
                        {
                            "distance": 320.5,
                            "duration": 45.0,
                            "instruction": "Head north on Pasteur",
                            "type": 11,
                            "way_points": [0, 4]
                        },
                        {
                            "distance": 5400.0,
                            "duration": 690.0,
                            "instruction": "Turn left onto Điện Biên Phủ",
                            "type": 0,
                            "way_points": [4, 61]
                        },
                        {
                            "distance": 119.8,
                            "duration": 28.1,
                            "instruction": "Arrive at your destination",
                            "type": 10,
                            "way_points": [61, 62]
                        }
                    ]
                }]
            },
            "geometry": {
                "type": "LineString",
                "coordinates": [[106.700981, 10.776530], [106.702123, 10.778201], [106.703511, 10.780005]]
            }
        }]
    }"#;

    #[test]
    fn test_parse_directions_response() {
        let routes = OrsDirectionsClient::parse_directions_response(SAMPLE_RESPONSE).unwrap();
        assert_eq!(routes.len(), 1);

        let route = &routes[0];
        assert!((route.distance_meters - 5840.3).abs() < f64::EPSILON);
        assert!((route.duration_seconds - 763.1).abs() < f64::EPSILON);
        assert!((route.summary.distance_meters - route.distance_meters).abs() < f64::EPSILON);

        assert_eq!(route.steps.len(), 3);
        assert_eq!(route.steps[0].maneuver, ManeuverType::Depart);
        assert_eq!(route.steps[1].maneuver, ManeuverType::TurnLeft);
        assert_eq!(route.steps[1].instruction, "Turn left onto Điện Biên Phủ");
        assert_eq!(route.steps[1].waypoint_range, (4, 61));
        assert_eq!(route.steps[2].maneuver, ManeuverType::Arrive);
    }

    #[test]
    fn test_geometry_axis_order_is_swapped() {
        let routes = OrsDirectionsClient::parse_directions_response(SAMPLE_RESPONSE).unwrap();
        let first = routes[0].geometry[0];
        assert!((first.latitude() - 10.776_530).abs() < 1e-9);
        assert!((first.longitude() - 106.700_981).abs() < 1e-9);
    }

    #[test]
    fn test_parse_empty_feature_collection() {
        let routes =
            OrsDirectionsClient::parse_directions_response(r#"{ "features": [] }"#).unwrap();
        assert!(routes.is_empty());
    }

    #[test]
    fn test_parse_malformed_body() {
        let result = OrsDirectionsClient::parse_directions_response("not json");
        assert!(matches!(result, Err(OsmError::ParseError(_))));
    }

    #[test]
    fn test_parse_out_of_range_coordinates() {
        let body = r#"{
            "features": [{
                "properties": { "summary": { "distance": 1.0, "duration": 1.0 }, "segments": [] },
                "geometry": { "coordinates": [[200.0, 95.0]] }
            }]
        }"#;
        let result = OrsDirectionsClient::parse_directions_response(body);
        assert!(matches!(result, Err(OsmError::ParseError(_))));
    }

    #[test]
    fn test_maneuver_mapping() {
        assert_eq!(maneuver_from_instruction_type(0), ManeuverType::TurnLeft);
        assert_eq!(maneuver_from_instruction_type(1), ManeuverType::TurnRight);
        assert_eq!(maneuver_from_instruction_type(6), ManeuverType::Straight);
        assert_eq!(maneuver_from_instruction_type(7), ManeuverType::Roundabout);
        assert_eq!(maneuver_from_instruction_type(8), ManeuverType::Roundabout);
        assert_eq!(maneuver_from_instruction_type(9), ManeuverType::UTurn);
        assert_eq!(maneuver_from_instruction_type(12), ManeuverType::SlightLeft);
        assert_eq!(
            maneuver_from_instruction_type(13),
            ManeuverType::SlightRight
        );
        assert_eq!(maneuver_from_instruction_type(99), ManeuverType::Unknown);
    }

    #[test]
    fn test_client_requires_api_key() {
        let config = OsmConfig::default();
        let result = OrsDirectionsClient::new(&config);
        assert!(matches!(result, Err(OsmError::ConfigurationError(_))));

        let config = OsmConfig {
            api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            OrsDirectionsClient::new(&config),
            Err(OsmError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_request_serialization_skips_absent_alternatives() {
        let request = GeoJsonDirectionsRequest {
            coordinates: vec![[106.7, 10.77], [106.71, 10.78]],
            format: "geojson",
            instructions: true,
            alternative_routes: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""coordinates":[[106.7,10.77],[106.71,10.78]]"#));
        assert!(!json.contains("alternative_routes"));

        let request = GeoJsonDirectionsRequest {
            alternative_routes: Some(AlternativeRoutesRequest {
                target_count: 2,
                weight_factor: 1.4,
                share_factor: 0.6,
            }),
            ..request
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""target_count":2"#));
    }

    #[test]
    fn test_step_waypoint_range_defaults_to_zero() {
        let step = OrsStep {
            distance: 1.0,
            duration: 1.0,
            instruction: String::new(),
            instruction_type: 6,
            way_points: vec![],
        };
        assert_eq!(step.waypoint_range(), (0, 0));
    }

    #[test]
    fn test_supported_profiles_cover_catalog() {
        let client = OrsDirectionsClient::new(&OsmConfig::for_testing()).unwrap();
        let profiles = client.supported_profiles();
        assert_eq!(profiles.len(), 4);
        assert!(profiles.iter().any(|p| p.id == "driving-hgv"));
    }
}
