//! Google Directions client
//!
//! All requests are GETs against the `/json` endpoint. Route geometry
//! arrives as an encoded overview polyline and is decoded into the
//! normalized model here; leg totals are summed into one route.

use std::time::Duration;

use domain::polyline;
use domain::{GeoPoint, ManeuverType, Route, RouteProfile, RouteStep, TravelProfile};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::GoogleConfig;
use crate::error::GoogleError;
use crate::html::strip_instruction_html;

/// Client for the Google Directions web service
#[derive(Debug, Clone)]
pub struct GoogleDirectionsClient {
    client: Client,
    config: GoogleConfig,
    api_key: String,
}

impl GoogleDirectionsClient {
    /// Create a new directions client
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &GoogleConfig) -> Result<Self, GoogleError> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                GoogleError::ConfigurationError("Google API key is not set".to_string())
            })?
            .to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("Forklore/1.0 (https://github.com/forklore-app/forklore-core)")
            .build()
            .map_err(|e| GoogleError::ConnectionFailed(e.to_string()))?;

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
    ) -> Result<Route, GoogleError> {
        let params = self.base_params(from, to, profile);
        let routes = self.fetch_routes(&params, from, to).await?;
        routes
            .into_iter()
            .next()
            .ok_or_else(|| no_route(from, to))
    }

    /// Route through all waypoints; the service may reorder interior stops.
    ///
    /// Origin and destination stay fixed. Requires at least two waypoints.
    #[instrument(skip(self, waypoints), fields(waypoints = waypoints.len()))]
    pub async fn optimized_route(
        &self,
        waypoints: &[GeoPoint],
        profile: TravelProfile,
    ) -> Result<Route, GoogleError> {
        let (&from, &to) = match (waypoints.first(), waypoints.last()) {
            (Some(first), Some(last)) if waypoints.len() >= 2 => (first, last),
            _ => {
                return Err(GoogleError::InvalidRequest(
                    "An optimized route requires at least two waypoints".to_string(),
                ));
            }
        };

        let mut params = self.base_params(from, to, profile);
        let interior = &waypoints[1..waypoints.len() - 1];
        if !interior.is_empty() {
            let joined = interior
                .iter()
                .map(|point| format!("{},{}", point.latitude(), point.longitude()))
                .collect::<Vec<_>>()
                .join("|");
            params.push(("waypoints".to_string(), joined));
            params.push(("optimize".to_string(), "true".to_string()));
        }

        let routes = self.fetch_routes(&params, from, to).await?;
        routes
            .into_iter()
            .next()
            .ok_or_else(|| no_route(from, to))
    }

    /// Up to `count` route variants between two points; zero is promoted to
    /// one, so the primary route is always returned.
    #[instrument(skip(self))]
    pub async fn route_alternatives(
        &self,
        from: GeoPoint,
        to: GeoPoint,
        profile: TravelProfile,
        count: usize,
    ) -> Result<Vec<Route>, GoogleError> {
        let mut params = self.base_params(from, to, profile);
        params.push(("alternatives".to_string(), "true".to_string()));

        let mut routes = self.fetch_routes(&params, from, to).await?;
        if routes.is_empty() {
            return Err(no_route(from, to));
        }
        routes.truncate(count.max(1));
        Ok(routes)
    }

    /// Travel profiles this service can route. No truck mode exists, so the
    /// heavy-goods profile is absent from the catalog.
    #[must_use]
    pub fn supported_profiles(&self) -> Vec<RouteProfile> {
        TravelProfile::ALL
            .iter()
            .filter(|profile| !matches!(profile, TravelProfile::DrivingHgv))
            .map(TravelProfile::catalog_entry)
            .collect()
    }

    /// Probe reachability. The service has no health endpoint; any HTTP
    /// answer from the directions endpoint counts (a keyless request is
    /// answered with an in-body error status, which is enough).
    #[instrument(skip(self))]
    pub async fn is_healthy(&self) -> bool {
        let url = format!("{}/json", self.config.directions_base_url);
        match self.client.get(&url).send().await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Google Directions reachability check failed");
                false
            }
        }
    }

    fn base_params(
        &self,
        from: GeoPoint,
        to: GeoPoint,
        profile: TravelProfile,
    ) -> Vec<(String, String)> {
        vec![
            (
                "origin".to_string(),
                format!("{},{}", from.latitude(), from.longitude()),
            ),
            (
                "destination".to_string(),
                format!("{},{}", to.latitude(), to.longitude()),
            ),
            ("mode".to_string(), travel_mode(profile).to_string()),
            ("language".to_string(), self.config.language.clone()),
            ("key".to_string(), self.api_key.clone()),
        ]
    }

    async fn fetch_routes(
        &self,
        params: &[(String, String)],
        from: GeoPoint,
        to: GeoPoint,
    ) -> Result<Vec<Route>, GoogleError> {
        let url = format!("{}/json", self.config.directions_base_url);

        debug!("Requesting directions");

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GoogleError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    GoogleError::ConnectionFailed(e.to_string())
                }
            })?;

        let body = read_success_body(response).await?;
        Self::parse_directions_response(&body, from, to)
    }

    /// Parse a directions body; the in-body `status` decides the outcome
    fn parse_directions_response(
        body: &str,
        from: GeoPoint,
        to: GeoPoint,
    ) -> Result<Vec<Route>, GoogleError> {
        let response: DirectionsResponse =
            serde_json::from_str(body).map_err(|e| GoogleError::ParseError(e.to_string()))?;

        match response.status.as_str() {
            "OK" => response.routes.into_iter().map(convert_route).collect(),
            "ZERO_RESULTS" => Err(no_route(from, to)),
            status => Err(GoogleError::from_api_status(
                status,
                response.error_message,
            )),
        }
    }
}

fn no_route(from: GeoPoint, to: GeoPoint) -> GoogleError {
    GoogleError::NoRouteFound {
        from: from.to_string(),
        to: to.to_string(),
    }
}

async fn read_success_body(response: Response) -> Result<String, GoogleError> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        return Err(GoogleError::RateLimitExceeded {
            retry_after_secs: retry_after,
        });
    }

    if status.is_server_error() {
        return Err(GoogleError::ServiceUnavailable(format!("HTTP {status}")));
    }

    if !status.is_success() {
        return Err(GoogleError::RequestFailed(format!("HTTP {status}")));
    }

    response
        .text()
        .await
        .map_err(|e| GoogleError::ParseError(e.to_string()))
}

/// Google travel mode for a profile. There is no truck mode; heavy goods
/// vehicles fall back to car routing.
const fn travel_mode(profile: TravelProfile) -> &'static str {
    match profile {
        TravelProfile::DrivingCar | TravelProfile::DrivingHgv => "driving",
        TravelProfile::CyclingRegular => "bicycling",
        TravelProfile::FootWalking => "walking",
    }
}

/// Map the service's string maneuver onto the maneuver enumeration.
/// Unmapped or missing maneuvers are plain continuation.
fn maneuver_from_name(name: Option<&str>) -> ManeuverType {
    match name {
        Some("turn-left") => ManeuverType::TurnLeft,
        Some("turn-right") => ManeuverType::TurnRight,
        Some("turn-slight-left" | "ramp-left" | "fork-left" | "keep-left") => {
            ManeuverType::SlightLeft
        }
        Some("turn-slight-right" | "ramp-right" | "fork-right" | "keep-right") => {
            ManeuverType::SlightRight
        }
        Some("turn-sharp-left") => ManeuverType::SharpLeft,
        Some("turn-sharp-right") => ManeuverType::SharpRight,
        Some("uturn-left" | "uturn-right") => ManeuverType::UTurn,
        Some("roundabout-left" | "roundabout-right") => ManeuverType::Roundabout,
        _ => ManeuverType::Straight,
    }
}

fn convert_route(route: GoogleRoute) -> Result<Route, GoogleError> {
    let geometry = polyline::decode(&route.overview_polyline.points)
        .map_err(|e| GoogleError::ParseError(e.to_string()))?;

    let distance_meters: f64 = route.legs.iter().map(|leg| leg.distance.value).sum();
    let duration_seconds: f64 = route.legs.iter().map(|leg| leg.duration.value).sum();

    let raw_steps: Vec<&GoogleStep> = route.legs.iter().flat_map(|leg| &leg.steps).collect();
    let steps = build_steps(&raw_steps, geometry.len());

    Ok(Route::new(
        distance_meters,
        duration_seconds,
        steps,
        geometry,
    ))
}

/// Build normalized steps from the concatenated legs.
///
/// The overview polyline is simplified and carries no per-step indices, so
/// waypoint ranges are distributed over the decoded geometry proportionally
/// to cumulative step distance. Ranges are monotone, adjacent steps share a
/// vertex, and the last step ends on the final point.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn build_steps(raw_steps: &[&GoogleStep], geometry_len: usize) -> Vec<RouteStep> {
    let total_distance: f64 = raw_steps.iter().map(|step| step.distance.value).sum();
    let last_index = geometry_len.saturating_sub(1);

    let mut cumulative = 0.0;
    let mut start_index = 0;

    raw_steps
        .iter()
        .map(|step| {
            cumulative += step.distance.value;
            let end_index = if total_distance > 0.0 {
                (((cumulative / total_distance) * last_index as f64).round() as usize)
                    .min(last_index)
            } else {
                last_index
            };
            let range = (start_index, end_index.max(start_index));
            start_index = range.1;

            RouteStep {
                distance_meters: step.distance.value,
                duration_seconds: step.duration.value,
                instruction: strip_instruction_html(&step.html_instructions),
                maneuver: maneuver_from_name(step.maneuver.as_deref()),
                waypoint_range: range,
            }
        })
        .collect()
}

// Raw API types below. `.text` companions of `value` fields are
// locale-specific display strings and deliberately not declared.

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<GoogleRoute>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleRoute {
    #[serde(default)]
    legs: Vec<GoogleLeg>,
    overview_polyline: OverviewPolyline,
}

#[derive(Debug, Deserialize)]
struct OverviewPolyline {
    points: String,
}

#[derive(Debug, Deserialize)]
struct GoogleLeg {
    distance: ValueField,
    duration: ValueField,
    #[serde(default)]
    steps: Vec<GoogleStep>,
}

#[derive(Debug, Deserialize)]
struct ValueField {
    value: f64,
}

#[derive(Debug, Deserialize)]
struct GoogleStep {
    distance: ValueField,
    duration: ValueField,
    #[serde(default)]
    html_instructions: String,
    #[serde(default)]
    maneuver: Option<String>,
}
