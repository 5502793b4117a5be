//! Google Places client
//!
//! Nearby search, text search and detail lookup against the Places web
//! service. String place ids are folded into the numeric id space with the
//! model's stable hash; the original id is kept in the tags for detail
//! lookups.

use std::collections::HashMap;
use std::time::Duration;

use domain::models::{CUISINE_TAG, PLACE_ID_TAG, stable_place_id};
use domain::{GeoPoint, Restaurant};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::GoogleConfig;
use crate::error::GoogleError;

/// Place `types[]` entries that decide the cuisine tag, first match wins
const CUISINE_BY_TYPE: [(&str, &str); 5] = [
    ("cafe", "cafe"),
    ("bakery", "bakery"),
    ("bar", "bar"),
    ("meal_takeaway", "fast_food"),
    ("meal_delivery", "fast_food"),
];

/// Client for the Google Places web service
#[derive(Debug, Clone)]
pub struct GooglePlacesClient {
    client: Client,
    config: GoogleConfig,
    api_key: String,
}

impl GooglePlacesClient {
    /// Create a new places client
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

    /// Restaurants within `radius_meters` of `center`, in provider order
    #[instrument(skip(self))]
    pub async fn search_nearby(
        &self,
        center: GeoPoint,
        radius_meters: f64,
    ) -> Result<Vec<Restaurant>, GoogleError> {
        let params = vec![
            (
                "location".to_string(),
                format!("{},{}", center.latitude(), center.longitude()),
            ),
            ("radius".to_string(), radius_meters.to_string()),
            ("type".to_string(), "restaurant".to_string()),
            ("language".to_string(), self.config.language.clone()),
            ("key".to_string(), self.api_key.clone()),
        ];

        let body = self.get("nearbysearch", &params).await?;
        self.parse_search_results(&body)
    }

    /// Restaurants matching a free-text query, optionally biased around a
    /// center
    #[instrument(skip(self))]
    pub async fn search_by_text(
        &self,
        query: &str,
        center: Option<GeoPoint>,
        radius_meters: f64,
    ) -> Result<Vec<Restaurant>, GoogleError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GoogleError::InvalidRequest(
                "Search query must not be empty".to_string(),
            ));
        }

        let mut params = vec![
            ("query".to_string(), query.to_string()),
            ("language".to_string(), self.config.language.clone()),
            ("key".to_string(), self.api_key.clone()),
        ];
        if let Some(center) = center {
            params.push((
                "location".to_string(),
                format!("{},{}", center.latitude(), center.longitude()),
            ));
            params.push(("radius".to_string(), radius_meters.to_string()));
        }

        let body = self.get("textsearch", &params).await?;
        self.parse_search_results(&body)
    }

    /// Look up a single place by its string place id
    #[instrument(skip(self))]
    pub async fn place_details(&self, place_id: &str) -> Result<Option<Restaurant>, GoogleError> {
        let params = vec![
            ("place_id".to_string(), place_id.to_string()),
            (
                "fields".to_string(),
                "place_id,name,geometry,types,rating,formatted_address".to_string(),
            ),
            ("language".to_string(), self.config.language.clone()),
            ("key".to_string(), self.api_key.clone()),
        ];

        let body = self.get("details", &params).await?;
        let response: DetailsResponse =
            serde_json::from_str(&body).map_err(|e| GoogleError::ParseError(e.to_string()))?;

        match response.status.as_str() {
            "OK" => Ok(response.result.and_then(restaurant_from_result)),
            // An unknown id is an absence, not a failure
            "ZERO_RESULTS" | "NOT_FOUND" => Ok(None),
            status => Err(GoogleError::from_api_status(
                status,
                response.error_message,
            )),
        }
    }

    /// Probe reachability. Any HTTP answer from the service counts.
    #[instrument(skip(self))]
    pub async fn is_healthy(&self) -> bool {
        let url = format!("{}/nearbysearch/json", self.config.places_base_url);
        match self.client.get(&url).send().await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Google Places reachability check failed");
                false
            }
        }
    }

    async fn get(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<String, GoogleError> {
        let url = format!("{}/{}/json", self.config.places_base_url, endpoint);

        debug!(endpoint, "Requesting places");

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

        read_success_body(response).await
    }

    /// Parse a search body; `OK` and `ZERO_RESULTS` are both success
    fn parse_search_results(&self, body: &str) -> Result<Vec<Restaurant>, GoogleError> {
        let response: PlacesResponse =
            serde_json::from_str(body).map_err(|e| GoogleError::ParseError(e.to_string()))?;

        match response.status.as_str() {
            "OK" | "ZERO_RESULTS" => {
                let mut results: Vec<Restaurant> = response
                    .results
                    .into_iter()
                    .filter_map(restaurant_from_result)
                    .collect();
                results.truncate(self.config.max_results);
                Ok(results)
            }
            status => Err(GoogleError::from_api_status(
                status,
                response.error_message,
            )),
        }
    }
}

/// Results with unusable coordinates are dropped, not fatal
fn restaurant_from_result(result: PlaceResult) -> Option<Restaurant> {
    let location = GeoPoint::new(result.geometry.location.lat, result.geometry.location.lng).ok()?;

    let mut tags = HashMap::new();
    tags.insert(PLACE_ID_TAG.to_string(), result.place_id.clone());
    if let Some(cuisine) = cuisine_from_types(&result.types) {
        tags.insert(CUISINE_TAG.to_string(), cuisine.to_string());
    }
    if let Some(address) = result.vicinity.or(result.formatted_address) {
        tags.insert("address".to_string(), address);
    }
    if let Some(rating) = result.rating {
        tags.insert("rating".to_string(), rating.to_string());
    }

    Some(Restaurant {
        id: stable_place_id(&result.place_id),
        name: result.name,
        location,
        tags,
    })
}

/// Derive the cuisine tag from the place `types[]`. A table key wins;
/// otherwise restaurant-flavored types ("restaurant",
/// "vietnamese_restaurant") fall back to plain restaurant. Places with
/// neither carry no cuisine tag, matching the OSM pair where cuisine exists
/// only when the provider tagged one.
fn cuisine_from_types(types: &[String]) -> Option<&'static str> {
    for (key, cuisine) in CUISINE_BY_TYPE {
        if types.iter().any(|t| t == key) {
            return Some(cuisine);
        }
    }
    if types.iter().any(|t| t.contains("restaurant")) {
        return Some("restaurant");
    }
    None
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

// Raw API types below

#[derive(Debug, Deserialize)]
struct PlacesResponse {
    status: String,
    #[serde(default)]
    results: Vec<PlaceResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    result: Option<PlaceResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    place_id: String,
    name: String,
    geometry: PlaceGeometry,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    vicinity: Option<String>,
    #[serde(default)]
    formatted_address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaceGeometry {
    location: PlaceLocation,
}

#[derive(Debug, Deserialize)]
struct PlaceLocation {
    lat: f64,
    lng: f64,
}
