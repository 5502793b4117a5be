//! Overpass place search client
//!
//! Queries the OpenStreetMap POI index for restaurant nodes using Overpass
//! QL. The interpreter takes the query as a raw POST body and answers JSON.

use std::time::Duration;

use domain::{GeoPoint, Restaurant};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::OsmConfig;
use crate::error::OsmError;

/// Display name for nodes that carry no `name` tag
const UNNAMED_FALLBACK: &str = "Unnamed restaurant";

/// Client for the Overpass API
#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: Client,
    config: OsmConfig,
}

impl OverpassClient {
    /// Create a new Overpass client. The index is keyless, so this only
    /// fails if the HTTP client cannot be initialized.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &OsmConfig) -> Result<Self, OsmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("Forklore/1.0 (https://github.com/forklore-app/forklore-core)")
            .build()
            .map_err(|e| OsmError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Restaurants within `radius_meters` of `center`, nearest first
    #[instrument(skip(self))]
    pub async fn search_nearby(
        &self,
        center: GeoPoint,
        radius_meters: f64,
    ) -> Result<Vec<Restaurant>, OsmError> {
        let query = format!(
            r#"[out:json][timeout:25]; node["amenity"="restaurant"](around:{},{},{}); out body;"#,
            radius_meters,
            center.latitude(),
            center.longitude()
        );

        let elements = self.run_query(query).await?;
        Ok(self.collect_results(elements, center))
    }

    /// Restaurants near `center` whose name matches `query`
    /// (case-insensitive). The index has no global text search, so a center
    /// is required.
    #[instrument(skip(self))]
    pub async fn search_by_text(
        &self,
        query: &str,
        center: Option<GeoPoint>,
        radius_meters: f64,
    ) -> Result<Vec<Restaurant>, OsmError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(OsmError::InvalidRequest(
                "Search query must not be empty".to_string(),
            ));
        }
        let Some(center) = center else {
            return Err(OsmError::InvalidRequest(
                "Text search requires a center location".to_string(),
            ));
        };

        let overpass_query = format!(
            r#"[out:json][timeout:25]; node["amenity"="restaurant"]["name"~"{}",i](around:{},{},{}); out body;"#,
            escape_regex(query),
            radius_meters,
            center.latitude(),
            center.longitude()
        );

        let elements = self.run_query(overpass_query).await?;
        Ok(self.collect_results(elements, center))
    }

    /// Look up a single node by its OSM id
    #[instrument(skip(self))]
    pub async fn place_details(&self, node_id: u64) -> Result<Option<Restaurant>, OsmError> {
        let query = format!(r"[out:json][timeout:25]; node({node_id}); out body;");

        let elements = self.run_query(query).await?;
        Ok(elements.into_iter().next().and_then(restaurant_from_element))
    }

    /// Probe the interpreter status endpoint
    #[instrument(skip(self))]
    pub async fn is_healthy(&self) -> bool {
        let url = format!("{}/api/status", self.config.overpass_base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!(error = %e, "Overpass health check failed");
                false
            }
        }
    }

    async fn run_query(&self, query: String) -> Result<Vec<OverpassElement>, OsmError> {
        let url = format!("{}/api/interpreter", self.config.overpass_base_url);

        debug!(query_len = query.len(), "Running Overpass query");

        let response = self
            .client
            .post(&url)
            .body(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OsmError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    OsmError::ConnectionFailed(e.to_string())
                }
            })?;

        let body = read_success_body(response).await?;
        Self::parse_elements(&body)
    }

    fn parse_elements(body: &str) -> Result<Vec<OverpassElement>, OsmError> {
        let response: OverpassResponse =
            serde_json::from_str(body).map_err(|e| OsmError::ParseError(e.to_string()))?;
        Ok(response.elements)
    }

    /// Convert raw elements, order nearest-first and cap at `max_results`
    fn collect_results(
        &self,
        elements: Vec<OverpassElement>,
        center: GeoPoint,
    ) -> Vec<Restaurant> {
        let mut results: Vec<Restaurant> = elements
            .into_iter()
            .filter_map(restaurant_from_element)
            .collect();

        results.sort_by(|a, b| {
            let da = center.distance_meters(&a.location);
            let db = center.distance_meters(&b.location);
            da.total_cmp(&db)
        });
        results.truncate(self.config.max_results);
        results
    }
}

/// Elements with unusable coordinates are dropped, not fatal
fn restaurant_from_element(element: OverpassElement) -> Option<Restaurant> {
    let location = GeoPoint::new(element.lat, element.lon).ok()?;

    let name = element
        .tags
        .get("name")
        .cloned()
        .unwrap_or_else(|| UNNAMED_FALLBACK.to_string());

    Some(Restaurant {
        id: element.id,
        name,
        location,
        tags: element.tags,
    })
}

/// Escape characters that are special in an Overpass regex filter
fn escape_regex(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(
            c,
            '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '^' | '$'
                | '"'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

async fn read_success_body(response: Response) -> Result<String, OsmError> {
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

// Raw API types below

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    id: u64,
    lat: f64,
    lon: f64,
    #[serde(default)]
    tags: std::collections::HashMap<String, String>,
}
