//! Integration tests for the Google provider pair (wiremock-based)

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use domain::models::stable_place_id;
use domain::{GeoPoint, ManeuverType, TravelProfile};
use integration_google::{
    GoogleConfig, GoogleDirectionsClient, GoogleError, GooglePlacesClient,
};

fn config_for_mock(base_url: &str) -> GoogleConfig {
    GoogleConfig {
        api_key: Some("test-key".to_string()),
        directions_base_url: base_url.to_string(),
        places_base_url: base_url.to_string(),
        timeout_secs: 5,
        language: "vi".to_string(),
        max_results: 10,
    }
}

fn ben_thanh() -> GeoPoint {
    GeoPoint::new(10.5, 106.25).unwrap()
}

fn tan_binh() -> GeoPoint {
    GeoPoint::new(10.75, 106.5).unwrap()
}

const fn sample_directions_json() -> &'static str {
    r#"{
        "status": "OK",
        "routes": [{
            "overview_polyline": { "points": "_p~iF~ps|U_ulLnnqC_mqNvxq`@" },
            "legs": [{
                "distance": { "value": 5840, "text": "5.8 km" },
                "duration": { "value": 763, "text": "13 mins" },
                "steps": [
                    {
                        "distance": { "value": 440, "text": "0.4 km" },
                        "duration": { "value": 73, "text": "1 min" },
                        "html_instructions": "Head <b>north</b> on Pasteur",
                        "maneuver": "turn-right"
                    },
                    {
                        "distance": { "value": 5400, "text": "5.4 km" },
                        "duration": { "value": 690, "text": "12 mins" },
                        "html_instructions": "<b>Turn left</b> onto Main St"
                    }
                ]
            }]
        }]
    }"#
}

/// Two legs of 500m and 700m, as a three-waypoint optimized route reports
const fn sample_two_leg_json() -> &'static str {
    r#"{
        "status": "OK",
        "routes": [{
            "overview_polyline": { "points": "_p~iF~ps|U_ulLnnqC_mqNvxq`@" },
            "legs": [
                {
                    "distance": { "value": 500, "text": "0.5 km" },
                    "duration": { "value": 100, "text": "2 mins" },
                    "steps": [{
                        "distance": { "value": 500, "text": "0.5 km" },
                        "duration": { "value": 100, "text": "2 mins" },
                        "html_instructions": "Head east",
                        "maneuver": "straight"
                    }]
                },
                {
                    "distance": { "value": 700, "text": "0.7 km" },
                    "duration": { "value": 140, "text": "3 mins" },
                    "steps": [{
                        "distance": { "value": 700, "text": "0.7 km" },
                        "duration": { "value": 140, "text": "3 mins" },
                        "html_instructions": "Continue to the destination"
                    }]
                }
            ]
        }]
    }"#
}

const fn sample_places_json() -> &'static str {
    r#"{
        "status": "OK",
        "results": [
            {
                "place_id": "ChIJN1t_tDeuEmsRUsoyG83frY4",
                "name": "Quán Bụi Bistro",
                "geometry": { "location": { "lat": 10.7832, "lng": 106.6957 } },
                "types": ["restaurant", "food"],
                "rating": 4.4,
                "vicinity": "17A Ngô Văn Năm"
            },
            {
                "place_id": "ChIJrTLr-GyuEmsRBfy61i59si0",
                "name": "Maison Marou",
                "geometry": { "location": { "lat": 10.7741, "lng": 106.7043 } },
                "types": ["cafe", "food"]
            }
        ]
    }"#
}

#[tokio::test]
async fn test_directions_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .and(query_param("origin", "10.5,106.25"))
        .and(query_param("destination", "10.75,106.5"))
        .and(query_param("mode", "driving"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_directions_json()))
        .mount(&server)
        .await;

    let client = GoogleDirectionsClient::new(&config_for_mock(&server.uri())).unwrap();
    let route = client
        .directions(ben_thanh(), tan_binh(), TravelProfile::DrivingCar)
        .await
        .unwrap();

    assert!((route.distance_meters - 5840.0).abs() < f64::EPSILON);
    assert!((route.duration_seconds - 763.0).abs() < f64::EPSILON);

    // Overview polyline decoded into lat-first geometry
    assert_eq!(route.geometry.len(), 3);
    assert!((route.geometry[0].latitude() - 38.5).abs() < 1e-5);
    assert!((route.geometry[0].longitude() + 120.2).abs() < 1e-5);

    // Markup stripped at the boundary
    assert_eq!(route.steps[1].instruction, "Turn left onto Main St");
    assert_eq!(route.steps[0].maneuver, ManeuverType::TurnRight);
}

#[tokio::test]
async fn test_optimized_route_aggregates_legs_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .and(query_param("waypoints", "10.6,106.3"))
        .and(query_param("optimize", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_two_leg_json()))
        .mount(&server)
        .await;

    let client = GoogleDirectionsClient::new(&config_for_mock(&server.uri())).unwrap();
    let waypoints = [
        ben_thanh(),
        GeoPoint::new(10.6, 106.3).unwrap(),
        tan_binh(),
    ];
    let route = client
        .optimized_route(&waypoints, TravelProfile::DrivingCar)
        .await
        .unwrap();

    // Legs of 500m + 700m fold into one summed route, steps in leg order
    assert!((route.distance_meters - 1200.0).abs() < f64::EPSILON);
    assert!((route.duration_seconds - 240.0).abs() < f64::EPSILON);
    assert_eq!(route.steps.len(), 2);
    assert_eq!(route.steps[0].instruction, "Head east");
    assert_eq!(route.steps[1].instruction, "Continue to the destination");
    assert!((route.summary.distance_meters - 1200.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_optimized_route_requires_two_waypoints() {
    let client = GoogleDirectionsClient::new(&GoogleConfig::for_testing()).unwrap();

    let result = client
        .optimized_route(&[ben_thanh()], TravelProfile::DrivingCar)
        .await;

    assert!(matches!(result, Err(GoogleError::InvalidRequest(_))));
}

#[tokio::test]
async fn test_route_alternatives_truncates_to_count() {
    let server = MockServer::start().await;

    // Three routes back, two requested
    let body = r#"{
        "status": "OK",
        "routes": [
            {
                "overview_polyline": { "points": "_p~iF~ps|U_ulLnnqC" },
                "legs": [{ "distance": { "value": 5000 }, "duration": { "value": 600 }, "steps": [] }]
            },
            {
                "overview_polyline": { "points": "_p~iF~ps|U_ulLnnqC" },
                "legs": [{ "distance": { "value": 5200 }, "duration": { "value": 640 }, "steps": [] }]
            },
            {
                "overview_polyline": { "points": "_p~iF~ps|U_ulLnnqC" },
                "legs": [{ "distance": { "value": 6100 }, "duration": { "value": 720 }, "steps": [] }]
            }
        ]
    }"#;

    Mock::given(method("GET"))
        .and(path("/json"))
        .and(query_param("alternatives", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let client = GoogleDirectionsClient::new(&config_for_mock(&server.uri())).unwrap();
    let routes = client
        .route_alternatives(ben_thanh(), tan_binh(), TravelProfile::DrivingCar, 2)
        .await
        .unwrap();

    assert_eq!(routes.len(), 2);
    assert!((routes[0].distance_meters - 5000.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_route_alternatives_zero_count_returns_primary() {
    let server = MockServer::start().await;

    let body = r#"{
        "status": "OK",
        "routes": [
            {
                "overview_polyline": { "points": "_p~iF~ps|U_ulLnnqC" },
                "legs": [{ "distance": { "value": 5000 }, "duration": { "value": 600 }, "steps": [] }]
            },
            {
                "overview_polyline": { "points": "_p~iF~ps|U_ulLnnqC" },
                "legs": [{ "distance": { "value": 5200 }, "duration": { "value": 640 }, "steps": [] }]
            }
        ]
    }"#;

    Mock::given(method("GET"))
        .and(path("/json"))
        .and(query_param("alternatives", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let client = GoogleDirectionsClient::new(&config_for_mock(&server.uri())).unwrap();
    let routes = client
        .route_alternatives(ben_thanh(), tan_binh(), TravelProfile::DrivingCar, 0)
        .await
        .unwrap();

    // Zero is promoted to one, never to an empty answer
    assert_eq!(routes.len(), 1);
    assert!((routes[0].distance_meters - 5000.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_directions_zero_results_is_no_route() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{ "status": "ZERO_RESULTS", "routes": [] }"#),
        )
        .mount(&server)
        .await;

    let client = GoogleDirectionsClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client
        .directions(ben_thanh(), tan_binh(), TravelProfile::FootWalking)
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, GoogleError::NoRouteFound { .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_directions_request_denied() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{ "status": "REQUEST_DENIED", "routes": [], "error_message": "The provided API key is invalid." }"#,
        ))
        .mount(&server)
        .await;

    let client = GoogleDirectionsClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client
        .directions(ben_thanh(), tan_binh(), TravelProfile::DrivingCar)
        .await;

    assert!(matches!(result, Err(GoogleError::ConfigurationError(_))));
}

#[tokio::test]
async fn test_directions_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = GoogleDirectionsClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client
        .directions(ben_thanh(), tan_binh(), TravelProfile::DrivingCar)
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, GoogleError::ServiceUnavailable(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_search_nearby_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .and(query_param("location", "10.5,106.25"))
        .and(query_param("radius", "800"))
        .and(query_param("type", "restaurant"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_places_json()))
        .mount(&server)
        .await;

    let client = GooglePlacesClient::new(&config_for_mock(&server.uri())).unwrap();
    let results = client.search_nearby(ben_thanh(), 800.0).await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].name, "Quán Bụi Bistro");
    assert_eq!(results[0].id, stable_place_id("ChIJN1t_tDeuEmsRUsoyG83frY4"));
    assert_eq!(results[0].provider_ref(), "ChIJN1t_tDeuEmsRUsoyG83frY4");
    assert_eq!(results[1].cuisine(), Some("cafe"));
}

#[tokio::test]
async fn test_search_nearby_zero_results_is_ok() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{ "status": "ZERO_RESULTS", "results": [] }"#),
        )
        .mount(&server)
        .await;

    let client = GooglePlacesClient::new(&config_for_mock(&server.uri())).unwrap();
    let results = client.search_nearby(ben_thanh(), 800.0).await.unwrap();

    assert!(results.is_empty());
}

#[tokio::test]
async fn test_search_by_text_sends_bias() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .and(query_param("query", "bánh mì"))
        .and(query_param("location", "10.5,106.25"))
        .and(query_param("radius", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_places_json()))
        .mount(&server)
        .await;

    let client = GooglePlacesClient::new(&config_for_mock(&server.uri())).unwrap();
    let results = client
        .search_by_text("bánh mì", Some(ben_thanh()), 1000.0)
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn test_search_by_text_empty_query_is_invalid() {
    let client = GooglePlacesClient::new(&GoogleConfig::for_testing()).unwrap();

    let result = client.search_by_text("  ", None, 1000.0).await;
    assert!(matches!(result, Err(GoogleError::InvalidRequest(_))));
}

#[tokio::test]
async fn test_place_details_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", "ChIJN1t_tDeuEmsRUsoyG83frY4"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{
                "status": "OK",
                "result": {
                    "place_id": "ChIJN1t_tDeuEmsRUsoyG83frY4",
                    "name": "Quán Bụi Bistro",
                    "geometry": { "location": { "lat": 10.7832, "lng": 106.6957 } },
                    "types": ["restaurant"],
                    "rating": 4.4,
                    "formatted_address": "17A Ngô Văn Năm, Bến Nghé, Quận 1"
                }
            }"#,
        ))
        .mount(&server)
        .await;

    let client = GooglePlacesClient::new(&config_for_mock(&server.uri())).unwrap();
    let details = client
        .place_details("ChIJN1t_tDeuEmsRUsoyG83frY4")
        .await
        .unwrap();

    let restaurant = details.unwrap();
    assert_eq!(restaurant.name, "Quán Bụi Bistro");
    assert!(restaurant.tags.get("address").unwrap().contains("Quận 1"));
}

#[tokio::test]
async fn test_place_details_not_found_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{ "status": "NOT_FOUND" }"#),
        )
        .mount(&server)
        .await;

    let client = GooglePlacesClient::new(&config_for_mock(&server.uri())).unwrap();
    let details = client.place_details("ChIJmissing").await.unwrap();

    assert!(details.is_none());
}

#[tokio::test]
async fn test_places_rate_limited_in_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{ "status": "OVER_QUERY_LIMIT", "results": [] }"#),
        )
        .mount(&server)
        .await;

    let client = GooglePlacesClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client.search_nearby(ben_thanh(), 800.0).await;

    let err = result.unwrap_err();
    assert!(matches!(err, GoogleError::RateLimitExceeded { .. }));
    assert!(err.is_retryable());
}
