mod common;

use axum::http::StatusCode;
use serde_json::Value;

use common::{
    closed_addr, gateway_config, spawn_gateway, Canned, FakeService, IMAGERY_KEY, SATELLITES_KEY,
    WEATHER_KEY,
};

const ABOVE_BODY: &str = r#"{"info":{"category":"ANY","transactionscount":3,"satcount":1},  "above":[{"satid":25544,"satname":"SPACE STATION","intDesignator":"1998-067A","launchDate":"1998-11-20","satlat":47.9,"satlng":1.8,"satalt":418.2}]}"#;

async fn get(url: String) -> reqwest::Response {
    reqwest::get(url).await.unwrap()
}

fn assert_no_secrets(body: &str) {
    for key in [SATELLITES_KEY, IMAGERY_KEY, WEATHER_KEY] {
        assert!(!body.contains(key), "credential leaked in {body}");
    }
}

#[tokio::test]
async fn satellites_above_relays_upstream_json_verbatim() {
    let upstream = FakeService::new();
    upstream.respond_to_all(Canned::json(ABOVE_BODY));
    let gateway = spawn_gateway(gateway_config(upstream.spawn().await)).await;

    let response = get(format!(
        "http://{gateway}/api/satellites-above?latitude=48.85&longitude=2.35"
    ))
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    assert_eq!(response.text().await.unwrap(), ABOVE_BODY);
    assert_eq!(
        upstream.requests(),
        vec![format!(
            "/sat/satellite/above/48.85/2.35/0/70/0/?apiKey={SATELLITES_KEY}"
        )]
    );
}

#[tokio::test]
async fn satellite_passes_uses_fixed_window_and_elevation() {
    let upstream = FakeService::new();
    upstream.respond_to_all(Canned::json(
        r#"{"info":{"satid":25544},"passes":[{"startUTC":1700000000,"maxEl":42.7,"endUTC":1700000540}]}"#,
    ));
    let gateway = spawn_gateway(gateway_config(upstream.spawn().await)).await;

    let response = get(format!(
        "http://{gateway}/api/satellite-passes?satelliteId=25544&latitude=51.5&longitude=-0.12"
    ))
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["passes"][0]["maxEl"], 42.7);
    assert_eq!(
        upstream.requests(),
        vec![format!(
            "/sat/satellite/radiopasses/25544/51.5/-0.12/0/7/10/?apiKey={SATELLITES_KEY}"
        )]
    );
}

#[tokio::test]
async fn weather_requests_metric_units() {
    let upstream = FakeService::new();
    upstream.respond_to_all(Canned::json(
        r#"{"name":"Paris","weather":[{"description":"clear sky"}],"main":{"temp":18.2,"humidity":40},"wind":{"speed":2.1}}"#,
    ));
    let gateway = spawn_gateway(gateway_config(upstream.spawn().await)).await;

    let response = get(format!(
        "http://{gateway}/api/weather?latitude=48.85&longitude=2.35"
    ))
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["name"], "Paris");
    assert_eq!(
        upstream.requests(),
        vec![format!(
            "/wx/weather?lat=48.85&lon=2.35&units=metric&appid={WEATHER_KEY}"
        )]
    );
}

#[tokio::test]
async fn earth_image_is_byte_identical() {
    let payload: &'static [u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 1, 2, 255];
    let upstream = FakeService::new();
    upstream.respond_to_all(Canned::bytes("image/png", payload));
    let gateway = spawn_gateway(gateway_config(upstream.spawn().await)).await;

    let response = get(format!(
        "http://{gateway}/api/earth-image?latitude=48.85&longitude=2.35"
    ))
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "image/png"
    );
    assert_eq!(response.bytes().await.unwrap().as_ref(), payload);
    assert_eq!(
        upstream.requests(),
        vec![format!(
            "/img/planetary/earth/imagery?lon=2.35&lat=48.85&dim=0.2&api_key={IMAGERY_KEY}"
        )]
    );
}

#[tokio::test]
async fn missing_coordinates_are_rejected_before_any_upstream_call() {
    let upstream = FakeService::new();
    upstream.respond_to_all(Canned::json("{}"));
    let gateway = spawn_gateway(gateway_config(upstream.spawn().await)).await;

    let cases = [
        ("satellites-above?latitude=10", "longitude"),
        ("satellites-above?longitude=10", "latitude"),
        ("satellite-passes?latitude=10&longitude=10", "satelliteId"),
        ("satellite-passes?satelliteId=25544&longitude=10", "latitude"),
        ("earth-image", "latitude"),
        ("weather?latitude=10&longitude=", "longitude"),
    ];
    for (path, missing) in cases {
        let response = get(format!("http://{gateway}/api/{path}")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{path}");
        let body: Value = response.json().await.unwrap();
        assert_eq!(
            body["error"],
            format!("missing required parameter: {missing}"),
            "{path}"
        );
    }

    assert!(upstream.requests().is_empty());
}

#[tokio::test]
async fn invalid_coordinates_are_rejected() {
    let upstream = FakeService::new();
    let gateway = spawn_gateway(gateway_config(upstream.spawn().await)).await;

    for query in ["latitude=91&longitude=0", "latitude=abc&longitude=0"] {
        let response = get(format!("http://{gateway}/api/weather?{query}")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{query}");
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].is_string());
    }
    assert!(upstream.requests().is_empty());
}

#[tokio::test]
async fn upstream_failure_becomes_generic_500() {
    let upstream = FakeService::new();
    upstream.respond_to_all(Canned::status(
        StatusCode::UNAUTHORIZED,
        r#"{"error":"Invalid API key sat-secret"}"#,
    ));
    let gateway = spawn_gateway(gateway_config(upstream.spawn().await)).await;

    for (path, service) in [
        ("satellites-above?latitude=1&longitude=2", "satellite service"),
        (
            "satellite-passes?satelliteId=25544&latitude=1&longitude=2",
            "satellite service",
        ),
        ("earth-image?latitude=1&longitude=2", "imagery service"),
        ("weather?latitude=1&longitude=2", "weather service"),
    ] {
        let response = get(format!("http://{gateway}/api/{path}")).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let text = response.text().await.unwrap();
        assert_no_secrets(&text);
        let body: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            body["error"],
            format!("Failed to fetch data from the {service}")
        );
    }

    // One call per request, never retried.
    assert_eq!(upstream.requests().len(), 4);
}

#[tokio::test]
async fn non_json_success_body_is_not_relayed() {
    let upstream = FakeService::new();
    upstream.respond_to_all(Canned::json(r#"{"above":[{"satid":1"#));
    let gateway = spawn_gateway(gateway_config(upstream.spawn().await)).await;

    let response = get(format!(
        "http://{gateway}/api/satellites-above?latitude=1&longitude=2"
    ))
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn unreachable_upstream_does_not_leak_credentials() {
    let gateway = spawn_gateway(gateway_config(closed_addr().await)).await;

    let response = get(format!(
        "http://{gateway}/api/weather?latitude=1&longitude=2"
    ))
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let text = response.text().await.unwrap();
    assert_no_secrets(&text);
    assert!(text.contains("weather service"));
}

#[tokio::test]
async fn landing_page_health_and_openapi_are_served() {
    let upstream = FakeService::new();
    let gateway = spawn_gateway(gateway_config(upstream.spawn().await)).await;

    let index = get(format!("http://{gateway}/")).await;
    assert_eq!(index.status(), StatusCode::OK);
    let html = index.text().await.unwrap();
    assert!(html.contains("satelliteId, latitude, longitude"));
    assert_no_secrets(&html);

    let health: Value = get(format!("http://{gateway}/api/health"))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "ok");

    let doc: Value = get(format!("http://{gateway}/api-doc/openapi.json"))
        .await
        .json()
        .await
        .unwrap();
    assert!(doc["paths"]["/api/earth-image"].is_object());

    assert!(upstream.requests().is_empty());
}
