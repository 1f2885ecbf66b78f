use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use geotrip::ItemService;
use geotrip_server::router;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> (Router, Arc<ItemService>) {
    let service = Arc::new(ItemService::builder().build().unwrap());
    (router(service.clone()), service)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn seed_paulista(app: &Router) {
    for (name, lat, lng) in [
        ("MASP", -23.5615, -46.6559),
        ("Trianon", -23.5621, -46.6572),
        ("Ibirapuera", -23.5874, -46.6576),
    ] {
        let (status, _) = send(
            app,
            Method::POST,
            "/items",
            Some(json!({"name": name, "latitude": lat, "longitude": lng})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

#[tokio::test]
async fn test_health() {
    let (app, _) = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["items"], 0);
}

#[tokio::test]
async fn test_item_crud() {
    let (app, service) = app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/items",
        Some(json!({
            "name": "MASP",
            "description": "museum",
            "latitude": -23.5615,
            "longitude": -46.6559
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "MASP");
    assert!(created.get("distanceMeters").is_none());
    let id = created["id"].as_u64().unwrap();

    let (status, fetched) = send(&app, Method::GET, &format!("/items/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    // Only one coordinate: location is kept
    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/items/{}", id),
        Some(json!({"name": "MASP II", "latitude": 10.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "MASP II");
    assert_eq!(updated["latitude"], -23.5615);

    let (status, _) = send(&app, Method::DELETE, &format!("/items/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(service.index().is_empty());

    let (status, body) = send(&app, Method::GET, &format!("/items/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));

    let (status, _) = send(&app, Method::DELETE, &format!("/items/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_rejects_bad_payloads() {
    let (app, service) = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/items",
        Some(json!({"name": "far", "latitude": 95.0, "longitude": 0.0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = send(
        &app,
        Method::POST,
        "/items",
        Some(json!({"name": "   ", "latitude": 0.0, "longitude": 0.0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::POST, "/items", Some(json!({"name": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/items/not-a-number", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(service.index().is_empty());
}

#[tokio::test]
async fn test_nearby_search() {
    let (app, _) = app();
    seed_paulista(&app).await;

    let (status, all) = send(&app, Method::GET, "/items", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 3);

    // Incomplete query lists everything
    let (_, partial) = send(&app, Method::GET, "/items?lat=-23.5615&lng=-46.6559", None).await;
    assert_eq!(partial.as_array().unwrap().len(), 3);

    let (status, near) = send(
        &app,
        Method::GET,
        "/items?lat=-23.5615&lng=-46.6559&radius=500",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let near = near.as_array().unwrap();
    assert_eq!(near.len(), 2);
    assert_eq!(near[0]["name"], "MASP");
    assert_eq!(near[0]["distanceMeters"], 0.0);
    assert_eq!(near[1]["name"], "Trianon");

    let (status, _) = send(
        &app,
        Method::GET,
        "/items?lat=-23.5&lng=-46.6&radius=-1",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/items?lat=abc&lng=0&radius=1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_optimize_trips() {
    let (app, _) = app();

    let (status, empty) = send(&app, Method::GET, "/items/optimize", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty["tripCount"], 0);
    assert_eq!(empty["capacity"], 3);

    seed_paulista(&app).await;

    let (status, plan) = send(&app, Method::GET, "/items/optimize?capacity=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plan["totalItems"], 3);
    assert_eq!(plan["capacity"], 2);
    assert_eq!(plan["tripCount"], 2);
    let names: Vec<Vec<&str>> = plan["trips"]
        .as_array()
        .unwrap()
        .iter()
        .map(|trip| {
            trip.as_array()
                .unwrap()
                .iter()
                .map(|stop| stop["name"].as_str().unwrap())
                .collect()
        })
        .collect();
    assert_eq!(names, vec![vec!["MASP", "Trianon"], vec!["Ibirapuera"]]);

    let (_, default_plan) = send(&app, Method::GET, "/items/optimize", None).await;
    assert_eq!(default_plan["tripCount"], 1);

    for bad in ["0", "-3", "many"] {
        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/items/optimize?capacity={}", bad),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "capacity={}", bad);
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_optimize_geojson() {
    let (app, _) = app();
    seed_paulista(&app).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/items/optimize/geojson?capacity=2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/geo+json"
    );

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["type"], "FeatureCollection");
    assert_eq!(value["features"].as_array().unwrap().len(), 2);
    assert_eq!(value["features"][0]["geometry"]["type"], "LineString");
    assert_eq!(value["features"][1]["geometry"]["type"], "Point");
}
