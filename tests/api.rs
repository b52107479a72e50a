mod common;

use std::sync::Arc;

use axum::http::{header, Method, Request, StatusCode};
use medicine_recommender::{
    api::{router, AppState},
    model::{ScoredLabel, Scorer},
};
use serde_json::json;
use tower::ServiceExt;

use common::{predict, send};

/// Scores a fixed ranking regardless of input.
struct Canned(Vec<(&'static str, Option<f64>)>);

impl Scorer for Canned {
    fn score(&self, _text: &str) -> Vec<ScoredLabel> {
        self.0
            .iter()
            .map(|(label, score)| ScoredLabel {
                label: label.to_string(),
                score: *score,
            })
            .collect()
    }
}

fn ready_state() -> AppState {
    AppState::with_scorer(Arc::new(Canned(vec![
        ("paracetamol", Some(0.61)),
        ("vitaminc", Some(0.2)),
        ("ibuprofen", Some(0.15)),
        ("antacid", Some(0.04)),
    ])))
}

#[tokio::test]
async fn health_reports_missing_model() {
    let router = router(AppState::without_model());
    let (status, body) = send(router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true, "modelLoaded": false}));
}

#[tokio::test]
async fn health_reports_loaded_model() {
    let (status, body) = send(router(ready_state()), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["modelLoaded"], true);
}

#[tokio::test]
async fn predict_without_model_is_unavailable() {
    let router = router(AppState::without_model());
    let (status, body) = predict(router, json!({"symptoms": "fever"})).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["detail"], "Model not loaded. Train first.");
}

#[tokio::test]
async fn empty_or_missing_symptoms_are_bad_requests_in_any_state() {
    for state in [AppState::without_model(), ready_state()] {
        for body in [
            json!({"symptoms": ""}),
            json!({"symptoms": "   \t"}),
            json!({"age": 30}),
            json!({"symptoms": null}),
        ] {
            let (status, reply) = predict(router(state.clone()), body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(reply["detail"], "symptoms is required");
        }
    }
}

#[tokio::test]
async fn predict_returns_top_three_enriched() {
    let body = json!({
        "symptoms": "  Fever AND headache ",
        "age": 34,
        "gender": "Female",
        "medicalHistory": "asthma"
    });
    let (status, reply) = predict(router(ready_state()), body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["success"], true);

    let recs = reply["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 3);
    assert_eq!(recs[0]["name"], "Paracetamol");
    assert_eq!(recs[0]["genericName"], "Acetaminophen");
    assert_eq!(recs[0]["confidence"], 61);
    assert_eq!(recs[1]["name"], "Vitaminc");
    assert_eq!(recs[1]["category"], "General");
    assert_eq!(recs[1]["dosage"], "See package insert");
    assert_eq!(recs[2]["name"], "Ibuprofen");

    let confidences: Vec<u64> = recs
        .iter()
        .map(|r| r["confidence"].as_u64().unwrap())
        .collect();
    assert!(confidences.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn hard_label_scorer_reports_placeholder_confidence() {
    let state = AppState::with_scorer(Arc::new(Canned(vec![("guaifenesin", None)])));
    let (status, reply) = predict(router(state), json!({"symptoms": "chesty cough"})).await;
    assert_eq!(status, StatusCode::OK);
    let recs = reply["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0]["name"], "Guaifenesin");
    assert_eq!(recs[0]["confidence"], 60);
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/predict")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = router(ready_state()).oneshot(request).await.unwrap();
    assert!(response.status().is_success());
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}
