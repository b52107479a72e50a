#![allow(dead_code)]

use std::path::{Path, PathBuf};

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use medicine_recommender::{
    model::Link,
    train::{self, TrainOptions},
};
use serde_json::Value;
use tower::ServiceExt;

pub fn seed_csv() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data/seed.csv")
}

/// Train on the bundled seed data and write the model into `dir`.
pub fn train_seed_model(dir: &Path, link: Link) -> PathBuf {
    let model_path = dir.join("model.json");
    let mut options = TrainOptions::new(seed_csv(), model_path.clone());
    options.classifier.link = link;
    train::run(&options).expect("training on seed data succeeds");
    model_path
}

pub async fn send(
    router: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = router.oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn predict(router: Router, body: Value) -> (StatusCode, Value) {
    send(router, Method::POST, "/predict", Some(body)).await
}
