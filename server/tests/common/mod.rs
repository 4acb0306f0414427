//! Shared helpers for the router and end-to-end tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request, StatusCode};
use axum::Router;
use ballot_core::{Candidate, Tally, Vote};
use ballot_server::db::{MemoryStore, VoteStore};
use ballot_server::{app, AppState, Service};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Store whose every call fails as if the pool were exhausted.
pub struct FailingStore;

#[async_trait]
impl VoteStore for FailingStore {
    async fn record_vote(&self, _candidate: &Candidate) -> Result<Vote, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn tally(&self) -> Result<Tally, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }
}

pub fn router(service: Service, store: Arc<dyn VoteStore>) -> Router {
    app(AppState::new(service, store))
}

pub fn memory_router(service: Service) -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (router(service, store.clone()), store)
}

pub fn json_vote(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/vote")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Send a request and return the status with the raw body.
pub async fn send_raw(router: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Send a request and parse the body as JSON.
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send_raw(router, request).await;
    (status, serde_json::from_str(&body).unwrap())
}

/// Bind `router` on an ephemeral port and return its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}
