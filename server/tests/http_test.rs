//! End-to-end tests over real sockets.
//!
//! Both services run on ephemeral ports against one shared in-memory store,
//! mirroring two processes pointed at the same votes table.

mod common;

use ballot_server::db::{MemoryStore, VoteStore};
use ballot_server::Service;
use common::*;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

async fn spawn_pair() -> (String, String, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let voting = spawn(router(Service::Voting, store.clone())).await;
    let results = spawn(router(Service::Results, store.clone())).await;
    (voting, results, store)
}

#[tokio::test]
async fn votes_show_up_in_results() {
    let (voting, results, _) = spawn_pair().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{voting}/vote"))
        .json(&json!({"candidate": "Alice"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client
        .post(format!("{voting}/vote"))
        .form(&[("candidate", "Alice")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let receipt: Value = resp.json().await.unwrap();
    assert_eq!(receipt["status"], "success");

    let tally: HashMap<String, i64> = client
        .get(format!("{results}/results"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(tally.get("Alice"), Some(&2));
}

#[tokio::test]
async fn rejected_vote_leaves_results_unchanged() {
    let (voting, results, store) = spawn_pair().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{voting}/vote"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Candidate name required");

    let tally: Value = reqwest::get(format!("{results}/results"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(tally, json!({}));
    assert!(store.is_empty());
}

#[tokio::test]
async fn concurrent_clients_lose_no_rows() {
    let (voting, results, store) = spawn_pair().await;
    let client = reqwest::Client::new();
    let candidates = ["Alice", "Bob", "Carol", "Dave"];

    let submissions = (0..40).map(|i| {
        let client = client.clone();
        let url = format!("{voting}/vote");
        let candidate = candidates[i % candidates.len()];
        tokio::spawn(async move {
            client
                .post(url)
                .json(&json!({ "candidate": candidate }))
                .send()
                .await
                .map(|resp| resp.status().is_success())
                .unwrap_or(false)
        })
    });

    let mut accepted = 0;
    for handle in futures::future::join_all(submissions).await {
        if handle.unwrap() {
            accepted += 1;
        }
    }

    let tally: HashMap<String, i64> = reqwest::get(format!("{results}/results"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(accepted, 40);
    assert_eq!(tally.values().sum::<i64>(), accepted);
    assert_eq!(store.len() as i64, accepted);
    assert_eq!(store.tally().await.unwrap().get("Carol"), 10);
}

#[tokio::test]
async fn favicon_is_not_found_on_both_services() {
    let (voting, results, _) = spawn_pair().await;

    for base in [voting, results] {
        let resp = reqwest::get(format!("{base}/favicon.ico")).await.unwrap();
        assert_eq!(resp.status(), 404);
    }
}
