//! Fake PokeAPI served over a local socket
//!
//! Serves a handful of location areas and Pokemon and counts the requests it
//! receives, so tests can tell cache hits from network fetches.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

/// Number of location areas the fake API knows about
pub const AREA_COUNT: usize = 5;

#[derive(Clone)]
struct FakeState {
    base: String,
    requests: Arc<AtomicUsize>,
}

/// A running fake API
pub struct FakeApi {
    /// API root, e.g. `http://127.0.0.1:PORT/api/v2`
    pub base: String,
    requests: Arc<AtomicUsize>,
}

impl FakeApi {
    /// Total requests served so far
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

pub async fn spawn_fake_api() -> FakeApi {
    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    let base = format!("http://{}/api/v2", addr);
    let requests = Arc::new(AtomicUsize::new(0));

    let state = FakeState {
        base: base.clone(),
        requests: requests.clone(),
    };

    let app = Router::new()
        .route("/api/v2/location-area", get(list_areas))
        .route("/api/v2/location-area/:name", get(get_area))
        .route("/api/v2/pokemon/:name", get(get_pokemon))
        .with_state(state);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeApi { base, requests }
}

fn area_name(index: usize) -> String {
    format!("area-{}", index)
}

async fn list_areas(
    State(state): State<FakeState>,
    Query(params): Query<HashMap<String, usize>>,
) -> Json<Value> {
    state.requests.fetch_add(1, Ordering::SeqCst);

    let offset = params.get("offset").copied().unwrap_or(0);
    let limit = params.get("limit").copied().unwrap_or(20);

    let results: Vec<Value> = (offset..(offset + limit).min(AREA_COUNT))
        .map(|i| {
            json!({
                "name": area_name(i),
                "url": format!("{}/location-area/{}/", state.base, i),
            })
        })
        .collect();

    let page_url = |offset: usize| {
        format!(
            "{}/location-area?offset={}&limit={}",
            state.base, offset, limit
        )
    };
    let next = (offset + limit < AREA_COUNT).then(|| page_url(offset + limit));
    let previous = (offset > 0).then(|| page_url(offset.saturating_sub(limit)));

    Json(json!({
        "count": AREA_COUNT,
        "next": next,
        "previous": previous,
        "results": results,
    }))
}

async fn get_area(
    State(state): State<FakeState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    state.requests.fetch_add(1, Ordering::SeqCst);

    let known = (0..AREA_COUNT).any(|i| area_name(i) == name);
    if !known {
        return Err(StatusCode::NOT_FOUND);
    }

    Ok(Json(json!({
        "id": 1,
        "name": name,
        "game_index": 1,
        "pokemon_encounters": [
            {"pokemon": {"name": "tentacool", "url": "u"}, "version_details": []},
            {"pokemon": {"name": "magikarp", "url": "u"}, "version_details": []}
        ]
    })))
}

async fn get_pokemon(
    State(state): State<FakeState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    state.requests.fetch_add(1, Ordering::SeqCst);

    if name == "missingno" {
        return Err(StatusCode::NOT_FOUND);
    }

    // Ids resolve to the canonical name, like the real API
    let name = if name == "25" { "pikachu".to_string() } else { name };

    // Zero base experience: every catch succeeds
    Ok(Json(json!({
        "id": 25,
        "name": name,
        "base_experience": 0,
        "height": 4,
        "weight": 60,
        "stats": [
            {"base_stat": 35, "effort": 0, "stat": {"name": "hp", "url": "u"}},
            {"base_stat": 90, "effort": 2, "stat": {"name": "speed", "url": "u"}}
        ],
        "types": [{"slot": 1, "type": {"name": "electric", "url": "u"}}]
    })))
}
