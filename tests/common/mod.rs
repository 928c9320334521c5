//! In-process stand-in for the tool tracker backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::{Form, Json, Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use tooltracker::repository::HttpRepository;

/// Requests received by the fake backend, in arrival order.
#[derive(Clone, Default)]
pub struct Recorded {
    calls: Arc<Mutex<Vec<String>>>,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl Recorded {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<HashMap<String, String>> {
        self.queries.lock().unwrap().clone()
    }

    fn push(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

/// Binds `router` to an ephemeral port and returns its base url.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn repository(base_url: &str) -> HttpRepository {
    HttpRepository::new(base_url, Duration::from_secs(5)).unwrap()
}

/// Backend answering every endpoint the client uses.
pub fn backend(recorded: Recorded) -> Router {
    Router::new()
        .route("/api/tools", get(list_tools).post(create_tool))
        .route("/api/brands", get(list_brands))
        .route("/lend/{id}", post(lend_tool))
        .route("/return/{id}", post(return_tool))
        .route("/delete/{id}", post(delete_tool))
        .route("/people", post(create_person))
        .with_state(recorded)
}

async fn list_tools(
    State(recorded): State<Recorded>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    recorded.queries.lock().unwrap().push(params);
    Json(json!({
        "tools": [
            {"id": 21, "name": "Drill", "brand": "Makita", "value": 89.99,
             "image_path": "images/drill.jpg", "borrower": null, "lent_on": null}
        ],
        "pagination": {
            "page": page, "per_page": 20, "total_count": 21,
            "total_pages": 2, "has_next": page < 2, "has_prev": page > 1
        }
    }))
}

async fn list_brands() -> Json<Value> {
    Json(json!(["Bosch", null, "Makita", ""]))
}

async fn create_tool(State(recorded): State<Recorded>, Json(body): Json<Value>) -> Json<Value> {
    let name = body["name"].as_str().unwrap_or_default().to_string();
    recorded.push(format!("create {name}"));
    Json(json!({"id": 77, "name": name}))
}

async fn lend_tool(
    State(recorded): State<Recorded>,
    Path(id): Path<i64>,
    Form(form): Form<HashMap<String, String>>,
) -> StatusCode {
    recorded.push(format!("lend {id} to {}", form["person"]));
    StatusCode::OK
}

async fn return_tool(State(recorded): State<Recorded>, Path(id): Path<i64>) -> StatusCode {
    recorded.push(format!("return {id}"));
    StatusCode::OK
}

async fn delete_tool(State(recorded): State<Recorded>, Path(id): Path<i64>) -> StatusCode {
    recorded.push(format!("delete {id}"));
    StatusCode::NO_CONTENT
}

async fn create_person(
    State(recorded): State<Recorded>,
    Form(form): Form<HashMap<String, String>>,
) -> StatusCode {
    recorded.push(format!("person {} ({})", form["name"], form["contact_info"]));
    StatusCode::OK
}
