// Fake event platform API for integration tests, served by axum on an ephemeral port.
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header::COOKIE},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

pub const EVENT_ID: &str = "evt-fake";
pub const SLOW_EVENT_ID: &str = "evt-slow";
pub const TICKET_KEY: &str = "tk-fake";

// One request as the fake server saw it.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub path: &'static str,
    pub query: HashMap<String, String>,
    pub cookie: Option<String>,
}

pub struct FakeState {
    pub guests: Vec<Value>,
    pub ticket_key: Option<String>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeState {
    pub fn new(guest_count: usize, ticket_key: Option<&str>) -> Self {
        Self {
            guests: (0..guest_count).map(guest_json).collect(),
            ticket_key: ticket_key.map(str::to_string),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, path: &'static str, query: &HashMap<String, String>, headers: &HeaderMap) {
        let cookie = headers
            .get(COOKIE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        self.requests
            .lock()
            .expect("requests mutex poisoned")
            .push(RecordedRequest {
                path,
                query: query.clone(),
                cookie,
            });
    }
}

pub struct FakeApi {
    pub base_url: String,
    pub state: Arc<FakeState>,
}

impl FakeApi {
    pub fn requests(&self, path: &str) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .expect("requests mutex poisoned")
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }
}

pub fn guest_json(i: usize) -> Value {
    json!({
        "api_id": format!("gst-{i:03}"),
        "name": format!("Guest {i:03}"),
        "bio_short": if i % 2 == 0 { Value::Null } else { json!("builds things\nin Rust") },
        "website": null,
        "instagram_handle": if i % 3 == 0 { json!(format!("guest{i}")) } else { Value::Null },
        "linkedin_handle": null,
        "tiktok_handle": null,
        "twitter_handle": null,
        "youtube_handle": null,
        "avatar_url": "https://cdn.lu.ma/avatars-default/avatar_1.png",
    })
}

// Start the fake API on an ephemeral port; it lives as long as the test runtime.
pub async fn spawn(state: FakeState) -> FakeApi {
    let state = Arc::new(state);
    let app = Router::new()
        .route("/event/get", get(event_detail))
        .route("/event/get-guest-list", get(guest_list))
        .route("/event-page", get(event_page))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake api failed");
    });

    FakeApi {
        base_url: format!("http://{addr}"),
        state,
    }
}

async fn event_detail(
    State(state): State<Arc<FakeState>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    state.record("/event/get", &query, &headers);
    match query.get("event_api_id").map(String::as_str) {
        Some(SLOW_EVENT_ID) => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({ "guest_data": null })).into_response()
        }
        Some(EVENT_ID) => {
            let guest_data = state
                .ticket_key
                .as_ref()
                .map(|key| json!({ "ticket_key": key }))
                .unwrap_or(Value::Null);
            Json(json!({ "api_id": EVENT_ID, "guest_data": guest_data })).into_response()
        }
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "event not found" })),
        )
            .into_response(),
    }
}

// Cursor is the stringified offset of the next page.
async fn guest_list(
    State(state): State<Arc<FakeState>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    state.record("/event/get-guest-list", &query, &headers);
    if query.get("ticket_key") != state.ticket_key.as_ref() {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "message": "invalid ticket key" })),
        )
            .into_response();
    }

    let limit: usize = query
        .get("pagination_limit")
        .and_then(|v| v.parse().ok())
        .unwrap_or(100);
    let offset: usize = query
        .get("pagination_cursor")
        .and_then(|v| v.strip_prefix("cur-"))
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    let end = (offset + limit).min(state.guests.len());
    let has_more = end < state.guests.len();
    Json(json!({
        "entries": state.guests[offset..end],
        "has_more": has_more,
        "next_cursor": if has_more { json!(format!("cur-{end}")) } else { Value::Null },
    }))
    .into_response()
}

async fn event_page() -> Html<String> {
    Html(format!(
        r#"<!doctype html><html><head>
        <meta charset="utf-8">
        <meta name="apple-itunes-app" content="app-id=1546973744, app-argument=luma://event/{EVENT_ID}">
        </head><body><button class="guests-button">Guests</button></body></html>"#
    ))
}
