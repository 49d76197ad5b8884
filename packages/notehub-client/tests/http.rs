use std::{
	collections::{HashMap, HashSet},
	sync::{Arc, Mutex},
};

use axum::{
	Json, Router,
	extract::{Path, Query, State},
	http::{HeaderMap, StatusCode, header::AUTHORIZATION},
	response::{IntoResponse, Response},
	routing::{delete, get},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use notehub_client::{Error, HttpNotesApi, ListQuery, NotesApi};
use notehub_domain::{NewNote, NoteTag};

const TOKEN: &str = "test-token";

#[derive(Clone, Default)]
struct FakeRemote {
	list_params: Arc<Mutex<Vec<HashMap<String, String>>>>,
	live_ids: Arc<Mutex<HashSet<String>>>,
}

fn authorized(headers: &HeaderMap) -> bool {
	let expected = format!("Bearer {TOKEN}");

	headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) == Some(expected.as_str())
}

fn note_json(id: &str, title: &str) -> Value {
	json!({
		"id": id,
		"title": title,
		"content": "",
		"tag": "Todo",
		"createdAt": "2025-01-02T03:04:05Z",
		"updatedAt": "2025-01-02T03:04:05Z"
	})
}

async fn list(
	State(remote): State<FakeRemote>,
	headers: HeaderMap,
	Query(params): Query<HashMap<String, String>>,
) -> Response {
	if !authorized(&headers) {
		return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Invalid token" })))
			.into_response();
	}

	remote.list_params.lock().expect("lock").push(params);

	let notes: Vec<Value> = (1..=12).map(|i| note_json(&format!("n{i}"), "Listed")).collect();

	Json(json!({ "notes": notes, "totalPages": 3 })).into_response()
}

async fn create(
	State(remote): State<FakeRemote>,
	headers: HeaderMap,
	Json(body): Json<Value>,
) -> Response {
	if !authorized(&headers) {
		return StatusCode::UNAUTHORIZED.into_response();
	}

	let title = body.get("title").and_then(Value::as_str).unwrap_or_default();

	if title.len() < 3 {
		return (StatusCode::BAD_REQUEST, Json(json!({ "message": "title is too short" })))
			.into_response();
	}

	remote.live_ids.lock().expect("lock").insert("created".to_string());

	(StatusCode::CREATED, Json(note_json("created", title))).into_response()
}

async fn remove(
	State(remote): State<FakeRemote>,
	headers: HeaderMap,
	Path(id): Path<String>,
) -> Response {
	if !authorized(&headers) {
		return StatusCode::UNAUTHORIZED.into_response();
	}
	if !remote.live_ids.lock().expect("lock").remove(&id) {
		return (StatusCode::NOT_FOUND, Json(json!({ "message": "Note not found" })))
			.into_response();
	}

	Json(note_json(&id, "Deleted")).into_response()
}

async fn boom() -> Response {
	(StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response()
}

async fn spawn_remote(remote: FakeRemote) -> String {
	let app = Router::new()
		.route("/api/notes", get(list).post(create))
		.route("/api/notes/{id}", delete(remove))
		.route("/broken/notes", get(boom))
		.with_state(remote);
	let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
	let addr = listener.local_addr().expect("addr");

	tokio::spawn(async move {
		axum::serve(listener, app).await.expect("serve");
	});

	format!("http://{addr}")
}

fn api(base_url: String, token: &str) -> HttpNotesApi {
	let cfg = notehub_config::Api {
		base_url,
		token: token.to_string(),
		..notehub_config::Api::default()
	};

	HttpNotesApi::new(&cfg).expect("client")
}

#[tokio::test]
async fn lists_first_page_with_bearer_token() {
	let remote = FakeRemote::default();
	let base = spawn_remote(remote.clone()).await;
	let api = api(format!("{base}/api"), TOKEN);
	let page = api
		.list_notes(&ListQuery { page: 1, per_page: 12, search: String::new() })
		.await
		.expect("list");

	assert_eq!(page.notes.len(), 12);
	assert_eq!(page.total_pages, 3);

	let params = remote.list_params.lock().expect("lock");

	assert_eq!(params[0].get("page").map(String::as_str), Some("1"));
	assert_eq!(params[0].get("perPage").map(String::as_str), Some("12"));
	assert!(!params[0].contains_key("search"), "empty search must not be sent");
}

#[tokio::test]
async fn forwards_search_term() {
	let remote = FakeRemote::default();
	let base = spawn_remote(remote.clone()).await;
	let api = api(format!("{base}/api"), TOKEN);

	api.list_notes(&ListQuery { page: 2, per_page: 12, search: "milk & eggs".to_string() })
		.await
		.expect("list");

	let params = remote.list_params.lock().expect("lock");

	assert_eq!(params[0].get("search").map(String::as_str), Some("milk & eggs"));
	assert_eq!(params[0].get("page").map(String::as_str), Some("2"));
}

#[tokio::test]
async fn rejected_token_is_auth_error() {
	let base = spawn_remote(FakeRemote::default()).await;
	let api = api(format!("{base}/api"), "wrong");
	let err = api
		.list_notes(&ListQuery { page: 1, per_page: 12, search: String::new() })
		.await
		.expect_err("expected error");

	assert_eq!(err, Error::Auth { status: 401 });
}

#[tokio::test]
async fn server_validation_is_surfaced() {
	let base = spawn_remote(FakeRemote::default()).await;
	let api = api(format!("{base}/api"), TOKEN);
	let note = NewNote { title: "Hi".to_string(), content: String::new(), tag: NoteTag::Todo };
	let err = api.create_note(&note).await.expect_err("expected error");

	assert_eq!(err, Error::Validation { message: "title is too short".to_string() });
}

#[tokio::test]
async fn create_then_delete_twice() {
	let base = spawn_remote(FakeRemote::default()).await;
	let api = api(format!("{base}/api"), TOKEN);
	let note = NewNote {
		title: "Groceries".to_string(),
		content: "milk".to_string(),
		tag: NoteTag::Shopping,
	};
	let created = api.create_note(&note).await.expect("create");

	assert_eq!(created.id, "created");
	assert_eq!(created.title, "Groceries");

	let deleted = api.delete_note(&created.id).await.expect("delete");

	assert_eq!(deleted.id, "created");

	let err = api.delete_note(&created.id).await.expect_err("second delete must fail");

	assert!(matches!(err, Error::NotFound { .. }), "unexpected error: {err:?}");
}

#[tokio::test]
async fn non_2xx_is_server_error() {
	let base = spawn_remote(FakeRemote::default()).await;
	let api = api(format!("{base}/broken"), TOKEN);
	let err = api
		.list_notes(&ListQuery { page: 1, per_page: 12, search: String::new() })
		.await
		.expect_err("expected error");

	assert_eq!(
		err,
		Error::Server { status: 500, message: "database unavailable".to_string() }
	);
}

#[tokio::test]
async fn unreachable_remote_is_network_error() {
	let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
	let addr = listener.local_addr().expect("addr");

	drop(listener);

	let api = api(format!("http://{addr}/api"), TOKEN);
	let err = api
		.list_notes(&ListQuery { page: 1, per_page: 12, search: String::new() })
		.await
		.expect_err("expected error");

	assert!(matches!(err, Error::Network { .. }), "unexpected error: {err:?}");
}
