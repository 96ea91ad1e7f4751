//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint against a store
//! seeded with the demo fixtures (10 authors, 20 books, book `i` written by
//! author `i % 10`).

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use bookstore_api::{
    api::create_router,
    store::{seed_fixtures, MemoryStore},
    AppState, Config,
};
use serde_json::Value;
use tower::ServiceExt;

const TOKEN: &str = "test-admin-token";

// == Helper Functions ==

struct TestApp {
    app: Router,
    state: AppState,
    store: Arc<MemoryStore>,
}

impl TestApp {
    async fn seeded() -> Self {
        let store = Arc::new(MemoryStore::new());
        seed_fixtures(&store).await.unwrap();
        Self::over(store)
    }

    fn empty() -> Self {
        Self::over(Arc::new(MemoryStore::new()))
    }

    fn over(store: Arc<MemoryStore>) -> Self {
        let config = Config {
            admin_token: Some(TOKEN.to_string()),
            ..Config::default()
        };
        let state = AppState::new(store.clone(), &config);
        Self {
            app: create_router(state.clone()),
            state,
            store,
        }
    }

    async fn call(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, headers, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let (status, _, body) = self
            .call(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await;
        (status, to_json(&body))
    }

    async fn admin(&self, method: &str, uri: &str, body: &str) -> (StatusCode, HeaderMap, Bytes) {
        self.call(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}

fn to_json(bytes: &Bytes) -> Value {
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(bytes).unwrap()
    }
}

fn ids(list: &Value) -> Vec<i64> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}

// == List Endpoint Tests ==

#[tokio::test]
async fn test_list_defaults_to_first_three() {
    let app = TestApp::seeded().await;

    let (status, books) = app.get("/api/books").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&books), vec![1, 2, 3]);
    assert_eq!(books[0]["title"], "Book title 0");
    assert_eq!(books[0]["author"]["id"], 1);

    let (status, authors) = app.get("/api/authors").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&authors), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_list_pagination() {
    let app = TestApp::seeded().await;

    let (_, books) = app.get("/api/books?page=2&limit=5").await;
    assert_eq!(ids(&books), vec![6, 7, 8, 9, 10]);

    let (_, beyond) = app.get("/api/books?page=8&limit=3").await;
    assert_eq!(beyond, Value::Array(vec![]));
}

#[tokio::test]
async fn test_list_invalid_pagination_falls_back_to_defaults() {
    let app = TestApp::seeded().await;

    for uri in [
        "/api/authors?page=abc&limit=xyz",
        "/api/authors?page=0&limit=-4",
    ] {
        let (status, authors) = app.get(uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&authors), vec![1, 2, 3]);
    }
}

#[tokio::test]
async fn test_list_views_use_summaries() {
    let app = TestApp::seeded().await;

    let (_, authors) = app.get("/api/authors").await;
    let first_book = &authors[0]["books"][0];
    assert_eq!(first_book["title"], "Book title 0");
    assert!(first_book.get("coverText").is_none());

    let (_, author) = app.get("/api/authors/1").await;
    assert_eq!(
        author["books"][0]["coverText"],
        "Back cover of book number 0"
    );
}

// == Cache Tests ==

#[tokio::test]
async fn test_list_is_cached_under_page_key() {
    let app = TestApp::seeded().await;

    app.get("/api/books?page=2&limit=5").await;
    app.get("/api/books?page=2&limit=5").await;
    app.get("/api/authors").await;

    assert!(app.state.cache.contains_key("bookList-2-5").await);
    assert!(app.state.cache.contains_key("authorList-1-3").await);

    let stats = app.state.cache.stats().await;
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 2);
}

#[tokio::test]
async fn test_book_update_invalidates_book_lists() {
    let app = TestApp::seeded().await;
    let (_, before) = app.get("/api/books").await;
    assert_eq!(before[0]["title"], "Book title 0");

    let (status, _, _) = app
        .admin("PUT", "/api/books/1", r#"{"title":"Renamed"}"#)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(!app.state.cache.contains_key("bookList-1-3").await);

    let (_, after) = app.get("/api/books").await;
    assert_eq!(after[0]["title"], "Renamed");
}

#[tokio::test]
async fn test_author_update_invalidates_book_lists() {
    let app = TestApp::seeded().await;
    app.get("/api/books").await;

    app.admin("PUT", "/api/authors/1", r#"{"firstName":"Octavia"}"#)
        .await;

    let (_, books) = app.get("/api/books").await;
    assert_eq!(books[0]["author"]["firstName"], "Octavia");
}

#[tokio::test]
async fn test_create_and_delete_invalidate_every_page() {
    let app = TestApp::seeded().await;
    app.get("/api/books").await;
    app.get("/api/authors?page=4").await;

    let (status, _, _) = app
        .admin("POST", "/api/authors", r#"{"firstName":"N","lastName":"K"}"#)
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(!app.state.cache.contains_key("bookList-1-3").await);
    assert!(!app.state.cache.contains_key("authorList-4-3").await);

    let (_, authors) = app.get("/api/authors?page=4").await;
    assert_eq!(ids(&authors), vec![10, 11]);

    app.admin("DELETE", "/api/authors/11", "").await;
    let (_, authors) = app.get("/api/authors?page=4").await;
    assert_eq!(ids(&authors), vec![10]);
}

#[tokio::test]
async fn test_failed_mutation_keeps_cache() {
    let app = TestApp::seeded().await;
    app.get("/api/books").await;

    let (status, _, _) = app.admin("PUT", "/api/books/1", r#"{"title":""}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.state.cache.contains_key("bookList-1-3").await);
}

#[tokio::test]
async fn test_clear_cache_endpoint() {
    let app = TestApp::seeded().await;
    app.get("/api/books").await;
    app.get("/api/authors").await;

    let (status, _, body) = app
        .call(
            Request::builder()
                .uri("/api/books/clearCache")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"Cache cleared");
    assert!(!app.state.cache.contains_key("bookList-1-3").await);
    assert!(!app.state.cache.contains_key("authorList-1-3").await);
}

#[tokio::test]
async fn test_each_successful_mutation_invalidates_once() {
    let app = TestApp::seeded().await;

    for (method, uri, body) in [
        ("POST", "/api/authors", r#"{"firstName":"A","lastName":"B"}"#),
        ("POST", "/api/books", r#"{"title":"T","idAuthor":1}"#),
        ("PUT", "/api/authors/2", r#"{"lastName":"C"}"#),
        ("PUT", "/api/books/2", r#"{"title":"U"}"#),
        ("DELETE", "/api/books/3", ""),
        ("DELETE", "/api/authors/4", ""),
    ] {
        let before = app.state.cache.stats().await.invalidations;
        let (status, _, _) = app.admin(method, uri, body).await;
        assert!(status.is_success(), "{method} {uri}");

        let after = app.state.cache.stats().await.invalidations;
        assert_eq!(after, before + 1, "{method} {uri}");
    }
}

#[tokio::test]
async fn test_rejected_mutations_do_not_invalidate() {
    let app = TestApp::seeded().await;

    let rejected = [
        (
            "POST",
            "/api/authors",
            r#"{"firstName":"","lastName":"B"}"#,
            StatusCode::BAD_REQUEST,
        ),
        ("POST", "/api/books", "{oops", StatusCode::BAD_REQUEST),
        ("PUT", "/api/books/999", r#"{"title":"x"}"#, StatusCode::NOT_FOUND),
        ("DELETE", "/api/authors/999", "", StatusCode::NOT_FOUND),
    ];
    for (method, uri, body, expected) in rejected {
        let (status, _, _) = app.admin(method, uri, body).await;
        assert_eq!(status, expected, "{method} {uri}");
    }

    let (status, _, _) = app
        .call(
            Request::builder()
                .method("DELETE")
                .uri("/api/books/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    assert_eq!(app.state.cache.stats().await.invalidations, 0);
}

// == Detail Endpoint Tests ==

#[tokio::test]
async fn test_detail_reads_are_idempotent() {
    let app = TestApp::seeded().await;

    for uri in ["/api/books/4", "/api/authors/4", "/api/books/4?version=2.0"] {
        let (first_status, _, first) = app
            .call(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await;
        let (second_status, _, second) = app
            .call(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await;

        assert_eq!(first_status, StatusCode::OK);
        assert_eq!(second_status, StatusCode::OK);
        assert_eq!(first, second, "{uri}");
    }
}

#[tokio::test]
async fn test_detail_not_found() {
    let app = TestApp::seeded().await;

    let (status, body) = app.get("/api/books/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("999"));

    let (status, _) = app.get("/api/authors/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_book_comment_only_in_v2() {
    let app = TestApp::seeded().await;

    let (_, v1) = app.get("/api/books/1").await;
    assert!(v1.get("comment").is_none());

    let (_, v2_query) = app.get("/api/books/1?version=2.0").await;
    assert_eq!(v2_query["comment"], "Reader comment on book 0");

    let (_, _, body) = app
        .call(
            Request::builder()
                .uri("/api/books/1")
                .header(header::ACCEPT, "application/json; version=2.0")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(to_json(&body)["comment"], "Reader comment on book 0");

    let (_, list) = app.get("/api/books?version=2.0").await;
    assert!(list[0].get("comment").is_none());
}

// == Create Endpoint Tests ==

#[tokio::test]
async fn test_create_author() {
    let app = TestApp::seeded().await;

    let (status, headers, body) = app
        .admin(
            "POST",
            "/api/authors",
            r#"{"firstName":"Ursula","lastName":"Le Guin"}"#,
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(headers[header::LOCATION], "/api/authors/11");
    let author = to_json(&body);
    assert_eq!(author["id"], 11);
    assert_eq!(author["firstName"], "Ursula");
    assert_eq!(author["books"], Value::Array(vec![]));

    let (status, fetched) = app.get("/api/authors/11").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["lastName"], "Le Guin");
}

#[tokio::test]
async fn test_create_book_links_author() {
    let app = TestApp::seeded().await;

    let (status, headers, body) = app
        .admin(
            "POST",
            "/api/books",
            r#"{"title":"Dune","coverText":"Spice","idAuthor":2}"#,
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(headers[header::LOCATION], "/api/books/21");
    let book = to_json(&body);
    assert_eq!(book["author"]["id"], 2);

    let (_, author) = app.get("/api/authors/2").await;
    assert!(ids(&author["books"]).contains(&21));
}

#[tokio::test]
async fn test_create_book_with_unknown_author_is_unlinked() {
    let app = TestApp::seeded().await;

    let (status, _, body) = app
        .admin("POST", "/api/books", r#"{"title":"Orphan","idAuthor":-1}"#)
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(to_json(&body)["author"], Value::Null);
}

#[tokio::test]
async fn test_create_book_accepts_comment() {
    let app = TestApp::empty();

    let (status, headers, _) = app
        .admin(
            "POST",
            "/api/books",
            r#"{"title":"Notes","coverText":"","comment":"worth it"}"#,
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let location = headers[header::LOCATION].to_str().unwrap();
    let (_, book) = app.get(&format!("{location}?version=2")).await;
    assert_eq!(book["comment"], "worth it");
}

// == Validation Tests ==

#[tokio::test]
async fn test_create_author_blank_first_name() {
    let app = TestApp::seeded().await;

    let (status, _, body) = app
        .admin("POST", "/api/authors", r#"{"firstName":"","lastName":"X"}"#)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json = to_json(&body);
    assert_eq!(json["error"], "Validation failed");
    assert_eq!(json["violations"][0]["field"], "firstName");
    assert_eq!(
        json["violations"][0]["message"],
        "This value should not be blank."
    );
    assert_eq!(app.store.counts().await, (10, 20));
}

#[tokio::test]
async fn test_create_author_name_too_long() {
    let app = TestApp::seeded().await;
    let body = format!(r#"{{"firstName":"A","lastName":"{}"}}"#, "x".repeat(256));

    let (status, _, response) = app.admin("POST", "/api/authors", &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json = to_json(&response);
    assert_eq!(json["violations"][0]["field"], "lastName");
    assert!(json["violations"][0]["message"]
        .as_str()
        .unwrap()
        .contains("255"));
}

#[tokio::test]
async fn test_missing_required_fields_report_violations() {
    let app = TestApp::empty();

    let (status, _, body) = app.admin("POST", "/api/authors", "{}").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json = to_json(&body);
    let fields: Vec<&str> = json["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["firstName", "lastName"]);
}

#[tokio::test]
async fn test_malformed_body() {
    let app = TestApp::seeded().await;

    let (status, _, body) = app.admin("POST", "/api/books", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(to_json(&body)["error"].is_string());

    let (status, _, _) = app.admin("PUT", "/api/books/1", "[1, 2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.counts().await, (10, 20));
}

// == Update Endpoint Tests ==

#[tokio::test]
async fn test_update_is_partial() {
    let app = TestApp::seeded().await;

    let (status, _, body) = app
        .admin("PUT", "/api/authors/3", r#"{"lastName":"Changed"}"#)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (_, author) = app.get("/api/authors/3").await;
    assert_eq!(author["firstName"], "First name 2");
    assert_eq!(author["lastName"], "Changed");
}

#[tokio::test]
async fn test_update_book_relinks_author() {
    let app = TestApp::seeded().await;

    app.admin("PUT", "/api/books/1", r#"{"idAuthor":5}"#).await;
    let (_, book) = app.get("/api/books/1").await;
    assert_eq!(book["author"]["id"], 5);
    assert_eq!(book["title"], "Book title 0");

    app.admin("PUT", "/api/books/1", r#"{"coverText":"new"}"#)
        .await;
    let (_, book) = app.get("/api/books/1").await;
    assert_eq!(book["author"]["id"], 5);

    app.admin("PUT", "/api/books/1", r#"{"idAuthor":-1}"#).await;
    let (_, book) = app.get("/api/books/1").await;
    assert_eq!(book["author"], Value::Null);
}

#[tokio::test]
async fn test_update_unknown_id() {
    let app = TestApp::seeded().await;

    let (status, _, _) = app
        .admin("PUT", "/api/authors/999", r#"{"firstName":"x"}"#)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == Delete Endpoint Tests ==

#[tokio::test]
async fn test_delete_author_cascades_to_books() {
    let app = TestApp::seeded().await;

    let (status, _, _) = app.admin("DELETE", "/api/authors/1", "").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    assert_eq!(app.get("/api/authors/1").await.0, StatusCode::NOT_FOUND);
    assert_eq!(app.get("/api/books/1").await.0, StatusCode::NOT_FOUND);
    assert_eq!(app.get("/api/books/11").await.0, StatusCode::NOT_FOUND);
    assert_eq!(app.store.counts().await, (9, 18));
}

#[tokio::test]
async fn test_delete_book_keeps_author() {
    let app = TestApp::seeded().await;

    let (status, _, _) = app.admin("DELETE", "/api/books/1", "").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, author) = app.get("/api/authors/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&author["books"]), vec![11]);
}

#[tokio::test]
async fn test_delete_unknown_id() {
    let app = TestApp::seeded().await;

    let (status, _, _) = app.admin("DELETE", "/api/books/999", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == Authorization Tests ==

#[tokio::test]
async fn test_mutations_require_admin() {
    let app = TestApp::seeded().await;
    app.get("/api/books").await;

    for (method, uri) in [
        ("POST", "/api/authors"),
        ("POST", "/api/books"),
        ("PUT", "/api/authors/1"),
        ("PUT", "/api/books/1"),
        ("DELETE", "/api/authors/1"),
        ("DELETE", "/api/books/1"),
    ] {
        let (status, _, _) = app
            .call(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header(header::AUTHORIZATION, "Bearer wrong")
                    .body(Body::from(r#"{"title":"x","firstName":"x","lastName":"x"}"#))
                    .unwrap(),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{method} {uri}");
    }

    assert_eq!(app.store.counts().await, (10, 20));
    assert!(app.state.cache.contains_key("bookList-1-3").await);
}

#[tokio::test]
async fn test_authorization_precedes_decoding_and_lookup() {
    let app = TestApp::seeded().await;

    let (status, _, _) = app
        .call(
            Request::builder()
                .method("PUT")
                .uri("/api/books/999")
                .body(Body::from("{garbage"))
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = TestApp::empty();

    let (status, json) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}
