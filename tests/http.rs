//! 실제 서버를 임의 포트에 띄우고 reqwest로 API를 호출하는 테스트

mod common;

use common::test_pool;
use geulbang::{middleware::auth::hash_password, routes::AppState};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const PASSWORD: &str = "let-me-in";
const UPLOADER: &str = "test-uploader/1.0";

struct TestServer {
    base: String,
    client: Client,
}

impl TestServer {
    async fn start() -> Self {
        let state = AppState {
            pool: test_pool().await,
            jwt_secret: "test-secret".to_string(),
            admin_password_hash: hash_password(PASSWORD).unwrap(),
            upload_client_id: UPLOADER.to_string(),
        };
        let app = geulbang::app(state, None);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base: format!("http://{}/api/v1", addr),
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn login(&self) -> String {
        let res = self
            .client
            .post(self.url("/auth/login"))
            .json(&json!({ "password": PASSWORD }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = res.json().await.unwrap();
        body["access_token"].as_str().unwrap().to_string()
    }

    async fn create(&self, token: &str, body: Value) -> reqwest::Response {
        self.client
            .post(self.url("/entries"))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    async fn get_json(&self, path: &str) -> (StatusCode, Value) {
        let res = self.client.get(self.url(path)).send().await.unwrap();
        let status = res.status();
        let body = res.json().await.unwrap_or(Value::Null);
        (status, body)
    }
}

fn entry_titles(page: &Value) -> Vec<String> {
    page["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn health_reports_ok() {
    let server = TestServer::start().await;

    let (status, body) = server.get_json("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let server = TestServer::start().await;

    let res = server
        .client
        .post(server.url("/auth/login"))
        .json(&json!({ "password": "nope" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn writing_requires_a_token() {
    let server = TestServer::start().await;

    let res = server
        .client
        .post(server.url("/entries"))
        .json(&json!({ "title": "Sneaky", "content": "body", "published": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = server.create("garbage", json!({ "title": "Sneaky", "content": "body" })).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let (_, page) = server.get_json("/entries").await;
    assert!(page["entries"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_then_read_back_with_tags() {
    let server = TestServer::start().await;
    let token = server.login().await;

    let res = server
        .create(
            &token,
            json!({
                "title": "Hello World!",
                "content": "Some *text*.",
                "published": true,
                "tags": ["Rust Lang", "  "]
            }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await.unwrap();
    assert_eq!(created["slug"], "hello-world");
    assert_eq!(created["summary"], "Some text");
    assert_eq!(created["tags"], json!(["rust-lang"]));

    let (status, detail) = server.get_json("/entries/hello-world").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["title"], "Hello World!");
    assert_eq!(detail["tags"], json!(["rust-lang"]));

    let (_, tags) = server.get_json("/entries/hello-world/tags").await;
    assert_eq!(tags["tags"], json!(["rust-lang"]));

    let (_, by_tag) = server.get_json("/tags/Rust%20Lang").await;
    assert_eq!(entry_titles(&by_tag), vec!["Hello World!"]);

    let (_, all_tags) = server.get_json("/tags").await;
    assert_eq!(all_tags["tags"], json!(["rust-lang"]));
}

#[tokio::test]
async fn missing_fields_and_duplicates_are_client_errors() {
    let server = TestServer::start().await;
    let token = server.login().await;

    let res = server.create(&token, json!({ "title": "No Body" })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"]["code"], "validation_error");

    let first = server
        .create(&token, json!({ "title": "Twice", "content": "one", "published": true }))
        .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = server
        .create(&token, json!({ "title": "twice!", "content": "two", "published": true }))
        .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn drafts_are_hidden_from_anonymous_readers() {
    let server = TestServer::start().await;
    let token = server.login().await;

    let res = server
        .create(
            &token,
            json!({ "title": "Draft One", "content": "half written", "tags": ["wip"] }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let (status, _) = server.get_json("/entries/draft-one").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, by_tag) = server.get_json("/tags/wip").await;
    assert!(by_tag["entries"].as_array().unwrap().is_empty());

    let (_, search) = server.get_json("/search?q=half").await;
    assert!(search["entries"].as_array().unwrap().is_empty());

    let res = server
        .client
        .get(server.url("/entries/draft-one"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = server
        .client
        .get(server.url("/drafts"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let drafts: Value = res.json().await.unwrap();
    assert_eq!(entry_titles(&drafts), vec!["Draft One"]);

    let (status, _) = server.get_json("/drafts").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn search_and_query_listing_agree() {
    let server = TestServer::start().await;
    let token = server.login().await;

    for (title, content) in [("Async Rust", "tokio runtime"), ("Sync Rust", "threads")] {
        let res = server
            .create(&token, json!({ "title": title, "content": content, "published": true }))
            .await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let (_, search) = server.get_json("/search?q=tokio").await;
    assert_eq!(entry_titles(&search), vec!["Async Rust"]);
    assert_eq!(search["page"], 1);
    assert_eq!(search["has_next"], false);

    let (_, listing) = server.get_json("/entries?q=tokio").await;
    assert_eq!(entry_titles(&listing), vec!["Async Rust"]);

    let (_, blank) = server.get_json("/search?q=%20%20").await;
    assert!(blank["entries"].as_array().unwrap().is_empty());

    let (_, blank_listing) = server.get_json("/entries?q=%20%20").await;
    assert!(blank_listing["entries"].as_array().unwrap().is_empty());

    let (_, empty_q) = server.get_json("/entries?q=").await;
    assert_eq!(entry_titles(&empty_q), vec!["Sync Rust", "Async Rust"]);

    let (_, everything) = server.get_json("/entries").await;
    assert_eq!(entry_titles(&everything), vec!["Sync Rust", "Async Rust"]);
}

#[tokio::test]
async fn edit_and_delete_by_slug() {
    let server = TestServer::start().await;
    let token = server.login().await;

    server
        .create(&token, json!({ "title": "Editable", "content": "before", "published": true }))
        .await;

    let res = server
        .client
        .put(server.url("/entries/editable"))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Edited Title",
            "content": "after",
            "published": true,
            "tags": ["news"]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let edited: Value = res.json().await.unwrap();
    assert_eq!(edited["slug"], "editable");
    assert_eq!(edited["title"], "Edited Title");
    assert_eq!(edited["tags"], json!(["news"]));

    let res = server
        .client
        .delete(server.url("/entries/editable"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let (status, _) = server.get_json("/entries/editable").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, search) = server.get_json("/search?q=after").await;
    assert!(search["entries"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn attaching_tags_reports_what_was_new() {
    let server = TestServer::start().await;
    let token = server.login().await;
    server
        .create(&token, json!({ "title": "Tag Me", "content": "body", "published": true }))
        .await;

    let attach = || {
        server
            .client
            .post(server.url("/entries/tag-me/tags"))
            .bearer_auth(&token)
            .json(&json!({ "tags": ["a", "b"] }))
            .send()
    };

    let first: Value = attach().await.unwrap().json().await.unwrap();
    assert_eq!(first, json!({ "new_tags": 2, "new_links": 2 }));

    let second: Value = attach().await.unwrap().json().await.unwrap();
    assert_eq!(second, json!({ "new_tags": 0, "new_links": 0 }));

    let (_, tags) = server.get_json("/entries/tag-me/tags").await;
    assert_eq!(tags["tags"], json!(["a", "b"]));
}

#[tokio::test]
async fn upload_requires_token_client_and_all_fields() {
    let server = TestServer::start().await;
    let token = server.login().await;
    let body = json!({ "title": "Uploaded", "content": "from disk", "published": true });

    let res = server
        .client
        .post(server.url("/upload"))
        .header("User-Agent", UPLOADER)
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = server
        .client
        .post(server.url("/upload"))
        .bearer_auth(&token)
        .header("User-Agent", "curl/8.0")
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = server
        .client
        .post(server.url("/upload"))
        .bearer_auth(&token)
        .header("User-Agent", UPLOADER)
        .json(&json!({ "title": "Uploaded", "content": "from disk" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let (_, listing) = server.get_json("/entries").await;
    assert!(listing["entries"].as_array().unwrap().is_empty());

    let res = server
        .client
        .post(server.url("/upload"))
        .bearer_auth(&token)
        .header("User-Agent", UPLOADER)
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let (status, detail) = server.get_json("/entries/uploaded").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["content"], "from disk");
}
