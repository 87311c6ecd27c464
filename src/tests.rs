//! Integration tests for the IdeaNest backend.

use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};

use crate::classifier;
use crate::config::Config;
use crate::{create_router, AppState};

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
}

impl TestFixture {
    async fn new() -> Self {
        Self::with_psk(Some("test-api-key".to_string())).await
    }

    async fn with_psk(psk: Option<String>) -> Self {
        let config = Config {
            api_psk: psk.clone(),
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
            log_json: false,
            assist_delay: Duration::from_millis(20),
            draft_ttl: Duration::from_secs(3600),
            seed: true,
        };

        let app = create_router(AppState::new(config));

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        let mut client_builder = Client::builder();
        if let Some(key) = psk {
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert("x-api-key", key.parse().unwrap());
            client_builder = client_builder.default_headers(headers);
        }

        TestFixture {
            client: client_builder.build().unwrap(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> (u16, Value) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        (resp.status().as_u16(), resp.json().await.unwrap())
    }

    async fn post(&self, path: &str, body: Value) -> (u16, Value) {
        let resp = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap();
        (resp.status().as_u16(), resp.json().await.unwrap())
    }
}

fn titles(list: &Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|i| i["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_auth_missing_psk() {
    let fixture = TestFixture::new().await;

    // Request without API key
    let resp = Client::new()
        .get(fixture.url("/api/snapshot"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_auth_disabled_without_psk() {
    let fixture = TestFixture::with_psk(None).await;

    let (status, body) = fixture.get("/api/categories").await;

    assert_eq!(status, 200);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_snapshot_get() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get("/api/snapshot").await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["ideas"].as_array().unwrap().len(), 5);
    assert_eq!(body["data"]["categories"][0]["name"], "Work");
    assert_eq!(body["data"]["categories"][0]["color"], "purple");
    assert_eq!(body["data"]["revisionId"], 0);
    assert_eq!(body["data"]["searchTerm"], "");

    let (status, body) = fixture.get("/api/snapshot/revision").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["revisionId"], 0);
}

#[tokio::test]
async fn test_idea_crud() {
    let fixture = TestFixture::new().await;

    // Create idea
    let (status, create_body) = fixture
        .post(
            "/api/ideas",
            json!({
                "title": "Podcast on urban gardening",
                "content": "Interview community garden organisers",
                "categoryIds": ["4"]
            }),
        )
        .await;

    assert_eq!(status, 200);
    assert_eq!(create_body["success"], true);
    let idea_id = create_body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(create_body["data"]["isPinned"], false);
    assert_eq!(
        create_body["data"]["createdAt"],
        create_body["data"]["updatedAt"]
    );
    let revision_after_create = create_body["revisionId"].as_i64().unwrap();
    assert_eq!(revision_after_create, 1);

    // Newest first
    let (_, snapshot) = fixture.get("/api/snapshot").await;
    assert_eq!(snapshot["data"]["ideas"][0]["id"], idea_id.as_str());

    // Update idea
    let update_resp = fixture
        .client
        .put(fixture.url(&format!("/api/ideas/{}", idea_id)))
        .json(&json!({
            "title": "Podcast on rooftop gardening",
            "content": "Interview rooftop farmers",
            "isPinned": false,
            "categoryIds": ["4", "3"]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(update_resp.status(), 200);
    let update_body: Value = update_resp.json().await.unwrap();
    assert_eq!(update_body["data"]["title"], "Podcast on rooftop gardening");
    assert_eq!(update_body["data"]["createdAt"], create_body["data"]["createdAt"]);
    let revision_after_update = update_body["revisionId"].as_i64().unwrap();
    assert!(revision_after_update > revision_after_create);

    // Get idea
    let (status, get_body) = fixture.get(&format!("/api/ideas/{}", idea_id)).await;
    assert_eq!(status, 200);
    assert_eq!(get_body["data"]["categoryIds"], json!(["4", "3"]));

    // Delete idea
    let delete_resp = fixture
        .client
        .delete(fixture.url(&format!("/api/ideas/{}", idea_id)))
        .send()
        .await
        .unwrap();

    assert_eq!(delete_resp.status(), 200);
    let delete_body: Value = delete_resp.json().await.unwrap();
    assert!(delete_body["revisionId"].as_i64().unwrap() > revision_after_update);

    // Verify deleted
    let (status, body) = fixture.get(&format!("/api/ideas/{}", idea_id)).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_create_idea_requires_title() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post("/api/ideas", json!({ "title": "   ", "content": "body" }))
        .await;

    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (_, snapshot) = fixture.get("/api/snapshot").await;
    assert_eq!(snapshot["data"]["ideas"].as_array().unwrap().len(), 5);
    assert_eq!(snapshot["data"]["revisionId"], 0);
}

#[tokio::test]
async fn test_missing_title_field_is_validation_error() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post("/api/ideas", json!({ "content": "no title field" }))
        .await;

    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["revisionId"], 0);

    let (status, body) = fixture
        .post("/api/categories", json!({ "color": "red" }))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_wrong_shape_body_is_validation_error() {
    let fixture = TestFixture::new().await;

    // Missing required colour
    let (status, body) = fixture
        .post("/api/categories", json!({ "name": "Travel" }))
        .await;

    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (_, listed) = fixture.get("/api/categories").await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/ideas"))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{\"title\": ")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert_eq!(body["revisionId"], 0);
}

#[tokio::test]
async fn test_toggle_pin() {
    let fixture = TestFixture::new().await;

    let (status, first) = fixture.post("/api/ideas/2/pin", json!({})).await;
    assert_eq!(status, 200);
    assert_eq!(first["data"]["isPinned"], true);

    let (_, second) = fixture.post("/api/ideas/2/pin", json!({})).await;
    assert_eq!(second["data"]["isPinned"], false);
    assert!(second["revisionId"].as_i64().unwrap() > first["revisionId"].as_i64().unwrap());

    let (status, missing) = fixture.post("/api/ideas/nope/pin", json!({})).await;
    assert_eq!(status, 404);
    assert_eq!(missing["revisionId"], second["revisionId"]);
}

#[tokio::test]
async fn test_list_ideas_partitions_pinned() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get("/api/ideas").await;

    assert_eq!(status, 200);
    assert_eq!(
        titles(&body["data"]["pinned"]),
        vec!["New Marketing Strategy", "Birthday Gift for Mom"]
    );
    assert_eq!(body["data"]["unpinned"].as_array().unwrap().len(), 3);
    assert_eq!(body["data"]["total"], 5);
    assert_eq!(body["data"]["filterLabel"], "All Ideas");
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let fixture = TestFixture::new().await;

    let (_, body) = fixture.get("/api/ideas?q=marketing").await;

    assert_eq!(body["data"]["total"], 1);
    assert_eq!(
        titles(&body["data"]["pinned"]),
        vec!["New Marketing Strategy"]
    );
    assert_eq!(body["data"]["filterLabel"], "Search: marketing");
}

#[tokio::test]
async fn test_stored_filter() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .put(fixture.url("/api/filter"))
        .json(&json!({ "categoryId": "3", "searchTerm": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["filterLabel"], "Category: Project");

    // Stored filter applies to later listings
    let (_, listed) = fixture.get("/api/ideas").await;
    assert_eq!(listed["data"]["total"], 2);

    // Query parameters override it
    let (_, overridden) = fixture.get("/api/ideas?category=").await;
    assert_eq!(overridden["data"]["total"], 5);
}

#[tokio::test]
async fn test_recent_ideas() {
    let fixture = TestFixture::new().await;

    let (_, body) = fixture.get("/api/ideas/recent?limit=2").await;

    assert_eq!(
        titles(&body["data"]),
        vec!["New Marketing Strategy", "Learn TypeScript"]
    );
}

#[tokio::test]
async fn test_category_create() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post("/api/categories", json!({ "name": "Travel", "color": "orange" }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["name"], "Travel");

    let (status, body) = fixture
        .post("/api/categories", json!({ "name": "", "color": "orange" }))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (_, listed) = fixture.get("/api/categories").await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_classify_endpoints() {
    let fixture = TestFixture::new().await;

    let (_, body) = fixture
        .post("/api/classify/content", json!({ "title": "New App Idea" }))
        .await;
    assert_eq!(body["data"]["content"], classifier::APPLICATION_PARAGRAPH);

    let (_, body) = fixture
        .post(
            "/api/classify/categories",
            json!({ "title": "Team meeting with client", "content": "" }),
        )
        .await;
    assert_eq!(body["data"]["categoryIds"], json!(["1"]));

    let (_, body) = fixture
        .post(
            "/api/classify/categories",
            json!({ "title": "Learn TypeScript with a course" }),
        )
        .await;
    assert_eq!(body["data"]["categoryIds"], json!(["5"]));
}

#[tokio::test]
async fn test_draft_assist_and_commit() {
    let fixture = TestFixture::new().await;

    let (status, draft) = fixture
        .post("/api/drafts", json!({ "title": "Design a mobile app" }))
        .await;
    assert_eq!(status, 200);
    let draft_id = draft["data"]["id"].as_str().unwrap().to_string();

    let (status, ticket) = fixture
        .post(&format!("/api/drafts/{}/assist", draft_id), json!({}))
        .await;
    assert_eq!(status, 200);
    assert_eq!(ticket["data"]["kind"], "assist");
    assert_eq!(ticket["data"]["delayMs"], 20);

    tokio::time::sleep(Duration::from_millis(200)).await;

    let (_, landed) = fixture.get(&format!("/api/drafts/{}", draft_id)).await;
    assert_eq!(landed["data"]["content"], classifier::APPLICATION_PARAGRAPH);
    assert_eq!(landed["data"]["categoryIds"], json!(["3"]));

    let (status, committed) = fixture
        .post(&format!("/api/drafts/{}/commit", draft_id), json!({}))
        .await;
    assert_eq!(status, 200);
    assert_eq!(committed["data"]["idea"]["title"], "Design a mobile app");
    assert_eq!(committed["revisionId"], 1);

    let (status, _) = fixture.get(&format!("/api/drafts/{}", draft_id)).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_draft_validation() {
    let fixture = TestFixture::new().await;

    let (_, draft) = fixture.post("/api/drafts", json!({})).await;
    let draft_id = draft["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = fixture
        .post(&format!("/api/drafts/{}/assist", draft_id), json!({}))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["message"], "Please enter a title first");

    let (status, body) = fixture
        .post(&format!("/api/drafts/{}/autotag", draft_id), json!({}))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, _) = fixture
        .post(&format!("/api/drafts/{}/commit", draft_id), json!({}))
        .await;
    assert_eq!(status, 400);

    let (_, snapshot) = fixture.get("/api/snapshot").await;
    assert_eq!(snapshot["data"]["ideas"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_stale_assist_is_discarded() {
    let fixture = TestFixture::new().await;

    let (_, draft) = fixture
        .post("/api/drafts", json!({ "title": "Blog post ideas" }))
        .await;
    let draft_id = draft["data"]["id"].as_str().unwrap().to_string();

    fixture
        .post(&format!("/api/drafts/{}/assist", draft_id), json!({}))
        .await;

    // Edit before the deferred result lands
    let resp = fixture
        .client
        .patch(fixture.url(&format!("/api/drafts/{}", draft_id)))
        .json(&json!({ "content": "my own words" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    tokio::time::sleep(Duration::from_millis(200)).await;

    let (_, landed) = fixture.get(&format!("/api/drafts/{}", draft_id)).await;
    assert_eq!(landed["data"]["content"], "my own words");
}

#[tokio::test]
async fn test_dictation() {
    let fixture = TestFixture::new().await;

    let (_, draft) = fixture
        .post("/api/drafts", json!({ "title": "Shopping", "content": "buy" }))
        .await;
    let draft_id = draft["data"]["id"].as_str().unwrap().to_string();
    let transcript_path = format!("/api/drafts/{}/transcript", draft_id);

    let (status, _) = fixture
        .post(&transcript_path, json!({ "transcript": "apples" }))
        .await;
    assert_eq!(status, 400);

    let (_, toggled) = fixture
        .post(&format!("/api/drafts/{}/dictation", draft_id), json!({}))
        .await;
    assert_eq!(toggled["data"]["dictating"], true);

    fixture
        .post(&transcript_path, json!({ "transcript": "apples" }))
        .await;
    let (_, body) = fixture
        .post(&transcript_path, json!({ "transcript": "and pears" }))
        .await;
    assert_eq!(body["data"]["content"], "buy apples and pears");
}

#[tokio::test]
async fn test_draft_category_toggle() {
    let fixture = TestFixture::new().await;

    let (_, draft) = fixture.post("/api/drafts", json!({ "title": "x" })).await;
    let draft_id = draft["data"]["id"].as_str().unwrap().to_string();
    let path = format!("/api/drafts/{}/categories/2", draft_id);

    let (_, on) = fixture.post(&path, json!({})).await;
    assert_eq!(on["data"]["categoryIds"], json!(["2"]));

    let (_, off) = fixture.post(&path, json!({})).await;
    assert_eq!(off["data"]["categoryIds"], json!([]));
}

#[tokio::test]
async fn test_export_filtered_view() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/export?category=1"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let disposition = resp
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"ideanest-ideas-"));
    assert!(disposition.ends_with(".md\""));

    let body = resp.text().await.unwrap();
    assert!(body.contains("Filter: Category: Work"));
    assert!(body.contains("| New Marketing Strategy |"));
    assert!(body.contains("| Website Redesign Concepts |"));
    assert!(!body.contains("Learn TypeScript"));
}

#[tokio::test]
async fn test_export_single_idea() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/ideas/4/export"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Filter: Single Idea: Birthday Gift for Mom"));
    assert!(body.contains("| Personal |"));

    let resp = fixture
        .client
        .get(fixture.url("/api/ideas/missing/export"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}
