//! Integration tests for the course catalog API.

use std::path::PathBuf;
use std::sync::Arc;

use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::config::{Config, StorageKind};
use crate::db::{CourseRepository, IdStrategy, JsonFileStorage};
use crate::{create_router, AppState};

const SHELL_HTML: &str = "<!doctype html><title>Course Designer</title>";

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    data_file: PathBuf,
    temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        Self::with_temp_dir(TempDir::new().expect("Failed to create temp dir")).await
    }

    /// Start a server over `temp_dir`, loading whatever data file it already holds.
    async fn with_temp_dir(temp_dir: TempDir) -> Self {
        let data_file = temp_dir.path().join("data").join("courses.json");
        let public_dir = temp_dir.path().join("public");
        std::fs::create_dir_all(&public_dir).unwrap();
        std::fs::write(public_dir.join("index.html"), SHELL_HTML).unwrap();

        let storage = Arc::new(
            JsonFileStorage::open(&data_file)
                .await
                .expect("Failed to open storage"),
        );
        let repo = Arc::new(
            CourseRepository::open(storage, IdStrategy::Sequential)
                .await
                .expect("Failed to load courses"),
        );

        let config = Config {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            storage: StorageKind::File,
            data_file: data_file.clone(),
            db_path: temp_dir.path().join("client.sqlite"),
            public_dir,
            log_level: "warn".to_string(),
        };

        let state = AppState {
            repo,
            config: Arc::new(config),
        };

        let app = create_router(state);

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

        TestFixture {
            client: Client::new(),
            base_url,
            data_file,
            temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn stored_courses(&self) -> Vec<Value> {
        let raw = std::fs::read_to_string(&self.data_file).expect("Data file missing");
        serde_json::from_str(&raw).expect("Data file is not JSON")
    }

    async fn create(&self, body: Value) -> Value {
        let resp = self
            .client
            .post(self.url("/api/courses"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
        resp.json().await.unwrap()
    }
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;
    fixture.create(json!({ "title": "One" })).await;

    let resp = fixture
        .client
        .get(fixture.url("/api/health"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["coursesCount"], 1);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_course_crud() {
    let fixture = TestFixture::new().await;

    // Create course
    let created = fixture
        .create(json!({
            "title": "Rust for Pythonistas",
            "instructor": "Ferris",
            "level": "Intermediate",
            "duration": "12 hours",
            "objectives": ["Ownership", "Traits"]
        }))
        .await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(id, 1);
    assert_eq!(created["createdAt"], created["updatedAt"]);
    assert_eq!(created["modules"], json!([]));

    // Get course
    let get_resp = fixture
        .client
        .get(fixture.url(&format!("/api/courses/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(get_resp.status(), 200);
    let fetched: Value = get_resp.json().await.unwrap();
    assert_eq!(fetched["title"], "Rust for Pythonistas");

    // Update course
    let update_resp = fixture
        .client
        .put(fixture.url(&format!("/api/courses/{}", id)))
        .json(&json!({
            "title": "Rust for Everyone",
            "id": 999,
            "createdAt": "2001-01-01T00:00:00Z"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(update_resp.status(), 200);
    let updated: Value = update_resp.json().await.unwrap();
    assert_eq!(updated["id"], id);
    assert_eq!(updated["title"], "Rust for Everyone");
    assert_eq!(updated["instructor"], "Ferris");
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_ne!(updated["updatedAt"], created["updatedAt"]);

    // List courses
    let list_resp = fixture
        .client
        .get(fixture.url("/api/courses"))
        .send()
        .await
        .unwrap();
    assert_eq!(list_resp.status(), 200);
    let list: Value = list_resp.json().await.unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);

    // Delete course
    let delete_resp = fixture
        .client
        .delete(fixture.url(&format!("/api/courses/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(delete_resp.status(), 204);
    assert!(delete_resp.text().await.unwrap().is_empty());

    // Verify deleted
    let get_deleted_resp = fixture
        .client
        .get(fixture.url(&format!("/api/courses/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(get_deleted_resp.status(), 404);
    let body: Value = get_deleted_resp.json().await.unwrap();
    assert_eq!(body["error"], "Course not found");

    assert!(fixture.stored_courses().is_empty());
}

#[tokio::test]
async fn test_create_applies_defaults() {
    let fixture = TestFixture::new().await;

    let created = fixture.create(json!({})).await;

    assert_eq!(created["title"], "Untitled Course");
    assert_eq!(created["level"], "Beginner");
    assert_eq!(created["instructor"], "");
    assert_eq!(created["objectives"], json!([]));
}

#[tokio::test]
async fn test_missing_and_malformed_ids_are_404() {
    let fixture = TestFixture::new().await;

    for path in ["/api/courses/42", "/api/courses/not-a-number"] {
        let resp = fixture.client.get(fixture.url(path)).send().await.unwrap();
        assert_eq!(resp.status(), 404, "GET {}", path);
    }

    let put = fixture
        .client
        .put(fixture.url("/api/courses/42"))
        .json(&json!({ "title": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(put.status(), 404);

    let delete = fixture
        .client
        .delete(fixture.url("/api/courses/42"))
        .send()
        .await
        .unwrap();
    assert_eq!(delete.status(), 404);

    let module = fixture
        .client
        .post(fixture.url("/api/courses/42/modules"))
        .json(&json!({ "title": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(module.status(), 404);

    let export = fixture
        .client
        .get(fixture.url("/api/courses/42/export"))
        .send()
        .await
        .unwrap();
    assert_eq!(export.status(), 404);
    let body: Value = export.json().await.unwrap();
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_add_module() {
    let fixture = TestFixture::new().await;
    let course = fixture.create(json!({ "title": "Intro to Go" })).await;
    let id = course["id"].as_i64().unwrap();

    let resp = fixture
        .client
        .post(fixture.url(&format!("/api/courses/{}/modules", id)))
        .json(&json!({ "title": "Syntax" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 201);
    let module: Value = resp.json().await.unwrap();
    assert_eq!(module["title"], "Syntax");
    assert_eq!(module["description"], "");
    assert_eq!(module["lessons"], json!([]));
    assert_eq!(module["duration"], "");
    assert!(module["id"].as_i64().unwrap() > 0);

    let stored = &fixture.stored_courses()[0];
    assert_eq!(stored["modules"].as_array().unwrap().len(), 1);
    assert_ne!(stored["updatedAt"], course["updatedAt"]);
}

#[tokio::test]
async fn test_export_one_is_attachment() {
    let fixture = TestFixture::new().await;
    let course = fixture.create(json!({ "title": "Data  Science 101" })).await;
    let id = course["id"].as_i64().unwrap();

    let resp = fixture
        .client
        .get(fixture.url(&format!("/api/courses/{}/export", id)))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    assert_eq!(
        resp.headers()["content-disposition"].to_str().unwrap(),
        format!("attachment; filename=\"course-data-science-101-{}.json\"", id)
    );
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, course);
}

#[tokio::test]
async fn test_export_all_then_import_roundtrip() {
    let source = TestFixture::new().await;
    source
        .create(json!({ "title": "Python Basics", "level": "Beginner", "objectives": ["Loops"] }))
        .await;
    source
        .create(json!({ "title": "Python Web", "level": "Intermediate" }))
        .await;

    let export_resp = source
        .client
        .get(source.url("/api/courses/export/all"))
        .send()
        .await
        .unwrap();
    assert_eq!(export_resp.status(), 200);
    let disposition = export_resp.headers()["content-disposition"]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"all-courses-"));
    let exported: Value = export_resp.json().await.unwrap();

    let target = TestFixture::new().await;
    target.create(json!({ "title": "Already here" })).await;

    let import_resp = target
        .client
        .post(target.url("/api/courses/import"))
        .json(&exported)
        .send()
        .await
        .unwrap();
    assert_eq!(import_resp.status(), 201);
    let body: Value = import_resp.json().await.unwrap();
    assert_eq!(body["message"], "Successfully imported 2 courses");

    let imported = body["courses"].as_array().unwrap();
    let ids: Vec<i64> = imported.iter().map(|c| c["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![2, 3]);
    assert_eq!(imported[0]["title"], "Python Basics");
    assert_eq!(imported[0]["objectives"], json!(["Loops"]));
    assert_eq!(imported[0]["createdAt"], exported[0]["createdAt"]);

    assert_eq!(target.stored_courses().len(), 3);
}

#[tokio::test]
async fn test_import_rejects_non_array() {
    let fixture = TestFixture::new().await;
    fixture.create(json!({ "title": "Keep me" })).await;

    let resp = fixture
        .client
        .post(fixture.url("/api/courses/import"))
        .json(&json!({ "title": "not a list" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Invalid import data");
    assert_eq!(fixture.stored_courses().len(), 1);
}

#[tokio::test]
async fn test_malformed_json_body_is_400() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/courses"))
        .header("content-type", "application/json")
        .body("{ nope")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_restart_recovers_collection_and_next_id() {
    let first = TestFixture::new().await;
    first.create(json!({ "title": "A" })).await;
    first.create(json!({ "title": "B" })).await;

    let second = TestFixture::with_temp_dir(first.temp_dir).await;
    let list: Value = second
        .client
        .get(second.url("/api/courses"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list.as_array().unwrap().len(), 2);

    let created = second.create(json!({ "title": "C" })).await;
    assert_eq!(created["id"], 3);
}

#[tokio::test]
async fn test_unknown_paths_serve_client_shell() {
    let fixture = TestFixture::new().await;

    for path in ["/", "/courses/12/edit"] {
        let resp = fixture.client.get(fixture.url(path)).send().await.unwrap();
        assert_eq!(resp.status(), 200, "GET {}", path);
        assert_eq!(resp.text().await.unwrap(), SHELL_HTML);
    }
}
