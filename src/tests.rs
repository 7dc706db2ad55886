//! Integration tests for the back-office backend.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::config::Config;
use crate::db::{init_database, Repository};
use crate::storage::UploadStore;
use crate::{create_router, AppState};

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    uploads_dir: PathBuf,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");
        let uploads_dir = temp_dir.path().join("uploads");

        // Initialize database
        let pool = init_database(&db_path).await.expect("Failed to init DB");
        let repo = Arc::new(Repository::new(pool));

        // Initialize upload store
        let uploads = Arc::new(
            UploadStore::open(&uploads_dir)
                .await
                .expect("Failed to init upload store"),
        );

        // Create config
        let config = Config {
            db_path,
            uploads_dir: uploads_dir.clone(),
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
        };

        let state = AppState {
            repo,
            uploads,
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
            uploads_dir,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Whether a stored path like `uploads/<file>` exists on disk.
    fn upload_exists(&self, stored_path: &str) -> bool {
        Path::new(stored_path)
            .file_name()
            .map(|name| self.uploads_dir.join(name).exists())
            .unwrap_or(false)
    }
}

fn png_part(name: &str) -> Part {
    Part::bytes(b"fake-png-bytes".to_vec())
        .file_name(name.to_string())
        .mime_str("image/png")
        .unwrap()
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

// ==================== EVENTS ====================

#[tokio::test]
async fn test_event_create_requires_image() {
    let fixture = TestFixture::new().await;

    let form = Form::new().text("title", "Hack Night");
    let resp = fixture
        .client
        .post(fixture.url("/api/events"))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Image file is required");
}

#[tokio::test]
async fn test_event_crud() {
    let fixture = TestFixture::new().await;

    // Create event with image
    let form = Form::new()
        .text("schedule", "2026-09-12 18:00")
        .text("venue", "Community Hall")
        .text("title", "Hack Night")
        .text("type", "hackathon")
        .text("fee", "Free")
        .text("description", "An evening of hacking")
        .text("community", "wa-community")
        .text("registerLink", "https://example.com/register")
        .text("paymentName", "UPI")
        .text("prize", "Swag")
        .text("duration", "4h")
        .text("teamSize", "4")
        .part("image", png_part("poster.png"));

    let create_resp = fixture
        .client
        .post(fixture.url("/api/events"))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(create_resp.status(), 201);
    let event: Value = create_resp.json().await.unwrap();
    let event_id = event["id"].as_str().unwrap().to_string();

    // Every field accepted at creation round-trips
    assert_eq!(event["schedule"], "2026-09-12 18:00");
    assert_eq!(event["venue"], "Community Hall");
    assert_eq!(event["title"], "Hack Night");
    assert_eq!(event["type"], "hackathon");
    assert_eq!(event["fee"], "Free");
    assert_eq!(event["description"], "An evening of hacking");
    assert_eq!(event["community"], "wa-community");
    assert_eq!(event["registerLink"], "https://example.com/register");
    assert_eq!(event["paymentName"], "UPI");
    assert_eq!(event["prize"], "Swag");
    assert_eq!(event["duration"], "4h");
    assert_eq!(event["teamSize"], 4);
    assert_eq!(event["imageMimeType"], "image/png");

    let image_path = event["imagePath"].as_str().unwrap().to_string();
    assert!(image_path.starts_with("uploads/"));
    assert!(!image_path.contains('\\'));
    assert!(fixture.upload_exists(&image_path));

    // List contains the event with the same fields
    let list_resp = fixture
        .client
        .get(fixture.url("/api/events"))
        .send()
        .await
        .unwrap();
    assert_eq!(list_resp.status(), 200);
    let list: Value = list_resp.json().await.unwrap();
    let listed = list
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["id"] == event_id.as_str())
        .unwrap();
    assert_eq!(listed["title"], "Hack Night");
    assert_eq!(listed["imagePath"], image_path.as_str());

    // Delete removes the record and the image blob
    let delete_resp = fixture
        .client
        .delete(fixture.url(&format!("/api/events/delete/{}", event_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(delete_resp.status(), 200);
    assert!(!fixture.upload_exists(&image_path));

    // Deleting again is a 404
    let delete_again = fixture
        .client
        .delete(fixture.url(&format!("/api/events/delete/{}", event_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(delete_again.status(), 404);
}

#[tokio::test]
async fn test_event_delete_malformed_id() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .delete(fixture.url("/api/events/delete/not-a-uuid"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Invalid ID");
}

#[tokio::test]
async fn test_event_delete_unknown_id() {
    let fixture = TestFixture::new().await;

    let id = uuid::Uuid::new_v4();
    let resp = fixture
        .client
        .delete(fixture.url(&format!("/api/events/delete/{}", id)))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
}

// ==================== ADMINS ====================

#[tokio::test]
async fn test_admin_duplicate_username() {
    let fixture = TestFixture::new().await;

    let create_resp = fixture
        .client
        .post(fixture.url("/api/admins"))
        .json(&json!({
            "name": "Alice",
            "username": "alice",
            "password": "pw123"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(create_resp.status(), 201);
    let admin: Value = create_resp.json().await.unwrap();
    assert_eq!(admin["role"], "moderator");
    assert_eq!(admin["password"], "pw123");

    // Second create with the same username never yields a second record
    let dup_resp = fixture
        .client
        .post(fixture.url("/api/admins"))
        .json(&json!({
            "name": "Other Alice",
            "username": "alice",
            "role": "viewer",
            "password": "different"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(dup_resp.status(), 400);
    let dup_body: Value = dup_resp.json().await.unwrap();
    assert_eq!(dup_body["message"], "Username already exists");

    let list_resp = fixture
        .client
        .get(fixture.url("/api/admins"))
        .send()
        .await
        .unwrap();
    let admins: Value = list_resp.json().await.unwrap();
    let matching: Vec<_> = admins
        .as_array()
        .unwrap()
        .iter()
        .filter(|a| a["username"] == "alice")
        .collect();
    assert_eq!(matching.len(), 1);
}

#[tokio::test]
async fn test_admin_update_and_delete() {
    let fixture = TestFixture::new().await;

    fixture
        .client
        .post(fixture.url("/api/admins"))
        .json(&json!({"name": "One", "username": "one", "password": "pw1"}))
        .send()
        .await
        .unwrap();
    let a2: Value = fixture
        .client
        .post(fixture.url("/api/admins"))
        .json(&json!({"name": "Two", "username": "two", "password": "pw2"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let a2_id = a2["id"].as_str().unwrap();

    // Username collision with a different admin
    let conflict_resp = fixture
        .client
        .post(fixture.url(&format!("/api/admins/edit/{}", a2_id)))
        .json(&json!({"name": "Two", "username": "one", "password": "pw2"}))
        .send()
        .await
        .unwrap();
    assert_eq!(conflict_resp.status(), 400);

    // Keeping your own username is not a collision
    let update_resp = fixture
        .client
        .post(fixture.url(&format!("/api/admins/edit/{}", a2_id)))
        .json(&json!({
            "name": "Two Renamed",
            "username": "two",
            "role": "superadmin",
            "password": "newpw"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(update_resp.status(), 200);
    let updated: Value = update_resp.json().await.unwrap();
    assert_eq!(updated["name"], "Two Renamed");
    assert_eq!(updated["role"], "superadmin");
    assert_eq!(updated["password"], "newpw");

    // Unknown id
    let missing_resp = fixture
        .client
        .post(fixture.url("/api/admins/edit/unknown-id"))
        .json(&json!({"name": "X", "username": "x", "password": "x"}))
        .send()
        .await
        .unwrap();
    assert_eq!(missing_resp.status(), 404);

    // Delete
    let delete_resp = fixture
        .client
        .delete(fixture.url(&format!("/api/admins/delete/{}", a2_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(delete_resp.status(), 200);

    let delete_again = fixture
        .client
        .delete(fixture.url(&format!("/api/admins/delete/{}", a2_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(delete_again.status(), 404);
}

#[tokio::test]
async fn test_login() {
    let fixture = TestFixture::new().await;

    fixture
        .client
        .post(fixture.url("/api/admins"))
        .json(&json!({"name": "Alice", "username": "alice", "password": "Secret123"}))
        .send()
        .await
        .unwrap();

    // Exact match succeeds
    let ok_resp = fixture
        .client
        .post(fixture.url("/api/login"))
        .json(&json!({"username": "alice", "password": "Secret123"}))
        .send()
        .await
        .unwrap();
    assert_eq!(ok_resp.status(), 200);
    let ok_body: Value = ok_resp.json().await.unwrap();
    assert_eq!(ok_body["success"], true);

    // Case-sensitive: no normalization
    let wrong_case = fixture
        .client
        .post(fixture.url("/api/login"))
        .json(&json!({"username": "alice", "password": "secret123"}))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong_case.status(), 401);
    let wrong_body: Value = wrong_case.json().await.unwrap();
    assert_eq!(wrong_body["success"], false);
    assert_eq!(wrong_body["message"], "Incorrect password");

    // Unknown username
    let unknown = fixture
        .client
        .post(fixture.url("/api/login"))
        .json(&json!({"username": "bob", "password": "Secret123"}))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown.status(), 404);
}

// ==================== CONTACTS ====================

#[tokio::test]
async fn test_contact_validation_enumerates_defects() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/contact"))
        .json(&json!({"email": "a@b.c"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("firstName"));
    assert!(message.contains("lastName"));
    assert!(message.contains("message"));
    assert!(!message.contains("email"));
}

#[tokio::test]
async fn test_contact_crud() {
    let fixture = TestFixture::new().await;

    let create_resp = fixture
        .client
        .post(fixture.url("/api/contact"))
        .json(&json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "phone": "12345",
            "message": "Hello there"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(create_resp.status(), 200);
    let contact: Value = create_resp.json().await.unwrap();
    let contact_id = contact["id"].as_str().unwrap().to_string();
    assert_eq!(contact["firstName"], "Ada");
    assert_eq!(contact["phone"], "12345");
    assert!(contact["createdAt"].as_str().unwrap().contains('T'));

    // Round-trip through the list endpoint
    let list: Value = fixture
        .client
        .get(fixture.url("/api/contact"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let listed = list
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == contact_id.as_str())
        .unwrap();
    assert_eq!(listed["lastName"], "Lovelace");
    assert_eq!(listed["email"], "ada@example.com");
    assert_eq!(listed["message"], "Hello there");
    assert_eq!(listed["createdAt"], contact["createdAt"]);

    // Update overwrites unconditionally, empty values included
    let update_resp = fixture
        .client
        .post(fixture.url(&format!("/api/contact/{}", contact_id)))
        .json(&json!({
            "firstName": "",
            "lastName": "",
            "email": "new@example.com",
            "message": ""
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(update_resp.status(), 200);
    let updated: Value = update_resp.json().await.unwrap();
    assert_eq!(updated["firstName"], "");
    assert_eq!(updated["email"], "new@example.com");
    assert_eq!(updated["message"], "");
    assert_eq!(updated["createdAt"], contact["createdAt"]);

    // Update of an unknown id
    let missing = fixture
        .client
        .post(fixture.url("/api/contact/unknown-id"))
        .json(&json!({"firstName": "X", "lastName": "Y", "email": "z", "message": "m"}))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), 404);

    // Delete
    let delete_resp = fixture
        .client
        .delete(fixture.url(&format!("/api/contact/delete/{}", contact_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(delete_resp.status(), 200);

    let delete_again = fixture
        .client
        .delete(fixture.url(&format!("/api/contact/delete/{}", contact_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(delete_again.status(), 404);
}

// ==================== SYSTEM DATA ====================

#[tokio::test]
async fn test_system_data_null_when_never_created() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/system-data"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert!(body.is_null());
}

#[tokio::test]
async fn test_system_data_upsert_is_full_replace() {
    let fixture = TestFixture::new().await;

    // First write creates the singleton
    let form_a = Form::new()
        .text(
            "socialMediaLinks",
            r#"{"instagram":"https://instagram.com/org","github":"https://github.com/org"}"#,
        )
        .text("milestones", r#"[{"title":"Users","value":"100+"}]"#)
        .text(
            "officeDetails",
            r#"{"address":"1 Main St","contactNumber":"555","email":"office@org.com"}"#,
        )
        .text("logoName", "Org Logo")
        .part("logo", png_part("logo.png"));

    let create_resp = fixture
        .client
        .post(fixture.url("/system-data"))
        .multipart(form_a)
        .send()
        .await
        .unwrap();
    assert_eq!(create_resp.status(), 201);
    let created: Value = create_resp.json().await.unwrap();
    assert_eq!(created["milestones"][0]["title"], "Users");
    assert_eq!(created["logo"]["name"], "Org Logo");
    let logo_path = created["logo"]["imagePath"].as_str().unwrap().to_string();
    assert!(logo_path.starts_with("uploads/"));
    let created_at = created["createdAt"].as_str().unwrap().to_string();

    // Second write omits milestones and the logo file entirely: full
    // replace, not merge
    let form_b = Form::new()
        .text("officeDetails", r#"{"address":"2 New St","contactNumber":"556","email":"hq@org.com"}"#);

    let update_resp = fixture
        .client
        .post(fixture.url("/system-data"))
        .multipart(form_b)
        .send()
        .await
        .unwrap();
    assert_eq!(update_resp.status(), 200);

    let fetched: Value = fixture
        .client
        .get(fixture.url("/system-data"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Exactly one record, reflecting only the second call
    assert_eq!(fetched["milestones"].as_array().unwrap().len(), 0);
    assert_eq!(fetched["logo"]["imagePath"], "");
    assert_eq!(fetched["logo"]["name"], "");
    assert_eq!(fetched["officeDetails"]["address"], "2 New St");
    assert!(fetched["socialMediaLinks"]
        .as_object()
        .unwrap()
        .get("instagram")
        .is_none());
    assert_eq!(fetched["createdAt"], created_at.as_str());
}

#[tokio::test]
async fn test_system_data_rejects_bad_json() {
    let fixture = TestFixture::new().await;

    let form = Form::new().text("milestones", "not-json");
    let resp = fixture
        .client
        .post(fixture.url("/system-data"))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
}

// ==================== TEAMS ====================

#[tokio::test]
async fn test_team_positional_file_matching() {
    let fixture = TestFixture::new().await;

    // image1 (Bob's) is uploaded, image0 is not
    let form = Form::new()
        .text("title", "Core Team")
        .text(
            "members",
            r#"[{"name":"Alice","subtitle":"Lead"},{"name":"Bob","subtitle":"Dev"}]"#,
        )
        .part("image1", png_part("bob.png"));

    let resp = fixture
        .client
        .post(fixture.url("/api/team"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let team: Value = resp.json().await.unwrap();

    assert_eq!(team["title"], "Core Team");
    assert_eq!(team["members"][0]["name"], "Alice");
    assert_eq!(team["members"][0]["imagePath"], "");
    assert_eq!(team["members"][1]["name"], "Bob");
    assert!(team["members"][1]["imagePath"]
        .as_str()
        .unwrap()
        .starts_with("uploads/"));
}

#[tokio::test]
async fn test_team_update_preserves_prior_image_path() {
    let fixture = TestFixture::new().await;

    // Create with a photo for member 0
    let create_form = Form::new()
        .text("title", "Founders")
        .text(
            "members",
            r#"[{"name":"Alice","subtitle":"Founder"},{"name":"Bob","subtitle":"Co-Founder"}]"#,
        )
        .part("image0", png_part("alice.png"));

    let created: Value = fixture
        .client
        .post(fixture.url("/api/team"))
        .multipart(create_form)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let team_id = created["id"].as_str().unwrap().to_string();
    let alice_path = created["members"][0]["imagePath"].as_str().unwrap().to_string();
    assert!(!alice_path.is_empty());

    // Update resubmits Alice's stored path in the body, uploads only Bob's
    let members_body = format!(
        r#"[{{"name":"Alice","subtitle":"Founder","imagePath":"{}"}},{{"name":"Bob","subtitle":"Co-Founder"}}]"#,
        alice_path
    );
    let update_form = Form::new()
        .text("title", "Founders")
        .text("members", members_body)
        .part("image1", png_part("bob.png"));

    let update_resp = fixture
        .client
        .put(fixture.url(&format!("/api/team/{}", team_id)))
        .multipart(update_form)
        .send()
        .await
        .unwrap();
    assert_eq!(update_resp.status(), 200);
    let updated: Value = update_resp.json().await.unwrap();

    assert_eq!(updated["members"][0]["imagePath"], alice_path.as_str());
    assert!(updated["members"][1]["imagePath"]
        .as_str()
        .unwrap()
        .starts_with("uploads/"));
}

#[tokio::test]
async fn test_team_update_unknown_id() {
    let fixture = TestFixture::new().await;

    let form = Form::new()
        .text("title", "Ghost Team")
        .text("members", r#"[{"name":"Nobody","subtitle":"N/A"}]"#);

    let resp = fixture
        .client
        .put(fixture.url("/api/team/unknown-id"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_team_invalid_members_json() {
    let fixture = TestFixture::new().await;

    let form = Form::new()
        .text("title", "Broken")
        .text("members", "[{not json");

    let resp = fixture
        .client
        .post(fixture.url("/api/team"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_team_delete_is_noop_for_unknown_id() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .delete(fixture.url("/api/team/never-existed"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_team_mistyped_image_index_is_ignored() {
    let fixture = TestFixture::new().await;

    // Out-of-range and unparsable indices mean "no file for this member"
    let form = Form::new()
        .text("title", "Solo")
        .text("members", r#"[{"name":"Alice","subtitle":"Lead"}]"#)
        .part("image9", png_part("stray.png"))
        .part("imageX", png_part("typo.png"));

    let resp = fixture
        .client
        .post(fixture.url("/api/team"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let team: Value = resp.json().await.unwrap();
    assert_eq!(team["members"][0]["imagePath"], "");
}
