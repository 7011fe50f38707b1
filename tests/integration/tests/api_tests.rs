//! API Integration Tests
//!
//! Each test spawns the full router over its own temporary data directory.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, document_form, notice_body, pdf_bytes,
    photos_form, Account, TestServer,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

const MIB: usize = 1024 * 1024;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.anonymous().unwrap().get("/health").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.anonymous().unwrap().get("/health/ready").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["storage"], "healthy");
    assert_eq!(body["checks"]["sessions"], "healthy");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let server = TestServer::start().await.unwrap();
    let client = server.anonymous().unwrap();

    let response = client
        .post("/api/v1/auth/login", &Account::Editor.credentials())
        .await
        .unwrap();
    let cookie = response
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
        .expect("session cookie");
    assert!(cookie.starts_with("society_session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));

    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["role"], "editor");

    let session: Value = assert_json(
        client.get("/api/v1/auth/session").await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(session["authenticated"], true);
    assert_eq!(session["user"]["email"], "editor@society.local");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let server = TestServer::start().await.unwrap();
    let client = server.anonymous().unwrap();

    let response = client
        .post(
            "/api/v1/auth/login",
            &json!({ "email": "admin@society.local", "password": "nope" }),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_login_malformed_body() {
    let server = TestServer::start().await.unwrap();
    let client = server.anonymous().unwrap();

    let response = client
        .post("/api/v1/auth/login", &json!({ "email": "not-an-email" }))
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_logout_ends_session_and_is_idempotent() {
    let server = TestServer::start().await.unwrap();
    let client = server.login(Account::Admin).await.unwrap();

    let response = client.post_empty("/api/v1/auth/logout").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["success"], true);

    let session: Value = assert_json(
        client.get("/api/v1/auth/session").await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(session["authenticated"], false);
    assert!(session["user"].is_null());

    let again = client.post_empty("/api/v1/auth/logout").await.unwrap();
    assert_status(again, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_admin_routes_require_session() {
    let server = TestServer::start().await.unwrap();
    let client = server.anonymous().unwrap();

    let response = client.get("/api/v1/admin/notices").await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "UNAUTHORIZED");
}

#[tokio::test]
async fn test_roles_are_enforced() {
    let server = TestServer::start().await.unwrap();
    let viewer = server.login(Account::Viewer).await.unwrap();
    let editor = server.login(Account::Editor).await.unwrap();

    // Viewers read but cannot write
    assert_status(
        viewer.get("/api/v1/admin/notices").await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    let response = viewer
        .post("/api/v1/admin/notices", &notice_body("Lift", "active"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "FORBIDDEN");

    // Editors cannot touch settings or the audit log
    let response = editor.get("/api/v1/admin/settings").await.unwrap();
    assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    let response = editor.get("/api/v1/admin/audit").await.unwrap();
    assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Record Lifecycle Tests
// ============================================================================

#[tokio::test]
async fn test_notice_lifecycle() {
    let server = TestServer::start().await.unwrap();
    let editor = server.login(Account::Editor).await.unwrap();

    let created: Value = assert_json(
        editor
            .post("/api/v1/admin/notices", &notice_body("Water Outage", "draft"))
            .await
            .unwrap(),
        StatusCode::CREATED,
    )
    .await
    .unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("NOT-"));
    assert_eq!(created["status"], "draft");
    assert_eq!(created["createdBy"], "editor@society.local");

    let archived: Value = assert_json(
        editor
            .delete(&format!("/api/v1/admin/notices/{id}"))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(archived["status"], "archived");
    assert!(archived["archivedAt"].is_string());

    let restored: Value = assert_json(
        editor
            .post_empty(&format!("/api/v1/admin/notices/{id}/restore"))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(restored["status"], "draft");
    assert!(restored.get("archivedAt").is_none());
    assert_eq!(restored["createdAt"], created["createdAt"]);

    // Restoring a record that is not archived
    let response = editor
        .post_empty(&format!("/api/v1/admin/notices/{id}/restore"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_STATE");

    // The collection file holds exactly the one record
    let stored: Vec<Value> =
        serde_json::from_slice(&std::fs::read(server.data_file("notices.json")).unwrap())
            .unwrap();
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn test_update_merges_fields() {
    let server = TestServer::start().await.unwrap();
    let editor = server.login(Account::Editor).await.unwrap();

    let created: Value = assert_json(
        editor
            .post("/api/v1/admin/notices", &notice_body("AGM", "active"))
            .await
            .unwrap(),
        StatusCode::CREATED,
    )
    .await
    .unwrap();
    let id = created["id"].as_str().unwrap();

    let updated: Value = assert_json(
        editor
            .put(
                &format!("/api/v1/admin/notices/{id}"),
                &json!({ "title": "AGM moved to Saturday", "id": "NOT-hijack" }),
            )
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(updated["id"], id);
    assert_eq!(updated["title"], "AGM moved to Saturday");
    assert_eq!(updated["category"], "general");
}

#[tokio::test]
async fn test_unknown_record_is_404() {
    let server = TestServer::start().await.unwrap();
    let editor = server.login(Account::Editor).await.unwrap();

    let response = editor
        .get("/api/v1/admin/events/EVT-00000000000000")
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "NOT_FOUND");

    let response = editor
        .put("/api/v1/admin/notices/NOT-00000000000000", &json!({ "title": "x" }))
        .await
        .unwrap();
    assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_missing_title_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let editor = server.login(Account::Editor).await.unwrap();

    let response = editor
        .post("/api/v1/admin/notices", &json!({ "category": "general" }))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_status_filter() {
    let server = TestServer::start().await.unwrap();
    let editor = server.login(Account::Editor).await.unwrap();

    for (title, status) in [("One", "active"), ("Two", "draft"), ("Three", "active")] {
        let response = editor
            .post("/api/v1/admin/notices", &notice_body(title, status))
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let active: Vec<Value> = assert_json(
        editor
            .get("/api/v1/admin/notices?status=active")
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(active.len(), 2);
    assert!(active.iter().all(|n| n["status"] == "active"));

    let searched: Vec<Value> = assert_json(
        editor.get("/api/v1/admin/notices?search=thr").await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(searched.len(), 1);
    assert_eq!(searched[0]["title"], "Three");
}

// ============================================================================
// Upload Tests
// ============================================================================

#[tokio::test]
async fn test_document_upload_and_static_serving() {
    let server = TestServer::start().await.unwrap();
    let editor = server.login(Account::Editor).await.unwrap();

    let pdf = pdf_bytes(2048);
    let document: Value = assert_json(
        editor
            .post_form("/api/v1/admin/documents", document_form("Bylaws", pdf.clone()))
            .await
            .unwrap(),
        StatusCode::CREATED,
    )
    .await
    .unwrap();
    assert!(document["id"].as_str().unwrap().starts_with("DOC-"));
    assert_eq!(document["fileName"], "minutes.pdf");
    assert_eq!(document["fileSize"], 2048);

    let path = document["filePath"].as_str().unwrap();
    let served = editor.get(&format!("/uploads/{path}")).await.unwrap();
    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(served.bytes().await.unwrap().to_vec(), pdf);
}

#[tokio::test]
async fn test_oversized_document_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let editor = server.login(Account::Editor).await.unwrap();

    let response = editor
        .post_form(
            "/api/v1/admin/documents",
            document_form("Huge", pdf_bytes(12 * MIB)),
        )
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body["error"]["code"], "FILE_TOO_LARGE");
    assert_eq!(body["error"]["message"], "File size must be less than 10MB");

    assert_eq!(server.stored_upload_count(), 0);
    let documents: Vec<Value> = assert_json(
        editor.get("/api/v1/admin/documents").await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(documents.is_empty());
}

#[tokio::test]
async fn test_gallery_photos() {
    let server = TestServer::start().await.unwrap();
    let editor = server.login(Account::Editor).await.unwrap();

    let album: Value = assert_json(
        editor
            .post(
                "/api/v1/admin/gallery",
                &json!({ "title": "Diwali 2024", "date": "2024-11-01" }),
            )
            .await
            .unwrap(),
        StatusCode::CREATED,
    )
    .await
    .unwrap();
    let id = album["id"].as_str().unwrap().to_string();

    let album: Value = assert_json(
        editor
            .post_form(&format!("/api/v1/admin/gallery/{id}/photos"), photos_form(3))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    let photos = album["photos"].as_array().unwrap().clone();
    assert_eq!(photos.len(), 3);
    assert_eq!(server.stored_upload_count(), 3);

    // Reverse the order
    let reversed: Vec<Value> = photos.iter().rev().map(|p| p["id"].clone()).collect();
    let album: Value = assert_json(
        editor
            .put(
                &format!("/api/v1/admin/gallery/{id}/photos/order"),
                &json!({ "photoIds": reversed }),
            )
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(album["photos"][0]["id"], photos[2]["id"]);

    // Cover, then delete the cover photo
    let cover_id = photos[1]["id"].as_str().unwrap();
    let album: Value = assert_json(
        editor
            .put(
                &format!("/api/v1/admin/gallery/{id}/cover"),
                &json!({ "photoId": cover_id }),
            )
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(album["coverPhoto"], photos[1]["path"]);

    let album: Value = assert_json(
        editor
            .delete(&format!("/api/v1/admin/gallery/{id}/photos/{cover_id}"))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(album["photos"].as_array().unwrap().len(), 2);
    assert_ne!(album["coverPhoto"], photos[1]["path"]);
    assert_eq!(server.stored_upload_count(), 2);

    // Unknown photo
    let response = editor
        .put(
            &format!("/api/v1/admin/gallery/{id}/cover"),
            &json!({ "photoId": "missing" }),
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Public Site Tests
// ============================================================================

#[tokio::test]
async fn test_public_site_hides_drafts_and_archived() {
    let server = TestServer::start().await.unwrap();
    let editor = server.login(Account::Editor).await.unwrap();
    let public = server.anonymous().unwrap();

    let mut ids = Vec::new();
    for (title, status) in [("Visible", "active"), ("Draft", "draft"), ("Gone", "active")] {
        let created: Value = assert_json(
            editor
                .post("/api/v1/admin/notices", &notice_body(title, status))
                .await
                .unwrap(),
            StatusCode::CREATED,
        )
        .await
        .unwrap();
        ids.push(created["id"].as_str().unwrap().to_string());
    }
    let response = editor
        .delete(&format!("/api/v1/admin/notices/{}", ids[2]))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let notices: Vec<Value> = assert_json(
        public.get("/api/v1/public/notices").await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0]["title"], "Visible");
    assert!(notices[0].get("createdBy").is_none());

    let response = public
        .get(&format!("/api/v1/public/notices/{}", ids[1]))
        .await
        .unwrap();
    assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_settings_toggle_hides_public_section() {
    let server = TestServer::start().await.unwrap();
    let admin = server.login(Account::Admin).await.unwrap();
    let public = server.anonymous().unwrap();

    let settings: Value = assert_json(
        public.get("/api/v1/public/settings").await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(settings.get("system").is_none());
    assert_eq!(settings["features"]["showGallery"], true);

    let updated: Value = assert_json(
        admin
            .put(
                "/api/v1/admin/settings",
                &json!({ "features": { "showGallery": false } }),
            )
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(updated["features"]["showGallery"], false);
    assert_eq!(updated["features"]["showEvents"], true);
    assert_eq!(updated["updatedBy"], "admin@society.local");

    let response = public.get("/api/v1/public/gallery").await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "FEATURE_DISABLED");
}

#[tokio::test]
async fn test_contact_partial_update() {
    let server = TestServer::start().await.unwrap();
    let admin = server.login(Account::Admin).await.unwrap();

    let before: Value = assert_json(
        admin.get("/api/v1/admin/contact").await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();

    let after: Value = assert_json(
        admin
            .put("/api/v1/admin/contact", &json!({ "officePhone": "022-5550100" }))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(after["officePhone"], "022-5550100");
    assert_eq!(after["officeAddress"], before["officeAddress"]);

    let public: Value = assert_json(
        server
            .anonymous()
            .unwrap()
            .get("/api/v1/public/contact")
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(public["officePhone"], "022-5550100");
}

// ============================================================================
// Audit Tests
// ============================================================================

#[tokio::test]
async fn test_audit_log_and_csv_export() {
    let server = TestServer::start().await.unwrap();
    let editor = server.login(Account::Editor).await.unwrap();
    let admin = server.login(Account::Admin).await.unwrap();

    for title in ["First", "Second"] {
        let response = editor
            .post("/api/v1/admin/notices", &notice_body(title, "active"))
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let entries: Vec<Value> = assert_json(
        admin
            .get("/api/v1/admin/audit?action=notice.create")
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["details"]["title"], "Second");

    let recent: Vec<Value> = assert_json(
        admin.get("/api/v1/admin/audit/recent?limit=1").await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(recent.len(), 1);

    let response = admin
        .get("/api/v1/admin/audit/export?action=notice.create")
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/csv"));
    let disposition = response.headers()["content-disposition"]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment"));

    let csv = response.text().await.unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Timestamp,User,Email,Action,Entity,Entity ID,Details"
    );
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.contains("\"Created Notice\"")));
}

#[tokio::test]
async fn test_dashboard_stats() {
    let server = TestServer::start().await.unwrap();
    let editor = server.login(Account::Editor).await.unwrap();

    for (title, status) in [("One", "active"), ("Two", "draft")] {
        let response = editor
            .post("/api/v1/admin/notices", &notice_body(title, status))
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let stats: Value = assert_json(
        editor.get("/api/v1/admin/stats").await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(stats["notices"]["total"], 2);
    assert_eq!(stats["notices"]["active"], 1);
    assert_eq!(stats["notices"]["archived"], 0);
    assert!(!stats["recentActivity"].as_array().unwrap().is_empty());
}
