//! Integration tests for the JSON file stores
//!
//! Each test works in its own temporary data directory.

use chrono::{Duration, NaiveDate, Utc};
use serde_json::{json, Map, Value};
use tempfile::TempDir;

use society_core::entities::{
    AdminUser, AuditAction, AuditLogEntry, CommitteeMember, ContactInfo, NewCommitteeMember,
    NewNotice, Notice, Role, Settings,
};
use society_core::traits::{
    AuditFilter, AuditLogRepository, CollectionRepository, ListFilter, SingletonRepository,
    UploadStore,
};
use society_core::upload::IncomingFile;
use society_core::value_objects::{EntityKind, NoticeStatus};
use society_store::{
    DiskUploadStore, JsonAuditLog, JsonCollectionStore, JsonSingletonStore, CONTACT_FILE,
    SETTINGS_FILE,
};

fn notice(title: &str, date: Option<NaiveDate>) -> Notice {
    Notice::create(
        NewNotice {
            title: title.to_string(),
            category: "general".to_string(),
            date,
            ..NewNotice::default()
        },
        "secretary@example.com",
        Utc::now(),
    )
    .unwrap()
}

fn patch(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

fn admin() -> AdminUser {
    AdminUser::new("1", "admin@society.local", "Society Admin", Role::Admin)
}

// ============================================================================
// Collections
// ============================================================================

#[tokio::test]
async fn test_create_then_find_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = JsonCollectionStore::<Notice>::new(dir.path());

    let created = store.create(notice("Water Outage", None)).await.unwrap();
    let found = store.find_by_id(created.id.as_str()).await.unwrap().unwrap();
    assert_eq!(found, created);
    assert!(dir.path().join("notices.json").exists());
}

#[tokio::test]
async fn test_ids_are_unique_within_one_second() {
    let dir = TempDir::new().unwrap();
    let store = JsonCollectionStore::<Notice>::new(dir.path());

    let now = Utc::now();
    let mut ids = Vec::new();
    for i in 0..3 {
        let mut n = notice(&format!("Notice {i}"), None);
        n.id = society_core::RecordId::generate("NOT", now);
        ids.push(store.create(n).await.unwrap().id);
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[tokio::test]
async fn test_status_filter_and_default_order() {
    let dir = TempDir::new().unwrap();
    let store = JsonCollectionStore::<Notice>::new(dir.path());

    let older = store
        .create(notice("Older", NaiveDate::from_ymd_opt(2024, 1, 1)))
        .await
        .unwrap();
    let newer = store
        .create(notice("Newer", NaiveDate::from_ymd_opt(2024, 6, 1)))
        .await
        .unwrap();
    store
        .update(older.id.as_str(), &patch(json!({ "status": "active" })))
        .await
        .unwrap();

    let all = store.list(&ListFilter::default()).await.unwrap();
    assert_eq!(all[0].id, newer.id);
    assert_eq!(all[1].id, older.id);

    let active = store.list(&ListFilter::with_status("active")).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].title, "Older");

    let search = store
        .list(&ListFilter::default().search("NEW"))
        .await
        .unwrap();
    assert_eq!(search.len(), 1);
}

#[tokio::test]
async fn test_archive_twice_then_restore() {
    let dir = TempDir::new().unwrap();
    let store = JsonCollectionStore::<Notice>::new(dir.path());
    let created = store.create(notice("Parking", None)).await.unwrap();
    let id = created.id.as_str();

    let restore_err = store.restore(id).await.unwrap_err();
    assert!(restore_err.is_invalid_state());

    let first = store.archive(id).await.unwrap();
    let second = store.archive(id).await.unwrap();
    assert_eq!(second.status, NoticeStatus::Archived);
    assert_eq!(second.created_at, created.created_at);
    assert_eq!(second.created_by, created.created_by);
    assert!(second.archived_at >= first.archived_at);

    let restored = store.restore(id).await.unwrap();
    assert_eq!(restored.status, NoticeStatus::Draft);
    assert!(restored.archived_at.is_none());
}

#[tokio::test]
async fn test_missing_ids_are_not_found() {
    let dir = TempDir::new().unwrap();
    let store = JsonCollectionStore::<Notice>::new(dir.path());

    assert!(store.find_by_id("NOT-0").await.unwrap().is_none());
    assert!(store.archive("NOT-0").await.unwrap_err().is_not_found());
    assert!(store
        .update("NOT-0", &patch(json!({ "title": "x" })))
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn test_update_keeps_immutable_fields() {
    let dir = TempDir::new().unwrap();
    let store = JsonCollectionStore::<Notice>::new(dir.path());
    let created = store.create(notice("Gym", None)).await.unwrap();

    let updated = store
        .update(
            created.id.as_str(),
            &patch(json!({ "id": "NOT-1", "createdBy": "x", "content": "Closed on Monday" })),
        )
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_by, created.created_by);
    assert_eq!(updated.content, "Closed on Monday");

    let err = store
        .update(created.id.as_str(), &patch(json!({ "status": "deleted" })))
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn test_legacy_wrapped_shape_and_bad_entries() {
    let dir = TempDir::new().unwrap();
    let now = Utc::now();
    let good = serde_json::to_value(notice("Kept", None)).unwrap();
    let mut bad_status = good.clone();
    bad_status["id"] = json!("NOT-20240101000001");
    bad_status["status"] = json!("published");

    let file = json!({ "notices": [good, { "title": "no id" }, bad_status] });
    tokio::fs::write(
        dir.path().join("notices.json"),
        serde_json::to_vec(&file).unwrap(),
    )
    .await
    .unwrap();

    let store = JsonCollectionStore::<Notice>::new(dir.path());
    let all = store.list(&ListFilter::default()).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title, "Kept");

    // Saving rewrites the canonical bare-array shape and keeps the entries
    // that could not be read
    store.create(notice("Another", Some(now.date_naive()))).await.unwrap();
    let raw: Value =
        serde_json::from_slice(&tokio::fs::read(store.path()).await.unwrap()).unwrap();
    assert_eq!(raw.as_array().map(Vec::len), Some(4));
    assert_eq!(raw[1], json!({ "title": "no id" }));
    assert_eq!(store.list(&ListFilter::default()).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_corrupt_collection_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    tokio::fs::write(dir.path().join("notices.json"), b"[{,,")
        .await
        .unwrap();
    let store = JsonCollectionStore::<Notice>::new(dir.path());
    assert!(store.list(&ListFilter::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_committee_display_order() {
    let dir = TempDir::new().unwrap();
    let store = JsonCollectionStore::<CommitteeMember>::new(dir.path());
    assert_eq!(store.next_display_order().await.unwrap(), 1);

    for name in ["Chairperson", "Secretary"] {
        let member = CommitteeMember::create(
            NewCommitteeMember {
                name: name.to_string(),
                designation: name.to_string(),
                ..NewCommitteeMember::default()
            },
            "a@b.c",
            Utc::now(),
        )
        .unwrap();
        store.create(member).await.unwrap();
    }

    let members = store.list(&ListFilter::default()).await.unwrap();
    let orders: Vec<_> = members.iter().map(|m| m.display_order).collect();
    assert_eq!(orders, [1, 2]);
    assert_eq!(store.next_display_order().await.unwrap(), 3);
}

// ============================================================================
// Singletons
// ============================================================================

#[tokio::test]
async fn test_singleton_defaults_and_deep_update() {
    let dir = TempDir::new().unwrap();
    let settings = JsonSingletonStore::<Settings>::in_dir(dir.path(), SETTINGS_FILE);

    let initial = settings.get().await.unwrap();
    assert_eq!(initial, Settings::default());

    let updated = settings
        .update(
            &patch(json!({ "society": { "name": "Green Park CHS" }, "features": { "showGallery": false } })),
            "admin@society.local",
        )
        .await
        .unwrap();
    assert_eq!(updated.society.name, "Green Park CHS");
    assert!(!updated.features.show_gallery);
    assert!(updated.features.show_events);
    assert_eq!(updated.updated_by.as_deref(), Some("admin@society.local"));

    assert_eq!(settings.get().await.unwrap(), updated);
}

#[tokio::test]
async fn test_contact_put_and_get() {
    let dir = TempDir::new().unwrap();
    let contact = JsonSingletonStore::<ContactInfo>::in_dir(dir.path(), CONTACT_FILE);

    let info = ContactInfo {
        office_phone: "022-555-0101".into(),
        ..ContactInfo::default()
    };
    contact.put(&info).await.unwrap();
    assert_eq!(contact.get().await.unwrap(), info);

    let err = contact
        .update(&patch(json!({ "officePhone": 42 })), "a@b.c")
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

// ============================================================================
// Audit log
// ============================================================================

#[tokio::test]
async fn test_audit_log_is_newest_first_and_capped() {
    let dir = TempDir::new().unwrap();
    let log = JsonAuditLog::new(dir.path(), 5);

    for i in 0..7 {
        let entry = AuditLogEntry::new(&admin(), AuditAction::NoticeCreate, Some(format!("NOT-{i}")));
        log.append(entry).await.unwrap();
    }

    let all = log.query(&AuditFilter::default()).await.unwrap();
    assert_eq!(all.len(), 5);
    assert_eq!(all[0].entity_id.as_deref(), Some("NOT-6"));
    assert_eq!(all[4].entity_id.as_deref(), Some("NOT-2"));

    let recent = log.recent(2).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].entity_id.as_deref(), Some("NOT-6"));
}

#[tokio::test]
async fn test_audit_default_cap_is_one_thousand() {
    let dir = TempDir::new().unwrap();
    let log = JsonAuditLog::new(dir.path(), 1000);

    let entries: Vec<_> = (0..1000)
        .map(|i| AuditLogEntry::new(&admin(), AuditAction::EventUpdate, Some(format!("EVT-{i}"))))
        .collect();
    tokio::fs::write(
        dir.path().join("audit-log.json"),
        serde_json::to_vec(&entries).unwrap(),
    )
    .await
    .unwrap();

    log.append(AuditLogEntry::new(&admin(), AuditAction::SettingsUpdate, None))
        .await
        .unwrap();
    let all = log.query(&AuditFilter::default()).await.unwrap();
    assert_eq!(all.len(), 1000);
    assert_eq!(all[0].action, "settings.update");
    assert_eq!(all[999].entity_id.as_deref(), Some("EVT-998"));
}

#[tokio::test]
async fn test_audit_query_filters() {
    let dir = TempDir::new().unwrap();
    let log = JsonAuditLog::new(dir.path(), 100);
    let editor = AdminUser::new("2", "editor@society.local", "Editor", Role::Editor);

    let mut old = AuditLogEntry::new(&admin(), AuditAction::NoticeCreate, None);
    old.timestamp = Utc::now() - Duration::days(10);
    log.append(old).await.unwrap();
    log.append(AuditLogEntry::new(&editor, AuditAction::NoticeCreate, None))
        .await
        .unwrap();
    log.append(AuditLogEntry::new(&editor, AuditAction::EventCreate, None))
        .await
        .unwrap();

    let by_editor = log
        .query(&AuditFilter {
            user: Some("editor@society.local".into()),
            entity: Some("notice".into()),
            ..AuditFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(by_editor.len(), 1);

    let today = log
        .query(&AuditFilter {
            start_date: Some(Utc::now().date_naive()),
            limit: Some(1),
            ..AuditFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(today.len(), 1);
    assert_eq!(today[0].action, "event.create");
}

#[tokio::test]
async fn test_corrupt_audit_log_is_not_overwritten() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("audit-log.json");
    tokio::fs::write(&path, br#"[{"id":"x",,"#).await.unwrap();
    let log = JsonAuditLog::new(dir.path(), 1000);

    let err = log
        .append(AuditLogEntry::new(&admin(), AuditAction::NoticeCreate, None))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "STORAGE_UNAVAILABLE");
    assert_eq!(tokio::fs::read(&path).await.unwrap(), br#"[{"id":"x",,"#);
    assert!(log.recent(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unreadable_audit_entries_survive_append() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("audit-log.json");
    let legacy = json!({ "id": "legacy-1", "action": "notice.create" });
    tokio::fs::write(&path, serde_json::to_vec(&json!([legacy.clone()])).unwrap())
        .await
        .unwrap();
    let log = JsonAuditLog::new(dir.path(), 1000);

    log.append(AuditLogEntry::new(&admin(), AuditAction::NoticeUpdate, None))
        .await
        .unwrap();

    let raw: Vec<Value> = serde_json::from_slice(&tokio::fs::read(&path).await.unwrap()).unwrap();
    assert_eq!(raw.len(), 2);
    assert_eq!(raw[0]["action"], "notice.update");
    assert_eq!(raw[1], legacy);

    let readable = log.query(&AuditFilter::default()).await.unwrap();
    assert_eq!(readable.len(), 1);
}

// ============================================================================
// Uploads
// ============================================================================

#[tokio::test]
async fn test_upload_save_and_delete() {
    let dir = TempDir::new().unwrap();
    let uploads = DiskUploadStore::new(dir.path());
    let record = society_core::RecordId::new("DOC-20240101000000");

    let file = IncomingFile::new("bylaws.pdf", Some("application/pdf".into()), b"%PDF-1.4".to_vec());
    let stored = uploads
        .save(EntityKind::Document, &record, &file)
        .await
        .unwrap();

    assert!(stored.path.starts_with("documents/DOC-20240101000000/"));
    assert!(stored.path.ends_with(".pdf"));
    assert_eq!(stored.size, 8);
    let on_disk = dir.path().join(&stored.path);
    assert_eq!(tokio::fs::read(&on_disk).await.unwrap(), b"%PDF-1.4");

    uploads.delete(&stored.path).await.unwrap();
    assert!(!on_disk.exists());
    // Deleting again is fine
    uploads.delete(&stored.path).await.unwrap();
}
