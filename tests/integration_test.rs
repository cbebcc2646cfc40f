use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use chrono::Utc;
use serde_json::Value;

use suntyn_tools::{
    application::{
        ports::{OutputStore, UserFileRepository},
        sweeper::UploadSweeper,
        use_cases::{IncomingFile, ProcessRequest},
    },
    domain::entities::NewUserFile,
    infrastructure::{persistence::InMemoryUserFileRepository, storage::LocalFilesystemStore},
};

mod test_fixtures;
use test_fixtures::TestEnvironment;

fn json_upload(body: String) -> IncomingFile {
    IncomingFile {
        field: "files".to_string(),
        original_name: "data.json".to_string(),
        mime_type: "application/json".to_string(),
        data: Bytes::from(body),
    }
}

#[tokio::test]
async fn test_concurrent_runs_of_one_tool_leave_a_whole_output() {
    let env = TestEnvironment::new().await;
    let use_case = Arc::clone(&env.app.state.process_use_case);

    let mut handles = Vec::new();
    for i in 0..8u64 {
        let use_case = Arc::clone(&use_case);
        handles.push(tokio::spawn(async move {
            let request = ProcessRequest {
                files: vec![json_upload(format!("{{\"writer\": {}}}", i))],
                ..Default::default()
            };
            use_case.execute("json-formatter", request).await
        }));
    }

    for handle in handles {
        let response = handle.await.unwrap().unwrap();
        assert_eq!(response.filename, "processed-json-formatter.json");
    }

    // Last writer wins; whichever it was, the file is one complete document
    let bytes = std::fs::read(env.processed_path("processed-json-formatter.json")).unwrap();
    let output: Value = serde_json::from_slice(&bytes).unwrap();
    let writer = output["processed_data"]["writer"].as_u64().unwrap();
    assert!(writer < 8);

    // No temp files left behind by the atomic writes
    let leftovers = std::fs::read_dir(env.uploads_dir.path().join("tmp"))
        .unwrap()
        .count();
    assert_eq!(leftovers, 0);
}

#[tokio::test]
async fn test_uploads_are_recorded_and_outputs_overwritten() {
    let env = TestEnvironment::new().await;
    let use_case = &env.app.state.process_use_case;

    for body in ["{\"run\": 1}", "{\"run\": 2}"] {
        let request = ProcessRequest {
            files: vec![json_upload(body.to_string())],
            ..Default::default()
        };
        use_case.execute("json-formatter", request).await.unwrap();
    }

    // Both uploads kept until the sweeper runs; one shared output
    assert_eq!(env.stored_uploads().len(), 2);
    let output: Value = serde_json::from_slice(
        &std::fs::read(env.processed_path("processed-json-formatter.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(output["processed_data"]["run"], 2);
}

#[tokio::test]
async fn test_sweeper_removes_only_expired_uploads() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = Arc::new(LocalFilesystemStore::new(dir.path().to_path_buf()));
    store.init().await.unwrap();
    let repo = Arc::new(InMemoryUserFileRepository::new());

    let now = Utc::now();
    let mut paths = Vec::new();
    for (name, expires_at) in [
        ("old.png", now - chrono::Duration::minutes(5)),
        ("fresh.png", now + chrono::Duration::minutes(5)),
    ] {
        let stored = store.save_upload("files", name, b"png-bytes").await.unwrap();
        paths.push(stored.path.clone());
        repo.create(NewUserFile {
            user_id: None,
            original_name: name.to_string(),
            stored_name: stored.stored_name,
            mime_type: "image/png".to_string(),
            size: 9,
            path: stored.path,
            expires_at,
        })
        .await
        .unwrap();
    }

    let sweeper = UploadSweeper::new(
        Arc::clone(&repo) as Arc<dyn UserFileRepository>,
        Arc::clone(&store) as Arc<dyn OutputStore>,
        Duration::from_secs(60),
    );
    let result = sweeper.sweep_once(now).await.unwrap();

    assert_eq!(result.files_deleted, 1);
    assert!(result.is_success());
    assert!(!paths[0].exists());
    assert!(paths[1].exists());
    assert_eq!(repo.len(), 1);

    // A second pass finds nothing new
    let result = sweeper.sweep_once(now).await.unwrap();
    assert_eq!(result.files_deleted, 0);
}

#[tokio::test]
async fn test_sweeper_tolerates_already_deleted_upload() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = Arc::new(LocalFilesystemStore::new(dir.path().to_path_buf()));
    store.init().await.unwrap();
    let repo = Arc::new(InMemoryUserFileRepository::new());

    let stored = store.save_upload("files", "gone.pdf", b"%PDF").await.unwrap();
    std::fs::remove_file(&stored.path).unwrap();
    repo.create(NewUserFile {
        user_id: None,
        original_name: "gone.pdf".to_string(),
        stored_name: stored.stored_name,
        mime_type: "application/pdf".to_string(),
        size: 4,
        path: stored.path,
        expires_at: Utc::now() - chrono::Duration::seconds(1),
    })
    .await
    .unwrap();

    let sweeper = UploadSweeper::new(repo.clone(), store, Duration::from_secs(60));
    let result = sweeper.sweep_once(Utc::now()).await.unwrap();
    assert!(result.is_success());
    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_sweeper_keeps_record_when_file_cannot_be_removed() {
    let dir = tempfile::TempDir::new().unwrap();
    let outside = tempfile::TempDir::new().unwrap();
    let store = Arc::new(LocalFilesystemStore::new(dir.path().to_path_buf()));
    store.init().await.unwrap();
    let repo = Arc::new(InMemoryUserFileRepository::new());

    // The store refuses to touch anything outside its root
    let stray = outside.path().join("stray.png");
    std::fs::write(&stray, b"png-bytes").unwrap();
    repo.create(NewUserFile {
        user_id: None,
        original_name: "stray.png".to_string(),
        stored_name: "stray.png".to_string(),
        mime_type: "image/png".to_string(),
        size: 9,
        path: stray.clone(),
        expires_at: Utc::now() - chrono::Duration::minutes(1),
    })
    .await
    .unwrap();

    let sweeper = UploadSweeper::new(repo.clone(), store, Duration::from_secs(60));

    for _ in 0..2 {
        let result = sweeper.sweep_once(Utc::now()).await.unwrap();
        assert_eq!(result.files_deleted, 0);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(repo.len(), 1);
    }
    assert!(stray.exists());
}
