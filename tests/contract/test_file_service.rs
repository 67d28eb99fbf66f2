use std::sync::Arc;

use tempfile::TempDir;
use voiceprint::database::{AudioFileRepository, DatabaseManager};
use voiceprint::services::{FileService, RegisterFileRequest};
use voiceprint::storage::{AudioFileStore, MemoryStorage};

fn memory_service() -> FileService {
    FileService::new(Arc::new(MemoryStorage::new()))
}

fn sqlite_service(temp_dir: &TempDir) -> FileService {
    let db_manager = DatabaseManager::new(temp_dir.path().join("voiceprint.db")).unwrap();
    let store: Arc<dyn AudioFileStore> = Arc::new(AudioFileRepository::new(db_manager));
    FileService::new(store)
}

fn request(user_id: &str, path: &str) -> RegisterFileRequest {
    RegisterFileRequest {
        user_id: user_id.to_string(),
        filename: "recording.wav".to_string(),
        file_path: path.to_string(),
        file_size: 1024,
        duration: 9.5,
        format: "wav".to_string(),
    }
}

#[tokio::test]
async fn test_register_and_get_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    for service in [memory_service(), sqlite_service(&temp_dir)] {
        let file = service
            .register(request("user-1", "/nonexistent/recording.wav"))
            .await
            .unwrap();

        let fetched = service.get(&file.id).await.unwrap().unwrap();
        assert_eq!(fetched.user_id, "user-1");
        assert_eq!(fetched.filename, "recording.wav");
        assert_eq!(fetched.file_size, 1024);
        assert_eq!(fetched.duration, 9.5);
        assert_eq!(fetched.format, "wav");
    }
}

#[tokio::test]
async fn test_get_missing_is_none() {
    let temp_dir = TempDir::new().unwrap();
    for service in [memory_service(), sqlite_service(&temp_dir)] {
        assert!(service.get("missing").await.unwrap().is_none());
    }
}

#[tokio::test]
async fn test_delete_removes_record_and_sample() {
    let temp_dir = TempDir::new().unwrap();
    let sample_path = temp_dir.path().join("sample.wav");
    std::fs::write(&sample_path, b"RIFFdata").unwrap();

    let service = sqlite_service(&temp_dir);
    let file = service
        .register(request("user-1", sample_path.to_str().unwrap()))
        .await
        .unwrap();

    assert!(service.delete(&file.id).await.unwrap());
    assert!(!sample_path.exists());
    assert!(service.get(&file.id).await.unwrap().is_none());

    // Deleting again reports absence instead of failing.
    assert!(!service.delete(&file.id).await.unwrap());
}
