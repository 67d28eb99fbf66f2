use std::sync::Arc;

use voiceprint::database::{DatabaseManager, EmbeddingRepository};
use voiceprint::embedding::{EmbeddingService, DEFAULT_DIMENSION, MODEL_VERSION};
use voiceprint::models::Embedding;
use voiceprint::storage::{EmbeddingStore, MemoryStorage};

fn memory_service(dimension: usize) -> EmbeddingService {
    EmbeddingService::new(Arc::new(MemoryStorage::new()), dimension).unwrap()
}

fn sqlite_service(dimension: usize) -> EmbeddingService {
    let db_manager = DatabaseManager::open_in_memory().unwrap();
    let store: Arc<dyn EmbeddingStore> = Arc::new(EmbeddingRepository::new(db_manager));
    EmbeddingService::new(store, dimension).unwrap()
}

#[tokio::test]
async fn test_generate_and_save_persists_record() {
    for service in [memory_service(32), sqlite_service(32)] {
        let saved = service.generate_and_save("file-123").await.unwrap();

        assert_eq!(saved.file_id, "file-123");
        assert_eq!(saved.dimension, 32);
        assert_eq!(saved.model_version, MODEL_VERSION);
        assert_eq!(saved.id, Embedding::derive_id("file-123", &saved.vector_hash));

        let fetched = service.get("file-123").await.unwrap().unwrap();
        assert_eq!(fetched.id, saved.id);
        assert_eq!(fetched.vector, saved.vector);
        assert_eq!(fetched.vector_hash, saved.vector_hash);
    }
}

#[tokio::test]
async fn test_save_is_idempotent_first_write_wins() {
    for service in [memory_service(16), sqlite_service(16)] {
        let generated = service.generate("file-1");
        let first = service
            .save(
                "file-1",
                generated.vector,
                generated.vector_hash.clone(),
                None,
            )
            .await
            .unwrap();

        // A retry with a completely different vector and hash must return
        // the original record unchanged.
        let second = service
            .save(
                "file-1",
                vec![1.0; 16],
                "0000000000000000000000000000000000000000000000000000000000000000".to_string(),
                Some("other-model".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.vector_hash, first.vector_hash);
        assert_eq!(second.model_version, first.model_version);
        assert_eq!(second.created_at, first.created_at);
    }
}

#[tokio::test]
async fn test_generate_and_save_retry_returns_same_record() {
    for service in [memory_service(64), sqlite_service(64)] {
        let first = service.generate_and_save("retry-file").await.unwrap();
        let second = service.generate_and_save("retry-file").await.unwrap();

        assert_eq!(second, first);
    }
}

#[tokio::test]
async fn test_get_missing_is_none() {
    for service in [memory_service(16), sqlite_service(16)] {
        assert!(service.get("never-saved").await.unwrap().is_none());
    }
}

#[tokio::test]
async fn test_generated_vectors_survive_storage_bit_for_bit() {
    let service = sqlite_service(DEFAULT_DIMENSION);

    let generated = service.generate("roundtrip-file");
    service.generate_and_save("roundtrip-file").await.unwrap();
    let stored = service.get("roundtrip-file").await.unwrap().unwrap();

    for (expected, actual) in generated.vector.iter().zip(&stored.vector) {
        assert_eq!(expected.to_bits(), actual.to_bits());
    }
    assert_eq!(stored.vector_hash, generated.vector_hash);
}

#[tokio::test]
async fn test_concurrent_saves_create_one_record() {
    for service in [memory_service(32), sqlite_service(32)] {
        let mut handles = Vec::new();
        for _ in 0..8 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service.generate_and_save("contended-file").await.unwrap()
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().id);
        }
        ids.dedup();
        assert_eq!(ids.len(), 1, "all saves must observe the same record");
    }
}

#[tokio::test]
async fn test_dimension_mismatch_changes_nothing_stored() {
    // A service at a different dimension still returns the stored record
    // for an already-saved file; the store ignores the new vector.
    let db_manager = DatabaseManager::open_in_memory().unwrap();
    let store: Arc<dyn EmbeddingStore> = Arc::new(EmbeddingRepository::new(db_manager));

    let service_256 = EmbeddingService::new(store.clone(), 256).unwrap();
    let original = service_256.generate_and_save("file-x").await.unwrap();

    let service_16 = EmbeddingService::new(store, 16).unwrap();
    let replayed = service_16.generate_and_save("file-x").await.unwrap();

    assert_eq!(replayed.dimension, 256);
    assert_eq!(replayed.vector_hash, original.vector_hash);
}
