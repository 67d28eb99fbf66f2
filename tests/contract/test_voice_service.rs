use std::sync::Arc;

use voiceprint::database::{
    AudioFileRepository, DatabaseManager, EmbeddingRepository, TtsRequestRepository,
    VoiceRepository,
};
use voiceprint::embedding::EmbeddingService;
use voiceprint::models::AudioFile;
use voiceprint::services::{
    CreateVoiceRequest, RecordTtsRequest, TtsRequestService, UpdateVoiceRequest, VoiceService,
};
use voiceprint::storage::{
    AudioFileStore, EmbeddingStore, MemoryStorage, TtsUsageStore, VoiceQuery, VoiceStore,
};

struct Backend {
    files: Arc<dyn AudioFileStore>,
    voices: VoiceService,
    embeddings: EmbeddingService,
    tts: TtsRequestService,
}

fn memory_backend() -> Backend {
    let storage = Arc::new(MemoryStorage::new());
    let embeddings = EmbeddingService::new(storage.clone(), 32).unwrap();
    Backend {
        files: storage.clone(),
        voices: VoiceService::new(storage.clone(), storage.clone(), embeddings.clone()),
        embeddings,
        tts: TtsRequestService::new(storage.clone(), storage),
    }
}

fn sqlite_backend() -> Backend {
    let db_manager = DatabaseManager::open_in_memory().unwrap();
    let files: Arc<dyn AudioFileStore> = Arc::new(AudioFileRepository::new(db_manager.clone()));
    let voices: Arc<dyn VoiceStore> = Arc::new(VoiceRepository::new(db_manager.clone()));
    let embedding_store: Arc<dyn EmbeddingStore> =
        Arc::new(EmbeddingRepository::new(db_manager.clone()));
    let usage: Arc<dyn TtsUsageStore> = Arc::new(TtsRequestRepository::new(db_manager));

    let embeddings = EmbeddingService::new(embedding_store, 32).unwrap();
    Backend {
        files: files.clone(),
        voices: VoiceService::new(files, voices.clone(), embeddings.clone()),
        embeddings,
        tts: TtsRequestService::new(voices, usage),
    }
}

async fn register_sample(backend: &Backend, user_id: &str) -> String {
    let file = AudioFile::new(
        user_id.to_string(),
        "sample.wav".to_string(),
        "/nonexistent/sample.wav".to_string(),
        4096,
        11.0,
        "wav".to_string(),
    );
    backend.files.save(file).await.unwrap().id
}

fn create_request(user_id: &str, file_id: &str, model: &str) -> CreateVoiceRequest {
    CreateVoiceRequest {
        user_id: user_id.to_string(),
        file_id: file_id.to_string(),
        model: model.to_string(),
        name: None,
        text: None,
        sample_text: None,
    }
}

#[tokio::test]
async fn test_create_voice_stamps_stored_embedding_hash() {
    for backend in [memory_backend(), sqlite_backend()] {
        let file_id = register_sample(&backend, "user-1").await;

        let voice = backend
            .voices
            .create_voice(create_request("user-1", &file_id, "cosyvoice-v2"))
            .await
            .unwrap();

        let embedding = backend.embeddings.get(&file_id).await.unwrap().unwrap();
        assert_eq!(voice.embedding_hash, embedding.vector_hash);
        assert!(voice.provider_voice_id.starts_with("local-"));
        assert_eq!(
            voice.sample_audio_path.as_deref(),
            Some("/nonexistent/sample.wav")
        );
        assert_eq!(voice.model, "cosyvoice-v2");
    }
}

#[tokio::test]
async fn test_create_voice_is_idempotent_per_file_and_model() {
    for backend in [memory_backend(), sqlite_backend()] {
        let file_id = register_sample(&backend, "user-1").await;

        let first = backend
            .voices
            .create_voice(create_request("user-1", &file_id, "cosyvoice-v2"))
            .await
            .unwrap();
        let retried = backend
            .voices
            .create_voice(create_request("user-1", &file_id, "cosyvoice-v2"))
            .await
            .unwrap();
        let other_model = backend
            .voices
            .create_voice(create_request("user-1", &file_id, "cosyvoice-v3"))
            .await
            .unwrap();

        assert_eq!(retried.id, first.id);
        assert_ne!(other_model.id, first.id);
        // Both share the file's one embedding.
        assert_eq!(other_model.embedding_hash, first.embedding_hash);
    }
}

#[tokio::test]
async fn test_create_voice_unknown_file() {
    for backend in [memory_backend(), sqlite_backend()] {
        let err = backend
            .voices
            .create_voice(create_request("user-1", "no-such-file", "cosyvoice-v2"))
            .await
            .unwrap_err();
        assert_eq!(err.category(), "not_found");
        // The embedding pipeline must not have run for the missing file.
        assert!(backend
            .embeddings
            .get("no-such-file")
            .await
            .unwrap()
            .is_none());
    }
}

#[tokio::test]
async fn test_list_voices_pages_and_filters() {
    for backend in [memory_backend(), sqlite_backend()] {
        for i in 0..3 {
            let file_id = register_sample(&backend, "user-1").await;
            let mut request = create_request("user-1", &file_id, "cosyvoice-v2");
            request.name = Some(format!("Narrator {i}"));
            backend.voices.create_voice(request).await.unwrap();
        }
        let other_file = register_sample(&backend, "user-2").await;
        backend
            .voices
            .create_voice(create_request("user-2", &other_file, "cosyvoice-v2"))
            .await
            .unwrap();

        let mine = backend
            .voices
            .list_voices(&VoiceQuery {
                user_id: Some("user-1".to_string()),
                limit: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(mine.total, 3);
        assert_eq!(mine.voices.len(), 2);

        let named = backend
            .voices
            .list_voices(&VoiceQuery {
                search: Some("narrator 1".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(named.total, 1);
        assert_eq!(named.voices[0].name.as_deref(), Some("Narrator 1"));
    }
}

#[tokio::test]
async fn test_update_voice_fields() {
    for backend in [memory_backend(), sqlite_backend()] {
        let file_id = register_sample(&backend, "user-1").await;
        let voice = backend
            .voices
            .create_voice(create_request("user-1", &file_id, "cosyvoice-v2"))
            .await
            .unwrap();

        let updated = backend
            .voices
            .update_voice(
                &voice.id.to_string(),
                UpdateVoiceRequest {
                    name: Some("Renamed".to_string()),
                    text: Some("reference text".to_string()),
                    metadata: Some(serde_json::json!({"pinned": true})),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name.as_deref(), Some("Renamed"));
        assert_eq!(updated.text.as_deref(), Some("reference text"));
        assert_eq!(updated.metadata, Some(serde_json::json!({"pinned": true})));
        assert!(updated.updated_at >= voice.updated_at);

        // Unset fields stay untouched.
        let partial = backend
            .voices
            .update_voice(&voice.id.to_string(), UpdateVoiceRequest::default())
            .await
            .unwrap();
        assert_eq!(partial.name.as_deref(), Some("Renamed"));
    }
}

#[tokio::test]
async fn test_delete_voice() {
    for backend in [memory_backend(), sqlite_backend()] {
        let file_id = register_sample(&backend, "user-1").await;
        let voice = backend
            .voices
            .create_voice(create_request("user-1", &file_id, "cosyvoice-v2"))
            .await
            .unwrap();

        assert!(backend
            .voices
            .delete_voice(&voice.id.to_string())
            .await
            .unwrap());
        assert!(!backend
            .voices
            .delete_voice(&voice.id.to_string())
            .await
            .unwrap());
        assert!(backend
            .voices
            .get_voice(&voice.id.to_string())
            .await
            .unwrap()
            .is_none());
    }
}

#[tokio::test]
async fn test_tts_usage_ledger() {
    for backend in [memory_backend(), sqlite_backend()] {
        let file_id = register_sample(&backend, "user-1").await;
        let voice = backend
            .voices
            .create_voice(create_request("user-1", &file_id, "cosyvoice-v2"))
            .await
            .unwrap();

        for i in 0..3 {
            backend
                .tts
                .record(RecordTtsRequest {
                    user_id: "user-1".to_string(),
                    voice_id: voice.id.to_string(),
                    input_text: format!("take {i}"),
                    model: "step-tts-mini".to_string(),
                    audio_path: format!("/tmp/out-{i}.mp3"),
                })
                .await
                .unwrap();
        }

        let history = backend.tts.history("user-1", Some(2)).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].input_text, "take 2");

        let empty = backend.tts.history("someone-else", None).await.unwrap();
        assert!(empty.is_empty());
    }
}
