pub mod file_service;
pub mod tts_request_service;
pub mod voice_service;

pub use file_service::{FileService, RegisterFileRequest};
pub use tts_request_service::{RecordTtsRequest, TtsRequestService};
pub use voice_service::{CreateVoiceRequest, UpdateVoiceRequest, VoiceService};
