pub mod audio_file;
pub mod embedding;
pub mod tts_request;
pub mod voice;

pub use audio_file::AudioFile;
pub use embedding::Embedding;
pub use tts_request::{NewTtsRequest, TtsRequest};
pub use voice::Voice;
