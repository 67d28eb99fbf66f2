pub mod embed;
pub mod file;
pub mod init;
pub mod tts;
pub mod voice;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;

use crate::config::AppConfig;
use crate::database::{
    AudioFileRepository, DatabaseManager, EmbeddingRepository, TtsRequestRepository,
    VoiceRepository,
};
use crate::embedding::EmbeddingService;
use crate::services::{FileService, TtsRequestService, VoiceService};
use crate::storage::{AudioFileStore, EmbeddingStore, TtsUsageStore, VoiceStore};

#[derive(Parser)]
#[command(name = "voiceprint")]
#[command(about = "Voice sample embedding and voice profile storage backend")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the application database
    Init,
    /// Manage uploaded voice samples
    File {
        #[command(subcommand)]
        command: FileCommands,
    },
    /// Generate and inspect file embeddings
    Embed {
        #[command(subcommand)]
        command: EmbedCommands,
    },
    /// Manage voice profiles
    Voice {
        #[command(subcommand)]
        command: VoiceCommands,
    },
    /// Synthesis usage records
    Tts {
        #[command(subcommand)]
        command: TtsCommands,
    },
}

#[derive(Subcommand)]
pub enum FileCommands {
    /// Copy an audio sample into storage and register its metadata
    Add {
        /// Path to the audio file to import
        path: String,
        /// Owning user id
        #[arg(short, long, default_value = "local")]
        user: String,
        /// Sample length in seconds, if known
        #[arg(short, long)]
        duration: Option<f64>,
    },
    /// Show a registered sample
    Show {
        /// File id to show
        file_id: String,
    },
    /// Delete a sample and its metadata
    Rm {
        /// File id to delete
        file_id: String,
    },
}

#[derive(Subcommand)]
pub enum EmbedCommands {
    /// Generate and persist the embedding for a file id
    Generate {
        /// File id to embed
        file_id: String,
    },
    /// Show the stored embedding for a file id
    Show {
        /// File id to look up
        file_id: String,
        /// Include the full vector in the output
        #[arg(long)]
        full: bool,
    },
}

#[derive(Subcommand)]
pub enum VoiceCommands {
    /// Create a voice profile from a registered sample
    Create {
        /// Source file id
        #[arg(short, long)]
        file: String,
        /// Synthesis model the profile targets
        #[arg(short, long, default_value = "cosyvoice-v2")]
        model: String,
        /// Owning user id
        #[arg(short, long, default_value = "local")]
        user: String,
        /// Display name (optional)
        #[arg(short, long)]
        name: Option<String>,
        /// Reference text spoken in the sample (optional)
        #[arg(long)]
        text: Option<String>,
        /// Sample text used for preview synthesis (optional)
        #[arg(long)]
        sample_text: Option<String>,
    },
    /// List voice profiles
    List {
        /// Page number (default: 1)
        #[arg(short, long)]
        page: Option<usize>,
        /// Page size (default: 20)
        #[arg(short, long)]
        limit: Option<usize>,
        /// Search over id, provider voice id, and name
        #[arg(short, long)]
        search: Option<String>,
        /// Filter by owning user id
        #[arg(short, long)]
        user: Option<String>,
    },
    /// Show one voice profile
    Show {
        /// Voice id to show
        voice_id: String,
    },
    /// Update name, text, or metadata of a voice profile
    Update {
        /// Voice id to update
        voice_id: String,
        /// New display name
        #[arg(short, long)]
        name: Option<String>,
        /// New reference text
        #[arg(long)]
        text: Option<String>,
        /// New metadata as a JSON object
        #[arg(long)]
        metadata: Option<String>,
    },
    /// Delete a voice profile
    Rm {
        /// Voice id to delete
        voice_id: String,
    },
}

#[derive(Subcommand)]
pub enum TtsCommands {
    /// Show recent synthesis requests for a user
    History {
        /// User id to show history for
        #[arg(short, long, default_value = "local")]
        user: String,
        /// Maximum number of records (default: 20)
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Services wired to the SQLite backend at the configured database path.
pub(crate) struct AppContext {
    pub config: AppConfig,
    pub files: FileService,
    pub voices: VoiceService,
    pub embeddings: EmbeddingService,
    pub tts: TtsRequestService,
}

impl AppContext {
    pub fn init() -> crate::error::Result<Self> {
        let config = AppConfig::from_env()?;
        let db_manager = DatabaseManager::new(&config.database_path)?;

        let file_store: Arc<dyn AudioFileStore> =
            Arc::new(AudioFileRepository::new(db_manager.clone()));
        let voice_store: Arc<dyn VoiceStore> = Arc::new(VoiceRepository::new(db_manager.clone()));
        let embedding_store: Arc<dyn EmbeddingStore> =
            Arc::new(EmbeddingRepository::new(db_manager.clone()));
        let usage_store: Arc<dyn TtsUsageStore> = Arc::new(TtsRequestRepository::new(db_manager));

        let embeddings = EmbeddingService::new(embedding_store, config.embedding_dimension)?;
        let files = FileService::new(file_store.clone());
        let voices = VoiceService::new(file_store, voice_store.clone(), embeddings.clone());
        let tts = TtsRequestService::new(voice_store, usage_store);

        Ok(Self {
            config,
            files,
            voices,
            embeddings,
            tts,
        })
    }
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let rt = Runtime::new()?;

        rt.block_on(async {
            match self.command {
                Commands::Init => init::handle_init_command().await,
                Commands::File { command } => match command {
                    FileCommands::Add {
                        path,
                        user,
                        duration,
                    } => file::handle_add_command(path, user, duration).await,
                    FileCommands::Show { file_id } => file::handle_show_command(file_id).await,
                    FileCommands::Rm { file_id } => file::handle_rm_command(file_id).await,
                },
                Commands::Embed { command } => match command {
                    EmbedCommands::Generate { file_id } => {
                        embed::handle_generate_command(file_id).await
                    }
                    EmbedCommands::Show { file_id, full } => {
                        embed::handle_show_command(file_id, full).await
                    }
                },
                Commands::Voice { command } => match command {
                    VoiceCommands::Create {
                        file,
                        model,
                        user,
                        name,
                        text,
                        sample_text,
                    } => voice::handle_create_command(file, model, user, name, text, sample_text).await,
                    VoiceCommands::List {
                        page,
                        limit,
                        search,
                        user,
                    } => voice::handle_list_command(page, limit, search, user).await,
                    VoiceCommands::Show { voice_id } => voice::handle_show_command(voice_id).await,
                    VoiceCommands::Update {
                        voice_id,
                        name,
                        text,
                        metadata,
                    } => voice::handle_update_command(voice_id, name, text, metadata).await,
                    VoiceCommands::Rm { voice_id } => voice::handle_rm_command(voice_id).await,
                },
                Commands::Tts { command } => match command {
                    TtsCommands::History { user, limit } => {
                        tts::handle_history_command(user, limit).await
                    }
                },
            }
        })
    }
}
