mod config;
pub mod diff;
mod file_name;
mod identity;
mod message;

pub use config::ClientConfig;
pub use config::DEFAULT_PORT;
pub use config::SeedEntry;
pub use config::ServerConfig;
pub use diff::SyncPlan;
pub use file_name::FileName;
pub use file_name::InvalidFileName;
pub use identity::ClientId;
pub use message::DeleteOutcome;
pub use message::FilePayload;
pub use message::Instruction;
pub use message::MAX_FRAME_SIZE;
pub use message::SyncItem;
pub use message::SyncResponse;
