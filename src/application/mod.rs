pub mod client;
pub mod diff;
pub mod handlers;
pub mod network;
pub mod registry;
pub mod server;
pub mod session;
pub mod storage;

pub use client::SyncClient;
pub use handlers::InstructionHandler;
pub use registry::FileRegistry;
pub use server::SyncServer;
pub use session::Session;
