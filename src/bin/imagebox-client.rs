use imagebox::{
    application::SyncClient,
    domain::ClientConfig,
    infra::{network::tcp, storage::DiskStorage},
    utils::fs::client_config_file,
};
use tracing::info;

#[tokio::main]
async fn main() -> tokio::io::Result<()> {
    tracing_subscriber::fmt::init();

    let config = ClientConfig::init(client_config_file()).await?;
    let storage = DiskStorage::open(&config.storage_dir).await?;

    let transport = tcp::connect(&config.server).await?;
    info!(server = %config.server, "🟢 Connected");

    let mut client = SyncClient::from_storage(transport, storage)
        .await?
        .remove_dropped_files(config.remove_dropped_files);

    client.sync().await?;

    info!(files = ?client.known(), "Known files");
    Ok(())
}
