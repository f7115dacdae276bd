use imagebox::{application::SyncServer, domain::ServerConfig, utils::fs::server_config_file};

#[tokio::main]
async fn main() -> tokio::io::Result<()> {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::init(server_config_file()).await?;
    let server = SyncServer::new_default(&config).await?;

    server.run().await
}
