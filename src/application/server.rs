use crate::{
    application::{
        handlers::InstructionHandler, registry::FileRegistry, session::Session,
        storage::StorageInterface,
    },
    domain::ServerConfig,
    infra::{network::tcp::TcpServer, storage::DiskStorage},
};
use std::{net::SocketAddr, sync::Arc};
use tokio::{io, net::ToSocketAddrs};
use tracing::{error, info, warn};

/// Accepts client connections and runs one session task per connection.
pub struct SyncServer<S: StorageInterface> {
    listener: TcpServer,
    handler: Arc<InstructionHandler<S>>,
}

impl SyncServer<DiskStorage> {
    pub async fn new_default(config: &ServerConfig) -> io::Result<Self> {
        let storage = DiskStorage::open(&config.storage_dir).await?;
        info!(path = %storage.root().display(), "Using storage directory");

        Self::new(("0.0.0.0", config.port), config, storage).await
    }
}

impl<S: StorageInterface> SyncServer<S> {
    pub async fn new(addr: impl ToSocketAddrs, config: &ServerConfig, storage: S) -> io::Result<Self> {
        let registry = build_registry(config, &storage).await?;
        let listener = TcpServer::bind(addr).await?;

        info!(
            addr = %listener.local_addr()?,
            files = registry.len().await,
            "🚀 Listening for clients"
        );

        Ok(Self {
            listener,
            handler: InstructionHandler::new(registry, Arc::new(storage)),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn registry(&self) -> &Arc<FileRegistry> {
        self.handler.registry()
    }

    /// Serves until SIGINT (or SIGTERM/SIGHUP on unix).
    pub async fn run(&self) -> io::Result<()> {
        #[cfg(unix)]
        {
            use tokio::signal::{
                self,
                unix::{SignalKind, signal},
            };
            let ctrl_c = signal::ctrl_c();
            let mut sigterm = signal(SignalKind::terminate())?;
            let mut sighup = signal(SignalKind::hangup())?;

            tokio::select! {
                res = self.serve() => res?,

                _ = ctrl_c => info!("🛑 SIGINT"),

                _ = sigterm.recv() => info!("🛑 SIGTERM"),

                _ = sighup.recv() => info!("🛑 SIGHUP"),
            }
        }

        #[cfg(not(unix))]
        {
            use tokio::signal;

            tokio::select! {
                res = self.serve() => res?,

                _ = signal::ctrl_c() => info!("🛑 SIGINT"),
            }
        }

        info!("✅ Imagebox server shut down");
        Ok(())
    }

    /// Accept loop. A failed accept is logged and the loop keeps going.
    pub async fn serve(&self) -> io::Result<()> {
        loop {
            let (transport, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(err) => {
                    error!("Failed to accept connection: {err}");
                    continue;
                }
            };

            let session = Session::new(transport, peer, self.handler.clone());
            tokio::spawn(session.run());
        }
    }
}

/// Seeds the registry from the config, then reconciles it with what storage
/// actually holds. Storage files nobody owns are only registered when
/// `adopt_orphans` is set.
async fn build_registry<S: StorageInterface>(
    config: &ServerConfig,
    storage: &S,
) -> io::Result<Arc<FileRegistry>> {
    let registry = FileRegistry::with_seed(
        config
            .seed
            .iter()
            .map(|entry| (entry.name.clone(), entry.owner)),
    );

    for entry in &config.seed {
        if !storage.exists(&entry.name).await {
            warn!(name = %entry.name, "Seeded file is missing from storage");
        }
    }

    for name in storage.list().await? {
        if registry.get(&name).await.is_some() {
            continue;
        }

        if config.adopt_orphans {
            info!(name = %name, owner = %config.orphan_owner, "Adopted orphan file");
            registry.put(name, config.orphan_owner).await;
        } else {
            warn!(name = %name, "Orphan file in storage is not registered");
        }
    }

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ClientId, FileName, SeedEntry},
        infra::storage::MemoryStorage,
    };

    fn name(s: &str) -> FileName {
        FileName::new(s).unwrap()
    }

    async fn storage_with(names: &[&str]) -> MemoryStorage {
        let storage = MemoryStorage::new();
        for n in names {
            storage.insert(name(n), n.as_bytes().to_vec()).await;
        }
        storage
    }

    #[tokio::test]
    async fn test_seed_is_registered_even_if_missing() {
        let config = ServerConfig::default();
        let storage = MemoryStorage::new();

        let registry = build_registry(&config, &storage).await.unwrap();

        assert_eq!(
            registry.get(&name("dust.jpg")).await,
            Some(ClientId::LOCALHOST)
        );
    }

    #[tokio::test]
    async fn test_orphans_left_alone_by_default() {
        let config = ServerConfig {
            seed: vec![],
            ..Default::default()
        };
        let storage = storage_with(&["stray.txt"]).await;

        let registry = build_registry(&config, &storage).await.unwrap();

        assert!(registry.snapshot().await.is_empty());
        assert!(storage.exists(&name("stray.txt")).await);
    }

    #[tokio::test]
    async fn test_orphans_adopted_when_enabled() {
        let owner: ClientId = "10.1.1.1".parse::<std::net::IpAddr>().unwrap().into();
        let config = ServerConfig {
            adopt_orphans: true,
            orphan_owner: owner,
            seed: vec![SeedEntry {
                name: name("dust.jpg"),
                owner: ClientId::LOCALHOST,
            }],
            ..Default::default()
        };
        let storage = storage_with(&["dust.jpg", "stray.txt"]).await;

        let registry = build_registry(&config, &storage).await.unwrap();

        assert_eq!(registry.get(&name("stray.txt")).await, Some(owner));
        assert_eq!(
            registry.get(&name("dust.jpg")).await,
            Some(ClientId::LOCALHOST)
        );
    }
}
