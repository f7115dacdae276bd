use crate::{
    application::{
        handlers::InstructionHandler,
        storage::{StorageInterface, interface::StorageResult},
    },
    domain::{ClientId, FilePayload},
};
use tracing::{error, info};

impl<S: StorageInterface> InstructionHandler<S> {
    /// Stores the file and makes `requester` its owner. Nothing is sent back.
    ///
    /// The write and the registry update are two separate steps; a concurrent
    /// sync may see the file on disk before it is registered.
    pub async fn add(&self, requester: ClientId, file: FilePayload) -> StorageResult<()> {
        if let Err(err) = self.storage.write_bytes(&file.name, &file.contents).await {
            error!(name = %file.name, peer = %requester, "Failed to store added file: {err}");
            return Err(err);
        }

        let previous = self.registry.put(file.name.clone(), requester).await;

        match previous {
            Some(owner) if owner != requester => {
                info!(name = %file.name, from = %owner, to = %requester, "File replaced by new owner")
            }
            _ => info!(name = %file.name, peer = %requester, bytes = file.contents.len(), "Added file"),
        }

        Ok(())
    }
}
