use crate::{
    application::{diff, handlers::InstructionHandler, storage::StorageInterface},
    domain::{FileName, SyncResponse},
};

impl<S: StorageInterface> InstructionHandler<S> {
    /// Reconciles a client's list against a registry snapshot. Read only.
    pub async fn sync(&self, known: &[FileName]) -> SyncResponse {
        let snapshot = self.registry.snapshot().await;

        diff::compute(self.storage.as_ref(), &snapshot, known).await
    }
}
