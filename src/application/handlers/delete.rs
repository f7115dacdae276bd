use crate::{
    application::{
        handlers::InstructionHandler,
        registry::Ownership,
        storage::{StorageInterface, interface::StorageError},
    },
    domain::{ClientId, DeleteOutcome, FileName},
};
use tracing::{error, info, warn};

impl<S: StorageInterface> InstructionHandler<S> {
    /// Removes a file on behalf of its owner.
    ///
    /// The registry lock is held from the ownership check until the entry is
    /// gone, so a concurrent re-add can't slip in between.
    ///
    /// A file already missing from storage still counts as `Removed`. Any other
    /// storage failure leaves the entry registered and answers `Forbidden`, the
    /// same outcome a non-owner gets, since nothing changed.
    pub async fn delete(&self, requester: ClientId, name: &FileName) -> DeleteOutcome {
        let mut files = self.registry.lock().await;

        match files.ownership(name, requester) {
            Ownership::Absent => DeleteOutcome::NotFound,

            Ownership::NotOwner(owner) => {
                warn!(name = %name, peer = %requester, owner = %owner, "Refused delete by non-owner");
                DeleteOutcome::Forbidden
            }

            Ownership::Owner => match self.storage.delete(name).await {
                Ok(()) | Err(StorageError::NotFound) => {
                    files.remove(name);
                    info!(name = %name, peer = %requester, "Removed file");
                    DeleteOutcome::Removed
                }
                Err(err) => {
                    // Registry untouched, so report that nothing changed.
                    error!(name = %name, peer = %requester, "Failed to delete file from storage: {err}");
                    DeleteOutcome::Forbidden
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        application::{
            handlers::test_utils::{client, handler, handler_with, name},
            storage::StorageInterface,
        },
        domain::{DeleteOutcome, FilePayload},
        infra::storage::MemoryStorage,
    };

    #[tokio::test]
    async fn test_delete_absent_is_not_found() {
        let handler = handler();

        assert_eq!(
            handler.delete(client(1), &name("ghost.txt")).await,
            DeleteOutcome::NotFound
        );
        assert!(handler.registry().snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_non_owner_is_forbidden_and_nothing_changes() {
        let handler = handler();
        handler
            .add(client(1), FilePayload::new(name("a.txt"), b"a".to_vec()))
            .await
            .unwrap();

        assert_eq!(
            handler.delete(client(2), &name("a.txt")).await,
            DeleteOutcome::Forbidden
        );
        assert_eq!(handler.registry().get(&name("a.txt")).await, Some(client(1)));
        assert!(handler.storage().exists(&name("a.txt")).await);
    }

    #[tokio::test]
    async fn test_owner_removes_from_registry_and_storage() {
        let handler = handler();
        handler
            .add(client(1), FilePayload::new(name("a.txt"), b"a".to_vec()))
            .await
            .unwrap();

        assert_eq!(
            handler.delete(client(1), &name("a.txt")).await,
            DeleteOutcome::Removed
        );
        assert_eq!(handler.registry().get(&name("a.txt")).await, None);
        assert!(!handler.storage().exists(&name("a.txt")).await);

        assert_eq!(
            handler.delete(client(1), &name("a.txt")).await,
            DeleteOutcome::NotFound
        );
    }

    #[tokio::test]
    async fn test_owner_delete_with_file_already_gone() {
        let handler = handler();
        handler.registry().put(name("seeded.jpg"), client(1)).await;

        assert_eq!(
            handler.delete(client(1), &name("seeded.jpg")).await,
            DeleteOutcome::Removed
        );
        assert_eq!(handler.registry().get(&name("seeded.jpg")).await, None);
    }

    #[tokio::test]
    async fn test_storage_failure_keeps_registry_entry() {
        let handler = handler_with(MemoryStorage::failing_deletes());
        handler
            .add(client(1), FilePayload::new(name("a.txt"), b"a".to_vec()))
            .await
            .unwrap();

        assert_eq!(
            handler.delete(client(1), &name("a.txt")).await,
            DeleteOutcome::Forbidden
        );
        assert_eq!(handler.registry().get(&name("a.txt")).await, Some(client(1)));
    }

    #[tokio::test]
    async fn test_concurrent_deletes_remove_once() {
        let handler = handler();
        handler
            .add(client(1), FilePayload::new(name("a.txt"), b"a".to_vec()))
            .await
            .unwrap();

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let handler = handler.clone();
                tokio::spawn(async move { handler.delete(client(1), &name("a.txt")).await })
            })
            .collect();

        let mut removed = 0;
        for task in tasks {
            match task.await.unwrap() {
                DeleteOutcome::Removed => removed += 1,
                outcome => assert_eq!(outcome, DeleteOutcome::NotFound),
            }
        }

        assert_eq!(removed, 1);
    }
}
