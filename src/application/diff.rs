use crate::{
    application::storage::{StorageInterface, interface::StorageError},
    domain::{
        FileName, FilePayload, MAX_FRAME_SIZE, SyncItem, SyncResponse,
        diff::{self, SyncPlan},
    },
};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Turns a registry snapshot and a client's list into the sync response.
///
/// Names whose bytes can't be read, or are too large to fit in one frame, are
/// left out of the response; a single bad entry never fails the whole
/// reconciliation.
pub async fn compute<S: StorageInterface + ?Sized>(
    storage: &S,
    server: &BTreeSet<FileName>,
    client: &[FileName],
) -> SyncResponse {
    let (push, drop) = match diff::plan(server, client) {
        SyncPlan::UpToDate => return SyncResponse::UpToDate,
        SyncPlan::Delta { push, drop } => (push, drop),
    };

    let mut items = Vec::with_capacity(push.len() + drop.len());

    for name in push {
        match storage.read_bytes(&name).await {
            Ok(contents) if contents.len() > MAX_FRAME_SIZE => {
                warn!(
                    name = %name,
                    size = contents.len(),
                    "File exceeds the frame ceiling, skipping push"
                );
            }
            Ok(contents) => items.push(SyncItem::FilePush(FilePayload::new(name, contents))),
            Err(StorageError::NotFound) => {
                debug!(name = %name, "Registered file missing from storage, skipping push");
            }
            Err(err) => {
                warn!(name = %name, "Failed to read file for sync: {err}");
            }
        }
    }

    items.extend(drop.into_iter().map(SyncItem::FileDrop));

    SyncResponse::Items(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::storage::memory::MemoryStorage;

    fn name(s: &str) -> FileName {
        FileName::new(s).unwrap()
    }

    fn set(list: &[&str]) -> BTreeSet<FileName> {
        list.iter().map(|n| name(n)).collect()
    }

    #[tokio::test]
    async fn test_up_to_date_reads_nothing() {
        let storage = MemoryStorage::failing_reads();

        let response = compute(&storage, &set(&["a.txt"]), &[name("a.txt")]).await;
        assert_eq!(response, SyncResponse::UpToDate);
    }

    #[tokio::test]
    async fn test_pushes_before_drops() {
        let storage = MemoryStorage::new();
        storage.insert(name("new.png"), b"png".to_vec()).await;

        let response = compute(&storage, &set(&["new.png"]), &[name("old.png")]).await;

        assert_eq!(
            response,
            SyncResponse::Items(vec![
                SyncItem::FilePush(FilePayload::new(name("new.png"), b"png".to_vec())),
                SyncItem::FileDrop(name("old.png")),
            ])
        );
    }

    #[tokio::test]
    async fn test_missing_storage_is_omitted() {
        let storage = MemoryStorage::new();
        storage.insert(name("kept.txt"), b"kept".to_vec()).await;

        let response = compute(&storage, &set(&["gone.txt", "kept.txt"]), &[]).await;

        assert_eq!(
            response,
            SyncResponse::Items(vec![SyncItem::FilePush(FilePayload::new(
                name("kept.txt"),
                b"kept".to_vec()
            ))])
        );
    }

    #[tokio::test]
    async fn test_read_failure_only_drops_that_item() {
        let storage = MemoryStorage::failing_reads_for([name("broken.txt")]);
        storage.insert(name("broken.txt"), b"broken".to_vec()).await;
        storage.insert(name("fine.txt"), b"fine".to_vec()).await;

        let response = compute(
            &storage,
            &set(&["broken.txt", "fine.txt"]),
            &[name("stale.txt")],
        )
        .await;

        assert_eq!(
            response,
            SyncResponse::Items(vec![
                SyncItem::FilePush(FilePayload::new(name("fine.txt"), b"fine".to_vec())),
                SyncItem::FileDrop(name("stale.txt")),
            ])
        );
    }

    #[tokio::test]
    async fn test_oversized_file_is_omitted() {
        let storage = MemoryStorage::new();
        storage
            .insert(name("big.bin"), vec![0; MAX_FRAME_SIZE + 1])
            .await;
        storage.insert(name("small.txt"), b"small".to_vec()).await;

        let response = compute(&storage, &set(&["big.bin", "small.txt"]), &[]).await;

        assert_eq!(
            response,
            SyncResponse::Items(vec![SyncItem::FilePush(FilePayload::new(
                name("small.txt"),
                b"small".to_vec()
            ))])
        );
    }
}
