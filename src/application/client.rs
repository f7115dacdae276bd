use crate::{
    application::{
        network::{TransportInterface, interface::TransportError},
        storage::{StorageInterface, interface::StorageError},
    },
    domain::{DeleteOutcome, FileName, FilePayload, Instruction, SyncItem, SyncResponse},
};
use tracing::{error, info, warn};

/// Client half of the protocol: keeps the list of files this client believes
/// it holds and applies what the server tells it.
pub struct SyncClient<T: TransportInterface, S: StorageInterface> {
    transport: T,
    storage: S,
    known: Vec<FileName>,
    remove_dropped_files: bool,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub up_to_date: bool,
    pub pushed: Vec<FileName>,
    pub dropped: Vec<FileName>,
    /// Pushed files that couldn't be written locally.
    pub failed: Vec<FileName>,
}

#[derive(Debug)]
pub enum ClientError {
    Transport(TransportError),
    Storage(StorageError),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl<T: TransportInterface, S: StorageInterface> SyncClient<T, S> {
    pub fn new(transport: T, storage: S, known: Vec<FileName>) -> Self {
        Self {
            transport,
            storage,
            known,
            remove_dropped_files: false,
        }
    }

    /// Starts from whatever is already in local storage.
    pub async fn from_storage(transport: T, storage: S) -> ClientResult<Self> {
        let known = storage.list().await?;
        Ok(Self::new(transport, storage, known))
    }

    pub fn remove_dropped_files(mut self, remove: bool) -> Self {
        self.remove_dropped_files = remove;
        self
    }

    pub fn known(&self) -> &[FileName] {
        &self.known
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub async fn sync(&mut self) -> ClientResult<SyncReport> {
        self.transport
            .send(&Instruction::SyncRequest(self.known.clone()))
            .await?;

        let items = match self.transport.recv().await? {
            Instruction::SyncResponse(SyncResponse::UpToDate) => {
                info!(files = self.known.len(), "✅ Up to date");
                return Ok(SyncReport {
                    up_to_date: true,
                    ..Default::default()
                });
            }
            Instruction::SyncResponse(SyncResponse::Items(items)) => items,
            other => return Err(unexpected(&other).into()),
        };

        let mut report = SyncReport::default();
        for item in items {
            match item {
                SyncItem::FilePush(file) => self.apply_push(file, &mut report).await,
                SyncItem::FileDrop(name) => self.apply_drop(name, &mut report).await,
            }
        }

        info!(
            pushed = report.pushed.len(),
            dropped = report.dropped.len(),
            failed = report.failed.len(),
            "🔁 Finished syncing"
        );
        Ok(report)
    }

    async fn apply_push(&mut self, file: FilePayload, report: &mut SyncReport) {
        if let Err(err) = self.storage.write_bytes(&file.name, &file.contents).await {
            error!(name = %file.name, "Failed to write pushed file: {err}");
            report.failed.push(file.name);
            return;
        }

        if !self.known.contains(&file.name) {
            self.known.push(file.name.clone());
        }

        info!(name = %file.name, "Added");
        report.pushed.push(file.name);
    }

    async fn apply_drop(&mut self, name: FileName, report: &mut SyncReport) {
        self.known.retain(|known| *known != name);

        if self.remove_dropped_files {
            match self.storage.delete(&name).await {
                Ok(()) | Err(StorageError::NotFound) => {}
                Err(err) => warn!(name = %name, "Failed to remove dropped file: {err}"),
            }
        }

        info!(name = %name, "Removed");
        report.dropped.push(name);
    }

    /// Uploads a local file. The server doesn't acknowledge adds, so the file
    /// is recorded as known as soon as it is sent.
    pub async fn add(&mut self, name: &FileName) -> ClientResult<()> {
        let contents = self.storage.read_bytes(name).await?;

        self.transport
            .send(&Instruction::Add(FilePayload::new(name.clone(), contents)))
            .await?;

        if !self.known.contains(name) {
            self.known.push(name.clone());
        }
        Ok(())
    }

    /// Asks the server to delete a file this client added. Local state only
    /// changes when the server confirms the removal.
    pub async fn delete(&mut self, name: &FileName) -> ClientResult<DeleteOutcome> {
        self.transport
            .send(&Instruction::DeleteRequest(name.clone()))
            .await?;

        let outcome = match self.transport.recv().await? {
            Instruction::DeleteResponse(outcome) => outcome,
            other => return Err(unexpected(&other).into()),
        };

        if outcome == DeleteOutcome::Removed {
            self.known.retain(|known| known != name);

            match self.storage.delete(name).await {
                Ok(()) | Err(StorageError::NotFound) => {}
                Err(err) => warn!(name = %name, "Failed to remove local copy: {err}"),
            }
        }

        info!(name = %name, outcome = %outcome, "Delete finished");
        Ok(outcome)
    }
}

fn unexpected(instruction: &Instruction) -> TransportError {
    TransportError::decode(format!("unexpected {} from server", instruction.kind()))
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Transport(err) => err.fmt(f),
            ClientError::Storage(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<TransportError> for ClientError {
    fn from(err: TransportError) -> Self {
        Self::Transport(err)
    }
}

impl From<StorageError> for ClientError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

impl From<ClientError> for tokio::io::Error {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Transport(err) => err.into(),
            ClientError::Storage(err) => err.into(),
        }
    }
}
