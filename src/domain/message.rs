use crate::domain::FileName;

/// Upper bound for any single length on the wire, file contents included.
pub const MAX_FRAME_SIZE: usize = 64 * 1024 * 1024;

/// One message exchanged over a client connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    SyncRequest(Vec<FileName>),
    SyncResponse(SyncResponse),
    Add(FilePayload),
    DeleteRequest(FileName),
    DeleteResponse(DeleteOutcome),
}

impl Instruction {
    pub fn kind(&self) -> &'static str {
        match self {
            Instruction::SyncRequest(_) => "Sync Request",
            Instruction::SyncResponse(_) => "Sync Response",
            Instruction::Add(_) => "Add",
            Instruction::DeleteRequest(_) => "Delete Request",
            Instruction::DeleteResponse(_) => "Delete Response",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncResponse {
    UpToDate,
    Items(Vec<SyncItem>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncItem {
    FilePush(FilePayload),
    FileDrop(FileName),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    pub name: FileName,
    pub contents: Vec<u8>,
}

impl FilePayload {
    pub fn new(name: FileName, contents: Vec<u8>) -> Self {
        Self { name, contents }
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    NotFound = 0,
    Forbidden = 1,
    Removed = 2,
}

impl TryFrom<u8> for DeleteOutcome {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::NotFound),
            1 => Ok(Self::Forbidden),
            2 => Ok(Self::Removed),
            other => Err(other),
        }
    }
}

impl std::fmt::Display for DeleteOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteOutcome::NotFound => f.write_str("Not Found"),
            DeleteOutcome::Forbidden => f.write_str("Forbidden"),
            DeleteOutcome::Removed => f.write_str("Removed"),
        }
    }
}
