use crate::{application::network::interface::TransportError, domain::Instruction};

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    SyncRequest = 1,
    SyncUpToDate = 2,
    SyncItems = 3,
    Add = 4,
    DeleteRequest = 5,
    DeleteResponse = 6,
}

impl TryFrom<u8> for FrameKind {
    type Error = TransportError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::SyncRequest),
            2 => Ok(Self::SyncUpToDate),
            3 => Ok(Self::SyncItems),
            4 => Ok(Self::Add),
            5 => Ok(Self::DeleteRequest),
            6 => Ok(Self::DeleteResponse),
            other => Err(TransportError::decode(format!("invalid frame kind {other}"))),
        }
    }
}

impl From<&Instruction> for FrameKind {
    fn from(value: &Instruction) -> Self {
        use crate::domain::SyncResponse;

        match value {
            Instruction::SyncRequest(_) => Self::SyncRequest,
            Instruction::SyncResponse(SyncResponse::UpToDate) => Self::SyncUpToDate,
            Instruction::SyncResponse(SyncResponse::Items(_)) => Self::SyncItems,
            Instruction::Add(_) => Self::Add,
            Instruction::DeleteRequest(_) => Self::DeleteRequest,
            Instruction::DeleteResponse(_) => Self::DeleteResponse,
        }
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Push = 1,
    Drop = 2,
}

impl TryFrom<u8> for ItemKind {
    type Error = TransportError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Push),
            2 => Ok(Self::Drop),
            other => Err(TransportError::decode(format!("invalid sync item kind {other}"))),
        }
    }
}

impl std::fmt::Display for FrameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameKind::SyncRequest => f.write_str("Sync Request"),
            FrameKind::SyncUpToDate => f.write_str("Sync Up To Date"),
            FrameKind::SyncItems => f.write_str("Sync Items"),
            FrameKind::Add => f.write_str("Add"),
            FrameKind::DeleteRequest => f.write_str("Delete Request"),
            FrameKind::DeleteResponse => f.write_str("Delete Response"),
        }
    }
}
