use crate::domain::Instruction;
use tokio::io;

/// One end of a client connection, exchanging whole instructions.
#[async_trait::async_trait]
pub trait TransportInterface: Send {
    async fn recv(&mut self) -> TransportResult<Instruction>;

    async fn send(&mut self, instruction: &Instruction) -> TransportResult<()>;
}

pub type TransportResult<T> = Result<T, TransportError>;

#[derive(Debug)]
pub enum TransportError {
    /// I/O failure or the peer went away.
    ConnectionLost(String),
    /// The bytes on the wire aren't a valid instruction.
    Decode(String),
}

impl TransportError {
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn is_connection_lost(&self) -> bool {
        matches!(self, TransportError::ConnectionLost(_))
    }
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::ConnectionLost(s) => write!(f, "connection lost: {s}"),
            TransportError::Decode(s) => write!(f, "decode failure: {s}"),
        }
    }
}

impl std::error::Error for TransportError {}

impl From<TransportError> for io::Error {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::ConnectionLost(s) => io::Error::new(io::ErrorKind::ConnectionAborted, s),
            TransportError::Decode(s) => io::Error::new(io::ErrorKind::InvalidData, s),
        }
    }
}

impl From<io::Error> for TransportError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::InvalidData => Self::Decode(err.to_string()),
            _ => Self::ConnectionLost(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
