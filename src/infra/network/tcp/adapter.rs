use crate::{
    application::network::{TransportInterface, interface::TransportResult},
    domain::Instruction,
    infra::network::tcp::codec,
};
use tokio::{
    io::{AsyncRead, AsyncWrite, BufReader},
    net::TcpStream,
};

/// Instruction transport over any byte stream; a TCP socket in production.
pub struct TcpAdapter<T = TcpStream> {
    stream: BufReader<T>,
}

impl<T: AsyncRead + AsyncWrite + Unpin + Send> TcpAdapter<T> {
    pub fn new(stream: T) -> Self {
        Self {
            stream: BufReader::new(stream),
        }
    }
}

#[async_trait::async_trait]
impl<T: AsyncRead + AsyncWrite + Unpin + Send> TransportInterface for TcpAdapter<T> {
    async fn recv(&mut self) -> TransportResult<Instruction> {
        codec::read_instruction(&mut self.stream).await
    }

    async fn send(&mut self, instruction: &Instruction) -> TransportResult<()> {
        codec::write_instruction(&mut self.stream, instruction).await
    }
}
