pub mod adapter;
pub mod codec;
pub mod kind;

pub use adapter::TcpAdapter;

use crate::domain::ClientId;
use std::net::SocketAddr;
use tokio::{
    io,
    net::{TcpListener, TcpStream, ToSocketAddrs},
};
use tracing::debug;

pub struct TcpServer {
    listener: TcpListener,
}

impl TcpServer {
    pub async fn bind(addr: impl ToSocketAddrs) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub async fn accept(&self) -> io::Result<(TcpAdapter, ClientId)> {
        let (stream, addr) = self.listener.accept().await?;
        stream.set_nodelay(true)?;

        debug!(addr = %addr, "Accepted connection");
        Ok((TcpAdapter::new(stream), ClientId::from(addr)))
    }
}

pub async fn connect(addr: impl ToSocketAddrs) -> io::Result<TcpAdapter> {
    let stream = TcpStream::connect(addr).await?;
    stream.set_nodelay(true)?;

    Ok(TcpAdapter::new(stream))
}
