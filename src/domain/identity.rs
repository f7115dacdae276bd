use serde::{Deserialize, Serialize};
use std::{
    fmt,
    net::{IpAddr, Ipv4Addr, SocketAddr},
};

/// Identity of a client, taken from the address of its connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(IpAddr);

impl ClientId {
    pub const LOCALHOST: ClientId = ClientId(IpAddr::V4(Ipv4Addr::LOCALHOST));

    pub fn new(addr: IpAddr) -> Self {
        Self(addr)
    }
}

impl From<IpAddr> for ClientId {
    fn from(value: IpAddr) -> Self {
        Self(value)
    }
}

// The port changes on every reconnect, only the host identifies a client.
impl From<SocketAddr> for ClientId {
    fn from(value: SocketAddr) -> Self {
        Self(value.ip())
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
