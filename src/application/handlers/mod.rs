mod add;
mod delete;
mod sync;

use crate::application::{registry::FileRegistry, storage::StorageInterface};
use std::sync::Arc;

/// Server side of the three client instructions, shared by every session.
pub struct InstructionHandler<S: StorageInterface> {
    registry: Arc<FileRegistry>,
    storage: Arc<S>,
}

impl<S: StorageInterface> InstructionHandler<S> {
    pub fn new(registry: Arc<FileRegistry>, storage: Arc<S>) -> Arc<Self> {
        Arc::new(Self { registry, storage })
    }

    pub fn registry(&self) -> &Arc<FileRegistry> {
        &self.registry
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use super::*;
    use crate::{
        domain::{ClientId, FileName},
        infra::storage::MemoryStorage,
    };
    use std::net::{IpAddr, Ipv4Addr};

    pub fn name(s: &str) -> FileName {
        FileName::new(s).unwrap()
    }

    pub fn client(last: u8) -> ClientId {
        ClientId::new(IpAddr::V4(Ipv4Addr::new(192, 168, 1, last)))
    }

    pub fn handler_with(storage: MemoryStorage) -> Arc<InstructionHandler<MemoryStorage>> {
        InstructionHandler::new(FileRegistry::new(), Arc::new(storage))
    }

    pub fn handler() -> Arc<InstructionHandler<MemoryStorage>> {
        handler_with(MemoryStorage::new())
    }
}
