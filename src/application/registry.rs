use crate::domain::{ClientId, FileName};
use std::{
    collections::{BTreeSet, HashMap},
    sync::Arc,
};
use tokio::sync::{Mutex, MutexGuard};

/// Who owns which file. Shared by every session; each call takes the lock once.
#[derive(Default)]
pub struct FileRegistry {
    files: Mutex<HashMap<FileName, ClientId>>,
}

/// Result of checking a name against a requester, in the order it must be decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    Absent,
    NotOwner(ClientId),
    Owner,
}

impl FileRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_seed(seed: impl IntoIterator<Item = (FileName, ClientId)>) -> Arc<Self> {
        Arc::new(Self {
            files: Mutex::new(seed.into_iter().collect()),
        })
    }

    /// Records `owner` for `name`, returning the previous owner.
    pub async fn put(&self, name: FileName, owner: ClientId) -> Option<ClientId> {
        self.files.lock().await.insert(name, owner)
    }

    pub async fn get(&self, name: &FileName) -> Option<ClientId> {
        self.files.lock().await.get(name).copied()
    }

    pub async fn remove(&self, name: &FileName) -> Option<ClientId> {
        self.files.lock().await.remove(name)
    }

    /// Point-in-time copy of every registered name.
    pub async fn snapshot(&self) -> BTreeSet<FileName> {
        self.files.lock().await.keys().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.files.lock().await.len()
    }

    /// Holds the registry lock until the guard is dropped, for decisions that
    /// must read and write in one critical section.
    pub async fn lock(&self) -> RegistryGuard<'_> {
        RegistryGuard {
            files: self.files.lock().await,
        }
    }
}

pub struct RegistryGuard<'a> {
    files: MutexGuard<'a, HashMap<FileName, ClientId>>,
}

impl RegistryGuard<'_> {
    pub fn ownership(&self, name: &FileName, requester: ClientId) -> Ownership {
        match self.files.get(name) {
            None => Ownership::Absent,
            Some(owner) if *owner != requester => Ownership::NotOwner(*owner),
            Some(_) => Ownership::Owner,
        }
    }

    pub fn remove(&mut self, name: &FileName) -> Option<ClientId> {
        self.files.remove(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    fn name(s: &str) -> FileName {
        FileName::new(s).unwrap()
    }

    fn client(last: u8) -> ClientId {
        ClientId::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, last)))
    }

    #[tokio::test]
    async fn test_put_replaces_owner() {
        let registry = FileRegistry::new();

        assert_eq!(registry.put(name("a.txt"), client(1)).await, None);
        assert_eq!(registry.put(name("a.txt"), client(2)).await, Some(client(1)));
        assert_eq!(registry.get(&name("a.txt")).await, Some(client(2)));
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_snapshot_is_detached() {
        let registry = FileRegistry::with_seed([(name("dust.jpg"), ClientId::LOCALHOST)]);

        let snapshot = registry.snapshot().await;
        registry.remove(&name("dust.jpg")).await;

        assert!(snapshot.contains(&name("dust.jpg")));
        assert!(registry.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_ownership_is_three_way() {
        let registry = FileRegistry::with_seed([(name("a.txt"), client(1))]);
        let mut guard = registry.lock().await;

        assert_eq!(guard.ownership(&name("b.txt"), client(1)), Ownership::Absent);
        assert_eq!(
            guard.ownership(&name("a.txt"), client(2)),
            Ownership::NotOwner(client(1))
        );
        assert_eq!(guard.ownership(&name("a.txt"), client(1)), Ownership::Owner);

        assert_eq!(guard.remove(&name("a.txt")), Some(client(1)));
        assert_eq!(guard.ownership(&name("a.txt"), client(1)), Ownership::Absent);
    }

    #[tokio::test]
    async fn test_concurrent_puts_keep_one_owner_per_name() {
        let registry = FileRegistry::new();

        let tasks: Vec<_> = (0..32u8)
            .map(|i| {
                let registry = registry.clone();
                tokio::spawn(async move {
                    registry.put(name(&format!("f{}.txt", i % 4)), client(i)).await;
                })
            })
            .collect();

        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(registry.len().await, 4);
    }
}
