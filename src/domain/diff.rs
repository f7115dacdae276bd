use crate::domain::FileName;
use std::collections::{BTreeSet, HashSet};

/// Set difference between the registry and what a client claims to hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncPlan {
    UpToDate,
    Delta {
        push: Vec<FileName>,
        drop: Vec<FileName>,
    },
}

/// Compares the two sides as sets, ignoring order and duplicates.
///
/// Pushes come out in registry order, drops in the order the client listed them.
pub fn plan(server: &BTreeSet<FileName>, client: &[FileName]) -> SyncPlan {
    let client_set: HashSet<&FileName> = client.iter().collect();

    if client_set.len() == server.len() && server.iter().all(|name| client_set.contains(name)) {
        return SyncPlan::UpToDate;
    }

    let push = server
        .iter()
        .filter(|name| !client_set.contains(name))
        .cloned()
        .collect();

    let mut seen = HashSet::new();
    let drop = client
        .iter()
        .filter(|name| !server.contains(*name) && seen.insert(*name))
        .cloned()
        .collect();

    SyncPlan::Delta { push, drop }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<FileName> {
        list.iter().map(|n| FileName::new(*n).unwrap()).collect()
    }

    fn set(list: &[&str]) -> BTreeSet<FileName> {
        names(list).into_iter().collect()
    }

    #[test]
    fn test_equal_sets_are_up_to_date() {
        assert_eq!(plan(&set(&[]), &[]), SyncPlan::UpToDate);
        assert_eq!(
            plan(&set(&["a.txt", "b.txt"]), &names(&["b.txt", "a.txt"])),
            SyncPlan::UpToDate
        );
    }

    #[test]
    fn test_duplicates_in_client_list_are_ignored() {
        assert_eq!(
            plan(&set(&["a.txt"]), &names(&["a.txt", "a.txt"])),
            SyncPlan::UpToDate
        );

        assert_eq!(
            plan(&set(&[]), &names(&["old.png", "old.png"])),
            SyncPlan::Delta {
                push: vec![],
                drop: names(&["old.png"]),
            }
        );
    }

    #[test]
    fn test_missing_and_stale_names() {
        let result = plan(
            &set(&["dust.jpg", "a.txt", "shared.md"]),
            &names(&["zeta.png", "shared.md", "old.png"]),
        );

        assert_eq!(
            result,
            SyncPlan::Delta {
                push: names(&["a.txt", "dust.jpg"]),
                drop: names(&["zeta.png", "old.png"]),
            }
        );
    }

    #[test]
    fn test_subset_only_pushes() {
        assert_eq!(
            plan(&set(&["dust.jpg"]), &[]),
            SyncPlan::Delta {
                push: names(&["dust.jpg"]),
                drop: vec![],
            }
        );
    }
}
