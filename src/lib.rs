//! Keeps clients in step with a master file collection held by one server.
//!
//! The server owns a [`FileRegistry`](application::FileRegistry) mapping each
//! file name to the client that added it. Clients reconcile against it with a
//! sync request, push new files, and may delete the files they added.

pub mod application;
pub mod domain;
pub mod infra;
pub mod utils;

#[cfg(test)]
mod tests {
    pub mod tcp;
}
