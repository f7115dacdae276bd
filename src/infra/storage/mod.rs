pub mod disk;
pub mod memory;

pub use disk::DiskStorage;
pub use memory::MemoryStorage;
