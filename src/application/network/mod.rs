pub mod interface;

pub use interface::TransportInterface;
