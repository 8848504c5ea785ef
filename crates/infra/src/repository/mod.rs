//! Event repository implementations

pub mod memory;

pub use memory::InMemoryEventRepository;
