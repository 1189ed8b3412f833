//! Process-local task storage.

mod repository;

pub use repository::InMemoryTaskRepository;
