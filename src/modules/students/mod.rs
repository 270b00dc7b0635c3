pub mod controller;
pub mod memory_store;
pub mod model;
pub mod pg_store;
pub mod router;
pub mod service;
pub mod store;

pub use memory_store::MemoryStudentStore;
pub use pg_store::PgStudentStore;
pub use store::StudentStore;
