pub mod initialize;
pub mod log;
pub mod memory;
pub mod migrate;
pub mod pool;
pub mod queries;
pub mod source;
pub mod stats;

pub use memory::MemoryStore;
pub use queries::SqliteStore;
pub use source::{StoreSource, TimeRange};
