pub mod cache;
pub mod error;
pub mod models;
pub mod reader;

// Re-export commonly used types
pub use cache::{CacheStats, ElementCache, ElementCacheFactory};
pub use error::{ReadResult, ReaderError};
pub use models::*;
pub use reader::{ClassReader, ClassReaderFactory};
