pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;

pub use engine::TypeHierarchyEngine;
pub use error::Result;
