//! Element caches for decoded type hierarchy information.

mod element_cache;

pub use element_cache::{DirectElementCache, DirectElementCacheFactory};
