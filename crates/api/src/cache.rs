use crate::models::{ClassName, ProjectId, TypeHierarchyElement};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Statistics for one project's element cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub project: ProjectId,
    pub cached_elements: usize,
}

/// Memoization table from class name to decoded element.
///
/// Shared between concurrent queries of the same project, so implementations
/// must be safe to call from several threads at once.
pub trait ElementCache: Send + Sync {
    /// Look up a previously stored element. Never triggers a read.
    fn get(&self, name: &ClassName) -> Option<Arc<TypeHierarchyElement>>;

    /// Store an element; later `get`s for `name` return it.
    fn put(&self, name: ClassName, element: Arc<TypeHierarchyElement>);

    /// Number of cached elements
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Creates the element cache used for one project.
pub trait ElementCacheFactory: Send + Sync {
    fn create_cache(&self, project: &ProjectId) -> Arc<dyn ElementCache>;
}
