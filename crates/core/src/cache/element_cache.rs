use dashmap::DashMap;
use hierscope_api::{ClassName, ElementCache, ElementCacheFactory, ProjectId, TypeHierarchyElement};
use std::sync::Arc;

/// In-memory element cache backed by a concurrent map.
///
/// Lives as long as the owning project's entry in the engine; dropping the
/// entry is how the cache is invalidated.
#[derive(Debug, Default)]
pub struct DirectElementCache {
    elements: DashMap<ClassName, Arc<TypeHierarchyElement>>,
}

impl DirectElementCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ElementCache for DirectElementCache {
    fn get(&self, name: &ClassName) -> Option<Arc<TypeHierarchyElement>> {
        self.elements.get(name).map(|entry| entry.value().clone())
    }

    fn put(&self, name: ClassName, element: Arc<TypeHierarchyElement>) {
        self.elements.insert(name, element);
    }

    fn len(&self) -> usize {
        self.elements.len()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DirectElementCacheFactory;

impl ElementCacheFactory for DirectElementCacheFactory {
    fn create_cache(&self, _project: &ProjectId) -> Arc<dyn ElementCache> {
        Arc::new(DirectElementCache::new())
    }
}
