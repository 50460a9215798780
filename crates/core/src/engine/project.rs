use dashmap::DashMap;
use hierscope_api::{ClassName, ClassReader, ElementCache, ProjectId, TypeHierarchyElement};
use std::sync::{Arc, Mutex, PoisonError};

/// Where a walk is allowed to look for elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lookup {
    /// Only elements already in the cache; never invokes the reader.
    CachedOnly,
    /// Cache first, then decode through the reader on a miss.
    Resolve,
}

/// Cache and reader bound to one project.
///
/// The engine hands out `Arc`s to this, so a query that started before an
/// invalidation finishes against the old state while later queries get a
/// fresh one.
pub(crate) struct ProjectHierarchy {
    project: ProjectId,
    cache: Arc<dyn ElementCache>,
    reader: Arc<dyn ClassReader>,
    // Per-name gates so concurrent misses on one class decode it once.
    inflight: DashMap<ClassName, Arc<Mutex<()>>>,
}

impl ProjectHierarchy {
    pub(crate) fn new(
        project: ProjectId,
        cache: Arc<dyn ElementCache>,
        reader: Arc<dyn ClassReader>,
    ) -> Self {
        Self {
            project,
            cache,
            reader,
            inflight: DashMap::new(),
        }
    }

    pub(crate) fn cache(&self) -> &Arc<dyn ElementCache> {
        &self.cache
    }

    pub(crate) fn reader(&self) -> &Arc<dyn ClassReader> {
        &self.reader
    }

    pub(crate) fn element(
        &self,
        name: &ClassName,
        lookup: Lookup,
    ) -> Option<Arc<TypeHierarchyElement>> {
        if let Some(element) = self.cache.get(name) {
            return Some(element);
        }
        match lookup {
            Lookup::CachedOnly => None,
            Lookup::Resolve => self.decode(name),
        }
    }

    fn decode(&self, name: &ClassName) -> Option<Arc<TypeHierarchyElement>> {
        let gate = self.inflight.entry(name.clone()).or_default().value().clone();
        let guard = gate.lock().unwrap_or_else(PoisonError::into_inner);

        // Another caller may have populated the entry while we waited.
        let decoded = match self.cache.get(name) {
            Some(element) => Some(element),
            None => {
                let decoded = self.read_through(name);
                if let Some(element) = &decoded {
                    self.cache.put(name.clone(), element.clone());
                }
                decoded
            }
        };

        drop(guard);
        self.inflight
            .remove_if(name, |_, current| Arc::ptr_eq(current, &gate));
        decoded
    }

    fn read_through(&self, name: &ClassName) -> Option<Arc<TypeHierarchyElement>> {
        tracing::debug!("decoding {} for project {}", name, self.project);
        match self.reader.read(name, &self.project) {
            Ok(Some(element)) if element.name() == name => Some(Arc::new(element)),
            Ok(Some(element)) => {
                tracing::warn!(
                    "reader returned {} when asked for {} in project {}",
                    element.name(),
                    name,
                    self.project
                );
                None
            }
            Ok(None) => {
                tracing::debug!("class {} not found in project {}", name, self.project);
                None
            }
            Err(e) => {
                tracing::warn!(
                    "failed to read {} in project {}: {}",
                    name,
                    self.project,
                    e
                );
                None
            }
        }
    }
}
