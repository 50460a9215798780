//! Type hierarchy engine
//!
//! Answers "does A extend B" and "does A implement I" for one project at a
//! time. Each project gets its own element cache and class reader, created
//! lazily from the configured factories on the first query and dropped when
//! the project's cache is cleared.
//!
//! Class names are accepted in qualified form (`org.sub.ClassB`,
//! `org.Outer$Inner`) and returned the same way.

mod project;
mod walk;

use crate::cache::DirectElementCacheFactory;
use crate::error::{HierscopeError, Result};
use dashmap::DashMap;
use hierscope_api::{
    CacheStats, ClassName, ClassReaderFactory, ElementCacheFactory, ProjectId,
    TypeHierarchyElement,
};
use project::{Lookup, ProjectHierarchy};
use std::sync::Arc;

pub struct TypeHierarchyEngine {
    reader_factory: Arc<dyn ClassReaderFactory>,
    cache_factory: Arc<dyn ElementCacheFactory>,
    projects: DashMap<ProjectId, Arc<ProjectHierarchy>>,
}

impl TypeHierarchyEngine {
    /// Engine with the given reader factory and in-memory element caches.
    pub fn new(reader_factory: Arc<dyn ClassReaderFactory>) -> Self {
        Self {
            reader_factory,
            cache_factory: Arc::new(DirectElementCacheFactory),
            projects: DashMap::new(),
        }
    }

    pub fn with_cache_factory(mut self, cache_factory: Arc<dyn ElementCacheFactory>) -> Self {
        self.cache_factory = cache_factory;
        self
    }

    /// Replace the reader factory.
    ///
    /// Projects that already have a reader keep it until their cache is
    /// cleared.
    pub fn set_class_reader_factory(&mut self, reader_factory: Arc<dyn ClassReaderFactory>) {
        self.reader_factory = reader_factory;
    }

    /// Replace the cache factory. Existing caches are kept until cleared.
    pub fn set_element_cache_factory(&mut self, cache_factory: Arc<dyn ElementCacheFactory>) {
        self.cache_factory = cache_factory;
    }

    /// Direct superclass of `class_name`.
    ///
    /// `None` for the universal root and for classes that cannot be resolved.
    pub fn get_supertype(&self, project: &ProjectId, class_name: &str) -> Result<Option<String>> {
        let class = parse_name(project, class_name)?;
        let element = self.element_for(project, &class);
        Ok(element
            .and_then(|e| e.superclass_name().cloned())
            .map(|name| name.to_qualified()))
    }

    /// Directly declared interfaces of `class_name`, in declaration order.
    ///
    /// `None` when the class cannot be resolved.
    pub fn get_interfaces(
        &self,
        project: &ProjectId,
        class_name: &str,
    ) -> Result<Option<Vec<String>>> {
        let class = parse_name(project, class_name)?;
        let element = self.element_for(project, &class);
        Ok(element.map(|e| qualified(e.interface_names())))
    }

    /// Whether `class_name` is `ancestor` or has it in its superclass chain.
    pub fn does_extend(&self, project: &ProjectId, class_name: &str, ancestor: &str) -> Result<bool> {
        let class = parse_name(project, class_name)?;
        let ancestor = parse_name(project, ancestor)?;
        let hierarchy = self.hierarchy(project);
        Ok(walk::does_extend(&hierarchy, &class, &ancestor))
    }

    /// Whether `class_name` implements `interface`, directly, through a
    /// superclass, or through any super-interface.
    pub fn does_implement(
        &self,
        project: &ProjectId,
        class_name: &str,
        interface: &str,
    ) -> Result<bool> {
        let class = parse_name(project, class_name)?;
        let interface = parse_name(project, interface)?;
        let hierarchy = self.hierarchy(project);
        Ok(walk::does_implement(&hierarchy, &class, &interface))
    }

    /// Superclass names from the direct superclass upward.
    pub fn superclass_chain(&self, project: &ProjectId, class_name: &str) -> Result<Vec<String>> {
        let class = parse_name(project, class_name)?;
        let hierarchy = self.hierarchy(project);
        Ok(qualified(&walk::superclass_chain(&hierarchy, &class)))
    }

    /// Every interface `class_name` implements, directly or transitively.
    pub fn all_interfaces(&self, project: &ProjectId, class_name: &str) -> Result<Vec<String>> {
        let class = parse_name(project, class_name)?;
        let hierarchy = self.hierarchy(project);
        Ok(qualified(&walk::all_interfaces(&hierarchy, &class)))
    }

    /// The decoded element for `class_name`, reading it if necessary.
    pub fn element(
        &self,
        project: &ProjectId,
        class_name: &str,
    ) -> Result<Option<Arc<TypeHierarchyElement>>> {
        let class = parse_name(project, class_name)?;
        Ok(self.element_for(project, &class))
    }

    /// Release resources held by the project's reader. Cached elements stay.
    pub fn cleanup(&self, project: &ProjectId) {
        if let Some(hierarchy) = self.projects.get(project) {
            hierarchy.reader().cleanup();
        }
    }

    /// Drop the project's cache and reader.
    ///
    /// Queries issued after this returns start from an empty cache.
    pub fn clear_cache(&self, project: &ProjectId) {
        if let Some((_, hierarchy)) = self.projects.remove(project) {
            hierarchy.reader().cleanup();
            tracing::info!(
                "cleared {} cached elements for project {}",
                hierarchy.cache().len(),
                project
            );
        }
    }

    /// Drop every project's cache and reader.
    pub fn clear_all(&self) {
        let projects: Vec<ProjectId> = self.projects.iter().map(|e| e.key().clone()).collect();
        for project in projects {
            self.clear_cache(&project);
        }
    }

    pub fn cache_stats(&self, project: &ProjectId) -> CacheStats {
        CacheStats {
            project: project.clone(),
            cached_elements: self
                .projects
                .get(project)
                .map(|hierarchy| hierarchy.cache().len())
                .unwrap_or(0),
        }
    }

    fn element_for(
        &self,
        project: &ProjectId,
        class: &ClassName,
    ) -> Option<Arc<TypeHierarchyElement>> {
        self.hierarchy(project).element(class, Lookup::Resolve)
    }

    fn hierarchy(&self, project: &ProjectId) -> Arc<ProjectHierarchy> {
        if let Some(existing) = self.projects.get(project) {
            return existing.value().clone();
        }
        self.projects
            .entry(project.clone())
            .or_insert_with(|| {
                tracing::debug!("creating type hierarchy cache for project {}", project);
                Arc::new(ProjectHierarchy::new(
                    project.clone(),
                    self.cache_factory.create_cache(project),
                    self.reader_factory.create_reader(project),
                ))
            })
            .value()
            .clone()
    }
}

fn parse_name(project: &ProjectId, class_name: &str) -> Result<ClassName> {
    if project.is_empty() {
        return Err(HierscopeError::InvalidArgument(
            "project id must not be empty".to_string(),
        ));
    }
    let trimmed = class_name.trim();
    if trimmed.is_empty() {
        return Err(HierscopeError::InvalidArgument(
            "class name must not be empty".to_string(),
        ));
    }
    Ok(ClassName::from_qualified(trimmed))
}

fn qualified(names: &[ClassName]) -> Vec<String> {
    names.iter().map(ClassName::to_qualified).collect()
}
