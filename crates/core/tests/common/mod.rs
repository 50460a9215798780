#![allow(dead_code)]

use hierscope_api::{
    ClassName, ClassReader, ClassReaderFactory, ElementCache, ElementCacheFactory, ProjectId,
    ReadResult, ReaderError, TypeHierarchyElement,
};
use hierscope_core::TypeHierarchyEngine;
use hierscope_core::cache::DirectElementCache;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const OBJECT: &str = "java/lang/Object";

fn el(name: &str, superclass: Option<&str>, interfaces: &[&str]) -> TypeHierarchyElement {
    TypeHierarchyElement::new(
        ClassName::new(name),
        superclass.map(ClassName::new),
        interfaces.iter().map(ClassName::new).collect(),
    )
}

/// The fixture workspace shared by most engine tests.
pub fn sample_world() -> Vec<TypeHierarchyElement> {
    let object = Some(OBJECT);
    vec![
        el(OBJECT, None, &[]),
        el("java/io/Serializable", object, &[]),
        el("org/SimpleClass", object, &[]),
        el("org/SimpleInterface", object, &[]),
        el("org/Subclass", Some("org/SimpleClass"), &[]),
        el("org/CombinedSubclass", Some("org/SimpleClass"), &["org/SimpleInterface"]),
        el("org/SubInterface", object, &["org/SimpleInterface"]),
        el(
            "org/ClassImplementingInterfaceThroughSubInterface",
            object,
            &["org/SubInterface"],
        ),
        el("DefaultPackageClass", Some("org/SimpleClass"), &[]),
        el("org/ClassA", object, &[]),
        el("org/InterfaceA", object, &[]),
        el("org/InterfaceB", object, &[]),
        el("org/InterfaceC", object, &[]),
        el("org/InterfaceD", object, &[]),
        el("org/sub/InterfaceAB", object, &["org/InterfaceA", "org/InterfaceB"]),
        el("org/sub/InterfaceCD", object, &["org/InterfaceC", "org/InterfaceD"]),
        el("org/sub/ClassB", Some("org/ClassA"), &["org/sub/InterfaceAB"]),
        el("org/sub/ClassABCD", Some("org/sub/ClassB"), &["org/sub/InterfaceCD"]),
        el("org/OuterClassA$InnerClassA", object, &["org/SimpleInterface"]),
        el("org/OuterClassB$InnerClassB", object, &[]),
        el("org/OuterClassB$InnerInterfaceB", object, &[]),
        el("org/SubclassingInnerClassB", Some("org/OuterClassB$InnerClassB"), &[]),
        el("org/ImplementingInnerInterfaceB", object, &["org/OuterClassB$InnerInterfaceB"]),
        // Library classes
        el("org/springframework/beans/factory/FactoryBean", object, &[]),
        el(
            "org/springframework/beans/factory/config/AbstractFactoryBean",
            object,
            &["org/springframework/beans/factory/FactoryBean"],
        ),
        el(
            "org/ImplementingInterfaceThroughExtendingTypeFromLibrary",
            Some("org/springframework/beans/factory/config/AbstractFactoryBean"),
            &[],
        ),
        // Diamond
        el("org/diamond/Top", object, &[]),
        el("org/diamond/Left", object, &["org/diamond/Top"]),
        el("org/diamond/Right", object, &["org/diamond/Top"]),
        el("org/diamond/DiamondImpl", object, &["org/diamond/Left", "org/diamond/Right"]),
        // Broken and malformed graphs
        el("org/Orphan", Some("org/missing/Gone"), &["org/SimpleInterface"]),
        el("org/OrphanChild", Some("org/Orphan"), &[]),
        el("org/cycle/A", Some("org/cycle/B"), &[]),
        el("org/cycle/B", Some("org/cycle/A"), &[]),
        el("org/cycle/I1", object, &["org/cycle/I2"]),
        el("org/cycle/I2", object, &["org/cycle/I1"]),
        el("org/cycle/Impl", object, &["org/cycle/I1"]),
        el("org/UsesCorrupt", Some("org/Corrupt"), &[]),
    ]
}

/// Reader over a fixed set of elements that records every name it is asked for.
pub struct RecordingReader {
    elements: HashMap<ClassName, TypeHierarchyElement>,
    accessed: Mutex<Vec<ClassName>>,
    cleanups: Mutex<usize>,
}

impl RecordingReader {
    pub fn new(elements: Vec<TypeHierarchyElement>) -> Self {
        Self {
            elements: elements
                .into_iter()
                .map(|e| (e.name().clone(), e))
                .collect(),
            accessed: Mutex::new(Vec::new()),
            cleanups: Mutex::new(0),
        }
    }

    pub fn accessed(&self) -> Vec<ClassName> {
        self.accessed.lock().unwrap().clone()
    }

    pub fn access_count(&self, name: &str) -> usize {
        let name = ClassName::new(name);
        self.accessed
            .lock()
            .unwrap()
            .iter()
            .filter(|n| **n == name)
            .count()
    }

    pub fn class_accessed(&self, name: &str) -> bool {
        self.access_count(name) > 0
    }

    pub fn cleanups(&self) -> usize {
        *self.cleanups.lock().unwrap()
    }
}

impl ClassReader for RecordingReader {
    fn read(
        &self,
        name: &ClassName,
        _project: &ProjectId,
    ) -> ReadResult<Option<TypeHierarchyElement>> {
        self.accessed.lock().unwrap().push(name.clone());
        if name.as_str() == "org/Corrupt" {
            return Err(ReaderError::decode(name.as_str(), "truncated constant pool"));
        }
        Ok(self.elements.get(name).cloned())
    }

    fn cleanup(&self) {
        *self.cleanups.lock().unwrap() += 1;
    }
}

/// Hands out one `RecordingReader` per project and keeps them for inspection.
pub struct RecordingReaderFactory {
    worlds: HashMap<ProjectId, Vec<TypeHierarchyElement>>,
    default_world: Vec<TypeHierarchyElement>,
    readers: Mutex<Vec<(ProjectId, Arc<RecordingReader>)>>,
}

impl RecordingReaderFactory {
    pub fn new(default_world: Vec<TypeHierarchyElement>) -> Self {
        Self {
            worlds: HashMap::new(),
            default_world,
            readers: Mutex::new(Vec::new()),
        }
    }

    pub fn with_project(mut self, project: &str, world: Vec<TypeHierarchyElement>) -> Self {
        self.worlds.insert(ProjectId::new(project), world);
        self
    }

    /// Most recently created reader for `project`.
    pub fn reader(&self, project: &ProjectId) -> Arc<RecordingReader> {
        self.readers
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(p, _)| p == project)
            .map(|(_, r)| r.clone())
            .expect("no reader created for project")
    }

    pub fn readers_created(&self) -> usize {
        self.readers.lock().unwrap().len()
    }
}

impl ClassReaderFactory for RecordingReaderFactory {
    fn create_reader(&self, project: &ProjectId) -> Arc<dyn ClassReader> {
        let world = self
            .worlds
            .get(project)
            .cloned()
            .unwrap_or_else(|| self.default_world.clone());
        let reader = Arc::new(RecordingReader::new(world));
        self.readers
            .lock()
            .unwrap()
            .push((project.clone(), reader.clone()));
        reader
    }
}

/// Cache wrapper that counts `get` calls per name.
#[derive(Default)]
pub struct CountingCache {
    inner: DirectElementCache,
    gets: Mutex<HashMap<ClassName, usize>>,
}

impl CountingCache {
    pub fn gets(&self, name: &str) -> usize {
        self.gets
            .lock()
            .unwrap()
            .get(&ClassName::new(name))
            .copied()
            .unwrap_or(0)
    }
}

impl ElementCache for CountingCache {
    fn get(&self, name: &ClassName) -> Option<Arc<TypeHierarchyElement>> {
        *self.gets.lock().unwrap().entry(name.clone()).or_insert(0) += 1;
        self.inner.get(name)
    }

    fn put(&self, name: ClassName, element: Arc<TypeHierarchyElement>) {
        self.inner.put(name, element);
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

#[derive(Default)]
pub struct CountingCacheFactory {
    caches: Mutex<Vec<Arc<CountingCache>>>,
}

impl CountingCacheFactory {
    pub fn caches(&self) -> Vec<Arc<CountingCache>> {
        self.caches.lock().unwrap().clone()
    }
}

impl ElementCacheFactory for CountingCacheFactory {
    fn create_cache(&self, _project: &ProjectId) -> Arc<dyn ElementCache> {
        let cache = Arc::new(CountingCache::default());
        self.caches.lock().unwrap().push(cache.clone());
        cache
    }
}

pub fn setup_engine() -> (TypeHierarchyEngine, Arc<RecordingReaderFactory>, ProjectId) {
    let factory = Arc::new(RecordingReaderFactory::new(sample_world()));
    let engine = TypeHierarchyEngine::new(factory.clone());
    (engine, factory, ProjectId::new("type-hierarchy-engine-testcases"))
}
