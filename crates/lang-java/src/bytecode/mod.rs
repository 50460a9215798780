//! Class reader over compiled class files.

mod decode;

pub use decode::decode_class;

use crate::classpath::Classpath;
use crate::project::{ProjectLayout, ProjectRegistry};
use hierscope_api::{
    ClassName, ClassReader, ClassReaderFactory, ProjectId, ReadResult, TypeHierarchyElement,
};
use std::sync::Arc;

pub struct BytecodeClassReader {
    classpath: Classpath,
}

impl BytecodeClassReader {
    pub fn new(classpath: Classpath) -> Self {
        Self { classpath }
    }

    /// Reader over the project's output directories, libraries and JDK.
    pub fn for_layout(layout: &ProjectLayout) -> Self {
        Self::new(Classpath::new(layout.binary_classpath()))
    }

    /// Reader over the project's libraries and JDK only.
    pub fn for_libraries(layout: &ProjectLayout) -> Self {
        Self::new(Classpath::new(layout.library_classpath()))
    }

    pub fn contains(&self, name: &ClassName) -> bool {
        self.classpath.contains(name)
    }

    pub fn read_class(&self, name: &ClassName) -> ReadResult<Option<TypeHierarchyElement>> {
        let Some(bytes) = self.classpath.find_class(name)? else {
            return Ok(None);
        };
        decode_class(bytes, name).map(Some)
    }

    pub fn release(&self) {
        self.classpath.release();
    }
}

impl ClassReader for BytecodeClassReader {
    fn read(
        &self,
        name: &ClassName,
        _project: &ProjectId,
    ) -> ReadResult<Option<TypeHierarchyElement>> {
        self.read_class(name)
    }

    fn cleanup(&self) {
        self.release();
    }
}

pub struct BytecodeClassReaderFactory {
    registry: Arc<ProjectRegistry>,
}

impl BytecodeClassReaderFactory {
    pub fn new(registry: Arc<ProjectRegistry>) -> Self {
        Self { registry }
    }
}

impl ClassReaderFactory for BytecodeClassReaderFactory {
    fn create_reader(&self, project: &ProjectId) -> Arc<dyn ClassReader> {
        let layout = self.registry.layout_or_empty(project);
        Arc::new(BytecodeClassReader::for_layout(&layout))
    }
}
