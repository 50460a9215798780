//! Class reader over Java source files.
//!
//! Types declared under the project's source roots are read from their
//! compilation units; everything else (libraries, the JDK) goes through a
//! bytecode reader over the library classpath. Parsed units are memoized
//! until `cleanup`.

mod resolve;
pub mod syntax;

use crate::bytecode::BytecodeClassReader;
use crate::project::{ProjectLayout, ProjectRegistry};
use dashmap::DashMap;
use hierscope_api::{
    ClassName, ClassReader, ClassReaderFactory, ProjectId, ReadResult, ReaderError,
    TypeHierarchyElement,
};
use resolve::{Resolver, TypeLookup};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use syntax::{CompilationUnit, DeclKind, TypeDecl, parse_compilation_unit};
use walkdir::WalkDir;

const ENUM_BASE: &str = "java/lang/Enum";
const RECORD_BASE: &str = "java/lang/Record";
const ANNOTATION_INTERFACE: &str = "java/lang/annotation/Annotation";

pub struct SourceClassReader {
    source_roots: Vec<PathBuf>,
    libraries: BytecodeClassReader,
    units: DashMap<PathBuf, Arc<CompilationUnit>>,
    // Existence answers given to name resolution
    known: DashMap<ClassName, bool>,
}

impl SourceClassReader {
    pub fn new(source_roots: Vec<PathBuf>, libraries: BytecodeClassReader) -> Self {
        Self {
            source_roots,
            libraries,
            units: DashMap::new(),
            known: DashMap::new(),
        }
    }

    pub fn for_layout(layout: &ProjectLayout) -> Self {
        Self::new(
            layout.source_roots.clone(),
            BytecodeClassReader::for_libraries(layout),
        )
    }

    pub fn read_class(&self, name: &ClassName) -> ReadResult<Option<TypeHierarchyElement>> {
        match self.locate(&name.top_level())? {
            Some(unit) => {
                let element = unit
                    .declaration_path(name)
                    .and_then(|path| self.element_for(&unit, name, &path));
                if element.is_none() {
                    tracing::debug!("{} has no member type declaration in source", name);
                }
                Ok(element)
            }
            None => self.libraries.read_class(name),
        }
    }

    fn element_for(
        &self,
        unit: &CompilationUnit,
        name: &ClassName,
        path: &[&TypeDecl],
    ) -> Option<TypeHierarchyElement> {
        let mut scope = Vec::with_capacity(path.len());
        let mut binary = name.top_level();
        for (depth, decl) in path.iter().enumerate() {
            if depth > 0 {
                binary = binary.nested(&decl.name);
            }
            scope.push((binary.clone(), *decl));
        }
        let (_, decl) = scope.pop()?;
        let resolver = Resolver::new(self, unit, scope);

        let superclass = if name.is_root() {
            None
        } else {
            Some(match decl.kind {
                DeclKind::Class => decl
                    .superclass
                    .as_deref()
                    .map(|written| resolver.resolve(written))
                    .unwrap_or_else(ClassName::root),
                DeclKind::Interface | DeclKind::Annotation => ClassName::root(),
                DeclKind::Enum => ClassName::new(ENUM_BASE),
                DeclKind::Record => ClassName::new(RECORD_BASE),
            })
        };

        let interfaces = match decl.kind {
            DeclKind::Annotation => vec![ClassName::new(ANNOTATION_INTERFACE)],
            _ => decl
                .interfaces
                .iter()
                .map(|written| resolver.resolve(written))
                .collect(),
        };

        Some(TypeHierarchyElement::new(name.clone(), superclass, interfaces))
    }

    /// The compilation unit declaring the top-level type `top`.
    ///
    /// Tries `<package>/<Name>.java` first, then any other file in the
    /// package directory, since non-public top-level types may share a file.
    fn locate(&self, top: &ClassName) -> ReadResult<Option<Arc<CompilationUnit>>> {
        let simple = top.binary_simple_name();
        let file_name = format!("{}.java", simple);
        let declares = |unit: &CompilationUnit| {
            unit.package == top.package() && unit.top_level(simple).is_some()
        };

        for root in &self.source_roots {
            let path = root.join(top.package()).join(&file_name);
            if path.is_file() {
                let unit = self.unit(&path)?;
                if declares(&unit) {
                    return Ok(Some(unit));
                }
            }
        }

        for root in &self.source_roots {
            let dir = root.join(top.package());
            if !dir.is_dir() {
                continue;
            }
            for entry in WalkDir::new(&dir).max_depth(1).into_iter().filter_map(|e| e.ok()) {
                let path = entry.path();
                let is_candidate = entry.file_type().is_file()
                    && path.extension().is_some_and(|ext| ext == "java")
                    && !path.file_name().is_some_and(|n| n == file_name.as_str());
                if !is_candidate {
                    continue;
                }
                match self.unit(path) {
                    Ok(unit) if declares(&unit) => return Ok(Some(unit)),
                    Ok(_) => {}
                    Err(e) => tracing::warn!("skipping {}: {}", path.display(), e),
                }
            }
        }
        Ok(None)
    }

    fn unit(&self, path: &Path) -> ReadResult<Arc<CompilationUnit>> {
        if let Some(unit) = self.units.get(path) {
            return Ok(unit.value().clone());
        }
        let source = std::fs::read_to_string(path)?;
        let unit = parse_compilation_unit(&source).map_err(|e| {
            ReaderError::decode(path.display().to_string(), e.to_string())
        })?;
        let unit = Arc::new(unit);
        self.units.insert(path.to_path_buf(), unit.clone());
        Ok(unit)
    }
}

impl TypeLookup for SourceClassReader {
    fn exists(&self, name: &ClassName) -> bool {
        if let Some(known) = self.known.get(name) {
            return *known;
        }
        let found = match self.locate(&name.top_level()) {
            Ok(Some(unit)) => unit.declaration_path(name).is_some(),
            Ok(None) => self.libraries.contains(name),
            Err(e) => {
                tracing::warn!("cannot check {}: {}", name, e);
                false
            }
        };
        self.known.insert(name.clone(), found);
        found
    }
}

impl ClassReader for SourceClassReader {
    fn read(
        &self,
        name: &ClassName,
        _project: &ProjectId,
    ) -> ReadResult<Option<TypeHierarchyElement>> {
        self.read_class(name)
    }

    fn cleanup(&self) {
        self.units.clear();
        self.known.clear();
        self.libraries.release();
    }
}

pub struct SourceClassReaderFactory {
    registry: Arc<ProjectRegistry>,
}

impl SourceClassReaderFactory {
    pub fn new(registry: Arc<ProjectRegistry>) -> Self {
        Self { registry }
    }
}

impl ClassReaderFactory for SourceClassReaderFactory {
    fn create_reader(&self, project: &ProjectId) -> Arc<dyn ClassReader> {
        let layout = self.registry.layout_or_empty(project);
        Arc::new(SourceClassReader::for_layout(&layout))
    }
}
