//! Where a project's classes live.

use crate::classpath::ClasspathEntry;
use crate::jdk;
use dashmap::DashMap;
use hierscope_api::ProjectId;
use hierscope_core::error::{HierscopeError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File name of the project descriptor looked up inside a directory.
pub const DESCRIPTOR_FILE: &str = "hierscope.json";

/// Class locations of one project.
///
/// ```json
/// {
///   "id": "shop",
///   "output_dirs": ["target/classes"],
///   "source_roots": ["src/main/java"],
///   "libraries": ["lib/spring-beans.jar"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectLayout {
    pub id: ProjectId,
    #[serde(default)]
    pub output_dirs: Vec<PathBuf>,
    #[serde(default)]
    pub source_roots: Vec<PathBuf>,
    #[serde(default)]
    pub libraries: Vec<PathBuf>,
    /// JDK runtime image or `rt.jar`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jdk: Option<PathBuf>,
}

impl ProjectLayout {
    pub fn new(id: impl Into<ProjectId>) -> Self {
        Self {
            id: id.into(),
            output_dirs: Vec::new(),
            source_roots: Vec::new(),
            libraries: Vec::new(),
            jdk: None,
        }
    }

    /// Load a descriptor from `path`, or from `path/hierscope.json` when
    /// `path` is a directory. Relative paths are resolved against the
    /// descriptor's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let descriptor = if path.is_dir() {
            path.join(DESCRIPTOR_FILE)
        } else {
            path.to_path_buf()
        };
        let content = std::fs::read_to_string(&descriptor)?;
        let mut layout: ProjectLayout = serde_json::from_str(&content)?;
        if layout.id.is_empty() {
            return Err(HierscopeError::Config(format!(
                "{} does not name a project id",
                descriptor.display()
            )));
        }

        let base = descriptor.parent().unwrap_or(Path::new("."));
        layout.rebase(base);
        tracing::debug!("loaded project {} from {}", layout.id, descriptor.display());
        Ok(layout)
    }

    /// Fill in the JDK from the local machine when none is configured.
    pub fn discover_jdk(mut self) -> Self {
        if self.jdk.is_none() {
            self.jdk = jdk::find_runtime();
            match &self.jdk {
                Some(runtime) => tracing::debug!("using JDK runtime {}", runtime.display()),
                None => tracing::warn!("no JDK found; platform classes will not resolve"),
            }
        }
        self
    }

    /// Output directories, then libraries, then the JDK.
    pub fn binary_classpath(&self) -> Vec<ClasspathEntry> {
        self.output_dirs
            .iter()
            .map(|dir| ClasspathEntry::Directory(dir.clone()))
            .chain(self.library_classpath())
            .collect()
    }

    /// Libraries, then the JDK.
    pub fn library_classpath(&self) -> Vec<ClasspathEntry> {
        self.libraries
            .iter()
            .chain(self.jdk.iter())
            .map(ClasspathEntry::from_path)
            .collect()
    }

    fn rebase(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        self.output_dirs.iter_mut().for_each(resolve);
        self.source_roots.iter_mut().for_each(resolve);
        self.libraries.iter_mut().for_each(resolve);
        self.jdk.iter_mut().for_each(resolve);
    }
}

/// Layouts of every known project, shared by the reader factories.
#[derive(Default)]
pub struct ProjectRegistry {
    layouts: DashMap<ProjectId, Arc<ProjectLayout>>,
}

impl ProjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a layout. Readers already created keep the old one.
    pub fn register(&self, layout: ProjectLayout) -> ProjectId {
        let id = layout.id.clone();
        self.layouts.insert(id.clone(), Arc::new(layout));
        id
    }

    pub fn get(&self, project: &ProjectId) -> Option<Arc<ProjectLayout>> {
        self.layouts.get(project).map(|layout| layout.value().clone())
    }

    pub fn remove(&self, project: &ProjectId) -> Option<Arc<ProjectLayout>> {
        self.layouts.remove(project).map(|(_, layout)| layout)
    }

    /// The registered layout, or an empty one for unknown projects.
    pub(crate) fn layout_or_empty(&self, project: &ProjectId) -> Arc<ProjectLayout> {
        self.get(project).unwrap_or_else(|| {
            tracing::warn!("project {} is not registered; no classes will resolve", project);
            Arc::new(ProjectLayout::new(project.clone()))
        })
    }
}
