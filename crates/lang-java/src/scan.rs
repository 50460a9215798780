//! Enumeration of the classes a project defines.

use crate::project::ProjectLayout;
use crate::source::syntax::parse_compilation_unit;
use hierscope_api::ClassName;
use hierscope_core::config::ReaderStrategy;
use std::path::Path;
use walkdir::WalkDir;

/// Every class defined in the project's own output directories or source
/// roots, depending on the reader strategy. Library classes are not listed.
pub fn project_classes(layout: &ProjectLayout, strategy: ReaderStrategy) -> Vec<ClassName> {
    let mut classes: Vec<ClassName> = match strategy {
        ReaderStrategy::Bytecode => layout
            .output_dirs
            .iter()
            .flat_map(|dir| compiled_classes(dir))
            .collect(),
        ReaderStrategy::Source => layout
            .source_roots
            .iter()
            .flat_map(|root| source_classes(root))
            .collect(),
    };
    classes.sort();
    classes.dedup();
    classes
}

fn compiled_classes(dir: &Path) -> Vec<ClassName> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            let relative = e.path().strip_prefix(dir).ok()?;
            let relative = relative.to_str()?.strip_suffix(".class")?;
            if relative.ends_with("module-info") || relative.ends_with("package-info") {
                return None;
            }
            Some(ClassName::new(relative.replace('\\', "/")))
        })
        .collect()
}

fn source_classes(root: &Path) -> Vec<ClassName> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_type().is_file() && e.path().extension().is_some_and(|ext| ext == "java")
        })
        .flat_map(|e| {
            let unit = std::fs::read_to_string(e.path())
                .map_err(|err| err.to_string())
                .and_then(|source| parse_compilation_unit(&source).map_err(|err| err.to_string()));
            match unit {
                Ok(unit) => unit.declared_names(),
                Err(err) => {
                    tracing::warn!("skipping {}: {}", e.path().display(), err);
                    Vec::new()
                }
            }
        })
        .collect()
}
