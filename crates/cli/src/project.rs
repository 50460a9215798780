use crate::Cli;
use hierscope_core::error::Result;
use hierscope_java::project::DESCRIPTOR_FILE;
use hierscope_java::ProjectLayout;
use std::path::PathBuf;

const ADHOC_PROJECT: &str = "adhoc";

/// Project layout from `--project` (or `./hierscope.json`), extended by the
/// command-line paths, with the JDK discovered when not configured.
pub(crate) fn assemble(cli: &Cli) -> Result<ProjectLayout> {
    let layout = match &cli.project {
        Some(path) => ProjectLayout::load(path)?,
        None => {
            let descriptor = std::env::current_dir()?.join(DESCRIPTOR_FILE);
            if descriptor.is_file() {
                ProjectLayout::load(&descriptor)?
            } else {
                ProjectLayout::new(ADHOC_PROJECT)
            }
        }
    };
    Ok(extend(layout, &cli.classpath, &cli.source_roots).discover_jdk())
}

/// Directories on `classpath` are output directories, anything else a library.
fn extend(mut layout: ProjectLayout, classpath: &[PathBuf], source_roots: &[PathBuf]) -> ProjectLayout {
    for path in classpath {
        if path.is_dir() {
            layout.output_dirs.push(path.clone());
        } else {
            layout.libraries.push(path.clone());
        }
    }
    layout.source_roots.extend(source_roots.iter().cloned());
    layout
}
