pub mod bytecode;
pub mod classpath;
pub mod jdk;
pub mod project;
pub mod scan;
pub mod source;

pub use bytecode::{BytecodeClassReader, BytecodeClassReaderFactory};
pub use classpath::{Classpath, ClasspathEntry};
pub use project::{ProjectLayout, ProjectRegistry};
pub use source::{SourceClassReader, SourceClassReaderFactory};

use hierscope_api::ClassReaderFactory;
use hierscope_core::config::ReaderStrategy;
use std::sync::Arc;

/// Reader factory for `strategy`, resolving projects through `registry`.
pub fn reader_factory(
    strategy: ReaderStrategy,
    registry: Arc<ProjectRegistry>,
) -> Arc<dyn ClassReaderFactory> {
    match strategy {
        ReaderStrategy::Bytecode => Arc::new(BytecodeClassReaderFactory::new(registry)),
        ReaderStrategy::Source => Arc::new(SourceClassReaderFactory::new(registry)),
    }
}
