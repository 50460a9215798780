use crate::error::ReadResult;
use crate::models::{ClassName, ProjectId, TypeHierarchyElement};
use std::sync::Arc;

/// Decodes the hierarchy information of one class.
///
/// Implementations decide where the metadata comes from (compiled class
/// files, source, or anything else). The engine never depends on which.
pub trait ClassReader: Send + Sync {
    /// Read the element for `name` within `project`.
    ///
    /// Returns `Ok(None)` when the class cannot be located. Errors are
    /// reserved for decode failures and I/O problems; the engine logs them
    /// and treats the class as not found.
    fn read(&self, name: &ClassName, project: &ProjectId)
    -> ReadResult<Option<TypeHierarchyElement>>;

    /// Release resources held between reads (open archives, parse memos).
    fn cleanup(&self) {}
}

/// Creates the reader used for one project.
pub trait ClassReaderFactory: Send + Sync {
    fn create_reader(&self, project: &ProjectId) -> Arc<dyn ClassReader>;
}
