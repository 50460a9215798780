use super::name::ClassName;
use serde::{Deserialize, Serialize};

/// Decoded hierarchy summary of a single class or interface.
///
/// Holds only what the class itself declares: its direct superclass and its
/// directly implemented (or, for interfaces, extended) interfaces. Elements
/// are immutable once built and are shared between queries through the
/// element cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeHierarchyElement {
    name: ClassName,
    superclass_name: Option<ClassName>,
    interface_names: Vec<ClassName>,
}

impl TypeHierarchyElement {
    pub fn new(
        name: ClassName,
        superclass_name: Option<ClassName>,
        interface_names: Vec<ClassName>,
    ) -> Self {
        Self {
            name,
            superclass_name,
            interface_names,
        }
    }

    /// Element for the universal root type: no superclass, no interfaces.
    pub fn root() -> Self {
        Self::new(ClassName::root(), None, Vec::new())
    }

    pub fn name(&self) -> &ClassName {
        &self.name
    }

    pub fn superclass_name(&self) -> Option<&ClassName> {
        self.superclass_name.as_ref()
    }

    pub fn interface_names(&self) -> &[ClassName] {
        &self.interface_names
    }

    pub fn declares_interface(&self, interface: &ClassName) -> bool {
        self.interface_names.iter().any(|i| i == interface)
    }
}
