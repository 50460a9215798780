//! Graph walks over the superclass chain and the interface DAG.
//!
//! Every walk goes through `ProjectHierarchy::element`, so the reader is only
//! reached on cache misses. Unresolvable names truncate the branch they sit
//! on; they never abort the walk.

use super::project::{Lookup, ProjectHierarchy};
use hierscope_api::{ClassName, TypeHierarchyElement};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

/// Reflexive, transitive superclass test.
pub(crate) fn does_extend(
    hierarchy: &ProjectHierarchy,
    class: &ClassName,
    ancestor: &ClassName,
) -> bool {
    let mut seen = HashSet::new();
    let mut current = Some(class.clone());

    while let Some(name) = current {
        if &name == ancestor {
            return true;
        }
        if !seen.insert(name.clone()) {
            tracing::warn!("cyclic superclass chain through {}", name);
            return false;
        }
        current = hierarchy
            .element(&name, Lookup::Resolve)
            .and_then(|element| element.superclass_name().cloned());
    }
    false
}

/// Declared superclass names from `class` upward.
///
/// The last entry may be a name that could not be resolved further.
pub(crate) fn superclass_chain(hierarchy: &ProjectHierarchy, class: &ClassName) -> Vec<ClassName> {
    let mut chain = Vec::new();
    let mut seen = HashSet::from([class.clone()]);
    let mut current = hierarchy.element(class, Lookup::Resolve);

    while let Some(element) = current {
        let Some(superclass) = element.superclass_name() else {
            break;
        };
        if !seen.insert(superclass.clone()) {
            tracing::warn!("cyclic superclass chain through {}", superclass);
            break;
        }
        chain.push(superclass.clone());
        current = hierarchy.element(superclass, Lookup::Resolve);
    }
    chain
}

/// Whether `class` or any of its superclasses implements `interface`,
/// directly or through super-interfaces.
///
/// A first pass only looks at elements that are already cached; the reader
/// is consulted only if that pass cannot prove the relation.
pub(crate) fn does_implement(
    hierarchy: &ProjectHierarchy,
    class: &ClassName,
    interface: &ClassName,
) -> bool {
    let Some(start) = hierarchy.element(class, Lookup::Resolve) else {
        return false;
    };

    implements_with(hierarchy, &start, interface, Lookup::CachedOnly)
        || implements_with(hierarchy, &start, interface, Lookup::Resolve)
}

fn implements_with(
    hierarchy: &ProjectHierarchy,
    start: &Arc<TypeHierarchyElement>,
    interface: &ClassName,
    lookup: Lookup,
) -> bool {
    let mut expanded = HashSet::new();
    let mut seen_classes = HashSet::new();
    let mut current = Some(start.clone());

    while let Some(class_element) = current {
        if !seen_classes.insert(class_element.name().clone()) {
            tracing::warn!("cyclic superclass chain through {}", class_element.name());
            break;
        }
        if reaches_interface(hierarchy, &class_element, interface, lookup, &mut expanded) {
            return true;
        }
        current = class_element
            .superclass_name()
            .and_then(|superclass| hierarchy.element(superclass, lookup));
    }
    false
}

/// Worklist expansion of the interfaces declared by `element`.
///
/// `expanded` is shared across the whole superclass chain, so an interface
/// reachable along several paths is decoded and expanded at most once.
fn reaches_interface(
    hierarchy: &ProjectHierarchy,
    element: &Arc<TypeHierarchyElement>,
    target: &ClassName,
    lookup: Lookup,
    expanded: &mut HashSet<ClassName>,
) -> bool {
    let mut worklist = vec![element.clone()];

    while let Some(next) = worklist.pop() {
        if next.declares_interface(target) {
            return true;
        }
        for interface in next.interface_names() {
            if !expanded.insert(interface.clone()) {
                continue;
            }
            if let Some(interface_element) = hierarchy.element(interface, lookup) {
                worklist.push(interface_element);
            }
        }
    }
    false
}

/// Transitive interface set of `class`, deduplicated, in discovery order.
///
/// Interfaces declared on the class come first, followed by their
/// super-interfaces breadth-first, then the same for each superclass.
pub(crate) fn all_interfaces(hierarchy: &ProjectHierarchy, class: &ClassName) -> Vec<ClassName> {
    let mut found = Vec::new();
    let mut expanded = HashSet::new();
    let mut seen_classes = HashSet::new();
    let mut current = hierarchy.element(class, Lookup::Resolve);

    while let Some(class_element) = current {
        if !seen_classes.insert(class_element.name().clone()) {
            break;
        }

        let mut queue: VecDeque<ClassName> =
            class_element.interface_names().iter().cloned().collect();
        while let Some(interface) = queue.pop_front() {
            if !expanded.insert(interface.clone()) {
                continue;
            }
            if let Some(element) = hierarchy.element(&interface, Lookup::Resolve) {
                queue.extend(element.interface_names().iter().cloned());
            }
            found.push(interface);
        }

        current = class_element
            .superclass_name()
            .and_then(|superclass| hierarchy.element(superclass, Lookup::Resolve));
    }
    found
}
