//! Resolution of type names written in `extends` and `implements` clauses.
//!
//! A simple name is looked up, in order, among the enclosing declarations
//! and their member types, the top-level types of the compilation unit,
//! single-type imports, the current package, on-demand imports and
//! `java.lang`. Qualified names try every package/type split, longest
//! package first. Names that cannot be found anywhere still resolve to a
//! best guess so the hierarchy walk can report them as missing.

use super::syntax::{CompilationUnit, TypeDecl};
use hierscope_api::ClassName;

pub(crate) trait TypeLookup {
    fn exists(&self, name: &ClassName) -> bool;
}

pub(crate) struct Resolver<'a, L: TypeLookup> {
    lookup: &'a L,
    unit: &'a CompilationUnit,
    /// Declarations enclosing the one being resolved, outermost first.
    enclosing: Vec<(ClassName, &'a TypeDecl)>,
}

impl<'a, L: TypeLookup> Resolver<'a, L> {
    pub(crate) fn new(
        lookup: &'a L,
        unit: &'a CompilationUnit,
        enclosing: Vec<(ClassName, &'a TypeDecl)>,
    ) -> Self {
        Self {
            lookup,
            unit,
            enclosing,
        }
    }

    pub(crate) fn resolve(&self, written: &str) -> ClassName {
        let mut segments = written.split('.');
        let first = segments.next().unwrap_or_default();
        let rest: Vec<&str> = segments.collect();

        match self.resolve_simple(first) {
            Some(base) => rest.iter().fold(base, |name, segment| name.nested(segment)),
            None if rest.is_empty() => ClassName::in_package(&self.unit.package, first),
            // `Outer.Inner` with an unknown `Outer`: same guess as a simple name
            None if first.starts_with(char::is_uppercase) => self
                .find_qualified(written)
                .unwrap_or_else(|| {
                    rest.iter().fold(
                        ClassName::in_package(&self.unit.package, first),
                        |name, segment| name.nested(segment),
                    )
                }),
            None => self.resolve_qualified(written),
        }
    }

    fn resolve_simple(&self, simple: &str) -> Option<ClassName> {
        for (name, decl) in self.enclosing.iter().rev() {
            if decl.member(simple).is_some() {
                return Some(name.nested(simple));
            }
            if decl.name == simple {
                return Some(name.clone());
            }
        }

        if self.unit.top_level(simple).is_some() {
            return Some(ClassName::in_package(&self.unit.package, simple));
        }

        let single = self
            .unit
            .imports
            .iter()
            .find(|import| !import.on_demand && last_segment(&import.path) == simple);
        if let Some(import) = single {
            return Some(self.resolve_qualified(&import.path));
        }

        let same_package = ClassName::in_package(&self.unit.package, simple);
        if self.lookup.exists(&same_package) {
            return Some(same_package);
        }

        for import in self.unit.imports.iter().filter(|import| import.on_demand) {
            if let Some(found) = self.find_qualified(&format!("{}.{}", import.path, simple)) {
                return Some(found);
            }
        }

        let lang = ClassName::in_package("java/lang", simple);
        self.lookup.exists(&lang).then_some(lang)
    }

    fn find_qualified(&self, dotted: &str) -> Option<ClassName> {
        let segments: Vec<&str> = dotted.split('.').collect();
        (0..segments.len())
            .rev()
            .map(|split| split_name(&segments, split))
            .find(|candidate| self.lookup.exists(candidate))
    }

    fn resolve_qualified(&self, dotted: &str) -> ClassName {
        self.find_qualified(dotted).unwrap_or_else(|| {
            // Conventional naming: packages are lower case, types are not
            let segments: Vec<&str> = dotted.split('.').collect();
            let split = segments
                .iter()
                .position(|segment| segment.starts_with(char::is_uppercase))
                .unwrap_or(segments.len() - 1);
            split_name(&segments, split)
        })
    }
}

fn split_name(segments: &[&str], split: usize) -> ClassName {
    ClassName::in_package(&segments[..split].join("/"), &segments[split..].join("$"))
}

fn last_segment(dotted: &str) -> &str {
    dotted.rsplit('.').next().unwrap_or(dotted)
}
