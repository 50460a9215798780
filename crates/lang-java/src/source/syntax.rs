//! Declaration skeleton of a Java compilation unit.
//!
//! Only what the hierarchy needs survives parsing: the package, the imports
//! and every top-level or member type with its raw `extends`/`implements`
//! clauses. Local and anonymous classes are not collected.

use hierscope_api::{ClassName, ReadResult, ReaderError};
use tree_sitter::{Node, Parser};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub name: String,
    pub kind: DeclKind,
    /// Raw `extends` type of a class, type arguments removed.
    pub superclass: Option<String>,
    /// Raw `implements` types, or `extends` types for interfaces.
    pub interfaces: Vec<String>,
    pub members: Vec<TypeDecl>,
}

impl TypeDecl {
    pub fn member(&self, simple_name: &str) -> Option<&TypeDecl> {
        self.members.iter().find(|m| m.name == simple_name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    /// Dotted name as written (`org.OuterClassB.InnerInterfaceB`, `org.sub`).
    pub path: String,
    pub on_demand: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompilationUnit {
    /// Package in internal form; empty for the default package.
    pub package: String,
    pub imports: Vec<Import>,
    pub types: Vec<TypeDecl>,
}

impl CompilationUnit {
    pub fn top_level(&self, simple_name: &str) -> Option<&TypeDecl> {
        self.types.iter().find(|t| t.name == simple_name)
    }

    /// Declarations from the top-level type down to `name`.
    ///
    /// `None` when this unit does not declare `name` as a top-level or
    /// member type.
    pub fn declaration_path(&self, name: &ClassName) -> Option<Vec<&TypeDecl>> {
        if name.package() != self.package {
            return None;
        }
        let top = name.top_level();
        let mut current = self.top_level(top.binary_simple_name())?;
        let mut path = vec![current];
        for segment in name.nested_path() {
            current = current.member(segment)?;
            path.push(current);
        }
        Some(path)
    }

    /// Every type declared in this unit, by binary name.
    pub fn declared_names(&self) -> Vec<ClassName> {
        fn collect(decl: &TypeDecl, name: ClassName, out: &mut Vec<ClassName>) {
            for member in &decl.members {
                collect(member, name.nested(&member.name), out);
            }
            out.push(name);
        }

        let mut names = Vec::new();
        for decl in &self.types {
            collect(decl, ClassName::in_package(&self.package, &decl.name), &mut names);
        }
        names
    }
}

pub fn parse_compilation_unit(source: &str) -> ReadResult<CompilationUnit> {
    let mut parser = Parser::new();
    let language: tree_sitter::Language = tree_sitter_java::LANGUAGE.into();
    parser
        .set_language(&language)
        .map_err(|e| ReaderError::decode("<java grammar>", e.to_string()))?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ReaderError::decode("<source>", "parser returned no tree"))?;

    let root = tree.root_node();
    let mut unit = CompilationUnit::default();
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        match child.kind() {
            "package_declaration" => {
                if let Some(name) = first_named(child, &["scoped_identifier", "identifier"]) {
                    unit.package = text(name, source).replace('.', "/");
                }
            }
            "import_declaration" => {
                if let Some(import) = import_of(child, source) {
                    unit.imports.push(import);
                }
            }
            _ => {
                if let Some(decl) = type_decl(child, source) {
                    unit.types.push(decl);
                }
            }
        }
    }
    Ok(unit)
}

fn import_of(node: Node, source: &str) -> Option<Import> {
    let mut on_demand = false;
    let mut path = None;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            // Static imports bring in members, not types we can extend
            "static" => return None,
            "asterisk" => on_demand = true,
            "scoped_identifier" | "identifier" => path = Some(text(child, source)),
            _ => {}
        }
    }
    path.map(|path| Import { path, on_demand })
}

fn type_decl(node: Node, source: &str) -> Option<TypeDecl> {
    let kind = match node.kind() {
        "class_declaration" => DeclKind::Class,
        "interface_declaration" => DeclKind::Interface,
        "enum_declaration" => DeclKind::Enum,
        "record_declaration" => DeclKind::Record,
        "annotation_type_declaration" => DeclKind::Annotation,
        _ => return None,
    };
    let name = text(node.child_by_field_name("name")?, source);

    let mut superclass = None;
    let mut interfaces = Vec::new();
    let mut body = None;
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "superclass" => superclass = child.named_child(0).map(|t| type_name(t, source)),
            "super_interfaces" | "extends_interfaces" => {
                if let Some(list) = first_named(child, &["type_list"]) {
                    let mut list_cursor = list.walk();
                    interfaces.extend(
                        list.named_children(&mut list_cursor)
                            .map(|t| type_name(t, source)),
                    );
                }
            }
            "class_body" | "interface_body" | "enum_body" | "annotation_type_body" => {
                body = Some(child)
            }
            _ => {}
        }
    }

    Some(TypeDecl {
        name,
        kind,
        superclass,
        interfaces,
        members: body.map(|b| member_types(b, source)).unwrap_or_default(),
    })
}

fn member_types(body: Node, source: &str) -> Vec<TypeDecl> {
    let mut members = Vec::new();
    let mut cursor = body.walk();
    for child in body.named_children(&mut cursor) {
        if child.kind() == "enum_body_declarations" {
            members.extend(member_types(child, source));
        } else if let Some(decl) = type_decl(child, source) {
            members.push(decl);
        }
    }
    members
}

fn first_named<'a>(node: Node<'a>, kinds: &[&str]) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    let found = node
        .named_children(&mut cursor)
        .find(|child| kinds.contains(&child.kind()));
    found
}

fn text(node: Node, source: &str) -> String {
    node.utf8_text(source.as_bytes()).unwrap_or("").to_string()
}

/// Written type name with annotations and type arguments removed
/// (`Map.@NonNull Entry<K, V>` becomes `Map.Entry`).
fn type_name(node: Node, source: &str) -> String {
    let mut segments = Vec::new();
    type_segments(node, source, &mut segments);
    segments.join(".")
}

fn type_segments(node: Node, source: &str, segments: &mut Vec<String>) {
    match node.kind() {
        "type_identifier" | "identifier" => segments.push(text(node, source)),
        "annotation" | "marker_annotation" | "type_arguments" => {}
        _ => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                type_segments(child, source, segments);
            }
        }
    }
}
