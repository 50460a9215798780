#![allow(dead_code)]

use hierscope_java::ProjectLayout;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

pub const OBJECT: &str = "java/lang/Object";

const ACC_PUBLIC: u16 = 0x0001;
const ACC_SUPER: u16 = 0x0020;
const ACC_INTERFACE: u16 = 0x0200;
const ACC_ABSTRACT: u16 = 0x0400;

/// One compiled type of the fixture world.
#[derive(Clone, Copy)]
pub struct Compiled {
    pub name: &'static str,
    pub superclass: Option<&'static str>,
    pub interfaces: &'static [&'static str],
    pub interface: bool,
}

const fn class(
    name: &'static str,
    superclass: &'static str,
    interfaces: &'static [&'static str],
) -> Compiled {
    Compiled {
        name,
        superclass: Some(superclass),
        interfaces,
        interface: false,
    }
}

const fn interface(name: &'static str, interfaces: &'static [&'static str]) -> Compiled {
    Compiled {
        name,
        superclass: Some(OBJECT),
        interfaces,
        interface: true,
    }
}

/// Types compiled into the project's output directory.
pub const PROJECT_CLASSES: &[Compiled] = &[
    class("org/SimpleClass", OBJECT, &[]),
    interface("org/SimpleInterface", &[]),
    class("org/Subclass", "org/SimpleClass", &[]),
    class("org/CombinedSubclass", "org/SimpleClass", &["org/SimpleInterface"]),
    interface("org/SubInterface", &["org/SimpleInterface"]),
    class(
        "org/ClassImplementingInterfaceThroughSubInterface",
        OBJECT,
        &["org/SubInterface"],
    ),
    class("DefaultPackageClass", "org/SimpleClass", &[]),
    class("org/ClassA", OBJECT, &[]),
    interface("org/InterfaceA", &[]),
    interface("org/InterfaceB", &[]),
    interface("org/InterfaceC", &[]),
    interface("org/InterfaceD", &[]),
    interface("org/sub/InterfaceAB", &["org/InterfaceA", "org/InterfaceB"]),
    interface("org/sub/InterfaceCD", &["org/InterfaceC", "org/InterfaceD"]),
    class("org/sub/ClassB", "org/ClassA", &["org/sub/InterfaceAB"]),
    class("org/sub/ClassABCD", "org/sub/ClassB", &["org/sub/InterfaceCD"]),
    class("org/OuterClassA", OBJECT, &[]),
    class("org/OuterClassA$InnerClassA", OBJECT, &["org/SimpleInterface"]),
    class("org/OuterClassB", OBJECT, &[]),
    class("org/OuterClassB$InnerClassB", OBJECT, &[]),
    interface("org/OuterClassB$InnerInterfaceB", &[]),
    class("org/SubclassingInnerClassB", "org/OuterClassB$InnerClassB", &[]),
    class(
        "org/ImplementingInnerInterfaceB",
        OBJECT,
        &["org/OuterClassB$InnerInterfaceB"],
    ),
    class(
        "org/ImplementingInterfaceThroughExtendingTypeFromLibrary",
        "org/springframework/beans/factory/config/AbstractFactoryBean",
        &[],
    ),
];

/// The same types as source files.
pub const PROJECT_SOURCES: &[(&str, &str)] = &[
    ("org/SimpleClass.java", "package org;\n\npublic class SimpleClass {}\n"),
    ("org/SimpleInterface.java", "package org;\n\npublic interface SimpleInterface {}\n"),
    ("org/Subclass.java", "package org;\n\npublic class Subclass extends SimpleClass {}\n"),
    (
        "org/CombinedSubclass.java",
        "package org;\n\npublic class CombinedSubclass extends SimpleClass implements SimpleInterface {}\n",
    ),
    (
        "org/SubInterface.java",
        "package org;\n\npublic interface SubInterface extends SimpleInterface {}\n",
    ),
    (
        "org/ClassImplementingInterfaceThroughSubInterface.java",
        "package org;\n\npublic class ClassImplementingInterfaceThroughSubInterface implements SubInterface {}\n",
    ),
    (
        "DefaultPackageClass.java",
        "public class DefaultPackageClass extends org.SimpleClass {}\n",
    ),
    ("org/ClassA.java", "package org;\n\npublic class ClassA {}\n"),
    ("org/InterfaceA.java", "package org;\n\npublic interface InterfaceA {}\n"),
    ("org/InterfaceB.java", "package org;\n\npublic interface InterfaceB {}\n"),
    ("org/InterfaceC.java", "package org;\n\npublic interface InterfaceC {}\n"),
    ("org/InterfaceD.java", "package org;\n\npublic interface InterfaceD {}\n"),
    (
        "org/sub/InterfaceAB.java",
        r#"package org.sub;

import org.InterfaceA;
import org.InterfaceB;

public interface InterfaceAB extends InterfaceA, InterfaceB {}
"#,
    ),
    (
        "org/sub/InterfaceCD.java",
        r#"package org.sub;

import org.*;

public interface InterfaceCD extends InterfaceC, InterfaceD {}
"#,
    ),
    (
        "org/sub/ClassB.java",
        "package org.sub;\n\npublic class ClassB extends org.ClassA implements InterfaceAB {}\n",
    ),
    (
        "org/sub/ClassABCD.java",
        "package org.sub;\n\npublic class ClassABCD extends ClassB implements InterfaceCD {}\n",
    ),
    (
        "org/OuterClassA.java",
        r#"package org;

public class OuterClassA {
    public static class InnerClassA implements SimpleInterface {}
}
"#,
    ),
    (
        "org/OuterClassB.java",
        r#"package org;

public class OuterClassB {
    public class InnerClassB {}

    public interface InnerInterfaceB {}
}
"#,
    ),
    (
        "org/SubclassingInnerClassB.java",
        "package org;\n\npublic class SubclassingInnerClassB extends OuterClassB.InnerClassB {}\n",
    ),
    (
        "org/ImplementingInnerInterfaceB.java",
        r#"package org;

import org.OuterClassB.InnerInterfaceB;

public class ImplementingInnerInterfaceB implements InnerInterfaceB {}
"#,
    ),
    (
        "org/ImplementingInterfaceThroughExtendingTypeFromLibrary.java",
        r#"package org;

import org.springframework.beans.factory.config.AbstractFactoryBean;

public abstract class ImplementingInterfaceThroughExtendingTypeFromLibrary
        extends AbstractFactoryBean<Object> {
}
"#,
    ),
];

/// Library classes, packaged as a jar.
pub const LIBRARY_CLASSES: &[Compiled] = &[
    interface("org/springframework/beans/factory/FactoryBean", &[]),
    class(
        "org/springframework/beans/factory/config/AbstractFactoryBean",
        OBJECT,
        &["org/springframework/beans/factory/FactoryBean"],
    ),
];

/// Platform classes, packaged as a stand-in `rt.jar`.
pub const RUNTIME_CLASSES: &[Compiled] = &[
    Compiled {
        name: OBJECT,
        superclass: None,
        interfaces: &[],
        interface: false,
    },
    interface("java/io/Serializable", &[]),
    interface("java/lang/Runnable", &[]),
];

/// Minimal class file: constant pool, flags, this/super, interfaces.
///
/// A long and a double constant are placed ahead of the class entries so
/// every index after them depends on two-slot constants being handled.
pub fn class_file(compiled: &Compiled) -> Vec<u8> {
    let mut pool = Pool::default();
    pool.long(0x0123_4567_89AB_CDEF);
    pool.double(2.5);
    let this_class = pool.class(compiled.name);
    let super_class = compiled.superclass.map(|s| pool.class(s)).unwrap_or(0);
    let interfaces: Vec<u16> = compiled.interfaces.iter().map(|i| pool.class(i)).collect();

    let flags = if compiled.interface {
        ACC_PUBLIC | ACC_INTERFACE | ACC_ABSTRACT
    } else {
        ACC_PUBLIC | ACC_SUPER
    };

    let mut out = Vec::new();
    out.extend_from_slice(&0xCAFE_BABEu32.to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes()); // minor
    out.extend_from_slice(&52u16.to_be_bytes()); // major, Java 8
    out.extend_from_slice(&pool.next.to_be_bytes());
    out.extend_from_slice(&pool.bytes);
    out.extend_from_slice(&flags.to_be_bytes());
    out.extend_from_slice(&this_class.to_be_bytes());
    out.extend_from_slice(&super_class.to_be_bytes());
    out.extend_from_slice(&(interfaces.len() as u16).to_be_bytes());
    for index in interfaces {
        out.extend_from_slice(&index.to_be_bytes());
    }
    out.extend_from_slice(&0u16.to_be_bytes()); // fields
    out.extend_from_slice(&0u16.to_be_bytes()); // methods
    out.extend_from_slice(&0u16.to_be_bytes()); // attributes
    out
}

struct Pool {
    bytes: Vec<u8>,
    next: u16,
}

impl Default for Pool {
    fn default() -> Self {
        Self {
            bytes: Vec::new(),
            next: 1,
        }
    }
}

impl Pool {
    fn utf8(&mut self, value: &str) -> u16 {
        let index = self.next;
        self.bytes.push(1);
        self.bytes.extend_from_slice(&(value.len() as u16).to_be_bytes());
        self.bytes.extend_from_slice(value.as_bytes());
        self.next += 1;
        index
    }

    fn class(&mut self, name: &str) -> u16 {
        let name_index = self.utf8(name);
        let index = self.next;
        self.bytes.push(7);
        self.bytes.extend_from_slice(&name_index.to_be_bytes());
        self.next += 1;
        index
    }

    fn long(&mut self, value: i64) {
        self.bytes.push(5);
        self.bytes.extend_from_slice(&value.to_be_bytes());
        self.next += 2;
    }

    fn double(&mut self, value: f64) {
        self.bytes.push(6);
        self.bytes.extend_from_slice(&value.to_bits().to_be_bytes());
        self.next += 2;
    }
}

pub fn write_class_dir(root: &Path, classes: &[Compiled]) {
    for compiled in classes {
        let path = root.join(format!("{}.class", compiled.name));
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, class_file(compiled)).unwrap();
    }
}

pub fn write_jar(path: &Path, classes: &[Compiled]) {
    let file = File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    zip.start_file("META-INF/MANIFEST.MF", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(b"Manifest-Version: 1.0\n").unwrap();
    for compiled in classes {
        zip.start_file(format!("{}.class", compiled.name), SimpleFileOptions::default())
            .unwrap();
        zip.write_all(&class_file(compiled)).unwrap();
    }
    zip.finish().unwrap();
}

pub fn write_sources(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let path = root.join(path);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }
}

/// The fixture project on disk, once compiled and once as source, sharing
/// the same library jar and runtime.
pub struct Workspace {
    pub temp: TempDir,
    pub classes: PathBuf,
    pub sources: PathBuf,
    pub library: PathBuf,
    pub runtime: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let temp = tempfile::tempdir().unwrap();
        let classes = temp.path().join("target/classes");
        let sources = temp.path().join("src/main/java");
        let library = temp.path().join("lib/spring-beans.jar");
        let runtime = temp.path().join("jdk/jre/lib/rt.jar");

        write_class_dir(&classes, PROJECT_CLASSES);
        write_sources(&sources, PROJECT_SOURCES);
        std::fs::create_dir_all(library.parent().unwrap()).unwrap();
        write_jar(&library, LIBRARY_CLASSES);
        std::fs::create_dir_all(runtime.parent().unwrap()).unwrap();
        write_jar(&runtime, RUNTIME_CLASSES);

        Self {
            temp,
            classes,
            sources,
            library,
            runtime,
        }
    }

    pub fn bytecode_layout(&self, id: &str) -> ProjectLayout {
        let mut layout = ProjectLayout::new(id);
        layout.output_dirs.push(self.classes.clone());
        layout.libraries.push(self.library.clone());
        layout.jdk = Some(self.runtime.clone());
        layout
    }

    pub fn source_layout(&self, id: &str) -> ProjectLayout {
        let mut layout = ProjectLayout::new(id);
        layout.source_roots.push(self.sources.clone());
        layout.libraries.push(self.library.clone());
        layout.jdk = Some(self.runtime.clone());
        layout
    }
}
