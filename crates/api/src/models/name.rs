use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;

/// Separator between packages in the internal (binary) form.
pub const PACKAGE_SEPARATOR: char = '/';

/// Separator between packages in the qualified (source) form.
pub const QUALIFIED_SEPARATOR: char = '.';

/// Separator between an enclosing type and a nested type.
pub const NESTED_SEPARATOR: char = '$';

/// Internal name of the universal root type.
pub const ROOT_TYPE: &str = "java/lang/Object";

/// A fully qualified class or interface name in internal form.
///
/// Packages are joined with `/` and nested types with `$`, so
/// `org.OuterClassA$InnerClassA` is stored as `org/OuterClassA$InnerClassA`.
/// This is the form class files use and the form every cache is keyed by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassName(SmolStr);

impl ClassName {
    /// Build from an internal name (`org/sub/ClassB`).
    pub fn new(internal: impl AsRef<str>) -> Self {
        Self(SmolStr::new(internal.as_ref()))
    }

    /// Build from a qualified name (`org.sub.ClassB`).
    ///
    /// Already-internal names pass through unchanged.
    pub fn from_qualified(qualified: &str) -> Self {
        Self(SmolStr::new(qualified.replace(QUALIFIED_SEPARATOR, "/")))
    }

    pub fn root() -> Self {
        Self(SmolStr::new_static(ROOT_TYPE))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this names the universal root type.
    pub fn is_root(&self) -> bool {
        self.0.as_str() == ROOT_TYPE
    }

    /// Render as a qualified name (`org.sub.ClassB`, `org.Outer$Inner`).
    pub fn to_qualified(&self) -> String {
        self.0.replace(PACKAGE_SEPARATOR, ".")
    }

    /// Package part in internal form; empty for the default package.
    pub fn package(&self) -> &str {
        self.0
            .rfind(PACKAGE_SEPARATOR)
            .map(|idx| &self.0[..idx])
            .unwrap_or("")
    }

    /// Binary simple name, i.e. everything after the last package separator.
    ///
    /// For nested types this still includes the enclosing names (`Outer$Inner`).
    pub fn binary_simple_name(&self) -> &str {
        self.0
            .rfind(PACKAGE_SEPARATOR)
            .map(|idx| &self.0[idx + 1..])
            .unwrap_or(self.0.as_str())
    }

    /// Innermost simple name (`Inner` for `org/Outer$Inner`).
    pub fn simple_name(&self) -> &str {
        let binary = self.binary_simple_name();
        binary
            .rfind(NESTED_SEPARATOR)
            .map(|idx| &binary[idx + 1..])
            .unwrap_or(binary)
    }

    /// Top-level type this name belongs to (itself when not nested).
    pub fn top_level(&self) -> ClassName {
        let pkg_len = self.0.rfind(PACKAGE_SEPARATOR).map(|i| i + 1).unwrap_or(0);
        match self.0[pkg_len..].find(NESTED_SEPARATOR) {
            Some(idx) => ClassName::new(&self.0[..pkg_len + idx]),
            None => self.clone(),
        }
    }

    /// Nested type names below the top-level type, outermost first.
    pub fn nested_path(&self) -> Vec<&str> {
        self.binary_simple_name()
            .split(NESTED_SEPARATOR)
            .skip(1)
            .collect()
    }

    /// Name of a type nested directly inside this one.
    pub fn nested(&self, simple_name: &str) -> ClassName {
        ClassName::new(format!("{}{}{}", self.0, NESTED_SEPARATOR, simple_name))
    }

    /// Name of a top-level type in the given internal package.
    pub fn in_package(package: &str, simple_name: &str) -> ClassName {
        if package.is_empty() {
            ClassName::new(simple_name)
        } else {
            ClassName::new(format!("{}{}{}", package, PACKAGE_SEPARATOR, simple_name))
        }
    }

    /// Relative path of the compiled class file (`org/sub/ClassB.class`).
    pub fn class_file_path(&self) -> String {
        format!("{}.class", self.0)
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ClassName {
    fn from(s: &str) -> Self {
        Self::from_qualified(s)
    }
}

impl From<String> for ClassName {
    fn from(s: String) -> Self {
        Self::from_qualified(&s)
    }
}

impl AsRef<str> for ClassName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
