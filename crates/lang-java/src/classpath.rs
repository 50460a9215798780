//! Ordered lookup of class file bytes.
//!
//! A classpath is a list of directories holding loose class files, jar/zip
//! archives and JDK runtime images. Entries are searched in order and the
//! first hit wins. Archives are opened on first use and kept open until
//! [`Classpath::release`] is called.

use dashmap::{DashMap, DashSet};
use hierscope_api::{ClassName, ReadResult, ReaderError};
use ristretto_jimage::Image;
use std::collections::HashMap;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use zip::ZipArchive;
use zip::result::ZipError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClasspathEntry {
    /// Root of a compiled output tree (`org/sub/ClassB.class` below it).
    Directory(PathBuf),
    /// A jar or zip archive.
    Archive(PathBuf),
    /// A JDK 9+ runtime image (`lib/modules`).
    ModuleImage(PathBuf),
}

impl ClasspathEntry {
    /// Classify `path` by what is on disk: directories hold loose class
    /// files, a file named `modules` is a runtime image, anything else is
    /// opened as a zip.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.is_dir() {
            ClasspathEntry::Directory(path)
        } else if path.file_name().is_some_and(|name| name == "modules") {
            ClasspathEntry::ModuleImage(path)
        } else {
            ClasspathEntry::Archive(path)
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ClasspathEntry::Directory(p)
            | ClasspathEntry::Archive(p)
            | ClasspathEntry::ModuleImage(p) => p,
        }
    }
}

pub struct Classpath {
    entries: Vec<ClasspathEntry>,
    zips: DashMap<PathBuf, Arc<Mutex<ZipArchive<File>>>>,
    images: DashMap<PathBuf, Arc<RuntimeImage>>,
    // Entries that failed to open; skipped until the next release.
    broken: DashSet<PathBuf>,
}

impl Classpath {
    pub fn new(entries: Vec<ClasspathEntry>) -> Self {
        Self {
            entries,
            zips: DashMap::new(),
            images: DashMap::new(),
            broken: DashSet::new(),
        }
    }

    pub fn entries(&self) -> &[ClasspathEntry] {
        &self.entries
    }

    /// Bytes of the class file for `name`, from the first entry that has it.
    ///
    /// An entry that cannot be read is skipped with a warning so the rest of
    /// the classpath stays usable. If no entry has the class and at least one
    /// failed, the first failure is returned.
    pub fn find_class(&self, name: &ClassName) -> ReadResult<Option<Vec<u8>>> {
        let relative = name.class_file_path();
        let mut first_error = None;

        for entry in &self.entries {
            match self.read_from(entry, &relative) {
                Ok(Some(bytes)) => return Ok(Some(bytes)),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(
                        "skipping classpath entry {}: {}",
                        entry.path().display(),
                        e
                    );
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(None),
        }
    }

    /// Whether any entry has a class file for `name`, without reading it.
    pub fn contains(&self, name: &ClassName) -> bool {
        let relative = name.class_file_path();
        self.entries.iter().any(|entry| match entry {
            ClasspathEntry::Directory(root) => root.join(&relative).is_file(),
            ClasspathEntry::Archive(path) => match self.zip(path) {
                Ok(Some(archive)) => archive
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .index_for_name(&relative)
                    .is_some(),
                _ => false,
            },
            ClasspathEntry::ModuleImage(_) => {
                matches!(self.read_from(entry, &relative), Ok(Some(_)))
            }
        })
    }

    /// Close every open archive and forget failed entries.
    pub fn release(&self) {
        let open = self.zips.len() + self.images.len();
        self.zips.clear();
        self.images.clear();
        self.broken.clear();
        if open > 0 {
            tracing::debug!("released {} open archives", open);
        }
    }

    fn read_from(&self, entry: &ClasspathEntry, relative: &str) -> ReadResult<Option<Vec<u8>>> {
        match entry {
            ClasspathEntry::Directory(root) => match std::fs::read(root.join(relative)) {
                Ok(bytes) => Ok(Some(bytes)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            },
            ClasspathEntry::Archive(path) => {
                let Some(archive) = self.zip(path)? else {
                    return Ok(None);
                };
                let mut archive = archive.lock().unwrap_or_else(PoisonError::into_inner);
                match archive.by_name(relative) {
                    Ok(mut file) => {
                        let mut bytes = Vec::with_capacity(file.size() as usize);
                        file.read_to_end(&mut bytes)?;
                        Ok(Some(bytes))
                    }
                    Err(ZipError::FileNotFound) => Ok(None),
                    Err(e) => Err(ReaderError::archive(
                        path.display().to_string(),
                        e.to_string(),
                    )),
                }
            }
            ClasspathEntry::ModuleImage(path) => {
                let Some(image) = self.image(path)? else {
                    return Ok(None);
                };
                image
                    .class_bytes(relative)
                    .map_err(|e| ReaderError::archive(path.display().to_string(), e.to_string()))
            }
        }
    }

    fn zip(&self, path: &Path) -> ReadResult<Option<Arc<Mutex<ZipArchive<File>>>>> {
        if self.broken.contains(path) {
            return Ok(None);
        }
        if let Some(open) = self.zips.get(path) {
            return Ok(Some(open.value().clone()));
        }

        let opened = File::open(path).map_err(ReaderError::from).and_then(|file| {
            ZipArchive::new(file)
                .map_err(|e| ReaderError::archive(path.display().to_string(), e.to_string()))
        });
        match opened {
            Ok(archive) => {
                tracing::debug!("opened archive {}", path.display());
                let archive = Arc::new(Mutex::new(archive));
                self.zips.insert(path.to_path_buf(), archive.clone());
                Ok(Some(archive))
            }
            Err(e) => {
                self.broken.insert(path.to_path_buf());
                Err(e)
            }
        }
    }

    fn image(&self, path: &Path) -> ReadResult<Option<Arc<RuntimeImage>>> {
        if self.broken.contains(path) {
            return Ok(None);
        }
        if let Some(open) = self.images.get(path) {
            return Ok(Some(open.value().clone()));
        }

        match RuntimeImage::open(path) {
            Ok(image) => {
                tracing::debug!(
                    "opened runtime image {} ({} packages)",
                    path.display(),
                    image.packages.len()
                );
                let image = Arc::new(image);
                self.images.insert(path.to_path_buf(), image.clone());
                Ok(Some(image))
            }
            Err(e) => {
                self.broken.insert(path.to_path_buf());
                Err(ReaderError::archive(path.display().to_string(), e.to_string()))
            }
        }
    }
}

/// Modules that define classes in each package of a runtime image.
#[derive(Debug, Default)]
struct PackageIndex(HashMap<String, Vec<String>>);

impl PackageIndex {
    fn insert(&mut self, package: &str, module: &str) {
        let modules = self.0.entry(package.to_string()).or_default();
        if !modules.iter().any(|known| known == module) {
            modules.push(module.to_string());
        }
    }

    /// Modules that may hold the class file at `relative`.
    fn modules_for(&self, relative: &str) -> &[String] {
        let package = relative.rsplit_once('/').map_or("", |(package, _)| package);
        self.0.get(package).map(Vec::as_slice).unwrap_or_default()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// An open runtime image. The package index is built by one pass over the
/// image; later lookups go straight to `/<module>/<path>.class`.
struct RuntimeImage {
    image: Image,
    packages: PackageIndex,
}

impl RuntimeImage {
    fn open(path: &Path) -> ristretto_jimage::Result<Self> {
        let image = Image::from_file(path)?;
        let mut packages = PackageIndex::default();
        for resource in image.iter().flatten() {
            if resource.extension() == "class" {
                packages.insert(resource.parent(), resource.module());
            }
        }
        Ok(Self { image, packages })
    }

    fn class_bytes(&self, relative: &str) -> ristretto_jimage::Result<Option<Vec<u8>>> {
        for module in self.packages.modules_for(relative) {
            match self.image.get_resource(&format!("/{}/{}", module, relative)) {
                Ok(resource) => return Ok(Some(resource.data().to_vec())),
                // A name missing from the image hashes to another entry or none
                Err(
                    ristretto_jimage::Error::ResourceNameMismatch { .. }
                    | ristretto_jimage::Error::InvalidIndex(_),
                ) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }
}
