//! JDK runtime discovery.
//!
//! Looks for the standard library of a JDK in:
//! - `JAVA_HOME`
//! - macOS `java_home` tool
//! - common installation directories and SDKMAN

use std::path::{Path, PathBuf};

/// Runtime image or `rt.jar` of the first JDK found on this machine.
pub fn find_runtime() -> Option<PathBuf> {
    if let Ok(java_home) = std::env::var("JAVA_HOME") {
        if let Some(runtime) = runtime_in(Path::new(&java_home)) {
            return Some(runtime);
        }
    }

    #[cfg(target_os = "macos")]
    if let Ok(output) = std::process::Command::new("/usr/libexec/java_home").output() {
        if output.status.success() {
            let home = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if let Some(runtime) = runtime_in(Path::new(&home)) {
                return Some(runtime);
            }
        }
    }

    search_roots().into_iter().find_map(|root| {
        if !root.exists() {
            return None;
        }
        // The root may itself be a JDK (e.g. a Homebrew symlink)
        runtime_in(&root).or_else(|| {
            let entries = std::fs::read_dir(&root).ok()?;
            entries.flatten().find_map(|entry| {
                let mut home = entry.path();
                if cfg!(target_os = "macos") && home.join("Contents/Home").exists() {
                    home = home.join("Contents/Home");
                }
                runtime_in(&home)
            })
        })
    })
}

/// The runtime class container inside a JDK home.
///
/// Prefers the Java 9+ module image over the legacy `rt.jar`.
pub fn runtime_in(home: &Path) -> Option<PathBuf> {
    ["lib/modules", "jre/lib/rt.jar", "lib/rt.jar"]
        .iter()
        .map(|relative| home.join(relative))
        .find(|candidate| candidate.is_file())
}

fn search_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();

    #[cfg(target_os = "macos")]
    {
        roots.push(PathBuf::from("/Library/Java/JavaVirtualMachines/"));
        roots.push(PathBuf::from("/opt/homebrew/opt/openjdk/"));
        roots.push(PathBuf::from("/usr/local/opt/openjdk/"));
    }
    #[cfg(target_os = "linux")]
    {
        roots.push(PathBuf::from("/usr/lib/jvm/"));
    }
    #[cfg(target_os = "windows")]
    {
        roots.push(PathBuf::from("C:\\Program Files\\Java\\"));
    }

    if let Some(mut sdkman) = dirs::home_dir() {
        sdkman.push(".sdkman/candidates/java/");
        roots.push(sdkman);
    }
    roots
}
