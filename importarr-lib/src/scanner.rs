//! Directory scanner for media collections.
//!
//! Lists the immediate subdirectories of a source path; each one is a
//! title candidate whose name becomes the lookup term. Loose files and
//! dot-prefixed directories are ignored.

use std::path::{Path, PathBuf};

/// A local media folder awaiting reconciliation against the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFolder {
    /// The directory's base name, used as the free-text lookup term.
    pub name: String,
    /// Full path to the directory.
    pub path: PathBuf,
}

/// List the immediate subdirectories of `source`, sorted by name.
///
/// Sorting keeps enumeration order (and therefore batch boundaries) stable
/// across runs.
pub fn scan_media_folders(source: &Path) -> std::io::Result<Vec<MediaFolder>> {
    let mut folders: Vec<MediaFolder> = Vec::new();
    let mut dir_entries: Vec<std::fs::DirEntry> = std::fs::read_dir(source)?.flatten().collect();
    dir_entries.sort_by_key(|e| e.path());

    for entry in &dir_entries {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if name.starts_with('.') {
                continue;
            }
            folders.push(MediaFolder {
                name: name.to_string(),
                path,
            });
        }
    }

    Ok(folders)
}
