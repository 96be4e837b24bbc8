//! Image scanning - enumerate the pictures of a library folder

use crate::{FsError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Extensions recognised as images out of the box
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "tiff", "tif",
];

/// Image file found in a library folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    /// Creation time, falling back to modification time where the platform has none
    pub created: Option<SystemTime>,
}

impl ImageEntry {
    /// Create an entry from a path, reading its metadata
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).map_err(|e| FsError::from_io(e, path))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let created = metadata.created().or_else(|_| metadata.modified()).ok();

        Ok(Self {
            path: path.to_path_buf(),
            name,
            size: metadata.len(),
            created,
        })
    }
}

/// Options for scanning a folder
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub recursive: bool,
    pub show_hidden: bool,
    /// Lowercase extensions without the leading dot
    pub extensions: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            recursive: false,
            show_hidden: false,
            extensions: IMAGE_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
        }
    }
}

impl ScanOptions {
    /// Add extra extensions on top of the defaults
    pub fn with_extra_extensions<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for ext in extra {
            let ext = ext.as_ref().trim_start_matches('.').to_lowercase();
            if !ext.is_empty() && !self.extensions.contains(&ext) {
                self.extensions.push(ext);
            }
        }
        self
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .map(|e| self.extensions.contains(&e))
            .unwrap_or(false)
    }
}

/// Scan a folder for images, newest first.
///
/// Entries that cannot be read are skipped. Ties on the timestamp are
/// broken by path so the order is stable across scans.
pub fn scan_images<P: AsRef<Path>>(root: P, options: &ScanOptions) -> Result<Vec<ImageEntry>> {
    let root = root.as_ref();

    if !root.exists() {
        return Err(FsError::NotFound(root.display().to_string()));
    }

    if !root.is_dir() {
        return Err(FsError::InvalidPath(format!("Not a directory: {}", root.display())));
    }

    let mut entries = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let read = match fs::read_dir(&dir) {
            Ok(read) => read,
            // The root itself must be readable, nested folders are best effort
            Err(e) if dir == root => return Err(FsError::from_io(e, root)),
            Err(e) => {
                tracing::debug!("Skipping unreadable folder {}: {}", dir.display(), e);
                continue;
            }
        };

        for entry in read.flatten() {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();

            if !options.show_hidden && is_hidden_file(&path, &name) {
                continue;
            }

            let Ok(file_type) = entry.file_type() else {
                continue;
            };

            if file_type.is_dir() {
                if options.recursive {
                    pending.push(path);
                }
                continue;
            }

            if !options.accepts(&path) {
                continue;
            }

            match ImageEntry::from_path(&path) {
                Ok(image) => entries.push(image),
                Err(e) => tracing::debug!("Skipping {}: {}", path.display(), e),
            }
        }
    }

    sort_newest_first(&mut entries);
    tracing::debug!("Scanned {} images under {}", entries.len(), root.display());

    Ok(entries)
}

fn sort_newest_first(entries: &mut [ImageEntry]) {
    entries.sort_by(|a, b| b.created.cmp(&a.created).then_with(|| a.path.cmp(&b.path)));
}

/// Check whether a file is an image by extension alone
pub fn is_supported_image(path: &Path) -> bool {
    ScanOptions::default().accepts(path)
}

#[cfg(windows)]
fn is_hidden_file(path: &Path, _name: &str) -> bool {
    use std::os::windows::fs::MetadataExt;

    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;

    fs::metadata(path)
        .map(|m| m.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0)
        .unwrap_or(false)
}

#[cfg(not(windows))]
fn is_hidden_file(_path: &Path, name: &str) -> bool {
    name.starts_with('.')
}
