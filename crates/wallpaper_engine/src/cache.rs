use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use engine_logging::engine_warn;
use rand::seq::SliceRandom;
use rand::Rng;

/// Extensions a cached file must carry to be offered as a wallpaper.
pub const CACHE_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Flat directory of previously accepted images. The directory listing is the
/// only state; there is no index file.
#[derive(Debug, Clone)]
pub struct ImageCache {
    dir: PathBuf,
}

impl ImageCache {
    /// Relative directories are anchored at the current working directory so
    /// every path handed out is absolute.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let dir = std::path::absolute(&dir).unwrap_or(dir);
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of `name` inside the cache, if a regular file of that name exists.
    pub fn lookup(&self, name: &str) -> Option<PathBuf> {
        let path = self.dir.join(name);
        path.is_file().then_some(path)
    }

    /// Cached images, sorted by path. A missing directory is an empty cache.
    pub fn list_images(&self) -> Vec<PathBuf> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                engine_warn!("Failed to list cache dir {:?}: {}", self.dir, err);
                return Vec::new();
            }
        };

        let mut images: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(is_image_file_name)
            })
            .collect();
        images.sort();
        images
    }

    /// One cached image chosen uniformly at random, or `None` when empty.
    pub fn random_image<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<PathBuf> {
        self.list_images().choose(rng).cloned()
    }

    pub fn remove(&self, path: &Path) -> io::Result<()> {
        match fs::remove_file(path) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

pub fn is_image_file_name(name: &str) -> bool {
    if name.starts_with('.') {
        return false;
    }
    name.rsplit_once('.').is_some_and(|(stem, ext)| {
        !stem.is_empty()
            && CACHE_IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
    })
}
