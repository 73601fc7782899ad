//! Per-import texture cache: each distinct path is decoded at most once.

use std::path::{Path, PathBuf};

use crate::mesh::TextureId;
use crate::texture::{self, ImagePixels};

/// One decoded (or failed) image owned by a model.
#[derive(Clone, Debug)]
pub struct TextureImage {
    /// Relative path as declared by the material; the cache key before
    /// joining with the base directory.
    pub source: String,
    /// `None` when decoding failed: the GPU texture will exist but stay
    /// uninitialized, and the failure is never retried for this import.
    pub pixels: Option<ImagePixels>,
}

struct CacheEntry {
    resolved: PathBuf,
    image: TextureImage,
}

/// Path-keyed dedup cache scoped to a single model import.
///
/// Two imports never share a cache, so re-importing a model decodes its
/// textures again; repeated references within one import do not.
pub struct TextureCache {
    base_dir: PathBuf,
    entries: Vec<CacheEntry>,
}

impl TextureCache {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            entries: Vec::new(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Number of distinct paths seen so far (failed decodes included).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up or decode the image at `base_dir/relative_path`.
    ///
    /// An exact match on the resolved path returns the existing id without
    /// touching the filesystem. On a miss the file is decoded once; a decode
    /// failure is logged and recorded as an entry without pixels so later
    /// references reuse the failed entry instead of retrying.
    pub fn load(&mut self, relative_path: &str) -> TextureId {
        let resolved = self.base_dir.join(relative_path);
        if let Some(id) = self.entries.iter().position(|e| e.resolved == resolved) {
            return id;
        }

        let pixels = match texture::decode(&resolved) {
            Ok(pixels) => {
                log::debug!(
                    "decoded texture {} ({}x{}, {} channels)",
                    resolved.display(),
                    pixels.width,
                    pixels.height,
                    pixels.layout.channels()
                );
                Some(pixels)
            }
            Err(err) => {
                log::warn!("texture failed to load at {}: {err}", resolved.display());
                None
            }
        };

        self.entries.push(CacheEntry {
            resolved,
            image: TextureImage {
                source: relative_path.to_owned(),
                pixels,
            },
        });
        self.entries.len() - 1
    }

    pub fn image(&self, id: TextureId) -> Option<&TextureImage> {
        self.entries.get(id).map(|e| &e.image)
    }

    /// Consume the cache into the model's image table; ids stay valid as
    /// indices into the returned vec.
    pub fn into_images(self) -> Vec<TextureImage> {
        self.entries.into_iter().map(|e| e.image).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ocean3d-cache-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("create fixture dir");
        dir
    }

    fn write_png(dir: &Path, name: &str, w: u32, h: u32) {
        let img = image::RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255]));
        img.save(dir.join(name)).expect("write png fixture");
    }

    #[test]
    fn same_path_decodes_once() {
        let dir = fixture_dir("dedup");
        write_png(&dir, "tex.png", 4, 4);

        let mut cache = TextureCache::new(&dir);
        let a = cache.load("tex.png");
        let b = cache.load("tex.png");
        let c = cache.load("tex.png");
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(cache.len(), 1);
        assert!(cache.image(a).unwrap().pixels.is_some());
    }

    #[test]
    fn distinct_paths_get_distinct_ids() {
        let dir = fixture_dir("distinct");
        write_png(&dir, "a.png", 2, 2);
        write_png(&dir, "b.png", 2, 2);

        let mut cache = TextureCache::new(&dir);
        let a = cache.load("a.png");
        let b = cache.load("b.png");
        assert_ne!(a, b);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn missing_file_yields_uninitialized_entry_without_retry() {
        let dir = fixture_dir("missing");
        let mut cache = TextureCache::new(&dir);
        let a = cache.load("missing.png");
        let b = cache.load("missing.png");
        // The failed entry is cached too: same id, one attempt.
        assert_eq!(a, b);
        assert_eq!(cache.len(), 1);
        assert!(cache.image(a).unwrap().pixels.is_none());
        assert_eq!(cache.image(a).unwrap().source, "missing.png");
    }

    #[test]
    fn separate_caches_do_not_share_entries() {
        let dir = fixture_dir("independent");
        write_png(&dir, "shared.png", 2, 2);

        let mut first = TextureCache::new(&dir);
        let mut second = TextureCache::new(&dir);
        first.load("shared.png");
        second.load("shared.png");
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
    }
}
