//! Thumbnail decoding and in-memory caching

use crate::asset::{AssetId, Thumbnail, ThumbnailSize};
use crate::AppError;
use image::ImageReader;
use parking_lot::Mutex;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

/// Decode an image file and shrink it to fit `size`, keeping the aspect ratio
pub fn decode_thumbnail(path: &Path, asset: &AssetId, size: ThumbnailSize) -> Result<Thumbnail, AppError> {
    tracing::debug!("Decoding thumbnail: {} ({}x{})", path.display(), size.width, size.height);

    let data = std::fs::read(path)?;

    let img = ImageReader::new(Cursor::new(&data))
        .with_guessed_format()?
        .decode()?;

    let thumb = img.thumbnail(size.width, size.height);
    let rgba = thumb.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(Thumbnail {
        asset: asset.clone(),
        width,
        height,
        data: rgba.into_raw(),
    })
}

type CacheKey = (AssetId, ThumbnailSize);

/// Small LRU over a Vec; capacities here are in the tens
struct LruCache<K, V> {
    capacity: usize,
    entries: Vec<(K, V, u64)>, // key, value, access_order
    order_counter: u64,
}

impl<K: Eq, V> LruCache<K, V> {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
            order_counter: 0,
        }
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let idx = self.entries.iter().position(|(k, _, _)| k == key)?;
        self.order_counter += 1;
        self.entries[idx].2 = self.order_counter;
        Some(&self.entries[idx].1)
    }

    fn insert(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }
        self.order_counter += 1;

        if let Some(idx) = self.entries.iter().position(|(k, _, _)| k == &key) {
            self.entries[idx].1 = value;
            self.entries[idx].2 = self.order_counter;
            return;
        }

        if self.entries.len() >= self.capacity {
            if let Some((idx, _)) = self
                .entries
                .iter()
                .enumerate()
                .min_by_key(|(_, (_, _, order))| *order)
            {
                self.entries.remove(idx);
            }
        }

        self.entries.push((key, value, self.order_counter));
    }

    fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) {
        self.entries.retain(|(k, _, _)| keep(k));
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Decoded thumbnails kept in memory, least recently used evicted first
pub struct ThumbnailCache {
    inner: Mutex<LruCache<CacheKey, Arc<Thumbnail>>>,
}

impl ThumbnailCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn get(&self, asset: &AssetId, size: ThumbnailSize) -> Option<Arc<Thumbnail>> {
        self.inner.lock().get(&(asset.clone(), size)).cloned()
    }

    pub fn insert(&self, size: ThumbnailSize, thumbnail: Arc<Thumbnail>) {
        self.inner.lock().insert((thumbnail.asset.clone(), size), thumbnail);
    }

    /// Drop every size cached for `asset`
    pub fn evict(&self, asset: &AssetId) {
        self.inner.lock().retain(|(id, _)| id != asset);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
