use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::file_handler;

/// Errors that can occur during texture generation
#[derive(Error, Debug)]
pub enum TextureGenerationError {
    #[error("Failed to read {0}: {1}")]
    Read(String, #[source] std::io::Error),
    #[error("Failed to decode {0}: {1}")]
    Decode(String, #[source] image::ImageError),
}

/// Caches egui textures by image source, with LRU eviction
pub struct TextureManager {
    texture_cache: HashMap<String, TextureHandle>,
    /// Frame each texture was last used
    last_used: HashMap<String, u64>,
    /// Sources that failed once and are not retried
    failed: HashSet<String>,
    current_frame: u64,
    max_cache_size: usize,
}

impl std::fmt::Debug for TextureManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureManager")
            .field("cached", &self.texture_cache.len())
            .field("failed", &self.failed.len())
            .field("current_frame", &self.current_frame)
            .finish()
    }
}

impl TextureManager {
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            texture_cache: HashMap::new(),
            last_used: HashMap::new(),
            failed: HashSet::new(),
            current_frame: 0,
            max_cache_size: max_cache_size.max(1),
        }
    }

    /// Increments the frame counter, should be called at the start of each frame
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
    }

    /// Gets or creates the texture cached under `key`
    pub fn get_or_create_texture<F>(
        &mut self,
        key: &str,
        generator: F,
        ctx: &Context,
    ) -> Result<TextureId, TextureGenerationError>
    where
        F: FnOnce() -> Result<ColorImage, TextureGenerationError>,
    {
        if let Some(handle) = self.texture_cache.get(key) {
            self.last_used.insert(key.to_owned(), self.current_frame);
            return Ok(handle.id());
        }

        let image = generator()?;
        self.prune_cache_if_needed();

        let handle = ctx.load_texture(key, image, TextureOptions::LINEAR);
        let id = handle.id();
        self.texture_cache.insert(key.to_owned(), handle);
        self.last_used.insert(key.to_owned(), self.current_frame);
        Ok(id)
    }

    /// Texture for an image layer or garment mockup. Failures are logged once.
    pub fn texture_for_source(&mut self, ctx: &Context, src: &str) -> Option<TextureId> {
        if self.failed.contains(src) {
            return None;
        }
        match self.get_or_create_texture(src, || decode_source(src), ctx) {
            Ok(id) => Some(id),
            Err(err) => {
                log::warn!("❌ {err}");
                self.failed.insert(src.to_owned());
                None
            }
        }
    }

    /// Evicts least recently used textures so one more fits
    fn prune_cache_if_needed(&mut self) {
        if self.texture_cache.len() < self.max_cache_size {
            return;
        }

        let mut entries: Vec<(String, u64)> = self
            .last_used
            .iter()
            .map(|(key, frame)| (key.clone(), *frame))
            .collect();
        entries.sort_by_key(|(_, frame)| *frame);

        let to_remove = self.texture_cache.len() + 1 - self.max_cache_size;
        for (key, _) in entries.into_iter().take(to_remove) {
            self.texture_cache.remove(&key);
            self.last_used.remove(&key);
        }
    }

    pub fn cache_size(&self) -> usize {
        self.texture_cache.len()
    }

    #[cfg(test)]
    fn get_texture(&self, key: &str) -> Option<&TextureHandle> {
        self.texture_cache.get(key)
    }
}

fn decode_source(src: &str) -> Result<ColorImage, TextureGenerationError> {
    let path = file_handler::resolve_asset_path(src);
    let bytes = std::fs::read(&path).map_err(|err| TextureGenerationError::Read(src.to_owned(), err))?;
    let image = image::load_from_memory(&bytes)
        .map_err(|err| TextureGenerationError::Decode(src.to_owned(), err))?;
    let size = [image.width() as usize, image.height() as usize];
    let rgba = image.to_rgba8();
    log::info!("🖼️ Loaded texture {}: {}x{}", src, size[0], size[1]);
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white_square() -> Result<ColorImage, TextureGenerationError> {
        Ok(ColorImage::new([10, 10], egui::Color32::WHITE))
    }

    #[test]
    fn repeated_source_hits_cache() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(10);

        let first = manager.get_or_create_texture("a.png", white_square, &ctx).unwrap();
        let second = manager.get_or_create_texture("a.png", white_square, &ctx).unwrap();

        assert_eq!(first, second);
        assert_eq!(manager.cache_size(), 1);
    }

    #[test]
    fn least_recently_used_is_evicted() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(2);

        manager.get_or_create_texture("1.png", white_square, &ctx).unwrap();
        manager.begin_frame();
        manager.get_or_create_texture("2.png", white_square, &ctx).unwrap();
        manager.begin_frame();
        manager.get_or_create_texture("3.png", white_square, &ctx).unwrap();

        assert_eq!(manager.cache_size(), 2);
        assert!(manager.get_texture("1.png").is_none());
        assert!(manager.get_texture("2.png").is_some());
        assert!(manager.get_texture("3.png").is_some());
    }

    #[test]
    fn missing_source_is_remembered() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(4);

        assert!(manager.texture_for_source(&ctx, "/no/such/asset.png").is_none());
        assert!(manager.failed.contains("/no/such/asset.png"));
        assert_eq!(manager.cache_size(), 0);
    }
}
