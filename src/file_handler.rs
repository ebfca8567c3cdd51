use egui::Vec2;
use futures::channel::mpsc;
use std::path::{Path, PathBuf};

use crate::placement::PendingImageLoad;

const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Map an image source to a file path. Sources like `/assets/x.png` are
/// relative to the working directory unless they exist as absolute paths.
pub fn resolve_asset_path(src: &str) -> PathBuf {
    let path = Path::new(src);
    if path.is_absolute() && path.exists() {
        return path.to_path_buf();
    }
    PathBuf::from(src.trim_start_matches("./").trim_start_matches('/'))
}

/// Check if a path looks like an image based on its extension
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Image sources found in the asset gallery directory, sorted by name
pub fn scan_gallery(dir: &Path) -> Vec<String> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            log::warn!("Asset gallery {} unavailable: {}", dir.display(), err);
            return Vec::new();
        }
    };

    let mut sources: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_image_path(path))
        .map(|path| path.to_string_lossy().into_owned())
        .collect();
    sources.sort();
    sources
}

/// Paths of image files dropped onto the window this frame.
/// Other files are skipped with a warning.
pub fn take_dropped_images(ctx: &egui::Context) -> Vec<String> {
    let dropped = ctx.input(|i| i.raw.dropped_files.clone());
    let mut images = Vec::new();

    for file in dropped {
        let Some(path) = file.path else {
            log::warn!("Dropped file {} has no path", file.name);
            continue;
        };
        let file_name = path.display().to_string();

        if !is_image_path(&path) {
            log::warn!("Dropped file is not a supported type: {}", file_name);
            continue;
        }
        log::info!("Processing dropped image: {}", file_name);
        images.push(file_name);
    }
    images
}

/// Overlay listing the files being dragged over the window
pub fn preview_files_being_dropped(ctx: &egui::Context) {
    use egui::{Align2, Color32, FontId, Id, LayerId, Order};

    if ctx.input(|i| i.raw.hovered_files.is_empty()) {
        return;
    }

    let text = ctx.input(|i| {
        let mut text = "Drop to place on the shirt:\n".to_owned();
        for file in &i.raw.hovered_files {
            if let Some(path) = &file.path {
                text += &format!("\n{}", path.display());
            } else {
                text += "\n(Path not available)";
            }
        }
        text
    });

    let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
    let screen_rect = ctx.screen_rect();
    painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
    painter.text(
        screen_rect.center(),
        Align2::CENTER_CENTER,
        text,
        FontId::proportional(20.0),
        Color32::WHITE,
    );
}

/// Result of reading an image's intrinsic size off the UI thread
#[derive(Debug)]
pub struct ImageLoadResult {
    pub pending: PendingImageLoad,
    pub size: Option<Vec2>,
}

/// Reads image dimensions on worker threads; results are drained once per frame.
/// A load is never cancelled: the placement session decides whether it still counts.
pub struct ImageLoader {
    sender: mpsc::UnboundedSender<ImageLoadResult>,
    receiver: mpsc::UnboundedReceiver<ImageLoadResult>,
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ImageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLoader").finish_non_exhaustive()
    }
}

impl ImageLoader {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded();
        Self { sender, receiver }
    }

    pub fn request(&self, pending: PendingImageLoad, ctx: &egui::Context) {
        let sender = self.sender.clone();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let path = resolve_asset_path(&pending.src);
            let size = match image::image_dimensions(&path) {
                Ok((width, height)) => Some(Vec2::new(width as f32, height as f32)),
                Err(err) => {
                    log::error!("Failed to load image {}: {}", pending.src, err);
                    None
                }
            };
            if sender.unbounded_send(ImageLoadResult { pending, size }).is_ok() {
                ctx.request_repaint();
            }
        });
    }

    /// Loads that finished since the last call
    pub fn poll(&mut self) -> Vec<ImageLoadResult> {
        let mut finished = Vec::new();
        while let Ok(result) = self.receiver.try_recv() {
            finished.push(result);
        }
        finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_image_extensions() {
        assert!(is_image_path(Path::new("assets/gallery/flock.PNG")));
        assert!(!is_image_path(Path::new("logo.svg")));
        assert!(!is_image_path(Path::new("notes.txt")));
        assert!(!is_image_path(Path::new("no_extension")));
    }

    #[test]
    fn web_style_sources_resolve_relative() {
        assert_eq!(
            resolve_asset_path("/assets/gallery/flock.png"),
            PathBuf::from("assets/gallery/flock.png")
        );
        assert_eq!(
            resolve_asset_path("./assets/white/slim/front.png"),
            PathBuf::from("assets/white/slim/front.png")
        );
    }
}
