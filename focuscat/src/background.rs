//! Picture behind the editor.
//!
//! Large photos are downsized before upload, the file on disk is never
//! touched. Drawing uses "cover" scaling: the picture fills the whole area
//! and the overflow on one axis is cropped evenly from both sides.

use egui::{pos2, Color32, ColorImage, Context, Painter, Rect, TextureHandle, TextureOptions, Vec2};
use image::imageops::FilterType;
use std::path::{Path, PathBuf};

/// Longest side kept in GPU memory.
pub const MAX_TEXTURE_SIDE: u32 = 2048;

#[derive(Debug)]
pub enum LoadError {
    NotFound(PathBuf),
    Decode(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::NotFound(p) => write!(f, "file not found: {}", p.display()),
            LoadError::Decode(e) => write!(f, "cannot read image: {}", e),
        }
    }
}

impl std::error::Error for LoadError {}

pub struct Background {
    pub path: PathBuf,
    texture: TextureHandle,
}

impl Background {
    pub fn load(ctx: &Context, path: &Path) -> Result<Self, LoadError> {
        let color_image = decode(path)?;
        let texture = ctx.load_texture("focuscat-background", color_image, TextureOptions::LINEAR);
        Ok(Self { path: path.to_path_buf(), texture })
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    pub fn paint(&self, painter: &Painter, rect: Rect) {
        let uv = cover_uv(self.texture.size_vec2(), rect.size());
        painter.image(self.texture.id(), rect, uv, Color32::WHITE);
    }
}

/// Decode and downsize an image file into egui's pixel format.
pub fn decode(path: &Path) -> Result<ColorImage, LoadError> {
    if !path.is_file() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    let image = image::open(path).map_err(|e| LoadError::Decode(e.to_string()))?;
    let image = if image.width() > MAX_TEXTURE_SIDE || image.height() > MAX_TEXTURE_SIDE {
        image.resize(MAX_TEXTURE_SIDE, MAX_TEXTURE_SIDE, FilterType::Triangle)
    } else {
        image
    };
    let rgba = image.to_rgba8();
    let (w, h) = rgba.dimensions();
    Ok(ColorImage::from_rgba_unmultiplied([w as usize, h as usize], rgba.as_raw()))
}

/// UV rectangle that crops a `source` sized texture to fill `target` while
/// keeping its aspect ratio.
pub fn cover_uv(source: Vec2, target: Vec2) -> Rect {
    let full = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
    if source.x <= 0.0 || source.y <= 0.0 || target.x <= 0.0 || target.y <= 0.0 {
        return full;
    }
    let scale = (target.x / source.x).max(target.y / source.y);
    let visible_w = (target.x / (source.x * scale)).min(1.0);
    let visible_h = (target.y / (source.y * scale)).min(1.0);
    let x0 = (1.0 - visible_w) / 2.0;
    let y0 = (1.0 - visible_h) / 2.0;
    Rect::from_min_max(pos2(x0, y0), pos2(x0 + visible_w, y0 + visible_h))
}

/// Translucent rounded panel drawn under the text.
pub fn paint_shade(painter: &Painter, rect: Rect, alpha: u8) {
    painter.rect_filled(rect, 5.0, Color32::from_black_alpha(alpha));
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_same_aspect_uses_whole_image() {
        let uv = cover_uv(vec2(800.0, 600.0), vec2(400.0, 300.0));
        assert!(approx(uv.min.x, 0.0) && approx(uv.max.x, 1.0));
        assert!(approx(uv.min.y, 0.0) && approx(uv.max.y, 1.0));
    }

    #[test]
    fn test_wide_image_crops_sides() {
        // 2:1 picture into a square: half the width stays visible, centered
        let uv = cover_uv(vec2(2000.0, 1000.0), vec2(500.0, 500.0));
        assert!(approx(uv.min.x, 0.25) && approx(uv.max.x, 0.75));
        assert!(approx(uv.min.y, 0.0) && approx(uv.max.y, 1.0));
    }

    #[test]
    fn test_tall_image_crops_top_and_bottom() {
        let uv = cover_uv(vec2(500.0, 1000.0), vec2(1000.0, 1000.0));
        assert!(approx(uv.height(), 0.5));
        assert!(approx(uv.center().y, 0.5));
        assert!(approx(uv.width(), 1.0));
    }

    #[test]
    fn test_degenerate_sizes_do_not_panic() {
        let full = cover_uv(vec2(0.0, 0.0), vec2(100.0, 100.0));
        assert!(approx(full.width(), 1.0));
        let full = cover_uv(vec2(100.0, 100.0), vec2(0.0, 50.0));
        assert!(approx(full.height(), 1.0));
    }

    #[test]
    fn test_decode_missing_and_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("none.png");
        assert!(matches!(decode(&missing), Err(LoadError::NotFound(_))));

        let junk = dir.path().join("junk.png");
        std::fs::write(&junk, b"not a picture").unwrap();
        assert!(matches!(decode(&junk), Err(LoadError::Decode(_))));
    }

    #[test]
    fn test_decode_small_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();
        let decoded = decode(&path).unwrap();
        assert_eq!(decoded.size, [3, 2]);
        assert_eq!(decoded.pixels[0], Color32::from_rgb(10, 20, 30));
    }
}
