//! Text-to-image rendering
//!
//! Rasterizes a formatted summary into a fixed 800x1200 PNG: white
//! background, black text, naive line-by-line layout in input order. Lines
//! past the bottom margin are silently truncated, never wrapped; overlong
//! lines are clipped at the right edge.
//!
//! The PNG is a transient artifact: `RenderedImage` owns a named temp file
//! that is removed when the value drops, so cleanup happens on every exit
//! path, delivery failure included.

pub mod font;

use std::path::Path;

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use image::{Rgb, RgbImage};
use tempfile::NamedTempFile;

use crate::error::Result;
use font::{builtin_glyph, LoadedFont, BUILTIN_GLYPH_COLS, BUILTIN_GLYPH_ROWS};

/// Output image width in pixels.
pub const IMAGE_WIDTH: u32 = 800;

/// Output image height in pixels.
pub const IMAGE_HEIGHT: u32 = 1200;

const LEFT_MARGIN: i32 = 10;
const TOP_MARGIN: i32 = 10;
const LINE_PITCH: i32 = 25;
const BOTTOM_MARGIN: i32 = 20;
const FONT_SIZE: f32 = 16.0;

/// Pixel scale for the built-in 5x7 font (each font pixel becomes 2x2).
const BUILTIN_SCALE: i32 = 2;

/// A rendered summary image backed by a named temp file.
///
/// The file is deleted when this value drops; hold it alive for the duration
/// of delivery.
pub struct RenderedImage {
    file: NamedTempFile,
}

impl RenderedImage {
    /// Path of the PNG on disk, valid until this value drops.
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Render multi-line text into an 800x1200 PNG temp artifact.
///
/// Font candidates are tried in order; when none loads, the built-in bitmap
/// font is used so rendering itself cannot fail for lack of a font. Errors
/// here mean the artifact could not be created or encoded, and the caller is
/// expected to fall back to plain text delivery.
pub fn render_text(text: &str, font_candidates: &[String]) -> Result<RenderedImage> {
    let loaded = font::load_font(font_candidates);
    let mut img = RgbImage::from_pixel(IMAGE_WIDTH, IMAGE_HEIGHT, Rgb([255, 255, 255]));

    let mut y = TOP_MARGIN;
    for line in text.lines() {
        match &loaded {
            LoadedFont::Truetype(font) => draw_line_truetype(&mut img, font, line, LEFT_MARGIN, y),
            LoadedFont::Builtin => draw_line_builtin(&mut img, line, LEFT_MARGIN, y),
        }
        y += LINE_PITCH;
        if y > IMAGE_HEIGHT as i32 - BOTTOM_MARGIN {
            break;
        }
    }

    let file = tempfile::Builder::new()
        .prefix("plugindex-")
        .suffix(".png")
        .tempfile()?;
    img.save(file.path())?;
    Ok(RenderedImage { file })
}

/// Darken one pixel by glyph coverage, clipped to the canvas.
fn blend_pixel(img: &mut RgbImage, x: i32, y: i32, coverage: f32) {
    if x < 0 || y < 0 || x >= IMAGE_WIDTH as i32 || y >= IMAGE_HEIGHT as i32 {
        return;
    }
    let value = ((1.0 - coverage.clamp(0.0, 1.0)) * 255.0) as u8;
    let pixel = img.get_pixel_mut(x as u32, y as u32);
    let darkened = pixel.0[0].min(value);
    pixel.0 = [darkened, darkened, darkened];
}

fn draw_line_truetype(img: &mut RgbImage, font: &FontVec, line: &str, x0: i32, y_top: i32) {
    let scale = PxScale::from(FONT_SIZE);
    let scaled = font.as_scaled(scale);
    let baseline = y_top as f32 + scaled.ascent();

    let mut caret = x0 as f32;
    for ch in line.chars() {
        let id = scaled.glyph_id(ch);
        let glyph = id.with_scale_and_position(scale, point(caret, baseline));
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                blend_pixel(
                    img,
                    bounds.min.x as i32 + gx as i32,
                    bounds.min.y as i32 + gy as i32,
                    coverage,
                );
            });
        }
        caret += scaled.h_advance(id);
        if caret >= IMAGE_WIDTH as f32 {
            break;
        }
    }
}

fn draw_line_builtin(img: &mut RgbImage, line: &str, x0: i32, y_top: i32) {
    let cell_width = (BUILTIN_GLYPH_COLS as i32 + 1) * BUILTIN_SCALE;
    let cell_height = BUILTIN_GLYPH_ROWS as i32 * BUILTIN_SCALE;

    let mut x = x0;
    for ch in line.chars() {
        match builtin_glyph(ch) {
            Some(columns) => {
                for (col, bits) in columns.iter().enumerate() {
                    for row in 0..BUILTIN_GLYPH_ROWS {
                        if bits & (1 << row) != 0 {
                            fill_block(
                                img,
                                x + col as i32 * BUILTIN_SCALE,
                                y_top + row as i32 * BUILTIN_SCALE,
                            );
                        }
                    }
                }
            }
            None => draw_box(img, x, y_top, cell_width - BUILTIN_SCALE, cell_height),
        }
        x += cell_width;
        if x >= IMAGE_WIDTH as i32 {
            break;
        }
    }
}

/// Fill one scaled font pixel.
fn fill_block(img: &mut RgbImage, x: i32, y: i32) {
    for dy in 0..BUILTIN_SCALE {
        for dx in 0..BUILTIN_SCALE {
            blend_pixel(img, x + dx, y + dy, 1.0);
        }
    }
}

/// Hollow box for characters outside the built-in font's coverage.
fn draw_box(img: &mut RgbImage, x: i32, y: i32, width: i32, height: i32) {
    for dx in 0..width {
        blend_pixel(img, x + dx, y, 1.0);
        blend_pixel(img, x + dx, y + height - 1, 1.0);
    }
    for dy in 0..height {
        blend_pixel(img, x, y + dy, 1.0);
        blend_pixel(img, x + width - 1, y + dy, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;
    use std::path::PathBuf;

    /// Candidates that never resolve, forcing the built-in font.
    fn no_fonts() -> Vec<String> {
        vec!["definitely-missing-font.ttf".to_string()]
    }

    #[test]
    fn test_render_produces_png_file() {
        let rendered = render_text("hello\nworld", &no_fonts()).unwrap();
        assert!(rendered.path().exists());
        assert_eq!(
            rendered.path().extension().and_then(|e| e.to_str()),
            Some("png")
        );
    }

    #[test]
    fn test_render_dimensions() {
        let rendered = render_text("dimensions check", &no_fonts()).unwrap();
        let decoded = image::open(rendered.path()).unwrap();
        assert_eq!(decoded.dimensions(), (IMAGE_WIDTH, IMAGE_HEIGHT));
    }

    #[test]
    fn test_render_artifact_removed_on_drop() {
        let rendered = render_text("ephemeral", &no_fonts()).unwrap();
        let path: PathBuf = rendered.path().to_path_buf();
        assert!(path.exists());
        drop(rendered);
        assert!(!path.exists());
    }

    #[test]
    fn test_render_draws_black_text_on_white() {
        let rendered = render_text("####################", &no_fonts()).unwrap();
        let decoded = image::open(rendered.path()).unwrap().to_rgb8();
        let mut black = 0u32;
        let mut white = 0u32;
        for pixel in decoded.pixels() {
            if pixel.0 == [0, 0, 0] {
                black += 1;
            } else if pixel.0 == [255, 255, 255] {
                white += 1;
            }
        }
        assert!(black > 0, "expected some text pixels");
        assert!(white > black, "background should dominate");
    }

    #[test]
    fn test_render_truncates_overflowing_lines() {
        // Far more lines than fit in 1200px at 25px pitch; must not panic and
        // must keep the fixed canvas size.
        let text = (0..200)
            .map(|i| format!("line {}", i))
            .collect::<Vec<_>>()
            .join("\n");
        let rendered = render_text(&text, &no_fonts()).unwrap();
        let decoded = image::open(rendered.path()).unwrap();
        assert_eq!(decoded.dimensions().1, IMAGE_HEIGHT);
    }

    #[test]
    fn test_render_clips_overlong_line() {
        let text = "x".repeat(2000);
        let rendered = render_text(&text, &no_fonts()).unwrap();
        assert!(rendered.path().exists());
    }

    #[test]
    fn test_render_handles_non_ascii() {
        // CJK and emoji fall outside the built-in font; they render as boxes
        // rather than failing.
        let rendered = render_text("📋 已安装插件列表：", &no_fonts()).unwrap();
        assert!(rendered.path().exists());
    }

    #[test]
    fn test_render_empty_text() {
        let rendered = render_text("", &no_fonts()).unwrap();
        let decoded = image::open(rendered.path()).unwrap();
        assert_eq!(decoded.dimensions().0, IMAGE_WIDTH);
    }
}
