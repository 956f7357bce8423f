//! Monospace font loading and glyph drawing.
//!
//! Two kinds of font are supported:
//! - the builtin 6x13 bitmap font, drawn through `embedded-graphics`
//! - TrueType/OpenType files, rasterized with `ab_glyph` at a pixel size

use std::convert::Infallible;
use std::path::{Path, PathBuf};

use ab_glyph::{point, Font, FontVec, GlyphId, PxScale, ScaleFont};
use embedded_graphics::mono_font::{ascii::FONT_6X13, MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, Drawable, OriginDimensions, Pixel, Point, Size};
use embedded_graphics::text::{Baseline, Text};
use image::{Rgba, RgbaImage};

use super::color::Color;
use super::error::RenderError;

/// Font size used for font files when none is configured.
pub const DEFAULT_FONT_SIZE: f32 = 13.0;

/// Where the rasterizer gets its font from.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FontSource {
    /// Builtin fixed 6x13 bitmap font
    #[default]
    Builtin,
    /// Font file scaled to `size` pixels
    File { path: PathBuf, size: f32 },
}

impl FontSource {
    pub fn file(path: impl Into<PathBuf>, size: f32) -> Self {
        FontSource::File {
            path: path.into(),
            size,
        }
    }
}

/// A font ready for drawing.
pub enum LoadedFont {
    Bitmap(&'static MonoFont<'static>),
    Outline { font: FontVec, scale: PxScale },
}

impl LoadedFont {
    pub fn load(source: &FontSource) -> Result<Self, RenderError> {
        match source {
            FontSource::Builtin => Ok(LoadedFont::Bitmap(&FONT_6X13)),
            FontSource::File { path, size } => load_file(path, *size),
        }
    }

    /// Rendered height of one line in pixels.
    pub fn line_height(&self) -> u32 {
        match self {
            LoadedFont::Bitmap(font) => font.character_size.height,
            LoadedFont::Outline { font, scale } => font.as_scaled(*scale).height().ceil() as u32,
        }
    }

    /// Draw `line` with its top-left corner at `(x, y)`.
    pub fn draw_line(&self, canvas: &mut RgbaImage, x: u32, y: u32, line: &str, color: Color) {
        match self {
            LoadedFont::Bitmap(font) => draw_bitmap(*font, canvas, x, y, line, color),
            LoadedFont::Outline { font, scale } => draw_outline(font, *scale, canvas, x, y, line, color),
        }
    }
}

fn load_file(path: &Path, size: f32) -> Result<LoadedFont, RenderError> {
    if !size.is_finite() || size <= 0.0 {
        return Err(RenderError::FontLoad {
            path: path.to_path_buf(),
            reason: format!("font size must be positive, got {size}"),
        });
    }

    let data = std::fs::read(path).map_err(|source| RenderError::FontRead {
        path: path.to_path_buf(),
        source,
    })?;
    let font = FontVec::try_from_vec(data).map_err(|e| RenderError::FontLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    log::debug!("Loaded font {} at {}px", path.display(), size);
    Ok(LoadedFont::Outline {
        font,
        scale: PxScale::from(size),
    })
}

/// Alpha-blend `color` over `dst` with the given coverage (0.0 - 1.0).
pub(crate) fn blend(dst: &mut Rgba<u8>, color: Color, coverage: f32) {
    let alpha = coverage.clamp(0.0, 1.0) * f32::from(color.a) / 255.0;
    let src = color.to_rgba();
    for i in 0..3 {
        let mixed = f32::from(src[i]) * alpha + f32::from(dst.0[i]) * (1.0 - alpha);
        dst.0[i] = mixed.round() as u8;
    }
    let dst_alpha = f32::from(dst.0[3]);
    dst.0[3] = (dst_alpha + (255.0 - dst_alpha) * alpha).round() as u8;
}

/// `DrawTarget` over an RGBA image that paints "on" pixels in one color.
struct ImageTarget<'a> {
    image: &'a mut RgbaImage,
    color: Color,
}

impl OriginDimensions for ImageTarget<'_> {
    fn size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }
}

impl DrawTarget for ImageTarget<'_> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, on) in pixels {
            if on != BinaryColor::On {
                continue;
            }
            let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) else {
                continue;
            };
            if x < self.image.width() && y < self.image.height() {
                blend(self.image.get_pixel_mut(x, y), self.color, 1.0);
            }
        }
        Ok(())
    }
}

fn draw_bitmap(
    font: &'static MonoFont<'static>,
    canvas: &mut RgbaImage,
    x: u32,
    y: u32,
    line: &str,
    color: Color,
) {
    let origin = Point::new(
        i32::try_from(x).unwrap_or(i32::MAX),
        i32::try_from(y).unwrap_or(i32::MAX),
    );
    let style = MonoTextStyle::new(font, BinaryColor::On);
    let mut target = ImageTarget { image: canvas, color };
    // Infallible target
    let _ = Text::with_baseline(line, origin, style, Baseline::Top).draw(&mut target);
}

fn draw_outline(
    font: &FontVec,
    scale: PxScale,
    canvas: &mut RgbaImage,
    x: u32,
    y: u32,
    line: &str,
    color: Color,
) {
    let scaled = font.as_scaled(scale);
    let mut caret = point(x as f32, y as f32 + scaled.ascent());
    let mut previous: Option<GlyphId> = None;
    let (width, height) = canvas.dimensions();

    for c in line.chars() {
        let id = font.glyph_id(c);
        if let Some(prev) = previous {
            caret.x += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scale, caret);
        caret.x += scaled.h_advance(id);
        previous = Some(id);

        let Some(outlined) = font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|gx, gy, coverage| {
            let px = bounds.min.x as i64 + i64::from(gx);
            let py = bounds.min.y as i64 + i64::from(gy);
            if px < 0 || py < 0 || px >= i64::from(width) || py >= i64::from(height) {
                return;
            }
            blend(canvas.get_pixel_mut(px as u32, py as u32), color, coverage);
        });
    }
}
