//! Text rasterizer.
//!
//! Renders multi-line monospace text into a PNG:
//!
//! 1. **Re-wrap** - every non-blank line is wrapped to the column width,
//!    breaking long words and keeping whitespace as typed
//! 2. **Size** - the canvas is derived from the font's line height
//! 3. **Draw** - lines are drawn top to bottom over a background fill
//! 4. **Write** - the image is encoded into a uniquely named temp file
//!
//! The temp file is owned by the returned [`RenderedImage`] and removed when
//! it is dropped, unless it was persisted or handed off first.

mod color;
mod error;
pub mod font;

use std::io::{BufWriter, Write};
use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};
use tempfile::TempPath;

use crate::bubble::{wrap, WrapOptions};

pub use color::{Color, ParseColorError};
pub use error::RenderError;
pub use font::{FontSource, LoadedFont, DEFAULT_FONT_SIZE};

/// Prefix of every temp file written by [`render`].
pub const TEMP_FILE_PREFIX: &str = "monosay-";

/// Default wrap width of the rasterizer in columns.
pub const DEFAULT_WIDTH_COLUMNS: usize = 80;

/// Extra columns added to the width before converting to pixels.
const WIDTH_SLACK_COLUMNS: u64 = 10;

/// Largest canvas [`render`] will allocate, in pixels (64 megapixels).
pub const MAX_CANVAS_PIXELS: u64 = 64 * 1024 * 1024;

/// Visual style for [`render`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub color: Color,
    pub background: Color,
    pub font: FontSource,
    pub left_padding: u32,
    /// Carried for hosts that lay out around the image; not enforced here.
    pub right_padding: u32,
    pub width_columns: usize,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            color: Color::rgb(0x88, 0x88, 0x88),
            background: Color::rgb(0, 0, 0),
            font: FontSource::Builtin,
            left_padding: 3,
            right_padding: 3,
            width_columns: DEFAULT_WIDTH_COLUMNS,
        }
    }
}

impl RenderStyle {
    /// Same style with a different wrap width.
    pub fn with_columns(&self, width_columns: usize) -> Self {
        Self {
            width_columns,
            ..self.clone()
        }
    }
}

/// A rendered PNG in a temporary file.
///
/// The file is deleted when this value is dropped. Use [`persist`] to keep
/// it, or [`into_temp_path`] to hand ownership to another component.
///
/// [`persist`]: RenderedImage::persist
/// [`into_temp_path`]: RenderedImage::into_temp_path
#[derive(Debug)]
pub struct RenderedImage {
    width: u32,
    height: u32,
    path: TempPath,
}

impl RenderedImage {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Move the image to `dest`, keeping it after this value is gone.
    ///
    /// Falls back to copy-and-delete when the temp dir is on another
    /// filesystem.
    pub fn persist(self, dest: &Path) -> Result<(), RenderError> {
        match self.path.persist(dest) {
            Ok(()) => Ok(()),
            Err(e) => {
                log::debug!("Rename to {} failed ({}), copying", dest.display(), e.error);
                std::fs::copy(&e.path, dest)?;
                e.path.close()?;
                Ok(())
            }
        }
    }

    /// Delete the file now, reporting any error.
    pub fn remove(self) -> Result<(), RenderError> {
        self.path.close()?;
        Ok(())
    }

    /// Give up the wrapper and return the raw owner of the temp file.
    pub fn into_temp_path(self) -> TempPath {
        self.path
    }
}

/// Split `text` at line boundaries.
///
/// Besides `\n` and `\r\n` this breaks on a lone `\r`, vertical tab, form
/// feed, the file/group/record separators (`\x1c`-`\x1e`), NEL (U+0085) and
/// the Unicode line and paragraph separators. A final line break does not
/// start another line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..idx]);
        start = idx + c.len_utf8();
        if c == '\r' {
            if let Some(&(next, '\n')) = chars.peek() {
                chars.next();
                start = next + 1;
            }
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Wrap `text` the way the rasterizer lays it out.
///
/// Blank lines are dropped; every other line is wrapped to `width_columns`
/// with long words broken and whitespace kept.
pub fn layout_lines(text: &str, width_columns: usize) -> Vec<String> {
    let options = WrapOptions::new(width_columns).preserve_whitespace();
    split_lines(text)
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .flat_map(|line| wrap(line, &options))
        .collect()
}

/// Canvas size in pixels for `line_count` lines.
///
/// Height leaves one spare line of padding. Width converts columns to pixels
/// with the `(columns + 10) * line_height / 2` approximation rather than
/// measuring glyphs. Canvases with no area, a side beyond `u32`, or more
/// than [`MAX_CANVAS_PIXELS`] pixels are rejected.
pub fn canvas_size(
    line_height: u32,
    line_count: usize,
    width_columns: usize,
) -> Result<(u32, u32), RenderError> {
    let line_height = u64::from(line_height);
    let height = line_height.saturating_mul((line_count as u64).saturating_add(1));
    let width = (width_columns as u64)
        .saturating_add(WIDTH_SLACK_COLUMNS)
        .saturating_mul(line_height)
        / 2;

    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 && width * height <= MAX_CANVAS_PIXELS => Ok((w, h)),
        _ => Err(RenderError::InvalidCanvas { width, height }),
    }
}

/// Rasterize `text` into a PNG temp file.
///
/// # Errors
/// [`RenderError::ZeroColumns`] for a zero column width, font errors when
/// the configured font cannot be loaded, [`RenderError::InvalidCanvas`] when
/// the canvas would be empty or too large, and I/O or encoding errors while
/// writing.
pub fn render(text: &str, style: &RenderStyle) -> Result<RenderedImage, RenderError> {
    if style.width_columns == 0 {
        return Err(RenderError::ZeroColumns);
    }
    let font = LoadedFont::load(&style.font)?;
    let line_height = font.line_height();
    let lines = layout_lines(text, style.width_columns);
    let (width, height) = canvas_size(line_height, lines.len(), style.width_columns)?;

    let image = draw(&font, &lines, width, height, style);

    let mut file = tempfile::Builder::new()
        .prefix(TEMP_FILE_PREFIX)
        .suffix(".png")
        .tempfile()?;
    {
        let mut writer = BufWriter::new(file.as_file_mut());
        image.write_to(&mut writer, ImageFormat::Png)?;
        writer.flush()?;
    }
    let path = file.into_temp_path();

    log::debug!(
        "Rendered {} line(s) into {}x{} image at {}",
        lines.len(),
        width,
        height,
        path.display()
    );

    Ok(RenderedImage {
        width,
        height,
        path,
    })
}

fn draw(font: &LoadedFont, lines: &[String], width: u32, height: u32, style: &RenderStyle) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(width, height, Rgba(style.background.to_rgba()));
    let line_height = font.line_height();

    let mut y = 0u32;
    for line in lines {
        font.draw_line(&mut image, style.left_padding, y, line, style.color);
        y = y.saturating_add(line_height);
    }
    image
}
