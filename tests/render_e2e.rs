//! End-to-end tests for the text rasterizer.
//!
//! Renders real text to PNG temp files and reads them back with the
//! `image` crate to check size, colors and temp file ownership.

use monosay::bubble::{format_bubble, Mascot};
use monosay::render::*;
use tempfile::TempDir;

const FIXTURE_FONT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/DejaVuSansMono.ttf");

fn load(image: &RenderedImage) -> image::RgbaImage {
    image::open(image.path())
        .expect("rendered file should decode")
        .to_rgba8()
}

// ==================== Canvas Size Tests ====================

#[test]
fn test_canvas_follows_line_count_and_columns() {
    let style = RenderStyle::default().with_columns(50);
    let text = format_bubble("hello from the rasterizer", 40, Mascot::Cow).unwrap();
    let lines = layout_lines(&text, 50).len() as u32;

    let image = render(&text, &style).unwrap();
    assert_eq!(image.height(), 13 * (lines + 1));
    assert_eq!(image.width(), (50 + 10) * 13 / 2);

    let decoded = load(&image);
    assert_eq!(decoded.dimensions(), (image.width(), image.height()));
}

#[test]
fn test_blank_text_renders_one_line_canvas() {
    let image = render("   \n\n  \t ", &RenderStyle::default()).unwrap();
    assert_eq!(image.height(), 13);
    assert_eq!(image.width(), (80 + 10) * 13 / 2);
}

#[test]
fn test_long_line_is_wrapped_to_columns() {
    let text = "x".repeat(25);
    let image = render(&text, &RenderStyle::default().with_columns(10)).unwrap();
    // 25 columns at 10 per line -> 3 lines + 1 spare
    assert_eq!(image.height(), 13 * 4);
}

#[test]
fn test_carriage_return_starts_a_new_line() {
    let image = render("ab\rcd", &RenderStyle::default()).unwrap();
    // 2 lines + 1 spare
    assert_eq!(image.height(), 13 * 3);
}

// ==================== Pixel Tests ====================

#[test]
fn test_background_and_text_colors() {
    let style = RenderStyle {
        color: Color::rgb(255, 0, 0),
        background: Color::rgb(0, 0, 255),
        ..RenderStyle::default()
    };
    let image = render("MMMM", &style).unwrap();
    let pixels = load(&image);

    // Spare bottom line is pure background
    let bottom = pixels.get_pixel(0, pixels.height() - 1);
    assert_eq!(bottom.0, [0, 0, 255, 255]);

    // Some text was drawn in the foreground color
    assert!(pixels.pixels().any(|p| p.0 == [255, 0, 0, 255]));
}

#[test]
fn test_left_padding_is_respected() {
    let style = RenderStyle {
        color: Color::rgb(255, 255, 255),
        left_padding: 20,
        ..RenderStyle::default()
    };
    let image = render("MMMM", &style).unwrap();
    let pixels = load(&image);

    for y in 0..pixels.height() {
        for x in 0..20 {
            assert_eq!(pixels.get_pixel(x, y).0, [0, 0, 0, 255], "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn test_output_has_alpha_channel() {
    let style = RenderStyle {
        background: "#00000000".parse().unwrap(),
        ..RenderStyle::default()
    };
    let image = render("see-through", &style).unwrap();
    let decoded = image::open(image.path()).unwrap();
    assert!(decoded.color().has_alpha());
    assert_eq!(decoded.to_rgba8().get_pixel(0, decoded.height() - 1).0[3], 0);
}

// ==================== Font File Tests ====================

#[test]
fn test_font_file_renders_antialiased_text() {
    let style = RenderStyle {
        color: Color::rgb(255, 255, 255),
        font: FontSource::file(FIXTURE_FONT, 13.0),
        ..RenderStyle::default()
    };
    let line_height = LoadedFont::load(&style.font).unwrap().line_height();
    assert!(line_height > 0);

    let image = render("hello\nworld", &style).unwrap();
    assert_eq!(image.height(), line_height * 3);
    assert_eq!(image.width(), (80 + 10) * line_height / 2);

    let pixels = load(&image);
    let drawn = pixels.pixels().filter(|p| p.0 != [0, 0, 0, 255]).count();
    assert!(drawn > 100, "only {} pixels drawn", drawn);
    // Partial coverage blends toward the background
    assert!(
        pixels
            .pixels()
            .any(|p| p.0[0] > 0 && p.0[0] < 255 && p.0[3] == 255),
        "expected anti-aliased edge pixels"
    );
}

#[test]
fn test_font_file_line_height_scales_with_size() {
    let small = LoadedFont::load(&FontSource::file(FIXTURE_FONT, 13.0)).unwrap();
    let large = LoadedFont::load(&FontSource::file(FIXTURE_FONT, 26.0)).unwrap();
    assert!(large.line_height() > small.line_height());

    let style = RenderStyle {
        font: FontSource::file(FIXTURE_FONT, 26.0),
        ..RenderStyle::default()
    };
    let image = render("big", &style).unwrap();
    assert_eq!(image.height(), large.line_height() * 2);
}

// ==================== Temp File Ownership Tests ====================

#[test]
fn test_temp_file_name_and_drop_cleanup() {
    let image = render("bye", &RenderStyle::default()).unwrap();
    let path = image.path().to_path_buf();
    let name = path.file_name().unwrap().to_string_lossy().to_string();

    assert!(name.starts_with(TEMP_FILE_PREFIX), "name: {}", name);
    assert!(name.ends_with(".png"), "name: {}", name);
    assert!(path.exists());

    drop(image);
    assert!(!path.exists(), "dropping the image should delete the file");
}

#[test]
fn test_each_render_gets_its_own_file() {
    let a = render("a", &RenderStyle::default()).unwrap();
    let b = render("a", &RenderStyle::default()).unwrap();
    assert_ne!(a.path(), b.path());
}

#[test]
fn test_persist_keeps_file() {
    let dir = TempDir::new().unwrap();
    let dest = dir.path().join("kept.png");

    let image = render("keep me", &RenderStyle::default()).unwrap();
    let temp = image.path().to_path_buf();
    image.persist(&dest).unwrap();

    assert!(dest.exists());
    assert!(!temp.exists());
    assert!(image::open(&dest).is_ok());
}

#[test]
fn test_remove_deletes_now() {
    let image = render("gone", &RenderStyle::default()).unwrap();
    let path = image.path().to_path_buf();
    image.remove().unwrap();
    assert!(!path.exists());
}

// ==================== Error Tests ====================

#[test]
fn test_missing_font_is_font_error() {
    let style = RenderStyle {
        font: FontSource::file("/definitely/missing/font.ttf", 13.0),
        ..RenderStyle::default()
    };
    let err = render("text", &style).unwrap_err();
    assert!(err.is_font_error());
}

#[test]
fn test_zero_columns_is_rejected() {
    let err = render("hello", &RenderStyle::default().with_columns(0)).unwrap_err();
    assert!(matches!(err, RenderError::ZeroColumns));
}

#[test]
fn test_oversized_canvas_is_an_error() {
    let err = render("hello", &RenderStyle::default().with_columns(100_000_000)).unwrap_err();
    assert!(matches!(err, RenderError::InvalidCanvas { .. }));
}

#[test]
fn test_zero_size_font_is_rejected() {
    let style = RenderStyle {
        font: FontSource::file("/any/font.ttf", 0.0),
        ..RenderStyle::default()
    };
    assert!(matches!(
        render("text", &style),
        Err(RenderError::FontLoad { .. })
    ));
}
