//! Speech bubble formatting.
//!
//! Turns free text into a cowsay-style bubble:
//!
//! ```text
//!   __________
//! / the quick  \
//! | brown fox  |
//! \ jumps over /
//!   ----------
//! ```
//!
//! Text is wrapped to a column width, padded into a fixed-width block,
//! framed with border glyphs and optionally followed by a [`Mascot`].

mod mascot;
pub mod wrap;

pub use mascot::{Mascot, COW_ART, TUX_ART};
pub use wrap::{columns, wrap, WrapOptions};

/// Default bubble width in columns.
pub const DEFAULT_LINE_WIDTH: usize = 40;

/// Errors from bubble formatting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BubbleError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}

/// Format `text` as a speech bubble `line_width` columns wide, followed by
/// the art for `mascot`.
///
/// # Errors
/// [`BubbleError::InvalidInput`] if `text` is blank or `line_width` is zero.
pub fn format_bubble(text: &str, line_width: usize, mascot: Mascot) -> Result<String, BubbleError> {
    if text.trim().is_empty() {
        return Err(BubbleError::InvalidInput("text is empty"));
    }
    if line_width == 0 {
        return Err(BubbleError::InvalidInput("line width must be greater than zero"));
    }

    let lines = wrap(text, &WrapOptions::new(line_width));
    let mut bubble = build_bubble(&lines);
    bubble.push_str(mascot.art());
    Ok(bubble)
}

/// Frame already-wrapped lines with bubble borders.
///
/// Lines are padded with trailing spaces to the widest one. The result has
/// no trailing newline.
pub fn build_bubble<S: AsRef<str>>(lines: &[S]) -> String {
    let maxlen = lines
        .iter()
        .map(|line| columns(line.as_ref()))
        .max()
        .unwrap_or(0);

    let mut out: Vec<String> = Vec::with_capacity(lines.len() + 2);
    out.push(format!("  {}", "_".repeat(maxlen)));

    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        let (left, right) = border(index, lines.len());
        let pad = " ".repeat(maxlen - columns(line));
        out.push(format!("{left} {line}{pad} {right}"));
    }

    out.push(format!("  {}", "-".repeat(maxlen)));
    out.join("\n")
}

/// Display width of the widest line of a formatted block, mascot included.
///
/// Rendering a bubble at fewer columns than this would re-wrap its borders.
pub fn block_columns(block: &str) -> usize {
    block.lines().map(columns).max().unwrap_or(0)
}

/// Left and right border glyphs for line `index` of `count`.
pub fn border(index: usize, count: usize) -> (char, char) {
    if count < 2 {
        ('<', '>')
    } else if index == 0 {
        ('/', '\\')
    } else if index == count - 1 {
        ('\\', '/')
    } else {
        ('|', '|')
    }
}
