//! Greedy word wrapping measured in monospace columns.

use unicode_width::UnicodeWidthChar;

/// Tab stops are expanded to this many columns before wrapping.
pub const TAB_SIZE: usize = 8;

/// Options controlling [`wrap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapOptions {
    /// Maximum columns per line.
    pub width: usize,
    /// Replace every breaking whitespace character with a single space before wrapping.
    pub replace_whitespace: bool,
}

impl WrapOptions {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            replace_whitespace: true,
        }
    }

    /// Keep whitespace characters as they are (tabs are still expanded).
    pub fn preserve_whitespace(mut self) -> Self {
        self.replace_whitespace = false;
        self
    }
}

/// Whitespace the wrapper breaks on: ASCII space, tab, newline, carriage
/// return, vertical tab and form feed.
///
/// No-break spaces (U+00A0, U+202F) and other Unicode spaces stay inside
/// their word.
pub fn is_break_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

/// Display width of `s` in monospace columns.
///
/// Wide glyphs (CJK, most emoji) count as two columns, control characters as zero.
pub fn columns(s: &str) -> usize {
    s.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// Expand tabs to the next multiple of [`TAB_SIZE`] columns.
pub fn expand_tabs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    for c in text.chars() {
        match c {
            '\t' => {
                let pad = TAB_SIZE - column % TAB_SIZE;
                out.extend(std::iter::repeat(' ').take(pad));
                column += pad;
            }
            '\n' | '\r' => {
                out.push(c);
                column = 0;
            }
            _ => {
                out.push(c);
                column += c.width().unwrap_or(0);
            }
        }
    }
    out
}

/// Wrap `text` into lines of at most `options.width` columns.
///
/// Lines break between words. A word wider than the whole line is broken
/// across lines, first filling whatever room is left on the current line.
/// Whitespace is dropped at the start and end of every line, except for
/// the leading whitespace of the text itself.
///
/// Returns an empty vector for text that is empty or all whitespace.
pub fn wrap(text: &str, options: &WrapOptions) -> Vec<String> {
    let width = options.width.max(1);
    let mut text = expand_tabs(text);
    if options.replace_whitespace {
        text = text
            .chars()
            .map(|c| if is_break_space(c) { ' ' } else { c })
            .collect();
    }

    // Chunks are consumed from the back.
    let mut chunks: Vec<String> = split_chunks(&text).into_iter().rev().collect();
    let mut lines: Vec<String> = Vec::new();

    while !chunks.is_empty() {
        let mut line: Vec<String> = Vec::new();
        let mut line_len = 0;

        if !lines.is_empty() && chunks.last().is_some_and(|c| is_blank(c)) {
            chunks.pop();
        }

        while let Some(chunk) = chunks.last() {
            let len = columns(chunk);
            if line_len + len > width {
                break;
            }
            line_len += len;
            if let Some(chunk) = chunks.pop() {
                line.push(chunk);
            }
        }

        if chunks.last().is_some_and(|c| columns(c) > width) {
            let room = width.saturating_sub(line_len);
            if let Some(chunk) = chunks.pop() {
                let (head, tail) = split_at_columns(&chunk, room, line.is_empty());
                if !head.is_empty() {
                    line.push(head.to_string());
                }
                if !tail.is_empty() {
                    chunks.push(tail.to_string());
                }
            }
        }

        if line.last().is_some_and(|c| is_blank(c)) {
            line.pop();
        }

        if !line.is_empty() {
            lines.push(line.concat());
        }
    }

    lines
}

/// Split text into alternating runs of whitespace and non-whitespace.
fn split_chunks(text: &str) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_blank = false;

    for c in text.chars() {
        let blank = is_break_space(c);
        if !current.is_empty() && blank != current_blank {
            chunks.push(std::mem::take(&mut current));
        }
        current_blank = blank;
        current.push(c);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn is_blank(chunk: &str) -> bool {
    chunk.chars().all(is_break_space)
}

/// Split `s` so that the head fits in `max` columns.
///
/// With `force`, the head holds at least one character so wrapping makes
/// progress even when a single glyph is wider than the line.
fn split_at_columns(s: &str, max: usize, force: bool) -> (&str, &str) {
    let mut used = 0;
    for (idx, c) in s.char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > max && (idx > 0 || !force) {
            return s.split_at(idx);
        }
        used += w;
    }
    (s, "")
}
