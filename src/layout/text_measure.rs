//! Text Measurement
//!
//! Utilities for measuring text dimensions in terminal cells.
//!
//! Widths come from `unicode-width` (East Asian Width tables):
//! - ASCII characters: 1 cell
//! - CJK characters and most emoji: 2 cells
//! - Zero-width characters (variation selectors, ZWJ): 0 cells
//!
//! Zero-width characters are measured as 0 and skipped when painting, so
//! measurement and painting always agree.

use unicode_width::UnicodeWidthChar;

/// Display width of one character in terminal cells.
pub fn char_width(c: char) -> u16 {
    if c.is_control() {
        return 0;
    }
    c.width().unwrap_or(0) as u16
}

/// Measure the display width of a string in terminal cells.
pub fn string_width(s: &str) -> u16 {
    s.chars()
        .fold(0u16, |width, c| width.saturating_add(char_width(c)))
}

/// Width of the widest word (the narrowest the text can wrap to).
pub fn min_content_width(text: &str) -> u16 {
    text.split(['\n', ' '])
        .map(string_width)
        .max()
        .unwrap_or(0)
}

/// Word-wrap text to a given width.
///
/// Breaks at spaces; a word wider than `width` is broken mid-word.
/// Explicit newlines always break. Returns no lines for empty text.
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    if text.is_empty() {
        return vec![];
    }

    if width == 0 {
        return text.split('\n').map(str::to_string).collect();
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_width = 0u16;

        for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
            let word_width = string_width(word);

            if line_width > 0 && line_width + 1 + word_width <= width {
                line.push(' ');
                line.push_str(word);
                line_width += 1 + word_width;
                continue;
            }

            if line_width > 0 {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }

            if word_width <= width {
                line.push_str(word);
                line_width = word_width;
                continue;
            }

            // Hard-break an overlong word
            for c in word.chars() {
                let cw = char_width(c);
                if line_width + cw > width && line_width > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                line.push(c);
                line_width += cw;
            }
        }

        lines.push(line);
    }

    lines
}

/// Measure the height of text when wrapped to a given width.
///
/// Returns the number of lines (0 for empty text).
pub fn measure_text_height(text: &str, available_width: u16) -> u16 {
    wrap_text(text, available_width).len().min(u16::MAX as usize) as u16
}

/// Truncate text to fit within a given width.
///
/// If text is longer than width, it's truncated and an ellipsis is added.
pub fn truncate_text(text: &str, width: u16) -> String {
    if width == 0 {
        return String::new();
    }

    if string_width(text) <= width {
        return text.to_string();
    }

    // Leave room for the ellipsis
    let target_width = width.saturating_sub(1);
    let mut result = String::new();
    let mut current_width = 0u16;

    for c in text.chars() {
        let cw = char_width(c);
        if current_width + cw > target_width {
            break;
        }
        result.push(c);
        current_width += cw;
    }

    result.push('…');
    result
}
