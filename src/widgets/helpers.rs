//! Text measuring helpers shared by the card widgets.
//!
//! Layout and rendering both go through these functions, so a card's measured
//! height always matches the rows it draws.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::constants::ELLIPSIS;

// ============================================================================
// Wrapping
// ============================================================================

/// Word-wraps `text` to lines no wider than `width` display columns.
///
/// Words wider than a full line are split. Explicit newlines start a new line
/// and blank lines are kept. Empty text yields no lines.
///
/// # Examples
///
/// ```ignore
/// let lines = wrap_text("Short description for item 1.", 12);
/// assert_eq!(lines, ["Short", "description", "for item 1."]);
/// ```
#[must_use]
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut lines = Vec::new();

    if text.is_empty() {
        return lines;
    }

    for paragraph in text.split('\n') {
        let first_line = lines.len();
        let mut current = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = word.width();

            if word_width > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                for chunk in split_long_word(word, width) {
                    let chunk_width = chunk.width();
                    if chunk_width == width {
                        lines.push(chunk);
                    } else {
                        current = chunk;
                        current_width = chunk_width;
                    }
                }
                continue;
            }

            let needed = if current.is_empty() {
                word_width
            } else {
                current_width + 1 + word_width
            };

            if needed > width {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            } else {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                current_width = needed;
            }
        }

        if !current.is_empty() || lines.len() == first_line {
            lines.push(current);
        }
    }

    lines
}

/// Splits a word into chunks of at most `width` columns.
fn split_long_word(word: &str, width: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut chunk = String::new();
    let mut chunk_width = 0;

    for ch in word.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if chunk_width + ch_width > width && !chunk.is_empty() {
            chunks.push(std::mem::take(&mut chunk));
            chunk_width = 0;
        }
        chunk.push(ch);
        chunk_width += ch_width;
    }

    if !chunk.is_empty() {
        chunks.push(chunk);
    }
    chunks
}

// ============================================================================
// Truncation
// ============================================================================

/// Truncates `text` to `width` display columns, ending with an ellipsis when cut.
#[must_use]
pub fn truncate_to_width(text: &str, width: u16) -> String {
    let width = usize::from(width);
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let budget = width - ELLIPSIS.width();
    let mut result = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > budget {
            break;
        }
        result.push(ch);
        used += ch_width;
    }
    result.push_str(ELLIPSIS);
    result
}

/// Display width of `text` in columns, saturating at `u16::MAX`.
#[must_use]
pub fn display_width(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

// ============================================================================
// Tests
// ============================================================================
