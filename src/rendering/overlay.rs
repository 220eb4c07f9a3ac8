//! The text overlay compositor.
//!
//! Content lines carry embedded SGR escape sequences (`ESC ... m`) that
//! occupy bytes but no terminal columns, so raw string length is useless for
//! splicing one line over another. Everything here measures in *visible*
//! columns: the number of characters left after the escape sequences are
//! skipped.
//!
//! Splicing replaces exactly the bytes covering the target visible columns
//! of the destination row. Escape sequences found inside the replaced span
//! are re-emitted between the inserted text and the row remainder, so
//! whatever styling state the remainder relied on is preserved.

use crate::rendering::frame::Frame;
use crate::vector::Vector2;

/// Number of terminal columns `s` occupies, i.e. its character count with
/// escape sequences skipped.
pub fn visible_width(s: &str) -> usize {
    let mut cols = 0;
    let mut i = 0;
    while i < s.len() {
        let rest = &s[i..];
        if rest.starts_with('\u{1b}') {
            i += escape_len(rest);
        } else {
            let Some(c) = rest.chars().next() else { break };
            cols += 1;
            i += c.len_utf8();
        }
    }
    cols
}

/// `s` with all escape sequences removed; what the user would actually see.
pub fn visible_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < s.len() {
        let rest = &s[i..];
        if rest.starts_with('\u{1b}') {
            i += escape_len(rest);
        } else {
            let Some(c) = rest.chars().next() else { break };
            out.push(c);
            i += c.len_utf8();
        }
    }
    out
}

/// Overlays a block of styled lines onto `frame` at `position`.
///
/// Each line is written at its own row; a line whose row falls outside the
/// frame, or whose visible span would run past the frame's right edge, is
/// skipped. Off-screen objects and mid-frame resizes make this a frequent,
/// expected condition rather than an error.
pub fn overlay(frame: &mut Frame, position: Vector2, lines: &[String]) {
    let width = frame.width();
    let height = frame.height();
    for (dy, line) in lines.iter().enumerate() {
        let y = position.y + dy as i32;
        if y < 0 || y as usize >= height {
            continue;
        }
        let n = visible_width(line);
        if n == 0 {
            continue;
        }
        if position.x < 0 {
            continue;
        }
        let x = position.x as usize;
        if x + n > width {
            continue;
        }
        if let Some(row) = frame.row_mut(y as usize) {
            splice_line(row, x, line, n);
        }
    }
}

/// Replaces visible columns `[x, x + n)` of `row` with `line`.
///
/// The caller has already verified that the span fits the row.
fn splice_line(row: &mut String, x: usize, line: &str, n: usize) {
    let start = consume_columns(row, 0, x, None);
    let mut carried = String::new();
    let end = consume_columns(row, start, n, Some(&mut carried));

    let mut out = String::with_capacity(row.len() + line.len() + carried.len());
    out.push_str(&row[..start]);
    out.push_str(line);
    out.push_str(&carried);
    out.push_str(&row[end..]);
    *row = out;
}

/// Advances through `s` from byte offset `start` until `cols` visible
/// columns have been consumed, returning the byte offset reached.
///
/// Escape sequences met along the way are consumed as zero-width; when
/// `carried` is given they are also copied into it. The scan stops as soon
/// as the column budget is spent, so sequences sitting exactly on the end
/// boundary are left for the caller's remainder.
fn consume_columns(s: &str, start: usize, cols: usize, mut carried: Option<&mut String>) -> usize {
    let mut remaining = cols;
    let mut i = start;
    while remaining > 0 && i < s.len() {
        let rest = &s[i..];
        if rest.starts_with('\u{1b}') {
            let len = escape_len(rest);
            if let Some(out) = carried.as_mut() {
                out.push_str(&rest[..len]);
            }
            i += len;
        } else {
            let Some(c) = rest.chars().next() else { break };
            remaining -= 1;
            i += c.len_utf8();
        }
    }
    i
}

/// Byte length of the escape sequence at the start of `rest`.
///
/// Recognized sequences run from ESC through the next `m` (the SGR styling
/// class the style tables produce). A sequence missing its terminator
/// swallows the remainder of the string.
fn escape_len(rest: &str) -> usize {
    match rest.find('m') {
        Some(pos) => pos + 1,
        None => rest.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style;

    #[test]
    fn test_visible_width_ignores_escape_sequences() {
        assert_eq!(visible_width("hello"), 5);
        assert_eq!(visible_width("\x1b[31mAB\x1b[0m"), 2);
        assert_eq!(visible_width(""), 0);
        assert_eq!(visible_width("\x1b[48;5;240m"), 0);
        // multi-byte glyphs count one column each
        assert_eq!(visible_width("┌─┐"), 3);
    }

    #[test]
    fn test_visible_text_strips_styling() {
        assert_eq!(visible_text("\x1b[31mAB\x1b[0m rest"), "AB rest");
    }

    #[test]
    fn test_overlay_writes_at_offset() {
        let mut frame = Frame::blank(8, 3);
        overlay(&mut frame, Vector2::new(2, 1), &["abc".to_string()]);
        assert_eq!(frame.row(0), Some("        "));
        assert_eq!(frame.row(1), Some("  abc   "));
        assert_eq!(frame.row(2), Some("        "));
    }

    #[test]
    fn test_overlay_uses_visible_width_not_raw_length() {
        // "\x1b[31mAB\x1b[0m" is 2 visible chars; overlaying "C" at column 2
        // afterwards must not clobber the styled text.
        let mut frame = Frame::blank(5, 1);
        let styled = format!("{}AB{}", style::fg::RED, style::RESET);
        overlay(&mut frame, Vector2::ZERO, &[styled.clone()]);
        overlay(&mut frame, Vector2::new(2, 0), &["C".to_string()]);

        let row = frame.row(0).unwrap();
        assert_eq!(visible_text(row), "ABC  ");
        assert!(row.starts_with(&format!("{}AB", style::fg::RED)));
    }

    #[test]
    fn test_overlay_carries_escapes_out_of_the_replaced_span() {
        let mut frame = Frame::blank(4, 1);
        let styled = format!("A{}BC{}D", style::bg::RED, style::RESET);
        // row has only 4 columns, so build it directly
        overlay(&mut frame, Vector2::ZERO, &[styled]);
        overlay(&mut frame, Vector2::new(1, 0), &["XY".to_string()]);

        let row = frame.row(0).unwrap();
        assert_eq!(visible_text(row), "AXYD");
        // the reset that closed the replaced span must survive, before D
        let reset_at = row.find(style::RESET).unwrap();
        let d_at = row.find('D').unwrap();
        assert!(reset_at < d_at);
    }

    #[test]
    fn test_overlay_skips_lines_past_the_right_edge() {
        let mut frame = Frame::blank(4, 1);
        overlay(&mut frame, Vector2::new(2, 0), &["abc".to_string()]);
        assert_eq!(frame.row(0), Some("    "));
    }

    #[test]
    fn test_overlay_skips_rows_outside_the_frame() {
        let mut frame = Frame::blank(4, 2);
        let lines = vec!["aaaa".to_string(), "bbbb".to_string(), "cccc".to_string()];
        overlay(&mut frame, Vector2::new(0, 1), &lines);
        assert_eq!(frame.row(0), Some("    "));
        assert_eq!(frame.row(1), Some("aaaa"));
        // third line fell off the bottom
    }

    #[test]
    fn test_overlay_skips_negative_positions_per_line() {
        let mut frame = Frame::blank(4, 2);
        overlay(&mut frame, Vector2::new(-1, 0), &["ab".to_string()]);
        overlay(&mut frame, Vector2::new(0, -1), &["cd".to_string(), "ef".to_string()]);
        assert_eq!(frame.row(0), Some("ef  "));
        assert_eq!(frame.row(1), Some("    "));
    }

    #[test]
    fn test_overlay_exact_fit() {
        let mut frame = Frame::blank(3, 1);
        overlay(&mut frame, Vector2::ZERO, &["xyz".to_string()]);
        assert_eq!(frame.row(0), Some("xyz"));
    }

    #[test]
    fn test_repeated_overlay_keeps_row_width_stable() {
        let mut frame = Frame::blank(6, 1);
        let styled = format!("{}ab{}", style::bg::GRAYSCALE_240, style::RESET);
        for x in [0, 2, 4, 2, 0] {
            overlay(&mut frame, Vector2::new(x, 0), &[styled.clone()]);
        }
        assert_eq!(visible_width(frame.row(0).unwrap()), 6);
    }
}
