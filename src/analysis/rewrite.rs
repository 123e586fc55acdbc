//! Text edits that remove import statements.
//!
//! less.js reports offsets in UTF-16 code units of its normalised input: the
//! byte order mark is dropped and `\r\n` and `\r` become `\n`. Edits are made
//! on the original text, so every offset is mapped back to a byte position
//! first. The tree is never modified.

use std::ops::Range;

use crate::tree::{TreeError, TreeResult};

/// Maps a less.js offset to a byte offset into `source`.
pub fn byte_offset(source: &str, units: usize) -> TreeResult<usize> {
    let start = if source.starts_with('\u{FEFF}') {
        '\u{FEFF}'.len_utf8()
    } else {
        0
    };

    let mut counted = 0;
    let mut chars = source[start..].char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if counted == units {
            return Ok(start + i);
        }
        if counted > units {
            break;
        }
        if c == '\r' && matches!(chars.peek(), Some((_, '\n'))) {
            chars.next();
        }
        counted += c.len_utf16();
    }

    if counted == units {
        Ok(source.len())
    } else {
        Err(TreeError::OffsetOutOfRange { offset: units })
    }
}

/// Removes the import statement starting at each of `offsets` (less.js
/// units) together with the rest of its line.
///
/// When only whitespace precedes the statement, the whole line goes,
/// terminator included. When other code precedes it on the same line, the
/// text from the statement to the end of the line goes and the line break
/// stays. The last line may lack a terminator. Spans are computed up front
/// and removed back to front, so overlapping or repeated offsets are safe.
pub fn remove_import_lines(source: &str, offsets: &[usize]) -> TreeResult<String> {
    let mut spans = offsets
        .iter()
        .map(|&offset| byte_offset(source, offset).map(|at| line_span(source, at)))
        .collect::<TreeResult<Vec<_>>>()?;

    spans.sort_by_key(|span| span.start);
    let mut merged: Vec<Range<usize>> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }

    let mut output = source.to_string();
    for span in merged.into_iter().rev() {
        output.replace_range(span, "");
    }
    Ok(output)
}

/// The byte range to delete for a statement starting at byte `at`.
fn line_span(source: &str, at: usize) -> Range<usize> {
    let first_line_start = if source.starts_with('\u{FEFF}') {
        '\u{FEFF}'.len_utf8()
    } else {
        0
    };
    let line_start = source[..at]
        .rfind(['\n', '\r'])
        .map(|i| i + 1)
        .unwrap_or(first_line_start);
    let own_line = source[line_start..at].trim().is_empty();

    let rest = &source[at..];
    let (line_end, after_terminator) = match rest.find(['\n', '\r']) {
        Some(i) if rest[i..].starts_with("\r\n") => (at + i, at + i + 2),
        Some(i) => (at + i, at + i + 1),
        None => (source.len(), source.len()),
    };

    if own_line {
        line_start..after_terminator
    } else {
        at..line_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "@import (reference) 'a';\n@import (reference) 'b';\nbody { color: @x; }\n";

    #[test]
    fn test_byte_offset_ascii_is_identity() {
        assert_eq!(byte_offset("abc", 0).unwrap(), 0);
        assert_eq!(byte_offset("abc", 2).unwrap(), 2);
        assert_eq!(byte_offset("abc", 3).unwrap(), 3);
        assert!(matches!(
            byte_offset("abc", 4),
            Err(TreeError::OffsetOutOfRange { offset: 4 })
        ));
    }

    #[test]
    fn test_byte_offset_counts_utf16_units() {
        // "é" is one unit and two bytes, the emoji two units and four bytes.
        let source = "/* é 😀 */\n@import 'a';";
        let at = source.find("@import").unwrap();
        let units = source[..at].encode_utf16().count();
        assert_eq!(byte_offset(source, units).unwrap(), at);
    }

    #[test]
    fn test_byte_offset_folds_crlf_and_skips_bom() {
        let source = "\u{FEFF}a\r\nb\rc";
        assert_eq!(byte_offset(source, 0).unwrap(), 3);
        assert_eq!(byte_offset(source, 2).unwrap(), source.find('b').unwrap());
        assert_eq!(byte_offset(source, 4).unwrap(), source.find('c').unwrap());
    }

    #[test]
    fn test_removes_exactly_one_line() {
        let offset = SOURCE.find("@import (reference) 'b'").unwrap();
        let output = remove_import_lines(SOURCE, &[offset]).unwrap();

        assert_eq!(output, "@import (reference) 'a';\nbody { color: @x; }\n");
        assert_eq!(output.lines().count(), SOURCE.lines().count() - 1);
    }

    #[test]
    fn test_removes_several_lines_in_any_order() {
        let a = 0;
        let b = SOURCE.find("@import (reference) 'b'").unwrap();
        let output = remove_import_lines(SOURCE, &[a, b]).unwrap();
        assert_eq!(output, "body { color: @x; }\n");
        assert_eq!(remove_import_lines(SOURCE, &[b, a]).unwrap(), output);
    }

    #[test]
    fn test_repeated_offset_removes_line_once() {
        let output = remove_import_lines(SOURCE, &[0, 0]).unwrap();
        assert_eq!(output, "@import (reference) 'b';\nbody { color: @x; }\n");
    }

    #[test]
    fn test_last_line_without_newline() {
        let source = "body { color: red; }\n@import 'unused';";
        let offset = source.find("@import").unwrap();
        assert_eq!(
            remove_import_lines(source, &[offset]).unwrap(),
            "body { color: red; }\n"
        );
    }

    #[test]
    fn test_crlf_line_is_removed_with_its_terminator() {
        let source = "@import 'a';\r\n@import 'b';\r\nbody {}\r\n";
        // less.js sees "\n" line breaks, so 'b' starts at 13 not 14.
        let output = remove_import_lines(source, &[13]).unwrap();
        assert_eq!(output, "@import 'a';\r\nbody {}\r\n");
    }

    #[test]
    fn test_indented_import_takes_its_indentation() {
        let source = ".scope {\n  @import 'inner';\n  color: red;\n}\n";
        let offset = source.find("@import").unwrap();
        assert_eq!(
            remove_import_lines(source, &[offset]).unwrap(),
            ".scope {\n  color: red;\n}\n"
        );
    }

    #[test]
    fn test_import_after_code_keeps_line_break() {
        let source = "@import 'a'; @import 'b';\nbody {}\n";
        let offset = source.find("@import 'b'").unwrap();
        assert_eq!(
            remove_import_lines(source, &[offset]).unwrap(),
            "@import 'a'; \nbody {}\n"
        );
    }

    #[test]
    fn test_duplicate_lines_remove_only_the_target() {
        let source = "@import 'same';\nbody {}\n@import 'same';\n";
        let second = source.rfind("@import").unwrap();
        assert_eq!(
            remove_import_lines(source, &[second]).unwrap(),
            "@import 'same';\nbody {}\n"
        );
    }

    #[test]
    fn test_byte_order_mark_is_kept() {
        let source = "\u{FEFF}@import 'a';\nbody {}\n";
        assert_eq!(remove_import_lines(source, &[0]).unwrap(), "\u{FEFF}body {}\n");
    }

    #[test]
    fn test_no_offsets_is_identity() {
        assert_eq!(remove_import_lines(SOURCE, &[]).unwrap(), SOURCE);
    }
}
