//! Source locations: byte-range spans plus the single-file source map
//! that resolves them back to line/column for diagnostics.

use std::path::PathBuf;

/// A byte range `[start, end)` into a single source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

/// Holds the source text for one compilation unit and resolves spans to
/// 1-based line/column pairs for diagnostic rendering.
pub struct SourceMap {
    pub path: PathBuf,
    pub content: String,
    line_starts: Vec<u32>,
}

impl SourceMap {
    pub fn new(path: PathBuf, content: String) -> Self {
        let mut line_starts = vec![0u32];
        for (i, b) in content.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i as u32 + 1);
            }
        }
        Self {
            path,
            content,
            line_starts,
        }
    }

    /// 1-based (line, column) for a byte offset.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let line_start = self.line_starts[line_idx];
        (line_idx as u32 + 1, offset - line_start + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_line_first_column() {
        let sm = SourceMap::new("t".into(), "abc\ndef".to_string());
        assert_eq!(sm.line_col(0), (1, 1));
    }

    #[test]
    fn second_line() {
        let sm = SourceMap::new("t".into(), "abc\ndef".to_string());
        assert_eq!(sm.line_col(4), (2, 1));
    }
}
