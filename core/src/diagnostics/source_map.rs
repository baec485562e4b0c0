use std::ops::Range;

use super::LineCol;

/// 1-based line and column of a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePos {
    pub line: usize,
    pub col: usize,
}

/// Line start offsets of an input, for turning token spans into positions.
#[derive(Debug, Clone)]
pub struct SourceMap {
    line_starts: Vec<usize>,
    len: usize,
}

impl SourceMap {
    pub fn from_source(source: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(idx, _)| idx + 1))
            .collect();
        Self {
            line_starts,
            len: source.len(),
        }
    }

    /// Offsets past the end map onto the last line.
    pub fn byte_to_pos(&self, byte: usize) -> SourcePos {
        let line_idx = self
            .line_starts
            .partition_point(|&start| start <= byte)
            .saturating_sub(1);
        SourcePos {
            line: line_idx + 1,
            col: byte.saturating_sub(self.line_starts[line_idx]) + 1,
        }
    }

    /// Position of `byte` labelled with the input's name.
    pub fn locate(&self, source: &str, byte: usize) -> LineCol {
        let pos = self.byte_to_pos(byte);
        LineCol {
            source: source.to_string(),
            line: pos.line,
            col: pos.col,
        }
    }

    /// Byte range of a 1-based line, without its newline.
    pub fn line_span(&self, line: usize) -> Option<Range<usize>> {
        let start = *self.line_starts.get(line.checked_sub(1)?)?;
        let end = self
            .line_starts
            .get(line)
            .map_or(self.len, |&next| next - 1);
        Some(start..end)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_map_to_lines_and_columns() {
        let map = SourceMap::from_source("X(1)\n+ Y\n");
        assert_eq!(map.byte_to_pos(0), SourcePos { line: 1, col: 1 });
        assert_eq!(map.byte_to_pos(3), SourcePos { line: 1, col: 4 });
        assert_eq!(map.byte_to_pos(5), SourcePos { line: 2, col: 1 });
        assert_eq!(map.byte_to_pos(7), SourcePos { line: 2, col: 3 });
        assert_eq!(map.line_count(), 3);
    }

    #[test]
    fn line_spans_exclude_newlines() {
        let source = "X(1)\n+ Y";
        let map = SourceMap::from_source(source);
        assert_eq!(map.line_span(1).map(|r| &source[r]), Some("X(1)"));
        assert_eq!(map.line_span(2).map(|r| &source[r]), Some("+ Y"));
        assert_eq!(map.line_span(0), None);
        assert_eq!(map.line_span(3), None);
    }

    #[test]
    fn locate_labels_the_position() {
        let map = SourceMap::from_source("a\nbc");
        assert_eq!(map.locate("expr.m", 3).to_string(), "expr.m:2:2");
    }
}
