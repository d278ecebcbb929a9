//! Offset to line/character mapping.

/// Zero-based line and character of a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Zero-based line number.
    pub line: usize,
    /// Zero-based column within the line. [`LineIndex::position_of`] counts
    /// bytes, [`LineIndex::utf16_position`] counts UTF-16 code units.
    pub character: usize,
}

/// Line-start table for one source text.
///
/// Built once per file; lookups are a binary search over the start offsets.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    /// Builds the index for `source`.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(source.match_indices('\n').map(|(i, _)| i + 1));
        Self {
            line_starts,
            len: source.len(),
        }
    }

    /// Maps a byte offset to its position.
    ///
    /// Offsets past the end of the text clamp to the end.
    #[must_use]
    pub fn position_of(&self, offset: usize) -> Position {
        let offset = offset.min(self.len);
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        Position {
            line,
            character: offset - line_start,
        }
    }

    /// Maps a byte offset of `source` to its position, counting the column in
    /// UTF-16 code units.
    ///
    /// `source` must be the text the index was built from.
    #[must_use]
    pub fn utf16_position(&self, source: &str, offset: usize) -> Position {
        let Position { line, character } = self.position_of(offset);
        let line_start = offset.min(self.len) - character;
        let character = source
            .get(line_start..line_start + character)
            .map_or(character, |prefix| prefix.encode_utf16().count());
        Position { line, character }
    }

    /// Returns the zero-based line containing `offset`.
    #[must_use]
    pub fn line_of(&self, offset: usize) -> usize {
        self.position_of(offset).line
    }

    /// Number of lines in the text. An empty text has one line.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
