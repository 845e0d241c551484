use std::fmt;

/// A single position in source text.
///
/// Positions are plain values: every token, node and error takes its own
/// copy, and moving forward produces a new position instead of mutating an
/// existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Byte offset from the start of the source.
    pub offset: usize,
    /// Line number (0-based).
    pub line:   usize,
    /// Column number (0-based, counted in characters).
    pub column: usize,
}

impl Position {
    #[must_use]
    pub const fn new(offset: usize, line: usize, column: usize) -> Self {
        Self { offset,
               line,
               column }
    }

    /// Returns the position directly after `ch`.
    ///
    /// A newline moves to column 0 of the next line.
    ///
    /// # Example
    /// ```
    /// use funke::span::Position;
    ///
    /// let start = Position::default();
    /// assert_eq!(start.advance('a'), Position::new(1, 0, 1));
    /// assert_eq!(start.advance('\n'), Position::new(1, 1, 0));
    /// ```
    #[must_use]
    pub const fn advance(self, ch: char) -> Self {
        if ch == '\n' {
            Self { offset: self.offset + 1,
                   line:   self.line + 1,
                   column: 0, }
        } else {
            Self { offset: self.offset + ch.len_utf8(),
                   line:   self.line,
                   column: self.column + 1, }
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// A contiguous region of source text, from `start` up to (not including)
/// `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end:   Position,
}

impl Span {
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// A zero-width span at a single position.
    #[must_use]
    pub const fn point(pos: Position) -> Self {
        Self { start: pos,
               end:   pos, }
    }

    /// Joins two spans into the smallest span covering both.
    ///
    /// # Example
    /// ```
    /// use funke::span::{Position, Span};
    ///
    /// let a = Span::new(Position::new(0, 0, 0), Position::new(2, 0, 2));
    /// let b = Span::new(Position::new(5, 0, 5), Position::new(9, 0, 9));
    ///
    /// assert_eq!(a.to(b), Span::new(a.start, b.end));
    /// ```
    #[must_use]
    pub const fn to(self, other: Self) -> Self {
        let start = if self.start.offset <= other.start.offset {
            self.start
        } else {
            other.start
        };
        let end = if self.end.offset >= other.end.offset {
            self.end
        } else {
            other.end
        };
        Self { start, end }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Maps byte offsets in a source string to line/column positions.
///
/// Line starts are collected once so every lookup is a binary search plus a
/// character count within a single line.
#[derive(Debug, Clone)]
pub struct LineMap<'s> {
    source:      &'s str,
    line_starts: Vec<usize>,
}

impl<'s> LineMap<'s> {
    #[must_use]
    pub fn new(source: &'s str) -> Self {
        let line_starts = std::iter::once(0).chain(source.match_indices('\n').map(|(i, _)| i + 1))
                                            .collect();
        Self { source,
               line_starts }
    }

    /// Returns the position of byte `offset`.
    ///
    /// Offsets past the end of the source are clamped to the end.
    ///
    /// # Example
    /// ```
    /// use funke::span::{LineMap, Position};
    ///
    /// let map = LineMap::new("ab\ncd");
    /// assert_eq!(map.position(4), Position::new(4, 1, 1));
    /// ```
    #[must_use]
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line];
        let column = self.source
                         .get(line_start..offset)
                         .map_or(offset - line_start, |text| text.chars().count());

        Position::new(offset, line, column)
    }

    /// Returns the span covering bytes `start..end`.
    #[must_use]
    pub fn span(&self, start: usize, end: usize) -> Span {
        Span::new(self.position(start), self.position(end))
    }
}
