/// A 1-indexed line/column position within a source document.
///
/// Matches the GraphQL spec's convention (and most editors') of counting
/// the first line/column as `1`, not `0`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Deserialize, serde::Serialize)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
}

impl SourcePosition {
    pub fn start() -> Self {
        SourcePosition { line: 1, column: 1 }
    }
}

impl std::fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open `[start, end)` span of source text, in both line/column and
/// byte-offset terms.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Deserialize, serde::Serialize)]
pub struct Span {
    pub start: SourcePosition,
    pub end: SourcePosition,
    pub start_byte: usize,
    pub end_byte: usize,
}

impl Span {
    pub fn new(start: SourcePosition, end: SourcePosition, start_byte: usize, end_byte: usize) -> Self {
        Span { start, end, start_byte, end_byte }
    }

    /// A span with no useful location information, used when callers
    /// construct AST nodes programmatically (or when `no_location` was
    /// requested of the parser).
    pub fn dummy() -> Self {
        Span {
            start: SourcePosition::start(),
            end: SourcePosition::start(),
            start_byte: 0,
            end_byte: 0,
        }
    }
}
