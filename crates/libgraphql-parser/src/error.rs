use crate::source_position::SourcePosition;

/// A lexer or parser failure.
///
/// Carries the offending `(line, column)` plus a one-line snippet of the
/// surrounding source, keeping error variants small and moving
/// human-readable context into a `notes`-style string rather than a rich
/// diagnostics struct.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Syntax Error: {message} ({position})")]
pub struct SyntaxError {
    pub message: String,
    pub position: SourcePosition,
    /// The single line of source surrounding `position`, if available.
    pub snippet: Option<String>,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, position: SourcePosition, snippet: Option<String>) -> Self {
        SyntaxError { message: message.into(), position, snippet }
    }
}
