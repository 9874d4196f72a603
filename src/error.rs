//! Shared error utilities used across the translation pipeline.
//!
//! Diagnostics stay lightweight: every error carries a [`SourceLocation`]
//! that renders the offending source line with a caret under the byte that
//! triggered it.

use std::fmt;

use snafu::Snafu;

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Debug, Snafu)]
pub enum CompileError {
  /// The grammar required something specific at the cursor and found
  /// another token (or ran out of input).
  #[snafu(display("{position}: expected {expected}, but got \"{found}\"\n{}", position.snippet()))]
  UnexpectedToken {
    expected: String,
    found: String,
    position: SourceLocation,
  },

  /// A lexeme failed validation. The tokenizer itself never produces this;
  /// it only appears when lexeme limits are enabled.
  #[snafu(display("{position}: malformed lexeme \"{lexeme}\": {reason}\n{}", position.snippet()))]
  MalformedLexeme {
    lexeme: String,
    reason: String,
    position: SourceLocation,
  },
}

impl CompileError {
  /// Location of the offending byte in the source.
  pub fn position(&self) -> &SourceLocation {
    match self {
      Self::UnexpectedToken { position, .. } | Self::MalformedLexeme { position, .. } => position,
    }
  }
}

/// A 1-based line/column pair plus the text of that line, used to render
/// chibicc-style caret diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
  pub line: usize,
  pub column: usize,
  line_text: String,
}

impl SourceLocation {
  /// Resolve a byte offset in `source`. Offsets past the end clamp to the end.
  pub fn at(source: &str, loc: usize) -> Self {
    let mut safe_loc = loc.min(source.len());
    while !source.is_char_boundary(safe_loc) {
      safe_loc -= 1;
    }

    let line_start = source[..safe_loc].rfind('\n').map_or(0, |idx| idx + 1);
    let line_end = source[safe_loc..]
      .find('\n')
      .map_or(source.len(), |idx| safe_loc + idx);
    let line = source[..line_start].matches('\n').count() + 1;
    let column = source[line_start..safe_loc].chars().count() + 1;

    Self {
      line,
      column,
      line_text: source[line_start..line_end].trim_end_matches('\r').to_string(),
    }
  }

  /// The source line followed by a caret pointing at the column.
  pub fn snippet(&self) -> String {
    let marker = format!("{}^", " ".repeat(self.column - 1));
    format!("{}\n{marker}", self.line_text)
  }
}

impl fmt::Display for SourceLocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.line, self.column)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn location_tracks_lines_and_columns() {
    let source = "x = 1\ny = (2 + 3";
    let location = SourceLocation::at(source, source.len());
    assert_eq!(location.line, 2);
    assert_eq!(location.column, 11);
    assert_eq!(location.snippet(), "y = (2 + 3\n          ^");
  }

  #[test]
  fn location_clamps_past_end() {
    let location = SourceLocation::at("ab", 10);
    assert_eq!((location.line, location.column), (1, 3));
  }

  #[test]
  fn unexpected_token_display_includes_caret() {
    let err = CompileError::UnexpectedToken {
      expected: "\")\"".to_string(),
      found: "EOF".to_string(),
      position: SourceLocation::at("x = (1", 6),
    };
    assert_eq!(
      err.to_string(),
      "1:7: expected \")\", but got \"EOF\"\nx = (1\n      ^"
    );
  }
}
