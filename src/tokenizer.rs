//! Lexical analysis: turns the raw input string into a vector of tokens.
//!
//! The tokenizer is total. Every character either lands in a token or, for
//! whitespace and braces, is dropped; anything it does not recognise becomes
//! an `Unknown` token for the parser to reject. Identifiers and numbers use
//! maximal munch: the run stops at the first byte that cannot extend it and
//! that byte starts the next token.

use crate::error::{CompileError, CompileResult, SourceLocation};

/// Kinds of tokens recognised by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  Ident,
  Num,
  /// One of `+ - * /`.
  Operator,
  Assign,
  ParenOpen,
  ParenClose,
  /// The reserved word `if`.
  Keyword,
  Unknown,
  Eof,
}

/// Position of a lexeme inside the source; the text itself is sliced on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
  pub kind: TokenKind,
  pub loc: usize,
  pub len: usize,
}

impl Token {
  pub fn new(kind: TokenKind, loc: usize, len: usize) -> Self {
    Self { kind, loc, len }
  }

  /// Return the slice from the source that produced this token.
  pub fn text<'a>(&self, source: &'a str) -> &'a str {
    &source[self.loc..self.loc + self.len]
  }

  /// Identifiers and keywords can both name a variable.
  pub fn is_word(&self) -> bool {
    matches!(self.kind, TokenKind::Ident | TokenKind::Keyword)
  }
}

/// Lex the input into a flat vector of tokens terminated by an `Eof` marker.
pub fn tokenize(input: &str) -> Vec<Token> {
  let mut tokens = Vec::new();
  let bytes = input.as_bytes();
  let mut i = 0;

  while i < bytes.len() {
    let c = bytes[i];
    if is_space(c) {
      i += 1;
      continue;
    }

    if c.is_ascii_alphabetic() {
      let start = i;
      i += 1;
      while i < bytes.len() && bytes[i].is_ascii_alphanumeric() {
        i += 1;
      }
      let kind = if &input[start..i] == "if" {
        TokenKind::Keyword
      } else {
        TokenKind::Ident
      };
      tokens.push(Token::new(kind, start, i - start));
      continue;
    }

    if c.is_ascii_digit() {
      let start = i;
      i += 1;
      while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
      }
      tokens.push(Token::new(TokenKind::Num, start, i - start));
      continue;
    }

    let kind = match c {
      b'+' | b'-' | b'*' | b'/' => Some(TokenKind::Operator),
      b'=' => Some(TokenKind::Assign),
      b'(' => Some(TokenKind::ParenOpen),
      b')' => Some(TokenKind::ParenClose),
      b'{' | b'}' => None,
      _ => Some(TokenKind::Unknown),
    };

    // Non-ASCII input is kept whole so token text stays valid UTF-8.
    let len = input[i..].chars().next().map_or(1, char::len_utf8);
    if let Some(kind) = kind {
      tokens.push(Token::new(kind, i, len));
    }
    i += len;
  }

  tracing::debug!(count = tokens.len(), "tokenized source");
  tokens.push(Token::new(TokenKind::Eof, input.len(), 0));
  tokens
}

/// Space, tab, newline, carriage return, vertical tab and form feed.
fn is_space(c: u8) -> bool {
  matches!(c, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Reject identifiers and numbers longer than `max_len` bytes.
pub fn check_lexemes(tokens: &[Token], source: &str, max_len: usize) -> CompileResult<()> {
  let overlong = tokens
    .iter()
    .filter(|token| token.is_word() || token.kind == TokenKind::Num)
    .find(|token| token.len > max_len);

  match overlong {
    Some(token) => Err(CompileError::MalformedLexeme {
      lexeme: token.text(source).to_string(),
      reason: format!("longer than {max_len} characters"),
      position: SourceLocation::at(source, token.loc),
    }),
    None => Ok(()),
  }
}

/// Human-friendly description used in diagnostics.
pub fn describe_token(token: Option<&Token>, source: &str) -> String {
  match token {
    Some(t) => match t.kind {
      TokenKind::Eof => "EOF".to_string(),
      _ => t.text(source).to_string(),
    },
    None => "EOF".to_string(),
  }
}
