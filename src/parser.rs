//! Recursive-descent parser producing one AST per statement.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! statement   := ifStatement | assignment
//! ifStatement := "if" "(" expression ")" assignment
//! assignment  := target "=" expression
//! expression  := term (("+" | "-") term)*
//! term        := factor (("*" | "/") factor)*
//! factor      := NUMBER | IDENT | "(" expression ")"
//! ```
//!
//! Binary operators are folded left-to-right in a loop, which gives left
//! associativity without a precedence table. The first syntax error ends the
//! parse; there is no resynchronisation.

use crate::ast::{AstNode, BinaryOp};
use crate::error::{CompileError, CompileResult, SourceLocation};
use crate::tokenizer::{Token, TokenKind, describe_token};

/// Knobs that change which inputs the grammar accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
  /// Reject assignment targets that are not identifiers. Off by default,
  /// so `1 = 2` assigns to `1`.
  pub strict_targets: bool,
}

/// Parse every statement in the token stream.
pub fn parse(tokens: &[Token], source: &str) -> CompileResult<Vec<AstNode>> {
  TokenStream::new(tokens, source).collect()
}

/// Parse exactly one statement starting at the cursor.
pub fn parse_statement(stream: &mut TokenStream) -> CompileResult<AstNode> {
  let start = stream.pos;
  let node = match stream.peek().map(|token| token.kind) {
    Some(TokenKind::Keyword) => parse_if(stream)?,
    _ => parse_assignment(stream)?,
  };
  tracing::debug!(start, end = stream.pos, "parsed statement");
  Ok(node)
}

fn parse_if(stream: &mut TokenStream) -> CompileResult<AstNode> {
  stream.skip(TokenKind::Keyword, "\"if\"")?;
  stream.skip(TokenKind::ParenOpen, "\"(\"")?;
  let condition = parse_expression(stream)?;
  stream.skip(TokenKind::ParenClose, "\")\"")?;
  // The guarded statement is always an assignment; a nested `if` is not part
  // of the grammar and fails at its opening parenthesis.
  let body = parse_assignment(stream)?;
  Ok(AstNode::if_then(condition, body))
}

fn parse_assignment(stream: &mut TokenStream) -> CompileResult<AstNode> {
  let target = stream.get_target()?;
  stream.skip(TokenKind::Assign, "\"=\"")?;
  let value = parse_expression(stream)?;
  Ok(AstNode::assign(target, value))
}

fn parse_expression(stream: &mut TokenStream) -> CompileResult<AstNode> {
  let mut node = parse_term(stream)?;

  while let Some(op) = stream.consume_operator(&[BinaryOp::Add, BinaryOp::Sub]) {
    let rhs = parse_term(stream)?;
    node = AstNode::binary(op, node, rhs);
  }

  Ok(node)
}

fn parse_term(stream: &mut TokenStream) -> CompileResult<AstNode> {
  let mut node = parse_factor(stream)?;

  while let Some(op) = stream.consume_operator(&[BinaryOp::Mul, BinaryOp::Div]) {
    let rhs = parse_factor(stream)?;
    node = AstNode::binary(op, node, rhs);
  }

  Ok(node)
}

fn parse_factor(stream: &mut TokenStream) -> CompileResult<AstNode> {
  let Some(token) = stream.peek() else {
    return Err(stream.unexpected("an expression"));
  };

  match token.kind {
    TokenKind::Num => {
      stream.pos += 1;
      Ok(AstNode::number(token.text(stream.source)))
    }
    TokenKind::Ident | TokenKind::Keyword => {
      stream.pos += 1;
      Ok(AstNode::var(token.text(stream.source)))
    }
    TokenKind::ParenOpen => {
      stream.pos += 1;
      let node = parse_expression(stream)?;
      stream.skip(TokenKind::ParenClose, "\")\"")?;
      Ok(node)
    }
    _ => Err(stream.unexpected("a number, an identifier or \"(\"")),
  }
}

/// Cursor over a borrowed token vector.
///
/// Iterating yields one statement at a time until `Eof`; after the first
/// error the iterator is exhausted.
pub struct TokenStream<'a> {
  tokens: &'a [Token],
  source: &'a str,
  pos: usize,
  options: ParseOptions,
  failed: bool,
}

impl<'a> TokenStream<'a> {
  pub fn new(tokens: &'a [Token], source: &'a str) -> Self {
    Self {
      tokens,
      source,
      pos: 0,
      options: ParseOptions::default(),
      failed: false,
    }
  }

  pub fn with_options(mut self, options: ParseOptions) -> Self {
    self.options = options;
    self
  }

  /// Index of the next unconsumed token.
  pub fn position(&self) -> usize {
    self.pos
  }

  pub fn is_eof(&self) -> bool {
    matches!(
      self.peek().map(|token| token.kind),
      None | Some(TokenKind::Eof)
    )
  }

  fn peek(&self) -> Option<&'a Token> {
    self.tokens.get(self.pos)
  }

  /// Consume the current token if it has the given kind.
  fn equal(&mut self, kind: TokenKind) -> bool {
    if self.peek().is_some_and(|token| token.kind == kind) {
      self.pos += 1;
      return true;
    }
    false
  }

  fn skip(&mut self, kind: TokenKind, expected: &str) -> CompileResult<()> {
    if self.equal(kind) {
      Ok(())
    } else {
      Err(self.unexpected(expected))
    }
  }

  /// Consume an arithmetic operator if it is one of `ops`.
  fn consume_operator(&mut self, ops: &[BinaryOp]) -> Option<BinaryOp> {
    let token = self
      .peek()
      .filter(|token| token.kind == TokenKind::Operator)?;
    let op = BinaryOp::from_symbol(token.text(self.source)).filter(|op| ops.contains(op))?;
    self.pos += 1;
    Some(op)
  }

  /// Take the assignment target. Without `strict_targets` any token short of
  /// end of input is accepted.
  fn get_target(&mut self) -> CompileResult<&'a str> {
    let accepted = match self.peek() {
      Some(token) if token.kind == TokenKind::Eof => None,
      Some(token) if self.options.strict_targets && token.kind != TokenKind::Ident => None,
      other => other,
    };

    let Some(token) = accepted else {
      return Err(self.unexpected("an assignment target"));
    };
    self.pos += 1;
    Ok(token.text(self.source))
  }

  fn unexpected(&self, expected: &str) -> CompileError {
    let token = self.peek();
    let loc = token.map_or(self.source.len(), |token| token.loc);
    CompileError::UnexpectedToken {
      expected: expected.to_string(),
      found: describe_token(token, self.source),
      position: SourceLocation::at(self.source, loc),
    }
  }
}

impl Iterator for TokenStream<'_> {
  type Item = CompileResult<AstNode>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.failed || self.is_eof() {
      return None;
    }
    let result = parse_statement(self);
    self.failed = result.is_err();
    Some(result)
  }
}
