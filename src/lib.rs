//! Crate root: wires together the translation pipeline.
//!
//! - `tokenizer` performs lexical analysis and produces a flat token stream.
//! - `parser` owns all syntactic knowledge and yields one AST per statement.
//! - `ast` defines the tree handed from the parser to the emitter.
//! - `codegen` turns each statement into pseudo-assembly lines.
//! - `error` centralises the diagnostics shared by the other modules.
//!
//! Statements are parsed and emitted one at a time; each tree is dropped
//! before the next statement is parsed.

pub mod ast;
pub mod codegen;
pub mod error;
pub mod parser;
pub mod tokenizer;

pub use ast::{AstNode, BinaryOp, NodeKind};
pub use codegen::EmitMode;
pub use error::{CompileError, CompileResult, SourceLocation};
pub use parser::ParseOptions;

/// Pipeline settings. The default emits one line per node, operands unexpanded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
  pub emit_mode: EmitMode,
  pub parse: ParseOptions,
  /// When set, identifiers and numbers longer than this are rejected.
  pub max_lexeme_len: Option<usize>,
}

/// Validate the token vector against `options` and return a statement
/// iterator configured by them.
pub fn statements<'a>(
  tokens: &'a [tokenizer::Token],
  source: &'a str,
  options: &Options,
) -> CompileResult<parser::TokenStream<'a>> {
  if let Some(max_len) = options.max_lexeme_len {
    tokenizer::check_lexemes(tokens, source, max_len)?;
  }
  Ok(parser::TokenStream::new(tokens, source).with_options(options.parse))
}

/// Translate a whole source text into instruction lines.
///
/// Fails on the first syntax error; no partial listing is returned.
pub fn translate(source: &str, options: &Options) -> CompileResult<Vec<String>> {
  let tokens = tokenizer::tokenize(source);

  let mut lines = Vec::new();
  for stmt in statements(&tokens, source, options)? {
    lines.extend(codegen::emit(&stmt?, options.emit_mode));
  }
  Ok(lines)
}

/// Translate with default options into a newline-terminated listing.
pub fn generate_assembly(source: &str) -> CompileResult<String> {
  let lines = translate(source, &Options::default())?;
  Ok(lines.iter().map(|line| format!("{line}\n")).collect())
}
