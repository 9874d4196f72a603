use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use snafu::{ResultExt, Snafu};
use toycc::tokenizer::{self, TokenKind};
use toycc::{CompileError, EmitMode, Options, ParseOptions, codegen};
use tracing::Level;

#[derive(Parser)]
#[command(name = "toycc", version)]
#[command(about = "Translate a tiny imperative language into pseudo-assembly", long_about = None)]
struct Cli {
  /// Source file to translate
  #[arg(value_name = "FILE", default_value = "input.txt", conflicts_with = "expr")]
  input: PathBuf,

  /// Translate this source text instead of reading a file
  #[arg(short, long, value_name = "SOURCE")]
  expr: Option<String>,

  /// Print the token list before the listing
  #[arg(long)]
  emit_tokens: bool,

  /// Print each parsed statement on stderr
  #[arg(long)]
  emit_ast: bool,

  /// Lower nested expressions into temporaries
  #[arg(long)]
  flatten: bool,

  /// Only accept identifiers as assignment targets
  #[arg(long)]
  strict_targets: bool,

  /// Reject identifiers and numbers longer than N characters
  #[arg(long, value_name = "N")]
  max_lexeme_len: Option<usize>,

  /// Increase log verbosity (-v, -vv, -vvv)
  #[arg(short, long, action = ArgAction::Count)]
  verbose: u8,
}

impl Cli {
  fn options(&self) -> Options {
    Options {
      emit_mode: if self.flatten {
        EmitMode::Flatten
      } else {
        EmitMode::Faithful
      },
      parse: ParseOptions {
        strict_targets: self.strict_targets,
      },
      max_lexeme_len: self.max_lexeme_len,
    }
  }
}

#[derive(Debug, Snafu)]
enum DriverError {
  #[snafu(display("failed to read {}: {source}", path.display()))]
  ReadSource { path: PathBuf, source: io::Error },

  #[snafu(display("failed to write listing: {source}"))]
  WriteListing { source: io::Error },

  #[snafu(transparent)]
  Compile { source: CompileError },
}

fn main() {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  if let Err(err) = run(&cli) {
    eprintln!("{err}");
    process::exit(1);
  }
}

fn init_logging(verbosity: u8) {
  let level = match verbosity {
    0 => Level::WARN,
    1 => Level::INFO,
    2 => Level::DEBUG,
    _ => Level::TRACE,
  };
  tracing_subscriber::fmt()
    .with_max_level(level)
    .with_writer(io::stderr)
    .init();
}

/// Lex once, then parse and emit statement by statement so that everything
/// before a syntax error has already been written when the run aborts.
fn run(cli: &Cli) -> Result<(), DriverError> {
  let source = match &cli.expr {
    Some(expr) => expr.clone(),
    None => {
      tracing::info!(path = %cli.input.display(), "reading source");
      fs::read_to_string(&cli.input).context(ReadSourceSnafu {
        path: cli.input.clone(),
      })?
    }
  };

  let tokens = tokenizer::tokenize(&source);
  let mut out = io::stdout().lock();

  if cli.emit_tokens {
    let listed = tokens.iter().filter(|token| token.kind != TokenKind::Eof);
    for (i, token) in listed.enumerate() {
      writeln!(out, "Token {}: {}", i + 1, token.text(&source)).context(WriteListingSnafu)?;
    }
  }

  let options = cli.options();
  let mut count = 0;
  for stmt in toycc::statements(&tokens, &source, &options)? {
    let stmt = stmt?;
    if cli.emit_ast {
      eprintln!("{stmt:#?}");
    }
    for line in codegen::emit(&stmt, options.emit_mode) {
      writeln!(out, "{line}").context(WriteListingSnafu)?;
    }
    count += 1;
  }

  tracing::info!(statements = count, "translation finished");
  Ok(())
}
