use toycc::parser::parse;
use toycc::tokenizer::tokenize;
use toycc::{
  CompileError, EmitMode, Options, ParseOptions, codegen, generate_assembly, statements, translate,
};

fn listing(source: &str) -> Vec<String> {
  translate(source, &Options::default()).unwrap()
}

fn flattened(source: &str) -> Vec<String> {
  let options = Options {
    emit_mode: EmitMode::Flatten,
    ..Options::default()
  };
  translate(source, &options).unwrap()
}

#[test]
fn assignment_of_sum_leaves_operand_blank() {
  assert_eq!(listing("x = 1 + 2"), vec!["MOV x, "]);
}

#[test]
fn if_statement_emits_guard_then_body() {
  assert_eq!(
    listing("if ( x ) y = 1"),
    vec!["IF x == 0 GOTO LABEL", "MOV y, 1"]
  );
}

#[test]
fn braces_around_if_body_are_ignored() {
  assert_eq!(
    listing("if (flag) {\n  count = 10\n}\n"),
    vec!["IF flag == 0 GOTO LABEL", "MOV count, 10"]
  );
}

#[test]
fn if_with_compound_condition_has_blank_operand() {
  assert_eq!(
    listing("if (a - 1) b = c"),
    vec!["IF  == 0 GOTO LABEL", "MOV b, c"]
  );
}

#[test]
fn program_translates_statement_by_statement() {
  let source = "a = 5\nb = a\nc = (a + b) * 2\nif (c) d = 1\n";
  assert_eq!(
    listing(source),
    vec![
      "MOV a, 5",
      "MOV b, a",
      "MOV c, ",
      "IF c == 0 GOTO LABEL",
      "MOV d, 1"
    ]
  );
}

#[test]
fn generate_assembly_terminates_every_line() {
  assert_eq!(
    generate_assembly("a = 1 b = 2").unwrap(),
    "MOV a, 1\nMOV b, 2\n"
  );
  assert_eq!(generate_assembly("").unwrap(), "");
}

#[test]
fn parse_tree_matches_precedence_rules() {
  let cases = [
    ("x = 1 + 2 * 3", "Assign(x, Add(1, Mul(2, 3)))"),
    ("x = 10 - 2 - 3", "Assign(x, Sub(Sub(10, 2), 3))"),
    ("x = (1 + 2) * 3", "Assign(x, Mul(Add(1, 2), 3))"),
    ("if ( x ) y = 1", "If(x, Assign(y, 1))"),
  ];

  for (source, expected) in cases {
    let tokens = tokenize(source);
    let nodes = parse(&tokens, source).unwrap();
    assert_eq!(nodes.len(), 1, "{source}");
    assert_eq!(nodes[0].to_string(), expected, "{source}");
  }
}

#[test]
fn missing_paren_aborts_without_partial_listing() {
  let err = translate("a = 1\nx = (1 + 2", &Options::default()).unwrap_err();
  assert!(matches!(err, CompileError::UnexpectedToken { .. }));
  assert_eq!(err.position().line, 2);
  assert_eq!(
    err.to_string(),
    "2:11: expected \")\", but got \"EOF\"\nx = (1 + 2\n          ^"
  );
}

#[test]
fn permissive_targets_are_the_default() {
  assert_eq!(listing("1 = 2"), vec!["MOV 1, 2"]);
}

#[test]
fn strict_targets_reject_non_identifiers() {
  let options = Options {
    parse: ParseOptions {
      strict_targets: true,
    },
    ..Options::default()
  };
  let err = translate("1 = 2", &options).unwrap_err();
  assert!(matches!(err, CompileError::UnexpectedToken { .. }));
  assert_eq!(translate("x = 2", &options).unwrap(), vec!["MOV x, 2"]);
}

#[test]
fn lexeme_limit_reports_malformed_lexeme() {
  let options = Options {
    max_lexeme_len: Some(3),
    ..Options::default()
  };
  let err = translate("x = 12345", &options).unwrap_err();
  assert!(matches!(
    err,
    CompileError::MalformedLexeme { ref lexeme, .. } if lexeme == "12345"
  ));
  assert_eq!(err.position().column, 5);
}

#[test]
fn unknown_characters_are_syntax_errors() {
  let err = translate("x = % 2", &Options::default()).unwrap_err();
  assert!(matches!(
    err,
    CompileError::UnexpectedToken { ref found, .. } if found == "%"
  ));
}

#[test]
fn flatten_mode_keeps_nested_results() {
  assert_eq!(
    flattened("x = a + b * c"),
    vec![
      "MOV t0, b",
      "MUL t0, c",
      "MOV t1, a",
      "ADD t1, t0",
      "MOV x, t1"
    ]
  );
}

#[test]
fn flatten_numbers_temporaries_per_statement() {
  assert_eq!(
    flattened("x = 1 - 2 y = 3 / 4"),
    vec![
      "MOV t0, 1",
      "SUB t0, 2",
      "MOV x, t0",
      "MOV t0, 3",
      "DIV t0, 4",
      "MOV y, t0"
    ]
  );
}

#[test]
fn vertical_tab_separates_statements() {
  assert_eq!(listing("x = 1\x0by = 2"), vec!["MOV x, 1", "MOV y, 2"]);
}

#[test]
fn statement_stream_matches_translate() {
  let source = "a = 1 - b\nif (a) c = a * 2";
  let options = Options {
    emit_mode: EmitMode::Flatten,
    ..Options::default()
  };
  let tokens = tokenize(source);
  let mut streamed = Vec::new();
  for stmt in statements(&tokens, source, &options).unwrap() {
    streamed.extend(codegen::emit(&stmt.unwrap(), options.emit_mode));
  }
  assert_eq!(streamed, translate(source, &options).unwrap());
}

#[test]
fn statement_stream_applies_lexeme_limit() {
  let source = "abcd = 1";
  let tokens = tokenize(source);
  let options = Options {
    max_lexeme_len: Some(2),
    ..Options::default()
  };
  assert!(matches!(
    statements(&tokens, source, &options),
    Err(CompileError::MalformedLexeme { .. })
  ));
}
