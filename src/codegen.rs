//! Code generation: lower one statement's AST into pseudo-assembly lines.
//!
//! Two strategies are available. `Faithful` reads operands straight from the
//! immediate children's `value()`, so any operand that is itself an operator
//! node prints as an empty string. `Flatten` walks operands depth-first and
//! spills every intermediate result into a temporary `tN` first.

use crate::ast::AstNode;

/// How operands that are not leaves get rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmitMode {
  /// One line per node; nested operands print as their (empty) value.
  #[default]
  Faithful,
  /// Lower nested expressions into temporaries before using them.
  Flatten,
}

/// Emit the instruction lines for a single statement.
pub fn emit(node: &AstNode, mode: EmitMode) -> Vec<String> {
  let mut lines = Vec::new();
  match mode {
    EmitMode::Faithful => emit_faithful(node, &mut lines),
    EmitMode::Flatten => Flattener::default().emit_stmt(node, &mut lines),
  }
  for line in &lines {
    tracing::trace!(%line, "emitted");
  }
  lines
}

fn emit_faithful(node: &AstNode, out: &mut Vec<String>) {
  match node {
    AstNode::Assign { target, value } => {
      out.push(format!("MOV {}, {}", target.value(), value.value()));
    }
    AstNode::Binary { op, lhs, rhs } => {
      out.push(format!("{} {}, {}", op.mnemonic(), lhs.value(), rhs.value()));
    }
    AstNode::VarRef { name } => out.push(format!("DECLARE {name}")),
    AstNode::NumberLiteral { value } => out.push(format!("PUSH {value}")),
    AstNode::If { condition, body } => {
      out.push(format!("IF {} == 0 GOTO LABEL", condition.value()));
      emit_faithful(body, out);
    }
  }
}

/// Hands out temporaries `t0, t1, ...` for one statement.
#[derive(Default)]
struct Flattener {
  next_temp: usize,
}

impl Flattener {
  fn emit_stmt(&mut self, node: &AstNode, out: &mut Vec<String>) {
    match node {
      AstNode::Assign { target, value } => {
        let operand = self.operand(value, out);
        out.push(format!("MOV {}, {operand}", target.value()));
      }
      AstNode::If { condition, body } => {
        let operand = self.operand(condition, out);
        out.push(format!("IF {operand} == 0 GOTO LABEL"));
        self.emit_stmt(body, out);
      }
      AstNode::Binary { .. } => {
        self.operand(node, out);
      }
      AstNode::VarRef { .. } | AstNode::NumberLiteral { .. } => emit_faithful(node, out),
    }
  }

  /// Name of the location holding `node`'s result, emitting whatever is
  /// needed to compute it.
  fn operand(&mut self, node: &AstNode, out: &mut Vec<String>) -> String {
    match node {
      AstNode::Binary { op, lhs, rhs } => {
        let lhs = self.operand(lhs, out);
        let rhs = self.operand(rhs, out);
        let temp = format!("t{}", self.next_temp);
        self.next_temp += 1;
        out.push(format!("MOV {temp}, {lhs}"));
        out.push(format!("{} {temp}, {rhs}", op.mnemonic()));
        temp
      }
      _ => node.value().to_string(),
    }
  }
}
