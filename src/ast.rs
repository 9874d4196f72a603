//! Syntax tree for a single statement.
//!
//! Each node exclusively owns its children, so a statement's tree is dropped
//! as a whole once the emitter is done with it.

use std::fmt;

/// Arithmetic operators, all left-associative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
  Div,
}

impl BinaryOp {
  pub fn from_symbol(symbol: &str) -> Option<Self> {
    match symbol {
      "+" => Some(Self::Add),
      "-" => Some(Self::Sub),
      "*" => Some(Self::Mul),
      "/" => Some(Self::Div),
      _ => None,
    }
  }

  /// Mnemonic used in the instruction listing.
  pub fn mnemonic(self) -> &'static str {
    match self {
      Self::Add => "ADD",
      Self::Sub => "SUB",
      Self::Mul => "MUL",
      Self::Div => "DIV",
    }
  }
}

/// Flat classification of a node, mirroring the instruction it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
  VarRef,
  Assign,
  Add,
  Sub,
  Mul,
  Div,
  If,
  NumberLiteral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstNode {
  VarRef {
    name: String,
  },
  NumberLiteral {
    value: String,
  },
  Binary {
    op: BinaryOp,
    lhs: Box<AstNode>,
    rhs: Box<AstNode>,
  },
  /// `target` is always a `VarRef`.
  Assign {
    target: Box<AstNode>,
    value: Box<AstNode>,
  },
  /// Exactly one guarded statement.
  If {
    condition: Box<AstNode>,
    body: Box<AstNode>,
  },
}

impl AstNode {
  pub fn var(name: impl Into<String>) -> Self {
    Self::VarRef { name: name.into() }
  }

  pub fn number(value: impl Into<String>) -> Self {
    Self::NumberLiteral {
      value: value.into(),
    }
  }

  pub fn binary(op: BinaryOp, lhs: AstNode, rhs: AstNode) -> Self {
    Self::Binary {
      op,
      lhs: Box::new(lhs),
      rhs: Box::new(rhs),
    }
  }

  pub fn assign(name: impl Into<String>, value: AstNode) -> Self {
    Self::Assign {
      target: Box::new(Self::var(name)),
      value: Box::new(value),
    }
  }

  pub fn if_then(condition: AstNode, body: AstNode) -> Self {
    Self::If {
      condition: Box::new(condition),
      body: Box::new(body),
    }
  }

  pub fn kind(&self) -> NodeKind {
    match self {
      Self::VarRef { .. } => NodeKind::VarRef,
      Self::NumberLiteral { .. } => NodeKind::NumberLiteral,
      Self::Binary { op, .. } => match op {
        BinaryOp::Add => NodeKind::Add,
        BinaryOp::Sub => NodeKind::Sub,
        BinaryOp::Mul => NodeKind::Mul,
        BinaryOp::Div => NodeKind::Div,
      },
      Self::Assign { .. } => NodeKind::Assign,
      Self::If { .. } => NodeKind::If,
    }
  }

  /// Literal text carried by the node: the name of a variable, the digits of
  /// a number, or the target of an assignment. Operators and `if` carry none.
  pub fn value(&self) -> &str {
    match self {
      Self::VarRef { name } => name,
      Self::NumberLiteral { value } => value,
      Self::Assign { target, .. } => target.value(),
      Self::Binary { .. } | Self::If { .. } => "",
    }
  }

  pub fn left(&self) -> Option<&AstNode> {
    match self {
      Self::Binary { lhs, .. } => Some(lhs.as_ref()),
      Self::Assign { target, .. } => Some(target.as_ref()),
      Self::If { condition, .. } => Some(condition.as_ref()),
      Self::VarRef { .. } | Self::NumberLiteral { .. } => None,
    }
  }

  pub fn right(&self) -> Option<&AstNode> {
    match self {
      Self::Binary { rhs, .. } => Some(rhs.as_ref()),
      Self::Assign { value, .. } => Some(value.as_ref()),
      Self::If { body, .. } => Some(body.as_ref()),
      Self::VarRef { .. } | Self::NumberLiteral { .. } => None,
    }
  }
}

/// Compact prefix form, e.g. `Assign(x, Add(1, Mul(2, 3)))`.
impl fmt::Display for AstNode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match (self.left(), self.right()) {
      (Some(left), Some(right)) => write!(f, "{:?}({left}, {right})", self.kind()),
      _ => f.write_str(self.value()),
    }
  }
}
