//! Surface AST consumed by the emitter.
//!
//! The tree is produced by an external front end and handed over either
//! in memory or as JSON (see [`crate::loader`]). Every enum is externally
//! tagged with snake_case variant names.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::NodeGroup;

pub const KEYWORD_FUNC: &str = "func";
pub const KEYWORD_STRUCT: &str = "struct";
pub const KEYWORD_MUT: &str = "mut";
pub const KEYWORD_RETURN: &str = "return";
pub const DEREF_MARKER: &str = "^";

/// One input source file and its top-level nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    Decl(Decl),
    Expr(Expr),
    Stat(Stat),
}

impl Node {
    pub fn group(&self) -> NodeGroup {
        match self {
            Node::Decl(_) => NodeGroup::Declaration,
            Node::Expr(_) => NodeGroup::Expression,
            Node::Stat(_) => NodeGroup::Statement,
        }
    }
}

/// Declarations.
///
/// `Other` marks a construct the front end knows but this emitter does not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decl {
    Function(Function),
    Struct(Struct),
    Variable(VariableDecl),
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Rune(char),
    Integer(u64),
    Floating(f64),
    String(String),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Unary {
        op: UnOp,
        operand: Box<Expr>,
    },
    Cast {
        ty: Type,
        operand: Box<Expr>,
    },
    Call(CallExpr),
    Access(AccessExpr),
    Deref(Box<Expr>),
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Return(Option<Expr>),
    Call(CallExpr),
    Assign { target: AccessExpr, value: Expr },
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub nodes: Vec<Node>,
}

/// `[key]` or `[key="value"]` annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attr {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl Attr {
    pub fn flag(key: impl Into<String>) -> Self {
        Attr {
            key: key.into(),
            value: None,
        }
    }

    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Attr {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    /// The value, treating an empty string the same as no value.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref().filter(|value| !value.is_empty())
    }
}

/// Declared type of a variable, parameter or cast target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Type {
    Named(String),
    Pointer(Box<Type>),
    Array(Box<Type>),
}

impl Type {
    pub fn named(name: impl Into<String>) -> Self {
        Type::Named(name.into())
    }

    /// Textual form as written in source, e.g. `int`, `^int`, `[]^u8`.
    pub fn type_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Named(name) => f.write_str(name),
            Type::Pointer(inner) => write!(f, "^{inner}"),
            Type::Array(inner) => write!(f, "[]{inner}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub ty: Type,
    #[serde(default)]
    pub mutable: bool,
    #[serde(default)]
    pub attrs: Vec<Attr>,
}

impl Variable {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Variable {
            name: name.into(),
            ty,
            mutable: false,
            attrs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDecl {
    pub variable: Variable,
    #[serde(default)]
    pub init: Option<Expr>,
}

impl From<Variable> for VariableDecl {
    fn from(variable: Variable) -> Self {
        VariableDecl {
            variable,
            init: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    #[serde(default)]
    pub params: Vec<VariableDecl>,
    #[serde(default)]
    pub return_type: Option<Type>,
    #[serde(default)]
    pub body: Block,
    #[serde(default)]
    pub attrs: Vec<Attr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Struct {
    pub name: String,
    #[serde(default)]
    pub members: Vec<VariableDecl>,
    #[serde(default)]
    pub attrs: Vec<Attr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpr {
    pub callee: String,
    #[serde(default)]
    pub args: Vec<Expr>,
}

/// Dotted access path such as `point.x`; never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessExpr {
    #[serde(deserialize_with = "non_empty_path")]
    pub path: Vec<String>,
}

fn non_empty_path<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let path = Vec::<String>::deserialize(deserializer)?;
    if path.is_empty() {
        return Err(D::Error::invalid_length(0, &"at least one path segment"));
    }
    Ok(path)
}

impl AccessExpr {
    pub fn name(name: impl Into<String>) -> Self {
        AccessExpr {
            path: vec![name.into()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    LogAnd,
    LogOr,
    BitAnd,
    BitOr,
    Shl,
    Shr,
}

impl BinOp {
    pub fn token(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Eq => "==",
            BinOp::NotEq => "!=",
            BinOp::Less => "<",
            BinOp::LessEq => "<=",
            BinOp::Greater => ">",
            BinOp::GreaterEq => ">=",
            BinOp::LogAnd => "&&",
            BinOp::LogOr => "||",
            BinOp::BitAnd => "&",
            BinOp::BitOr => "|",
            BinOp::Shl => "<<",
            BinOp::Shr => ">>",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnOp {
    Negative,
    LogNot,
    BitNot,
}

impl UnOp {
    pub fn token(self) -> &'static str {
        match self {
            UnOp::Negative => "-",
            UnOp::LogNot => "!",
            UnOp::BitNot => "~",
        }
    }
}
