//! Abstract Syntax Tree definitions for Slate
//!
//! Every node owns its children exclusively; the tree is immutable once
//! the parser returns it. Spans are kept for diagnostics but excluded
//! from the serialized form, so two parses of equivalently formatted
//! source serialize identically.

use crate::utils::Span;
use serde::Serialize;

/// A complete program (compilation unit)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub functions: Vec<Function>,
}

/// Function definition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    pub name: Ident,
    pub ret: RetType,
    pub params: Vec<Param>,
    pub body: Block,
    #[serde(skip)]
    pub span: Span,
}

/// Function return type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RetType {
    Int,
    Void,
}

impl RetType {
    pub fn keyword(&self) -> &'static str {
        match self {
            RetType::Int => "int",
            RetType::Void => "void",
        }
    }
}

/// Function parameter (parameters are always `int`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: Ident,
    #[serde(skip)]
    pub span: Span,
}

/// An identifier with its source location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ident {
    pub name: String,
    #[serde(skip)]
    pub span: Span,
}

/// Code block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    #[serde(skip)]
    pub span: Span,
}

/// Statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    /// int name = expr ;
    VarDecl {
        name: Ident,
        init: Expr,
        #[serde(skip)]
        span: Span,
    },
    /// name = expr ;
    Assign {
        target: Ident,
        value: Expr,
        #[serde(skip)]
        span: Span,
    },
    /// if ( cond ) block (else block)?
    If {
        cond: Expr,
        then_block: Block,
        else_block: Option<Block>,
        #[serde(skip)]
        span: Span,
    },
    /// while ( cond ) block
    While {
        cond: Expr,
        body: Block,
        #[serde(skip)]
        span: Span,
    },
    /// return expr ;
    Return {
        value: Expr,
        #[serde(skip)]
        span: Span,
    },
    /// expr ;
    Expr(Expr),
}

/// Expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    /// Integer literal
    IntLit {
        value: i64,
        #[serde(skip)]
        span: Span,
    },
    /// Identifier
    Ident(Ident),
    /// Binary operation
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        #[serde(skip)]
        span: Span,
    },
    /// Function call
    Call {
        callee: Ident,
        args: Vec<Expr>,
        #[serde(skip)]
        span: Span,
    },
}

impl Expr {
    /// Get the span covering this expression
    pub fn span(&self) -> Span {
        match self {
            Expr::IntLit { span, .. } => *span,
            Expr::Ident(ident) => ident.span,
            Expr::Binary { span, .. } => *span,
            Expr::Call { span, .. } => *span,
        }
    }
}

/// Binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinOp {
    /// The operator's source symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
        }
    }
}
