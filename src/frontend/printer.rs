//! Pretty-printer for Slate
//!
//! Reconstructs source text from an AST. The output is deterministic:
//! 4-space indentation, one statement per line, nested binary operands
//! parenthesized. Re-parsing printed output yields a structurally equal
//! tree, so the printer doubles as a canonical form.

use crate::frontend::ast::*;
use std::fmt::Write;

/// Print a program to source text
pub fn print_program(program: &Program) -> String {
    Printer::new().print(program)
}

/// Pretty printer for Slate programs
pub struct Printer {
    output: String,
    indent: usize,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    /// Print a program to string
    pub fn print(mut self, program: &Program) -> String {
        for (i, func) in program.functions.iter().enumerate() {
            if i > 0 {
                writeln!(self.output).unwrap();
            }
            self.print_function(func);
        }
        self.output
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
    }

    fn print_function(&mut self, func: &Function) {
        write!(self.output, "{} {}(", func.ret.keyword(), func.name.name).unwrap();
        for (i, param) in func.params.iter().enumerate() {
            if i > 0 {
                write!(self.output, ", ").unwrap();
            }
            write!(self.output, "int {}", param.name.name).unwrap();
        }
        write!(self.output, ") ").unwrap();
        self.print_block(&func.body);
        writeln!(self.output).unwrap();
    }

    /// Print a block; the opening brace lands at the cursor, the closing
    /// brace on its own indented line without a trailing newline
    fn print_block(&mut self, block: &Block) {
        writeln!(self.output, "{{").unwrap();
        self.indent += 1;

        for stmt in &block.stmts {
            self.write_indent();
            self.print_stmt(stmt);
            writeln!(self.output).unwrap();
        }

        self.indent -= 1;
        self.write_indent();
        write!(self.output, "}}").unwrap();
    }

    fn print_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl { name, init, .. } => {
                write!(self.output, "int {} = ", name.name).unwrap();
                self.print_expr(init);
                self.output.push(';');
            }
            Stmt::Assign { target, value, .. } => {
                write!(self.output, "{} = ", target.name).unwrap();
                self.print_expr(value);
                self.output.push(';');
            }
            Stmt::If { cond, then_block, else_block, .. } => {
                self.output.push_str("if (");
                self.print_expr(cond);
                self.output.push_str(") ");
                self.print_block(then_block);
                if let Some(else_block) = else_block {
                    self.output.push_str(" else ");
                    self.print_block(else_block);
                }
            }
            Stmt::While { cond, body, .. } => {
                self.output.push_str("while (");
                self.print_expr(cond);
                self.output.push_str(") ");
                self.print_block(body);
            }
            Stmt::Return { value, .. } => {
                self.output.push_str("return ");
                self.print_expr(value);
                self.output.push(';');
            }
            Stmt::Expr(expr) => {
                self.print_expr(expr);
                self.output.push(';');
            }
        }
    }

    fn print_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::IntLit { value, .. } => {
                write!(self.output, "{}", value).unwrap();
            }
            Expr::Ident(ident) => {
                self.output.push_str(&ident.name);
            }
            Expr::Binary { op, left, right, .. } => {
                self.print_operand(left);
                write!(self.output, " {} ", op.symbol()).unwrap();
                self.print_operand(right);
            }
            Expr::Call { callee, args, .. } => {
                write!(self.output, "{}(", callee.name).unwrap();
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.print_expr(arg);
                }
                self.output.push(')');
            }
        }
    }

    /// Nested binary expressions are always parenthesized, which keeps
    /// grouping explicit without tracking operator precedence here
    fn print_operand(&mut self, expr: &Expr) {
        if matches!(expr, Expr::Binary { .. }) {
            self.output.push('(');
            self.print_expr(expr);
            self.output.push(')');
        } else {
            self.print_expr(expr);
        }
    }
}
