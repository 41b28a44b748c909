//! Parser for Slate
//!
//! Recursive descent with one parsing method per grammar rule. Binary
//! operators are left-associative across three fixed levels (comparison,
//! additive, multiplicative); a comparison yields a plain integer, so its
//! result can feed further arithmetic. Parsing stops at the first error.

use crate::frontend::ast::*;
use crate::frontend::token::{Token, TokenKind};
use crate::utils::ParseError;

/// The parser
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Create a parser over a token sequence ending in `Eof`
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    // ==================== Helper Methods ====================

    fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or_else(|| {
            self.tokens.last().expect("tokens should not be empty")
        })
    }

    fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos + 1).map(|t| &t.kind)
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    fn expect(&mut self, expected: TokenKind) -> Result<Token, ParseError> {
        if self.check(&expected) {
            Ok(self.advance())
        } else {
            Err(self.expected_err(&expected.to_string()))
        }
    }

    fn consume(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Build the error for a token that doesn't match what the grammar
    /// needs here. Running out of tokens is its own error kind.
    fn expected_err(&self, expected: &str) -> ParseError {
        let token = self.current();
        if self.is_at_end() {
            ParseError::UnexpectedEndOfInput {
                expected: expected.to_string(),
                span: token.span,
            }
        } else {
            ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: token.to_string(),
                span: token.span,
            }
        }
    }

    // ==================== Parsing Methods ====================

    /// Parse a complete program
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut functions = Vec::new();

        while !self.is_at_end() {
            functions.push(self.parse_function()?);
        }

        Ok(Program { functions })
    }

    /// Parse a function declaration
    fn parse_function(&mut self) -> Result<Function, ParseError> {
        let start = self.current().span;

        let ret = match self.current_kind() {
            TokenKind::Int => {
                self.advance();
                RetType::Int
            }
            TokenKind::Void => {
                self.advance();
                RetType::Void
            }
            _ => return Err(self.expected_err("'int' or 'void'")),
        };

        let name = self.parse_ident()?;

        self.expect(TokenKind::LParen)?;
        let params = self.parse_params()?;
        self.expect(TokenKind::RParen)?;

        let body = self.parse_block()?;

        Ok(Function {
            name,
            ret,
            params,
            span: start.merge(&body.span),
            body,
        })
    }

    fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();

        if self.check(&TokenKind::RParen) {
            return Ok(params);
        }

        loop {
            let start = self.current().span;
            self.expect(TokenKind::Int)?;
            let name = self.parse_ident()?;

            params.push(Param {
                span: start.merge(&name.span),
                name,
            });

            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }

        Ok(params)
    }

    fn parse_ident(&mut self) -> Result<Ident, ParseError> {
        let token = self.current().clone();
        match &token.kind {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(Ident {
                    name: name.clone(),
                    span: token.span,
                })
            }
            _ => Err(self.expected_err("identifier")),
        }
    }

    fn parse_block(&mut self) -> Result<Block, ParseError> {
        let start = self.current().span;
        self.expect(TokenKind::LBrace)?;

        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            stmts.push(self.parse_stmt()?);
        }

        let end = self.expect(TokenKind::RBrace)?;

        Ok(Block {
            stmts,
            span: start.merge(&end.span),
        })
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        match self.current_kind() {
            TokenKind::Int => self.parse_var_decl(),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::Return => self.parse_return_stmt(),
            // `name = ...` is an assignment; any other expression head
            // (including a call) is an expression statement
            TokenKind::Ident(_) if matches!(self.peek_kind(), Some(TokenKind::Eq)) => {
                self.parse_assign_stmt()
            }
            _ => {
                let expr = self.parse_expr()?;
                self.expect(TokenKind::Semicolon)?;
                Ok(Stmt::Expr(expr))
            }
        }
    }

    fn parse_var_decl(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current().span;
        self.expect(TokenKind::Int)?;

        let name = self.parse_ident()?;
        self.expect(TokenKind::Eq)?;
        let init = self.parse_expr()?;
        let end = self.expect(TokenKind::Semicolon)?;

        Ok(Stmt::VarDecl {
            name,
            init,
            span: start.merge(&end.span),
        })
    }

    fn parse_assign_stmt(&mut self) -> Result<Stmt, ParseError> {
        let target = self.parse_ident()?;
        self.expect(TokenKind::Eq)?;
        let value = self.parse_expr()?;
        let end = self.expect(TokenKind::Semicolon)?;

        Ok(Stmt::Assign {
            span: target.span.merge(&end.span),
            target,
            value,
        })
    }

    fn parse_if_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current().span;
        self.expect(TokenKind::If)?;

        self.expect(TokenKind::LParen)?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen)?;

        let then_block = self.parse_block()?;

        let else_block = if self.consume(&TokenKind::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };

        let end = else_block.as_ref().map(|b| b.span).unwrap_or(then_block.span);

        Ok(Stmt::If {
            cond,
            then_block,
            else_block,
            span: start.merge(&end),
        })
    }

    fn parse_while_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current().span;
        self.expect(TokenKind::While)?;

        self.expect(TokenKind::LParen)?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen)?;

        let body = self.parse_block()?;

        Ok(Stmt::While {
            cond,
            span: start.merge(&body.span),
            body,
        })
    }

    fn parse_return_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current().span;
        self.expect(TokenKind::Return)?;

        let value = self.parse_expr()?;
        let end = self.expect(TokenKind::Semicolon)?;

        Ok(Stmt::Return {
            value,
            span: start.merge(&end.span),
        })
    }

    // ==================== Expression Parsing ====================

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;

        while let Some(op) = Self::comparison_op(self.current_kind()) {
            self.advance();
            let right = self.parse_additive()?;
            let span = left.span().merge(&right.span());
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                span,
            };
        }

        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;

        while let Some(op) = Self::additive_op(self.current_kind()) {
            self.advance();
            let right = self.parse_multiplicative()?;
            let span = left.span().merge(&right.span());
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                span,
            };
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_primary()?;

        while let Some(op) = Self::multiplicative_op(self.current_kind()) {
            self.advance();
            let right = self.parse_primary()?;
            let span = left.span().merge(&right.span());
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                span,
            };
        }

        Ok(left)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.current().clone();

        match &token.kind {
            TokenKind::IntLit(value) => {
                self.advance();
                Ok(Expr::IntLit {
                    value: *value,
                    span: token.span,
                })
            }

            // Identifier or call
            TokenKind::Ident(_) => {
                let ident = self.parse_ident()?;

                if self.consume(&TokenKind::LParen) {
                    let mut args = Vec::new();
                    if !self.check(&TokenKind::RParen) {
                        loop {
                            args.push(self.parse_expr()?);
                            if !self.consume(&TokenKind::Comma) {
                                break;
                            }
                        }
                    }
                    let end = self.expect(TokenKind::RParen)?;

                    Ok(Expr::Call {
                        span: ident.span.merge(&end.span),
                        callee: ident,
                        args,
                    })
                } else {
                    Ok(Expr::Ident(ident))
                }
            }

            // Parenthesized expression
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }

            _ => Err(self.expected_err("expression")),
        }
    }

    fn comparison_op(kind: &TokenKind) -> Option<BinOp> {
        match kind {
            TokenKind::EqEq => Some(BinOp::Eq),
            TokenKind::Ne => Some(BinOp::Ne),
            TokenKind::Lt => Some(BinOp::Lt),
            TokenKind::Le => Some(BinOp::Le),
            TokenKind::Gt => Some(BinOp::Gt),
            TokenKind::Ge => Some(BinOp::Ge),
            _ => None,
        }
    }

    fn additive_op(kind: &TokenKind) -> Option<BinOp> {
        match kind {
            TokenKind::Plus => Some(BinOp::Add),
            TokenKind::Minus => Some(BinOp::Sub),
            _ => None,
        }
    }

    fn multiplicative_op(kind: &TokenKind) -> Option<BinOp> {
        match kind {
            TokenKind::Star => Some(BinOp::Mul),
            TokenKind::Slash => Some(BinOp::Div),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::lexer::Lexer;

    fn parse(source: &str) -> Result<Program, ParseError> {
        let tokens = Lexer::new(source).tokenize().unwrap();
        Parser::new(tokens).parse_program()
    }

    #[test]
    fn test_empty_program() {
        let program = parse("").unwrap();
        assert!(program.functions.is_empty());
    }

    #[test]
    fn test_minimal_function() {
        let program = parse("int Main(){return 1;}").unwrap();
        assert_eq!(program.functions.len(), 1);

        let func = &program.functions[0];
        assert_eq!(func.name.name, "Main");
        assert_eq!(func.ret, RetType::Int);
        assert!(func.params.is_empty());
        assert_eq!(func.body.stmts.len(), 1);
        assert!(matches!(
            func.body.stmts[0],
            Stmt::Return { value: Expr::IntLit { value: 1, .. }, .. }
        ));
    }

    #[test]
    fn test_void_function_with_param() {
        let program = parse("void Foo(int z) { int t = z + 2; }").unwrap();

        let func = &program.functions[0];
        assert_eq!(func.ret, RetType::Void);
        assert_eq!(func.params.len(), 1);
        assert_eq!(func.params[0].name.name, "z");
        assert!(matches!(func.body.stmts[0], Stmt::VarDecl { .. }));
    }

    #[test]
    fn test_multiple_params() {
        let program = parse("int Add(int a, int b) { return a + b; }").unwrap();
        let func = &program.functions[0];
        assert_eq!(func.params.len(), 2);
        assert_eq!(func.params[0].name.name, "a");
        assert_eq!(func.params[1].name.name, "b");
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        let program = parse("int Main() { return 1 + 2 * 3; }").unwrap();

        let Stmt::Return { value, .. } = &program.functions[0].body.stmts[0] else {
            panic!("expected return");
        };
        let Expr::Binary { op: BinOp::Add, right, .. } = value else {
            panic!("expected addition at the top, got {:?}", value);
        };
        assert!(matches!(**right, Expr::Binary { op: BinOp::Mul, .. }));
    }

    #[test]
    fn test_parens_override_precedence() {
        let program = parse("int Main() { return (1 + 2) * 3; }").unwrap();

        let Stmt::Return { value, .. } = &program.functions[0].body.stmts[0] else {
            panic!("expected return");
        };
        let Expr::Binary { op: BinOp::Mul, left, .. } = value else {
            panic!("expected multiplication at the top, got {:?}", value);
        };
        assert!(matches!(**left, Expr::Binary { op: BinOp::Add, .. }));
    }

    #[test]
    fn test_left_associativity() {
        let program = parse("int Main() { return 1 - 2 - 3; }").unwrap();

        let Stmt::Return { value, .. } = &program.functions[0].body.stmts[0] else {
            panic!("expected return");
        };
        // (1 - 2) - 3
        let Expr::Binary { op: BinOp::Sub, left, right, .. } = value else {
            panic!("expected subtraction, got {:?}", value);
        };
        assert!(matches!(**left, Expr::Binary { op: BinOp::Sub, .. }));
        assert!(matches!(**right, Expr::IntLit { value: 3, .. }));
    }

    #[test]
    fn test_comparison_chains_left_associative() {
        // No boolean type: `1 < 2 < 3` is `(1 < 2) < 3` on integers
        let program = parse("int Main() { return 1 < 2 < 3; }").unwrap();

        let Stmt::Return { value, .. } = &program.functions[0].body.stmts[0] else {
            panic!("expected return");
        };
        let Expr::Binary { op: BinOp::Lt, left, .. } = value else {
            panic!("expected comparison, got {:?}", value);
        };
        assert!(matches!(**left, Expr::Binary { op: BinOp::Lt, .. }));
    }

    #[test]
    fn test_comparison_result_in_arithmetic() {
        let program = parse("int Main() { return (1 < 2) + 1; }").unwrap();

        let Stmt::Return { value, .. } = &program.functions[0].body.stmts[0] else {
            panic!("expected return");
        };
        assert!(matches!(value, Expr::Binary { op: BinOp::Add, .. }));
    }

    #[test]
    fn test_if_else() {
        let program = parse("int Main() { if (a >= b) { Foo(a); } else { Foo(b); } return 0; }")
            .unwrap();

        let Stmt::If { cond, then_block, else_block, .. } = &program.functions[0].body.stmts[0]
        else {
            panic!("expected if");
        };
        assert!(matches!(cond, Expr::Binary { op: BinOp::Ge, .. }));
        assert_eq!(then_block.stmts.len(), 1);
        assert!(else_block.is_some());
    }

    #[test]
    fn test_assignment_vs_call_statement() {
        let program = parse("void Main() { a = 1; Foo(a, 1 + 2); }").unwrap();

        let stmts = &program.functions[0].body.stmts;
        assert!(matches!(stmts[0], Stmt::Assign { .. }));

        let Stmt::Expr(Expr::Call { callee, args, .. }) = &stmts[1] else {
            panic!("expected call statement");
        };
        assert_eq!(callee.name, "Foo");
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_while_loop() {
        let program = parse("int Main() { while (b < a) { b = b + 1; } return b; }").unwrap();

        let Stmt::While { cond, body, .. } = &program.functions[0].body.stmts[0] else {
            panic!("expected while");
        };
        assert!(matches!(cond, Expr::Binary { op: BinOp::Lt, .. }));
        assert_eq!(body.stmts.len(), 1);
    }

    #[test]
    fn test_missing_init_expression() {
        let err = parse("int Main() { int a = ; }").unwrap_err();
        match err {
            ParseError::UnexpectedToken { expected, found, .. } => {
                assert_eq!(expected, "expression");
                assert_eq!(found, "';'");
            }
            other => panic!("expected UnexpectedToken, got {:?}", other),
        }
    }

    #[test]
    fn test_trailing_comma_in_params_rejected() {
        let err = parse("int Add(int a,) { return a; }").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedToken { ref expected, ref found, .. }
                if expected == "'int'" && found == "')'"
        ));
    }

    #[test]
    fn test_trailing_comma_in_args_rejected() {
        let err = parse("void Main() { Foo(1,); }").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedToken { ref expected, .. } if expected == "expression"
        ));
    }

    #[test]
    fn test_missing_semicolon() {
        let err = parse("int Main() { return 1 }").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedToken { ref expected, .. } if expected == "';'"
        ));
    }

    #[test]
    fn test_unexpected_end_of_input() {
        let err = parse("int Main() {").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEndOfInput { .. }));
    }

    #[test]
    fn test_bad_top_level() {
        let err = parse("42").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedToken { ref expected, .. } if expected == "'int' or 'void'"
        ));
    }
}
