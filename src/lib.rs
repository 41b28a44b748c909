//! # Slate frontend
//!
//! Lexer and recursive-descent parser for Slate, a small C-style language
//! with functions, integer variables, arithmetic, `if`/`else`, `while`,
//! `return`, and both comment forms.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST
//! ```
//!
//! 1. [`frontend::lexer`] — tokenization (source text → tokens).
//! 2. [`frontend::parser`] — parsing (tokens → AST).
//! 3. [`frontend::ast`] — AST node definitions.
//! 4. [`frontend::printer`] — AST back to canonical source text.
//!
//! Reading source files and reporting diagnostics are the caller's job;
//! the library is a pure function from source text to either an AST or a
//! single structured error carrying a [`utils::Span`].
//!
//! ```
//! let program = slate_lang::parse("int Main() { return 1; }").unwrap();
//! assert_eq!(program.functions[0].name.name, "Main");
//! ```

pub mod frontend;
pub mod utils;

use frontend::ast::Program;
use frontend::lexer::Lexer;
use frontend::parser::Parser;
use frontend::token::Token;
use utils::Result;

/// Lex `source` into a token sequence ending in a single `Eof` token
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    Ok(Lexer::new(source).tokenize()?)
}

/// Lex and parse `source` into a program, failing at the first error
pub fn parse(source: &str) -> Result<Program> {
    let tokens = Lexer::new(source).tokenize()?;
    Ok(Parser::new(tokens).parse_program()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::ast::{Expr, RetType, Stmt};
    use crate::utils::{Error, LexError};

    /// The reference program exercising every construct the language has
    const SAMPLE: &str = r#"
// A simple helper function with one parameter
void Foo(int z) {
    // declare a new variable and do a + operation
    int t = z + 2;
}

/*
    This is a
    multiline comment
    spanning several lines.
    It will be skipped entirely by our lexer.
*/

// Entry point
int Main() {
    // variable declarations + assignment
    int a = 10;
    int b = 3;
    int c = a + b;

    // reassignment with a - operation
    a = c - 1;

    // if/else with a comparison
    if (a >= b) {
        Foo(a);
    } else {
        Foo(b);
    }

    // while loop
    while (b < a) {
        b = b + 1;
    }

    // return a value
    return b;
}
"#;

    #[test]
    fn test_empty_source() {
        let tokens = tokenize("").unwrap();
        assert_eq!(tokens.len(), 1);

        let program = parse("").unwrap();
        assert!(program.functions.is_empty());
    }

    #[test]
    fn test_sample_program() {
        let program = parse(SAMPLE).unwrap();
        assert_eq!(program.functions.len(), 2);

        let foo = &program.functions[0];
        assert_eq!(foo.name.name, "Foo");
        assert_eq!(foo.ret, RetType::Void);
        assert_eq!(foo.params.len(), 1);

        let main = &program.functions[1];
        assert_eq!(main.name.name, "Main");
        assert_eq!(main.ret, RetType::Int);

        // Main's body, in order: three declarations, an assignment,
        // if/else, while, return
        let stmts = &main.body.stmts;
        assert_eq!(stmts.len(), 7);
        assert!(matches!(&stmts[0], Stmt::VarDecl { name, .. } if name.name == "a"));
        assert!(matches!(&stmts[1], Stmt::VarDecl { name, .. } if name.name == "b"));
        assert!(matches!(&stmts[2], Stmt::VarDecl { name, .. } if name.name == "c"));
        assert!(matches!(&stmts[3], Stmt::Assign { target, .. } if target.name == "a"));
        assert!(matches!(&stmts[4], Stmt::If { .. }));
        assert!(matches!(&stmts[5], Stmt::While { .. }));
        assert!(matches!(&stmts[6], Stmt::Return { value: Expr::Ident(_), .. }));
    }

    #[test]
    fn test_sample_round_trips() {
        let first = parse(SAMPLE).unwrap();
        let printed = frontend::printer::print_program(&first);
        let second = parse(&printed).unwrap();

        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }

    #[test]
    fn test_lex_error_surfaces_through_parse() {
        let err = parse("int Main() { return 1; } /* trailing").unwrap_err();
        assert!(matches!(err, Error::Lex(LexError::UnterminatedComment { .. })));
    }
}
