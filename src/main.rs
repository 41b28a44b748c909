//! Slate frontend driver
//!
//! Reads a source file, runs the lexer and parser, and reports either a
//! summary of the parsed program or the first error with its line and
//! column.

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::debug;
use std::fs;
use std::path::PathBuf;
use std::process;

use slate_lang::frontend::printer::print_program;
use slate_lang::utils::Error;

/// Slate frontend
#[derive(Parser, Debug)]
#[command(name = "slatec")]
#[command(version = "0.1.0")]
#[command(about = "Slate frontend - lexer and parser for a small C-style language")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input source file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Print the AST as JSON
    #[arg(long)]
    emit_ast: bool,

    /// Print the pretty-printed reconstruction of the source
    #[arg(long)]
    emit_src: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a source file for syntax errors
    Check {
        /// Input source file
        input: PathBuf,
    },
    /// Print version information
    Version,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Check { input }) => {
            let source = read_source(input)?;
            let program = parse_or_exit(&source);
            debug!("parsed {} function(s)", program.functions.len());
            println!("No syntax errors in {}", input.display());
        }
        Some(Commands::Version) => {
            println!("slatec 0.1.0");
            println!("Slate frontend");
            println!("License: Apache-2.0");
        }
        None => {
            let Some(ref input) = cli.input else {
                eprintln!("Error: No input file specified");
                eprintln!("Usage: slatec <FILE> or slatec check <FILE>");
                process::exit(1);
            };

            let source = read_source(input)?;
            let program = parse_or_exit(&source);
            debug!("parsed {} function(s)", program.functions.len());

            println!("Parsed {} function(s):", program.functions.len());
            for func in &program.functions {
                println!(
                    "  {} {}({} parameter(s))",
                    func.ret.keyword(),
                    func.name.name,
                    func.params.len()
                );
            }

            if cli.emit_ast {
                let json = serde_json::to_string_pretty(&program)
                    .context("serializing AST")?;
                println!("{}", json);
            }

            if cli.emit_src {
                print!("{}", print_program(&program));
            }
        }
    }

    Ok(())
}

fn read_source(input: &PathBuf) -> anyhow::Result<String> {
    fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))
}

/// Parse the source, reporting the first error with its position
fn parse_or_exit(source: &str) -> slate_lang::frontend::ast::Program {
    match slate_lang::parse(source) {
        Ok(program) => program,
        Err(e) => {
            report_error(source, &e);
            process::exit(1);
        }
    }
}

fn report_error(source: &str, error: &Error) {
    let (line, col) = error.span().line_col(source);
    match error {
        Error::Lex(e) => eprintln!("Lex error at line {}, column {}: {}", line, col, e),
        Error::Parse(e) => eprintln!("Parse error at line {}, column {}: {}", line, col, e),
    }
}
