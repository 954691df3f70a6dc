use clap::Parser as ClapParser;
use std::{
    fs,
    io::{self, Write},
    process,
};

extern crate frontend;
extern crate runtime;

use frontend::lexer::Lexer;
use frontend::parser::Parser;
use runtime::interpreter::Interpreter;

// --------
//   CLI
// --------

#[derive(ClapParser)]
#[command(version)]
#[command(about = "Interpreter for the Adder language")]
struct CLI {
    /// Path to the script to run
    file: String,

    /// Prints the AST before running
    #[arg(short, long)]
    ast_print: bool,
}

fn main() {
    let cli = CLI::parse();

    let source_code = match fs::read_to_string(&cli.file) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error opening script file {}: {e}", cli.file);
            process::exit(1);
        }
    };

    let mut lexer = Lexer::default();
    if let Err(e) = lexer.tokenize(source_code) {
        eprintln!("{e}");
        process::exit(1);
    }

    let mut parser = Parser::default();
    if let Err(e) = parser.build_ast(lexer.tokens.clone()) {
        eprintln!("{e}");
        process::exit(1);
    }

    if cli.ast_print {
        println!("{:#?}", parser.program);
    }

    // Program output goes through the interpreter to stdout, diagnostics
    // stay on stderr
    let mut stdout = io::stdout();
    let mut interp = Interpreter::new(&mut stdout);
    let result = interp.execute_program(&parser.program);

    if let Err(e) = stdout.flush() {
        eprintln!("Error flushing stdout: {e}");
        process::exit(1);
    }

    if let Err(e) = result {
        eprintln!("{e}");
        process::exit(1);
    }
}
