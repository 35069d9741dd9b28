mod error;

use rustyline::{error::ReadlineError, DefaultEditor};
use std::fs::File;
use std::io::{self, BufReader, IsTerminal, Read};
use symba_compute::expr::builder::from_postfix;
use symba_compute::{simplify_bounded, DEFAULT_MAX_ROUNDS};
use symba_parser::parse;

/// Parses, builds and simplifies a single input line, printing the result or reporting the
/// failure to stderr.
fn simplify_line(input: &str) {
    let tokens = match parse(input) {
        Ok(tokens) => tokens,
        Err(err) => {
            error::report_to_stderr(&err, input);
            return;
        },
    };

    let tree = match from_postfix(tokens) {
        Ok(tree) => tree,
        Err(err) => {
            error::report_to_stderr(&err, input);
            return;
        },
    };

    let original = tree.to_string();
    let result = simplify_bounded(tree, DEFAULT_MAX_ROUNDS);

    let rendered = result.expr.to_string();
    if rendered == original {
        println!("\t couldn't simplify further: {}", rendered);
    } else {
        println!("\t simplified: {}", rendered);
    }
    println!("\t total rounds: {}", result.rounds);

    if !result.converged {
        eprintln!("\t did not settle after {} rounds", result.rounds);
    }
}

/// Simplifies every non-empty line of the given source text.
fn run_source(source: &str) {
    for line in source.lines() {
        if !line.trim().is_empty() {
            simplify_line(line);
        }
    }
}

fn main() {
    let mut args = std::env::args();
    args.next();

    if let Some(filename) = args.next() {
        // run source file
        let mut file = BufReader::new(File::open(filename).unwrap());
        let mut input = String::new();
        file.read_to_string(&mut input).unwrap();

        run_source(&input);
    } else if !io::stdin().is_terminal() {
        // read source from stdin
        let mut input = String::new();
        io::stdin().read_to_string(&mut input).unwrap();

        run_source(&input);
    } else {
        // run the repl / interactive mode
        println!("Welcome to symba.");
        println!("Type `exit` to quit and `clear` to clear the screen.");
        println!();

        let mut rl = DefaultEditor::new().unwrap();
        let mut line_number = 1usize;

        fn process_line(rl: &mut DefaultEditor, line_number: usize) -> Result<bool, ReadlineError> {
            let input = rl.readline(&format!("symba:{}> ", line_number))?;
            let input = input.trim();
            if input.is_empty() {
                return Ok(true);
            }

            rl.add_history_entry(input)?;

            match input {
                "exit" => return Ok(false),
                // ANSI clear-screen plus cursor home
                "clear" => print!("\x1b[2J\x1b[1;1H"),
                expression => simplify_line(expression),
            }
            Ok(true)
        }

        loop {
            match process_line(&mut rl, line_number) {
                Ok(true) => {},
                Ok(false) => break,
                Err(ReadlineError::Eof | ReadlineError::Interrupted) => break,
                Err(err) => {
                    eprintln!("{}", err);
                    break;
                },
            }
            line_number += 1;
        }
    }
}
