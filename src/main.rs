use mjava::interpreter::Interpreter;
use mjava::parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("Usage: mjava <file.mj> [more files...]");
        return ExitCode::FAILURE;
    }

    let mut programs = Vec::with_capacity(paths.len());
    for path in &paths {
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("Could not read {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        };
        match parser::parse_source(&source) {
            Ok(program) => programs.push(program),
            Err(e) => {
                eprintln!("{}: {}", path, e);
                return ExitCode::FAILURE;
            }
        }
    }

    let mut interpreter = match Interpreter::from_programs(&programs) {
        Ok(interpreter) => interpreter,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = interpreter.run();
    print!("{}", interpreter.console.output());

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
