use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use sxpr::{
    Builtin, Environment, MapEnvironment, Reader, Result, Value, evaluate, get_string, read_all,
};
use tracing_subscriber::EnvFilter;

// ============================================================================
// Host Forms
// ============================================================================

fn list(_env: &mut dyn Environment, args: &[Value]) -> Result<Value> {
    Ok(Value::list(args.to_vec()))
}

fn cat(_env: &mut dyn Environment, args: &[Value]) -> Result<Value> {
    let mut text = String::new();
    for index in 0..args.len() {
        text.push_str(&get_string(args, index)?);
    }
    Ok(Value::string(text))
}

/// The argument arrives evaluated, so one more pass runs it as code.
fn eval(env: &mut dyn Environment, args: &[Value]) -> Result<Value> {
    evaluate(env, &args[0])
}

fn host_environment() -> MapEnvironment {
    let mut env = MapEnvironment::new();
    env.register(Builtin::variadic("QUOTE", true, 0, list));
    env.register(Builtin::variadic("LIST", false, 0, list));
    env.register(Builtin::variadic("CAT", false, 0, cat));
    env.register(Builtin::new("EVAL", false, 1, 1, eval));
    env
}

// ============================================================================
// REPL
// ============================================================================

fn history_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("sxpr").join("history.txt"))
}

fn repl() {
    let mut env = host_environment();

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Could not initialize line editor: {e}");
            process::exit(1);
        }
    };
    let history = history_path();
    if let Some(path) = &history {
        let _ = rl.load_history(path);
    }

    println!("sxpr s-expression REPL");
    println!("Forms: QUOTE, LIST, CAT, EVAL. Ctrl+D to quit");
    println!();

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                for expr in Reader::new(line) {
                    match expr {
                        Ok(expr) => match evaluate(&mut env, &expr) {
                            Ok(result) => println!("{result}"),
                            Err(e) => eprintln!("Error: {e}"),
                        },
                        Err(e) => eprintln!("Read error: {e}"),
                    }
                }
            }
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => break,
            Err(e) => {
                eprintln!("Error: {e}");
                break;
            }
        }
    }

    if let Some(path) = &history {
        if let Some(dir) = path.parent() {
            let _ = fs::create_dir_all(dir);
        }
        let _ = rl.save_history(path);
    }
}

/// Evaluate every expression in `filename` and return the last result.
fn run_file(filename: &str) -> std::result::Result<Option<Value>, String> {
    let contents = fs::read_to_string(filename)
        .map_err(|e| format!("Failed to read file '{filename}': {e}"))?;

    let exprs = read_all(&contents).map_err(|e| format!("Read error: {e}"))?;
    let mut env = host_environment();
    let mut last_result = None;

    for expr in &exprs {
        let result = evaluate(&mut env, expr).map_err(|e| format!("Evaluation error: {e}"))?;
        last_result = Some(result);
    }

    Ok(last_result)
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  sxpr              Start interactive REPL");
    eprintln!("  sxpr <file>       Evaluate every expression in a file");
    eprintln!("  sxpr --help       Show this help message");
    eprintln!();
    eprintln!("Set RUST_LOG=sxpr=trace to follow evaluation.");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    match args.len() {
        1 => repl(),
        2 => {
            let arg = &args[1];
            if arg == "--help" || arg == "-h" {
                print_usage();
            } else {
                match run_file(arg) {
                    Ok(Some(result)) => println!("{result}"),
                    Ok(None) => {}
                    Err(e) => {
                        eprintln!("{e}");
                        process::exit(1);
                    }
                }
            }
        }
        _ => {
            eprintln!("Error: Too many arguments");
            print_usage();
            process::exit(1);
        }
    }
}
