use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use jitcalc::{evaluate, generate, parse, Backend, CalcError, Environment, JitBackend, StackMachine};

/// Evaluates one arithmetic expression and prints the result.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Expression to evaluate. Read from standard input when omitted.
    expr: Option<String>,

    /// Binds a variable, e.g. `--var x=2.5`. May be repeated.
    #[arg(short, long = "var", value_parser = parse_binding)]
    vars: Vec<(String, f64)>,

    /// How the expression is executed.
    #[arg(short, long, value_enum, default_value_t = Strategy::Jit)]
    backend: Strategy,

    /// Print the generated program, and the Cranelift IR for the JIT, to stderr.
    #[arg(long)]
    emit: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Strategy {
    /// Compile to native code with Cranelift.
    Jit,
    /// Interpret the generated program on a stack machine.
    Stack,
    /// Walk the syntax tree directly.
    Tree,
}

fn parse_binding(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))?;
    let name = name.trim();
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(format!("variable names are alphabetic, got '{}'", name));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid value for '{}': {}", name, e))?;
    Ok((name.to_string(), value))
}

fn read_expression() -> io::Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "Enter expression: ")?;
    stdout.flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

fn run(input: &str, env: &Environment, args: &Args) -> Result<f64, CalcError> {
    let ast = parse(input)?;
    let out = match args.backend {
        Strategy::Tree => evaluate(&ast, env)?,
        Strategy::Stack => {
            let program = generate(&ast, env)?;
            if args.emit {
                eprint!("{}", program);
            }
            StackMachine::new().execute(&program)?
        }
        Strategy::Jit => {
            let program = generate(&ast, env)?;
            if args.emit {
                eprint!("{}", program);
            }
            let compiled = JitBackend::new().compile(&program)?;
            if args.emit {
                eprint!("{}", compiled.ir());
            }
            compiled.call(program.inputs())?
        }
    };
    Ok(out)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let input = match &args.expr {
        Some(expr) => expr.clone(),
        None => match read_expression() {
            Ok(line) => line,
            Err(e) => {
                eprintln!("failed to read expression: {e}");
                return ExitCode::FAILURE;
            }
        },
    };
    let env: Environment = args.vars.iter().cloned().collect();

    match run(&input, &env, &args) {
        Ok(value) => {
            println!("Result: {}", value);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
