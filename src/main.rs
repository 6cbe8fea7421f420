/// mettaspace - MeTTa Evaluator CLI
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mettaspace::backend::{Config, Metta};
use mettaspace::error::MettaError;
use mettaspace::repl::{format_results, run_repl};

/// Run MeTTa programs over atom spaces
#[derive(Parser)]
#[command(name = "mettaspace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input MeTTa file (use '-' for stdin)
    #[arg(required_unless_present = "repl")]
    input: Option<String>,

    /// Start interactive REPL
    #[arg(long)]
    repl: bool,

    /// Print parsed atoms instead of evaluating
    #[arg(long)]
    sexpr: bool,

    /// Interpreter configuration (TOML)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write output to FILE (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "mettaspace=debug,warn",
        _ => "mettaspace=trace,warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn read_input(input: &str) -> Result<String, MettaError> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| MettaError::Io(format!("Failed to read from stdin: {}", e)))?;
        Ok(buffer)
    } else {
        fs::read_to_string(input).map_err(|e| MettaError::Io(format!("Failed to read file '{}': {}", input, e)))
    }
}

fn write_output(output: Option<&PathBuf>, content: &str) -> Result<(), MettaError> {
    match output {
        Some(path) => {
            let mut file = fs::File::create(path)?;
            file.write_all(content.as_bytes())?;
            Ok(())
        }
        None => {
            print!("{}", content);
            Ok(())
        }
    }
}

/// Evaluate every form of `input`. Query failures are reported on stderr
/// and do not stop the forms after them.
fn eval_metta(metta: &Metta, input: &str, show_sexpr: bool) -> (String, bool) {
    let mut output = String::new();
    let mut ok = true;

    if show_sexpr {
        match metta.parse_all(input) {
            Ok(atoms) => {
                for atom in atoms {
                    output.push_str(&format!("{}\n", atom));
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ok = false;
            }
        }
        return (output, ok);
    }

    for outcome in metta.run_forms(input) {
        match outcome {
            Ok(results) => output.push_str(&format!("{}\n", format_results(&results))),
            Err(e) => {
                eprintln!("Error: {}", e);
                ok = false;
            }
        }
    }
    (output, ok)
}

fn run(cli: &Cli) -> Result<bool, MettaError> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    debug!(target: "mettaspace::main", max_depth = config.eval.max_depth, "configured");
    let metta = Metta::with_config(config.eval);

    if cli.repl {
        run_repl(&metta)?;
        return Ok(true);
    }

    let Some(input) = cli.input.as_deref() else {
        return Err(MettaError::Io("Missing input file".to_string()));
    };
    let content = read_input(input)?;
    let (output, ok) = eval_metta(&metta, &content, cli.sexpr);
    write_output(cli.output.as_ref(), &output)?;
    Ok(ok)
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
