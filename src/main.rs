use std::{fs, path::PathBuf, process::ExitCode};

use clap::Parser;
use funke::interpreter::host::StdHost;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `FUNKE_LOG=debug`.
const LOG_ENV: &str = "FUNKE_LOG";

/// funke runs programs written in a tiny prefix-notation expression
/// language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The script to run.
    file: PathBuf,

    /// Seeds the random number generator behind `@` for reproducible runs.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Prints the value of the program's final expression once it has run.
    #[arg(short, long)]
    print_result: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(std::io::stderr)
                             .init();

    let Ok(script) = fs::read_to_string(&args.file) else {
        eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                  args.file.display());
        return ExitCode::FAILURE;
    };
    debug!(file = %args.file.display(), bytes = script.len(), "loaded script");

    let mut host = args.seed.map_or_else(StdHost::new, StdHost::with_seed);

    match funke::run(&script, &mut host) {
        Ok(result) => {
            if args.print_result {
                if let Some(value) = result {
                    println!("{value}");
                }
            }
            ExitCode::SUCCESS
        },
        Err(e) => {
            debug!(error = ?e, "program failed");
            eprint!("{}", e.render(&script));
            ExitCode::FAILURE
        },
    }
}
