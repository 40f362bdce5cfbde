//! Delve CLI entry point.

use std::env;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use delve_engine::EngineConfig;
use delve_runtime::{Repl, Session, run_batch};
use tracing_subscriber::EnvFilter;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    load: Option<PathBuf>,
    batch_mode: bool,
    show_help: bool,
    show_version: bool,
    log_filter: Option<String>,
    max_sentence_length: Option<usize>,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn value_of(args: &[String], i: usize, flag: &str) -> Result<String, Box<dyn std::error::Error>> {
    args.get(i)
        .cloned()
        .ok_or_else(|| format!("{flag} requires a value").into())
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            "--load" => {
                i += 1;
                config.load = Some(PathBuf::from(value_of(&args, i, "--load")?));
            }
            "--log" => {
                i += 1;
                config.log_filter = Some(value_of(&args, i, "--log")?);
            }
            "--max-sentence-length" => {
                i += 1;
                let value = value_of(&args, i, "--max-sentence-length")?;
                config.max_sentence_length = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid --max-sentence-length value: {value}"))?,
                );
            }
            arg => return Err(format!("unknown argument: {arg}").into()),
        }
        i += 1;
    }

    Ok(config)
}

/// Installs the fmt subscriber. `--log` wins over `RUST_LOG`; the default
/// is `warn`.
fn init_tracing(filter: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let filter = match filter {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| -> Box<dyn std::error::Error> { e })?;
    Ok(())
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("delve {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    init_tracing(config.log_filter.as_deref())?;

    let mut engine_config = EngineConfig::default();
    if let Some(limit) = config.max_sentence_length {
        engine_config = engine_config.with_max_sentence_length(limit);
    }

    let mut session = match &config.load {
        Some(path) => Session::open(path, engine_config)?,
        None => Session::sample(engine_config)?,
    };

    if config.batch_mode {
        run_batch(&mut session, io::stdin().lock(), io::stdout().lock())?;
        return Ok(());
    }

    let mut repl = Repl::new(session)?;
    if config.load.is_some() {
        repl = repl.without_banner();
    }
    repl.run()?;
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mDelve\x1b[0m - Text-command dungeon engine

\x1b[1mUSAGE:\x1b[0m
    delve [OPTIONS]

\x1b[1mOPTIONS:\x1b[0m
    -h, --help                   Print help information
    -V, --version                Print version information
    -b, --batch                  Read sentences from stdin, no prompt
    --load <PATH>                Play a saved game instead of the sample dungeon
    --log <FILTER>               Log filter, e.g. delve_engine=debug (default: RUST_LOG, else warn)
    --max-sentence-length <N>    Reject longer sentences (default: 256)

\x1b[1mEXAMPLES:\x1b[0m
    delve                                Play the sample dungeon
    delve --load keep.msgpack            Continue a saved game
    echo 'move north' | delve --batch    Run one sentence and exit
    delve --log delve_engine=debug       Trace every resolved action

{}",
        delve_runtime::render::HELP
    );
}
