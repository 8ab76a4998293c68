use anyhow::Result;
use clap::{Parser, Subcommand};
use log::debug;
use std::io::{self, Write};

use rulemod_core::config::DEFAULT_CONFIG_PATH;
use rulemod_core::{load_file, ErrorHandler, ErrorPrinter, RuleEngine};

#[derive(Parser)]
#[command(name = "rulemod")]
#[command(about = "Declarative attribute rewrite rules for XML-like documents")]
struct Args {
    /// Enable debug output
    #[arg(short = 'D', long)]
    debug: bool,

    /// Path to the rule document (JSON, or YAML with a .yaml/.yml extension)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate the rule document and print its canonical form
    Validate,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    debug!("Loading config file {:?}", args.config);
    let engine = match load_engine(&args.config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("❌ Error loading config: {e}");
            std::process::exit(1);
        }
    };

    match args.command {
        Command::Validate => {
            let stdout = io::stdout();
            validate(&engine, &mut stdout.lock())?;
        }
    }

    Ok(())
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

/// Load the rule document, printing every schema error to stderr as it is found.
fn load_engine(path: &str) -> Result<RuleEngine> {
    let mut printer = ErrorPrinter::new(io::stderr());
    let handler: &mut dyn ErrorHandler = &mut printer;
    let rules = load_file(path, Some(handler))?.into_result()?;
    Ok(RuleEngine::new(rules))
}

fn validate(engine: &RuleEngine, out: &mut impl Write) -> Result<()> {
    if engine.is_empty() {
        writeln!(out, "No config nodes loaded")?;
    } else {
        writeln!(out, "Config:\n{}", engine.to_json_pretty()?)?;
    }
    Ok(())
}
