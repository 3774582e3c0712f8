use std::fs;
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use eyre::WrapErr;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::EnvFilter;

use intcode::program::{Program, Word};
use intcode::search::{self, SearchConfig, OUTPUT_ADDRESS};
use intcode::vm::{Outcome, Vm, DEFAULT_MAX_STEPS};

/// Run an Intcode program, then search for the noun and verb that make it
/// produce a target output.
#[derive(Debug, Parser)]
#[clap(name = "intcode", version)]
struct Arguments {
  /// File holding the program as comma-separated integers.
  input: PathBuf,

  /// Noun written to address 1 for the single run.
  #[clap(long, default_value_t = 12)]
  noun: Word,

  /// Verb written to address 2 for the single run.
  #[clap(long, default_value_t = 2)]
  verb: Word,

  /// Output the search looks for at address 0.
  #[clap(long, default_value_t = 19_690_720)]
  target: Word,

  /// Instructions a single run may execute before it is abandoned.
  #[clap(long, default_value_t = DEFAULT_MAX_STEPS)]
  max_steps: usize,

  /// Set the minimum log level.
  ///
  /// -v     Info
  /// -vv    Debug
  /// -vvv   Traces (warning: very verbose!)
  #[clap(short, long, action = ArgAction::Count, verbatim_doc_comment)]
  verbosity: u8,
}

impl Arguments {
  fn level(&self) -> LevelFilter {
    match self.verbosity {
      0 => LevelFilter::WARN,
      1 => LevelFilter::INFO,
      2 => LevelFilter::DEBUG,
      _ => LevelFilter::TRACE,
    }
  }
}

fn init_tracing(level: LevelFilter) {
  // RUST_LOG wins over the verbosity flag when set
  let filter = EnvFilter::builder()
    .with_default_directive(level.into())
    .from_env_lossy();
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();
}

fn main() -> eyre::Result<()> {
  let args = Arguments::parse();
  init_tracing(args.level());

  let text = fs::read_to_string(&args.input)
    .wrap_err_with(|| format!("failed to read {}", args.input.display()))?;
  let program = Program::parse(&text).wrap_err("failed to parse program")?;
  info!(len = program.len(), "loaded program");

  let mut seeded = program.clone();
  seeded
    .seed(args.noun, args.verb)
    .ok_or_else(|| eyre::eyre!("program of length {} cannot be seeded", program.len()))?;
  let mut vm = Vm::new(&seeded);
  let outcome = vm.run(args.max_steps).wrap_err("seeded run failed")?;
  if outcome == Outcome::Exhausted {
    warn!("did not halt after {} operations", args.max_steps);
  }
  println!("Value at position {OUTPUT_ADDRESS}: {}", vm.program()[OUTPUT_ADDRESS]);

  let config = SearchConfig {
    target: args.target,
    max_steps: args.max_steps,
    ..SearchConfig::default()
  };
  match search::search(&program, &config).wrap_err("search failed")? {
    Some(trial) => println!(
      "Noun {} and verb {} produce output {}",
      trial.noun, trial.verb, trial.output
    ),
    None => println!("No noun and verb produce output {}", args.target),
  }
  Ok(())
}
