//! Brute-force search for the noun and verb that make a program produce a
//! given output.
//!
//! Every trial seeds a fresh copy of the base program and runs it on its own
//! machine, so trials are independent of each other and of their order.

use std::ops::RangeInclusive;

use tracing::{debug, warn};

use crate::program::{Program, Word, VERB_ADDRESS};
use crate::vm::{Error, Outcome, Vm, DEFAULT_MAX_STEPS};

/// Address read back as the output of a run
pub const OUTPUT_ADDRESS: usize = 0;

/// Parameters of a noun/verb search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
  /// The output value being looked for.
  pub target: Word,
  /// Step budget of every single trial.
  pub max_steps: usize,
  pub nouns: RangeInclusive<Word>,
  pub verbs: RangeInclusive<Word>,
}

impl Default for SearchConfig {
  fn default() -> Self {
    Self {
      target: 19_690_720,
      max_steps: DEFAULT_MAX_STEPS,
      nouns: 0..=99,
      verbs: 0..=99,
    }
  }
}

/// The result of running the program once with a given noun and verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trial {
  pub noun: Word,
  pub verb: Word,
  /// The word at [`OUTPUT_ADDRESS`] once the run stopped. Only meaningful
  /// when `outcome` is [`Outcome::Completed`].
  pub output: Word,
  pub outcome: Outcome,
}

impl Trial {
  pub fn halted(&self) -> bool {
    self.outcome == Outcome::Completed
  }
}

/// Run `program` once with `noun` and `verb` seeded in, leaving `program`
/// itself untouched.
pub fn evaluate(program: &Program, noun: Word, verb: Word, max_steps: usize) -> Result<Trial, Error> {
  let mut seeded = program.clone();
  seeded
    .seed(noun, verb)
    .ok_or(Error::MissingSeedSlots { len: program.len() })?;
  let mut vm = Vm::new(&seeded);
  let outcome = vm.run(max_steps)?;
  // the store cannot shrink, and seeding proved it holds address 0
  let output = vm.program()[OUTPUT_ADDRESS];
  Ok(Trial {
    noun,
    verb,
    output,
    outcome,
  })
}

/// Look for the first noun/verb pair, in noun-major order, whose run halts
/// with `config.target` as its output.
///
/// A trial that fails or runs out of budget is logged and counted as a miss;
/// it never ends the search. The only error is a base program too short to
/// be seeded.
pub fn search(program: &Program, config: &SearchConfig) -> Result<Option<Trial>, Error> {
  if program.len() <= VERB_ADDRESS {
    return Err(Error::MissingSeedSlots { len: program.len() });
  }
  let found = pairs(config)
    .filter_map(|(noun, verb)| match evaluate(program, noun, verb, config.max_steps) {
      Ok(trial) if trial.halted() => Some(trial),
      Ok(_) => {
        warn!(noun, verb, max_steps = config.max_steps, "trial did not halt within budget");
        None
      }
      Err(e) => {
        warn!(noun, verb, error = %e, "trial failed");
        None
      }
    })
    .find(|trial| trial.output == config.target);
  match &found {
    Some(trial) => debug!(noun = trial.noun, verb = trial.verb, "found target output"),
    None => debug!(target = config.target, "no noun/verb pair produced the target"),
  }
  Ok(found)
}

// noun-major cartesian product of the two ranges
fn pairs(config: &SearchConfig) -> impl Iterator<Item = (Word, Word)> + '_ {
  config
    .nouns
    .clone()
    .flat_map(move |noun| config.verbs.clone().map(move |verb| (noun, verb)))
}
