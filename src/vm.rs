use tracing::{debug, trace};

use crate::opcode::Opcode;
use crate::program::{Program, Word};

/// Step budget used when a caller has no better bound in mind
pub const DEFAULT_MAX_STEPS: usize = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
  Active,
  Halted,
}

/// How a bounded [`Vm::run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  /// The machine reached a halt instruction.
  Completed,
  /// The step budget ran out while the machine was still active; whatever
  /// the program wrote so far is kept, but its output is not meaningful.
  Exhausted,
}

/// An Intcode machine.
///
/// The machine owns its program outright: it is built from a copy of the
/// caller's program, so running it never touches the original. Memory is
/// code and data at once, and instructions are free to overwrite each other.
#[derive(Debug, Clone)]
pub struct Vm {
  // address of the opcode of the next instruction
  ip: usize,
  program: Program,
  state: State,
  steps: usize,
}

impl Vm {
  /// Create a machine at position 0, running a private copy of `program`
  pub fn new(program: &Program) -> Self {
    Self {
      ip: 0,
      program: program.clone(),
      state: State::Active,
      steps: 0,
    }
  }

  /// Execute a single instruction.
  ///
  /// Stepping a halted machine does nothing. A step that fails leaves the
  /// machine exactly as it found it.
  pub fn step(&mut self) -> Result<(), Error> {
    if self.state == State::Halted {
      return Ok(());
    }
    let task = Task::new(self);
    task.run()?;
    self.steps += 1;
    Ok(())
  }

  /// Step until the machine halts, or until `max_steps` instructions have
  /// been executed.
  ///
  /// Running out of budget is not an error; it is reported as
  /// [`Outcome::Exhausted`] and the machine can be run again to continue.
  pub fn run(&mut self, max_steps: usize) -> Result<Outcome, Error> {
    for _ in 0..max_steps {
      if self.is_halted() {
        break;
      }
      self.step()?;
    }
    if self.is_halted() {
      Ok(Outcome::Completed)
    } else {
      debug!(position = self.ip, max_steps, "step budget exhausted");
      Ok(Outcome::Exhausted)
    }
  }

  pub fn position(&self) -> usize {
    self.ip
  }

  pub fn is_halted(&self) -> bool {
    self.state == State::Halted
  }

  /// Number of instructions executed so far, the halt included
  pub fn steps(&self) -> usize {
    self.steps
  }

  pub fn program(&self) -> &Program {
    &self.program
  }

  pub fn into_program(self) -> Program {
    self.program
  }
}

/// An error that stops a machine for good.
///
/// `position` is always the address of the instruction being decoded.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
  #[error("invalid opcode {opcode} at position {position}")]
  InvalidOpcode { opcode: Word, position: usize },

  #[error("instruction at position {position} runs past the end of the program")]
  UnexpectedEof { position: usize },

  #[error("address {address} referenced at position {position} is out of bounds")]
  AddressOutOfBounds { address: Word, position: usize },

  #[error("arithmetic overflow at position {position}")]
  Overflow { position: usize },

  #[error("program of length {len} has no room for a noun and verb")]
  MissingSeedSlots { len: usize },
}

/// A single instruction in flight.
///
/// Operands are read through a private cursor; the machine only sees the
/// new position and any memory write once the whole instruction has decoded.
struct Task<'vm> {
  vm: &'vm mut Vm,
  pc: usize,
  cursor: usize,
}

impl<'vm> Task<'vm> {
  fn new(vm: &'vm mut Vm) -> Self {
    let pc = vm.ip;
    Self { vm, pc, cursor: pc }
  }

  #[inline]
  fn eat(&mut self) -> Result<Word, Error> {
    let word = self
      .vm
      .program
      .get(self.cursor)
      .ok_or(Error::UnexpectedEof { position: self.pc })?;
    self.cursor += 1;
    Ok(word)
  }

  // position mode: the operand is itself an address into the program
  fn eat_address(&mut self) -> Result<usize, Error> {
    let address = self.eat()?;
    usize::try_from(address)
      .ok()
      .filter(|&a| a < self.vm.program.len())
      .ok_or(Error::AddressOutOfBounds {
        address,
        position: self.pc,
      })
  }

  fn run(mut self) -> Result<(), Error> {
    let word = self.eat()?;
    let op = Opcode::try_from(word).map_err(|opcode| Error::InvalidOpcode {
      opcode,
      position: self.pc,
    })?;
    trace!(position = self.pc, ?op, "executing instruction");
    match op {
      Opcode::Add => add(self)?,
      Opcode::Multiply => multiply(self)?,
      Opcode::Halt => halt(self),
    }
    Ok(())
  }
}

// m[o] ← m[a] + m[b]
fn add(task: Task<'_>) -> Result<(), Error> {
  binary(task, Word::checked_add)
}

// m[o] ← m[a] × m[b]
fn multiply(task: Task<'_>) -> Result<(), Error> {
  binary(task, Word::checked_mul)
}

fn binary(mut task: Task<'_>, f: fn(Word, Word) -> Option<Word>) -> Result<(), Error> {
  let a = task.eat_address()?;
  let b = task.eat_address()?;
  let o = task.eat_address()?;
  let program = &mut task.vm.program;
  let value = f(program[a], program[b]).ok_or(Error::Overflow { position: task.pc })?;
  program[o] = value;
  task.vm.ip = task.cursor;
  Ok(())
}

// (stop execution), the position stays on the halt
fn halt(mut task: Task<'_>) {
  debug!(position = task.pc, steps = task.vm.steps + 1, "machine halted");
  task.vm.state = State::Halted;
}
