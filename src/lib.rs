//! A small Intcode computer.
//!
//! A program is a flat array of integers that is code, data and output at
//! once. The machine understands three instructions (add, multiply, halt),
//! addresses every operand by position, and runs under a step budget so a
//! program that never halts cannot hang its caller.
//!
//! ```
//! use intcode::program::Program;
//! use intcode::vm::{Outcome, Vm};
//!
//! let program: Program = "1,9,10,3,2,3,11,0,99,30,40,50".parse().unwrap();
//! let mut vm = Vm::new(&program);
//! assert_eq!(vm.run(100), Ok(Outcome::Completed));
//! assert_eq!(vm.program()[0], 3500);
//! ```

pub mod opcode;
pub mod program;
pub mod search;
pub mod vm;
