use crate::program::Word;

/// The closed set of instructions an Intcode machine understands.
///
/// Every operand is an address into the program (position mode), never a
/// literal value.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
  /// Adds the words found at two addresses.
  ///
  /// | Operation | Semantics/RTL         | Layout           |
  /// |-----------|-----------------------|------------------|
  /// | Add       | `m[o] ← m[a] + m[b]`  | `1, a, b, o`     |
  Add = 1,

  /// Multiplies the words found at two addresses.
  ///
  /// | Operation | Semantics/RTL         | Layout           |
  /// |-----------|-----------------------|------------------|
  /// | Multiply  | `m[o] ← m[a] × m[b]`  | `2, a, b, o`     |
  Multiply = 2,

  /// | Operation | Semantics/RTL      | Layout |
  /// |-----------|--------------------|--------|
  /// | Halt      | `(stop execution)` | `99`   |
  Halt = 99,
}

impl TryFrom<Word> for Opcode {
  /// The word that failed to decode.
  type Error = Word;

  fn try_from(word: Word) -> Result<Self, Self::Error> {
    match word {
      1 => Ok(Self::Add),
      2 => Ok(Self::Multiply),
      99 => Ok(Self::Halt),
      other => Err(other),
    }
  }
}

impl From<Opcode> for Word {
  fn from(op: Opcode) -> Self {
    op as Word
  }
}
