use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// The type of a single word of Intcode memory
pub type Word = i64;

/// Address of the noun, the first seed value of a parameterized run
pub const NOUN_ADDRESS: usize = 1;

/// Address of the verb, the second seed value of a parameterized run
pub const VERB_ADDRESS: usize = 2;

/// A `Program` is the flat array of words that is both the code an Intcode
/// machine executes and the memory it writes to.
///
/// Cloning a `Program` yields a fully independent copy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
  words: Vec<Word>,
}

/// An error that occurred while parsing the textual form of a program
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
  #[error("program text is empty")]
  Empty,

  #[error("token {index} (`{token}`) is not a base-10 integer")]
  InvalidToken { index: usize, token: String },
}

impl Program {
  /// Parse a program from comma-separated integers, ignoring whitespace
  /// around the whole text.
  pub fn parse(text: &str) -> Result<Self, ParseError> {
    let text = text.trim();
    if text.is_empty() {
      return Err(ParseError::Empty);
    }
    let words = text
      .split(',')
      .enumerate()
      .map(|(index, token)| {
        token.parse::<Word>().map_err(|_| ParseError::InvalidToken {
          index,
          token: token.to_owned(),
        })
      })
      .collect::<Result<Vec<_>, _>>()?;
    Ok(Self { words })
  }

  pub fn len(&self) -> usize {
    self.words.len()
  }

  pub fn is_empty(&self) -> bool {
    self.words.is_empty()
  }

  pub fn get(&self, address: usize) -> Option<Word> {
    self.words.get(address).copied()
  }

  pub fn set(&mut self, address: usize, value: Word) -> Option<()> {
    self.words.get_mut(address).map(|prev| {
      *prev = value;
    })
  }

  /// Write `noun` and `verb` into their fixed addresses, failing if the
  /// program is too short to hold them
  pub fn seed(&mut self, noun: Word, verb: Word) -> Option<()> {
    if self.len() <= VERB_ADDRESS {
      return None;
    }
    self.words[NOUN_ADDRESS] = noun;
    self.words[VERB_ADDRESS] = verb;
    Some(())
  }

  pub fn as_slice(&self) -> &[Word] {
    &self.words
  }

  pub fn into_inner(self) -> Vec<Word> {
    self.words
  }
}

impl From<Vec<Word>> for Program {
  fn from(words: Vec<Word>) -> Self {
    Self { words }
  }
}

impl FromStr for Program {
  type Err = ParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s)
  }
}

impl Index<usize> for Program {
  type Output = Word;

  fn index(&self, address: usize) -> &Self::Output {
    &self.words[address]
  }
}

impl IndexMut<usize> for Program {
  fn index_mut(&mut self, address: usize) -> &mut Self::Output {
    &mut self.words[address]
  }
}

impl fmt::Display for Program {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut words = self.words.iter();
    if let Some(first) = words.next() {
      write!(f, "{first}")?;
    }
    for word in words {
      write!(f, ",{word}")?;
    }
    Ok(())
  }
}
