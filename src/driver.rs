//! A command-stream front end for `SumSet`.
//!
//! The input is a line holding the number of commands, followed by that many
//! commands, one per line:
//!
//! * `+ i` inserts `i`,
//! * `- i` removes `i`,
//! * `? i` prints `Found` or `Not found`,
//! * `s l r` prints the sum of all keys in `[l, r]`.
//!
//! Operands are obfuscated: every raw operand `a` is turned into
//! `(a + x) mod M` before it reaches the set, where `x` is the result of the
//! most recent `s` command (initially `0`) and `M` is the configured
//! modulus. That running offset lives in `Driver`, never in the tree.

use crate::{Key, Sum, SumSet};
use alloc::string::{String, ToString};
use core::fmt;
use core::num::ParseIntError;
use core::str::FromStr;
use thiserror::Error;

/// The modulus used when no other is configured.
pub const DEFAULT_MODULUS: Key = 1_000_000_001;

/// Errors from parsing a single command line.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The line held no command at all.
    #[error("empty command")]
    Empty,
    /// The operation symbol is not one of `+`, `-`, `?`, or `s`.
    #[error("unknown operation `{0}`")]
    UnknownOperation(String),
    /// The operation needs more operands than were given.
    #[error("operation `{0}` is missing an operand")]
    MissingOperand(char),
    /// The operation was given more operands than it takes.
    #[error("unexpected operand `{0}`")]
    UnexpectedOperand(String),
    /// An operand isn't an integer.
    #[error("invalid operand: {0}")]
    InvalidOperand(#[from] ParseIntError),
}

/// Errors from building a `DriverConfig`.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The modulus must be positive.
    #[error("modulus must be positive, got {0}")]
    InvalidModulus(Key),
}

/// Settings for a `Driver`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DriverConfig {
    modulus: Key,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            modulus: DEFAULT_MODULUS,
        }
    }
}

impl DriverConfig {
    /// Use `modulus` for operand obfuscation.
    pub fn with_modulus(modulus: Key) -> Result<Self, ConfigError> {
        if modulus <= 0 {
            return Err(ConfigError::InvalidModulus(modulus));
        }
        Ok(DriverConfig { modulus })
    }

    /// The configured modulus.
    #[inline]
    pub fn modulus(&self) -> Key {
        self.modulus
    }
}

/// One parsed command, holding its raw (still obfuscated) operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// `+ i`
    Insert(Key),
    /// `- i`
    Remove(Key),
    /// `? i`
    Find(Key),
    /// `s l r`
    Sum(Key, Key),
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, ParseError> {
        let mut words = line.split_whitespace();
        let op = words.next().ok_or(ParseError::Empty)?;
        let mut operand = |symbol: char| -> Result<Key, ParseError> {
            let word = words.next().ok_or(ParseError::MissingOperand(symbol))?;
            Ok(word.parse::<Key>()?)
        };

        let command = match op {
            "+" => Command::Insert(operand('+')?),
            "-" => Command::Remove(operand('-')?),
            "?" => Command::Find(operand('?')?),
            "s" => {
                let from = operand('s')?;
                Command::Sum(from, operand('s')?)
            }
            other => return Err(ParseError::UnknownOperation(other.to_string())),
        };

        match words.next() {
            Some(extra) => Err(ParseError::UnexpectedOperand(extra.to_string())),
            None => Ok(command),
        }
    }
}

/// What a command printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Output {
    /// The answer to `?`.
    Found(bool),
    /// The answer to `s`.
    Sum(Sum),
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Output::Found(true) => f.write_str("Found"),
            Output::Found(false) => f.write_str("Not found"),
            Output::Sum(sum) => write!(f, "{}", sum),
        }
    }
}

/// Executes commands against a `SumSet`, tracking the operand offset.
#[derive(Debug, Default)]
pub struct Driver {
    set: SumSet,
    config: DriverConfig,
    offset: Key,
}

impl Driver {
    /// A driver over an empty set.
    pub fn new(config: DriverConfig) -> Self {
        Driver {
            set: SumSet::new(),
            config,
            offset: 0,
        }
    }

    /// The set that commands operate on.
    #[inline]
    pub fn set(&self) -> &SumSet {
        &self.set
    }

    /// The current operand offset, already reduced modulo the modulus.
    #[inline]
    pub fn offset(&self) -> Key {
        self.offset
    }

    fn decode(&self, raw: Key) -> Key {
        let modulus = i128::from(self.config.modulus);
        let value = (i128::from(raw) + i128::from(self.offset)).rem_euclid(modulus);
        // `value` is below the modulus, which is a `Key`.
        value as Key
    }

    /// Run one command, returning what it prints, if anything.
    pub fn execute(&mut self, command: Command) -> Option<Output> {
        match command {
            Command::Insert(raw) => {
                let key = self.decode(raw);
                self.set.insert(key);
                None
            }
            Command::Remove(raw) => {
                let key = self.decode(raw);
                self.set.remove(key);
                None
            }
            Command::Find(raw) => {
                let key = self.decode(raw);
                Some(Output::Found(self.set.contains(key)))
            }
            Command::Sum(from, to) => {
                let (from, to) = (self.decode(from), self.decode(to));
                let sum = self.set.range_sum(from, to);
                self.offset = sum.rem_euclid(i128::from(self.config.modulus)) as Key;
                Some(Output::Sum(sum))
            }
        }
    }
}

#[cfg(feature = "std")]
pub use self::stream::{run, DriverError};

#[cfg(feature = "std")]
mod stream {
    use super::{Command, Driver, DriverConfig, ParseError};
    use std::io::{self, BufRead, Write};
    use std::num::ParseIntError;
    use thiserror::Error;

    /// Errors from running a whole command stream.
    #[derive(Debug, Error)]
    pub enum DriverError {
        /// Reading input or writing output failed.
        #[error("I/O error: {0}")]
        Io(#[from] io::Error),
        /// The input didn't start with a command count.
        #[error("missing command count")]
        MissingCount,
        /// The command count isn't a non-negative integer.
        #[error("invalid command count: {0}")]
        InvalidCount(#[source] ParseIntError),
        /// The input ended before the announced number of commands.
        #[error("expected {expected} commands, found {found}")]
        Truncated {
            /// The announced command count.
            expected: usize,
            /// The number of commands actually present.
            found: usize,
        },
        /// A command line failed to parse.
        #[error("line {line}: {source}")]
        Parse {
            /// One-based line number within the input.
            line: usize,
            /// What was wrong with it.
            #[source]
            source: ParseError,
        },
    }

    /// Read a command stream from `input`, writing one line to `output` for
    /// every command that prints something.
    pub fn run<R, W>(config: DriverConfig, input: R, mut output: W) -> Result<(), DriverError>
    where
        R: BufRead,
        W: Write,
    {
        let mut lines = input.lines();
        let count = lines.next().ok_or(DriverError::MissingCount)??;
        let count: usize = count.trim().parse().map_err(DriverError::InvalidCount)?;

        let mut driver = Driver::new(config);
        for index in 0..count {
            let line = lines.next().ok_or(DriverError::Truncated {
                expected: count,
                found: index,
            })??;
            let command: Command = line.parse().map_err(|source| DriverError::Parse {
                line: index + 2,
                source,
            })?;
            if let Some(printed) = driver.execute(command) {
                writeln!(output, "{}", printed)?;
            }
        }

        output.flush()?;
        Ok(())
    }
}
