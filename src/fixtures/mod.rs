// Deterministic fixture builders for consensus regression tests

mod assemble;
mod coinbase;
mod export;
mod params;
mod spend;

pub use assemble::{BlockAssembler, create_block};
pub use coinbase::create_coinbase;
pub use export::{BlockDump, TransactionDump};
pub use params::*;
pub use spend::create_transaction;

use std::time::{SystemTime, UNIX_EPOCH};

/// Fixture construction errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// An index argument is outside the referenced collection
    OutOfRange { index: usize, len: usize },
    /// Malformed key or script material reported by a collaborator
    InvalidArgument(String),
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            BuildError::OutOfRange { index, len } => {
                write!(f, "output index {} out of range for {} outputs", index, len)
            }
            BuildError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for BuildError {}

/// Clock abstraction so fixture timestamps stay deterministic under test
pub trait TimeSource {
    /// Current Unix time in seconds
    fn unix_time(&self) -> u32;
}

/// Wall-clock time source, the default outside of tests
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn unix_time(&self) -> u32 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before Unix epoch")
            .as_secs() as u32
    }
}

/// Fixed time source for deterministic tests
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource(pub u32);

impl TimeSource for FixedTimeSource {
    fn unix_time(&self) -> u32 {
        self.0
    }
}
