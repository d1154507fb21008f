//! Definitions of error related things.

use crate::codec::Mode;
use std::fmt;

/// Errors of this crate
#[derive(Debug)]
#[non_exhaustive]
pub enum FastAcError {
    /// The requested code buffer capacity is outside `[3, 16 MiB]`
    InvalidBufferSize(usize),
    /// The alphabet size is outside `[2, 2048]`
    InvalidSymbolCount(u32),
    /// A symbol probability is outside `[0.0001, 0.9999]`
    InvalidProbability(f64),
    /// The probabilities of a static model do not sum to 1
    InvalidDistributionSum(f64),
    /// The operation is not valid in the codec's current mode
    WrongMode { expected: Mode, actual: Mode },
    /// The symbol does not fit the model's alphabet
    SymbolOutOfRange { symbol: u32, symbols: u32 },
    /// The escape model has not seen this symbol yet
    UnknownSymbol(u32),
    /// The code does not fit the buffer it was encoded into
    BufferOverflow { code_bytes: usize, capacity: usize },
    /// A framed stream declares more bytes than the codec buffer holds
    StreamTooLong { length: u64, capacity: usize },
    /// Wrapper around an io error from the std lib
    IoError(std::io::Error),
}

impl From<std::io::Error> for FastAcError {
    fn from(e: std::io::Error) -> Self {
        FastAcError::IoError(e)
    }
}

impl fmt::Display for FastAcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            FastAcError::InvalidBufferSize(size) => {
                write!(f, "Buffer capacity of {} bytes is not in [3, 16 MiB]", size)
            }
            FastAcError::InvalidSymbolCount(symbols) => {
                write!(f, "Alphabet of {} symbols is not in [2, 2048]", symbols)
            }
            FastAcError::InvalidProbability(p) => {
                write!(f, "Probability {} is not in [0.0001, 0.9999]", p)
            }
            FastAcError::InvalidDistributionSum(sum) => {
                write!(f, "Probabilities sum to {} instead of 1", sum)
            }
            FastAcError::WrongMode { expected, actual } => write!(
                f,
                "Operation requires the codec to be {:?} but it is {:?}",
                expected, actual
            ),
            FastAcError::SymbolOutOfRange { symbol, symbols } => write!(
                f,
                "Symbol {} does not fit an alphabet of {} symbols",
                symbol, symbols
            ),
            FastAcError::UnknownSymbol(symbol) => {
                write!(f, "Symbol {} has not been added to the escape model", symbol)
            }
            FastAcError::BufferOverflow {
                code_bytes,
                capacity,
            } => write!(
                f,
                "Code of {} bytes does not fit the buffer capacity of {} bytes",
                code_bytes, capacity
            ),
            FastAcError::StreamTooLong { length, capacity } => write!(
                f,
                "Stream declares {} bytes but the buffer capacity is {} bytes",
                length, capacity
            ),
            FastAcError::IoError(e) => write!(f, "IoError: {}", e),
        }
    }
}

impl std::error::Error for FastAcError {}
