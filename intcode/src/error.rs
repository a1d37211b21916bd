//! Error handling for the Intcode virtual machine
//!
//! The three fault kinds below are fatal: the engine never catches or
//! retries them, they propagate straight to the caller of `run`.
//! Input starvation is not an error; it is reported through
//! [`crate::machine::RunState::AwaitingInput`].

use thiserror::Error;

/// Faults raised by the instruction decoder and the execution engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VmError {
    /// The low two decimal digits of an instruction word name no
    /// defined operation.
    #[error("invalid opcode {opcode} in instruction word {word}")]
    InvalidOpcode { word: i64, opcode: i64 },

    /// A parameter mode digit other than 0 (position) or 1 (immediate).
    #[error("invalid addressing mode digit {digit} in instruction word {word}")]
    InvalidAddressingMode { word: i64, digit: i64 },

    /// An address outside the memory buffer, on read, write or jump.
    #[error("memory access out of bounds: address {address} with memory size {len} at ip {ip}")]
    MemoryAccessFault { address: i64, len: usize, ip: usize },
}
