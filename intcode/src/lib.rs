//! Intcode Virtual Machine
//!
//! This crate contains the instruction decoder, the execution engine,
//! the program loader and the pipeline orchestrator for programs
//! encoded as a flat, comma-separated sequence of integers.

pub mod error;
pub mod machine;
pub mod pipeline;
pub mod program;

pub use error::VmError;
pub use machine::{Instr, Machine, Mode, Opcode, RunState};
pub use pipeline::PipelineError;
pub use program::ProgramError;
