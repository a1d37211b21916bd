//! Machine module - the Intcode execution engine

mod instruction;
mod state;

pub use instruction::{Instr, Mode, Opcode};
pub use state::RunState;

use std::collections::VecDeque;

use log::{debug, trace};

use crate::error::VmError;

/// The Intcode virtual machine
///
/// Owns the complete resumable state: the flat memory image, the
/// instruction pointer and the pending input queue. Code and data share
/// the one memory buffer, so instructions may rewrite cells that are
/// later fetched as instructions. Outputs accumulate in a buffer that
/// [`Machine::run`] drains on every invocation.
pub struct Machine {
    /// Flat code/data memory; fixed length after construction.
    pub memory: Vec<i64>,

    /// Current run state.
    pub state: RunState,

    // Index of the next instruction word to fetch
    ip: usize,

    // Pending inputs, consumed front to back
    inputs: VecDeque<i64>,

    // Outputs produced since the last drain
    outputs: Vec<i64>,
}

impl Machine {
    pub fn new(program: Vec<i64>) -> Self {
        Machine {
            memory: program,
            state: RunState::Running,
            ip: 0,
            inputs: VecDeque::new(),
            outputs: Vec::new(),
        }
    }

    /// Address of the next instruction word to fetch.
    pub fn ip(&self) -> usize {
        self.ip
    }

    /// Inputs queued but not yet consumed.
    pub fn pending_inputs(&self) -> &VecDeque<i64> {
        &self.inputs
    }

    /// Append one value to the back of the input queue.
    pub fn push_input(&mut self, value: i64) {
        self.inputs.push_back(value);
    }

    /// Append several values to the back of the input queue.
    pub fn push_inputs<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = i64>,
    {
        self.inputs.extend(values);
    }

    /// Execute instructions until the program halts or parks itself
    /// waiting for input, then hand back the outputs produced during
    /// this invocation only.
    ///
    /// A machine parked in [`RunState::AwaitingInput`] picks up again
    /// at the pending INPUT instruction; feeding inputs piecemeal
    /// across several calls yields the same final memory and output
    /// sequence as queueing everything up front. On error no outputs
    /// are returned.
    pub fn run(&mut self) -> Result<Vec<i64>, VmError> {
        if self.state == RunState::AwaitingInput {
            self.state = RunState::Running;
        }
        while self.state == RunState::Running {
            self.step()?;
        }
        Ok(self.outputs.drain(..).collect())
    }

    /// One fetch-decode-execute cycle.
    pub fn step(&mut self) -> Result<(), VmError> {
        let word = self.read(self.ip as i64)?;
        let instr = Instr::decode(word)?;
        trace!("ip={} word={} {:?}", self.ip, word, instr.opcode);

        // Resolve the read parameters through their addressing modes.
        let mut params = [0i64; 2];
        for (i, param) in params.iter_mut().enumerate().take(instr.opcode.read_count()) {
            let raw = self.read((self.ip + 1 + i) as i64)?;
            *param = match instr.modes[i] {
                Mode::Position => self.read(raw)?,
                Mode::Immediate => raw,
            };
        }

        match instr.opcode {
            Opcode::Add => {
                let dst = self.read(self.ip as i64 + 3)?;
                self.write(dst, params[0].wrapping_add(params[1]))?;
                self.ip += instr.opcode.width();
            }
            Opcode::Mult => {
                let dst = self.read(self.ip as i64 + 3)?;
                self.write(dst, params[0].wrapping_mul(params[1]))?;
                self.ip += instr.opcode.width();
            }
            Opcode::Input => match self.inputs.pop_front() {
                Some(value) => {
                    let dst = self.read(self.ip as i64 + 1)?;
                    self.write(dst, value)?;
                    self.ip += instr.opcode.width();
                }
                None => {
                    // Nothing consumed, ip untouched: a later run call
                    // resumes at this exact instruction.
                    debug!("input queue empty at ip={}, suspending", self.ip);
                    self.state = RunState::AwaitingInput;
                }
            },
            Opcode::Output => {
                self.outputs.push(params[0]);
                self.ip += instr.opcode.width();
            }
            Opcode::JumpIfTrue => {
                if params[0] != 0 {
                    self.ip = self.addr(params[1])?;
                } else {
                    self.ip += instr.opcode.width();
                }
            }
            Opcode::JumpIfFalse => {
                if params[0] == 0 {
                    self.ip = self.addr(params[1])?;
                } else {
                    self.ip += instr.opcode.width();
                }
            }
            Opcode::LessThan => {
                let dst = self.read(self.ip as i64 + 3)?;
                self.write(dst, i64::from(params[0] < params[1]))?;
                self.ip += instr.opcode.width();
            }
            Opcode::Equals => {
                let dst = self.read(self.ip as i64 + 3)?;
                self.write(dst, i64::from(params[0] == params[1]))?;
                self.ip += instr.opcode.width();
            }
            Opcode::Halt => {
                debug!("halted at ip={}", self.ip);
                self.state = RunState::Halted;
            }
        }

        Ok(())
    }

    fn addr(&self, address: i64) -> Result<usize, VmError> {
        if address < 0 || address as usize >= self.memory.len() {
            return Err(VmError::MemoryAccessFault {
                address,
                len: self.memory.len(),
                ip: self.ip,
            });
        }
        Ok(address as usize)
    }

    fn read(&self, address: i64) -> Result<i64, VmError> {
        Ok(self.memory[self.addr(address)?])
    }

    fn write(&mut self, address: i64, value: i64) -> Result<(), VmError> {
        let idx = self.addr(address)?;
        self.memory[idx] = value;
        Ok(())
    }
}
