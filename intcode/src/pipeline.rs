//! Pipeline composition of machine instances
//!
//! Runs several machines over independent copies of one program, each
//! stage's outputs wired to the next stage's input queue. Two
//! topologies: a single-pass chain, and a feedback ring where the last
//! stage feeds the first and stages are resumed round-robin until the
//! final stage halts.
//!
//! Scheduling is cooperative and single-threaded: a suspended stage is
//! a returned value, and the orchestrator is the only code that moves
//! data between stages, strictly between invocations.

use log::debug;
use thiserror::Error;

use crate::error::VmError;
use crate::machine::{Machine, RunState};

/// Failures raised while driving a pipeline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error(transparent)]
    Vm(#[from] VmError),

    /// A single-pass stage asked for input it was never going to get.
    #[error("stage {stage} suspended waiting for input in single-pass mode")]
    Suspended { stage: usize },

    /// Every stage in the ring is starved; no progress is possible.
    #[error("feedback loop stalled with all {stages} stages starved")]
    Stalled { stages: usize },

    /// The final stage halted without emitting a result.
    #[error("stage {stage} halted without emitting any output")]
    NoOutput { stage: usize },
}

/// Run a single-pass chain.
///
/// Stage `i` is primed with `phases[i]` and then fed the previous
/// stage's entire output sequence; stage 0 receives `signal`. Every
/// stage must run to halt in one invocation. Returns the final stage's
/// last output.
pub fn run_chain(program: &[i64], phases: &[i64], signal: i64) -> Result<i64, PipelineError> {
    let mut carried = vec![signal];
    for (stage, &phase) in phases.iter().enumerate() {
        let mut machine = Machine::new(program.to_vec());
        machine.push_input(phase);
        machine.push_inputs(carried.iter().copied());
        carried = machine.run()?;
        if machine.state == RunState::AwaitingInput {
            return Err(PipelineError::Suspended { stage });
        }
        debug!("chain stage {stage} (phase {phase}) emitted {} value(s)", carried.len());
    }
    carried.last().copied().ok_or(PipelineError::NoOutput {
        stage: phases.len().saturating_sub(1),
    })
}

/// Run a feedback ring.
///
/// Stage `i` is primed with `phases[i]`; `signal` seeds stage 0. The
/// last stage's outputs feed the first stage's queue. Each stage keeps
/// its own memory, pending inputs and instruction pointer across
/// invocations and is always resumed with them; the orchestrator only
/// appends a finished stage's outputs to its successor and moves on.
/// The ring terminates when the final stage halts; the result is the
/// last value that stage emitted.
pub fn run_feedback(program: &[i64], phases: &[i64], signal: i64) -> Result<i64, PipelineError> {
    let mut stages: Vec<Machine> = phases
        .iter()
        .map(|&phase| {
            let mut machine = Machine::new(program.to_vec());
            machine.push_input(phase);
            machine
        })
        .collect();
    if stages.is_empty() {
        return Ok(signal);
    }
    stages[0].push_input(signal);

    let last = stages.len() - 1;
    let mut result = None;
    let mut silent_stages = 0;
    let mut current = 0;
    loop {
        let outputs = stages[current].run()?;
        debug!(
            "feedback stage {current}: {:?}, emitted {} value(s)",
            stages[current].state,
            outputs.len()
        );

        if current == last {
            if let Some(&value) = outputs.last() {
                result = Some(value);
            }
            if stages[current].state == RunState::Halted {
                return result.ok_or(PipelineError::NoOutput { stage: current });
            }
        }

        // A full round with no output anywhere means every stage is
        // halted or starved and nothing can unblock them.
        if outputs.is_empty() {
            silent_stages += 1;
            if silent_stages == stages.len() {
                return Err(PipelineError::Stalled { stages: stages.len() });
            }
        } else {
            silent_stages = 0;
        }

        let next = (current + 1) % stages.len();
        stages[next].push_inputs(outputs);
        current = next;
    }
}
