use serde::{Deserialize, Serialize};

/// Engine execution states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Running,
    /// Parked at an INPUT instruction with an empty queue; the machine
    /// resumes at that exact instruction once inputs arrive.
    AwaitingInput,
    Halted,
}
