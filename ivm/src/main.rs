//! Intcode Virtual Machine driver
//!
//! Thin command-line front end over the `intcode` library: reads a
//! program file, runs it directly or as an amplifier pipeline, and
//! prints the ordered outputs.

mod cli;

use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use log::debug;
use serde::Serialize;

use cli::{Cli, Command};
use intcode::machine::{Machine, RunState};
use intcode::pipeline::{run_chain, run_feedback, PipelineError};
use intcode::program;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run { program, input, poke, peek, json } => {
            run_command(&program, input.as_deref(), &poke, &peek, json)
        }
        Command::Chain { program, phases, signal, search } => {
            pipeline_command(&program, &phases, signal, search, run_chain)
        }
        Command::Feedback { program, phases, signal, search } => {
            pipeline_command(&program, &phases, signal, search, run_feedback)
        }
    }
}

fn load_program(path: &Path) -> Result<Vec<i64>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading program file '{}'", path.display()))?;
    program::parse(&text).with_context(|| format!("parsing '{}'", path.display()))
}

#[derive(Serialize)]
struct RunSummary {
    outputs: Vec<i64>,
    state: RunState,
    peeks: Vec<PeekedCell>,
}

#[derive(Serialize)]
struct PeekedCell {
    address: usize,
    value: i64,
}

fn run_command(
    path: &Path,
    input: Option<&str>,
    pokes: &[String],
    peeks: &[usize],
    json: bool,
) -> Result<()> {
    let mut memory = load_program(path)?;
    for poke in pokes {
        let (address, value) = cli::parse_poke(poke).map_err(|e| anyhow!(e))?;
        if address >= memory.len() {
            bail!("poke address {address} out of bounds (memory size {})", memory.len());
        }
        memory[address] = value;
    }

    let mut machine = Machine::new(memory);
    if let Some(list) = input {
        machine.push_inputs(cli::parse_int_list(list).map_err(|e| anyhow!(e))?);
    }

    let outputs = machine.run()?;
    if machine.state == RunState::AwaitingInput {
        bail!("program is waiting for more input at ip {}", machine.ip());
    }

    let peeked = peeks
        .iter()
        .map(|&address| {
            machine
                .memory
                .get(address)
                .map(|&value| PeekedCell { address, value })
                .ok_or_else(|| {
                    anyhow!("peek address {address} out of bounds (memory size {})", machine.memory.len())
                })
        })
        .collect::<Result<Vec<_>>>()?;

    if json {
        let summary = RunSummary { outputs, state: machine.state, peeks: peeked };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for value in &outputs {
            println!("{value}");
        }
        for cell in &peeked {
            println!("[{}] = {}", cell.address, cell.value);
        }
    }
    Ok(())
}

fn pipeline_command(
    path: &Path,
    phases: &str,
    signal: i64,
    search: bool,
    run: fn(&[i64], &[i64], i64) -> Result<i64, PipelineError>,
) -> Result<()> {
    let program = load_program(path)?;
    let phases = cli::parse_int_list(phases).map_err(|e| anyhow!(e))?;

    if search {
        let (best, order) = search_best(&program, &phases, signal, run)?;
        let order = order
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        println!("{best} (phases {order})");
    } else {
        println!("{}", run(&program, &phases, signal)?);
    }
    Ok(())
}

/// Try every ordering of the phase settings and keep the highest
/// resulting signal.
fn search_best(
    program: &[i64],
    phases: &[i64],
    signal: i64,
    run: fn(&[i64], &[i64], i64) -> Result<i64, PipelineError>,
) -> Result<(i64, Vec<i64>)> {
    if phases.is_empty() {
        bail!("no phase settings to try");
    }
    let mut best: Option<(i64, Vec<i64>)> = None;
    for order in permutations(phases) {
        let result = run(program, &order, signal)?;
        debug!("phases {order:?} -> {result}");
        if best.as_ref().map_or(true, |(b, _)| result > *b) {
            best = Some((result, order));
        }
    }
    Ok(best.expect("at least one permutation was tried"))
}

fn permutations(values: &[i64]) -> Vec<Vec<i64>> {
    if values.is_empty() {
        return vec![Vec::new()];
    }
    let mut result = Vec::new();
    for (i, &value) in values.iter().enumerate() {
        let mut rest = values.to_vec();
        rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, value);
            result.push(tail);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::permutations;

    #[test]
    fn test_permutations() {
        let perms = permutations(&[0, 1, 2]);
        assert_eq!(perms.len(), 6);
        assert!(perms.contains(&vec![2, 0, 1]));
    }

    #[test]
    fn test_permutations_of_empty_set() {
        assert_eq!(permutations(&[]), vec![Vec::<i64>::new()]);
    }
}
