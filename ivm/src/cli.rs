use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ivm",
    about = "Intcode Virtual Machine - Run Intcode programs and pipelines",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a single program to halt
    Run {
        /// Program file (one line of comma-separated integers)
        program: PathBuf,

        /// Input values, comma separated (e.g. "1" or "5,0")
        #[arg(short, long)]
        input: Option<String>,

        /// Overwrite a memory cell before execution
        #[arg(long, value_name = "ADDR=VALUE")]
        poke: Vec<String>,

        /// Print a memory cell after the program halts
        #[arg(long, value_name = "ADDR")]
        peek: Vec<usize>,

        /// Emit a JSON summary instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Run a single-pass pipeline of amplifier stages
    Chain {
        /// Program file, one independent copy per stage
        program: PathBuf,

        /// Phase settings, comma separated (e.g. "0,1,2,3,4")
        #[arg(short, long)]
        phases: String,

        /// Signal fed to the first stage
        #[arg(short, long, default_value_t = 0)]
        signal: i64,

        /// Try every ordering of the phase settings, report the best
        #[arg(long)]
        search: bool,
    },

    /// Run a feedback loop pipeline (last stage feeds the first)
    Feedback {
        /// Program file, one independent copy per stage
        program: PathBuf,

        /// Phase settings, comma separated (e.g. "5,6,7,8,9")
        #[arg(short, long)]
        phases: String,

        /// Signal fed to the first stage
        #[arg(short, long, default_value_t = 0)]
        signal: i64,

        /// Try every ordering of the phase settings, report the best
        #[arg(long)]
        search: bool,
    },
}

/// Parse a comma-separated integer list flag value.
pub fn parse_int_list(s: &str) -> Result<Vec<i64>, String> {
    s.split(',')
        .map(|token| {
            let token = token.trim();
            token
                .parse::<i64>()
                .map_err(|_| format!("invalid integer: {token}"))
        })
        .collect()
}

/// Parse an ADDR=VALUE poke flag value.
pub fn parse_poke(s: &str) -> Result<(usize, i64), String> {
    let (addr, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ADDR=VALUE, got: {s}"))?;
    let addr = addr
        .trim()
        .parse::<usize>()
        .map_err(|_| format!("invalid address: {addr}"))?;
    let value = value
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("invalid value: {value}"))?;
    Ok((addr, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_list() {
        assert_eq!(parse_int_list("0,1,2"), Ok(vec![0, 1, 2]));
        assert_eq!(parse_int_list("5, -3"), Ok(vec![5, -3]));
        assert!(parse_int_list("1,x").is_err());
    }

    #[test]
    fn test_parse_poke() {
        assert_eq!(parse_poke("1=12"), Ok((1, 12)));
        assert_eq!(parse_poke("2 = -5"), Ok((2, -5)));
        assert!(parse_poke("12").is_err());
        assert!(parse_poke("a=1").is_err());
    }
}
