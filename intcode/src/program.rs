//! Program source parsing
//!
//! A program is a single line of comma-separated, optionally signed
//! base-10 integers; the customary trailing newline is tolerated.
//! Parsing produces the memory image a [`crate::machine::Machine`] is
//! constructed from. File I/O stays with the caller.

use thiserror::Error;

/// Failures while parsing program source text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProgramError {
    #[error("program source is empty")]
    Empty,

    #[error("invalid integer {token:?} at position {index}")]
    InvalidInteger { index: usize, token: String },
}

/// Parse program source text into a memory image.
pub fn parse(text: &str) -> Result<Vec<i64>, ProgramError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ProgramError::Empty);
    }
    text.split(',')
        .enumerate()
        .map(|(index, token)| {
            token.trim().parse::<i64>().map_err(|_| ProgramError::InvalidInteger {
                index,
                token: token.trim().to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_program() {
        assert_eq!(parse("1,0,0,0,99"), Ok(vec![1, 0, 0, 0, 99]));
    }

    #[test]
    fn test_parse_signed_values() {
        assert_eq!(parse("1101,-4,+3,0,99"), Ok(vec![1101, -4, 3, 0, 99]));
    }

    #[test]
    fn test_parse_trailing_newline() {
        assert_eq!(parse("3,0,4,0,99\n"), Ok(vec![3, 0, 4, 0, 99]));
    }

    #[test]
    fn test_parse_rejects_empty_source() {
        assert_eq!(parse(""), Err(ProgramError::Empty));
        assert_eq!(parse("\n"), Err(ProgramError::Empty));
    }

    #[test]
    fn test_parse_rejects_bad_token() {
        assert_eq!(
            parse("1,two,3"),
            Err(ProgramError::InvalidInteger {
                index: 1,
                token: "two".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_rejects_missing_value() {
        assert_eq!(
            parse("1,,3"),
            Err(ProgramError::InvalidInteger {
                index: 1,
                token: String::new(),
            })
        );
    }
}
