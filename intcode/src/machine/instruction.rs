//! Instruction decoding for the Intcode machine
//!
//! An instruction word packs the opcode into its low two decimal
//! digits and one addressing-mode digit per read parameter above them
//! (hundreds digit for the first parameter, thousands for the second).
//! Write targets are always direct memory addresses and never carry a
//! mode digit.

use crate::error::VmError;

/// Parameter addressing modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The parameter is an address; the operand is the cell it names.
    Position,
    /// The parameter is the operand itself.
    Immediate,
}

/// Operation selectors, one per defined instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Add,
    Mult,
    Input,
    Output,
    JumpIfTrue,
    JumpIfFalse,
    LessThan,
    Equals,
    Halt,
}

impl Opcode {
    fn from_value(value: i64) -> Option<Self> {
        match value {
            1 => Some(Opcode::Add),
            2 => Some(Opcode::Mult),
            3 => Some(Opcode::Input),
            4 => Some(Opcode::Output),
            5 => Some(Opcode::JumpIfTrue),
            6 => Some(Opcode::JumpIfFalse),
            7 => Some(Opcode::LessThan),
            8 => Some(Opcode::Equals),
            99 => Some(Opcode::Halt),
            _ => None,
        }
    }

    /// Number of parameters resolved through an addressing mode.
    pub fn read_count(self) -> usize {
        match self {
            Opcode::Halt | Opcode::Input => 0,
            Opcode::Output => 1,
            Opcode::Add
            | Opcode::Mult
            | Opcode::JumpIfTrue
            | Opcode::JumpIfFalse
            | Opcode::LessThan
            | Opcode::Equals => 2,
        }
    }

    /// Whether the instruction ends with a write-target address.
    pub fn has_write_target(self) -> bool {
        matches!(
            self,
            Opcode::Add | Opcode::Mult | Opcode::Input | Opcode::LessThan | Opcode::Equals
        )
    }

    /// Memory cells the instruction occupies, word included.
    pub fn width(self) -> usize {
        1 + self.read_count() + usize::from(self.has_write_target())
    }
}

/// A decoded instruction word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instr {
    pub opcode: Opcode,
    pub modes: [Mode; 2],
}

impl Instr {
    /// Decode a packed instruction word.
    ///
    /// Both mode digits are validated even when the opcode reads fewer
    /// than two parameters; decimal digits above the thousands place
    /// are ignored.
    pub fn decode(word: i64) -> Result<Self, VmError> {
        let value = word % 100;
        let opcode = Opcode::from_value(value)
            .ok_or(VmError::InvalidOpcode { word, opcode: value })?;
        let modes = [mode_digit(word, word / 100 % 10)?, mode_digit(word, word / 1000 % 10)?];
        Ok(Instr { opcode, modes })
    }
}

fn mode_digit(word: i64, digit: i64) -> Result<Mode, VmError> {
    match digit {
        0 => Ok(Mode::Position),
        1 => Ok(Mode::Immediate),
        _ => Err(VmError::InvalidAddressingMode { word, digit }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_bare_opcode() {
        let instr = Instr::decode(2).unwrap();
        assert_eq!(instr.opcode, Opcode::Mult);
        assert_eq!(instr.modes, [Mode::Position, Mode::Position]);
    }

    #[test]
    fn test_decode_packed_modes() {
        let instr = Instr::decode(1002).unwrap();
        assert_eq!(instr.opcode, Opcode::Mult);
        assert_eq!(instr.modes, [Mode::Position, Mode::Immediate]);

        let instr = Instr::decode(1101).unwrap();
        assert_eq!(instr.opcode, Opcode::Add);
        assert_eq!(instr.modes, [Mode::Immediate, Mode::Immediate]);

        let instr = Instr::decode(104).unwrap();
        assert_eq!(instr.opcode, Opcode::Output);
        assert_eq!(instr.modes, [Mode::Immediate, Mode::Position]);
    }

    #[test]
    fn test_decode_halt() {
        let instr = Instr::decode(99).unwrap();
        assert_eq!(instr.opcode, Opcode::Halt);
    }

    #[test]
    fn test_decode_ignores_high_digits() {
        let instr = Instr::decode(11002).unwrap();
        assert_eq!(instr.opcode, Opcode::Mult);
        assert_eq!(instr.modes, [Mode::Position, Mode::Immediate]);
    }

    #[test]
    fn test_decode_is_repeatable() {
        assert_eq!(Instr::decode(1105), Instr::decode(1105));
    }

    #[test]
    fn test_decode_rejects_unknown_opcode() {
        assert_eq!(
            Instr::decode(98),
            Err(VmError::InvalidOpcode { word: 98, opcode: 98 })
        );
        assert_eq!(
            Instr::decode(0),
            Err(VmError::InvalidOpcode { word: 0, opcode: 0 })
        );
    }

    #[test]
    fn test_decode_rejects_negative_word() {
        assert_eq!(
            Instr::decode(-1),
            Err(VmError::InvalidOpcode { word: -1, opcode: -1 })
        );
    }

    #[test]
    fn test_decode_rejects_bad_mode_digit() {
        assert_eq!(
            Instr::decode(302),
            Err(VmError::InvalidAddressingMode { word: 302, digit: 3 })
        );
        // The thousands digit is checked even for single-parameter opcodes.
        assert_eq!(
            Instr::decode(2004),
            Err(VmError::InvalidAddressingMode { word: 2004, digit: 2 })
        );
    }

    #[test]
    fn test_opcode_widths() {
        assert_eq!(Opcode::Add.width(), 4);
        assert_eq!(Opcode::Input.width(), 2);
        assert_eq!(Opcode::Output.width(), 2);
        assert_eq!(Opcode::JumpIfTrue.width(), 3);
        assert_eq!(Opcode::Halt.width(), 1);
    }
}
