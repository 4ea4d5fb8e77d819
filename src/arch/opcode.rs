use std::fmt::{Display, Formatter, Result};

// Don't allow initialization of an Opcode outside of this module
// other than through `Opcode::new()`.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// A struct that represents a single decoded instruction for the emulator to run.
///
/// Members of `Opcode` are public for easier visibility,
/// but `Opcode` instances (other than the Default instance)
/// cannot be created by anything other than `Opcode::new()`.
///
/// Every 16-bit value decodes, whether or not the interpreter
/// knows how to execute it.
pub struct Opcode {
    // The raw numerical value of the instruction.
    pub value: u16,
    // The 'X' (lower) register named in the instruction.
    // Registers are usize because rust forces indexing to be as usize,
    // even when the indexes are of a smaller type and thus are in
    // (compile-time) bounds. Always < 16.
    pub xreg: usize,
    // The 'Y' (higher) register named in the instruction. Always < 16.
    pub yreg: usize,
    // The last three hex digits of our instruction (NNN).
    // This is frequently an address in memory.
    pub literal: u16,
    // The last two hex digits (NN).
    pub byte: u8,
    // The last hex digit (N).
    pub nibble: u8,
}

impl Opcode {
    /// Create a new `Opcode` from a numerical value.
    ///
    /// It is up to the caller to ensure this value represents
    /// a valid instruction for the emulator to execute.
    pub fn new(value: u16) -> Opcode {
        Opcode {
            value,
            xreg: ((value >> 8) & 0x0F) as usize,
            yreg: ((value >> 4) & 0x0F) as usize,
            literal: value & 0x0FFF,
            byte: (value & 0x00FF) as u8,
            nibble: (value & 0x000F) as u8,
        }
    }

    /// The instruction family, i.e. the first hex digit.
    pub fn family(&self) -> u8 {
        (self.value >> 12) as u8
    }
}

impl From<u16> for Opcode {
    fn from(value: u16) -> Opcode {
        Opcode::new(value)
    }
}

/// Decode a raw instruction word. Never fails.
pub fn decode(value: u16) -> Opcode {
    Opcode::new(value)
}

impl Display for Opcode {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(
            f,
            "Value: 0x{:04X} X: {:X} Y: {:X} NNN: 0x{:03X} NN: 0x{:02X} N: 0x{:X}",
            self.value, self.xreg, self.yreg, self.literal, self.byte, self.nibble
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields() {
        let op = decode(0xABCD);
        assert_eq!(op.value, 0xABCD);
        assert_eq!(op.family(), 0xA);
        assert_eq!(op.xreg, 0xB);
        assert_eq!(op.yreg, 0xC);
        assert_eq!(op.literal, 0xBCD);
        assert_eq!(op.byte, 0xCD);
        assert_eq!(op.nibble, 0xD);
    }

    #[test]
    fn every_value_decodes_within_field_widths() {
        for value in 0..=u16::MAX {
            let op = decode(value);
            assert_eq!(op.literal, value & 0x0FFF);
            assert_eq!(op.byte as u16, value & 0x00FF);
            assert_eq!(op.nibble as u16, value & 0x000F);
            assert_eq!(op.xreg as u16, (value >> 8) & 0x0F);
            assert_eq!(op.yreg as u16, (value >> 4) & 0x0F);
            assert!(op.family() < 16);
        }
    }

    #[test]
    fn display() {
        let op = Opcode::new(0xD01F);
        assert_eq!(
            op.to_string(),
            "Value: 0xD01F X: 0 Y: 1 NNN: 0x01F NN: 0x1F N: 0xF"
        );
    }
}
