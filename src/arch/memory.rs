use super::error::Chip8Error;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};

/// Total addressable memory of the machine.
pub const MEMORY_SIZE: usize = 4096;
/// Programs are loaded here; everything below is reserved for the interpreter.
pub const PROGRAM_START: usize = 0x200;
/// Where the built-in font is placed.
pub const FONT_START: usize = 0x000;
/// Bytes per font glyph.
pub const FONT_GLYPH_SIZE: usize = 5;

pub const FONTSET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

#[serde_as]
#[derive(Clone, Serialize, Deserialize)]
/// The flat byte array the machine runs out of.
/// All access is bounds-checked.
pub struct Memory {
    #[serde_as(as = "Bytes")]
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Fresh memory with the font already in place.
    pub fn new() -> Memory {
        let mut memory = Memory {
            bytes: [0; MEMORY_SIZE],
        };
        memory.load_font(&FONTSET);
        memory
    }

    pub fn capacity(&self) -> usize {
        MEMORY_SIZE
    }

    /// Largest program that fits above `PROGRAM_START`.
    pub fn max_program_size(&self) -> usize {
        MEMORY_SIZE - PROGRAM_START
    }

    /// Copy a font table into the reserved low region.
    pub fn load_font(&mut self, font: &[u8]) {
        let len = font.len().min(PROGRAM_START - FONT_START);
        self.bytes[FONT_START..FONT_START + len].copy_from_slice(&font[..len]);
    }

    /// Copy a program into memory at `PROGRAM_START`.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), Chip8Error> {
        let max_size = self.max_program_size();
        if program.len() > max_size {
            return Err(Chip8Error::ProgramTooLarge {
                size: program.len(),
                max_size,
            });
        }

        self.bytes[PROGRAM_START..PROGRAM_START + program.len()].copy_from_slice(program);
        Ok(())
    }

    pub fn read_byte(&self, address: usize) -> Result<u8, Chip8Error> {
        self.bytes
            .get(address)
            .copied()
            .ok_or(Chip8Error::AddressOutOfRange { address })
    }

    pub fn write_byte(&mut self, address: usize, value: u8) -> Result<(), Chip8Error> {
        let byte = self
            .bytes
            .get_mut(address)
            .ok_or(Chip8Error::AddressOutOfRange { address })?;
        *byte = value;
        Ok(())
    }

    /// Read the big-endian instruction word at `address`.
    pub fn read_word(&self, address: usize) -> Result<u16, Chip8Error> {
        let high = self.read_byte(address)?;
        let low = self.read_byte(address + 1)?;
        Ok(u16::from_be_bytes([high, low]))
    }
}

impl Default for Memory {
    fn default() -> Memory {
        Memory::new()
    }
}
