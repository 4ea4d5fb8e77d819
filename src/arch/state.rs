use super::memory::PROGRAM_START;
use super::stack::CallStack;
use crate::gfx::Screen;
use serde::{Deserialize, Serialize};

pub const NUM_REGISTERS: usize = 16;
pub const NUM_KEYS: usize = 16;
/// VF doubles as the carry / borrow / collision flag.
pub const FLAG_REGISTER: usize = 0xF;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Whether the interpreter loop executes cycles.
pub enum RunState {
    Running,
    // Cycles are suspended but the host is still polled.
    Paused,
    // Terminal.
    Halted,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// The hexadecimal keypad, 0x0 through 0xF. True if a key is held.
pub struct Keypad {
    keys: [bool; NUM_KEYS],
}

impl Keypad {
    pub fn new() -> Keypad {
        Keypad::default()
    }

    pub fn press(&mut self, key: u8) {
        if let Some(held) = self.keys.get_mut(key as usize) {
            *held = true;
        }
    }

    pub fn release(&mut self, key: u8) {
        if let Some(held) = self.keys.get_mut(key as usize) {
            *held = false;
        }
    }

    pub fn set_all(&mut self, keys: [bool; NUM_KEYS]) {
        self.keys = keys;
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    /// Lowest-numbered key currently held.
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|&held| held).map(|key| key as u8)
    }

    pub fn keys(&self) -> &[bool] {
        &self.keys
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// Everything about the machine except memory.
pub struct MachineState {
    pub registers: [u8; NUM_REGISTERS],
    pub index_reg: u16,
    // Always the address of the next opcode to fetch.
    pub pc: u16,
    pub stack: CallStack,
    // Both timers are decremented by the host at 60Hz, never by opcodes.
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub keypad: Keypad,
    pub screen: Screen,
    // Set when the screen changed since the host last presented it.
    pub draw_flag: bool,
}

impl MachineState {
    pub fn new() -> MachineState {
        MachineState {
            registers: [0; NUM_REGISTERS],
            index_reg: 0,
            pc: PROGRAM_START as u16, // Starting PC is static.
            stack: CallStack::new(),
            delay_timer: 0,
            sound_timer: 0,
            keypad: Keypad::new(),
            screen: Screen::default(),
            draw_flag: false,
        }
    }

    /// Decrement both timers once, stopping at zero.
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }
}

impl Default for MachineState {
    fn default() -> MachineState {
        MachineState::new()
    }
}
