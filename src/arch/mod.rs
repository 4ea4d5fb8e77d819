pub mod chip8;
mod emulator;
mod error;
mod executor;
mod instruction_set;
pub mod memory;
mod observer;
mod opcode;
mod stack;
mod state;

pub use chip8::Chip8;
pub use emulator::Emulator;
pub use error::{Chip8Error, Fault, HostError};
pub use executor::execute;
pub use memory::Memory;
pub use observer::{LogObserver, Observer};
pub use opcode::{decode, Opcode};
pub use stack::{CallStack, STACK_CAPACITY};
pub use state::{Keypad, MachineState, RunState, FLAG_REGISTER, NUM_KEYS, NUM_REGISTERS};
