use thiserror::Error;

/// Everything that can go wrong while loading or executing a program.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Chip8Error {
    #[error("program is too large ({size} bytes), max size is {max_size} bytes")]
    ProgramTooLarge { size: usize, max_size: usize },

    #[error("memory access out of range at address {address:#06X}")]
    AddressOutOfRange { address: usize },

    #[error("call stack overflow (capacity {capacity})")]
    StackOverflow { capacity: usize },

    #[error("call stack underflow: return with an empty call stack")]
    StackUnderflow,

    #[error("unimplemented opcode {opcode:#06X}")]
    UnimplementedOpcode { opcode: u16 },
}

/// A `Chip8Error` raised during a cycle, with the location it happened at.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("fault at {pc:#06X}{}: {source}", executing(.opcode))]
pub struct Fault {
    // Address the faulting opcode was fetched from.
    pub pc: u16,
    // None when the opcode itself could not be fetched.
    pub opcode: Option<u16>,
    #[source]
    pub source: Chip8Error,
}

fn executing(opcode: &Option<u16>) -> String {
    match opcode {
        Some(opcode) => format!(" executing {opcode:#06X}"),
        None => String::from(" fetching opcode"),
    }
}

/// Errors surfaced to whoever hosts the interpreter.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not (de)serialize snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("could not load program: {0}")]
    Load(#[from] Chip8Error),

    #[error(transparent)]
    Fault(#[from] Fault),
}
