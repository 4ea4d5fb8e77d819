use super::opcode::Opcode;
use log::trace;

/// Receives every fetched instruction before it executes.
pub trait Observer {
    // `pc` is the address the opcode was fetched from.
    fn on_cycle(&mut self, pc: u16, opcode: &Opcode);
}

/// Forwards each cycle to the `log` facade at trace level.
#[derive(Default)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn on_cycle(&mut self, pc: u16, opcode: &Opcode) {
        trace!("Address: 0x{pc:04X} {opcode}");
    }
}

impl<F: FnMut(u16, &Opcode)> Observer for F {
    fn on_cycle(&mut self, pc: u16, opcode: &Opcode) {
        self(pc, opcode)
    }
}
