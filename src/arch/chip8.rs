use super::emulator::Emulator;
use super::error::{Chip8Error, Fault, HostError};
use super::executor::execute;
use super::memory::Memory;
use super::observer::{LogObserver, Observer};
use super::opcode::decode;
use super::state::{Keypad, MachineState, RunState};
use crate::gfx::{HostEvent, Interactible, Screen};

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;


#[derive(Serialize, Deserialize)]
/// Everything needed to resume a machine later.
struct Snapshot {
    state: MachineState,
    memory: Memory,
}

/// A complete CHIP-8 machine: state, memory and the loop that drives them.
///
/// Each instance owns its state outright; any number of them can run
/// side by side.
pub struct Chip8 {
    // Core structural components.
    state: MachineState,
    memory: Memory,
    run_state: RunState,
    rng: StdRng,

    // Debug components.
    observer: Box<dyn Observer>,
    count: u64, // Cycles executed so far.
}

impl Chip8 {
    pub fn new() -> Chip8 {
        Chip8::with_rng(StdRng::from_entropy())
    }

    /// A machine whose random opcodes are reproducible.
    pub fn with_seed(seed: u64) -> Chip8 {
        Chip8::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Chip8 {
        Chip8 {
            state: MachineState::new(),
            memory: Memory::new(), // Fontset is loaded here.
            run_state: RunState::Running,
            rng,
            observer: Box::new(LogObserver),
            count: 0,
        }
    }

    /// Replace the per-cycle observability hook.
    pub fn set_observer(&mut self, observer: Box<dyn Observer>) {
        self.observer = observer;
    }

    /// Copy a ROM image into memory. Must happen before the first cycle.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), Chip8Error> {
        self.memory.load_program(program)?;
        info!("Loaded {} byte program", program.len());
        Ok(())
    }

    /// Run a single fetch-decode-execute cycle.
    ///
    /// Does nothing unless the machine is running. A failing
    /// instruction halts the machine and leaves `PC` pointing at it.
    pub fn cycle(&mut self) -> Result<(), Fault> {
        if self.run_state != RunState::Running {
            return Ok(());
        }

        let pc = self.state.pc;
        let value = match self.memory.read_word(pc as usize) {
            Ok(value) => value,
            Err(source) => return Err(self.fault(pc, None, source)),
        };

        // Advance before executing so flow control overwrites the sequential address.
        self.state.pc = pc.wrapping_add(2);
        let opcode = decode(value);
        self.observer.on_cycle(pc, &opcode);

        if let Err(source) = execute(opcode, &mut self.state, &mut self.memory, &mut self.rng) {
            self.state.pc = pc;
            return Err(self.fault(pc, Some(value), source));
        }

        self.count += 1;
        Ok(())
    }

    fn fault(&mut self, pc: u16, opcode: Option<u16>, source: Chip8Error) -> Fault {
        let fault = Fault { pc, opcode, source };
        warn!("Halting: {fault}");
        self.run_state = RunState::Halted;
        fault
    }

    /// Called by the host at 60Hz.
    pub fn tick_timers(&mut self) {
        self.state.tick_timers();
    }

    /// Whether a tone should currently be playing.
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// Returns the screen if it changed since the last call.
    pub fn take_frame(&mut self) -> Option<&Screen> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(&self.state.screen)
        } else {
            None
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.state.screen
    }

    pub fn keypad_mut(&mut self) -> &mut Keypad {
        &mut self.state.keypad
    }

    pub fn state(&self) -> &MachineState {
        &self.state
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn cycles(&self) -> u64 {
        self.count
    }

    /// Flip between running and paused. A halted machine stays halted.
    pub fn toggle_pause(&mut self) {
        self.run_state = match self.run_state {
            RunState::Running => {
                info!("Paused");
                RunState::Paused
            }
            RunState::Paused => {
                info!("Resumed");
                RunState::Running
            }
            RunState::Halted => RunState::Halted,
        };
    }

    pub fn halt(&mut self) {
        self.run_state = RunState::Halted;
    }

    /// Write the machine (minus run state) as JSON.
    pub fn save_state(&self, writer: &mut dyn Write) -> Result<(), HostError> {
        let snapshot = Snapshot {
            state: self.state.clone(),
            memory: self.memory.clone(),
        };
        serde_json::to_writer(writer, &snapshot)?;
        debug!("Saved state at 0x{:04X}", self.state.pc);
        Ok(())
    }

    /// Replace the machine with a snapshot written by `save_state`.
    /// The restored machine is running and its screen needs presenting.
    pub fn restore_state(&mut self, reader: &mut dyn Read) -> Result<(), HostError> {
        let snapshot: Snapshot = serde_json::from_reader(reader)?;
        self.state = snapshot.state;
        self.memory = snapshot.memory;
        self.state.draw_flag = true;
        self.run_state = RunState::Running;
        info!("Restored state at 0x{:04X}", self.state.pc);
        Ok(())
    }
}

impl Default for Chip8 {
    fn default() -> Chip8 {
        Chip8::new()
    }
}

impl Emulator for Chip8 {
    fn load_game(&mut self, file_path: &Path) -> Result<(), HostError> {
        let program = std::fs::read(file_path)?;
        self.load_program(&program)?;
        info!("Loaded {}", file_path.display());
        Ok(())
    }

    fn run(&mut self, host: &mut dyn Interactible) -> Result<(), HostError> {
        info!("Running from 0x{:04X}", self.state.pc);

        while self.run_state != RunState::Halted {
            match host.poll(&mut self.state.keypad) {
                HostEvent::ShouldContinue => {}
                HostEvent::ShouldTogglePause => self.toggle_pause(),
                HostEvent::ShouldExit => {
                    info!("Quitting after {} cycles", self.count);
                    self.halt();
                    continue;
                }
                HostEvent::ShouldSaveState => {
                    if let Some(sink) = host.save_state_sink() {
                        self.save_state(sink)?;
                    }
                }
            }

            if self.run_state != RunState::Running {
                continue;
            }

            self.cycle()?;
            for _ in 0..host.pace() {
                self.tick_timers();
            }
            if let Some(screen) = self.take_frame() {
                host.present(screen);
            }
        }

        Ok(())
    }
}
