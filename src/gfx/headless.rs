use super::interactible::{HostEvent, Interactible};
use super::screen::Screen;
use crate::arch::{Keypad, NUM_KEYS};
use log::debug;

/// A host with no window: it holds a fixed set of keys down,
/// keeps the last presented frame in memory, and quits once
/// it has paced a given number of cycles.
pub struct Headless {
    max_cycles: u64,
    cycles_per_frame: u32,
    keys: [bool; NUM_KEYS],

    cycles: u64,
    since_tick: u32,
    frames: u64,
    last_frame: Option<Screen>,
}

impl Headless {
    pub fn new(max_cycles: u64, cycles_per_frame: u32) -> Headless {
        Headless {
            max_cycles,
            // A frame of zero cycles would never tick.
            cycles_per_frame: cycles_per_frame.max(1),
            keys: [false; NUM_KEYS],
            cycles: 0,
            since_tick: 0,
            frames: 0,
            last_frame: None,
        }
    }

    /// Keys held for the whole run. Values above 0xF are ignored.
    pub fn hold_keys(&mut self, keys: &[u8]) {
        for &key in keys {
            if let Some(held) = self.keys.get_mut(key as usize) {
                *held = true;
            }
        }
    }

    pub fn last_frame(&self) -> Option<&Screen> {
        self.last_frame.as_ref()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames
    }
}

impl Interactible for Headless {
    fn poll(&mut self, keypad: &mut Keypad) -> HostEvent {
        keypad.set_all(self.keys);
        if self.cycles >= self.max_cycles {
            HostEvent::ShouldExit
        } else {
            HostEvent::ShouldContinue
        }
    }

    fn present(&mut self, screen: &Screen) {
        self.frames += 1;
        self.last_frame = Some(screen.clone());
    }

    fn pace(&mut self) -> u32 {
        self.cycles += 1;
        self.since_tick += 1;
        if self.since_tick >= self.cycles_per_frame {
            self.since_tick = 0;
            debug!("Timer tick after {} cycles", self.cycles);
            1
        } else {
            0
        }
    }
}
