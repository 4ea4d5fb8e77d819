use super::interactible::{HostEvent, Interactible};
use super::screen::Screen;
use crate::arch::Keypad;
use std::collections::VecDeque;

#[derive(Default)]
/// A scripted host for driving the interpreter loop in tests.
/// It replays `events` one per poll and asks to exit once they run out.
pub struct MockHardware {
    pub events: VecDeque<HostEvent>,
    // Timer ticks reported after every cycle.
    pub ticks_per_cycle: u32,
    pub keys: Vec<u8>,
    pub polls: usize,
    pub presented: usize,
    pub saved: Vec<u8>,
}

impl MockHardware {
    pub fn new(events: &[HostEvent]) -> MockHardware {
        MockHardware {
            events: events.iter().copied().collect(),
            ..Default::default()
        }
    }
}

impl Interactible for MockHardware {
    fn poll(&mut self, keypad: &mut Keypad) -> HostEvent {
        self.polls += 1;
        for &key in &self.keys {
            keypad.press(key);
        }
        self.events.pop_front().unwrap_or(HostEvent::ShouldExit)
    }

    fn present(&mut self, _screen: &Screen) {
        self.presented += 1;
    }

    fn pace(&mut self) -> u32 {
        self.ticks_per_cycle
    }

    fn save_state_sink(&mut self) -> Option<&mut dyn std::io::Write> {
        Some(&mut self.saved)
    }
}
