use super::screen::Screen;
use crate::arch::Keypad;

/// What the host wants the interpreter loop to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostEvent {
    ShouldContinue,
    ShouldTogglePause,
    ShouldExit,
    ShouldSaveState,
}

/// The outside world: input, presentation and pacing.
///
/// The interpreter loop calls `poll` once per iteration (paused or not),
/// `present` whenever the screen changed, and `pace` after each executed
/// cycle to learn how many 60Hz timer ticks are due.
pub trait Interactible {
    fn poll(&mut self, keypad: &mut Keypad) -> HostEvent;
    fn present(&mut self, screen: &Screen);
    fn pace(&mut self) -> u32;

    // Where `ShouldSaveState` snapshots are written, if anywhere.
    fn save_state_sink(&mut self) -> Option<&mut dyn std::io::Write> {
        None
    }
}
