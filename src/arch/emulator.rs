use super::error::HostError;
use crate::gfx::Interactible;
use std::path::Path;

pub trait Emulator {
    fn load_game(&mut self, file_path: &Path) -> Result<(), HostError>;
    // Returns when game or user quits.
    fn run(&mut self, host: &mut dyn Interactible) -> Result<(), HostError>;
}
