//! A CHIP-8 interpreter core.
//!
//! `arch` holds the machine itself (memory, registers, decoder, executor and
//! the interpreter loop). `gfx` holds the framebuffer and the seam through
//! which a host supplies input, presentation and pacing.

pub mod arch;
pub mod gfx;
