use super::error::Chip8Error;
use super::instruction_set::{InstructionResult, InstructionSet};
use super::memory::{Memory, FONT_GLYPH_SIZE, FONT_START};
use super::opcode::Opcode;
use super::state::{MachineState, FLAG_REGISTER, NUM_REGISTERS};
use crate::gfx::Drawable;
use rand::Rng;

// Tallest sprite an opcode can describe (N is one hex digit).
const MAX_SPRITE_ROWS: usize = 15;

/// Execute one decoded instruction against the machine.
///
/// `pc` must already point past the instruction. On error, the handler
/// has not changed any state the error concerns (e.g. `PC` is untouched
/// by a failed return).
pub fn execute<R: Rng>(
    opcode: Opcode,
    state: &mut MachineState,
    memory: &mut Memory,
    rng: &mut R,
) -> InstructionResult {
    let mut executor = Executor {
        opcode,
        state,
        memory,
        rng,
    };
    executor.dispatch()
}

/// Binds an opcode to the machine it runs on for the duration of one cycle.
struct Executor<'a, R> {
    opcode: Opcode,
    state: &'a mut MachineState,
    memory: &'a mut Memory,
    rng: &'a mut R,
}

impl<R: Rng> Executor<'_, R> {
    fn dispatch(&mut self) -> InstructionResult {
        let op = self.opcode;

        match op.family() {
            0x0 => match op.literal {
                0x0E0 => self.clear_screen(),
                0x0EE => self.r#return(),
                _ => self.unimplemented(),
            },
            0x1 => self.jump(),
            0x2 => self.call(),
            0x3 => self.skip_if_equal_literal(),
            0x4 => self.skip_if_not_equal_literal(),
            0x5 if op.nibble == 0x0 => self.skip_if_regs_equal(),
            0x6 => self.set_reg_to_literal(),
            0x7 => self.add(),
            0x8 => match op.nibble {
                0x0 => self.set_reg_to_reg(),
                0x1 => self.or(),
                0x2 => self.and(),
                0x3 => self.xor(),
                0x4 => self.add_with_carry(),
                0x5 => self.sub_y_from_x(),
                0x6 => self.shift_right(),
                0x7 => self.sub_x_from_y(),
                0xE => self.shift_left(),
                _ => self.unimplemented(),
            },
            0x9 if op.nibble == 0x0 => self.skip_if_regs_not_equal(),
            0xA => self.set_index(),
            0xB => self.jump_with_offset(),
            0xC => self.set_reg_to_random(),
            0xD => self.draw_sprite(),
            0xE => match op.byte {
                0x9E => self.skip_if_key_pressed(),
                0xA1 => self.skip_if_key_not_pressed(),
                _ => self.unimplemented(),
            },
            0xF => match op.byte {
                0x07 => self.get_delay_timer(),
                0x0A => self.wait_for_key(),
                0x15 => self.set_delay_timer(),
                0x18 => self.set_sound_timer(),
                0x1E => self.add_to_index(),
                0x29 => self.set_index_to_glyph(),
                0x33 => self.store_bcd(),
                0x55 => self.save_registers(),
                0x65 => self.load_registers(),
                _ => self.unimplemented(),
            },
            _ => self.unimplemented(),
        }
    }

    fn unimplemented(&self) -> InstructionResult {
        Err(Chip8Error::UnimplementedOpcode {
            opcode: self.opcode.value,
        })
    }

    fn vx(&self) -> u8 {
        self.state.registers[self.opcode.xreg]
    }

    fn vy(&self) -> u8 {
        self.state.registers[self.opcode.yreg]
    }

    fn set_vx(&mut self, value: u8) {
        self.state.registers[self.opcode.xreg] = value;
    }

    fn skip_if(&mut self, condition: bool) -> InstructionResult {
        if condition {
            self.state.pc = self.state.pc.wrapping_add(2);
        }
        Ok(())
    }

    // Writes the result first so that VF as a destination ends up holding the flag.
    fn set_vx_with_flag(&mut self, value: u8, flag: bool) -> InstructionResult {
        self.set_vx(value);
        self.state.registers[FLAG_REGISTER] = flag as u8;
        Ok(())
    }
}

impl<R: Rng> InstructionSet for Executor<'_, R> {
    fn clear_screen(&mut self) -> InstructionResult {
        self.state.screen.clear_all_pixels();
        self.state.draw_flag = true;
        Ok(())
    }

    fn call(&mut self) -> InstructionResult {
        // PC has already moved past this instruction, so it is the return address.
        self.state.stack.push(self.state.pc)?;
        self.state.pc = self.opcode.literal;
        Ok(())
    }

    fn r#return(&mut self) -> InstructionResult {
        self.state.pc = self.state.stack.pop()?;
        Ok(())
    }

    fn jump(&mut self) -> InstructionResult {
        self.state.pc = self.opcode.literal;
        Ok(())
    }

    fn jump_with_offset(&mut self) -> InstructionResult {
        self.state.pc = self.opcode.literal + self.state.registers[0] as u16;
        Ok(())
    }

    fn skip_if_equal_literal(&mut self) -> InstructionResult {
        self.skip_if(self.vx() == self.opcode.byte)
    }

    fn skip_if_not_equal_literal(&mut self) -> InstructionResult {
        self.skip_if(self.vx() != self.opcode.byte)
    }

    fn skip_if_regs_equal(&mut self) -> InstructionResult {
        self.skip_if(self.vx() == self.vy())
    }

    fn skip_if_regs_not_equal(&mut self) -> InstructionResult {
        self.skip_if(self.vx() != self.vy())
    }

    fn skip_if_key_pressed(&mut self) -> InstructionResult {
        let key = self.vx() & 0xF;
        self.skip_if(self.state.keypad.is_pressed(key))
    }

    fn skip_if_key_not_pressed(&mut self) -> InstructionResult {
        let key = self.vx() & 0xF;
        self.skip_if(!self.state.keypad.is_pressed(key))
    }

    fn set_reg_to_literal(&mut self) -> InstructionResult {
        self.set_vx(self.opcode.byte);
        Ok(())
    }

    fn set_reg_to_reg(&mut self) -> InstructionResult {
        self.set_vx(self.vy());
        Ok(())
    }

    fn set_reg_to_random(&mut self) -> InstructionResult {
        let random: u8 = self.rng.gen();
        self.set_vx(random & self.opcode.byte);
        Ok(())
    }

    fn add(&mut self) -> InstructionResult {
        self.set_vx(self.vx().wrapping_add(self.opcode.byte));
        Ok(())
    }

    fn add_with_carry(&mut self) -> InstructionResult {
        let (sum, overflowed) = self.vx().overflowing_add(self.vy());
        self.set_vx_with_flag(sum, overflowed)
    }

    fn or(&mut self) -> InstructionResult {
        self.set_vx(self.vx() | self.vy());
        Ok(())
    }

    fn and(&mut self) -> InstructionResult {
        self.set_vx(self.vx() & self.vy());
        Ok(())
    }

    fn xor(&mut self) -> InstructionResult {
        self.set_vx(self.vx() ^ self.vy());
        Ok(())
    }

    fn sub_x_from_y(&mut self) -> InstructionResult {
        let (diff, underflowed) = self.vy().overflowing_sub(self.vx());
        // inverted, save 0 on underflow
        self.set_vx_with_flag(diff, !underflowed)
    }

    fn sub_y_from_x(&mut self) -> InstructionResult {
        let (diff, underflowed) = self.vx().overflowing_sub(self.vy());
        self.set_vx_with_flag(diff, !underflowed)
    }

    fn shift_right(&mut self) -> InstructionResult {
        let val = self.vx();
        self.set_vx_with_flag(val >> 1, val & 0x1 == 1)
    }

    fn shift_left(&mut self) -> InstructionResult {
        let val = self.vx();
        self.set_vx_with_flag(val << 1, (val >> 7) & 0x1 == 1)
    }

    fn set_index(&mut self) -> InstructionResult {
        self.state.index_reg = self.opcode.literal;
        Ok(())
    }

    fn add_to_index(&mut self) -> InstructionResult {
        self.state.index_reg = self.state.index_reg.wrapping_add(self.vx() as u16);
        Ok(())
    }

    fn set_index_to_glyph(&mut self) -> InstructionResult {
        let glyph = (self.vx() & 0xF) as usize;
        self.state.index_reg = (FONT_START + glyph * FONT_GLYPH_SIZE) as u16;
        Ok(())
    }

    fn store_bcd(&mut self) -> InstructionResult {
        let val = self.vx();
        let base = self.state.index_reg as usize;
        // Check the whole range first so a fault never leaves a partial write.
        self.memory.read_byte(base + 2)?;

        self.memory.write_byte(base, val / 100)?;
        self.memory.write_byte(base + 1, (val / 10) % 10)?;
        self.memory.write_byte(base + 2, val % 10)
    }

    fn save_registers(&mut self) -> InstructionResult {
        let base = self.state.index_reg as usize;
        let last = self.opcode.xreg;
        self.memory.read_byte(base + last)?;

        for (offset, value) in self.state.registers[..=last].iter().enumerate() {
            self.memory.write_byte(base + offset, *value)?;
        }
        Ok(())
    }

    fn load_registers(&mut self) -> InstructionResult {
        let base = self.state.index_reg as usize;
        let last = self.opcode.xreg;

        let mut loaded = [0u8; NUM_REGISTERS];
        for (offset, slot) in loaded[..=last].iter_mut().enumerate() {
            *slot = self.memory.read_byte(base + offset)?;
        }
        self.state.registers[..=last].copy_from_slice(&loaded[..=last]);
        Ok(())
    }

    fn draw_sprite(&mut self) -> InstructionResult {
        let screen = &self.state.screen;
        let x0 = self.vx() as u32 % screen.width();
        let y0 = self.vy() as u32 % screen.height();

        // Rows past the bottom edge are clipped, so they are never fetched.
        let visible_rows = (self.opcode.nibble as u32).min(screen.height() - y0) as usize;
        let mut sprite = [0u8; MAX_SPRITE_ROWS];
        let base = self.state.index_reg as usize;
        for (row, byte) in sprite[..visible_rows].iter_mut().enumerate() {
            *byte = self.memory.read_byte(base + row)?;
        }

        self.state.registers[FLAG_REGISTER] = 0;
        let screen = &mut self.state.screen;
        let mut collision = false;

        for (row, byte) in sprite[..visible_rows].iter().enumerate() {
            let y = y0 + row as u32;
            for bit in 0..8u32 {
                let x = x0 + bit;
                // Clip at the right edge rather than wrapping.
                if !screen.in_bounds(x, y) {
                    break;
                }
                if byte & (0x80 >> bit) != 0 && screen.xor_pixel(x as u16, y as u16) {
                    collision = true;
                }
            }
        }

        if collision {
            self.state.registers[FLAG_REGISTER] = 1;
        }
        self.state.draw_flag = true;
        Ok(())
    }

    fn get_delay_timer(&mut self) -> InstructionResult {
        self.set_vx(self.state.delay_timer);
        Ok(())
    }

    fn set_delay_timer(&mut self) -> InstructionResult {
        self.state.delay_timer = self.vx();
        Ok(())
    }

    fn set_sound_timer(&mut self) -> InstructionResult {
        self.state.sound_timer = self.vx();
        Ok(())
    }

    fn wait_for_key(&mut self) -> InstructionResult {
        match self.state.keypad.first_pressed() {
            Some(key) => self.set_vx(key),
            // Run this instruction again next cycle.
            None => self.state.pc = self.state.pc.wrapping_sub(2),
        }
        Ok(())
    }
}
