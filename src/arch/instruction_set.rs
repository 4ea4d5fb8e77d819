use super::error::Chip8Error;

pub type InstructionResult = Result<(), Chip8Error>;

/// One handler per classic instruction. The handler reads its operands
/// from the opcode currently being executed.
pub trait InstructionSet {
    // Flow control
    fn clear_screen(&mut self) -> InstructionResult;
    fn call(&mut self) -> InstructionResult;
    fn r#return(&mut self) -> InstructionResult;
    fn jump(&mut self) -> InstructionResult;
    fn jump_with_offset(&mut self) -> InstructionResult;

    // Conditional skips
    fn skip_if_equal_literal(&mut self) -> InstructionResult;
    fn skip_if_not_equal_literal(&mut self) -> InstructionResult;
    fn skip_if_regs_equal(&mut self) -> InstructionResult;
    fn skip_if_regs_not_equal(&mut self) -> InstructionResult;
    fn skip_if_key_pressed(&mut self) -> InstructionResult;
    fn skip_if_key_not_pressed(&mut self) -> InstructionResult;

    // Manipulating data registers
    fn set_reg_to_literal(&mut self) -> InstructionResult;
    fn set_reg_to_reg(&mut self) -> InstructionResult;
    fn set_reg_to_random(&mut self) -> InstructionResult;

    fn add(&mut self) -> InstructionResult;
    fn add_with_carry(&mut self) -> InstructionResult;
    fn or(&mut self) -> InstructionResult;
    fn and(&mut self) -> InstructionResult;
    fn xor(&mut self) -> InstructionResult;
    fn sub_x_from_y(&mut self) -> InstructionResult;
    fn sub_y_from_x(&mut self) -> InstructionResult;
    fn shift_right(&mut self) -> InstructionResult;
    fn shift_left(&mut self) -> InstructionResult;

    // Index register and memory
    fn set_index(&mut self) -> InstructionResult;
    fn add_to_index(&mut self) -> InstructionResult;
    fn set_index_to_glyph(&mut self) -> InstructionResult;
    fn store_bcd(&mut self) -> InstructionResult;
    fn save_registers(&mut self) -> InstructionResult;
    fn load_registers(&mut self) -> InstructionResult;

    // Display
    fn draw_sprite(&mut self) -> InstructionResult;

    // Timers and input
    fn get_delay_timer(&mut self) -> InstructionResult;
    fn set_delay_timer(&mut self) -> InstructionResult;
    fn set_sound_timer(&mut self) -> InstructionResult;
    fn wait_for_key(&mut self) -> InstructionResult;
}
