use bitvec::prelude::*;
use heapless::Vec;
use log::{debug, error, info, trace};

use crate::config::Config;
use crate::context::Context;
use crate::error::Error;
use crate::frame::{Frame, FrameView};
use crate::keypad::Keypad;
use crate::memory::{Memory, ADDR_MASK, FONT_START, GLYPH_HEIGHT, PROGRAM_START};
use crate::opcode::OpCode;
use crate::timer::{Timer, TimerState};

/// Number of return addresses the call stack can hold
pub const STACK_DEPTH: usize = 16;

const VF: usize = 0xF;

/// Whether the machine executes instructions or waits for a key press
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MachineState {
    Running,
    /// The pressed key will be stored in `V[register]`
    WaitingForKey { register: u8 },
}

pub struct Plum8<C: Context + Sized> {
    ctx: C,
    config: Config,
    v: [u8; 16],
    i: u16,
    pc: u16,
    stack: Vec<u16, STACK_DEPTH>,
    memory: Memory,
    frame: Frame,
    frame_dirty: bool,
    keypad: Keypad,
    delay_timer: Timer,
    sound_timer: Timer,
    state: MachineState,
    fault: Option<Error>,
}

impl<C: Context + Sized> Plum8<C> {
    pub fn new(ctx: C) -> Self {
        Self::with_config(ctx, Config::default())
    }

    pub fn with_config(ctx: C, config: Config) -> Self {
        Self {
            ctx,
            config,
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            stack: Vec::new(),
            memory: Memory::new(),
            frame: Frame::new(),
            frame_dirty: false,
            keypad: Keypad::new(),
            delay_timer: Timer::new(),
            sound_timer: Timer::new(),
            state: MachineState::Running,
            fault: None,
        }
    }

    /// Create a machine with the font and `prog` already in memory
    pub fn load(ctx: C, prog: &[u8]) -> Result<Self, Error> {
        let mut plum = Self::new(ctx);
        plum.load_font();
        plum.load_program(prog)?;
        Ok(plum)
    }

    pub fn load_font(&mut self) {
        self.memory.load_font();
    }

    /// Load program from slice of bytes to memory from 0x200 (_start address)
    pub fn load_program(&mut self, prog: &[u8]) -> Result<(), Error> {
        self.memory.load_program(prog)
    }

    /// Run a single frame of the machine
    ///
    /// Executes up to `Config::speed` instructions, then ticks both timers
    /// once and drives the sound and display ports. Returns `WouldBlock`
    /// while a key press is awaited. A fatal error halts the machine and is
    /// returned again from every later call.
    pub fn cycle(&mut self) -> nb::Result<(), Error> {
        if let Some(error) = self.fault {
            return Err(nb::Error::Other(error));
        }
        self.latch_keys();

        let batch = self.execute_batch();
        if let Err(error) = batch {
            self.ctx.stop_sound();
            self.present_frame();
            return Err(nb::Error::Other(self.halt(error)));
        }

        self.update_timers();
        self.update_sound();
        self.present_frame();
        self.status()
    }

    /// Execute exactly one instruction, leaving timers and output ports alone
    pub fn step(&mut self) -> nb::Result<(), Error> {
        if let Some(error) = self.fault {
            return Err(nb::Error::Other(error));
        }
        self.latch_keys();
        if self.state != MachineState::Running {
            return Err(nb::Error::WouldBlock);
        }
        if let Err(error) = self.execute_next() {
            return Err(nb::Error::Other(self.halt(error)));
        }
        self.status()
    }

    fn status(&self) -> nb::Result<(), Error> {
        match self.state {
            MachineState::Running => Ok(()),
            MachineState::WaitingForKey { .. } => Err(nb::Error::WouldBlock),
        }
    }

    fn halt(&mut self, error: Error) -> Error {
        error!("machine halted: {}", error);
        self.fault = Some(error);
        error
    }

    /// Take a snapshot of the keyboard and resolve a pending wait for key
    fn latch_keys(&mut self) {
        self.keypad.latch(self.ctx.get_keys());
        if let MachineState::WaitingForKey { register } = self.state {
            if let Some(key) = self.keypad.take_newly_pressed() {
                self.v[register as usize] = key;
                self.state = MachineState::Running;
                info!("key {:X} pressed, stored in V{:X}", key, register);
            }
        }
    }

    fn execute_batch(&mut self) -> Result<(), Error> {
        for _ in 0..self.config.speed {
            if self.state != MachineState::Running {
                break;
            }
            self.execute_next()?;
        }
        Ok(())
    }

    fn execute_next(&mut self) -> Result<(), Error> {
        let address = self.pc;
        let raw = self.memory.read_word(address);
        self.pc_increment();
        let opcode = OpCode::decode(raw).ok_or(Error::UnknownOpcode {
            opcode: raw,
            address,
        })?;
        trace!("{:#05X}: {:04X} {:?}", address, raw, opcode);
        self.execute(opcode)
    }

    fn update_timers(&mut self) {
        if self.state != MachineState::Running && !self.config.timers_while_waiting {
            return;
        }
        self.delay_timer.decrement();
        if let TimerState::Finished = self.sound_timer.decrement() {
            debug!("sound timer finished");
        }
    }

    fn update_sound(&mut self) {
        if self.sound_timer.is_active() {
            self.ctx
                .play_sound(self.config.sound_gain, self.config.sound_frequency);
        } else {
            self.ctx.stop_sound();
        }
    }

    fn present_frame(&mut self) {
        if self.frame_dirty {
            self.frame_dirty = false;
            self.ctx.on_frame(self.frame.view());
        }
    }

    #[inline]
    fn pc_increment(&mut self) {
        self.pc = self.pc.wrapping_add(2) & ADDR_MASK;
    }

    /// Address of the instruction being executed, `pc` already points past it
    #[inline]
    fn current_address(&self) -> u16 {
        self.pc.wrapping_sub(2) & ADDR_MASK
    }
}

// Accessors
impl<C: Context + Sized> Plum8<C> {
    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn i(&self) -> u16 {
        self.i
    }

    pub fn registers(&self) -> &[u8; 16] {
        &self.v
    }

    pub fn stack(&self) -> &[u16] {
        &self.stack
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer.load()
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer.load()
    }

    pub fn state(&self) -> MachineState {
        self.state
    }

    /// Error that halted the machine, if any
    pub fn fault(&self) -> Option<Error> {
        self.fault
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn frame(&self) -> FrameView<'_> {
        self.frame.view()
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn ctx(&self) -> &C {
        &self.ctx
    }

    pub fn ctx_mut(&mut self) -> &mut C {
        &mut self.ctx
    }
}

// OpCodes impls
impl<C: Context + Sized> Plum8<C> {
    /// Apply the effect of a single instruction
    ///
    /// `pc` is expected to already point at the following instruction.
    #[rustfmt::skip]
    pub fn execute(&mut self, opcode: OpCode) -> Result<(), Error> {
        match opcode {
            OpCode::_00E0             => self.clear_screen(),
            OpCode::_00EE             => self.subroutine_return(),
            OpCode::_1NNN { nnn }     => self.jump_to(nnn),
            OpCode::_2NNN { nnn }     => self.exec_subroutine_at(nnn),
            OpCode::_3XNN { x, nn }   => self.skip_if_vx_eq_nn(x, nn),
            OpCode::_4XNN { x, nn }   => self.skip_if_vx_ne_nn(x, nn),
            OpCode::_5XY0 { x, y }    => self.skip_if_vx_eq_vy(x, y),
            OpCode::_6XNN { x, nn }   => self.assign_vx_nn(x, nn),
            OpCode::_7XNN { x, nn }   => self.assign_add_vx_nn(x, nn),
            OpCode::_8XY0 { x, y }    => self.assign_vx_vy(x, y),
            OpCode::_8XY1 { x, y }    => self.assign_or_vx_vy(x, y),
            OpCode::_8XY2 { x, y }    => self.assign_and_vx_vy(x, y),
            OpCode::_8XY3 { x, y }    => self.assign_xor_vx_vy(x, y),
            OpCode::_8XY4 { x, y }    => self.assign_add_vx_vy(x, y),
            OpCode::_8XY5 { x, y }    => self.assign_sub_vx_vy(x, y),
            OpCode::_8XY6 { x, .. }   => self.assign_vx_shifted_r(x),
            OpCode::_8XY7 { x, y }    => self.assign_vx_vy_sub_vx(x, y),
            OpCode::_8XYE { x, .. }   => self.assign_vx_shifted_l(x),
            OpCode::_9XY0 { x, y }    => self.skip_if_vx_ne_vy(x, y),
            OpCode::_ANNN { nnn }     => self.assign_i_nnn(nnn),
            OpCode::_BNNN { nnn }     => self.jump_to_nnn_add_v0(nnn),
            OpCode::_CXNN { x, nn }   => self.assign_vx_random_and_nn(x, nn),
            OpCode::_DXYN { x, y, n } => self.draw_n_at_vx_vy(x, y, n),
            OpCode::_EX9E { x }       => self.skip_if_vx_in_keys(x),
            OpCode::_EXA1 { x }       => self.skip_if_vx_not_in_keys(x),
            OpCode::_FX07 { x }       => self.assign_vx_delay_t(x),
            OpCode::_FX0A { x }       => self.assign_vx_wait_for_key(x),
            OpCode::_FX15 { x }       => self.assign_delay_t_vx(x),
            OpCode::_FX18 { x }       => self.assign_sound_t_vx(x),
            OpCode::_FX1E { x }       => self.assign_add_i_vx(x),
            OpCode::_FX29 { x }       => self.assign_i_addr_of_sprite_vx(x),
            OpCode::_FX33 { x }       => self.assign_mem_at_i_bcd_of_vx(x),
            OpCode::_FX55 { x }       => self.assign_mem_at_i_v0_to_vx(x),
            OpCode::_FX65 { x }       => self.assign_v0_to_vx_mem_at_i(x),
        }
    }

    fn skip_if(&mut self, condition: bool) -> Result<(), Error> {
        if condition {
            self.pc_increment();
        }
        Ok(())
    }

    /// Clear the screen
    /// 00E0,
    fn clear_screen(&mut self) -> Result<(), Error> {
        self.frame.clear();
        self.frame_dirty = true;
        Ok(())
    }

    /// Return from a subroutine
    /// 00EE,
    fn subroutine_return(&mut self) -> Result<(), Error> {
        let address = self.current_address();
        self.stack
            .pop()
            .ok_or(Error::StackUnderflow { address })
            .map(|addr| self.pc = addr)
    }

    /// Jump to address NNN
    /// 1NNN { nnn: u16 },
    fn jump_to(&mut self, nnn: u16) -> Result<(), Error> {
        self.pc = nnn & ADDR_MASK;
        Ok(())
    }

    /// Execute subroutine starting at address NNN
    /// 2NNN { nnn: u16 },
    fn exec_subroutine_at(&mut self, nnn: u16) -> Result<(), Error> {
        let address = self.current_address();
        self.stack
            .push(self.pc)
            .map_err(|_| Error::StackOverflow { address })
            .map(|_| self.pc = nnn & ADDR_MASK)
    }

    /// Skip the following instruction if the value of register VX equals NN
    /// 3XNN { x: u8, nn: u8 },
    fn skip_if_vx_eq_nn(&mut self, x: u8, nn: u8) -> Result<(), Error> {
        self.skip_if(self.v[x as usize] == nn)
    }

    /// Skip the following instruction if the value of register VX is not equal to NN
    /// 4XNN { x: u8, nn: u8 },
    fn skip_if_vx_ne_nn(&mut self, x: u8, nn: u8) -> Result<(), Error> {
        self.skip_if(self.v[x as usize] != nn)
    }

    /// Skip the following instruction if the value of register VX is equal to the value of register VY
    /// 5XY0 { x: u8, y: u8 },
    fn skip_if_vx_eq_vy(&mut self, x: u8, y: u8) -> Result<(), Error> {
        self.skip_if(self.v[x as usize] == self.v[y as usize])
    }

    /// Store number NN in register VX
    /// 6XNN { x: u8, nn: u8 },
    fn assign_vx_nn(&mut self, x: u8, nn: u8) -> Result<(), Error> {
        self.v[x as usize] = nn;
        Ok(())
    }

    /// Add the value NN to register VX, VF is left untouched
    /// 7XNN { x: u8, nn: u8 },
    fn assign_add_vx_nn(&mut self, x: u8, nn: u8) -> Result<(), Error> {
        self.v[x as usize] = self.v[x as usize].wrapping_add(nn);
        Ok(())
    }

    /// Store the value of register VY in register VX
    /// 8XY0 { x: u8, y: u8 },
    fn assign_vx_vy(&mut self, x: u8, y: u8) -> Result<(), Error> {
        self.v[x as usize] = self.v[y as usize];
        Ok(())
    }

    /// Set VX to VX OR VY
    /// 8XY1 { x: u8, y: u8 },
    fn assign_or_vx_vy(&mut self, x: u8, y: u8) -> Result<(), Error> {
        self.v[x as usize] |= self.v[y as usize];
        Ok(())
    }

    /// Set VX to VX AND VY
    /// 8XY2 { x: u8, y: u8 },
    fn assign_and_vx_vy(&mut self, x: u8, y: u8) -> Result<(), Error> {
        self.v[x as usize] &= self.v[y as usize];
        Ok(())
    }

    /// Set VX to VX XOR VY
    /// 8XY3 { x: u8, y: u8 },
    fn assign_xor_vx_vy(&mut self, x: u8, y: u8) -> Result<(), Error> {
        self.v[x as usize] ^= self.v[y as usize];
        Ok(())
    }

    /// Store a flag in VF and then a result in VX, so the result wins when X is F
    #[inline]
    fn assign_vx_with_flag(&mut self, x: u8, value: u8, flag: bool) -> Result<(), Error> {
        self.v[VF] = flag as u8;
        self.v[x as usize] = value;
        Ok(())
    }

    /// Add the value of register VY to register VX, Set VF to 01 if a carry occurs, Set VF to 00 if a carry does not occur
    /// 8XY4 { x: u8, y: u8 },
    fn assign_add_vx_vy(&mut self, x: u8, y: u8) -> Result<(), Error> {
        let (value, carry) = self.v[x as usize].overflowing_add(self.v[y as usize]);
        self.assign_vx_with_flag(x, value, carry)
    }

    /// Subtract the value of register VY from register VX, Set VF to 00 if a borrow occurs, Set VF to 01 if a borrow does not occur
    /// 8XY5 { x: u8, y: u8 },
    fn assign_sub_vx_vy(&mut self, x: u8, y: u8) -> Result<(), Error> {
        let (value, borrow) = self.v[x as usize].overflowing_sub(self.v[y as usize]);
        self.assign_vx_with_flag(x, value, !borrow)
    }

    /// Shift VX right by one bit, Set register VF to the least significant bit prior to the shift
    /// 8XY6 { x: u8, y: u8 },
    fn assign_vx_shifted_r(&mut self, x: u8) -> Result<(), Error> {
        let vx = self.v[x as usize];
        self.assign_vx_with_flag(x, vx >> 1, vx & 1 == 1)
    }

    /// Set register VX to the value of VY minus VX, Set VF to 00 if a borrow occurs, Set VF to 01 if a borrow does not occur
    /// 8XY7 { x: u8, y: u8 },
    fn assign_vx_vy_sub_vx(&mut self, x: u8, y: u8) -> Result<(), Error> {
        let (value, borrow) = self.v[y as usize].overflowing_sub(self.v[x as usize]);
        self.assign_vx_with_flag(x, value, !borrow)
    }

    /// Shift VX left by one bit, Set register VF to the most significant bit prior to the shift
    /// 8XYE { x: u8, y: u8 },
    fn assign_vx_shifted_l(&mut self, x: u8) -> Result<(), Error> {
        let vx = self.v[x as usize];
        self.assign_vx_with_flag(x, vx << 1, vx >> 7 == 1)
    }

    /// Skip the following instruction if the value of register VX is not equal to the value of register VY
    /// 9XY0 { x: u8, y: u8 },
    fn skip_if_vx_ne_vy(&mut self, x: u8, y: u8) -> Result<(), Error> {
        self.skip_if(self.v[x as usize] != self.v[y as usize])
    }

    /// Store memory address NNN in register I
    /// ANNN { nnn: u16 },
    fn assign_i_nnn(&mut self, nnn: u16) -> Result<(), Error> {
        self.i = nnn & ADDR_MASK;
        Ok(())
    }

    /// Jump to address NNN + V0, wrapped into the address space
    /// BNNN { nnn: u16 },
    fn jump_to_nnn_add_v0(&mut self, nnn: u16) -> Result<(), Error> {
        self.pc = nnn.wrapping_add(self.v[0] as u16) & ADDR_MASK;
        Ok(())
    }

    /// Set VX to a random number with a mask of NN
    /// CXNN { x: u8, nn: u8 },
    fn assign_vx_random_and_nn(&mut self, x: u8, nn: u8) -> Result<(), Error> {
        self.v[x as usize] = self.ctx.gen_random() & nn;
        Ok(())
    }

    /// Draw a sprite at position VX, VY with N bytes of sprite data starting at the address stored in I, Set VF to 01 if any set pixels are changed to unset, and 00 otherwise
    /// DXYN { x: u8, y: u8, n: u8 },
    fn draw_n_at_vx_vy(&mut self, x: u8, y: u8, n: u8) -> Result<(), Error> {
        self.v[VF] = 0;
        let (vx, vy) = (self.v[x as usize] as usize, self.v[y as usize] as usize);
        let mut collision = false;
        for row in 0..n {
            let byte = self.memory.read(self.i.wrapping_add(row as u16));
            for col in byte.view_bits::<Msb0>().iter_ones() {
                collision |= self.frame.toggle_pixel(vx + col, vy + row as usize);
            }
        }
        self.v[VF] = collision as u8;
        self.frame_dirty = true;
        Ok(())
    }

    /// Skip the following instruction if the key corresponding to the hex value currently stored in register VX is pressed
    /// EX9E { x: u8 },
    fn skip_if_vx_in_keys(&mut self, x: u8) -> Result<(), Error> {
        self.skip_if(self.keypad.is_pressed(self.v[x as usize]))
    }

    /// Skip the following instruction if the key corresponding to the hex value currently stored in register VX is not pressed
    /// EXA1 { x: u8 },
    fn skip_if_vx_not_in_keys(&mut self, x: u8) -> Result<(), Error> {
        self.skip_if(!self.keypad.is_pressed(self.v[x as usize]))
    }

    /// Store the current value of the delay timer in register VX
    /// FX07 { x: u8 },
    fn assign_vx_delay_t(&mut self, x: u8) -> Result<(), Error> {
        self.v[x as usize] = self.delay_timer.load();
        Ok(())
    }

    /// Wait for a keypress and store the result in register VX
    ///
    /// Only keys that go down after this instruction count.
    /// FX0A { x: u8 },
    fn assign_vx_wait_for_key(&mut self, x: u8) -> Result<(), Error> {
        self.keypad.clear_newly_pressed();
        self.state = MachineState::WaitingForKey { register: x };
        info!("waiting for key to store in V{:X}", x);
        Ok(())
    }

    /// Set the delay timer to the value of register VX
    /// FX15 { x: u8 },
    fn assign_delay_t_vx(&mut self, x: u8) -> Result<(), Error> {
        self.delay_timer.store(self.v[x as usize]);
        Ok(())
    }

    /// Set the sound timer to the value of register VX
    /// FX18 { x: u8 },
    fn assign_sound_t_vx(&mut self, x: u8) -> Result<(), Error> {
        self.sound_timer.store(self.v[x as usize]);
        Ok(())
    }

    /// Add the value stored in register VX to register I
    /// FX1E { x: u8 },
    fn assign_add_i_vx(&mut self, x: u8) -> Result<(), Error> {
        self.i = self.i.wrapping_add(self.v[x as usize] as u16) & ADDR_MASK;
        Ok(())
    }

    /// Set I to the memory address of the sprite data corresponding to the hexadecimal digit stored in register VX
    /// FX29 { x: u8 },
    fn assign_i_addr_of_sprite_vx(&mut self, x: u8) -> Result<(), Error> {
        let offset = self.v[x as usize] as u16 * GLYPH_HEIGHT;
        self.i = FONT_START.wrapping_add(offset) & ADDR_MASK;
        Ok(())
    }

    /// Store the binary-coded decimal equivalent of the value stored in register VX at addresses I, I+1, and I+2
    /// FX33 { x: u8 },
    fn assign_mem_at_i_bcd_of_vx(&mut self, x: u8) -> Result<(), Error> {
        let value = self.v[x as usize];
        self.memory.write(self.i, value / 100);
        self.memory.write(self.i.wrapping_add(1), (value % 100) / 10);
        self.memory.write(self.i.wrapping_add(2), value % 10);
        Ok(())
    }

    /// Store the values of registers V0 to VX inclusive in memory starting at address I, I is left unchanged
    /// FX55 { x: u8 },
    fn assign_mem_at_i_v0_to_vx(&mut self, x: u8) -> Result<(), Error> {
        for idx in 0..=x {
            self.memory
                .write(self.i.wrapping_add(idx as u16), self.v[idx as usize]);
        }
        Ok(())
    }

    /// Fill registers V0 to VX inclusive with the values stored in memory starting at address I, I is left unchanged
    /// FX65 { x: u8 },
    fn assign_v0_to_vx_mem_at_i(&mut self, x: u8) -> Result<(), Error> {
        for idx in 0..=x {
            self.v[idx as usize] = self.memory.read(self.i.wrapping_add(idx as u16));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::TestingContext;

    pub(super) fn chip_with(prog: &[u8]) -> Plum8<TestingContext> {
        Plum8::load(TestingContext::new(0), prog).unwrap()
    }

    #[test]
    fn starts_at_program() {
        let chip = Plum8::new(TestingContext::new(0));
        assert_eq!(chip.pc, 0x0200u16);
        assert_eq!(chip.i, 0x0000u16);
        assert_eq!(chip.state, MachineState::Running);
        assert!(chip.stack.is_empty());
    }

    #[test]
    fn pc_incrementation() {
        let mut chip = Plum8::new(TestingContext::new(0));
        chip.pc_increment();
        assert_eq!(chip.pc, 0x0202u16);
        chip.pc = 0x0FFEu16;
        chip.pc_increment();
        assert_eq!(chip.pc, 0x0000u16);
    }

    #[test]
    fn load_puts_font_and_program() {
        let chip = chip_with(&[0x60, 0x05, 0x70, 0x03]);
        assert_eq!(chip.memory.slice(0x200, 4), &[0x60, 0x05, 0x70, 0x03]);
        assert_eq!(chip.memory.slice(0x000, 5), &[0xF0, 0x90, 0x90, 0x90, 0xF0]);
    }

    #[test]
    fn load_rejects_too_large_program() {
        let prog = [0u8; 0x1000];
        assert_eq!(
            Plum8::load(TestingContext::new(0), &prog).err(),
            Some(Error::ProgramTooLarge { len: 0x1000, max: 0xE00 }),
        );
    }

    #[test]
    fn add_program() {
        let mut chip = chip_with(&[0x60, 0x05, 0x70, 0x03]);
        chip.step().unwrap();
        chip.step().unwrap();
        assert_eq!(chip.v[0], 8);
        assert_eq!(chip.pc, 0x204);
    }

    #[test]
    fn call_and_return() {
        let mut chip = chip_with(&[0x23, 0x00]);
        chip.memory.write(0x300, 0x00);
        chip.memory.write(0x301, 0xEE);
        chip.step().unwrap();
        assert_eq!(chip.pc, 0x300);
        assert_eq!(chip.stack(), &[0x202]);
        chip.step().unwrap();
        assert_eq!(chip.pc, 0x202);
        assert!(chip.stack().is_empty());
    }

    #[test]
    fn unknown_opcode_halts() {
        let mut chip = chip_with(&[0x0A, 0xAA]);
        let error = Error::UnknownOpcode {
            opcode: 0x0AAA,
            address: 0x200,
        };
        assert_eq!(chip.step(), Err(nb::Error::Other(error)));
        assert_eq!(chip.fault(), Some(error));
        // halted machine keeps reporting the same error
        assert_eq!(chip.step(), Err(nb::Error::Other(error)));
        assert_eq!(chip.cycle(), Err(nb::Error::Other(error)));
    }

    #[test]
    fn malformed_register_opcodes_are_unknown() {
        for &(hi, lo) in &[(0x51u8, 0x21u8), (0x91, 0x2F), (0x81, 0x28), (0xE1, 0x00)] {
            let mut chip = chip_with(&[hi, lo]);
            assert_eq!(
                chip.step(),
                Err(nb::Error::Other(Error::UnknownOpcode {
                    opcode: (hi as u16) << 8 | lo as u16,
                    address: 0x200,
                })),
            );
        }
    }
}
