//! Flat 4 KiB address space of the machine
//!
//! ```text
//! 0x000 +-----------------+
//!       | font glyphs 0-F |  16 x 5 bytes
//! 0x050 +-----------------+
//!       | reserved        |
//! 0x200 +-----------------+
//!       | program         |
//! 0xFFF +-----------------+
//! ```

use log::debug;

use crate::error::Error;

pub const MEM_LENGTH: usize = 4096;
pub const ADDR_MASK: u16 = 0x0FFF;
pub const PROGRAM_START: u16 = 0x200;
pub const MAX_PROGRAM_LENGTH: usize = MEM_LENGTH - PROGRAM_START as usize;
pub const FONT_START: u16 = 0x000;
pub const GLYPH_HEIGHT: u16 = 5;

pub(crate) const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Memory of the machine, every address is wrapped into 12 bits before use
pub struct Memory([u8; MEM_LENGTH]);

impl Memory {
    pub fn new() -> Self {
        Self([0; MEM_LENGTH])
    }

    /// Write built-in hexadecimal glyphs at `FONT_START`
    pub fn load_font(&mut self) {
        let start = FONT_START as usize;
        self.0[start..start + FONT.len()].copy_from_slice(&FONT);
        debug!("font loaded at {:#05X}", FONT_START);
    }

    /// Copy program to memory from 0x200 (_start address)
    ///
    /// Nothing is written if the program does not fit.
    pub fn load_program(&mut self, prog: &[u8]) -> Result<(), Error> {
        if prog.len() > MAX_PROGRAM_LENGTH {
            return Err(Error::ProgramTooLarge {
                len: prog.len(),
                max: MAX_PROGRAM_LENGTH,
            });
        }
        let start = PROGRAM_START as usize;
        self.0[start..start + prog.len()].copy_from_slice(prog);
        debug!("program of {} bytes loaded at {:#05X}", prog.len(), PROGRAM_START);
        Ok(())
    }

    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.0[(addr & ADDR_MASK) as usize]
    }

    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) {
        self.0[(addr & ADDR_MASK) as usize] = value;
    }

    /// Big-endian word at `addr`, the second byte wraps around the address space
    pub fn read_word(&self, addr: u16) -> u16 {
        u16::from(self.read(addr)) << 8 | u16::from(self.read(addr.wrapping_add(1)))
    }

    /// Up to `len` bytes from `addr`, cut short at the end of memory
    pub fn slice(&self, addr: u16, len: usize) -> &[u8] {
        let start = (addr & ADDR_MASK) as usize;
        let end = start.saturating_add(len).min(MEM_LENGTH);
        &self.0[start..end]
    }

    /// View the raw memory
    pub fn as_raw(&self) -> &[u8] {
        &self.0
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
