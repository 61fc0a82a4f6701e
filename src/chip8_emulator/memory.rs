use crate::chip8_emulator::config::{FONT_BYTES, MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START};
use crate::chip8_emulator::error::Chip8Error;

/// The 4 KiB address space. Addresses wrap at 0x1000.
#[derive(Debug, Clone)]
pub struct Memory {
    data: [u8; MEMORY_SIZE],
}

impl Default for Memory {
    fn default() -> Self {
        let mut memory = Self {
            data: [0; MEMORY_SIZE],
        };
        memory.reset();
        memory
    }
}

impl Memory {
    pub fn read(&self, address: usize) -> u8 {
        self.data[address % MEMORY_SIZE]
    }

    pub fn write(&mut self, address: usize, value: u8) {
        self.data[address % MEMORY_SIZE] = value;
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Zeroes everything and reinstalls the font glyphs at address 0.
    pub fn reset(&mut self) {
        self.data = [0; MEMORY_SIZE];
        self.data[..FONT_BYTES.len()].copy_from_slice(&FONT_BYTES);
    }

    pub fn load_program(&mut self, program: &[u8]) -> Result<(), Chip8Error> {
        if program.is_empty() {
            return Err(Chip8Error::InvalidRom {
                reason: "program is empty",
                source: None,
            });
        }
        if program.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: program.len(),
                max: MAX_ROM_SIZE,
            });
        }

        self.reset();
        self.data[PROGRAM_START..PROGRAM_START + program.len()].copy_from_slice(program);
        Ok(())
    }
}

impl std::ops::Index<usize> for Memory {
    type Output = u8;

    fn index(&self, address: usize) -> &u8 {
        &self.data[address % MEMORY_SIZE]
    }
}

impl std::ops::IndexMut<usize> for Memory {
    fn index_mut(&mut self, address: usize) -> &mut u8 {
        &mut self.data[address % MEMORY_SIZE]
    }
}
