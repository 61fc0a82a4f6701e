use crate::chip8_emulator::config::{FLAG_REGISTER, PROGRAM_START, REGISTER_COUNT, STACK_DEPTH};
use crate::chip8_emulator::error::Chip8Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registers {
    pub v: [u8; REGISTER_COUNT],
    pub index: u16,
    pub pc: usize,
    stack: [u16; STACK_DEPTH],
    sp: usize,
}

impl Default for Registers {
    fn default() -> Self {
        Self {
            v: [0; REGISTER_COUNT],
            index: 0,
            pc: PROGRAM_START,
            stack: [0; STACK_DEPTH],
            sp: 0,
        }
    }
}

impl Registers {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_flag(&mut self, set: bool) {
        self.v[FLAG_REGISTER] = u8::from(set);
    }

    pub fn stack_depth(&self) -> usize {
        self.sp
    }

    pub fn stack(&self) -> &[u16] {
        &self.stack[..self.sp]
    }

    pub fn push(&mut self, address: u16) -> Result<(), Chip8Error> {
        if self.sp >= STACK_DEPTH {
            return Err(Chip8Error::StackOverflow);
        }
        self.stack[self.sp] = address;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, Chip8Error> {
        if self.sp == 0 {
            return Err(Chip8Error::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.stack[self.sp])
    }

    pub fn skip_next(&mut self) {
        self.pc += 2;
    }
}
