use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum Chip8Error {
    InvalidRom {
        reason: &'static str,
        source: Option<std::io::Error>,
    },
    RomTooLarge { size: usize, max: usize },
    ProgramCounterOutOfBounds(usize),
    UnimplementedOpcode {
        opcode: u16,
        set: u8,
        sub: Option<u8>,
    },
    StackOverflow,
    StackUnderflow,
    InvalidArgument(&'static str),
}

impl Display for Chip8Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRom {
                reason,
                source: Some(error),
            } => write!(f, "invalid ROM: {reason}: {error}"),
            Self::InvalidRom { reason, .. } => write!(f, "invalid ROM: {reason}"),
            Self::RomTooLarge { size, max } => {
                write!(f, "ROM too large: {size} bytes (max {max})")
            }
            Self::ProgramCounterOutOfBounds(pc) => {
                write!(f, "program counter exceeded program memory: 0x{pc:03x}")
            }
            Self::UnimplementedOpcode { opcode, set, sub } => match sub {
                Some(sub) => write!(
                    f,
                    "unimplemented opcode 0x{opcode:04x} (family 0x{set:x}, selector 0x{sub:02x})"
                ),
                None => write!(f, "unimplemented opcode 0x{opcode:04x} (family 0x{set:x})"),
            },
            Self::StackOverflow => write!(f, "call instruction with full stack"),
            Self::StackUnderflow => write!(f, "return instruction with empty stack"),
            Self::InvalidArgument(argument) => write!(f, "invalid argument: {argument}"),
        }
    }
}

impl std::error::Error for Chip8Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidRom {
                source: Some(error),
                ..
            } => Some(error),
            _ => None,
        }
    }
}

impl Chip8Error {
    pub(crate) fn unreadable_rom(error: std::io::Error) -> Self {
        Self::InvalidRom {
            reason: "program source is unreadable",
            source: Some(error),
        }
    }
}
