use std::fmt::{Display, Formatter};

/// One fetched instruction word split into its addressing fields.
///
/// Decoding is pure: every 16-bit word yields a value, whether or not the
/// interpreter knows how to execute it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpCode {
    pub raw: u16,
    /// Top nibble, selects the instruction family.
    pub set: u8,
    pub x: usize,
    pub y: usize,
    pub n: u8,
    pub nn: u8,
    pub nnn: u16,
}

impl OpCode {
    pub fn decode(word: u16) -> Self {
        Self {
            raw: word,
            set: (word >> 12) as u8,
            x: ((word & 0x0F00) >> 8) as usize,
            y: ((word & 0x00F0) >> 4) as usize,
            n: (word & 0x000F) as u8,
            nn: (word & 0x00FF) as u8,
            nnn: word & 0x0FFF,
        }
    }

    pub fn from_bytes(high: u8, low: u8) -> Self {
        Self::decode(u16::from_be_bytes([high, low]))
    }
}

impl Display for OpCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (x, y, n, nn, nnn) = (self.x, self.y, self.n, self.nn, self.nnn);

        match (self.set, nn, n) {
            (0x0, 0xE0, _) => write!(f, "CLS"),
            (0x0, 0xEE, _) => write!(f, "RET"),
            (0x1, _, _) => write!(f, "JP 0x{nnn:03X}"),
            (0x2, _, _) => write!(f, "CALL 0x{nnn:03X}"),
            (0x3, _, _) => write!(f, "SE V{x:X}, 0x{nn:02X}"),
            (0x4, _, _) => write!(f, "SNE V{x:X}, 0x{nn:02X}"),
            (0x5, _, 0x0) => write!(f, "SE V{x:X}, V{y:X}"),
            (0x6, _, _) => write!(f, "LD V{x:X}, 0x{nn:02X}"),
            (0x7, _, _) => write!(f, "ADD V{x:X}, 0x{nn:02X}"),
            (0x8, _, 0x0) => write!(f, "LD V{x:X}, V{y:X}"),
            (0x8, _, 0x1) => write!(f, "OR V{x:X}, V{y:X}"),
            (0x8, _, 0x2) => write!(f, "AND V{x:X}, V{y:X}"),
            (0x8, _, 0x3) => write!(f, "XOR V{x:X}, V{y:X}"),
            (0x8, _, 0x4) => write!(f, "ADD V{x:X}, V{y:X}"),
            (0x8, _, 0x5) => write!(f, "SUB V{x:X}, V{y:X}"),
            (0x8, _, 0x6) => write!(f, "SHR V{x:X}"),
            (0x8, _, 0x7) => write!(f, "SUBN V{x:X}, V{y:X}"),
            (0x8, _, 0xE) => write!(f, "SHL V{x:X}"),
            (0x9, _, 0x0) => write!(f, "SNE V{x:X}, V{y:X}"),
            (0xA, _, _) => write!(f, "LD I, 0x{nnn:03X}"),
            (0xB, _, _) => write!(f, "JP V0, 0x{nnn:03X}"),
            (0xC, _, _) => write!(f, "RND V{x:X}, 0x{nn:02X}"),
            (0xD, _, _) => write!(f, "DRW V{x:X}, V{y:X}, {n}"),
            (0xE, 0x9E, _) => write!(f, "SKP V{x:X}"),
            (0xE, 0xA1, _) => write!(f, "SKNP V{x:X}"),
            (0xF, 0x07, _) => write!(f, "LD V{x:X}, DT"),
            (0xF, 0x0A, _) => write!(f, "LD V{x:X}, K"),
            (0xF, 0x15, _) => write!(f, "LD DT, V{x:X}"),
            (0xF, 0x18, _) => write!(f, "SND V{x:X}"),
            (0xF, 0x1E, _) => write!(f, "ADD I, V{x:X}"),
            (0xF, 0x29, _) => write!(f, "LD F, V{x:X}"),
            (0xF, 0x33, _) => write!(f, "LD B, V{x:X}"),
            (0xF, 0x55, _) => write!(f, "LD [I], V{x:X}"),
            (0xF, 0x65, _) => write!(f, "LD V{x:X}, [I]"),
            _ => write!(f, "DW 0x{:04X}", self.raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::OpCode;

    #[test]
    fn decode_splits_every_field() {
        let op = OpCode::decode(0xABCD);

        assert_eq!(op.set, 0xA);
        assert_eq!(op.x, 0xB);
        assert_eq!(op.y, 0xC);
        assert_eq!(op.n, 0xD);
        assert_eq!(op.nn, 0xCD);
        assert_eq!(op.nnn, 0xBCD);
    }

    #[test]
    fn fields_reassemble_into_original_word() {
        for word in (0..=u16::MAX).step_by(97) {
            let op = OpCode::decode(word);
            let rebuilt = ((op.set as u16) << 12)
                | ((op.x as u16) << 8)
                | ((op.y as u16) << 4)
                | op.n as u16;
            assert_eq!(rebuilt, word);
            assert_eq!(op.set as u16, word >> 12);
        }
    }

    #[test]
    fn from_bytes_is_big_endian() {
        assert_eq!(OpCode::from_bytes(0x6A, 0x3C).raw, 0x6A3C);
    }

    #[test]
    fn formats_mnemonics() {
        assert_eq!(OpCode::decode(0x00E0).to_string(), "CLS");
        assert_eq!(OpCode::decode(0x6A3C).to_string(), "LD VA, 0x3C");
        assert_eq!(OpCode::decode(0xD015).to_string(), "DRW V0, V1, 5");
        assert_eq!(OpCode::decode(0xF233).to_string(), "LD B, V2");
        assert_eq!(OpCode::decode(0x0123).to_string(), "DW 0x0123");
    }
}
