use crate::chip8_emulator::config::KEY_COUNT;

/// Pressed keys in press order; the last entry is the most recent press.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputLatch {
    pressed: Vec<u8>,
}

impl InputLatch {
    pub fn set_key_down(&mut self, key: u8) {
        if usize::from(key) >= KEY_COUNT {
            log::warn!("ignoring key down for out-of-range key 0x{key:x}");
            return;
        }
        self.pressed.retain(|pressed| *pressed != key);
        self.pressed.push(key);
    }

    pub fn set_key_up(&mut self, key: u8) {
        self.pressed.retain(|pressed| *pressed != key);
    }

    pub fn set_key_state(&mut self, key: u8, is_pressed: bool) {
        if is_pressed {
            self.set_key_down(key);
        } else {
            self.set_key_up(key);
        }
    }

    pub fn is_key_pressed(&self, key: u8) -> bool {
        self.pressed.contains(&key)
    }

    pub fn is_any_key_pressed(&self) -> bool {
        !self.pressed.is_empty()
    }

    pub fn most_recently_pressed(&self) -> Option<u8> {
        self.pressed.last().copied()
    }

    pub fn release_all(&mut self) {
        self.pressed.clear();
    }
}
