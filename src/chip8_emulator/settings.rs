use std::env;

use crate::chip8_emulator::error::Chip8Error;

pub const SPEED_ENV_VAR: &str = "CHIP8_IPS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub instructions_per_second: u32,
    pub frame_rate: u32,
    pub scale: u32,
    /// Number of host frames a headless run lasts.
    pub frames: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            instructions_per_second: 700,
            frame_rate: 60,
            scale: 12,
            frames: 600,
        }
    }
}

impl Settings {
    pub fn validate(self) -> Result<Self, Chip8Error> {
        if self.instructions_per_second == 0 {
            return Err(Chip8Error::InvalidArgument("ips must be > 0"));
        }
        if self.frame_rate == 0 {
            return Err(Chip8Error::InvalidArgument("fps must be > 0"));
        }
        if self.scale == 0 {
            return Err(Chip8Error::InvalidArgument("scale must be > 0"));
        }
        if self.frames == 0 {
            return Err(Chip8Error::InvalidArgument("frames must be > 0"));
        }
        Ok(self)
    }

    pub fn frame_seconds(&self) -> f64 {
        1.0 / f64::from(self.frame_rate.max(1))
    }
}

pub fn parse_speed(text: &str) -> Result<u32, String> {
    match text.trim().parse::<u32>() {
        Ok(speed) if speed > 0 => Ok(speed),
        _ => Err(format!(
            "invalid instruction rate '{}', expected a positive integer",
            text.trim()
        )),
    }
}

/// Reads the instruction rate from `CHIP8_IPS`, if set.
pub fn load_speed_from_env() -> Result<Option<u32>, String> {
    match env::var(SPEED_ENV_VAR) {
        Ok(value) => parse_speed(&value)
            .map(Some)
            .map_err(|error| format!("{SPEED_ENV_VAR}: {error}")),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn zero_values_are_rejected() {
        let settings = Settings {
            instructions_per_second: 0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(Chip8Error::InvalidArgument(_))
        ));

        let settings = Settings {
            frames: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn parses_speed() {
        assert_eq!(parse_speed(" 500 "), Ok(500));
        assert!(parse_speed("0").is_err());
        assert!(parse_speed("fast").is_err());
    }
}
