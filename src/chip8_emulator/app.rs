use std::path::Path;
use std::time::{Duration, Instant};

use crate::chip8_emulator::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::chip8_emulator::cpu::update;
use crate::chip8_emulator::error::Chip8Error;
use crate::chip8_emulator::opcode::OpCode;
use crate::chip8_emulator::peripherals::{
    DisplaySink, NullDisplay, NullSound, Peripherals, SoundSink,
};
use crate::chip8_emulator::settings::Settings;
use crate::chip8_emulator::state::{create_state, EmulatorState};
use crate::chip8_emulator::video::VideoBuffer;

/// Runs `settings.frames` fixed-length frames with no window or audio.
pub fn run_emulator_headless(
    rom_path: &Path,
    settings: Settings,
) -> Result<EmulatorState, Chip8Error> {
    let settings = settings.validate()?;
    let mut state = create_state(Some(rom_path))?;

    let mut display = NullDisplay;
    let mut sound = NullSound;
    let mut peripherals = Peripherals::new(&mut display, &mut sound);
    let frame_seconds = settings.frame_seconds();

    for _ in 0..settings.frames {
        update(
            &mut state,
            &mut peripherals,
            frame_seconds,
            settings.instructions_per_second,
        )
        .map_err(|error| report_fault(&state, error))?;
    }

    Ok(state)
}

fn report_fault(state: &EmulatorState, error: Chip8Error) -> Chip8Error {
    log::error!(
        "halted at pc=0x{:03x} ({}): {error}",
        state.registers.pc,
        OpCode::decode(state.op)
    );
    error
}

/// Holds the most recent frame published by the interpreter.
#[derive(Default)]
struct FrontBuffer {
    frame: VideoBuffer,
}

impl DisplaySink for FrontBuffer {
    fn refresh(&mut self, video: &VideoBuffer) {
        self.frame = *video;
    }
}

/// Stands in for a tone by flashing the window border.
#[derive(Default)]
struct BeepFlash {
    until: Option<Instant>,
}

impl BeepFlash {
    fn is_active(&self, now: Instant) -> bool {
        self.until.is_some_and(|until| now < until)
    }
}

impl SoundSink for BeepFlash {
    fn beep(&mut self, duration_ms: u32) {
        if duration_ms == 0 {
            return;
        }
        self.until = Some(Instant::now() + Duration::from_millis(u64::from(duration_ms)));
    }
}

pub fn run_emulator_app(rom_path: &Path, settings: Settings) -> Result<EmulatorState, Chip8Error> {
    use raylib::prelude::{Color, KeyboardKey, RaylibDraw};

    let settings = settings.validate()?;
    let mut state = create_state(Some(rom_path))?;

    let scale = settings.scale as i32;
    let width = SCREEN_WIDTH as i32 * scale;
    let height = SCREEN_HEIGHT as i32 * scale;
    let (mut rl, thread) = raylib::init()
        .size(width, height)
        .title("chip8-vm")
        .build();
    rl.set_target_fps(settings.frame_rate);

    let key_map = [
        (KeyboardKey::KEY_ONE, 0x1u8),
        (KeyboardKey::KEY_TWO, 0x2),
        (KeyboardKey::KEY_THREE, 0x3),
        (KeyboardKey::KEY_FOUR, 0xC),
        (KeyboardKey::KEY_Q, 0x4),
        (KeyboardKey::KEY_W, 0x5),
        (KeyboardKey::KEY_E, 0x6),
        (KeyboardKey::KEY_R, 0xD),
        (KeyboardKey::KEY_A, 0x7),
        (KeyboardKey::KEY_S, 0x8),
        (KeyboardKey::KEY_D, 0x9),
        (KeyboardKey::KEY_F, 0xE),
        (KeyboardKey::KEY_Z, 0xA),
        (KeyboardKey::KEY_X, 0x0),
        (KeyboardKey::KEY_C, 0xB),
        (KeyboardKey::KEY_V, 0xF),
    ];

    let mut front_buffer = FrontBuffer::default();
    let mut beep_flash = BeepFlash::default();
    let mut previous_tick = Instant::now();

    log::info!(
        "window {width}x{height} at {} fps, {} instructions/s",
        settings.frame_rate,
        settings.instructions_per_second
    );

    while !rl.window_should_close() {
        if rl.is_key_pressed(KeyboardKey::KEY_ESCAPE) {
            break;
        }

        for (key, mapped) in key_map {
            if rl.is_key_pressed(key) {
                state.input.set_key_state(mapped, true);
            }
            if rl.is_key_released(key) {
                state.input.set_key_state(mapped, false);
            }
        }

        let now = Instant::now();
        let frame_dt = (now - previous_tick).as_secs_f64().min(0.1);
        previous_tick = now;

        {
            let mut peripherals = Peripherals::new(&mut front_buffer, &mut beep_flash);
            update(
                &mut state,
                &mut peripherals,
                frame_dt,
                settings.instructions_per_second,
            )
            .map_err(|error| report_fault(&state, error))?;
        }

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        for (x, y) in front_buffer.frame.lit_pixels() {
            d.draw_rectangle(
                x as i32 * scale,
                y as i32 * scale,
                scale,
                scale,
                Color::WHITE,
            );
        }
        if beep_flash.is_active(now) {
            d.draw_rectangle_lines(0, 0, width, height, Color::RED);
        }
    }

    log::info!("window closed");
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn front_buffer_keeps_latest_frame() {
        let mut front = FrontBuffer::default();
        let mut video = VideoBuffer::default();
        video.set(3, 4, true);

        front.refresh(&video);

        assert!(front.frame.get(3, 4));
    }

    #[test]
    fn beep_flash_lasts_for_requested_duration() {
        let mut flash = BeepFlash::default();
        let now = Instant::now();
        assert!(!flash.is_active(now));

        flash.beep(0);
        assert!(flash.until.is_none());

        flash.beep(200);
        assert!(flash.is_active(Instant::now()));
        assert!(!flash.is_active(now + Duration::from_secs(1)));
    }
}
