pub mod chip8_emulator;

pub use chip8_emulator::app::{run_emulator_app, run_emulator_headless};
pub use chip8_emulator::clock::Clock;
pub use chip8_emulator::cpu::{execute_cycle, execute_opcode, update};
pub use chip8_emulator::error::Chip8Error;
pub use chip8_emulator::input::InputLatch;
pub use chip8_emulator::memory::Memory;
pub use chip8_emulator::opcode::OpCode;
pub use chip8_emulator::peripherals::{
    DisplaySink, NullDisplay, NullSound, Peripherals, SoundSink,
};
pub use chip8_emulator::registers::Registers;
pub use chip8_emulator::settings::{load_speed_from_env, parse_speed, Settings};
pub use chip8_emulator::state::{
    clear_display, create_state, load_rom, load_rom_bytes, load_rom_from_reader, reset_state,
    EmulatorState,
};
pub use chip8_emulator::video::VideoBuffer;
