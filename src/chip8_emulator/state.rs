use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::chip8_emulator::clock::Clock;
use crate::chip8_emulator::config::PROGRAM_START;
use crate::chip8_emulator::error::Chip8Error;
use crate::chip8_emulator::input::InputLatch;
use crate::chip8_emulator::memory::Memory;
use crate::chip8_emulator::registers::Registers;
use crate::chip8_emulator::video::VideoBuffer;

/// Everything one emulator session owns. Instruction handlers receive it by
/// exclusive reference.
#[derive(Debug, Clone, Default)]
pub struct EmulatorState {
    pub memory: Memory,
    pub registers: Registers,
    pub video: VideoBuffer,
    pub clock: Clock,
    pub input: InputLatch,
    /// Last executed instruction word.
    pub op: u16,
    pub rom_path: Option<PathBuf>,
}

pub fn create_state(rom_path: Option<&Path>) -> Result<EmulatorState, Chip8Error> {
    let mut state = EmulatorState::default();
    reset_state(&mut state, rom_path)?;
    Ok(state)
}

/// Returns the session to power-on state, reloading the ROM it was last
/// loaded from (or `rom_path`, if given). `rom_path` is only remembered once
/// it has loaded.
pub fn reset_state(state: &mut EmulatorState, rom_path: Option<&Path>) -> Result<(), Chip8Error> {
    state.input.release_all();

    let path = rom_path
        .map(Path::to_path_buf)
        .or_else(|| state.rom_path.clone());

    match path {
        Some(path) => load_rom(state, &path),
        None => {
            reset_machine(state);
            state.memory.reset();
            log::info!("session reset without ROM");
            Ok(())
        }
    }
}

fn reset_machine(state: &mut EmulatorState) {
    state.registers.reset();
    state.video.reset();
    state.clock.reset();
    state.op = 0;
}

pub fn clear_display(state: &mut EmulatorState) {
    state.video.reset();
}

pub fn load_rom(state: &mut EmulatorState, path: &Path) -> Result<(), Chip8Error> {
    let rom_bytes = fs::read(path).map_err(Chip8Error::unreadable_rom)?;
    load_rom_bytes(state, &rom_bytes)?;
    state.rom_path = Some(path.to_path_buf());
    Ok(())
}

pub fn load_rom_from_reader(
    state: &mut EmulatorState,
    mut reader: impl Read,
) -> Result<(), Chip8Error> {
    let mut rom_bytes = Vec::new();
    reader
        .read_to_end(&mut rom_bytes)
        .map_err(Chip8Error::unreadable_rom)?;
    load_rom_bytes(state, &rom_bytes)
}

/// Resets memory, registers, video and clock, then copies `rom_bytes` to
/// 0x200. Nothing is touched if the program is rejected.
pub fn load_rom_bytes(state: &mut EmulatorState, rom_bytes: &[u8]) -> Result<(), Chip8Error> {
    state.memory.load_program(rom_bytes)?;
    reset_machine(state);

    log::info!(
        "loaded {} byte ROM into 0x{:03x}..0x{:03x}",
        rom_bytes.len(),
        PROGRAM_START,
        PROGRAM_START + rom_bytes.len()
    );
    Ok(())
}
