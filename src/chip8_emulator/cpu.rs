use rand::random;

use crate::chip8_emulator::clock::Clock;
use crate::chip8_emulator::config::{FONT_GLYPH_SIZE, MEMORY_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::chip8_emulator::error::Chip8Error;
use crate::chip8_emulator::opcode::OpCode;
use crate::chip8_emulator::peripherals::Peripherals;
use crate::chip8_emulator::state::{clear_display, EmulatorState};

/// Feeds `elapsed_seconds` into both clocks: runs every instruction that
/// became due at `instructions_per_second`, then applies due 60Hz ticks.
pub fn update(
    state: &mut EmulatorState,
    peripherals: &mut Peripherals<'_>,
    elapsed_seconds: f64,
    instructions_per_second: u32,
) -> Result<(), Chip8Error> {
    let interval = Clock::instruction_interval(instructions_per_second);
    state.clock.accumulate_instructions(elapsed_seconds);

    while state.clock.take_instruction(interval) {
        execute_cycle(state, peripherals)?;
    }

    state.clock.advance_timer(elapsed_seconds);
    Ok(())
}

/// Fetches, decodes and executes the instruction at PC. On failure PC is left
/// pointing at the faulting instruction.
pub fn execute_cycle(
    state: &mut EmulatorState,
    peripherals: &mut Peripherals<'_>,
) -> Result<(), Chip8Error> {
    let pc = state.registers.pc;
    if pc > (MEMORY_SIZE - 2) {
        return Err(Chip8Error::ProgramCounterOutOfBounds(pc));
    }

    let opcode = OpCode::from_bytes(state.memory[pc], state.memory[pc + 1]);
    state.registers.pc += 2;
    log::trace!("{pc:03x}: {:04x} {opcode}", opcode.raw);

    dispatch(state, peripherals, opcode).map_err(|error| {
        state.registers.pc = pc;
        error
    })
}

/// Executes one already-fetched instruction word against `state`.
pub fn execute_opcode(
    state: &mut EmulatorState,
    peripherals: &mut Peripherals<'_>,
    word: u16,
) -> Result<(), Chip8Error> {
    dispatch(state, peripherals, OpCode::decode(word))
}

fn dispatch(
    state: &mut EmulatorState,
    peripherals: &mut Peripherals<'_>,
    op: OpCode,
) -> Result<(), Chip8Error> {
    state.op = op.raw;
    let registers = &mut state.registers;

    match op.set {
        0x0 => handle_family_0(state, peripherals, op),
        0x1 => {
            registers.pc = op.nnn as usize;
            Ok(())
        }
        0x2 => {
            registers.push(registers.pc as u16)?;
            registers.pc = op.nnn as usize;
            log::debug!("call 0x{:03x}, stack depth {}", op.nnn, registers.stack_depth());
            Ok(())
        }
        0x3 => {
            if registers.v[op.x] == op.nn {
                registers.skip_next();
            }
            Ok(())
        }
        0x4 => {
            if registers.v[op.x] != op.nn {
                registers.skip_next();
            }
            Ok(())
        }
        0x5 if op.n == 0 => {
            if registers.v[op.x] == registers.v[op.y] {
                registers.skip_next();
            }
            Ok(())
        }
        0x6 => {
            registers.v[op.x] = op.nn;
            Ok(())
        }
        0x7 => {
            registers.v[op.x] = registers.v[op.x].wrapping_add(op.nn);
            Ok(())
        }
        0x8 => handle_family_8(state, op),
        0x9 if op.n == 0 => {
            if registers.v[op.x] != registers.v[op.y] {
                registers.skip_next();
            }
            Ok(())
        }
        0xA => {
            registers.index = op.nnn;
            Ok(())
        }
        0xB => {
            registers.pc = (op.nnn as usize + registers.v[0] as usize) & 0x0FFF;
            Ok(())
        }
        0xC => {
            registers.v[op.x] = random::<u8>() & op.nn;
            Ok(())
        }
        0xD => {
            handle_opcode_dxyn_draw(state, peripherals, op);
            Ok(())
        }
        0xE => handle_family_e(state, op),
        0xF => handle_family_f(state, peripherals, op),
        _ => Err(unimplemented(op)),
    }
}

fn unimplemented(op: OpCode) -> Chip8Error {
    let sub = match op.set {
        0x0 | 0xE | 0xF => Some(op.nn),
        0x8 => Some(op.n),
        _ => None,
    };
    Chip8Error::UnimplementedOpcode {
        opcode: op.raw,
        set: op.set,
        sub,
    }
}

fn handle_family_0(
    state: &mut EmulatorState,
    peripherals: &mut Peripherals<'_>,
    op: OpCode,
) -> Result<(), Chip8Error> {
    match op.raw {
        0x00E0 => {
            clear_display(state);
            peripherals.display.refresh(&state.video);
            Ok(())
        }
        0x00EE => {
            let ret = state.registers.pop()?;
            state.registers.pc = ret as usize;
            log::debug!(
                "return to 0x{ret:03x}, stack depth {}",
                state.registers.stack_depth()
            );
            Ok(())
        }
        _ => Err(unimplemented(op)),
    }
}

fn handle_family_8(state: &mut EmulatorState, op: OpCode) -> Result<(), Chip8Error> {
    let registers = &mut state.registers;
    let vx = registers.v[op.x];
    let vy = registers.v[op.y];

    match op.n {
        0x0 => registers.v[op.x] = vy,
        0x1 => registers.v[op.x] = vx | vy,
        0x2 => registers.v[op.x] = vx & vy,
        0x3 => registers.v[op.x] = vx ^ vy,
        // VF is written last so the flag survives when X is 0xF.
        0x4 => {
            let (result, carry) = vx.overflowing_add(vy);
            registers.v[op.x] = result;
            registers.set_flag(carry);
        }
        0x5 => {
            registers.v[op.x] = vx.wrapping_sub(vy);
            registers.set_flag(vx > vy);
        }
        0x6 => {
            registers.v[op.x] = vx >> 1;
            registers.set_flag(vx & 0x1 == 1);
        }
        0x7 => {
            registers.v[op.x] = vy.wrapping_sub(vx);
            registers.set_flag(vy > vx);
        }
        0xE => {
            registers.v[op.x] = vx << 1;
            registers.set_flag(vx & 0x80 != 0);
        }
        _ => return Err(unimplemented(op)),
    }

    Ok(())
}

/// XORs an 8xN sprite from memory at I onto the screen at (VX, VY), wrapping
/// at the screen edges. VF is 1 if any lit pixel was hit by a set sprite bit.
fn handle_opcode_dxyn_draw(
    state: &mut EmulatorState,
    peripherals: &mut Peripherals<'_>,
    op: OpCode,
) {
    let x_start = state.registers.v[op.x] as usize;
    let y_start = state.registers.v[op.y] as usize;
    let base = state.registers.index as usize;

    let mut collision = false;
    let mut changed = false;

    for row in 0..op.n as usize {
        let y_pos = (y_start + row) % SCREEN_HEIGHT;
        let sprite_row = state.memory[base + row];

        for bit in 0..8 {
            if (sprite_row >> (7 - bit)) & 0x1 == 0 {
                continue;
            }

            let x_pos = (x_start + bit) % SCREEN_WIDTH;
            let old = state.video.get(x_pos, y_pos);
            collision |= old;
            state.video.set(x_pos, y_pos, !old);
            changed = true;
        }
    }

    state.registers.set_flag(collision);

    if changed {
        peripherals.display.refresh(&state.video);
    }
}

fn handle_family_e(state: &mut EmulatorState, op: OpCode) -> Result<(), Chip8Error> {
    let pressed = state.input.is_key_pressed(state.registers.v[op.x]);

    match op.nn {
        0x9E => {
            if pressed {
                state.registers.skip_next();
            }
            Ok(())
        }
        0xA1 => {
            if !pressed {
                state.registers.skip_next();
            }
            Ok(())
        }
        _ => Err(unimplemented(op)),
    }
}

fn handle_family_f(
    state: &mut EmulatorState,
    peripherals: &mut Peripherals<'_>,
    op: OpCode,
) -> Result<(), Chip8Error> {
    let x_reg = op.x;
    let index = state.registers.index as usize;

    match op.nn {
        0x07 => {
            state.registers.v[x_reg] = state.clock.delay;
        }
        0x0A => match state.input.most_recently_pressed() {
            Some(key) => state.registers.v[x_reg] = key,
            None => {
                // Re-run this instruction on the next tick until a key is down.
                state.registers.pc = state.registers.pc.saturating_sub(2);
                log::trace!("waiting for key into V{x_reg:X}");
            }
        },
        0x15 => {
            state.clock.delay = state.registers.v[x_reg];
        }
        0x18 => {
            let duration_ms = u32::from(state.registers.v[x_reg]);
            log::debug!("beep for {duration_ms}ms");
            peripherals.sound.beep(duration_ms);
        }
        0x1E => {
            state.registers.index = state
                .registers
                .index
                .wrapping_add(u16::from(state.registers.v[x_reg]));
        }
        0x29 => {
            state.registers.index = u16::from(state.registers.v[x_reg]) * FONT_GLYPH_SIZE as u16;
        }
        0x33 => {
            let value = state.registers.v[x_reg];
            state.memory[index] = value / 100;
            state.memory[index + 1] = (value / 10) % 10;
            state.memory[index + 2] = value % 10;
        }
        0x55 => {
            for offset in 0..=x_reg {
                state.memory[index + offset] = state.registers.v[offset];
            }
        }
        0x65 => {
            for offset in 0..=x_reg {
                state.registers.v[offset] = state.memory[index + offset];
            }
        }
        _ => return Err(unimplemented(op)),
    }

    Ok(())
}
