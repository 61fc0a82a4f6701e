use chip8_vm::{create_state, reset_state, run_emulator_headless, Chip8Error, Settings};

fn rom_file(bytes: &[u8]) -> tempfile::NamedTempFile {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), bytes).unwrap();
    tmp
}

fn short_run() -> Settings {
    Settings {
        frames: 10,
        ..Settings::default()
    }
}

#[test]
fn glyph_rom_draws_pixels_and_spins() {
    // LD V0, 5; LD F, V0; DRW V0, V1, 5; JP 0x206
    let tmp = rom_file(&[0x60, 0x05, 0xF0, 0x29, 0xD0, 0x15, 0x12, 0x06]);

    let state = run_emulator_headless(tmp.path(), short_run()).unwrap();

    assert!(
        state.video.lit_count() > 0,
        "expected the glyph ROM to draw at least one lit pixel"
    );
    assert_eq!(state.registers.pc, 0x206);
    assert_eq!(state.rom_path.as_deref(), Some(tmp.path()));
}

#[test]
fn empty_rom_is_rejected() {
    let tmp = rom_file(&[]);

    let result = run_emulator_headless(tmp.path(), short_run());

    assert!(matches!(
        result,
        Err(Chip8Error::InvalidRom { source: None, .. })
    ));
}

#[test]
fn missing_rom_is_invalid_and_keeps_the_io_cause() {
    let dir = tempfile::tempdir().unwrap();

    let error = run_emulator_headless(&dir.path().join("missing.ch8"), short_run()).unwrap_err();

    match &error {
        Chip8Error::InvalidRom {
            source: Some(cause),
            ..
        } => assert_eq!(cause.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected InvalidRom with an io cause, got {other:?}"),
    }
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn invalid_settings_are_rejected() {
    let tmp = rom_file(&[0x12, 0x00]);
    let settings = Settings {
        frame_rate: 0,
        ..Settings::default()
    };

    let result = run_emulator_headless(tmp.path(), settings);

    assert!(matches!(result, Err(Chip8Error::InvalidArgument(_))));
}

#[test]
fn headless_propagates_interpreter_faults() {
    // CALL 0x200 forever
    let tmp = rom_file(&[0x22, 0x00]);

    let result = run_emulator_headless(tmp.path(), short_run());

    assert!(matches!(result, Err(Chip8Error::StackOverflow)));
}

#[test]
fn reset_reloads_rom_from_its_path() {
    let tmp = rom_file(&[0x6A, 0x3C]);
    let mut state = create_state(Some(tmp.path())).unwrap();
    state.memory[0x200] = 0x00;
    state.registers.v[0xA] = 9;
    state.registers.pc = 0x300;
    state.input.set_key_down(0x1);

    reset_state(&mut state, None).unwrap();

    assert_eq!(state.memory[0x200], 0x6A);
    assert_eq!(state.registers.v[0xA], 0);
    assert_eq!(state.registers.pc, 0x200);
    assert!(!state.input.is_any_key_pressed());
}
