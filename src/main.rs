use std::path::PathBuf;

use clap::Parser;

use chip8_vm::{load_speed_from_env, run_emulator_app, run_emulator_headless, Chip8Error, Settings};

#[derive(Debug, Parser)]
#[command(name = "chip8-vm")]
#[command(about = "Run a CHIP-8 ROM")]
struct Args {
    rom: PathBuf,

    /// Instructions per second; falls back to CHIP8_IPS, then 700.
    #[arg(long)]
    ips: Option<u32>,

    #[arg(long, default_value_t = 60)]
    fps: u32,

    #[arg(long, default_value_t = 12)]
    scale: u32,

    #[arg(long, default_value_t = 600)]
    frames: u32,

    #[arg(long)]
    headless: bool,
}

fn main() -> Result<(), Chip8Error> {
    env_logger::init();
    let args = Args::parse();

    let env_speed = load_speed_from_env().map_err(|error| {
        log::error!("{error}");
        Chip8Error::InvalidArgument("CHIP8_IPS must be a positive integer")
    })?;

    let settings = Settings {
        instructions_per_second: args
            .ips
            .or(env_speed)
            .unwrap_or(Settings::default().instructions_per_second),
        frame_rate: args.fps,
        scale: args.scale,
        frames: args.frames,
    };

    if args.headless {
        let state = run_emulator_headless(&args.rom, settings)?;
        println!(
            "headless finished: pc=0x{:03x} lit_pixels={}",
            state.registers.pc,
            state.video.lit_count()
        );
        return Ok(());
    }

    let _state = run_emulator_app(&args.rom, settings)?;
    Ok(())
}
