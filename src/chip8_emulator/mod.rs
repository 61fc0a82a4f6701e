pub mod app;
pub mod clock;
pub mod config;
pub mod cpu;
pub mod error;
pub mod input;
pub mod memory;
pub mod opcode;
pub mod peripherals;
pub mod registers;
pub mod settings;
pub mod state;
pub mod video;
