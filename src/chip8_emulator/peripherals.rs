use crate::chip8_emulator::video::VideoBuffer;

/// Receives the frame whenever the interpreter changes it.
pub trait DisplaySink {
    fn refresh(&mut self, video: &VideoBuffer);
}

/// Plays a tone for the requested duration. Fire-and-forget.
pub trait SoundSink {
    fn beep(&mut self, duration_ms: u32);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullDisplay;

impl DisplaySink for NullDisplay {
    fn refresh(&mut self, _video: &VideoBuffer) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullSound;

impl SoundSink for NullSound {
    fn beep(&mut self, _duration_ms: u32) {}
}

/// The collaborators an instruction may talk to, borrowed for one update.
pub struct Peripherals<'a> {
    pub display: &'a mut dyn DisplaySink,
    pub sound: &'a mut dyn SoundSink,
}

impl<'a> Peripherals<'a> {
    pub fn new(display: &'a mut dyn DisplaySink, sound: &'a mut dyn SoundSink) -> Self {
        Self { display, sound }
    }
}
