use crate::chip8_emulator::config::TIMER_HZ;

const TIMER_INTERVAL: f64 = 1.0 / TIMER_HZ;

// Fraction of an interval forgiven as float drift, so that e.g. sixty 1/60s
// slices count as sixty ticks at any rate.
const DRIFT_TOLERANCE: f64 = 1e-6;

fn is_due(accumulated: f64, interval: f64) -> bool {
    accumulated >= interval * (1.0 - DRIFT_TOLERANCE)
}

/// Two independent time accumulators: one paces instruction execution at a
/// host-chosen rate, the other counts the delay register down at 60Hz.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clock {
    instruction_accumulator: f64,
    timer_accumulator: f64,
    pub delay: u8,
}

impl Clock {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn instruction_interval(instructions_per_second: u32) -> f64 {
        1.0 / f64::from(instructions_per_second.max(1))
    }

    pub fn accumulate_instructions(&mut self, elapsed_seconds: f64) {
        self.instruction_accumulator += sanitize(elapsed_seconds);
    }

    /// Consumes one instruction slot if one is due.
    pub fn take_instruction(&mut self, interval: f64) -> bool {
        if !is_due(self.instruction_accumulator, interval) {
            return false;
        }
        self.instruction_accumulator -= interval;
        true
    }

    /// Advances the 60Hz accumulator and returns how many ticks elapsed.
    pub fn advance_timer(&mut self, elapsed_seconds: f64) -> u32 {
        self.timer_accumulator += sanitize(elapsed_seconds);

        let mut ticks = 0;
        while is_due(self.timer_accumulator, TIMER_INTERVAL) {
            self.timer_accumulator -= TIMER_INTERVAL;
            self.delay = self.delay.saturating_sub(1);
            ticks += 1;
        }
        ticks
    }
}

fn sanitize(elapsed_seconds: f64) -> f64 {
    if elapsed_seconds.is_finite() && elapsed_seconds >= 0.0 {
        elapsed_seconds
    } else {
        log::warn!("ignoring elapsed time {elapsed_seconds}");
        0.0
    }
}
