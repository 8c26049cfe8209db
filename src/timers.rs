/// # Timers
///
/// The delay and sound counters. Both are decremented together exactly once
/// per executed instruction and saturate at zero until rewritten.
///
/// The delay timer is freely readable and writable by programs (FX07/FX15);
/// the sound timer is program-writable (FX18) and exposed read-only so an
/// external audio collaborator can poll it.
pub struct Timers {
    pub(crate) delay: u8,
    pub(crate) sound: u8,
}

impl Timers {
    pub fn new() -> Self {
        Timers { delay: 0, sound: 0 }
    }

    /// Decrement both counters, flooring at zero.
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }
}

impl Default for Timers {
    fn default() -> Self {
        Self::new()
    }
}
