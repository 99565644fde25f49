use std::time::Instant;

/// Monotonic millisecond counter for the shell. The simulation never reads
/// time itself; the shell samples this once per frame and passes the stamp
/// down, which is also what lets tests drive timers with plain numbers.
#[derive(Debug, Clone)]
pub struct GameClock {
    origin: Instant,
}

impl GameClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}
