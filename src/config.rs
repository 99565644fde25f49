use std::time::Duration;

/// One simulation frame at the 60 FPS target.
pub const FRAME_TIME: Duration = Duration::from_millis(1000 / 60);

/// Playfield dimensions in arena pixels. There is no global screen size;
/// whoever needs bounds gets handed one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arena {
    pub width: i32,
    pub height: i32,
}

impl Arena {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(800, 600)
    }
}
