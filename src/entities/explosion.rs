use rand::Rng;

/// Milliseconds per animation frame.
const FRAME_INTERVAL_MS: u64 = 50;

/// Timed animation entity with no gameplay effect beyond its lifetime. The
/// rocket variant's `size` doubles as the detonation diameter during the
/// collision pass.
#[derive(Debug, Clone)]
pub struct Explosion {
    pub center: (i32, i32),
    pub size: i32,
    pub frame: u32,
    pub frame_count: u32,
    pub is_rocket: bool,
    last_frame_ms: u64,
    pub alive: bool,
}

impl Explosion {
    /// The ordinary kill flash, random size.
    pub fn small(center: (i32, i32), now_ms: u64, rng: &mut impl Rng) -> Self {
        Self {
            center,
            size: rng.random_range(20..=40),
            frame: 0,
            frame_count: 8,
            is_rocket: false,
            last_frame_ms: now_ms,
            alive: true,
        }
    }

    /// The big detonation: fixed 100 px across, longer animation.
    pub fn rocket(center: (i32, i32), now_ms: u64) -> Self {
        Self {
            center,
            size: 100,
            frame: 0,
            frame_count: 12,
            is_rocket: true,
            last_frame_ms: now_ms,
            alive: true,
        }
    }

    pub fn update(&mut self, now_ms: u64) {
        if now_ms - self.last_frame_ms > FRAME_INTERVAL_MS {
            self.last_frame_ms = now_ms;
            self.frame += 1;
            if self.frame >= self.frame_count {
                self.alive = false;
            }
        }
    }

    /// 0.0 at spawn, approaching 1.0 at the last frame.
    pub fn progress(&self) -> f32 {
        self.frame as f32 / self.frame_count as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_small_explosion_size_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let explosion = Explosion::small((100, 100), 0, &mut rng);
            assert!((20..=40).contains(&explosion.size));
            assert_eq!(explosion.frame_count, 8);
        }
    }

    #[test]
    fn test_rocket_explosion_fixed_size() {
        let explosion = Explosion::rocket((100, 100), 0);
        assert_eq!(explosion.size, 100);
        assert_eq!(explosion.frame_count, 12);
        assert!(explosion.is_rocket);
    }

    #[test]
    fn test_frame_advances_after_interval() {
        let explosion_start = 1000;
        let explosion = &mut Explosion::rocket((0, 0), explosion_start);

        // Strictly more than 50 ms must pass
        explosion.update(explosion_start + 50);
        assert_eq!(explosion.frame, 0);
        explosion.update(explosion_start + 51);
        assert_eq!(explosion.frame, 1);
    }

    #[test]
    fn test_explosion_dies_after_last_frame() {
        let mut explosion = Explosion::rocket((0, 0), 0);
        let mut now = 0;
        while explosion.alive {
            now += 51;
            explosion.update(now);
        }
        assert_eq!(explosion.frame, 12);
    }

    #[test]
    fn test_progress_is_fractional() {
        let mut explosion = Explosion::rocket((0, 0), 0);
        assert_eq!(explosion.progress(), 0.0);
        explosion.update(51);
        explosion.update(102);
        explosion.update(153);
        assert_eq!(explosion.progress(), 0.25);
    }
}
