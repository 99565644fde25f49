use crate::config::Arena;

use super::Rect;

pub const BULLET_WIDTH: i32 = 4;
pub const BULLET_HEIGHT: i32 = 10;

/// A straight-line shot. The sign of `speed` encodes the owner: negative
/// moves up (player), positive moves down (enemy), and it never changes
/// after construction.
#[derive(Debug, Clone)]
pub struct Bullet {
    pub x: i32,
    pub y: i32,
    pub speed: i32,
    pub alive: bool,
}

impl Bullet {
    /// Spawns anchored at (center-x, bottom), the muzzle point of whoever
    /// fired it.
    pub fn new(center_x: i32, bottom_y: i32, speed: i32) -> Self {
        Self {
            x: center_x - BULLET_WIDTH / 2,
            y: bottom_y - BULLET_HEIGHT,
            speed,
            alive: true,
        }
    }

    pub fn update(&mut self, arena: &Arena) {
        self.y += self.speed;

        let rect = self.rect();
        if rect.bottom() < 0 || rect.top() > arena.height {
            self.alive = false;
        }
    }

    /// Drives the visual tag only; collision passes filter by collection.
    pub fn fired_by_player(&self) -> bool {
        self.speed < 0
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, BULLET_WIDTH, BULLET_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_spawn_anchor() {
        let bullet = Bullet::new(100, 500, -10);
        assert_eq!(bullet.rect().center().0, 100);
        assert_eq!(bullet.rect().bottom(), 500);
    }

    #[test]
    fn test_player_bullet_moves_up() {
        let arena = Arena::default();
        let mut bullet = Bullet::new(100, 500, -10);
        let start_y = bullet.y;
        bullet.update(&arena);
        assert_eq!(bullet.y, start_y - 10);
        assert!(bullet.alive);
    }

    #[test]
    fn test_enemy_bullet_moves_down() {
        let arena = Arena::default();
        let mut bullet = Bullet::new(100, 100, 5);
        let start_y = bullet.y;
        bullet.update(&arena);
        assert_eq!(bullet.y, start_y + 5);
    }

    #[test]
    fn test_bullet_dies_off_top() {
        let arena = Arena::default();
        let mut bullet = Bullet::new(100, 5, -10);
        bullet.update(&arena);
        assert!(bullet.rect().bottom() < 0);
        assert!(!bullet.alive);
    }

    #[test]
    fn test_bullet_dies_off_bottom() {
        let arena = Arena::default();
        let mut bullet = Bullet::new(100, 608, 5);
        bullet.update(&arena);
        assert!(bullet.rect().top() > arena.height);
        assert!(!bullet.alive);
    }

    #[test]
    fn test_owner_from_speed_sign() {
        assert!(Bullet::new(0, 0, -10).fired_by_player());
        assert!(!Bullet::new(0, 0, 5).fired_by_player());
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_bullet_speed_never_changes(
                center_x in 0i32..800,
                bottom_y in 0i32..600,
                speed in prop::sample::select(vec![-10i32, 5]),
                ticks in 0usize..100
            ) {
                let arena = Arena::default();
                let mut bullet = Bullet::new(center_x, bottom_y, speed);
                for _ in 0..ticks {
                    bullet.update(&arena);
                }
                prop_assert_eq!(bullet.speed, speed);
            }
        }
    }
}
