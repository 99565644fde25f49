use rand::Rng;

use crate::config::Arena;

use super::{Bullet, Rect};

const ENEMY_BULLET_SPEED: i32 = 5;
/// Horizontal step toward the dive target each tick while diving.
const DIVE_DRIFT_STEP: i32 = 3;
/// Dive targets stay this far inside the left/right edges.
const DIVE_TARGET_MARGIN: i32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyType {
    Basic,
    Medium,
    Boss,
}

impl EnemyType {
    /// Difficulty tier, 0..=2. Movement speed and the dive/shoot chances all
    /// scale off this.
    pub fn tier(&self) -> i32 {
        match self {
            EnemyType::Basic => 0,
            EnemyType::Medium => 1,
            EnemyType::Boss => 2,
        }
    }

    pub fn size(&self) -> (i32, i32) {
        match self {
            EnemyType::Basic | EnemyType::Medium => (40, 40),
            EnemyType::Boss => (50, 50),
        }
    }
}

/// Exactly one behavior holds at a time; the dive target only exists while
/// diving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Formation,
    Diving { target_x: i32 },
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyType,
    pub x: i32,
    pub y: i32,
    pub speed_x: i32,
    pub speed_y: i32,
    pub behavior: Behavior,
    /// Formation row anchor, fixed at construction. Dive re-entry positions
    /// relative to it.
    pub original_y: i32,
    pub dive_probability: f64,
    pub shoot_probability: f64,
    pub alive: bool,
}

impl Enemy {
    pub fn new(x: i32, y: i32, kind: EnemyType, rng: &mut impl Rng) -> Self {
        let tier = kind.tier();
        let direction = if rng.random_bool(0.5) { 1 } else { -1 };

        Self {
            kind,
            x,
            y,
            speed_x: direction * (2 + tier),
            speed_y: 0,
            behavior: Behavior::Formation,
            original_y: y,
            dive_probability: 0.001 * (tier + 1) as f64,
            shoot_probability: 0.002 * (tier + 1) as f64,
            alive: true,
        }
    }

    /// Advances exactly one tick of formation or diving behavior.
    pub fn update(&mut self, arena: &Arena, rng: &mut impl Rng) {
        match self.behavior {
            Behavior::Formation => {
                self.x += self.speed_x;

                if rng.random_bool(self.dive_probability) {
                    self.speed_y = 5 + self.kind.tier();
                    self.behavior = Behavior::Diving {
                        target_x: rng
                            .random_range(DIVE_TARGET_MARGIN..=arena.width - DIVE_TARGET_MARGIN),
                    };
                }
            }
            Behavior::Diving { target_x } => {
                self.y += self.speed_y;

                // Drift toward the target column
                if self.x < target_x {
                    self.x += DIVE_DRIFT_STEP;
                } else if self.x > target_x {
                    self.x -= DIVE_DRIFT_STEP;
                }

                // Past the bottom: reappear one screen above the formation row
                if self.rect().top() > arena.height {
                    self.y = self.original_y - arena.height;
                    self.behavior = Behavior::Formation;
                    self.speed_y = 0;
                }
            }
        }

        // Bounce off the screen edges
        let rect = self.rect();
        if rect.right() > arena.width || rect.left() < 0 {
            self.speed_x = -self.speed_x;
        }
    }

    pub fn diving(&self) -> bool {
        matches!(self.behavior, Behavior::Diving { .. })
    }

    /// Fires only while in formation; `None` is the miss signal, not an error.
    pub fn shoot(&self) -> Option<Bullet> {
        if self.diving() {
            return None;
        }

        let rect = self.rect();
        Some(Bullet::new(
            rect.center().0,
            rect.bottom(),
            ENEMY_BULLET_SPEED,
        ))
    }

    pub fn rect(&self) -> Rect {
        let (w, h) = self.kind.size();
        Rect::new(self.x, self.y, w, h)
    }
}

/// The formation grid for one level. Row and column counts grow with the
/// level number, capped at 6x10.
pub struct EnemyFleet {
    pub enemies: Vec<Enemy>,
}

impl EnemyFleet {
    pub fn new(arena: &Arena, level: u32, rng: &mut impl Rng) -> Self {
        let rows = (3 + level / 2).min(6);
        let cols = (6 + level / 3).min(10);
        debug_assert!(100 + cols as i32 * 60 <= arena.width);

        let mut enemies = Vec::with_capacity((rows * cols) as usize);
        for row in 0..rows {
            for col in 0..cols {
                let kind = if row == 0 && col == cols / 2 && level > 2 {
                    EnemyType::Boss
                } else if row == 0 {
                    EnemyType::Medium
                } else {
                    EnemyType::Basic
                };

                let x = 100 + col as i32 * 60;
                let y = 50 + row as i32 * 50;
                enemies.push(Enemy::new(x, y, kind, rng));
            }
        }

        Self { enemies }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_enemy_speed_scales_with_tier() {
        let mut rng = seeded_rng();
        let basic = Enemy::new(100, 50, EnemyType::Basic, &mut rng);
        let medium = Enemy::new(100, 50, EnemyType::Medium, &mut rng);
        let boss = Enemy::new(100, 50, EnemyType::Boss, &mut rng);
        assert_eq!(basic.speed_x.abs(), 2);
        assert_eq!(medium.speed_x.abs(), 3);
        assert_eq!(boss.speed_x.abs(), 4);
    }

    #[test]
    fn test_dive_probability_by_tier() {
        let mut rng = seeded_rng();
        for (kind, expected) in [
            (EnemyType::Basic, 0.001),
            (EnemyType::Medium, 0.002),
            (EnemyType::Boss, 0.003),
        ] {
            let enemy = Enemy::new(100, 50, kind, &mut rng);
            assert_eq!(enemy.dive_probability, expected);
        }
    }

    #[test]
    fn test_formation_movement_bounces_off_edges() {
        let arena = Arena::default();
        let mut rng = seeded_rng();
        let mut enemy = Enemy::new(760, 50, EnemyType::Basic, &mut rng);
        enemy.speed_x = 2;
        enemy.dive_probability = 0.0;

        enemy.update(&arena, &mut rng);
        assert_eq!(enemy.x, 762);
        assert_eq!(enemy.speed_x, -2);
    }

    #[test]
    fn test_dive_trigger_sets_speed_and_target() {
        let arena = Arena::default();
        let mut rng = seeded_rng();
        let mut enemy = Enemy::new(400, 50, EnemyType::Medium, &mut rng);
        enemy.dive_probability = 1.0;

        enemy.update(&arena, &mut rng);
        assert!(enemy.diving());
        assert_eq!(enemy.speed_y, 6);
        match enemy.behavior {
            Behavior::Diving { target_x } => {
                assert!((50..=750).contains(&target_x));
            }
            Behavior::Formation => panic!("enemy should be diving"),
        }
    }

    #[test]
    fn test_diving_drifts_toward_target() {
        let arena = Arena::default();
        let mut rng = seeded_rng();
        let mut enemy = Enemy::new(400, 50, EnemyType::Basic, &mut rng);
        enemy.behavior = Behavior::Diving { target_x: 500 };
        enemy.speed_y = 5;

        enemy.update(&arena, &mut rng);
        assert_eq!(enemy.x, 403);
        assert_eq!(enemy.y, 55);

        enemy.behavior = Behavior::Diving { target_x: 300 };
        enemy.update(&arena, &mut rng);
        assert_eq!(enemy.x, 400);
    }

    #[test]
    fn test_dive_reentry_above_formation_row() {
        let arena = Arena::default();
        let mut rng = seeded_rng();
        let mut enemy = Enemy::new(400, 150, EnemyType::Basic, &mut rng);
        enemy.behavior = Behavior::Diving { target_x: 400 };
        enemy.speed_y = 5;
        enemy.y = 598;

        enemy.update(&arena, &mut rng);
        assert_eq!(enemy.y, 150 - 600);
        assert_eq!(enemy.behavior, Behavior::Formation);
        assert_eq!(enemy.speed_y, 0);
    }

    #[test]
    fn test_shoot_declined_while_diving() {
        let mut rng = seeded_rng();
        let mut enemy = Enemy::new(400, 50, EnemyType::Boss, &mut rng);
        assert!(enemy.shoot().is_some());

        enemy.behavior = Behavior::Diving { target_x: 200 };
        assert!(enemy.shoot().is_none());
    }

    #[test]
    fn test_shoot_anchors_at_bottom_center() {
        let mut rng = seeded_rng();
        let enemy = Enemy::new(400, 50, EnemyType::Basic, &mut rng);
        let bullet = enemy.shoot().unwrap();
        assert_eq!(bullet.rect().center().0, enemy.rect().center().0);
        assert_eq!(bullet.rect().bottom(), enemy.rect().bottom());
        assert_eq!(bullet.speed, 5);
    }

    #[test]
    fn test_fleet_level_one_grid() {
        let arena = Arena::default();
        let mut rng = seeded_rng();
        let fleet = EnemyFleet::new(&arena, 1, &mut rng);

        // 3 rows x 6 cols, no boss below level 3
        assert_eq!(fleet.enemies.len(), 18);
        assert!(
            fleet
                .enemies
                .iter()
                .take(6)
                .all(|e| e.kind == EnemyType::Medium)
        );
        assert!(
            fleet
                .enemies
                .iter()
                .skip(6)
                .all(|e| e.kind == EnemyType::Basic)
        );
    }

    #[test]
    fn test_fleet_boss_appears_above_level_two() {
        let arena = Arena::default();
        let mut rng = seeded_rng();
        let fleet = EnemyFleet::new(&arena, 3, &mut rng);

        // Level 3: 4 rows x 7 cols, boss at row 0 col 3
        assert_eq!(fleet.enemies.len(), 28);
        let bosses: Vec<_> = fleet
            .enemies
            .iter()
            .filter(|e| e.kind == EnemyType::Boss)
            .collect();
        assert_eq!(bosses.len(), 1);
        assert_eq!(bosses[0].x, 100 + 3 * 60);
        assert_eq!(bosses[0].y, 50);
    }

    #[test]
    fn test_fleet_caps_at_six_by_ten() {
        let arena = Arena::default();
        let mut rng = seeded_rng();
        let fleet = EnemyFleet::new(&arena, 100, &mut rng);
        assert_eq!(fleet.enemies.len(), 60);
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_kind_and_anchor_immutable_across_updates(
                seed in prop::num::u64::ANY,
                ticks in 0usize..200
            ) {
                let arena = Arena::default();
                let mut rng = StdRng::seed_from_u64(seed);
                let mut enemy = Enemy::new(400, 150, EnemyType::Medium, &mut rng);
                for _ in 0..ticks {
                    enemy.update(&arena, &mut rng);
                }
                prop_assert_eq!(enemy.kind, EnemyType::Medium);
                prop_assert_eq!(enemy.original_y, 150);
            }

            #[test]
            fn test_enemy_never_stays_below_screen(
                seed in prop::num::u64::ANY,
                ticks in 0usize..500
            ) {
                let arena = Arena::default();
                let mut rng = StdRng::seed_from_u64(seed);
                let mut enemy = Enemy::new(400, 150, EnemyType::Boss, &mut rng);
                enemy.dive_probability = 0.2;
                for _ in 0..ticks {
                    enemy.update(&arena, &mut rng);
                    prop_assert!(enemy.y <= arena.height);
                }
            }
        }
    }
}
