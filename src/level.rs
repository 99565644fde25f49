//! Level-plan generation.
//!
//! Produces a full parameter set for a level: enemy mix, formation layout,
//! attack patterns, and special events. The playable loop builds its fleet
//! from the fixed grid formulas in `entities::enemy` and takes nothing from
//! these plans; they are exported API for fleet layouts beyond the grid.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::config::Arena;

/// Relative share of each enemy class, normalized to sum to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyMix {
    pub basic: f64,
    pub diver: f64,
    pub bomber: f64,
    pub elite: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormationPlan {
    /// Classic Galaxian grid.
    StandardGrid {
        rows: u32,
        cols: u32,
        spacing_x: i32,
        spacing_y: i32,
        offset_x: i32,
        offset_y: i32,
    },
    VFormation {
        size: u32,
        spacing: i32,
        offset_x: i32,
        offset_y: i32,
    },
    Circle {
        radius: i32,
        count: u32,
        center_x: i32,
        center_y: i32,
    },
    Diamond {
        size: u32,
        spacing: i32,
        offset_x: i32,
        offset_y: i32,
    },
    Wave {
        width: u32,
        height: u32,
        spacing_x: i32,
        spacing_y: i32,
        offset_x: i32,
        offset_y: i32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackPattern {
    StraightDive,
    CurvedDive,
    SwoopAndReturn,
    SpiralAttack,
    CoordinatedDive,
}

const ALL_PATTERNS: [AttackPattern; 5] = [
    AttackPattern::StraightDive,
    AttackPattern::CurvedDive,
    AttackPattern::SwoopAndReturn,
    AttackPattern::SpiralAttack,
    AttackPattern::CoordinatedDive,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossAttack {
    Sweep,
    Barrage,
    Minions,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpecialEvent {
    AsteroidField { density: f64, speed: f64 },
    Boss { health: u32, attack: BossAttack },
    Wormhole { duration_secs: u32, position: (i32, i32) },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevelPlan {
    pub enemy_count: u32,
    pub enemy_mix: EnemyMix,
    pub formation: FormationPlan,
    pub attack_patterns: Vec<AttackPattern>,
    pub speed_multiplier: f64,
    pub dive_frequency: f64,
    pub special_events: Vec<SpecialEvent>,
}

pub struct LevelGenerator {
    arena: Arena,
}

impl LevelGenerator {
    pub fn new(arena: Arena) -> Self {
        Self { arena }
    }

    pub fn generate(&self, level: u32, rng: &mut impl Rng) -> LevelPlan {
        LevelPlan {
            enemy_count: enemy_count(level),
            enemy_mix: enemy_mix(level),
            formation: self.formation(level, rng),
            attack_patterns: attack_patterns(level, rng),
            speed_multiplier: (1.0 + level as f64 * 0.1).min(2.5),
            dive_frequency: (0.002 + level as f64 * 0.0005).min(0.01),
            special_events: self.special_events(level, rng),
        }
    }

    /// Complex formations unlock one per level; the first is always
    /// available.
    fn formation(&self, level: u32, rng: &mut impl Rng) -> FormationPlan {
        let unlocked = (1 + level.min(4)) as usize;
        let choice = *[0usize, 1, 2, 3, 4][..unlocked]
            .choose(rng)
            .unwrap_or(&0);

        match choice {
            0 => {
                let rows = (3 + level / 3).min(6);
                let cols = (8 + level / 2).min(12);
                FormationPlan::StandardGrid {
                    rows,
                    cols,
                    spacing_x: 50,
                    spacing_y: 40,
                    offset_x: (self.arena.width - cols as i32 * 50) / 2,
                    offset_y: 60,
                }
            }
            1 => FormationPlan::VFormation {
                size: (5 + level).min(15),
                spacing: 40,
                offset_x: self.arena.width / 2,
                offset_y: 80,
            },
            2 => FormationPlan::Circle {
                radius: (100 + level as i32 * 10).min(180),
                count: (12 + level).min(24),
                center_x: self.arena.width / 2,
                center_y: 150,
            },
            3 => FormationPlan::Diamond {
                size: (3 + level / 2).min(7),
                spacing: 50,
                offset_x: self.arena.width / 2,
                offset_y: 100,
            },
            _ => {
                let width = (6 + level).min(15);
                FormationPlan::Wave {
                    width,
                    height: (2 + level / 3).min(5),
                    spacing_x: 50,
                    spacing_y: 40,
                    offset_x: (self.arena.width - width as i32 * 50) / 2,
                    offset_y: 60,
                }
            }
        }
    }

    fn special_events(&self, level: u32, rng: &mut impl Rng) -> Vec<SpecialEvent> {
        let mut events = Vec::new();

        if level >= 2 && rng.random_bool(0.3) {
            events.push(SpecialEvent::AsteroidField {
                density: (0.1 + level as f64 * 0.02).min(0.3),
                speed: 1.0 + level as f64 * 0.2,
            });
        }

        if level.is_multiple_of(5) {
            let attack = *[BossAttack::Sweep, BossAttack::Barrage, BossAttack::Minions]
                .choose(rng)
                .unwrap_or(&BossAttack::Sweep);
            events.push(SpecialEvent::Boss {
                health: 10 + level * 2,
                attack,
            });
        }

        if level >= 4 && rng.random_bool(0.2) {
            events.push(SpecialEvent::Wormhole {
                duration_secs: 15,
                position: (
                    rng.random_range(100..=self.arena.width - 100),
                    rng.random_range(100..=self.arena.height / 2),
                ),
            });
        }

        events
    }
}

fn enemy_count(level: u32) -> u32 {
    20 + (level * 3).min(30)
}

/// The raw per-class weights shift with level, then get normalized.
fn enemy_mix(level: u32) -> EnemyMix {
    let l = level as f64;
    let basic = 0.7 - l * 0.05;
    let diver = 0.2 + l * 0.02;
    let bomber = 0.1 + l * 0.01;
    let elite = if level < 3 { 0.0 } else { 0.05 + (l - 3.0) * 0.01 };

    let total = basic + diver + bomber + elite;
    EnemyMix {
        basic: (basic / total).max(0.0),
        diver: (diver / total).max(0.0),
        bomber: (bomber / total).max(0.0),
        elite: (elite / total).max(0.0),
    }
}

fn attack_patterns(level: u32, rng: &mut impl Rng) -> Vec<AttackPattern> {
    let unlocked = (1 + level.min(4)) as usize;
    let wanted = (1 + level / 3).min(3) as usize;

    ALL_PATTERNS[..unlocked]
        .choose_multiple(rng, wanted.min(unlocked))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn generator() -> LevelGenerator {
        LevelGenerator::new(Arena::default())
    }

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_enemy_count_grows_then_caps() {
        assert_eq!(enemy_count(1), 23);
        assert_eq!(enemy_count(10), 50);
        assert_eq!(enemy_count(50), 50);
    }

    #[test]
    fn test_enemy_mix_normalizes() {
        for level in 1..12 {
            let mix = enemy_mix(level);
            let total = mix.basic + mix.diver + mix.bomber + mix.elite;
            assert!((total - 1.0).abs() < 1e-9, "level {level}: total {total}");
        }
    }

    #[test]
    fn test_no_elite_below_level_three() {
        assert_eq!(enemy_mix(1).elite, 0.0);
        assert_eq!(enemy_mix(2).elite, 0.0);
        assert!(enemy_mix(3).elite > 0.0);
    }

    #[test]
    fn test_grid_is_the_first_unlocked_formation() {
        let mut rng = seeded_rng();
        let plan = generator().generate(0, &mut rng);
        match plan.formation {
            FormationPlan::StandardGrid { rows, cols, .. } => {
                assert_eq!(rows, 3);
                assert_eq!(cols, 8);
            }
            other => panic!("expected grid, got {other:?}"),
        }
    }

    #[test]
    fn test_speed_and_dive_caps() {
        let mut rng = seeded_rng();
        let plan = generator().generate(40, &mut rng);
        assert_eq!(plan.speed_multiplier, 2.5);
        assert_eq!(plan.dive_frequency, 0.01);
    }

    #[test]
    fn test_boss_every_fifth_level() {
        let mut rng = seeded_rng();
        let plan = generator().generate(5, &mut rng);
        let boss = plan
            .special_events
            .iter()
            .find(|e| matches!(e, SpecialEvent::Boss { .. }));
        match boss {
            Some(SpecialEvent::Boss { health, .. }) => assert_eq!(*health, 20),
            _ => panic!("expected a boss event on level 5"),
        }
    }

    #[test]
    fn test_attack_pattern_count_bounded() {
        let mut rng = seeded_rng();
        for level in 1..20 {
            let patterns = attack_patterns(level, &mut rng);
            assert!(!patterns.is_empty());
            assert!(patterns.len() <= 3);
        }
    }
}
