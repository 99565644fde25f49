use crate::config::Arena;
use crate::game::GameState;

use super::{Player, Rect, Rocket};

pub const POWERUP_SIZE: i32 = 30;
const FALL_SPEED: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    Shield,
    Rocket,
}

/// A falling pickup. The glow oscillator is cosmetic; only position and the
/// alive flag matter to gameplay.
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub x: i32,
    pub y: i32,
    pub glow_size: f32,
    glow_direction: f32,
    pub alive: bool,
}

impl PowerUp {
    /// Spawns from a (left, top) anchor.
    pub fn new(x: i32, y: i32, kind: PowerUpKind) -> Self {
        Self {
            kind,
            x,
            y,
            glow_size: 15.0,
            glow_direction: 1.0,
            alive: true,
        }
    }

    pub fn update(&mut self, arena: &Arena) {
        self.y += FALL_SPEED;

        // Pulsating glow, bounded oscillation
        self.glow_size += 0.2 * self.glow_direction;
        if self.glow_size > 18.0 {
            self.glow_direction = -1.0;
        } else if self.glow_size < 12.0 {
            self.glow_direction = 1.0;
        }

        if self.rect().top() > arena.height {
            self.alive = false;
        }
    }

    /// Applies the effect exactly once and consumes the pickup. A rocket
    /// pickup fires immediately; the caller pushes the returned rocket into
    /// the live set.
    pub fn apply(
        &mut self,
        player: &mut Player,
        state: &mut GameState,
        now_ms: u64,
    ) -> Option<Rocket> {
        self.alive = false;

        match self.kind {
            PowerUpKind::Shield => {
                player.activate_shield(now_ms);
                state.score += 50;
                None
            }
            PowerUpKind::Rocket => {
                state.score += 100;
                Some(player.fire_rocket())
            }
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, POWERUP_SIZE, POWERUP_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_powerup_falls() {
        let arena = Arena::default();
        let mut powerup = PowerUp::new(400, 0, PowerUpKind::Shield);
        powerup.update(&arena);
        assert_eq!(powerup.y, 3);
        assert!(powerup.alive);
    }

    #[test]
    fn test_powerup_dies_off_bottom() {
        let arena = Arena::default();
        let mut powerup = PowerUp::new(400, 599, PowerUpKind::Rocket);
        powerup.update(&arena);
        assert!(!powerup.alive);
    }

    #[test]
    fn test_glow_oscillates_within_bounds() {
        let arena = Arena::default();
        let mut powerup = PowerUp::new(400, 0, PowerUpKind::Shield);
        for _ in 0..200 {
            powerup.update(&arena);
            assert!(powerup.glow_size > 11.0 && powerup.glow_size < 19.0);
        }
    }

    #[test]
    fn test_apply_shield_activates_and_scores() {
        let arena = Arena::default();
        let mut player = Player::new(&arena);
        let mut state = GameState::new();
        let mut powerup = PowerUp::new(400, 500, PowerUpKind::Shield);

        let rocket = powerup.apply(&mut player, &mut state, 1000);
        assert!(rocket.is_none());
        assert!(player.is_shielded());
        assert_eq!(state.score, 50);
        assert!(!powerup.alive);
    }

    #[test]
    fn test_apply_rocket_fires_and_scores() {
        let arena = Arena::default();
        let mut player = Player::new(&arena);
        let mut state = GameState::new();
        let mut powerup = PowerUp::new(400, 500, PowerUpKind::Rocket);

        let rocket = powerup.apply(&mut player, &mut state, 1000);
        assert!(rocket.is_some());
        assert!(!player.is_shielded());
        assert_eq!(state.score, 100);
        assert!(!powerup.alive);
    }
}
