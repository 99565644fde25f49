use crate::config::Arena;

use super::{Bullet, Rect, Rocket};

pub const PLAYER_WIDTH: i32 = 50;
pub const PLAYER_HEIGHT: i32 = 40;
const PLAYER_SPEED: i32 = 8;
const PLAYER_BULLET_SPEED: i32 = -10;
const SHOOT_DELAY_MS: u64 = 250;
const SHIELD_DURATION_MS: u64 = 30_000;
/// Gap between the ship and the bottom edge at the spawn position.
const BOTTOM_MARGIN: i32 = 10;

#[derive(Debug, Clone)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    /// None until the first shot so a shot at t=0 always succeeds.
    pub last_shot_ms: Option<u64>,
    pub shield_active: bool,
    pub shield_time_ms: u64,
    arena: Arena,
}

impl Player {
    pub fn new(arena: &Arena) -> Self {
        Self {
            x: arena.width / 2 - PLAYER_WIDTH / 2,
            y: arena.height - BOTTOM_MARGIN - PLAYER_HEIGHT,
            last_shot_ms: None,
            shield_active: false,
            shield_time_ms: 0,
            arena: *arena,
        }
    }

    pub fn move_left(&mut self) {
        self.x = (self.x - PLAYER_SPEED).max(0);
    }

    pub fn move_right(&mut self) {
        self.x = (self.x + PLAYER_SPEED).min(self.arena.width - PLAYER_WIDTH);
    }

    /// The only place the shield flag is re-checked against the clock. A
    /// read between expiry and the next update still reports the shield
    /// active; that one-tick lag is deliberate.
    pub fn update(&mut self, now_ms: u64) {
        if self.shield_active && now_ms - self.shield_time_ms > SHIELD_DURATION_MS {
            self.shield_active = false;
        }
    }

    /// `None` while the 250 ms cooldown is still running; the caller treats
    /// absence as a benign skip.
    pub fn shoot(&mut self, now_ms: u64) -> Option<Bullet> {
        match self.last_shot_ms {
            Some(last) if now_ms - last <= SHOOT_DELAY_MS => None,
            _ => {
                self.last_shot_ms = Some(now_ms);
                let rect = self.rect();
                Some(Bullet::new(rect.center().0, rect.top(), PLAYER_BULLET_SPEED))
            }
        }
    }

    /// No cooldown and no inventory; rockets only come from power-ups.
    pub fn fire_rocket(&self) -> Rocket {
        let rect = self.rect();
        Rocket::new(rect.center().0, rect.top())
    }

    /// Re-activation restarts the 30 second timer rather than stacking.
    pub fn activate_shield(&mut self, now_ms: u64) {
        self.shield_active = true;
        self.shield_time_ms = now_ms;
    }

    /// Pure flag read; never consults the clock.
    pub fn is_shielded(&self) -> bool {
        self.shield_active
    }

    /// Whole seconds remaining, for the HUD.
    pub fn shield_seconds_left(&self, now_ms: u64) -> Option<u64> {
        if !self.shield_active {
            return None;
        }
        let elapsed = now_ms.saturating_sub(self.shield_time_ms);
        Some(SHIELD_DURATION_MS.saturating_sub(elapsed) / 1000)
    }

    /// Back to the spawn anchor after losing a life. Shield state is
    /// untouched.
    pub fn reset_position(&mut self) {
        self.x = self.arena.width / 2 - PLAYER_WIDTH / 2;
        self.y = self.arena.height - BOTTOM_MARGIN - PLAYER_HEIGHT;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }
}
