use rand::Rng;
use rand::rngs::StdRng;

use crate::config::Arena;
use crate::entities::{Bullet, Enemy, EnemyFleet, Explosion, Player, PowerUp, PowerUpKind, Rocket};

/// Per-tick chance that an individual enemy attempts to fire, times the
/// current level.
const ENEMY_FIRE_CHANCE_PER_LEVEL: f64 = 0.005;
/// Per-tick chance that a power-up spawns, times the current level.
const POWERUP_SPAWN_CHANCE_PER_LEVEL: f64 = 0.01;
/// Power-ups spawn this far inside the left/right edges.
const POWERUP_SPAWN_MARGIN: i32 = 50;
const STARTING_LIVES: i32 = 3;

/// Score, level, and lives. Score and level only ever increase; `game_over`
/// is sticky with no retry path short of restarting the process.
#[derive(Debug, Clone)]
pub struct GameState {
    pub score: u32,
    pub level: u32,
    pub lives: i32,
    pub game_over: bool,
    pub paused: bool,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            lives: STARTING_LIVES,
            game_over: false,
            paused: false,
        }
    }

    /// Game over dominates pause.
    pub fn phase(&self) -> GamePhase {
        if self.game_over {
            GamePhase::GameOver
        } else if self.paused {
            GamePhase::Paused
        } else {
            GamePhase::Playing
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    Paused,
    GameOver,
}

/// Things that happened during a tick, drained by the shell and mapped to
/// sounds. These carry no gameplay meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PlayerFired,
    RocketFired,
    ShieldActivated,
    PowerUpCollected,
    EnemyDestroyed,
    RocketDetonated,
    PlayerHit,
}

/// The simulation core. Holds every entity collection and advances them one
/// tick at a time; time enters as explicit millisecond stamps and all
/// randomness comes through the owned seeded generator, so the whole thing
/// runs headless under test.
pub struct Game {
    pub arena: Arena,
    pub state: GameState,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub rockets: Vec<Rocket>,
    pub powerups: Vec<PowerUp>,
    pub explosions: Vec<Explosion>,
    pub frame: u64,
    rng: StdRng,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(arena: Arena, mut rng: StdRng) -> Self {
        let player = Player::new(&arena);
        let fleet = EnemyFleet::new(&arena, 1, &mut rng);

        Self {
            arena,
            state: GameState::new(),
            player,
            enemies: fleet.enemies,
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            rockets: Vec::new(),
            powerups: Vec::new(),
            explosions: Vec::new(),
            frame: 0,
            rng,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    pub fn move_player_left(&mut self) {
        if self.phase() == GamePhase::Playing {
            self.player.move_left();
        }
    }

    pub fn move_player_right(&mut self) {
        if self.phase() == GamePhase::Playing {
            self.player.move_right();
        }
    }

    pub fn player_fire(&mut self, now_ms: u64) {
        if self.phase() != GamePhase::Playing {
            return;
        }
        if let Some(bullet) = self.player.shoot(now_ms) {
            self.player_bullets.push(bullet);
            self.events.push(GameEvent::PlayerFired);
        }
    }

    pub fn toggle_pause(&mut self) {
        if !self.state.game_over {
            self.state.paused = !self.state.paused;
        }
    }

    /// One logical frame: advance every entity, roll enemy fire and power-up
    /// spawns, resolve collisions, sweep the dead, and advance the level if
    /// the fleet is gone. Frozen entirely while paused or game over.
    pub fn update(&mut self, now_ms: u64) {
        if self.phase() != GamePhase::Playing {
            return;
        }
        self.frame += 1;

        self.player.update(now_ms);
        for bullet in &mut self.player_bullets {
            bullet.update(&self.arena);
        }
        for bullet in &mut self.enemy_bullets {
            bullet.update(&self.arena);
        }
        for rocket in &mut self.rockets {
            rocket.update();
        }
        for enemy in &mut self.enemies {
            enemy.update(&self.arena, &mut self.rng);
        }
        for powerup in &mut self.powerups {
            powerup.update(&self.arena);
        }
        for explosion in &mut self.explosions {
            explosion.update(now_ms);
        }

        self.roll_enemy_fire();
        self.roll_powerup_spawn();

        self.resolve_collisions(now_ms);

        self.player_bullets.retain(|b| b.alive);
        self.enemy_bullets.retain(|b| b.alive);
        self.rockets.retain(|r| r.alive);
        self.enemies.retain(|e| e.alive);
        self.powerups.retain(|p| p.alive);
        self.explosions.retain(|e| e.alive);

        if self.enemies.is_empty() {
            self.state.level += 1;
            let fleet = EnemyFleet::new(&self.arena, self.state.level, &mut self.rng);
            self.enemies.extend(fleet.enemies);
        }
    }

    /// Each live enemy rolls independently; diving enemies decline inside
    /// `shoot()`.
    fn roll_enemy_fire(&mut self) {
        let chance = (ENEMY_FIRE_CHANCE_PER_LEVEL * self.state.level as f64).clamp(0.0, 1.0);
        for enemy in &self.enemies {
            if enemy.alive
                && self.rng.random_bool(chance)
                && let Some(bullet) = enemy.shoot()
            {
                self.enemy_bullets.push(bullet);
            }
        }
    }

    fn roll_powerup_spawn(&mut self) {
        let chance = (POWERUP_SPAWN_CHANCE_PER_LEVEL * self.state.level as f64).clamp(0.0, 1.0);
        if !self.rng.random_bool(chance) {
            return;
        }

        let kind = if self.rng.random_bool(0.5) {
            PowerUpKind::Shield
        } else {
            PowerUpKind::Rocket
        };
        let x = self
            .rng
            .random_range(POWERUP_SPAWN_MARGIN..=self.arena.width - POWERUP_SPAWN_MARGIN);
        self.powerups.push(PowerUp::new(x, 0, kind));
    }

    /// The fixed-order collision pass. Order matters for scoring and
    /// removal; no pass is skipped because an earlier one scored or ended
    /// the game.
    pub fn resolve_collisions(&mut self, now_ms: u64) {
        self.player_bullets_vs_enemies(now_ms);
        self.rockets_vs_enemies(now_ms);
        self.enemy_bullets_vs_player(now_ms);
        self.enemies_vs_player(now_ms);
        self.player_vs_powerups(now_ms);
    }

    /// Every overlapping bullet dies; the enemy dies once no matter how
    /// many bullets struck it this tick.
    fn player_bullets_vs_enemies(&mut self, now_ms: u64) {
        for enemy in &mut self.enemies {
            if !enemy.alive {
                continue;
            }
            let enemy_rect = enemy.rect();
            let mut struck = false;
            for bullet in &mut self.player_bullets {
                if bullet.alive && bullet.rect().intersects(&enemy_rect) {
                    bullet.alive = false;
                    struck = true;
                }
            }
            if struck {
                enemy.alive = false;
                self.state.score += 100;
                self.explosions
                    .push(Explosion::small(enemy_rect.center(), now_ms, &mut self.rng));
                self.events.push(GameEvent::EnemyDestroyed);
            }
        }
    }

    /// Contact is the detonation trigger, not the kill: every enemy whose
    /// center lies strictly within the blast radius dies, touched by the
    /// rocket or not.
    fn rockets_vs_enemies(&mut self, now_ms: u64) {
        for rocket in &mut self.rockets {
            if !rocket.alive {
                continue;
            }
            let rocket_rect = rocket.rect();
            let touched = self
                .enemies
                .iter()
                .any(|e| e.alive && e.rect().intersects(&rocket_rect));
            if !touched {
                continue;
            }

            rocket.alive = false;
            // The kill zone is half the blast diameter
            let radius = i64::from(rocket.explosion_radius / 2);
            let blast = Explosion::rocket(rocket.explode(), now_ms);

            for enemy in &mut self.enemies {
                if !enemy.alive {
                    continue;
                }
                let (ex, ey) = enemy.rect().center();
                let dx = i64::from(ex - blast.center.0);
                let dy = i64::from(ey - blast.center.1);
                // Squared distance, no sqrt needed
                if dx * dx + dy * dy < radius * radius {
                    enemy.alive = false;
                    self.state.score += 100;
                    self.explosions
                        .push(Explosion::small((ex, ey), now_ms, &mut self.rng));
                    self.events.push(GameEvent::EnemyDestroyed);
                }
            }

            self.explosions.push(blast);
            self.events.push(GameEvent::RocketDetonated);
        }
    }

    /// Overlapping enemy bullets die whether or not the shield is up; the
    /// shield absorbs the hit without reward, otherwise one life is lost no
    /// matter how many bullets connected.
    fn enemy_bullets_vs_player(&mut self, now_ms: u64) {
        let player_rect = self.player.rect();
        let mut hits = 0;
        for bullet in &mut self.enemy_bullets {
            if bullet.alive && bullet.rect().intersects(&player_rect) {
                bullet.alive = false;
                hits += 1;
            }
        }
        if hits > 0 && !self.player.is_shielded() {
            self.lose_life(now_ms);
        }
    }

    /// Colliding enemies die in both branches; a raised shield turns the
    /// collision into a rewarded kill instead of a lost life.
    fn enemies_vs_player(&mut self, now_ms: u64) {
        let player_rect = self.player.rect();
        let shielded = self.player.is_shielded();
        let mut contact = false;

        for enemy in &mut self.enemies {
            if !enemy.alive || !enemy.rect().intersects(&player_rect) {
                continue;
            }
            enemy.alive = false;
            contact = true;
            if shielded {
                self.state.score += 50;
                self.explosions.push(Explosion::small(
                    enemy.rect().center(),
                    now_ms,
                    &mut self.rng,
                ));
                self.events.push(GameEvent::EnemyDestroyed);
            }
        }

        if contact && !shielded {
            self.lose_life(now_ms);
        }
    }

    fn player_vs_powerups(&mut self, now_ms: u64) {
        let player_rect = self.player.rect();
        for powerup in &mut self.powerups {
            if !powerup.alive || !powerup.rect().intersects(&player_rect) {
                continue;
            }
            self.events.push(GameEvent::PowerUpCollected);
            match powerup.apply(&mut self.player, &mut self.state, now_ms) {
                Some(rocket) => {
                    self.rockets.push(rocket);
                    self.events.push(GameEvent::RocketFired);
                }
                None => {
                    self.events.push(GameEvent::ShieldActivated);
                }
            }
        }
    }

    fn lose_life(&mut self, now_ms: u64) {
        self.state.lives -= 1;
        self.explosions.push(Explosion::small(
            self.player.rect().center(),
            now_ms,
            &mut self.rng,
        ));
        self.events.push(GameEvent::PlayerHit);
        self.player.reset_position();
        if self.state.lives <= 0 {
            self.state.game_over = true;
        }
    }

    /// Hands this tick's events to the shell, in pass order.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
