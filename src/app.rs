use color_eyre::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::Instant;

use crate::audio::AudioManager;
use crate::clock::GameClock;
use crate::config::{Arena, FRAME_TIME};
use crate::game::Game;
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};

/// The main application which holds the state and logic of the application.
pub struct App {
    running: bool,
    game: Game,
    clock: GameClock,
    /// Frames info
    last_frame_time: Instant,
    fps: u32,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: AudioManager,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new() -> Self {
        let arena = Arena::default();
        let rng = StdRng::from_os_rng();

        Self {
            running: true,
            game: Game::new(arena, rng),
            clock: GameClock::new(),
            last_frame_time: Instant::now(),
            fps: 0,
            input_manager: InputManager::new(),
            renderer: GameRenderer::new(),
            audio_manager: AudioManager::default(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        while self.running {
            let frame_start = Instant::now();

            // Calculate FPS
            let frame_time = frame_start.duration_since(self.last_frame_time);
            self.last_frame_time = frame_start;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }

            let now = self.clock.now_ms();

            // Render the frame; drawing runs in every phase
            terminal.draw(|frame| {
                let view = RenderView {
                    phase: self.game.phase(),
                    arena: self.game.arena,
                    player: &self.game.player,
                    enemies: &self.game.enemies,
                    player_bullets: &self.game.player_bullets,
                    enemy_bullets: &self.game.enemy_bullets,
                    rockets: &self.game.rockets,
                    powerups: &self.game.powerups,
                    explosions: &self.game.explosions,
                    score: self.game.state.score,
                    level: self.game.state.level,
                    lives: self.game.state.lives,
                    shield_secs: self.game.player.shield_seconds_left(now),
                    frame_count: self.game.frame,
                    area: frame.area(),
                    fps: self.fps,
                };
                self.renderer.render(frame, &view);
            })?;

            // Poll input events and get actions
            self.input_manager.poll_events(self.game.phase())?;
            let actions = self.input_manager.get_actions(self.game.phase());
            self.process_actions(&actions, now);

            // Advance the simulation (a no-op while paused or game over)
            self.game.update(now);

            // Map this tick's events to sounds
            for event in self.game.drain_events() {
                self.audio_manager.play_event(&event);
            }

            // Sleep out the remainder of the ~16 ms frame
            let elapsed = frame_start.elapsed();
            if elapsed < FRAME_TIME {
                std::thread::sleep(FRAME_TIME - elapsed);
            }
        }
        Ok(())
    }

    /// Process input actions and update game state accordingly
    fn process_actions(&mut self, actions: &[InputAction], now_ms: u64) {
        for action in actions {
            match action {
                InputAction::Quit => {
                    self.running = false;
                }
                InputAction::TogglePause => {
                    self.game.toggle_pause();
                }
                InputAction::MoveLeft => {
                    self.game.move_player_left();
                }
                InputAction::MoveRight => {
                    self.game.move_player_right();
                }
                InputAction::Fire => {
                    self.game.player_fire(now_ms);
                }
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
