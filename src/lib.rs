pub mod app;
pub mod assets;
pub mod audio;
pub mod clock;
pub mod config;
pub mod entities;
pub mod game;
pub mod input;
pub mod level;
pub mod renderer;

// Re-exports for integration tests
pub use config::Arena;
pub use entities::{
    Behavior, Bullet, Enemy, EnemyFleet, EnemyType, Explosion, Player, PowerUp, PowerUpKind, Rect,
    Rocket,
};
pub use game::{Game, GameEvent, GamePhase, GameState};
