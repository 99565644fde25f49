use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, source::Buffered};
use std::fs::File;
use std::io::BufReader;

use crate::game::GameEvent;

type Sound = Buffered<Decoder<BufReader<File>>>;

/// Audio manager for playing sound effects.
///
/// Every failure mode degrades to silence: no output device, a missing
/// file, or an undecodable file just leaves the corresponding slot empty.
/// Playback never gates or mutates game state.
pub struct AudioManager {
    output: Option<(OutputStream, OutputStreamHandle)>,
    laser: Option<Sound>,
    shield: Option<Sound>,
    rocket_launch: Option<Sound>,
    powerup: Option<Sound>,
    explosion: Option<Sound>,
    big_explosion: Option<Sound>,
}

impl AudioManager {
    /// Create a new audio manager and pre-load the sound bank.
    pub fn new() -> Self {
        Self {
            output: OutputStream::try_default().ok(),
            laser: load_sound("assets/laser.wav"),
            shield: load_sound("assets/shield.wav"),
            rocket_launch: load_sound("assets/rocket_launch.wav"),
            powerup: load_sound("assets/powerup.wav"),
            explosion: load_sound("assets/explosion.wav"),
            big_explosion: load_sound("assets/big_explosion.wav"),
        }
    }

    /// Plays the sound for one drained game event.
    pub fn play_event(&self, event: &GameEvent) {
        match event {
            GameEvent::PlayerFired => self.play(&self.laser, 0.4),
            GameEvent::ShieldActivated => self.play(&self.shield, 0.5),
            GameEvent::RocketFired => self.play(&self.rocket_launch, 0.6),
            GameEvent::PowerUpCollected => self.play(&self.powerup, 0.4),
            GameEvent::EnemyDestroyed | GameEvent::PlayerHit => self.play(&self.explosion, 0.3),
            GameEvent::RocketDetonated => self.play(&self.big_explosion, 0.5),
        }
    }

    fn play(&self, sound: &Option<Sound>, volume: f32) {
        let Some((_, handle)) = &self.output else {
            return;
        };
        if let Some(sound) = sound {
            // Ignore errors for sound playback - don't want to crash the game
            if let Ok(sink) = Sink::try_new(handle) {
                sink.set_volume(volume);
                // Clone the buffered source (fast - just clones references)
                sink.append(sound.clone());
                sink.detach();
            }
        }
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

fn load_sound(path: &str) -> Option<Sound> {
    let file = File::open(path).ok()?;
    let source = Decoder::new(BufReader::new(file)).ok()?;
    Some(source.buffered())
}
