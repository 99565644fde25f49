use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::assets::{Sprite, SpriteSet};
use crate::config::Arena;
use crate::entities::{Bullet, Enemy, EnemyType, Explosion, Player, PowerUp, PowerUpKind, Rocket};
use crate::game::GamePhase;

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub phase: GamePhase,
    pub arena: Arena,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub player_bullets: &'a [Bullet],
    pub enemy_bullets: &'a [Bullet],
    pub rockets: &'a [Rocket],
    pub powerups: &'a [PowerUp],
    pub explosions: &'a [Explosion],
    pub score: u32,
    pub level: u32,
    pub lives: i32,
    pub shield_secs: Option<u64>,
    pub frame_count: u64,
    pub area: Rect,
    pub fps: u32,
}

/// Handles all rendering responsibilities for the game
pub struct GameRenderer {
    sprites: SpriteSet,
}

impl GameRenderer {
    pub fn new() -> Self {
        Self {
            sprites: SpriteSet::load(),
        }
    }

    /// Main render method that dispatches to phase-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.phase {
            GamePhase::Playing => self.render_game(frame, view),
            GamePhase::Paused => self.render_paused(frame, view),
            GamePhase::GameOver => self.render_game_over(frame, view),
        }
    }

    /// Renders the active gameplay screen: HUD line, bordered play area,
    /// controls hint.
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;

        let play_area = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height.saturating_sub(2),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(play_area);
        frame.render_widget(block, play_area);

        self.render_starfield(frame, view, inner);

        for powerup in view.powerups {
            self.render_powerup(frame, view, inner, powerup);
        }

        let buffer = frame.buffer_mut();
        for bullet in view.player_bullets.iter().chain(view.enemy_bullets) {
            let (cx, cy) = bullet.rect().center();
            let Some((col, row)) = cell_at(view, inner, cx, cy) else {
                continue;
            };
            // Direction decides the color: player shots cyan, enemy yellow
            let (glyph, color) = if bullet.fired_by_player() {
                ('|', Color::Cyan)
            } else {
                ('!', Color::Yellow)
            };
            buffer.set_string(col, row, glyph.to_string(), Style::default().fg(color));
        }

        for rocket in view.rockets {
            self.blit_sprite(frame, view, inner, &self.sprites.rocket, rocket.rect().center());
        }

        for enemy in view.enemies {
            let sprite = match enemy.kind {
                EnemyType::Basic => &self.sprites.enemy_basic,
                EnemyType::Medium => &self.sprites.enemy_medium,
                EnemyType::Boss => &self.sprites.enemy_boss,
            };
            self.blit_sprite(frame, view, inner, sprite, enemy.rect().center());
        }

        self.blit_sprite(frame, view, inner, &self.sprites.player, view.player.rect().center());
        if view.player.is_shielded() {
            self.render_shield_bubble(frame, view, inner);
        }

        for explosion in view.explosions {
            self.render_explosion(frame, view, inner, explosion);
        }

        self.render_hud(frame, view, area);
        self.render_controls(frame, area);
    }

    /// Sparse deterministic twinkle; no randomness so the frame is a pure
    /// function of the view.
    fn render_starfield(&self, frame: &mut Frame, view: &RenderView, inner: Rect) {
        let buffer = frame.buffer_mut();
        let twinkle = view.frame_count / 8;
        for row in 0..inner.height {
            for col in 0..inner.width {
                let seed = u64::from(col) * 31 + u64::from(row) * 17 + twinkle * 13;
                if seed % 53 == 0 {
                    buffer.set_string(
                        inner.x + col,
                        inner.y + row,
                        ".",
                        Style::default().fg(Color::DarkGray),
                    );
                }
            }
        }
    }

    fn render_powerup(&self, frame: &mut Frame, view: &RenderView, inner: Rect, powerup: &PowerUp) {
        let (cx, cy) = powerup.rect().center();
        let Some((col, row)) = cell_at(view, inner, cx, cy) else {
            return;
        };
        let (glyph, color) = match powerup.kind {
            PowerUpKind::Shield => ('S', Color::LightBlue),
            PowerUpKind::Rocket => ('R', Color::LightRed),
        };
        // The glow oscillator drives the pulse
        let mut style = Style::default().fg(color);
        if powerup.glow_size > 15.0 {
            style = style.add_modifier(Modifier::BOLD);
        }
        frame
            .buffer_mut()
            .set_string(col, row, glyph.to_string(), style);
    }

    fn render_shield_bubble(&self, frame: &mut Frame, view: &RenderView, inner: Rect) {
        let (cx, cy) = view.player.rect().center();
        let Some((col, row)) = cell_at(view, inner, cx, cy) else {
            return;
        };
        let half = self.sprites.player.width / 2 + 1;
        let style = Style::default().fg(Color::LightBlue);
        let buffer = frame.buffer_mut();
        for dy in 0..self.sprites.player.height {
            let y = (row + dy).saturating_sub(self.sprites.player.height / 2);
            if y < inner.y || y >= inner.y + inner.height {
                continue;
            }
            if col > inner.x + half {
                buffer.set_string(col - half, y, "(", style);
            }
            if col + half < inner.x + inner.width {
                buffer.set_string(col + half, y, ")", style);
            }
        }
    }

    /// An expanding ring of sparks, white through yellow to orange as the
    /// animation plays out.
    fn render_explosion(
        &self,
        frame: &mut Frame,
        view: &RenderView,
        inner: Rect,
        explosion: &Explosion,
    ) {
        let progress = explosion.progress();
        let color = if progress < 0.33 {
            Color::White
        } else if progress < 0.66 {
            Color::Yellow
        } else {
            Color::Rgb(255, 165, 0)
        };

        let radius = (f32::from(explosion.size as u16) / 2.0 * progress) as i32;
        let (cx, cy) = explosion.center;
        let offsets = [
            (radius, 0),
            (-radius, 0),
            (0, radius),
            (0, -radius),
            (radius * 7 / 10, radius * 7 / 10),
            (-radius * 7 / 10, radius * 7 / 10),
            (radius * 7 / 10, -radius * 7 / 10),
            (-radius * 7 / 10, -radius * 7 / 10),
        ];

        let buffer = frame.buffer_mut();
        for (dx, dy) in offsets {
            if let Some((col, row)) = cell_at(view, inner, cx + dx, cy + dy) {
                buffer.set_string(
                    col,
                    row,
                    "*",
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                );
            }
        }
    }

    fn render_hud(&self, frame: &mut Frame, view: &RenderView, area: Rect) {
        let mut spans = vec![
            Span::styled("Lives: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.lives.max(0)),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        if let Some(secs) = view.shield_secs {
            spans.push(Span::styled("  Shield: ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(
                format!("{secs}s"),
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        spans.extend([
            Span::styled("  Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.score),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Level: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.level),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  FPS: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.fps),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let hud_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(Line::from(spans)), hud_area);
    }

    fn render_controls(&self, frame: &mut Frame, area: Rect) {
        let controls = Line::from(vec![Span::styled(
            "[A-D/Arrows: Move] [Space: Fire] [P: Pause] [Q/Esc: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);

        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    /// Blits a sprite centered on an arena-coordinate point, clipping at
    /// the play-area edges.
    fn blit_sprite(
        &self,
        frame: &mut Frame,
        view: &RenderView,
        inner: Rect,
        sprite: &Sprite,
        center: (i32, i32),
    ) {
        let Some((col, row)) = cell_at(view, inner, center.0, center.1) else {
            return;
        };
        let origin_x = col.saturating_sub(sprite.width / 2);
        let origin_y = row.saturating_sub(sprite.height / 2);

        let buffer = frame.buffer_mut();
        for (dx, dy, glyph, color) in sprite.cells() {
            let x = origin_x + dx;
            let y = origin_y + dy;
            if x < inner.x
                || x >= inner.x + inner.width
                || y < inner.y
                || y >= inner.y + inner.height
            {
                continue;
            }
            buffer.set_string(
                x,
                y,
                glyph.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            );
        }
    }

    /// Renders the pause screen with overlay
    fn render_paused(&self, frame: &mut Frame, view: &RenderView) {
        // First render the game screen
        self.render_game(frame, view);

        let area = view.area;
        let pause_text = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press P to resume").centered().white(),
        ];

        let pause_area = Rect {
            x: (area.width / 2).saturating_sub(15),
            y: (area.height / 2).saturating_sub(3),
            width: 30.min(area.width),
            height: 6.min(area.height),
        };

        frame.render_widget(
            Paragraph::new(pause_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            pause_area,
        );
    }

    /// Renders the game over screen
    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let game_over_text = vec![
            Line::from(""),
            Line::from("╔═══════════════════════════╗").centered().red(),
            Line::from("║        GAME OVER          ║")
                .centered()
                .red()
                .bold(),
            Line::from("╚═══════════════════════════╝").centered().red(),
            Line::from(""),
            Line::from(format!("Final Score: {}", view.score))
                .centered()
                .yellow()
                .bold(),
            Line::from(format!("Reached Level: {}", view.level))
                .centered()
                .cyan()
                .bold(),
            Line::from(""),
            Line::from("Press Q or Esc to quit").centered().white(),
        ];

        frame.render_widget(
            Paragraph::new(game_over_text)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            area,
        );
    }
}

impl Default for GameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps an arena-pixel point to a terminal cell inside the play area, or
/// `None` when the point lies outside the arena.
fn cell_at(view: &RenderView, inner: Rect, x: i32, y: i32) -> Option<(u16, u16)> {
    if x < 0 || x >= view.arena.width || y < 0 || y >= view.arena.height {
        return None;
    }
    if inner.width == 0 || inner.height == 0 {
        return None;
    }
    let col = (i64::from(x) * i64::from(inner.width) / i64::from(view.arena.width)) as u16;
    let row = (i64::from(y) * i64::from(inner.height) / i64::from(view.arena.height)) as u16;
    Some((inner.x + col, inner.y + row))
}
