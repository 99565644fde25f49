//! Sprite loading with placeholder fallback.
//!
//! PNG art under `assets/` is scaled down to a small grid of colored
//! terminal cells. Any load failure falls back to a built-in ASCII sprite,
//! so the renderer only ever sees a drawable `Sprite` and never a load
//! result.

use image::imageops::FilterType;
use ratatui::style::Color;

/// Pixels below this alpha become empty cells.
const ALPHA_CUTOFF: u8 = 64;

/// A small grid of optional colored cells, blitted centered on an entity.
#[derive(Debug, Clone)]
pub struct Sprite {
    pub width: u16,
    pub height: u16,
    cells: Vec<Option<(char, Color)>>,
}

impl Sprite {
    /// Scales a PNG down to `width` x `height` cells, one block glyph per
    /// opaque pixel.
    pub fn from_image(path: &str, width: u16, height: u16) -> Result<Self, image::ImageError> {
        let img = image::open(path)?
            .resize_exact(u32::from(width), u32::from(height), FilterType::Nearest)
            .to_rgba8();

        let mut cells = Vec::with_capacity(usize::from(width) * usize::from(height));
        for y in 0..u32::from(height) {
            for x in 0..u32::from(width) {
                let [r, g, b, a] = img.get_pixel(x, y).0;
                if a < ALPHA_CUTOFF {
                    cells.push(None);
                } else {
                    cells.push(Some(('█', Color::Rgb(r, g, b))));
                }
            }
        }

        Ok(Self { width, height, cells })
    }

    /// Builds a sprite from fixed rows of text; spaces become empty cells.
    pub fn from_ascii(rows: &[&str], color: Color) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u16;
        let height = rows.len() as u16;

        let mut cells = Vec::with_capacity(usize::from(width) * usize::from(height));
        for row in rows {
            let mut chars = row.chars();
            for _ in 0..width {
                match chars.next() {
                    Some(' ') | None => cells.push(None),
                    Some(c) => cells.push(Some((c, color))),
                }
            }
        }

        Self { width, height, cells }
    }

    /// Yields (col, row, glyph, color) for every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (u16, u16, char, Color)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, cell)| {
            cell.map(|(glyph, color)| {
                (
                    (i as u16) % self.width,
                    (i as u16) / self.width,
                    glyph,
                    color,
                )
            })
        })
    }
}

/// Every sprite the renderer draws, loaded once at startup.
pub struct SpriteSet {
    pub player: Sprite,
    pub enemy_basic: Sprite,
    pub enemy_medium: Sprite,
    pub enemy_boss: Sprite,
    pub rocket: Sprite,
}

impl SpriteSet {
    pub fn load() -> Self {
        Self {
            player: load_or("assets/player_ship.png", 5, 3, || {
                Sprite::from_ascii(&[" /^\\ ", "<|||>", " ||| "], Color::Green)
            }),
            enemy_basic: load_or("assets/enemy1.png", 5, 2, || {
                Sprite::from_ascii(&["\\o o/", " \\_/ "], Color::Rgb(255, 165, 0))
            }),
            enemy_medium: load_or("assets/enemy2.png", 5, 2, || {
                Sprite::from_ascii(&["/* *\\", "\\===/"], Color::Red)
            }),
            enemy_boss: load_or("assets/enemy3.png", 6, 3, || {
                Sprite::from_ascii(&["[=**=]", "|####|", " vv vv"], Color::Red)
            }),
            rocket: load_or("assets/rocket.png", 1, 2, || {
                Sprite::from_ascii(&["^", "A"], Color::Rgb(220, 20, 60))
            }),
        }
    }
}

fn load_or(path: &str, width: u16, height: u16, placeholder: impl FnOnce() -> Sprite) -> Sprite {
    Sprite::from_image(path, width, height).unwrap_or_else(|_| placeholder())
}
