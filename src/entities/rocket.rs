use super::Rect;

pub const ROCKET_WIDTH: i32 = 10;
pub const ROCKET_HEIGHT: i32 = 30;
/// Faster than regular bullets.
const ROCKET_SPEED: i32 = -8;
const EXPLOSION_RADIUS: i32 = 100;

/// Player-fired area-effect projectile. Contact with an enemy does not kill
/// it directly; the collision pass consumes the rocket and detonates at its
/// center instead.
#[derive(Debug, Clone)]
pub struct Rocket {
    pub x: i32,
    pub y: i32,
    pub speed: i32,
    pub explosion_radius: i32,
    pub alive: bool,
}

impl Rocket {
    pub fn new(center_x: i32, bottom_y: i32) -> Self {
        Self {
            x: center_x - ROCKET_WIDTH / 2,
            y: bottom_y - ROCKET_HEIGHT,
            speed: ROCKET_SPEED,
            explosion_radius: EXPLOSION_RADIUS,
            alive: true,
        }
    }

    pub fn update(&mut self) {
        self.y += self.speed;

        if self.rect().bottom() < 0 {
            self.alive = false;
        }
    }

    /// The detonation point.
    pub fn explode(&self) -> (i32, i32) {
        self.rect().center()
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, ROCKET_WIDTH, ROCKET_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rocket_spawn_anchor() {
        let rocket = Rocket::new(400, 550);
        assert_eq!(rocket.rect().center().0, 400);
        assert_eq!(rocket.rect().bottom(), 550);
        assert_eq!(rocket.explosion_radius, 100);
    }

    #[test]
    fn test_rocket_moves_up() {
        let mut rocket = Rocket::new(400, 550);
        let start_y = rocket.y;
        rocket.update();
        assert_eq!(rocket.y, start_y - 8);
        assert!(rocket.alive);
    }

    #[test]
    fn test_rocket_dies_off_top() {
        let mut rocket = Rocket::new(400, 20);
        for _ in 0..10 {
            rocket.update();
        }
        assert!(!rocket.alive);
    }

    #[test]
    fn test_explode_returns_rect_center() {
        let rocket = Rocket::new(400, 550);
        assert_eq!(rocket.explode(), rocket.rect().center());
    }
}
