mod bullet;
mod enemy;
mod explosion;
mod player;
mod powerup;
mod rocket;

// Re-export all public types
pub use bullet::Bullet;
pub use enemy::{Behavior, Enemy, EnemyFleet, EnemyType};
pub use explosion::Explosion;
pub use player::Player;
pub use powerup::{PowerUp, PowerUpKind};
pub use rocket::Rocket;

/// Axis-aligned bounding box in arena pixels.
///
/// Overlap is strict: rectangles that only share an edge do not intersect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn left(&self) -> i32 {
        self.x
    }

    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    pub const fn top(&self) -> i32 {
        self.y
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub const fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10, 20, 40, 50);
        assert_eq!(rect.left(), 10);
        assert_eq!(rect.right(), 50);
        assert_eq!(rect.top(), 20);
        assert_eq!(rect.bottom(), 70);
        assert_eq!(rect.center(), (30, 45));
    }

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_rect_touching_edges_do_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 0, 10, 10);
        assert!(!a.intersects(&b));

        let below = Rect::new(0, 10, 10, 10);
        assert!(!a.intersects(&below));
    }

    #[test]
    fn test_rect_disjoint() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(100, 100, 10, 10);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_rect_center_rounds_down() {
        let rect = Rect::new(0, 0, 5, 5);
        assert_eq!(rect.center(), (2, 2));
    }
}
