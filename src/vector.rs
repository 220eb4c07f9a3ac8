//! Integer screen coordinates.

use std::fmt;
use std::ops::{Add, Sub};

/// An immutable pair of integer coordinates, used for both positions and sizes.
///
/// Coordinates are 0-indexed from the top-left corner of the display. Values
/// are signed so that objects can be positioned partially (or fully) off
/// screen; the compositor skips whatever falls outside the frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vector2 {
    pub x: i32,
    pub y: i32,
}

impl Vector2 {
    /// The zero vector. Reused instead of being reconstructed.
    pub const ZERO: Vector2 = Vector2 { x: 0, y: 0 };

    /// The unit vector (1, 1).
    pub const ONE: Vector2 = Vector2 { x: 1, y: 1 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_arithmetic() {
        let a = Vector2::new(3, 4);
        let b = Vector2::new(-1, 2);
        assert_eq!(a + b, Vector2::new(2, 6));
        assert_eq!(a - b, Vector2::new(4, 2));
        assert_eq!(Vector2::ZERO + a, a);
    }

    #[test]
    fn test_vector_equality_is_structural() {
        assert_eq!(Vector2::new(1, 2), Vector2::new(1, 2));
        assert_ne!(Vector2::new(1, 2), Vector2::new(2, 1));
        assert_eq!(Vector2::ZERO, Vector2::new(0, 0));
    }
}
