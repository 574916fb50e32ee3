use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub x: i32,
    pub y: i32,
}

impl Tile {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Odd rows are shifted half a tile to the right.
    #[inline]
    pub const fn is_odd_row(self) -> bool {
        self.y.rem_euclid(2) == 1
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Continuous world position (or direction vector) in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pixel {
    pub x: f32,
    pub y: f32,
}

impl Pixel {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(self, other: Pixel) -> f32 {
        (other - self).length()
    }

    /// Unit vector in the same direction, or zero for a zero vector.
    pub fn normalized(self) -> Pixel {
        let length = self.length();
        if length <= f32::EPSILON {
            Pixel::ZERO
        } else {
            Pixel::new(self.x / length, self.y / length)
        }
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn lerp(self, other: Pixel, t: f32) -> Pixel {
        self + (other - self) * t
    }
}

impl Add for Pixel {
    type Output = Pixel;
    fn add(self, rhs: Pixel) -> Pixel {
        Pixel::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Pixel {
    type Output = Pixel;
    fn sub(self, rhs: Pixel) -> Pixel {
        Pixel::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Pixel {
    type Output = Pixel;
    fn mul(self, rhs: f32) -> Pixel {
        Pixel::new(self.x * rhs, self.y * rhs)
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.1}, {:.1}]", self.x, self.y)
    }
}
