use super::tile::Pixel;

/// Isometric 8-way facing.
///
/// Index 0 is South and indices advance clockwise as seen on screen:
///
/// ```text
/// 3  4  5
/// 2     6
/// 1  0  7
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Direction {
    #[default]
    South,
    SouthWest,
    West,
    NorthWest,
    North,
    NorthEast,
    East,
    SouthEast,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Resolves a raw facing index; out-of-range values are rejected.
    pub fn from_index(index: i32) -> Option<Direction> {
        if (0..8).contains(&index) {
            Some(Self::ALL[index as usize])
        } else {
            tracing::warn!(index, "direction index out of range");
            None
        }
    }

    /// Facing closest to a pixel-space vector (y grows downwards).
    ///
    /// Returns `None` for a zero vector so callers keep their current facing.
    pub fn from_vector(vector: Pixel) -> Option<Direction> {
        if vector.is_zero() {
            return None;
        }
        let deg = vector.y.atan2(vector.x).to_degrees();
        let direction = if (-22.5..22.5).contains(&deg) {
            Direction::East
        } else if (22.5..67.5).contains(&deg) {
            Direction::SouthEast
        } else if (67.5..112.5).contains(&deg) {
            Direction::South
        } else if (112.5..157.5).contains(&deg) {
            Direction::SouthWest
        } else if !(-157.5..157.5).contains(&deg) {
            Direction::West
        } else if (-157.5..-112.5).contains(&deg) {
            Direction::NorthWest
        } else if (-112.5..-67.5).contains(&deg) {
            Direction::North
        } else {
            Direction::NorthEast
        };
        Some(direction)
    }

    /// Facing rotated by `steps` eighth-turns clockwise.
    pub fn rotated(self, steps: i32) -> Direction {
        Self::ALL[(self.index() as i32 + steps).rem_euclid(8) as usize]
    }

    pub fn opposite(self) -> Direction {
        self.rotated(4)
    }

    /// Unit vector pointing along this facing.
    pub fn unit_vector(self) -> Pixel {
        const D: f32 = std::f32::consts::FRAC_1_SQRT_2;
        match self {
            Direction::South => Pixel::new(0.0, 1.0),
            Direction::SouthWest => Pixel::new(-D, D),
            Direction::West => Pixel::new(-1.0, 0.0),
            Direction::NorthWest => Pixel::new(-D, -D),
            Direction::North => Pixel::new(0.0, -1.0),
            Direction::NorthEast => Pixel::new(D, -D),
            Direction::East => Pixel::new(1.0, 0.0),
            Direction::SouthEast => Pixel::new(D, D),
        }
    }

    /// True for the four edge-sharing diamonds of the brick layout.
    pub const fn is_diagonal(self) -> bool {
        self.index() % 2 == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_to_direction() {
        assert_eq!(Direction::from_vector(Pixel::new(0.0, 5.0)), Some(Direction::South));
        assert_eq!(Direction::from_vector(Pixel::new(-3.0, 0.0)), Some(Direction::West));
        assert_eq!(Direction::from_vector(Pixel::new(0.0, -1.0)), Some(Direction::North));
        assert_eq!(Direction::from_vector(Pixel::new(4.0, 0.0)), Some(Direction::East));
        assert_eq!(
            Direction::from_vector(Pixel::new(-32.0, 16.0)),
            Some(Direction::SouthWest)
        );
        assert_eq!(Direction::from_vector(Pixel::ZERO), None);
    }

    #[test]
    fn index_round_trip_and_range() {
        for direction in Direction::ALL {
            assert_eq!(Direction::from_index(direction.index() as i32), Some(direction));
        }
        assert_eq!(Direction::from_index(8), None);
        assert_eq!(Direction::from_index(-1), None);
    }

    #[test]
    fn rotation_wraps() {
        assert_eq!(Direction::South.opposite(), Direction::North);
        assert_eq!(Direction::SouthEast.rotated(1), Direction::South);
        assert_eq!(Direction::South.rotated(-1), Direction::SouthEast);
    }

    #[test]
    fn parses_names() {
        assert_eq!("north_west".parse::<Direction>(), Ok(Direction::NorthWest));
        assert_eq!(Direction::SouthEast.to_string(), "south_east");
    }
}
