use crate::geometry::{Pixel, Tile};

/// A two-point jump in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JumpPath {
    pub from: Pixel,
    pub to: Pixel,
    pub target: Tile,
    /// Last tile passed over that a character may stand on; a jump cut short
    /// settles here.
    pub safe: Tile,
    traveled: f32,
}

impl JumpPath {
    pub fn new(from: Pixel, to: Pixel, origin: Tile, target: Tile) -> Self {
        Self {
            from,
            to,
            target,
            safe: origin,
            traveled: 0.0,
        }
    }

    pub fn span(&self) -> f32 {
        self.from.distance(self.to)
    }

    pub fn is_finished(&self) -> bool {
        self.traveled >= self.span()
    }

    /// Moves `distance` further along the jump and returns the new position.
    pub fn advance(&mut self, distance: f32) -> Pixel {
        let span = self.span();
        self.traveled = (self.traveled + distance.max(0.0)).min(span);
        if span <= f32::EPSILON {
            return self.to;
        }
        self.from.lerp(self.to, self.traveled / span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_to_landing() {
        let mut jump = JumpPath::new(
            Pixel::new(0.0, 0.0),
            Pixel::new(100.0, 0.0),
            Tile::ORIGIN,
            Tile::new(1, 0),
        );
        assert_eq!(jump.advance(40.0), Pixel::new(40.0, 0.0));
        assert!(!jump.is_finished());
        assert_eq!(jump.advance(80.0), Pixel::new(100.0, 0.0));
        assert!(jump.is_finished());
    }
}
