use crate::geometry::Pixel;

/// Identity of a live magic sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpriteId(pub u32);

/// What a character may observe about a magic sprite in one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteSnapshot {
    pub position: Pixel,
    /// Travel direction; zero when the sprite is stationary.
    pub direction: Pixel,
    pub is_finished: bool,
}

/// Lookup of magic sprites by id. `None` means the sprite was destroyed.
pub trait MagicSpriteOracle {
    fn sprite(&self, id: SpriteId) -> Option<SpriteSnapshot>;
}
