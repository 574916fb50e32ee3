use std::fmt;

use crate::geometry::Tile;

/// Identity of a character within the world's roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterId(pub u32);

impl CharacterId {
    pub const PLAYER: Self = Self(0);

    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Liveness and placement of other characters.
///
/// Characters refer to each other by id only; the roster answers whether a
/// reference is still meaningful.
pub trait Roster {
    /// Character exists and has not finished dying.
    fn is_alive(&self, id: CharacterId) -> bool;

    /// Current tile of a living character.
    fn tile_of(&self, id: CharacterId) -> Option<Tile>;

    /// A character with an interaction script stands on the tile.
    fn event_actor_at(&self, _tile: Tile) -> bool {
        false
    }
}
