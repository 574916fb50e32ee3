use bitflags::bitflags;

bitflags! {
    /// Boolean facts about a character that several subsystems read.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CharacterFlags: u16 {
        const IN_FIGHTING         = 1 << 0;
        /// `death` ran; guards every later damage and death call.
        const DEATH_INVOKED       = 1 << 1;
        /// Death finished; the character only waits for removal.
        const DEAD                = 1 << 2;
        const SITTING             = 1 << 3;
        const FIGHT_DISABLED      = 1 << 4;
        const JUMP_DISABLED       = 1 << 5;
        const SUMMON              = 1 << 6;
        /// Death variant played; no corpse is left behind.
        const NO_CORPSE           = 1 << 7;
        /// Hidden by a caller.
        const HIDDEN              = 1 << 8;
        /// Hidden by its visibility script variable.
        const SCRIPT_HIDDEN       = 1 << 9;
        /// Remotely controlled by the player.
        const CONTROLLED          = 1 << 10;
        /// Invisible character shown for the duration of an attack.
        const ATTACK_REVEALED     = 1 << 11;
        /// Current magic cast cannot be interrupted by hurt.
        const UNINTERRUPTIBLE     = 1 << 12;
    }
}
