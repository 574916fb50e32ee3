//! State, kind and relation enums of a character.

/// Animation/behavior state.
///
/// `LoadingState` is only ever the state of a freshly spawned character; the
/// first assignment away from it always counts as a change.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CharacterState {
    #[default]
    Stand,
    Stand1,
    Walk,
    Run,
    Jump,
    Sit,
    Attack,
    Attack1,
    Attack2,
    Magic,
    Hurt,
    Death,
    FightStand,
    FightWalk,
    FightRun,
    FightJump,
    LoadingState,
}

impl CharacterState {
    /// States in which a character follows a path or flies a jump.
    pub const fn is_moving(self) -> bool {
        matches!(
            self,
            Self::Walk | Self::Run | Self::Jump | Self::FightWalk | Self::FightRun | Self::FightJump
        )
    }

    pub const fn is_walking(self) -> bool {
        matches!(self, Self::Walk | Self::FightWalk)
    }

    pub const fn is_running(self) -> bool {
        matches!(self, Self::Run | Self::FightRun)
    }

    pub const fn is_jumping(self) -> bool {
        matches!(self, Self::Jump | Self::FightJump)
    }

    pub const fn is_attacking(self) -> bool {
        matches!(self, Self::Attack | Self::Attack1 | Self::Attack2)
    }

    /// States that must run to completion before a new action starts.
    pub const fn blocks_action(self) -> bool {
        matches!(
            self,
            Self::Jump
                | Self::Attack
                | Self::Attack1
                | Self::Attack2
                | Self::Magic
                | Self::Hurt
                | Self::Death
                | Self::FightJump
        )
    }

    /// Entry sound loops while the state lasts.
    pub const fn loops_sound(self) -> bool {
        matches!(self, Self::Walk | Self::Run | Self::FightWalk | Self::FightRun)
    }

    /// Sound plays when the animation completes rather than on entry.
    pub const fn sounds_on_completion(self) -> bool {
        self.is_attacking() || matches!(self, Self::Magic)
    }

    pub const fn is_fight_variant(self) -> bool {
        matches!(
            self,
            Self::FightStand | Self::FightWalk | Self::FightRun | Self::FightJump
        )
    }

    /// Fight-mode counterpart, if the state has one.
    pub const fn fight_variant(self) -> Option<CharacterState> {
        match self {
            Self::Stand | Self::Stand1 => Some(Self::FightStand),
            Self::Walk => Some(Self::FightWalk),
            Self::Run => Some(Self::FightRun),
            Self::Jump => Some(Self::FightJump),
            _ => None,
        }
    }

    /// Peaceful counterpart of a fight-mode state.
    pub const fn peaceful_variant(self) -> Option<CharacterState> {
        match self {
            Self::FightStand => Some(Self::Stand),
            Self::FightWalk => Some(Self::Walk),
            Self::FightRun => Some(Self::Run),
            Self::FightJump => Some(Self::Jump),
            _ => None,
        }
    }
}

/// Faction of a character.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CharacterKind {
    #[default]
    Normal,
    Fighter,
    Player,
    /// Partner travelling with the player.
    Follower,
    /// Character carrying an interaction script.
    EventActor,
}

impl CharacterKind {
    /// Player and followers earn kill experience.
    pub const fn is_player_aligned(self) -> bool {
        matches!(self, Self::Player | Self::Follower)
    }
}

/// Disposition toward the player's side.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Relation {
    Friend,
    Enemy,
    #[default]
    Neutral,
}

impl Relation {
    /// Relation while an opposite-relation effect is active.
    pub const fn opposite(self) -> Relation {
        match self {
            Self::Friend => Self::Enemy,
            Self::Enemy => Self::Friend,
            Self::Neutral => Self::Neutral,
        }
    }

    /// Friends and enemies fight each other; neutrals fight nobody.
    pub const fn is_hostile_to(self, other: Relation) -> bool {
        matches!(
            (self, other),
            (Self::Friend, Self::Enemy) | (Self::Enemy, Self::Friend)
        )
    }
}
