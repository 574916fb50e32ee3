//! Extension points invoked by the state machine.

use crate::env::CharacterId;
use crate::geometry::Tile;

/// Notification delivered to [`CharacterHooks::on_event`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HookEvent {
    /// Attack animation completed.
    Attacking { target: Option<Tile> },
    /// Magic cast animation completed.
    MagicCast { target: Option<Tile> },
    /// Damage was applied.
    Damaged { attacker: Option<CharacterId>, damage: i32 },
    /// The last waypoint of a walk or run was reached.
    ReachedDestination { tile: Tile },
    /// A morph ran out.
    RecoveredFromMorph { source: String },
    /// An attack completed; a queued magic may fire now.
    UseQueuedMagic,
    /// `death` ran.
    Death { killer: Option<CharacterId> },
}

/// Behavior strategy injected into a character at construction.
///
/// Every hook forwards to [`on_event`](Self::on_event) by default, so an
/// implementation can override either the specific hooks or the single
/// catch-all.
pub trait CharacterHooks {
    fn on_event(&mut self, _event: HookEvent) {}

    fn on_attacking(&mut self, target: Option<Tile>) {
        self.on_event(HookEvent::Attacking { target });
    }

    fn on_magic_cast(&mut self, target: Option<Tile>) {
        self.on_event(HookEvent::MagicCast { target });
    }

    fn on_damaged(&mut self, attacker: Option<CharacterId>, damage: i32) {
        self.on_event(HookEvent::Damaged { attacker, damage });
    }

    fn on_reached_destination(&mut self, tile: Tile) {
        self.on_event(HookEvent::ReachedDestination { tile });
    }

    fn on_recover_from_morph(&mut self, source: &str) {
        self.on_event(HookEvent::RecoveredFromMorph {
            source: source.to_owned(),
        });
    }

    fn use_queued_magic(&mut self) {
        self.on_event(HookEvent::UseQueuedMagic);
    }

    fn on_death(&mut self, killer: Option<CharacterId>) {
        self.on_event(HookEvent::Death { killer });
    }
}

/// Hooks that do nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHooks;

impl CharacterHooks for NoHooks {}
