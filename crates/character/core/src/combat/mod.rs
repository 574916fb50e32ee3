//! Combat resolution.
//!
//! The functions here are pure: hit chance, damage after defence and shields,
//! kill experience. [`crate::Character::take_damage`] and its magic variant
//! sequence them against the defender's live state and report the outcome in
//! a [`DamageReport`]; experience is returned to the caller rather than
//! written into the attacker.

mod damage;
mod error;
mod hit;
mod result;
mod shield;

pub use damage::{MagicDamage, kill_experience, magic_damage, physical_damage};
pub use error::CombatError;
pub use hit::{check_hit, hit_chance};
pub use result::{AttackOutcome, AttackerSnapshot, DamageReport, ExperienceAward};
pub use shield::{ShieldEffect, ShieldMitigation, Shields};
