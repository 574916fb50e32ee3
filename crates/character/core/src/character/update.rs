//! The per-tick state machine.

use super::{Character, CharacterFlags, CharacterState};
use crate::combat::ExperienceAward;
use crate::env::Env;

/// What happened to a character during one [`Character::update`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    /// The tick was skipped because the visibility variable hides the
    /// character.
    pub skipped: bool,
    /// Petrified; nothing but the status timers advanced.
    pub petrified: bool,
    pub reached_destination: bool,
    /// Death was invoked during this tick.
    pub died: bool,
    /// A remotely controlled character died and control returns to the player.
    pub control_released: bool,
    /// Kill experience owed to a poisoner; the caller applies it.
    pub experience: Option<ExperienceAward>,
    pub ready_for_removal: bool,
}

impl Character {
    /// Advances the character by `dt` milliseconds.
    pub fn update(&mut self, dt: f32, env: &Env<'_>) -> TickReport {
        let dt = dt.max(0.0);
        let mut report = TickReport::default();

        if self.refresh_script_visibility(env) {
            report.skipped = true;
            return report;
        }

        self.purge_stale_references(env);

        if let Some(remaining) = self.remaining_life_ms {
            let remaining = remaining - dt;
            self.remaining_life_ms = Some(remaining);
            if remaining <= 0.0 && !self.is_death_invoked() {
                tracing::debug!(id = %self.id, "lifetime over");
                report.died = true;
                report.control_released = self.death(None, env);
                return self.finish_tick(report);
            }
        }

        if !self.advance_effects(dt, &mut report, env) {
            return self.finish_tick(report);
        }
        let anim_dt = dt * self.status.speed_fold(&self.core);

        if self.special_action.is_some() {
            if self.animation_done(anim_dt) {
                self.end_special_action();
            }
            return self.finish_tick(report);
        }

        if self.is_dead() {
            return self.finish_tick(report);
        }

        if self.curve.is_some() {
            self.update_curve(dt, env);
            return self.finish_tick(report);
        }

        self.update_forced(env);
        self.dispatch(dt, anim_dt, &mut report, env);
        self.update_fight_timeout(dt, env);
        self.finish_tick(report)
    }

    fn refresh_script_visibility(&mut self, env: &Env<'_>) -> bool {
        let hidden = self
            .visibility
            .as_ref()
            .is_some_and(|variable| env.scripts().get(&variable.name) < variable.value);
        self.flags.set(CharacterFlags::SCRIPT_HIDDEN, hidden);
        hidden
    }

    /// Advances status timers, shields and invincibility, applying poison and
    /// morph expiry. Returns `false` when petrification ends the tick.
    fn advance_effects(&mut self, dt: f32, report: &mut TickReport, env: &Env<'_>) -> bool {
        let death_invoked = self.is_death_invoked();
        let status = self.status.advance(dt, death_invoked, &self.core);
        self.shields.advance(dt);
        self.invincible_ms = (self.invincible_ms - dt).max(0.0);

        if let Some(source) = status.morph_expired {
            self.hooks.on_recover_from_morph(&source);
        }
        if let Some(poison) = status.poison {
            self.life.add(-poison.damage);
            if self.life.is_empty() {
                let source = poison
                    .source
                    .filter(|source| env.roster().is_alive(source.id));
                report.experience = source
                    .as_ref()
                    .map(|source| self.kill_award(source.id, source.level));
                report.died = true;
                report.control_released = self.death(source.map(|source| source.id), env);
            }
        }

        report.petrified = status.petrified;
        !status.petrified
    }

    fn dispatch(&mut self, dt: f32, anim_dt: f32, report: &mut TickReport, env: &Env<'_>) {
        use CharacterState::*;
        match self.state {
            Walk | FightWalk | Run | FightRun => {
                let run = self.state.is_running();
                let fold = if run { self.core.run_speed_fold } else { 1.0 };
                let outcome = self.walk_along_path(dt, fold, run, env);
                report.reached_destination = outcome.reached_destination;
                self.animator.update(anim_dt);
            }
            Jump | FightJump => self.update_jump(dt, anim_dt, env),
            Sit => {
                self.animator.update(anim_dt);
            }
            Attack | Attack1 | Attack2 => {
                if self.animation_done(anim_dt) {
                    self.finish_attack(env);
                }
            }
            Magic => {
                if self.animation_done(anim_dt) {
                    self.finish_magic(env);
                }
            }
            Hurt | Stand1 => {
                if self.animation_done(anim_dt) {
                    let idle = self.idle_state();
                    self.set_state(idle, env);
                }
            }
            Death => {
                if self.animation_done(anim_dt) {
                    self.finalize_death();
                }
            }
            Stand | FightStand => {
                self.animator.update(anim_dt);
            }
            LoadingState => {
                let idle = self.idle_state();
                self.set_state(idle, env);
            }
        }
    }

    /// Advances the animation; true once it completed or has nothing to play.
    fn animation_done(&mut self, dt: f32) -> bool {
        self.animator.update(dt) || self.animator.is_finished()
    }

    fn update_fight_timeout(&mut self, dt: f32, env: &Env<'_>) {
        if !self.is_in_fighting() || self.is_death_invoked() {
            return;
        }
        self.fight_elapsed_ms += dt;
        if self.fight_elapsed_ms > self.core.fight_timeout_ms && !self.state.is_jumping() {
            tracing::trace!(id = %self.id, "fight timeout");
            self.leave_fighting(env);
        }
    }

    fn finish_tick(&self, mut report: TickReport) -> TickReport {
        report.ready_for_removal = self.ready_for_removal();
        report
    }
}
