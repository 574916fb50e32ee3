//! The character: one actor's state machine, vitals and motion.
//!
//! A [`Character`] is built from a [`CharacterConfig`] snapshot and driven by
//! [`Character::update`] once per frame. Entry points such as
//! [`Character::walk_to`] or [`Character::take_damage`] are plain method calls
//! made from the same thread; collaborators are passed in through [`Env`].
mod animation;
mod combat;
mod flags;
mod forced;
mod hooks;
mod jump;
mod state;
mod traits;
mod update;
mod vitals;
mod walk;

pub use animation::Animator;
pub use flags::CharacterFlags;
pub use hooks::{CharacterHooks, HookEvent, NoHooks};
pub use state::{CharacterKind, CharacterState, Relation};
pub use traits::{Damageable, Movable, Stateful};
pub use update::TickReport;

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;

use crate::combat::Shields;
use crate::config::{AnimationSpec, CharacterConfig, CoreConfig, VisibilityVariable};
use crate::env::{CharacterId, Env, RollContext, compute_seed};
use crate::geometry::{Direction, Pixel, Tile, tile_to_world};
use crate::movement::{CurveMove, ForcedMovement, JumpPath};
use crate::path::PathQuality;
use crate::stats::{CombatStats, Meter};
use crate::status::StatusEffects;

/// Completion callback of a curve move.
pub type CurveEnd = Box<dyn FnOnce(&mut Character)>;

/// Pending interaction with another character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InteractiveTarget {
    pub id: CharacterId,
    /// Interaction was requested with the secondary button.
    pub right_click: bool,
}

/// A scripted one-off animation; facing is restored when it ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SpecialAction {
    facing: Direction,
}

pub struct Character {
    id: CharacterId,
    name: String,
    kind: CharacterKind,
    relation: Relation,
    group: u32,

    animations: BTreeMap<CharacterState, AnimationSpec>,
    sounds: BTreeMap<CharacterState, String>,

    life: Meter,
    mana: Meter,
    thew: Meter,
    base: CombatStats,
    attack_bonus_percent: i32,
    defend_bonus_percent: i32,
    evade_bonus_percent: i32,

    level: u32,
    experience: u32,
    level_up_experience: u32,
    experience_bonus: u32,
    can_level_up: bool,

    walk_speed: f32,
    move_speed_bonus_percent: i32,
    path_quality: PathQuality,

    tile: Tile,
    position: Pixel,
    direction: Direction,
    path: VecDeque<Tile>,
    destination: Option<Tile>,
    jump: Option<JumpPath>,
    curve: Option<CurveMove>,
    curve_end: Option<CurveEnd>,
    forced: Option<ForcedMovement>,

    state: CharacterState,
    animator: Animator,
    flags: CharacterFlags,
    fight_elapsed_ms: f32,
    special_action: Option<SpecialAction>,
    invincible_ms: f32,

    status: StatusEffects,
    shields: Shields,

    attack_target: Option<Tile>,
    magic_target: Option<Tile>,
    follow_target: Option<CharacterId>,
    interactive_target: Option<InteractiveTarget>,
    last_attacker: Option<CharacterId>,

    remaining_life_ms: Option<f32>,
    summons: HashMap<String, Vec<CharacterId>>,
    pending_death_asset: Option<String>,
    visibility: Option<VisibilityVariable>,

    rng_seed: u64,
    roll_nonce: u64,

    core: CoreConfig,
    hooks: Box<dyn CharacterHooks>,
}

impl Character {
    /// Creates a character standing at the center of `tile`.
    pub fn spawn(id: CharacterId, config: &CharacterConfig, tile: Tile, core: CoreConfig) -> Self {
        let mut flags = CharacterFlags::empty();
        flags.set(CharacterFlags::FIGHT_DISABLED, config.fight_disabled);
        flags.set(CharacterFlags::JUMP_DISABLED, config.jump_disabled);
        flags.set(CharacterFlags::SUMMON, config.is_summon);

        let mut character = Self {
            id,
            name: config.name.clone(),
            kind: config.kind,
            relation: config.relation,
            group: config.group,
            animations: config.animations.clone(),
            sounds: config.sounds.clone(),
            life: Meter::with_floor(config.life, config.life_max, 1),
            mana: Meter::new(config.mana, config.mana_max),
            thew: Meter::new(config.thew, config.thew_max),
            base: CombatStats {
                attack: config.attack,
                attack2: config.attack2,
                attack3: config.attack3,
                defend: config.defend,
                defend2: config.defend2,
                defend3: config.defend3,
                evade: config.evade,
            },
            attack_bonus_percent: config.attack_bonus_percent,
            defend_bonus_percent: config.defend_bonus_percent,
            evade_bonus_percent: config.evade_bonus_percent,
            level: config.level.max(1),
            experience: config.experience,
            level_up_experience: config.level_up_experience,
            experience_bonus: config.experience_bonus,
            can_level_up: config.can_level_up,
            walk_speed: config.walk_speed,
            move_speed_bonus_percent: config.move_speed_bonus_percent,
            path_quality: config.path_quality,
            tile,
            position: tile_to_world(tile),
            direction: Direction::default(),
            path: VecDeque::new(),
            destination: None,
            jump: None,
            curve: None,
            curve_end: None,
            forced: None,
            state: CharacterState::LoadingState,
            animator: Animator::new(),
            flags,
            fight_elapsed_ms: 0.0,
            special_action: None,
            invincible_ms: 0.0,
            status: StatusEffects::new(),
            shields: Shields::new(),
            attack_target: None,
            magic_target: None,
            follow_target: None,
            interactive_target: None,
            last_attacker: None,
            remaining_life_ms: config.life_ms,
            summons: HashMap::new(),
            pending_death_asset: None,
            visibility: config.visibility.clone(),
            rng_seed: u64::from(id.0),
            roll_nonce: 0,
            core,
            hooks: Box::new(NoHooks),
        };
        character.enter_state(CharacterState::Stand);
        character
    }

    pub fn with_hooks(mut self, hooks: impl CharacterHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    /// Base seed for this character's hit and hurt rolls.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    // ===== identity =====

    #[inline]
    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CharacterKind {
        self.kind
    }

    pub fn group(&self) -> u32 {
        self.group
    }

    /// Relation with any opposite-relation effect applied.
    pub fn relation(&self) -> Relation {
        if self.status.is_opposite() {
            self.relation.opposite()
        } else {
            self.relation
        }
    }

    pub fn is_hostile_to(&self, other: &Character) -> bool {
        self.relation().is_hostile_to(other.relation())
    }

    // ===== spatial =====

    #[inline]
    pub fn tile(&self) -> Tile {
        self.tile
    }

    #[inline]
    pub fn position(&self) -> Pixel {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Remaining waypoints, excluding the tile the character started from.
    pub fn path(&self) -> &VecDeque<Tile> {
        &self.path
    }

    pub fn destination(&self) -> Option<Tile> {
        self.destination
    }

    pub fn is_jumping(&self) -> bool {
        self.jump.is_some()
    }

    pub fn is_curve_moving(&self) -> bool {
        self.curve.is_some()
    }

    pub fn forced_movement(&self) -> Option<&ForcedMovement> {
        self.forced.as_ref()
    }

    // ===== state and animation =====

    #[inline]
    pub fn state(&self) -> CharacterState {
        self.state
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// Current animation frame for the renderer.
    pub fn frame(&self) -> u16 {
        self.animator.frame()
    }

    pub fn flags(&self) -> CharacterFlags {
        self.flags
    }

    pub fn has_animation(&self, state: CharacterState) -> bool {
        self.animations.contains_key(&state)
    }

    pub fn is_in_fighting(&self) -> bool {
        self.flags.contains(CharacterFlags::IN_FIGHTING)
    }

    pub fn is_sitting(&self) -> bool {
        self.flags.contains(CharacterFlags::SITTING)
    }

    pub fn is_summon(&self) -> bool {
        self.flags.contains(CharacterFlags::SUMMON)
    }

    pub fn is_death_invoked(&self) -> bool {
        self.flags.contains(CharacterFlags::DEATH_INVOKED)
    }

    /// Death is final; the character only waits for removal.
    pub fn is_dead(&self) -> bool {
        self.flags.contains(CharacterFlags::DEAD)
    }

    pub fn ready_for_removal(&self) -> bool {
        self.is_dead()
    }

    /// Dead characters leave a corpse unless a death variant played.
    pub fn leaves_corpse(&self) -> bool {
        self.is_dead() && !self.is_summon() && !self.flags.contains(CharacterFlags::NO_CORPSE)
    }

    /// Whether the renderer should draw the character this frame.
    pub fn is_draw(&self) -> bool {
        if self.flags.intersects(
            CharacterFlags::DEAD | CharacterFlags::HIDDEN | CharacterFlags::SCRIPT_HIDDEN,
        ) {
            return false;
        }
        !self.status.is_invisible() || self.flags.contains(CharacterFlags::ATTACK_REVEALED)
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.flags.set(CharacterFlags::HIDDEN, hidden);
    }

    pub fn is_controlled(&self) -> bool {
        self.flags.contains(CharacterFlags::CONTROLLED)
    }

    /// Marks the character as remotely controlled by the player.
    pub fn set_controlled(&mut self, controlled: bool) {
        self.flags.set(CharacterFlags::CONTROLLED, controlled);
    }

    /// Whether a new walk, jump, attack or cast may start.
    pub fn can_perform_action(&self) -> bool {
        !self.state.blocks_action()
            && self.special_action.is_none()
            && self.curve.is_none()
            && !self.is_death_invoked()
    }

    // ===== effects =====

    pub fn status(&self) -> &StatusEffects {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut StatusEffects {
        &mut self.status
    }

    pub fn shields(&self) -> &Shields {
        &self.shields
    }

    pub fn shields_mut(&mut self) -> &mut Shields {
        &mut self.shields
    }

    pub fn invincible_ms(&self) -> f32 {
        self.invincible_ms
    }

    pub fn set_invincible(&mut self, duration_ms: f32) {
        self.invincible_ms = duration_ms.max(0.0);
    }

    /// Turns an opposite-relation effect on or off; refused for the player.
    pub fn toggle_opposite(&mut self, duration_ms: f32) -> bool {
        match self
            .status
            .toggle_opposite(duration_ms, self.kind == CharacterKind::Player)
        {
            Ok(()) => true,
            Err(error) => {
                tracing::debug!(id = %self.id, %error, "opposite relation refused");
                false
            }
        }
    }

    // ===== targets =====

    pub fn attack_target(&self) -> Option<Tile> {
        self.attack_target
    }

    pub fn set_attack_target(&mut self, tile: Option<Tile>) {
        self.attack_target = tile;
    }

    pub fn interactive_target(&self) -> Option<InteractiveTarget> {
        self.interactive_target
    }

    pub fn set_interactive_target(&mut self, id: CharacterId, right_click: bool) {
        self.interactive_target = Some(InteractiveTarget { id, right_click });
    }

    pub fn clear_interactive_target(&mut self) {
        self.interactive_target = None;
    }

    pub fn follow(&mut self, target: CharacterId) {
        self.follow_target = Some(target);
    }

    pub fn stop_following(&mut self) {
        self.follow_target = None;
    }

    /// Follow target, if still alive.
    pub fn follow_target(&self, env: &Env<'_>) -> Option<CharacterId> {
        self.follow_target.filter(|id| env.roster().is_alive(*id))
    }

    /// Last character that damaged this one, if still alive.
    pub fn last_attacker(&self, env: &Env<'_>) -> Option<CharacterId> {
        self.last_attacker.filter(|id| env.roster().is_alive(*id))
    }

    /// Drops references to characters the roster no longer knows.
    fn purge_stale_references(&mut self, env: &Env<'_>) {
        let roster = env.roster();
        if self.follow_target.is_some_and(|id| !roster.is_alive(id)) {
            self.follow_target = None;
        }
        if self
            .interactive_target
            .is_some_and(|target| !roster.is_alive(target.id))
        {
            self.interactive_target = None;
        }
        if self.last_attacker.is_some_and(|id| !roster.is_alive(id)) {
            self.last_attacker = None;
        }
        for ids in self.summons.values_mut() {
            ids.retain(|id| roster.is_alive(*id));
        }
        self.summons.retain(|_, ids| !ids.is_empty());
    }

    // ===== summons =====

    /// Records a summon created by `magic`.
    ///
    /// Returns the oldest summon of that magic when the list overflows; the
    /// caller is expected to kill it.
    pub fn add_summon(&mut self, magic: &str, summon: CharacterId) -> Option<CharacterId> {
        let list = self.summons.entry(magic.to_owned()).or_default();
        list.push(summon);
        if list.len() > CoreConfig::MAX_SUMMONS_PER_MAGIC {
            let evicted = list.remove(0);
            tracing::debug!(id = %self.id, magic, %evicted, "summon limit reached");
            return Some(evicted);
        }
        None
    }

    pub fn summons(&self, magic: &str) -> &[CharacterId] {
        self.summons.get(magic).map(Vec::as_slice).unwrap_or(&[])
    }

    // ===== fighting =====

    /// Enters fight mode and restarts the fight timeout. A petrified character
    /// keeps its current state.
    pub fn enter_fighting(&mut self, env: &Env<'_>) {
        if self.flags.contains(CharacterFlags::FIGHT_DISABLED) {
            return;
        }
        self.flags.insert(CharacterFlags::IN_FIGHTING);
        self.fight_elapsed_ms = 0.0;
        if self.status.is_petrified() {
            return;
        }
        match self.state.fight_variant() {
            Some(fight) if self.has_animation(fight) => self.set_state(fight, env),
            _ => {}
        }
    }

    fn leave_fighting(&mut self, env: &Env<'_>) {
        self.flags.remove(CharacterFlags::IN_FIGHTING);
        self.fight_elapsed_ms = 0.0;
        if let Some(peaceful) = self.state.peaceful_variant() {
            self.set_state(peaceful, env);
        }
    }

    // ===== state transitions =====

    fn prefers_fight_variant(&self, fight: CharacterState) -> bool {
        self.is_in_fighting() && self.has_animation(fight)
    }

    pub(crate) fn idle_state(&self) -> CharacterState {
        if self.prefers_fight_variant(CharacterState::FightStand) {
            CharacterState::FightStand
        } else {
            CharacterState::Stand
        }
    }

    pub(crate) fn walk_state(&self) -> CharacterState {
        if self.prefers_fight_variant(CharacterState::FightWalk) {
            CharacterState::FightWalk
        } else {
            CharacterState::Walk
        }
    }

    pub(crate) fn run_state(&self) -> CharacterState {
        if self.prefers_fight_variant(CharacterState::FightRun) {
            CharacterState::FightRun
        } else {
            CharacterState::Run
        }
    }

    pub(crate) fn jump_state(&self) -> CharacterState {
        if self.prefers_fight_variant(CharacterState::FightJump) {
            CharacterState::FightJump
        } else {
            CharacterState::Jump
        }
    }

    /// Switches state without touching audio. Returns `false` when the state
    /// did not change.
    fn enter_state(&mut self, state: CharacterState) -> bool {
        if self.state == state {
            return false;
        }
        let previous = self.state;
        self.state = state;
        self.animator.reset(self.animations.get(&state));
        if !state.is_moving() && self.forced.is_none() {
            self.path.clear();
        }
        if !state.is_jumping() {
            if let Some(jump) = self.jump.take() {
                self.tile = jump.safe;
                self.position = tile_to_world(jump.safe);
            }
        }
        if state != CharacterState::Sit {
            self.flags.remove(CharacterFlags::SITTING);
        }
        if state != CharacterState::Magic {
            self.flags.remove(CharacterFlags::UNINTERRUPTIBLE);
        }
        tracing::trace!(id = %self.id, from = %previous, to = %state, "state change");
        true
    }

    /// Switches state, restarting its animation and entry sound.
    pub(crate) fn set_state(&mut self, state: CharacterState, env: &Env<'_>) {
        let previous = self.state;
        if !self.enter_state(state) {
            return;
        }
        let audio = env.audio();
        if previous.loops_sound() {
            audio.stop_loop(self.id);
        }
        if state.sounds_on_completion() {
            return;
        }
        if let Some(key) = self.sounds.get(&state) {
            if state.loops_sound() {
                audio.play_loop(self.id, key, self.position);
            } else {
                audio.play_once(key, self.position);
            }
        }
    }

    /// Drops the path and returns to the idle state.
    pub fn stand(&mut self, env: &Env<'_>) {
        self.path.clear();
        self.destination = None;
        let idle = self.idle_state();
        self.set_state(idle, env);
    }

    /// Plays `state`'s sound once at the character's position.
    fn play_state_sound(&self, state: CharacterState, env: &Env<'_>) {
        if let Some(key) = self.sounds.get(&state) {
            env.audio().play_once(key, self.position);
        }
    }

    // ===== posture =====

    pub fn sit(&mut self, env: &Env<'_>) -> bool {
        if !self.can_perform_action() || !self.has_animation(CharacterState::Sit) {
            tracing::debug!(id = %self.id, state = %self.state, "sit refused");
            return false;
        }
        self.destination = None;
        self.set_state(CharacterState::Sit, env);
        self.animator.play_once();
        self.flags.insert(CharacterFlags::SITTING);
        true
    }

    pub fn stand_up(&mut self, env: &Env<'_>) {
        if self.is_sitting() {
            self.flags.remove(CharacterFlags::SITTING);
            let idle = self.idle_state();
            self.set_state(idle, env);
        }
    }

    /// Plays a scripted animation once, suspending the state machine until it
    /// completes.
    pub fn begin_special_action(&mut self, animation: &AnimationSpec) -> bool {
        if self.is_death_invoked() || self.special_action.is_some() {
            return false;
        }
        self.path.clear();
        self.destination = None;
        self.special_action = Some(SpecialAction {
            facing: self.direction,
        });
        self.animator.reset(Some(animation));
        self.animator.play_once();
        true
    }

    pub fn is_in_special_action(&self) -> bool {
        self.special_action.is_some()
    }

    fn end_special_action(&mut self) {
        if let Some(action) = self.special_action.take() {
            self.direction = action.facing;
            self.animator.reset(self.animations.get(&self.state));
        }
    }

    // ===== rolls =====

    fn next_seed(&mut self, context: RollContext) -> u64 {
        let seed = compute_seed(self.rng_seed, self.roll_nonce, self.id.0, context);
        self.roll_nonce = self.roll_nonce.wrapping_add(1);
        seed
    }
}

impl fmt::Debug for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Character")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("state", &self.state)
            .field("tile", &self.tile)
            .field("position", &self.position)
            .field("life", &self.life)
            .field("flags", &self.flags)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
