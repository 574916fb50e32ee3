//! Frame counter for the animation of the current state.

use crate::config::AnimationSpec;

/// Advances the frame index of one animation.
///
/// Looping animations wrap around; once-animations stop on their last frame
/// and report completion exactly once.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Animator {
    asset: Option<String>,
    frame: u16,
    frames: u16,
    interval_ms: f32,
    elapsed_ms: f32,
    once: bool,
    finished: bool,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restarts with a new asset; `None` leaves a frameless animator.
    pub fn reset(&mut self, spec: Option<&AnimationSpec>) {
        *self = match spec {
            Some(spec) => Self {
                asset: Some(spec.asset.clone()),
                frames: spec.frames_per_direction,
                interval_ms: spec.interval_ms.max(1) as f32,
                ..Self::default()
            },
            None => Self::default(),
        };
    }

    /// Plays the current animation once instead of looping.
    pub fn play_once(&mut self) {
        self.once = true;
        self.finished = self.frames == 0;
    }

    /// Advances by `dt` milliseconds.
    ///
    /// Returns `true` when a once-animation completes or a looping one wraps.
    pub fn update(&mut self, dt: f32) -> bool {
        if self.frames == 0 || (self.once && self.finished) {
            return false;
        }
        self.elapsed_ms += dt.max(0.0);
        let mut completed = false;
        while self.elapsed_ms >= self.interval_ms {
            self.elapsed_ms -= self.interval_ms;
            self.frame += 1;
            if self.frame >= self.frames {
                completed = true;
                if self.once {
                    self.clamp_to_last();
                    break;
                }
                self.frame = 0;
            }
        }
        completed
    }

    /// Holds the last frame and marks the animation finished.
    pub fn clamp_to_last(&mut self) {
        self.frame = self.frames.saturating_sub(1);
        self.elapsed_ms = 0.0;
        self.finished = true;
    }

    pub fn asset(&self) -> Option<&str> {
        self.asset.as_deref()
    }

    #[inline]
    pub fn frame(&self) -> u16 {
        self.frame
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_once(&self) -> bool {
        self.once
    }
}
