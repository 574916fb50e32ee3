/// Countdown in milliseconds with an optional visual-effect flag.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusTimer {
    remaining_ms: f32,
    visual: bool,
}

impl StatusTimer {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining_ms > 0.0
    }

    #[inline]
    pub fn remaining_ms(&self) -> f32 {
        self.remaining_ms
    }

    /// Visual flag; only meaningful while the timer runs.
    #[inline]
    pub fn has_visual(&self) -> bool {
        self.visual && self.is_active()
    }

    /// Starts or extends the timer. A running timer keeps the later expiry.
    pub fn start(&mut self, duration_ms: f32, visual: bool) {
        self.remaining_ms = self.remaining_ms.max(duration_ms);
        self.visual |= visual;
    }

    /// Subtracts `dt`, floored at 0. Returns true on the tick it runs out.
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.is_active() {
            return false;
        }
        self.remaining_ms = (self.remaining_ms - dt).max(0.0);
        if self.remaining_ms == 0.0 {
            self.visual = false;
            return true;
        }
        false
    }

    pub fn clear(&mut self) {
        *self = StatusTimer::default();
    }
}
