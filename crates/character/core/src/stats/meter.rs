/// A pool clamped to `[0, max]`.
///
/// `floor` is the smallest maximum the pool accepts, so a life pool can
/// never be configured with a zero ceiling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Meter {
    current: i32,
    max: i32,
    floor: i32,
}

impl Meter {
    pub fn new(current: i32, max: i32) -> Self {
        Self::with_floor(current, max, 0)
    }

    pub fn with_floor(current: i32, max: i32, floor: i32) -> Self {
        let floor = floor.max(0);
        let max = max.max(floor);
        Self {
            current: current.clamp(0, max),
            max,
            floor,
        }
    }

    #[inline]
    pub const fn current(&self) -> i32 {
        self.current
    }

    #[inline]
    pub const fn max(&self) -> i32 {
        self.max
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    pub fn is_full(&self) -> bool {
        self.current == self.max
    }

    /// Sets the current value, clamped. Returns the applied change.
    pub fn set(&mut self, value: i32) -> i32 {
        let before = self.current;
        self.current = value.clamp(0, self.max);
        self.current - before
    }

    /// Adds `delta` (possibly negative), clamped. Returns the applied change.
    pub fn add(&mut self, delta: i32) -> i32 {
        self.set(self.current.saturating_add(delta))
    }

    /// Changes the ceiling, pulling the current value down if needed.
    pub fn set_max(&mut self, max: i32) {
        self.max = max.max(self.floor);
        self.current = self.current.min(self.max);
    }

    pub fn refill(&mut self) {
        self.current = self.max;
    }

    pub fn drain(&mut self) {
        self.current = 0;
    }
}

impl Default for Meter {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
