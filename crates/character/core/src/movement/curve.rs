use crate::geometry::Pixel;

/// Samples used to approximate the arc length of a curve.
const LENGTH_SAMPLES: usize = 16;

/// Quadratic Bezier motion between two points at constant speed.
///
/// The control point sits above the midpoint, lifted by a fraction of the
/// span, which gives thrown and knocked-back characters an arc.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveMove {
    from: Pixel,
    control: Pixel,
    to: Pixel,
    length: f32,
    /// Pixels per second.
    speed: f32,
    traveled: f32,
}

impl CurveMove {
    pub fn new(from: Pixel, to: Pixel, speed: f32, height_ratio: f32) -> Self {
        let span = from.distance(to);
        let control = from.lerp(to, 0.5) - Pixel::new(0.0, span * height_ratio);
        let mut curve = Self {
            from,
            control,
            to,
            length: 0.0,
            speed: speed.max(1.0),
            traveled: 0.0,
        };
        curve.length = curve.arc_length();
        curve
    }

    /// Point at parameter `t ∈ [0, 1]`.
    pub fn point_at(&self, t: f32) -> Pixel {
        let t = t.clamp(0.0, 1.0);
        let a = self.from.lerp(self.control, t);
        let b = self.control.lerp(self.to, t);
        a.lerp(b, t)
    }

    fn arc_length(&self) -> f32 {
        let mut previous = self.from;
        let mut total = 0.0;
        for step in 1..=LENGTH_SAMPLES {
            let point = self.point_at(step as f32 / LENGTH_SAMPLES as f32);
            total += previous.distance(point);
            previous = point;
        }
        total
    }

    pub fn destination(&self) -> Pixel {
        self.to
    }

    pub fn is_finished(&self) -> bool {
        self.traveled >= self.length
    }

    /// Advances by `dt` milliseconds and returns the new position.
    pub fn advance(&mut self, dt: f32) -> Pixel {
        self.traveled = (self.traveled + self.speed * dt.max(0.0) / 1000.0).min(self.length);
        if self.is_finished() {
            return self.to;
        }
        self.point_at(self.traveled / self.length)
    }
}
