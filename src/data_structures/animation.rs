//! Elapsed-time driven motion.

use instant::Duration;

use cgmath::Vector2;

/// Moves a point around a circle once every `loop_duration`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircularOffset {
    pub loop_duration: Duration,
    pub radius: f32,
}

impl CircularOffset {
    pub fn new(loop_duration: Duration, radius: f32) -> Self {
        Self {
            loop_duration,
            radius,
        }
    }

    /// Offset at `elapsed`, starting at `(radius, 0)` and turning counter-clockwise.
    pub fn offset_at(&self, elapsed: Duration) -> Vector2<f32> {
        let loop_secs = self.loop_duration.as_secs_f32();
        if loop_secs <= 0.0 {
            return Vector2::new(self.radius, 0.0);
        }
        let angle = std::f32::consts::TAU * (elapsed.as_secs_f32() % loop_secs) / loop_secs;
        let (sin, cos) = angle.sin_cos();
        Vector2::new(cos * self.radius, sin * self.radius)
    }
}

impl Default for CircularOffset {
    fn default() -> Self {
        Self::new(Duration::from_secs(5), 0.5)
    }
}
