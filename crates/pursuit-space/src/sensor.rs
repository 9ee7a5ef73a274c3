//! Radial raycast sensor.
//!
//! Casts `ray_count` rays evenly spaced over `arc_degrees`, starting at
//! `start_direction` and rotating counter-clockwise after each ray. Each
//! ray yields exactly one distance; a miss reports `max_range`.

use pursuit_core::Vec2;

/// Configuration and scan logic for a fan of sensing rays.
///
/// Defaults: 8 rays over a full 360° turn, 20 units of range, first ray
/// pointing up.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialSensor {
    /// Number of rays per scan. Must be at least 1.
    pub ray_count: usize,
    /// Total arc covered by the fan, in degrees. The angular step is
    /// `arc_degrees / ray_count`.
    pub arc_degrees: f32,
    /// Maximum ray length; also the sentinel reported for a miss.
    pub max_range: f32,
    /// Direction of the first ray. Normalized before use.
    pub start_direction: Vec2,
}

impl Default for RadialSensor {
    fn default() -> Self {
        Self {
            ray_count: 8,
            arc_degrees: 360.0,
            max_range: 20.0,
            start_direction: Vec2::UP,
        }
    }
}

impl RadialSensor {
    /// Check structural invariants: at least one ray, finite arc, finite
    /// positive range, non-zero start direction.
    pub fn validate(&self) -> Result<(), String> {
        if self.ray_count == 0 {
            return Err("ray_count must be at least 1".to_string());
        }
        if !self.arc_degrees.is_finite() {
            return Err(format!("arc_degrees must be finite, got {}", self.arc_degrees));
        }
        if !self.max_range.is_finite() || self.max_range <= 0.0 {
            return Err(format!(
                "max_range must be finite and positive, got {}",
                self.max_range
            ));
        }
        if self.start_direction.normalized().is_none() {
            return Err(format!(
                "start_direction must be a non-zero finite vector, got {}",
                self.start_direction
            ));
        }
        Ok(())
    }

    /// Angular step between consecutive rays, in radians.
    pub fn step_radians(&self) -> f32 {
        if self.ray_count == 0 {
            return 0.0;
        }
        (self.arc_degrees / self.ray_count as f32).to_radians()
    }

    /// Ray directions in cast order.
    ///
    /// Each direction is the previous one rotated by
    /// [`step_radians`](Self::step_radians).
    pub fn directions(&self) -> impl Iterator<Item = Vec2> {
        let (sin, cos) = self.step_radians().sin_cos();
        let start = self.start_direction.normalized().unwrap_or(Vec2::UP);
        std::iter::successors(Some(start), move |d| Some(d.rotated_by(sin, cos)))
            .take(self.ray_count)
    }

    /// Scan from `origin`, returning `ray_count` distances.
    ///
    /// `hit_test(origin, direction, max_range)` returns the distance to
    /// the nearest obstacle along the ray, or `None` when nothing is hit.
    pub fn scan<F>(&self, origin: Vec2, hit_test: F) -> Vec<f32>
    where
        F: FnMut(Vec2, Vec2, f32) -> Option<f32>,
    {
        let mut out = Vec::with_capacity(self.ray_count);
        self.scan_into(origin, hit_test, &mut out);
        out
    }

    /// Like [`scan`](Self::scan), appending into a caller-owned buffer.
    pub fn scan_into<F>(&self, origin: Vec2, mut hit_test: F, out: &mut Vec<f32>)
    where
        F: FnMut(Vec2, Vec2, f32) -> Option<f32>,
    {
        let max_range = self.max_range;
        out.extend(self.directions().map(|dir| {
            match hit_test(origin, dir, max_range) {
                Some(d) if d.is_finite() => d.clamp(0.0, max_range),
                _ => max_range,
            }
        }));
    }
}
