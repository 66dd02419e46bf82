use serde::{Deserialize, Serialize};

use kitchen_core::geometry::Vec3;

/// Extra distance so the assembly does not fill the whole view.
const ZOOM_OUT_FACTOR: f64 = 1.2;

/// Where the camera looks from and at, derived from the assembly extents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CameraFrame {
    pub target: Vec3,
    pub position: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f64,
    pub min_distance: f64,
    pub max_distance: f64,
}

impl CameraFrame {
    pub fn new(fov: f64) -> Self {
        Self {
            target: Vec3::ZERO,
            position: Vec3::new(0.0, 0.0, 1000.0),
            fov,
            min_distance: 100.0,
            max_distance: 7500.0,
        }
    }

    /// Frame an assembly of the given overall width and height.
    pub fn fit(&mut self, width: f64, height: f64) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }

        self.target = Vec3::new(0.0, height / 2.0, 0.0);

        let max_dim = width.max(height);
        let half_fov = (self.fov / 2.0).to_radians();
        let distance = (max_dim / 2.0 / half_fov.tan() * ZOOM_OUT_FACTOR)
            .clamp(self.min_distance, self.max_distance);

        // Looking in from the left so the side of the run is visible.
        self.position = Vec3::new(-width, height, distance);
    }

    pub fn distance(&self) -> f64 {
        self.position.distance_to(&self.target)
    }
}

impl Default for CameraFrame {
    fn default() -> Self {
        Self::new(75.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_targets_mid_height() {
        let mut frame = CameraFrame::new(90.0);
        frame.fit(1200.0, 1200.0);
        assert!((frame.target.y - 600.0).abs() < 1e-9);
        // tan(45°) = 1, so distance = 600 * 1.2
        assert!((frame.position.z - 720.0).abs() < 1e-6);
        assert!((frame.position.x + 1200.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_ignores_empty_assembly() {
        let mut frame = CameraFrame::default();
        let before = frame.position;
        frame.fit(0.0, 800.0);
        assert_eq!(frame.position, before);
    }

    #[test]
    fn test_distance_clamped() {
        let mut frame = CameraFrame::new(10.0);
        frame.fit(100_000.0, 100.0);
        assert!((frame.position.z - 7500.0).abs() < 1e-9);
    }
}
