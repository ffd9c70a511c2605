//! Horizontal follow camera: a pure function of the character's position,
//! cached only so shells can read the latest offset.

/// Keeps the focus centered, clamped to the map's horizontal extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub x: f32,
    pub viewport_width: f32,
}

impl Camera {
    pub fn new(viewport_width: f32) -> Self {
        Self {
            x: 0.0,
            viewport_width,
        }
    }

    /// Recompute the offset. The lower clamp is applied first, so a map
    /// narrower than the viewport resolves to the (negative) right-edge
    /// clamp rather than zero.
    pub fn follow(&mut self, focus_x: f32, map_width: f32) {
        self.x = (focus_x - self.viewport_width * 0.5)
            .max(0.0)
            .min(map_width - self.viewport_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_on_the_focus() {
        let mut camera = Camera::new(320.0);
        camera.follow(500.0, 1000.0);
        assert_eq!(camera.x, 340.0);
    }

    #[test]
    fn clamps_at_the_left_edge() {
        let mut camera = Camera::new(320.0);
        camera.follow(50.0, 1000.0);
        assert_eq!(camera.x, 0.0);
    }

    #[test]
    fn clamps_at_the_right_edge() {
        let mut camera = Camera::new(320.0);
        camera.follow(990.0, 1000.0);
        assert_eq!(camera.x, 680.0);
    }

    #[test]
    fn recompute_is_stateless() {
        let mut camera = Camera::new(320.0);
        camera.follow(990.0, 1000.0);
        camera.follow(500.0, 1000.0);
        assert_eq!(camera.x, 340.0, "no history leaks into the next frame");
    }

    #[test]
    fn narrow_map_resolves_to_right_edge_clamp() {
        let mut camera = Camera::new(320.0);
        camera.follow(100.0, 200.0);
        assert_eq!(camera.x, -120.0);
    }
}
