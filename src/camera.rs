use crate::map::Spawn;

/// Player pose. `dir` and `plane` are kept perpendicular: every rotation is
/// applied to both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pos: [f64; 2],   // (x, y) in grid units
    pub dir: [f64; 2],   // view direction
    pub plane: [f64; 2], // camera plane, length sets the FOV
}

impl Camera {
    pub fn from_spawn(spawn: &Spawn) -> Self {
        Self {
            pos: spawn.position(),
            dir: spawn.facing.direction(),
            plane: spawn.facing.plane(),
        }
    }

    /// Rotates view and plane by `angle` radians. Positive turns toward
    /// the plane (clockwise on screen, since +y points down the map).
    pub fn rotate(&mut self, angle: f64) {
        let (s, c) = angle.sin_cos();
        self.dir = rotate2(self.dir, c, s);
        self.plane = rotate2(self.plane, c, s);
    }

    /// Maps screen column `x` to `[-1, 1)` across the camera plane.
    #[inline]
    pub fn camera_x(x: usize, screen_width: usize) -> f64 {
        2.0 * x as f64 / screen_width as f64 - 1.0
    }

    /// Direction of the ray through screen column `x`.
    #[inline]
    pub fn ray_dir(&self, x: usize, screen_width: usize) -> [f64; 2] {
        let cx = Self::camera_x(x, screen_width);
        [
            self.dir[0] + self.plane[0] * cx,
            self.dir[1] + self.plane[1] * cx,
        ]
    }
}

#[inline]
fn rotate2(v: [f64; 2], c: f64, s: f64) -> [f64; 2] {
    [v[0] * c - v[1] * s, v[0] * s + v[1] * c]
}
