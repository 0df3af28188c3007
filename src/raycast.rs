//! Per-column DDA traversal of the map grid.

use crate::camera::Camera;
use crate::map::{Cell, MapModel};

/// Which kind of grid line the ray crossed last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Crossed an x boundary (a wall running north-south).
    Vertical,
    /// Crossed a y boundary (a wall running east-west).
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub side: Side,
    pub map_x: isize,
    pub map_y: isize,
    /// Struck cell; anything outside the grid reads as a wall.
    pub cell: Cell,
    /// Distance to the camera plane, not to the eye.
    pub distance: f64,
    /// Where along the struck face the ray landed, in `[0, 1)`.
    pub wall_fraction: f64,
    pub ray_dir: [f64; 2],
    /// Grid lines crossed before the hit.
    pub steps: usize,
}

/// Casts the ray for screen column `x`.
#[inline]
pub fn cast_column(map: &MapModel, camera: &Camera, x: usize, screen_width: usize) -> RayHit {
    cast_ray(map, camera.pos, camera.ray_dir(x, screen_width))
}

/// Walks the grid from `pos` along `ray_dir` until it enters a cell that is
/// neither empty nor an open door.
pub fn cast_ray(map: &MapModel, pos: [f64; 2], ray_dir: [f64; 2]) -> RayHit {
    let [px, py] = pos;
    let [rdx, rdy] = ray_dir;

    let mut map_x = px.floor() as isize;
    let mut map_y = py.floor() as isize;

    // Length of ray from one x or y side to the next.
    let delta_x = if rdx == 0.0 { f64::INFINITY } else { (1.0 / rdx).abs() };
    let delta_y = if rdy == 0.0 { f64::INFINITY } else { (1.0 / rdy).abs() };

    let (step_x, mut side_x) = if rdx < 0.0 {
        (-1, (px - map_x as f64) * delta_x)
    } else {
        (1, (map_x as f64 + 1.0 - px) * delta_x)
    };
    let (step_y, mut side_y) = if rdy < 0.0 {
        (-1, (py - map_y as f64) * delta_y)
    } else {
        (1, (map_y as f64 + 1.0 - py) * delta_y)
    };
    // 0 * inf on an exact grid line
    if side_x.is_nan() {
        side_x = f64::INFINITY;
    }
    if side_y.is_nan() {
        side_y = f64::INFINITY;
    }

    let mut side;
    let mut steps = 0;
    // Outside the grid reads as wall, so this always ends.
    let cell = loop {
        if side_x < side_y {
            side_x += delta_x;
            map_x += step_x;
            side = Side::Vertical;
        } else {
            side_y += delta_y;
            map_y += step_y;
            side = Side::Horizontal;
        }
        steps += 1;
        let cell = map.cell_or_wall(map_x, map_y);
        if !cell.is_passable() {
            break cell;
        }
    };

    let distance = match side {
        Side::Vertical => (map_x as f64 - px + (1 - step_x) as f64 / 2.0) / rdx,
        Side::Horizontal => (map_y as f64 - py + (1 - step_y) as f64 / 2.0) / rdy,
    };

    let along = match side {
        Side::Vertical => py + distance * rdy,
        Side::Horizontal => px + distance * rdx,
    };

    RayHit {
        side,
        map_x,
        map_y,
        cell,
        distance,
        wall_fraction: fract(along),
        ray_dir,
        steps,
    }
}

/// Fractional part in `[0, 1)`; tiny negatives would otherwise round to 1.
#[inline]
fn fract(v: f64) -> f64 {
    let f = v - v.floor();
    if f >= 1.0 || !f.is_finite() { 0.0 } else { f }
}
