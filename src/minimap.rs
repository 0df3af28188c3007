//! Overhead map overlay drawn in the top-left corner.

use crate::camera::Camera;
use crate::color::Rgb;
use crate::framebuffer::FrameBuffer;
use crate::map::{Cell, MapModel};

pub const TILE_SIZE: usize = 10;
pub const MAP_OFFSET: usize = 10;
/// Cells shown on each side of the player.
pub const RADIUS: isize = 5;

const WALL: u32 = Rgb::WHITE.pack();
const FLOOR: u32 = Rgb::BLACK.pack();
const PLAYER: u32 = Rgb::new(255, 0, 0).pack();

/// Map window around the player, clamped to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start_x: isize,
    pub start_y: isize,
    pub end_x: isize,
    pub end_y: isize,
}

impl Window {
    pub fn around(map: &MapModel, pos: [f64; 2]) -> Self {
        let px = pos[0].floor() as isize;
        let py = pos[1].floor() as isize;
        Self {
            start_x: (px - RADIUS).max(0),
            start_y: (py - RADIUS).max(0),
            end_x: (px + RADIUS).min(map.width() as isize - 1),
            end_y: (py + RADIUS).min(map.height() as isize - 1),
        }
    }
}

fn tile(fb: &mut FrameBuffer, col: isize, row: isize, color: u32) {
    if col < 0 || row < 0 {
        return;
    }
    fb.fill_rect(
        MAP_OFFSET + col as usize * TILE_SIZE,
        MAP_OFFSET + row as usize * TILE_SIZE,
        TILE_SIZE,
        TILE_SIZE,
        color,
    );
}

pub fn draw_minimap(fb: &mut FrameBuffer, map: &MapModel, camera: &Camera) {
    let win = Window::around(map, camera.pos);
    for y in win.start_y..=win.end_y {
        for x in win.start_x..=win.end_x {
            let color = match map.get(x, y) {
                Some(Cell::Wall) => WALL,
                _ => FLOOR,
            };
            tile(fb, x - win.start_x, y - win.start_y, color);
        }
    }
    let px = camera.pos[0].floor() as isize - win.start_x;
    let py = camera.pos[1].floor() as isize - win.start_y;
    tile(fb, px, py, PLAYER);
}
