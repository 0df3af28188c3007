use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::camera::Camera;
use crate::color::{Rgb, apply_fog};
use crate::framebuffer::FrameBuffer;
use crate::map::MapModel;
use crate::raycast::{RayHit, Side, cast_column};
use crate::texture::{DoorFrame, Texture, TextureSet, TextureSlot, WallFace};

/// Floor and ceiling colors, packed once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub floor: u32,
    pub ceiling: u32,
}

impl Palette {
    pub fn new(floor: Rgb, ceiling: Rgb) -> Self {
        Self {
            floor: floor.pack(),
            ceiling: ceiling.pack(),
        }
    }
}

/// Render state that outlives a frame.
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    /// Columns rendered so far; drives the door animation.
    pub columns_rendered: u64,
}

/// Vertical extent of a wall slice on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallSpan {
    /// Unclipped projected height.
    pub line_height: i64,
    /// First wall row.
    pub draw_start: usize,
    /// One past the last wall row; the floor starts here.
    pub draw_end: usize,
}

// Caps the projected height when the player is almost touching a wall.
const MAX_LINE_SCALE: f64 = 64.0;

pub fn wall_span(distance: f64, screen_h: usize) -> WallSpan {
    let h = screen_h as f64;
    let line_height = if distance > 0.0 {
        (h / distance).floor().min(h * MAX_LINE_SCALE)
    } else {
        h * MAX_LINE_SCALE
    } as i64;
    let sh = screen_h as i64;
    let draw_start = ((sh - line_height) / 2).clamp(0, (sh - 1).max(0));
    let draw_end = ((sh + line_height) / 2).clamp(0, (sh - 1).max(0));
    WallSpan {
        line_height,
        draw_start: draw_start as usize,
        draw_end: draw_end.max(draw_start) as usize,
    }
}

/// Which cardinal texture a wall hit shows.
pub fn wall_face(hit: &RayHit) -> WallFace {
    match hit.side {
        Side::Horizontal if hit.ray_dir[1] < 0.0 => WallFace::North,
        Side::Horizontal => WallFace::South,
        Side::Vertical if hit.ray_dir[0] < 0.0 => WallFace::West,
        Side::Vertical => WallFace::East,
    }
}

pub fn select_slot(hit: &RayHit, column_counter: u64) -> TextureSlot {
    if hit.cell.is_door() {
        TextureSlot::Door(DoorFrame::from_counter(column_counter))
    } else {
        TextureSlot::Wall(wall_face(hit))
    }
}

/// Texture column for a hit, mirrored so a face reads the same from both sides.
pub fn texture_x(hit: &RayHit, tex_width: usize) -> usize {
    let tex_x = ((hit.wall_fraction * tex_width as f64) as usize).min(tex_width - 1);
    let flip = match hit.side {
        Side::Vertical => hit.ray_dir[0] > 0.0,
        Side::Horizontal => hit.ray_dir[1] < 0.0,
    };
    if flip { tex_width - tex_x - 1 } else { tex_x }
}

/// Texture row for screen row `y` inside `span`.
#[inline]
pub fn texture_y(y: usize, span: &WallSpan, screen_h: usize, tex_height: usize) -> usize {
    if span.line_height <= 0 {
        return 0;
    }
    // 8.8 fixed point, measured from the unclipped top of the slice
    let d = y as i64 * 256 - screen_h as i64 * 128 + span.line_height * 128;
    let tex_y = (d * tex_height as i64 / span.line_height) / 256;
    tex_y.clamp(0, tex_height as i64 - 1) as usize
}

/// Distance the ceiling at screen row `y` stands for, in cells.
#[inline]
pub fn ceiling_distance(y: usize, screen_h: usize) -> f64 {
    let denom = (screen_h as i64 - 2 * y as i64).abs();
    if denom == 0 { 1.0 } else { screen_h as f64 / denom as f64 }
}

#[inline]
pub fn floor_distance(y: usize, screen_h: usize) -> f64 {
    let denom = (2 * y as i64 - screen_h as i64).abs();
    if denom == 0 { 1.0 } else { screen_h as f64 / denom as f64 }
}

/// Casts one ray per column and draws the whole frame.
///
/// Rays are cast in parallel; the map and camera are only read. Each column
/// gets `columns_rendered + x` as its animation counter, so the result
/// matches a left-to-right sweep.
pub fn render_frame(
    fb: &mut FrameBuffer,
    map: &MapModel,
    camera: &Camera,
    textures: &TextureSet,
    palette: &Palette,
    state: &mut RenderState,
) {
    let width = fb.width();
    let hits: Vec<RayHit> = (0..width)
        .into_par_iter()
        .map(|x| cast_column(map, camera, x, width))
        .collect();

    let base = state.columns_rendered;
    for (x, hit) in hits.iter().enumerate() {
        let slot = select_slot(hit, base.wrapping_add(x as u64));
        let texture = textures
            .get(slot)
            .unwrap_or_else(|| textures.wall(wall_face(hit)));
        draw_column(fb, x, hit, texture, palette);
    }
    state.columns_rendered = base.wrapping_add(width as u64);
}

/// Ceiling, textured wall slice and floor for one column, all fogged.
pub fn draw_column(
    fb: &mut FrameBuffer,
    x: usize,
    hit: &RayHit,
    texture: &Texture,
    palette: &Palette,
) {
    let h = fb.height();
    let span = wall_span(hit.distance, h);

    for y in 0..span.draw_start {
        fb.put(x, y, apply_fog(palette.ceiling, ceiling_distance(y, h)));
    }

    let tex_x = texture_x(hit, texture.width());
    for y in span.draw_start..span.draw_end {
        let tex_y = texture_y(y, &span, h, texture.height());
        fb.put(x, y, apply_fog(texture.sample(tex_x, tex_y), hit.distance));
    }

    for y in span.draw_end..h {
        fb.put(x, y, apply_fog(palette.floor, floor_distance(y, h)));
    }
}
