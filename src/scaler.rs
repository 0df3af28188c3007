//! Stretches the fixed-size frame onto a window surface of any size.

use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

use crate::framebuffer::FrameBuffer;

/// Per destination column and row: the two source neighbors and the
/// 8.8 fixed-point weight of the second one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaleLut {
    dst_w: usize,
    dst_h: usize,
    cols: Vec<(usize, usize, u32)>,
    rows: Vec<(usize, usize, u32)>,
}

fn axis(dst: usize, src: usize) -> Vec<(usize, usize, u32)> {
    if src == 0 {
        return Vec::new();
    }
    let ratio = src as f32 / dst.max(1) as f32;
    (0..dst)
        .map(|i| {
            let f = i as f32 * ratio;
            let lo = (f.floor() as usize).min(src - 1);
            let hi = (lo + 1).min(src - 1);
            let w = ((f - lo as f32) * 256.0).round().clamp(0.0, 256.0) as u32;
            (lo, hi, w)
        })
        .collect()
}

impl ScaleLut {
    pub fn new(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> Self {
        Self {
            dst_w,
            dst_h,
            cols: axis(dst_w, src_w),
            rows: axis(dst_h, src_h),
        }
    }

    /// True when the table was built for a `dst_w × dst_h` surface.
    pub fn fits(&self, dst_w: usize, dst_h: usize) -> bool {
        self.dst_w == dst_w && self.dst_h == dst_h
    }
}

#[inline]
fn lerp_color(a: u32, b: u32, w256: u32) -> u32 {
    let inv = 256 - w256;
    // R and B share one multiply (00RR00BB); G on its own.
    let rb = (((a & 0x00FF_00FF) * inv + (b & 0x00FF_00FF) * w256) >> 8) & 0x00FF_00FF;
    let g = (((a & 0x0000_FF00) * inv + (b & 0x0000_FF00) * w256) >> 8) & 0x0000_FF00;
    rb | g
}

/// Bilinear stretch of `src` into `dst`, one row per rayon task.
pub fn blit_stretched(dst: &mut [u32], lut: &ScaleLut, src: &FrameBuffer) {
    if lut.dst_w == 0 || lut.cols.is_empty() || lut.rows.is_empty() {
        return;
    }
    let sw = src.width();
    let px = src.pixels();
    dst.par_chunks_mut(lut.dst_w)
        .enumerate()
        .for_each(|(y, dst_row)| {
            let Some(&(y0, y1, wy)) = lut.rows.get(y) else {
                return;
            };
            let (row0, row1) = (y0 * sw, y1 * sw);
            for (x, out) in dst_row.iter_mut().enumerate() {
                let (x0, x1, wx) = lut.cols[x];
                let top = lerp_color(px[row0 + x0], px[row0 + x1], wx);
                let bot = lerp_color(px[row1 + x0], px[row1 + x1], wx);
                *out = lerp_color(top, bot, wy);
            }
        });
}
