/// Fixed-size pixel surface the renderers draw into. Pixels are packed
/// 0x00RRGGBB, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Writes one pixel; out-of-bounds writes are dropped.
    #[inline]
    pub fn put(&mut self, x: usize, y: usize, color: u32) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    /// Fills the clipped rectangle `[x, x + w) × [y, y + h)`.
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        let x1 = (x + w).min(self.width);
        let y1 = (y + h).min(self.height);
        for row in y.min(y1)..y1 {
            let start = row * self.width;
            self.pixels[start + x.min(x1)..start + x1].fill(color);
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::FrameBuffer;

    #[test]
    fn put_ignores_out_of_bounds() {
        let mut fb = FrameBuffer::new(4, 3);
        fb.put(3, 2, 9);
        fb.put(4, 0, 9);
        fb.put(0, 3, 9);
        assert_eq!(fb.get(3, 2), Some(9));
        assert_eq!(fb.pixels().iter().filter(|&&p| p == 9).count(), 1);
        assert_eq!(fb.get(4, 0), None);
    }

    #[test]
    fn fill_rect_is_clipped() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.fill_rect(2, 2, 10, 10, 5);
        assert_eq!(fb.pixels().iter().filter(|&&p| p == 5).count(), 4);
        fb.fill_rect(8, 8, 2, 2, 6);
        assert!(!fb.pixels().contains(&6));
    }
}
