/// Distance (in cells) at which fog reaches full black.
pub const FOG_DISTANCE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// 0x00RRGGBB, the layout softbuffer expects.
    #[inline]
    pub const fn pack(self) -> u32 {
        (self.b as u32) | ((self.g as u32) << 8) | ((self.r as u32) << 16)
    }

    #[inline]
    pub const fn unpack(packed: u32) -> Self {
        Self {
            r: ((packed >> 16) & 0xFF) as u8,
            g: ((packed >> 8) & 0xFF) as u8,
            b: (packed & 0xFF) as u8,
        }
    }
}

/// Blends a packed color toward black, linearly in `distance`.
#[inline]
pub fn apply_fog(color: u32, distance: f64) -> u32 {
    let factor = fog_factor(distance);
    if factor <= 0.0 {
        return color & 0x00FF_FFFF;
    }
    let keep = 1.0 - factor;
    let c = Rgb::unpack(color);
    Rgb {
        r: (c.r as f64 * keep) as u8,
        g: (c.g as f64 * keep) as u8,
        b: (c.b as f64 * keep) as u8,
    }
    .pack()
}

#[inline]
pub fn fog_factor(distance: f64) -> f64 {
    if distance.is_nan() {
        return 1.0;
    }
    (distance / FOG_DISTANCE).clamp(0.0, 1.0)
}
