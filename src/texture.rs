//! Wall and door textures, addressed by slot rather than by array index.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::WallPaths;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallFace {
    North,
    South,
    East,
    West,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorFrame {
    First,
    Second,
    Third,
    Fourth,
}

impl DoorFrame {
    pub const ALL: [DoorFrame; 4] = [
        DoorFrame::First,
        DoorFrame::Second,
        DoorFrame::Third,
        DoorFrame::Fourth,
    ];

    /// Columns rendered per animation frame.
    pub const PERIOD: u64 = 10_000;

    /// Frame shown for the given value of the column counter.
    pub fn from_counter(counter: u64) -> Self {
        Self::ALL[((counter / Self::PERIOD) % 4) as usize]
    }

    fn file_name(self) -> &'static str {
        match self {
            DoorFrame::First => "door_1.png",
            DoorFrame::Second => "door_2.png",
            DoorFrame::Third => "door_3.png",
            DoorFrame::Fourth => "door_4.png",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureSlot {
    Wall(WallFace),
    Door(DoorFrame),
}

/// Immutable grid of packed 0x00RRGGBB pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Texture {
    /// Returns `None` if the dimensions are zero or do not match `pixels`.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u32>) -> Option<Self> {
        if width == 0 || height == 0 || pixels.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn solid(width: usize, height: usize, color: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            pixels: vec![color; width.max(1) * height.max(1)],
        }
    }

    /// Decodes an image file into packed RGB.
    pub fn load(path: &Path) -> image::ImageResult<Self> {
        let img = image::open(path)?.to_rgb8();
        let (w, h) = img.dimensions();
        let pixels = img
            .pixels()
            .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
            .collect();
        Ok(Self {
            width: w as usize,
            height: h as usize,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Texel at column `u`, row `v`, clamped to the edges.
    #[inline]
    pub fn sample(&self, u: usize, v: usize) -> u32 {
        let u = u.min(self.width - 1);
        let v = v.min(self.height - 1);
        self.pixels[v * self.width + u]
    }
}

#[derive(Debug, Clone)]
pub struct DoorTextures {
    pub first: Texture,
    pub second: Texture,
    pub third: Texture,
    pub fourth: Texture,
}

impl DoorTextures {
    pub fn get(&self, frame: DoorFrame) -> &Texture {
        match frame {
            DoorFrame::First => &self.first,
            DoorFrame::Second => &self.second,
            DoorFrame::Third => &self.third,
            DoorFrame::Fourth => &self.fourth,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TextureSet {
    pub north: Texture,
    pub south: Texture,
    pub east: Texture,
    pub west: Texture,
    pub doors: Option<DoorTextures>,
}

impl TextureSet {
    /// Loads the four wall textures and, when `door_dir` is given, the four
    /// door animation frames from that directory.
    pub fn load(paths: &WallPaths, door_dir: Option<&Path>) -> Result<Self> {
        let load = |slot: TextureSlot, path: &Path| -> Result<Texture> {
            let tex = Texture::load(path).map_err(|source| Error::Texture {
                slot,
                path: path.to_path_buf(),
                source,
            })?;
            info!(?slot, path = %path.display(), w = tex.width, h = tex.height, "texture loaded");
            Ok(tex)
        };

        let north = load(TextureSlot::Wall(WallFace::North), &paths.north)?;
        let south = load(TextureSlot::Wall(WallFace::South), &paths.south)?;
        let east = load(TextureSlot::Wall(WallFace::East), &paths.east)?;
        let west = load(TextureSlot::Wall(WallFace::West), &paths.west)?;

        let doors = match door_dir {
            Some(dir) => {
                let frame = |f: DoorFrame| {
                    let path: PathBuf = dir.join(f.file_name());
                    load(TextureSlot::Door(f), &path)
                };
                Some(DoorTextures {
                    first: frame(DoorFrame::First)?,
                    second: frame(DoorFrame::Second)?,
                    third: frame(DoorFrame::Third)?,
                    fourth: frame(DoorFrame::Fourth)?,
                })
            }
            None => None,
        };

        Ok(Self {
            north,
            south,
            east,
            west,
            doors,
        })
    }

    pub fn wall(&self, face: WallFace) -> &Texture {
        match face {
            WallFace::North => &self.north,
            WallFace::South => &self.south,
            WallFace::East => &self.east,
            WallFace::West => &self.west,
        }
    }

    /// `None` for door slots when doors were not loaded.
    pub fn get(&self, slot: TextureSlot) -> Option<&Texture> {
        match slot {
            TextureSlot::Wall(face) => Some(self.wall(face)),
            TextureSlot::Door(frame) => self.doors.as_ref().map(|d| d.get(frame)),
        }
    }
}
