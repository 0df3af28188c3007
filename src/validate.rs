//! Enclosure check: every non-wall cell reachable from the spawn must stay
//! inside the map as it was written.

use crate::error::{Error, Result};
use crate::map::{Cell, MapModel, Spawn};

/// Cells visited by a flood fill, indexed by `(row, col)` on the padded grid.
#[derive(Debug, Clone)]
pub struct Visited {
    width: usize,
    bits: Vec<bool>,
    count: usize,
}

impl Visited {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            bits: vec![false; width * height],
            count: 0,
        }
    }

    /// Marks a cell, returning `false` if it was already marked.
    fn mark(&mut self, row: usize, col: usize) -> bool {
        let idx = row * self.width + col;
        if self.bits[idx] {
            return false;
        }
        self.bits[idx] = true;
        self.count += 1;
        true
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        col < self.width && self.bits.get(row * self.width + col).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Outcome of a flood fill.
#[derive(Debug, Clone)]
pub enum Fill {
    /// Every reachable cell is bounded.
    Enclosed(Visited),
    /// The fill tried to step to `(row, col)`, outside the written map.
    Escaped {
        row: isize,
        col: isize,
        visited: Visited,
    },
}

/// 4-connected flood fill from `(row, col)` over non-wall cells.
///
/// Bounds are the row count and the *unpadded* length of each row, so a
/// short row that is reachable counts as an opening even though the padded
/// grid has a wall there.
pub fn flood_fill(map: &MapModel, row: usize, col: usize) -> Fill {
    let mut visited = Visited::new(map.width(), map.height());
    let mut stack: Vec<(isize, isize)> = vec![(row as isize, col as isize)];

    while let Some((r, c)) = stack.pop() {
        if r < 0 || r as usize >= map.height() || c < 0 || c as usize >= map.row_len(r as usize) {
            return Fill::Escaped {
                row: r,
                col: c,
                visited,
            };
        }
        if map.get(c, r) == Some(Cell::Wall) {
            continue;
        }
        if !visited.mark(r as usize, c as usize) {
            continue;
        }
        stack.extend([(r - 1, c), (r + 1, c), (r, c - 1), (r, c + 1)]);
    }

    Fill::Enclosed(visited)
}

/// Rejects a map whose reachable area is not closed off by walls.
pub fn check_enclosure(map: &MapModel, spawn: &Spawn) -> Result<Visited> {
    match flood_fill(map, spawn.row, spawn.col) {
        Fill::Enclosed(visited) => Ok(visited),
        Fill::Escaped { row, col, .. } => Err(Error::Enclosure { row, col }),
    }
}
