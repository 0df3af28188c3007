//! Typed level grid parsed from the map body of a scene file.

use crate::error::ParseError;

/// Length of the camera plane; 0.66 gives a horizontal FOV of about 66°.
pub const FOV_PLANE: f64 = 0.66;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall,
    DoorClosed,
    DoorOpen,
}

impl Cell {
    /// Cells the player and rays can pass through.
    #[inline]
    pub fn is_passable(self) -> bool {
        matches!(self, Cell::Empty | Cell::DoorOpen)
    }

    #[inline]
    pub fn is_door(self) -> bool {
        matches!(self, Cell::DoorClosed | Cell::DoorOpen)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    North,
    South,
    East,
    West,
}

impl Facing {
    fn from_marker(c: char) -> Option<Self> {
        match c {
            'N' => Some(Facing::North),
            'S' => Some(Facing::South),
            'E' => Some(Facing::East),
            'W' => Some(Facing::West),
            _ => None,
        }
    }

    /// Unit view direction; +y points down the map (south).
    pub fn direction(self) -> [f64; 2] {
        match self {
            Facing::North => [0.0, -1.0],
            Facing::South => [0.0, 1.0],
            Facing::East => [1.0, 0.0],
            Facing::West => [-1.0, 0.0],
        }
    }

    /// Camera plane: the direction turned a quarter clockwise, scaled by [`FOV_PLANE`].
    pub fn plane(self) -> [f64; 2] {
        let [dx, dy] = self.direction();
        [-dy * FOV_PLANE, dx * FOV_PLANE]
    }
}

/// Where the start marker was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawn {
    pub col: usize,
    pub row: usize,
    pub facing: Facing,
}

impl Spawn {
    /// Center of the spawn cell in grid units.
    pub fn position(&self) -> [f64; 2] {
        [self.col as f64 + 0.5, self.row as f64 + 0.5]
    }
}

/// Rectangular grid of cells. Rows shorter than `width` are padded with
/// walls; the unpadded length of every row is kept for the enclosure check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapModel {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
    row_lengths: Vec<usize>,
}

impl MapModel {
    /// Parses raw map rows. `doors` enables the `D` character.
    pub fn parse(rows: &[&str], doors: bool) -> Result<(MapModel, Spawn), ParseError> {
        let row_lengths: Vec<usize> = rows.iter().map(|r| r.chars().count()).collect();
        let width = row_lengths.iter().copied().max().unwrap_or(0);
        let height = rows.len();

        let mut cells = vec![Cell::Wall; width * height];
        let mut spawns = Vec::new();

        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '0' => Cell::Empty,
                    // Unmapped holes are solid.
                    '1' | ' ' => Cell::Wall,
                    'D' if doors => Cell::DoorClosed,
                    _ => match Facing::from_marker(ch) {
                        Some(facing) => {
                            spawns.push(Spawn { col, row, facing });
                            Cell::Empty
                        }
                        None => return Err(ParseError::IllegalChar { row, col, ch }),
                    },
                };
                cells[row * width + col] = cell;
            }
        }

        let spawn = match spawns.as_slice() {
            [only] => *only,
            other => return Err(ParseError::StartCount(other.len())),
        };

        Ok((
            MapModel {
                cells,
                width,
                height,
                row_lengths,
            },
            spawn,
        ))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Unpadded length of `row` as written in the scene file.
    pub fn row_len(&self, row: usize) -> usize {
        self.row_lengths.get(row).copied().unwrap_or(0)
    }

    /// Cell at `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, x: isize, y: isize) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y * self.width + x])
    }

    /// Like [`MapModel::get`] but everything outside the grid is a wall.
    #[inline]
    pub fn cell_or_wall(&self, x: isize, y: isize) -> Cell {
        self.get(x, y).unwrap_or(Cell::Wall)
    }

    /// Cell containing the world-space point `(x, y)`.
    #[inline]
    pub fn cell_at_point(&self, x: f64, y: f64) -> Cell {
        self.cell_or_wall(x.floor() as isize, y.floor() as isize)
    }

    /// Flips a door between closed and open. Returns the new state, or
    /// `None` if `(x, y)` is not a door.
    pub fn toggle_door(&mut self, x: isize, y: isize) -> Option<Cell> {
        let next = match self.get(x, y)? {
            Cell::DoorClosed => Cell::DoorOpen,
            Cell::DoorOpen => Cell::DoorClosed,
            _ => return None,
        };
        self.cells[y as usize * self.width + x as usize] = next;
        Some(next)
    }
}
