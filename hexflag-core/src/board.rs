//! Hex grid geometry: odd-q offset storage, axial arithmetic, walls and neighbors

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::HexflagError;

// ============================================================================
// COORDINATES
// ============================================================================

/// Position in the rectangular storage layout (odd-q offset)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OffsetCoord {
    pub x: i32,
    pub y: i32,
}

impl OffsetCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_axial(self) -> AxialCoord {
        offset_to_axial(self)
    }
}

impl fmt::Display for OffsetCoord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axial hex coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AxialCoord {
    pub q: i32,
    pub r: i32,
}

impl AxialCoord {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    pub fn to_offset(self) -> OffsetCoord {
        axial_to_offset(self)
    }

    pub fn offset_by(self, direction: Direction) -> AxialCoord {
        let (dq, dr) = direction.delta();
        AxialCoord::new(self.q + dq, self.r + dr)
    }

    pub fn distance_to(self, other: AxialCoord) -> u32 {
        let dq = self.q - other.q;
        let dr = self.r - other.r;
        ((dq.abs() + dr.abs() + (dq + dr).abs()) / 2) as u32
    }
}

pub fn offset_to_axial(pos: OffsetCoord) -> AxialCoord {
    AxialCoord {
        q: pos.x,
        r: pos.y - (pos.x - (pos.x & 1)) / 2,
    }
}

pub fn axial_to_offset(hex: AxialCoord) -> OffsetCoord {
    OffsetCoord {
        x: hex.q,
        y: hex.r + (hex.q - (hex.q & 1)) / 2,
    }
}

/// Hex distance between two offset positions, used as the search heuristic
pub fn hex_distance(a: OffsetCoord, b: OffsetCoord) -> u32 {
    offset_to_axial(a).distance_to(offset_to_axial(b))
}

// ============================================================================
// DIRECTIONS
// ============================================================================

/// One of the six moves the server accepts, numbered as on the wire
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Direction {
    Up = 1,
    UpRight = 2,
    DownRight = 3,
    Down = 4,
    DownLeft = 5,
    UpLeft = 6,
}

/// Direction table in enumeration order. Search tie-breaking depends on it.
pub const DIRECTIONS: [Direction; 6] = [
    Direction::Up,
    Direction::UpRight,
    Direction::DownRight,
    Direction::Down,
    Direction::DownLeft,
    Direction::UpLeft,
];

impl Direction {
    /// Move sent when nothing better can be computed
    pub const FALLBACK: Direction = Direction::Up;

    /// Axial delta (dq, dr)
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::UpRight => (1, -1),
            Direction::DownRight => (1, 0),
            Direction::Down => (0, 1),
            Direction::DownLeft => (-1, 1),
            Direction::UpLeft => (-1, 0),
        }
    }

    pub const fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(n: u8) -> Option<Direction> {
        DIRECTIONS.get((n as usize).wrapping_sub(1)).copied()
    }
}

impl From<Direction> for u8 {
    fn from(direction: Direction) -> u8 {
        direction.number()
    }
}

impl TryFrom<u8> for Direction {
    type Error = HexflagError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Direction::from_number(n).ok_or(HexflagError::InvalidDirection(n))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Neighbor of `pos` in `direction`, without any bounds or wall check
pub fn step_unchecked(pos: OffsetCoord, direction: Direction) -> OffsetCoord {
    offset_to_axial(pos).offset_by(direction).to_offset()
}

// ============================================================================
// GRID
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Wall,
    #[serde(other)]
    Open,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    #[serde(rename = "type")]
    pub kind: CellKind,
}

impl Cell {
    pub const OPEN: Cell = Cell { kind: CellKind::Open };
    pub const WALL: Cell = Cell { kind: CellKind::Wall };
}

#[derive(Deserialize)]
struct RawGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

/// Game map as delivered each turn
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = HexflagError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        Grid::new(raw.width, raw.height, raw.cells)
    }
}

impl Grid {
    pub fn new(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self, HexflagError> {
        if cells.len() != width * height {
            return Err(HexflagError::GridSize {
                width,
                height,
                cells: cells.len(),
            });
        }
        Ok(Self { width, height, cells })
    }

    pub fn open(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::OPEN; width * height],
        }
    }

    /// Parse a picture of the map: `#` is a wall, anything else is open.
    /// Rows are separated by newlines, surrounding whitespace is ignored.
    pub fn from_rows(picture: &str) -> Result<Self, HexflagError> {
        let rows: Vec<&str> = picture
            .lines()
            .map(str::trim)
            .filter(|row| !row.is_empty())
            .collect();
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        let cells = rows
            .iter()
            .flat_map(|row| row.chars())
            .map(|c| if c == '#' { Cell::WALL } else { Cell::OPEN })
            .collect();
        Grid::new(width, height, cells)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: OffsetCoord) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Row-major cell index. Panics when `pos` is outside the grid.
    pub fn index(&self, pos: OffsetCoord) -> usize {
        assert!(self.contains(pos), "{pos} is outside the {}x{} grid", self.width, self.height);
        pos.y as usize * self.width + pos.x as usize
    }

    /// Wall test; the caller bounds-checks first
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.cells[self.index(OffsetCoord::new(x, y))].kind == CellKind::Wall
    }

    pub fn is_passable(&self, pos: OffsetCoord) -> bool {
        self.contains(pos) && !self.is_wall(pos.x, pos.y)
    }

    pub fn set_wall(&mut self, pos: OffsetCoord) {
        let idx = self.index(pos);
        self.cells[idx] = Cell::WALL;
    }

    /// Destination of a move, if it is legal
    pub fn step(&self, pos: OffsetCoord, direction: Direction) -> Option<OffsetCoord> {
        let next = step_unchecked(pos, direction);
        self.is_passable(next).then_some(next)
    }

    /// Legal moves from `pos`, in direction-table order
    pub fn neighbors(&self, pos: OffsetCoord) -> impl Iterator<Item = (Direction, OffsetCoord)> + '_ {
        DIRECTIONS
            .into_iter()
            .filter_map(move |direction| self.step(pos, direction).map(|next| (direction, next)))
    }

    /// Every in-bounds position, row by row
    pub fn positions(&self) -> impl Iterator<Item = OffsetCoord> + '_ {
        (0..self.height as i32).flat_map(move |y| (0..self.width as i32).map(move |x| OffsetCoord::new(x, y)))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_within_bounds() {
        let grid = Grid::open(9, 7);
        for pos in grid.positions() {
            assert_eq!(axial_to_offset(offset_to_axial(pos)), pos);
        }
        // Negative columns go through the same conversion
        for x in -4..4 {
            for y in -4..4 {
                let pos = OffsetCoord::new(x, y);
                assert_eq!(pos.to_axial().to_offset(), pos);
            }
        }
    }

    #[test]
    fn test_axial_conversion() {
        assert_eq!(offset_to_axial(OffsetCoord::new(0, 0)), AxialCoord::new(0, 0));
        assert_eq!(offset_to_axial(OffsetCoord::new(1, 0)), AxialCoord::new(1, 0));
        assert_eq!(offset_to_axial(OffsetCoord::new(2, 1)), AxialCoord::new(2, 0));
        assert_eq!(offset_to_axial(OffsetCoord::new(3, 3)), AxialCoord::new(3, 2));
    }

    #[test]
    fn test_distance() {
        let origin = OffsetCoord::new(0, 0);
        assert_eq!(hex_distance(origin, origin), 0);
        assert_eq!(hex_distance(origin, OffsetCoord::new(0, 3)), 3);
        assert_eq!(hex_distance(origin, OffsetCoord::new(1, 0)), 1);
        assert_eq!(hex_distance(origin, OffsetCoord::new(4, 4)), 6);
        assert_eq!(hex_distance(OffsetCoord::new(4, 4), origin), 6);
    }

    #[test]
    fn test_every_neighbor_is_one_step_away() {
        let grid = Grid::open(6, 6);
        for pos in grid.positions() {
            for (_, next) in grid.neighbors(pos) {
                assert_eq!(hex_distance(pos, next), 1);
            }
        }
    }

    #[test]
    fn test_neighbors_skip_walls_and_edges() {
        let grid = Grid::from_rows(
            "...
             .#.
             ...",
        )
        .unwrap();
        assert!(grid.is_wall(1, 1));

        let corner: Vec<_> = grid.neighbors(OffsetCoord::new(0, 0)).collect();
        assert_eq!(
            corner,
            vec![
                (Direction::DownRight, OffsetCoord::new(1, 0)),
                (Direction::Down, OffsetCoord::new(0, 1)),
            ]
        );

        // Odd columns sit half a cell lower; the wall below is skipped
        let odd: Vec<_> = grid.neighbors(OffsetCoord::new(1, 0)).collect();
        assert_eq!(
            odd,
            vec![
                (Direction::UpRight, OffsetCoord::new(2, 0)),
                (Direction::DownRight, OffsetCoord::new(2, 1)),
                (Direction::DownLeft, OffsetCoord::new(0, 1)),
                (Direction::UpLeft, OffsetCoord::new(0, 0)),
            ]
        );
    }

    #[test]
    fn test_direction_numbers() {
        for (i, d) in DIRECTIONS.iter().enumerate() {
            assert_eq!(d.number() as usize, i + 1);
            assert_eq!(Direction::from_number(d.number()), Some(*d));
        }
        assert_eq!(Direction::from_number(0), None);
        assert_eq!(Direction::from_number(7), None);
    }

    #[test]
    fn test_grid_json() {
        let json = r#"{"width":2,"height":1,"cells":[{"type":"Wall"},{"type":"Grass"}]}"#;
        let grid: Grid = serde_json::from_str(json).unwrap();
        assert!(grid.is_wall(0, 0));
        assert!(!grid.is_wall(1, 0));

        let bad = r#"{"width":2,"height":2,"cells":[{"type":"Wall"}]}"#;
        assert!(serde_json::from_str::<Grid>(bad).is_err());
    }

    #[test]
    #[should_panic]
    fn test_is_wall_out_of_bounds_panics() {
        let grid = Grid::open(3, 3);
        grid.is_wall(3, 0);
    }
}
