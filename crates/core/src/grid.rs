//! Grid module - manages one player's playfield
//!
//! The grid is a 10x20 array where each cell is either empty or holds a block color.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right) and y ranges 0..19
//! (floor to ceiling). Pieces spawn in the top row and fall toward y = 0.

use arrayvec::ArrayVec;

use crate::types::{BlockColor, Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the grid
const GRID_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Row indices of full rows, highest row first.
pub type FullRows = ArrayVec<u8, HEIGHT>;

/// One full row of cells, left to right.
pub type Row = [Cell; WIDTH];

/// The playfield - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * WIDTH + x), row 0 is the floor
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Cells of row `y`, left to right.
    pub fn row(&self, y: usize) -> &[Cell] {
        assert!(y < HEIGHT, "row {y} out of range");
        let start = y * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Fill every cell of row `y` with `color` (scripted setups and benches).
    pub fn fill_row(&mut self, y: usize, color: BlockColor) {
        assert!(y < HEIGHT, "row {y} out of range");
        let start = y * WIDTH;
        self.cells[start..start + WIDTH].fill(Some(color));
    }

    /// Row indices with no empty cell, scanned from the ceiling down.
    pub fn full_rows(&self) -> FullRows {
        (0..HEIGHT)
            .rev()
            .filter(|&y| self.is_row_full(y))
            .map(|y| y as u8)
            .collect()
    }

    /// Remove the given rows and append as many empty rows at the ceiling.
    ///
    /// Rows above a removed row shift down. Indices that are out of range or
    /// repeated are ignored. Returns the number of rows removed.
    pub fn remove_rows(&mut self, rows: &[u8]) -> usize {
        let mut write_y = 0usize;
        let mut removed = 0usize;

        // Compact kept rows toward the floor (copy_within handles overlap).
        for read_y in 0..HEIGHT {
            if rows.contains(&(read_y as u8)) {
                removed += 1;
                continue;
            }
            if write_y != read_y {
                let src = read_y * WIDTH;
                self.cells.copy_within(src..src + WIDTH, write_y * WIDTH);
            }
            write_y += 1;
        }

        self.cells[write_y * WIDTH..].fill(None);
        removed
    }

    /// Drop the ceiling row, shift everything up by one and insert `row` as the
    /// new floor row.
    pub fn push_floor_row(&mut self, row: &Row) {
        self.cells.copy_within(0..GRID_SIZE - WIDTH, WIDTH);
        self.cells[..WIDTH].copy_from_slice(row);
    }

    /// Write `color` into every in-bounds cell, overwriting what is there.
    /// Returns the number of cells written.
    pub fn stamp(&mut self, cells: &[(i8, i8)], color: BlockColor) -> usize {
        cells
            .iter()
            .filter(|&&(x, y)| self.set(x, y, Some(color)))
            .count()
    }

    /// Write `color` into every in-bounds cell that is still empty.
    /// Returns the number of cells written.
    pub fn fill_empty(&mut self, cells: &[(i8, i8)], color: BlockColor) -> usize {
        let mut written = 0;
        for &(x, y) in cells {
            if let Some(idx) = Self::index(x, y) {
                if self.cells[idx].is_none() {
                    self.cells[idx] = Some(color);
                    written += 1;
                }
            }
        }
        written
    }

    /// Turn every occupied cell in row `y` gray. Returns true if any cell changed.
    pub fn gray_out_row(&mut self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        let start = y * WIDTH;
        let mut changed = false;
        for cell in &mut self.cells[start..start + WIDTH] {
            if matches!(cell, Some(c) if *c != BlockColor::Gray) {
                *cell = Some(BlockColor::Gray);
                changed = true;
            }
        }
        changed
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Write the grid as color ids (0 = empty) into `out`, indexed `[y][x]`.
    pub fn write_u8_grid(&self, out: &mut [[u8; WIDTH]; HEIGHT]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = self.cells[y * WIDTH + x].map_or(0, BlockColor::as_u8);
            }
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
