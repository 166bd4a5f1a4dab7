//! The cell grid
//!
//! Cells are stored row-major. Row 0 is the bottom of the world: the tick
//! engine moves falling material toward lower row indices.

use crate::MaterialId;

/// A single cell in the grid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub material: MaterialId,
    /// Transient state flags, see [`cell_flags`]
    pub flags: u8,
}

impl Cell {
    pub const AIR: Cell = Cell {
        material: MaterialId::AIR,
        flags: 0,
    };

    pub fn new(material: MaterialId) -> Self {
        Self { material, flags: 0 }
    }

    pub fn is_updated(&self) -> bool {
        self.flags & cell_flags::UPDATED != 0
    }
}

/// Flag bits for cell state
pub mod cell_flags {
    pub const UPDATED: u8 = 1 << 0; // Already updated this tick
}

/// Fixed-size 2-D grid of cells
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid filled with air
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(
            width > 0 && height > 0,
            "grid dimensions must be non-zero (got {width}x{height})"
        );

        Self {
            width,
            height,
            cells: vec![Cell::AIR; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True iff `0 <= x < width && 0 <= y < height`
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        assert!(
            self.in_bounds(x, y),
            "cell ({x}, {y}) is outside the {}x{} grid",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }

    /// Material at `(x, y)`; panics when out of bounds
    pub fn get(&self, x: i32, y: i32) -> MaterialId {
        self.cells[self.index(x, y)].material
    }

    /// Material at `(x, y)`, or `None` when out of bounds
    pub fn get_checked(&self, x: i32, y: i32) -> Option<MaterialId> {
        if self.in_bounds(x, y) {
            Some(self.get(x, y))
        } else {
            None
        }
    }

    /// Overwrite the material at `(x, y)`, leaving its flags untouched
    pub fn set(&mut self, x: i32, y: i32, material: MaterialId) {
        let index = self.index(x, y);
        self.cells[index].material = material;
    }

    pub fn cell(&self, x: i32, y: i32) -> Cell {
        self.cells[self.index(x, y)]
    }

    pub fn is_updated(&self, x: i32, y: i32) -> bool {
        self.cells[self.index(x, y)].is_updated()
    }

    /// Flag `(x, y)` as finalized for the current tick
    pub fn mark_updated(&mut self, x: i32, y: i32) {
        let index = self.index(x, y);
        self.cells[index].flags |= cell_flags::UPDATED;
    }

    /// Reset every cell's updated flag
    pub fn clear_updated_marks(&mut self) {
        for cell in &mut self.cells {
            cell.flags &= !cell_flags::UPDATED;
        }
    }

    /// Number of cells currently flagged as updated
    pub fn updated_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_updated()).count()
    }

    /// Set every cell to `material`
    pub fn fill(&mut self, material: MaterialId) {
        for cell in &mut self.cells {
            *cell = Cell::new(material);
        }
    }

    /// Set the inclusive rectangle `(x0, y0)..=(x1, y1)`, clipped to the grid
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, material: MaterialId) {
        for y in y0.min(y1).max(0)..=y0.max(y1).min(self.height as i32 - 1) {
            for x in x0.min(x1).max(0)..=x0.max(x1).min(self.width as i32 - 1) {
                self.set(x, y, material);
            }
        }
    }

    /// Number of cells holding `material`
    pub fn count(&self, material: MaterialId) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.material == material)
            .count()
    }

    /// Materials in storage order
    pub fn materials(&self) -> impl Iterator<Item = MaterialId> + '_ {
        self.cells.iter().map(|cell| cell.material)
    }

    /// Materials of row `y`, left to right
    pub fn row(&self, y: u16) -> impl Iterator<Item = MaterialId> + '_ {
        let start = y as usize * self.width as usize;
        self.cells[start..start + self.width as usize]
            .iter()
            .map(|cell| cell.material)
    }

    /// Copy material ids into a single-channel buffer, one byte per cell
    ///
    /// `buffer` must hold at least `len()` bytes.
    pub fn copy_to_luminance(&self, buffer: &mut [u8]) {
        for (byte, cell) in buffer.iter_mut().zip(&self.cells) {
            *byte = cell.material.0;
        }
    }
}
