//! Shared helpers for simulation integration tests

use csand_simulation::{Grid, MaterialId, MaterialRegistry};
use rand::RngCore;

/// RNG that returns the same value forever
///
/// A value of 1 makes every cell try the cell straight below it. Mirrors
/// `src/test_support.rs`, which integration tests cannot reach; keep the two
/// in step.
pub struct FixedRng(pub u32);

impl RngCore for FixedRng {
    fn next_u32(&mut self) -> u32 {
        self.0
    }

    fn next_u64(&mut self) -> u64 {
        u64::from(self.0)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Build a grid from rows written top to bottom
///
/// Each character is one cell: ` ` air, `#` stone, `.` sand, `~` water,
/// `W` wood, `^` fire gas.
pub fn grid_from_rows(rows: &[&str]) -> Grid {
    let height = rows.len() as u16;
    let width = rows[0].chars().count() as u16;
    let mut grid = Grid::new(width, height);

    for (row_index, row) in rows.iter().enumerate() {
        let y = (height as usize - 1 - row_index) as i32;
        for (x, glyph) in row.chars().enumerate() {
            let material = match glyph {
                ' ' => MaterialId::AIR,
                '#' => MaterialId::STONE,
                '.' => MaterialId::SAND,
                '~' => MaterialId::WATER,
                'W' => MaterialId::WOOD,
                '^' => MaterialId::FIRE_GAS,
                other => panic!("unknown glyph {other:?}"),
            };
            grid.set(x as i32, y, material);
        }
    }

    grid
}

/// Per-material cell counts, indexed by id
pub fn census(grid: &Grid, registry: &MaterialRegistry) -> Vec<usize> {
    registry.iter().map(|(id, _)| grid.count(id)).collect()
}
