//! Named starting layouts
//!
//! Each scene paints into an existing grid and scales with its size. Row 0
//! is the floor.

use std::fmt;
use std::str::FromStr;

use csand_simulation::{Grid, MaterialId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scene {
    Empty,
    SandDrop,
    Hourglass,
    Bonfire,
    OilSpill,
}

impl Scene {
    pub const ALL: [Scene; 5] = [
        Scene::Empty,
        Scene::SandDrop,
        Scene::Hourglass,
        Scene::Bonfire,
        Scene::OilSpill,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scene::Empty => "empty",
            Scene::SandDrop => "sand-drop",
            Scene::Hourglass => "hourglass",
            Scene::Bonfire => "bonfire",
            Scene::OilSpill => "oil-spill",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Scene::Empty => "Nothing but air",
            Scene::SandDrop => "A block of sand falling onto a pool of water",
            Scene::Hourglass => "Sand trickling through a stone funnel",
            Scene::Bonfire => "A wood pile on a stone floor with a flame on top",
            Scene::OilSpill => "Oil floating on water in a stone basin, lit at one end",
        }
    }

    /// Paint this layout over the whole grid
    pub fn build(self, grid: &mut Grid) {
        grid.fill(MaterialId::AIR);

        let w = grid.width() as i32;
        let h = grid.height() as i32;

        match self {
            Scene::Empty => {}
            Scene::SandDrop => {
                grid.fill_rect(0, 0, w - 1, h / 6, MaterialId::WATER);
                grid.fill_rect(w / 2 - w / 8, h * 3 / 4, w / 2 + w / 8, h - 1, MaterialId::SAND);
            }
            Scene::Hourglass => {
                let cx = w / 2;
                let neck = h / 2;
                let rows = (h / 4).max(1);
                for i in 0..rows {
                    let y = neck + i;
                    let left = cx - 2 - i;
                    let right = cx + 1 + i;
                    put(grid, left, y, MaterialId::STONE);
                    put(grid, right, y, MaterialId::STONE);
                    if i >= rows / 2 {
                        grid.fill_rect(left + 1, y, right - 1, y, MaterialId::SAND);
                    }
                }
            }
            Scene::Bonfire => {
                grid.fill_rect(0, 0, w - 1, 0, MaterialId::STONE);
                let half = (w / 8).max(1);
                let top = (h / 6).max(2);
                grid.fill_rect(w / 2 - half, 1, w / 2 + half, top, MaterialId::WOOD);
                put(grid, w / 2, top + 1, MaterialId::FIRE_GAS);
            }
            Scene::OilSpill => {
                let top = (h / 2).max(3);
                grid.fill_rect(0, 0, w - 1, 0, MaterialId::STONE);
                grid.fill_rect(0, 0, 0, top, MaterialId::STONE);
                grid.fill_rect(w - 1, 0, w - 1, top, MaterialId::STONE);
                let water = (top / 2).max(1);
                grid.fill_rect(1, 1, w - 2, water, MaterialId::WATER);
                grid.fill_rect(1, water + 1, w - 2, water + 2, MaterialId::OIL);
                put(grid, 1, water + 3, MaterialId::FIRE_GAS);
            }
        }

        log::debug!("Built scene {} on {}x{} grid", self, w, h);
    }
}

fn put(grid: &mut Grid, x: i32, y: i32, material: MaterialId) {
    if grid.in_bounds(x, y) {
        grid.set(x, y, material);
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scene {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase().replace('_', "-");
        Scene::ALL
            .into_iter()
            .find(|scene| scene.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<_> = Scene::ALL.iter().map(|scene| scene.name()).collect();
                format!("unknown scene '{}', expected one of: {}", s, names.join(", "))
            })
    }
}
