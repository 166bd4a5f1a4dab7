//! Per-tick cellular automaton update

use serde::{Deserialize, Serialize};

use crate::{
    Grid, IgnitionSearch, MaterialId, MaterialKind, MaterialRegistry, NoopStats, SimRng, SimStats,
};

/// Row offset of one step in the gravity direction
pub const GRAVITY_STEP: i32 = -1;

/// User paint: force one cell to a material at the end of a tick
///
/// `material` must be registered in the registry the tick runs with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintCommand {
    pub x: u16,
    pub y: u16,
    pub material: MaterialId,
}

/// Advance the grid by one tick
///
/// See [`TickEngine::run`].
pub fn simulate_tick<R: SimRng + ?Sized>(
    grid: &mut Grid,
    registry: &MaterialRegistry,
    rng: &mut R,
    paint: Option<PaintCommand>,
) {
    TickEngine::run(grid, registry, rng, paint, &mut NoopStats);
}

/// Cellular automaton updater - decay, movement and fire spread
pub struct TickEngine;

impl TickEngine {
    /// Update every cell once in raster order, apply `paint`, then clear the
    /// updated markers
    ///
    /// Later cells see the moves made by earlier cells in the same pass. A
    /// cell that was the destination of a move (or decayed, or ignited) is
    /// left alone for the rest of the tick.
    pub fn run<R: SimRng + ?Sized>(
        grid: &mut Grid,
        registry: &MaterialRegistry,
        rng: &mut R,
        paint: Option<PaintCommand>,
        stats: &mut dyn SimStats,
    ) {
        for y in 0..grid.height() as i32 {
            for x in 0..grid.width() as i32 {
                Self::update_cell(grid, registry, rng, x, y, stats);
            }
        }

        if let Some(paint) = paint {
            Self::apply_paint(grid, registry, paint, stats);
        }

        grid.clear_updated_marks();
    }

    /// Overwrite one cell if the command is inside the grid
    pub fn apply_paint(
        grid: &mut Grid,
        registry: &MaterialRegistry,
        paint: PaintCommand,
        stats: &mut dyn SimStats,
    ) -> bool {
        debug_assert!(
            registry.contains(paint.material),
            "paint material {} is unregistered",
            paint.material
        );
        let (x, y) = (paint.x as i32, paint.y as i32);
        if !grid.in_bounds(x, y) {
            return false;
        }

        grid.set(x, y, paint.material);
        stats.record_paint();
        true
    }

    fn update_cell<R: SimRng + ?Sized>(
        grid: &mut Grid,
        registry: &MaterialRegistry,
        rng: &mut R,
        x: i32,
        y: i32,
        stats: &mut dyn SimStats,
    ) {
        if grid.is_updated(x, y) {
            return;
        }

        let mut material = grid.get(x, y);
        let mut properties = registry.properties(material);

        if rng.chance(properties.decay_probability) {
            grid.set(x, y, properties.decay_target);
            grid.mark_updated(x, y);
            stats.record_decay();
            return;
        }

        // Drawn for every kind, solids included, so the draw sequence does not
        // depend on the material
        let dx = rng.unit_offset();
        let dy = match properties.kind {
            MaterialKind::Powder => GRAVITY_STEP,
            MaterialKind::Solid | MaterialKind::Fluid => rng.fall_step(),
        };

        let (sx, sy) = (x + dx, y + dy);
        if !grid.in_bounds(sx, sy) || grid.is_updated(sx, sy) {
            return;
        }

        let mut swap_material = grid.get(sx, sy);
        let mut swap_properties = registry.properties(swap_material);

        match (registry.is_fire(material), registry.is_fire(swap_material)) {
            (true, false) => {
                if IgnitionSearch::try_ignite(grid, registry, rng, sx, sy) {
                    stats.record_ignition();
                }
                swap_material = grid.get(sx, sy);
                swap_properties = registry.properties(swap_material);
            }
            (false, true) => {
                if IgnitionSearch::try_ignite(grid, registry, rng, x, y) {
                    stats.record_ignition();
                }
                material = grid.get(x, y);
                properties = registry.properties(material);
            }
            _ => {}
        }

        if properties.kind == MaterialKind::Solid || swap_properties.kind == MaterialKind::Solid {
            return;
        }

        if swap_properties.density < properties.density {
            grid.set(x, y, swap_material);
            grid.set(sx, sy, material);
            grid.mark_updated(sx, sy);
            stats.record_swap();
        }
    }
}
