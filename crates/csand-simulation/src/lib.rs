//! Falling-sand simulation core for csand
//!
//! This crate provides everything needed to advance a grid of material cells
//! by one tick:
//! - Deterministic random source (RandomSource, SimRng)
//! - Material definitions (MaterialId, MaterialKind, MaterialProperties, MaterialRegistry)
//! - The cell grid with its per-tick update markers (Grid, Cell, cell_flags)
//! - The tick engine and fire ignition (simulate_tick, TickEngine, IgnitionSearch)
//! - Statistics hooks (SimStats, TickStats, NoopStats)

mod grid;
mod ignition;
mod materials;
mod random;
mod stats;
mod tick;

#[cfg(test)]
mod test_support;

pub use grid::{Cell, Grid, cell_flags};
pub use ignition::IgnitionSearch;
pub use materials::{
    FireVariants, MaterialId, MaterialKind, MaterialProperties, MaterialRegistry, RegistryError,
    probability,
};
pub use random::{DEFAULT_SEED, RandomSource, SimRng};
pub use stats::{NoopStats, SimStats, TickStats};
pub use tick::{GRAVITY_STEP, PaintCommand, TickEngine, simulate_tick};
