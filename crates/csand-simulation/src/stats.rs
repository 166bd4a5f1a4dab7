//! Simulation statistics collection trait

/// Trait for collecting simulation statistics
///
/// The tick engine reports what happened through this trait so callers can
/// choose between counting and ignoring events.
pub trait SimStats {
    /// Two cells exchanged materials
    fn record_swap(&mut self);

    /// A cell decayed into its decay target
    fn record_decay(&mut self);

    /// A cell caught fire
    fn record_ignition(&mut self);

    /// A paint command overwrote a cell
    fn record_paint(&mut self);
}

/// A no-op implementation for when stats collection is not needed
#[derive(Default)]
pub struct NoopStats;

impl SimStats for NoopStats {
    fn record_swap(&mut self) {}
    fn record_decay(&mut self) {}
    fn record_ignition(&mut self) {}
    fn record_paint(&mut self) {}
}

/// Event counters accumulated over one or more ticks
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    pub swaps: u64,
    pub decays: u64,
    pub ignitions: u64,
    pub paints: u64,
}

impl TickStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Total number of recorded events
    pub fn total(&self) -> u64 {
        self.swaps + self.decays + self.ignitions + self.paints
    }
}

impl SimStats for TickStats {
    fn record_swap(&mut self) {
        self.swaps += 1;
    }

    fn record_decay(&mut self) {
        self.decays += 1;
    }

    fn record_ignition(&mut self) {
        self.ignitions += 1;
    }

    fn record_paint(&mut self) {
        self.paints += 1;
    }
}
