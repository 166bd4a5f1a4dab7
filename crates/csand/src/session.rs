//! A running simulation: world, materials, randomness and controls

use anyhow::{Context, Result, ensure};
use csand_simulation::{
    Grid, MaterialRegistry, PaintCommand, RandomSource, TickEngine, TickStats,
};

use crate::config::SandConfig;
use crate::input::{Controls, InputEvent};

/// Owns everything one simulation needs between frames
pub struct Session {
    grid: Grid,
    registry: MaterialRegistry,
    rng: RandomSource,
    controls: Controls,
    stats: TickStats,
    ticks: u64,
}

impl Session {
    pub fn new(config: &SandConfig) -> Result<Self> {
        ensure!(
            config.grid.width > 0 && config.grid.height > 0,
            "grid dimensions must be non-zero, got {}x{}",
            config.grid.width,
            config.grid.height
        );

        let registry = config.build_registry()?;
        let draw_material = registry
            .resolve_name(&config.sim.draw_material)
            .context("Invalid sim.draw_material")?;
        let controls = Controls::new(config.sim.speed, config.sim.speed_limit, draw_material)
            .with_paused(config.sim.paused);

        log::info!(
            "Created {}x{} world with {} materials (seed {})",
            config.grid.width,
            config.grid.height,
            registry.len(),
            config.sim.seed
        );

        Ok(Self::from_parts(
            Grid::new(config.grid.width, config.grid.height),
            registry,
            RandomSource::with_seed(config.sim.seed),
            controls,
        ))
    }

    pub fn from_parts(
        grid: Grid,
        registry: MaterialRegistry,
        rng: RandomSource,
        controls: Controls,
    ) -> Self {
        Self {
            grid,
            registry,
            rng,
            controls,
            stats: TickStats::default(),
            ticks: 0,
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        self.controls.handle(event, &self.registry);
    }

    /// Advance one displayed frame
    ///
    /// Runs as many ticks as the controls allow. While `cursor` is held every
    /// tick paints the selected material there. Returns the number of ticks
    /// run.
    pub fn frame(&mut self, cursor: Option<(u16, u16)>) -> u32 {
        let ticks = self.controls.take_frame_ticks();
        let paint = cursor.map(|(x, y)| PaintCommand {
            x,
            y,
            material: self.controls.draw_material(),
        });

        for _ in 0..ticks {
            TickEngine::run(
                &mut self.grid,
                &self.registry,
                &mut self.rng,
                paint,
                &mut self.stats,
            );
        }
        self.ticks += u64::from(ticks);

        ticks
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn registry(&self) -> &MaterialRegistry {
        &self.registry
    }

    /// Material table, editable between frames
    pub fn registry_mut(&mut self) -> &mut MaterialRegistry {
        &mut self.registry
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn stats(&self) -> &TickStats {
        &self.stats
    }

    /// Ticks simulated since the session started
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csand_simulation::MaterialId;

    fn small_config() -> SandConfig {
        let mut config = SandConfig::default();
        config.grid.width = 8;
        config.grid.height = 8;
        config
    }

    #[test]
    fn test_new_session_is_empty_air() {
        let session = Session::new(&small_config()).expect("session");
        assert_eq!(session.grid().count(MaterialId::AIR), 64);
        assert_eq!(session.controls().draw_material(), MaterialId::SAND);
        assert_eq!(session.ticks(), 0);
    }

    #[test]
    fn test_zero_sized_grid_rejected() {
        let mut config = small_config();
        config.grid.height = 0;
        assert!(Session::new(&config).is_err());
    }

    #[test]
    fn test_unknown_draw_material_rejected() {
        let mut config = small_config();
        config.sim.draw_material = "lava".to_string();
        assert!(Session::new(&config).is_err());
    }

    #[test]
    fn test_frame_runs_speed_ticks() {
        let mut config = small_config();
        config.sim.speed = 4;
        let mut session = Session::new(&config).expect("session");

        assert_eq!(session.frame(None), 4);
        assert_eq!(session.ticks(), 4);
    }

    #[test]
    fn test_paused_frame_does_not_paint() {
        let mut config = small_config();
        config.sim.paused = true;
        let mut session = Session::new(&config).expect("session");

        assert_eq!(session.frame(Some((3, 3))), 0);
        assert_eq!(session.grid().count(MaterialId::SAND), 0);
    }

    #[test]
    fn test_cursor_paints_every_tick() {
        let mut session = Session::new(&small_config()).expect("session");
        session.handle_input(InputEvent::SelectMaterial(MaterialId::STONE));

        session.frame(Some((2, 5)));
        assert_eq!(session.grid().get(2, 5), MaterialId::STONE);
        assert_eq!(session.stats().paints, 1);

        session.handle_input(InputEvent::SpeedIncrease);
        session.frame(Some((2, 5)));
        assert_eq!(session.stats().paints, 3);
    }

    #[test]
    fn test_step_while_running() {
        let mut session = Session::new(&small_config()).expect("session");
        session.handle_input(InputEvent::Step);

        assert_eq!(session.frame(None), 1);
        assert_eq!(session.frame(None), 0);
        assert!(session.controls().paused());
    }

    #[test]
    fn test_painted_sand_falls() {
        let mut session = Session::new(&small_config()).expect("session");
        session.frame(Some((4, 7)));
        assert_eq!(session.grid().get(4, 7), MaterialId::SAND);

        for _ in 0..20 {
            session.frame(None);
        }
        assert_eq!(session.grid().count(MaterialId::SAND), 1);
        assert_eq!(session.grid().get_checked(4, 7), Some(MaterialId::AIR));
    }

    #[test]
    fn test_same_seed_same_world() {
        let mut first = Session::new(&small_config()).expect("session");
        let mut second = Session::new(&small_config()).expect("session");
        for session in [&mut first, &mut second] {
            session.grid_mut().fill_rect(0, 4, 7, 7, MaterialId::WATER);
            for _ in 0..30 {
                session.frame(None);
            }
        }
        assert!(first.grid().materials().eq(second.grid().materials()));
    }
}
