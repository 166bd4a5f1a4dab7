//! Fire ignition: turning a flammable cell into a fire variant

use crate::{Grid, MaterialId, MaterialRegistry, SimRng};

/// Half-width of the square searched for an air pocket
const SEARCH_RADIUS: i32 = 2;

/// Ignites cells that touched fire
pub struct IgnitionSearch;

impl IgnitionSearch {
    /// Try to set the cell at `(x, y)` on fire
    ///
    /// The cell needs to pass its ignition roll and have an air cell within
    /// the surrounding 5x5 window. The window is scanned top row first
    /// (`dy` from +2 to -2), left to right, and the first air cell found
    /// wins. Returns true when the cell was converted.
    pub fn try_ignite<R: SimRng + ?Sized>(
        grid: &mut Grid,
        registry: &MaterialRegistry,
        rng: &mut R,
        x: i32,
        y: i32,
    ) -> bool {
        let properties = registry.properties(grid.get(x, y));
        if !rng.chance(properties.ignition_probability) {
            return false;
        }

        if Self::find_air(grid, x, y).is_none() {
            return false;
        }

        let fire = registry
            .fire_variants()
            .for_kind(properties.kind, rng.coin());
        grid.set(x, y, fire);
        grid.mark_updated(x, y);
        true
    }

    /// First air cell around `(x, y)` in scan order
    fn find_air(grid: &Grid, x: i32, y: i32) -> Option<(i32, i32)> {
        for dy in (-SEARCH_RADIUS..=SEARCH_RADIUS).rev() {
            for dx in -SEARCH_RADIUS..=SEARCH_RADIUS {
                if dx == 0 && dy == 0 {
                    continue;
                }

                let (nx, ny) = (x + dx, y + dy);
                if grid.get_checked(nx, ny) == Some(MaterialId::AIR) {
                    return Some((nx, ny));
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MaterialKind;
    use crate::test_support::FixedRng;

    /// 5x5 grid of stone with the material under test in the middle
    fn walled_grid(center: MaterialId) -> Grid {
        let mut grid = Grid::new(5, 5);
        grid.fill(MaterialId::STONE);
        grid.set(2, 2, center);
        grid
    }

    fn saturated(registry: &mut MaterialRegistry, id: MaterialId) {
        registry
            .update(id, |properties| properties.ignition_probability = u16::MAX)
            .expect("valid edit");
    }

    #[test]
    fn test_ignites_with_far_corner_air() {
        let mut registry = MaterialRegistry::new();
        saturated(&mut registry, MaterialId::WOOD);

        // Offset (2, 2) is the only air cell in the window
        let mut grid = walled_grid(MaterialId::WOOD);
        grid.set(4, 4, MaterialId::AIR);

        // Odd draw selects the powder variant for a solid
        let mut rng = FixedRng(1);
        assert!(IgnitionSearch::try_ignite(&mut grid, &registry, &mut rng, 2, 2));
        assert_eq!(grid.get(2, 2), MaterialId::FIRE_POWDER);
        assert!(grid.is_updated(2, 2));
    }

    #[test]
    fn test_even_draw_picks_gas() {
        let mut registry = MaterialRegistry::new();
        saturated(&mut registry, MaterialId::WOOD);
        let mut grid = walled_grid(MaterialId::WOOD);
        grid.set(0, 0, MaterialId::AIR);

        let mut rng = FixedRng(2);
        assert!(IgnitionSearch::try_ignite(&mut grid, &registry, &mut rng, 2, 2));
        assert_eq!(grid.get(2, 2), MaterialId::FIRE_GAS);
    }

    #[test]
    fn test_fluid_burns_as_liquid_or_gas() {
        let mut registry = MaterialRegistry::new();
        saturated(&mut registry, MaterialId::OIL);
        assert_eq!(
            registry.properties(MaterialId::OIL).kind,
            MaterialKind::Fluid
        );

        let mut grid = walled_grid(MaterialId::OIL);
        grid.set(2, 4, MaterialId::AIR);
        assert!(IgnitionSearch::try_ignite(&mut grid, &registry, &mut FixedRng(1), 2, 2));
        assert_eq!(grid.get(2, 2), MaterialId::FIRE_LIQUID);

        let mut grid = walled_grid(MaterialId::OIL);
        grid.set(2, 4, MaterialId::AIR);
        assert!(IgnitionSearch::try_ignite(&mut grid, &registry, &mut FixedRng(4), 2, 2));
        assert_eq!(grid.get(2, 2), MaterialId::FIRE_GAS);
    }

    #[test]
    fn test_no_air_no_fire() {
        let mut registry = MaterialRegistry::new();
        saturated(&mut registry, MaterialId::WOOD);
        let mut grid = walled_grid(MaterialId::WOOD);

        assert!(!IgnitionSearch::try_ignite(&mut grid, &registry, &mut FixedRng(1), 2, 2));
        assert_eq!(grid.get(2, 2), MaterialId::WOOD);
        assert!(!grid.is_updated(2, 2));
    }

    #[test]
    fn test_air_outside_window_is_ignored() {
        let mut registry = MaterialRegistry::new();
        saturated(&mut registry, MaterialId::WOOD);
        let mut grid = Grid::new(7, 7);
        grid.fill(MaterialId::STONE);
        grid.set(3, 3, MaterialId::WOOD);
        grid.set(6, 3, MaterialId::AIR);

        assert!(!IgnitionSearch::try_ignite(&mut grid, &registry, &mut FixedRng(1), 3, 3));
        assert_eq!(grid.get(3, 3), MaterialId::WOOD);
    }

    #[test]
    fn test_failed_roll_has_no_effect() {
        // Stone never ignites
        let registry = MaterialRegistry::new();
        let mut grid = walled_grid(MaterialId::STONE);
        grid.set(0, 0, MaterialId::AIR);

        assert!(!IgnitionSearch::try_ignite(&mut grid, &registry, &mut FixedRng(0), 2, 2));
        assert_eq!(grid.get(2, 2), MaterialId::STONE);
    }

    #[test]
    fn test_window_clipped_at_edges() {
        let mut registry = MaterialRegistry::new();
        saturated(&mut registry, MaterialId::WOOD);
        let mut grid = Grid::new(2, 1);
        grid.set(0, 0, MaterialId::WOOD);

        assert!(IgnitionSearch::try_ignite(&mut grid, &registry, &mut FixedRng(3), 0, 0));
        assert_eq!(grid.get(0, 0), MaterialId::FIRE_POWDER);
    }

    #[test]
    fn test_scan_order_prefers_upper_rows() {
        let mut grid = walled_grid(MaterialId::WOOD);
        grid.set(4, 3, MaterialId::AIR);
        grid.set(0, 4, MaterialId::AIR);
        grid.set(1, 2, MaterialId::AIR);
        assert_eq!(IgnitionSearch::find_air(&grid, 2, 2), Some((0, 4)));

        grid.set(0, 4, MaterialId::STONE);
        assert_eq!(IgnitionSearch::find_air(&grid, 2, 2), Some((4, 3)));

        grid.set(4, 3, MaterialId::STONE);
        assert_eq!(IgnitionSearch::find_air(&grid, 2, 2), Some((1, 2)));
    }
}
