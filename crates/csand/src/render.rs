//! Headless grid rendering
//!
//! Renders the world without a GPU, as text for terminals.

use csand_simulation::{Grid, MaterialId, MaterialRegistry};

/// Glyph used for materials without a dedicated one
const UNKNOWN_GLYPH: char = '?';

/// Maps every cell to a character, floor at the bottom
pub struct TextRenderer {
    glyphs: Vec<char>,
}

impl TextRenderer {
    pub fn new(registry: &MaterialRegistry) -> Self {
        let glyphs = registry
            .iter()
            .map(|(_, properties)| glyph_for_name(&properties.name))
            .collect();
        Self { glyphs }
    }

    pub fn glyph(&self, id: MaterialId) -> char {
        self.glyphs.get(id.index()).copied().unwrap_or(UNKNOWN_GLYPH)
    }

    /// One line per row, highest row first
    pub fn render(&self, grid: &Grid) -> String {
        let mut out = String::with_capacity((grid.width() as usize + 1) * grid.height() as usize);
        for y in (0..grid.height()).rev() {
            out.extend(grid.row(y).map(|id| self.glyph(id)));
            out.push('\n');
        }
        out
    }
}

fn glyph_for_name(name: &str) -> char {
    match name {
        "air" => ' ',
        "stone" => '#',
        "sand" => '.',
        "water" => '~',
        "wood" => 'W',
        "oil" => 'o',
        "fire_gas" => '^',
        "fire_powder" => '*',
        "fire_liquid" => '&',
        "smoke" => ':',
        "ash" => ',',
        _ => UNKNOWN_GLYPH,
    }
}
