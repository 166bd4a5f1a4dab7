//! Sandbox configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `csand.ron` in the working directory (or an explicit file)
//! 3. Environment variables prefixed with `CSAND_`
//!
//! Example environment variable: `CSAND_SIM__SEED=42`

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use csand_simulation::{MaterialKind, MaterialRegistry};
use serde::{Deserialize, Serialize};

/// Main sandbox configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SandConfig {
    #[serde(default)]
    pub grid: GridConfig,

    #[serde(default)]
    pub sim: SimConfig,

    /// Edits applied on top of the built-in material table
    #[serde(default)]
    pub materials: Vec<MaterialOverride>,
}

/// World dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Width in cells
    pub width: u16,
    /// Height in cells
    pub height: u16,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 64,
        }
    }
}

/// Simulation loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Initial random source state
    pub seed: u64,
    /// Ticks per frame at startup
    pub speed: u32,
    /// Upper bound for the speed multiplier
    pub speed_limit: u32,
    /// Start paused
    pub paused: bool,
    /// Material painted by the cursor at startup
    pub draw_material: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: csand_simulation::DEFAULT_SEED,
            speed: 1,
            speed_limit: 128,
            paused: false,
            draw_material: "sand".to_string(),
        }
    }
}

/// Changes to one material, identified by name
///
/// Unset fields keep the built-in value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialOverride {
    pub name: String,
    #[serde(default)]
    pub kind: Option<MaterialKind>,
    #[serde(default)]
    pub density: Option<u32>,
    #[serde(default)]
    pub decay_probability: Option<u16>,
    #[serde(default)]
    pub decay_target: Option<String>,
    #[serde(default)]
    pub ignition_probability: Option<u16>,
}

impl MaterialOverride {
    /// Apply this override through the registry's validating edit path
    pub fn apply(&self, registry: &mut MaterialRegistry) -> Result<()> {
        let id = registry.resolve_name(&self.name)?;
        let decay_target = self
            .decay_target
            .as_deref()
            .map(|name| registry.resolve_name(name))
            .transpose()?;

        registry
            .update(id, |properties| {
                if let Some(kind) = self.kind {
                    properties.kind = kind;
                }
                if let Some(density) = self.density {
                    properties.density = density;
                }
                if let Some(probability) = self.decay_probability {
                    properties.decay_probability = probability;
                }
                if let Some(target) = decay_target {
                    properties.decay_target = target;
                }
                if let Some(probability) = self.ignition_probability {
                    properties.ignition_probability = probability;
                }
            })
            .with_context(|| format!("Invalid override for material {:?}", self.name))
    }
}

impl SandConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `path`, or `csand.ron` if it exists
    /// 3. Environment variables prefixed with `CSAND_` (highest priority)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = SimConfig::default();
        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("grid.width", 128_i64)?
            .set_default("grid.height", 64_i64)?
            .set_default("sim.seed", defaults.seed as i64)?
            .set_default("sim.speed", defaults.speed as i64)?
            .set_default("sim.speed_limit", defaults.speed_limit as i64)?
            .set_default("sim.paused", defaults.paused)?
            .set_default("sim.draw_material", defaults.draw_material)?;

        // Layer 2: Config file
        let builder = match path {
            Some(path) => builder.add_source(File::from(path).format(FileFormat::Ron).required(true)),
            None => builder.add_source(
                File::with_name("csand")
                    .format(FileFormat::Ron)
                    .required(false),
            ),
        };

        // Layer 3: Environment variables (CSAND_GRID__WIDTH, etc.)
        let builder = builder.add_source(Environment::with_prefix("CSAND").separator("__"));

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Built-in materials with this configuration's overrides applied
    pub fn build_registry(&self) -> Result<MaterialRegistry> {
        let mut registry = MaterialRegistry::new();
        for material in &self.materials {
            material.apply(&mut registry)?;
        }
        if !self.materials.is_empty() {
            log::info!("Applied {} material override(s)", self.materials.len());
        }
        Ok(registry)
    }

    /// Pretty-printed RON form, suitable as a starting `csand.ron`
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize configuration")
    }
}
