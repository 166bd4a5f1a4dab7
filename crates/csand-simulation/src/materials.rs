//! Material definitions and registry

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a cell's substance
///
/// Ids are dense: a registry with `n` entries accepts ids `0..n`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialId(pub u8);

impl MaterialId {
    // Empty space, must stay inert
    pub const AIR: MaterialId = MaterialId(0);
    pub const STONE: MaterialId = MaterialId(1);
    pub const SAND: MaterialId = MaterialId(2);
    pub const WATER: MaterialId = MaterialId(3);
    pub const WOOD: MaterialId = MaterialId(4);
    pub const OIL: MaterialId = MaterialId(5);

    // Fire variants
    pub const FIRE_GAS: MaterialId = MaterialId(6);
    pub const FIRE_POWDER: MaterialId = MaterialId(7);
    pub const FIRE_LIQUID: MaterialId = MaterialId(8);

    // Combustion products
    pub const SMOKE: MaterialId = MaterialId(9);
    pub const ASH: MaterialId = MaterialId(10);

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn is_air(self) -> bool {
        self == Self::AIR
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a material moves on its own
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    /// Never moves and never takes part in a swap (stone, wood)
    Solid,
    /// Always tries to fall straight down (sand, ash)
    Powder,
    /// Falls down or slides sideways at random (water, oil, gases)
    Fluid,
}

/// Map a 0.0-1.0 fraction onto the 16-bit probability scale
pub fn probability(fraction: f32) -> u16 {
    (fraction.clamp(0.0, 1.0) * u16::MAX as f32) as u16
}

/// Properties of a single material
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    pub name: String,
    pub kind: MaterialKind,

    /// Higher sinks below lower; equal densities never swap
    pub density: u32,

    /// Chance per tick (0-65535) of turning into `decay_target`
    pub decay_probability: u16,
    pub decay_target: MaterialId,

    /// Chance (0-65535) that touching fire ignites this material
    pub ignition_probability: u16,

    /// Display colour (RGBA), only used by renderers
    pub color: [u8; 4],
}

impl Default for MaterialProperties {
    fn default() -> Self {
        Self {
            name: "unknown".to_string(),
            kind: MaterialKind::Solid,
            density: 0,
            decay_probability: 0,
            decay_target: MaterialId::AIR,
            ignition_probability: 0,
            color: [255, 0, 255, 255], // Magenta for missing materials
        }
    }
}

/// The materials a burning cell turns into
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FireVariants {
    pub gas: MaterialId,
    pub powder: MaterialId,
    pub liquid: MaterialId,
}

impl FireVariants {
    pub fn contains(&self, id: MaterialId) -> bool {
        id == self.gas || id == self.powder || id == self.liquid
    }

    /// Fire variant for a burning material of `kind`
    ///
    /// `dense` picks the non-gas variant (powder for solids and powders,
    /// liquid for fluids).
    pub fn for_kind(&self, kind: MaterialKind, dense: bool) -> MaterialId {
        match (kind, dense) {
            (_, false) => self.gas,
            (MaterialKind::Solid | MaterialKind::Powder, true) => self.powder,
            (MaterialKind::Fluid, true) => self.liquid,
        }
    }
}

impl Default for FireVariants {
    fn default() -> Self {
        Self {
            gas: MaterialId::FIRE_GAS,
            powder: MaterialId::FIRE_POWDER,
            liquid: MaterialId::FIRE_LIQUID,
        }
    }
}

/// Invariant violations in a material table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("material {0} is not registered")]
    UnknownMaterial(MaterialId),

    #[error("material {0} is missing from the table")]
    MissingEntry(MaterialId),

    #[error("material {0} is defined more than once")]
    DuplicateEntry(MaterialId),

    #[error("material {material} decays into unregistered material {target}")]
    DanglingDecayTarget {
        material: MaterialId,
        target: MaterialId,
    },

    #[error("fire variant {0} is not registered")]
    UnknownFireVariant(MaterialId),

    #[error("air must be an inert fluid: {0}")]
    AirNotInert(&'static str),

    #[error("powder {material} must be denser than air")]
    PowderLighterThanAir { material: MaterialId },

    #[error("no material named {0:?}")]
    UnknownName(String),
}

/// Registry of all materials, indexed by id
///
/// Entries may be edited while the simulation runs; the tick engine looks
/// them up on every access.
#[derive(Clone, Debug)]
pub struct MaterialRegistry {
    materials: Vec<MaterialProperties>,
    fire: FireVariants,
}

impl MaterialRegistry {
    /// Registry holding the built-in materials
    pub fn new() -> Self {
        let mut registry = Self {
            materials: Vec::new(),
            fire: FireVariants::default(),
        };
        registry.register_defaults();
        registry
    }

    /// Build a registry from `(id, properties)` pairs
    ///
    /// Ids must cover `0..n` exactly once and every reference must resolve.
    pub fn from_table(
        entries: impl IntoIterator<Item = (MaterialId, MaterialProperties)>,
        fire: FireVariants,
    ) -> Result<Self, RegistryError> {
        let mut slots: Vec<Option<MaterialProperties>> = Vec::new();
        for (id, properties) in entries {
            if slots.len() <= id.index() {
                slots.resize(id.index() + 1, None);
            }
            if slots[id.index()].is_some() {
                return Err(RegistryError::DuplicateEntry(id));
            }
            slots[id.index()] = Some(properties);
        }

        let materials = slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| slot.ok_or(RegistryError::MissingEntry(MaterialId(index as u8))))
            .collect::<Result<Vec<_>, _>>()?;

        let registry = Self { materials, fire };
        registry.validate()?;
        log::debug!("Built material registry with {} entries", registry.len());
        Ok(registry)
    }

    fn register_defaults(&mut self) {
        // Air (empty space)
        self.register(
            MaterialId::AIR,
            MaterialProperties {
                name: "air".to_string(),
                kind: MaterialKind::Fluid,
                density: 1_225,
                color: [0, 0, 0, 255],
                ..Default::default()
            },
        );

        self.register(
            MaterialId::STONE,
            MaterialProperties {
                name: "stone".to_string(),
                kind: MaterialKind::Solid,
                density: 2_600_000,
                color: [128, 128, 128, 255],
                ..Default::default()
            },
        );

        self.register(
            MaterialId::SAND,
            MaterialProperties {
                name: "sand".to_string(),
                kind: MaterialKind::Powder,
                density: 1_500_000,
                color: [194, 178, 128, 255],
                ..Default::default()
            },
        );

        self.register(
            MaterialId::WATER,
            MaterialProperties {
                name: "water".to_string(),
                kind: MaterialKind::Fluid,
                density: 1_000_000,
                color: [64, 164, 223, 255],
                ..Default::default()
            },
        );

        self.register(
            MaterialId::WOOD,
            MaterialProperties {
                name: "wood".to_string(),
                kind: MaterialKind::Solid,
                density: 700_000,
                ignition_probability: probability(0.5),
                color: [139, 90, 43, 255],
                ..Default::default()
            },
        );

        // Floats on water, burns readily
        self.register(
            MaterialId::OIL,
            MaterialProperties {
                name: "oil".to_string(),
                kind: MaterialKind::Fluid,
                density: 850_000,
                ignition_probability: probability(0.9),
                color: [50, 40, 30, 255],
                ..Default::default()
            },
        );

        // Lighter than air so air sinks through it and the flame rises
        self.register(
            MaterialId::FIRE_GAS,
            MaterialProperties {
                name: "fire_gas".to_string(),
                kind: MaterialKind::Fluid,
                density: 300,
                decay_probability: probability(0.05),
                decay_target: MaterialId::SMOKE,
                color: [255, 100, 0, 255],
                ..Default::default()
            },
        );

        // Burning embers
        self.register(
            MaterialId::FIRE_POWDER,
            MaterialProperties {
                name: "fire_powder".to_string(),
                kind: MaterialKind::Powder,
                density: 1_100_000,
                decay_probability: probability(0.03),
                decay_target: MaterialId::ASH,
                color: [255, 160, 40, 255],
                ..Default::default()
            },
        );

        // Burning oil, flashes into gas
        self.register(
            MaterialId::FIRE_LIQUID,
            MaterialProperties {
                name: "fire_liquid".to_string(),
                kind: MaterialKind::Fluid,
                density: 850_000,
                decay_probability: probability(0.03),
                decay_target: MaterialId::FIRE_GAS,
                color: [255, 60, 20, 255],
                ..Default::default()
            },
        );

        self.register(
            MaterialId::SMOKE,
            MaterialProperties {
                name: "smoke".to_string(),
                kind: MaterialKind::Fluid,
                density: 900,
                decay_probability: probability(0.01),
                decay_target: MaterialId::AIR,
                color: [60, 60, 60, 255],
                ..Default::default()
            },
        );

        self.register(
            MaterialId::ASH,
            MaterialProperties {
                name: "ash".to_string(),
                kind: MaterialKind::Powder,
                density: 600_000,
                color: [110, 110, 110, 255],
                ..Default::default()
            },
        );
    }

    fn register(&mut self, id: MaterialId, properties: MaterialProperties) {
        let index = id.index();

        // Ensure vec is large enough
        if self.materials.len() <= index {
            self.materials.resize(index + 1, MaterialProperties::default());
        }

        self.materials[index] = properties;
    }

    /// Properties of `id`
    ///
    /// Panics if `id` is not registered.
    pub fn properties(&self, id: MaterialId) -> &MaterialProperties {
        match self.materials.get(id.index()) {
            Some(properties) => properties,
            None => panic!(
                "material {id} is not registered ({} materials)",
                self.materials.len()
            ),
        }
    }

    pub fn get(&self, id: MaterialId) -> Option<&MaterialProperties> {
        self.materials.get(id.index())
    }

    /// Edit an entry and keep the edit only if the registry stays valid
    pub fn update(
        &mut self,
        id: MaterialId,
        edit: impl FnOnce(&mut MaterialProperties),
    ) -> Result<(), RegistryError> {
        let slot = self
            .materials
            .get_mut(id.index())
            .ok_or(RegistryError::UnknownMaterial(id))?;
        let previous = slot.clone();
        edit(slot);

        if let Err(err) = self.validate() {
            log::warn!("Rejected edit of material {id}: {err}");
            self.materials[id.index()] = previous;
            return Err(err);
        }

        log::debug!("Updated material {id} ({})", self.materials[id.index()].name);
        Ok(())
    }

    /// Check the table invariants
    pub fn validate(&self) -> Result<(), RegistryError> {
        let air = self
            .get(MaterialId::AIR)
            .ok_or(RegistryError::MissingEntry(MaterialId::AIR))?;
        if air.kind != MaterialKind::Fluid {
            return Err(RegistryError::AirNotInert("kind must be fluid"));
        }
        if air.decay_probability != 0 {
            return Err(RegistryError::AirNotInert("decay probability must be zero"));
        }
        if air.ignition_probability != 0 {
            return Err(RegistryError::AirNotInert("ignition probability must be zero"));
        }

        // Fluids lighter than air are gases; solids never swap
        for (index, properties) in self.materials.iter().enumerate() {
            if properties.kind == MaterialKind::Powder && properties.density <= air.density {
                return Err(RegistryError::PowderLighterThanAir {
                    material: MaterialId(index as u8),
                });
            }
        }

        for (index, properties) in self.materials.iter().enumerate() {
            if !self.contains(properties.decay_target) {
                return Err(RegistryError::DanglingDecayTarget {
                    material: MaterialId(index as u8),
                    target: properties.decay_target,
                });
            }
        }

        for variant in [self.fire.gas, self.fire.powder, self.fire.liquid] {
            if !self.contains(variant) {
                return Err(RegistryError::UnknownFireVariant(variant));
            }
        }

        Ok(())
    }

    pub fn contains(&self, id: MaterialId) -> bool {
        id.index() < self.materials.len()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Whether `id` is one of the fire variants
    pub fn is_fire(&self, id: MaterialId) -> bool {
        self.fire.contains(id)
    }

    pub fn fire_variants(&self) -> FireVariants {
        self.fire
    }

    /// Look up a material id by its name
    pub fn find_by_name(&self, name: &str) -> Option<MaterialId> {
        self.materials
            .iter()
            .position(|properties| properties.name.eq_ignore_ascii_case(name))
            .map(|index| MaterialId(index as u8))
    }

    /// Like [`MaterialRegistry::find_by_name`], as a registry error
    pub fn resolve_name(&self, name: &str) -> Result<MaterialId, RegistryError> {
        self.find_by_name(name)
            .ok_or_else(|| RegistryError::UnknownName(name.to_string()))
    }

    /// All registered ids with their properties
    pub fn iter(&self) -> impl Iterator<Item = (MaterialId, &MaterialProperties)> {
        self.materials
            .iter()
            .enumerate()
            .map(|(index, properties)| (MaterialId(index as u8), properties))
    }
}

impl Default for MaterialRegistry {
    fn default() -> Self {
        Self::new()
    }
}
