//! Input events and the controls they drive
//!
//! The simulation loop never sees raw keys. Front ends translate key presses
//! into [`InputEvent`]s and feed them to [`Controls`], which decides how many
//! ticks the next frame runs and which material the cursor paints.

use csand_simulation::{MaterialId, MaterialRegistry};

/// User commands understood by the simulation loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Paint with this material from now on
    SelectMaterial(MaterialId),
    PauseToggle,
    /// Double the number of ticks per frame
    SpeedIncrease,
    /// Halve the number of ticks per frame
    SpeedDecrease,
    /// Run exactly one tick, then stay paused
    Step,
}

impl InputEvent {
    /// Keyboard mapping
    ///
    /// Digits select the material with that id, space toggles pause, `=`
    /// speeds up, `-` slows down and `.` single-steps.
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            ' ' => Some(Self::PauseToggle),
            '=' => Some(Self::SpeedIncrease),
            '-' => Some(Self::SpeedDecrease),
            '.' => Some(Self::Step),
            digit => digit
                .to_digit(10)
                .map(|id| Self::SelectMaterial(MaterialId(id as u8))),
        }
    }

    /// Translate a string of key presses, skipping unmapped keys
    pub fn parse_script(keys: &str) -> Vec<Self> {
        keys.chars()
            .filter_map(|key| {
                let event = Self::from_key(key);
                if event.is_none() {
                    log::warn!("Ignoring unmapped key {:?}", key);
                }
                event
            })
            .collect()
    }
}

/// Pause, speed and brush state of a running session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Controls {
    paused: bool,
    speed: u32,
    speed_limit: u32,
    draw_material: MaterialId,
    pending_step: bool,
}

impl Controls {
    pub fn new(speed: u32, speed_limit: u32, draw_material: MaterialId) -> Self {
        let speed_limit = speed_limit.max(1);
        Self {
            paused: false,
            speed: speed.clamp(1, speed_limit),
            speed_limit,
            draw_material,
            pending_step: false,
        }
    }

    pub fn with_paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn speed_limit(&self) -> u32 {
        self.speed_limit
    }

    pub fn draw_material(&self) -> MaterialId {
        self.draw_material
    }

    pub fn pending_step(&self) -> bool {
        self.pending_step
    }

    /// Apply one input event
    ///
    /// Selecting a material that is not registered is ignored.
    pub fn handle(&mut self, event: InputEvent, registry: &MaterialRegistry) {
        match event {
            InputEvent::SelectMaterial(id) => match registry.get(id) {
                Some(properties) => {
                    self.draw_material = id;
                    log::info!("Drawing with {} ({})", properties.name, id);
                }
                None => log::warn!("No material {} to select", id),
            },
            InputEvent::PauseToggle => {
                self.paused = !self.paused;
                self.pending_step = false;
                log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
            }
            InputEvent::SpeedIncrease => {
                if self.speed < self.speed_limit {
                    self.speed = self.speed.saturating_mul(2).min(self.speed_limit);
                }
                log::info!("Speed: {}", self.speed);
            }
            InputEvent::SpeedDecrease => {
                if self.speed > 1 {
                    self.speed /= 2;
                }
                log::info!("Speed: {}", self.speed);
            }
            InputEvent::Step => {
                self.paused = true;
                self.pending_step = true;
            }
        }
    }

    /// Number of ticks the next frame runs, consuming a pending step
    pub fn take_frame_ticks(&mut self) -> u32 {
        if std::mem::take(&mut self.pending_step) {
            1
        } else if self.paused {
            0
        } else {
            self.speed
        }
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new(1, 128, MaterialId::SAND)
    }
}
