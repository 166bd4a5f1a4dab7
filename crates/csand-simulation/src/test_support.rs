//! Deterministic generators for unit tests

use rand::RngCore;

/// RNG that returns the same value forever
///
/// With 1: every `chance(p)` for p > 1 passes, dx = 0, dy = -1, coin = true.
/// With 2: dx = 1, dy = 0.
///
/// `tests/common` carries a copy for the integration tests.
pub struct FixedRng(pub u32);

impl RngCore for FixedRng {
    fn next_u32(&mut self) -> u32 {
        self.0
    }

    fn next_u64(&mut self) -> u64 {
        u64::from(self.0)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// RNG replaying a fixed list of values, then repeating a fallback
pub struct ScriptedRng {
    values: Vec<u32>,
    position: usize,
    fallback: u32,
}

impl ScriptedRng {
    pub fn new(values: &[u32], fallback: u32) -> Self {
        Self {
            values: values.to_vec(),
            position: 0,
            fallback,
        }
    }

    /// Number of values drawn so far
    pub fn drawn(&self) -> usize {
        self.position
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        let value = self
            .values
            .get(self.position)
            .copied()
            .unwrap_or(self.fallback);
        self.position += 1;
        value
    }

    fn next_u64(&mut self) -> u64 {
        u64::from(self.next_u32())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
