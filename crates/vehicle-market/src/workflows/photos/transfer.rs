use rand::Rng;

use super::domain::PhotoAsset;

/// Drives a photo transfer: how far each tick gets and how the transfer ends.
pub trait TransferDriver: Send + Sync {
    /// Percentage points gained on one tick.
    fn next_increment(&self) -> u8;

    /// Called once progress reaches 100. `Ok` carries the remote locator, `Err` the
    /// transport error reported to the seller.
    fn finish(&self, asset: &PhotoAsset) -> Result<String, String>;
}

/// Stand-in for a storage backend: random progress, and the preview doubles as the
/// remote locator.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedTransfer {
    max_step: u8,
}

impl SimulatedTransfer {
    pub fn new(max_step: u8) -> Self {
        Self {
            max_step: max_step.max(1),
        }
    }
}

impl Default for SimulatedTransfer {
    fn default() -> Self {
        Self::new(30)
    }
}

impl TransferDriver for SimulatedTransfer {
    fn next_increment(&self) -> u8 {
        rand::rng().random_range(1..=self.max_step)
    }

    fn finish(&self, asset: &PhotoAsset) -> Result<String, String> {
        Ok(asset.preview.clone())
    }
}

/// Deterministic driver advancing by a constant step.
#[derive(Debug, Clone)]
pub struct FixedStepTransfer {
    step: u8,
    failure: Option<String>,
}

impl FixedStepTransfer {
    pub fn succeeding(step: u8) -> Self {
        Self {
            step: step.max(1),
            failure: None,
        }
    }

    pub fn failing(step: u8, message: impl Into<String>) -> Self {
        Self {
            step: step.max(1),
            failure: Some(message.into()),
        }
    }

    /// Ticks needed to go from 0 to 100.
    pub fn ticks_to_complete(&self) -> u32 {
        let step = u32::from(self.step);
        100_u32.div_ceil(step)
    }
}

impl TransferDriver for FixedStepTransfer {
    fn next_increment(&self) -> u8 {
        self.step
    }

    fn finish(&self, asset: &PhotoAsset) -> Result<String, String> {
        match &self.failure {
            Some(message) => Err(message.clone()),
            None => Ok(asset.preview.clone()),
        }
    }
}
