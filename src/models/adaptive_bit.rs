use crate::constants::{BM_LENGTH_SHIFT, BM_MAX_COUNT};
use crate::models::BitModel;

/// Bit model that re-estimates `P(0)` from observed counts.
///
/// The estimate is refreshed every `update_cycle` bits; the cycle starts
/// short so a fresh model adapts quickly and lengthens geometrically to
/// amortize the rescaling cost.
#[derive(Debug, Clone)]
pub struct AdaptiveBitModel {
    bit_0_count: u32,
    bit_count: u32,
    bit_0_prob: u32,
    update_cycle: u32,
    bits_until_update: u32,
}

impl AdaptiveBitModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the equiprobable starting state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Current estimate of `P(0)`.
    pub fn probability_0(&self) -> f64 {
        f64::from(self.bit_0_prob) / f64::from(1u32 << BM_LENGTH_SHIFT)
    }

    fn update(&mut self) {
        // halve counts when a threshold is reached
        self.bit_count += self.update_cycle;
        if self.bit_count > BM_MAX_COUNT {
            self.bit_count = (self.bit_count + 1) >> 1;
            self.bit_0_count = (self.bit_0_count + 1) >> 1;

            if self.bit_0_count == self.bit_count {
                self.bit_count += 1;
            }
        }

        // compute scaled bit 0 probability
        let scale = 0x8000_0000u32 / self.bit_count;
        self.bit_0_prob = (self.bit_0_count * scale) >> (31 - BM_LENGTH_SHIFT);

        // set frequency of model updates
        self.update_cycle = (5 * self.update_cycle) >> 2;
        if self.update_cycle > 64 {
            self.update_cycle = 64;
        }
        self.bits_until_update = self.update_cycle;
    }
}

impl Default for AdaptiveBitModel {
    fn default() -> Self {
        // initialization to equiprobable model
        Self {
            bit_0_count: 1,
            bit_count: 2,
            bit_0_prob: 1u32 << (BM_LENGTH_SHIFT - 1),
            // start with frequent updates
            update_cycle: 4,
            bits_until_update: 4,
        }
    }
}

impl BitModel for AdaptiveBitModel {
    fn bit_0_prob(&self) -> u32 {
        self.bit_0_prob
    }

    fn update_after_coding(&mut self, bit: u32) {
        if bit == 0 {
            self.bit_0_count += 1;
        }
        self.bits_until_update -= 1;
        if self.bits_until_update == 0 {
            self.update();
        }
    }
}
