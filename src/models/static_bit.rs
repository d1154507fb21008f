use crate::constants::BM_LENGTH_SHIFT;
use crate::models::BitModel;

/// Bit model with a fixed probability of the bit `0`.
#[derive(Debug, Clone)]
pub struct StaticBitModel {
    bit_0_prob: u32,
}

impl StaticBitModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Model already set to `P(0) = p`.
    pub fn with_probability_0(p: f64) -> Self {
        let mut model = Self::default();
        model.set_probability_0(p);
        model
    }

    /// Sets `P(0)`, clamped to `[0.0001, 0.9999]`.
    pub fn set_probability_0(&mut self, mut p: f64) {
        if p < 0.0001 {
            p = 0.0001;
        }
        if p > 0.9999 {
            p = 0.9999;
        }
        // the scaled probability must leave both bits a non-empty
        // subinterval
        self.bit_0_prob = ((p * f64::from(1u32 << BM_LENGTH_SHIFT)) as u32).max(1);
    }
}

impl Default for StaticBitModel {
    fn default() -> Self {
        // equiprobable
        Self {
            bit_0_prob: 1u32 << (BM_LENGTH_SHIFT - 1),
        }
    }
}

impl BitModel for StaticBitModel {
    fn bit_0_prob(&self) -> u32 {
        self.bit_0_prob
    }

    fn update_after_coding(&mut self, _bit: u32) {}
}
