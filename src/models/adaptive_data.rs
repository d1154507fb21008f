use crate::constants::{DM_LENGTH_SHIFT, DM_MAX_COUNT};
use crate::errors::FastAcError;
use crate::models::{check_symbol_count, decoder_table_params, DataModel, TABLE_SLACK};

/// Multi-symbol model that re-estimates its distribution from symbol
/// counts every `update_cycle` symbols.
///
/// The cumulative distribution is only rebuilt at update time, so the
/// encoder and the decoder must drive their instances with the identical
/// symbol sequence to stay in lockstep.
#[derive(Debug, Clone)]
pub struct AdaptiveDataModel {
    symbols: u32,
    last_symbol: u32,
    distribution: Vec<u32>,
    symbol_count: Vec<u32>,
    decoder_table: Vec<u32>,
    total_count: u32,
    update_cycle: u32,
    symbols_until_update: u32,
    table_size: u32,
    table_shift: u32,
}

impl AdaptiveDataModel {
    pub fn new(symbols: u32) -> Result<Self, FastAcError> {
        check_symbol_count(symbols)?;

        let params = decoder_table_params(symbols);
        let table_len = if params.size != 0 {
            (params.size + TABLE_SLACK) as usize
        } else {
            0
        };
        let mut model = Self {
            symbols,
            last_symbol: symbols - 1,
            distribution: vec![0u32; symbols as usize],
            symbol_count: vec![0u32; symbols as usize],
            decoder_table: vec![0u32; table_len],
            total_count: 0,
            update_cycle: 0,
            symbols_until_update: 0,
            table_size: params.size,
            table_shift: params.shift,
        };
        model.reset();
        Ok(model)
    }

    /// Back to the equiprobable starting state.
    pub fn reset(&mut self) {
        self.total_count = 0;
        self.update_cycle = self.symbols;
        self.symbols_until_update = 0;
        for count in &mut self.symbol_count {
            *count = 1;
        }
        self.update(false);
        // the short first cycle deliberately overrides what update() chose
        self.update_cycle = (self.symbols + 6) >> 1;
        self.symbols_until_update = self.update_cycle;
    }

    fn update(&mut self, from_encoder: bool) {
        // halve counts when a threshold is reached
        self.total_count += self.update_cycle;
        if self.total_count > DM_MAX_COUNT {
            self.total_count = 0;
            for count in &mut self.symbol_count {
                *count = (*count + 1) >> 1;
                self.total_count += *count;
            }
        }

        // compute cumulative distribution, decoder table
        let scale = 0x8000_0000u32 / self.total_count;
        let mut sum = 0u32;
        if from_encoder || self.table_size == 0 {
            for (dist, count) in self.distribution.iter_mut().zip(&self.symbol_count) {
                *dist = (scale * sum) >> (31 - DM_LENGTH_SHIFT);
                sum += *count;
            }
        } else {
            let mut s = 0usize;
            for (k, (dist, count)) in self
                .distribution
                .iter_mut()
                .zip(&self.symbol_count)
                .enumerate()
            {
                *dist = (scale * sum) >> (31 - DM_LENGTH_SHIFT);
                sum += *count;
                let w = (*dist >> self.table_shift) as usize;
                while s < w {
                    s += 1;
                    self.decoder_table[s] = (k - 1) as u32;
                }
            }
            self.decoder_table[0] = 0;
            while s + 1 < self.decoder_table.len() {
                s += 1;
                self.decoder_table[s] = self.last_symbol;
            }
        }

        self.update_cycle = (5 * self.update_cycle) >> 2;
        let max_cycle = (self.symbols + 6) << 3;
        if self.update_cycle > max_cycle {
            self.update_cycle = max_cycle;
        }
        self.symbols_until_update = self.update_cycle;
    }
}

impl DataModel for AdaptiveDataModel {
    fn symbols(&self) -> u32 {
        self.symbols
    }

    fn last_symbol(&self) -> u32 {
        self.last_symbol
    }

    fn distribution(&self) -> &[u32] {
        &self.distribution
    }

    fn decoder_table(&self) -> &[u32] {
        &self.decoder_table
    }

    fn table_shift(&self) -> u32 {
        self.table_shift
    }

    fn update_after_encode(&mut self, symbol: u32) {
        self.symbol_count[symbol as usize] += 1;
        self.symbols_until_update -= 1;
        if self.symbols_until_update == 0 {
            self.update(true);
        }
    }

    fn update_after_decode(&mut self, symbol: u32) {
        self.symbol_count[symbol as usize] += 1;
        self.symbols_until_update -= 1;
        if self.symbols_until_update == 0 {
            self.update(false);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn starts_equiprobable() {
        let model = AdaptiveDataModel::new(8).unwrap();
        assert_eq!(model.distribution(), &[0, 4096, 8192, 12288, 16384, 20480, 24576, 28672]);
        assert_eq!(model.update_cycle, (8 + 6) >> 1);
        assert_eq!(model.symbols_until_update, model.update_cycle);
    }

    #[test]
    fn encoder_and_decoder_updates_agree_on_distribution() {
        let mut enc = AdaptiveDataModel::new(64).unwrap();
        let mut dec = AdaptiveDataModel::new(64).unwrap();
        for i in 0..10_000u32 {
            let sym = (i * i) % 64;
            enc.update_after_encode(sym);
            dec.update_after_decode(sym);
            assert_eq!(enc.distribution(), dec.distribution());
        }
    }

    #[test]
    fn counts_are_halved_at_the_ceiling() {
        let mut model = AdaptiveDataModel::new(2).unwrap();
        for _ in 0..1_000_000 {
            model.update_after_encode(0);
            assert!(model.total_count <= DM_MAX_COUNT);
        }
        // skew must survive the halvings
        assert!(model.symbol_count[0] > 100 * model.symbol_count[1]);
    }

    #[test]
    fn update_cycle_is_capped() {
        let mut model = AdaptiveDataModel::new(16).unwrap();
        for i in 0..100_000u32 {
            model.update_after_encode(i % 16);
        }
        assert_eq!(model.update_cycle, (16 + 6) << 3);
    }
}
