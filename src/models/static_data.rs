use crate::constants::DM_LENGTH_SHIFT;
use crate::errors::FastAcError;
use crate::models::{check_symbol_count, decoder_table_params, DataModel, TABLE_SLACK};

/// Multi-symbol model with a fixed cumulative distribution.
///
/// Alphabets larger than 16 symbols also carry a decoder acceleration
/// table mapping a truncated code fraction to a lower bound on the symbol
/// index, which seeds the decoder's bisection search.
#[derive(Debug, Clone)]
pub struct StaticDataModel {
    symbols: u32,
    last_symbol: u32,
    distribution: Vec<u32>,
    decoder_table: Vec<u32>,
    table_shift: u32,
}

impl StaticDataModel {
    /// Model where every symbol is equally likely.
    pub fn uniform(symbols: u32) -> Result<Self, FastAcError> {
        Self::build(symbols, None)
    }

    /// Model with one probability per symbol.
    ///
    /// Every entry must lie in `[0.0001, 0.9999]` and the entries must sum
    /// to 1 within `1e-4`.
    pub fn with_distribution(probability: &[f64]) -> Result<Self, FastAcError> {
        Self::build(probability.len() as u32, Some(probability))
    }

    fn build(symbols: u32, probability: Option<&[f64]>) -> Result<Self, FastAcError> {
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
            decoder_table: vec![0u32; table_len],
            table_shift: params.shift,
        };

        // compute cumulative distribution, decoder table
        let mut sum = 0.0f64;
        let mut s = 0usize;
        let uniform = 1.0 / f64::from(symbols);
        for k in 0..symbols as usize {
            let p = probability.map_or(uniform, |probs| probs[k]);
            if p < 0.0001 || p > 0.9999 {
                return Err(FastAcError::InvalidProbability(p));
            }
            model.distribution[k] = (sum * f64::from(1u32 << DM_LENGTH_SHIFT)) as u32;
            sum += p;
            if table_len != 0 {
                let w = (model.distribution[k] >> params.shift) as usize;
                while s < w {
                    s += 1;
                    model.decoder_table[s] = (k - 1) as u32;
                }
            }
        }
        if table_len != 0 {
            model.decoder_table[0] = 0;
            while s + 1 < table_len {
                s += 1;
                model.decoder_table[s] = model.last_symbol;
            }
        }

        if sum < 0.9999 || sum > 1.0001 {
            return Err(FastAcError::InvalidDistributionSum(sum));
        }
        Ok(model)
    }
}

impl DataModel for StaticDataModel {
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

    fn update_after_encode(&mut self, _symbol: u32) {}

    fn update_after_decode(&mut self, _symbol: u32) {}
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn uniform_distribution_is_even() {
        let model = StaticDataModel::uniform(4).unwrap();
        assert_eq!(model.distribution(), &[0, 8192, 16384, 24576]);
        assert!(model.decoder_table().is_empty());
    }

    #[test]
    fn explicit_distribution_is_cumulative() {
        let model = StaticDataModel::with_distribution(&[0.5, 0.25, 0.125, 0.125]).unwrap();
        assert_eq!(model.distribution(), &[0, 16384, 24576, 28672]);
    }

    #[test]
    fn rejects_bad_configurations() {
        assert!(StaticDataModel::uniform(1).is_err());
        assert!(StaticDataModel::uniform(2049).is_err());
        assert!(StaticDataModel::with_distribution(&[0.5, 0.6]).is_err());
        assert!(StaticDataModel::with_distribution(&[0.99999, 0.00001]).is_err());
    }

    #[test]
    fn table_is_a_lower_bound() {
        let model = StaticDataModel::uniform(57).unwrap();
        let table = model.decoder_table();
        assert!(!table.is_empty());
        assert_eq!(table[0], 0);
        // every entry bounds the symbol owning that code-fraction slot
        for (t, &entry) in table.iter().enumerate() {
            let dv = (t as u32) << model.table_shift();
            let owner = match model.distribution().iter().rposition(|&d| d <= dv) {
                Some(k) => k as u32,
                None => 0,
            };
            assert!(entry <= owner, "table[{}] = {} > {}", t, entry, owner);
        }
        // entries never decrease
        for pair in table.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }
}
