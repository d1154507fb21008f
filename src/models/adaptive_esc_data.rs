use crate::constants::{DM_LENGTH_SHIFT, DM_MAX_COUNT};
use crate::errors::FastAcError;
use crate::models::{check_symbol_count, decoder_table_params, DataModel, TABLE_SLACK};

/// Adaptive multi-symbol model whose last symbol is an *escape*.
///
/// A fresh model can only code the escape; a caller that wants to code a
/// still-unseen symbol first codes the escape, transports the symbol
/// through some wider channel, and registers it with [`add_symbol`] on
/// both sides. Probability mass not yet claimed by observed symbols sits
/// on the escape, so rarely-escaping streams pay almost nothing for it.
///
/// [`add_symbol`]: AdaptiveEscDataModel::add_symbol
#[derive(Debug, Clone)]
pub struct AdaptiveEscDataModel {
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

impl AdaptiveEscDataModel {
    /// Model over `alphabet` caller symbols plus the internal escape.
    pub fn new(alphabet: u32) -> Result<Self, FastAcError> {
        check_symbol_count(alphabet)?;

        let symbols = alphabet + 1;
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

    /// Back to the empty state where only the escape can be coded.
    pub fn reset(&mut self) {
        self.total_count = 0;
        self.update_cycle = self.symbols;
        self.symbols_until_update = 0;
        for count in &mut self.symbol_count {
            *count = 0;
        }
        self.symbol_count[self.last_symbol as usize] = 1;
        self.update(false);
        // the short first cycle deliberately overrides what update() chose
        self.update_cycle = (self.symbols + 6) >> 1;
        self.symbols_until_update = self.update_cycle;
    }

    /// The escape symbol's index.
    pub fn escape_symbol(&self) -> u32 {
        self.last_symbol
    }

    /// Whether `symbol` can currently be coded without an escape.
    pub fn has_symbol(&self, symbol: u32) -> bool {
        self.symbol_count
            .get(symbol as usize)
            .map_or(false, |&count| count > 0)
    }

    /// Registers a symbol right after an escape so it becomes codable.
    ///
    /// Runs an immediate update; the decoder-side instance must do the
    /// same at the matching point of its symbol stream.
    pub fn add_symbol(&mut self, symbol: u32) {
        self.symbol_count[symbol as usize] += 1;
        self.symbols_until_update -= 1;
        self.update(false);
    }

    fn update(&mut self, from_encoder: bool) {
        // add_symbol may run this mid-cycle, so only the symbols actually
        // observed since the previous update are accounted for; the mass
        // that never lands on a counted symbol stays on the escape
        self.total_count += self.update_cycle - self.symbols_until_update;
        if self.total_count > DM_MAX_COUNT {
            // halve counts when a threshold is reached
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

impl DataModel for AdaptiveEscDataModel {
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

    fn has_symbol(&self, symbol: u32) -> bool {
        AdaptiveEscDataModel::has_symbol(self, symbol)
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
