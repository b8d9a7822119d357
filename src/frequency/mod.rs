use std::{collections::BTreeMap, thread};

use serde::{Serialize, Deserialize};

use crate::Symbol;

/// Occurrence counts of every symbol seen in an input.
///
/// Only observed symbols are keys, so the counts always sum to the input length.
/// Iteration is in ascending symbol order.
#[derive(Clone, Default, Eq, PartialEq, Serialize, Deserialize, Debug)]
pub struct FrequencyTable {
    counts: BTreeMap<Symbol, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts `input` in a single pass.
    pub fn count(input: &[Symbol]) -> Self {
        let mut histogram = [0usize; 256];
        for &x in input.iter() {
            histogram[x as usize] += 1;
        }

        Self::from_histogram(&histogram)
    }

    /// Counts `input` on up to `shards` scoped threads and merges the partial tables.
    ///
    /// Counting is commutative, so the result equals [`FrequencyTable::count`].
    pub fn count_sharded(input: &[Symbol], shards: usize) -> Self {
        let shards = shards.max(1).min(input.len().max(1));
        if shards == 1 {
            return Self::count(input);
        }

        let chunk_len = (input.len() + shards - 1) / shards;

        thread::scope(|scope| {
            let workers: Vec<_> = input
                .chunks(chunk_len)
                .map(|chunk| scope.spawn(move || Self::count(chunk)))
                .collect();

            let mut table = Self::new();
            for worker in workers {
                match worker.join() {
                    Ok(partial) => table.merge(&partial),
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
            table
        })
    }

    fn from_histogram(histogram: &[usize; 256]) -> Self {
        let counts = histogram
            .iter()
            .enumerate()
            .filter(|&(_, &freq)| freq > 0)
            .map(|(s, &freq)| (s as Symbol, freq))
            .collect();

        Self { counts }
    }

    /// Adds the counts of `other` into `self`.
    pub fn merge(&mut self, other: &FrequencyTable) {
        for (&s, &freq) in other.counts.iter() {
            self.counts.entry(s).and_modify(|f| *f += freq).or_insert(freq);
        }
    }

    #[inline(always)]
    pub fn get(&self, symbol: Symbol) -> Option<usize> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the length of the counted input.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, usize)> + '_ {
        self.counts.iter().map(|(&s, &freq)| (s, freq))
    }
}

impl FromIterator<(Symbol, usize)> for FrequencyTable {
    /// Collects `(symbol, count)` pairs, summing repeated symbols and dropping zero counts.
    fn from_iter<I: IntoIterator<Item = (Symbol, usize)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (s, freq) in iter {
            if freq == 0 {
                continue;
            }
            table.counts.entry(s).and_modify(|f| *f += freq).or_insert(freq);
        }
        table
    }
}
