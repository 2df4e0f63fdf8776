//! Weighted value selection.

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;

use crate::errors::GenerationError;

/// A set of values with selection probability proportional to weight.
/// Weight 0 is legal and excludes that value.
#[derive(Debug)]
pub struct WeightedSet {
    values: Vec<String>,
    index: WeightedIndex<u64>,
}

impl WeightedSet {
    pub fn new(values: &[String], weights: &[u64]) -> Result<Self, GenerationError> {
        if values.len() != weights.len() {
            return Err(GenerationError::InvalidColumn(format!(
                "set has {} values but {} weights",
                values.len(),
                weights.len()
            )));
        }

        let index = WeightedIndex::new(weights.iter().copied()).map_err(|err| {
            GenerationError::InvalidColumn(format!("building weighted selection: {err}"))
        })?;

        Ok(Self {
            values: values.to_vec(),
            index,
        })
    }

    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        &self.values[self.index.sample(rng)]
    }
}
