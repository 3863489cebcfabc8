use rand::Rng;

use crate::errors::{SelectError, SelectResult};

///
/// Walker alias table: O(1) draws from a fixed discrete distribution.
///
/// Column `j` keeps itself with probability `probability[j]` and otherwise
/// hands the draw to `alias[j]`. A column with no alias always keeps itself.
///
#[derive(Debug, Clone)]
pub struct AliasTable {
    probability: Vec<f64>,
    alias: Vec<Option<usize>>,
}

impl AliasTable {
    ///
    /// Build the table from non-negative weights with a positive sum.
    ///
    pub fn new(weights: &[f64]) -> SelectResult<Self> {
        if weights.is_empty() {
            return Err(SelectError::InvalidWeights("no weights given".to_string()));
        }
        if let Some((i, w)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(SelectError::InvalidWeights(format!(
                "weight {} at index {} is not a finite non-negative number",
                w, i
            )));
        }
        let total: f64 = weights.iter().sum();
        if !(total.is_finite() && total > 0.0) {
            return Err(SelectError::InvalidWeights(format!(
                "weights must have a positive finite sum, got {}",
                total
            )));
        }

        let n = weights.len();
        let scale = n as f64 / total;
        let mut probability: Vec<f64> = weights.iter().map(|w| w * scale).collect();
        let mut alias: Vec<Option<usize>> = vec![None; n];

        let mut light: Vec<usize> = (0..n).filter(|&i| probability[i] < 1.0).collect();
        let mut heavy: Vec<usize> = (0..n).filter(|&i| probability[i] > 1.0).collect();

        while let (Some(&j), Some(&k)) = (light.last(), heavy.last()) {
            light.pop();
            alias[j] = Some(k);
            probability[k] -= 1.0 - probability[j];
            if probability[k] <= 1.0 {
                heavy.pop();
                if probability[k] < 1.0 {
                    light.push(k);
                }
            }
        }

        Ok(AliasTable { probability, alias })
    }

    pub fn len(&self) -> usize {
        self.probability.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probability.is_empty()
    }

    pub fn probability(&self) -> &[f64] {
        &self.probability
    }

    pub fn alias(&self) -> &[Option<usize>] {
        &self.alias
    }

    ///
    /// The probability the table assigns to each index
    ///
    pub fn implied_distribution(&self) -> Vec<f64> {
        let n = self.len() as f64;
        let mut dist: Vec<f64> = self.probability.iter().map(|p| p.min(1.0) / n).collect();
        for (j, alias) in self.alias.iter().enumerate() {
            if let Some(k) = alias {
                dist[*k] += (1.0 - self.probability[j]) / n;
            }
        }
        dist
    }

    /// One draw: a uniform column, then a biased coin.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let j = rng.random_range(0..self.probability.len());
        let coin: f64 = rng.random();
        if coin <= self.probability[j] {
            j
        } else {
            self.alias[j].unwrap_or(j)
        }
    }
}
